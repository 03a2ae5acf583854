use folio_macros::IntoActiveValue;
use sea_orm::{DeriveActiveEnum, EnumIter};
use sea_query::StringLen;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Visibility of a content entity on the public site.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    IntoActiveValue,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(16))",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PublicationStatus {
    #[inline]
    pub fn is_public(&self) -> bool {
        matches!(self, PublicationStatus::Published)
    }
}

/// Role mirrored from the identity provider onto the local user record.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    IntoActiveValue,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(16))",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Editor,
    #[default]
    User,
}

impl UserRole {
    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

/// Review workflow of a testimonial request.
///
/// ```text
/// PENDING --submit--> SUBMITTED --approve--> APPROVED
///                         |
///                         +------reject----> REJECTED
/// ```
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    IntoActiveValue,
)]
#[sea_orm(
    rs_type = "String",
    db_type = "String(StringLen::N(16))",
    rename_all = "SCREAMING_SNAKE_CASE"
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestimonialStatus {
    #[default]
    Pending,
    Submitted,
    Approved,
    Rejected,
}

/// Actions that move a testimonial through [`TestimonialStatus`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TestimonialEvent {
    /// Client filled in the tokenized form.
    Submit,
    /// Admin accepted the submitted content.
    Approve,
    /// Admin refused the submitted content.
    Reject,
}

impl TestimonialStatus {
    /// Returns the next state, or `None` when `event` is not allowed from `self`.
    pub fn transition(self, event: TestimonialEvent) -> Option<TestimonialStatus> {
        match (self, event) {
            (TestimonialStatus::Pending, TestimonialEvent::Submit) => {
                Some(TestimonialStatus::Submitted)
            }
            (TestimonialStatus::Submitted, TestimonialEvent::Approve) => {
                Some(TestimonialStatus::Approved)
            }
            (TestimonialStatus::Submitted, TestimonialEvent::Reject) => {
                Some(TestimonialStatus::Rejected)
            }
            _ => None,
        }
    }

    /// Reminders only make sense while the client has not answered yet.
    #[inline]
    pub fn accepts_reminder(&self) -> bool {
        matches!(self, TestimonialStatus::Pending)
    }
}

/// Entity kinds, used for not-found / conflict messages and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityType {
    SiteConfig,
    User,
    Service,
    Portfolio,
    Technology,
    BlogPost,
    BlogComment,
    Testimonial,
}

impl EntityType {
    /// Returns the display name of the entity type
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SiteConfig => "SiteConfig",
            Self::User => "User",
            Self::Service => "Service",
            Self::Portfolio => "Portfolio",
            Self::Technology => "Technology",
            Self::BlogPost => "BlogPost",
            Self::BlogComment => "BlogComment",
            Self::Testimonial => "Testimonial",
        }
    }
}

impl Display for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn pending_submits_once() {
        let submitted = TestimonialStatus::Pending
            .transition(TestimonialEvent::Submit)
            .unwrap();
        assert_eq!(submitted, TestimonialStatus::Submitted);
        assert_eq!(submitted.transition(TestimonialEvent::Submit), None);
    }

    #[test]
    fn only_submitted_can_be_reviewed() {
        assert_eq!(
            TestimonialStatus::Submitted.transition(TestimonialEvent::Approve),
            Some(TestimonialStatus::Approved)
        );
        assert_eq!(
            TestimonialStatus::Submitted.transition(TestimonialEvent::Reject),
            Some(TestimonialStatus::Rejected)
        );
        assert_eq!(
            TestimonialStatus::Pending.transition(TestimonialEvent::Approve),
            None
        );
        assert_eq!(
            TestimonialStatus::Approved.transition(TestimonialEvent::Reject),
            None
        );
    }

    #[test]
    fn reminders_only_for_pending() {
        for status in TestimonialStatus::iter() {
            assert_eq!(
                status.accepts_reminder(),
                status == TestimonialStatus::Pending
            );
        }
    }

    #[test]
    fn statuses_use_screaming_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&PublicationStatus::Published).unwrap(),
            "\"PUBLISHED\""
        );
        assert_eq!(
            serde_json::from_str::<UserRole>("\"ADMIN\"").unwrap(),
            UserRole::Admin
        );
        assert!(serde_json::from_str::<UserRole>("\"ROOT\"").is_err());
    }
}
