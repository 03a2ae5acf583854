//! Testimonial requests and their review workflow.
//!
//! Every status change is a conditional update on the expected source state,
//! so two concurrent submissions of the same token cannot both succeed.

use crate::{fetch_page, search_condition};
use chrono::Utc;
use folio_error::{storage::StorageError, StorageResult};
use folio_models::{
    domain::prelude::{
        search_term, PageWithStats, SubmitTestimonial, TestimonialPageParams, TestimonialStats,
        UpdateTestimonial,
    },
    entities::prelude::{
        Testimonial, TestimonialActiveModel, TestimonialColumn, TestimonialModel,
    },
    enums::common::{EntityType, PublicationStatus, TestimonialEvent, TestimonialStatus},
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait,
    FromQueryResult, IntoActiveModel, Order, QueryFilter, QueryOrder, QuerySelect, QueryTrait,
    Set,
};
use tracing::{info, instrument};

const ALREADY_SUBMITTED: &str = "testimonial has already been submitted";
const NOT_REVIEWABLE: &str = "only submitted testimonials can be reviewed";
const NOT_PUBLISHABLE: &str = "only approved testimonials can be published";
const NOT_REMINDABLE: &str = "reminders can only be sent for pending testimonials";

#[derive(Debug, FromQueryResult)]
struct StatusCount {
    status: TestimonialStatus,
    count: i64,
}

pub struct TestimonialRepository;

impl TestimonialRepository {
    pub async fn create<C>(
        testimonial: TestimonialActiveModel,
        db: &C,
    ) -> StorageResult<TestimonialModel>
    where
        C: ConnectionTrait,
    {
        testimonial
            .insert(db)
            .await
            .map_err(|e| StorageError::from_db(e, "testimonial token"))
    }

    pub async fn find_by_id<C>(id: i32, db: &C) -> StorageResult<Option<TestimonialModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Testimonial::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_token<C>(token: &str, db: &C) -> StorageResult<Option<TestimonialModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Testimonial::find()
            .filter(TestimonialColumn::Token.eq(token))
            .one(db)
            .await?)
    }

    /// The request behind a form link, as long as it still awaits an answer.
    pub async fn find_open_by_token<C>(token: &str, db: &C) -> StorageResult<TestimonialModel>
    where
        C: ConnectionTrait,
    {
        let testimonial = Self::find_by_token(token, db)
            .await?
            .ok_or_else(not_found)?;
        if testimonial.status != TestimonialStatus::Pending {
            return Err(StorageError::InvalidState(ALREADY_SUBMITTED.into()));
        }
        Ok(testimonial)
    }

    pub async fn update<C>(changes: UpdateTestimonial, db: &C) -> StorageResult<TestimonialModel>
    where
        C: ConnectionTrait,
    {
        let current = Self::require(changes.id, db).await?;
        let mut active = current.clone().into_active_model();
        changes.apply(&mut active);
        if !active.is_changed() {
            return Ok(current);
        }
        Ok(active.update(db).await?)
    }

    pub async fn delete<C>(id: i32, db: &C) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        let res = Testimonial::delete_by_id(id).exec(db).await?;
        if res.rows_affected == 0 {
            return Err(not_found());
        }
        Ok(())
    }

    pub async fn page<C>(
        params: &TestimonialPageParams,
        db: &C,
    ) -> StorageResult<PageWithStats<TestimonialModel, TestimonialStats>>
    where
        C: ConnectionTrait,
    {
        let query = Testimonial::find()
            .apply_if(search_term(&params.search), |q, term| {
                q.filter(search_condition(
                    &term,
                    &[
                        TestimonialColumn::ClientName,
                        TestimonialColumn::ClientEmail,
                        TestimonialColumn::ClientCompany,
                        TestimonialColumn::Content,
                    ],
                ))
            })
            .apply_if(params.status, |q, status| {
                q.filter(TestimonialColumn::Status.eq(status))
            })
            .apply_if(params.publication_status, |q, status| {
                q.filter(TestimonialColumn::PublicationStatus.eq(status))
            })
            .order_by(TestimonialColumn::CreatedAt, Order::Desc)
            .order_by(TestimonialColumn::Id, Order::Desc);

        Ok(PageWithStats {
            page: fetch_page(query, &params.page, db).await?,
            stats: Self::stats(db).await?,
        })
    }

    pub async fn stats<C>(db: &C) -> StorageResult<TestimonialStats>
    where
        C: ConnectionTrait,
    {
        let rows = Testimonial::find()
            .select_only()
            .column(TestimonialColumn::Status)
            .column_as(TestimonialColumn::Status.count(), "count")
            .group_by(TestimonialColumn::Status)
            .into_model::<StatusCount>()
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .fold(TestimonialStats::default(), |mut stats, row| {
                stats.record(row.status, row.count as u64);
                stats
            }))
    }

    /// Client answer: `PENDING` to `SUBMITTED`.
    #[instrument(name = "testimonial-submit", skip_all)]
    pub async fn submit<C>(answer: SubmitTestimonial, db: &C) -> StorageResult<TestimonialModel>
    where
        C: ConnectionTrait,
    {
        let current = Self::find_by_token(&answer.token, db)
            .await?
            .ok_or_else(not_found)?;
        let next = current
            .status
            .transition(TestimonialEvent::Submit)
            .ok_or_else(|| StorageError::InvalidState(ALREADY_SUBMITTED.into()))?;

        let changes = TestimonialActiveModel {
            content: Set(answer.content),
            rating: Set(Some(answer.rating)),
            client_position: non_blank(answer.client_position),
            client_company: non_blank(answer.client_company),
            status: Set(next),
            submitted_at: Set(Some(Utc::now())),
            ..Default::default()
        };
        Self::transition(current.id, current.status, changes, ALREADY_SUBMITTED, db).await?;
        info!(id = current.id, "Testimonial submitted");
        Self::require(current.id, db).await
    }

    /// Admin verdict on a submitted testimonial. Rejection also unpublishes it.
    #[instrument(name = "testimonial-review", skip(db))]
    pub async fn review<C>(id: i32, approve: bool, db: &C) -> StorageResult<TestimonialModel>
    where
        C: ConnectionTrait,
    {
        let current = Self::require(id, db).await?;
        let event = if approve {
            TestimonialEvent::Approve
        } else {
            TestimonialEvent::Reject
        };
        let next = current
            .status
            .transition(event)
            .ok_or_else(|| StorageError::InvalidState(NOT_REVIEWABLE.into()))?;

        let changes = if approve {
            TestimonialActiveModel {
                status: Set(next),
                approved_at: Set(Some(Utc::now())),
                ..Default::default()
            }
        } else {
            TestimonialActiveModel {
                status: Set(next),
                publication_status: Set(PublicationStatus::Draft),
                ..Default::default()
            }
        };
        Self::transition(id, current.status, changes, NOT_REVIEWABLE, db).await?;
        Self::require(id, db).await
    }

    /// Publishing requires an approved testimonial; unpublishing is always allowed.
    pub async fn change_publication<C>(
        id: i32,
        publication_status: PublicationStatus,
        db: &C,
    ) -> StorageResult<TestimonialModel>
    where
        C: ConnectionTrait,
    {
        let res = Testimonial::update_many()
            .set(TestimonialActiveModel {
                publication_status: Set(publication_status),
                ..Default::default()
            })
            .filter(TestimonialColumn::Id.eq(id))
            .apply_if(publication_status.is_public().then_some(()), |q, _| {
                q.filter(TestimonialColumn::Status.eq(TestimonialStatus::Approved))
            })
            .exec(db)
            .await?;

        if res.rows_affected == 0 {
            // Either the row is missing or it is not approved yet.
            Self::require(id, db).await?;
            return Err(StorageError::InvalidState(NOT_PUBLISHABLE.into()));
        }
        Self::require(id, db).await
    }

    /// Bumps the reminder counter of a pending request.
    pub async fn record_reminder<C>(id: i32, db: &C) -> StorageResult<TestimonialModel>
    where
        C: ConnectionTrait,
    {
        let res = Testimonial::update_many()
            .col_expr(
                TestimonialColumn::ReminderCount,
                Expr::col(TestimonialColumn::ReminderCount).add(1),
            )
            .col_expr(TestimonialColumn::LastReminderAt, Expr::value(Utc::now()))
            .filter(TestimonialColumn::Id.eq(id))
            .filter(TestimonialColumn::Status.eq(TestimonialStatus::Pending))
            .exec(db)
            .await?;

        if res.rows_affected == 0 {
            Self::require(id, db).await?;
            return Err(StorageError::InvalidState(NOT_REMINDABLE.into()));
        }
        Self::require(id, db).await
    }

    /// Approved and published testimonials, most recently approved first.
    pub async fn find_public<C>(db: &C) -> StorageResult<Vec<TestimonialModel>>
    where
        C: ConnectionTrait,
    {
        Ok(Testimonial::find()
            .filter(TestimonialColumn::Status.eq(TestimonialStatus::Approved))
            .filter(TestimonialColumn::PublicationStatus.eq(PublicationStatus::Published))
            .order_by_desc(TestimonialColumn::ApprovedAt)
            .order_by_desc(TestimonialColumn::Id)
            .all(db)
            .await?)
    }

    async fn transition<C>(
        id: i32,
        from: TestimonialStatus,
        changes: TestimonialActiveModel,
        conflict: &str,
        db: &C,
    ) -> StorageResult<()>
    where
        C: ConnectionTrait,
    {
        let res = Testimonial::update_many()
            .set(changes)
            .filter(TestimonialColumn::Id.eq(id))
            .filter(TestimonialColumn::Status.eq(from))
            .exec(db)
            .await?;
        if res.rows_affected == 0 {
            return Err(StorageError::InvalidState(conflict.into()));
        }
        Ok(())
    }

    async fn require<C>(id: i32, db: &C) -> StorageResult<TestimonialModel>
    where
        C: ConnectionTrait,
    {
        Self::find_by_id(id, db).await?.ok_or_else(not_found)
    }
}

#[inline]
fn not_found() -> StorageError {
    StorageError::EntityNotFound(EntityType::Testimonial.to_string())
}

fn non_blank(value: Option<String>) -> ActiveValue<Option<String>> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => Set(Some(v)),
        None => ActiveValue::NotSet,
    }
}
