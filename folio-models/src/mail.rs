//! Outgoing email messages built in code (plain text only).

use crate::entities::prelude::TestimonialModel;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
}

/// Link to the client-facing testimonial form.
pub fn testimonial_form_url(site_url: &str, token: &str) -> String {
    format!("{}/testimonials/{}", site_url.trim_end_matches('/'), token)
}

/// Request (or reminder) asking a client to fill in their testimonial.
pub fn testimonial_request(
    site_name: &str,
    site_url: &str,
    testimonial: &TestimonialModel,
    reminder: bool,
) -> MailMessage {
    let link = testimonial_form_url(site_url, &testimonial.token);
    let subject = if reminder {
        format!("Reminder: share your experience with {}", site_name)
    } else {
        format!("Share your experience with {}", site_name)
    };
    let text = format!(
        "Hi {name},\n\n\
         Thank you for working with {site}. We would love to hear about your experience.\n\
         It only takes a couple of minutes:\n\n\
         {link}\n\n\
         Best regards,\n{site}\n",
        name = testimonial.client_name,
        site = site_name,
        link = link,
    );
    MailMessage {
        to: testimonial.client_email.clone(),
        subject,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::common::{PublicationStatus, TestimonialStatus};

    fn testimonial() -> TestimonialModel {
        TestimonialModel {
            id: 1,
            client_name: "Ada".into(),
            client_email: "ada@example.com".into(),
            client_company: None,
            client_position: None,
            content: String::new(),
            rating: None,
            token: "abc123".into(),
            status: TestimonialStatus::Pending,
            publication_status: PublicationStatus::Draft,
            reminder_count: 0,
            last_reminder_at: None,
            submitted_at: None,
            approved_at: None,
            created_by: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn request_mail_links_to_the_form() {
        let mail = testimonial_request("Folio", "https://folio.dev/", &testimonial(), false);
        assert_eq!(mail.to, "ada@example.com");
        assert!(mail.text.contains("https://folio.dev/testimonials/abc123"));
        assert!(!mail.subject.starts_with("Reminder"));
    }

    #[test]
    fn reminder_subject_is_marked() {
        let mail = testimonial_request("Folio", "https://folio.dev", &testimonial(), true);
        assert!(mail.subject.starts_with("Reminder"));
    }
}
