//! Where submitted contact forms go

use crate::error::FormResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;
use vinscan_core::types::{
    ContactSubmission, CurrentSolution, DealershipSize, FormChoice, Urgency,
};

/// Analytics event name for a completed contact form
pub const CONTACT_FORM_SUBMITTED: &str = "contact_form_submitted";

/// The structured record handed to a sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// What the prospect entered
    #[serde(flatten)]
    pub submission: ContactSubmission,
    /// Address the record is meant for
    pub destination: String,
    /// When the submission completed
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionRecord {
    /// Build a record for `submission`
    pub fn new(
        submission: ContactSubmission,
        destination: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            submission,
            destination: destination.into(),
            submitted_at,
        }
    }
}

/// Analytics payload fired alongside a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event name
    pub name: String,
    /// Selected dealership size
    pub dealership_size: Option<DealershipSize>,
    /// Selected current solution
    pub current_solution: Option<CurrentSolution>,
    /// Selected urgency
    pub urgency: Option<Urgency>,
    /// Whether a message was written
    pub has_message: bool,
}

impl AnalyticsEvent {
    /// The `contact_form_submitted` event for `submission`
    pub fn contact_form_submitted(submission: &ContactSubmission) -> Self {
        Self {
            name: CONTACT_FORM_SUBMITTED.to_string(),
            dealership_size: submission.dealership_size,
            current_solution: submission.current_solution,
            urgency: submission.urgency,
            has_message: submission.has_message(),
        }
    }
}

fn choice_value<C: FormChoice>(choice: Option<C>) -> &'static str {
    choice.map_or("", C::value)
}

/// Receives completed contact submissions
#[async_trait]
pub trait SubmissionSink: Send + Sync + fmt::Debug {
    /// Hand over one record
    async fn deliver(&self, record: &SubmissionRecord) -> FormResult<()>;

    /// Sink name for logs and errors
    fn name(&self) -> &str;
}

/// Default sink: logs the record and the analytics event, sends nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

#[async_trait]
impl SubmissionSink for LoggingSink {
    async fn deliver(&self, record: &SubmissionRecord) -> FormResult<()> {
        let submission = &record.submission;
        info!(
            target: "vinscan::contact",
            first_name = %submission.first_name,
            last_name = %submission.last_name,
            email = %submission.email,
            phone = %submission.phone,
            company = %submission.company,
            job_title = %submission.job_title,
            dealership_size = choice_value(submission.dealership_size),
            current_solution = choice_value(submission.current_solution),
            urgency = choice_value(submission.urgency),
            message = %submission.message,
            destination = %record.destination,
            timestamp = %record.submitted_at.to_rfc3339(),
            "Contact form submitted"
        );

        let event = AnalyticsEvent::contact_form_submitted(submission);
        info!(
            target: "vinscan::analytics",
            event = %event.name,
            dealership_size = choice_value(event.dealership_size),
            current_solution = choice_value(event.current_solution),
            urgency = choice_value(event.urgency),
            has_message = event.has_message,
            "analytics event"
        );

        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            first_name: "Dana".to_string(),
            last_name: "Reyes".to_string(),
            email: "dana@example.com".to_string(),
            company: "Reyes Motors".to_string(),
            phone: "555-0100".to_string(),
            dealership_size: Some(DealershipSize::Medium),
            urgency: Some(Urgency::Immediate),
            message: "Call me".to_string(),
            ..ContactSubmission::default()
        }
    }

    #[test]
    fn test_analytics_event() {
        let event = AnalyticsEvent::contact_form_submitted(&submission());

        assert_eq!(event.name, "contact_form_submitted");
        assert_eq!(event.dealership_size, Some(DealershipSize::Medium));
        assert_eq!(event.current_solution, None);
        assert_eq!(event.urgency, Some(Urgency::Immediate));
        assert!(event.has_message);
    }

    #[test]
    fn test_record_serializes_flat() {
        let record = SubmissionRecord::new(submission(), "sales@example.com", Utc::now());
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["first_name"], "Dana");
        assert_eq!(json["dealership_size"], "medium");
        assert_eq!(json["destination"], "sales@example.com");
        assert!(json.get("submitted_at").is_some());
    }

    #[tokio::test]
    async fn test_logging_sink_always_succeeds() {
        let record = SubmissionRecord::new(submission(), "sales@example.com", Utc::now());
        assert!(LoggingSink.deliver(&record).await.is_ok());
        assert_eq!(LoggingSink.name(), "log");
    }
}
