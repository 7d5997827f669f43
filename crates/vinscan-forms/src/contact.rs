//! Sales contact form: state, reducer and controller
//!
//! The form moves `Editing -> Submitting -> Submitted` and back to `Editing`
//! once the success message has been shown for `reset_after_ms`. Every
//! transition goes through [`reduce`]; the controller only sequences the
//! simulated delays and the sink delivery around it.

use crate::error::{FormError, FormResult};
use crate::sink::{SubmissionRecord, SubmissionSink};
use crate::task::{AbandonGuard, DelayedTask, bounded, cancellable_delay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use validator::Validate;
use vinscan_core::config::FormsConfig;
use vinscan_core::types::{
    ContactSubmission, CurrentSolution, DealershipSize, FormChoice, Urgency,
};

/// Shown once a submission has been delivered
pub const SUCCESS_MESSAGE: &str = "Thank you for reaching out! Our sales team will contact you within 2 hours during business hours.";

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormPhase {
    /// Fields can be edited
    #[default]
    Editing,
    /// Submission in flight, fields read-only
    Submitting,
    /// Success message showing
    Submitted,
}

impl FormPhase {
    /// Lowercase phase name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Editing => "editing",
            Self::Submitting => "submitting",
            Self::Submitted => "submitted",
        }
    }
}

impl fmt::Display for FormPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One editable input of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// First name
    FirstName,
    /// Last name
    LastName,
    /// Email
    Email,
    /// Company
    Company,
    /// Phone
    Phone,
    /// Job title
    JobTitle,
    /// Dealership size select
    DealershipSize,
    /// Current solution select
    CurrentSolution,
    /// Urgency select
    Urgency,
    /// Free-text message
    Message,
}

impl ContactField {
    /// Every field, in form order
    pub const ALL: [Self; 10] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Company,
        Self::Phone,
        Self::JobTitle,
        Self::DealershipSize,
        Self::CurrentSolution,
        Self::Urgency,
        Self::Message,
    ];

    /// Fields that must be filled in, in the order errors are reported
    pub const REQUIRED: [Self; 5] = [
        Self::FirstName,
        Self::LastName,
        Self::Email,
        Self::Company,
        Self::Phone,
    ];

    /// Field name as submitted
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
            Self::Company => "company",
            Self::Phone => "phone",
            Self::JobTitle => "job_title",
            Self::DealershipSize => "dealership_size",
            Self::CurrentSolution => "current_solution",
            Self::Urgency => "urgency",
            Self::Message => "message",
        }
    }

    /// Whether the field must be filled in
    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// Write `value` into the matching slot of `submission`
    ///
    /// Select fields take an option value; an empty value clears them.
    pub fn apply(self, submission: &mut ContactSubmission, value: &str) -> FormResult<()> {
        match self {
            Self::FirstName => submission.first_name = value.to_string(),
            Self::LastName => submission.last_name = value.to_string(),
            Self::Email => submission.email = value.to_string(),
            Self::Company => submission.company = value.to_string(),
            Self::Phone => submission.phone = value.to_string(),
            Self::JobTitle => submission.job_title = value.to_string(),
            Self::Message => submission.message = value.to_string(),
            Self::DealershipSize => {
                submission.dealership_size = parse_choice::<DealershipSize>(self, value)?;
            }
            Self::CurrentSolution => {
                submission.current_solution = parse_choice::<CurrentSolution>(self, value)?;
            }
            Self::Urgency => submission.urgency = parse_choice::<Urgency>(self, value)?,
        }
        Ok(())
    }
}

fn parse_choice<C: FormChoice>(field: ContactField, value: &str) -> FormResult<Option<C>> {
    if value.is_empty() {
        return Ok(None);
    }
    C::parse_value(field.as_str(), value)
        .map(Some)
        .map_err(|_| FormError::invalid_field(field.as_str(), format!("unknown option '{value}'")))
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactField {
    type Err = FormError;

    /// Accepts `first_name`, `firstName` and `first-name` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|field| field.as_str().replace('_', "") == normalized)
            .ok_or_else(|| FormError::invalid_field(s, "unknown contact form field"))
    }
}

/// Check that every required field is present and the email is well formed
///
/// The first failing field in form order is reported.
pub fn validate_submission(submission: &ContactSubmission) -> FormResult<()> {
    let Err(errors) = submission.validate() else {
        return Ok(());
    };
    let field_errors = errors.field_errors();

    for field in ContactField::REQUIRED {
        let Some(first) = field_errors
            .get(field.as_str())
            .and_then(|errors| errors.first())
        else {
            continue;
        };

        return Err(if first.code == "length" {
            FormError::missing_field(field.as_str())
        } else {
            let message = first
                .message
                .as_ref()
                .map_or_else(|| first.code.to_string(), ToString::to_string);
            FormError::invalid_field(field.as_str(), message)
        });
    }

    Err(FormError::invalid_field("form", errors.to_string()))
}

/// Everything the contact view renders
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormState {
    /// Lifecycle phase
    pub phase: FormPhase,
    /// Current field values
    pub fields: ContactSubmission,
    /// Last validation or delivery failure
    pub last_error: Option<String>,
    /// When the last submission completed
    pub submitted_at: Option<DateTime<Utc>>,
}

impl ContactFormState {
    /// Whether inputs are locked
    pub fn is_read_only(&self) -> bool {
        self.phase != FormPhase::Editing
    }

    /// Whether the submit control is enabled
    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Editing
    }

    /// Success banner, only while submitted
    pub fn success_message(&self) -> Option<&'static str> {
        (self.phase == FormPhase::Submitted).then_some(SUCCESS_MESSAGE)
    }
}

/// Inputs to [`reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactAction {
    /// Edit one field
    SetField {
        /// Field to edit
        field: ContactField,
        /// New value
        value: String,
    },
    /// Replace every field at once
    Fill(Box<ContactSubmission>),
    /// Validate and lock the form
    BeginSubmit,
    /// Delivery finished at the given time
    SubmitSucceeded(DateTime<Utc>),
    /// Delivery failed
    SubmitFailed(FormError),
    /// Clear the form and return to editing
    Reset,
}

/// Compute the state that follows `action`
///
/// # Errors
///
/// Rejects edits outside `Editing`, a second submit while one is in flight,
/// and submits with missing or malformed required fields. The input state is
/// never modified.
pub fn reduce(state: &ContactFormState, action: ContactAction) -> FormResult<ContactFormState> {
    match action {
        ContactAction::SetField { field, value } => {
            ensure_editable(state)?;
            let mut next = state.clone();
            field.apply(&mut next.fields, &value)?;
            next.last_error = None;
            Ok(next)
        }
        ContactAction::Fill(fields) => {
            ensure_editable(state)?;
            Ok(ContactFormState {
                fields: *fields,
                ..ContactFormState::default()
            })
        }
        ContactAction::BeginSubmit => {
            match state.phase {
                FormPhase::Editing => {}
                FormPhase::Submitting => {
                    return Err(FormError::already_in_flight("contact submission"));
                }
                FormPhase::Submitted => return Err(FormError::read_only(state.phase.as_str())),
            }
            validate_submission(&state.fields)?;
            Ok(ContactFormState {
                phase: FormPhase::Submitting,
                last_error: None,
                ..state.clone()
            })
        }
        ContactAction::SubmitSucceeded(at) => {
            ensure_submitting(state)?;
            Ok(ContactFormState {
                phase: FormPhase::Submitted,
                submitted_at: Some(at),
                ..state.clone()
            })
        }
        ContactAction::SubmitFailed(error) => {
            ensure_submitting(state)?;
            Ok(ContactFormState {
                phase: FormPhase::Editing,
                last_error: Some(error.to_string()),
                ..state.clone()
            })
        }
        ContactAction::Reset => {
            if state.phase == FormPhase::Submitting {
                return Err(FormError::already_in_flight("contact submission"));
            }
            Ok(ContactFormState::default())
        }
    }
}

fn ensure_editable(state: &ContactFormState) -> FormResult<()> {
    if state.phase == FormPhase::Editing {
        Ok(())
    } else {
        Err(FormError::read_only(state.phase.as_str()))
    }
}

fn ensure_submitting(state: &ContactFormState) -> FormResult<()> {
    if state.phase == FormPhase::Submitting {
        Ok(())
    } else {
        Err(FormError::not_ready(format!(
            "complete a submission while {}",
            state.phase
        )))
    }
}

/// What the caller gets back from a successful submit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    /// Success banner text
    pub message: String,
    /// Address the record was logged for
    pub destination: String,
    /// When delivery finished
    pub submitted_at: DateTime<Utc>,
    /// How long until the form clears
    pub reset_after_ms: u64,
}

/// Drives one mounted contact form
#[derive(Debug)]
pub struct ContactFormController {
    state: Arc<watch::Sender<ContactFormState>>,
    sink: Arc<dyn SubmissionSink>,
    config: FormsConfig,
    token: CancellationToken,
    reset: Mutex<Option<DelayedTask<()>>>,
}

impl ContactFormController {
    /// Mount a form that delivers to `sink`
    pub fn new(sink: Arc<dyn SubmissionSink>, config: FormsConfig) -> Self {
        let (state, _) = watch::channel(ContactFormState::default());
        Self {
            state: Arc::new(state),
            sink,
            config,
            token: CancellationToken::new(),
            reset: Mutex::new(None),
        }
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<ContactFormState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ContactFormState {
        self.state.borrow().clone()
    }

    /// Edit one field
    pub fn set_field(&self, field: ContactField, value: impl Into<String>) -> FormResult<()> {
        dispatch(
            &self.state,
            ContactAction::SetField {
                field,
                value: value.into(),
            },
        )
    }

    /// Replace every field
    pub fn fill(&self, submission: ContactSubmission) -> FormResult<()> {
        dispatch(&self.state, ContactAction::Fill(Box::new(submission)))
    }

    /// Submit the current fields
    ///
    /// Waits `submit_delay_ms`, hands the record to the sink within
    /// `delivery_timeout_ms`, then shows the success message and schedules
    /// the reset.
    ///
    /// Dropping the returned future mid-flight puts the form back in
    /// `Editing` with the cancellation recorded as the last error.
    pub async fn submit(&self) -> FormResult<SubmissionReceipt> {
        dispatch(&self.state, ContactAction::BeginSubmit)?;
        let mut in_flight = AbandonGuard::new(&self.token, || {
            warn!("Contact submission abandoned mid-flight");
            let abandoned = ContactAction::SubmitFailed(FormError::cancelled("contact submission"));
            if let Err(err) = dispatch(&self.state, abandoned) {
                debug!(error = %err, "Contact form already settled");
            }
        });
        let fields = self.state.borrow().fields.clone();
        debug!(company = %fields.company, "Contact submission started");

        cancellable_delay(&self.token, self.config.submit_delay(), "contact submission").await?;

        let submitted_at = Utc::now();
        let record = SubmissionRecord::new(fields, self.config.destination.clone(), submitted_at);
        let delivered = bounded(
            &self.token,
            self.config.delivery_timeout(),
            "contact delivery",
            self.sink.deliver(&record),
        )
        .await;

        match delivered {
            Ok(()) => in_flight.disarm(),
            Err(err @ FormError::Cancelled { .. }) => return Err(err),
            Err(err) => {
                in_flight.disarm();
                warn!(sink = self.sink.name(), error = %err, "Contact submission failed");
                dispatch(&self.state, ContactAction::SubmitFailed(err.clone()))?;
                return Err(err);
            }
        }

        dispatch(&self.state, ContactAction::SubmitSucceeded(submitted_at))?;
        info!(
            sink = self.sink.name(),
            destination = %record.destination,
            "Contact submission delivered"
        );
        self.schedule_reset();

        Ok(SubmissionReceipt {
            message: SUCCESS_MESSAGE.to_string(),
            destination: record.destination,
            submitted_at,
            reset_after_ms: self.config.reset_after_ms,
        })
    }

    /// Whether a reset is still waiting to run
    pub fn reset_pending(&self) -> bool {
        self.reset_slot()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }

    /// Cancel every pending delay; later state changes never happen
    pub fn unmount(&self) {
        self.token.cancel();
    }

    /// Whether [`Self::unmount`] has been called
    pub fn is_unmounted(&self) -> bool {
        self.token.is_cancelled()
    }

    fn schedule_reset(&self) {
        let state = Arc::clone(&self.state);
        let task = DelayedTask::spawn(
            self.token.child_token(),
            self.config.reset_after(),
            "contact form reset",
            move || async move {
                dispatch(&state, ContactAction::Reset)?;
                debug!("Contact form cleared");
                Ok(())
            },
        );

        if let Some(previous) = self.reset_slot().replace(task) {
            previous.cancel();
        }
    }

    fn reset_slot(&self) -> MutexGuard<'_, Option<DelayedTask<()>>> {
        self.reset.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ContactFormController {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

fn dispatch(state: &watch::Sender<ContactFormState>, action: ContactAction) -> FormResult<()> {
    let mut outcome = Ok(());
    state.send_if_modified(|current| match reduce(current, action) {
        Ok(next) => {
            let changed = next != *current;
            *current = next;
            changed
        }
        Err(err) => {
            outcome = Err(err);
            false
        }
    });
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::RecordingSink;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::time::Duration;

    fn filled() -> ContactSubmission {
        ContactSubmission {
            first_name: "Dana".to_string(),
            last_name: "Reyes".to_string(),
            email: "dana@example.com".to_string(),
            company: "Reyes Motors".to_string(),
            phone: "555-0100".to_string(),
            dealership_size: Some(DealershipSize::Medium),
            ..ContactSubmission::default()
        }
    }

    fn editing() -> ContactFormState {
        ContactFormState {
            fields: filled(),
            ..ContactFormState::default()
        }
    }

    fn controller(sink: RecordingSink) -> ContactFormController {
        ContactFormController::new(Arc::new(sink), FormsConfig::default())
    }

    #[rstest]
    #[case("first_name", ContactField::FirstName)]
    #[case("firstName", ContactField::FirstName)]
    #[case("dealership-size", ContactField::DealershipSize)]
    #[case("currentSolution", ContactField::CurrentSolution)]
    #[case("MESSAGE", ContactField::Message)]
    fn test_field_parsing(#[case] input: &str, #[case] expected: ContactField) {
        assert_eq!(input.parse::<ContactField>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_field() {
        assert!("fax".parse::<ContactField>().is_err());
    }

    #[test]
    fn test_select_fields_parse_option_values() {
        let mut fields = ContactSubmission::default();

        ContactField::CurrentSolution.apply(&mut fields, "none").unwrap();
        assert_eq!(fields.current_solution, Some(CurrentSolution::NoSystem));

        ContactField::CurrentSolution.apply(&mut fields, "").unwrap();
        assert_eq!(fields.current_solution, None);

        let err = ContactField::Urgency.apply(&mut fields, "yesterday").unwrap_err();
        assert!(matches!(err, FormError::InvalidField { .. }));
    }

    #[test]
    fn test_validation_reports_first_missing_field() {
        assert_eq!(
            validate_submission(&ContactSubmission::default()).unwrap_err(),
            FormError::missing_field("first_name")
        );

        let mut fields = filled();
        fields.company.clear();
        fields.phone.clear();
        assert_eq!(
            validate_submission(&fields).unwrap_err(),
            FormError::missing_field("company")
        );

        assert!(validate_submission(&filled()).is_ok());
    }

    #[test]
    fn test_validation_rejects_malformed_email() {
        let mut fields = filled();
        fields.email = "not-an-email".to_string();

        let err = validate_submission(&fields).unwrap_err();
        assert!(matches!(err, FormError::InvalidField { ref field, .. } if field == "email"));
    }

    #[test]
    fn test_reduce_full_cycle() {
        let now = Utc::now();
        let submitting = reduce(&editing(), ContactAction::BeginSubmit).unwrap();
        assert_eq!(submitting.phase, FormPhase::Submitting);
        assert!(submitting.is_read_only());
        assert!(!submitting.can_submit());

        let submitted = reduce(&submitting, ContactAction::SubmitSucceeded(now)).unwrap();
        assert_eq!(submitted.phase, FormPhase::Submitted);
        assert_eq!(submitted.submitted_at, Some(now));
        assert_eq!(submitted.success_message(), Some(SUCCESS_MESSAGE));

        let reset = reduce(&submitted, ContactAction::Reset).unwrap();
        assert_eq!(reset, ContactFormState::default());
    }

    #[test]
    fn test_reduce_rejects_edits_while_locked() {
        let submitting = reduce(&editing(), ContactAction::BeginSubmit).unwrap();
        let err = reduce(
            &submitting,
            ContactAction::SetField {
                field: ContactField::Email,
                value: "x@example.com".to_string(),
            },
        )
        .unwrap_err();

        assert_eq!(err, FormError::read_only("submitting"));
        assert_eq!(
            reduce(&submitting, ContactAction::BeginSubmit).unwrap_err(),
            FormError::already_in_flight("contact submission")
        );
    }

    #[test]
    fn test_reduce_failure_keeps_fields() {
        let submitting = reduce(&editing(), ContactAction::BeginSubmit).unwrap();
        let failed = reduce(
            &submitting,
            ContactAction::SubmitFailed(FormError::delivery("log", "offline")),
        )
        .unwrap();

        assert_eq!(failed.phase, FormPhase::Editing);
        assert_eq!(failed.fields, filled());
        assert_eq!(
            failed.last_error.as_deref(),
            Some("Delivery to log failed: offline")
        );
    }

    #[test]
    fn test_reduce_invalid_submit_leaves_state() {
        let state = ContactFormState::default();
        assert!(reduce(&state, ContactAction::BeginSubmit).is_err());
        assert_eq!(state.phase, FormPhase::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_cycle_returns_to_cleared_editing() {
        let sink = RecordingSink::new();
        let form = controller(sink.clone());
        let mut updates = form.subscribe();
        form.fill(filled()).unwrap();

        let start = tokio::time::Instant::now();
        let receipt = form.submit().await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(receipt.message, SUCCESS_MESSAGE);
        assert_eq!(receipt.destination, "marinomarketing@mail.com");
        assert_eq!(receipt.reset_after_ms, 5_000);
        assert_eq!(form.state().phase, FormPhase::Submitted);
        assert!(form.reset_pending());

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].submission, filled());
        assert_eq!(records[0].destination, "marinomarketing@mail.com");

        let cleared = updates
            .wait_for(|state| state.phase == FormPhase::Editing && state.submitted_at.is_none())
            .await
            .unwrap()
            .clone();
        assert_eq!(cleared, ContactFormState::default());
        assert!(start.elapsed() >= Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fields_read_only_while_submitting() {
        let form = Arc::new(controller(RecordingSink::new()));
        form.fill(filled()).unwrap();

        let submitting = Arc::clone(&form);
        let pending = tokio::spawn(async move { submitting.submit().await });
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert_eq!(form.state().phase, FormPhase::Submitting);
        assert_eq!(
            form.set_field(ContactField::Phone, "555-0199").unwrap_err(),
            FormError::read_only("submitting")
        );
        assert_eq!(
            form.submit().await.unwrap_err(),
            FormError::already_in_flight("contact submission")
        );

        assert!(pending.await.unwrap().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_failure_returns_to_editing() {
        let sink = RecordingSink::new().with_failure("smtp down");
        let form = controller(sink);
        form.fill(filled()).unwrap();

        let err = form.submit().await.unwrap_err();
        assert!(err.is_collaborator_failure());

        let state = form.state();
        assert_eq!(state.phase, FormPhase::Editing);
        assert_eq!(state.fields, filled());
        assert!(state.last_error.is_some());
        assert!(!form.reset_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_sink_times_out() {
        let sink = RecordingSink::new().with_delay(60_000);
        let form = controller(sink.clone());
        form.fill(filled()).unwrap();

        let err = form.submit().await.unwrap_err();
        assert_eq!(err, FormError::timeout("contact delivery", 10_000));
        assert!(sink.is_empty());
        assert_eq!(form.state().phase, FormPhase::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_during_submit_never_delivers() {
        let sink = RecordingSink::new();
        let form = Arc::new(controller(sink.clone()));
        form.fill(filled()).unwrap();

        let submitting = Arc::clone(&form);
        let pending = tokio::spawn(async move { submitting.submit().await });
        tokio::time::sleep(Duration::from_millis(500)).await;
        form.unmount();

        let err = pending.await.unwrap().unwrap_err();
        assert_eq!(err, FormError::cancelled("contact submission"));
        assert!(sink.is_empty());
        assert!(form.is_unmounted());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_submit_returns_to_editing() {
        let sink = RecordingSink::new();
        let form = controller(sink.clone());
        form.fill(filled()).unwrap();

        let abandoned = tokio::time::timeout(Duration::from_millis(500), form.submit()).await;
        assert!(abandoned.is_err());

        let state = form.state();
        assert_eq!(state.phase, FormPhase::Editing);
        assert_eq!(state.fields, filled());
        assert_eq!(
            state.last_error.as_deref(),
            Some("contact submission was cancelled")
        );
        assert!(sink.is_empty());

        form.set_field(ContactField::JobTitle, "Sales Manager").unwrap();
        form.submit().await.unwrap();
        assert_eq!(form.state().phase, FormPhase::Submitted);
        assert_eq!(sink.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unmount_after_submit_skips_reset() {
        let form = controller(RecordingSink::new());
        form.fill(filled()).unwrap();
        form.submit().await.unwrap();

        form.unmount();
        tokio::time::sleep(Duration::from_secs(10)).await;

        assert_eq!(form.state().phase, FormPhase::Submitted);
    }

    #[tokio::test]
    async fn test_submit_rejects_missing_fields_without_delay() {
        let form = controller(RecordingSink::new());
        form.set_field(ContactField::FirstName, "Dana").unwrap();

        assert_eq!(
            form.submit().await.unwrap_err(),
            FormError::missing_field("last_name")
        );
        assert_eq!(form.state().phase, FormPhase::Editing);
    }
}
