//! Contact sales form

use crate::error::{ApiResult, form_error};
use crate::state::AppState;
use axum::{extract::State, response::Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use vinscan_core::navigation::{Navigation, Route};
use vinscan_core::types::{
    ApiResponse, ContactSubmission, CurrentSolution, DealershipSize, FormChoice, SelectOption,
    Urgency,
};
use vinscan_forms::contact::SUCCESS_MESSAGE;
use vinscan_forms::{ContactField, ContactFormState, SubmissionReceipt};

/// Contact page payload
#[derive(Debug, Clone, Serialize)]
pub struct ContactPage {
    /// Header
    pub navigation: Navigation,
    /// Initial form state
    pub form: ContactFormState,
    /// Fields that must be filled in
    pub required_fields: Vec<&'static str>,
    /// Dealership size choices
    pub dealership_sizes: Vec<SelectOption>,
    /// Current solution choices
    pub current_solutions: Vec<SelectOption>,
    /// Urgency choices
    pub urgencies: Vec<SelectOption>,
    /// Shown after a successful submit
    pub success_message: &'static str,
}

/// `GET /contact`
pub async fn contact_form() -> Json<ContactPage> {
    Json(ContactPage {
        navigation: Navigation::for_route(Route::Contact),
        form: ContactFormState::default(),
        required_fields: ContactField::REQUIRED
            .into_iter()
            .map(ContactField::as_str)
            .collect(),
        dealership_sizes: DealershipSize::options(),
        current_solutions: CurrentSolution::options(),
        urgencies: Urgency::options(),
        success_message: SUCCESS_MESSAGE,
    })
}

/// `POST /contact`
///
/// Runs one form through Editing, Submitting and Submitted. The response is
/// sent once the record has been delivered; the form's own reset is dropped
/// with the request.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<ContactSubmission>,
) -> ApiResult<ApiResponse<SubmissionReceipt>> {
    let form = state.contact_form();
    form.fill(submission).map_err(|err| form_error(&err))?;

    let receipt = form.submit().await.map_err(|err| form_error(&err))?;

    info!(destination = %receipt.destination, "Contact request accepted");
    let message = receipt.message.clone();
    Ok(Json(ApiResponse::success_with_message(receipt, message)))
}
