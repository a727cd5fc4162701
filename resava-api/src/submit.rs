use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use resava_core::capabilities::AnalyticsSink;
use resava_core::draft::BookingDraft;
use resava_core::validate;
use resava_crm::payload::{contact_properties, deal_properties};
use resava_handoff::{build_whatsapp_link, render_summary, CopyTable, Locale};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/bookings/submit", post(submit_booking))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitBookingRequest {
    pub draft: BookingDraft,
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitBookingResponse {
    pub success: bool,
    pub draft_id: Uuid,
    pub whatsapp_url: String,
}

/// Terminal action of the wizard. The CRM submission and the WhatsApp
/// handoff are decoupled: the CRM round-trip runs as a spawned task
/// behind the draft's one-shot latch, and the response carries the link
/// without waiting on it.
pub async fn submit_booking(
    State(state): State<AppState>,
    Json(request): Json<SubmitBookingRequest>,
) -> Result<Json<SubmitBookingResponse>, AppError> {
    let draft = &request.draft;

    if let Some(issue) = validate::submit_blocker(draft) {
        return Err(AppError::Validation(issue.to_string()));
    }

    let contact = contact_properties(draft);
    let deal = deal_properties(draft, &state.catalog);
    let submitter = state.submissions.for_draft(draft.id, &state.crm);
    // Fire-and-forget; failures are logged and the latch reopens for an
    // explicit retry. Never blocks the handoff below.
    let _ = submitter.spawn_submit(contact, deal);

    let copy = CopyTable::for_locale(request.locale);
    let message = render_summary(draft, &state.catalog, &copy);
    let whatsapp_url = build_whatsapp_link(&state.whatsapp_phone, &message, &request.user_agent);

    state.analytics.track(
        "Purchase",
        json!({ "content_category": draft.product, "value": 1, "currency": "EUR" }),
    );

    Ok(Json(SubmitBookingResponse {
        success: true,
        draft_id: draft.id,
        whatsapp_url,
    }))
}
