use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use resava_core::draft::BookingDraft;
use resava_crm::payload::deal_properties;
use resava_crm::{CrmClient, DealAssociation};

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/crm/deals", post(create_deal))
}

#[derive(Debug, Deserialize)]
pub struct CreateDealRequest {
    #[serde(rename = "contactId")]
    pub contact_id: String,
    /// Full draft snapshot; the deal property bag is derived server-side
    /// so the mapping lives in exactly one place.
    pub draft: BookingDraft,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDealResponse {
    pub success: bool,
    pub deal_id: String,
}

pub async fn create_deal(
    State(state): State<AppState>,
    Json(request): Json<CreateDealRequest>,
) -> Result<Json<CreateDealResponse>, AppError> {
    let properties = deal_properties(&request.draft, &state.catalog);
    let associations = vec![DealAssociation::contact(&request.contact_id)];

    let deal_id = state
        .crm
        .create_deal(properties, associations)
        .await
        .map_err(|err| AppError::Upstream(err.to_string()))?;

    Ok(Json(CreateDealResponse {
        success: true,
        deal_id,
    }))
}
