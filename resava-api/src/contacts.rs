use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use resava_crm::payload::{PropertyBag, DEFAULT_NATIONALITY};
use resava_crm::CrmClient;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/crm/contacts", post(create_contact))
}

/// Contact fields as the widget posts them; the car-rental extras are
/// only present on that flow.
#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub preferences_client: String,
    #[serde(default)]
    pub le_v_hicule_ne_roule_pas_le_chabat: Option<bool>,
    #[serde(default)]
    pub avez_vous_une_visa_premi_re_: Option<bool>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub nationalite: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateContactResponse {
    pub success: bool,
    pub contact_id: String,
}

pub async fn create_contact(
    State(state): State<AppState>,
    Json(request): Json<CreateContactRequest>,
) -> Result<Json<CreateContactResponse>, AppError> {
    let mut properties = PropertyBag::new();
    properties.insert("firstname".into(), json!(request.first_name));
    properties.insert("lastname".into(), json!(request.last_name));
    properties.insert("email".into(), json!(request.email));
    properties.insert("phone".into(), json!(request.phone));
    properties.insert("preferences_client".into(), json!(request.preferences_client));
    properties.insert(
        "nationalite".into(),
        json!(request.nationalite.as_deref().unwrap_or(DEFAULT_NATIONALITY)),
    );
    if let Some(flag) = request.le_v_hicule_ne_roule_pas_le_chabat {
        properties.insert("le_v_hicule_ne_roule_pas_le_chabat".into(), json!(flag));
    }
    if let Some(flag) = request.avez_vous_une_visa_premi_re_ {
        properties.insert("avez_vous_une_visa_premi_re_".into(), json!(flag));
    }
    if let Some(age) = request.age {
        properties.insert("age".into(), json!(age));
    }

    let contact_id = state
        .crm
        .create_contact(properties)
        .await
        .map_err(|err| AppError::Upstream(err.to_string()))?;

    Ok(Json(CreateContactResponse {
        success: true,
        contact_id,
    }))
}
