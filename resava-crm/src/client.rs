use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::payload::PropertyBag;

#[derive(Debug, thiserror::Error)]
pub enum CrmError {
    #[error("CRM transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("CRM rejected {call} with status {status}: {detail}")]
    Upstream {
        call: &'static str,
        status: u16,
        detail: String,
    },

    #[error("Submission already started for this draft")]
    AlreadySubmitted,
}

/// Association attached to a deal on creation; the only relation used
/// here is the CRM-defined contact-to-deal one (type id 3).
#[derive(Debug, Clone, Serialize)]
pub struct DealAssociation {
    pub to: AssociationTarget,
    pub types: Vec<AssociationType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssociationTarget {
    pub id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationType {
    pub association_category: String,
    pub association_type_id: u32,
}

impl DealAssociation {
    pub fn contact(contact_id: &str) -> Self {
        Self {
            to: AssociationTarget {
                id: contact_id.to_string(),
            },
            types: vec![AssociationType {
                association_category: "HUBSPOT_DEFINED".to_string(),
                association_type_id: 3,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct CrmRecord {
    id: String,
}

/// The two CRM operations this system consumes. Calls are idempotent
/// only by convention: a retried call creates a duplicate record, so
/// nothing here retries automatically.
#[async_trait]
pub trait CrmClient: Send + Sync {
    async fn create_contact(&self, properties: PropertyBag) -> Result<String, CrmError>;

    async fn create_deal(
        &self,
        properties: PropertyBag,
        associations: Vec<DealAssociation>,
    ) -> Result<String, CrmError>;
}

/// HTTPS client for the CRM's object API, bearer-token authenticated.
pub struct HttpCrmClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl HttpCrmClient {
    /// `timeout` bounds each call client-side; expiry surfaces as a
    /// transport error, reported but never fatal to the booking flow.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, CrmError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn post_object(
        &self,
        call: &'static str,
        path: &str,
        body: serde_json::Value,
    ) -> Result<String, CrmError> {
        let url = format!("{}/crm/v3/objects/{}", self.base_url, path);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(call, status = status.as_u16(), %detail, "CRM call rejected");
            return Err(CrmError::Upstream {
                call,
                status: status.as_u16(),
                detail,
            });
        }

        let record: CrmRecord = response.json().await?;
        tracing::info!(call, record_id = %record.id, "CRM record created");
        Ok(record.id)
    }
}

#[async_trait]
impl CrmClient for HttpCrmClient {
    async fn create_contact(&self, properties: PropertyBag) -> Result<String, CrmError> {
        self.post_object("create_contact", "contacts", json!({ "properties": properties }))
            .await
    }

    async fn create_deal(
        &self,
        properties: PropertyBag,
        associations: Vec<DealAssociation>,
    ) -> Result<String, CrmError> {
        self.post_object(
            "create_deal",
            "deals",
            json!({ "properties": properties, "associations": associations }),
        )
        .await
    }
}

/// In-memory CRM for tests and local wiring; records every call and
/// hands out sequential ids.
#[derive(Default)]
pub struct MockCrmClient {
    fail_contacts: bool,
    contacts: Mutex<Vec<PropertyBag>>,
    deals: Mutex<Vec<(PropertyBag, Vec<DealAssociation>)>>,
}

impl MockCrmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose contact creation always rejects.
    pub fn failing() -> Self {
        Self {
            fail_contacts: true,
            ..Self::default()
        }
    }

    pub fn contacts(&self) -> Vec<PropertyBag> {
        self.contacts.lock().expect("mock lock").clone()
    }

    pub fn deals(&self) -> Vec<(PropertyBag, Vec<DealAssociation>)> {
        self.deals.lock().expect("mock lock").clone()
    }
}

#[async_trait]
impl CrmClient for MockCrmClient {
    async fn create_contact(&self, properties: PropertyBag) -> Result<String, CrmError> {
        if self.fail_contacts {
            return Err(CrmError::Upstream {
                call: "create_contact",
                status: 400,
                detail: "simulated rejection".to_string(),
            });
        }
        let mut contacts = self.contacts.lock().expect("mock lock");
        contacts.push(properties);
        Ok(format!("mock_contact_{}", contacts.len()))
    }

    async fn create_deal(
        &self,
        properties: PropertyBag,
        associations: Vec<DealAssociation>,
    ) -> Result<String, CrmError> {
        let mut deals = self.deals.lock().expect("mock lock");
        deals.push((properties, associations));
        Ok(format!("mock_deal_{}", deals.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bag(pairs: &[(&str, &str)]) -> PropertyBag {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect()
    }

    #[test]
    fn test_association_wire_shape() {
        let association = DealAssociation::contact("123");
        let encoded = serde_json::to_value(&association).expect("serialize");
        assert_eq!(
            encoded,
            json!({
                "to": { "id": "123" },
                "types": [{ "associationCategory": "HUBSPOT_DEFINED", "associationTypeId": 3 }]
            })
        );
    }

    #[tokio::test]
    async fn test_create_contact_sends_bearer_and_properties() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/crm/v3/objects/contacts"))
            .and(header("authorization", "Bearer secret-token"))
            .and(body_partial_json(
                json!({ "properties": { "firstname": "David" } }),
            ))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": "501" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HttpCrmClient::new(&server.uri(), "secret-token", Duration::from_secs(10))
            .expect("client");
        let id = client
            .create_contact(bag(&[("firstname", "David")]))
            .await
            .expect("contact created");
        assert_eq!(id, "501");
    }

    #[tokio::test]
    async fn test_upstream_rejection_is_reported_not_thrown() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/crm/v3/objects/deals"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({ "message": "bad property" })),
            )
            .mount(&server)
            .await;

        let client = HttpCrmClient::new(&server.uri(), "secret-token", Duration::from_secs(10))
            .expect("client");
        let result = client
            .create_deal(bag(&[("dealname", "X")]), vec![DealAssociation::contact("1")])
            .await;
        match result {
            Err(CrmError::Upstream { call, status, .. }) => {
                assert_eq!(call, "create_deal");
                assert_eq!(status, 400);
            }
            other => panic!("expected upstream error, got {:?}", other.map(|_| ())),
        }
    }
}
