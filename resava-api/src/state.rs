use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use resava_catalog::Catalog;
use resava_core::capabilities::{AnalyticsSink, PlacesLookup};
use resava_crm::{CrmClient, CrmSubmitter};
use uuid::Uuid;

/// One submission latch per draft, so a re-clicked submit button cannot
/// create a duplicate CRM contact for the same session.
#[derive(Default)]
pub struct SubmissionRegistry {
    inner: Mutex<HashMap<Uuid, Arc<CrmSubmitter>>>,
}

impl SubmissionRegistry {
    pub fn for_draft(&self, draft_id: Uuid, crm: &Arc<dyn CrmClient>) -> Arc<CrmSubmitter> {
        let mut inner = self.inner.lock().expect("registry lock");
        inner
            .entry(draft_id)
            .or_insert_with(|| Arc::new(CrmSubmitter::new(crm.clone())))
            .clone()
    }
}

#[derive(Clone)]
pub struct AppState {
    pub crm: Arc<dyn CrmClient>,
    pub places: Arc<dyn PlacesLookup>,
    pub analytics: Arc<dyn AnalyticsSink>,
    pub catalog: Arc<Catalog>,
    pub whatsapp_phone: String,
    pub submissions: Arc<SubmissionRegistry>,
}
