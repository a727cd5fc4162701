use std::sync::{Arc, Mutex};

use crate::client::{CrmClient, CrmError, DealAssociation};
use crate::payload::PropertyBag;

/// One-shot latch around the CRM submission. The guard exists because
/// the submission is triggered by an explicit completion event; without
/// it a re-fired trigger would create a duplicate contact in the CRM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    NotSubmitted,
    Submitting,
    Submitted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub contact_id: String,
    pub deal_id: String,
}

/// Creates the contact, then the deal associated to it, exactly once.
///
/// A failed attempt returns the latch to `NotSubmitted` so an explicit
/// user action may try again; nothing retries automatically.
pub struct CrmSubmitter {
    client: Arc<dyn CrmClient>,
    state: Mutex<SubmissionState>,
}

impl CrmSubmitter {
    pub fn new(client: Arc<dyn CrmClient>) -> Self {
        Self {
            client,
            state: Mutex::new(SubmissionState::NotSubmitted),
        }
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().expect("latch lock")
    }

    fn begin(&self) -> Result<(), CrmError> {
        let mut state = self.state.lock().expect("latch lock");
        if *state != SubmissionState::NotSubmitted {
            return Err(CrmError::AlreadySubmitted);
        }
        *state = SubmissionState::Submitting;
        Ok(())
    }

    fn settle(&self, outcome: SubmissionState) {
        *self.state.lock().expect("latch lock") = outcome;
    }

    pub async fn submit(
        &self,
        contact: PropertyBag,
        deal: PropertyBag,
    ) -> Result<SubmissionReceipt, CrmError> {
        self.begin()?;
        match self.run(contact, deal).await {
            Ok(receipt) => {
                self.settle(SubmissionState::Submitted);
                tracing::info!(
                    contact_id = %receipt.contact_id,
                    deal_id = %receipt.deal_id,
                    "CRM submission completed"
                );
                Ok(receipt)
            }
            Err(error) => {
                self.settle(SubmissionState::NotSubmitted);
                tracing::error!(%error, "CRM submission failed");
                Err(error)
            }
        }
    }

    async fn run(
        &self,
        contact: PropertyBag,
        deal: PropertyBag,
    ) -> Result<SubmissionReceipt, CrmError> {
        let contact_id = self.client.create_contact(contact).await?;
        let deal_id = self
            .client
            .create_deal(deal, vec![DealAssociation::contact(&contact_id)])
            .await?;
        Ok(SubmissionReceipt {
            contact_id,
            deal_id,
        })
    }

    /// Fire-and-forget variant: the booking flow does not wait on the
    /// CRM round-trip. Failures are logged inside `submit`; the handle
    /// is available when a caller does want the outcome.
    pub fn spawn_submit(
        self: Arc<Self>,
        contact: PropertyBag,
        deal: PropertyBag,
    ) -> tokio::task::JoinHandle<Result<SubmissionReceipt, CrmError>> {
        tokio::spawn(async move { self.submit(contact, deal).await })
    }
}
