pub mod client;
pub mod dates;
pub mod payload;
pub mod submission;

pub use client::{CrmClient, CrmError, DealAssociation, HttpCrmClient, MockCrmClient};
pub use payload::PropertyBag;
pub use submission::{CrmSubmitter, SubmissionReceipt, SubmissionState};
