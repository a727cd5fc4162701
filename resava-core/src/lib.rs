pub mod capabilities;
pub mod draft;
pub mod validate;
pub mod wizard;

pub use draft::{BookingDraft, ContactDetails, DriverAge, OccupantKind, Product};
pub use validate::ValidationIssue;
pub use wizard::{Wizard, WizardError};
