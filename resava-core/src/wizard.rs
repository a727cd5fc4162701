use std::sync::Arc;

use resava_catalog::Vehicle;
use serde_json::json;

use crate::capabilities::AnalyticsSink;
use crate::draft::{BookingDraft, Product};
use crate::validate::{self, ValidationIssue};

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// The current step's gate is closed; the payload carries the
    /// field-level message to surface.
    #[error(transparent)]
    Blocked(#[from] ValidationIssue),

    #[error("Already at the final step")]
    AtFinalStep,
}

/// Step controller for the booking wizard.
///
/// Linear chains, no skipping: Hotel is details -> contact, Car is
/// logistics -> vehicle -> contact. Forward moves are gated by the
/// validator; going back never re-validates (the gate re-checks on the
/// way forward).
pub struct Wizard {
    draft: BookingDraft,
    analytics: Arc<dyn AnalyticsSink>,
}

impl Wizard {
    pub fn new(analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self::with_draft(BookingDraft::default(), analytics)
    }

    pub fn with_draft(draft: BookingDraft, analytics: Arc<dyn AnalyticsSink>) -> Self {
        Self { draft, analytics }
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Field edits go straight to the draft's setters.
    pub fn draft_mut(&mut self) -> &mut BookingDraft {
        &mut self.draft
    }

    pub fn is_final_step(&self) -> bool {
        self.draft.step == self.draft.product.max_steps()
    }

    /// Advances one step if the current step's gate is open.
    pub fn next(&mut self) -> Result<u8, WizardError> {
        if self.is_final_step() {
            return Err(WizardError::AtFinalStep);
        }
        let blocker = match (self.draft.product, self.draft.step) {
            (_, 1) => validate::step1_blocker(&self.draft),
            (Product::Car, 2) => validate::vehicle_step_blocker(&self.draft),
            _ => None,
        };
        if let Some(issue) = blocker {
            tracing::debug!(step = self.draft.step, %issue, "step transition blocked");
            return Err(WizardError::Blocked(issue));
        }

        if self.draft.step == 1 {
            self.analytics.track(
                "InitiateCheckout",
                json!({ "content_category": self.draft.product }),
            );
        }
        self.draft.step += 1;
        Ok(self.draft.step)
    }

    /// Moves back one step; a no-op on step 1.
    pub fn previous(&mut self) -> u8 {
        if self.draft.step > 1 {
            self.draft.step -= 1;
        }
        self.draft.step
    }

    /// Switches the product tab: back to step 1 of the new chain, fields
    /// retained.
    pub fn switch_product(&mut self, product: Product) {
        self.draft.product = product;
        self.draft.step = 1;
        self.analytics
            .track("ViewContent", json!({ "content_category": product }));
    }

    pub fn select_vehicle(&mut self, vehicle: Vehicle) {
        self.analytics.track(
            "AddToCart",
            json!({ "content_name": vehicle.name.as_str(), "content_category": "car" }),
        );
        self.draft.set_selected_vehicle(Some(vehicle));
    }

    /// Gate for the terminal action; `None` means submission may proceed.
    pub fn submit_blocker(&self) -> Option<ValidationIssue> {
        validate::submit_blocker(&self.draft)
    }

    /// Marks the submission done from the user's point of view: emits the
    /// conversion event and resets the draft for a new request.
    pub fn complete_submission(&mut self) {
        self.analytics.track(
            "Purchase",
            json!({ "content_category": self.draft.product, "value": 1, "currency": "EUR" }),
        );
        self.draft.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::{NoopAnalytics, RecordingAnalytics};
    use crate::draft::OccupantKind;

    fn wizard() -> Wizard {
        Wizard::new(Arc::new(NoopAnalytics))
    }

    fn fill_hotel_step1(wizard: &mut Wizard) {
        wizard.draft_mut().set_destination("Tel Aviv");
        wizard
            .draft_mut()
            .set_date_range(vec!["10/08/2025".to_string(), "15/08/2025".to_string()]);
    }

    fn fill_car_step1(wizard: &mut Wizard) {
        let draft = wizard.draft_mut();
        draft.set_country("IL");
        draft.set_station("IL-TLV1");
        draft.set_pickup_date("01/09/2025");
        draft.set_return_date("05/09/2025");
        draft.set_pickup_time("10:00");
        draft.set_return_time("10:00");
    }

    #[test]
    fn test_hotel_happy_path() {
        let mut wizard = wizard();
        assert!(matches!(
            wizard.next(),
            Err(WizardError::Blocked(ValidationIssue::MissingDestination))
        ));

        fill_hotel_step1(&mut wizard);
        assert_eq!(wizard.next().unwrap(), 2);
        assert!(wizard.is_final_step());
        assert!(matches!(wizard.next(), Err(WizardError::AtFinalStep)));
    }

    #[test]
    fn test_car_chain_requires_vehicle() {
        let mut wizard = wizard();
        wizard.switch_product(Product::Car);
        fill_car_step1(&mut wizard);

        assert_eq!(wizard.next().unwrap(), 2);
        assert!(matches!(
            wizard.next(),
            Err(WizardError::Blocked(ValidationIssue::MissingVehicle))
        ));

        wizard.select_vehicle(Vehicle::new("Kia Picanto", "https://cdn.example.com/p.png"));
        assert_eq!(wizard.next().unwrap(), 3);
        assert!(wizard.is_final_step());
    }

    #[test]
    fn test_step_stays_in_bounds() {
        let mut wizard = wizard();
        // Previous on step 1 is a no-op
        assert_eq!(wizard.previous(), 1);

        fill_hotel_step1(&mut wizard);
        wizard.next().unwrap();
        assert_eq!(wizard.draft().step, 2);
        assert_eq!(wizard.previous(), 1);

        // Forward again re-checks the gate after the draft went invalid
        wizard.draft_mut().set_date_range(vec![]);
        assert!(matches!(
            wizard.next(),
            Err(WizardError::Blocked(ValidationIssue::MissingDates))
        ));
    }

    #[test]
    fn test_switch_product_resets_step_and_keeps_fields() {
        let mut wizard = wizard();
        fill_hotel_step1(&mut wizard);
        wizard.next().unwrap();

        wizard.switch_product(Product::Car);
        assert_eq!(wizard.draft().step, 1);
        assert_eq!(wizard.draft().product, Product::Car);
        // Hotel fields survive the tab change
        assert_eq!(wizard.draft().hotel.destination, "Tel Aviv");

        wizard.switch_product(Product::Hotel);
        assert_eq!(wizard.next().unwrap(), 2);
    }

    #[test]
    fn test_step_bounds_over_occupant_edits() {
        let mut wizard = wizard();
        fill_hotel_step1(&mut wizard);
        wizard.draft_mut().adjust_occupant(OccupantKind::Children, 1);
        assert!(matches!(
            wizard.next(),
            Err(WizardError::Blocked(ValidationIssue::MissingChildAges))
        ));
        wizard.draft_mut().set_child_age(0, 6);
        wizard.next().unwrap();

        let max = wizard.draft().product.max_steps();
        assert!(wizard.draft().step >= 1 && wizard.draft().step <= max);
    }

    #[test]
    fn test_analytics_events_fire_on_transitions() {
        let analytics = Arc::new(RecordingAnalytics::new());
        let mut wizard = Wizard::new(analytics.clone());

        wizard.switch_product(Product::Car);
        fill_car_step1(&mut wizard);
        wizard.next().unwrap();
        wizard.select_vehicle(Vehicle::new("Kia Picanto", "https://cdn.example.com/p.png"));

        let names: Vec<String> = analytics
            .events()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["ViewContent", "InitiateCheckout", "AddToCart"]);
    }

    #[test]
    fn test_complete_submission_resets_draft() {
        let mut wizard = wizard();
        fill_hotel_step1(&mut wizard);
        wizard.next().unwrap();
        let draft = wizard.draft_mut();
        draft.set_first_name("David");
        draft.set_last_name("Cohen");
        draft.set_email("david@example.com");
        draft.set_phone("+972 58-414-0489");
        assert!(wizard.submit_blocker().is_none());

        wizard.complete_submission();
        assert_eq!(wizard.draft().step, 1);
        assert!(wizard.draft().hotel.destination.is_empty());
        assert_eq!(wizard.draft().product, Product::Hotel);
    }
}
