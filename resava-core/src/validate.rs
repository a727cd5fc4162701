use std::sync::LazyLock;

use regex::Regex;

use crate::draft::{BookingDraft, Product};

/// Loose phone shape: optional `+` or `00` prefix, then at least ten
/// digits/spaces/parens/dashes.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+|00)?[0-9\s()\-]{10,}$").expect("phone regex"));

/// Standard `local@domain.tld` shape, nothing fancier.
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

/// A field-level reason a gate is closed. The display string is the exact
/// message surfaced to the user; checks run in a fixed priority order so
/// the first failing condition wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("Please enter a destination")]
    MissingDestination,
    #[error("Please select your check-in and check-out dates")]
    MissingDates,
    #[error("Please set the age of each child")]
    MissingChildAges,
    #[error("Please select a country")]
    MissingCountry,
    #[error("Please select a station")]
    MissingStation,
    #[error("Please select your pickup and return dates")]
    MissingRentalDates,
    #[error("Please select pickup and return times")]
    MissingRentalTimes,
    #[error("Please select a vehicle")]
    MissingVehicle,
    #[error("Please enter your first name")]
    MissingFirstName,
    #[error("Please enter your last name")]
    MissingLastName,
    #[error("Please enter your email")]
    MissingEmail,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Please enter your phone number")]
    MissingPhone,
    #[error("Invalid phone number format")]
    InvalidPhone,
}

pub fn is_valid_phone_number(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// First reason the product's step 1 cannot be left, if any.
pub fn step1_blocker(draft: &BookingDraft) -> Option<ValidationIssue> {
    match draft.product {
        Product::Hotel => {
            if draft.hotel.destination.trim().is_empty() {
                return Some(ValidationIssue::MissingDestination);
            }
            if draft.hotel.date_range.len() != 2 {
                return Some(ValidationIssue::MissingDates);
            }
            let occupants = &draft.hotel.occupants;
            if occupants.children > 0 && occupants.children_ages.iter().any(Option::is_none) {
                return Some(ValidationIssue::MissingChildAges);
            }
            None
        }
        Product::Car => {
            let car = &draft.car;
            if car.country_code.is_empty() {
                return Some(ValidationIssue::MissingCountry);
            }
            if car.station_id.is_empty() {
                return Some(ValidationIssue::MissingStation);
            }
            if car.pickup_date.is_empty() || car.return_date.is_empty() {
                return Some(ValidationIssue::MissingRentalDates);
            }
            if !resava_catalog::times::is_on_grid(&car.pickup_time)
                || !resava_catalog::times::is_on_grid(&car.return_time)
            {
                return Some(ValidationIssue::MissingRentalTimes);
            }
            None
        }
    }
}

pub fn can_advance_from_step1(draft: &BookingDraft) -> bool {
    step1_blocker(draft).is_none()
}

/// Car only: the vehicle step requires a selection.
pub fn vehicle_step_blocker(draft: &BookingDraft) -> Option<ValidationIssue> {
    match draft.product {
        Product::Car if draft.car.selected_vehicle.is_none() => {
            Some(ValidationIssue::MissingVehicle)
        }
        _ => None,
    }
}

pub fn can_advance_from_vehicle_step(draft: &BookingDraft) -> bool {
    vehicle_step_blocker(draft).is_none()
}

/// First reason the terminal action is not available, if any.
pub fn submit_blocker(draft: &BookingDraft) -> Option<ValidationIssue> {
    let contact = &draft.contact;
    if contact.first_name.trim().is_empty() {
        return Some(ValidationIssue::MissingFirstName);
    }
    if contact.last_name.trim().is_empty() {
        return Some(ValidationIssue::MissingLastName);
    }
    if contact.email.trim().is_empty() {
        return Some(ValidationIssue::MissingEmail);
    }
    if !is_valid_email(&contact.email) {
        return Some(ValidationIssue::InvalidEmail);
    }
    if contact.phone.trim().is_empty() {
        return Some(ValidationIssue::MissingPhone);
    }
    if !is_valid_phone_number(&contact.phone) {
        return Some(ValidationIssue::InvalidPhone);
    }
    None
}

pub fn can_submit(draft: &BookingDraft) -> bool {
    submit_blocker(draft).is_none()
}
