use chrono::{DateTime, Utc};
use resava_catalog::Vehicle;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which booking product the wizard is currently editing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Product {
    Hotel,
    Car,
}

impl Product {
    /// Number of wizard steps for this product's chain.
    pub fn max_steps(&self) -> u8 {
        match self {
            Product::Hotel => 2,
            Product::Car => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupantKind {
    Rooms,
    Adults,
    Children,
    Babies,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Occupants {
    pub rooms: u32,
    pub adults: u32,
    pub children: u32,
    pub babies: u32,
    /// One slot per child; `None` until the age has been chosen (2-17).
    pub children_ages: Vec<Option<u8>>,
}

impl Default for Occupants {
    fn default() -> Self {
        Self {
            rooms: 1,
            adults: 2,
            children: 0,
            babies: 0,
            children_ages: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HotelOptions {
    pub pool: bool,
    pub breakfast: bool,
    pub near_beach: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HotelDetails {
    pub destination: String,
    /// Day-precision "dd/mm/yyyy" strings from the range picker; empty or
    /// exactly two entries.
    pub date_range: Vec<String>,
    pub occupants: Occupants,
    /// 0 means "no preference".
    pub star_rating: u8,
    pub options: HotelOptions,
    pub specific_hotel_name: String,
}

/// Driver age bracket: young drivers are quoted per year, everyone else
/// is the "25+" bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(into = "String", try_from = "String")]
pub enum DriverAge {
    Years(u8),
    TwentyFivePlus,
}

impl Default for DriverAge {
    fn default() -> Self {
        DriverAge::TwentyFivePlus
    }
}

impl DriverAge {
    /// Brackets offered by the form, youngest first.
    pub fn options() -> Vec<DriverAge> {
        let mut options: Vec<DriverAge> = (18..=25).map(DriverAge::Years).collect();
        options.push(DriverAge::TwentyFivePlus);
        options
    }
}

impl std::fmt::Display for DriverAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DriverAge::Years(years) => write!(f, "{}", years),
            DriverAge::TwentyFivePlus => write!(f, "25+"),
        }
    }
}

impl From<DriverAge> for String {
    fn from(age: DriverAge) -> Self {
        age.to_string()
    }
}

impl TryFrom<String> for DriverAge {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == "25+" {
            return Ok(DriverAge::TwentyFivePlus);
        }
        match value.parse::<u8>() {
            Ok(years) if (18..=25).contains(&years) => Ok(DriverAge::Years(years)),
            _ => Err(format!("Invalid driver age: {}", value)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CarDetails {
    pub country_code: String,
    pub station_id: String,
    pub pickup_date: String,
    pub return_date: String,
    pub pickup_time: String,
    pub return_time: String,
    pub driver_age: DriverAge,
    pub has_visa_premier: Option<bool>,
    pub shabbat_restriction: Option<bool>,
    pub selected_vehicle: Option<Vehicle>,
    pub promo_code: String,
}

impl Default for CarDetails {
    fn default() -> Self {
        Self {
            country_code: String::new(),
            station_id: String::new(),
            pickup_date: String::new(),
            return_date: String::new(),
            pickup_time: "09:00".to_string(),
            return_time: "09:00".to_string(),
            driver_age: DriverAge::default(),
            has_visa_premier: None,
            shabbat_restriction: None,
            selected_vehicle: None,
            promo_code: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

/// The in-memory booking form state for one browsing session.
///
/// Single source of truth for everything the wizard collects. All
/// mutation goes through the setters below, each of which maintains the
/// small invariant attached to its field; setters never fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingDraft {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub product: Product,
    /// 1-based, never outside `1..=product.max_steps()`.
    pub step: u8,
    pub hotel: HotelDetails,
    pub car: CarDetails,
    pub contact: ContactDetails,
}

impl BookingDraft {
    pub fn new(product: Product) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            product,
            step: 1,
            hotel: HotelDetails::default(),
            car: CarDetails::default(),
            contact: ContactDetails::default(),
        }
    }

    /// Discards everything and starts a fresh request on the same tab.
    pub fn reset(&mut self) {
        *self = BookingDraft::new(self.product);
    }

    // ---- Hotel fields ----

    pub fn set_destination(&mut self, destination: &str) {
        self.hotel.destination = destination.to_string();
    }

    pub fn set_date_range(&mut self, dates: Vec<String>) {
        self.hotel.date_range = dates;
    }

    /// Increments or decrements an occupant counter. Rooms and adults
    /// floor at 1, children and babies at 0. The children-ages list is
    /// kept exactly as long as the children count: a new child gets an
    /// unset age slot, a removed child drops the last slot.
    pub fn adjust_occupant(&mut self, kind: OccupantKind, delta: i32) {
        let occupants = &mut self.hotel.occupants;
        let (value, floor) = match kind {
            OccupantKind::Rooms => (&mut occupants.rooms, 1),
            OccupantKind::Adults => (&mut occupants.adults, 1),
            OccupantKind::Children => (&mut occupants.children, 0),
            OccupantKind::Babies => (&mut occupants.babies, 0),
        };
        let adjusted = (i64::from(*value) + i64::from(delta)).max(i64::from(floor));
        *value = adjusted as u32;

        if kind == OccupantKind::Children {
            let target = occupants.children as usize;
            while occupants.children_ages.len() < target {
                occupants.children_ages.push(None);
            }
            occupants.children_ages.truncate(target);
        }
    }

    /// Sets one child's age; out-of-range values clamp into 2..=17 and an
    /// index beyond the current children count is ignored.
    pub fn set_child_age(&mut self, index: usize, age: u8) {
        if let Some(slot) = self.hotel.occupants.children_ages.get_mut(index) {
            *slot = Some(age.clamp(2, 17));
        }
    }

    pub fn set_star_rating(&mut self, rating: u8) {
        self.hotel.star_rating = rating.min(5);
    }

    pub fn set_options(&mut self, options: HotelOptions) {
        self.hotel.options = options;
    }

    pub fn set_specific_hotel_name(&mut self, name: &str) {
        self.hotel.specific_hotel_name = name.to_string();
    }

    // ---- Car fields ----

    /// Station lists are country-scoped, so changing country always
    /// clears the station.
    pub fn set_country(&mut self, country_code: &str) {
        if self.car.country_code != country_code {
            self.car.station_id.clear();
        }
        self.car.country_code = country_code.to_string();
    }

    pub fn set_station(&mut self, station_id: &str) {
        self.car.station_id = station_id.to_string();
    }

    pub fn set_pickup_date(&mut self, date: &str) {
        self.car.pickup_date = date.to_string();
    }

    pub fn set_return_date(&mut self, date: &str) {
        self.car.return_date = date.to_string();
    }

    pub fn set_pickup_time(&mut self, time: &str) {
        self.car.pickup_time = time.to_string();
    }

    pub fn set_return_time(&mut self, time: &str) {
        self.car.return_time = time.to_string();
    }

    pub fn set_driver_age(&mut self, age: DriverAge) {
        self.car.driver_age = age;
    }

    pub fn set_has_visa_premier(&mut self, value: bool) {
        self.car.has_visa_premier = Some(value);
    }

    pub fn set_shabbat_restriction(&mut self, value: bool) {
        self.car.shabbat_restriction = Some(value);
    }

    pub fn set_selected_vehicle(&mut self, vehicle: Option<Vehicle>) {
        self.car.selected_vehicle = vehicle;
    }

    pub fn set_promo_code(&mut self, code: &str) {
        self.car.promo_code = code.to_string();
    }

    // ---- Contact fields ----

    pub fn set_first_name(&mut self, value: &str) {
        self.contact.first_name = value.to_string();
    }

    pub fn set_last_name(&mut self, value: &str) {
        self.contact.last_name = value.to_string();
    }

    pub fn set_email(&mut self, value: &str) {
        self.contact.email = value.to_string();
    }

    pub fn set_phone(&mut self, value: &str) {
        self.contact.phone = value.to_string();
    }

    pub fn set_notes(&mut self, value: &str) {
        self.contact.notes = value.to_string();
    }
}

impl Default for BookingDraft {
    fn default() -> Self {
        BookingDraft::new(Product::Hotel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_ages_track_children_count() {
        let mut draft = BookingDraft::default();

        draft.adjust_occupant(OccupantKind::Children, 1);
        draft.adjust_occupant(OccupantKind::Children, 1);
        assert_eq!(draft.hotel.occupants.children, 2);
        assert_eq!(draft.hotel.occupants.children_ages, vec![None, None]);

        draft.set_child_age(0, 7);
        draft.adjust_occupant(OccupantKind::Children, -1);
        assert_eq!(draft.hotel.occupants.children, 1);
        assert_eq!(draft.hotel.occupants.children_ages, vec![Some(7)]);

        // Removing below zero stays at zero with no ghost slots
        draft.adjust_occupant(OccupantKind::Children, -1);
        draft.adjust_occupant(OccupantKind::Children, -1);
        assert_eq!(draft.hotel.occupants.children, 0);
        assert!(draft.hotel.occupants.children_ages.is_empty());
    }

    #[test]
    fn test_rooms_and_adults_floor_at_one() {
        let mut draft = BookingDraft::default();
        draft.adjust_occupant(OccupantKind::Rooms, -5);
        draft.adjust_occupant(OccupantKind::Adults, -5);
        assert_eq!(draft.hotel.occupants.rooms, 1);
        assert_eq!(draft.hotel.occupants.adults, 1);
    }

    #[test]
    fn test_changing_country_clears_station() {
        let mut draft = BookingDraft::new(Product::Car);
        draft.set_country("IL");
        draft.set_station("IL-TLV1");
        assert_eq!(draft.car.station_id, "IL-TLV1");

        draft.set_country("FR");
        assert_eq!(draft.car.station_id, "");

        // Re-selecting the same country keeps the station
        draft.set_station("FR-CDG1");
        draft.set_country("FR");
        assert_eq!(draft.car.station_id, "FR-CDG1");
    }

    #[test]
    fn test_child_age_clamps_into_range() {
        let mut draft = BookingDraft::default();
        draft.adjust_occupant(OccupantKind::Children, 1);
        draft.set_child_age(0, 1);
        assert_eq!(draft.hotel.occupants.children_ages[0], Some(2));
        draft.set_child_age(0, 30);
        assert_eq!(draft.hotel.occupants.children_ages[0], Some(17));
        // Index past the end is ignored
        draft.set_child_age(5, 10);
    }

    #[test]
    fn test_driver_age_round_trips_as_string() {
        assert_eq!(DriverAge::TwentyFivePlus.to_string(), "25+");
        assert_eq!(DriverAge::try_from("19".to_string()), Ok(DriverAge::Years(19)));
        assert!(DriverAge::try_from("17".to_string()).is_err());
        assert!(DriverAge::try_from("old".to_string()).is_err());
        assert_eq!(DriverAge::options().len(), 9);
    }
}
