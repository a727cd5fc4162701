use std::collections::BTreeMap;

use resava_catalog::Catalog;
use resava_core::draft::{BookingDraft, DriverAge, Product};
use serde_json::{json, Value};

use crate::dates::to_iso_date;

/// Flat property bag in the shape the CRM expects: string keys, values
/// that are strings, booleans or numbers (null for absent dates).
pub type PropertyBag = BTreeMap<String, Value>;

/// Hotel deals land in the default sales pipeline; car rentals have
/// their own.
pub const HOTEL_PIPELINE_ID: &str = "default";
pub const CAR_PIPELINE_ID: &str = "1389997300";
pub const INITIAL_DEAL_STAGE: &str = "appointmentscheduled";
pub const DEFAULT_NATIONALITY: &str = "Francais";

const NOT_SPECIFIED: &str = "Non précisé";
const VEHICLE_NOT_SPECIFIED: &str = "Non spécifié";

/// Builds the CRM contact property bag from the draft's contact block,
/// with the car-rental extras when applicable.
pub fn contact_properties(draft: &BookingDraft) -> PropertyBag {
    let contact = &draft.contact;
    let mut properties = PropertyBag::new();
    properties.insert("firstname".into(), json!(contact.first_name));
    properties.insert("lastname".into(), json!(contact.last_name));
    properties.insert("email".into(), json!(contact.email));
    properties.insert("phone".into(), json!(contact.phone));
    properties.insert("preferences_client".into(), json!(contact.notes));
    properties.insert("nationalite".into(), json!(DEFAULT_NATIONALITY));

    if draft.product == Product::Car {
        let car = &draft.car;
        properties.insert(
            "le_v_hicule_ne_roule_pas_le_chabat".into(),
            json!(car.shabbat_restriction.unwrap_or(false)),
        );
        properties.insert(
            "avez_vous_une_visa_premi_re_".into(),
            json!(car.has_visa_premier.unwrap_or(false)),
        );
        // The CRM age property only accepts plain numbers, so the "25+"
        // bucket is sent as "25". The deal keeps the literal.
        let age = match car.driver_age {
            DriverAge::Years(years) => years.to_string(),
            DriverAge::TwentyFivePlus => "25".to_string(),
        };
        properties.insert("age".into(), json!(age));
    }

    properties
}

/// Deal name shown to the sales team: "{first} {last} - {product label}".
pub fn deal_name(draft: &BookingDraft) -> String {
    let label = match draft.product {
        Product::Hotel => "Réservation Hôtel",
        Product::Car => "Location Voiture",
    };
    format!(
        "{} {} - {}",
        draft.contact.first_name, draft.contact.last_name, label
    )
}

/// Builds the CRM deal property bag. Every key is always present: absent
/// source fields map to a defined default or null, never to a missing
/// key, so the CRM receives a consistent property set.
pub fn deal_properties(draft: &BookingDraft, catalog: &Catalog) -> PropertyBag {
    let mut properties = PropertyBag::new();
    properties.insert("dealname".into(), json!(deal_name(draft)));
    properties.insert("dealstage".into(), json!(INITIAL_DEAL_STAGE));
    properties.insert("amount".into(), json!("0"));

    match draft.product {
        Product::Hotel => {
            properties.insert("pipeline".into(), json!(HOTEL_PIPELINE_ID));
            fill_hotel_properties(draft, &mut properties);
        }
        Product::Car => {
            properties.insert("pipeline".into(), json!(CAR_PIPELINE_ID));
            fill_car_properties(draft, catalog, &mut properties);
        }
    }

    properties
}

fn nullable_date(raw: Option<&String>) -> Value {
    raw.and_then(|value| to_iso_date(value))
        .map(Value::String)
        .unwrap_or(Value::Null)
}

fn fill_hotel_properties(draft: &BookingDraft, properties: &mut PropertyBag) {
    let hotel = &draft.hotel;

    let destination = if hotel.destination.trim().is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        hotel.destination.clone()
    };
    properties.insert("destination".into(), json!(destination));
    properties.insert(
        "check_in_date_str".into(),
        nullable_date(hotel.date_range.first()),
    );
    properties.insert(
        "check_out_date_str".into(),
        nullable_date(hotel.date_range.get(1)),
    );

    let occupants = &hotel.occupants;
    properties.insert("rooms".into(), json!(occupants.rooms));
    properties.insert("adults".into(), json!(occupants.adults));
    properties.insert("children".into(), json!(occupants.children));
    properties.insert("babies".into(), json!(occupants.babies));
    let ages: Vec<String> = occupants
        .children_ages
        .iter()
        .map(|age| age.map_or_else(|| "?".to_string(), |a| a.to_string()))
        .collect();
    properties.insert("children_ages".into(), json!(ages.join(", ")));

    properties.insert("rating".into(), json!(hotel.star_rating));
    properties.insert("pool".into(), json!(hotel.options.pool));
    properties.insert("breakfast".into(), json!(hotel.options.breakfast));
    properties.insert("near_beach".into(), json!(hotel.options.near_beach));
    properties.insert(
        "souhaite_hotel_en_particulier".into(),
        if hotel.specific_hotel_name.is_empty() {
            Value::Null
        } else {
            json!(hotel.specific_hotel_name)
        },
    );
}

fn fill_car_properties(draft: &BookingDraft, catalog: &Catalog, properties: &mut PropertyBag) {
    let car = &draft.car;

    let station_name = catalog
        .find_station(&car.country_code, &car.station_id)
        .map(|station| station.name.clone())
        .or_else(|| {
            if car.station_id.is_empty() {
                None
            } else {
                Some(car.station_id.clone())
            }
        })
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    properties.insert("station_name".into(), json!(station_name));

    let vehicle = car
        .selected_vehicle
        .as_ref()
        .map(|v| v.name.clone())
        .unwrap_or_else(|| VEHICLE_NOT_SPECIFIED.to_string());
    properties.insert("vehicle".into(), json!(vehicle));

    properties.insert(
        "check_in_date_str".into(),
        nullable_date(Some(&car.pickup_date).filter(|d| !d.is_empty())),
    );
    properties.insert(
        "check_out_date_str".into(),
        nullable_date(Some(&car.return_date).filter(|d| !d.is_empty())),
    );
    properties.insert("pickup_time".into(), json!(car.pickup_time));
    properties.insert("return_time".into(), json!(car.return_time));
    properties.insert("driver_age".into(), json!(car.driver_age.to_string()));
    properties.insert(
        "has_visa".into(),
        json!(car.has_visa_premier.unwrap_or(false)),
    );
    properties.insert(
        "shomer_shabbat".into(),
        json!(car.shabbat_restriction.unwrap_or(false)),
    );
    properties.insert(
        "promo_code".into(),
        if car.promo_code.is_empty() {
            Value::Null
        } else {
            json!(car.promo_code)
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use resava_catalog::{seed_catalog, Vehicle};
    use resava_core::draft::{BookingDraft, DriverAge, Product};

    fn hotel_draft() -> BookingDraft {
        let mut draft = BookingDraft::new(Product::Hotel);
        draft.set_destination("Tel Aviv");
        draft.set_date_range(vec!["10/08/2025".to_string(), "15/08/2025".to_string()]);
        draft.set_first_name("David");
        draft.set_last_name("Cohen");
        draft.set_email("david@example.com");
        draft.set_phone("+972 58-414-0489");
        draft
    }

    fn car_draft() -> BookingDraft {
        let mut draft = BookingDraft::new(Product::Car);
        draft.set_country("IL");
        draft.set_station("IL-TLV1");
        draft.set_pickup_date("01/09/2025");
        draft.set_return_date("05/09/2025");
        draft.set_driver_age(DriverAge::TwentyFivePlus);
        draft.set_selected_vehicle(Some(Vehicle::new(
            "Kia Picanto",
            "https://cdn.example.com/picanto.png",
        )));
        draft.set_first_name("Sarah");
        draft.set_last_name("Levy");
        draft.set_email("sarah@example.com");
        draft.set_phone("+33612345678");
        draft
    }

    #[test]
    fn test_hotel_deal_payload_happy_path() {
        let properties = deal_properties(&hotel_draft(), &seed_catalog());
        assert_eq!(properties["check_in_date_str"], json!("2025-08-10"));
        assert_eq!(properties["check_out_date_str"], json!("2025-08-15"));
        assert_eq!(properties["destination"], json!("Tel Aviv"));
        assert_eq!(properties["pipeline"], json!(HOTEL_PIPELINE_ID));
        assert_eq!(properties["dealstage"], json!(INITIAL_DEAL_STAGE));
        assert_eq!(properties["amount"], json!("0"));
        assert_eq!(
            properties["dealname"],
            json!("David Cohen - Réservation Hôtel")
        );
        // Defaults from the untouched occupants block
        assert_eq!(properties["rooms"], json!(1));
        assert_eq!(properties["adults"], json!(2));
        assert_eq!(properties["souhaite_hotel_en_particulier"], Value::Null);
    }

    #[test]
    fn test_car_deal_payload_keeps_driver_age_literal() {
        let properties = deal_properties(&car_draft(), &seed_catalog());
        assert_eq!(properties["driver_age"], json!("25+"));
        assert_eq!(properties["pipeline"], json!(CAR_PIPELINE_ID));
        assert_eq!(properties["vehicle"], json!("Kia Picanto"));
        assert_eq!(properties["check_in_date_str"], json!("2025-09-01"));
        assert_eq!(
            properties["station_name"],
            json!("aéroport de tel aviv ben gurion")
        );
        assert_eq!(properties["promo_code"], Value::Null);
    }

    #[test]
    fn test_contact_payload_converts_age_bucket() {
        let properties = contact_properties(&car_draft());
        assert_eq!(properties["age"], json!("25"));
        assert_eq!(properties["nationalite"], json!(DEFAULT_NATIONALITY));
        assert_eq!(properties["le_v_hicule_ne_roule_pas_le_chabat"], json!(false));

        let mut young = car_draft();
        young.set_driver_age(DriverAge::Years(19));
        assert_eq!(contact_properties(&young)["age"], json!("19"));

        // Hotel contacts carry no car extras
        let hotel = contact_properties(&hotel_draft());
        assert!(!hotel.contains_key("age"));
        assert_eq!(hotel["firstname"], json!("David"));
    }

    #[test]
    fn test_malformed_date_degrades_to_null() {
        let mut draft = hotel_draft();
        draft.set_date_range(vec!["10-08-2025".to_string(), "15/08".to_string()]);
        let properties = deal_properties(&draft, &seed_catalog());
        assert_eq!(properties["check_in_date_str"], Value::Null);
        assert_eq!(properties["check_out_date_str"], Value::Null);
        // The rest of the payload is unaffected
        assert_eq!(properties["destination"], json!("Tel Aviv"));
    }

    #[test]
    fn test_missing_fields_get_defined_defaults() {
        let mut draft = BookingDraft::new(Product::Hotel);
        draft.set_first_name("A");
        draft.set_last_name("B");
        let properties = deal_properties(&draft, &seed_catalog());
        assert_eq!(properties["destination"], json!("Non précisé"));
        assert_eq!(properties["check_in_date_str"], Value::Null);

        let mut car = BookingDraft::new(Product::Car);
        car.set_first_name("A");
        car.set_last_name("B");
        let properties = deal_properties(&car, &seed_catalog());
        assert_eq!(properties["station_name"], json!("Non précisé"));
        assert_eq!(properties["vehicle"], json!("Non spécifié"));
        assert_eq!(properties["check_in_date_str"], Value::Null);
    }

    #[test]
    fn test_unknown_station_falls_back_to_raw_id() {
        let mut draft = car_draft();
        draft.set_station("XX-UNKNOWN");
        let properties = deal_properties(&draft, &seed_catalog());
        assert_eq!(properties["station_name"], json!("XX-UNKNOWN"));
    }
}
