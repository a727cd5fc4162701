use resava_catalog::Catalog;
use resava_core::draft::{BookingDraft, Occupants, Product};

use crate::copy::CopyTable;

/// Renders the human-readable booking summary carried into the WhatsApp
/// chat. One renderer for every locale; the wording comes entirely from
/// the copy table.
pub fn render_summary(draft: &BookingDraft, catalog: &Catalog, copy: &CopyTable) -> String {
    let mut lines: Vec<String> = Vec::new();

    match draft.product {
        Product::Hotel => render_hotel(draft, copy, &mut lines),
        Product::Car => render_car(draft, catalog, copy, &mut lines),
    }

    let contact = &draft.contact;
    lines.push(String::new());
    lines.push(copy.contact_header.to_string());
    lines.push(format!(
        "{}: {} {}",
        copy.name_label, contact.first_name, contact.last_name
    ));
    lines.push(format!("{}: {}", copy.email_label, contact.email));
    lines.push(format!("{}: {}", copy.phone_label, contact.phone));
    if !contact.notes.is_empty() {
        lines.push(format!("{}: {}", copy.notes_label, contact.notes));
    }

    lines.join("\n")
}

fn render_hotel(draft: &BookingDraft, copy: &CopyTable, lines: &mut Vec<String>) {
    let hotel = &draft.hotel;
    lines.push(copy.hotel_header.to_string());
    lines.push(format!("{}: {}", copy.destination_label, hotel.destination));
    lines.push(format!(
        "{}: {}",
        copy.dates_label,
        hotel.date_range.join(" - ")
    ));
    lines.push(format!(
        "{}: {}",
        copy.occupants_label,
        occupants_summary(&hotel.occupants, copy)
    ));
    lines.push(format!("{}: {}⭐", copy.rating_label, hotel.star_rating));
    lines.push(format!("{}:", copy.options_label));
    lines.push(format!(
        "- {}: {}",
        copy.pool_label,
        copy.yes_no(hotel.options.pool)
    ));
    lines.push(format!(
        "- {}: {}",
        copy.breakfast_label,
        copy.yes_no(hotel.options.breakfast)
    ));
    lines.push(format!(
        "- {}: {}",
        copy.near_beach_label,
        copy.yes_no(hotel.options.near_beach)
    ));
    let specific = if hotel.specific_hotel_name.is_empty() {
        copy.not_specified
    } else {
        hotel.specific_hotel_name.as_str()
    };
    lines.push(format!("{}: {}", copy.specific_hotel_label, specific));
}

fn render_car(draft: &BookingDraft, catalog: &Catalog, copy: &CopyTable, lines: &mut Vec<String>) {
    let car = &draft.car;
    lines.push(copy.car_header.to_string());

    let country = catalog
        .country_by_code(&car.country_code)
        .map(|c| c.name.as_str())
        .unwrap_or(car.country_code.as_str());
    lines.push(format!("{}: {}", copy.country_label, country));

    let station = catalog
        .find_station(&car.country_code, &car.station_id)
        .map(|s| s.name.as_str())
        .unwrap_or(car.station_id.as_str());
    lines.push(format!("{}: {}", copy.station_label, station));

    lines.push(format!(
        "{}: {} {} {} {} {} {}",
        copy.dates_label,
        copy.range_from,
        car.pickup_date,
        car.pickup_time,
        copy.range_to,
        car.return_date,
        car.return_time
    ));
    lines.push(format!("{}: {}", copy.driver_age_label, car.driver_age));
    lines.push(format!(
        "{}: {}",
        copy.visa_label,
        copy.yes_no(car.has_visa_premier.unwrap_or(false))
    ));
    let restricted = car.shabbat_restriction.unwrap_or(false);
    let shown = if copy.shabbat_negated { !restricted } else { restricted };
    lines.push(format!("{}: {}", copy.shabbat_label, copy.yes_no(shown)));

    if let Some(vehicle) = &car.selected_vehicle {
        lines.push(format!("{}: {}", copy.vehicle_label, vehicle.name));
    }
    if !car.promo_code.is_empty() {
        lines.push(format!("{}: {}", copy.promo_label, car.promo_code));
    }
}

fn occupants_summary(occupants: &Occupants, copy: &CopyTable) -> String {
    format!(
        "{} {}, {} {}, {} {}, {} {}",
        occupants.rooms,
        copy.room.pick(occupants.rooms),
        occupants.adults,
        copy.adult.pick(occupants.adults),
        occupants.children,
        copy.child.pick(occupants.children),
        occupants.babies,
        copy.baby.pick(occupants.babies)
    )
}
