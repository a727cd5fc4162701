use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

/// Singular/plural word pair for occupant counts.
#[derive(Debug, Clone)]
pub struct WordPair {
    pub one: &'static str,
    pub many: &'static str,
}

impl WordPair {
    pub fn pick(&self, count: u32) -> &'static str {
        if count > 1 {
            self.many
        } else {
            self.one
        }
    }
}

/// All user-visible strings for the summary message, keyed by locale.
/// One renderer consumes this; there are no per-locale code paths.
#[derive(Debug, Clone)]
pub struct CopyTable {
    pub hotel_header: &'static str,
    pub car_header: &'static str,
    pub destination_label: &'static str,
    pub dates_label: &'static str,
    pub occupants_label: &'static str,
    pub rating_label: &'static str,
    pub options_label: &'static str,
    pub pool_label: &'static str,
    pub breakfast_label: &'static str,
    pub near_beach_label: &'static str,
    pub specific_hotel_label: &'static str,
    pub not_specified: &'static str,
    pub country_label: &'static str,
    pub station_label: &'static str,
    pub range_from: &'static str,
    pub range_to: &'static str,
    pub driver_age_label: &'static str,
    pub visa_label: &'static str,
    pub shabbat_label: &'static str,
    /// The French line asks "does not drive on Shabbat", the English one
    /// "drives on Shabbat"; when true the flag is shown inverted.
    pub shabbat_negated: bool,
    pub vehicle_label: &'static str,
    pub promo_label: &'static str,
    pub contact_header: &'static str,
    pub name_label: &'static str,
    pub email_label: &'static str,
    pub phone_label: &'static str,
    pub notes_label: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub room: WordPair,
    pub adult: WordPair,
    pub child: WordPair,
    pub baby: WordPair,
}

impl CopyTable {
    pub fn for_locale(locale: Locale) -> Self {
        match locale {
            Locale::Fr => Self::french(),
            Locale::En => Self::english(),
        }
    }

    pub fn yes_no(&self, value: bool) -> &'static str {
        if value {
            self.yes
        } else {
            self.no
        }
    }

    pub fn french() -> Self {
        Self {
            hotel_header: "Réservation Hôtel:",
            car_header: "Location Voiture:",
            destination_label: "Destination",
            dates_label: "Dates",
            occupants_label: "Occupants",
            rating_label: "Étoiles",
            options_label: "Options",
            pool_label: "Piscine",
            breakfast_label: "Petit-déjeuner",
            near_beach_label: "Proche de la mer",
            specific_hotel_label: "Hôtel particulier",
            not_specified: "Non spécifié",
            country_label: "Pays",
            station_label: "Station",
            range_from: "Du",
            range_to: "au",
            driver_age_label: "Âge conducteur",
            visa_label: "Visa Premier",
            shabbat_label: "Ne roule pas le chabat",
            shabbat_negated: false,
            vehicle_label: "Véhicule sélectionné",
            promo_label: "Code promo",
            contact_header: "Contact:",
            name_label: "Nom",
            email_label: "Email",
            phone_label: "Téléphone",
            notes_label: "Notes",
            yes: "Oui",
            no: "Non",
            room: WordPair { one: "chambre", many: "chambres" },
            adult: WordPair { one: "adulte", many: "adultes" },
            child: WordPair { one: "enfant", many: "enfants" },
            baby: WordPair { one: "bébé", many: "bébés" },
        }
    }

    pub fn english() -> Self {
        Self {
            hotel_header: "Hotel Booking:",
            car_header: "Car Rental:",
            destination_label: "Destination",
            dates_label: "Dates",
            occupants_label: "Guests",
            rating_label: "Rating",
            options_label: "Options",
            pool_label: "Pool",
            breakfast_label: "Breakfast",
            near_beach_label: "Near the sea",
            specific_hotel_label: "Specific hotel",
            not_specified: "Not specified",
            country_label: "Country",
            station_label: "Station",
            range_from: "From",
            range_to: "to",
            driver_age_label: "Driver age",
            visa_label: "Visa Premier",
            shabbat_label: "Drive on Shabbat",
            shabbat_negated: true,
            vehicle_label: "Selected vehicle",
            promo_label: "Promo code",
            contact_header: "Contact:",
            name_label: "Name",
            email_label: "Email",
            phone_label: "Phone",
            notes_label: "Notes",
            yes: "Yes",
            no: "No",
            room: WordPair { one: "room", many: "rooms" },
            adult: WordPair { one: "adult", many: "adults" },
            child: WordPair { one: "child", many: "children" },
            baby: WordPair { one: "baby", many: "babies" },
        }
    }
}
