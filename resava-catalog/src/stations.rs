use serde::{Deserialize, Serialize};

/// A rental pickup/return station. Station ids are only unique within the
/// country list they were loaded from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Station {
    pub id: String,
    /// Display name, already cleaned up by [`format_station_name`].
    pub name: String,
    pub is_airport: bool,
}

impl Station {
    /// Builds a station from the raw supplier feed entry, where airport
    /// stations carry a `red_` prefix on the name.
    pub fn from_raw(id: &str, raw_name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format_station_name(raw_name),
            is_airport: raw_name.to_lowercase().starts_with("red_"),
        }
    }
}

/// Cleans up a raw supplier station name for display.
///
/// Airport entries arrive as `red_<city> airport`; the prefix and the
/// airport-word noise are stripped and the name is rendered as
/// "aéroport de <city>". Non-airport names pass through unchanged.
pub fn format_station_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if let Some(stripped) = lower.strip_prefix("red_") {
        let cleaned: Vec<&str> = stripped
            .split_whitespace()
            .filter(|word| !matches!(*word, "airport" | "apt" | "ap"))
            .collect();
        return format!("aéroport de {}", cleaned.join(" "));
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_airport_name_formatting() {
        assert_eq!(
            format_station_name("red_Tel Aviv Ben Gurion Airport"),
            "aéroport de tel aviv ben gurion"
        );
        assert_eq!(format_station_name("red_Paris Orly ap"), "aéroport de paris orly");
        assert_eq!(format_station_name("Nice Promenade"), "Nice Promenade");
    }

    #[test]
    fn test_from_raw_flags_airports() {
        let airport = Station::from_raw("FR-CDG1", "red_Paris Charles de Gaulle Airport");
        assert!(airport.is_airport);
        assert_eq!(airport.name, "aéroport de paris charles de gaulle");

        let city = Station::from_raw("FR-PAR1", "Paris Gare de Lyon");
        assert!(!city.is_airport);
    }
}
