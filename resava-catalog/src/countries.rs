use serde::{Deserialize, Serialize};

/// Markets shown before the alphabetical remainder of the country list.
const PREFERRED: [&str; 3] = ["Israel", "France", "États-Unis"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    /// Two-letter country code, e.g. "IL".
    pub code: String,
    pub name: String,
}

impl Country {
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

pub(crate) fn in_display_order(countries: &[Country]) -> Vec<&Country> {
    let mut sorted: Vec<&Country> = countries.iter().collect();
    sorted.sort_by(|a, b| {
        let a_preferred = PREFERRED.contains(&a.name.as_str());
        let b_preferred = PREFERRED.contains(&b.name.as_str());
        match (a_preferred, b_preferred) {
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            (true, true) => {
                let a_rank = PREFERRED.iter().position(|p| *p == a.name);
                let b_rank = PREFERRED.iter().position(|p| *p == b.name);
                a_rank.cmp(&b_rank)
            }
            (false, false) => a.name.cmp(&b.name),
        }
    });
    sorted
}

/// Matches user input against a country the way the search box does:
/// prefix match on the name, plus the common code shortcuts.
pub fn matches_query(country: &Country, query: &str) -> bool {
    let query = query.to_lowercase();
    let name = country.name.to_lowercase();
    if name.starts_with(&query) {
        return true;
    }
    matches!(
        (name.as_str(), query.as_str()),
        ("israel", "il") | ("france", "fr") | ("états-unis", "us")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_query_prefix_and_shortcuts() {
        let israel = Country::new("IL", "Israel");
        assert!(matches_query(&israel, "isr"));
        assert!(matches_query(&israel, "il"));
        assert!(!matches_query(&israel, "fr"));
    }
}
