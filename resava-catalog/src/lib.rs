pub mod countries;
pub mod stations;
pub mod times;
pub mod vehicles;

pub use countries::Country;
pub use stations::Station;
pub use vehicles::Vehicle;

/// In-memory catalog the wizard validates selections against.
///
/// Station lists are scoped per country; a station id is only meaningful
/// together with the country it was loaded for.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    countries: Vec<Country>,
    stations: std::collections::HashMap<String, Vec<Station>>,
    vehicles: Vec<Vehicle>,
}

impl Catalog {
    pub fn new(
        countries: Vec<Country>,
        stations: std::collections::HashMap<String, Vec<Station>>,
        vehicles: Vec<Vehicle>,
    ) -> Self {
        Self {
            countries,
            stations,
            vehicles,
        }
    }

    /// Countries in display order: preferred markets first, then alphabetical.
    pub fn countries(&self) -> Vec<&Country> {
        countries::in_display_order(&self.countries)
    }

    pub fn country_by_code(&self, code: &str) -> Option<&Country> {
        self.countries.iter().find(|c| c.code == code)
    }

    pub fn stations_for_country(&self, country_code: &str) -> &[Station] {
        self.stations
            .get(country_code)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn find_station(&self, country_code: &str, station_id: &str) -> Option<&Station> {
        self.stations_for_country(country_code)
            .iter()
            .find(|s| s.id == station_id)
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }
}

/// Built-in seed catalog, used as the default wiring and by tests.
pub fn seed_catalog() -> Catalog {
    let countries = vec![
        Country::new("IL", "Israel"),
        Country::new("FR", "France"),
        Country::new("US", "États-Unis"),
        Country::new("GR", "Grèce"),
        Country::new("IT", "Italie"),
        Country::new("ES", "Espagne"),
    ];

    let mut stations = std::collections::HashMap::new();
    stations.insert(
        "IL".to_string(),
        vec![
            Station::from_raw("IL-TLV1", "red_Tel Aviv Ben Gurion Airport"),
            Station::from_raw("IL-TLV2", "Tel Aviv Centre Ville"),
            Station::from_raw("IL-JER1", "Jérusalem Centre"),
            Station::from_raw("IL-HFA1", "red_Haifa apt"),
        ],
    );
    stations.insert(
        "FR".to_string(),
        vec![
            Station::from_raw("FR-CDG1", "red_Paris Charles de Gaulle Airport"),
            Station::from_raw("FR-ORY1", "red_Paris Orly ap"),
            Station::from_raw("FR-PAR1", "Paris Gare de Lyon"),
            Station::from_raw("FR-NCE1", "Nice Promenade"),
        ],
    );
    stations.insert(
        "US".to_string(),
        vec![
            Station::from_raw("US-JFK1", "red_New York JFK Airport"),
            Station::from_raw("US-MIA1", "Miami Beach"),
        ],
    );

    let vehicles = vec![
        Vehicle::new("Kia Picanto", "https://cdn.example.com/vehicles/picanto.png"),
        Vehicle::new("Hyundai i20", "https://cdn.example.com/vehicles/i20.png"),
        Vehicle::new("Toyota Corolla", "https://cdn.example.com/vehicles/corolla.png"),
        Vehicle::new("Kia Sportage", "https://cdn.example.com/vehicles/sportage.png"),
        Vehicle::new("Hyundai Staria 9 places", "https://cdn.example.com/vehicles/staria.png"),
    ];

    Catalog::new(countries, stations, vehicles)
}
