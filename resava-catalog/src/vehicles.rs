use serde::{Deserialize, Serialize};

/// A rental vehicle from the agency's catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Vehicle {
    pub name: String,
    pub image_url: String,
}

impl Vehicle {
    pub fn new(name: &str, image_url: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            image_url: image_url.to_string(),
        }
    }
}
