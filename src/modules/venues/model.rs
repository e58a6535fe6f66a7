use serde::{Deserialize, Serialize};

/// Represents a single venue in the catalog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Venue {
    pub id: u64,
    pub name: String,
    pub city: String,
    pub capacity: u32,
}

/// Payload for adding a venue to the catalog
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub capacity: u32,
}
