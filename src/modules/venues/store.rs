use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use super::model::{NewVenue, Venue};
use crate::MAX_PAGE_SIZE;

/// Errors surfaced by venue persistence
#[derive(Debug, Error)]
pub enum VenueStoreError {
    #[error("venue storage I/O failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("venue storage serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Clone)]
struct VenueTable {
    venues: HashMap<u64, Venue>,
    next_id: u64,
}

impl VenueTable {
    fn new() -> Self {
        VenueTable {
            venues: HashMap::new(),
            next_id: 1,
        }
    }
}

/// Venue catalog with offset/limit listing
///
/// Deliberately thin: the account workflow never touches it.
pub struct VenueStore {
    table: RwLock<VenueTable>,
    path: Option<PathBuf>,
}

impl VenueStore {
    /// Function to create a memory-only catalog
    pub fn in_memory() -> Self {
        VenueStore {
            table: RwLock::new(VenueTable::new()),
            path: None,
        }
    }

    /// Function to open a catalog backed by a JSON file, creating an empty
    /// one when the file does not exist yet
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, VenueStoreError> {
        let path = path.as_ref().to_path_buf();

        let table = match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => VenueTable::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => VenueTable::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(VenueStore {
            table: RwLock::new(table),
            path: Some(path),
        })
    }

    /// List venues ordered by id, returning one page and the total count
    pub async fn list(&self, offset: usize, limit: usize) -> (Vec<Venue>, usize) {
        let table = self.table.read().await;
        let total = table.venues.len();

        let mut venues: Vec<Venue> = table.venues.values().cloned().collect();
        venues.sort_by_key(|v| v.id);

        let page = venues
            .into_iter()
            .skip(offset)
            .take(limit.min(MAX_PAGE_SIZE))
            .collect();
        (page, total)
    }

    pub async fn get(&self, id: u64) -> Option<Venue> {
        self.table.read().await.venues.get(&id).cloned()
    }

    /// Function to add a new venue to the catalog
    pub async fn create(&self, new_venue: NewVenue) -> Result<Venue, VenueStoreError> {
        let mut table = self.table.write().await;

        let mut staged = table.clone();
        let venue = Venue {
            id: staged.next_id,
            name: new_venue.name,
            city: new_venue.city,
            capacity: new_venue.capacity,
        };
        staged.next_id += 1;
        staged.venues.insert(venue.id, venue.clone());

        if let Some(path) = &self.path {
            persist(path, &staged).await?;
        }
        *table = staged;

        Ok(venue)
    }
}

/// Write the table to a sibling temp file, then rename it over the
/// catalog file
async fn persist(path: &Path, table: &VenueTable) -> Result<(), VenueStoreError> {
    let data = serde_json::to_string_pretty(table)?;

    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, data).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}
