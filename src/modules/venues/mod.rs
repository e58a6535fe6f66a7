pub mod model;
pub mod store;

// Re-export the main types
pub use model::{NewVenue, Venue};
pub use store::{VenueStore, VenueStoreError};
