pub mod models;

pub use models::{RawSearchInput, TripRequest, UiSnapshot};
