mod correction_tables;
mod itinerary_config;
mod search_window_config;

pub use correction_tables::{CorrectionTables, PaceFare, PseudoNodeCorrection};
pub use itinerary_config::{CentroidRange, ItineraryConfig, ENV_PREFIX};
pub use search_window_config::SearchWindowConfig;
