mod config_format;
mod itinerary_app;
mod itinerary_cli_error;
mod operation;

pub use config_format::ConfigFormat;
pub use itinerary_app::ItineraryApp;
pub use itinerary_cli_error::ItineraryCliError;
pub use operation::ItineraryOperation;
