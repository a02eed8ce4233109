use crate::model::ItineraryError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ItineraryCliError {
    #[error("{source}")]
    ItineraryError {
        #[from]
        source: ItineraryError,
    },
    #[error("failure creating output directory: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error("failure encoding TOML: {source}")]
    TomlError {
        #[from]
        source: toml::ser::Error,
    },
    #[error("failure encoding JSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
}
