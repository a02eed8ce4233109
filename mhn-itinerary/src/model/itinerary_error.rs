#[derive(thiserror::Error, Debug)]
pub enum ItineraryError {
    #[error("required input '{name}' not found at '{filepath}'")]
    MissingInputError { name: String, filepath: String },
    #[error("failure reading {name} from '{filepath}': {source}")]
    CsvReadError {
        name: String,
        filepath: String,
        source: csv::Error,
    },
    #[error("failure writing to file {0}: {1}")]
    CsvWriteError(String, csv::Error),
    #[error("failure creating output file '{filepath}': {source}")]
    OutputFileError {
        filepath: String,
        source: std::io::Error,
    },
    #[error("invalid itinerary configuration: {0}")]
    ConfigurationError(String),
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: ::config::ConfigError,
    },
    #[error("failure building shortest path worker pool: {0}")]
    WorkerPoolError(String),
}
