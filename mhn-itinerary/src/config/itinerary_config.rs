use super::{CorrectionTables, SearchWindowConfig};
use crate::model::{ItineraryError, NodeId};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// environment variables with this prefix override file settings, with `__`
/// separating nested keys, e.g. `MHN_ITIN_SEARCH__MAX_EXPANSIONS=2`.
pub const ENV_PREFIX: &str = "MHN_ITIN";

/// node ids reserved for zone centroids and points of entry. links touching
/// these nodes are centroid connectors and cannot carry transit. the MHN
/// range (1 to 1961) is set in `config/mhn_itinerary.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentroidRange {
    pub min: NodeId,
    pub max: NodeId,
}

impl CentroidRange {
    pub fn contains(&self, node: &NodeId) -> bool {
        self.min <= *node && *node <= self.max
    }
}

/// run parameters for itinerary reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryConfig {
    /// declared route speeds are floored at this value
    pub min_speed_mph: f64,
    /// speed assigned to routes without a declared speed
    pub default_speed_mph: f64,
    /// number of routes per processing batch
    pub batch_size: usize,
    /// speed used to estimate Pace and untimed segment travel times
    pub pace_speed_mph: f64,
    /// segments scheduled faster than this are reported
    pub questionable_speed_mph: f64,
    /// layover written on the last segment of every route
    pub layover_sentinel: u32,
    /// when set, paths are never routed through these nodes
    pub centroid_nodes: Option<CentroidRange>,
    pub search: SearchWindowConfig,
    pub correction_tables: CorrectionTables,
}

impl Default for ItineraryConfig {
    fn default() -> Self {
        Self {
            min_speed_mph: 15.0,
            default_speed_mph: 15.0,
            batch_size: 99,
            pace_speed_mph: 30.0,
            questionable_speed_mph: 70.0,
            layover_sentinel: 3,
            centroid_nodes: None,
            search: SearchWindowConfig::default(),
            correction_tables: CorrectionTables::default(),
        }
    }
}

impl ItineraryConfig {
    /// loads the configuration from an optional TOML or JSON file layered
    /// with environment overrides. without a file, defaults are used.
    pub fn load(filepath: Option<&Path>) -> Result<ItineraryConfig, ItineraryError> {
        let mut builder = Config::builder();
        if let Some(path) = filepath {
            let format = match path.extension().and_then(|e| e.to_str()) {
                Some("toml") => FileFormat::Toml,
                Some("json") => FileFormat::Json,
                _ => {
                    return Err(ItineraryError::ConfigurationError(format!(
                        "unsupported file type: {}",
                        path.display()
                    )))
                }
            };
            let filename = path.to_string_lossy();
            log::info!("reading itinerary configuration from {filename}");
            builder = builder.add_source(File::new(&filename, format));
        }
        let source = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| ItineraryError::ConfigReadError {
                msg: String::from("failed reading itinerary configuration"),
                source: e,
            })?;
        let conf: ItineraryConfig =
            source
                .try_deserialize()
                .map_err(|e| ItineraryError::ConfigReadError {
                    msg: String::from("failed decoding itinerary configuration"),
                    source: e,
                })?;
        conf.validate()?;
        Ok(conf)
    }

    pub fn validate(&self) -> Result<(), ItineraryError> {
        if self.batch_size == 0 {
            return Err(ItineraryError::ConfigurationError(String::from(
                "batch_size must be at least 1",
            )));
        }
        for (name, value) in [
            ("min_speed_mph", self.min_speed_mph),
            ("default_speed_mph", self.default_speed_mph),
            ("pace_speed_mph", self.pace_speed_mph),
            ("questionable_speed_mph", self.questionable_speed_mph),
        ] {
            if !(value > 0.0) {
                return Err(ItineraryError::ConfigurationError(format!(
                    "{name} must be positive, found {value}"
                )));
            }
        }
        self.search.validate()?;
        self.correction_tables.validate()
    }
}
