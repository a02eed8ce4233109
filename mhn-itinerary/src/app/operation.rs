use super::{ConfigFormat, ItineraryCliError};
use crate::config::ItineraryConfig;
use crate::io::read_ops;
use crate::model::Diagnostic;
use crate::output::{writer, RepairGapRow};
use crate::pipeline::{self, PipelineInput};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ITINERARY_FILENAME: &str = "itinerary.csv";
pub const PATH_NODES_FILENAME: &str = "path_nodes.csv";
pub const ROUTE_HEADERS_FILENAME: &str = "route_headers.csv";
pub const ALLOWABLE_LINKS_FILENAME: &str = "allowable_links.csv";
pub const DIAGNOSTICS_FILENAME: &str = "diagnostics.csv";
pub const GAPS_FILENAME: &str = "gaps.csv";

#[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
pub enum ItineraryOperation {
    /// reconcile itineraries with the network and write the repaired outputs
    Process {
        /// route header csv
        #[arg(long)]
        routes: PathBuf,
        /// itinerary segment csv
        #[arg(long)]
        segments: PathBuf,
        /// network link csv
        #[arg(long)]
        links: PathBuf,
        /// network node csv with planar coordinates in feet
        #[arg(long)]
        nodes: PathBuf,
        /// pending project actions csv
        #[arg(long)]
        actions: Option<PathBuf>,
        /// TOML or JSON file with run parameters and correction tables
        #[arg(long)]
        configuration_file: Option<PathBuf>,
        #[arg(long)]
        output_directory: PathBuf,
        /// gzip-compress the output files
        #[arg(long, default_value_t = false)]
        compress: bool,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// check itineraries against the network and report gaps without repair
    Verify {
        #[arg(long)]
        routes: PathBuf,
        #[arg(long)]
        segments: PathBuf,
        #[arg(long)]
        links: PathBuf,
        #[arg(long)]
        nodes: PathBuf,
        #[arg(long)]
        actions: Option<PathBuf>,
        #[arg(long)]
        configuration_file: Option<PathBuf>,
        #[arg(long)]
        output_directory: PathBuf,
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// print the default configuration
    DefaultConfig {
        #[arg(value_enum, default_value_t = ConfigFormat::Toml)]
        format: ConfigFormat,
    },
}

impl ItineraryOperation {
    pub fn run(&self, parallelism: usize) -> Result<(), ItineraryCliError> {
        match self {
            ItineraryOperation::Process {
                routes,
                segments,
                links,
                nodes,
                actions,
                configuration_file,
                output_directory,
                compress,
                overwrite,
            } => {
                let config = ItineraryConfig::load(configuration_file.as_deref())?;
                let input = read_input(routes, segments, links, nodes, actions.as_deref())?;
                let output = pipeline::run_pipeline(input, &config, parallelism)?;
                std::fs::create_dir_all(output_directory)?;
                let dir = output_directory.as_path();
                let name = |f: &str| output_filename(f, *compress);
                let formatted = &output.formatted;
                writer::write_rows(dir, &name(ITINERARY_FILENAME), &formatted.itinerary, *overwrite)?;
                writer::write_rows(dir, &name(PATH_NODES_FILENAME), &formatted.path_nodes, *overwrite)?;
                writer::write_rows(dir, &name(ROUTE_HEADERS_FILENAME), &formatted.route_headers, *overwrite)?;
                writer::write_rows(dir, &name(ALLOWABLE_LINKS_FILENAME), &formatted.allowable_links, *overwrite)?;
                writer::write_rows(dir, &name(DIAGNOSTICS_FILENAME), output.diagnostics.as_slice(), *overwrite)?;
                if !output.failures.is_empty() {
                    log::warn!(
                        "{} gap(s) could not be repaired, affected routes are flagged for review",
                        output.failures.len()
                    );
                }
                eprintln!("finished.");
                Ok(())
            }
            ItineraryOperation::Verify {
                routes,
                segments,
                links,
                nodes,
                actions,
                configuration_file,
                output_directory,
                overwrite,
            } => {
                let config = ItineraryConfig::load(configuration_file.as_deref())?;
                let input = read_input(routes, segments, links, nodes, actions.as_deref())?;
                let report = pipeline::run_verification(input, &config);
                std::fs::create_dir_all(output_directory)?;
                let gaps: Vec<RepairGapRow> = report
                    .verification
                    .gaps
                    .iter()
                    .map(RepairGapRow::from)
                    .collect();
                let diagnostics: &[Diagnostic] = report.diagnostics.as_slice();
                writer::write_rows(output_directory, GAPS_FILENAME, &gaps, *overwrite)?;
                writer::write_rows(output_directory, DIAGNOSTICS_FILENAME, diagnostics, *overwrite)?;
                eprintln!(
                    "{} routes, {} matched segments, {} gaps, {} missing nodes",
                    report.routes.len(),
                    report.verification.matched.len(),
                    report.verification.gaps.len(),
                    report.verification.missing_nodes.len()
                );
                Ok(())
            }
            ItineraryOperation::DefaultConfig { format } => {
                let config = ItineraryConfig::default();
                let rendered = match format {
                    ConfigFormat::Toml => toml::to_string_pretty(&config)?,
                    ConfigFormat::Json => serde_json::to_string_pretty(&config)?,
                };
                println!("{rendered}");
                Ok(())
            }
        }
    }
}

fn output_filename(filename: &str, compress: bool) -> String {
    if compress {
        format!("{filename}.gz")
    } else {
        filename.to_string()
    }
}

fn read_input(
    routes: &Path,
    segments: &Path,
    links: &Path,
    nodes: &Path,
    actions: Option<&Path>,
) -> Result<PipelineInput, ItineraryCliError> {
    Ok(PipelineInput {
        routes: read_ops::read_rows("route headers", routes)?,
        segments: read_ops::read_rows("itinerary segments", segments)?,
        links: read_ops::read_rows("network links", links)?,
        nodes: read_ops::read_rows("network nodes", nodes)?,
        actions: read_ops::read_optional_rows("pending actions", actions)?,
    })
}
