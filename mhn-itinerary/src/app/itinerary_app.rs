use super::ItineraryOperation;
use clap::Parser;

/// command line tool for reconciling bus itineraries with the MHN
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct ItineraryApp {
    #[command(subcommand)]
    pub op: ItineraryOperation,
    /// number of workers searching replacement paths
    #[arg(long, default_value_t = 1)]
    pub parallelism: usize,
}
