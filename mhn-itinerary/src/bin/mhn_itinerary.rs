//! reconciles bus itineraries with the MHN network and repairs gaps with
//! shortest paths. run with `RUST_LOG=info` for progress logging.
use clap::Parser;
use mhn_itinerary::app::ItineraryApp;

fn main() {
    env_logger::init();
    let args = ItineraryApp::parse();
    if let Err(e) = args.op.run(args.parallelism) {
        log::error!("mhn_itinerary failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
