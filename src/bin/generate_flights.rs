use std::error::Error;

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use simple_logger::SimpleLogger;

use jet_emissions::generator::{self, Options, CALLSIGNS};

const ABOUT: &'static str = r#"Writes a JSON array of synthetic private jet flights between a fixed set of US airports.
Each flight has a `callsign` (tail number), `departureCoords` and `arrivalCoords`
and can be used as input of `aggregate`.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// Number of flights to generate
    #[arg(short, long, default_value_t = 500)]
    flights: usize,
    /// Path of the generated file
    #[arg(short, long, default_value = "flights.json")]
    output: String,
    /// A tail number picked more often than the others
    #[arg(long, default_value = "N621MM")]
    bias_callsign: String,
    /// Probability of picking `bias_callsign` (0 disables the bias)
    #[arg(long, default_value_t = 0.5)]
    bias: f64,
    /// Probability of a synthetic tail number that is not in the fleet
    #[arg(long, default_value_t = 0.0)]
    unknown_ratio: f64,
    /// Maximum distance between departure and arrival in km
    #[arg(long, default_value_t = 1000.0, conflicts_with = "unconstrained")]
    max_distance: f64,
    /// Draw departure and arrival among all airports, regardless of distance
    #[arg(long)]
    unconstrained: bool,
    /// Seed of the random generator, for reproducible datasets
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let cli = Cli::parse();

    let options = Options {
        flights: cli.flights,
        callsigns: CALLSIGNS.iter().map(|c| c.to_string()).collect(),
        bias: (cli.bias > 0.0).then(|| (cli.bias_callsign.clone(), cli.bias)),
        unknown_ratio: cli.unknown_ratio,
        max_distance_km: (!cli.unconstrained).then_some(cli.max_distance),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let flights = generator::generate(&options, &mut rng)?;
    jet_emissions::write_flights(&cli.output, &flights)?;
    Ok(())
}
