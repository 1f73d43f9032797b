use std::error::Error;

use clap::Parser;
use itertools::Itertools;
use num_format::{Locale, ToFormattedString};
use simple_logger::SimpleLogger;
use tinytemplate::TinyTemplate;

use jet_emissions::*;

static TEMPLATE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/bin/aggregate_template.md"
));
static TEMPLATE_NAME: &'static str = "t";

#[derive(::serde::Serialize)]
struct Row {
    entity: String,
    aircraft_type: String,
    flights: usize,
    distance_km: String,
    emissions_kg: String,
}

#[derive(::serde::Serialize)]
struct Context {
    processed: usize,
    skipped: usize,
    entities: usize,
    total_kg: String,
    cruise_speed_kmh: f64,
    correction_factor: f64,
    rows: Vec<Row>,
    diagnostics: Vec<String>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq)]
enum Format {
    Text,
    Json,
    Csv,
    Markdown,
}

const ABOUT: &'static str = r#"Estimates the CO2 emissions of a set of entities from a JSON array of flights.
Each flight's tail number is resolved to an aircraft type and the aircraft type to the
entity operating it. Emissions are the flight hours at a constant cruise speed
times the emission rate of the aircraft type.
"#;

#[derive(Parser, Debug)]
#[command(author, version, about = ABOUT)]
struct Cli {
    /// JSON array of flights
    #[arg(short, long, default_value = "flights.json")]
    input: String,
    /// CSV with columns `aircraft_type,base_kg_per_hour` (defaults to the bundled table)
    #[arg(long)]
    rates: Option<String>,
    /// CSV with columns `tail_number,aircraft_type` (defaults to the bundled table)
    #[arg(long)]
    tail_numbers: Option<String>,
    /// CSV with columns `entity,aircraft_type` (defaults to the bundled table)
    #[arg(long)]
    entities: Option<String>,
    /// Assumed cruise speed of every aircraft in km/h
    #[arg(long, default_value_t = CRUISE_SPEED_KMH)]
    cruise_speed: f64,
    /// Factor applied to every published emission rate
    #[arg(long, default_value_t = CORRECTION_FACTOR)]
    correction_factor: f64,
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Log every flight processed
    #[arg(short, long)]
    verbose: bool,
}

fn read(path: &str) -> Result<Vec<u8>, jet_emissions::Error> {
    std::fs::read(path).map_err(jet_emissions::Error::io(path))
}

fn aggregator(cli: &Cli) -> Result<Aggregator, Box<dyn Error>> {
    let rates = cli.rates.as_deref().map(read).transpose()?;
    let tail_numbers = cli.tail_numbers.as_deref().map(read).transpose()?;
    let entities = cli.entities.as_deref().map(read).transpose()?;

    let rates = read_emission_rates(
        rates.as_deref().unwrap_or(EMISSION_RATES),
        cli.correction_factor,
    )?;
    let fleet = read_fleet(
        tail_numbers.as_deref().unwrap_or(TAIL_NUMBERS),
        entities.as_deref().unwrap_or(ENTITIES),
    )?;
    Ok(Aggregator::new(fleet, rates, cli.cruise_speed))
}

fn render(report: &Report, cli: &Cli) -> Result<String, Box<dyn Error>> {
    let format_kg = |value: f64| (value.round() as u64).to_formatted_string(&Locale::en);

    let context = Context {
        processed: report.processed,
        skipped: report.skipped,
        entities: report.totals.len(),
        total_kg: format_kg(report.total_emissions_kg()),
        cruise_speed_kmh: cli.cruise_speed,
        correction_factor: cli.correction_factor,
        rows: report
            .totals
            .iter()
            .sorted_by(|a, b| b.emissions_kg.total_cmp(&a.emissions_kg))
            .map(|total| Row {
                entity: total.entity.clone(),
                aircraft_type: total.aircraft_type.to_string(),
                flights: total.flights,
                distance_km: format_kg(total.distance_km),
                emissions_kg: format_kg(total.emissions_kg),
            })
            .collect(),
        diagnostics: report.diagnostics.iter().map(|d| d.to_string()).collect(),
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template(TEMPLATE_NAME, TEMPLATE)?;
    Ok(tt.render(TEMPLATE_NAME, &context)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init()
        .unwrap();

    let aggregator = aggregator(&cli)?;
    let flights = load_flights(&cli.input)?;

    let report = aggregator.aggregate(&flights);

    match cli.format {
        Format::Text => {
            for total in &report.totals {
                println!("{}: {:.2} kg CO2e", total.entity, total.emissions_kg);
            }
        }
        Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        Format::Csv => print!(
            "{}",
            String::from_utf8(jet_emissions::csv::serialize(report.totals.iter())?)?
        ),
        Format::Markdown => print!("{}", render(&report, &cli)?),
    }
    if !report.diagnostics.is_empty() {
        log::warn!("{} diagnostics raised", report.diagnostics.len());
    }
    Ok(())
}
