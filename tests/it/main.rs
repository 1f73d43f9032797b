use rand::{rngs::StdRng, SeedableRng};

use jet_emissions::*;

fn abs_difference<T: std::ops::Sub<Output = T> + PartialOrd>(x: T, y: T) -> T {
    if x < y {
        y - x
    } else {
        x - y
    }
}

fn bundled() -> Aggregator {
    let settings = Settings::default();
    Aggregator::new(
        load_fleet().unwrap(),
        load_emission_rates(settings.correction_factor).unwrap(),
        settings.cruise_speed_kmh,
    )
}

fn flight(tail_number: &str, from: (f64, f64), to: (f64, f64)) -> FlightRecord {
    FlightRecord {
        tail_number: tail_number.to_string(),
        departure_coords: Some(Coordinates::new(from.0, from.1)),
        arrival_coords: Some(Coordinates::new(to.0, to.1)),
        departure_airport: None,
        arrival_airport: None,
    }
}

/// Verifies that `distance` agrees with an independent haversine implementation
/// (which uses a slightly different Earth radius).
#[test]
fn distance_matches_geoutils() {
    let points = [
        (40.6413, -73.7781),
        (33.9416, -118.4085),
        (52.3650, 13.5010),
        (50.9008, 4.4865),
        (-33.9399, 151.1753),
    ];
    for from in points {
        for to in points {
            let expected = geoutils::Location::new(from.0, from.1)
                .haversine_distance_to(&geoutils::Location::new(to.0, to.1))
                .meters()
                / 1000.0;
            let accepted_error = 0.001 * expected + 1e-6; // 0.1%
            assert!(abs_difference(distance(from, to), expected) <= accepted_error);
        }
    }
}

/// A single flight of a known aircraft is attributed entirely to its operator.
#[test]
fn single_flight() {
    let aggregator = bundled();
    let jfk = (40.6413, -73.7781);
    let bos = (42.3656, -71.0096);
    let d = distance(jfk, bos);

    let report = aggregator.aggregate(&[flight("N767CJ", jfk, bos)]);

    let rate = 3573.95 * 3.16;
    approx::assert_relative_eq!(
        report.total("DRAKE").unwrap(),
        rate * d / 500.0,
        max_relative = 1e-9
    );
    for total in report.totals.iter().filter(|t| t.entity != "DRAKE") {
        assert_eq!(total.emissions_kg, 0.0);
    }
    assert!(report.diagnostics.is_empty());
}

/// A flight with an unknown tail number contributes nothing and is diagnosed once.
#[test]
fn unknown_tail_number() {
    let aggregator = bundled();

    let report = aggregator.aggregate(&[flight("N000XX", (40.0, -73.0), (42.0, -71.0))]);

    assert_eq!(report.total_emissions_kg(), 0.0);
    assert_eq!(report.totals.len(), 8);
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::MissingAircraftMapping {
            flight: 0,
            tail_number: "N000XX".to_string()
        }]
    );
}

/// Flights with missing coordinates count as 0 km instead of failing the batch.
#[test]
fn missing_coordinates() {
    let aggregator = bundled();
    let flights = read_flights(
        br#"[
            {"callsign": "N4DP", "departureCoords": null, "arrivalCoords": {"latitude": 1.0, "longitude": 1.0}},
            {"callsign": "N4DP", "departureCoords": {"latitude": 0.0, "longitude": 0.0}, "arrivalCoords": {"latitude": 0.0, "longitude": 1.0}}
        ]"#,
    )
    .unwrap();

    let report = aggregator.aggregate(&flights);

    assert_eq!(report.processed, 2);
    let dr_phil = report.totals.iter().find(|t| t.entity == "DR_PHIL").unwrap();
    assert_eq!(dr_phil.flights, 2);
    approx::assert_relative_eq!(
        dr_phil.emissions_kg,
        1580.32 * 3.16 * distance((0.0, 0.0), (0.0, 1.0)) / 500.0,
        max_relative = 1e-9
    );
    assert!(matches!(
        report.diagnostics.as_slice(),
        [Diagnostic::InvalidCoordinates { flight: 0, .. }]
    ));
}

/// 500 generated flights under 1000 km yield bounded, finite totals.
#[test]
fn generated_flights() {
    let mut rng = StdRng::seed_from_u64(42);
    let flights = generator::generate(&generator::Options::default(), &mut rng).unwrap();
    assert_eq!(flights.len(), 500);

    let aggregator = bundled();
    let report = aggregator.aggregate(&flights);

    assert_eq!(report.processed, 500);
    assert!(report
        .totals
        .iter()
        .all(|t| t.emissions_kg.is_finite() && t.emissions_kg >= 0.0));
    let bound = 500.0 * aggregator.rates().max() * 1000.0 / 500.0;
    assert!(report.total_emissions_kg() <= bound);
    // biased towards N621MM
    assert!(report.total("TAYLOR_SWIFT").unwrap() > 0.0);
}

/// Tables can be replaced without touching the bundled ones.
#[test]
fn alternate_fleet() {
    let fleet = read_fleet(
        b"tail_number,aircraft_type\nOY-GFS,F2TH\n",
        b"entity,aircraft_type\nACME,F2TH\nOTHER,F2TH\n",
    )
    .unwrap();
    let rates = read_emission_rates(b"aircraft_type,base_kg_per_hour\nF2TH,1000\n", 1.0).unwrap();
    let aggregator = Aggregator::new(fleet, rates, 1000.0);

    let record = flight("OYGFS", (55.6, 12.6), (41.8, 12.2));
    let report = aggregator.aggregate(&[record.clone()]);

    approx::assert_relative_eq!(
        report.total("ACME").unwrap(),
        record.distance().unwrap(),
        max_relative = 1e-9
    );
    assert_eq!(report.total("OTHER"), Some(0.0));
    assert!(matches!(
        report.diagnostics.as_slice(),
        [Diagnostic::AmbiguousAssignment { .. }]
    ));
}

/// A mistyped record is diagnosed on its own, without losing the others.
#[test]
fn mistyped_record() {
    let aggregator = bundled();
    let flights = read_flights(
        br#"[
            {"callsign": "N621MM", "departureCoords": {"latitude": 40.6413, "longitude": -73.7781}, "arrivalCoords": {"latitude": 42.3656, "longitude": -71.0096}},
            {"callsign": 12345, "departureCoords": {"latitude": 40.6413, "longitude": -73.7781}, "arrivalCoords": {"latitude": 42.3656, "longitude": -71.0096}},
            {"callsign": "N621MM", "departureCoords": {"latitude": "40.6N", "longitude": -73.7781}, "arrivalCoords": {"latitude": 42.3656, "longitude": -71.0096}}
        ]"#,
    )
    .unwrap();

    let report = aggregator.aggregate(&flights);

    assert_eq!(report.processed, 2);
    assert_eq!(report.skipped, 1);
    let d = distance((40.6413, -73.7781), (42.3656, -71.0096));
    approx::assert_relative_eq!(
        report.total("TAYLOR_SWIFT").unwrap(),
        1170.04 * 3.16 * d / 500.0,
        max_relative = 1e-9
    );
    assert_eq!(
        report.diagnostics,
        vec![
            Diagnostic::MissingAircraftMapping {
                flight: 1,
                tail_number: "".to_string()
            },
            Diagnostic::InvalidCoordinates {
                flight: 2,
                tail_number: "N621MM".to_string()
            },
        ]
    );
}

#[test]
fn unreadable_input() {
    assert!(load_flights("does/not/exist.json").is_err());
    assert!(read_flights(b"{}").is_err());
}
