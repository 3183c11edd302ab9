//! geotz: command-line driver for geotz-core
//!
//! Runs the build pipeline over the source tables and answers lookups on
//! the built dataset.
//!
//! Usage examples
//! --------------
//!
//! - Validate the sources and write the tables
//!   $ geotz build
//!   $ geotz build --source ./raw --out ./dist --uncompressed --strict
//!
//! - Lookups
//!   $ geotz country jp
//!   $ geotz capital "united states of america"
//!   $ geotz locations --iso FR
//!   $ geotz locations --lat-from 0 --lng-from 0
//!   $ geotz timezones --country BR
//!   $ geotz states AR
//!
//! Logging goes to stderr and is controlled through `RUST_LOG`
//! (default `info`).
mod args;

use crate::args::{CliArgs, Commands, LocationArgs, QueryCommand};
use anyhow::Context;
use clap::Parser;
use geotz_core::{CoordinateBounds, DefaultBackend, GeoDb, GeoSearch, IsoCodeKind, Location};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

type Db = GeoDb<DefaultBackend>;

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    tracing::debug!(?args, "parsed arguments");

    match args.command {
        #[cfg(feature = "builder")]
        Commands::Build(build) => run_build(&build, args.data.as_deref()),
        Commands::Query(query) => {
            let db = open_db(args.data.as_deref())?;
            run_query(&db, query);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_query(db: &Db, query: QueryCommand) {
    match query {
        QueryCommand::Stats => {
            let stats = db.stats();
            println!("Dataset statistics:");
            println!("  Countries: {}", stats.countries);
            println!("  Capitals: {}", stats.capitals);
            println!("  Locations: {}", stats.locations);
            println!("  US states: {}", stats.states_ansi);
            println!("  Timezones: {}", stats.timezones);
        }

        QueryCommand::Countries => {
            for c in db.countries() {
                println!("{} ({}/{})", c.name(), c.iso2(), c.iso3());
            }
        }

        QueryCommand::Country { query } => match find_country(db, &query) {
            Some(c) => {
                println!("Country: {}", c.name());
                println!("Official name: {}", c.official_name());
                println!("ISO2: {}", c.iso2());
                println!("ISO3: {}", c.iso3());
                match c.capital() {
                    Some(capital) => println!(
                        "Capital: {} ({:.4}, {:.4}) {}",
                        capital.name(),
                        capital.latitude(),
                        capital.longitude(),
                        capital.timezone()
                    ),
                    None => println!("Capital: -"),
                }
                println!("Timezones: {}", c.timezones().collect::<Vec<_>>().join(", "));
            }
            None => eprintln!("No country found for: {query}"),
        },

        QueryCommand::Capital { country } => {
            let capital = if is_iso_code(db, &country) {
                db.find_capital_of_country_iso(&country)
            } else {
                db.find_capital_of_country_name(&country)
            };
            match capital {
                Some(c) if !c.is_empty() => println!(
                    "{}, capital of {} ({})",
                    c.name(),
                    c.country().name(),
                    c.timezone()
                ),
                Some(c) => println!("{} has no capital", c.country().name()),
                None => eprintln!("No country found for: {country}"),
            }
        }

        QueryCommand::Locations(filter) => {
            let found = find_locations(db, &filter);
            if found.is_empty() {
                println!("No locations found");
            }
            for l in found {
                println!(
                    "{}, {} ({:.4}, {:.4}) {}",
                    l.city(),
                    l.country().name(),
                    l.latitude(),
                    l.longitude(),
                    l.timezone()
                );
            }
        }

        QueryCommand::Timezones { country, city } => match (country, city) {
            (Some(country), _) => {
                let zones = if is_iso_code(db, &country) {
                    db.find_timezones_by_country_iso(&country)
                } else {
                    db.find_timezones_by_country_name(&country)
                };
                if zones.is_empty() {
                    eprintln!("No country found for: {country}");
                }
                for z in zones {
                    println!("{z}");
                }
            }
            (None, Some(city)) => match db.find_timezone_by_city_name(&city) {
                Some(z) => println!("{z}"),
                None => eprintln!("No city found for: {city}"),
            },
            (None, None) => {
                for z in db.timezones() {
                    println!("{z}");
                }
            }
        },

        QueryCommand::States { query } => match query {
            Some(q) => {
                let state = db
                    .find_state_by_usps_code(&q)
                    .or_else(|| db.find_state_by_fips_code(&q))
                    .or_else(|| db.find_state_by_gnisid(&q))
                    .or_else(|| db.find_state_by_name(&q));
                match state {
                    Some(s) => println!("{} {} FIPS {} GNIS {}", s.usps_code, s.name, s.fips_code, s.gnisid),
                    None => eprintln!("No state found for: {q}"),
                }
            }
            None => {
                for s in db.states_ansi() {
                    println!("{} {}", s.usps_code, s.name);
                }
            }
        },
    }
}

#[cfg(feature = "builder")]
fn run_build(build: &args::BuildArgs, data: Option<&Path>) -> anyhow::Result<ExitCode> {
    use geotz_core::{build_database, BuildConfig, CompressionMode};

    let defaults = BuildConfig::default();
    let config = BuildConfig {
        source_dir: build.source.clone().unwrap_or(defaults.source_dir),
        out_dir: build
            .out
            .clone()
            .or_else(|| data.map(Path::to_path_buf))
            .unwrap_or(defaults.out_dir),
        compression: if build.uncompressed {
            CompressionMode::None
        } else {
            defaults.compression
        },
    };

    let outcome = build_database(&config)
        .with_context(|| format!("building from {}", config.source_dir.display()))?;

    for d in outcome.report.diagnostics() {
        println!("{d}");
    }
    println!(
        "Wrote {} tables to {}: {} countries, {} locations, {} capitals ({} errors, {} warnings)",
        outcome.files.len(),
        config.out_dir.display(),
        outcome.stats.countries,
        outcome.stats.locations,
        outcome.stats.capitals,
        outcome.report.error_count(),
        outcome.report.warning_count()
    );

    if build.strict && outcome.report.has_errors() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn open_db(data: Option<&Path>) -> anyhow::Result<Db> {
    match data {
        Some(dir) => Db::load_from_dir(dir)
            .with_context(|| format!("loading tables from {} (run `geotz build` first?)", dir.display())),
        #[cfg(feature = "builder")]
        None => Db::load_or_build(&Db::default_data_dir(), &Db::default_source_dir())
            .context("loading the default dataset"),
        #[cfg(not(feature = "builder"))]
        None => Db::load_from_dir(Db::default_data_dir()).context("loading the default dataset"),
    }
}

fn is_iso_code(db: &Db, query: &str) -> bool {
    db.classify_iso_code(&query.trim().to_uppercase()) != IsoCodeKind::Invalid
}

fn find_country<'a>(db: &'a Db, query: &str) -> Option<&'a geotz_core::Country<DefaultBackend>> {
    db.find_country_by_iso(query)
        .or_else(|| db.find_country_by_name(query))
}

/// Intersection of every filter given; no filter lists everything.
fn find_locations<'a>(db: &'a Db, f: &LocationArgs) -> Vec<&'a Location<DefaultBackend>> {
    let mut sets: Vec<Vec<&Location<DefaultBackend>>> = Vec::new();
    if let Some(iso) = &f.iso {
        sets.push(db.find_locations_by_country_iso(iso));
    }
    if let Some(name) = &f.country {
        sets.push(db.find_locations_by_country_name(name, f.partial));
    }
    if let Some(province) = &f.province {
        sets.push(db.find_locations_by_province(province, f.partial));
    }
    if let Some(state) = &f.state {
        sets.push(db.find_locations_by_state(state, f.partial));
    }
    if f.has_bounds() {
        sets.push(db.find_locations_by_coordinates(&CoordinateBounds {
            latitude_from: f.lat_from,
            latitude_to: f.lat_to,
            longitude_from: f.lng_from,
            longitude_to: f.lng_to,
        }));
    }

    let Some(first) = sets.pop() else {
        return db.locations().iter().collect();
    };
    sets.iter().fold(first, |acc, other| {
        acc.into_iter()
            .filter(|l| other.iter().any(|o| std::ptr::eq(*l, *o)))
            .collect()
    })
}
