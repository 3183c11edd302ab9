use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for geotz
#[derive(Debug, Parser)]
#[command(
    name = "geotz",
    version,
    about = "Build, validate and query the geotz reference dataset"
)]
pub struct CliArgs {
    /// Directory holding the built tables (default: geotz-core/data/dist)
    #[arg(short = 'd', long = "data", global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate the source tables and write the dataset
    #[cfg(feature = "builder")]
    Build(BuildArgs),

    #[command(flatten)]
    Query(QueryCommand),
}

/// Lookups on the built dataset.
#[derive(Debug, Subcommand)]
pub enum QueryCommand {
    /// Show a summary of the dataset contents
    Stats,

    /// List all countries
    Countries,

    /// Lookup a country by ISO2/ISO3 code or by name
    Country {
        /// ISO code (e.g. JP, USA) or country name
        query: String,
    },

    /// Show the capital of a country
    Capital {
        /// ISO code or country name
        country: String,
    },

    /// List locations matching all given filters
    Locations(LocationArgs),

    /// Show timezones of a country, or the timezone of a city
    Timezones {
        /// ISO code or country name
        #[arg(short, long, conflicts_with = "city")]
        country: Option<String>,

        /// City name (UTF-8 or ASCII spelling)
        #[arg(long)]
        city: Option<String>,
    },

    /// List US states, or look one up by USPS code, FIPS code, GNIS id or name
    States {
        query: Option<String>,
    },
}

#[cfg(feature = "builder")]
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Directory with the source files (default: geotz-core/data/source)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output directory (default: --data, else geotz-core/data/dist)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Write plain `.bin` tables instead of `.bin.gz`
    #[arg(long)]
    pub uncompressed: bool,

    /// Exit with an error status when validation found errors
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    /// ISO2 or ISO3 code of the country
    #[arg(long)]
    pub iso: Option<String>,

    /// Country name or official name
    #[arg(long)]
    pub country: Option<String>,

    #[arg(long)]
    pub province: Option<String>,

    /// State (USPS code for US locations)
    #[arg(long)]
    pub state: Option<String>,

    /// Substring matching for --country, --province and --state
    #[arg(short, long)]
    pub partial: bool,

    #[arg(long, allow_hyphen_values = true)]
    pub lat_from: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub lat_to: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub lng_from: Option<f64>,

    #[arg(long, allow_hyphen_values = true)]
    pub lng_to: Option<f64>,
}

impl LocationArgs {
    pub fn has_bounds(&self) -> bool {
        self.lat_from.is_some() || self.lat_to.is_some() || self.lng_from.is_some() || self.lng_to.is_some()
    }
}
