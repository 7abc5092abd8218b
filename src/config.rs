use std::path::PathBuf;

use clap::Parser;

use crate::data::filter::FilterDefaults;

/// Listings file read at startup when none is given.
pub const DEFAULT_LISTINGS_FILE: &str = "listings.csv";

#[derive(Parser, Debug)]
#[command(name = "estate-view")]
#[command(about = "Real Estate Dashboard - filter and browse property listings")]
#[command(version)]
pub struct Args {
    /// Listings file (.csv, .json or .parquet)
    #[arg(default_value = DEFAULT_LISTINGS_FILE)]
    pub file: PathBuf,

    /// Initial minimum price
    #[arg(long, value_name = "DOLLARS", default_value_t = 500_000.0)]
    pub min_price: f64,

    /// Initial maximum price
    #[arg(long, value_name = "DOLLARS", default_value_t = 650_000.0)]
    pub max_price: f64,

    /// Initial minimum square footage
    #[arg(long, value_name = "SQFT", default_value_t = 800.0)]
    pub min_sqft: f64,

    /// Initial maximum square footage
    #[arg(long, value_name = "SQFT", default_value_t = 3_000.0)]
    pub max_sqft: f64,
}

impl Args {
    pub fn filter_defaults(&self) -> FilterDefaults {
        FilterDefaults {
            min_price: self.min_price.max(0.0),
            max_price: self.max_price.max(0.0),
            min_footage: self.min_sqft.max(0.0),
            max_footage: self.max_sqft.max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_filter_defaults() {
        let args = Args::parse_from(["estate-view"]);
        assert_eq!(args.file, PathBuf::from(DEFAULT_LISTINGS_FILE));
        assert_eq!(args.filter_defaults(), FilterDefaults::default());
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "estate-view",
            "data/fraser.parquet",
            "--min-price",
            "400000",
            "--max-sqft",
            "2500",
        ]);
        assert_eq!(args.file, PathBuf::from("data/fraser.parquet"));
        let defaults = args.filter_defaults();
        assert_eq!(defaults.min_price, 400_000.0);
        assert_eq!(defaults.max_footage, 2_500.0);
        assert_eq!(defaults.max_price, 650_000.0);
    }

    #[test]
    fn negative_bounds_are_clamped() {
        let args = Args::parse_from(["estate-view", "--min-price=-5"]);
        assert_eq!(args.filter_defaults().min_price, 0.0);
    }
}
