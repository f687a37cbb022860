//! CLI argument parsing for the trip-chain binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use trip_chain::reconstruct::{ReconstructOptions, ResolverChoice};

#[derive(Parser, Debug)]
#[command(name = "trip-chain", about = "Resolve trip origins and destinations from itinerary segments")]
pub struct Cli {
    /// Itinerary CSV export
    pub input: PathBuf,

    /// Annotated output CSV
    #[arg(short, long, default_value = "output.csv")]
    pub output: PathBuf,

    /// Write the anomaly report to this CSV file
    #[arg(long)]
    pub anomalies: Option<PathBuf>,

    /// Reconstruction strategy
    #[arg(long, value_enum, default_value_t = ResolverArg::Degree, env = "TRIP_CHAIN_RESOLVER")]
    pub resolver: ResolverArg,

    /// Treat each travel date as a separate trip
    #[arg(long)]
    pub group_by_date: bool,

    /// Resolve trips on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Customer CSV to join on e-mail address
    #[arg(long)]
    pub customers: Option<PathBuf>,

    /// E-mail column in the itinerary export
    #[arg(long, default_value = "Customer Email")]
    pub email_column: String,

    /// Write a per-customer summary (requires --customers)
    #[arg(long, requires = "customers")]
    pub summary: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, env = "TRIP_CHAIN_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Exit with an error status if any trip could not be resolved
    #[arg(long)]
    pub fail_on_error: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ResolverArg {
    /// Order-independent in/out degree analysis
    Degree,
    /// Ordered walk that detects loop-backs
    Chain,
}

impl From<ResolverArg> for ResolverChoice {
    fn from(arg: ResolverArg) -> Self {
        match arg {
            ResolverArg::Degree => ResolverChoice::Degree,
            ResolverArg::Chain => ResolverChoice::Chain,
        }
    }
}

impl Cli {
    pub fn reconstruct_options(&self) -> ReconstructOptions {
        ReconstructOptions {
            resolver: self.resolver.into(),
            group_by_date: self.group_by_date,
            parallel: self.parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["trip-chain", "input.csv"]);
        assert_eq!(cli.output, PathBuf::from("output.csv"));
        assert!(cli.anomalies.is_none());
        assert!(!cli.fail_on_error);
        let options = cli.reconstruct_options();
        assert_eq!(options.resolver, ResolverChoice::Degree);
        assert!(!options.group_by_date);
    }

    #[test]
    fn test_chain_resolver_parses() {
        let cli = Cli::parse_from(["trip-chain", "in.csv", "--resolver", "chain", "--group-by-date"]);
        let options = cli.reconstruct_options();
        assert_eq!(options.resolver, ResolverChoice::Chain);
        assert!(options.group_by_date);
    }

    #[test]
    fn test_summary_requires_customers() {
        let result = Cli::try_parse_from(["trip-chain", "in.csv", "--summary", "s.csv"]);
        assert!(result.is_err());
    }
}
