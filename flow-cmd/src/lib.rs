//! Command implementations for the streamflow statistics CLI.
//!
//! Each station listed in the station CSV is loaded, clipped to the analysis
//! window and reduced to annual and monthly metric tables independently of
//! the others. A station that fails to load is reported and skipped.

use clap::Subcommand;
use flow_nwis::date_range::DateRange;
use flow_utils::dates::parse_date;
use log::info;
use std::path::Path;

pub mod output;
pub mod pipeline;
pub mod report;

/// Default start of the analysis window: first day of water year 1970.
pub const DEFAULT_START: &str = "1969-10-01";

/// Default end of the analysis window: last day of water year 2019.
pub const DEFAULT_END: &str = "2019-09-30";

#[derive(Subcommand)]
pub enum Command {
    /// Compute annual and monthly metrics and write the four output tables
    Stats {
        /// Station list CSV (`name,file`); defaults to the built-in list
        #[arg(short = 's', long)]
        stations: Option<String>,

        /// First day of the analysis window (YYYY-MM-DD)
        #[arg(long, default_value = DEFAULT_START)]
        start: String,

        /// Last day of the analysis window (YYYY-MM-DD)
        #[arg(long, default_value = DEFAULT_END)]
        end: String,

        /// Directory the metric tables are written to
        #[arg(short = 'o', long, default_value = ".")]
        output_dir: String,
    },

    /// Print a JSON summary of each station's record and annual averages
    Summary {
        /// Station list CSV (`name,file`); defaults to the built-in list
        #[arg(short = 's', long)]
        stations: Option<String>,

        /// First day of the analysis window (YYYY-MM-DD)
        #[arg(long, default_value = DEFAULT_START)]
        start: String,

        /// Last day of the analysis window (YYYY-MM-DD)
        #[arg(long, default_value = DEFAULT_END)]
        end: String,
    },
}

fn parse_window(start: &str, end: &str) -> anyhow::Result<DateRange> {
    let window = DateRange(parse_date(start)?, parse_date(end)?);
    if window.num_days() == 0 {
        anyhow::bail!("analysis window {} to {} is empty", start, end);
    }
    Ok(window)
}

fn run_stations(
    stations: Option<&str>,
    start: &str,
    end: &str,
) -> anyhow::Result<Vec<pipeline::StationStatistics>> {
    let window = parse_window(start, end)?;
    let (stations, base_dir) = pipeline::load_stations(stations)?;
    info!(
        "Processing {} stations from {} to {}",
        stations.len(),
        window.0,
        window.1
    );
    let results = pipeline::process_stations(&stations, &base_dir, window);
    if results.is_empty() && !stations.is_empty() {
        anyhow::bail!("no station could be processed");
    }
    Ok(results)
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Stats {
            stations,
            start,
            end,
            output_dir,
        } => {
            let results = run_stations(stations.as_deref(), &start, &end)?;
            output::write_tables(Path::new(&output_dir), &results)
        }
        Command::Summary {
            stations,
            start,
            end,
        } => {
            let results = run_stations(stations.as_deref(), &start, &end)?;
            println!("{}", report::render_reports(&results)?);
            Ok(())
        }
    }
}
