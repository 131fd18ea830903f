//! Per-station pipeline: load, clip, aggregate, average.

use anyhow::Context;
use flow_data::{
    annual::{get_annual_statistics, AnnualStatistics},
    averages::{
        AnnualAverages, AverageAnnualStatistics, AverageMonthlyStatistics, MonthlyAverages,
    },
    monthly::{get_monthly_statistics, MonthlyStatistics},
};
use flow_nwis::{date_range::DateRange, series::DischargeSeries, station::Station};
use log::{error, info};
use std::path::{Path, PathBuf};

/// Everything computed for one station in one run.
#[derive(Debug, Clone)]
pub struct StationStatistics {
    pub station: String,
    /// Missing values across the whole file
    pub raw_missing: usize,
    /// Missing values inside the analysis window
    pub clipped_missing: usize,
    /// The series restricted to the analysis window
    pub series: DischargeSeries,
    pub annual: Vec<AnnualStatistics>,
    pub annual_averages: AnnualAverages,
    pub monthly: Vec<MonthlyStatistics>,
    pub monthly_averages: Vec<MonthlyAverages>,
}

/// Load the station list from `path`, or the embedded default list.
///
/// Returns the stations and the directory their relative paths resolve against.
pub fn load_stations(path: Option<&str>) -> anyhow::Result<(Vec<Station>, PathBuf)> {
    match path {
        Some(path) => {
            let body = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read station list {}", path))?;
            let stations = Station::parse_station_csv(&body)
                .with_context(|| format!("failed to parse station list {}", path))?;
            let base_dir = Path::new(path)
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default();
            Ok((stations, base_dir))
        }
        None => {
            let stations =
                Station::get_station_vector().context("failed to parse default station list")?;
            Ok((stations, PathBuf::from(".")))
        }
    }
}

/// Clip an already loaded series to `window` and compute every table.
pub fn process_series(
    name: &str,
    series: &DischargeSeries,
    raw_missing: usize,
    window: DateRange,
) -> StationStatistics {
    let (clipped, clipped_missing) = series.clip(window.0, window.1);
    info!(
        "{}: {} missing values in file, {} between {} and {}",
        name, raw_missing, clipped_missing, window.0, window.1
    );

    let annual = get_annual_statistics(&clipped);
    let annual_averages = annual.get_annual_averages();
    let monthly = get_monthly_statistics(&clipped);
    let monthly_averages = monthly.get_monthly_averages();
    info!(
        "{}: {} water years, {} months",
        name,
        annual.len(),
        monthly.len()
    );

    StationStatistics {
        station: name.to_string(),
        raw_missing,
        clipped_missing,
        series: clipped,
        annual,
        annual_averages,
        monthly,
        monthly_averages,
    }
}

/// Run the full pipeline for one station file.
pub fn process_station(
    station: &Station,
    base_dir: &Path,
    window: DateRange,
) -> anyhow::Result<StationStatistics> {
    let path = station.resolve_file(base_dir);
    info!("Working on {} ({})", station.name, path.display());
    let (series, raw_missing) = DischargeSeries::read_data(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(process_series(&station.name, &series, raw_missing, window))
}

/// Run every station; a station that fails is logged and left out.
pub fn process_stations(
    stations: &[Station],
    base_dir: &Path,
    window: DateRange,
) -> Vec<StationStatistics> {
    stations
        .iter()
        .filter_map(|station| match process_station(station, base_dir, window) {
            Ok(stats) => Some(stats),
            Err(e) => {
                error!("Skipping station {}: {:#}", station.name, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{load_stations, process_series, process_stations};
    use chrono::NaiveDate;
    use flow_nwis::{date_range::DateRange, series::DischargeSeries, station::Station};
    use std::path::Path;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Daily rows from 1998-09-25 to 2000-10-05 with an equipment outage.
    fn station_file() -> String {
        let mut body = String::from(
            "# synthetic record\nagency_cd\tsite_no\tdatetime\tdischarge\tcd\n5s\t15s\t20d\t14n\t10s\n",
        );
        for (i, day) in DateRange(date(1998, 9, 25), date(2000, 10, 5)).enumerate() {
            let value = if (40..45).contains(&i) {
                "Eqp".to_string()
            } else {
                format!("{}", 50 + (i % 11))
            };
            body.push_str(&format!("USGS\t03331500\t{}\t{}\tA\n", day, value));
        }
        body
    }

    #[test]
    fn test_process_series() {
        let (series, raw_missing) = DischargeSeries::parse_data(&station_file()).unwrap();
        assert_eq!(raw_missing, 5);
        let window = DateRange(date(1998, 10, 1), date(2000, 9, 30));
        let stats = process_series("Tippe", &series, raw_missing, window);
        assert_eq!(stats.station, "Tippe");
        assert_eq!(stats.clipped_missing, 5);
        assert_eq!(stats.series.len(), 731);
        assert_eq!(stats.annual.len(), 2);
        assert_eq!(stats.annual[0].missing_values, 5);
        assert_eq!(stats.monthly.len(), 24);
        assert_eq!(stats.monthly_averages.len(), 12);
        assert_eq!(stats.monthly_averages[0].month, 10);
        assert_eq!(stats.annual_averages.site_no, "03331500");
    }

    #[test]
    fn test_process_stations_skips_failures() {
        let dir = std::env::temp_dir().join(format!("flow_cmd_pipeline_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("good.txt"), station_file()).unwrap();
        std::fs::write(dir.join("bad.txt"), "header\nUSGS 1 not-a-date 4 A\n").unwrap();
        let stations = vec![
            Station {
                name: "Good".to_string(),
                file: "good.txt".to_string(),
            },
            Station {
                name: "Bad".to_string(),
                file: "bad.txt".to_string(),
            },
            Station {
                name: "Absent".to_string(),
                file: "absent.txt".to_string(),
            },
        ];
        let window = DateRange(date(1998, 10, 1), date(2000, 9, 30));
        let results = process_stations(&stations, &dir, window);
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].station, "Good");
    }

    #[test]
    fn test_load_stations() {
        let (stations, base_dir) = load_stations(None).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(base_dir, Path::new("."));

        let dir = std::env::temp_dir().join(format!("flow_cmd_stations_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let list = dir.join("stations.csv");
        std::fs::write(&list, "name,file\nWildcat,wildcat.txt\n").unwrap();
        let (stations, base_dir) = load_stations(list.to_str()).unwrap();
        std::fs::remove_dir_all(&dir).unwrap();
        assert_eq!(stations[0].name, "Wildcat");
        assert_eq!(base_dir, dir);
        assert!(load_stations(Some("/nonexistent/stations.csv")).is_err());
    }
}
