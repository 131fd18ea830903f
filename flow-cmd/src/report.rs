//! JSON summary of a station run.

use crate::pipeline::StationStatistics;
use chrono::NaiveDate;
use flow_data::averages::AnnualAverages;
use serde::Serialize;

/// Record counts and long-run averages for one station.
#[derive(Debug, Serialize)]
pub struct StationReport {
    pub station: String,
    pub site_no: Option<String>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub observations: usize,
    pub missing_values_in_file: usize,
    pub missing_values_in_window: usize,
    /// Days between the first and last clipped observation with no row
    pub absent_days: usize,
    pub water_years: usize,
    pub annual_averages: AnnualAverages,
}

impl From<&StationStatistics> for StationReport {
    fn from(stats: &StationStatistics) -> Self {
        let range = stats.series.date_range();
        StationReport {
            station: stats.station.clone(),
            site_no: stats.series.site_no().map(str::to_string),
            first_date: range.map(|r| r.0),
            last_date: range.map(|r| r.1),
            observations: stats.series.len(),
            missing_values_in_file: stats.raw_missing,
            missing_values_in_window: stats.clipped_missing,
            absent_days: stats.series.absent_days(),
            water_years: stats.annual.len(),
            annual_averages: stats.annual_averages.clone(),
        }
    }
}

/// Pretty-printed JSON array with one report per station.
pub fn render_reports(stations: &[StationStatistics]) -> anyhow::Result<String> {
    let reports: Vec<StationReport> = stations.iter().map(StationReport::from).collect();
    Ok(serde_json::to_string_pretty(&reports)?)
}

#[cfg(test)]
mod tests {
    use super::render_reports;
    use crate::pipeline::process_series;
    use chrono::NaiveDate;
    use flow_nwis::{date_range::DateRange, series::DischargeSeries};

    #[test]
    fn test_render_reports() {
        let body = "agency_cd site_no datetime discharge cd\n\
                    USGS 03335000 2003-10-01 12 A\n\
                    USGS 03335000 2003-10-02 Eqp A\n\
                    USGS 03335000 2003-10-05 15 A\n";
        let (series, missing) = DischargeSeries::parse_data(body).unwrap();
        let window = DateRange(
            NaiveDate::from_ymd_opt(1969, 10, 1).unwrap(),
            NaiveDate::from_ymd_opt(2019, 9, 30).unwrap(),
        );
        let stats = vec![process_series("Wildcat", &series, missing, window)];
        let json = render_reports(&stats).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let report = &value[0];
        assert_eq!(report["station"], "Wildcat");
        assert_eq!(report["site_no"], "03335000");
        assert_eq!(report["first_date"], "2003-10-01");
        assert_eq!(report["observations"], 3);
        assert_eq!(report["missing_values_in_window"], 1);
        assert_eq!(report["absent_days"], 2);
        assert_eq!(report["water_years"], 1);
        assert_eq!(report["annual_averages"]["mean_flow"], 13.5);
        // fewer than seven days: no low flow
        assert!(report["annual_averages"]["seven_q"].is_null());
    }
}
