use crate::{
    bucket::{partition, Bucket, Period},
    metrics,
};
use chrono::NaiveDate;
use flow_nwis::series::DischargeSeries;
use log::debug;
use serde::Serialize;

/// Metrics computed for a single water year (October 1 - September 30).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualStatistics {
    /// October 1 that opens the water year
    pub water_year: NaiveDate,
    pub site_no: String,
    pub mean_flow: f64,
    pub peak_flow: f64,
    pub median: f64,
    pub coeff_var: f64,
    pub skew: f64,
    pub tqmean: f64,
    pub rb_index: f64,
    pub seven_q: f64,
    pub exceed_3x_median: usize,
    /// Missing-marker days in the water year
    pub missing_values: usize,
}

impl From<&Bucket<'_>> for AnnualStatistics {
    fn from(bucket: &Bucket<'_>) -> Self {
        let q = bucket.discharges();
        AnnualStatistics {
            water_year: bucket.start,
            site_no: bucket.site_no.to_string(),
            mean_flow: metrics::mean(&q),
            peak_flow: metrics::peak(&q),
            median: metrics::median(&q),
            coeff_var: metrics::coeff_var(&q),
            skew: metrics::skew(&q),
            tqmean: metrics::tqmean(&q),
            rb_index: metrics::rb_index(&q),
            seven_q: metrics::seven_day_low_flow(&q),
            exceed_3x_median: metrics::exceed_three_times_median(&q),
            missing_values: bucket.missing_values(),
        }
    }
}

/// One row of metrics per water year, ordered by water-year start.
pub fn get_annual_statistics(series: &DischargeSeries) -> Vec<AnnualStatistics> {
    let rows: Vec<AnnualStatistics> = partition(series, Period::WaterYear)
        .iter()
        .map(AnnualStatistics::from)
        .collect();
    debug!("computed statistics for {} water years", rows.len());
    rows
}
