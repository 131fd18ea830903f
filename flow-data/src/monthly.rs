use crate::{
    bucket::{partition, Bucket, Period},
    metrics,
};
use chrono::{Datelike, NaiveDate};
use flow_nwis::series::DischargeSeries;
use log::debug;
use serde::Serialize;

/// Metrics computed for a single calendar month of one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStatistics {
    /// Last day of the month
    pub month: NaiveDate,
    pub site_no: String,
    pub mean_flow: f64,
    pub coeff_var: f64,
    pub tqmean: f64,
    pub rb_index: f64,
    pub missing_values: usize,
}

impl MonthlyStatistics {
    /// 1-based calendar month of the row.
    pub fn calendar_month(&self) -> u32 {
        self.month.month()
    }
}

impl From<&Bucket<'_>> for MonthlyStatistics {
    fn from(bucket: &Bucket<'_>) -> Self {
        let q = bucket.discharges();
        MonthlyStatistics {
            month: bucket.end,
            site_no: bucket.site_no.to_string(),
            mean_flow: metrics::mean(&q),
            coeff_var: metrics::coeff_var(&q),
            tqmean: metrics::tqmean(&q),
            rb_index: metrics::rb_index(&q),
            missing_values: bucket.missing_values(),
        }
    }
}

/// One row of metrics per year-month present in the series, in date order.
pub fn get_monthly_statistics(series: &DischargeSeries) -> Vec<MonthlyStatistics> {
    let rows: Vec<MonthlyStatistics> = partition(series, Period::Month)
        .iter()
        .map(MonthlyStatistics::from)
        .collect();
    debug!("computed statistics for {} months", rows.len());
    rows
}
