//! Long-run averages of the annual and monthly metric tables.
//!
//! NaN entries (empty or degenerate buckets) are left out of every average.

use crate::{annual::AnnualStatistics, metrics::nan_mean, monthly::MonthlyStatistics};
use flow_utils::dates::WATER_YEAR_MONTHS;
use serde::Serialize;

/// Column-wise means over all water years of a station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualAverages {
    pub site_no: String,
    pub mean_flow: f64,
    pub peak_flow: f64,
    pub median: f64,
    pub coeff_var: f64,
    pub skew: f64,
    pub tqmean: f64,
    pub rb_index: f64,
    pub seven_q: f64,
    pub exceed_3x_median: f64,
}

/// Means of one calendar month's metrics across all years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyAverages {
    /// 1-based calendar month
    pub month: u32,
    pub site_no: String,
    pub mean_flow: f64,
    pub coeff_var: f64,
    pub tqmean: f64,
    pub rb_index: f64,
}

/// Trait for reducing a water-year table to a single average row.
pub trait AverageAnnualStatistics {
    fn get_annual_averages(&self) -> AnnualAverages;
}

/// Trait for reducing a monthly table to twelve calendar-month rows.
pub trait AverageMonthlyStatistics {
    /// Rows come out in water-year order: October first, September last.
    fn get_monthly_averages(&self) -> Vec<MonthlyAverages>;
}

impl AverageAnnualStatistics for [AnnualStatistics] {
    fn get_annual_averages(&self) -> AnnualAverages {
        AnnualAverages {
            site_no: self.first().map(|r| r.site_no.clone()).unwrap_or_default(),
            mean_flow: nan_mean(self.iter().map(|r| r.mean_flow)),
            peak_flow: nan_mean(self.iter().map(|r| r.peak_flow)),
            median: nan_mean(self.iter().map(|r| r.median)),
            coeff_var: nan_mean(self.iter().map(|r| r.coeff_var)),
            skew: nan_mean(self.iter().map(|r| r.skew)),
            tqmean: nan_mean(self.iter().map(|r| r.tqmean)),
            rb_index: nan_mean(self.iter().map(|r| r.rb_index)),
            seven_q: nan_mean(self.iter().map(|r| r.seven_q)),
            exceed_3x_median: nan_mean(self.iter().map(|r| r.exceed_3x_median as f64)),
        }
    }
}

impl AverageMonthlyStatistics for [MonthlyStatistics] {
    fn get_monthly_averages(&self) -> Vec<MonthlyAverages> {
        let site_no = self.first().map(|r| r.site_no.clone()).unwrap_or_default();
        WATER_YEAR_MONTHS
            .iter()
            .map(|&month| {
                let rows: Vec<&MonthlyStatistics> = self
                    .iter()
                    .filter(|r| r.calendar_month() == month)
                    .collect();
                MonthlyAverages {
                    month,
                    site_no: site_no.clone(),
                    mean_flow: nan_mean(rows.iter().map(|r| r.mean_flow)),
                    coeff_var: nan_mean(rows.iter().map(|r| r.coeff_var)),
                    tqmean: nan_mean(rows.iter().map(|r| r.tqmean)),
                    rb_index: nan_mean(rows.iter().map(|r| r.rb_index)),
                }
            })
            .collect()
    }
}
