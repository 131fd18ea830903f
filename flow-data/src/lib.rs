//! Descriptive statistics for daily streamflow records.
//!
//! A [`DischargeSeries`](flow_nwis::series::DischargeSeries) is split into
//! water-year or calendar-month buckets, each bucket is reduced to a row of
//! metrics, and the per-bucket tables are reduced again to long-run averages.

pub mod annual;
pub mod averages;
pub mod bucket;
pub mod metrics;
pub mod monthly;

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{NaiveDate, TimeDelta};
    use flow_nwis::{
        observation::{Discharge, Observation},
        series::DischargeSeries,
    };

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Consecutive daily observations from `start`; `None` becomes `Eqp`.
    pub fn series_from(start: NaiveDate, values: &[Option<f64>]) -> DischargeSeries {
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, value)| Observation {
                agency_cd: "USGS".to_string(),
                site_no: "03335000".to_string(),
                date: start + TimeDelta::days(i as i64),
                discharge: value.map_or(Discharge::Eqp, Discharge::Recording),
                quality: "A".to_string(),
            })
            .collect();
        DischargeSeries::new(observations)
    }
}
