//! Grouping a discharge series into water-year or calendar-month buckets.

use chrono::NaiveDate;
use flow_nwis::{observation::Observation, series::DischargeSeries};
use flow_utils::dates::{month_start, next_month_start, water_year_for_date, water_year_start};

/// The accounting period a series is bucketed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    /// October 1 through September 30, labelled by its start date
    WaterYear,
    /// A calendar month, labelled by its last day
    Month,
}

impl Period {
    /// First day of the period containing `date`.
    pub fn start_of(&self, date: &NaiveDate) -> NaiveDate {
        match self {
            Period::WaterYear => water_year_start(date),
            Period::Month => month_start(date),
        }
    }

    /// First day of the period after the one starting at `start`.
    pub fn next_start(&self, start: &NaiveDate) -> NaiveDate {
        match self {
            Period::WaterYear => {
                NaiveDate::from_ymd_opt(water_year_for_date(start) + 1, 10, 1).unwrap()
            }
            Period::Month => next_month_start(start),
        }
    }
}

/// A read-only view over the observations of one period.
#[derive(Debug, Clone, Copy)]
pub struct Bucket<'a> {
    pub period: Period,
    /// First day of the period
    pub start: NaiveDate,
    /// Last day of the period
    pub end: NaiveDate,
    pub site_no: &'a str,
    observations: &'a [Observation],
}

impl<'a> Bucket<'a> {
    pub fn observations(&self) -> &'a [Observation] {
        self.observations
    }

    /// Present discharge values in date order, missing-markers dropped.
    pub fn discharges(&self) -> Vec<f64> {
        self.observations
            .iter()
            .filter_map(|obs| obs.discharge.value())
            .collect()
    }

    /// Number of missing-marker observations in the bucket.
    pub fn missing_values(&self) -> usize {
        self.observations
            .iter()
            .filter(|obs| obs.discharge.is_missing())
            .count()
    }
}

/// Split a series into consecutive buckets covering every period from the
/// first to the last observation. Periods with no rows yield empty buckets.
pub fn partition(series: &DischargeSeries, period: Period) -> Vec<Bucket<'_>> {
    let Some(range) = series.date_range() else {
        return Vec::new();
    };
    let site_no = series.site_no().unwrap_or_default();
    let last_start = period.start_of(&range.1);

    let mut buckets = Vec::new();
    let mut remaining = series.observations();
    let mut start = period.start_of(&range.0);
    while start <= last_start {
        let next = period.next_start(&start);
        let split = remaining.partition_point(|obs| obs.date < next);
        let (observations, rest) = remaining.split_at(split);
        buckets.push(Bucket {
            period,
            start,
            end: next.pred_opt().unwrap(),
            site_no,
            observations,
        });
        remaining = rest;
        start = next;
    }
    buckets
}
