use chrono::{NaiveDate, TimeDelta};
use std::mem::replace;

/// An inclusive window of calendar days, `DateRange(start, end)`.
///
/// Iterating yields each date from the start date through the end date.
/// A range whose start is after its end is empty.
#[derive(Clone, Eq, PartialEq, Copy, Debug)]
pub struct DateRange(pub NaiveDate, pub NaiveDate);

impl DateRange {
    /// Number of calendar days in the window.
    pub fn num_days(&self) -> usize {
        if self.0 > self.1 {
            0
        } else {
            (self.1 - self.0).num_days() as usize + 1
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + TimeDelta::days(1);
            Some(replace(&mut self.0, next))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DateRange;
    use chrono::NaiveDate;

    #[test]
    fn test_date_range_iteration() {
        let start = NaiveDate::from_ymd_opt(2019, 9, 28).unwrap();
        let end = NaiveDate::from_ymd_opt(2019, 10, 2).unwrap();
        let range = DateRange(start, end);
        assert_eq!(range.num_days(), 5);
        let dates: Vec<NaiveDate> = range.collect();
        assert_eq!(dates.len(), 5);
        assert_eq!(dates[0], start);
        assert_eq!(dates[4], end);
    }

    #[test]
    fn test_date_range_empty() {
        let start = NaiveDate::from_ymd_opt(2022, 3, 15).unwrap();
        let end = NaiveDate::from_ymd_opt(2022, 3, 14).unwrap();
        let range = DateRange(start, end);
        assert_eq!(range.num_days(), 0);
        assert_eq!(range.count(), 0);
    }
}
