//! Shared utility functions for streamflow statistics crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, NaiveDate};

    /// Calendar months in water-year order: October through September.
    pub const WATER_YEAR_MONTHS: [u32; 12] = [10, 11, 12, 1, 2, 3, 4, 5, 6, 7, 8, 9];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")?)
    }

    /// Get the water year for a given date.
    /// Water year runs Oct 1 to Sep 30 and is labelled by the year it starts in.
    /// e.g., Oct 1 2022 -> water year 2022, Sep 30 2023 -> water year 2022
    pub fn water_year_for_date(date: &NaiveDate) -> i32 {
        let month = date.month();
        let year = date.year();
        if month >= 10 {
            year
        } else {
            year - 1
        }
    }

    /// October 1 of the water year containing `date`.
    pub fn water_year_start(date: &NaiveDate) -> NaiveDate {
        let year = water_year_for_date(date);
        NaiveDate::from_ymd_opt(year, 10, 1).unwrap()
    }

    /// First day of the calendar month containing `date`.
    pub fn month_start(date: &NaiveDate) -> NaiveDate {
        NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
    }

    /// First day of the calendar month following the one containing `date`.
    pub fn next_month_start(date: &NaiveDate) -> NaiveDate {
        let (year, month) = match date.month() {
            12 => (date.year() + 1, 1),
            m => (date.year(), m + 1),
        };
        NaiveDate::from_ymd_opt(year, month, 1).unwrap()
    }

    /// Last day of the calendar month containing `date`.
    pub fn month_end(date: &NaiveDate) -> NaiveDate {
        next_month_start(date).pred_opt().unwrap()
    }

}
