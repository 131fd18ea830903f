use crate::error::{ParseError, Result};
use chrono::naive::NaiveDate;
use std::cmp::Ordering;

/// Date format used for NWIS daily-value rows: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Number of columns in a complete NWIS daily-value row.
pub const ROW_LENGTH: usize = 5;

/// Number of columns in a row whose quality flag is blank.
pub const ROW_LENGTH_NO_QUALITY: usize = 4;

/// Token NWIS writes in the discharge column when the gage was not operating.
pub const EQUIPMENT_MALFUNCTION: &str = "Eqp";

/// Represents a discharge value from an NWIS daily-value file.
/// - `Eqp`: equipment malfunction, no value recorded
/// - `Missing`: blank, non-numeric or non-finite token
/// - `Recording(f64)`: an actual mean daily discharge, units as published
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Discharge {
    Eqp,
    Missing,
    Recording(f64),
}

impl Discharge {
    /// The recorded value, or `None` for a missing-marker.
    pub fn value(&self) -> Option<f64> {
        match self {
            Discharge::Recording(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.value().is_none()
    }
}

impl From<&str> for Discharge {
    fn from(token: &str) -> Self {
        match token.trim() {
            EQUIPMENT_MALFUNCTION => Discharge::Eqp,
            s => match s.parse::<f64>() {
                Ok(v) if v.is_finite() => Discharge::Recording(v),
                _ => Discharge::Missing,
            },
        }
    }
}

/// A single daily observation from an NWIS station file.
#[derive(Debug, Clone)]
pub struct Observation {
    pub agency_cd: String,
    pub site_no: String,
    pub date: NaiveDate,
    pub discharge: Discharge,
    pub quality: String,
}

impl Observation {
    /// Parse one data line.
    ///
    /// RDB rows are tab-delimited and keep empty fields, so a blank discharge
    /// or quality flag stays in its column. Lines without tabs are split on
    /// runs of whitespace.
    ///
    /// `line` is the 1-based line number in the file, used for error reporting.
    pub fn parse_line(line: usize, text: &str) -> Result<Observation> {
        let fields: Vec<&str> = if text.contains('\t') {
            text.split('\t').map(str::trim).collect()
        } else {
            text.split_whitespace().collect()
        };
        if fields.len() != ROW_LENGTH && fields.len() != ROW_LENGTH_NO_QUALITY {
            return Err(ParseError::ColumnCount {
                line,
                found: fields.len(),
            });
        }
        let date = NaiveDate::parse_from_str(fields[2], DATE_FORMAT).map_err(|_| {
            ParseError::InvalidDate {
                line,
                value: fields[2].to_string(),
            }
        })?;
        Ok(Observation {
            agency_cd: fields[0].to_string(),
            site_no: fields[1].to_string(),
            date,
            discharge: fields[3].into(),
            quality: fields.get(4).map(|q| q.to_string()).unwrap_or_default(),
        })
    }
}

impl Ord for Observation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl Eq for Observation {}

impl PartialEq for Observation {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl PartialOrd for Observation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
