//! Reading NWIS daily-value files into date-ordered discharge series.
//!
//! Station files are whitespace-delimited with the columns
//! `agency_cd site_no datetime discharge quality`. Lines starting with `#`
//! are comments. The first non-comment line is the column header and, in
//! RDB exports, is followed by a column-format line such as
//! `5s 15s 20d 14n 10s`; both are skipped.

use crate::{
    date_range::DateRange,
    error::{ParseError, Result},
    observation::Observation,
};
use chrono::NaiveDate;
use flate2::read::GzDecoder;
use log::{debug, warn};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// Lines starting with this marker are ignored.
pub const COMMENT_MARKER: char = '#';

/// The observations of one station, sorted by date with one row per date.
#[derive(Debug, Clone, Default)]
pub struct DischargeSeries {
    observations: Vec<Observation>,
}

impl DischargeSeries {
    /// Build a series from observations in any order.
    ///
    /// When a date appears more than once, the last occurrence wins.
    pub fn new(mut observations: Vec<Observation>) -> DischargeSeries {
        if !observations.is_sorted() {
            observations.sort();
        }
        let mut unique: Vec<Observation> = Vec::with_capacity(observations.len());
        let mut replaced = 0usize;
        for obs in observations {
            match unique.last_mut() {
                Some(last) if last.date == obs.date => {
                    *last = obs;
                    replaced += 1;
                }
                _ => unique.push(obs),
            }
        }
        if replaced > 0 {
            warn!("{} duplicate dates replaced by their last occurrence", replaced);
        }
        DischargeSeries {
            observations: unique,
        }
    }

    /// Read a station file (optionally gzipped, by `.gz` extension) and return
    /// the series with the number of missing discharge values in it.
    pub fn read_data<P: AsRef<Path>>(path: P) -> Result<(DischargeSeries, usize)> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mut body = String::new();
        if path.extension().is_some_and(|ext| ext == "gz") {
            GzDecoder::new(file).read_to_string(&mut body)?;
        } else {
            BufReader::new(file).read_to_string(&mut body)?;
        }
        debug!("read {} bytes from {}", body.len(), path.display());
        DischargeSeries::parse_data(&body)
    }

    /// Parse the text of a station file.
    pub fn parse_data(body: &str) -> Result<(DischargeSeries, usize)> {
        let mut lines = body
            .lines()
            .enumerate()
            .filter(|(_, text)| {
                let trimmed = text.trim();
                !trimmed.is_empty() && !trimmed.starts_with(COMMENT_MARKER)
            })
            .peekable();

        lines.next().ok_or(ParseError::MissingHeader)?;
        if lines
            .peek()
            .is_some_and(|(_, text)| is_rdb_format_line(text))
        {
            lines.next();
        }

        let observations = lines
            .map(|(index, text)| Observation::parse_line(index + 1, text))
            .collect::<Result<Vec<Observation>>>()?;
        debug!("parsed {} observation rows", observations.len());

        let series = DischargeSeries::new(observations);
        let missing = series.missing_values();
        Ok((series, missing))
    }

    /// Restrict the series to the inclusive window `[start, end]` and return it
    /// with its missing-value count.
    pub fn clip(&self, start: NaiveDate, end: NaiveDate) -> (DischargeSeries, usize) {
        let window = DateRange(start, end);
        let from = self.observations.partition_point(|obs| obs.date < window.0);
        let to = self.observations.partition_point(|obs| obs.date <= window.1);
        let observations = if from < to {
            self.observations[from..to].to_vec()
        } else {
            Vec::new()
        };
        let clipped = DischargeSeries { observations };
        let missing = clipped.missing_values();
        (clipped, missing)
    }

    /// Count of observations whose discharge is a missing-marker.
    pub fn missing_values(&self) -> usize {
        self.observations
            .iter()
            .filter(|obs| obs.discharge.is_missing())
            .count()
    }

    /// Calendar days between the first and last observation with no row at all.
    pub fn absent_days(&self) -> usize {
        match self.date_range() {
            Some(range) => range.num_days() - self.observations.len(),
            None => 0,
        }
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Site number of the station, taken from the first observation.
    pub fn site_no(&self) -> Option<&str> {
        self.observations.first().map(|obs| obs.site_no.as_str())
    }

    /// First and last observed dates.
    pub fn date_range(&self) -> Option<DateRange> {
        match (self.observations.first(), self.observations.last()) {
            (Some(first), Some(last)) => Some(DateRange(first.date, last.date)),
            _ => None,
        }
    }
}

/// RDB column-format lines look like `5s 15s 20d 14n 10s`.
fn is_rdb_format_line(text: &str) -> bool {
    text.split_whitespace()
        .all(|token| match token.strip_suffix(['s', 'd', 'n']) {
            Some(width) => !width.is_empty() && width.chars().all(|c| c.is_ascii_digit()),
            None => false,
        })
}
