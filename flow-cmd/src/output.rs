//! Writers for the four metric tables.
//!
//! - `Annual_Metrics.csv`: one row per station and water year
//! - `Monthly_Metrics.csv`: one row per station and month
//! - `Average_Annual_Metrics.txt` (tab-separated): one row per station
//! - `Average_Monthly_Metrics.txt` (tab-separated): twelve rows per station, October first

use crate::pipeline::StationStatistics;
use anyhow::Context;
use csv::WriterBuilder;
use flow_utils::dates::format_date;
use log::info;
use serde::Serialize;
use std::{fs, io::Write, path::Path};

pub const ANNUAL_METRICS_FILE: &str = "Annual_Metrics.csv";
pub const MONTHLY_METRICS_FILE: &str = "Monthly_Metrics.csv";
pub const AVERAGE_ANNUAL_FILE: &str = "Average_Annual_Metrics.txt";
pub const AVERAGE_MONTHLY_FILE: &str = "Average_Monthly_Metrics.txt";

#[derive(Serialize)]
struct AnnualMetricsRecord<'a> {
    #[serde(rename = "Date")]
    date: String,
    site_no: &'a str,
    #[serde(rename = "Mean_Flow")]
    mean_flow: f64,
    #[serde(rename = "Peak_Flow")]
    peak_flow: f64,
    #[serde(rename = "Median")]
    median: f64,
    #[serde(rename = "Coeff_Var")]
    coeff_var: f64,
    #[serde(rename = "Skew")]
    skew: f64,
    #[serde(rename = "TQmean")]
    tqmean: f64,
    #[serde(rename = "R-B Index")]
    rb_index: f64,
    #[serde(rename = "7Q")]
    seven_q: f64,
    #[serde(rename = "3xMedian")]
    exceed_3x_median: usize,
    #[serde(rename = "Station")]
    station: &'a str,
}

#[derive(Serialize)]
struct AnnualAverageRecord<'a> {
    site_no: &'a str,
    #[serde(rename = "Mean_Flow")]
    mean_flow: f64,
    #[serde(rename = "Peak_Flow")]
    peak_flow: f64,
    #[serde(rename = "Median")]
    median: f64,
    #[serde(rename = "Coeff_Var")]
    coeff_var: f64,
    #[serde(rename = "Skew")]
    skew: f64,
    #[serde(rename = "TQmean")]
    tqmean: f64,
    #[serde(rename = "R-B Index")]
    rb_index: f64,
    #[serde(rename = "7Q")]
    seven_q: f64,
    #[serde(rename = "3xMedian")]
    exceed_3x_median: f64,
    #[serde(rename = "Station")]
    station: &'a str,
}

#[derive(Serialize)]
struct MonthlyMetricsRecord<'a> {
    #[serde(rename = "Date")]
    date: String,
    site_no: &'a str,
    #[serde(rename = "Mean_Flow")]
    mean_flow: f64,
    #[serde(rename = "Coeff_Var")]
    coeff_var: f64,
    #[serde(rename = "TQmean")]
    tqmean: f64,
    #[serde(rename = "R-B Index")]
    rb_index: f64,
    #[serde(rename = "Station")]
    station: &'a str,
}

#[derive(Serialize)]
struct MonthlyAverageRecord<'a> {
    #[serde(rename = "Month")]
    month: u32,
    site_no: &'a str,
    #[serde(rename = "Mean_Flow")]
    mean_flow: f64,
    #[serde(rename = "Coeff_Var")]
    coeff_var: f64,
    #[serde(rename = "TQmean")]
    tqmean: f64,
    #[serde(rename = "R-B Index")]
    rb_index: f64,
    #[serde(rename = "Station")]
    station: &'a str,
}

/// Write every station's water-year rows, comma-separated.
pub fn write_annual_metrics<W: Write>(
    writer: W,
    stations: &[StationStatistics],
) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b',').from_writer(writer);
    for stats in stations {
        for row in &stats.annual {
            wtr.serialize(AnnualMetricsRecord {
                date: format_date(&row.water_year),
                site_no: &row.site_no,
                mean_flow: row.mean_flow,
                peak_flow: row.peak_flow,
                median: row.median,
                coeff_var: row.coeff_var,
                skew: row.skew,
                tqmean: row.tqmean,
                rb_index: row.rb_index,
                seven_q: row.seven_q,
                exceed_3x_median: row.exceed_3x_median,
                station: &stats.station,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write every station's monthly rows, comma-separated.
pub fn write_monthly_metrics<W: Write>(
    writer: W,
    stations: &[StationStatistics],
) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b',').from_writer(writer);
    for stats in stations {
        for row in &stats.monthly {
            wtr.serialize(MonthlyMetricsRecord {
                date: format_date(&row.month),
                site_no: &row.site_no,
                mean_flow: row.mean_flow,
                coeff_var: row.coeff_var,
                tqmean: row.tqmean,
                rb_index: row.rb_index,
                station: &stats.station,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write one average row per station, tab-separated.
pub fn write_annual_averages<W: Write>(
    writer: W,
    stations: &[StationStatistics],
) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    for stats in stations {
        let avg = &stats.annual_averages;
        wtr.serialize(AnnualAverageRecord {
            site_no: &avg.site_no,
            mean_flow: avg.mean_flow,
            peak_flow: avg.peak_flow,
            median: avg.median,
            coeff_var: avg.coeff_var,
            skew: avg.skew,
            tqmean: avg.tqmean,
            rb_index: avg.rb_index,
            seven_q: avg.seven_q,
            exceed_3x_median: avg.exceed_3x_median,
            station: &stats.station,
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write twelve calendar-month rows per station, tab-separated.
pub fn write_monthly_averages<W: Write>(
    writer: W,
    stations: &[StationStatistics],
) -> anyhow::Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    for stats in stations {
        for row in &stats.monthly_averages {
            wtr.serialize(MonthlyAverageRecord {
                month: row.month,
                site_no: &row.site_no,
                mean_flow: row.mean_flow,
                coeff_var: row.coeff_var,
                tqmean: row.tqmean,
                rb_index: row.rb_index,
                station: &stats.station,
            })?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Write all four tables into `output_dir`, creating it if needed.
pub fn write_tables(output_dir: &Path, stations: &[StationStatistics]) -> anyhow::Result<()> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    type TableWriter = fn(fs::File, &[StationStatistics]) -> anyhow::Result<()>;
    let tables: [(&str, TableWriter); 4] = [
        (ANNUAL_METRICS_FILE, write_annual_metrics::<fs::File>),
        (MONTHLY_METRICS_FILE, write_monthly_metrics::<fs::File>),
        (AVERAGE_ANNUAL_FILE, write_annual_averages::<fs::File>),
        (AVERAGE_MONTHLY_FILE, write_monthly_averages::<fs::File>),
    ];
    for (name, write_table) in tables {
        let path = output_dir.join(name);
        let file = fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_table(file, stations).with_context(|| format!("failed to write {}", name))?;
        info!("Wrote {}", path.display());
    }
    Ok(())
}
