use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Embedded default station list: Wildcat Creek and the Tippecanoe River.
pub static CSV_OBJECT: &str = include_str!("../../fixtures/stations.csv");

/// A gaging station to process: a short label and the NWIS file holding its record.
///
/// Expected CSV columns: name, file
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Station {
    /// Label written in the `Station` column of every output table
    pub name: String,
    /// Path to the daily-value file, plain text or `.gz`
    pub file: String,
}

impl Station {
    /// Parse a CSV string of station definitions.
    pub fn parse_station_csv(csv_object: &str) -> Result<Vec<Station>, csv::Error> {
        ReaderBuilder::new()
            .delimiter(b',')
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes())
            .deserialize()
            .collect()
    }

    /// The embedded default station list.
    pub fn get_station_vector() -> Result<Vec<Station>, csv::Error> {
        Station::parse_station_csv(CSV_OBJECT)
    }

    /// Resolve the station file against `base_dir` unless it is already absolute.
    pub fn resolve_file(&self, base_dir: &Path) -> PathBuf {
        let file = Path::new(&self.file);
        if file.is_absolute() {
            file.to_path_buf()
        } else {
            base_dir.join(file)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Station;
    use std::path::Path;

    #[test]
    fn test_parse_station_csv() {
        let csv_data = "\
name,file
Wildcat, data/wildcat.txt
Tippe,/srv/nwis/tippe.txt.gz
";
        let stations = Station::parse_station_csv(csv_data).unwrap();
        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].name, "Wildcat");
        assert_eq!(stations[0].file, "data/wildcat.txt");
        assert_eq!(
            stations[0].resolve_file(Path::new("/home/hydro")),
            Path::new("/home/hydro/data/wildcat.txt")
        );
        assert_eq!(
            stations[1].resolve_file(Path::new("/home/hydro")),
            Path::new("/srv/nwis/tippe.txt.gz")
        );
    }

    #[test]
    fn test_default_stations() {
        let stations = Station::get_station_vector().unwrap();
        let names: Vec<&str> = stations.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Wildcat", "Tippe"]);
    }

    #[test]
    fn test_parse_empty_csv() {
        let stations = Station::parse_station_csv("name,file\n").unwrap();
        assert_eq!(stations.len(), 0);
    }

    #[test]
    fn test_parse_missing_column() {
        assert!(Station::parse_station_csv("name\nWildcat\n").is_err());
    }
}
