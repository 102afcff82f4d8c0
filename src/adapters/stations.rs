use crate::domain::model::Station;
use crate::utils::error::{PhaseListError, Result};
use crate::utils::validation::{validate_file_extension, validate_non_empty_string};
use serde::Deserialize;
use std::path::Path;

/// 本地站台 (名稱必須大寫)
const BUILTIN_STATIONS: &[(&str, f64, f64)] = &[
    ("NHBP", 42.097477, -85.266003),
    ("LNSM", 42.731480, -84.47680),
    ("NE8K", 42.807600, -84.42195),
    ("MOOU", 42.577000, -84.43860),
    ("WKZ13", 44.9972, 55.4495),
];

#[derive(Debug, Deserialize)]
struct StationRow {
    name: String,
    latitude: f64,
    longitude: f64,
}

/// Ordered, read-only station lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct StationTable {
    stations: Vec<Station>,
}

impl Default for StationTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StationTable {
    pub fn builtin() -> Self {
        Self {
            stations: BUILTIN_STATIONS
                .iter()
                .map(|(name, lat, lon)| Station::new(*name, *lat, *lon))
                .collect(),
        }
    }

    pub fn with_stations(mut self, extra: impl IntoIterator<Item = Station>) -> Self {
        self.stations.extend(extra);
        self
    }

    /// 從 CSV 檔案載入額外站台 (欄位: name,latitude,longitude)
    pub fn with_csv_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        validate_file_extension("stations", &path_str, &["csv"])?;

        let file = std::fs::File::open(&path)?;
        let extra = read_station_csv(file)?;
        tracing::debug!("Loaded {} stations from {}", extra.len(), path_str);
        Ok(self.with_stations(extra))
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Finds the station whose name occurs inside `argument`.
    ///
    /// Every entry is checked in table order and the last match wins, so
    /// appended stations override built-in ones on overlap.
    pub fn lookup(&self, argument: &str) -> Option<&Station> {
        self.stations
            .iter()
            .rev()
            .find(|station| argument.contains(station.name.as_str()))
    }
}

pub fn read_station_csv<R: std::io::Read>(reader: R) -> Result<Vec<Station>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut stations = Vec::new();
    for row in csv_reader.deserialize::<StationRow>() {
        let row = row?;
        validate_non_empty_string("stations.name", &row.name)?;
        if !row.latitude.is_finite() || !row.longitude.is_finite() {
            return Err(PhaseListError::InvalidConfigValueError {
                field: "stations".to_string(),
                value: row.name,
                reason: "Coordinates must be finite numbers".to_string(),
            });
        }
        stations.push(Station::new(row.name, row.latitude, row.longitude));
    }
    Ok(stations)
}
