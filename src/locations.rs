//! Symbolic campus locations
//!
//! Route endpoints are picked by key from a static table. The reserved key
//! `CurrentLocation` is not in the table; it resolves to the device's last fix.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Reserved key for the device's live position
pub const CURRENT_LOCATION_KEY: &str = "CurrentLocation";
const CURRENT_LOCATION_DISPLAY: &str = "Current Location";

/// A route endpoint key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolicLocation {
    /// Device position, gated by the campus geofence
    CurrentLocation,
    /// Entry in the location table
    Named(String),
}

impl SymbolicLocation {
    pub fn named(key: impl Into<String>) -> Self {
        SymbolicLocation::Named(key.into())
    }

    pub fn key(&self) -> &str {
        match self {
            SymbolicLocation::CurrentLocation => CURRENT_LOCATION_KEY,
            SymbolicLocation::Named(key) => key,
        }
    }
}

impl From<&str> for SymbolicLocation {
    fn from(key: &str) -> Self {
        if key == CURRENT_LOCATION_KEY {
            SymbolicLocation::CurrentLocation
        } else {
            SymbolicLocation::Named(key.to_string())
        }
    }
}

impl fmt::Display for SymbolicLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One named point of interest
#[derive(Debug, Clone, PartialEq)]
pub struct LocationEntry {
    pub key: String,
    pub display_name: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Deserialize)]
struct CsvLocation {
    name: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    display_name: Option<String>,
}

/// Immutable key -> coordinate table, in picker order
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    entries: Vec<LocationEntry>,
}

impl LocationTable {
    /// Builds a table, rejecting duplicate keys, the reserved key and non-finite coordinates
    pub fn new(entries: Vec<LocationEntry>) -> Result<Self> {
        for (i, entry) in entries.iter().enumerate() {
            if entry.key == CURRENT_LOCATION_KEY {
                return Err(Error::Config(format!("'{}' is a reserved key", CURRENT_LOCATION_KEY)));
            }
            if !entry.coordinate.is_finite() {
                return Err(Error::Config(format!("Non-finite coordinate for '{}'", entry.key)));
            }
            if entries[..i].iter().any(|e| e.key == entry.key) {
                return Err(Error::Config(format!("Duplicate location key '{}'", entry.key)));
            }
        }

        Ok(Self { entries })
    }

    /// The built-in campus points of interest
    pub fn campus_default() -> Self {
        let entries = [
            ("Library", "Library", 12.873582943873872, 80.21921784197703),
            ("Canteen", "Canteen", 12.872502, 80.219496),
            ("AdminBlock", "Admin Block", 12.873147339012304, 80.22180918077176),
            ("Block1", "Block 1", 12.87388781717391, 80.2214368051665),
            ("Block2", "Block 2", 12.87279953771407, 80.2208933391326),
            (
                "CentreForAdvancedStudies",
                "Centre for Advanced Studies",
                12.871388230107986,
                80.22526689609808,
            ),
        ]
        .into_iter()
        .map(|(key, display_name, lat, lng)| LocationEntry {
            key: key.to_string(),
            display_name: display_name.to_string(),
            coordinate: Coordinate::new(lat, lng),
        })
        .collect();

        Self { entries }
    }

    /// Loads `name,latitude,longitude[,display_name]` rows
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut entries = Vec::new();

        for row in csv_reader.deserialize() {
            let row: CsvLocation = row?;
            let key = row.name.trim().to_string();
            entries.push(LocationEntry {
                display_name: row.display_name.unwrap_or_else(|| key.clone()),
                key,
                coordinate: Coordinate::new(row.latitude, row.longitude),
            });
        }

        Self::new(entries)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn get(&self, key: &str) -> Option<&LocationEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Looks up a named key; a miss is a configuration error
    pub fn coordinate(&self, key: &str) -> Result<Coordinate> {
        self.get(key)
            .map(|e| e.coordinate)
            .ok_or_else(|| Error::UnknownLocation(key.to_string()))
    }

    /// Human-readable name for any symbolic key
    pub fn display_name(&self, location: &SymbolicLocation) -> Option<&str> {
        match location {
            SymbolicLocation::CurrentLocation => Some(CURRENT_LOCATION_DISPLAY),
            SymbolicLocation::Named(key) => self.get(key).map(|e| e.display_name.as_str()),
        }
    }

    pub fn entries(&self) -> &[LocationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
