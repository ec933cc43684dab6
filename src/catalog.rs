//! The fixed vehicle catalog
use crate::error::{Result, VinError};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single vehicle, keyed by its VIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub identifier: String,
    pub model: String,
    pub year: i32,
    /// Whole euros.
    pub price: u64,
    /// Days on the lot.
    pub dwell_days: u32,
}

impl VehicleRecord {
    pub fn new(identifier: &str, model: &str, year: i32, price: u64, dwell_days: u32) -> Self {
        Self {
            identifier: identifier.to_string(),
            model: model.to_string(),
            year,
            price,
            dwell_days,
        }
    }

    pub fn formatted_price(&self) -> String {
        format_price_eur(self.price)
    }
}

lazy_static! {
    static ref SEED_VEHICLES: Vec<VehicleRecord> = vec![
        VehicleRecord::new("1HGCM82633A004352", "VW Golf", 2019, 18_000, 30),
        VehicleRecord::new("WBA5A7C53FG123456", "BMW 3er", 2021, 35_000, 15),
        VehicleRecord::new("WAUZZZ8K4BA123789", "Audi A4", 2020, 30_000, 20),
    ];
}

/// Immutable set of vehicle records.
///
/// Built once at startup and only ever borrowed afterwards; the largest
/// dwell time is computed here so the bar renderer never has to rescan.
#[derive(Debug, Clone)]
pub struct RecordStore {
    records: Vec<VehicleRecord>,
    max_dwell_days: u32,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl RecordStore {
    /// The three built-in sample vehicles.
    pub fn seeded() -> Self {
        Self::from_validated(SEED_VEHICLES.clone())
    }

    /// Build a store from an arbitrary record set, e.g. one read from the
    /// config file.
    pub fn new(records: Vec<VehicleRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(VinError::Config(
                "vehicle list must contain at least one record".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.identifier.is_empty()
                || !record.identifier.chars().all(|c| c.is_ascii_alphanumeric())
            {
                return Err(VinError::Config(format!(
                    "invalid VIN '{}': only ASCII letters and digits are allowed",
                    record.identifier
                )));
            }
            if !seen.insert(record.identifier.to_ascii_uppercase()) {
                return Err(VinError::Config(format!(
                    "duplicate VIN '{}'",
                    record.identifier
                )));
            }
        }

        Ok(Self::from_validated(records))
    }

    fn from_validated(records: Vec<VehicleRecord>) -> Self {
        let max_dwell_days = records.iter().map(|r| r.dwell_days).max().unwrap_or(0);
        Self {
            records,
            max_dwell_days,
        }
    }

    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VehicleRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn max_dwell_days(&self) -> u32 {
        self.max_dwell_days
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a VehicleRecord;
    type IntoIter = std::slice::Iter<'a, VehicleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// German-style price: thousands separated by '.', trailing euro sign.
pub fn format_price_eur(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    format!("{grouped} €")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_store() {
        let store = RecordStore::seeded();
        assert_eq!(store.len(), 3);
        assert_eq!(store.max_dwell_days(), 30);
        assert_eq!(store.records()[0].model, "VW Golf");
        assert_eq!(store.records()[1].identifier, "WBA5A7C53FG123456");
    }

    #[test]
    fn test_price_formatting() {
        assert_eq!(format_price_eur(0), "0 €");
        assert_eq!(format_price_eur(999), "999 €");
        assert_eq!(format_price_eur(18_000), "18.000 €");
        assert_eq!(format_price_eur(1_234_567), "1.234.567 €");
    }

    #[test]
    fn test_rejects_empty_record_set() {
        match RecordStore::new(vec![]) {
            Err(VinError::Config(msg)) => assert!(msg.contains("at least one")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_case_insensitive_duplicates() {
        let records = vec![
            VehicleRecord::new("ABC123", "A", 2020, 1, 1),
            VehicleRecord::new("abc123", "B", 2021, 2, 2),
        ];
        match RecordStore::new(records) {
            Err(VinError::Config(msg)) => assert!(msg.contains("duplicate VIN 'abc123'")),
            other => panic!("Expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_non_alphanumeric_identifier() {
        let records = vec![VehicleRecord::new("ABC-123", "A", 2020, 1, 1)];
        assert!(matches!(
            RecordStore::new(records),
            Err(VinError::Config(_))
        ));
    }

    #[test]
    fn test_max_dwell_of_custom_store() {
        let store = RecordStore::new(vec![
            VehicleRecord::new("A1", "A", 2020, 1, 0),
            VehicleRecord::new("B2", "B", 2020, 1, 0),
        ])
        .unwrap();
        assert_eq!(store.max_dwell_days(), 0);
    }
}
