use crate::bar::{bar_width_fraction, days_label, render_bar};
use crate::catalog::{RecordStore, VehicleRecord};
use crate::cli::OutputFormat;
use colored::*;
use serde_json::{Value, json};

/// Renders records for the one-shot commands.
pub struct OutputFormatter {
    format: OutputFormat,
    bar_width: usize,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            bar_width: 30,
        }
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    /// Details of a matched record plus its dwell-time bar.
    pub fn format_record(&self, record: &VehicleRecord, max_dwell_days: u32) -> String {
        match self.format {
            OutputFormat::Text => self.format_record_text(record, max_dwell_days),
            OutputFormat::Json => record_json(record, max_dwell_days).to_string(),
        }
    }

    /// The sample VIN list.
    pub fn format_catalog(&self, store: &RecordStore) -> String {
        match self.format {
            OutputFormat::Text => {
                let mut out = format!("{}\n", "Beispiel-VINs zum Testen:".bold());
                for record in store {
                    out.push_str(&format!(
                        "  {}  {}\n",
                        record.identifier.cyan(),
                        record.model
                    ));
                }
                out
            }
            OutputFormat::Json => {
                let vehicles: Vec<Value> = store
                    .iter()
                    .map(|r| record_json(r, store.max_dwell_days()))
                    .collect();
                json!({
                    "total": store.len(),
                    "max_dwell_days": store.max_dwell_days(),
                    "vehicles": vehicles,
                })
                .to_string()
            }
        }
    }

    fn format_record_text(&self, record: &VehicleRecord, max_dwell_days: u32) -> String {
        let mut out = String::new();
        out.push_str(&format!("{}\n", "Fahrzeugdetails".green().bold()));
        out.push_str(&format!("  {}  {}\n", "Modell: ".bold(), record.model));
        out.push_str(&format!("  {}  {}\n", "Baujahr:".bold(), record.year));
        out.push_str(&format!(
            "  {}  {}\n",
            "Preis:  ".bold(),
            record.formatted_price()
        ));
        out.push('\n');
        out.push_str(&format!("{}\n", "Standzeit (Tage)".green().bold()));
        out.push_str(&format!("  {}\n", record.model));
        out.push_str(&format!(
            "  {} {}\n",
            render_bar(record.dwell_days, max_dwell_days, self.bar_width).cyan(),
            days_label(record.dwell_days)
        ));
        out
    }
}

fn record_json(record: &VehicleRecord, max_dwell_days: u32) -> Value {
    json!({
        "identifier": record.identifier,
        "model": record.model,
        "year": record.year,
        "price": record.price,
        "price_formatted": record.formatted_price(),
        "dwell_days": record.dwell_days,
        "bar_fraction": bar_width_fraction(record.dwell_days, max_dwell_days),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_record() {
        let store = RecordStore::seeded();
        let record = &store.records()[1];
        let out = OutputFormatter::new(OutputFormat::Text)
            .with_bar_width(10)
            .format_record(record, store.max_dwell_days());

        assert!(out.contains("BMW 3er"));
        assert!(out.contains("2021"));
        assert!(out.contains("35.000 €"));
        assert!(out.contains("█████░░░░░"));
        assert!(out.contains("15 Tage"));
    }

    #[test]
    fn test_json_record() {
        let store = RecordStore::seeded();
        let out = OutputFormatter::new(OutputFormat::Json)
            .format_record(&store.records()[0], store.max_dwell_days());
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["model"], "VW Golf");
        assert_eq!(value["year"], 2019);
        assert_eq!(value["price"], 18000);
        assert_eq!(value["price_formatted"], "18.000 €");
        assert_eq!(value["bar_fraction"], 1.0);
    }

    #[test]
    fn test_json_catalog() {
        let store = RecordStore::seeded();
        let out = OutputFormatter::new(OutputFormat::Json).format_catalog(&store);
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["total"], 3);
        assert_eq!(value["max_dwell_days"], 30);
        assert_eq!(value["vehicles"][2]["identifier"], "WAUZZZ8K4BA123789");
    }

    #[test]
    fn test_text_catalog_lists_every_vin() {
        let store = RecordStore::seeded();
        let out = OutputFormatter::new(OutputFormat::Text).format_catalog(&store);
        for record in &store {
            assert!(out.contains(&record.identifier));
            assert!(out.contains(&record.model));
        }
    }
}
