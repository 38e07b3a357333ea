use crate::error::IngestionError;
use chrono::NaiveDate;
use core_types::SaleRecord;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One raw CSV row, before validation and revenue derivation.
#[derive(Debug, Deserialize)]
struct RawSaleRow {
    date: NaiveDate,
    product: String,
    quantity: u32,
    unit_price: Decimal,
    #[serde(default)]
    segment: Option<String>,
}

/// Loads sales records from any CSV source.
///
/// Expected header: `date,product,quantity,unit_price,segment`. The date
/// column is ISO `YYYY-MM-DD`; the segment column may be empty, and empty
/// cells map to `None`. Revenue is derived during record construction,
/// never read from the file.
pub fn load_sales<R: Read>(reader: R) -> Result<Vec<SaleRecord>, IngestionError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, row) in csv_reader.deserialize().enumerate() {
        // 1-based data line, not counting the header.
        let line = index + 1;
        let raw: RawSaleRow =
            row.map_err(|e| IngestionError::InvalidRecord(line, e.to_string()))?;
        let segment = raw.segment.filter(|segment| !segment.is_empty());
        let record = SaleRecord::new(raw.date, raw.product, raw.quantity, raw.unit_price, segment)
            .map_err(|e| IngestionError::InvalidRecord(line, e.to_string()))?;
        records.push(record);
    }

    tracing::info!(count = records.len(), "sales records loaded");
    Ok(records)
}

/// Loads sales records from a CSV file on disk.
pub fn load_sales_file<P: AsRef<Path>>(path: P) -> Result<Vec<SaleRecord>, IngestionError> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| IngestionError::FileOpen(path.display().to_string(), e))?;
    load_sales(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE_CSV: &str = "\
date,product,quantity,unit_price,segment
2024-01-05,T-Shirt,2,19.99,female
2024-01-20,Sneakers,1,89.50,male
2024-02-01,T-Shirt,5,19.99,
";

    #[test]
    fn loads_well_formed_rows() {
        let records = load_sales(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].product, "T-Shirt");
        assert_eq!(records[0].date, "2024-01-05".parse().unwrap());
        assert_eq!(records[0].quantity, 2);
        assert_eq!(records[0].unit_price, dec!(19.99));
        assert_eq!(records[0].segment.as_deref(), Some("female"));
    }

    #[test]
    fn derives_revenue_at_load_time() {
        let records = load_sales(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records[0].revenue(), dec!(39.98));
        assert_eq!(records[2].revenue(), dec!(99.95));
    }

    #[test]
    fn empty_segment_cell_maps_to_none() {
        let records = load_sales(SAMPLE_CSV.as_bytes()).unwrap();
        assert_eq!(records[2].segment, None);
    }

    #[test]
    fn malformed_quantity_reports_its_line() {
        let csv_data = "\
date,product,quantity,unit_price,segment
2024-01-05,T-Shirt,2,19.99,female
2024-01-06,T-Shirt,two,19.99,female
";
        let result = load_sales(csv_data.as_bytes());
        assert!(matches!(result, Err(IngestionError::InvalidRecord(2, _))));
    }

    #[test]
    fn negative_unit_price_reports_its_line() {
        let csv_data = "\
date,product,quantity,unit_price,segment
2024-01-05,T-Shirt,2,-19.99,female
";
        let result = load_sales(csv_data.as_bytes());
        assert!(matches!(result, Err(IngestionError::InvalidRecord(1, _))));
    }

    #[test]
    fn missing_file_surfaces_the_path() {
        let result = load_sales_file("does-not-exist.csv");
        assert!(
            matches!(result, Err(IngestionError::FileOpen(path, _)) if path == "does-not-exist.csv")
        );
    }
}
