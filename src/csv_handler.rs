// src/csv_handler.rs
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::data_types::Table;
use crate::error::Result;

const BYTE_ORDER_MARK: char = '\u{feff}';

pub struct CSVHandler {}

impl CSVHandler {
    pub fn new() -> Self {
        CSVHandler {}
    }

    /// Reads decoded upload text into a [`Table`]. The first record is the header row.
    pub fn parse(&self, text: &str) -> Result<Table> {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);

        // First check if the text uses comma or semicolon as delimiter
        let delimiter = Self::detect_delimiter(text);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter as u8)
            .has_headers(true)
            .from_reader(text.as_bytes());

        let mut data = Table::empty();
        data.headers = reader.headers()?.iter().map(String::from).collect();

        let mut skipped = 0usize;
        for result in reader.records() {
            let record = result?;

            if Self::is_blank(&record) {
                skipped += 1;
                continue;
            }

            data.rows.push(record.iter().map(String::from).collect());
        }

        debug!(
            delimiter = %delimiter,
            columns = data.headers.len(),
            rows = data.rows.len(),
            skipped,
            "parsed csv"
        );

        Ok(data)
    }

    /// `;` only when the header line has more unquoted semicolons than unquoted commas.
    fn detect_delimiter(text: &str) -> char {
        let first_line = text.lines().next().unwrap_or_default();

        let mut in_quotes = false;
        let (mut commas, mut semicolons) = (0usize, 0usize);
        for c in first_line.chars() {
            match c {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => commas += 1,
                ';' if !in_quotes => semicolons += 1,
                _ => {}
            }
        }

        if semicolons > commas {
            return ';';
        }

        ',' // Default to comma
    }

    fn is_blank(record: &StringRecord) -> bool {
        record.iter().all(|field| field.trim().is_empty())
    }
}

impl Default for CSVHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn reads_headers_and_rows() {
        let table = CSVHandler::new()
            .parse("Day,Cost,Clicks,Impr.\n1,10.5,100,1000\n2,12.0,110,1200")
            .unwrap();
        assert_eq!(table.headers, vec!["Day", "Cost", "Clicks", "Impr."]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["2", "12.0", "110", "1200"]);
    }

    #[test]
    fn semicolon_files_are_detected() {
        let table = CSVHandler::new().parse("Day;Cost\n1;2.5\n").unwrap();
        assert_eq!(table.headers, vec!["Day", "Cost"]);
        assert_eq!(table.rows, vec![vec!["1".to_string(), "2.5".to_string()]]);
    }

    #[test]
    fn quoted_semicolon_in_header_keeps_comma_delimiter() {
        let table = CSVHandler::new()
            .parse("Day,Cost,Clicks,Impr.,\"Notes; misc\"\n1,10.5,100,1000,a\n")
            .unwrap();
        assert_eq!(table.headers.len(), 5);
        assert_eq!(table.headers[4], "Notes; misc");
        assert_eq!(table.rows[0][4], "a");
    }

    #[test]
    fn semicolon_header_with_comma_in_quoted_name() {
        let table = CSVHandler::new()
            .parse("Day;Cost;\"Clicks, all\"\n1;2;3\n")
            .unwrap();
        assert_eq!(table.headers, vec!["Day", "Cost", "Clicks, all"]);
    }

    #[test]
    fn quoted_fields_keep_embedded_commas() {
        let table = CSVHandler::new()
            .parse("Day,Campaign\n\"Mon, 1 Jan\",\"Brand, exact\"\n")
            .unwrap();
        assert_eq!(table.rows[0], vec!["Mon, 1 Jan", "Brand, exact"]);
    }

    #[test]
    fn blank_rows_are_skipped() {
        let table = CSVHandler::new().parse("Day,Cost\n1,2\n,\n\n3,4\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn byte_order_mark_is_stripped() {
        let table = CSVHandler::new().parse("\u{feff}Day,Cost\n1,2\n").unwrap();
        assert_eq!(table.column_index("Day"), Some(0));
    }

    #[test]
    fn ragged_rows_are_a_parse_failure() {
        let err = CSVHandler::new().parse("Day,Cost\n1,2,3\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
    }

    #[test]
    fn empty_text_gives_an_empty_table() {
        let table = CSVHandler::new().parse("").unwrap();
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }
}
