// src/data_types.rs
use crate::error::{Result, ValidationError};

/// What the upload widget hands over when the user picks a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPayload {
    pub filename: String,
    /// Transfer-encoded body, e.g. `data:text/csv;base64,RGF5LENvc3Q=`
    pub contents: String,
}

impl UploadPayload {
    pub fn new(filename: impl Into<String>, contents: impl Into<String>) -> Self {
        UploadPayload {
            filename: filename.into(),
            contents: contents.into(),
        }
    }
}

/// Decoded file content together with the content-type prefix it arrived with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub content_type: String,
    pub text: String,
}

impl DecodedText {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

/// Tabular data read from an upload. Every row has exactly `headers.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn empty() -> Self {
        Table {
            headers: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of the first header exactly equal to `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// The subset of `required` that has no header, in the order given.
    pub fn missing_columns(&self, required: &[&str]) -> Vec<String> {
        required
            .iter()
            .filter(|name| self.column_index(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }

    /// Raw cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&str>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| ValidationError::MissingColumns(vec![name.to_string()]))?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                cells.get(index).map(String::as_str).ok_or_else(|| {
                    ValidationError::ParseFailure(format!(
                        "row {} has no value for column '{}'",
                        row + 1,
                        name
                    ))
                })
            })
            .collect()
    }

    /// Cells of one column coerced to numbers.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        self.column(name)?
            .into_iter()
            .enumerate()
            .map(|(row, cell)| {
                cell.trim().parse::<f64>().map_err(|e| {
                    ValidationError::ParseFailure(format!(
                        "column '{}', row {}: cannot read '{}' as a number ({})",
                        name,
                        row + 1,
                        cell,
                        e
                    ))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            headers: vec!["Day".into(), "Cost".into(), "Note".into()],
            rows: vec![
                vec!["1".into(), " 10.5 ".into(), "ok".into()],
                vec!["2".into(), "oops".into(), "bad".into()],
            ],
        }
    }

    #[test]
    fn column_returns_cells_in_order() {
        assert_eq!(table().column("Day").unwrap(), vec!["1", "2"]);
    }

    #[test]
    fn unknown_column_is_reported_as_missing() {
        let err = table().column("Clicks").unwrap_err();
        assert_eq!(err, ValidationError::MissingColumns(vec!["Clicks".into()]));
    }

    #[test]
    fn missing_columns_keeps_requested_order() {
        let missing = table().missing_columns(&["Day", "Impr.", "Cost", "Clicks"]);
        assert_eq!(missing, vec!["Impr.".to_string(), "Clicks".to_string()]);
    }

    #[test]
    fn numeric_column_names_the_bad_cell() {
        let mut t = table();
        assert!(t.numeric_column("Cost").is_err());

        t.rows.pop();
        assert_eq!(t.numeric_column("Cost").unwrap(), vec![10.5]);

        match table().numeric_column("Cost") {
            Err(ValidationError::ParseFailure(message)) => {
                assert!(message.contains("row 2"));
                assert!(message.contains("oops"));
            }
            other => panic!("expected parse failure, got {:?}", other),
        }
    }
}
