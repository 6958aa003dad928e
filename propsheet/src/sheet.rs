//! The tabular side of the synchronization: a spreadsheet-like sheet with
//! one row per (canonical file, key) pair, persisted as CSV.
//!
//! Column layout: `key`, `file` (canonical path), `default`, then one column
//! per configured language in declared order. The export engine talks to a
//! [`RowSink`], the import engine to a [`RowSource`]; [`CsvSheet`] implements
//! both so tests and callers can also use an in-memory sheet directly.

use std::{
    collections::{BTreeSet, HashMap},
    path::{Path, PathBuf},
};

use crate::error::Error;

const HEADER_KEY: &str = "key";
const HEADER_FILE: &str = "file";
const HEADER_DEFAULT: &str = "default";
const FIXED_COLUMNS: usize = 3;

/// One persisted sheet row, in the shape the import engine consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularRow {
    pub canonical_path: String,
    pub key: String,
    pub default_value: String,
    /// Per-language values; languages without a cell value are absent.
    pub language_values: HashMap<String, String>,
}

/// Export target: rows are appended once per (canonical file, key) pair and
/// later updated in place as other language variants of the file are read.
pub trait RowSink {
    /// Appends a new row and returns its assigned row number. An empty
    /// `language` places the value in the default column.
    fn append_row(
        &mut self,
        canonical_path: &str,
        key: &str,
        language: &str,
        value: &str,
    ) -> Result<usize, Error>;

    /// Overwrites one language cell of an existing row.
    fn update_cell(&mut self, row_number: usize, language: &str, value: &str)
    -> Result<(), Error>;

    /// Flushes the sheet to its persistent form. Must be called even when no
    /// rows were appended, so an empty export still produces a valid sheet.
    fn finalize(&mut self) -> Result<(), Error>;
}

/// Import origin: a forward-only, single-pass view of a sheet's rows.
pub trait RowSource {
    fn row_count(&self) -> usize;

    /// Configured language codes, in sheet column order.
    fn languages(&self) -> &[String];

    /// All canonical paths referenced by any row.
    fn canonical_paths(&self) -> BTreeSet<String>;

    /// Yields the next row; calling it more than [`row_count`](Self::row_count)
    /// times is a caller bug and fails.
    fn next_row(&mut self) -> Result<TabularRow, Error>;
}

#[derive(Debug, Clone)]
struct SheetRow {
    canonical_path: String,
    key: String,
    default_value: String,
    /// Aligned with the sheet's language list.
    values: Vec<String>,
}

/// A sheet held in memory and persisted as a CSV file.
#[derive(Debug)]
pub struct CsvSheet {
    path: PathBuf,
    languages: Vec<String>,
    rows: Vec<SheetRow>,
    cursor: usize,
}

impl CsvSheet {
    /// Creates an empty sheet that [`finalize`](RowSink::finalize) will write
    /// to `path`, replacing any previous content.
    pub fn create<P: AsRef<Path>>(path: P, languages: &[String]) -> Self {
        CsvSheet {
            path: path.as_ref().to_path_buf(),
            languages: languages.to_vec(),
            rows: Vec::new(),
            cursor: 0,
        }
    }

    /// Loads an existing sheet, deriving the language list from the header
    /// row. Hand-edited sheets with short rows are tolerated; missing
    /// trailing cells read as empty.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path.as_ref())?;

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?,
            None => {
                return Err(Error::format_error(format!(
                    "sheet {} has no header row",
                    path.as_ref().display()
                )));
            }
        };
        if header.get(0) != Some(HEADER_KEY)
            || header.get(1) != Some(HEADER_FILE)
            || header.get(2) != Some(HEADER_DEFAULT)
        {
            return Err(Error::format_error(format!(
                "sheet {} does not start with the {HEADER_KEY}/{HEADER_FILE}/{HEADER_DEFAULT} columns",
                path.as_ref().display()
            )));
        }
        let languages: Vec<String> = header
            .iter()
            .skip(FIXED_COLUMNS)
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            let cell = |index: usize| record.get(index).unwrap_or("").to_string();
            rows.push(SheetRow {
                key: cell(0),
                canonical_path: cell(1),
                default_value: cell(2),
                values: (0..languages.len())
                    .map(|language| cell(FIXED_COLUMNS + language))
                    .collect(),
            });
        }

        Ok(CsvSheet {
            path: path.as_ref().to_path_buf(),
            languages,
            rows,
            cursor: 0,
        })
    }

    fn language_index(&self, language: &str) -> Result<usize, Error> {
        self.languages
            .iter()
            .position(|code| code == language)
            .ok_or_else(|| {
                Error::validation_error(format!("language `{language}` is not a sheet column"))
            })
    }
}

impl RowSink for CsvSheet {
    fn append_row(
        &mut self,
        canonical_path: &str,
        key: &str,
        language: &str,
        value: &str,
    ) -> Result<usize, Error> {
        let mut row = SheetRow {
            canonical_path: canonical_path.to_string(),
            key: key.to_string(),
            default_value: String::new(),
            values: vec![String::new(); self.languages.len()],
        };
        if language.is_empty() {
            row.default_value = value.to_string();
        } else {
            let index = self.language_index(language)?;
            row.values[index] = value.to_string();
        }
        self.rows.push(row);
        Ok(self.rows.len() - 1)
    }

    fn update_cell(
        &mut self,
        row_number: usize,
        language: &str,
        value: &str,
    ) -> Result<(), Error> {
        let index = if language.is_empty() {
            None
        } else {
            Some(self.language_index(language)?)
        };
        let row = self.rows.get_mut(row_number).ok_or_else(|| {
            Error::validation_error(format!("row {row_number} does not exist in the sheet"))
        })?;
        match index {
            None => row.default_value = value.to_string(),
            Some(index) => row.values[index] = value.to_string(),
        }
        Ok(())
    }

    fn finalize(&mut self) -> Result<(), Error> {
        let mut writer = csv::Writer::from_path(&self.path)?;

        let mut header = vec![HEADER_KEY, HEADER_FILE, HEADER_DEFAULT];
        header.extend(self.languages.iter().map(String::as_str));
        writer.write_record(&header)?;

        for row in &self.rows {
            let mut record = vec![
                row.key.as_str(),
                row.canonical_path.as_str(),
                row.default_value.as_str(),
            ];
            record.extend(row.values.iter().map(String::as_str));
            writer.write_record(&record)?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl RowSource for CsvSheet {
    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn languages(&self) -> &[String] {
        &self.languages
    }

    fn canonical_paths(&self) -> BTreeSet<String> {
        self.rows
            .iter()
            .map(|row| row.canonical_path.clone())
            .collect()
    }

    fn next_row(&mut self) -> Result<TabularRow, Error> {
        let row = self.rows.get(self.cursor).ok_or_else(|| {
            Error::validation_error("next_row called past the end of the sheet")
        })?;
        self.cursor += 1;

        let language_values = self
            .languages
            .iter()
            .zip(&row.values)
            .filter(|(_, value)| !value.is_empty())
            .map(|(language, value)| (language.clone(), value.clone()))
            .collect();

        Ok(TabularRow {
            canonical_path: row.canonical_path.clone(),
            key: row.key.clone(),
            default_value: row.default_value.clone(),
            language_values,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn languages(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_append_places_default_and_language_values() {
        let mut sheet = CsvSheet::create("unused.csv", &languages(&["de", "hu"]));
        let first = sheet
            .append_row("messages.properties", "greeting", "", "Hello")
            .unwrap();
        let second = sheet
            .append_row("messages.properties", "farewell", "de", "Tschüss")
            .unwrap();
        assert_eq!((first, second), (0, 1));
        assert_eq!(sheet.rows[0].default_value, "Hello");
        assert_eq!(sheet.rows[1].default_value, "");
        assert_eq!(sheet.rows[1].values, vec!["Tschüss", ""]);
    }

    #[test]
    fn test_update_cell_rejects_unknown_language_and_row() {
        let mut sheet = CsvSheet::create("unused.csv", &languages(&["de"]));
        sheet
            .append_row("messages.properties", "greeting", "", "Hello")
            .unwrap();
        assert!(sheet.update_cell(0, "fr", "Bonjour").is_err());
        assert!(sheet.update_cell(7, "de", "Hallo").is_err());
        sheet.update_cell(0, "de", "Hallo").unwrap();
        assert_eq!(sheet.rows[0].values, vec!["Hallo"]);
    }

    #[test]
    fn test_finalize_then_open_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");

        let mut sheet = CsvSheet::create(&path, &languages(&["de", "hu"]));
        sheet
            .append_row("app/messages.properties", "greeting", "", "Hello")
            .unwrap();
        sheet.update_cell(0, "hu", "Szia").unwrap();
        sheet.finalize().unwrap();

        let mut reopened = CsvSheet::open(&path).unwrap();
        assert_eq!(reopened.row_count(), 1);
        assert_eq!(reopened.languages(), &languages(&["de", "hu"]));
        let row = reopened.next_row().unwrap();
        assert_eq!(row.canonical_path, "app/messages.properties");
        assert_eq!(row.key, "greeting");
        assert_eq!(row.default_value, "Hello");
        assert_eq!(row.language_values.get("hu").map(String::as_str), Some("Szia"));
        assert!(!row.language_values.contains_key("de"));
        assert!(reopened.next_row().is_err());
    }

    #[test]
    fn test_finalize_without_rows_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        CsvSheet::create(&path, &languages(&["de"])).finalize().unwrap();

        let reopened = CsvSheet::open(&path).unwrap();
        assert_eq!(reopened.row_count(), 0);
        assert_eq!(reopened.languages(), &languages(&["de"]));
    }

    #[test]
    fn test_open_rejects_foreign_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("foreign.csv");
        std::fs::write(&path, "id,name\n1,x\n").unwrap();

        let err = CsvSheet::open(&path).unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }

    #[test]
    fn test_values_with_commas_and_newlines_survive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quoting.csv");

        let mut sheet = CsvSheet::create(&path, &languages(&[]));
        sheet
            .append_row("m.properties", "list", "", "a, b, c\nd")
            .unwrap();
        sheet.finalize().unwrap();

        let mut reopened = CsvSheet::open(&path).unwrap();
        assert_eq!(reopened.next_row().unwrap().default_value, "a, b, c\nd");
    }
}
