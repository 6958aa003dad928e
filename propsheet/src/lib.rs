#![forbid(unsafe_code)]
//! Synchronize Java-style `.properties` translation files with one CSV sheet.
//!
//! A translatable file is a default-language `.properties` file plus any
//! number of `_<code>`-suffixed language variants. Export flattens all of
//! them into a single spreadsheet-like CSV (one row per key, one column per
//! language) that translators can edit in one place; import rebuilds the
//! per-language files from that sheet.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use propsheet::{CsvSheet, LanguageSet, export_all, import_all};
//! use std::path::{Path, PathBuf};
//!
//! let languages = LanguageSet::new(vec!["de".into(), "hu".into()])?;
//! let files: Vec<PathBuf> = vec![
//!     "work/messages.properties".into(),
//!     "work/messages_de.properties".into(),
//! ];
//!
//! // Flatten the files into translations.csv ...
//! let mut sheet = CsvSheet::create("translations.csv", languages.codes());
//! export_all(&files, Path::new("work"), &languages, &mut sheet)?;
//!
//! // ... and later rebuild the files from the edited sheet.
//! let mut sheet = CsvSheet::open("translations.csv")?;
//! import_all(&mut sheet, Path::new("work"))?;
//! # Ok::<(), propsheet::Error>(())
//! ```
//!
//! Row identity is stable across repeated exports: a (file, key) pair keeps
//! its row, so re-exporting an unchanged tree rewrites the sheet without
//! duplicating or reordering rows.

pub mod error;
pub mod export;
pub mod identity;
pub mod import;
pub mod line;
pub mod sheet;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    export::{RowIndex, export_all},
    identity::{FileRecord, LanguageSet, resolve, synthesize},
    import::import_all,
    line::{PropertyEntry, decode_escapes, parse_line},
    sheet::{CsvSheet, RowSink, RowSource, TabularRow},
};
