//! Export: walk the matched property files and mirror them into the sheet.
//!
//! Row identity is kept by a per-run [`RowIndex`]: the first time a
//! (canonical file, key) pair is seen it gets a fresh row, every later
//! sighting (another language variant, or a duplicate key in the same file)
//! updates that row in place. The index lives and dies with one
//! [`export_all`] call; the sheet itself is the persistent record.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use crate::{
    error::Error,
    identity::{self, LanguageSet},
    line,
    sheet::RowSink,
};

/// Mapping from (canonical path, key) to the sheet row assigned to it.
#[derive(Debug, Default)]
pub struct RowIndex {
    rows: HashMap<(String, String), usize>,
}

impl RowIndex {
    pub fn new() -> Self {
        RowIndex::default()
    }

    pub fn find(&self, canonical_path: &str, key: &str) -> Option<usize> {
        self.rows
            .get(&(canonical_path.to_string(), key.to_string()))
            .copied()
    }

    pub fn record(&mut self, canonical_path: &str, key: &str, row_number: usize) {
        self.rows
            .insert((canonical_path.to_string(), key.to_string()), row_number);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Exports every file in `files` into `sink`, one run, one row index.
///
/// Files are processed in lexicographic file-name order so that the
/// default-language file (which sorts before its `_<code>` variants) is read
/// first and establishes the row order. The sink is finalized even when
/// `files` is empty. Any I/O or parse failure aborts the run; rows already
/// appended for earlier files remain in the sink.
pub fn export_all<S: RowSink>(
    files: &[PathBuf],
    working_root: &Path,
    languages: &LanguageSet,
    sink: &mut S,
) -> Result<(), Error> {
    let mut ordered: Vec<&PathBuf> = files.iter().collect();
    ordered.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));

    let mut index = RowIndex::new();
    for path in ordered {
        export_file(path, working_root, languages, sink, &mut index)?;
    }

    sink.finalize()
}

fn export_file<S: RowSink>(
    path: &Path,
    working_root: &Path,
    languages: &LanguageSet,
    sink: &mut S,
    index: &mut RowIndex,
) -> Result<(), Error> {
    let record = identity::resolve(path, languages, working_root)?;

    let reader = BufReader::new(File::open(path)?);
    for raw_line in reader.lines() {
        let decoded = line::decode_escapes(&raw_line?);
        let Some(entry) = line::parse_line(&decoded)? else {
            continue;
        };

        match index.find(&record.canonical_path, &entry.key) {
            Some(row_number) => {
                sink.update_cell(row_number, &record.language, &entry.value)?;
            }
            None => {
                let row_number = sink.append_row(
                    &record.canonical_path,
                    &entry.key,
                    &record.language,
                    &entry.value,
                )?;
                index.record(&record.canonical_path, &entry.key, row_number);
            }
        }
    }

    Ok(())
}
