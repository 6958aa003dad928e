//! Import: rebuild the per-language property files from the sheet rows.
//!
//! Every row contributes its default value to the canonical file; a language
//! cell contributes to that language's variant only when it is non-blank
//! after trimming, so sparsely translated sheets simply leave keys out of
//! the variant files. Output files are written as key-sorted `key=value`
//! lines, values verbatim.

use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::Path,
};

use crate::{
    error::Error,
    identity,
    sheet::RowSource,
};

/// Key/value buffer for one output file, keyed by (canonical path, language).
type Buffers = BTreeMap<(String, String), BTreeMap<String, String>>;

/// Reads every row of `source` and writes the reconstructed property files
/// under `working_root`, creating parent directories as needed.
///
/// Buffers that end up empty (a language with no non-blank value anywhere in
/// a file) produce no file on disk. The first write failure aborts the whole
/// run; files already written stay in place, which callers should treat as a
/// coarse all-or-nothing-per-run contract.
///
/// Returns the number of data rows processed.
pub fn import_all<S: RowSource>(source: &mut S, working_root: &Path) -> Result<usize, Error> {
    let languages = source.languages().to_vec();
    let canonical_paths = source.canonical_paths();

    // One buffer per canonical file and per (canonical file, language) pair,
    // created up front so even untouched variants are accounted for.
    let mut buffers: Buffers = BTreeMap::new();
    for canonical_path in &canonical_paths {
        buffers.insert((canonical_path.clone(), String::new()), BTreeMap::new());
        for language in &languages {
            buffers.insert((canonical_path.clone(), language.clone()), BTreeMap::new());
        }
    }

    let row_count = source.row_count();
    for _ in 0..row_count {
        let row = source.next_row()?;

        buffers
            .entry((row.canonical_path.clone(), String::new()))
            .or_default()
            .insert(row.key.clone(), row.default_value.clone());

        for language in &languages {
            let Some(value) = row.language_values.get(language) else {
                continue;
            };
            let trimmed = value.trim();
            if trimmed.is_empty() {
                continue;
            }
            buffers
                .entry((row.canonical_path.clone(), language.clone()))
                .or_default()
                .insert(row.key.clone(), trimmed.to_string());
        }
    }

    for ((canonical_path, language), entries) in &buffers {
        if entries.is_empty() {
            continue;
        }
        let relative = identity::synthesize(canonical_path, language)?;
        write_properties_file(&working_root.join(relative), entries)?;
    }

    Ok(row_count)
}

fn write_properties_file(
    path: &Path,
    entries: &BTreeMap<String, String>,
) -> Result<(), Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = fs::File::create(path)?;
    for (key, value) in entries {
        writeln!(file, "{key}={value}")?;
    }
    Ok(())
}
