//! Candidate-file discovery: validate the working root, then walk it
//! recursively and keep the files whose *name* matches the filter regex.

use std::path::{Path, PathBuf};

use propsheet::Error;
use regex::Regex;
use walkdir::WalkDir;

/// Checks that `working_dir` names an existing directory.
pub fn validate_working_dir(working_dir: &Path) -> Result<(), Error> {
    if working_dir.as_os_str().is_empty() {
        return Err(Error::validation_error("the working directory is empty"));
    }
    if !working_dir.is_dir() {
        return Err(Error::validation_error(format!(
            "the working directory `{}` is not a directory",
            working_dir.display()
        )));
    }
    Ok(())
}

/// Compiles the filename filter, mapping a bad pattern to a validation error.
pub fn compile_filter(pattern: &str) -> Result<Regex, Error> {
    if pattern.trim().is_empty() {
        return Err(Error::validation_error("the file filter is empty"));
    }
    Regex::new(pattern)
        .map_err(|e| Error::validation_error(format!("invalid file filter `{pattern}`: {e}")))
}

/// Walks `working_dir` recursively and returns every file whose name matches
/// `filter`, sorted lexicographically by file name so the default-language
/// file of each group comes first.
pub fn scan_files(working_dir: &Path, filter: &Regex) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in WalkDir::new(working_dir) {
        let entry = entry.map_err(|e| match e.into_io_error() {
            Some(io) => Error::Io(io),
            None => Error::validation_error("walked into a filesystem loop"),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str()
            && filter.is_match(name)
        {
            files.push(entry.into_path());
        }
    }
    files.sort_by_key(|path| path.file_name().map(|name| name.to_os_string()));
    Ok(files)
}
