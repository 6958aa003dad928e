//! File identity: mapping language-suffixed property files to their
//! canonical default-language path and back.
//!
//! `messages_hu.properties` and `messages.properties` are the same
//! translatable file; the canonical path (`messages.properties`, relative to
//! the working root) is the stable identity used for sheet rows.

use std::path::Path;

use crate::error::Error;

const INFIX_SEPARATOR: char = '_';

/// Ordered set of recognized language codes. The default language has no
/// code and is represented by the empty string everywhere else.
///
/// Codes must be distinct, non-empty, and free of `_` (the infix separator).
/// Note that a code appearing as a substring of an ordinary filename token
/// (e.g. code `v2` with file `report_v2.properties`) is indistinguishable
/// from a language infix; choose codes accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    codes: Vec<String>,
}

impl LanguageSet {
    pub fn new(codes: Vec<String>) -> Result<Self, Error> {
        for (index, code) in codes.iter().enumerate() {
            if code.is_empty() {
                return Err(Error::validation_error("language codes cannot be empty"));
            }
            if code.contains(INFIX_SEPARATOR) {
                return Err(Error::validation_error(format!(
                    "language code `{code}` contains the `_` infix separator"
                )));
            }
            if codes[..index].contains(code) {
                return Err(Error::validation_error(format!(
                    "duplicate language code `{code}`"
                )));
            }
        }
        Ok(LanguageSet { codes })
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

/// The identity of one scanned file: which translatable file it belongs to
/// and which language variant it is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Relative path of the default-language file, `/`-separated.
    pub canonical_path: String,
    /// Matched language code, or `""` for the default-language file itself.
    pub language: String,
}

/// Determines the language and canonical path of `path` relative to
/// `working_root`.
///
/// The language is the first configured code whose `_<code>` infix occurs in
/// the file name. The canonical name is computed by stripping *every*
/// recognized `_<code>` infix, re-probing until none remains, so codes that
/// are substrings of other codes (or appear more than once) cannot leave a
/// residue in the canonical name.
pub fn resolve(
    path: &Path,
    languages: &LanguageSet,
    working_root: &Path,
) -> Result<FileRecord, Error> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::validation_error(format!("not a valid file path: {}", path.display()))
        })?;

    let language = languages
        .iter()
        .find(|code| file_name.contains(&infix(code)))
        .unwrap_or("")
        .to_string();

    let mut canonical_name = file_name.to_string();
    loop {
        let stripped = languages.iter().find_map(|code| {
            let search = infix(code);
            canonical_name
                .rfind(&search)
                .map(|at| strip_at(&canonical_name, at, search.len()))
        });
        match stripped {
            Some(name) => canonical_name = name,
            None => break,
        }
    }

    let relative = relativize(path, working_root)?;
    let canonical_path = match relative.rfind('/') {
        Some(at) => format!("{}/{}", &relative[..at], canonical_name),
        None => canonical_name,
    };

    Ok(FileRecord {
        canonical_path,
        language,
    })
}

/// Inverse of [`resolve`]: produces the relative path of the `language`
/// variant of a canonical file by inserting `_<language>` before the file
/// extension. The empty language returns the canonical path unchanged.
pub fn synthesize(canonical_path: &str, language: &str) -> Result<String, Error> {
    if language.is_empty() {
        return Ok(canonical_path.to_string());
    }

    let name_start = canonical_path.rfind('/').map_or(0, |at| at + 1);
    let file_name = &canonical_path[name_start..];
    let dot = file_name.rfind('.').ok_or_else(|| {
        Error::format_error(format!(
            "cannot insert language infix: `{canonical_path}` has no file extension"
        ))
    })?;

    let at = name_start + dot;
    Ok(format!(
        "{}{}{}{}",
        &canonical_path[..at],
        INFIX_SEPARATOR,
        language,
        &canonical_path[at..]
    ))
}

fn infix(code: &str) -> String {
    format!("{INFIX_SEPARATOR}{code}")
}

fn strip_at(name: &str, at: usize, len: usize) -> String {
    format!("{}{}", &name[..at], &name[at + len..])
}

/// Expresses `path` relative to `working_root` with `/` separators,
/// regardless of the platform separator the inputs used.
fn relativize(path: &Path, working_root: &Path) -> Result<String, Error> {
    let normalized_path = normalize_separators(path);
    let normalized_root = normalize_separators(working_root);

    let relative = match normalized_path.strip_prefix(&normalized_root) {
        Some(rest) => rest.trim_start_matches('/'),
        None => normalized_path.as_str(),
    };
    if relative.is_empty() {
        return Err(Error::validation_error(format!(
            "path {} does not name a file under {}",
            path.display(),
            working_root.display()
        )));
    }
    Ok(relative.to_string())
}

fn normalize_separators(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
