//! Line-level parsing of `.properties` files.
//!
//! One raw text line is either skipped (empty or `#` comment), parsed into a
//! key/value pair, or rejected with [`Error::Format`] when no separator can
//! be found anywhere in it.

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;

lazy_static! {
    static ref STRICT_LINE_REGEX: Regex =
        Regex::new(r"^([A-Za-z0-9._-]+) ?= ?(.*)$").unwrap();
}

/// Separator candidates for the fallback heuristic, in declared priority order.
const SEPARATORS: [char; 5] = ['=', ' ', ':', '\t', '\u{0C}'];

/// A single key/value pair parsed from one property line.
///
/// The value is the remainder of the line after the separator, with escape
/// sequences already decoded; nothing else is normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
}

/// Decodes standard backslash escape sequences (`\n`, `\t`, `\r`, `\f`,
/// `\b`, `\\`, `\'`, `\"`, `\uXXXX`).
///
/// Malformed sequences (unknown escape, truncated `\u`, trailing backslash)
/// are passed through verbatim rather than rejected, since property files in
/// the wild routinely contain literal backslashes.
pub fn decode_escapes(line: &str) -> String {
    let mut result = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.peek().copied() {
            Some('n') => {
                chars.next();
                result.push('\n');
            }
            Some('t') => {
                chars.next();
                result.push('\t');
            }
            Some('r') => {
                chars.next();
                result.push('\r');
            }
            Some('f') => {
                chars.next();
                result.push('\u{0C}');
            }
            Some('b') => {
                chars.next();
                result.push('\u{08}');
            }
            Some('\\') => {
                chars.next();
                result.push('\\');
            }
            Some('\'') => {
                chars.next();
                result.push('\'');
            }
            Some('"') => {
                chars.next();
                result.push('"');
            }
            Some('u') => {
                // \uXXXX: exactly four hex digits, otherwise left as-is.
                let rest: String = chars.clone().skip(1).take(4).collect();
                if rest.len() == 4
                    && let Ok(code) = u32::from_str_radix(&rest, 16)
                    && let Some(decoded) = char::from_u32(code)
                {
                    for _ in 0..5 {
                        chars.next();
                    }
                    result.push(decoded);
                } else {
                    result.push('\\');
                }
            }
            _ => result.push('\\'),
        }
    }

    result
}

/// Classifies one raw property line.
///
/// Returns `Ok(None)` for lines that carry no data (empty or starting with
/// `#`). Otherwise tries the strict anchored `key = value` pattern first,
/// then falls back to splitting at the earliest occurrence of any candidate
/// separator. A line containing none of the separators is malformed.
pub fn parse_line(line: &str) -> Result<Option<PropertyEntry>, Error> {
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    if let Some(captures) = STRICT_LINE_REGEX.captures(line) {
        return Ok(Some(PropertyEntry {
            key: captures[1].to_string(),
            value: captures[2].to_string(),
        }));
    }

    let separator_index = separator_index(line)?;
    let key = line[..separator_index].to_string();
    let value = line[separator_index + 1..].to_string();
    Ok(Some(PropertyEntry { key, value }))
}

/// Finds the byte index of the true separator: the earliest occurrence of
/// any candidate wins, ties broken by the declared priority order (only
/// possible when no candidate occurs at all earlier).
fn separator_index(line: &str) -> Result<usize, Error> {
    SEPARATORS
        .iter()
        .filter_map(|&separator| line.find(separator))
        .min()
        .ok_or_else(|| {
            Error::format_error(format!("no separator found in line: [{line}]"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_and_empty_lines_are_skipped() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("# a comment").unwrap(), None);
        assert_eq!(parse_line("#key=value").unwrap(), None);
    }

    #[test]
    fn test_strict_pattern_with_spaces_around_equals() {
        let entry = parse_line("a.b.c = value with spaces").unwrap().unwrap();
        assert_eq!(entry.key, "a.b.c");
        assert_eq!(entry.value, "value with spaces");
    }

    #[test]
    fn test_strict_pattern_without_spaces() {
        let entry = parse_line("greeting=Hello").unwrap().unwrap();
        assert_eq!(entry.key, "greeting");
        assert_eq!(entry.value, "Hello");
    }

    #[test]
    fn test_strict_pattern_allows_dashes_and_underscores_in_key() {
        let entry = parse_line("menu_item-1.label=Open").unwrap().unwrap();
        assert_eq!(entry.key, "menu_item-1.label");
        assert_eq!(entry.value, "Open");
    }

    #[test]
    fn test_heuristic_colon_separator() {
        let entry = parse_line("a.b.c:value").unwrap().unwrap();
        assert_eq!(entry.key, "a.b.c");
        assert_eq!(entry.value, "value");
    }

    #[test]
    fn test_heuristic_picks_earliest_separator() {
        // ':' occurs before '=', so it wins even though '=' has higher priority.
        let entry = parse_line("url:http=value").unwrap().unwrap();
        assert_eq!(entry.key, "url");
        assert_eq!(entry.value, "http=value");
    }

    #[test]
    fn test_heuristic_tab_separator() {
        let entry = parse_line("key\tvalue").unwrap().unwrap();
        assert_eq!(entry.key, "key");
        assert_eq!(entry.value, "value");
    }

    #[test]
    fn test_no_separator_is_a_format_error() {
        let err = parse_line("justakeywithnothing").unwrap_err();
        assert!(matches!(err, Error::Format(_)));
        assert!(err.to_string().contains("justakeywithnothing"));
    }

    #[test]
    fn test_value_keeps_trailing_whitespace_verbatim() {
        let entry = parse_line("key=value  ").unwrap().unwrap();
        assert_eq!(entry.value, "value  ");
    }

    #[test]
    fn test_decode_escapes_basic() {
        assert_eq!(decode_escapes(r"a\tb\nc"), "a\tb\nc");
        assert_eq!(decode_escapes(r"back\\slash"), "back\\slash");
        assert_eq!(decode_escapes(r"quote\'s"), "quote's");
    }

    #[test]
    fn test_decode_escapes_unicode() {
        assert_eq!(decode_escapes("caf\\u00e9"), "café");
        // Truncated \u sequence passes through verbatim.
        assert_eq!(decode_escapes(r"bad\u00"), "bad\\u00");
    }

    #[test]
    fn test_decode_escapes_trailing_backslash() {
        assert_eq!(decode_escapes("end\\"), "end\\");
    }

    #[test]
    fn test_escaped_line_parses_after_decoding() {
        let decoded = decode_escapes(r"title=Café menu");
        let entry = parse_line(&decoded).unwrap().unwrap();
        assert_eq!(entry.key, "title");
        assert_eq!(entry.value, "Café menu");
    }
}
