//! Minimal INI reader for `setup.cfg`.
//!
//! Follows the defaults of Python's `configparser`, which is what produces
//! and consumes `setup.cfg` in practice:
//!
//! - `key = value` and `key: value`, split at the first delimiter
//! - keys are case-insensitive (stored lower-cased), section names are not
//! - full-line `#` / `;` comments, skipped even inside multi-line values
//! - lines indented deeper than the key line continue the previous value
//! - duplicate sections or keys are rejected
//! - `[DEFAULT]` keys are visible from every section

use std::collections::BTreeMap;

use thiserror::Error;

pub const DEFAULT_SECTION: &str = "DEFAULT";

const COMMENT_PREFIXES: [char; 2] = ['#', ';'];
const DELIMITERS: [char; 2] = ['=', ':'];

/// Syntax error with the 1-based line it was found on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IniError {
    #[error("line {line}: key found before any [section] header")]
    MissingSectionHeader { line: usize },
    #[error("line {line}: expected `key = value`, found {text:?}")]
    MissingDelimiter { line: usize, text: String },
    #[error("line {line}: empty key")]
    EmptyKey { line: usize },
    #[error("line {line}: section [{section}] already defined")]
    DuplicateSection { line: usize, section: String },
    #[error("line {line}: key `{key}` already defined in [{section}]")]
    DuplicateKey {
        line: usize,
        section: String,
        key: String,
    },
}

/// Parsed INI document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    sections: BTreeMap<String, BTreeMap<String, String>>,
}

/// Key currently accepting continuation lines.
struct OpenValue {
    section: String,
    key: String,
    indent: usize,
    lines: Vec<String>,
}

impl IniDocument {
    pub fn parse(input: &str) -> Result<Self, IniError> {
        let mut doc = IniDocument::default();
        let mut current_section: Option<String> = None;
        let mut open: Option<OpenValue> = None;

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = raw.trim();

            if trimmed.starts_with(COMMENT_PREFIXES) {
                continue;
            }
            if trimmed.is_empty() {
                if let Some(value) = open.as_mut() {
                    value.lines.push(String::new());
                }
                continue;
            }

            let indent = raw.len() - raw.trim_start().len();
            if let Some(value) = open.as_mut()
                && indent > value.indent
            {
                value.lines.push(trimmed.to_string());
                continue;
            }

            if let Some(value) = open.take() {
                doc.close_value(value);
            }

            if let Some(name) = section_header(trimmed) {
                if doc.sections.contains_key(name) {
                    return Err(IniError::DuplicateSection {
                        line: line_no,
                        section: name.to_string(),
                    });
                }
                doc.sections.insert(name.to_string(), BTreeMap::new());
                current_section = Some(name.to_string());
                continue;
            }

            let section = current_section
                .clone()
                .ok_or(IniError::MissingSectionHeader { line: line_no })?;
            let (key, value) = split_key_value(trimmed).ok_or_else(|| IniError::MissingDelimiter {
                line: line_no,
                text: trimmed.to_string(),
            })?;
            if key.is_empty() {
                return Err(IniError::EmptyKey { line: line_no });
            }
            if doc
                .sections
                .get(&section)
                .is_some_and(|entries| entries.contains_key(&key))
            {
                return Err(IniError::DuplicateKey {
                    line: line_no,
                    section,
                    key,
                });
            }
            open = Some(OpenValue {
                section,
                key,
                indent,
                lines: vec![value],
            });
        }

        if let Some(value) = open.take() {
            doc.close_value(value);
        }
        Ok(doc)
    }

    fn close_value(&mut self, value: OpenValue) {
        let mut lines = value.lines;
        // configparser drops blank lines trailing a value.
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        self.sections
            .entry(value.section)
            .or_default()
            .insert(value.key, lines.join("\n"));
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    /// Look up `key` in `section`, falling back to `[DEFAULT]`.
    ///
    /// Returns `None` when the section itself is missing, even if `[DEFAULT]`
    /// defines the key.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        let entries = self.sections.get(section)?;
        entries
            .get(&key)
            .or_else(|| {
                self.sections
                    .get(DEFAULT_SECTION)
                    .and_then(|defaults| defaults.get(&key))
            })
            .map(String::as_str)
    }
}

fn section_header(line: &str) -> Option<&str> {
    let name = line.strip_prefix('[')?.strip_suffix(']')?;
    if name.is_empty() {
        return None;
    }
    Some(name.trim())
}

fn split_key_value(line: &str) -> Option<(String, String)> {
    let pos = line.find(DELIMITERS)?;
    let key = line[..pos].trim().to_lowercase();
    let value = line[pos + 1..].trim().to_string();
    Some((key, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_line_values() {
        let doc = IniDocument::parse("[piplock:common]\nreqs = sqlalchemy\n").expect("parse");
        assert_eq!(doc.get("piplock:common", "reqs"), Some("sqlalchemy"));
    }

    #[test]
    fn continuation_lines_join_with_newlines() {
        let input = "[piplock:dev]\nreqs =\n    testfixtures\n    factory-boy\n";
        let doc = IniDocument::parse(input).expect("parse");
        assert_eq!(
            doc.get("piplock:dev", "reqs"),
            Some("\ntestfixtures\nfactory-boy")
        );
    }

    #[test]
    fn comments_inside_values_are_skipped() {
        let input = "[s]\nreqs = a\n  # pinned elsewhere\n  b\n; trailing comment\n";
        let doc = IniDocument::parse(input).expect("parse");
        assert_eq!(doc.get("s", "reqs"), Some("a\nb"));
    }

    #[test]
    fn blank_lines_inside_values_are_kept() {
        let input = "[s]\nreqs = a\n\n  b\n\n[t]\nx = 1\n";
        let doc = IniDocument::parse(input).expect("parse");
        assert_eq!(doc.get("s", "reqs"), Some("a\n\nb"));
        assert_eq!(doc.get("t", "x"), Some("1"));
    }

    #[test]
    fn colon_delimiter_and_key_case_are_accepted() {
        let doc = IniDocument::parse("[s]\nReqs: requests>=2\n").expect("parse");
        assert_eq!(doc.get("s", "reqs"), Some("requests>=2"));
        assert_eq!(doc.get("s", "REQS"), Some("requests>=2"));
    }

    #[test]
    fn first_delimiter_wins() {
        let doc = IniDocument::parse("[s]\nreqs = django==4.2\n").expect("parse");
        assert_eq!(doc.get("s", "reqs"), Some("django==4.2"));
    }

    #[test]
    fn section_names_are_case_sensitive() {
        let doc = IniDocument::parse("[Piplock:Common]\nreqs = a\n").expect("parse");
        assert!(!doc.has_section("piplock:common"));
        assert!(doc.has_section("Piplock:Common"));
    }

    #[test]
    fn default_section_supplies_missing_keys() {
        let input = "[DEFAULT]\nreqs = shared\n[piplock:prod]\n[piplock:dev]\nreqs = own\n";
        let doc = IniDocument::parse(input).expect("parse");
        assert_eq!(doc.get("piplock:prod", "reqs"), Some("shared"));
        assert_eq!(doc.get("piplock:dev", "reqs"), Some("own"));
        assert_eq!(doc.get("piplock:common", "reqs"), None);
    }

    #[test]
    fn key_before_section_is_rejected() {
        let err = IniDocument::parse("reqs = a\n").unwrap_err();
        assert_eq!(err, IniError::MissingSectionHeader { line: 1 });
    }

    #[test]
    fn empty_section_header_is_not_a_section() {
        let err = IniDocument::parse("[]\nreqs = a\n").unwrap_err();
        assert_eq!(err, IniError::MissingSectionHeader { line: 1 });

        let err = IniDocument::parse("[s]\n[]\n").unwrap_err();
        assert_eq!(
            err,
            IniError::MissingDelimiter {
                line: 2,
                text: "[]".to_string()
            }
        );
    }

    #[test]
    fn line_without_delimiter_is_rejected() {
        let err = IniDocument::parse("[s]\nrequests\n").unwrap_err();
        assert_eq!(
            err,
            IniError::MissingDelimiter {
                line: 2,
                text: "requests".to_string()
            }
        );
    }

    #[test]
    fn duplicates_are_rejected() {
        let err = IniDocument::parse("[s]\n[s]\n").unwrap_err();
        assert!(matches!(err, IniError::DuplicateSection { line: 2, .. }));

        let err = IniDocument::parse("[s]\nreqs = a\nREQS = b\n").unwrap_err();
        assert!(matches!(err, IniError::DuplicateKey { line: 3, .. }));
    }
}
