//! Parsing of `key: value` property text into typed lookups.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::str::FromStr;

use crate::PropertyError;

/// Parsed contents of one property resource.
///
/// Accepted syntax: `key: value`, `key=value` or `key value`, one entry
/// per logical line. Lines starting with `#` or `!` are comments, and a
/// trailing backslash continues the entry on the next line. A key declared
/// twice keeps its last value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PropertySet {
    entries: BTreeMap<String, String>,
}

impl PropertySet {
    /// Parse property `text`. Parsing never fails; typed lookups do.
    ///
    /// # Examples
    ///
    /// ```
    /// use ancestry_config::properties::PropertySet;
    ///
    /// let props = PropertySet::parse("sdk: 21\nshadows: a.One, a.Two\nlibraries:\n");
    /// assert_eq!(props.get("sdk"), Some("21"));
    /// assert_eq!(props.list("shadows"), Some(vec!["a.One".to_owned(), "a.Two".to_owned()]));
    /// assert_eq!(props.list("libraries"), Some(Vec::new()));
    /// assert_eq!(props.list("assetDir"), None);
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in logical_lines(text) {
            if let Some((key, value)) = split_entry(&line) {
                entries.insert(key, value);
            }
        }
        Self { entries }
    }

    /// Raw value of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` when `key` is declared, even with an empty value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of declared keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scalar value of `key`; an empty value counts as unset.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<String> {
        self.get(key)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    }

    /// Comma-separated entries of `key`.
    ///
    /// `None` when the key is absent; `Some(vec![])` when it is declared
    /// with an empty value.
    #[must_use]
    pub fn list(&self, key: &str) -> Option<Vec<String>> {
        self.get(key).map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_owned)
                .collect()
        })
    }

    /// Parse the scalar value of `key` as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidValue`] when the value does not parse.
    pub fn parse_value<T>(&self, key: &str) -> Result<Option<T>, PropertyError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.string(key)
            .map(|value| parse_one(key, &value))
            .transpose()
    }

    /// Parse every entry of the list value of `key` as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidValue`] for the first entry that does
    /// not parse.
    pub fn parse_list<T>(&self, key: &str) -> Result<Option<Vec<T>>, PropertyError>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.list(key)
            .map(|entries| {
                entries
                    .iter()
                    .map(|entry| parse_one(key, entry))
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()
    }

    /// Iterate over declared keys and raw values, sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

fn parse_one<T>(key: &str, value: &str) -> Result<T, PropertyError>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse().map_err(|err: T::Err| PropertyError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
        reason: err.to_string(),
    })
}

/// Join physical lines continued with a trailing backslash, dropping blank
/// lines and comments.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;
    for raw in text.lines() {
        let trimmed = raw.trim_start();
        let mut line = match pending.take() {
            Some(mut joined) => {
                joined.push_str(trimmed);
                joined
            }
            None if trimmed.is_empty() || trimmed.starts_with(['#', '!']) => continue,
            None => trimmed.to_owned(),
        };
        if continues(&line) {
            line.pop();
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }
    lines.extend(pending);
    lines
}

/// A line continues when it ends in an odd number of backslashes.
fn continues(line: &str) -> bool {
    !line
        .chars()
        .rev()
        .take_while(|c| *c == '\\')
        .count()
        .is_multiple_of(2)
}

/// Split a logical line into an unescaped key and value.
fn split_entry(line: &str) -> Option<(String, String)> {
    let mut chars = line.chars().peekable();
    let mut key = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => key.extend(chars.next().map(unescape)),
            ':' | '=' => {
                skip_blank(&mut chars);
                return finish(key, chars);
            }
            c if c.is_whitespace() => {
                skip_blank(&mut chars);
                if chars.next_if(|c| matches!(c, ':' | '=')).is_some() {
                    skip_blank(&mut chars);
                }
                return finish(key, chars);
            }
            c => key.push(c),
        }
    }
    finish(key, chars)
}

fn skip_blank(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn finish(
    key: String,
    mut chars: std::iter::Peekable<std::str::Chars<'_>>,
) -> Option<(String, String)> {
    if key.is_empty() {
        return None;
    }
    let mut value = String::new();
    while let Some(c) = chars.next() {
        if c == '\\' {
            value.extend(chars.next().map(unescape));
        } else {
            value.push(c);
        }
    }
    Some((key, value.trim_end().to_owned()))
}

const fn unescape(c: char) -> char {
    match c {
        't' => '\t',
        'n' => '\n',
        'r' => '\r',
        'f' => '\u{c}',
        other => other,
    }
}
