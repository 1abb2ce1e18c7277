//! Flat `key: value` frontmatter delimited by `---` lines.
//!
//! Only the subset changelog entries use is understood: one pair per line,
//! split on the first colon. Nested YAML, lists and multi-line values are
//! kept as plain text.

use std::collections::HashMap;

const DELIMITER: &str = "---";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    fields: HashMap<String, String>,
}

impl Frontmatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Split `raw` into its frontmatter mapping and the remaining body.
///
/// Without an opening and a closing delimiter line the mapping is empty and
/// the body is `raw` unchanged.
pub fn parse_frontmatter(raw: &str) -> (Frontmatter, &str) {
    match scan(raw) {
        Some((fields, body)) => (Frontmatter { fields }, body.trim()),
        None => (Frontmatter::default(), raw),
    }
}

fn scan(raw: &str) -> Option<(HashMap<String, String>, &str)> {
    let mut lines = LineCursor::new(raw);

    let first = lines.next()?;
    if !is_delimiter(first) {
        return None;
    }

    let mut fields = HashMap::new();
    while let Some(line) = lines.next() {
        if is_delimiter(line) {
            return Some((fields, lines.rest()));
        }
        if let Some((key, value)) = split_pair(line) {
            fields.insert(key.to_string(), value.to_string());
        }
    }
    None
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn split_pair(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, strip_quotes(value.trim())))
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Line iterator that can hand back the unread remainder of the input.
struct LineCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }
}

impl<'a> Iterator for LineCursor<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.pos >= self.text.len() {
            return None;
        }
        let rest = &self.text[self.pos..];
        let (line, consumed) = match rest.find('\n') {
            Some(end) => (&rest[..end], end + 1),
            None => (rest, rest.len()),
        };
        self.pos += consumed;
        Some(line.strip_suffix('\r').unwrap_or(line))
    }
}
