//! Parse pacman style package database blocks.
//!
//! A block is a sequence of paragraphs. Each paragraph starts with a key line
//! like `%NAME%`, followed by one value per line, and ends with an empty line.
use std::collections::HashMap;

/// Parse the concatenated `desc`, `depends` and `files` blocks of a package.
///
/// Lines are trimmed. The last paragraph does not need a trailing empty line,
/// and a repeated key replaces the earlier values.
pub fn parse_block(i: &str) -> HashMap<String, Vec<String>> {
    let mut res = HashMap::new();
    let mut key: Option<&str> = None;
    let mut values = Vec::new();
    for line in i.lines().map(str::trim) {
        match key {
            // Stray empty lines between paragraphs
            None if line.is_empty() => (),
            None => key = Some(line),
            Some(k) if line.is_empty() => {
                res.insert(k.to_owned(), std::mem::take(&mut values));
                key = None;
            }
            Some(_) => values.push(line.to_owned()),
        }
    }
    // Commit last paragraph
    if let Some(k) = key {
        res.insert(k.to_owned(), values);
    }
    res
}
