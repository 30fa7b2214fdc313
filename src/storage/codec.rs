//! Flattening of string lists into a single TEXT column.
//!
//! Entries are joined with `", "`. A `,` or `\` inside an entry is escaped
//! with a backslash so entries survive the trip unchanged. An empty list is
//! stored as the empty string; entries themselves are never empty.

const SEPARATOR: char = ',';
const ESCAPE: char = '\\';

pub fn join_list(items: &[String]) -> String {
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        for ch in item.chars() {
            if ch == SEPARATOR || ch == ESCAPE {
                out.push(ESCAPE);
            }
            out.push(ch);
        }
    }
    out
}

pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            ESCAPE => {
                // A trailing lone backslash is kept as written.
                current.push(chars.next().unwrap_or(ESCAPE));
            }
            SEPARATOR => {
                items.push(std::mem::take(&mut current));
                if chars.peek() == Some(&' ') {
                    chars.next();
                }
            }
            _ => current.push(ch),
        }
    }
    items.push(current);
    items
}
