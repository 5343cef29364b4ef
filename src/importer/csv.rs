//! Low-level CSV splitting shared by both import paths.
//!
//! This is intentionally not a full CSV reader: the upstream dialers emit
//! simple comma-delimited text where a double quote toggles an
//! "inside quoted field" state (commas inside are literal). No backslash or
//! doubled-quote escaping exists in that output, so none is supported here.

/// Split one line into fields. A `"` flips the quoted state and is dropped;
/// a `,` outside quotes ends the field.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current = String::new();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// A header-keyed table from a manual upload: one header row plus data rows.
/// Headers are trimmed and lower-cased for substring resolution.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse header-mode CSV. Fewer than 2 lines (no header + data, or empty
    /// input) yields an empty table, not an error. Blank lines are skipped.
    pub fn parse(content: &str) -> Self {
        let lines: Vec<&str> = content.trim().lines().collect();
        if lines.len() < 2 {
            return Self::default();
        }

        let headers = split_fields(lines[0])
            .into_iter()
            .map(|h| h.to_lowercase())
            .collect();
        let rows = lines[1..]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .map(|line| split_fields(line))
            .collect();

        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The value of `row` at a resolved column index. Absent or blank cells
    /// read as `None`, which the normalizer treats as zero / missing.
    pub fn value<'a>(row: &'a [String], idx: usize) -> Option<&'a str> {
        row.get(idx).map(|v| v.as_str()).filter(|v| !v.is_empty())
    }
}

/// Parse fixed-position CSV from an email attachment: no header semantics.
/// A first line containing "agent" (case-insensitive) is treated as a header
/// and skipped; otherwise line 1 is data. Fewer than 2 lines yields no rows.
pub fn parse_positional(content: &str) -> Vec<Vec<String>> {
    let lines: Vec<&str> = content.trim().lines().collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let start = if lines[0].to_lowercase().contains("agent") { 1 } else { 0 };
    lines[start..]
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| split_fields(line))
        .collect()
}
