//! Plain-text export of the timeline

use crate::domain::{DateValue, Entry};
use crate::error::{Result, TimelineError};
use regex::Regex;
use std::sync::OnceLock;

pub const EXPORT_FILE_NAME: &str = "timeline-export.txt";
const EXPORT_HEADER: &str = "Timeline Export\n\n";

/// A rendered export ready to be offered as a download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
}

fn entry_header_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"(?m)^\[(\d{4,})-(\d{2})-(\d{2})\]$").unwrap())
}

/// Render entries, already in display order, as an export document body.
///
/// ```text
/// Timeline Export
///
/// [1993-01-01]
/// hello
///
/// ```
pub fn render_export<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut output = String::from(EXPORT_HEADER);
    for entry in entries {
        output.push_str(&format!("[{}]\n{}\n\n", entry.date.to_iso(), entry.text));
    }
    output
}

/// Read an export back into (date, text) pairs in document order.
///
/// A block starts at a `[YYYY-MM-DD]` line that opens the body or follows a
/// blank line, and is at least `[date]\n\n\n` long. A header line directly
/// after the previous header's blank line therefore belongs to that entry's
/// text. Entry text that itself contains a blank line followed by such a
/// line, further in, cannot be told apart from a new block.
pub fn parse_export(document: &str) -> Result<Vec<(DateValue, String)>> {
    let body = document.strip_prefix(EXPORT_HEADER).ok_or_else(|| {
        TimelineError::MalformedPersistedData("missing 'Timeline Export' header".to_string())
    })?;

    let mut headers: Vec<(usize, usize, DateValue)> = Vec::new();
    for caps in entry_header_regex().captures_iter(body) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let opens_block = whole.start() == 0 || body[..whole.start()].ends_with("\n\n");
        // "\n" + text + "\n\n" must fit after the previous header
        let clear_of_previous = headers
            .last()
            .map_or(true, |&(_, prev_end, _)| whole.start() >= prev_end + 3);
        if !opens_block || !clear_of_previous {
            continue;
        }
        let (Ok(year), Ok(month), Ok(day)) = (
            caps[1].parse::<i32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<u32>(),
        ) else {
            continue;
        };
        headers.push((whole.start(), whole.end(), DateValue::new(year, month, day)));
    }

    if headers.is_empty() {
        return if body.is_empty() {
            Ok(Vec::new())
        } else {
            Err(TimelineError::MalformedPersistedData(
                "export body has no dated blocks".to_string(),
            ))
        };
    }
    if headers[0].0 != 0 {
        return Err(TimelineError::MalformedPersistedData(
            "text before the first dated block".to_string(),
        ));
    }

    let mut pairs = Vec::with_capacity(headers.len());
    for (idx, &(_, header_end, date)) in headers.iter().enumerate() {
        let block_end = headers
            .get(idx + 1)
            .map(|next| next.0)
            .unwrap_or(body.len());

        // "[date]" "\n" text "\n\n"
        let text_start = header_end + 1;
        let text = Some(block_end)
            .filter(|end| body[..*end].ends_with("\n\n"))
            .map(|end| end - 2)
            .filter(|end| *end >= text_start)
            .map(|end| &body[text_start..end])
            .ok_or_else(|| {
                TimelineError::MalformedPersistedData(format!(
                    "block for {} is not terminated by a blank line",
                    date
                ))
            })?;

        pairs.push((date, text.to_string()));
    }

    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sort_entries, EntryId, SortDirection};

    fn entry(id: u64, date: DateValue, text: &str) -> Entry {
        Entry::new(EntryId::new(id), date, text)
    }

    #[test]
    fn test_render_empty() {
        let entries: Vec<Entry> = Vec::new();
        assert_eq!(render_export(&entries), "Timeline Export\n\n");
    }

    #[test]
    fn test_render_layout() {
        let entries = vec![
            entry(1, DateValue::new(1993, 1, 1), "hello"),
            entry(2, DateValue::new(2023, 5, 1), "line one\nline two"),
        ];
        assert_eq!(
            render_export(&entries),
            "Timeline Export\n\n[1993-01-01]\nhello\n\n[2023-05-01]\nline one\nline two\n\n"
        );
    }

    #[test]
    fn test_render_tolerates_impossible_dates() {
        let entries = vec![entry(1, DateValue::new(2023, 2, 30), "odd")];
        assert!(render_export(&entries).contains("[2023-02-30]\nodd\n"));
    }

    #[test]
    fn test_parse_back_matches_sorted_view() {
        let entries = vec![
            entry(300, DateValue::new(2023, 5, 1), "third"),
            entry(100, DateValue::new(2023, 5, 1), ""),
            entry(200, DateValue::new(1999, 12, 31), "multi\nline\n\nwith gap"),
            entry(50, DateValue::new(2024, 2, 29), "leap"),
        ];

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let sorted = sort_entries(&entries, direction);
            let expected: Vec<(DateValue, String)> =
                sorted.iter().map(|e| (e.date, e.text.clone())).collect();

            let parsed = parse_export(&render_export(sorted.iter().copied())).unwrap();
            assert_eq!(parsed, expected);
        }
    }

    #[test]
    fn test_parse_text_starting_with_header_line() {
        let entries = vec![
            entry(1, DateValue::new(1993, 1, 1), "\n[2023-05-01]\nlooks like a block"),
            entry(2, DateValue::new(2000, 6, 15), ""),
            entry(3, DateValue::new(2001, 1, 1), "after"),
        ];

        let parsed = parse_export(&render_export(&entries)).unwrap();
        assert_eq!(
            parsed,
            vec![
                (
                    DateValue::new(1993, 1, 1),
                    "\n[2023-05-01]\nlooks like a block".to_string()
                ),
                (DateValue::new(2000, 6, 15), String::new()),
                (DateValue::new(2001, 1, 1), "after".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_empty_export() {
        assert!(parse_export("Timeline Export\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_missing_header() {
        assert!(parse_export("[1993-01-01]\nhello\n\n").is_err());
    }

    #[test]
    fn test_parse_rejects_unterminated_block() {
        assert!(parse_export("Timeline Export\n\n[1993-01-01]\nhello").is_err());
    }

    #[test]
    fn test_parse_rejects_stray_text() {
        assert!(parse_export("Timeline Export\n\nstray\n\n[1993-01-01]\nx\n\n").is_err());
    }
}
