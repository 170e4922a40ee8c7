//! Output formatting utilities

use crate::application::TimelineRow;

/// Format timeline rows for display
pub fn format_timeline(rows: &[TimelineRow], show_ids: bool) -> String {
    if rows.is_empty() {
        return "No entries found".to_string();
    }

    let mut output = String::new();
    for row in rows {
        let marker = if row.editing { "* " } else { "" };
        let prefix = if show_ids {
            format!("{}{}  {}  ", marker, row.id, row.date_label)
        } else {
            format!("{}{}  ", marker, row.date_label)
        };

        // continuation lines line up under the first line of text
        let indent = " ".repeat(prefix.chars().count());
        let mut lines = row.text.lines();
        output.push_str(&prefix);
        output.push_str(lines.next().unwrap_or(""));
        output.push('\n');
        for line in lines {
            output.push_str(&indent);
            output.push_str(line);
            output.push('\n');
        }
    }
    output
}
