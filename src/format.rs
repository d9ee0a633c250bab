//! Output formatting for `issuedb`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! JSON mode serializes the model types directly; the helpers here cover
//! the text side.

use crate::model::Issue;
use crate::paginate::Page;
use std::fmt::Write as _;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Visual width budget for the detail preview in list lines.
pub const DETAIL_PREVIEW_LEN: usize = 100;

/// Truncate `text` to at most `max_width` visual columns, appending `...`
/// when anything was cut. Width is display width, so wide characters count
/// as two columns.
#[must_use]
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(3);
    let mut width = 0;
    let mut out = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > budget {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Render one issue as a single list line.
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    let mut line = format!(
        "#{} [{}/{}] {} ({})",
        issue.id, issue.tag, issue.status, issue.name, issue.user_id
    );
    if !issue.detail.is_empty() {
        let _ = write!(
            line,
            " - {}",
            truncate_text(&issue.detail, DETAIL_PREVIEW_LEN)
        );
    }
    line
}

/// Render the full field block for a single issue.
#[must_use]
pub fn format_issue_details(issue: &Issue) -> String {
    let mut out = format!("Issue #{}\n", issue.id);
    let _ = writeln!(out, "  Name:   {}", issue.name);
    let _ = writeln!(out, "  Tag:    {}", issue.tag);
    let _ = writeln!(out, "  Status: {}", issue.status);
    let _ = writeln!(out, "  User:   {}", issue.user_id);
    if issue.detail.is_empty() {
        let _ = writeln!(out, "  Detail: (none)");
    } else {
        let _ = writeln!(out, "  Detail: {}", issue.detail);
    }
    out
}

/// Render one page of issues with a positioning footer.
#[must_use]
pub fn format_issue_list(page: &Page<Issue>) -> String {
    if page.items.is_empty() {
        return String::from("No issues found.\n");
    }

    let mut out = String::new();
    for issue in &page.items {
        let _ = writeln!(out, "{}", format_issue_line(issue));
    }
    let _ = writeln!(
        out,
        "Page {} of {} ({} total)",
        page.current_page, page.total_pages, page.total_count
    );
    out
}
