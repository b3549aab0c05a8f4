// ABOUTME: Terminal rendering for tag listings
// ABOUTME: Boxed notices and the tags table with proportional column widths

use colored::*;
use comfy_table::{
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ColumnConstraint, ContentArrangement,
    Table, Width,
};

use taskdeck_core::TagInfo;

const MIN_NAME_WIDTH: u16 = 20;
const MIN_STAT_WIDTH: u16 = 8;
const FALLBACK_TERMINAL_WIDTH: u16 = 80;

fn terminal_width() -> u16 {
    crossterm::terminal::size()
        .map(|(width, _)| width)
        .unwrap_or(FALLBACK_TERMINAL_WIDTH)
}

/// Column widths for Tag Name / Status / Tasks / Completed, derived
/// proportionally (40/38/10/12 percent) from the terminal width and clamped
/// to per-column minimums.
pub fn column_widths(total: u16) -> [u16; 4] {
    let pct = |share: u16| total.saturating_mul(share) / 100;
    [
        pct(40).max(MIN_NAME_WIDTH),
        pct(38).max(MIN_STAT_WIDTH),
        pct(10).max(MIN_STAT_WIDTH),
        pct(12).max(MIN_STAT_WIDTH),
    ]
}

/// Print a bordered single-line notice.
pub fn boxed_notice(message: &str) {
    let inner = message.chars().count() + 2;
    println!("{}", format!("╭{}╮", "─".repeat(inner)).cyan());
    println!("{}", format!("│ {} │", message).cyan());
    println!("{}", format!("╰{}╯", "─".repeat(inner)).cyan());
}

fn display_name(tag: &TagInfo) -> String {
    if tag.is_current {
        let id = tag.brief_id.as_deref().unwrap_or("local");
        format!("● {} (current - {})", tag.name, id)
    } else {
        format!("  {}", tag.name)
    }
}

fn status_cell(tag: &TagInfo) -> String {
    if let Some(status) = &tag.status {
        return status.clone();
    }
    if tag.status_breakdown.is_empty() {
        return "—".to_string();
    }
    tag.status_breakdown
        .iter()
        .map(|(status, count)| format!("{} {}", count, status))
        .collect::<Vec<_>>()
        .join(", ")
}

fn completed_cell(tag: &TagInfo) -> String {
    if tag.task_count == 0 {
        return "0/0 (0%)".to_string();
    }
    let pct = tag.completed_tasks * 100 / tag.task_count;
    format!("{}/{} ({}%)", tag.completed_tasks, tag.task_count, pct)
}

fn format_created(tag: &TagInfo) -> String {
    tag.created
        .map(|dt| dt.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Render the sorted tag sequence as a table.
pub fn render_tags_table(tags: &[TagInfo], show_metadata: bool) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    if show_metadata {
        table.set_header(vec![
            "Tag Name",
            "Status",
            "Tasks",
            "Completed",
            "Created",
            "Description",
        ]);
    } else {
        table.set_header(vec!["Tag Name", "Status", "Tasks", "Completed"]);
        let widths = column_widths(terminal_width());
        for (column, width) in table.column_iter_mut().zip(widths) {
            column.set_constraint(ColumnConstraint::Absolute(Width::Fixed(width)));
        }
    }

    for tag in tags {
        let mut row = vec![
            display_name(tag),
            status_cell(tag),
            tag.task_count.to_string(),
            completed_cell(tag),
        ];
        if show_metadata {
            row.push(format_created(tag));
            row.push(tag.description.clone().unwrap_or_else(|| "—".to_string()));
        }
        table.add_row(row);
    }

    println!("{table}");
    println!(
        "Total: {} tag(s)",
        tags.len().to_string().cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    #[test]
    fn widths_are_proportional_on_wide_terminals() {
        assert_eq!(column_widths(120), [48, 45, 12, 14]);
        assert_eq!(column_widths(200), [80, 76, 20, 24]);
    }

    #[test]
    fn widths_clamp_to_minimums_on_narrow_terminals() {
        assert_eq!(column_widths(40), [20, 15, 8, 8]);
        assert_eq!(column_widths(0), [20, 8, 8, 8]);
    }

    #[test]
    fn current_tag_gets_marker_and_brief_suffix() {
        let mut tag = TagInfo::empty("mainline");
        tag.is_current = true;
        tag.brief_id = Some("brief-42".to_string());

        assert_eq!(display_name(&tag), "● mainline (current - brief-42)");
    }

    #[test]
    fn status_cell_prefers_brief_status() {
        let mut tag = TagInfo::empty("mainline");
        tag.status = Some("delivering".to_string());
        tag.status_breakdown = BTreeMap::from([("pending".to_string(), 3)]);

        assert_eq!(status_cell(&tag), "delivering");
    }

    #[test]
    fn status_cell_summarizes_breakdown() {
        let mut tag = TagInfo::empty("mainline");
        tag.status_breakdown =
            BTreeMap::from([("done".to_string(), 2), ("pending".to_string(), 3)]);

        assert_eq!(status_cell(&tag), "2 done, 3 pending");
    }

    #[test]
    fn completed_cell_shows_done_over_total_with_percentage() {
        let mut tag = TagInfo::empty("mainline");
        tag.task_count = 4;
        tag.completed_tasks = 3;

        assert_eq!(completed_cell(&tag), "3/4 (75%)");
        assert_eq!(completed_cell(&TagInfo::empty("idle")), "0/0 (0%)");
    }
}
