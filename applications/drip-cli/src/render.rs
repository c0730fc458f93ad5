//! Plain-text rendering of timelines and bulk write reports

use chrono::NaiveDate;
use drip_core::types::{AssignmentId, TimelineContent, TimelineItem, TimelineItemId};
use drip_schedule::{GroupIcon, Timeline, UnlockStatus};
use drip_sync::BulkWriteReport;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

/// Render every group in session order
///
/// With `today`, each item also shows its unlock status for a student whose
/// approved assignments are `approved`.
pub fn timeline(
    timeline: &Timeline,
    today: Option<NaiveDate>,
    approved: &HashSet<AssignmentId>,
) -> String {
    let statuses: HashMap<TimelineItemId, UnlockStatus> = today
        .map(|today| timeline.unlock_statuses(today, approved))
        .unwrap_or_default()
        .into_iter()
        .collect();

    let mut out = String::new();
    let batch = timeline.batch();
    let start = batch
        .start_date
        .map_or_else(|| "-".to_string(), |date| date.to_string());
    let _ = writeln!(out, "{} (starts {}, {})", batch.name, start, batch.status);

    if timeline.is_empty() {
        let _ = writeln!(out, "  no items scheduled");
        return out;
    }

    for group in timeline.groups() {
        let _ = writeln!(
            out,
            "\n[{}] {} ({}, {} items)",
            icon(group.icon),
            group.label,
            group.id,
            group.len()
        );
        for item in &group.items {
            let _ = write!(out, "  {}", item_line(timeline, item));
            if let Some(status) = statuses.get(&item.id) {
                let _ = write!(out, "  [{}]", status);
            }
            out.push('\n');
        }
    }

    out
}

fn item_line(timeline: &Timeline, item: &TimelineItem) -> String {
    let mut line = format!(
        "{:<10}  day {:>3}  #{:<3} {}",
        timeline.deploy_date(item).to_string(),
        item.drip_offset_days,
        item.sequence_order,
        item.title
    );
    if let TimelineContent::LiveSession { start, end } = &item.content {
        let _ = write!(line, " ({}-{})", start.format("%H:%M"), end.format("%H:%M"));
    }
    if let Some(assignment) = &item.assignment_id {
        let _ = write!(line, " gated by {}", assignment);
    }
    line
}

fn icon(icon: GroupIcon) -> &'static str {
    match icon {
        GroupIcon::Course => "course",
        GroupIcon::Video => "video",
        GroupIcon::Live => "live",
    }
}

/// One-line summary of a bulk write, followed by its failures
pub fn report(action: &str, report: &BulkWriteReport) -> String {
    let mut out = format!("{}: {} written", action, report);
    for failure in &report.failures {
        let _ = write!(out, "\n  failed {}: {}", failure.target, failure.message);
    }
    out.push('\n');
    out
}

/// Numbered list of titles, one per line
pub fn sequence<'a>(titles: impl IntoIterator<Item = (u32, &'a str)>) -> String {
    let mut out = String::new();
    for (position, title) in titles {
        let _ = writeln!(out, "{:>3}. {}", position, title);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use drip_core::types::Batch;
    use drip_schedule::ScheduleConfig;

    #[test]
    fn unconfigured_batch_renders_placeholders() {
        let tl = Timeline::new(
            Batch::new("Draft", None),
            vec![TimelineItem::recording("Intro", "r1", 2, 0)],
            HashMap::new(),
            ScheduleConfig::default(),
        );

        let out = timeline(&tl, None, &HashSet::new());
        assert!(out.starts_with("Draft (starts -, not_started)"));
        assert!(out.contains("Other Recordings"));
        assert!(out.contains(&format!("{:<10}  day   2", "-")));
    }

    #[test]
    fn report_lists_failures() {
        let mut bulk = BulkWriteReport::new(2);
        bulk.succeeded = 1;
        bulk.failed = 1;
        bulk.failures.push(drip_sync::WriteFailure {
            target: "r2".to_string(),
            message: "Storage error: down".to_string(),
        });

        let out = report("import", &bulk);
        assert!(out.starts_with("import: 1 of 2 written"));
        assert!(out.contains("failed r2: Storage error: down"));
    }
}
