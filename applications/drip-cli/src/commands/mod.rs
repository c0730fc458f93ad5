//! Subcommand implementations
//!
//! Every command opens a snapshot, works on its timeline, and returns the
//! text to print. Commands that change the schedule only touch the file
//! when asked to write.

mod session;

use crate::config::DripConfig;
use crate::error::{CliError, Result};
use crate::render;
use chrono::NaiveDate;
use drip_core::types::{CourseId, TimelineItem, TimelineItemId};
use drip_schedule::{assign_sequence, reindex as reindex_list, GroupId, ScheduleError};
use drip_sync::ImportOptions;
use std::path::Path;

pub use session::SnapshotSession;

/// Print groups with deploy dates, and unlock status when `today` is given
pub async fn preview(
    snapshot: &Path,
    today: Option<NaiveDate>,
    config: &DripConfig,
) -> Result<String> {
    let session = SnapshotSession::open(snapshot, config).await?;
    Ok(render::timeline(&session.timeline, today, &session.approved))
}

/// Import a course's recordings after the current schedule
pub async fn import(
    snapshot: &Path,
    course: &CourseId,
    options: ImportOptions,
    write: bool,
    config: &DripConfig,
) -> Result<String> {
    let mut session = SnapshotSession::open(snapshot, config).await?;
    let report = session
        .sync
        .import_course(&mut session.timeline, course, options)
        .await?;
    session.finish(write).await?;

    let mut out = render::report("import", &report);
    out.push_str(&render::timeline(&session.timeline, None, &session.approved));
    Ok(out)
}

/// Drag `group` onto `over` and shift offsets to match
pub async fn reorder_groups(
    snapshot: &Path,
    group: &GroupId,
    over: &GroupId,
    write: bool,
    config: &DripConfig,
) -> Result<String> {
    let mut session = SnapshotSession::open(snapshot, config).await?;
    for id in [group, over] {
        if session.timeline.group(id).is_none() {
            return Err(ScheduleError::UnknownGroup(id.to_string()).into());
        }
    }

    let report = session
        .sync
        .reorder_groups(&mut session.timeline, group, over)
        .await?;
    session.finish(write).await?;

    let mut out = render::report("reorder", &report);
    out.push_str(&render::timeline(&session.timeline, None, &session.approved));
    Ok(out)
}

/// Move one item of the flat schedule and print the new 1-based sequence
///
/// `from` and `to` are 1-based positions in schedule order.
pub async fn reindex(
    snapshot: &Path,
    from: usize,
    to: usize,
    config: &DripConfig,
) -> Result<String> {
    let session = SnapshotSession::open(snapshot, config).await?;
    let ordered = session.timeline.schedule_order();

    let position = |value: usize| {
        value
            .checked_sub(1)
            .filter(|index| *index < ordered.len())
            .ok_or_else(|| {
                CliError::InvalidArgument(format!(
                    "position {} is outside 1..={}",
                    value,
                    ordered.len()
                ))
            })
    };
    let (from, to) = (position(from)?, position(to)?);

    let moved: Vec<&TimelineItem> = reindex_list(&ordered, from, to);
    let mut numbered: Vec<(u32, &str)> = moved
        .iter()
        .map(|item| (0, item.title.as_str()))
        .collect();
    assign_sequence(&mut numbered, |entry, sequence| entry.0 = sequence);

    Ok(render::sequence(numbered))
}

/// Schedule a live session on a calendar date
pub async fn add_live(
    snapshot: &Path,
    title: &str,
    date: NaiveDate,
    write: bool,
    config: &DripConfig,
) -> Result<String> {
    let mut session = SnapshotSession::open(snapshot, config).await?;
    let draft = session.timeline.plan_live_session(title, date)?;
    let item = session.sync.add_item(&mut session.timeline, draft).await?;
    session.finish(write).await?;

    let mut out = format!(
        "Added live session '{}' on {} (day {})\n",
        item.title, date, item.drip_offset_days
    );
    out.push_str(&render::timeline(&session.timeline, None, &session.approved));
    Ok(out)
}

/// Delete a single item
pub async fn remove_item(
    snapshot: &Path,
    item: &TimelineItemId,
    write: bool,
    config: &DripConfig,
) -> Result<String> {
    let mut session = SnapshotSession::open(snapshot, config).await?;
    session.sync.delete_item(&mut session.timeline, item).await?;
    session.finish(write).await?;
    Ok(format!("Removed item {}\n", item))
}

/// Delete every item of a group
pub async fn remove_group(
    snapshot: &Path,
    group: &GroupId,
    write: bool,
    config: &DripConfig,
) -> Result<String> {
    let mut session = SnapshotSession::open(snapshot, config).await?;
    let report = session
        .sync
        .delete_group(&mut session.timeline, group)
        .await?;
    session.finish(write).await?;
    Ok(render::report("remove", &report))
}
