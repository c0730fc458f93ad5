/// Shared fixtures for CLI tests
use chrono::NaiveDate;
use drip_core::types::{Batch, CourseRecording, CourseRef, RecordingId, TimelineItem};
use drip_sync::{CourseEntry, Snapshot};
use std::path::PathBuf;
use tempfile::TempDir;

pub fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

pub fn course(id: &str, title: &str, recordings: &[&str]) -> CourseEntry {
    CourseEntry {
        course: CourseRef::new(id, title),
        recordings: recordings
            .iter()
            .enumerate()
            .map(|(i, recording)| CourseRecording {
                recording_id: RecordingId::new(*recording),
                title: format!("{} {}", title, i + 1),
                module_order: 0,
                sequence_order: i as u32,
            })
            .collect(),
    }
}

/// Calculus on days 0-1 (homework gate on the first lesson), a live
/// session on day 3, and an unimported Biology course
pub fn sample_snapshot() -> Snapshot {
    let at = start().and_hms_opt(18, 0, 0).unwrap();
    let mut snapshot = Snapshot::new(Batch::new("Spring cohort", Some(start())));
    snapshot.courses = vec![
        course("calc", "Calculus", &["c-1", "c-2"]),
        course("bio", "Biology", &["b-1", "b-2", "b-3"]),
    ];
    snapshot.items = vec![
        TimelineItem::recording("Limits", "c-1", 0, 0)
            .with_id("i-limits")
            .with_assignment("hw-1"),
        TimelineItem::recording("Derivatives", "c-2", 1, 1).with_id("i-derivatives"),
        TimelineItem::live_session("Office hours", 3, at, at).with_id("i-office"),
    ];
    snapshot
}

/// Write a snapshot into a fresh temp dir
pub async fn write_snapshot(snapshot: &Snapshot) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.json");
    snapshot.save(&path).await.unwrap();
    (dir, path)
}
