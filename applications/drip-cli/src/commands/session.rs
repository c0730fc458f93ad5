use crate::config::DripConfig;
use crate::error::Result;
use drip_core::types::AssignmentId;
use drip_schedule::Timeline;
use drip_sync::{MemoryStore, Snapshot, TimelineSync};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// A snapshot file opened for one command
pub struct SnapshotSession {
    path: PathBuf,
    store: Arc<MemoryStore>,
    pub sync: TimelineSync,
    pub timeline: Timeline,
    pub approved: HashSet<AssignmentId>,
}

impl SnapshotSession {
    pub async fn open(path: &Path, config: &DripConfig) -> Result<Self> {
        let snapshot = Snapshot::load(path).await?;
        let batch_id = snapshot.batch.id.clone();
        let approved = snapshot.approved();

        let store = Arc::new(MemoryStore::new(snapshot));
        let sync = TimelineSync::with_backend(store.clone(), config.schedule.clone());
        let timeline = sync.load(&batch_id).await?;

        let unresolved = timeline.unresolved_recordings();
        if !unresolved.is_empty() {
            debug!("{} recordings have no known course", unresolved.len());
        }
        info!("Opened {} ({} items)", path.display(), timeline.len());

        Ok(Self {
            path: path.to_path_buf(),
            store,
            sync,
            timeline,
            approved,
        })
    }

    /// Write the store back to the snapshot file when `write` is set
    pub async fn finish(&self, write: bool) -> Result<()> {
        if write {
            self.store.save(&self.path).await?;
            info!("Wrote {}", self.path.display());
        } else {
            info!("Dry run, {} left unchanged (pass --write to save)", self.path.display());
        }
        Ok(())
    }
}
