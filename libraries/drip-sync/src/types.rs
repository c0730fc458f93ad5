use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of bulk write in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulkOperation {
    Import,
    Reorder,
    Delete,
}

impl fmt::Display for BulkOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Import => write!(f, "import"),
            Self::Reorder => write!(f, "reorder"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Progress information for an ongoing bulk write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkProgress {
    pub operation: BulkOperation,
    pub total_items: usize,
    pub processed_items: usize,
    pub successful_items: usize,
    pub failed_items: usize,
    pub current_item: Option<String>,
    pub percentage: f32,
}

/// One write that did not go through
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteFailure {
    /// Item id, or recording id for creates
    pub target: String,
    pub message: String,
}

/// Outcome of a bulk write
///
/// Writes are independent: the successful ones stay persisted even when
/// others fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkWriteReport {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<WriteFailure>,
}

impl BulkWriteReport {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// Every write succeeded (vacuously true for an empty run)
    pub fn is_complete(&self) -> bool {
        self.failed == 0 && self.succeeded == self.total
    }

    pub fn processed(&self) -> usize {
        self.succeeded + self.failed
    }
}

impl fmt::Display for BulkWriteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.succeeded, self.total)
    }
}

/// Overrides for a course import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Offset of the first imported recording; defaults to the day after the
    /// latest scheduled item
    pub base_offset_days: Option<u32>,

    /// Days between consecutive imported recordings; defaults to the
    /// configured interval
    pub interval_days: Option<u32>,
}
