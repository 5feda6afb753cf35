//! Replaying message scripts against a board.

use cardgroup_engine::{BoardMessage, EngineError, GroupManager, HueSource, IdGenerator};
use tracing::{info, warn};

/// A script message the engine rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFailure {
    /// Zero-based position in the script.
    pub index: usize,
    pub op: &'static str,
    pub error: EngineError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Messages that changed the board.
    pub changed: usize,
    /// Messages accepted without changing anything.
    pub unchanged: usize,
    pub failures: Vec<ReplayFailure>,
}

impl ReplayReport {
    pub fn total(&self) -> usize {
        self.changed + self.unchanged + self.failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Parse a script: a JSON array of messages.
pub fn parse_script(json: &str) -> serde_json::Result<Vec<BoardMessage>> {
    serde_json::from_str(json)
}

/// Apply every message in order. Rejected messages are logged and skipped.
pub fn replay<I, H, M>(manager: &mut GroupManager<I, H>, messages: M) -> ReplayReport
where
    I: IdGenerator,
    H: HueSource,
    M: IntoIterator<Item = BoardMessage>,
{
    let mut report = ReplayReport::default();
    for (index, msg) in messages.into_iter().enumerate() {
        let op = msg.name();
        match manager.apply(msg) {
            Ok(applied) if applied.changed() => report.changed += 1,
            Ok(_) => report.unchanged += 1,
            Err(error) => {
                warn!(index, op, %error, "skipping message");
                report.failures.push(ReplayFailure { index, op, error });
            }
        }
    }
    info!(
        total = report.total(),
        changed = report.changed,
        unchanged = report.unchanged,
        failed = report.failures.len(),
        "replay finished"
    );
    report
}
