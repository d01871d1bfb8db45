use tracing::{info, warn};

use crate::stats::{CloneStats, CloneStatus, Stage};

/// One-line report of a finished operation: status, clones per kind, counters
/// and failures per stage.
pub fn summary_line(stats: &CloneStats, status: CloneStatus) -> String {
    let kinds: Vec<String> = stats
        .cloned
        .iter()
        .map(|(kind, n)| format!("{}={}", kind.name(), n))
        .collect();
    let failures: Vec<String> = Stage::ALL
        .iter()
        .map(|stage| {
            let n = stats.failures.iter().filter(|f| f.stage == *stage).count();
            format!("{}={}", stage.name(), n)
        })
        .collect();
    format!(
        "{}: cloned {} [{}], excluded {}, remapped {}, persisted {}; failures {}",
        status.name(),
        stats.total_cloned(),
        kinds.join(", "),
        stats.excluded,
        stats.remapped,
        stats.persisted,
        failures.join(" "),
    )
}

pub fn log_summary(stats: &CloneStats, status: CloneStatus) {
    let line = summary_line(stats, status);
    match status {
        CloneStatus::Success => info!("clone finished {}", line),
        CloneStatus::PartialSuccess => warn!("clone finished {}", line),
    }
}
