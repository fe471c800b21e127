use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const NO_LOGS: &str = "No logs available";

/// Where the scheduler appends a prayer's playback output.
pub fn log_path(dir: &Path, prayer: &str) -> PathBuf {
    dir.join(format!("prayer-call-{}.log", prayer))
}

/// Last `max_lines` lines of a prayer's job log; `None` when the log does not exist.
pub fn read_job_log(dir: &Path, prayer: &str, max_lines: usize) -> Result<Option<String>> {
    let path = log_path(dir, prayer);
    if !path.exists() {
        log::debug!("No job log at {:?}", path);
        return Ok(None);
    }
    let bytes = std::fs::read(&path).with_context(|| format!("Reading {:?}", path))?;
    let content = String::from_utf8_lossy(&bytes);
    let lines: Vec<&str> = content.lines().collect();
    let start = lines.len().saturating_sub(max_lines);
    Ok(Some(lines[start..].join("\n")))
}
