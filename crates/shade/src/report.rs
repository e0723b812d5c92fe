//! Append-only log of problem reports submitted from the web frontend.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::info;

/// Report file writer. Appends are serialized so entries never interleave.
#[derive(Debug)]
pub struct ReportLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl ReportLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one entry, creating the file and its directory on first use.
    pub async fn append(&self, client: Option<IpAddr>, report: &str) -> std::io::Result<()> {
        let entry = format_entry(Local::now(), client, report);

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(entry.as_bytes()).await?;
        file.flush().await?;

        info!(client = ?client, "report submitted");
        Ok(())
    }
}

/// `{YYYY-MM-DD HH:MM:SS} - {ip} - {report}\n`
///
/// Line breaks inside the report are flattened so one report stays one line.
fn format_entry(at: DateTime<Local>, client: Option<IpAddr>, report: &str) -> String {
    let client = client.map_or_else(|| "unknown".to_owned(), |ip| ip.to_string());
    let report = report.replace(['\r', '\n'], " ");
    format!("{} - {client} - {report}\n", at.format("%Y-%m-%d %H:%M:%S"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn entry_format() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let ip: IpAddr = "10.0.0.42".parse().unwrap();
        assert_eq!(
            format_entry(at, Some(ip), "curtain stuck"),
            "2024-03-09 14:05:07 - 10.0.0.42 - curtain stuck\n"
        );
    }

    #[test]
    fn multiline_report_stays_on_one_line() {
        let at = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let line = format_entry(at, None, "first\r\nsecond");
        assert_eq!(line, "2024-03-09 14:05:07 - unknown - first  second\n");
    }

    #[tokio::test]
    async fn append_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log = ReportLog::new(dir.path().join("nested/reports.txt"));

        log.append(None, "one").await.unwrap();
        log.append("::1".parse().ok(), "two").await.unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(" - unknown - one"));
        assert!(lines[1].ends_with(" - ::1 - two"));
    }
}
