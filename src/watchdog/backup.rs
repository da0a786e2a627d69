use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use serenity::model::Timestamp;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BackupFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

pub fn backup_message(timestamp: i64) -> String {
    format!("Backup Timestamp: <t:{}:f>", timestamp)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// Reads every file that exists. Missing or unreadable files are logged and skipped.
pub async fn collect_backup_files(paths: &[PathBuf]) -> Vec<BackupFile> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match tokio::fs::read(path).await {
            Ok(bytes) => files.push(BackupFile {
                name: file_name(path),
                bytes,
            }),
            Err(err) => warn!(path = %path.display(), error = %err, "Backup file not found, skipping"),
        }
    }
    files
}

// Webhook payload with the message and one attachment per file.
pub fn build_form(timestamp: i64, files: Vec<BackupFile>) -> Form {
    let payload = serde_json::json!({ "content": backup_message(timestamp) });
    let mut form = Form::new().text("payload_json", payload.to_string());
    for (index, file) in files.into_iter().enumerate() {
        form = form.part(
            format!("files[{}]", index),
            Part::bytes(file.bytes).file_name(file.name),
        );
    }
    form
}

pub async fn send_backup(client: &reqwest::Client, webhook_url: &str, paths: &[PathBuf]) -> Result<usize> {
    let files = collect_backup_files(paths).await;
    let count = files.len();
    let form = build_form(Timestamp::now().unix_timestamp(), files);

    let response = client.post(webhook_url).multipart(form).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Backup(format!(
            "Failed to send backup. HTTP Status Code: {}",
            status.as_u16()
        )));
    }
    Ok(count)
}

// Uploads the configured files on every interval tick, starting immediately.
pub async fn run_backups(webhook_url: String, paths: Vec<PathBuf>, period: Duration) {
    let client = reqwest::Client::new();
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match send_backup(&client, &webhook_url, &paths).await {
            Ok(files) => info!(files, next_in_secs = period.as_secs(), "Backup sent"),
            Err(err) => error!(error = %err, "Backup failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use crate::watchdog::backup::{BackupFile, backup_message, collect_backup_files};

    #[test]
    fn test_backup_message() {
        assert_eq!(
            backup_message(1_700_000_000),
            "Backup Timestamp: <t:1700000000:f>"
        );
    }

    #[tokio::test]
    async fn test_collect_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        let mut existing = NamedTempFile::new_in(dir.path()).unwrap();
        existing.write_all(b"sqlite").unwrap();
        let missing = dir.path().join("missing.db");

        let files = collect_backup_files(&[missing, existing.path().to_path_buf()]).await;

        let expected_name = existing
            .path()
            .file_name()
            .unwrap()
            .to_string_lossy()
            .into_owned();
        assert_eq!(
            files,
            vec![BackupFile {
                name: expected_name,
                bytes: b"sqlite".to_vec(),
            }]
        );
    }

    #[tokio::test]
    async fn test_collect_without_files() {
        let dir = TempDir::new().unwrap();

        let files = collect_backup_files(&[dir.path().join("a.db"), dir.path().join("b.db")]).await;

        assert_eq!(files.is_empty(), true);
    }
}
