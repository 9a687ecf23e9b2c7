use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Load one record per line from a JSONL file
///
/// Malformed lines are skipped with a log line rather than failing the
/// whole load, matching how a screen would tolerate a bad row in a mock
/// dataset.
pub async fn load_jsonl<T: DeserializeOwned>(path: &str) -> anyhow::Result<Vec<T>> {
    let file = File::open(path).await?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let mut records = Vec::new();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(err) => eprintln!("Invalid record skipped: {}", err),
        }
    }
    Ok(records)
}
