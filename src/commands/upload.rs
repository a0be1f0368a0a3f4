//! `nido upload`: push a document to the media endpoint.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::nursery::NurseryApi;
use crate::spinner::spinner_hooks;

pub async fn upload(api: &NurseryApi, file: &Path, child: Option<i64>) -> Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("could not read {}", file.display()))?;
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document")
        .to_string();

    let record = api
        .upload_document(&filename, bytes, child, spinner_hooks("uploading"))
        .await?;

    match record.get("url").and_then(Value::as_str) {
        Some(url) => println!("✓ uploaded {filename}: {url}"),
        None => println!("✓ uploaded {filename}"),
    }
    Ok(())
}
