use super::types::{Attachment, AttachmentData, Bucket};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

const SNIFF_BYTES: usize = 8192;
const FALLBACK_MIME: &str = "application/octet-stream";

#[must_use]
pub fn detect_mime(data: &[u8]) -> Option<String> {
    infer::get(data).map(|info| info.mime_type().to_string())
}

#[must_use]
pub fn detect_mime_from_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_lowercase().as_str() {
        "pdf" => Some("application/pdf".into()),
        "doc" => Some("application/msword".into()),
        "docx" => Some(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document".into(),
        ),
        "txt" => Some("text/plain".into()),
        "md" => Some("text/markdown".into()),
        "csv" => Some("text/csv".into()),
        "rtf" => Some("application/rtf".into()),
        "jpg" | "jpeg" => Some("image/jpeg".into()),
        "png" => Some("image/png".into()),
        _ => None,
    }
}

/// Magic bytes first, then the extension, then `application/octet-stream`.
#[must_use]
pub fn detect_media_type(header: &[u8], filename: &str) -> String {
    detect_mime(header)
        .or_else(|| detect_mime_from_extension(filename))
        .unwrap_or_else(|| FALLBACK_MIME.into())
}

/// Build an attachment candidate for `path` without reading the whole file.
pub async fn load_candidate(bucket: Bucket, path: &str) -> Result<Attachment> {
    let expanded = PathBuf::from(shellexpand::tilde(path).as_ref());
    let metadata = tokio::fs::metadata(&expanded)
        .await
        .with_context(|| format!("Failed to stat attachment: {}", expanded.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Attachment is not a regular file: {}", expanded.display());
    }

    let name = file_name(&expanded)?;
    let header = read_header(&expanded).await?;

    Ok(Attachment {
        mime_type: detect_media_type(&header, &name),
        name,
        size: metadata.len(),
        bucket,
        data: AttachmentData::File(expanded),
    })
}

fn file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("Attachment path has no file name: {}", path.display()))
}

async fn read_header(path: &Path) -> Result<Vec<u8>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open attachment: {}", path.display()))?;
    let mut header = Vec::with_capacity(SNIFF_BYTES);
    file.take(SNIFF_BYTES as u64)
        .read_to_end(&mut header)
        .await
        .with_context(|| format!("Failed to read attachment: {}", path.display()))?;
    Ok(header)
}
