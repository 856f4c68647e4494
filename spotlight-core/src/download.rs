use std::path::{Path, PathBuf};

use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::Response;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::error::SpotlightError;
use crate::models::Photo;

const NAME_PREFIX: &str = "spotlight_";
const NAME_SUFFIX: &str = "_unsplash";
const PART_SUFFIX: &str = ".part";
/// Filename limit in bytes on common filesystems.
const MAX_NAME_BYTES: usize = 255;

/// `spotlight_{alt description}{id}_unsplash`, plus an extension when the
/// image content type is known. The alt description is shortened so the
/// name, including the `.part` suffix used while downloading, fits in
/// [`MAX_NAME_BYTES`].
pub fn download_file_name(photo: &Photo, content_type: Option<&str>) -> String {
    let id = sanitize(&photo.id);
    let ext = content_type.and_then(extension_for);
    let fixed = NAME_PREFIX.len()
        + id.len()
        + NAME_SUFFIX.len()
        + ext.map_or(0, |ext| ext.len() + 1)
        + PART_SUFFIX.len();
    let alt = photo
        .alt_description
        .as_deref()
        .map(sanitize)
        .unwrap_or_default();
    let alt = truncate_at_char_boundary(&alt, MAX_NAME_BYTES.saturating_sub(fixed));

    let mut name = format!("{NAME_PREFIX}{alt}{id}{NAME_SUFFIX}");
    if let Some(ext) = ext {
        name.push('.');
        name.push_str(ext);
    }
    name
}

fn truncate_at_char_boundary(value: &str, max_bytes: usize) -> &str {
    if value.len() <= max_bytes {
        return value;
    }
    let mut end = max_bytes;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

fn extension_for(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next()?.trim();
    match mime.to_ascii_lowercase().as_str() {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/webp" => Some("webp"),
        "image/avif" => Some("avif"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

pub(crate) fn content_type(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
}

fn part_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(PART_SUFFIX);
    PathBuf::from(os)
}

/// Streams the response body to `path` through a `.part` file that is
/// renamed once complete. Returns the number of bytes written.
pub async fn write_stream(response: Response, path: &Path) -> Result<u64, SpotlightError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let part = part_path(path);
    match stream_into(response, &part).await {
        Ok(written) => {
            tokio::fs::rename(&part, path).await?;
            debug!(bytes = written, path = %path.display(), "download complete");
            Ok(written)
        }
        Err(e) => {
            if let Err(remove_err) = tokio::fs::remove_file(&part).await {
                warn!(error = %remove_err, path = %part.display(), "failed to remove partial download");
            }
            Err(e)
        }
    }
}

async fn stream_into(response: Response, part: &Path) -> Result<u64, SpotlightError> {
    let mut file = tokio::fs::File::create(part).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk: Bytes = chunk?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
