//! Artifact download
//!
//! The whole body is buffered before anything touches the disk, so a
//! failed request never leaves a partial file behind.

use crate::error::ModgetError;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

/// What happened to a download request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadResult {
    /// File written, existing content replaced
    Written { path: PathBuf, bytes: u64 },
    /// Server answered with something other than 200; nothing written
    Status(u16),
}

/// GET `url` and write the body to `output_dir/file_name`
pub async fn download_artifact(
    client: &Client,
    url: &Url,
    output_dir: &Path,
    file_name: &str,
) -> Result<DownloadResult, ModgetError> {
    debug!("Download link: {}", url);

    let response = client.get(url.clone()).send().await?;
    let status = response.status();
    debug!("Download response status: {}", status);

    if status != StatusCode::OK {
        return Ok(DownloadResult::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    let path = output_dir.join(file_name);
    tokio::fs::write(&path, &body).await?;

    info!("Saved {} ({} bytes)", path.display(), body.len());

    Ok(DownloadResult::Written {
        path,
        bytes: body.len() as u64,
    })
}
