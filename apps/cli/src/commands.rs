//! CLI command implementations

use crate::output;
use crate::progress::BatchProgress;
use crate::OutputFormat;
use anyhow::{bail, Context, Result};
use modget_core::{BatchOptions, Resolver};
use modget_types::{ModId, ResolverConfig};
use std::path::Path;
use tracing::{debug, info};

/// Everything the download command needs besides resolver settings
pub struct DownloadRequest<'a> {
    /// Raw `--mod-ids` value
    pub mod_ids: &'a str,
    pub output_dir: &'a Path,
    pub keep_going: bool,
    pub dry_run: bool,
    pub show_progress: bool,
}

pub async fn download_mods(
    settings: &ResolverConfig,
    request: DownloadRequest<'_>,
    format: OutputFormat,
) -> Result<()> {
    if !request.dry_run {
        std::fs::create_dir_all(request.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                request.output_dir.display()
            )
        })?;
    }

    let mod_ids = ModId::parse_list(request.mod_ids);
    debug!("Lookup: {}, CDN: {}", settings.lookup_url, settings.cdn_url);
    info!("Processing {} mod(s)", mod_ids.len());

    let resolver = Resolver::new(settings).context("Failed to set up HTTP client")?;
    let options = BatchOptions {
        keep_going: request.keep_going,
        dry_run: request.dry_run,
    };

    let progress = if request.show_progress && !mod_ids.is_empty() {
        BatchProgress::new(mod_ids.len())
    } else {
        BatchProgress::hidden()
    };

    let report = resolver
        .run_batch_with(&mod_ids, request.output_dir, options, |event| {
            progress.handle_event(event)
        })
        .await;
    progress.finish();

    output::print_report(&report, format)?;

    if report.aborted {
        bail!("Stopped after a fatal error: {}", report);
    }
    if !report.is_success() {
        bail!("{} mod(s) failed", report.failed_count());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings_for(server: &MockServer) -> ResolverConfig {
        ResolverConfig {
            lookup_url: format!("{}/lookup", server.uri()),
            cdn_url: format!("{}/files", server.uri()),
            ..Default::default()
        }
    }

    fn request<'a>(mod_ids: &'a str, output_dir: &'a Path, dry_run: bool) -> DownloadRequest<'a> {
        DownloadRequest {
            mod_ids,
            output_dir,
            keep_going: false,
            dry_run,
            show_progress: false,
        }
    }

    async fn mount_lookup(server: &MockServer, mod_id: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/lookup/{}", mod_id)))
            .respond_with(template)
            .mount(server)
            .await;
    }

    const RESOLVABLE_PAGE: &str = r#"<a class="text-white" href="/hytale/mods/overstacked">Overstacked</a>
        <table class="table"><caption>Latest version information</caption>
        <tbody><tr><td>Overstacked.jar</td><td></td><td></td>
        <td><div class="cf-install-button"><a href="install?fileId=7453942">Install</a></div></td></tr></tbody>
        </table>"#;

    #[tokio::test]
    async fn test_empty_list_creates_output_dir() {
        let server = MockServer::start().await;
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("nested").join("mods");

        let result = download_mods(
            &settings_for(&server),
            request("", &out, false),
            OutputFormat::Human,
        )
        .await;

        assert!(result.is_ok());
        assert!(out.is_dir());
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dry_run_leaves_output_dir_absent() {
        let server = MockServer::start().await;
        let root = tempfile::tempdir().unwrap();
        let out = root.path().join("mods");

        mount_lookup(
            &server,
            "42",
            ResponseTemplate::new(200).set_body_string(RESOLVABLE_PAGE),
        )
        .await;

        let result = download_mods(
            &settings_for(&server),
            request("42", &out, true),
            OutputFormat::Json,
        )
        .await;

        assert!(result.is_ok());
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn test_missing_table_returns_error() {
        let server = MockServer::start().await;
        let out = tempfile::tempdir().unwrap();

        mount_lookup(
            &server,
            "broken",
            ResponseTemplate::new(200)
                .set_body_string(r#"<a class="text-white" href="/mods/broken">Broken</a>"#),
        )
        .await;

        let err = download_mods(
            &settings_for(&server),
            request("broken", out.path(), false),
            OutputFormat::Table,
        )
        .await
        .unwrap_err();

        assert!(err.to_string().contains("Stopped after a fatal error"));
    }

    #[tokio::test]
    async fn test_failed_mod_with_keep_going_returns_error() {
        let server = MockServer::start().await;
        let out = tempfile::tempdir().unwrap();

        mount_lookup(
            &server,
            "broken",
            ResponseTemplate::new(200)
                .set_body_string(r#"<a class="text-white" href="/mods/broken">Broken</a>"#),
        )
        .await;
        mount_lookup(&server, "gone", ResponseTemplate::new(404)).await;

        let request = DownloadRequest {
            keep_going: true,
            ..request("broken,gone", out.path(), false)
        };
        let err = download_mods(&settings_for(&server), request, OutputFormat::Human)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "1 mod(s) failed");
    }

    #[tokio::test]
    async fn test_lookup_404_is_not_an_error() {
        let server = MockServer::start().await;
        let out = tempfile::tempdir().unwrap();

        mount_lookup(&server, "404404", ResponseTemplate::new(404)).await;

        let result = download_mods(
            &settings_for(&server),
            request("404404", out.path(), false),
            OutputFormat::Human,
        )
        .await;

        assert!(result.is_ok());
        assert!(std::fs::read_dir(out.path()).unwrap().next().is_none());
    }
}
