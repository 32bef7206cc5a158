//! Per-mod pipeline: fetch, parse, transform, download

use crate::download::{download_artifact, DownloadResult};
use crate::endpoints;
use crate::error::ModgetError;
use crate::file_id;
use crate::lookup::fetch_lookup_page;
use crate::parser::parse_lookup_page;
use modget_types::{CdnPath, FileRecord, ModId, ModOutcome, ResolverConfig, SkipReason};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use url::Url;

/// A mod whose CDN location is known
#[derive(Debug, Clone)]
pub struct ResolvedMod {
    pub mod_id: ModId,
    pub mod_name: String,
    pub file: FileRecord,
    pub cdn_path: CdnPath,
    pub url: Url,
}

/// Result of the lookup half of the pipeline
#[derive(Debug, Clone)]
pub enum Resolution {
    Ready(ResolvedMod),
    Skipped {
        mod_name: Option<String>,
        file_name: Option<String>,
        reason: SkipReason,
    },
}

/// Resolves mod IDs to CDN files and downloads them
#[derive(Debug, Clone)]
pub struct Resolver {
    client: Client,
    lookup_base: Url,
    cdn_base: Url,
}

impl Resolver {
    /// Create a resolver from configuration
    pub fn new(config: &ResolverConfig) -> Result<Self, ModgetError> {
        let lookup_base = endpoints::parse_base(&config.lookup_url)?;
        let cdn_base = endpoints::parse_base(&config.cdn_url)?;

        let mut builder = Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            lookup_base,
            cdn_base,
        })
    }

    /// Fetch and parse the lookup page, then work out the CDN URL
    pub async fn resolve(&self, mod_id: &ModId) -> Result<Resolution, ModgetError> {
        let response = fetch_lookup_page(&self.client, &self.lookup_base, mod_id).await?;
        if !response.is_ok() {
            error!(
                "Failed to retrieve lookup page for {}. Status code: {}",
                mod_id,
                response.status.as_u16()
            );
            return Ok(Resolution::Skipped {
                mod_name: None,
                file_name: None,
                reason: SkipReason::LookupStatus(response.status.as_u16()),
            });
        }

        let page = parse_lookup_page(&response.body)?;
        info!("Resolving mod {} ({})", page.mod_name, mod_id);

        let Some(file) = page.file_record() else {
            warn!("No install link for {} ({}), skipping", page.mod_name, mod_id);
            return Ok(Resolution::Skipped {
                mod_name: Some(page.mod_name),
                file_name: Some(page.file_name),
                reason: SkipReason::NoInstallLink,
            });
        };
        debug!("File ID: {}", file.raw_file_id);

        let cdn_path = file_id::to_cdn_path(&file.raw_file_id)?;
        let url = endpoints::cdn_url(&self.cdn_base, &cdn_path, &file.display_name)?;

        Ok(Resolution::Ready(ResolvedMod {
            mod_id: mod_id.clone(),
            mod_name: page.mod_name,
            file,
            cdn_path,
            url,
        }))
    }

    /// Run the whole pipeline for one mod
    ///
    /// With `dry_run` the pipeline stops once the CDN URL is known.
    pub async fn fetch_mod(
        &self,
        mod_id: &ModId,
        output_dir: &Path,
        dry_run: bool,
    ) -> Result<ModOutcome, ModgetError> {
        let resolved = match self.resolve(mod_id).await? {
            Resolution::Ready(resolved) => resolved,
            Resolution::Skipped {
                mod_name,
                file_name,
                reason,
            } => {
                let mut outcome = ModOutcome::skipped(mod_id.clone(), reason);
                outcome.mod_name = mod_name;
                outcome.file_name = file_name;
                return Ok(outcome);
            }
        };

        if dry_run {
            info!("Resolved {} to {}", resolved.mod_name, resolved.url);
            return Ok(ModOutcome::resolved(mod_id.clone(), resolved.url.to_string())
                .with_mod_name(resolved.mod_name)
                .with_file_name(resolved.file.display_name));
        }

        let result = download_artifact(
            &self.client,
            &resolved.url,
            output_dir,
            &resolved.file.display_name,
        )
        .await?;

        let outcome = match result {
            DownloadResult::Written { path, bytes } => {
                info!(
                    "Mod {} downloaded successfully as {}",
                    resolved.mod_name, resolved.file.display_name
                );
                ModOutcome::downloaded(mod_id.clone(), resolved.url.to_string(), path, bytes)
            }
            DownloadResult::Status(code) => {
                warn!(
                    "Download of {} from {} returned HTTP {}, skipping",
                    resolved.mod_name, resolved.url, code
                );
                ModOutcome::skipped(mod_id.clone(), SkipReason::DownloadStatus(code))
                    .with_url(resolved.url.to_string())
            }
        };

        Ok(outcome
            .with_mod_name(resolved.mod_name)
            .with_file_name(resolved.file.display_name))
    }
}
