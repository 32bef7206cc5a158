//! Shared types for modget
//!
//! This crate contains the data structures passed between the
//! resolver core and the CLI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================================
// Identifier Types
// ============================================================================

/// Opaque mod identifier on the lookup service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModId(String);

impl ModId {
    /// Create a mod ID, trimming whitespace. Returns `None` for empty input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Split a comma-separated list, dropping empty entries
    pub fn parse_list(raw: &str) -> Vec<ModId> {
        raw.split(',').filter_map(ModId::new).collect()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The latest release file advertised for a mod
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Release filename, also used as the on-disk name
    pub display_name: String,
    /// File ID exactly as scraped, before any correction
    pub raw_file_id: String,
}

/// A file ID split into the two directories used by the CDN
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdnPath {
    pub segment_a: String,
    pub segment_b: String,
}

impl fmt::Display for CdnPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.segment_a, self.segment_b)
    }
}

// ============================================================================
// Outcome Types
// ============================================================================

/// Why a mod was skipped without failing the batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason", content = "status")]
pub enum SkipReason {
    /// Lookup page answered with something other than 200
    LookupStatus(u16),
    /// Latest release row has no install link to take a file ID from
    NoInstallLink,
    /// CDN answered with something other than 200
    DownloadStatus(u16),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::LookupStatus(code) => write!(f, "lookup returned HTTP {}", code),
            SkipReason::NoInstallLink => f.write_str("no install link on lookup page"),
            SkipReason::DownloadStatus(code) => write!(f, "download returned HTTP {}", code),
        }
    }
}

/// Final state of a single mod
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Downloaded,
    Resolved,
    Skipped,
    Failed,
}

/// Result of running the pipeline for one mod ID
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModOutcome {
    pub mod_id: ModId,
    pub status: OutcomeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mod_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModOutcome {
    fn new(mod_id: ModId, status: OutcomeStatus) -> Self {
        Self {
            mod_id,
            status,
            mod_name: None,
            file_name: None,
            url: None,
            path: None,
            bytes: None,
            skip_reason: None,
            error: None,
        }
    }

    pub fn downloaded(mod_id: ModId, url: String, path: PathBuf, bytes: u64) -> Self {
        Self {
            url: Some(url),
            path: Some(path),
            bytes: Some(bytes),
            ..Self::new(mod_id, OutcomeStatus::Downloaded)
        }
    }

    pub fn resolved(mod_id: ModId, url: String) -> Self {
        Self {
            url: Some(url),
            ..Self::new(mod_id, OutcomeStatus::Resolved)
        }
    }

    pub fn skipped(mod_id: ModId, reason: SkipReason) -> Self {
        Self {
            skip_reason: Some(reason),
            ..Self::new(mod_id, OutcomeStatus::Skipped)
        }
    }

    pub fn failed(mod_id: ModId, error: String) -> Self {
        Self {
            error: Some(error),
            ..Self::new(mod_id, OutcomeStatus::Failed)
        }
    }

    pub fn with_mod_name(mut self, name: impl Into<String>) -> Self {
        self.mod_name = Some(name.into());
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Summary of a whole run over a list of mod IDs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub outcomes: Vec<ModOutcome>,
    /// Set when a fatal error stopped the run before every ID was processed
    pub aborted: bool,
}

impl BatchReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            outcomes: Vec::new(),
            aborted: false,
        }
    }

    pub fn push(&mut self, outcome: ModOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    fn count(&self, status: OutcomeStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    pub fn downloaded_count(&self) -> usize {
        self.count(OutcomeStatus::Downloaded)
    }

    pub fn resolved_count(&self) -> usize {
        self.count(OutcomeStatus::Resolved)
    }

    pub fn skipped_count(&self) -> usize {
        self.count(OutcomeStatus::Skipped)
    }

    pub fn failed_count(&self) -> usize {
        self.count(OutcomeStatus::Failed)
    }

    /// True when nothing failed and the run was not cut short
    pub fn is_success(&self) -> bool {
        !self.aborted && self.failed_count() == 0
    }
}

impl Default for BatchReport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} downloaded, {} resolved, {} skipped, {} failed",
            self.downloaded_count(),
            self.resolved_count(),
            self.skipped_count(),
            self.failed_count()
        )?;
        if self.aborted {
            f.write_str(" (aborted)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Settings Types
// ============================================================================

pub const DEFAULT_LOOKUP_URL: &str = "https://cflookup.com";
pub const DEFAULT_CDN_URL: &str = "https://mediafilez.forgecdn.net/files";

/// Endpoints and HTTP client settings for the resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Base of the lookup page, the mod ID is appended as a path segment
    pub lookup_url: String,
    /// Base of the CDN file tree
    pub cdn_url: String,
    pub user_agent: String,
    /// None = no connect timeout
    pub connect_timeout_secs: Option<u64>,
    /// None = no overall request timeout
    pub timeout_secs: Option<u64>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lookup_url: DEFAULT_LOOKUP_URL.to_string(),
            cdn_url: DEFAULT_CDN_URL.to_string(),
            user_agent: format!("modget/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout_secs: None,
            timeout_secs: None,
        }
    }
}

/// Severity names accepted on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            // tracing has no level above error
            LogLevel::Error | LogLevel::Critical => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            "CRITICAL" => Ok(LogLevel::Critical),
            other => Err(format!("Unknown log level: {}", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}
