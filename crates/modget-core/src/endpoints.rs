//! URL construction for the lookup service and the CDN

use crate::error::ModgetError;
use modget_types::CdnPath;
use url::Url;

/// Parse a configured base URL
pub fn parse_base(raw: &str) -> Result<Url, ModgetError> {
    let url = Url::parse(raw).map_err(|e| ModgetError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(ModgetError::InvalidUrl(raw.to_string()));
    }
    Ok(url)
}

/// Append path segments to a base URL, percent-encoding each one
pub fn join_segments(base: &Url, segments: &[&str]) -> Result<Url, ModgetError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ModgetError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `{lookup_base}/{mod_id}`
pub fn lookup_url(base: &Url, mod_id: &str) -> Result<Url, ModgetError> {
    join_segments(base, &[mod_id])
}

/// `{cdn_base}/{segment_a}/{segment_b}/{file_name}`
pub fn cdn_url(base: &Url, path: &CdnPath, file_name: &str) -> Result<Url, ModgetError> {
    join_segments(base, &[&path.segment_a, &path.segment_b, file_name])
}
