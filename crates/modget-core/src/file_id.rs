//! File ID correction and CDN path splitting
//!
//! The CDN stores files under `{first four digits}/{remaining digits}`,
//! e.g. file `7453942` lives at `7453/942/<name>`. The lookup site pads
//! some IDs with an extra `0` in the fifth position, which has to be
//! dropped before splitting.

use crate::error::ModgetError;
use modget_types::CdnPath;
use tracing::debug;

/// Length of the CDN prefix directory
const PREFIX_LEN: usize = 4;

/// Drop the padding zero at index 4, if present
///
/// Only that one position is known to be affected; other positions are
/// left untouched.
pub fn correct_file_id(raw: &str) -> Result<String, ModgetError> {
    validate(raw)?;

    if raw.as_bytes()[PREFIX_LEN] == b'0' {
        let corrected = format!("{}{}", &raw[..PREFIX_LEN], &raw[PREFIX_LEN + 1..]);
        debug!("File ID {} has a padding zero, adjusted to {}", raw, corrected);
        Ok(corrected)
    } else {
        Ok(raw.to_string())
    }
}

/// Correct a raw file ID and split it into CDN path segments
pub fn to_cdn_path(raw: &str) -> Result<CdnPath, ModgetError> {
    let corrected = correct_file_id(raw)?;
    let (segment_a, segment_b) = corrected.split_at(PREFIX_LEN);

    Ok(CdnPath {
        segment_a: segment_a.to_string(),
        segment_b: segment_b.to_string(),
    })
}

fn validate(raw: &str) -> Result<(), ModgetError> {
    if raw.len() <= PREFIX_LEN || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModgetError::MalformedFileId(raw.to_string()));
    }
    Ok(())
}
