//! Lookup page fetching

use crate::endpoints;
use crate::error::ModgetError;
use modget_types::ModId;
use reqwest::{Client, StatusCode};
use tracing::debug;
use url::Url;

/// Raw lookup response
#[derive(Debug, Clone)]
pub struct LookupResponse {
    pub status: StatusCode,
    pub body: String,
}

impl LookupResponse {
    /// Only an exact 200 carries a usable page
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }
}

/// GET the lookup page for a mod
///
/// Non-200 statuses are returned, not raised; transport failures are errors.
pub async fn fetch_lookup_page(
    client: &Client,
    base: &Url,
    mod_id: &ModId,
) -> Result<LookupResponse, ModgetError> {
    let url = endpoints::lookup_url(base, mod_id.as_str())?;
    debug!("Fetching lookup page {}", url);

    let response = client.get(url).send().await?;
    let status = response.status();
    debug!("Lookup response for {}: {}", mod_id, status);

    let body = if status == StatusCode::OK {
        response.text().await?
    } else {
        String::new()
    };

    Ok(LookupResponse { status, body })
}
