use url::Url;

use crate::error::Result;
use crate::request::QueryParams;
use crate::sources::check_endpoint;

/// Append the query parameters to an endpoint.
///
/// Existing query parameters on `endpoint` are kept; ours are appended after them.
pub fn query_url(endpoint: &str, params: &QueryParams) -> Result<Url> {
    check_endpoint(endpoint)?;
    let mut url = Url::parse(endpoint)?;
    url.query_pairs_mut().extend_pairs(params.to_pairs());
    Ok(url)
}
