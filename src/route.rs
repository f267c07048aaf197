use url::Url;

use crate::error::{Result, SabaiError};
use crate::types::LocatedPoint;

/// Build a directions link from `origin` to `destination` on the map provider.
pub fn directions_url(
    base: &str,
    origin: LocatedPoint,
    destination: LocatedPoint,
) -> Result<Url> {
    origin.validate()?;
    destination.validate()?;

    let mut url = Url::parse(base)
        .map_err(|e| SabaiError::Config(format!("invalid directions url {base}: {e}")))?;
    url.query_pairs_mut()
        .append_pair("api", "1")
        .append_pair("origin", &origin.to_string())
        .append_pair("destination", &destination.to_string());
    Ok(url)
}
