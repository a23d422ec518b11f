//! Typed renditions of the XML documents exchanged with CloudFront.

mod distribution;
pub use distribution::*;

mod invalidation;
pub use invalidation::*;

use cfront_core::{Error, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer};

/// Status of a distribution or an invalidation.
///
/// Values this crate doesn't know about are kept verbatim in [`Status::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Status {
    /// `Deployed`: the distribution is live on every edge location.
    Deployed,
    /// `InProgress`: changes are still propagating.
    InProgress,
    /// `Completed`: the invalidation has finished.
    Completed,
    /// Any other status string.
    Other(String),
}

impl Status {
    /// The status string as sent by CloudFront.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Deployed => "Deployed",
            Status::InProgress => "InProgress",
            Status::Completed => "Completed",
            Status::Other(s) => s,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Other(String::new())
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Deployed" => Status::Deployed,
            "InProgress" => Status::InProgress,
            "Completed" => Status::Completed,
            _ => Status::Other(s),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deserialize a flag element like `<Self/>`: present means `true`.
///
/// Pair with `default` so a missing element means `false`.
fn present<'de, D>(d: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    IgnoredAny::deserialize(d).map(|_| true)
}

/// Deserialize `<Marker/>` and `<Marker></Marker>` as `None`.
fn non_empty<'de, D>(d: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.filter(|s| !s.is_empty()))
}

/// Parse a response body into `T`.
pub(crate) fn from_xml<T: DeserializeOwned>(body: &str) -> Result<T> {
    quick_xml::de::from_str(body).map_err(|e| {
        Error::unexpected("failed to parse response body")
            .with_source(e)
            .with_context(format!("expected: {}", std::any::type_name::<T>()))
    })
}
