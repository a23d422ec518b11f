use crate::constants::{API_VERSION, URI_ENCODE_SET};
use cfront_core::{Error, Result};
use http::Uri;
use percent_encoding::utf8_percent_encode;

/// Paging options accepted by the list operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Start listing after this marker, usually the `next_marker` of a previous page.
    pub marker: Option<String>,
    /// Maximum number of items in one page.
    pub max_items: Option<u32>,
}

impl ListOptions {
    /// Create empty list options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    /// Set the max items.
    pub fn with_max_items(mut self, max_items: u32) -> Self {
        self.max_items = Some(max_items);
        self
    }
}

/// A relative API path plus optional query parameters.
///
/// Resources are resolved against the configured endpoint right before sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    path: String,
    query: Vec<(String, String)>,
}

impl Resource {
    /// Create a resource from an already escaped relative path such as
    /// `2010-11-01/distribution/E1/invalidation`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// `2010-11-01/distribution`
    pub fn distributions() -> Self {
        Self::new(format!("{API_VERSION}/distribution"))
    }

    /// `2010-11-01/distribution/<id>`
    pub fn distribution(id: &str) -> Result<Self> {
        Ok(Self::new(format!(
            "{API_VERSION}/distribution/{}",
            escape_segment("distribution id", id)?
        )))
    }

    /// `2010-11-01/distribution/<id>/config`
    pub fn distribution_config(id: &str) -> Result<Self> {
        let mut resource = Self::distribution(id)?;
        resource.path.push_str("/config");
        Ok(resource)
    }

    /// `2010-11-01/distribution/<id>/invalidation`
    pub fn invalidations(distribution_id: &str) -> Result<Self> {
        let mut resource = Self::distribution(distribution_id)?;
        resource.path.push_str("/invalidation");
        Ok(resource)
    }

    /// `2010-11-01/distribution/<id>/invalidation/<invalidation_id>`
    pub fn invalidation(distribution_id: &str, invalidation_id: &str) -> Result<Self> {
        let mut resource = Self::invalidations(distribution_id)?;
        resource.path.push('/');
        resource
            .path
            .push_str(&escape_segment("invalidation id", invalidation_id)?);
        Ok(resource)
    }

    /// Append a query parameter. Keys and values are escaped on resolve.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append `Marker` and `MaxItems` if they are set.
    pub fn with_list_options(mut self, opts: &ListOptions) -> Self {
        if let Some(marker) = &opts.marker {
            self = self.with_query("Marker", marker);
        }
        if let Some(max_items) = opts.max_items {
            self = self.with_query("MaxItems", max_items.to_string());
        }
        self
    }

    /// The relative path of this resource.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Resolve this resource against a base URL like `https://cloudfront.amazonaws.com/`.
    ///
    /// The base URL is treated as a directory whether or not it ends with `/`.
    pub fn resolve(&self, endpoint: &str) -> Result<Uri> {
        let base: Uri = endpoint.parse().map_err(|e| {
            Error::config_invalid("endpoint is not a valid url")
                .with_source(e)
                .with_context(format!("endpoint: {endpoint}"))
        })?;
        if base.scheme().is_none() || base.authority().is_none() {
            return Err(Error::config_invalid("endpoint must be an absolute url")
                .with_context(format!("endpoint: {endpoint}")));
        }
        if base.query().is_some() {
            return Err(Error::config_invalid("endpoint must not carry a query")
                .with_context(format!("endpoint: {endpoint}")));
        }

        let mut url = endpoint.to_string();
        if !url.ends_with('/') {
            url.push('/');
        }
        url.push_str(self.path.trim_start_matches('/'));

        for (idx, (k, v)) in self.query.iter().enumerate() {
            url.push(if idx == 0 { '?' } else { '&' });
            url.extend(utf8_percent_encode(k, &URI_ENCODE_SET));
            url.push('=');
            url.extend(utf8_percent_encode(v, &URI_ENCODE_SET));
        }

        url.parse().map_err(|e| {
            Error::request_invalid("resource does not form a valid url")
                .with_source(e)
                .with_context(format!("url: {url}"))
        })
    }
}

fn escape_segment(name: &str, value: &str) -> Result<String> {
    if value.is_empty() {
        return Err(Error::request_invalid(format!("{name} must not be empty")));
    }
    Ok(utf8_percent_encode(value, &URI_ENCODE_SET).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfront_core::ErrorKind;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case("https://cloudfront.amazonaws.com/"; "with trailing slash")]
    #[test_case("https://cloudfront.amazonaws.com"; "without trailing slash")]
    fn test_resolve_distributions(endpoint: &str) -> Result<()> {
        let uri = Resource::distributions().resolve(endpoint)?;
        assert_eq!(
            uri.to_string(),
            "https://cloudfront.amazonaws.com/2010-11-01/distribution"
        );
        Ok(())
    }

    #[test]
    fn test_resolve_against_prefixed_endpoint() -> Result<()> {
        let uri = Resource::invalidations("EDFDVBD6EXAMPLE")?.resolve("http://127.0.0.1:9000/mock")?;
        assert_eq!(
            uri.to_string(),
            "http://127.0.0.1:9000/mock/2010-11-01/distribution/EDFDVBD6EXAMPLE/invalidation"
        );
        Ok(())
    }

    #[test]
    fn test_resource_paths() -> Result<()> {
        assert_eq!(
            Resource::distribution("EDFDVBD6EXAMPLE")?.path(),
            "2010-11-01/distribution/EDFDVBD6EXAMPLE"
        );
        assert_eq!(
            Resource::distribution_config("EDFDVBD6EXAMPLE")?.path(),
            "2010-11-01/distribution/EDFDVBD6EXAMPLE/config"
        );
        assert_eq!(
            Resource::invalidation("EDFDVBD6EXAMPLE", "IDFDVBD632BHDS5")?.path(),
            "2010-11-01/distribution/EDFDVBD6EXAMPLE/invalidation/IDFDVBD632BHDS5"
        );
        Ok(())
    }

    #[test]
    fn test_identifiers_are_escaped() -> Result<()> {
        let resource = Resource::distribution("../a b/c?d")?;
        assert_eq!(resource.path(), "2010-11-01/distribution/..%2Fa%20b%2Fc%3Fd");
        Ok(())
    }

    #[test]
    fn test_empty_identifier_is_rejected() {
        let err = Resource::distribution("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        let err = Resource::invalidation("EDFDVBD6EXAMPLE", "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_resolve_with_list_options() -> Result<()> {
        let opts = ListOptions::new()
            .with_marker("EMLARXS9 EXAMPLE/+")
            .with_max_items(2);
        let uri = Resource::distributions()
            .with_list_options(&opts)
            .resolve("https://cloudfront.amazonaws.com/")?;

        assert_eq!(uri.path(), "/2010-11-01/distribution");
        assert_eq!(
            uri.query(),
            Some("Marker=EMLARXS9%20EXAMPLE%2F%2B&MaxItems=2")
        );
        Ok(())
    }

    #[test]
    fn test_resolve_without_query_has_no_question_mark() -> Result<()> {
        let uri = Resource::distributions()
            .with_list_options(&ListOptions::default())
            .resolve("https://cloudfront.amazonaws.com/")?;
        assert_eq!(uri.query(), None);
        assert!(!uri.to_string().contains('?'));
        Ok(())
    }

    #[test_case("not a url"; "garbage")]
    #[test_case("/relative/path"; "relative")]
    #[test_case("https://cloudfront.amazonaws.com/?a=b"; "with query")]
    fn test_resolve_invalid_endpoint(endpoint: &str) {
        let err = Resource::distributions().resolve(endpoint).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
