use crate::config::Config;
use crate::constants::X_AMZ_REQUEST_ID;
use crate::credential::Credential;
use crate::error::ServiceError;
use crate::model::*;
use crate::resource::{ListOptions, Resource};
use bytes::Bytes;
use cfront_core::{Context, Error, Result, Signer};
use http::header::{CONTENT_TYPE, ETAG, LOCATION};
use http::{HeaderMap, Method, Request, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;

/// Client for the CloudFront `2010-11-01` API.
///
/// Every operation answers `Ok(None)` instead of an error for non-success
/// statuses when `raise_errors` is disabled in [`Config`].
#[derive(Clone, Debug)]
pub struct Client {
    ctx: Context,
    signer: Signer<Credential>,
    endpoint: String,
    raise_errors: bool,
}

impl Client {
    /// Create a new client.
    pub fn new(ctx: Context, signer: Signer<Credential>, config: &Config) -> Self {
        Self {
            ctx,
            signer,
            endpoint: config.endpoint().to_string(),
            raise_errors: config.raise_errors,
        }
    }

    /// The base URL resources are resolved against.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether non-success statuses are returned as errors.
    pub fn raise_errors(&self) -> bool {
        self.raise_errors
    }

    /// Send a signed request for `resource`.
    ///
    /// A body is sent as `text/xml`. Success responses are returned as-is,
    /// other statuses become a [`ServiceError`] or `None` depending on `raise_errors`.
    pub async fn send(
        &self,
        method: Method,
        resource: &Resource,
        body: Option<Bytes>,
    ) -> Result<Option<Response<String>>> {
        let uri = resource.resolve(&self.endpoint)?;

        let mut builder = Request::builder().method(method.clone()).uri(uri);
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "text/xml");
        }
        let (mut parts, body) = builder.body(body.unwrap_or_default())?.into_parts();
        self.signer.sign(&mut parts).await?;

        debug!("sending {method} {}", parts.uri);
        let resp = self
            .ctx
            .http_send_as_string(Request::from_parts(parts, body))
            .await
            .map_err(|e| {
                e.with_context(format!("method: {method}"))
                    .with_context(format!("resource: {}", resource.path()))
            })?;

        let status = resp.status();
        debug!("got {status} for {method} {}", resource.path());
        if status.is_success() {
            return Ok(Some(resp));
        }

        let request_id = resp
            .headers()
            .get(X_AMZ_REQUEST_ID)
            .and_then(|v| v.to_str().ok());
        let err = ServiceError::parse(status, resp.body(), request_id);
        if !self.raise_errors {
            warn!("{method} {} failed: {err}", resource.path());
            return Ok(None);
        }

        Err(err
            .into_error()
            .with_context(format!("method: {method}"))
            .with_context(format!("resource: {}", resource.path())))
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        resource: &Resource,
        body: Option<Bytes>,
    ) -> Result<Option<(T, HeaderMap)>> {
        let Some(resp) = self.send(method, resource, body).await? else {
            return Ok(None);
        };
        let (parts, body) = resp.into_parts();
        let value = from_xml(&body)
            .map_err(|e| e.with_context(format!("resource: {}", resource.path())))?;
        Ok(Some((value, parts.headers)))
    }

    /// List distributions, one page at a time.
    pub async fn list_distributions(&self, opts: &ListOptions) -> Result<Option<DistributionList>> {
        let resource = Resource::distributions().with_list_options(opts);
        Ok(self
            .fetch(Method::GET, &resource, None)
            .await?
            .map(|(list, _)| list))
    }

    /// Get a distribution along with its config and `ETag`.
    pub async fn get_distribution(&self, id: &str) -> Result<Option<Distribution>> {
        let resource = Resource::distribution(id)?;
        Ok(self
            .fetch::<Distribution>(Method::GET, &resource, None)
            .await?
            .map(|(mut dist, headers)| {
                dist.etag = header_value(&headers, ETAG);
                dist
            }))
    }

    /// Get the bare config of a distribution along with its `ETag`.
    pub async fn get_distribution_config(&self, id: &str) -> Result<Option<DistributionConfig>> {
        let resource = Resource::distribution_config(id)?;
        Ok(self
            .fetch::<DistributionConfig>(Method::GET, &resource, None)
            .await?
            .map(|(mut config, headers)| {
                config.etag = header_value(&headers, ETAG);
                config
            }))
    }

    /// List invalidations of a distribution, one page at a time.
    pub async fn list_invalidations(
        &self,
        distribution_id: &str,
        opts: &ListOptions,
    ) -> Result<Option<InvalidationList>> {
        let resource = Resource::invalidations(distribution_id)?.with_list_options(opts);
        Ok(self
            .fetch(Method::GET, &resource, None)
            .await?
            .map(|(list, _)| list))
    }

    /// Get a single invalidation of a distribution.
    pub async fn get_invalidation(
        &self,
        distribution_id: &str,
        invalidation_id: &str,
    ) -> Result<Option<Invalidation>> {
        let resource = Resource::invalidation(distribution_id, invalidation_id)?;
        Ok(self
            .fetch(Method::GET, &resource, None)
            .await?
            .map(|(inv, _)| inv))
    }

    /// Submit a new invalidation batch.
    ///
    /// The returned invalidation carries the `Location` of the new resource.
    pub async fn create_invalidation(
        &self,
        distribution_id: &str,
        batch: &InvalidationBatch,
    ) -> Result<Option<Invalidation>> {
        if batch.paths.is_empty() {
            return Err(Error::request_invalid("invalidation batch must contain at least one path")
                .with_context(format!("distribution_id: {distribution_id}")));
        }
        if batch.caller_reference.is_empty() {
            return Err(Error::request_invalid("invalidation batch must have a caller reference")
                .with_context(format!("distribution_id: {distribution_id}")));
        }

        let resource = Resource::invalidations(distribution_id)?;
        let body = Bytes::from(batch.to_xml()?);
        Ok(self
            .fetch::<Invalidation>(Method::POST, &resource, Some(body))
            .await?
            .map(|(mut inv, headers)| {
                inv.location = header_value(&headers, LOCATION);
                inv
            }))
    }
}

fn header_value(headers: &HeaderMap, name: http::header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
