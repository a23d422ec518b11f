//! [`HttpSend`] implementation backed by [`reqwest`].
//!
//! Timeouts and proxies are properties of the [`reqwest::Client`] passed in;
//! retry-with-backoff is layered on top via [`backon`].

use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use bytes::Bytes;
use cfront_core::{Error, HttpSend, Result};
use http::{HeaderMap, Method, StatusCode, Uri, Version};
use http_body_util::BodyExt;
use log::{debug, warn};
use reqwest::{Client, Request};
use std::fmt;

/// HttpSend that sends requests through a `reqwest::Client`.
#[derive(Debug, Default, Clone)]
pub struct ReqwestHttpSend {
    client: Client,
    retry: Option<ExponentialBuilder>,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            retry: None,
        }
    }

    /// Retry connection failures, timeouts and 5xx gateway statuses with the given backoff.
    ///
    /// The last response is returned as-is once the backoff is exhausted.
    pub fn with_retry(mut self, backoff: ExponentialBuilder) -> Self {
        self.retry = Some(backoff);
        self
    }

    async fn send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let req = Request::try_from(req)
            .map_err(|e| Error::request_invalid("failed to convert request").with_source(e))?;
        debug!("sending request: {} {}", req.method(), req.url());

        let resp: http::Response<_> = self
            .client
            .execute(req)
            .await
            .map_err(|e| {
                let retryable = e.is_timeout() || e.is_connect();
                Error::unexpected("failed to send http request")
                    .with_source(e)
                    .set_retryable(retryable)
            })?
            .into();

        let (parts, body) = resp.into_parts();
        let bs = BodyExt::collect(body)
            .await
            .map(|buf| buf.to_bytes())
            .map_err(|e| {
                Error::unexpected("failed to read response body")
                    .with_source(e)
                    .set_retryable(true)
            })?;
        debug!("got response: {} ({} bytes)", parts.status, bs.len());

        Ok(http::Response::from_parts(parts, bs))
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        let Some(backoff) = self.retry else {
            return self.send(req).await;
        };

        let (parts, body) = req.into_parts();
        let template = Template {
            method: parts.method,
            uri: parts.uri,
            version: parts.version,
            headers: parts.headers,
        };

        let (template, body) = (&template, &body);
        let outcome = (|| async move {
            match self.send(template.build(body.clone())).await {
                Ok(resp) if is_retryable_status(resp.status()) => Err(Attempt::Status(resp)),
                Ok(resp) => Ok(resp),
                Err(err) => Err(Attempt::Failed(err)),
            }
        })
        .retry(backoff)
        .when(Attempt::is_retryable)
        .notify(|attempt, dur| warn!("retrying {} after {dur:?}: {attempt}", template.uri))
        .await;

        match outcome {
            Ok(resp) | Err(Attempt::Status(resp)) => Ok(resp),
            Err(Attempt::Failed(err)) => Err(err),
        }
    }
}

/// Statuses worth another attempt: the request never reached a healthy backend.
fn is_retryable_status(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

struct Template {
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
}

impl Template {
    fn build(&self, body: Bytes) -> http::Request<Bytes> {
        let mut req = http::Request::new(body);
        *req.method_mut() = self.method.clone();
        *req.uri_mut() = self.uri.clone();
        *req.version_mut() = self.version;
        *req.headers_mut() = self.headers.clone();
        req
    }
}

enum Attempt {
    Status(http::Response<Bytes>),
    Failed(Error),
}

impl Attempt {
    fn is_retryable(&self) -> bool {
        match self {
            Attempt::Status(_) => true,
            Attempt::Failed(err) => err.is_retryable(),
        }
    }
}

impl fmt::Display for Attempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attempt::Status(resp) => write!(f, "response status {}", resp.status()),
            Attempt::Failed(err) => write!(f, "{err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_retryable_status() {
        assert!(is_retryable_status(StatusCode::SERVICE_UNAVAILABLE));
        assert!(is_retryable_status(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(!is_retryable_status(StatusCode::OK));
        assert!(!is_retryable_status(StatusCode::NOT_FOUND));
        assert!(!is_retryable_status(StatusCode::FORBIDDEN));
    }

    #[test]
    fn test_attempt_is_retryable() {
        let resp = http::Response::builder()
            .status(StatusCode::BAD_GATEWAY)
            .body(Bytes::new())
            .expect("response must be valid");
        assert!(Attempt::Status(resp).is_retryable());

        assert!(Attempt::Failed(Error::unexpected("timeout").set_retryable(true)).is_retryable());
        assert!(!Attempt::Failed(Error::request_invalid("bad uri")).is_retryable());
    }

    #[test]
    fn test_template_build() {
        let mut headers = HeaderMap::new();
        headers.insert("date", "Tue, 01 Mar 2011 12:00:00 GMT".parse().unwrap());
        let template = Template {
            method: Method::POST,
            uri: "https://cloudfront.amazonaws.com/2010-11-01/distribution/E1/invalidation"
                .parse()
                .unwrap(),
            version: Version::HTTP_11,
            headers,
        };

        let req = template.build(Bytes::from_static(b"<InvalidationBatch/>"));
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.uri().path(), "/2010-11-01/distribution/E1/invalidation");
        assert_eq!(req.headers()["date"], "Tue, 01 Mar 2011 12:00:00 GMT");
        assert_eq!(req.body().as_ref(), b"<InvalidationBatch/>");
    }

    /// Serve one canned status per connection, repeating the last one.
    ///
    /// Returns the base url and the number of requests seen.
    async fn serve(statuses: &'static [u16]) -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let idx = counter.fetch_add(1, Ordering::SeqCst);
                let status = statuses[idx.min(statuses.len() - 1)];
                tokio::spawn(async move {
                    let mut head = Vec::new();
                    let mut buf = [0u8; 1024];
                    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                        match stream.read(&mut buf).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => head.extend_from_slice(&buf[..n]),
                        }
                    }
                    let resp = format!(
                        "HTTP/1.1 {status} Canned\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
                    );
                    let _ = stream.write_all(resp.as_bytes()).await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        (format!("http://{addr}"), hits)
    }

    fn retrying_send(max_times: usize) -> ReqwestHttpSend {
        let client = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .expect("client must build");
        ReqwestHttpSend::new(client).with_retry(
            ExponentialBuilder::default()
                .with_min_delay(Duration::from_millis(1))
                .with_max_delay(Duration::from_millis(10))
                .with_max_times(max_times),
        )
    }

    fn get(base: &str) -> http::Request<Bytes> {
        http::Request::get(format!("{base}/2010-11-01/distribution"))
            .body(Bytes::new())
            .unwrap()
    }

    #[tokio::test]
    async fn test_retry_until_success() {
        let _ = env_logger::builder().is_test(true).try_init();

        let (base, hits) = serve(&[503, 503, 200]).await;
        let resp = retrying_send(3).http_send(get(&base)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_exhausted_returns_last_response() {
        let _ = env_logger::builder().is_test(true).try_init();

        let (base, hits) = serve(&[503, 503, 200]).await;
        let resp = retrying_send(1).http_send(get(&base)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let (base, hits) = serve(&[404, 200]).await;
        let resp = retrying_send(3).http_send(get(&base)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_without_retry_sends_once() {
        let (base, hits) = serve(&[503, 200]).await;
        let send = ReqwestHttpSend::new(Client::new());
        let resp = send.http_send(get(&base)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_is_retried_then_reported() {
        let _ = env_logger::builder().is_test(true).try_init();

        // Accept connections but never answer.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_secs(10)).await;
                    drop(stream);
                });
            }
        });

        let err = retrying_send(2)
            .http_send(get(&format!("http://{addr}")))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), cfront_core::ErrorKind::Unexpected);
        assert!(err.is_retryable());
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }
}
