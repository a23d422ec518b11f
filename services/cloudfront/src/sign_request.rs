use crate::credential::Credential;
use async_trait::async_trait;
use cfront_core::hash::base64_hmac_sha1;
use cfront_core::time::{format_http_date, now, parse_http_date, DateTime};
use cfront_core::{Context, Result, SignRequest};
use http::header::{AUTHORIZATION, DATE};
use http::HeaderValue;
use log::debug;

/// RequestSigner for the legacy AWS signature used by CloudFront `2010-11-01`.
///
/// The string to sign is the `Date` header alone:
///
/// ```text
/// Date: Tue, 01 Mar 2011 12:00:00 GMT
/// Authorization: AWS <access_key_id>:<base64(hmac_sha1(secret_access_key, date))>
/// ```
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer that signs with the current time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign every request with the given time instead of the current time.
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Sign every request with the given RFC 1123 date, e.g. `Tue, 01 Mar 2011 12:00:00 GMT`.
    pub fn with_date(self, date: &str) -> Result<Self> {
        Ok(self.with_time(parse_http_date(date)?))
    }

    fn get_time(&self) -> DateTime {
        self.time.unwrap_or_else(now)
    }

    /// Build the `Authorization` header value for the given date string.
    pub fn authorization(cred: &Credential, date: &str) -> String {
        let signature = base64_hmac_sha1(cred.secret_access_key.as_bytes(), date.as_bytes());
        format!("AWS {}:{}", cred.access_key_id, signature)
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _: &Context,
        req: &mut http::request::Parts,
        credential: &Self::Credential,
    ) -> Result<()> {
        let date = format_http_date(self.get_time());
        debug!("signing {} {} with date {date}", req.method, req.uri.path());

        let mut authorization: HeaderValue = Self::authorization(credential, &date).parse()?;
        authorization.set_sensitive(true);

        req.headers.insert(DATE, date.parse()?);
        req.headers.insert(AUTHORIZATION, authorization);

        Ok(())
    }
}
