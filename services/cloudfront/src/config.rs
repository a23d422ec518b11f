use super::constants::*;
use cfront_core::Context;
use std::time::Duration;

/// Config carries all the configuration for the CloudFront client.
#[derive(Clone, Debug)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_ACCESS_KEY_ID`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_SECRET_ACCESS_KEY`]
    pub secret_access_key: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AWS_CLOUDFRONT_ENDPOINT`]
    /// - default to [`DEFAULT_ENDPOINT`]
    pub endpoint: Option<String>,
    /// Return an error carrying the parsed error body on non-success statuses.
    ///
    /// When disabled, operations answer `Ok(None)` instead. Default to `true`.
    pub raise_errors: bool,
    /// Timeout of a single HTTP attempt. Default to 30 seconds.
    pub timeout: Option<Duration>,
    /// `proxy` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HTTPS_PROXY`]
    pub proxy: Option<String>,
    /// Retry failed attempts up to this many times with exponential backoff.
    ///
    /// Default to `None`, which disables retrying.
    pub max_retries: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key_id: None,
            secret_access_key: None,
            endpoint: None,
            raise_errors: true,
            timeout: Some(Duration::from_secs(30)),
            proxy: None,
            max_retries: None,
        }
    }
}

impl Config {
    /// Load config from env.
    ///
    /// Values already set on this config win over the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(AWS_ACCESS_KEY_ID) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AWS_SECRET_ACCESS_KEY) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(AWS_CLOUDFRONT_ENDPOINT) {
            self.endpoint.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(HTTPS_PROXY) {
            self.proxy.get_or_insert(v);
        }

        self
    }

    /// The base URL requests are resolved against.
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfront_core::StaticEnv;
    use std::collections::HashMap;

    #[test]
    fn test_config_from_env() {
        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([
                (AWS_ACCESS_KEY_ID.to_string(), "env_access_key".to_string()),
                (AWS_SECRET_ACCESS_KEY.to_string(), "env_secret_key".to_string()),
                (
                    AWS_CLOUDFRONT_ENDPOINT.to_string(),
                    "http://127.0.0.1:9000".to_string(),
                ),
                (HTTPS_PROXY.to_string(), "http://proxy:3128".to_string()),
            ]),
        });

        let config = Config {
            access_key_id: Some("explicit_access_key".to_string()),
            ..Default::default()
        }
        .from_env(&ctx);

        assert_eq!(config.access_key_id.as_deref(), Some("explicit_access_key"));
        assert_eq!(config.secret_access_key.as_deref(), Some("env_secret_key"));
        assert_eq!(config.endpoint(), "http://127.0.0.1:9000");
        assert_eq!(config.proxy.as_deref(), Some("http://proxy:3128"));
        assert!(config.raise_errors);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default().from_env(&Context::new());

        assert!(config.access_key_id.is_none());
        assert_eq!(config.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert!(config.max_retries.is_none());
        assert!(config.raise_errors);
    }
}
