use backon::ExponentialBuilder;
use cfront_cloudfront::Config;
use cfront_core::{Context, Error, OsEnv, Result};
use cfront_http_send_reqwest::ReqwestHttpSend;
use log::debug;

/// Create a `reqwest::ClientBuilder` carrying the timeout and proxy of `config`.
pub fn client_builder(config: &Config) -> Result<reqwest::ClientBuilder> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(proxy) = &config.proxy {
        let p = reqwest::Proxy::all(proxy.as_str()).map_err(|e| {
            Error::config_invalid("proxy is not a valid url")
                .with_source(e)
                .with_context(format!("proxy: {proxy}"))
        })?;
        builder = builder.proxy(p);
    }
    Ok(builder)
}

/// Create a context that sends through reqwest and reads the OS environment.
///
/// Retry with exponential backoff is enabled when `config.max_retries` is set.
pub fn default_context(config: &Config) -> Result<Context> {
    let client = client_builder(config)?
        .build()
        .map_err(|e| Error::config_invalid("failed to build http client").with_source(e))?;

    let mut http = ReqwestHttpSend::new(client);
    if let Some(max_retries) = config.max_retries {
        debug!("retrying failed requests up to {max_retries} times");
        http = http.with_retry(ExponentialBuilder::default().with_max_times(max_retries));
    }

    Ok(Context::new().with_http_send(http).with_env(OsEnv))
}
