//! CloudFront support with convenience APIs
//!
//! This module re-exports the CloudFront client along with functions that
//! wire it to the default context.

pub use cfront_cloudfront::*;

use crate::{Context, Signer};

/// Default CloudFront signer type.
pub type DefaultSigner = Signer<Credential>;

/// Create a signer for CloudFront requests.
///
/// Keys set on `config` take precedence, the [`DefaultCredentialProvider`]
/// chain is used otherwise.
pub fn default_signer(ctx: &Context, config: &Config) -> DefaultSigner {
    let mut provider = DefaultCredentialProvider::new();
    if let (Some(ak), Some(sk)) = (&config.access_key_id, &config.secret_access_key) {
        provider = provider.push_front(StaticCredentialProvider::new(ak, sk));
    }

    Signer::new(ctx.clone(), provider, RequestSigner::new())
}

/// Create a CloudFront client with the default context.
///
/// Unset fields of `config` are loaded from the environment first.
///
/// # Example
///
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> cfront::Result<()> {
/// use cfront::cloudfront::{default_client, Config, InvalidationBatch};
///
/// let client = default_client(Config {
///     max_retries: Some(3),
///     ..Default::default()
/// })?;
///
/// let batch = InvalidationBatch::new("release-42").with_path("/index.html");
/// client.create_invalidation("EDFDVBD6EXAMPLE", &batch).await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "default-context")]
pub fn default_client(config: Config) -> crate::Result<Client> {
    let config = config.from_env(&Context::new().with_env(crate::OsEnv));
    let ctx = crate::default_context(&config)?;
    let signer = default_signer(&ctx, &config);

    Ok(Client::new(ctx, signer, &config))
}
