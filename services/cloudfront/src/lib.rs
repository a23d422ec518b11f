//! Amazon CloudFront `2010-11-01` client for cfront.
//!
//! This crate signs requests with the legacy AWS signature, addresses the
//! CloudFront REST resources, and maps the XML responses into typed structs.
//!
//! ## Signing
//!
//! The legacy scheme signs nothing but the `Date` header:
//!
//! ```text
//! Date: Tue, 01 Mar 2011 12:00:00 GMT
//! Authorization: AWS <access_key_id>:<base64(hmac_sha1(secret_access_key, date))>
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use cfront_cloudfront::{Client, Config, DefaultCredentialProvider, InvalidationBatch, ListOptions, RequestSigner};
//! use cfront_core::{Context, OsEnv, Result, Signer};
//! use cfront_http_send_reqwest::ReqwestHttpSend;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!     let config = Config::default().from_env(&ctx);
//!
//!     let signer = Signer::new(ctx.clone(), DefaultCredentialProvider::new(), RequestSigner::new());
//!     let client = Client::new(ctx, signer, &config);
//!
//!     if let Some(list) = client.list_distributions(&ListOptions::default()).await? {
//!         for dist in list.summaries {
//!             println!("{} deployed: {}", dist.id, dist.is_deployed());
//!         }
//!     }
//!
//!     let batch = InvalidationBatch::new("release-42").with_path("/index.html");
//!     client.create_invalidation("EDFDVBD6EXAMPLE", &batch).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Non-success statuses become errors of kind
//! [`ErrorKind::Service`](cfront_core::ErrorKind::Service) carrying a
//! [`ServiceError`]. Set [`Config::raise_errors`] to `false` to get `Ok(None)`
//! instead.

pub mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod sign_request;
pub use sign_request::RequestSigner;

mod provide_credential;
pub use provide_credential::*;

mod resource;
pub use resource::{ListOptions, Resource};

mod model;
pub use model::*;

mod error;
pub use error::ServiceError;

mod client;
pub use client::Client;
