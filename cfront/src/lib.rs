#![cfg_attr(feature = "default-context", doc = include_str!("../README.md"))]
#![cfg_attr(
    not(feature = "default-context"),
    doc = "CloudFront `2010-11-01` client. Enable `default-context` for the reqwest wiring."
)]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use cfront_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::{client_builder, default_context};

pub mod cloudfront;
