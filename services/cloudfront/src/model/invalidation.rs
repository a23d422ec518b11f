use super::Status;
use crate::constants::XML_NAMESPACE;
use cfront_core::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of `GET 2010-11-01/distribution/<id>/invalidation`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InvalidationList {
    #[serde(deserialize_with = "super::non_empty")]
    pub marker: Option<String>,
    #[serde(deserialize_with = "super::non_empty")]
    pub next_marker: Option<String>,
    pub max_items: u32,
    pub is_truncated: bool,
    #[serde(rename = "InvalidationSummary")]
    pub summaries: Vec<InvalidationSummary>,
}

/// Invalidation entry of an [`InvalidationList`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InvalidationSummary {
    pub id: String,
    pub status: Status,
}

impl InvalidationSummary {
    /// Whether the invalidation is still running.
    pub fn is_in_progress(&self) -> bool {
        self.status == Status::InProgress
    }

    /// Whether the invalidation has finished.
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

/// A single invalidation, as returned by create and get.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Invalidation {
    pub id: String,
    pub status: Status,
    pub create_time: Option<DateTime<Utc>>,
    #[serde(rename = "InvalidationBatch")]
    pub batch: InvalidationBatch,
    /// Value of the `Location` response header of a create.
    #[serde(skip)]
    pub location: Option<String>,
}

impl Invalidation {
    /// Whether the invalidation is still running.
    pub fn is_in_progress(&self) -> bool {
        self.status == Status::InProgress
    }

    /// Whether the invalidation has finished.
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

/// Paths to evict from the edge caches.
///
/// `caller_reference` must be unique per batch: CloudFront treats a repeated
/// reference as a retry of the same request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InvalidationBatch {
    #[serde(rename = "Path")]
    pub paths: Vec<String>,
    pub caller_reference: String,
}

#[derive(Serialize)]
#[serde(rename = "InvalidationBatch")]
struct InvalidationBatchBody<'a> {
    #[serde(rename = "@xmlns")]
    xmlns: &'a str,
    #[serde(rename = "Path")]
    paths: &'a [String],
    #[serde(rename = "CallerReference")]
    caller_reference: &'a str,
}

impl InvalidationBatch {
    /// Create an empty batch with the given caller reference.
    pub fn new(caller_reference: impl Into<String>) -> Self {
        Self {
            paths: Vec::new(),
            caller_reference: caller_reference.into(),
        }
    }

    /// Add a path like `/images/logo.png`.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Serialize into the request body of a create invalidation call.
    pub fn to_xml(&self) -> Result<String> {
        let body = InvalidationBatchBody {
            xmlns: XML_NAMESPACE,
            paths: &self.paths,
            caller_reference: &self.caller_reference,
        };
        let xml = quick_xml::se::to_string(&body).map_err(|e| {
            Error::unexpected("failed to serialize invalidation batch").with_source(e)
        })?;

        Ok(format!(r#"<?xml version="1.0" encoding="UTF-8"?>{xml}"#))
    }
}
