use super::Status;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One page of `GET 2010-11-01/distribution`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DistributionList {
    /// Marker this page started after. `None` for the first page.
    #[serde(deserialize_with = "super::non_empty")]
    pub marker: Option<String>,
    /// Marker to pass for the next page, set when `is_truncated`.
    #[serde(deserialize_with = "super::non_empty")]
    pub next_marker: Option<String>,
    /// Maximum number of items requested for this page.
    pub max_items: u32,
    /// Whether more distributions are available.
    pub is_truncated: bool,
    /// Distributions of this page.
    #[serde(rename = "DistributionSummary")]
    pub summaries: Vec<DistributionSummary>,
}

/// Distribution entry of a [`DistributionList`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DistributionSummary {
    pub id: String,
    pub status: Status,
    pub last_modified_time: Option<DateTime<Utc>>,
    pub domain_name: String,
    pub s3_origin: Option<S3Origin>,
    pub custom_origin: Option<CustomOrigin>,
    #[serde(rename = "CNAME")]
    pub cnames: Vec<String>,
    pub comment: Option<String>,
    pub enabled: bool,
    pub trusted_signers: Option<TrustedSigners>,
}

impl DistributionSummary {
    /// Whether the distribution is deployed.
    pub fn is_deployed(&self) -> bool {
        self.status == Status::Deployed
    }

    /// Whether changes to the distribution are still propagating.
    pub fn is_in_progress(&self) -> bool {
        self.status == Status::InProgress
    }
}

/// Response of `GET 2010-11-01/distribution/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Distribution {
    pub id: String,
    pub status: Status,
    pub last_modified_time: Option<DateTime<Utc>>,
    /// Number of invalidation batches currently in progress.
    pub in_progress_invalidation_batches: u32,
    pub domain_name: String,
    pub active_trusted_signers: Option<ActiveTrustedSigners>,
    #[serde(rename = "DistributionConfig")]
    pub config: DistributionConfig,
    /// Value of the `ETag` response header.
    #[serde(skip)]
    pub etag: Option<String>,
}

impl Distribution {
    /// Whether the distribution is deployed.
    pub fn is_deployed(&self) -> bool {
        self.status == Status::Deployed
    }

    /// Whether changes to the distribution are still propagating.
    pub fn is_in_progress(&self) -> bool {
        self.status == Status::InProgress
    }
}

/// Configuration of a distribution.
///
/// Returned embedded in [`Distribution`] and on its own by
/// `GET 2010-11-01/distribution/<id>/config`, the latter carrying the `etag`
/// required to update it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DistributionConfig {
    pub s3_origin: Option<S3Origin>,
    pub custom_origin: Option<CustomOrigin>,
    pub caller_reference: String,
    #[serde(rename = "CNAME")]
    pub cnames: Vec<String>,
    pub comment: Option<String>,
    pub enabled: bool,
    pub default_root_object: Option<String>,
    pub logging: Option<Logging>,
    pub trusted_signers: Option<TrustedSigners>,
    pub required_protocols: Option<RequiredProtocols>,
    /// Value of the `ETag` response header.
    #[serde(skip)]
    pub etag: Option<String>,
}

/// Amazon S3 bucket origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct S3Origin {
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    pub origin_access_identity: Option<String>,
}

/// Custom HTTP(S) origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CustomOrigin {
    #[serde(rename = "DNSName")]
    pub dns_name: String,
    #[serde(rename = "HTTPPort")]
    pub http_port: Option<u16>,
    #[serde(rename = "HTTPSPort")]
    pub https_port: Option<u16>,
    /// `http-only` or `match-viewer`.
    pub origin_protocol_policy: String,
}

/// Accounts allowed to create signed URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TrustedSigners {
    /// `<Self/>`: the distribution owner is a trusted signer.
    #[serde(rename = "Self", deserialize_with = "super::present")]
    pub self_: bool,
    #[serde(rename = "AwsAccountNumber")]
    pub aws_account_numbers: Vec<String>,
}

/// Trusted signers that have active key pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ActiveTrustedSigners {
    #[serde(rename = "Signer")]
    pub signers: Vec<ActiveSigner>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ActiveSigner {
    #[serde(rename = "Self", deserialize_with = "super::present")]
    pub self_: bool,
    pub aws_account_number: Option<String>,
    #[serde(rename = "KeyPairId")]
    pub key_pair_ids: Vec<String>,
}

/// Access log location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct Logging {
    pub bucket: String,
    pub prefix: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RequiredProtocols {
    #[serde(rename = "Protocol")]
    pub protocols: Vec<String>,
}
