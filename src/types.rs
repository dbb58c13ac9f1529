//! Core domain types for ghstat
//!
//! This module contains the fundamental types used throughout the ghstat
//! library. These types provide strong typing for common concepts like
//! usernames, repository keys, and billed products.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strongly-typed username wrapper
///
/// This ensures attribution identities are consistently handled throughout
/// the application.
///
/// # Examples
/// ```
/// use ghstat::types::Username;
///
/// let user = Username::new("octocat");
/// assert_eq!(user.as_str(), "octocat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
    /// Create a new Username from any string-like type
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Canonical repository identity: `owner/slug`
///
/// The owner and repository slug arrive as separate CSV columns and are
/// joined at ingestion time. Every repository-level aggregation groups on
/// this composite key.
///
/// # Examples
/// ```
/// use ghstat::types::RepoKey;
///
/// let repo = RepoKey::from_parts("octo-org", "hello-world");
/// assert_eq!(repo.as_str(), "octo-org/hello-world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoKey(String);

impl RepoKey {
    /// Create a RepoKey from an already-joined `owner/slug` string
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Compose the key from its owner and slug columns
    pub fn from_parts(owner: &str, slug: &str) -> Self {
        Self(format!("{owner}/{slug}"))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Billed product label (e.g. "Actions", "Shared Storage")
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Product(String);

impl Product {
    /// Create a new Product
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product label matched by the storage-cost report filter
pub const SHARED_STORAGE: &str = "Shared Storage";

/// One normalized row of a usage report
///
/// Records are created once, in bulk, from the uploaded CSV and are immutable
/// for the remainder of the run. The derived cost lives on [`CostedRecord`],
/// not here, so it can only be produced by the derivation stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageRecord {
    /// Calendar date the usage occurred
    pub date: NaiveDate,
    /// Attribution identity for the consuming actor
    pub username: Username,
    /// Canonical `owner/slug` repository key
    pub repository: RepoKey,
    /// Billed product label
    pub product: Product,
    /// Slash-delimited workflow path, `None` when the cell is empty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow: Option<String>,
    /// Usage amount in the product's unit
    pub quantity: f64,
    /// Price per unit of quantity, in USD
    pub unit_price: f64,
}

impl UsageRecord {
    /// Last slash-delimited segment of the workflow path
    ///
    /// Returns `None` for records without a workflow; these are excluded
    /// from the workflow report but count everywhere else.
    pub fn workflow_name(&self) -> Option<&str> {
        self.workflow
            .as_deref()
            .map(|path| path.rsplit('/').next().unwrap_or(path))
    }
}

/// A usage record augmented with its derived total cost
///
/// Produced exactly once per dataset by [`crate::cost::derive_costs`]; every
/// aggregation reuses the same value rather than recomputing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostedRecord {
    /// The underlying normalized record
    #[serde(flatten)]
    pub record: UsageRecord,
    /// Derived cost: `quantity * unit_price`, full precision
    pub total_cost: f64,
}

impl CostedRecord {
    /// Convenience accessor for the record's date
    pub fn date(&self) -> NaiveDate {
        self.record.date
    }
}
