//! Longview monitoring clients and subscriptions.

use chrono::{DateTime, Utc};
use linode_core::dates::{nullable_string, parse_date, NormalizeDates};
use linode_core::ids::LongviewClientId;
use serde::{Deserialize, Serialize};

use crate::models::catalog::LinodeTypePrice;
use crate::Result;

/// A Longview client installed on a monitored host.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LongviewClient {
    /// Client ID.
    pub id: LongviewClientId,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// API key used by the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Install code for the agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_code: Option<String>,

    /// Creation time as sent by the provider.
    #[serde(rename = "created", default, deserialize_with = "nullable_string")]
    pub created_str: String,
    /// Last update time as sent by the provider.
    #[serde(rename = "updated", default, deserialize_with = "nullable_string")]
    pub updated_str: String,
    /// Parsed creation time.
    #[serde(skip)]
    pub created: Option<DateTime<Utc>>,
    /// Parsed last update time.
    #[serde(skip)]
    pub updated: Option<DateTime<Utc>>,
}

impl NormalizeDates for LongviewClient {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        self.updated = parse_date(&self.updated_str)?;
        Ok(())
    }
}

/// A Longview Pro subscription tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LongviewSubscription {
    /// Subscription ID, e.g. `longview-10`.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Number of clients included.
    #[serde(default)]
    pub clients_included: u32,
    /// Hourly and monthly price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<LinodeTypePrice>,
}

no_dates!(LongviewSubscription);
