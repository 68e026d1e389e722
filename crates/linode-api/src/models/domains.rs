//! DNS domains and records.

use linode_core::ids::{DomainId, DomainRecordId};
use serde::{Deserialize, Serialize};

/// A DNS zone managed by Linode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Domain {
    /// Domain ID.
    pub id: DomainId,
    /// Domain name, e.g. `example.org`.
    pub domain: String,
    /// `master` or `slave`.
    #[serde(rename = "type", default)]
    pub domain_type: String,
    /// Display group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Zone status (active, disabled, edit_mode).
    #[serde(default)]
    pub status: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Start of authority email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soa_email: Option<String>,
    /// Retry interval in seconds.
    #[serde(default)]
    pub retry_sec: u32,
    /// Master name servers (slave zones).
    #[serde(default)]
    pub master_ips: Vec<String>,
    /// Addresses allowed to AXFR the zone.
    #[serde(default)]
    pub axfr_ips: Vec<String>,
    /// Expiry in seconds.
    #[serde(default)]
    pub expire_sec: u32,
    /// Refresh interval in seconds.
    #[serde(default)]
    pub refresh_sec: u32,
    /// Default TTL in seconds.
    #[serde(default)]
    pub ttl_sec: u32,
}

/// A record within a [`Domain`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainRecord {
    /// Record ID.
    pub id: DomainRecordId,
    /// Record type (A, AAAA, CNAME, MX, ...).
    #[serde(rename = "type")]
    pub record_type: String,
    /// Record name.
    #[serde(default)]
    pub name: String,
    /// Record target.
    #[serde(default)]
    pub target: String,
    /// Priority (MX, SRV).
    #[serde(default)]
    pub priority: u32,
    /// Weight (SRV).
    #[serde(default)]
    pub weight: u32,
    /// Port (SRV).
    #[serde(default)]
    pub port: u32,
    /// Service (SRV).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Protocol (SRV).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// TTL in seconds.
    #[serde(default)]
    pub ttl_sec: u32,
    /// Tag (CAA).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

no_dates!(Domain, DomainRecord);
