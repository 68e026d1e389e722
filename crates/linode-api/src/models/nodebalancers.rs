//! NodeBalancers, their port configurations and backend nodes.

use chrono::{DateTime, Utc};
use linode_core::dates::{nullable_string, parse_date, NormalizeDates};
use linode_core::ids::{NodeBalancerConfigId, NodeBalancerId, NodeBalancerNodeId};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A managed load balancer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeBalancer {
    /// NodeBalancer ID.
    pub id: NodeBalancerId,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Region of the NodeBalancer.
    #[serde(default)]
    pub region: String,
    /// Public host name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Public IPv4 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<String>,
    /// Public IPv6 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
    /// Connections per second allowed per client IP, 0 to disable.
    #[serde(default)]
    pub client_conn_throttle: u32,
    /// Transfer this month, in MB.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<NodeBalancerTransfer>,

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

impl NormalizeDates for NodeBalancer {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        self.updated = parse_date(&self.updated_str)?;
        Ok(())
    }
}

/// Monthly transfer counters of a NodeBalancer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct NodeBalancerTransfer {
    /// Total MB transferred.
    #[serde(default)]
    pub total: Option<f64>,
    /// MB sent.
    #[serde(default)]
    pub out: Option<f64>,
    /// MB received.
    #[serde(rename = "in", default)]
    pub inbound: Option<f64>,
}

/// A port configuration of a NodeBalancer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeBalancerConfig {
    /// Configuration ID.
    pub id: NodeBalancerConfigId,
    /// Listening port.
    pub port: u16,
    /// `http`, `https` or `tcp`.
    #[serde(default)]
    pub protocol: String,
    /// `roundrobin`, `leastconn` or `source`.
    #[serde(default)]
    pub algorithm: String,
    /// Session stickiness (`none`, `table`, `http_cookie`).
    #[serde(default)]
    pub stickiness: String,
    /// Health check type (`none`, `connection`, `http`, `http_body`).
    #[serde(default)]
    pub check: String,
    /// Seconds between health checks.
    #[serde(default)]
    pub check_interval: u32,
    /// Failed checks before a backend is taken out of rotation.
    #[serde(default)]
    pub check_attempts: u32,
    /// Path requested by HTTP checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_path: Option<String>,
    /// Expected body for `http_body` checks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_body: Option<String>,
    /// Passive health checks.
    #[serde(default)]
    pub check_passive: bool,
    /// `recommended` or `legacy`.
    #[serde(default)]
    pub cipher_suite: String,
    /// Owning NodeBalancer.
    pub nodebalancer_id: NodeBalancerId,
    /// Common name of the installed certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_commonname: Option<String>,
    /// Fingerprint of the installed certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_fingerprint: Option<String>,
    /// Certificate; the API returns `<REDACTED>` once set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_cert: Option<String>,
    /// Private key; the API returns `<REDACTED>` once set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ssl_key: Option<String>,
    /// Backend health summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nodes_status: Option<NodeBalancerNodeStatus>,
}

/// Count of healthy and unhealthy backends.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeBalancerNodeStatus {
    /// Backends in rotation.
    #[serde(default)]
    pub up: u32,
    /// Backends out of rotation.
    #[serde(default)]
    pub down: u32,
}

/// A backend behind a NodeBalancer port configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NodeBalancerNode {
    /// Node ID.
    pub id: NodeBalancerNodeId,
    /// Backend `address:port`, private IPv4 only.
    #[serde(default)]
    pub address: String,
    /// Display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Health as seen by the NodeBalancer (`UP`, `DOWN`, `unknown`).
    #[serde(default)]
    pub status: String,
    /// Share of traffic, 1 to 255.
    #[serde(default)]
    pub weight: u32,
    /// `accept`, `reject`, `drain` or `backup`.
    #[serde(default)]
    pub mode: String,
    /// Owning port configuration.
    pub config_id: NodeBalancerConfigId,
    /// Owning NodeBalancer.
    pub nodebalancer_id: NodeBalancerId,
}

no_dates!(NodeBalancerConfig, NodeBalancerNode);
