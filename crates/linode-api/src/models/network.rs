//! IP addresses and IPv6 ranges.

use linode_core::ids::InstanceId;
use serde::{Deserialize, Serialize};

/// An IPv4 or IPv6 address assigned to an instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceIp {
    /// The address.
    pub address: String,
    /// Default gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    /// Subnet mask.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,
    /// Prefix length.
    #[serde(default)]
    pub prefix: u32,
    /// Address type (ipv4, ipv6, ipv6/pool, ipv6/range).
    #[serde(rename = "type", default)]
    pub ip_type: String,
    /// Whether the address is publicly routable.
    #[serde(default)]
    pub public: bool,
    /// Reverse DNS entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rdns: Option<String>,
    /// Instance the address is assigned to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linode_id: Option<InstanceId>,
    /// Region of the address.
    #[serde(default)]
    pub region: String,
}

/// An IPv6 range or pool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ipv6Range {
    /// Range in CIDR notation without the prefix, e.g. `2600:3c01::`.
    pub range: String,
    /// Region of the range.
    #[serde(default)]
    pub region: String,
    /// Prefix length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<u32>,
}

/// Response of `linode/instances/{id}/ips`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceIpAddressResponse {
    /// IPv4 addresses.
    #[serde(default)]
    pub ipv4: InstanceIpv4Response,
    /// IPv6 addresses and ranges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<InstanceIpv6Response>,
}

/// IPv4 addresses of an instance, by visibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceIpv4Response {
    /// Public addresses.
    #[serde(default)]
    pub public: Vec<InstanceIp>,
    /// Private addresses.
    #[serde(default)]
    pub private: Vec<InstanceIp>,
    /// Addresses shared with this instance.
    #[serde(default)]
    pub shared: Vec<InstanceIp>,
}

/// IPv6 addresses and ranges of an instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceIpv6Response {
    /// Link-local address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_local: Option<InstanceIp>,
    /// SLAAC address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slaac: Option<InstanceIp>,
    /// Routed global ranges.
    #[serde(default)]
    pub global: Vec<Ipv6Range>,
}

impl InstanceIpAddressResponse {
    /// All IPv4 addresses, public first.
    pub fn ipv4_addresses(&self) -> impl Iterator<Item = &InstanceIp> {
        self.ipv4
            .public
            .iter()
            .chain(&self.ipv4.private)
            .chain(&self.ipv4.shared)
    }
}

no_dates!(InstanceIp, Ipv6Range, InstanceIpAddressResponse);
