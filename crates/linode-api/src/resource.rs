//! Resource descriptors for every Linode API collection.
//!
//! Each [`Resource`] variant carries static metadata: its name, an endpoint template, how many
//! parent entities the endpoint is nested under, and whether the collection is paginated.
//! Nested templates mark the parent position with `{id}` and a second-level parent with
//! `{second_id}`.

use std::fmt;
use std::str::FromStr;

use linode_core::Error;

use crate::Result;

const PARENT_PLACEHOLDER: &str = "{id}";
const SECOND_PARENT_PLACEHOLDER: &str = "{second_id}";

/// How a resource endpoint is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Fixed endpoint, no parent entity
    Root,
    /// Endpoint nested under the given parent ID
    Parent(u64),
    /// Endpoint nested under a parent and a child of that parent
    Nested(u64, u64),
}

macro_rules! resources {
    ($($variant:ident => ($name:literal, $template:literal, $parents:literal, $paginated:literal),)*) => {
        /// Every resource kind known to the client.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Resource {
            $(
                #[doc = concat!("`", $template, "`")]
                $variant,
            )*
        }

        impl Resource {
            const ALL: &'static [Self] = &[$(Self::$variant,)*];

            /// Stable resource name.
            #[must_use]
            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)*
                }
            }

            /// Endpoint template relative to the API base URL.
            #[must_use]
            pub const fn endpoint_template(&self) -> &'static str {
                match self {
                    $(Self::$variant => $template,)*
                }
            }

            /// Number of parent IDs the endpoint template takes.
            #[must_use]
            pub const fn parent_depth(&self) -> u8 {
                match self {
                    $(Self::$variant => $parents,)*
                }
            }

            /// Returns true if the collection is served as `{page, pages, data}`.
            #[must_use]
            pub const fn is_paginated(&self) -> bool {
                match self {
                    $(Self::$variant => $paginated,)*
                }
            }
        }
    };
}

resources! {
    Stackscripts => ("stackscripts", "linode/stackscripts", 0, true),
    Images => ("images", "images", 0, true),
    Instances => ("instances", "linode/instances", 0, true),
    InstanceDisks => ("instance_disks", "linode/instances/{id}/disks", 1, true),
    InstanceConfigs => ("instance_configs", "linode/instances/{id}/configs", 1, true),
    InstanceSnapshots => ("instance_snapshots", "linode/instances/{id}/backups", 1, false),
    InstanceIps => ("instance_ips", "linode/instances/{id}/ips", 1, false),
    InstanceVolumes => ("instance_volumes", "linode/instances/{id}/volumes", 1, true),
    IpAddresses => ("ipaddresses", "network/ips", 0, true),
    Ipv6Pools => ("ipv6pools", "network/ipv6/pools", 0, true),
    Ipv6Ranges => ("ipv6ranges", "network/ipv6/ranges", 0, true),
    Regions => ("regions", "regions", 0, true),
    Volumes => ("volumes", "volumes", 0, true),
    Kernels => ("kernels", "linode/kernels", 0, true),
    Types => ("types", "linode/types", 0, true),
    Domains => ("domains", "domains", 0, true),
    DomainRecords => ("domain_records", "domains/{id}/records", 1, true),
    LongviewClients => ("longview_clients", "longview/clients", 0, true),
    LongviewSubscriptions => ("longview_subscriptions", "longview/subscriptions", 0, true),
    NodeBalancers => ("nodebalancers", "nodebalancers", 0, true),
    NodeBalancerConfigs => ("nodebalancer_configs", "nodebalancers/{id}/configs", 1, true),
    NodeBalancerNodes => ("nodebalancer_nodes", "nodebalancers/{id}/configs/{second_id}/nodes", 2, true),
    Tickets => ("tickets", "support/tickets", 0, true),
    Account => ("account", "account", 0, false),
    Events => ("events", "account/events", 0, true),
    Invoices => ("invoices", "account/invoices", 0, true),
    InvoiceItems => ("invoice_items", "account/invoices/{id}/items", 1, true),
    Notifications => ("notifications", "account/notifications", 0, true),
}

impl Resource {
    /// All resource kinds, in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        Self::ALL
    }

    /// Returns true if the endpoint is nested under at least one parent entity.
    #[must_use]
    pub const fn requires_parent_id(&self) -> bool {
        self.parent_depth() > 0
    }

    /// Endpoint of a resource without a parent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the resource is nested under a parent.
    pub fn endpoint(&self) -> Result<String> {
        if self.requires_parent_id() {
            return Err(Error::ConfigError(format!(
                "resource `{self}` requires a parent ID; use endpoint_with_id"
            )));
        }
        Ok(self.endpoint_template().to_string())
    }

    /// Endpoint of a nested resource with the parent ID substituted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] unless the resource takes exactly one parent.
    pub fn endpoint_with_id(&self, parent_id: u64) -> Result<String> {
        match self.parent_depth() {
            1 => Ok(self.substitute(parent_id, None)),
            0 => Err(Error::ConfigError(format!(
                "resource `{self}` does not take a parent ID; use endpoint"
            ))),
            _ => Err(Error::ConfigError(format!(
                "resource `{self}` requires two parent IDs; use endpoint_with_ids"
            ))),
        }
    }

    /// Endpoint of a resource nested two levels deep, both parent IDs substituted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] unless the resource takes two parents.
    pub fn endpoint_with_ids(&self, parent_id: u64, second_id: u64) -> Result<String> {
        if self.parent_depth() != 2 {
            return Err(Error::ConfigError(format!(
                "resource `{self}` does not take two parent IDs"
            )));
        }
        Ok(self.substitute(parent_id, Some(second_id)))
    }

    /// Resolve the endpoint for the given scope.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the scope does not fit the resource.
    pub fn resolve(&self, scope: Scope) -> Result<String> {
        match scope {
            Scope::Root => self.endpoint(),
            Scope::Parent(parent_id) => self.endpoint_with_id(parent_id),
            Scope::Nested(parent_id, second_id) => self.endpoint_with_ids(parent_id, second_id),
        }
    }

    fn substitute(&self, parent_id: u64, second_id: Option<u64>) -> String {
        let endpoint = self
            .endpoint_template()
            .replacen(PARENT_PLACEHOLDER, &parent_id.to_string(), 1);
        match second_id {
            Some(second_id) => {
                endpoint.replacen(SECOND_PARENT_PLACEHOLDER, &second_id.to_string(), 1)
            }
            None => endpoint,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|resource| resource.name() == s)
            .ok_or_else(|| Error::ConfigError(format!("unknown resource `{s}`")))
    }
}
