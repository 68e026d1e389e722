//! Strongly-typed identifiers for Linode resources.
//!
//! Linode identifies most resources with positive integers. This module wraps them in
//! distinct types so an instance ID cannot be passed where a volume ID is expected, and
//! converts each of them into the canonical [`EntityId`] used by the event log.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::types::EntityId;

/// Macro to generate strongly-typed numeric ID wrapper types.
macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $doc:expr) => {
        $(#[$meta])*
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates a new ID wrapper.
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw numeric ID.
            #[must_use]
            pub const fn get(&self) -> u64 {
                self.0
            }

            /// Parses an ID from a string.
            ///
            /// # Errors
            ///
            /// Returns an error if the string is not a non-negative integer.
            pub fn parse_str(input: &str) -> Result<Self> {
                input
                    .trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| Error::InvalidId(format!("{}: `{input}`", stringify!($name))))
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for u64 {
            fn from(wrapper: $name) -> Self {
                wrapper.0
            }
        }

        impl From<$name> for EntityId {
            fn from(wrapper: $name) -> Self {
                EntityId::from(wrapper.0)
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self> {
                Self::parse_str(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// Generate all ID types
id_type!(InstanceId, "Linode instance ID");
id_type!(DiskId, "Instance disk ID");
id_type!(ConfigId, "Instance configuration profile ID");
id_type!(SnapshotId, "Instance backup/snapshot ID");
id_type!(VolumeId, "Block storage volume ID");
id_type!(DomainId, "DNS domain ID");
id_type!(DomainRecordId, "DNS domain record ID");
id_type!(NodeBalancerId, "NodeBalancer ID");
id_type!(NodeBalancerConfigId, "NodeBalancer port configuration ID");
id_type!(NodeBalancerNodeId, "NodeBalancer backend node ID");
id_type!(StackscriptId, "StackScript ID");
id_type!(TicketId, "Support ticket ID");
id_type!(InvoiceId, "Account invoice ID");
id_type!(EventId, "Account event ID");
id_type!(LongviewClientId, "Longview client ID");
