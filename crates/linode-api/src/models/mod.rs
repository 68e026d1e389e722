//! Typed models for Linode API responses.
//!
//! Temporal fields keep the provider's wire string (`*_str`, serialized under the wire name)
//! next to the parsed instant, which
//! [`NormalizeDates`](linode_core::dates::NormalizeDates) derives after decoding.

/// Implements `NormalizeDates` for entities without temporal fields.
macro_rules! no_dates {
    ($($ty:ty),* $(,)?) => {
        $(
            impl linode_core::dates::NormalizeDates for $ty {
                fn normalize_dates(&mut self) -> linode_core::Result<()> {
                    Ok(())
                }
            }
        )*
    };
}

pub mod account;
pub mod catalog;
pub mod domains;
pub mod instances;
pub mod longview;
pub mod network;
pub mod nodebalancers;
pub mod support;
pub mod volumes;

pub use account::{Account, CreditCard, Invoice, InvoiceItem, Notification, NotificationEntity};
pub use catalog::{Image, LinodeKernel, LinodeType, LinodeTypePrice, Region, Stackscript};
pub use domains::{Domain, DomainRecord};
pub use instances::{
    Instance, InstanceAlert, InstanceBackup, InstanceBackupSchedule, InstanceBackupSnapshots,
    InstanceBackupsResponse, InstanceConfig, InstanceConfigHelpers, InstanceDisk, InstanceSnapshot,
    InstanceSnapshotDisk, InstanceSpec,
};
pub use linode_core::types::{Event, EventEntity};
pub use longview::{LongviewClient, LongviewSubscription};
pub use network::{
    InstanceIp, InstanceIpAddressResponse, InstanceIpv4Response, InstanceIpv6Response, Ipv6Range,
};
pub use nodebalancers::{
    NodeBalancer, NodeBalancerConfig, NodeBalancerNode, NodeBalancerNodeStatus,
    NodeBalancerTransfer,
};
pub use support::{Ticket, TicketEntity};
pub use volumes::Volume;
