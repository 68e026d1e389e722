//! Catalog resources: regions, kernels, plan types, images and StackScripts.

use chrono::{DateTime, Utc};
use linode_core::dates::{nullable_string, parse_date, NormalizeDates};
use linode_core::ids::StackscriptId;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A data center region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Region {
    /// Region ID, e.g. `us-east`.
    pub id: String,
    /// Country code.
    #[serde(default)]
    pub country: String,
}

/// A kernel that instances can boot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinodeKernel {
    /// Kernel ID, e.g. `linode/latest-64bit`.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Kernel version.
    #[serde(default)]
    pub version: String,
    /// Whether the kernel boots under KVM.
    #[serde(default)]
    pub kvm: bool,
    /// Whether the kernel boots under Xen.
    #[serde(default)]
    pub xen: bool,
    /// `i386` or `x86_64`.
    #[serde(default)]
    pub architecture: String,
    /// Whether the kernel supports paravirtualized operations.
    #[serde(default)]
    pub pvops: bool,
    /// Whether the kernel is deprecated.
    #[serde(default)]
    pub deprecated: bool,
}

/// An instance plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinodeType {
    /// Type ID, e.g. `g6-standard-1`.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// `nanode`, `standard`, `highmem` or `dedicated`.
    #[serde(default)]
    pub class: String,
    /// Disk space in MB.
    #[serde(default)]
    pub disk: u64,
    /// Memory in MB.
    #[serde(default)]
    pub memory: u64,
    /// Virtual CPUs.
    #[serde(default)]
    pub vcpus: u32,
    /// Monthly transfer in GB.
    #[serde(default)]
    pub transfer: u64,
    /// Outbound bandwidth in Mbits.
    #[serde(default)]
    pub network_out: u64,
    /// Plan price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<LinodeTypePrice>,
    /// Add-on prices, keyed by add-on name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<serde_json::Value>,
}

/// Hourly and monthly price of a plan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LinodeTypePrice {
    /// Price per hour in USD.
    #[serde(default)]
    pub hourly: f64,
    /// Price per month in USD.
    #[serde(default)]
    pub monthly: f64,
}

/// A deployable disk image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// Image ID, e.g. `linode/debian9`.
    pub id: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// `manual` or `automatic`.
    #[serde(rename = "type", default)]
    pub image_type: String,
    /// Whether the image is a public distribution.
    #[serde(default)]
    pub is_public: bool,
    /// Size in MB.
    #[serde(default)]
    pub size: u64,
    /// Distribution vendor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Whether the image is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Creator user name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    /// Creation time as sent by the provider.
    #[serde(rename = "created", default, deserialize_with = "nullable_string")]
    pub created_str: String,
    /// Parsed creation time.
    #[serde(skip)]
    pub created: Option<DateTime<Utc>>,
}

impl NormalizeDates for Image {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        Ok(())
    }
}

/// A deployment script.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stackscript {
    /// StackScript ID.
    pub id: StackscriptId,
    /// Owner user name.
    #[serde(default)]
    pub username: String,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Images the script can be deployed to.
    #[serde(default)]
    pub images: Vec<String>,
    /// Total deployments.
    #[serde(default)]
    pub deployments_total: u64,
    /// Instances currently deployed from the script.
    #[serde(default)]
    pub deployments_active: u64,
    /// Whether the script is public.
    #[serde(default)]
    pub is_public: bool,
    /// Note of the latest revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rev_note: Option<String>,
    /// Script body.
    #[serde(default)]
    pub script: String,
    /// User defined fields parsed from the script.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_defined_fields: Option<serde_json::Value>,
    /// Gravatar ID of the owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_gravatar_id: Option<String>,

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

impl NormalizeDates for Stackscript {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        self.updated = parse_date(&self.updated_str)?;
        Ok(())
    }
}

no_dates!(Region, LinodeKernel, LinodeType);
