//! Block storage volumes.

use chrono::{DateTime, Utc};
use linode_core::dates::{nullable_string, parse_date, NormalizeDates};
use linode_core::ids::{InstanceId, VolumeId};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A block storage volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Volume {
    /// Volume ID.
    pub id: VolumeId,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Volume status (creating, active, resizing, contact_support).
    #[serde(default)]
    pub status: String,
    /// Region of the volume.
    #[serde(default)]
    pub region: String,
    /// Size in GB.
    #[serde(default)]
    pub size: u32,
    /// Instance the volume is attached to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linode_id: Option<InstanceId>,
    /// Device path inside the attached instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesystem_path: Option<String>,

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

impl Volume {
    /// Returns true if the volume is attached to an instance.
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.linode_id.is_some()
    }
}

impl NormalizeDates for Volume {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        self.updated = parse_date(&self.updated_str)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn volume_detached_has_no_linode() {
        let mut volume: Volume = serde_json::from_value(json!({
            "id": 12345,
            "label": "my-volume",
            "status": "active",
            "region": "us-east",
            "size": 30,
            "linode_id": null,
            "created": "2018-01-01T00:01:01",
            "updated": "2018-01-01T00:01:01"
        }))
        .unwrap();
        volume.normalize_dates().unwrap();

        assert!(!volume.is_attached());
        assert_eq!(volume.created, volume.updated);
        assert!(volume.created.is_some());
    }
}
