//! Linode instances and their disks, configuration profiles and backups.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use linode_core::dates::{nullable_string, parse_date, NormalizeDates};
use linode_core::ids::{ConfigId, DiskId, InstanceId, SnapshotId};
use serde::{Deserialize, Serialize};

use crate::Result;

/// A Linode compute instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instance {
    /// Instance ID.
    pub id: InstanceId,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Region the instance runs in.
    #[serde(default)]
    pub region: String,
    /// Image the instance was deployed from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Plan type, e.g. `g6-standard-1`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    /// Display group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Lifecycle status (running, offline, booting, ...).
    #[serde(default)]
    pub status: String,
    /// Hypervisor (kvm or xen).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hypervisor: Option<String>,
    /// Public and private IPv4 addresses.
    #[serde(default)]
    pub ipv4: Vec<String>,
    /// SLAAC IPv6 address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<String>,
    /// Resource allocation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<InstanceSpec>,
    /// Alert thresholds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<InstanceAlert>,
    /// Backup service state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backups: Option<InstanceBackup>,

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

impl NormalizeDates for Instance {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        self.updated = parse_date(&self.updated_str)?;
        Ok(())
    }
}

/// Resources allocated to an instance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceSpec {
    /// Disk space in MB.
    #[serde(default)]
    pub disk: u64,
    /// Memory in MB.
    #[serde(default)]
    pub memory: u64,
    /// Virtual CPUs.
    #[serde(default)]
    pub vcpus: u32,
    /// Monthly transfer quota in GB.
    #[serde(default)]
    pub transfer: u64,
}

/// Alert thresholds configured on an instance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceAlert {
    /// CPU usage percentage.
    #[serde(default)]
    pub cpu: u32,
    /// Disk IO operations per second.
    #[serde(default)]
    pub io: u32,
    /// Inbound network Mb/s.
    #[serde(default)]
    pub network_in: u32,
    /// Outbound network Mb/s.
    #[serde(default)]
    pub network_out: u32,
    /// Percentage of the transfer quota.
    #[serde(default)]
    pub transfer_quota: u32,
}

/// Backup service state of an instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceBackup {
    /// Whether backups are enabled.
    #[serde(default)]
    pub enabled: bool,
    /// When automatic backups run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<InstanceBackupSchedule>,
}

/// Automatic backup window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceBackupSchedule {
    /// Day of week, e.g. `Saturday`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    /// Two-hour window, e.g. `W22`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<String>,
}

/// A disk attached to an instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceDisk {
    /// Disk ID.
    pub id: DiskId,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Disk status (ready, not ready, deleting).
    #[serde(default)]
    pub status: String,
    /// Size in MB.
    #[serde(default)]
    pub size: u64,
    /// Filesystem (raw, swap, ext3, ext4, initrd).
    #[serde(default)]
    pub filesystem: String,

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

impl NormalizeDates for InstanceDisk {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        self.updated = parse_date(&self.updated_str)?;
        Ok(())
    }
}

/// A configuration profile used to boot an instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceConfig {
    /// Configuration ID.
    pub id: ConfigId,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    /// Device slot assignments (`sda`, `sdb`, ...).
    #[serde(default)]
    pub devices: HashMap<String, Option<serde_json::Value>>,
    /// Boot helpers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpers: Option<InstanceConfigHelpers>,
    /// Memory limit in MB, 0 for unlimited.
    #[serde(default)]
    pub memory_limit: u64,
    /// Kernel ID.
    #[serde(default)]
    pub kernel: String,
    /// Root device path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_device: Option<String>,
    /// Run level (default, single, binbash).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_level: Option<String>,
    /// Virtualization mode (paravirt, fullvirt).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub virt_mode: Option<String>,

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

impl NormalizeDates for InstanceConfig {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        self.updated = parse_date(&self.updated_str)?;
        Ok(())
    }
}

/// Boot helpers of a configuration profile.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceConfigHelpers {
    /// Disable updatedb.
    #[serde(default)]
    pub updatedb_disabled: bool,
    /// Distro-specific helper.
    #[serde(default)]
    pub distro: bool,
    /// Create `modules.dep`.
    #[serde(default)]
    pub modules_dep: bool,
    /// Automatic network configuration.
    #[serde(default)]
    pub network: bool,
    /// Mount devtmpfs automatically.
    #[serde(default)]
    pub devtmpfs_automount: bool,
}

/// A backup or manual snapshot of an instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceSnapshot {
    /// Backup ID.
    pub id: SnapshotId,
    /// Display label (manual snapshots only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Backup status.
    #[serde(default)]
    pub status: String,
    /// `auto` or `snapshot`.
    #[serde(rename = "type", default)]
    pub snapshot_type: String,
    /// Labels of the configuration profiles included.
    #[serde(default)]
    pub configs: Vec<String>,
    /// Disks included.
    #[serde(default)]
    pub disks: Vec<InstanceSnapshotDisk>,

    /// Creation time as sent by the provider.
    #[serde(rename = "created", default, deserialize_with = "nullable_string")]
    pub created_str: String,
    /// Last update time as sent by the provider.
    #[serde(rename = "updated", default, deserialize_with = "nullable_string")]
    pub updated_str: String,
    /// Completion time as sent by the provider.
    #[serde(rename = "finished", default, deserialize_with = "nullable_string")]
    pub finished_str: String,
    /// Parsed creation time.
    #[serde(skip)]
    pub created: Option<DateTime<Utc>>,
    /// Parsed last update time.
    #[serde(skip)]
    pub updated: Option<DateTime<Utc>>,
    /// Parsed completion time.
    #[serde(skip)]
    pub finished: Option<DateTime<Utc>>,
}

impl NormalizeDates for InstanceSnapshot {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        self.updated = parse_date(&self.updated_str)?;
        self.finished = parse_date(&self.finished_str)?;
        Ok(())
    }
}

/// A disk captured by a backup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InstanceSnapshotDisk {
    /// Disk label.
    #[serde(default)]
    pub label: String,
    /// Size in MB.
    #[serde(default)]
    pub size: u64,
    /// Filesystem.
    #[serde(default)]
    pub filesystem: String,
}

/// Response of `linode/instances/{id}/backups`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstanceBackupsResponse {
    /// Automatic backups, newest last.
    #[serde(default)]
    pub automatic: Vec<InstanceSnapshot>,
    /// Manual snapshot slots.
    #[serde(default)]
    pub snapshot: InstanceBackupSnapshots,
}

/// Current and in-progress manual snapshots.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstanceBackupSnapshots {
    /// Latest completed snapshot.
    #[serde(default)]
    pub current: Option<InstanceSnapshot>,
    /// Snapshot being taken.
    #[serde(default)]
    pub in_progress: Option<InstanceSnapshot>,
}

impl NormalizeDates for InstanceBackupsResponse {
    fn normalize_dates(&mut self) -> Result<()> {
        self.automatic.normalize_dates()?;
        self.snapshot.current.normalize_dates()?;
        self.snapshot.in_progress.normalize_dates()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn instance_deserialize_and_normalize() {
        let mut instance: Instance = serde_json::from_value(json!({
            "id": 123,
            "label": "web-1",
            "region": "us-east",
            "image": "linode/debian9",
            "type": "g6-standard-1",
            "status": "running",
            "ipv4": ["203.0.113.10"],
            "ipv6": "2600:3c03::f03c:91ff:fe24:3a2f/64",
            "specs": {"disk": 51200, "memory": 2048, "vcpus": 1, "transfer": 2000},
            "backups": {"enabled": true, "schedule": {"day": "Saturday", "window": "W22"}},
            "created": "2018-01-01T00:01:01",
            "updated": "2018-01-02T03:04:05"
        }))
        .unwrap();
        instance.normalize_dates().unwrap();

        assert_eq!(instance.id, InstanceId::new(123));
        assert_eq!(instance.instance_type.as_deref(), Some("g6-standard-1"));
        assert_eq!(instance.specs.unwrap().memory, 2048);
        let updated = instance.updated.unwrap();
        assert_eq!((updated.day(), updated.hour(), updated.second()), (2, 3, 5));
        assert_eq!(instance.created.unwrap().year(), 2018);
    }

    #[test]
    fn instance_serializes_wire_timestamps() {
        let instance: Instance = serde_json::from_value(json!({
            "id": 1,
            "created": "2018-01-01T00:01:01",
            "updated": null
        }))
        .unwrap();

        let value = serde_json::to_value(&instance).unwrap();
        assert_eq!(value["created"], "2018-01-01T00:01:01");
        assert_eq!(value["updated"], "");
        assert!(value.get("created_str").is_none());
    }

    #[test]
    fn malformed_timestamp_fails_normalization() {
        let mut disk: InstanceDisk = serde_json::from_value(json!({
            "id": 5,
            "label": "boot",
            "created": "01/02/2018"
        }))
        .unwrap();

        assert!(disk.normalize_dates().is_err());
    }

    #[test]
    fn backups_response_normalizes_nested_snapshots() {
        let mut backups: InstanceBackupsResponse = serde_json::from_value(json!({
            "automatic": [
                {"id": 1, "type": "auto", "status": "successful",
                 "created": "2018-01-01T00:00:00", "finished": "2018-01-01T00:10:00"}
            ],
            "snapshot": {
                "current": null,
                "in_progress": {"id": 2, "type": "snapshot", "label": "pre-upgrade",
                                "status": "running", "created": "2018-01-03T00:00:00"}
            }
        }))
        .unwrap();
        backups.normalize_dates().unwrap();

        assert_eq!(backups.automatic[0].finished.unwrap().minute(), 10);
        let in_progress = backups.snapshot.in_progress.unwrap();
        assert_eq!(in_progress.label.as_deref(), Some("pre-upgrade"));
        assert!(in_progress.created.is_some());
        assert!(in_progress.finished.is_none());
    }

    #[test]
    fn config_devices_allow_empty_slots() {
        let config: InstanceConfig = serde_json::from_value(json!({
            "id": 9,
            "label": "My Debian Profile",
            "kernel": "linode/latest-64bit",
            "devices": {"sda": {"disk_id": 5, "volume_id": null}, "sdb": null},
            "helpers": {"network": true, "distro": true}
        }))
        .unwrap();

        assert_eq!(config.devices.len(), 2);
        assert!(config.devices["sdb"].is_none());
        assert!(config.helpers.unwrap().network);
    }
}
