//! Core Linode domain types.
//!
//! This module provides the event log vocabulary shared by the event accessor and the
//! completion poller: event statuses, actions, entity types, and the canonical
//! [`EntityId`] used to compare identifiers that arrive as integers, floats or strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::dates::{parse_date, NormalizeDates};
use crate::error::Result;
use crate::ids::EventId;

/// Generates a wire-string enum with a catch-all `Unknown` variant.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:literal,)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
        pub enum $name {
            $(
                #[doc = concat!("`", $wire, "`")]
                #[serde(rename = $wire)]
                $variant,
            )*
            /// Value not known to this client version
            #[default]
            #[serde(other, rename = "unknown")]
            Unknown,
        }

        impl $name {
            /// Returns the wire representation.
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)*
                    Self::Unknown => "unknown",
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

wire_enum!(
    /// Status of an account event.
    EventStatus {
        Failed => "failed",
        Finished => "finished",
        Notification => "notification",
        Scheduled => "scheduled",
        Started => "started",
    }
);

impl EventStatus {
    /// Returns true for statuses after which no further change is expected.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Finished)
    }
}

wire_enum!(
    /// Type of the entity an event refers to.
    EntityType {
        Linode => "linode",
        Disk => "disk",
        Domain => "domain",
        Image => "image",
        Longview => "longview",
        Nodebalancer => "nodebalancer",
        Stackscript => "stackscript",
        Ticket => "ticket",
        Volume => "volume",
    }
);

wire_enum!(
    /// Operation recorded by an account event.
    EventAction {
        BackupsEnable => "backups_enable",
        BackupsCancel => "backups_cancel",
        BackupsRestore => "backups_restore",
        CommunityQuestionReply => "community_question_reply",
        CreditCardUpdated => "credit_card_updated",
        DiskCreate => "disk_create",
        DiskDelete => "disk_delete",
        DiskDuplicate => "disk_duplicate",
        DiskImagize => "disk_imagize",
        DiskResize => "disk_resize",
        DnsRecordCreate => "dns_record_create",
        DnsRecordDelete => "dns_record_delete",
        DnsZoneCreate => "dns_zone_create",
        DnsZoneDelete => "dns_zone_delete",
        ImageDelete => "image_delete",
        LinodeAddip => "linode_addip",
        LinodeBoot => "linode_boot",
        LinodeClone => "linode_clone",
        LinodeCreate => "linode_create",
        LinodeDelete => "linode_delete",
        LinodeDeleteip => "linode_deleteip",
        LinodeMigrate => "linode_migrate",
        LinodeMutate => "linode_mutate",
        LinodeReboot => "linode_reboot",
        LinodeRebuild => "linode_rebuild",
        LinodeResize => "linode_resize",
        LinodeShutdown => "linode_shutdown",
        LinodeSnapshot => "linode_snapshot",
        LongviewclientCreate => "longviewclient_create",
        LongviewclientDelete => "longviewclient_delete",
        ManagedDisabled => "managed_disabled",
        ManagedServiceCreate => "managed_service_create",
        ManagedServiceDelete => "managed_service_delete",
        NodebalancerCreate => "nodebalancer_create",
        NodebalancerDelete => "nodebalancer_delete",
        NodebalancerConfigCreate => "nodebalancer_config_create",
        NodebalancerConfigDelete => "nodebalancer_config_delete",
        PasswordReset => "password_reset",
        PaymentSubmitted => "payment_submitted",
        StackscriptCreate => "stackscript_create",
        StackscriptDelete => "stackscript_delete",
        StackscriptPublicize => "stackscript_publicize",
        StackscriptRevise => "stackscript_revise",
        TfaDisabled => "tfa_disabled",
        TfaEnabled => "tfa_enabled",
        TicketAttachmentUpload => "ticket_attachment_upload",
        TicketCreate => "ticket_create",
        TicketReply => "ticket_reply",
        VolumeAttach => "volume_attach",
        VolumeClone => "volume_clone",
        VolumeCreate => "volume_create",
        VolumeDelete => "volume_delete",
        VolumeDetach => "volume_detach",
        VolumeResize => "volume_resize",
    }
);

/// Canonical identifier of an event entity.
///
/// The provider reports entity IDs as integers, floats or strings depending on the entity
/// type. All of them are reduced to one string form: integers in decimal, floats rounded to
/// zero fractional digits, strings unchanged. `123`, `123.0` and `"123"` are the same ID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Returns the canonical string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts into the canonical string form.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }

    fn from_float(value: f64) -> Self {
        Self(format!("{value:.0}"))
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

macro_rules! entity_id_from_integer {
    ($($int:ty),*) => {
        $(
            impl From<$int> for EntityId {
                fn from(value: $int) -> Self {
                    Self(value.to_string())
                }
            }
        )*
    };
}

entity_id_from_integer!(u64, u32, i64, i32, usize);

impl From<f64> for EntityId {
    fn from(value: f64) -> Self {
        Self::from_float(value)
    }
}

impl From<f32> for EntityId {
    fn from(value: f32) -> Self {
        Self::from_float(f64::from(value))
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Integer(i64),
            Unsigned(u64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Integer(value) => Self::from(value),
            RawId::Unsigned(value) => Self::from(value),
            RawId::Float(value) => Self::from_float(value),
            RawId::Text(value) => Self(value),
        })
    }
}

/// Entity reference carried by an [`Event`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventEntity {
    /// Entity identifier (numeric or string on the wire)
    #[serde(default)]
    pub id: Option<EntityId>,
    /// Entity label
    #[serde(default)]
    pub label: Option<String>,
    /// Entity type
    #[serde(rename = "type", default)]
    pub entity_type: EntityType,
    /// API URL of the entity
    #[serde(default)]
    pub url: Option<String>,
}

/// An entry of the account event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    /// Event identifier
    pub id: EventId,
    /// Operation that produced the event
    pub action: EventAction,
    /// Current status of the operation
    pub status: EventStatus,
    /// Entity the operation applies to
    #[serde(default)]
    pub entity: Option<EventEntity>,
    /// Creation time as sent by the provider
    #[serde(
        rename = "created",
        default,
        deserialize_with = "crate::dates::nullable_string"
    )]
    pub created_str: String,
    /// Parsed creation time
    #[serde(skip)]
    pub created: Option<DateTime<Utc>>,
    /// Whether the event was marked as seen
    #[serde(default)]
    pub seen: bool,
    /// Whether the event was marked as read
    #[serde(default)]
    pub read: bool,
    /// Completion percentage, when reported
    #[serde(default)]
    pub percent_complete: Option<u32>,
    /// Transfer rate, when reported
    #[serde(default)]
    pub rate: Option<String>,
    /// Estimated time remaining, when reported
    #[serde(default)]
    pub time_remaining: Option<serde_json::Value>,
    /// User that triggered the event
    #[serde(default)]
    pub username: Option<String>,
}

impl Event {
    /// Returns the canonical ID of the referenced entity, if any.
    #[must_use]
    pub fn entity_id(&self) -> Option<&EntityId> {
        self.entity.as_ref().and_then(|entity| entity.id.as_ref())
    }

    /// Returns the type of the referenced entity, if any.
    #[must_use]
    pub fn entity_type(&self) -> Option<EntityType> {
        self.entity.as_ref().map(|entity| entity.entity_type)
    }
}

impl NormalizeDates for Event {
    fn normalize_dates(&mut self) -> Result<()> {
        self.created = parse_date(&self.created_str)?;
        Ok(())
    }
}
