//! Support tickets.

use chrono::{DateTime, Utc};
use linode_core::dates::{nullable_string, parse_date, NormalizeDates};
use linode_core::ids::TicketId;
use linode_core::types::EntityId;
use serde::{Deserialize, Serialize};

use crate::Result;

/// A support ticket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    /// Ticket ID.
    pub id: TicketId,
    /// One-line summary.
    #[serde(default)]
    pub summary: String,
    /// Full description.
    #[serde(default)]
    pub description: String,
    /// `new`, `open` or `closed`.
    #[serde(default)]
    pub status: String,
    /// Attachment file names.
    #[serde(default)]
    pub attachments: Vec<String>,
    /// Entity the ticket refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<TicketEntity>,
    /// Gravatar ID of the opener.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gravatar_id: Option<String>,
    /// User who opened the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_by: Option<String>,
    /// User who last updated the ticket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    /// Opening time as sent by the provider.
    #[serde(rename = "opened", default, deserialize_with = "nullable_string")]
    pub opened_str: String,
    /// Closing time as sent by the provider.
    #[serde(rename = "closed", default, deserialize_with = "nullable_string")]
    pub closed_str: String,
    /// Last update time as sent by the provider.
    #[serde(rename = "updated", default, deserialize_with = "nullable_string")]
    pub updated_str: String,
    /// Parsed opening time.
    #[serde(skip)]
    pub opened: Option<DateTime<Utc>>,
    /// Parsed closing time.
    #[serde(skip)]
    pub closed: Option<DateTime<Utc>>,
    /// Parsed last update time.
    #[serde(skip)]
    pub updated: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Returns true once the ticket has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == "closed" || self.closed.is_some()
    }
}

impl NormalizeDates for Ticket {
    fn normalize_dates(&mut self) -> Result<()> {
        self.opened = parse_date(&self.opened_str)?;
        self.closed = parse_date(&self.closed_str)?;
        self.updated = parse_date(&self.updated_str)?;
        Ok(())
    }
}

/// Entity reference carried by a [`Ticket`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketEntity {
    /// Entity ID.
    pub id: EntityId,
    /// Entity label.
    #[serde(default)]
    pub label: String,
    /// Entity type.
    #[serde(rename = "type", default)]
    pub entity_type: String,
    /// API URL of the entity.
    #[serde(default)]
    pub url: String,
}
