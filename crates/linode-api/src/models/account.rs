//! Account details, invoices and notifications.

use chrono::{DateTime, Utc};
use linode_core::dates::{nullable_string, parse_date, NormalizeDates};
use linode_core::ids::InvoiceId;
use linode_core::types::EntityId;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Contact and billing details of the account.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// First name of the account holder.
    #[serde(default)]
    pub first_name: String,
    /// Last name of the account holder.
    #[serde(default)]
    pub last_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Company name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// First address line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_1: Option<String>,
    /// Second address line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_2: Option<String>,
    /// City.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// State or province.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Postal code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    /// Two-letter country code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Tax identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_id: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Outstanding balance in USD.
    #[serde(default)]
    pub balance: f64,
    /// Card on file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card: Option<CreditCard>,
}

/// Masked card on file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreditCard {
    /// Last four digits.
    #[serde(default)]
    pub last_four: String,
    /// Expiry as `MM/YYYY`.
    #[serde(default)]
    pub expiry: String,
}

/// An invoice for billable activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Invoice total in USD.
    #[serde(default)]
    pub total: f64,

    /// Invoice date as sent by the provider.
    #[serde(rename = "date", default, deserialize_with = "nullable_string")]
    pub date_str: String,
    /// Parsed invoice date.
    #[serde(skip)]
    pub date: Option<DateTime<Utc>>,
}

impl NormalizeDates for Invoice {
    fn normalize_dates(&mut self) -> Result<()> {
        self.date = parse_date(&self.date_str)?;
        Ok(())
    }
}

/// A single billable line of an [`Invoice`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvoiceItem {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Item type (hourly, prepay, misc).
    #[serde(rename = "type", default)]
    pub item_type: String,
    /// Unit price.
    #[serde(default)]
    pub unit_price: serde_json::Value,
    /// Quantity.
    #[serde(default)]
    pub quantity: u64,
    /// Amount in USD.
    #[serde(default)]
    pub amount: f64,

    /// Start of the billed period as sent by the provider.
    #[serde(rename = "from", default, deserialize_with = "nullable_string")]
    pub from_str: String,
    /// End of the billed period as sent by the provider.
    #[serde(rename = "to", default, deserialize_with = "nullable_string")]
    pub to_str: String,
    /// Parsed start of the billed period.
    #[serde(skip)]
    pub from: Option<DateTime<Utc>>,
    /// Parsed end of the billed period.
    #[serde(skip)]
    pub to: Option<DateTime<Utc>>,
}

impl NormalizeDates for InvoiceItem {
    fn normalize_dates(&mut self) -> Result<()> {
        self.from = parse_date(&self.from_str)?;
        self.to = parse_date(&self.to_str)?;
        Ok(())
    }
}

/// A time-sensitive notice about the account.
///
/// Notifications cannot be dismissed directly; they disappear once their cause is resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    /// Display label.
    #[serde(default)]
    pub label: String,
    /// Notice text.
    #[serde(default)]
    pub message: String,
    /// Notification type, e.g. `ticket_important`.
    #[serde(rename = "type", default)]
    pub notification_type: String,
    /// `minor`, `major` or `critical`.
    #[serde(default)]
    pub severity: String,
    /// Entity that triggered the notification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<NotificationEntity>,

    /// Expiry time as sent by the provider.
    #[serde(rename = "until", default, deserialize_with = "nullable_string")]
    pub until_str: String,
    /// Start time as sent by the provider.
    #[serde(rename = "when", default, deserialize_with = "nullable_string")]
    pub when_str: String,
    /// Parsed expiry time.
    #[serde(skip)]
    pub until: Option<DateTime<Utc>>,
    /// Parsed start time.
    #[serde(skip)]
    pub when: Option<DateTime<Utc>>,
}

impl NormalizeDates for Notification {
    fn normalize_dates(&mut self) -> Result<()> {
        self.until = parse_date(&self.until_str)?;
        self.when = parse_date(&self.when_str)?;
        Ok(())
    }
}

/// Entity reference carried by a [`Notification`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationEntity {
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

no_dates!(Account);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;
    use serde_json::json;

    #[test]
    fn invoice_item_period() {
        let mut item: InvoiceItem = serde_json::from_value(json!({
            "label": "Linode 2048 - Example",
            "type": "hourly",
            "unit_price": "0.015",
            "quantity": 720,
            "amount": 10.8,
            "from": "2018-01-01T00:01:01",
            "to": "2018-01-31T11:59:59"
        }))
        .unwrap();
        item.normalize_dates().unwrap();

        assert_eq!(item.from.unwrap().day(), 1);
        assert_eq!(item.to.unwrap().day(), 31);
        assert_eq!(item.item_type, "hourly");
    }

    #[test]
    fn notification_optional_window() {
        let mut notification: Notification = serde_json::from_value(json!({
            "label": "You have an important ticket open!",
            "message": "You have an important ticket open!",
            "type": "ticket_important",
            "severity": "major",
            "entity": {"id": 3456, "label": "Any Label", "type": "ticket",
                       "url": "/support/tickets/3456"},
            "when": null,
            "until": null
        }))
        .unwrap();
        notification.normalize_dates().unwrap();

        assert!(notification.when.is_none());
        assert!(notification.until.is_none());
        assert_eq!(notification.entity.unwrap().entity_type, "ticket");
    }

    #[test]
    fn account_balance_and_card() {
        let account: Account = serde_json::from_value(json!({
            "first_name": "John",
            "last_name": "Smith",
            "email": "john.smith@linode.com",
            "balance": 200.0,
            "credit_card": {"last_four": "1111", "expiry": "11/2022"}
        }))
        .unwrap();

        assert!((account.balance - 200.0).abs() < f64::EPSILON);
        assert_eq!(account.credit_card.unwrap().last_four, "1111");
    }
}
