//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

use crate::utils::user_agent::DeviceType;

/// A shortened URL with optional device-specific destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub short_code: String,
    pub long_url_desktop: String,
    pub long_url_mobile: Option<String>,
    pub name: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if the link has an expiry strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry.is_some_and(|expiry| now > expiry)
    }

    /// Returns true if `owner_id` created this link.
    pub fn is_owned_by(&self, owner_id: i64) -> bool {
        self.created_by == owner_id
    }

    /// Picks the redirect destination for a visitor's device.
    ///
    /// Mobile visitors get the mobile URL when one is set. Everyone else gets the
    /// desktop URL, and the mobile URL is used only if the desktop one is blank.
    /// Returns `None` when the link has no usable destination at all.
    pub fn target_for(&self, device: DeviceType) -> Option<&str> {
        let desktop = non_blank(Some(self.long_url_desktop.as_str()));
        let mobile = non_blank(self.long_url_mobile.as_deref());

        if device.is_mobile()
            && let Some(mobile) = mobile
        {
            return Some(mobile);
        }

        desktop.or(mobile)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub short_code: String,
    pub long_url_desktop: String,
    pub long_url_mobile: Option<String>,
    pub name: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub created_by: i64,
}

impl NewLink {
    /// Builds the row to insert for a given short code.
    pub fn from_fields(short_code: String, fields: &CreateLink, created_by: i64) -> Self {
        Self {
            short_code,
            long_url_desktop: fields.long_url_desktop.clone().unwrap_or_default(),
            long_url_mobile: fields.long_url_mobile.clone(),
            name: fields.name.clone(),
            expiry: fields.expiry,
            image_url: fields.image_url.clone(),
            created_by,
        }
    }
}

/// Caller-supplied fields for link creation, before validation.
///
/// `long_url_desktop` is optional here so a missing value surfaces as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateLink {
    pub long_url_desktop: Option<String>,
    pub long_url_mobile: Option<String>,
    pub name: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub short_code: Option<String>,
}

/// Result of an atomic link insert.
///
/// The store reports a short-code collision as a value rather than an error so
/// callers can retry with a fresh code.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Created(Link),
    CodeTaken,
}
