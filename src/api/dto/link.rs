//! DTOs for link creation and listing.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::{CreateLink, Link};
use crate::error::AppError;
use crate::utils::timestamp::parse_timestamp;

static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

/// Request body for `POST /links`.
///
/// `longUrlDesktop` is optional at the serde level so that a missing value is
/// reported as a validation error by the service.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub long_url_desktop: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub long_url_mobile: Option<String>,

    #[validate(length(max = 255))]
    pub name: Option<String>,

    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    pub expiry: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub image_url: Option<String>,

    #[validate(length(min = 4, max = 20, message = "Short code must be between 4 and 20 characters"))]
    #[validate(regex(path = "*SHORT_CODE_REGEX", message = "Short code must be alphanumeric"))]
    pub short_code: Option<String>,
}

impl CreateLinkRequest {
    /// Converts the request into service input, parsing `expiry`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `expiry` is not a valid timestamp.
    pub fn into_fields(self) -> Result<CreateLink, AppError> {
        let expiry = match self.expiry.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(parse_timestamp(raw).ok_or_else(|| {
                AppError::bad_request(
                    "Expiry must be a valid ISO 8601 date",
                    json!({ "field": "expiry", "value": raw }),
                )
            })?),
        };

        Ok(CreateLink {
            long_url_desktop: self.long_url_desktop,
            long_url_mobile: self.long_url_mobile,
            name: self.name,
            expiry,
            image_url: self.image_url,
            short_code: self.short_code,
        })
    }
}

/// Link as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub short_code: String,
    pub short_url: String,
    pub long_url_desktop: String,
    pub long_url_mobile: Option<String>,
    pub name: Option<String>,
    pub expiry: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LinkResponse {
    pub fn new(link: Link, short_url: String) -> Self {
        Self {
            id: link.id,
            short_code: link.short_code,
            short_url,
            long_url_desktop: link.long_url_desktop,
            long_url_mobile: link.long_url_mobile,
            name: link.name,
            expiry: link.expiry,
            image_url: link.image_url,
            created_at: link.created_at,
        }
    }
}

/// Response body for `POST /links`.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub message: String,
    pub link: LinkResponse,
}

/// Response body for `GET /links/mine`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkListResponse {
    pub total_links: usize,
    pub links: Vec<LinkResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let req: CreateLinkRequest = serde_json::from_value(json!({
            "longUrlDesktop": "https://example.com",
            "longUrlMobile": "https://m.example.com",
            "shortCode": "promo1",
            "expiry": "2030-01-01"
        }))
        .unwrap();

        assert!(req.validate().is_ok());
        let fields = req.into_fields().unwrap();
        assert_eq!(fields.long_url_desktop.as_deref(), Some("https://example.com"));
        assert_eq!(fields.short_code.as_deref(), Some("promo1"));
        assert!(fields.expiry.is_some());
    }

    #[test]
    fn test_request_validation_rejects_bad_values() {
        let req = CreateLinkRequest {
            long_url_desktop: Some("not a url".to_string()),
            short_code: Some("abc".to_string()),
            ..Default::default()
        };

        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("long_url_desktop"));
        assert!(fields.contains_key("short_code"));
    }

    #[test]
    fn test_request_validation_rejects_symbols_in_short_code() {
        let req = CreateLinkRequest {
            long_url_desktop: Some("https://example.com".to_string()),
            short_code: Some("my-code".to_string()),
            ..Default::default()
        };

        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("short_code"));
    }

    #[test]
    fn test_invalid_expiry_is_validation_error() {
        let req = CreateLinkRequest {
            long_url_desktop: Some("https://example.com".to_string()),
            expiry: Some("next tuesday".to_string()),
            ..Default::default()
        };

        assert!(matches!(
            req.into_fields(),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_blank_expiry_is_ignored() {
        let req = CreateLinkRequest {
            expiry: Some(" ".to_string()),
            ..Default::default()
        };

        assert!(req.into_fields().unwrap().expiry.is_none());
    }
}
