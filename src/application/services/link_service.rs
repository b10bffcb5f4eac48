//! Link creation and retrieval service.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::entities::{CreateLink, InsertOutcome, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_code, validate_custom_code};

/// Upper bound on fresh candidates tried when generated codes keep colliding.
const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating and retrieving short links.
///
/// Generated codes rely on the store's atomic insert: a [`InsertOutcome::CodeTaken`]
/// result is the retry trigger, so there is no check-then-insert window.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    pub fn new(repository: Arc<L>) -> Self {
        Self { repository }
    }

    /// Creates a link owned by `owner_id`.
    ///
    /// # Code Selection
    ///
    /// - If `fields.short_code` is set, it is validated and must be unused
    /// - Otherwise a 6-character code is generated, retrying on collision up to 10 times
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the desktop URL is missing or any URL
    /// or the custom code is malformed.
    ///
    /// Returns [`AppError::Conflict`] if the custom code is already in use.
    ///
    /// Returns [`AppError::Internal`] if no free code was found or the store fails.
    pub async fn create_link(&self, owner_id: i64, fields: CreateLink) -> Result<Link, AppError> {
        let fields = normalize_fields(fields)?;

        match fields.short_code.clone() {
            Some(custom) => self.create_with_custom_code(owner_id, custom, &fields).await,
            None => self.create_with_generated_code(owner_id, &fields).await,
        }
    }

    async fn create_with_custom_code(
        &self,
        owner_id: i64,
        code: String,
        fields: &CreateLink,
    ) -> Result<Link, AppError> {
        validate_custom_code(&code)?;

        if self.repository.exists_by_code(&code).await? {
            return Err(code_in_use(&code));
        }

        let new_link = NewLink::from_fields(code.clone(), fields, owner_id);
        match self.repository.insert(new_link).await? {
            InsertOutcome::Created(link) => {
                info!(link_id = link.id, short_code = %link.short_code, owner_id, "Link created");
                Ok(link)
            }
            InsertOutcome::CodeTaken => Err(code_in_use(&code)),
        }
    }

    async fn create_with_generated_code(
        &self,
        owner_id: i64,
        fields: &CreateLink,
    ) -> Result<Link, AppError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let code = generate_code(DEFAULT_CODE_LENGTH);
            let new_link = NewLink::from_fields(code, fields, owner_id);

            match self.repository.insert(new_link).await? {
                InsertOutcome::Created(link) => {
                    info!(link_id = link.id, short_code = %link.short_code, owner_id, "Link created");
                    return Ok(link);
                }
                InsertOutcome::CodeTaken => {
                    debug!(attempt, "Generated short code collided, retrying");
                }
            }
        }

        warn!(owner_id, "Exhausted short code attempts");
        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    pub async fn get_by_short_code(&self, short_code: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| link_not_found(json!({ "short_code": short_code })))
    }

    /// Retrieves a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    pub async fn get_by_id(&self, id: i64) -> Result<Link, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| link_not_found(json!({ "id": id })))
    }

    /// Lists every link owned by `owner_id`, newest first.
    pub async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.repository.list_by_owner(owner_id).await
    }

    /// Checks that the link store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    /// Builds the public short URL for a code.
    pub fn get_short_url(&self, base_url: &str, short_code: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), short_code)
    }
}

fn link_not_found(details: serde_json::Value) -> AppError {
    AppError::not_found("Link not found", details)
}

fn code_in_use(code: &str) -> AppError {
    AppError::conflict(
        "Short code already in use",
        json!({ "field": "shortCode", "short_code": code }),
    )
}

/// Trims optional text, drops blanks and checks every URL field.
fn normalize_fields(fields: CreateLink) -> Result<CreateLink, AppError> {
    let Some(desktop) = non_blank(fields.long_url_desktop) else {
        return Err(AppError::bad_request(
            "Desktop URL is required",
            json!({ "field": "longUrlDesktop" }),
        ));
    };
    validate_url("longUrlDesktop", &desktop)?;

    let mobile = non_blank(fields.long_url_mobile);
    if let Some(mobile) = &mobile {
        validate_url("longUrlMobile", mobile)?;
    }

    let image_url = non_blank(fields.image_url);
    if let Some(image_url) = &image_url {
        validate_url("imageUrl", image_url)?;
    }

    Ok(CreateLink {
        long_url_desktop: Some(desktop),
        long_url_mobile: mobile,
        name: non_blank(fields.name),
        expiry: fields.expiry,
        image_url,
        short_code: non_blank(fields.short_code),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn validate_url(field: &'static str, value: &str) -> Result<(), AppError> {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "field": field, "value": value }),
        ))
    }
}
