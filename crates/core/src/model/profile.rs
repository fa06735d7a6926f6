use chrono::{DateTime, Utc};
use url::Url;

use crate::error::ValidationError;
use crate::model::ids::UserId;

/// Stored profile of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    user_id: UserId,
    display_name: Option<String>,
    email: Option<String>,
    photo_url: Option<String>,
    created_at: DateTime<Utc>,
}

/// Fields a sign-in can write. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn normalized(self) -> Result<Self, ValidationError> {
        let photo_url = normalize_optional(self.photo_url);
        if let Some(url) = photo_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(ValidationError::InvalidPhotoUrl);
            }
        }
        Ok(Self {
            display_name: normalize_optional(self.display_name),
            email: normalize_optional(self.email),
            photo_url,
        })
    }
}

impl UserProfile {
    /// First write of a profile.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhotoUrl` for an unparsable photo URL.
    pub fn create(
        user_id: UserId,
        update: ProfileUpdate,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let update = update.normalized()?;
        Ok(Self {
            user_id,
            display_name: update.display_name,
            email: update.email,
            photo_url: update.photo_url,
            created_at: now,
        })
    }

    /// Rehydrate from storage.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the stored photo URL no longer parses.
    pub fn from_persisted(
        user_id: UserId,
        display_name: Option<String>,
        email: Option<String>,
        photo_url: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        Self::create(
            user_id,
            ProfileUpdate {
                display_name,
                email,
                photo_url,
            },
            created_at,
        )
    }

    /// Applies `update` on top of this profile, keeping `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhotoUrl` for an unparsable photo URL.
    pub fn merged(&self, update: ProfileUpdate) -> Result<Self, ValidationError> {
        let update = update.normalized()?;
        Ok(Self {
            user_id: self.user_id.clone(),
            display_name: update.display_name.or_else(|| self.display_name.clone()),
            email: update.email.or_else(|| self.email.clone()),
            photo_url: update.photo_url.or_else(|| self.photo_url.clone()),
            created_at: self.created_at,
        })
    }

    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn photo_url(&self) -> Option<&str> {
        self.photo_url.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn display_name_or_default(&self) -> &str {
        self.display_name().unwrap_or("User")
    }

    /// Avatar fallback: first letters of the first and last name, or "U".
    #[must_use]
    pub fn initials(&self) -> String {
        let Some(name) = self.display_name() else {
            return "U".to_string();
        };
        let parts: Vec<&str> = name.split_whitespace().collect();
        match parts.as_slice() {
            [] => "U".to_string(),
            [only] => first_char(only).map_or_else(|| "U".to_string(), String::from),
            [first, .., last] => first_char(first)
                .into_iter()
                .chain(first_char(last))
                .collect(),
        }
    }
}

fn first_char(part: &str) -> Option<char> {
    part.chars().next()
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
