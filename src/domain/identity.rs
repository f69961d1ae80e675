//! Identity domain entity - the authenticatable account.
//!
//! An identity is composed of a credential ([`Password`]) and a set of
//! [`Permissions`]; the two capability traits below expose each part.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::password::Password;

/// Something that can log in: has a unique login key and a credential.
pub trait Authenticatable {
    /// Unique key used to look the account up at login.
    fn login_key(&self) -> &str;

    /// Stored credential.
    fn password(&self) -> &Password;

    /// Inactive accounts cannot authenticate.
    fn is_active(&self) -> bool;

    /// Check a raw password against the stored credential.
    fn check_password(&self, raw: &str) -> bool {
        self.password().verify(raw)
    }
}

/// Something that carries the staff / superuser flags.
pub trait PermissionBearing {
    fn permissions(&self) -> &Permissions;

    fn is_staff(&self) -> bool {
        self.permissions().is_staff
    }

    fn is_superuser(&self) -> bool {
        self.permissions().is_superuser
    }
}

/// Elevation flags of an identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Permissions {
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl Permissions {
    /// Staff and superuser.
    pub fn elevated() -> Self {
        Self {
            is_staff: true,
            is_superuser: true,
        }
    }
}

/// Identity domain entity
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    /// Canonical email (see [`normalize_email`])
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub permissions: Permissions,
    pub password: Password,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Build a fresh, unsaved identity from already-normalized parts.
    pub fn new(email: String, password: Password, extra: NewIdentity) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            name: extra.name,
            is_active: extra.is_active,
            permissions: extra.permissions,
            password,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the identity as logged in now.
    pub fn touch_login(&mut self) {
        self.last_login = Some(Utc::now());
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }

    pub fn elevate(&mut self) {
        self.permissions = Permissions::elevated();
        self.updated_at = Utc::now();
    }

    pub fn update_name(&mut self, name: String) {
        self.name = name;
        self.updated_at = Utc::now();
    }

    pub fn update_password(&mut self, password: Password) {
        self.password = password;
        self.updated_at = Utc::now();
    }
}

impl Authenticatable for Identity {
    fn login_key(&self) -> &str {
        &self.email
    }

    fn password(&self) -> &Password {
        &self.password
    }

    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl PermissionBearing for Identity {
    fn permissions(&self) -> &Permissions {
        &self.permissions
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.email)
    }
}

/// Optional attributes supplied when creating an identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIdentity {
    pub name: String,
    pub is_active: bool,
    pub permissions: Permissions,
}

impl Default for NewIdentity {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            permissions: Permissions::default(),
        }
    }
}

impl NewIdentity {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Canonical form of an email address.
///
/// Surrounding whitespace is trimmed and the domain part (after the last
/// `@`) is lowercased. The local part is left as typed, since mail servers
/// may treat it case-sensitively.
pub fn normalize_email(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => trimmed.to_string(),
    }
}

/// Identity response (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IdentityResponse {
    /// Unique identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// Login email (canonical form)
    #[schema(example = "cook@example.com")]
    pub email: String,
    /// Display name
    #[schema(example = "Julia Child")]
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            is_staff: identity.is_staff(),
            id: identity.id,
            email: identity.email,
            name: identity.name,
            is_active: identity.is_active,
            created_at: identity.created_at,
        }
    }
}
