//! Tenant identity.
//!
//! Every persisted row belongs to exactly one tenant. Repository ports take a
//! [`TenantId`] so cross-tenant reads cannot be expressed at the type level.

use uuid::Uuid;

/// Opaque tenant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TenantId(Uuid);

/// Validation errors for tenant identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TenantIdValidationError {
    #[error("tenant id must be a valid UUID")]
    InvalidUuid,
}

impl TenantId {
    /// Parse a tenant id from its canonical string form.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TenantIdValidationError> {
        Uuid::parse_str(raw.as_ref())
            .map(Self)
            .map_err(|_| TenantIdValidationError::InvalidUuid)
    }

    /// Wrap an already-validated UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Borrow the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Generate a random tenant id (test fixtures).
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
