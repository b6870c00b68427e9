//! OpenAPI schema definitions for wire-level types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`; the
//! wrappers here exist only so utoipa can document the error envelope.

use utoipa::ToSchema;

/// OpenAPI schema for the error envelope.
///
/// Every error response carries a single `error` field with a
/// human-readable message.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Human-readable failure description.
    #[schema(example = "patient 3fa85f64-5717-4562-b3fc-2c963f66afa6 not found")]
    error: String,
}
