//! Per-transaction JWT claims for row-level security.
//!
//! The catalog policies read `request.jwt.claims`; writes are allowed only
//! when it names a subject whose `app_metadata.role` or top-level
//! `user_role` is `admin`.

use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::DbError;

const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// The subset of JWT claims the policies inspect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default)]
    pub app_metadata: AppMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,
}

impl JwtClaims {
    /// Claims for an authenticated admin.
    #[must_use]
    pub fn admin(sub: impl Into<String>) -> Self {
        Self {
            sub: Some(sub.into()),
            app_metadata: AppMetadata {
                role: Some(ADMIN_ROLE.to_owned()),
            },
            user_role: None,
        }
    }

    /// Claims for an authenticated principal without a role.
    #[must_use]
    pub fn authenticated(sub: impl Into<String>) -> Self {
        Self {
            sub: Some(sub.into()),
            app_metadata: AppMetadata::default(),
            user_role: None,
        }
    }

    /// Mirrors `request_is_admin()` in the row-level security migration.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.sub.is_some()
            && (self.app_metadata.role.as_deref() == Some(ADMIN_ROLE)
                || self.user_role.as_deref() == Some(ADMIN_ROLE))
    }
}

/// Opens a transaction with `claims` installed as `request.jwt.claims`.
///
/// The setting is transaction-local and disappears on commit or rollback.
///
/// # Errors
///
/// Returns [`DbError::InvalidData`] if the claims cannot be serialized, or
/// [`DbError::Sqlx`] if the transaction cannot be started.
pub async fn begin_with_claims(
    pool: &PgPool,
    claims: &JwtClaims,
) -> Result<Transaction<'static, Postgres>, DbError> {
    let encoded =
        serde_json::to_string(claims).map_err(|e| DbError::InvalidData(e.to_string()))?;

    let mut tx = pool.begin().await?;
    sqlx::query("SELECT set_config('request.jwt.claims', $1, true)")
        .bind(encoded)
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}
