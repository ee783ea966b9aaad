use std::sync::Arc;

use async_graphql::extensions::{Extension, ExtensionContext, ExtensionFactory, NextValidation};
use async_graphql::{Error, ErrorExtensions, ServerError, ValidationResult};
use infra::StoreError;

const VALIDATION_ERROR: &str = "VALIDATION_ERROR";

/// Unified error type for GraphQL resolvers.
///
/// async-graphql has a blanket `impl<T: Display + Send + Sync + 'static> From<T> for Error`,
/// so `?` on a `GqlError` would drop its error code. Convert through
/// [`ResultExt::into_gql`] (or `ErrorExtensions::extend`) instead, which sets
/// `extensions.code` to one of `VALIDATION_ERROR`, `NOT_FOUND`, `CONFLICT`
/// or `STORE_ERROR`.
#[derive(Debug)]
pub enum GqlError {
    Validation(String),
    NotFound(String),
    Conflict(String),
    /// Persistence failure; the detail is logged, never shown to clients.
    Store(String),
}

impl GqlError {
    pub fn validation(msg: impl Into<String>) -> Self {
        GqlError::Validation(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            GqlError::Validation(_) => VALIDATION_ERROR,
            GqlError::NotFound(_) => "NOT_FOUND",
            GqlError::Conflict(_) => "CONFLICT",
            GqlError::Store(_) => "STORE_ERROR",
        }
    }

    fn from_store(e: &StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => GqlError::NotFound(e.to_string()),
            StoreError::Conflict(_) => GqlError::Conflict(e.to_string()),
            StoreError::Database(_) => GqlError::Store(e.to_string()),
        }
    }
}

impl std::fmt::Display for GqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GqlError::Store(detail) => {
                // Log the real error server-side; return a generic message to clients
                tracing::error!("Store error: {detail}");
                write!(f, "Internal store error")
            }
            GqlError::Validation(msg) | GqlError::NotFound(msg) | GqlError::Conflict(msg) => {
                write!(f, "{msg}")
            }
        }
    }
}

impl std::error::Error for GqlError {}

impl ErrorExtensions for GqlError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

impl From<StoreError> for GqlError {
    fn from(e: StoreError) -> Self {
        GqlError::from_store(&e)
    }
}

impl From<Arc<StoreError>> for GqlError {
    fn from(e: Arc<StoreError>) -> Self {
        GqlError::from_store(&e)
    }
}

/// Extension trait that converts a `Result<T, E>` whose error maps onto
/// [`GqlError`] into `async_graphql::Result<T>` carrying the error code.
///
/// Usage: `state.store.find_games(filter).await.into_gql()?`
pub trait ResultExt<T> {
    fn into_gql(self) -> async_graphql::Result<T>;
}

impl<T, E: Into<GqlError>> ResultExt<T> for std::result::Result<T, E> {
    fn into_gql(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.into().extend())
    }
}

/// Schema extension that tags errors raised while validating a document
/// (missing or null required arguments, unknown fields, depth and
/// complexity limits) with `VALIDATION_ERROR`.
pub struct ValidationErrorCode;

impl ExtensionFactory for ValidationErrorCode {
    fn create(&self) -> Arc<dyn Extension> {
        Arc::new(ValidationErrorCode)
    }
}

#[async_trait::async_trait]
impl Extension for ValidationErrorCode {
    async fn validation(
        &self,
        ctx: &ExtensionContext<'_>,
        next: NextValidation<'_>,
    ) -> Result<ValidationResult, Vec<ServerError>> {
        next.run(ctx).await.map_err(|errors| {
            errors
                .into_iter()
                .map(|mut err| {
                    err.extensions
                        .get_or_insert_with(Default::default)
                        .set("code", VALIDATION_ERROR);
                    err
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_category() {
        let not_found = GqlError::from(StoreError::not_found("game", 7));
        assert_eq!(not_found.code(), "NOT_FOUND");
        assert_eq!(not_found.to_string(), "game 7 not found");

        let conflict = GqlError::from(Arc::new(StoreError::Conflict("taken".into())));
        assert_eq!(conflict.code(), "CONFLICT");
    }

    #[test]
    fn database_detail_is_hidden_from_clients() {
        let err = GqlError::from(StoreError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(err.code(), "STORE_ERROR");
        assert_eq!(err.extend().message, "Internal store error");
    }
}
