use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::CatalogError;

/// A [`CatalogError`] rendered as an HTTP response with a `{"detail": ...}` body.
///
/// Storage failures are logged in full server-side; clients only see a generic
/// message so internal details do not leak.
#[derive(Debug)]
pub struct ApiError(pub CatalogError);

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            CatalogError::ConstraintViolation { .. } => StatusCode::CONFLICT,
            CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CatalogError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = if status.is_server_error() {
            tracing::error!("Internal error: {}", self.0);
            "Internal server error".to_string()
        } else {
            tracing::warn!("Request rejected: {}", self.0);
            self.0.to_string()
        };

        (status, Json(serde_json::json!({ "detail": detail }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EntityKind, ScopePath};

    #[test]
    fn maps_each_error_class_to_a_status() {
        let not_found = ApiError(CatalogError::not_found(
            EntityKind::Menu,
            ScopePath::menu(1),
        ));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict = ApiError(CatalogError::ConstraintViolation {
            kind: EntityKind::Dish,
            reason: "a dish with this title already exists".to_string(),
        });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let invalid = ApiError(CatalogError::Validation("title must not be blank".into()));
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
