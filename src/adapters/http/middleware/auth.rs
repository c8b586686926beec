//! Identity extractor.
//!
//! Authentication lives at the platform gateway; by the time a request
//! reaches this service the gateway has verified the caller and stamped
//! `x-user-id` and `x-user-role` headers. `AuthUser` reads those headers
//! and rejects requests missing either one.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{Role, UserId};

/// The authenticated caller, as asserted by the gateway.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub role: Role,
}

/// Rejection returned when identity headers are missing or malformed.
#[derive(Debug)]
pub struct AuthRejection(String);

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse::unauthorized(self.0)),
        )
            .into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let id = header("x-user-id")
            .ok_or_else(|| AuthRejection("Missing x-user-id header".to_string()))?;
        let id = UserId::new(id)
            .map_err(|_| AuthRejection("Empty x-user-id header".to_string()))?;

        let role = header("x-user-role")
            .ok_or_else(|| AuthRejection("Missing x-user-role header".to_string()))?;
        let role: Role = role
            .parse()
            .map_err(|_| AuthRejection("Unknown x-user-role header".to_string()))?;

        Ok(AuthUser { id, role })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> Result<AuthUser, AuthRejection> {
        let (mut parts, _) = request.into_parts();
        AuthUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn extracts_id_and_role_from_headers() {
        let request = Request::builder()
            .uri("/test")
            .header("x-user-id", "teacher-1")
            .header("x-user-role", "teacher")
            .body(())
            .unwrap();

        let user = extract(request).await.unwrap();
        assert_eq!(user.id.as_str(), "teacher-1");
        assert_eq!(user.role, Role::Teacher);
    }

    #[tokio::test]
    async fn missing_headers_are_rejected() {
        let request = Request::builder().uri("/test").body(()).unwrap();
        assert!(extract(request).await.is_err());
    }

    #[tokio::test]
    async fn unknown_role_is_rejected() {
        let request = Request::builder()
            .uri("/test")
            .header("x-user-id", "u-1")
            .header("x-user-role", "superuser")
            .body(())
            .unwrap();
        assert!(extract(request).await.is_err());
    }
}
