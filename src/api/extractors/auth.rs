use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, StatusCode},
};
use crate::domain::models::user::ROLE_ADMIN;
use crate::state::AppState;
use std::sync::Arc;
use tracing::Span;

/// Identity taken from a `Authorization: Bearer <jwt>` header.
pub struct AuthUser {
    pub id: String,
    pub role: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts.headers.get(header::AUTHORIZATION)
            .ok_or(StatusCode::UNAUTHORIZED)?
            .to_str()
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        let token = header_value.strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let claims = app_state.auth_service.decode_token(token)
            .map_err(|_| StatusCode::UNAUTHORIZED)?;

        Span::current().record("user_id", claims.sub.as_str());

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}

/// Same as [`AuthUser`] but rejects non-admin roles with 403.
pub struct AdminUser(pub AuthUser);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if user.role != ROLE_ADMIN {
            return Err(StatusCode::FORBIDDEN);
        }

        Ok(AdminUser(user))
    }
}
