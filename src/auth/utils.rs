use async_graphql::Context;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
};

pub fn require_admin(claims: &Claims) -> AppResult<()> {
    if !claims.is_admin() {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// The caller may only act on their own records.
pub fn require_self(claims: &Claims, user_id: &str) -> AppResult<()> {
    if claims.sub != user_id {
        return Err(AppError::Forbidden(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}

pub fn extract_claims_from_context(ctx: &Context<'_>) -> AppResult<Claims> {
    ctx.data::<Claims>()
        .cloned()
        .map_err(|_| AppError::Unauthorized("Authentication required".to_string()))
}
