use async_graphql::{Context, ErrorExtensions, Result as GqlResult};

use crate::{
    app_state::AppState,
    auth::{extract_claims_from_context, require_admin, Claims},
};

pub fn app_state<'a>(ctx: &Context<'a>) -> GqlResult<&'a AppState> {
    ctx.data::<AppState>()
}

/// Claims of the caller; errors carry the `UNAUTHORIZED` code.
pub fn caller(ctx: &Context<'_>) -> GqlResult<Claims> {
    extract_claims_from_context(ctx).map_err(|e| e.extend())
}

pub fn admin(ctx: &Context<'_>) -> GqlResult<Claims> {
    let claims = caller(ctx)?;
    require_admin(&claims).map_err(|e| e.extend())?;
    Ok(claims)
}
