//! Customer session commands.

use boutique_core::LoginRequest;

use super::{CommandError, Context, print_json};

pub async fn login(ctx: &Context, email: String, password: String) -> Result<(), CommandError> {
    let user = ctx
        .storefront
        .auth()
        .login(&LoginRequest { email, password })
        .await?;
    print_json(&user)
}

pub fn logout(ctx: &Context) {
    ctx.storefront.auth().logout();
}

/// Show the cached user. Never calls the backend.
pub fn whoami(ctx: &Context) -> Result<(), CommandError> {
    let user = ctx.storefront.auth().require_user()?;
    print_json(&user)
}
