//! Back-office session commands.

use secrecy::SecretString;

use super::{CommandError, Context, print_json};

pub fn login(ctx: &Context, email: &str, password: String) -> Result<(), CommandError> {
    let user = ctx
        .admin
        .auth()
        .login(email, &SecretString::from(password))?;
    print_json(&user)
}

pub fn logout(ctx: &Context) {
    ctx.admin.auth().logout();
}
