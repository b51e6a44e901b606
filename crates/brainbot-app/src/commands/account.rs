//! Sign-in, identity, and password commands.

use brainbot_api::{
    validate_password_change, validate_password_reset, CredentialStore, IdentityBackend, Page,
    SessionCredential,
};
use brainbot_common::BrainbotError;
use chrono::{Local, Utc};
use tracing::{info, warn};

use super::prompt;
use crate::cli::PasswordCommand;
use crate::context::{api_error, AppContext};

pub(super) async fn login(
    ctx: &AppContext,
    username: &str,
    password: Option<String>,
) -> Result<(), BrainbotError> {
    let password = match password {
        Some(p) => p,
        None => prompt("Password")?,
    };
    let response = ctx
        .backend
        .login(username, &password)
        .await
        .map_err(api_error)?;
    let credential =
        SessionCredential::from_login(response, Utc::now(), ctx.config.auth.session_ttl());
    ctx.credentials.save(&credential)?;

    info!(user = %credential.user.user_name, role = %credential.role(), "session stored");
    println!(
        "Signed in as {} ({}), session valid until {}",
        credential.user.user_name,
        credential.role(),
        credential.expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

pub(super) async fn logout(ctx: &AppContext) -> Result<(), BrainbotError> {
    if let Ok(credential) = ctx.require_session() {
        // The local credential goes regardless of what the server says.
        if let Err(e) = ctx.backend.logout().await {
            warn!("server logout failed: {e}");
        }
        info!(user = %credential.user.user_name, "signed out");
    }
    ctx.credentials.clear()?;
    println!("Signed out.");
    Ok(())
}

pub(super) fn whoami(ctx: &AppContext) -> Result<(), BrainbotError> {
    let credential = ctx.require_session()?;
    let user = &credential.user;
    println!("{} [{}]", user.user_name, user.initials());
    if !user.email.is_empty() {
        println!("  email:   {}", user.email);
    }
    println!("  role:    {}", credential.role());
    println!(
        "  expires: {}",
        credential.expires_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    );
    Ok(())
}

pub(super) fn pages(ctx: &AppContext) -> Result<(), BrainbotError> {
    let credential = ctx.require_session()?;
    for page in Page::visible_to(credential.role()) {
        println!("{}", page.label());
    }
    Ok(())
}

pub(super) async fn password(ctx: &AppContext, cmd: PasswordCommand) -> Result<(), BrainbotError> {
    match cmd {
        PasswordCommand::Change => {
            let credential = ctx.require_page(Page::Settings)?;
            let old = prompt("Current password")?;
            let new = prompt("New password")?;
            let confirm = prompt("Confirm new password")?;
            validate_password_change(&new, &confirm).map_err(api_error)?;

            let message = ctx
                .backend
                .update_password(&credential.user.user_name, &old, &new)
                .await
                .map_err(|e| ctx.fail(e))?;
            println!("{}", or_default(message, "Password updated."));
        }
        PasswordCommand::Forgot { email } => {
            let message = ctx
                .backend
                .forgot_password(&email)
                .await
                .map_err(api_error)?;
            println!(
                "{}",
                or_default(message, "If the address is registered, a reset link is on its way.")
            );
        }
        PasswordCommand::Reset { email, token } => {
            let new = prompt("New password")?;
            let confirm = prompt("Confirm new password")?;
            validate_password_reset(&email, &token, &new, &confirm).map_err(api_error)?;

            let message = ctx
                .backend
                .reset_password(&email, &token, &new)
                .await
                .map_err(api_error)?;
            println!("{}", or_default(message, "Password reset. You can sign in now."));
        }
    }
    Ok(())
}

fn or_default(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
