use super::Context;
use anyhow::bail;
use event_planner::prelude::*;

pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let auth = ctx.auth();
    let outcome = auth.login(email, password).await;
    if !outcome.success {
        bail!("{}", outcome.message);
    }
    ctx.toasts.success(
        "Connexion réussie",
        Some(&format!("Bienvenue {}", auth.display_name())),
        None,
    );
    Ok(())
}

pub async fn register(ctx: &Context, email: &str, password: &str) -> Result<()> {
    let outcome = ctx.auth().register(email, password).await;
    if !outcome.success {
        bail!("{}", outcome.message);
    }
    ctx.toasts
        .success("Compte créé", Some(&outcome.message), None);
    Ok(())
}

pub fn logout(ctx: &Context) -> Result<()> {
    ctx.auth().logout();
    ctx.toasts.info("Déconnecté", None, None);
    Ok(())
}

pub async fn whoami(ctx: &Context) -> Result<()> {
    let auth = ctx.auth();
    auth.require_session()?;
    let user = auth
        .fetch_current_user()
        .await
        .ok_or(PlannerError::NotAuthenticated)?;
    ctx.print(Report::User(&user))
}

pub async fn change_password(ctx: &Context, new_password: &str) -> Result<()> {
    let outcome = ctx.auth().change_password(new_password).await;
    if !outcome.success {
        bail!("{}", outcome.message);
    }
    ctx.toasts.success(&outcome.message, None, None);
    Ok(())
}
