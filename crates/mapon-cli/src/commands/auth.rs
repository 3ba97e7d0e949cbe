//! Auth commands - store or forget the API key

use anyhow::Result;

use crate::auth::{prompt_api_key, CredentialStore};
use crate::output::OutputContext;

/// Save an API key, prompting for it when not given
pub fn login(store: &CredentialStore, api_key: Option<&str>, ctx: &OutputContext) -> Result<()> {
    let api_key = match api_key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => key.to_string(),
        None => prompt_api_key(&mut std::io::stdin().lock())?,
    };

    store.save(&api_key)?;
    tracing::debug!("Stored credentials at {}", store.path().display());
    ctx.success("Logged in.");
    Ok(())
}

/// Remove the stored API key
pub fn logout(store: &CredentialStore, ctx: &OutputContext) -> Result<()> {
    store.clear()?;
    ctx.success("Logged out.");
    Ok(())
}
