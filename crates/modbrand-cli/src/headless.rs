//! Headless (non-interactive) commands.
//!
//! Each command makes the same calls the dashboard would and prints the
//! outcome with the same notice texts.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, bail};
use modbrand_client::BrandApi;
use modbrand_core::config::store_session;
use modbrand_core::{PendingImage, classify};
use tracing::{debug, info, warn};

use crate::app::effects::failure_text;
use crate::app::submission::{SUBMIT_SUCCESS, SUBMIT_UNEXPECTED};
use crate::runtime::load_upload;

/// Print the signed-in user, or fail when there is none.
pub async fn whoami(api: &dyn BrandApi, out: &mut impl Write) -> anyhow::Result<()> {
    let Some(user) = api.session().await.context("Session check failed")? else {
        bail!("Not logged in. Run `modbrand login --session <cookie>` first.");
    };
    writeln!(out, "{} (id {})", user.login, user.id)?;
    writeln!(out, "role: {}", classify(&user))?;
    if user.is_verified() {
        writeln!(out, "verified: yes")?;
    }
    if user.is_banned() {
        writeln!(out, "banned: yes")?;
    }
    Ok(())
}

/// List the caller's own images.
pub async fn list(api: &dyn BrandApi, out: &mut impl Write) -> anyhow::Result<()> {
    let images = api
        .list_images()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load images: {}", failure_text(&e)))?;
    if images.is_empty() {
        writeln!(out, "No brand images yet.")?;
    }
    for img in &images {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            img.id,
            img.status_label(),
            img.image_url,
            img.created_at.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

/// Upload a local image file.
pub async fn submit(api: &dyn BrandApi, path: &Path, out: &mut impl Write) -> anyhow::Result<()> {
    let upload = load_upload(path).await.map_err(anyhow::Error::msg)?;
    if !upload.is_image() {
        bail!("{} is not an image", upload.file_name);
    }
    if upload.is_empty() {
        bail!("{} is empty", upload.file_name);
    }
    info!(file = %upload.file_name, bytes = upload.len(), "Submitting brand image");
    match api.submit(&upload).await {
        Ok(()) => {
            writeln!(out, "{SUBMIT_SUCCESS}")?;
            Ok(())
        }
        Err(err) => match err.server_text() {
            Some(text) => bail!("Upload failed: {text}"),
            None => {
                debug!(error = %err, "Upload failed without server text");
                bail!("{SUBMIT_UNEXPECTED}")
            }
        },
    }
}

fn print_pending(items: &[PendingImage], out: &mut impl Write) -> anyhow::Result<()> {
    if items.is_empty() {
        writeln!(out, "Nothing awaiting review.")?;
    }
    for p in items {
        writeln!(out, "{}\t{}\t{}", p.image.id, p.submitter(), p.image.image_url)?;
    }
    Ok(())
}

/// List every image awaiting review.
pub async fn pending(api: &dyn BrandApi, out: &mut impl Write) -> anyhow::Result<()> {
    let items = api
        .list_pending()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load pending images: {}", failure_text(&e)))?;
    print_pending(&items, out)
}

/// Show the queue after a decision. The decision already went through, so a
/// failed refresh is only a warning.
async fn refresh_pending(api: &dyn BrandApi, out: &mut impl Write) -> anyhow::Result<()> {
    match api.list_pending().await {
        Ok(items) => print_pending(&items, out),
        Err(err) => {
            warn!(error = %err, "Pending list refresh failed");
            writeln!(
                out,
                "warning: failed to load pending images: {}",
                failure_text(&err)
            )?;
            Ok(())
        }
    }
}

/// Accept one pending image, then show the refreshed queue.
pub async fn accept(api: &dyn BrandApi, id: &str, out: &mut impl Write) -> anyhow::Result<()> {
    api.accept(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to accept: {}", failure_text(&e)))?;
    writeln!(out, "Image {id} accepted")?;
    refresh_pending(api, out).await
}

/// Reject (delete) one pending image, then show the refreshed queue.
pub async fn reject(api: &dyn BrandApi, id: &str, out: &mut impl Write) -> anyhow::Result<()> {
    api.delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to reject: {}", failure_text(&e)))?;
    writeln!(out, "Image {id} rejected")?;
    refresh_pending(api, out).await
}

/// Mark a user verified. Admin only.
pub async fn verify(api: &dyn BrandApi, user: &str, out: &mut impl Write) -> anyhow::Result<()> {
    api.verify_user(user)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to verify: {}", failure_text(&e)))?;
    writeln!(out, "User {user} verified")?;
    Ok(())
}

/// Delete one of the caller's images.
pub async fn delete(api: &dyn BrandApi, id: &str, out: &mut impl Write) -> anyhow::Result<()> {
    api.delete(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete: {}", failure_text(&e)))?;
    writeln!(out, "Image {id} deleted")?;
    Ok(())
}

/// Check the service is reachable.
pub async fn ping(api: &dyn BrandApi, out: &mut impl Write) -> anyhow::Result<()> {
    let body = api.ping().await.context("Service unreachable")?;
    writeln!(out, "{}", body.trim())?;
    Ok(())
}

/// Check `session` against the service, then store it in the config file.
///
/// `api` must already send `session`. Nothing is written when the service
/// does not recognize it.
pub async fn login(
    api: &dyn BrandApi,
    file: Option<&Path>,
    session: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    whoami(api, out).await?;
    store_session(file, Some(session))?;
    writeln!(out, "Session saved.")?;
    Ok(())
}

/// End the server-side session.
pub async fn logout(api: &dyn BrandApi) -> anyhow::Result<()> {
    api.logout()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to log out: {}", failure_text(&e)))
}
