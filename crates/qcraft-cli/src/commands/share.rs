//! `share` and `feedback`: email delivery through the relay.

use super::wiring::App;
use anyhow::{Result, bail};
use chrono::Utc;
use qcraft_application::ShareService;
use std::sync::Arc;

pub async fn share(recipient: &str) -> Result<()> {
    let app = App::open()?;
    let Some(state) = app.load_session().await? else {
        bail!("Nothing to share yet. Refine a question first.");
    };
    if state.refined_question.trim().is_empty() {
        bail!("Nothing to share yet. Refine a question first.");
    }

    let service = ShareService::new(Arc::new(app.email_client()));
    let iteration = state.to_iteration(Utc::now().timestamp_millis());
    service.share_iteration(recipient, &iteration).await?;
    println!("📧 Shared with {}", recipient);
    Ok(())
}

pub async fn feedback(rating: u8, comment: &str) -> Result<()> {
    let app = App::open()?;
    let state = app.load_session().await?.unwrap_or_default();

    let service = ShareService::new(Arc::new(app.email_client()));
    service.send_feedback(rating, comment, &state).await?;
    println!("🙏 Thanks for the feedback!");
    Ok(())
}
