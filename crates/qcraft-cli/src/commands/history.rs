//! `history`: grouped view of recorded refinements.

use super::wiring::App;
use anyhow::Result;
use qcraft_application::QuestionsService;

pub async fn show(search: Option<&str>) -> Result<()> {
    let app = App::open()?;
    let service = QuestionsService::new(app.history);

    let groups = service.grouped(search).await?;
    let report = QuestionsService::render_report(&groups)?;
    print!("{}", report);

    if let Some(pattern) = search {
        tracing::debug!(pattern, groups = groups.len(), "history filtered");
    }
    Ok(())
}
