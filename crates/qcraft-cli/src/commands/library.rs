//! `publish` and the `library` subcommands.

use super::wiring::App;
use anyhow::{Result, bail};
use qcraft_application::LibraryService;
use qcraft_core::library::LibraryEntry;
use std::sync::Arc;

fn service(app: &App) -> LibraryService {
    LibraryService::new(Arc::new(app.library_client()))
}

pub async fn publish() -> Result<()> {
    let app = App::open()?;
    let Some(state) = app.load_session().await? else {
        bail!("Nothing to publish yet. Refine a question first.");
    };

    let receipt = service(&app).publish_from_state(&state).await?;
    println!("📚 Published to the community library (entry #{})", receipt.id);
    Ok(())
}

pub async fn list() -> Result<()> {
    let app = App::open()?;
    let entries = service(&app).entries().await?;
    if entries.is_empty() {
        println!("The library is empty.");
        return Ok(());
    }
    for entry in &entries {
        println!(
            "#{} [{}] {} (▲ {}, 💬 {})",
            entry.id, entry.category, entry.refined_question, entry.votes, entry.comments
        );
    }
    Ok(())
}

pub async fn show(id: i64) -> Result<()> {
    let app = App::open()?;
    let entry = service(&app).entry(id).await?;
    print_entry(&entry);
    Ok(())
}

pub async fn upvote(id: i64) -> Result<()> {
    let app = App::open()?;
    service(&app).upvote(id).await?;
    println!("▲ Upvoted entry #{}", id);
    Ok(())
}

pub async fn comment(id: i64, text: &str, author: &str) -> Result<()> {
    let app = App::open()?;
    service(&app).comment(id, text, author).await?;
    println!("💬 Comment added to entry #{}", id);
    Ok(())
}

fn print_entry(entry: &LibraryEntry) {
    println!("#{} — {}", entry.id, entry.refined_question);
    println!("Original: {}", entry.original_question);
    if !entry.expert_personas.is_empty() {
        println!("Experts: {}", entry.expert_personas.join(", "));
    }
    if let Some(answer) = &entry.best_answer {
        println!("\n{}", answer);
    }
    if !entry.individual_answers.is_empty() {
        println!("\nIndividual insights:");
        for answer in &entry.individual_answers {
            println!("  {}: {}", answer.name, answer.answer);
        }
    }
    println!("\n▲ {}  💬 {}  👁 {}", entry.votes, entry.comments, entry.views);
    for comment in &entry.comment_list {
        println!("  {}: {}", comment.author, comment.comment);
    }
}
