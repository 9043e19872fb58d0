//! `ask` and `iterate`: run a refinement cycle and print the result.

use super::wiring::App;
use anyhow::Result;
use qcraft_application::RefinementSession;
use qcraft_core::session::{RefinementState, STAGES};
use std::sync::Arc;

pub async fn submit(question: &str) -> Result<()> {
    let app = App::open()?;
    let session = app.refinement_session().await?;
    attach_stage_printer(&session);

    println!("🤔 Refining: {}", question.trim());
    let result = session.submit(question).await;
    finish(&app, &session, result).await
}

pub async fn iterate() -> Result<()> {
    let app = App::open()?;
    let session = app.refinement_session().await?;
    attach_stage_printer(&session);

    println!("🔁 Iterating on the previous refinement...");
    let result = session.iterate().await;
    finish(&app, &session, result).await
}

fn attach_stage_printer(session: &RefinementSession) {
    session.ticker().set_listener(Arc::new(|index, name| {
        println!("  [{}/{}] {}", index + 1, STAGES.len(), name);
    }));
}

async fn finish(
    app: &App,
    session: &RefinementSession,
    result: qcraft_core::error::Result<()>,
) -> Result<()> {
    let state = session.snapshot().await;
    // The state (including a failure banner) is saved either way, so the
    // next invocation resumes from whatever this one reached.
    app.save_session(&state).await?;

    match result {
        Ok(()) => {
            print_result(&state);
            Ok(())
        }
        Err(err) => {
            eprintln!("❌ {}", err.banner_message());
            Err(err.into())
        }
    }
}

fn print_result(state: &RefinementState) {
    println!();
    println!("✨ Refined question (pass {}):", state.iteration_count);
    println!("   {}", state.refined_question);
    if !state.refinement_rationale.is_empty() {
        println!("\n💡 Why: {}", state.refinement_rationale);
    }
    if !state.selected_personas.is_empty() {
        println!("\n🧠 Expert panel:");
        for persona in &state.selected_personas {
            println!("   - {}", persona.role_label());
        }
    }
    println!("\n📝 Answer:");
    println!("{}", state.best_answer);
    if !state.harmony_principle.is_empty() {
        println!("\n🎯 Harmony principle: {}", state.harmony_principle);
    }
    if !state.new_dimensions.is_empty() {
        println!("\n🌱 New dimensions: {}", state.new_dimensions);
    }
    if let Some(message) = &state.success_message {
        println!("\n✅ {}", message);
    }
}
