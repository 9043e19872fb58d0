use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "qcraft")]
#[command(about = "QCraft - refine questions with a panel of expert personas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refine a question through the expert persona pipeline
    Ask {
        /// The question to refine
        question: Vec<String>,
    },
    /// Run one more refinement pass on the last refined question
    Iterate,
    /// Show recorded refinements, grouped by original question
    History {
        /// Only show groups whose question contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Publish the current refinement to the community library
    Publish,
    /// Email the current refinement to someone
    Share {
        /// Recipient email address
        #[arg(long)]
        to: String,
    },
    /// Send star-rating feedback to the maintainers
    Feedback {
        /// Star rating, 1 to 5
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,
        /// Free-form comment
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Browse the community library
    Library {
        #[command(subcommand)]
        action: LibraryAction,
    },
}

#[derive(Subcommand)]
enum LibraryAction {
    /// List published refinements
    List,
    /// Show one library entry in full
    Show { id: i64 },
    /// Upvote a library entry
    Upvote { id: i64 },
    /// Comment on a library entry
    Comment {
        id: i64,
        text: String,
        /// Display name for the comment
        #[arg(long, default_value = "Anonymous")]
        author: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Ask { question } => commands::ask::submit(&question.join(" ")).await?,
        Commands::Iterate => commands::ask::iterate().await?,
        Commands::History { search } => commands::history::show(search.as_deref()).await?,
        Commands::Publish => commands::library::publish().await?,
        Commands::Share { to } => commands::share::share(&to).await?,
        Commands::Feedback { rating, comment } => {
            commands::share::feedback(rating, &comment).await?
        }
        Commands::Library { action } => match action {
            LibraryAction::List => commands::library::list().await?,
            LibraryAction::Show { id } => commands::library::show(id).await?,
            LibraryAction::Upvote { id } => commands::library::upvote(id).await?,
            LibraryAction::Comment { id, text, author } => {
                commands::library::comment(id, &text, &author).await?
            }
        },
    }

    Ok(())
}
