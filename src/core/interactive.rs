use crate::core::prompt;
use crate::domain::model::AnalyzedStrain;
use crate::domain::ports::ModelClient;
use crate::utils::error::Result;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// What the loop should do with one line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopAction {
    Quit,
    Remind,
    Recommend(String),
}

/// Classify a raw input line. `quit` is matched case-insensitively after
/// trimming; blank input gets a reminder instead of a model call.
pub fn classify_input(line: &str) -> LoopAction {
    let trimmed = line.trim();

    if trimmed.eq_ignore_ascii_case("quit") {
        LoopAction::Quit
    } else if trimmed.is_empty() {
        LoopAction::Remind
    } else {
        LoopAction::Recommend(trimmed.to_string())
    }
}

fn print_welcome() {
    println!("\nWelcome to the Strain Recommendation System!");
    println!("Tell me what you're looking for in a cannabis experience.");
    println!("Examples:");
    println!("- 'I want something to help with creativity'");
    println!("- 'Looking for a relaxing indica for evening use'");
    println!("- 'Need something for anxiety that won't make me too sleepy'");
    println!("\nType 'quit' to exit");
}

/// Run the recommendation loop until `quit` or end of input.
///
/// The input stream is a parameter so tests can script it; `main` passes
/// buffered stdin.
pub async fn run_loop<M, R>(model: &M, strains: &[AnalyzedStrain], input: R) -> Result<()>
where
    M: ModelClient,
    R: AsyncBufRead + Unpin,
{
    print_welcome();

    let mut lines = input.lines();

    loop {
        print!("\nWhat are you looking for? ");
        std::io::stdout().flush()?;

        // EOF counts as quitting, a closed stdin must not spin.
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match classify_input(&line) {
            LoopAction::Quit => break,
            LoopAction::Remind => {
                println!("Please provide some preferences to get recommendations.");
            }
            LoopAction::Recommend(preference) => {
                println!("\nAnalyzing your preferences...");
                tracing::debug!("Requesting recommendations for: {}", preference);

                let recommendations = match model
                    .generate(&prompt::recommendation_prompt(&preference, strains))
                    .await
                {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!("❌ Recommendation request failed: {}", e);
                        format!("Error getting recommendations: {}", e)
                    }
                };

                println!("\nRecommendations:");
                println!("{}", "-".repeat(50));
                println!("{}", recommendations);
                println!("{}", "-".repeat(50));
            }
        }
    }

    Ok(())
}
