use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::normalize_api_url, load_settings, CommandOutcome, HttpLanguageService,
    InteractionController, SessionView, SkipReason,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Generate a constructed language and translate text into it")]
struct Args {
    /// Base address of the language service; overrides config and environment.
    #[arg(long)]
    api_url: Option<String>,
    /// TOML settings file (defaults to ./conlang.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
}

enum Command {
    New,
    Draft(String),
    Translate(Option<String>),
    Show,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };
        match head {
            "new" => Command::New,
            "draft" => Command::Draft(rest.to_string()),
            "translate" if rest.is_empty() => Command::Translate(None),
            "translate" => Command::Translate(Some(rest.to_string())),
            "show" | "" => Command::Show,
            "help" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

const HELP: &str = "commands: new | draft <text> | translate [text] | show | help | quit";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(api_url) = &args.api_url {
        settings.api_url = normalize_api_url("--api-url", api_url)?;
    }
    tracing::info!(api_url = %settings.api_url, "using language service");

    let service = HttpLanguageService::new(&settings).context("failed to build service client")?;
    let controller = InteractionController::new(service);

    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let outcome = match Command::parse(&line) {
            Command::New => Some(controller.request_new_language().await),
            Command::Draft(text) => {
                controller.set_draft_input(text);
                None
            }
            Command::Translate(Some(text)) => {
                controller.set_draft_input(text);
                Some(controller.translate_draft().await)
            }
            Command::Translate(None) => Some(controller.translate_draft().await),
            Command::Show => None,
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
            Command::Unknown(word) => {
                println!("unknown command '{word}'; {HELP}");
                continue;
            }
        };

        if let Some(CommandOutcome::Skipped(reason)) = outcome {
            println!("{}", skip_hint(reason));
        }
        render(&SessionView::project(&controller.snapshot()));
    }

    Ok(())
}

fn skip_hint(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::Busy(_) => "(a request is already running)",
        SkipReason::NoLanguage => "(create a language first with 'new')",
        SkipReason::EmptyText => "(nothing to translate; use 'draft <text>' or 'translate <text>')",
    }
}

fn render(view: &SessionView) {
    if let Some(error) = &view.error {
        println!("error: {error}");
    }
    let Some(language) = &view.language else {
        println!("[{}] no language yet", view.create_button.label);
        return;
    };

    println!("Language ID: {}", language.short_id);
    println!("  phonemes: {}", language.phonemes.join(" "));
    println!("  syllables: {}", language.syllable_structure.join(" "));
    println!("  example words:");
    for word in &language.example_words {
        println!("    - {word}");
    }
    println!("  draft: {:?}", language.draft_input);
    if let Some(translation) = &language.translation {
        println!("  translation: {}", translation.translated);
        for (original, translated) in &translation.word_mapping {
            println!("    {original} -> {translated}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert!(matches!(Command::parse("new"), Command::New));
        assert!(matches!(Command::parse("  translate  "), Command::Translate(None)));
        assert!(
            matches!(Command::parse("translate hello world"), Command::Translate(Some(t)) if t == "hello world")
        );
        assert!(matches!(Command::parse("draft  hi there "), Command::Draft(t) if t == "hi there"));
        assert!(matches!(Command::parse("bogus"), Command::Unknown(w) if w == "bogus"));
        assert!(matches!(Command::parse(""), Command::Show));
    }
}
