use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use bitssun::config::AppConfig;
use bitssun::conversation::{Conversation, Sender};
use bitssun::language::{detect_language, Language};
use bitssun::translate::gemini::CredentialStatus;
use bitssun::translate::phrases::Category;
use bitssun::App;

#[derive(Parser)]
#[command(name = "bitssun", version, about = "Conversational translator for street vendors")]
struct Cli {
    /// TOML configuration file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate one phrase
    Translate {
        text: String,
        /// Source language (defaults to the vendor language)
        #[arg(long)]
        from: Option<Language>,
        /// Target language (defaults to the traveler language)
        #[arg(long)]
        to: Option<Language>,
        /// Guess the source language from the text
        #[arg(long, conflicts_with = "from")]
        detect: bool,
        /// Print which stage answered
        #[arg(long, short)]
        verbose: bool,
    },
    /// Interactive vendor/traveler session on stdin
    Chat {
        #[arg(long)]
        traveler: Option<Language>,
    },
    /// List built-in phrases
    Phrases {
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive search in the vendor language
        #[arg(long)]
        search: Option<String>,
        /// List the flat table for a pair instead, e.g. `--pair en-US es-ES`
        #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
        pair: Option<Vec<Language>>,
    },
    /// Show translation cache size and age
    CacheStats,
    /// Drop every cached translation
    CacheClear,
    /// Check the model provider credential
    Probe,
    /// Guess the language of a text
    Detect { text: String },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    bitssun::init_tracing(cli.log_json);

    let config = AppConfig::load(cli.config.as_deref())?;
    info!(vendor = %config.vendor_language, traveler = %config.traveler_language, "bitssun starting");

    let app = App::build(config)?;

    match cli.command {
        Command::Translate {
            text,
            from,
            to,
            detect,
            verbose,
        } => {
            let from = if detect {
                detect_language(&text)
            } else {
                from.unwrap_or(app.config.vendor_language)
            };
            let to = to.unwrap_or(app.config.traveler_language);
            let resolution = app.engine.resolve_detailed(&text, from, to).await;
            if verbose {
                println!("[{} -> {} via {}]", from, to, resolution.stage);
            }
            println!("{}", resolution.text);
        }
        Command::Chat { traveler } => {
            let traveler = traveler.unwrap_or(app.config.traveler_language);
            let conversation = Conversation::new(app.engine.clone(), app.config.vendor_language, traveler)?;
            chat(&app, conversation).await?;
        }
        Command::Phrases {
            category,
            search,
            pair,
        } => list_phrases(&app, category.as_deref(), search.as_deref(), pair)?,
        Command::CacheStats => {
            println!("{}", serde_json::to_string_pretty(&app.engine.cache_stats())?);
        }
        Command::CacheClear => {
            app.engine.clear_cache();
            println!("cache cleared");
        }
        Command::Probe => {
            let status = app.probe_credentials().await;
            println!(
                "gemini: {}",
                match status {
                    CredentialStatus::Valid => "valid",
                    CredentialStatus::Invalid => "invalid",
                    CredentialStatus::Missing => "missing",
                }
            );
        }
        Command::Detect { text } => {
            let lang = detect_language(&text);
            println!("{} {} ({})", lang.flag(), lang.name(), lang.code());
        }
    }

    Ok(())
}

const CHAT_HELP: &str = "\
  v: <text>           vendor says something
  t: <text>           traveler says something
  /phrase <id> [t]    send a common phrase (as traveler with `t`)
  /lang <code>        change the traveler language
  /history            print the transcript
  /stats              stage counters and latencies
  /quit";

async fn chat(app: &App, mut conversation: Conversation) -> Result<(), Box<dyn std::error::Error>> {
    println!(
        "{} {} <-> {} {}",
        conversation.vendor_language().flag(),
        conversation.vendor_language().name(),
        conversation.traveler_language().flag(),
        conversation.traveler_language().name()
    );
    println!("{CHAT_HELP}");

    let stdin = std::io::stdin();
    let mut out = std::io::stdout();
    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();

        if let Some(text) = input.strip_prefix("v:") {
            if let Some(msg) = conversation.say(Sender::Vendor, text).await {
                println!("  {}", msg.translated_text);
            }
        } else if let Some(text) = input.strip_prefix("t:") {
            if let Some(msg) = conversation.say(Sender::Tourist, text).await {
                println!("  {}", msg.translated_text);
            }
        } else if let Some(rest) = input.strip_prefix("/phrase") {
            let mut parts = rest.split_whitespace();
            let id = parts.next().unwrap_or_default();
            let sender = match parts.next() {
                Some("t") => Sender::Tourist,
                _ => Sender::Vendor,
            };
            match conversation.use_common_phrase(id, sender) {
                Ok(msg) => println!("  {} -> {}", msg.original_text, msg.translated_text),
                Err(e) => println!("  {e}"),
            }
        } else if let Some(code) = input.strip_prefix("/lang") {
            match code.trim().parse::<Language>() {
                Ok(lang) => match conversation.set_traveler_language(lang) {
                    Ok(()) => println!("  traveler: {} {}", lang.flag(), lang.name()),
                    Err(e) => println!("  {e}"),
                },
                Err(e) => println!("  {e}"),
            }
        } else if input == "/history" {
            for msg in conversation.messages() {
                let who = match msg.sender {
                    Sender::Vendor => "vendor",
                    Sender::Tourist => "traveler",
                };
                println!("  [{who}] {} => {}", msg.original_text, msg.translated_text);
            }
        } else if input == "/stats" {
            println!("{}", serde_json::to_string_pretty(&app.metrics.counts())?);
            println!("{}", serde_json::to_string_pretty(&app.metrics.summary())?);
        } else if input == "/quit" {
            break;
        } else if !input.is_empty() {
            println!("{CHAT_HELP}");
        }
    }
    Ok(())
}

fn list_phrases(
    app: &App,
    category: Option<&str>,
    search: Option<&str>,
    pair: Option<Vec<Language>>,
) -> Result<(), Box<dyn std::error::Error>> {
    let dictionary = app.engine.dictionary();

    if let Some([from, to]) = pair.as_deref() {
        for (source, target) in dictionary.all_for_pair(*from, *to) {
            println!("{source} => {target}");
        }
        return Ok(());
    }

    let vendor = app.config.vendor_language;
    let traveler = app.config.traveler_language;
    let entries = match (category, search) {
        (Some(name), _) => {
            let category = Category::ALL
                .into_iter()
                .find(|c| format!("{c:?}").eq_ignore_ascii_case(name) || c.label().eq_ignore_ascii_case(name))
                .ok_or_else(|| format!("unknown category: {name}"))?;
            dictionary.by_category(category)
        }
        (None, Some(query)) => dictionary.search(query, vendor),
        (None, None) => dictionary.catalogue().iter().collect(),
    };

    for entry in entries {
        println!(
            "{} {:<18} {} => {}",
            entry.category.icon(),
            entry.id,
            entry.translation(vendor),
            entry.translation(traveler)
        );
    }
    Ok(())
}
