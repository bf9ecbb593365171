//! `jot` - CLI for jotter
//!
//! This binary provides the command-line interface for creating, searching,
//! deleting, and voice-recording notes.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Read;
use std::time::Duration;

use clap::Parser;

use jotter::cli::{
    Cli, Command, ConfigCommand, DeleteCommand, ListCommand, NewCommand, OutputFormat,
    RecordCommand, SearchCommand, StatusCommand,
};
use jotter::{init_logging, Composer, Config, Note, NoteId, NoteStore, SpeechEngine, Storage};

// Platform-specific imports using conditional compilation
#[cfg(target_os = "linux")]
use jotter_linux as platform;

#[cfg(target_os = "macos")]
use jotter_mac as platform;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::New(cmd) => handle_new(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Search(cmd) => handle_search(&config, &cmd),
        Command::Delete(cmd) => handle_delete(&config, &cmd),
        Command::Record(cmd) => handle_record(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Open the note store at the configured database path.
fn open_store(config: &Config) -> jotter::Result<NoteStore> {
    let storage = Storage::open(config.database_path())?;
    Ok(NoteStore::load(storage))
}

/// Feature-detect the host speech-to-text capability.
///
/// Returns `None` when speech is disabled in the configuration or the
/// platform provides no engine.
fn detect_speech_engine(config: &Config, _language: &str) -> Option<Box<dyn SpeechEngine>> {
    if !config.speech.enabled {
        tracing::debug!("speech capture disabled by configuration");
        return None;
    }
    if !platform::speech_available() {
        tracing::debug!(
            platform = platform::platform_name(),
            "no speech-to-text engine on this platform"
        );
        return None;
    }
    // speech_available() is false on every current platform; engine
    // construction lands here together with the first platform backend.
    None
}

fn handle_new(config: &Config, cmd: &NewCommand) -> anyhow::Result<()> {
    let content = match &cmd.content {
        Some(content) => content.clone(),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let mut store = open_store(config)?;
    let mut composer = Composer::new();
    composer.set_content(content.trim_end());

    // An empty draft is silently ignored, matching the compose flow
    if let Some(note) = composer.save(&mut store)? {
        println!("Note saved ({})", note.id);
    }
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let notes: Vec<&Note> = store.notes().iter().collect();
    print_notes(&notes, cmd.limit, cmd.format)
}

fn handle_search(config: &Config, cmd: &SearchCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let notes = store.search(&cmd.query);
    print_notes(&notes, cmd.limit, cmd.format)
}

fn handle_delete(config: &Config, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut store = open_store(config)?;
    let id = NoteId::from(cmd.id.as_str());

    // A missing identifier is a no-op, not an error
    if store.delete(&id)? {
        println!("Deleted note {id}");
    } else {
        println!("No note found with id {id}");
    }
    Ok(())
}

fn handle_record(config: &Config, cmd: &RecordCommand) -> anyhow::Result<()> {
    let language = cmd
        .language
        .clone()
        .unwrap_or_else(|| config.speech.language.clone());

    let mut store = open_store(config)?;
    let mut composer = Composer::new();

    match composer.start_recording(detect_speech_engine(config, &language)) {
        Ok(()) => {}
        Err(err) if err.is_speech_unavailable() => {
            // Blocking notice; the transition is aborted and nothing was started
            eprintln!(
                "Speech-to-text is not available on this platform ({}).",
                platform::platform_name()
            );
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    println!("Recording ({language})…");
    while composer.is_recording() {
        composer.poll_transcripts();
        std::thread::sleep(Duration::from_millis(120));
    }

    match composer.save(&mut store)? {
        Some(note) => println!("Note saved ({})", note.id),
        None => println!("Nothing was transcribed; no note saved."),
    }
    Ok(())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let speech_available = config.speech.enabled && platform::speech_available();

    if cmd.json {
        let status = serde_json::json!({
            "notes": store.len(),
            "database_path": config.database_path(),
            "platform": platform::platform_name(),
            "speech_available": speech_available,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("jot status");
        println!("----------");
        println!("Platform:  {}", platform::platform_name());
        println!("Database:  {}", config.database_path().display());
        println!("Notes:     {}", store.len());
        println!(
            "Speech:    {}",
            if speech_available {
                "available"
            } else {
                "not available"
            }
        );
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!();
                println!("[Speech]");
                println!("  Enabled:        {}", config.speech.enabled);
                println!("  Language:       {}", config.speech.language);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Render notes in the requested output format.
fn print_notes(notes: &[&Note], limit: usize, format: OutputFormat) -> anyhow::Result<()> {
    let shown: Vec<&Note> = if limit == 0 {
        notes.to_vec()
    } else {
        notes.iter().copied().take(limit).collect()
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&shown)?);
        }
        OutputFormat::Table => {
            if shown.is_empty() {
                println!("No notes.");
                return Ok(());
            }
            println!("{:<36}  {:<19}  CONTENT", "ID", "CREATED");
            for note in &shown {
                // The timestamp format below is fixed-width (19 chars)
                println!(
                    "{:<36}  {}  {}",
                    note.id,
                    note.created_at.format("%Y-%m-%d %H:%M:%S"),
                    note.preview(60)
                );
            }
        }
        OutputFormat::Plain => {
            for note in &shown {
                println!("{}\t{}\t{}", note.id, note.created_at.to_rfc3339(), note.content);
            }
        }
    }
    Ok(())
}
