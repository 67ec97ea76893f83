use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use counter_core::{
    ClipSelection, CounterError, CounterSession, SessionDeps, SessionEvent, SettingsClose,
};
use serde::Serialize;
use shared::state::{CounterState, OverlayVisibility, SettingsState};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod devices;

use commands::{parse_command, Command, HELP};
use config::{load_config, AppConfig};
use devices::{ConfiguredPermission, ConsoleAudio, PathPicker, TerminalHaptics};

#[derive(Parser, Debug)]
struct Args {
    /// TOML file with initial settings and feedback tuning.
    #[arg(long, default_value = "counter.toml")]
    config: PathBuf,
}

#[derive(Serialize)]
struct ScreenView<'a> {
    counter: &'a CounterState,
    settings: &'a SettingsState,
    #[serde(skip_serializing_if = "Option::is_none")]
    draft: Option<&'a SettingsState>,
    overlays: &'a OverlayVisibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

enum Flow {
    Continue(Option<String>),
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args.config)?;
    info!(
        config = %args.config.display(),
        overlap = %config.feedback.overlap,
        "counter: starting session"
    );

    let picker = Arc::new(PathPicker::default());
    let mut session = build_session(&config, picker.clone());

    let mut events = session.subscribe_events();
    let event_log = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "ui: event log lagged"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let message = match parse_command(&line) {
            Ok(command) => match run_command(&mut session, &picker, command).await {
                Flow::Continue(message) => message,
                Flow::Quit => break,
            },
            Err(err) => Some(err.to_string()),
        };
        print_view(&session, message)?;
    }

    session.shutdown().await;
    drop(session);
    let _ = event_log.await;
    Ok(())
}

fn build_session(config: &AppConfig, picker: Arc<PathPicker>) -> CounterSession {
    CounterSession::new(
        config.initial_settings.clone(),
        config.feedback,
        SessionDeps {
            audio: Arc::new(ConsoleAudio::new(config.playback_latency)),
            haptics: Arc::new(TerminalHaptics),
            permissions: Arc::new(ConfiguredPermission::new(config.media_permission)),
            picker,
        },
    )
}

async fn run_command(session: &mut CounterSession, picker: &PathPicker, command: Command) -> Flow {
    let message = match command {
        Command::Tap => {
            session.tap();
            None
        }
        Command::Undo => {
            session.undo();
            None
        }
        Command::Hold => {
            session.long_press();
            None
        }
        Command::OpenLimit => {
            session.open_limit_form();
            None
        }
        Command::SubmitLimit(raw) => session
            .submit_limit(&raw)
            .err()
            .map(|err| format!("Invalid limit: {err}")),
        Command::CloseLimit => {
            session.close_limit_form();
            None
        }
        Command::ClearLimit => {
            session.clear_limit();
            None
        }
        Command::OpenSettings => {
            session.open_settings();
            None
        }
        Command::Vibration(enabled) => user_message(session.set_vibration(enabled)),
        Command::Sound(enabled) => user_message(session.set_sound(enabled)),
        Command::Clip(clip) => user_message(session.select_builtin_clip(clip)),
        Command::Pick(path) => {
            picker.queue(path);
            match session.pick_custom_clip().await {
                Ok(ClipSelection::Selected(clip)) => {
                    Some(format!("Selected '{}'", clip.label))
                }
                Ok(ClipSelection::Cancelled) => None,
                // The path came from the user, so a bad file is their input to fix.
                Err(CounterError::Picker(err)) => Some(format!("Could not use that clip: {err:#}")),
                Err(err) => user_message::<()>(Err(err)),
            }
        }
        Command::Save => {
            session.close_settings(SettingsClose::Save);
            None
        }
        Command::Dismiss => {
            session.close_settings(SettingsClose::Dismiss);
            None
        }
        Command::Show => None,
        Command::Help => Some(HELP.to_string()),
        Command::Quit => return Flow::Quit,
    };
    Flow::Continue(message)
}

fn user_message<T>(result: std::result::Result<T, CounterError>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(err) if err.is_user_facing() => Some(err.to_string()),
        Err(err) => {
            warn!("counter: {err:#}");
            None
        }
    }
}

fn print_view(session: &CounterSession, message: Option<String>) -> Result<()> {
    let snapshot = session.snapshot();
    let view = ScreenView {
        counter: &snapshot.counter,
        settings: &snapshot.settings,
        draft: snapshot.draft.as_ref(),
        overlays: &snapshot.overlays,
        message,
    };
    println!("{}", serde_json::to_string(&view)?);
    Ok(())
}

fn log_event(event: &SessionEvent) {
    match event {
        SessionEvent::CounterChanged(state) => {
            debug!(value = state.value, limit = ?state.limit, "ui: counter changed")
        }
        SessionEvent::SettingsCommitted(settings) => debug!(?settings, "ui: settings committed"),
        SessionEvent::OverlaysChanged(visibility) => debug!(?visibility, "ui: overlays changed"),
    }
}
