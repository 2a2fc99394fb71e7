use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use chrono::Datelike;
use inventory_core::{update, AppState, Msg};
use inventory_logging::{inventory_debug, inventory_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{self, Command};
use super::ui::render;

/// Everything the main loop reacts to: core messages from the prompt or the
/// engine, and the request to stop.
#[derive(Debug)]
pub enum AppEvent {
    Msg(Msg),
    Quit,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    inventory_info!("Starting inventory client against {}", config.base_url);

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.store_settings(), event_tx.clone())?;
    spawn_input_reader(event_tx.clone())?;

    let mut state = AppState::new();
    let _ = event_tx.send(AppEvent::Msg(Msg::Started));
    drop(event_tx);

    while let Ok(event) = event_rx.recv() {
        let msg = match event {
            AppEvent::Msg(msg) => msg,
            AppEvent::Quit => break,
        };
        inventory_debug!("Dispatch msg={:?}", msg);

        let (next, effects) = update(state, msg);
        state = next;
        runner.enqueue(effects);

        if state.consume_dirty() {
            print_screen(&render::render(&state.view(), current_year()))?;
        }
    }

    inventory_info!("Inventory client stopped");
    Ok(())
}

fn print_screen(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    stdout.write_all(text.as_bytes())?;
    write!(stdout, "> ")?;
    stdout.flush()
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn spawn_input_reader(event_tx: mpsc::Sender<AppEvent>) -> io::Result<()> {
    thread::Builder::new()
        .name("inventory-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                let event = match commands::parse(&line) {
                    None => continue,
                    Some(Command::Dispatch(msg)) => AppEvent::Msg(msg),
                    Some(Command::Quit) => AppEvent::Quit,
                    Some(Command::Help) => {
                        prompt(commands::HELP);
                        continue;
                    }
                    Some(Command::Invalid(reason)) => {
                        prompt(&reason);
                        continue;
                    }
                };
                if event_tx.send(event).is_err() {
                    return;
                }
            }
            let _ = event_tx.send(AppEvent::Quit);
        })?;
    Ok(())
}

fn prompt(text: &str) {
    print!("{text}\n> ");
    let _ = io::stdout().flush();
}
