#![forbid(unsafe_code)]

//! Terminal host for the hubscope search controller.
//!
//! Owns the terminal session and the input loop: crossterm events are
//! mapped onto [`SearchMsg`] values, the [`Driver`] executes the model's
//! commands, and drained [`SearchEvent`]s trigger a redraw. Logs go to a
//! file so the terminal stays clean.

mod ui;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::{execute, terminal};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use hubscope_core::SearchConfig;
use hubscope_github::GitHubClient;
use hubscope_runtime::Driver;
use hubscope_search::{SearchModel, SearchMsg};

/// Fallback input-poll interval when no tick is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(100);

fn init_logging() -> Result<()> {
    let file = std::fs::File::create("hubscope.log").context("create log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let config = SearchConfig::default();
    let client = GitHubClient::new(config.request_timeout)
        .context("construct GitHub client")?;
    let model = SearchModel::new(Arc::new(client), config);
    let mut driver = Driver::new(model);

    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(
        stdout,
        terminal::EnterAlternateScreen,
        event::EnableMouseCapture
    )?;
    info!("hubscope started");

    let result = run_loop(&mut driver, &mut stdout);

    // Run every teardown step even if one fails; a raw-mode terminal
    // outlives the process otherwise.
    if let Err(e) = execute!(
        stdout,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen
    ) {
        error!("failed to restore screen: {e}");
    }
    if let Err(e) = terminal::disable_raw_mode() {
        error!("failed to disable raw mode: {e}");
    }
    result
}

fn run_loop(driver: &mut Driver<SearchModel>, stdout: &mut std::io::Stdout) -> Result<()> {
    ui::draw(stdout, driver.model())?;

    loop {
        let mut dirty = false;
        let wait = driver
            .time_to_next_tick()
            .map_or(IDLE_POLL, |d| d.min(IDLE_POLL));
        if event::poll(wait)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if is_quit(&key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    if let Some(msg) = map_key(&key, driver.model().query()) {
                        driver.dispatch(msg);
                        dirty = true;
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(msg) = map_mouse(&mouse, driver.model()) {
                        driver.dispatch(msg);
                        dirty = true;
                    }
                }
                Event::Resize(..) => dirty = true,
                _ => {}
            }
        }

        driver.poll();

        if !driver.model_mut().drain_events().is_empty() || dirty {
            ui::draw(stdout, driver.model())?;
        }
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
}

/// Map a key press onto a controller message.
///
/// The query line is a controlled input: edits send the whole new value.
fn map_key(key: &KeyEvent, query: &str) -> Option<SearchMsg> {
    match key.code {
        KeyCode::Down => Some(SearchMsg::FocusNext),
        KeyCode::Up => Some(SearchMsg::FocusPrev),
        KeyCode::Enter => Some(SearchMsg::CommitFocused),
        KeyCode::Esc => Some(SearchMsg::QueryCleared),
        KeyCode::Backspace => {
            let mut edited = query.to_owned();
            edited.pop()?;
            Some(SearchMsg::QueryEdited(edited))
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(SearchMsg::QueryEdited(String::new()))
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            let mut edited = query.to_owned();
            edited.push(c);
            Some(SearchMsg::QueryEdited(edited))
        }
        _ => None,
    }
}

/// Map a left click on a result row onto an item-level commit.
fn map_mouse(mouse: &MouseEvent, model: &SearchModel) -> Option<SearchMsg> {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return None;
    }
    let index = ui::result_index_at_row(mouse.row, model)?;
    Some(SearchMsg::Commit(index))
}
