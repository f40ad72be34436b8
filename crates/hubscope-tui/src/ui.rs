//! Line-based rendering of the controller state.
//!
//! Deliberately minimal: a query line, the candidate list with a focus
//! marker, and the repository pane for the committed candidate. Layout is
//! fixed rows so mouse hits map straight back to result indices.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use hubscope_search::{LoadStatus, SearchModel};

/// Row of the first result line.
const RESULTS_ROW: u16 = 4;

/// Map a terminal row back to a candidate index, if one is rendered there.
pub fn result_index_at_row(row: u16, model: &SearchModel) -> Option<usize> {
    let index = row.checked_sub(RESULTS_ROW)? as usize;
    (index < model.candidates().len()).then_some(index)
}

/// Redraw the whole screen from the model.
pub fn draw(out: &mut impl Write, model: &SearchModel) -> std::io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(out, Print("hubscope — search GitHub users, then browse repos"))?;

    let spinner = if model.loading() { "  [searching…]" } else { "" };
    queue!(out, MoveTo(0, 1), Print(format!("> {}{spinner}", model.query())))?;

    let mut status_line = String::new();
    if let Some(error) = model.error() {
        status_line = error.to_owned();
    } else if !model.candidates().is_empty() {
        status_line = format!(
            "{} user(s) — ↑↓ navigate, Enter select, Esc clear, Ctrl+Q quit",
            model.candidates().len()
        );
    } else if !model.query().trim().is_empty() && !model.loading() {
        status_line = format!("No users found for \"{}\".", model.query());
    }
    queue!(out, MoveTo(0, 2), Print(status_line))?;

    for (i, candidate) in model.candidates().iter().enumerate() {
        let marker = if model.focus() == Some(i) { "> " } else { "  " };
        let selected = model
            .selected()
            .is_some_and(|s| s.id == candidate.id)
            .then_some(" *")
            .unwrap_or("");
        queue!(
            out,
            MoveTo(0, RESULTS_ROW + i as u16),
            Print(format!("{marker}{}{selected}", candidate.login))
        )?;
    }

    let repos_row = RESULTS_ROW + model.candidates().len() as u16 + 1;
    draw_repo_pane(out, model, repos_row)?;

    out.flush()
}

fn draw_repo_pane(
    out: &mut impl Write,
    model: &SearchModel,
    row: u16,
) -> std::io::Result<()> {
    let load = model.repo_load();
    let Some(candidate) = load.candidate.as_ref() else {
        return Ok(());
    };

    match load.status {
        LoadStatus::Idle => Ok(()),
        LoadStatus::Loading => queue!(
            out,
            MoveTo(0, row),
            Print(format!("Loading repositories for {}…", candidate.login))
        ),
        LoadStatus::Failed => {
            let message = load.error.as_deref().unwrap_or("load failed");
            queue!(
                out,
                MoveTo(0, row),
                Print(format!("{message} (press Enter to retry)"))
            )
        }
        LoadStatus::Loaded => {
            queue!(
                out,
                MoveTo(0, row),
                Print(format!(
                    "{}'s repositories ({})",
                    candidate.login,
                    load.repos.len()
                ))
            )?;
            for (i, repo) in load.repos.iter().enumerate() {
                let language = repo.language.as_deref().unwrap_or("-");
                queue!(
                    out,
                    MoveTo(0, row + 1 + i as u16),
                    Print(format!(
                        "  {}  ★{}  {}",
                        repo.name, repo.stargazers_count, language
                    ))
                )?;
            }
            Ok(())
        }
    }
}
