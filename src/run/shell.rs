//! Line-oriented interactive driver: one command per line, the view reprinted after each.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

use crate::ui::action::Action;
use crate::ui::app::{App, Session};
use crate::ui::render::{render, render_help, render_toasts};

const PROMPT: &str = "mockbank";

pub(crate) fn as_shell(app: &mut App) -> Result<()> {
    info!(users = app.store().len(), "shell started");
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_shell(app, stdin.lock(), &mut stdout.lock())
}

pub(crate) fn run_shell(app: &mut App, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    write!(out, "{}", render(app))?;
    prompt(app, out)?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        let line = line.trim();
        if line.is_empty() {
            prompt(app, out)?;
            continue;
        }

        match Action::parse(line) {
            Ok(action) => {
                debug!(?action, "dispatching");
                app.dispatch(action)?;
                write!(out, "{}", render_toasts(&app.take_toasts()))?;
                if app.show_help {
                    write!(out, "{}", render_help())?;
                    app.show_help = false;
                }
                if !app.running {
                    break;
                }
                write!(out, "{}", render(app))?;
            }
            Err(e) => writeln!(out, "{e}")?,
        }
        prompt(app, out)?;
    }

    out.flush()?;
    Ok(())
}

fn prompt(app: &App, out: &mut impl Write) -> Result<()> {
    match app.session() {
        Session::LoggedOut => write!(out, "\n{PROMPT}> ")?,
        Session::LoggedIn(identity) => write!(out, "\n{PROMPT}:{identity}> ")?,
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "shell_tests.rs"]
mod tests;
