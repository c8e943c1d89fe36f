//! Input handling for TUI key events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, AppMode, Effect, Route, Tab};

/// Apply a key press. Returns the effects to run.
pub fn handle_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Vec::new();
    }
    if app.mode == AppMode::EditingPath {
        return handle_path_key(app, key);
    }
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            Vec::new()
        }
        KeyCode::Esc => {
            app.notices.dismiss();
            Vec::new()
        }
        _ => match app.route() {
            Route::Landing => match key.code {
                KeyCode::Enter | KeyCode::Char('l') => app.login(),
                _ => Vec::new(),
            },
            Route::Login => match key.code {
                KeyCode::Enter => app.navigate(Route::Dashboard),
                KeyCode::Char('b') => app.navigate(Route::Landing),
                _ => Vec::new(),
            },
            Route::NotFound => match key.code {
                KeyCode::Enter | KeyCode::Char('b') => app.go_back(),
                _ => Vec::new(),
            },
            Route::Dashboard => handle_dashboard_key(app, key),
        },
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    let Some(tab) = app.dashboard().map(|d| d.tabs.selected()) else {
        return Vec::new();
    };
    match key.code {
        KeyCode::Tab | KeyCode::Right => app.cycle_tab(1),
        KeyCode::BackTab | KeyCode::Left => app.cycle_tab(-1),
        KeyCode::Char(c @ '1'..='9') => {
            let digit = c.to_digit(10).unwrap_or(1);
            app.select_tab_at(usize::try_from(digit - 1).unwrap_or(0))
        }
        KeyCode::Char('L') => app.logout(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Up => {
            app.select_prev();
            Vec::new()
        }
        KeyCode::Down => {
            app.select_next();
            Vec::new()
        }
        KeyCode::Char('d') if tab == Tab::Overview => app.delete_selected(),
        KeyCode::Char('a') if tab == Tab::Pending => app.accept_selected(),
        KeyCode::Char('x') if tab == Tab::Pending => app.reject_selected(),
        KeyCode::Char('v') if tab == Tab::Pending => app.verify_selected(),
        KeyCode::Char('e') if tab == Tab::Submission => {
            app.begin_path_edit();
            Vec::new()
        }
        KeyCode::Enter if tab == Tab::Submission => app.commit_path(),
        KeyCode::Char('s') if tab == Tab::Submission => app.submit(),
        _ => Vec::new(),
    }
}

fn handle_path_key(app: &mut App, key: KeyEvent) -> Vec<Effect> {
    match key.code {
        KeyCode::Enter => app.commit_path(),
        KeyCode::Esc => {
            app.cancel_path_edit();
            Vec::new()
        }
        KeyCode::Backspace => {
            app.path_input.pop();
            Vec::new()
        }
        KeyCode::Char(c) => {
            app.path_input.push(c);
            Vec::new()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
