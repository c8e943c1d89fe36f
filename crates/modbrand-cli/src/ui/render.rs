//! TUI rendering functions.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};

use crate::app::submission::SubmissionState;
use crate::app::{App, AppMode, Dashboard, Route, Severity, Tab, visible_tabs};

/// Draw the full UI.
pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0]);
    match app.route() {
        Route::Landing => draw_landing(frame, chunks[1]),
        Route::Login => draw_login(frame, app, chunks[1]),
        Route::NotFound => draw_not_found(frame, chunks[1]),
        Route::Dashboard => match app.dashboard() {
            Some(dash) => draw_dashboard(frame, app, dash, chunks[1]),
            None => draw_checking(frame, chunks[1]),
        },
    }
    draw_footer(frame, app, chunks[2]);

    if app.notices.current().is_some() {
        draw_notice(frame, app);
    }
}

fn draw_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Mod Developer Branding",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" | {}", app.route().path()),
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(header, area);
}

fn draw_landing(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::styled(
            "Geode mod developer branding",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from("Submit a brand image for your mods and track its review."),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" Login with GitHub"),
        ]),
    ];
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .centered();
    frame.render_widget(body, area);
}

fn draw_login(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from("Sign in with GitHub in your browser:"),
        Line::styled(
            app.login_url.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        ),
        Line::from(""),
        Line::from("Then store the session_id cookie it sets:"),
        Line::styled(
            "modbrand login --session <cookie>",
            Style::default().fg(Color::Green),
        ),
        Line::from(""),
        Line::from("[Enter] open dashboard   [b] back"),
    ];
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Login "))
        .wrap(Wrap { trim: false })
        .centered();
    frame.render_widget(body, area);
}

fn draw_not_found(frame: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::styled("404", Style::default().add_modifier(Modifier::BOLD)),
        Line::from("This page does not exist."),
        Line::from(""),
        Line::from("[Enter] go back"),
    ];
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .centered();
    frame.render_widget(body, area);
}

fn draw_checking(frame: &mut Frame<'_>, area: Rect) {
    let body = Paragraph::new("Checking session...")
        .block(Block::default().borders(Borders::ALL))
        .centered();
    frame.render_widget(body, area);
}

fn draw_dashboard(frame: &mut Frame<'_>, app: &App, dash: &Dashboard, area: Rect) {
    let Some(user) = dash.user() else {
        draw_checking(frame, area);
        return;
    };
    let show_pending = dash.show_pending();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let titles: Vec<Line<'_>> = visible_tabs(show_pending)
        .into_iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(dash.tabs.selected_position(show_pending))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    match dash.tabs.selected() {
        Tab::Overview => draw_overview(frame, dash, &user.login, chunks[1]),
        Tab::Submission => draw_submission(frame, app, dash, chunks[1]),
        Tab::Pending => draw_pending(frame, dash, chunks[1]),
        Tab::Settings => draw_settings(frame, dash, chunks[1]),
    }
}

fn draw_overview(frame: &mut Frame<'_>, dash: &Dashboard, login: &str, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(1)])
        .split(area);

    let greeting = Paragraph::new(Line::styled(
        format!("Hello, {login}!"),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(greeting, chunks[0]);

    let list = &dash.images;
    let title = if list.is_loading() {
        " Your images (loading...) "
    } else {
        " Your images "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    if list.items().is_empty() {
        let empty = Paragraph::new("No brand images yet. Submit one from the Submission tab.")
            .block(block);
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem<'_>> = list
        .items()
        .iter()
        .map(|img| {
            let status_color = if img.is_pending() {
                Color::Yellow
            } else {
                Color::Green
            };
            let mut spans = vec![
                Span::raw(format!("#{:<6} ", img.id)),
                Span::styled(
                    format!("{:<9}", img.status_label()),
                    Style::default().fg(status_color),
                ),
                Span::raw(img.image_url.clone()),
            ];
            if let Some(created) = &img.created_at {
                spans.push(Span::styled(
                    format!("  {created}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if list.is_deleting(&img.id) {
                let busy = Style::default().fg(Color::Red);
                spans.push(Span::styled(" (deleting...)", busy));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let widget = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(list.selected()));
    frame.render_stateful_widget(widget, chunks[1], &mut state);
}

fn draw_submission(frame: &mut Frame<'_>, app: &App, dash: &Dashboard, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let editing = app.mode == AppMode::EditingPath;
    let path_style = if editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let cursor = if editing { "█" } else { "" };
    let input = Paragraph::new(Line::from(vec![
        Span::styled(app.path_input.clone(), path_style),
        Span::raw(cursor),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Image file (e to edit, Enter to select) "),
    );
    frame.render_widget(input, chunks[0]);

    let submission = &dash.submission;
    let mut lines = Vec::new();
    match submission.state() {
        SubmissionState::Idle => {
            lines.push(Line::from("No file selected."));
        }
        SubmissionState::Staged(file) | SubmissionState::Uploading(file) => {
            lines.push(Line::from(vec![
                Span::styled("File: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(file.preview.file_name.clone()),
            ]));
            lines.push(Line::from(format!("Type: {}", file.preview.mime)));
            lines.push(Line::from(format!("Size: {} bytes", file.preview.size_bytes)));
        }
    }
    lines.push(Line::from(""));
    if submission.is_busy() {
        lines.push(Line::styled(
            "Uploading...",
            Style::default().fg(Color::Yellow),
        ));
    } else if submission.can_submit() {
        lines.push(Line::from(vec![
            Span::styled("[s]", Style::default().fg(Color::Yellow)),
            Span::raw(" Submit"),
        ]));
    } else {
        lines.push(Line::styled(
            "[s] Submit (select an image first)",
            Style::default().fg(Color::DarkGray),
        ));
    }
    let preview = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Submission "))
        .wrap(Wrap { trim: false });
    frame.render_widget(preview, chunks[1]);
}

fn draw_pending(frame: &mut Frame<'_>, dash: &Dashboard, area: Rect) {
    let review = &dash.review;
    let title = if review.is_loading() {
        " Pending review (loading...) "
    } else {
        " Pending review "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    if review.items().is_empty() {
        let empty = Paragraph::new("Nothing awaiting review.").block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem<'_>> = review
        .items()
        .iter()
        .map(|p| {
            let mut spans = vec![
                Span::raw(format!("#{:<6} ", p.image.id)),
                Span::styled(
                    format!("{:<16}", p.submitter()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::raw(p.image.image_url.clone()),
            ];
            let busy = Style::default().fg(Color::Yellow);
            if review.is_deciding(&p.image.id) {
                spans.push(Span::styled(" (updating...)", busy));
            }
            if review.is_verifying(&p.image.user_id) {
                spans.push(Span::styled(" (verifying...)", busy));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let widget = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default().with_selected(Some(review.selected()));
    frame.render_stateful_widget(widget, area, &mut state);
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn draw_settings(frame: &mut Frame<'_>, dash: &Dashboard, area: Rect) {
    let Some(user) = dash.user() else {
        return;
    };
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let row = |label: &'static str, value: String| {
        let label = Span::styled(format!("{label:<10}"), bold);
        Line::from(vec![label, Span::raw(value)])
    };
    let lines = vec![
        Line::styled("Account information", bold),
        Line::from(""),
        row("User ID", user.id.to_string()),
        row("Login", user.login.clone()),
        row("Role", dash.role().to_string()),
        row("Verified", yes_no(user.is_verified()).to_string()),
        row("Banned", yes_no(user.is_banned()).to_string()),
        row("Avatar", user.avatar_url.clone().unwrap_or_default()),
    ];
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Settings "))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, area);
}

const OVERVIEW_HINTS: &str = "Tab: switch  ↑↓: select  d: delete  r: refresh  L: logout  q: quit";
const SUBMISSION_HINTS: &str = "Tab: switch  e: edit path  s: submit  L: logout  q: quit";
const REVIEW_HINTS: &str = "Tab: switch  ↑↓: select  a: accept  x: reject  r: refresh  L: logout";
const ADMIN_REVIEW_HINTS: &str = "↑↓: select  a: accept  x: reject  v: verify  r: refresh";

fn key_hints(app: &App) -> &'static str {
    if app.mode == AppMode::EditingPath {
        return "Enter: select file  Esc: cancel";
    }
    let Some(dash) = app.dashboard().filter(|_| app.route() == Route::Dashboard) else {
        return match app.route() {
            Route::Landing => "Enter: login  q: quit",
            Route::Login => "Enter: dashboard  b: back  q: quit",
            Route::NotFound => "Enter: go back  q: quit",
            Route::Dashboard => "Tab: switch  L: logout  q: quit",
        };
    };
    match dash.tabs.selected() {
        Tab::Overview => OVERVIEW_HINTS,
        Tab::Submission => SUBMISSION_HINTS,
        Tab::Pending if dash.role().can_verify() => ADMIN_REVIEW_HINTS,
        Tab::Pending => REVIEW_HINTS,
        Tab::Settings => "Tab: switch  L: logout  q: quit",
    }
}

fn draw_footer(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let mut spans = Vec::new();
    if let Some((dash, user)) = app.dashboard().and_then(|d| d.user().map(|u| (d, u))) {
        spans.push(Span::styled(
            user.login.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" [{}]", dash.role()),
            Style::default().fg(Color::DarkGray),
        ));
        if dash.is_logging_out() {
            let busy = Style::default().fg(Color::Yellow);
            spans.push(Span::styled(" logging out...", busy));
        }
        spans.push(Span::raw(" | "));
    }
    spans.push(Span::styled(key_hints(app), Style::default().fg(Color::DarkGray)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_notice(frame: &mut Frame<'_>, app: &App) {
    let Some(notice) = app.notices.current() else {
        return;
    };
    let color = match notice.severity {
        Severity::Success => Color::Green,
        Severity::Info => Color::Cyan,
        Severity::Error => Color::Red,
    };
    let area = frame.area();
    let width = area.width.saturating_sub(4).min(70);
    let rect = Rect {
        x: area.x + 2,
        y: area.bottom().saturating_sub(5),
        width,
        height: 3,
    }
    .intersection(area);
    frame.render_widget(Clear, rect);
    let widget = Paragraph::new(notice.text.clone())
        .style(Style::default().fg(color))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(" Esc to dismiss "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, rect);
}
