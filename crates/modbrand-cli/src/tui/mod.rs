//! Two-thread TUI orchestration.
//!
//! Terminal I/O runs on a dedicated OS thread; all network work stays on the
//! tokio runtime. Communication via `tokio::sync::mpsc` channels.

mod input;

pub use input::handle_key;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use modbrand_client::BrandApi;
use modbrand_core::Logger;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::app::{App, Completion, Route};
use crate::runtime::Runtime;
use crate::ui;

/// Terminal events forwarded from the UI reader thread.
pub enum TermEvent {
    Key(crossterm::event::KeyEvent),
    Resize(u16, u16),
}

/// Settings for one interactive session.
#[derive(Debug, Clone)]
pub struct TuiOptions {
    pub start: Route,
    pub login_url: String,
    pub notice_ttl: Duration,
}

/// Run the interactive TUI until the user quits.
pub async fn run(api: Arc<dyn BrandApi>, options: TuiOptions) -> anyhow::Result<()> {
    let log = Logger::new("tui");

    // 1. Enter raw mode, create terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 2. Channels + cancellation token
    let cancel = CancellationToken::new();
    let (term_tx, mut term_rx) = tokio::sync::mpsc::channel::<TermEvent>(64);
    let (completion_tx, mut completion_rx) = tokio::sync::mpsc::channel::<Completion>(64);

    // 3. Dedicated OS thread for crossterm::event::read()
    let cancel_clone = cancel.clone();
    let ui_thread = std::thread::spawn(move || {
        loop {
            if cancel_clone.is_cancelled() {
                break;
            }
            // Poll with a timeout so cancellation is noticed
            if event::poll(Duration::from_millis(50)).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => {
                        // Windows emits Press + Release per keystroke
                        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                            continue;
                        }
                        if term_tx.blocking_send(TermEvent::Key(key)).is_err() {
                            break;
                        }
                    }
                    Ok(Event::Resize(w, h)) => {
                        if term_tx.blocking_send(TermEvent::Resize(w, h)).is_err() {
                            break;
                        }
                    }
                    _ => {}
                }
            }
        }
    });

    // 4. Mount the start route
    let runtime = Runtime::new(api, completion_tx, log.child("runtime"));
    let mut app = App::new(log.child("app"), options.login_url, options.notice_ttl);
    runtime.spawn(app.navigate(options.start));
    info!(parent: log.span(), path = options.start.path(), "TUI started");

    let mut tick = tokio::time::interval(Duration::from_millis(50));

    let result: anyhow::Result<()> = loop {
        tokio::select! {
            _ = tick.tick() => {
                app.tick(Instant::now());
                if let Err(e) = terminal.draw(|f| ui::draw(f, &app)) {
                    break Err(e.into());
                }
            }
            Some(term_event) = term_rx.recv() => {
                match term_event {
                    TermEvent::Key(key) => runtime.spawn(handle_key(&mut app, key)),
                    TermEvent::Resize(..) => {}
                }
            }
            Some(completion) = completion_rx.recv() => {
                runtime.spawn(app.handle_completion(completion));
            }
        }
        if app.should_quit {
            break Ok(());
        }
    };

    // 5. Shutdown: signal the reader thread to stop
    cancel.cancel();
    if ui_thread.join().is_err() {
        warn!(parent: log.span(), "Terminal reader thread panicked");
    }

    // 6. Restore terminal
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    info!(parent: log.span(), "TUI stopped");
    result
}
