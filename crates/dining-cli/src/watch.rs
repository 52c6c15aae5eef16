//! Live list: one session, redrawn on every state change, steered by keys.

use std::future::Future;
use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use dining_client::{Session, StatusClient, StatusFetcher, StatusSource};
use dining_core::AppConfig;
use futures::{Stream, StreamExt};

use crate::browser::open_in_browser;
use crate::terminal::Terminal;
use crate::view::{ListView, Shortcut};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Input {
    Refresh,
    OpenHours,
    Redraw,
    Quit,
}

/// What a terminal event asks the live view to do.
pub(crate) fn input_for(event: &Event) -> Option<Input> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => key_input(key),
        Event::Resize(..) => Some(Input::Redraw),
        _ => None,
    }
}

fn key_input(key: &KeyEvent) -> Option<Input> {
    if Shortcut::REFRESH.matches(key) {
        return Some(Input::Refresh);
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        // raw mode delivers Ctrl+C as a key, not SIGINT
        KeyCode::Char('c' | 'd') if ctrl => Some(Input::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        KeyCode::Char('o') if !ctrl => Some(Input::OpenHours),
        _ => None,
    }
}

/// Run the live view until a quit key, the end of input, or SIGINT.
pub(crate) async fn run_watch(
    config: &AppConfig,
    interval: Duration,
    color: bool,
) -> anyhow::Result<()> {
    let client = StatusClient::new(config)?;
    let mut terminal = Terminal::enter(color).context("failed to put the terminal in raw mode")?;
    let session = Session::activate(StatusFetcher::new(client), interval);

    drive(
        session,
        EventStream::new(),
        tokio::signal::ctrl_c(),
        &config.hours_page_url(),
        |view| terminal.draw(view),
    )
    .await
}

/// Drives `session` from `events` until a quit key, the end of the stream,
/// or `shutdown` resolves.
///
/// `draw` receives the first frame and every frame after a state change. The
/// session is deactivated on every exit path, including event and draw
/// errors.
pub(crate) async fn drive<S, E, F, D>(
    session: Session<S>,
    events: E,
    shutdown: F,
    hours_url: &str,
    mut draw: D,
) -> anyhow::Result<()>
where
    S: StatusSource,
    E: Stream<Item = io::Result<Event>> + Unpin,
    F: Future,
    D: FnMut(&ListView) -> io::Result<()>,
{
    let result = event_loop(&session, events, shutdown, hours_url, &mut draw).await;
    session.deactivate();
    result
}

async fn event_loop<S, E, F, D>(
    session: &Session<S>,
    mut events: E,
    shutdown: F,
    hours_url: &str,
    draw: &mut D,
) -> anyhow::Result<()>
where
    S: StatusSource,
    E: Stream<Item = io::Result<Event>> + Unpin,
    F: Future,
    D: FnMut(&ListView) -> io::Result<()>,
{
    let mut updates = session.fetcher().subscribe();
    let mut view = ListView::build(&updates.borrow_and_update(), hours_url);
    draw(&view)?;
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                view = ListView::build(&updates.borrow_and_update(), hours_url);
                tracing::trace!(items = view.item_count(), loading = view.loading, "redraw");
                draw(&view)?;
            }
            event = events.next() => {
                let Some(event) = event else {
                    tracing::debug!("terminal event stream closed");
                    break;
                };
                match input_for(&event.context("failed to read terminal event")?) {
                    Some(Input::Refresh) => {
                        tracing::debug!("manual refresh");
                        session.revalidate();
                    }
                    Some(Input::OpenHours) => {
                        let Some(url) = view.hours_url() else {
                            continue;
                        };
                        if let Err(e) = open_in_browser(url).await {
                            tracing::warn!(error = %e, "could not open hours page");
                        }
                    }
                    Some(Input::Redraw) => draw(&view)?,
                    Some(Input::Quit) => break,
                    None => {}
                }
            }
            _ = &mut shutdown => {
                tracing::info!("received shutdown signal");
                break;
            }
        }
    }
    Ok(())
}
