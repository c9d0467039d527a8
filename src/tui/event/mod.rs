//! Event funnel for the TUI.
//!
//! Terminal input, periodic ticks, and results from blocking Bluetooth calls
//! all arrive on one unbounded channel and are consumed by a single loop.

use crate::bluetooth::BluetoothError;
use crate::Snapshot;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Everything the session controller reacts to.
#[derive(Debug)]
pub enum Event {
    /// Refresh period elapsed.
    Tick,
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized to `(width, height)`.
    Resize(u16, u16),
    /// A device fetch finished.
    SnapshotReady(Result<Snapshot, BluetoothError>),
    /// A device action finished; `Ok` carries the success message.
    ActionDone(Result<String, BluetoothError>),
    /// Terminal input failed or reached end of stream. No key can arrive
    /// after this, so the session has to end.
    InputClosed(io::Error),
}

/// Logical key bindings. The physical keys are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    /// `k` or Up arrow.
    Up,
    /// `j` or Down arrow.
    Down,
    /// `c`.
    Connect,
    /// `d`.
    Disconnect,
    /// `r`.
    Remove,
    /// `p`.
    Power,
    /// `R`.
    Reset,
    /// `?`.
    Help,
    /// `q` or Ctrl+C.
    Quit,
    /// `y`.
    Confirm,
    /// `n` or Esc.
    Cancel,
}

/// Maps a key event to its binding. Release and repeat events map to nothing.
pub fn binding_for(key: KeyEvent) -> Option<Binding> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let binding = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Binding::Quit,
        // Bindings are plain keys; Ctrl+D is not Disconnect.
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            return None
        }
        KeyCode::Char('q') => Binding::Quit,
        KeyCode::Char('k') | KeyCode::Up => Binding::Up,
        KeyCode::Char('j') | KeyCode::Down => Binding::Down,
        KeyCode::Char('c') => Binding::Connect,
        KeyCode::Char('d') => Binding::Disconnect,
        KeyCode::Char('r') => Binding::Remove,
        KeyCode::Char('p') => Binding::Power,
        KeyCode::Char('R') => Binding::Reset,
        KeyCode::Char('?') => Binding::Help,
        KeyCode::Char('y') => Binding::Confirm,
        KeyCode::Char('n') | KeyCode::Esc => Binding::Cancel,
        _ => return None,
    };
    Some(binding)
}

/// Short key legend shown under the device table.
pub const SHORT_HELP: &[(&str, &str)] = &[
    ("k/up", "up"),
    ("j/down", "down"),
    ("c", "connect"),
    ("d", "disconnect"),
    ("r", "remove"),
    ("p", "power toggle"),
    ("q", "quit"),
    ("?", "help"),
];

/// Full key list shown by the help screen, grouped by purpose.
pub const FULL_HELP: &[&[(&str, &str)]] = &[
    &[("k/up", "up"), ("j/down", "down")],
    &[("c", "connect"), ("d", "disconnect"), ("r", "remove")],
    &[("p", "power toggle"), ("R", "reset")],
    &[("y", "confirm"), ("n/esc", "cancel")],
    &[("q", "quit"), ("?", "help")],
];

/// Owns the event channel and the background producers feeding it.
///
/// Producer tasks are aborted when the handler is dropped.
pub struct EventHandler {
    tick_rate: Duration,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
    tasks: Vec<JoinHandle<()>>,
}

impl EventHandler {
    /// Creates a handler with an empty channel. Nothing is produced until
    /// [`EventHandler::start`] is called.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tick_rate,
            tx,
            rx,
            tasks: Vec::new(),
        }
    }

    /// A sender for worker tasks to report results on.
    pub fn sender(&self) -> UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Spawns the terminal input reader and the tick timer.
    pub fn start(&mut self) {
        self.tasks
            .push(tokio::spawn(read_input(EventStream::new(), self.tx.clone())));
        self.tasks
            .push(tokio::spawn(tick(self.tx.clone(), self.tick_rate)));
    }

    /// Waits for the next event. Never returns `None` while the handler is
    /// alive since it holds a sender itself.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Forwards key and resize events from `input` until it fails or ends, then
/// reports [`Event::InputClosed`].
async fn read_input<S>(input: S, tx: UnboundedSender<Event>)
where
    S: Stream<Item = io::Result<CrosstermEvent>>,
{
    let mut input = std::pin::pin!(input);
    let closed = loop {
        let event = match input.next().await {
            Some(Ok(CrosstermEvent::Key(key))) => Event::Key(key),
            Some(Ok(CrosstermEvent::Resize(w, h))) => Event::Resize(w, h),
            // Ignore mouse, focus, paste events
            Some(Ok(_)) => continue,
            Some(Err(e)) => break e,
            None => break io::Error::new(io::ErrorKind::UnexpectedEof, "event stream ended"),
        };
        if tx.send(event).is_err() {
            return;
        }
    };
    tracing::warn!("terminal input closed: {}", closed);
    let _ = tx.send(Event::InputClosed(closed));
}

async fn tick(tx: UnboundedSender<Event>, period: Duration) {
    let mut timer = interval(period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately; the initial fetch is issued separately.
    timer.tick().await;
    loop {
        timer.tick().await;
        if tx.send(Event::Tick).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests;
