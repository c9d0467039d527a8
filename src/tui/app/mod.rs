//! Session state and the main event loop for the TUI.
//!
//! All state changes go through [`App::update`]. The loop in [`App::run`]
//! feeds it one event at a time, runs the returned [`Command`]s on blocking
//! worker tasks, and redraws.

mod update;

use crate::bluetooth::{Bluetooth, BluetoothError};
use crate::tui::command::{Command, DeviceAction};
use crate::tui::event::{Event, EventHandler};
use crate::tui::ui::render_dashboard;
use crate::tui::viewport;
use crate::Device;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::Backend;
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

/// Interaction mode of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation.
    Browsing,
    /// A prompt is open for the captured action.
    Confirming(DeviceAction),
    /// The full key list replaces the device table.
    HelpShown,
}

/// One-line feedback shown under the device table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            Self::Info(text) | Self::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Dashboard session state.
///
/// Created once per session and mutated only by [`App::update`]. Renderers
/// read it through the accessors.
#[derive(Debug)]
pub struct App {
    devices: Vec<Device>,
    cursor: usize,
    viewport_offset: usize,
    mode: Mode,
    status_message: Option<StatusMessage>,
    helper: String,
    helper_available: bool,
    last_error: Option<BluetoothError>,
    powered: Option<bool>,
    terminal_height: u16,
    should_quit: bool,
    input_error: Option<io::Error>,
}

impl App {
    /// Creates an empty session. `helper_available` is probed once by the
    /// caller and never re-checked.
    pub fn new(helper: impl Into<String>, helper_available: bool) -> Self {
        Self {
            devices: Vec::new(),
            cursor: 0,
            viewport_offset: 0,
            mode: Mode::Browsing,
            status_message: None,
            helper: helper.into(),
            helper_available,
            last_error: None,
            powered: None,
            terminal_height: 0,
            should_quit: false,
            input_error: None,
        }
    }

    /// Commands to run before the first event: the initial fetch.
    pub fn init(&self) -> Vec<Command> {
        vec![Command::Fetch]
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn viewport_offset(&self) -> usize {
        self.viewport_offset
    }

    /// Device rows that fit the current terminal height.
    pub fn visible_rows(&self) -> usize {
        viewport::visible_rows(self.terminal_height)
    }

    /// Devices currently inside the viewport, with their list indices.
    pub fn visible_devices(&self) -> impl Iterator<Item = (usize, &Device)> {
        self.devices
            .iter()
            .enumerate()
            .skip(self.viewport_offset)
            .take(self.visible_rows())
    }

    pub fn selected_device(&self) -> Option<&Device> {
        self.devices.get(self.cursor)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// The action awaiting confirmation. `Some` exactly while confirming.
    pub fn pending_action(&self) -> Option<&DeviceAction> {
        match &self.mode {
            Mode::Confirming(action) => Some(action),
            _ => None,
        }
    }

    pub fn status_message(&self) -> Option<&StatusMessage> {
        self.status_message.as_ref()
    }

    pub fn helper(&self) -> &str {
        &self.helper
    }

    pub fn helper_available(&self) -> bool {
        self.helper_available
    }

    /// Error from the most recent failed fetch, cleared by the next good one.
    pub fn last_error(&self) -> Option<&BluetoothError> {
        self.last_error.as_ref()
    }

    /// Controller power state as reported by the last snapshot.
    pub fn powered(&self) -> Option<bool> {
        self.powered
    }

    /// Best knowledge of the power state. When the snapshot did not report
    /// one, a non-empty device list is taken to mean the controller is on.
    pub fn power_is_on(&self) -> bool {
        self.powered.unwrap_or(!self.devices.is_empty())
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Why terminal input stopped, if it did.
    pub fn input_error(&self) -> Option<&io::Error> {
        self.input_error.as_ref()
    }

    /// Runs the TUI: sets up the terminal, runs the event loop, and restores
    /// the terminal on every exit path.
    pub async fn run(mut self, backend: Arc<dyn Bluetooth>, tick_rate: Duration) -> io::Result<()> {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = match Terminal::new(CrosstermBackend::new(stdout())) {
            Ok(mut terminal) => self.event_loop(&mut terminal, backend, tick_rate).await,
            Err(e) => Err(e),
        };

        restore_terminal()?;
        result
    }

    async fn event_loop<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        backend: Arc<dyn Bluetooth>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        let mut events = EventHandler::new(tick_rate);
        let tx = events.sender();

        let size = terminal.size()?;
        self.update(Event::Resize(size.width, size.height));
        dispatch(self.init(), &backend, &tx);
        events.start();
        terminal.draw(|frame| render_dashboard(frame, self))?;

        while let Some(event) = events.next().await {
            let commands = self.update(event);
            if dispatch(commands, &backend, &tx) {
                break;
            }
            terminal.draw(|frame| render_dashboard(frame, self))?;
        }
        tracing::info!("session ended");
        match self.input_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Starts each command on a blocking worker task. Results come back on `tx`.
///
/// Returns `true` when a [`Command::Quit`] was seen; commands after it are
/// not started. Tasks already running are abandoned on quit.
pub(crate) fn dispatch(
    commands: Vec<Command>,
    backend: &Arc<dyn Bluetooth>,
    tx: &UnboundedSender<Event>,
) -> bool {
    for command in commands {
        tracing::debug!("dispatching {:?}", command);
        match command {
            Command::Quit => return true,
            Command::Fetch => {
                let backend = Arc::clone(backend);
                let tx = tx.clone();
                tokio::task::spawn_blocking(move || {
                    let result = backend.fetch_snapshot();
                    // Send fails only once the loop has exited.
                    let _ = tx.send(Event::SnapshotReady(result));
                });
            }
            Command::Execute(action) => {
                let backend = Arc::clone(backend);
                let tx = tx.clone();
                tokio::task::spawn_blocking(move || {
                    let result = action.execute(backend.as_ref());
                    let _ = tx.send(Event::ActionDone(result));
                });
            }
        }
    }
    false
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
mod tests;
