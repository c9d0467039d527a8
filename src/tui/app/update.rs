use super::*;
use crate::tui::event::{binding_for, Binding};
use crate::Snapshot;
use crossterm::event::{KeyEvent, KeyEventKind};

impl App {
    /// Applies one event and returns the side effects it requires.
    ///
    /// Never fails: fetch errors land in `last_error` and action errors in
    /// the status message. Only `Quit` ends the session.
    pub fn update(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::Tick => vec![Command::Fetch],
            Event::Key(key) => self.handle_key(key),
            Event::Resize(_, height) => {
                self.terminal_height = height;
                self.follow_cursor();
                Vec::new()
            }
            Event::SnapshotReady(Ok(snapshot)) => {
                self.apply_snapshot(snapshot);
                Vec::new()
            }
            Event::SnapshotReady(Err(e)) => {
                tracing::warn!("device fetch failed: {}", e);
                self.last_error = Some(e);
                Vec::new()
            }
            Event::ActionDone(result) => {
                self.status_message = Some(match result {
                    Ok(message) => {
                        tracing::info!("{}", message);
                        StatusMessage::Info(message)
                    }
                    Err(e) => {
                        tracing::warn!("action failed: {}", e);
                        StatusMessage::Error(format!("Error: {e}"))
                    }
                });
                self.mode = Mode::Browsing;
                vec![Command::Fetch]
            }
            Event::InputClosed(e) => {
                self.input_error = Some(e);
                self.should_quit = true;
                vec![Command::Quit]
            }
        }
    }

    fn apply_snapshot(&mut self, snapshot: Snapshot) {
        tracing::debug!(
            "snapshot: {} devices ({} connected)",
            snapshot.devices.len(),
            snapshot.connected_count()
        );
        self.devices = snapshot.devices;
        self.powered = snapshot.powered;
        self.last_error = None;
        self.cursor = viewport::clamp_cursor(self.cursor, self.devices.len());
        self.follow_cursor();
    }

    fn follow_cursor(&mut self) {
        self.viewport_offset = viewport::follow_cursor(
            self.cursor,
            self.viewport_offset,
            self.visible_rows(),
            self.devices.len(),
        );
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        let binding = binding_for(key);

        match std::mem::replace(&mut self.mode, Mode::Browsing) {
            Mode::HelpShown => {
                self.status_message = None;
                Vec::new()
            }
            Mode::Confirming(action) => match binding {
                Some(Binding::Confirm) => {
                    self.status_message = None;
                    vec![Command::Execute(action)]
                }
                Some(Binding::Cancel) => {
                    self.status_message = None;
                    Vec::new()
                }
                _ => {
                    self.mode = Mode::Confirming(action);
                    Vec::new()
                }
            },
            Mode::Browsing => match binding {
                Some(binding) => self.handle_browsing(binding),
                None => Vec::new(),
            },
        }
    }

    fn handle_browsing(&mut self, binding: Binding) -> Vec<Command> {
        match binding {
            Binding::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                self.follow_cursor();
            }
            Binding::Down => {
                if self.cursor + 1 < self.devices.len() {
                    self.cursor += 1;
                }
                self.follow_cursor();
            }
            Binding::Connect | Binding::Disconnect | Binding::Remove => {
                self.request_device_action(binding);
            }
            Binding::Power => self.confirm(DeviceAction::SetPower(!self.power_is_on())),
            Binding::Reset => self.confirm(DeviceAction::Reset),
            Binding::Help => {
                self.status_message = None;
                self.mode = Mode::HelpShown;
            }
            Binding::Quit => {
                self.should_quit = true;
                return vec![Command::Quit];
            }
            Binding::Confirm | Binding::Cancel => {}
        }
        Vec::new()
    }

    /// Opens a prompt for the device under the cursor, or explains why the
    /// helper-backed action is unavailable.
    fn request_device_action(&mut self, binding: Binding) {
        let Some(device) = self.selected_device() else {
            return;
        };
        let address = device.address.clone();
        let name = device.name.clone();
        let action = match binding {
            Binding::Connect => DeviceAction::Connect { address, name },
            Binding::Disconnect => DeviceAction::Disconnect { address, name },
            _ => DeviceAction::Remove { address, name },
        };

        if action.needs_helper() && !self.helper_available {
            let refusal = BluetoothError::HelperMissing {
                helper: self.helper.clone(),
            };
            self.status_message = Some(StatusMessage::Error(refusal.to_string()));
            return;
        }
        self.confirm(action);
    }

    fn confirm(&mut self, action: DeviceAction) {
        self.status_message = None;
        self.mode = Mode::Confirming(action);
    }
}
