pub(crate) use super::*;
pub(crate) use crate::Snapshot;
pub(crate) use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

mod runtime;

pub(crate) fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

/// Sends a plain key press and returns the resulting commands.
pub(crate) fn press(app: &mut App, code: KeyCode) -> Vec<Command> {
    app.update(Event::Key(make_key(code, KeyModifiers::NONE)))
}

pub(crate) fn press_char(app: &mut App, c: char) -> Vec<Command> {
    press(app, KeyCode::Char(c))
}

pub(crate) fn make_devices(count: usize) -> Vec<Device> {
    (0..count)
        .map(|i| {
            let mut device = Device::new(format!("AA:BB:CC:DD:EE:{:02X}", i), format!("device-{i}"));
            device.connected = i % 2 == 0;
            device
        })
        .collect()
}

pub(crate) fn snapshot(devices: Vec<Device>) -> Event {
    Event::SnapshotReady(Ok(Snapshot {
        devices,
        powered: None,
    }))
}

/// App with the helper installed, `count` devices loaded, and a terminal
/// tall enough for `visible` device rows.
pub(crate) fn make_app(count: usize, visible: u16) -> App {
    let mut app = App::new("blueutil", true);
    app.update(Event::Resize(80, visible + viewport::CHROME_ROWS));
    app.update(snapshot(make_devices(count)));
    app
}

pub(crate) fn assert_viewport_invariant(app: &App) {
    let len = app.devices().len();
    if len == 0 {
        assert_eq!(app.cursor(), 0);
    } else {
        assert!(app.cursor() < len, "cursor {} out of range {}", app.cursor(), len);
    }
    assert!(app.viewport_offset() <= app.cursor());
    assert!(app.cursor() < app.viewport_offset() + app.visible_rows());
}
