use super::*;
use std::sync::Mutex;
use tokio::sync::mpsc;

/// In-memory backend that records calls and returns canned results.
#[derive(Default)]
struct FakeBluetooth {
    devices: Vec<Device>,
    fail_actions: bool,
    calls: Mutex<Vec<String>>,
}

impl FakeBluetooth {
    fn record(&self, call: String) -> Result<(), BluetoothError> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
        if self.fail_actions {
            Err(BluetoothError::HelperMissing {
                helper: "blueutil".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Bluetooth for FakeBluetooth {
    fn fetch_snapshot(&self) -> Result<Snapshot, BluetoothError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push("fetch".to_string());
        Ok(Snapshot {
            devices: self.devices.clone(),
            powered: Some(true),
        })
    }

    fn connect(&self, address: &str) -> Result<(), BluetoothError> {
        self.record(format!("connect {address}"))
    }

    fn disconnect(&self, address: &str) -> Result<(), BluetoothError> {
        self.record(format!("disconnect {address}"))
    }

    fn remove(&self, address: &str) -> Result<(), BluetoothError> {
        self.record(format!("remove {address}"))
    }

    fn set_power(&self, on: bool) -> Result<(), BluetoothError> {
        self.record(format!("power {on}"))
    }

    fn reset(&self) -> Result<(), BluetoothError> {
        self.record("reset".to_string())
    }

    fn helper_available(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn test_fetch_result_returns_as_snapshot_event() {
    let fake = Arc::new(FakeBluetooth {
        devices: make_devices(2),
        ..Default::default()
    });
    let backend: Arc<dyn Bluetooth> = fake.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();

    assert!(!dispatch(vec![Command::Fetch], &backend, &tx));
    match rx.recv().await {
        Some(Event::SnapshotReady(Ok(snapshot))) => assert_eq!(snapshot.devices.len(), 2),
        other => panic!("expected snapshot, got {other:?}"),
    }
    assert_eq!(fake.calls(), vec!["fetch"]);
}

#[tokio::test]
async fn test_execute_result_returns_as_action_done() {
    let fake = Arc::new(FakeBluetooth::default());
    let backend: Arc<dyn Bluetooth> = fake.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();

    let action = DeviceAction::Disconnect {
        address: "AA".to_string(),
        name: "Pods".to_string(),
    };
    dispatch(vec![Command::Execute(action)], &backend, &tx);
    match rx.recv().await {
        Some(Event::ActionDone(Ok(msg))) => assert_eq!(msg, "Disconnected Pods"),
        other => panic!("expected action result, got {other:?}"),
    }
    assert_eq!(fake.calls(), vec!["disconnect AA"]);
}

#[tokio::test]
async fn test_failed_execute_reports_error() {
    let backend: Arc<dyn Bluetooth> = Arc::new(FakeBluetooth {
        fail_actions: true,
        ..Default::default()
    });
    let (tx, mut rx) = mpsc::unbounded_channel();
    dispatch(vec![Command::Execute(DeviceAction::Reset)], &backend, &tx);
    assert!(matches!(rx.recv().await, Some(Event::ActionDone(Err(_)))));
}

#[tokio::test]
async fn test_quit_stops_dispatch() {
    let fake = Arc::new(FakeBluetooth::default());
    let backend: Arc<dyn Bluetooth> = fake.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();
    assert!(dispatch(
        vec![Command::Quit, Command::Fetch, Command::Execute(DeviceAction::Reset)],
        &backend,
        &tx
    ));

    // Give any wrongly spawned worker time to run and report back.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(
        matches!(rx.try_recv(), Err(mpsc::error::TryRecvError::Empty)),
        "no result should arrive for commands after quit"
    );
    assert!(fake.calls().is_empty(), "commands after quit are not started");
}

#[tokio::test]
async fn test_confirmed_action_round_trip_through_app() {
    let fake = Arc::new(FakeBluetooth {
        devices: make_devices(3),
        ..Default::default()
    });
    let backend: Arc<dyn Bluetooth> = fake.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut app = App::new("blueutil", true);

    dispatch(app.init(), &backend, &tx);
    let event = rx.recv().await.expect("snapshot event");
    app.update(event);
    assert_eq!(app.devices().len(), 3);

    press_char(&mut app, 'j');
    press_char(&mut app, 'c');
    let commands = press_char(&mut app, 'y');
    dispatch(commands, &backend, &tx);

    let done = rx.recv().await.expect("action event");
    let follow_up = app.update(done);
    assert_eq!(follow_up, vec![Command::Fetch]);
    assert_eq!(
        app.status_message().map(StatusMessage::text),
        Some("Connected to device-1")
    );
    assert_eq!(fake.calls(), vec!["fetch", "connect AA:BB:CC:DD:EE:01"]);
}
