use super::*;
use crossterm::event::{KeyEventState, KeyModifiers};

fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::NONE,
    }
}

fn char_key(c: char) -> KeyEvent {
    make_key(KeyCode::Char(c), KeyModifiers::NONE)
}

#[test]
fn test_quit_bindings() {
    assert_eq!(binding_for(char_key('q')), Some(Binding::Quit));
    assert_eq!(
        binding_for(make_key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        Some(Binding::Quit)
    );
}

#[test]
fn test_plain_c_is_connect_not_quit() {
    assert_eq!(binding_for(char_key('c')), Some(Binding::Connect));
}

#[test]
fn test_navigation_bindings() {
    assert_eq!(binding_for(char_key('k')), Some(Binding::Up));
    assert_eq!(
        binding_for(make_key(KeyCode::Up, KeyModifiers::NONE)),
        Some(Binding::Up)
    );
    assert_eq!(binding_for(char_key('j')), Some(Binding::Down));
    assert_eq!(
        binding_for(make_key(KeyCode::Down, KeyModifiers::NONE)),
        Some(Binding::Down)
    );
}

#[test]
fn test_action_bindings() {
    assert_eq!(binding_for(char_key('d')), Some(Binding::Disconnect));
    assert_eq!(binding_for(char_key('r')), Some(Binding::Remove));
    assert_eq!(binding_for(char_key('p')), Some(Binding::Power));
    assert_eq!(binding_for(char_key('?')), Some(Binding::Help));
}

#[test]
fn test_reset_is_uppercase_r_with_or_without_shift() {
    assert_eq!(binding_for(char_key('R')), Some(Binding::Reset));
    assert_eq!(
        binding_for(make_key(KeyCode::Char('R'), KeyModifiers::SHIFT)),
        Some(Binding::Reset)
    );
}

#[test]
fn test_confirm_and_cancel_bindings() {
    assert_eq!(binding_for(char_key('y')), Some(Binding::Confirm));
    assert_eq!(binding_for(char_key('n')), Some(Binding::Cancel));
    assert_eq!(
        binding_for(make_key(KeyCode::Esc, KeyModifiers::NONE)),
        Some(Binding::Cancel)
    );
}

#[test]
fn test_unbound_keys() {
    assert_eq!(binding_for(char_key('x')), None);
    assert_eq!(binding_for(make_key(KeyCode::Enter, KeyModifiers::NONE)), None);
    assert_eq!(binding_for(make_key(KeyCode::Tab, KeyModifiers::NONE)), None);
}

#[test]
fn test_modified_letters_are_unbound() {
    for c in ['d', 'r', 'k', 'j', 'p', 'q', 'y'] {
        assert_eq!(binding_for(make_key(KeyCode::Char(c), KeyModifiers::CONTROL)), None, "ctrl+{c}");
        assert_eq!(binding_for(make_key(KeyCode::Char(c), KeyModifiers::ALT)), None, "alt+{c}");
    }
    assert_eq!(
        binding_for(make_key(KeyCode::Char('c'), KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
        Some(Binding::Quit)
    );
}

#[test]
fn test_release_events_are_ignored() {
    let mut key = char_key('q');
    key.kind = KeyEventKind::Release;
    assert_eq!(binding_for(key), None);
}

#[test]
fn test_full_help_covers_short_help() {
    let full: Vec<_> = FULL_HELP.iter().flat_map(|group| group.iter()).collect();
    for entry in SHORT_HELP {
        assert!(full.contains(&entry), "{:?} missing from full help", entry);
    }
}

#[tokio::test]
async fn test_sender_feeds_next() {
    let mut handler = EventHandler::new(Duration::from_secs(60));
    handler
        .sender()
        .send(Event::ActionDone(Ok("done".to_string())))
        .expect("receiver is alive");
    match handler.next().await {
        Some(Event::ActionDone(Ok(msg))) => assert_eq!(msg, "done"),
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
async fn test_tick_task_emits_ticks() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(tick(tx, Duration::from_millis(20)));
    let first = tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("tick should arrive");
    assert!(matches!(first, Some(Event::Tick)));
    task.abort();
}

#[tokio::test]
async fn test_tick_task_stops_when_receiver_dropped() {
    let (tx, rx) = mpsc::unbounded_channel();
    drop(rx);
    let task = tokio::spawn(tick(tx, Duration::from_millis(5)));
    tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("tick task should exit")
        .expect("tick task should not panic");
}

#[tokio::test]
async fn test_input_end_reports_input_closed() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let input: Vec<io::Result<CrosstermEvent>> = vec![
        Ok(CrosstermEvent::Key(char_key('j'))),
        Ok(CrosstermEvent::FocusGained),
        Ok(CrosstermEvent::Resize(80, 24)),
    ];
    read_input(futures::stream::iter(input), tx).await;

    assert!(matches!(rx.recv().await, Some(Event::Key(key)) if key.code == KeyCode::Char('j')));
    assert!(matches!(rx.recv().await, Some(Event::Resize(80, 24))));
    match rx.recv().await {
        Some(Event::InputClosed(e)) => assert_eq!(e.kind(), io::ErrorKind::UnexpectedEof),
        other => panic!("expected input closed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_input_error_reports_input_closed() {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let input: Vec<io::Result<CrosstermEvent>> = vec![
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "tty gone")),
        Ok(CrosstermEvent::Key(char_key('q'))),
    ];
    read_input(futures::stream::iter(input), tx).await;

    match rx.recv().await {
        Some(Event::InputClosed(e)) => {
            assert_eq!(e.kind(), io::ErrorKind::BrokenPipe);
            assert_eq!(e.to_string(), "tty gone");
        }
        other => panic!("expected input closed, got {:?}", other),
    }
    assert!(rx.recv().await.is_none(), "nothing is read after the error");
}
