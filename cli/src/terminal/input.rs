use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use modscan_common::warn;

/// Watches the keyboard for a stop request while a scan runs.
pub struct InputHandle {
    rx: mpsc::Receiver<KeyEvent>,
    tx: Option<mpsc::Sender<KeyEvent>>,
}

impl InputHandle {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { rx, tx: Some(tx) }
    }

    pub fn start(&mut self) {
        let Some(tx) = self.tx.take() else {
            return;
        };

        thread::spawn(move || {
            if let Err(e) = enable_raw_mode() {
                warn!("Keyboard input unavailable: {e}");
                return;
            }
            loop {
                match event::read() {
                    Ok(Event::Key(key_event)) if is_stop_key(&key_event) => {
                        let _ = tx.send(key_event);
                        break;
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
            let _ = disable_raw_mode();
        });
    }

    pub fn should_interrupt(&self) -> bool {
        self.rx.try_recv().is_ok()
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// 'q' or Ctrl-C; raw mode swallows the usual SIGINT.
fn is_stop_key(key_event: &KeyEvent) -> bool {
    let is_q = key_event.code == KeyCode::Char('q');
    let is_ctrl_c = key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL);

    (is_q || is_ctrl_c) && key_event.kind == KeyEventKind::Press
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
