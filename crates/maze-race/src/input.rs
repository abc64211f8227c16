use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::io;
use std::time::Duration;

const WAIT_SLICE: Duration = Duration::from_millis(250);

/// Non-blocking key source. `poll_key` waits at most `timeout` and returns
/// `None` when nothing arrived, which is what lets the race loop notice
/// resizes between key presses.
pub trait InputSource {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>>;

    fn size(&mut self) -> io::Result<(u16, u16)>;

    fn wait_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Some(key) = self.poll_key(WAIT_SLICE)? {
                return Ok(key);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct CrosstermInput;

impl InputSource for CrosstermInput {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                Ok(Some(key))
            }
            _ => Ok(None),
        }
    }

    fn size(&mut self) -> io::Result<(u16, u16)> {
        crossterm::terminal::size()
    }
}
