use std::io;

/// Decides when the race screen has to be painted again.
#[derive(Debug, Clone, Default)]
pub struct RedrawScheduler {
    size: Option<(u16, u16)>,
    needs_redraw: bool,
}

impl RedrawScheduler {
    /// Starts dirty so the first loop iteration paints.
    pub fn new(initial_size: Option<(u16, u16)>) -> Self {
        Self {
            size: initial_size,
            needs_redraw: true,
        }
    }

    pub fn request(&mut self) {
        self.needs_redraw = true;
    }

    /// Compares the current terminal size with the last one seen. Query
    /// errors count as "unchanged".
    pub fn check_resize(&mut self, current: io::Result<(u16, u16)>) -> bool {
        let Ok(current) = current else {
            return false;
        };
        if self.size == Some(current) {
            return false;
        }
        let changed = self.size.is_some();
        self.size = Some(current);
        if changed {
            self.needs_redraw = true;
        }
        changed
    }

    /// Returns whether a redraw is due and clears the flag in the same step.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}
