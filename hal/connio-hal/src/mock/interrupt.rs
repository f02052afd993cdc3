//! Mock external interrupt controller

use crate::interrupt::{
    InterruptController, InterruptHandler, InterruptTrigger, EXTERNAL_INTERRUPT_LINES,
};

/// Mock interrupt controller recording registrations
#[derive(Debug, Clone, Copy)]
pub struct MockInterrupts {
    handlers: [Option<(InterruptHandler, InterruptTrigger)>; EXTERNAL_INTERRUPT_LINES as usize],
    enabled: bool,
}

impl Default for MockInterrupts {
    fn default() -> Self {
        Self::new()
    }
}

impl MockInterrupts {
    /// Create a controller with no handlers and interrupts enabled
    pub fn new() -> Self {
        Self {
            handlers: [None; EXTERNAL_INTERRUPT_LINES as usize],
            enabled: true,
        }
    }

    /// Registered trigger for a line
    pub fn trigger(&self, line: u8) -> Option<InterruptTrigger> {
        self.handlers
            .get(line as usize)
            .copied()
            .flatten()
            .map(|(_, trigger)| trigger)
    }

    /// Invoke the handler registered for a line, as the hardware would
    ///
    /// Returns false if no handler is registered or interrupts are disabled.
    pub fn fire(&self, line: u8) -> bool {
        if !self.enabled {
            return false;
        }
        match self.handlers.get(line as usize).copied().flatten() {
            Some((handler, _)) => {
                handler();
                true
            }
            None => false,
        }
    }

    /// Check if interrupts are globally enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl InterruptController for MockInterrupts {
    fn set_handler(&mut self, line: u8, handler: Option<InterruptHandler>, trigger: InterruptTrigger) {
        if let Some(slot) = self.handlers.get_mut(line as usize) {
            *slot = handler.map(|h| (h, trigger));
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
