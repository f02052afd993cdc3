//! External interrupt controller

/// Number of external interrupt lines
pub const EXTERNAL_INTERRUPT_LINES: u8 = 16;

/// Interrupt handler callback
pub type InterruptHandler = fn();

/// Edge or level that fires an interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptTrigger {
    /// Input is low
    Low,
    /// Input is high
    High,
    /// Any edge
    Change,
    /// High to low edge
    Falling,
    /// Low to high edge
    Rising,
}

/// External interrupt controller
pub trait InterruptController {
    /// Register (`Some`) or clear (`None`) the handler for a line
    fn set_handler(&mut self, line: u8, handler: Option<InterruptHandler>, trigger: InterruptTrigger);

    /// Globally enable or disable external interrupts
    fn set_enabled(&mut self, enabled: bool);
}
