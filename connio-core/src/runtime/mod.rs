//! Execution model
//!
//! A periodic timer interrupt drives [`SysTick`]; the foreground runs a
//! [`Sketch`] through a [`Runner`]: `setup` once, then `run_loop` forever.
//! The interrupt side only touches the tick counters, never connectors.

mod sketch;
mod systick;

pub use sketch::{Runner, Sketch};
pub use systick::{SysTick, TickOutcome};
