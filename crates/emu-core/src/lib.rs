//! Core traits and types for cycle-counted 6502 emulation.
//!
//! A CPU advances one clock cycle per `tick()` and reaches memory only
//! through a [`Bus`]. Every component exposes its state through
//! [`Observable`].

mod bus;
mod cpu;
mod observable;

pub use bus::{ADDRESS_SPACE, Bus, SimpleBus};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
