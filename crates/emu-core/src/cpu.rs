//! CPU core trait.

use crate::Bus;

/// A CPU core.
///
/// The bus is passed in on every call rather than owned, so loaders and
/// inspectors can use the same memory between ticks.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Advance the CPU by one clock cycle.
    fn tick<B: Bus>(&mut self, bus: &mut B);

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Returns true once the CPU has stopped accepting instructions.
    fn is_halted(&self) -> bool;

    /// Re-initialise the CPU, loading the program counter from the bus.
    fn reset<B: Bus>(&mut self, bus: &mut B);
}
