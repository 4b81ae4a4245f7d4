//! Cycle-counted MOS 6502 CPU emulator.
//!
//! Each `tick()` advances one clock cycle. An instruction's register and
//! memory effects are applied on its first cycle; the remaining cycles of
//! its cost are waits. Opcodes decode through a 256-entry table of
//! addressing mode, operation and base cycle count.

mod addressing;
mod cpu;
pub mod flags;
mod instructions;
mod registers;
mod table;

pub use addressing::AddressingMode;
pub use cpu::{Mos6502, RESET_VECTOR, Snapshot};
pub use flags::Status;
pub use instructions::{IRQ_VECTOR, Operation};
pub use registers::{Registers, STACK_PAGE};
pub use table::{INSTRUCTIONS, Instruction};
