//! 6502 CPU implementation.
//!
//! Each `tick()` is one clock cycle. The cycle that finds the CPU idle
//! does the whole fetch-decode-execute at once and loads the cycle
//! counter with the instruction's remaining cost; the following ticks
//! only count down. A JAM opcode stops the CPU for good.

use emu_core::{Bus, Cpu, Observable, Value};

use crate::flags::{B, C, D, I, N, V, Z};
use crate::table::INSTRUCTIONS;
use crate::{Registers, Status};

/// Vector read on power-on and reset.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Read-only view of the CPU for debuggers and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    /// Register file.
    pub registers: Registers,
    /// Opcode of the current (or last) instruction.
    pub opcode: u8,
    /// Effective address resolved for that instruction.
    pub effective_address: u16,
    /// Operand byte most recently read by a handler.
    pub fetched: u8,
    /// Cycles still to wait before the next fetch.
    pub cycles_remaining: u8,
    /// Cycles ticked since power-on or reset.
    pub total_cycles: u64,
    /// Set by a JAM opcode.
    pub halted: bool,
}

/// The MOS 6502 CPU.
#[derive(Debug)]
pub struct Mos6502 {
    /// CPU registers.
    pub(crate) regs: Registers,

    /// Current opcode being executed.
    opcode: u8,

    /// Effective address from the last resolver.
    pub(crate) addr: u16,

    /// Last operand byte read by a handler.
    pub(crate) fetched: u8,

    /// Cycles left before the next fetch (0 = idle).
    cycles_remaining: u8,

    /// Set by KIL; terminal until reset.
    pub(crate) halted: bool,

    /// Total cycles executed (for debugging).
    total_cycles: u64,
}

impl Mos6502 {
    /// Create a 6502 in power-on state, loading PC from the reset vector.
    pub fn new<B: Bus>(bus: &mut B) -> Self {
        let mut regs = Registers::new();
        regs.pc = Self::read_word(bus, RESET_VECTOR);
        Self {
            regs,
            opcode: 0,
            addr: 0,
            fetched: 0,
            cycles_remaining: 0,
            halted: false,
            total_cycles: 0,
        }
    }

    /// True when the current instruction has used up all its cycles.
    #[must_use]
    pub fn is_instruction_complete(&self) -> bool {
        self.cycles_remaining == 0
    }

    /// Copy out everything a debugger may want to show.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            registers: self.regs,
            opcode: self.opcode,
            effective_address: self.addr,
            fetched: self.fetched,
            cycles_remaining: self.cycles_remaining,
            total_cycles: self.total_cycles,
            halted: self.halted,
        }
    }

    /// Overwrite the register file. For seeding test harnesses only.
    #[cfg(any(test, feature = "test-utils"))]
    pub fn set_registers(&mut self, regs: Registers) {
        self.regs = regs;
    }

    /// Execute one CPU cycle.
    fn execute_cycle<B: Bus>(&mut self, bus: &mut B) {
        if self.halted {
            return;
        }
        self.total_cycles += 1;

        if self.cycles_remaining > 0 {
            self.cycles_remaining -= 1;
            return;
        }

        self.opcode = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);

        let instr = &INSTRUCTIONS[usize::from(self.opcode)];
        let page_crossed = self.resolve(instr.mode, bus);
        let extra = self.execute(instr.operation, instr.mode, bus);

        if self.halted {
            return;
        }

        let mut total = instr.cycles + extra;
        if instr.page_penalty {
            total += page_crossed;
        }
        // This tick already paid for the first cycle.
        self.cycles_remaining = total - 1;
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl Cpu for Mos6502 {
    type Registers = Registers;

    fn tick<B: Bus>(&mut self, bus: &mut B) {
        self.execute_cycle(bus);
    }

    fn pc(&self) -> u16 {
        self.regs.pc
    }

    fn registers(&self) -> Self::Registers {
        self.regs
    }

    fn is_halted(&self) -> bool {
        self.halted
    }

    fn reset<B: Bus>(&mut self, bus: &mut B) {
        *self = Self::new(bus);
    }
}

impl Observable for Mos6502 {
    fn query(&self, path: &str) -> Option<Value> {
        let p: Status = self.regs.p;
        match path {
            "pc" => Some(self.regs.pc.into()),
            "a" => Some(self.regs.a.into()),
            "x" => Some(self.regs.x.into()),
            "y" => Some(self.regs.y.into()),
            "s" | "sp" => Some(self.regs.s.into()),
            "p" | "status" => Some(p.bits().into()),
            "flags.c" | "c" => Some(p.is_set(C).into()),
            "flags.z" | "z" => Some(p.is_set(Z).into()),
            "flags.i" | "i" => Some(p.is_set(I).into()),
            "flags.d" | "d" => Some(p.is_set(D).into()),
            "flags.b" | "b" => Some(p.is_set(B).into()),
            "flags.v" | "v" => Some(p.is_set(V).into()),
            "flags.n" | "n" => Some(p.is_set(N).into()),
            "opcode" => Some(self.opcode.into()),
            "mnemonic" => Some(INSTRUCTIONS[usize::from(self.opcode)].mnemonic.into()),
            "effective_address" => Some(self.addr.into()),
            "fetched" => Some(self.fetched.into()),
            "cycles_remaining" => Some(self.cycles_remaining.into()),
            "cycle" => Some(Value::U64(self.total_cycles)),
            "halted" => Some(self.halted.into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        &[
            "pc",
            "a",
            "x",
            "y",
            "s",
            "p",
            "flags.c",
            "flags.z",
            "flags.i",
            "flags.d",
            "flags.b",
            "flags.v",
            "flags.n",
            "opcode",
            "mnemonic",
            "effective_address",
            "fetched",
            "cycles_remaining",
            "cycle",
            "halted",
        ]
    }
}
