//! 6502 addressing modes.
//!
//! Each resolver consumes its operand bytes at PC, leaves the effective
//! address in `self.addr` and returns 1 if an indexed computation crossed
//! a page boundary, 0 otherwise. Whether that cycle is charged is decided
//! by the instruction table, not here.
//!
//! - Implicit: No operand, or the accumulator (e.g., CLC, ASL A)
//! - Immediate: #$nn (the operand byte itself)
//! - Zero Page: $nn (8-bit address in page zero)
//! - Zero Page,X / Zero Page,Y: $nn,X (wraps in page zero)
//! - Relative: signed branch offset, sign-extended to 16 bits
//! - Absolute: $nnnn
//! - Absolute,X / Absolute,Y: $nnnn,X (may cross page)
//! - Indirect: ($nnnn) (JMP only, with the NMOS page wrap)
//! - Indexed Indirect: ($nn,X)
//! - Indirect Indexed: ($nn),Y (may cross page)

use emu_core::Bus;

use crate::Mos6502;

/// 6502 addressing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Implicit,
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Relative,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndexedIndirect,
    IndirectIndexed,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u8 {
        match self {
            Self::Implicit => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::Relative
            | Self::IndexedIndirect
            | Self::IndirectIndexed => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }

    /// Modes whose address computation can cross a page.
    #[must_use]
    pub const fn is_page_indexed(self) -> bool {
        matches!(
            self,
            Self::AbsoluteX | Self::AbsoluteY | Self::IndirectIndexed
        )
    }
}

/// True when `a` and `b` lie in different 256-byte pages.
#[must_use]
pub(crate) const fn crosses_page(a: u16, b: u16) -> bool {
    (a ^ b) & 0xFF00 != 0
}

impl Mos6502 {
    /// Fetch the next byte at PC and increment PC.
    pub(crate) fn fetch<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read(self.regs.pc);
        self.regs.pc = self.regs.pc.wrapping_add(1);
        value
    }

    /// Fetch a 16-bit word (little-endian) at PC.
    pub(crate) fn fetch_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let low = self.fetch(bus);
        let high = self.fetch(bus);
        u16::from_le_bytes([low, high])
    }

    /// Read a 16-bit word (little-endian) from `addr` and `addr + 1`.
    pub(crate) fn read_word<B: Bus>(bus: &mut B, addr: u16) -> u16 {
        let low = bus.read(addr);
        let high = bus.read(addr.wrapping_add(1));
        u16::from_le_bytes([low, high])
    }

    /// Read a zero-page pointer; the high byte wraps within page zero.
    fn read_zp_word<B: Bus>(bus: &mut B, ptr: u8) -> u16 {
        let low = bus.read(u16::from(ptr));
        let high = bus.read(u16::from(ptr.wrapping_add(1)));
        u16::from_le_bytes([low, high])
    }

    /// Resolve the effective address for `mode`.
    ///
    /// Returns the page-crossing extra cycle (0 or 1).
    pub(crate) fn resolve<B: Bus>(&mut self, mode: AddressingMode, bus: &mut B) -> u8 {
        match mode {
            AddressingMode::Implicit => 0,
            AddressingMode::Immediate => {
                self.addr = self.regs.pc;
                self.regs.pc = self.regs.pc.wrapping_add(1);
                0
            }
            AddressingMode::ZeroPage => {
                self.addr = u16::from(self.fetch(bus));
                0
            }
            AddressingMode::ZeroPageX => {
                self.addr = u16::from(self.fetch(bus).wrapping_add(self.regs.x));
                0
            }
            AddressingMode::ZeroPageY => {
                self.addr = u16::from(self.fetch(bus).wrapping_add(self.regs.y));
                0
            }
            AddressingMode::Relative => {
                // Sign-extend: bit 7 set gives a high byte of $FF.
                self.addr = self.fetch(bus) as i8 as u16;
                0
            }
            AddressingMode::Absolute => {
                self.addr = self.fetch_word(bus);
                0
            }
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word(bus);
                self.index(base, self.regs.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word(bus);
                self.index(base, self.regs.y)
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_word(bus);
                let low = bus.read(ptr);
                // NMOS bug: the high byte never carries into the next page.
                let high = bus.read((ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF));
                self.addr = u16::from_le_bytes([low, high]);
                0
            }
            AddressingMode::IndexedIndirect => {
                let ptr = self.fetch(bus).wrapping_add(self.regs.x);
                self.addr = Self::read_zp_word(bus, ptr);
                0
            }
            AddressingMode::IndirectIndexed => {
                let ptr = self.fetch(bus);
                let base = Self::read_zp_word(bus, ptr);
                self.index(base, self.regs.y)
            }
        }
    }

    fn index(&mut self, base: u16, by: u8) -> u8 {
        self.addr = base.wrapping_add(u16::from(by));
        u8::from(crosses_page(base, self.addr))
    }
}
