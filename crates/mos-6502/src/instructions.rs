//! Execution handlers.
//!
//! Each handler works on the effective address left by the resolver and
//! returns extra cycles. Only taken branches return non-zero.

use emu_core::Bus;

use crate::addressing::{AddressingMode, crosses_page};
use crate::flags::{C, D, I, N, V, Z};
use crate::{Mos6502, Status};

/// Vector read by BRK.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Operation selected by an opcode.
///
/// One variant per documented mnemonic, plus `Kil` for the opcodes that
/// lock the processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    Kil,
}

impl Operation {
    /// Assembler mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Kil => "KIL",
        }
    }

    /// Read-only operations pay the page-crossing cycle on indexed modes.
    ///
    /// Stores and read-modify-write operations always take the long path,
    /// which is already in their base cycle count.
    #[must_use]
    pub const fn pays_page_penalty(self) -> bool {
        matches!(
            self,
            Self::Adc
                | Self::And
                | Self::Cmp
                | Self::Eor
                | Self::Lda
                | Self::Ldx
                | Self::Ldy
                | Self::Nop
                | Self::Ora
                | Self::Sbc
        )
    }
}

impl Mos6502 {
    /// Run the handler for `op`. Returns extra cycles.
    pub(crate) fn execute<B: Bus>(
        &mut self,
        op: Operation,
        mode: AddressingMode,
        bus: &mut B,
    ) -> u8 {
        match op {
            // Loads, stores, logic and arithmetic
            Operation::Lda => {
                self.regs.a = self.operand(mode, bus);
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Ldx => {
                self.regs.x = self.operand(mode, bus);
                self.regs.p.update_nz(self.regs.x);
            }
            Operation::Ldy => {
                self.regs.y = self.operand(mode, bus);
                self.regs.p.update_nz(self.regs.y);
            }
            Operation::Sta => bus.write(self.addr, self.regs.a),
            Operation::Stx => bus.write(self.addr, self.regs.x),
            Operation::Sty => bus.write(self.addr, self.regs.y),
            Operation::And => {
                self.regs.a &= self.operand(mode, bus);
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Ora => {
                self.regs.a |= self.operand(mode, bus);
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Eor => {
                self.regs.a ^= self.operand(mode, bus);
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Adc => {
                let val = self.operand(mode, bus);
                self.do_adc(val);
            }
            Operation::Sbc => {
                // A - M - !C == A + !M + C
                let val = self.operand(mode, bus);
                self.do_adc(!val);
            }
            Operation::Cmp => {
                let val = self.operand(mode, bus);
                self.compare(self.regs.a, val);
            }
            Operation::Cpx => {
                let val = self.operand(mode, bus);
                self.compare(self.regs.x, val);
            }
            Operation::Cpy => {
                let val = self.operand(mode, bus);
                self.compare(self.regs.y, val);
            }
            Operation::Bit => {
                let val = self.operand(mode, bus);
                self.regs.p.set_if(Z, self.regs.a & val == 0);
                self.regs.p.set_if(N, val & 0x80 != 0);
                self.regs.p.set_if(V, val & 0x40 != 0);
            }

            // Shifts, rotates, increments
            Operation::Asl => self.modify(mode, bus, Self::do_asl),
            Operation::Lsr => self.modify(mode, bus, Self::do_lsr),
            Operation::Rol => self.modify(mode, bus, Self::do_rol),
            Operation::Ror => self.modify(mode, bus, Self::do_ror),
            Operation::Inc => self.modify(mode, bus, Self::do_inc),
            Operation::Dec => self.modify(mode, bus, Self::do_dec),
            Operation::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Operation::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
            }
            Operation::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
            }
            Operation::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
            }

            // Transfers
            Operation::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
            }
            Operation::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
            }
            Operation::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
            }
            Operation::Txs => self.regs.s = self.regs.x,

            // Flags
            Operation::Clc => self.regs.p.clear(C),
            Operation::Sec => self.regs.p.set(C),
            Operation::Cli => self.regs.p.clear(I),
            Operation::Sei => self.regs.p.set(I),
            Operation::Cld => self.regs.p.clear(D),
            Operation::Sed => self.regs.p.set(D),
            Operation::Clv => self.regs.p.clear(V),

            // Branches
            Operation::Bpl => return self.branch(!self.regs.p.is_set(N)),
            Operation::Bmi => return self.branch(self.regs.p.is_set(N)),
            Operation::Bvc => return self.branch(!self.regs.p.is_set(V)),
            Operation::Bvs => return self.branch(self.regs.p.is_set(V)),
            Operation::Bcc => return self.branch(!self.regs.p.is_set(C)),
            Operation::Bcs => return self.branch(self.regs.p.is_set(C)),
            Operation::Bne => return self.branch(!self.regs.p.is_set(Z)),
            Operation::Beq => return self.branch(self.regs.p.is_set(Z)),

            // Jumps and the stack
            Operation::Jmp => self.regs.pc = self.addr,
            Operation::Jsr => {
                let ret = self.regs.pc.wrapping_sub(1);
                self.push_word(bus, ret);
                self.regs.pc = self.addr;
            }
            Operation::Rts => {
                self.regs.pc = self.pull_word(bus).wrapping_add(1);
            }
            Operation::Brk => {
                // Skip the padding byte
                self.regs.pc = self.regs.pc.wrapping_add(1);
                self.push_word(bus, self.regs.pc);
                self.push(bus, self.regs.p.to_byte_brk());
                self.regs.p.set(I);
                self.regs.pc = Self::read_word(bus, IRQ_VECTOR);
            }
            Operation::Rti => {
                let p = self.pull(bus);
                self.regs.p = Status::from_byte(p);
                self.regs.pc = self.pull_word(bus);
            }
            Operation::Pha => self.push(bus, self.regs.a),
            Operation::Php => self.push(bus, self.regs.p.to_byte_brk()),
            Operation::Pla => {
                self.regs.a = self.pull(bus);
                self.regs.p.update_nz(self.regs.a);
            }
            Operation::Plp => {
                let p = self.pull(bus);
                self.regs.p = Status::from_byte(p);
            }

            Operation::Nop => {}
            Operation::Kil => self.halted = true,
        }
        0
    }

    /// Load `fetched` from the effective address, or from A when implicit.
    fn operand<B: Bus>(&mut self, mode: AddressingMode, bus: &mut B) -> u8 {
        self.fetched = if mode == AddressingMode::Implicit {
            self.regs.a
        } else {
            bus.read(self.addr)
        };
        self.fetched
    }

    /// Read-modify-write on A (implicit mode) or on memory.
    fn modify<B: Bus>(&mut self, mode: AddressingMode, bus: &mut B, op: fn(&mut Self, u8) -> u8) {
        let val = self.operand(mode, bus);
        let result = op(self, val);
        if mode == AddressingMode::Implicit {
            self.regs.a = result;
        } else {
            bus.write(self.addr, result);
        }
    }

    fn branch(&mut self, taken: bool) -> u8 {
        if !taken {
            return 0;
        }
        let target = self.regs.pc.wrapping_add(self.addr);
        let crossed = crosses_page(self.regs.pc, target);
        self.regs.pc = target;
        1 + u8::from(crossed)
    }

    fn push<B: Bus>(&mut self, bus: &mut B, value: u8) {
        let addr = self.regs.push();
        bus.write(addr, value);
    }

    fn pull<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let addr = self.regs.pop();
        bus.read(addr)
    }

    /// Push high byte first, so the word sits little-endian in memory.
    fn push_word<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [low, high] = value.to_le_bytes();
        self.push(bus, high);
        self.push(bus, low);
    }

    fn pull_word<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let low = self.pull(bus);
        let high = self.pull(bus);
        u16::from_le_bytes([low, high])
    }

    // ========================================================================
    // ALU operations
    // ========================================================================

    fn do_adc(&mut self, val: u8) {
        let a = self.regs.a;
        let sum = u16::from(a) + u16::from(val) + u16::from(self.regs.p.is_set(C));
        let result = sum as u8;

        self.regs.p.set_if(C, sum > 0xFF);
        // Operands share a sign and the result's sign differs from it.
        self.regs.p.set_if(V, (a ^ result) & (val ^ result) & 0x80 != 0);
        self.regs.a = result;
        self.regs.p.update_nz(result);
    }

    fn compare(&mut self, reg: u8, val: u8) {
        self.regs.p.set_if(C, reg >= val);
        self.regs.p.update_nz(reg.wrapping_sub(val));
    }

    fn do_asl(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = val << 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_lsr(&mut self, val: u8) -> u8 {
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = val >> 1;
        self.regs.p.update_nz(result);
        result
    }

    fn do_rol(&mut self, val: u8) -> u8 {
        let carry = u8::from(self.regs.p.is_set(C));
        self.regs.p.set_if(C, val & 0x80 != 0);
        let result = (val << 1) | carry;
        self.regs.p.update_nz(result);
        result
    }

    fn do_ror(&mut self, val: u8) -> u8 {
        let carry = if self.regs.p.is_set(C) { 0x80 } else { 0 };
        self.regs.p.set_if(C, val & 0x01 != 0);
        let result = (val >> 1) | carry;
        self.regs.p.update_nz(result);
        result
    }

    fn do_inc(&mut self, val: u8) -> u8 {
        let result = val.wrapping_add(1);
        self.regs.p.update_nz(result);
        result
    }

    fn do_dec(&mut self, val: u8) -> u8 {
        let result = val.wrapping_sub(1);
        self.regs.p.update_nz(result);
        result
    }
}
