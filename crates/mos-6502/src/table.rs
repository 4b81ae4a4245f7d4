//! Opcode table.
//!
//! 256 immutable entries indexed by opcode byte, laid out as the 16x16
//! NMOS opcode matrix. Undocumented opcodes keep their usual mnemonic for
//! diagnostics but run as NOP with their real addressing mode and base
//! cycles, so operand bytes are skipped and timing stays right. The
//! twelve JAM opcodes halt the processor.

use crate::{AddressingMode, Operation};

/// One opcode's decode information.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// Mnemonic for diagnostics.
    pub mnemonic: &'static str,
    /// Addressing-mode resolver to run.
    pub mode: AddressingMode,
    /// Execution handler to run.
    pub operation: Operation,
    /// Base cycle count, before page-crossing and branch cycles.
    pub cycles: u8,
    /// Whether a page crossing during address resolution costs a cycle.
    pub page_penalty: bool,
    /// False for opcodes outside the documented NMOS set.
    pub documented: bool,
}

impl Instruction {
    const fn new(operation: Operation, mode: AddressingMode, cycles: u8) -> Self {
        Self {
            mnemonic: operation.mnemonic(),
            mode,
            operation,
            cycles,
            page_penalty: operation.pays_page_penalty() && mode.is_page_indexed(),
            documented: true,
        }
    }

    const fn undocumented(mut self) -> Self {
        self.documented = false;
        self
    }

    const fn with_page_penalty(mut self) -> Self {
        self.page_penalty = true;
        self
    }

    /// Instruction size in bytes, opcode included.
    #[must_use]
    pub const fn size(&self) -> u8 {
        1 + self.mode.operand_len()
    }
}

use AddressingMode::{
    Absolute as ABS, AbsoluteX as ABX, AbsoluteY as ABY, Immediate as IMM, Implicit as IMP,
    IndexedIndirect as IZX, Indirect as IND, IndirectIndexed as IZY, Relative as REL,
    ZeroPage as ZP, ZeroPageX as ZPX, ZeroPageY as ZPY,
};
use Operation::{
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs, Clc, Cld, Cli, Clv, Cmp, Cpx,
    Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny, Jmp, Jsr, Kil, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php,
    Pla, Plp, Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
};

const fn op(operation: Operation, mode: AddressingMode, cycles: u8) -> Instruction {
    Instruction::new(operation, mode, cycles)
}

/// Undocumented NOP variant: a real no-op that still consumes its operand.
const fn nop(mode: AddressingMode, cycles: u8) -> Instruction {
    Instruction::new(Nop, mode, cycles).undocumented()
}

/// Undocumented opcode whose effects are not modelled; runs as NOP.
const fn alias(mnemonic: &'static str, mode: AddressingMode, cycles: u8) -> Instruction {
    Instruction {
        mnemonic,
        mode,
        operation: Nop,
        cycles,
        page_penalty: false,
        documented: false,
    }
}

const fn kil() -> Instruction {
    Instruction::new(Kil, IMP, 2).undocumented()
}

/// Decode table, indexed by opcode.
pub static INSTRUCTIONS: [Instruction; 256] = [
    // $00
    op(Brk, IMP, 7), op(Ora, IZX, 6), kil(), alias("SLO", IZX, 8),
    nop(ZP, 3), op(Ora, ZP, 3), op(Asl, ZP, 5), alias("SLO", ZP, 5),
    op(Php, IMP, 3), op(Ora, IMM, 2), op(Asl, IMP, 2), alias("ANC", IMM, 2),
    nop(ABS, 4), op(Ora, ABS, 4), op(Asl, ABS, 6), alias("SLO", ABS, 6),
    // $10
    op(Bpl, REL, 2), op(Ora, IZY, 5), kil(), alias("SLO", IZY, 8),
    nop(ZPX, 4), op(Ora, ZPX, 4), op(Asl, ZPX, 6), alias("SLO", ZPX, 6),
    op(Clc, IMP, 2), op(Ora, ABY, 4), nop(IMP, 2), alias("SLO", ABY, 7),
    nop(ABX, 4), op(Ora, ABX, 4), op(Asl, ABX, 7), alias("SLO", ABX, 7),
    // $20
    op(Jsr, ABS, 6), op(And, IZX, 6), kil(), alias("RLA", IZX, 8),
    op(Bit, ZP, 3), op(And, ZP, 3), op(Rol, ZP, 5), alias("RLA", ZP, 5),
    op(Plp, IMP, 4), op(And, IMM, 2), op(Rol, IMP, 2), alias("ANC", IMM, 2),
    op(Bit, ABS, 4), op(And, ABS, 4), op(Rol, ABS, 6), alias("RLA", ABS, 6),
    // $30
    op(Bmi, REL, 2), op(And, IZY, 5), kil(), alias("RLA", IZY, 8),
    nop(ZPX, 4), op(And, ZPX, 4), op(Rol, ZPX, 6), alias("RLA", ZPX, 6),
    op(Sec, IMP, 2), op(And, ABY, 4), nop(IMP, 2), alias("RLA", ABY, 7),
    nop(ABX, 4), op(And, ABX, 4), op(Rol, ABX, 7), alias("RLA", ABX, 7),
    // $40
    op(Rti, IMP, 6), op(Eor, IZX, 6), kil(), alias("SRE", IZX, 8),
    nop(ZP, 3), op(Eor, ZP, 3), op(Lsr, ZP, 5), alias("SRE", ZP, 5),
    op(Pha, IMP, 3), op(Eor, IMM, 2), op(Lsr, IMP, 2), alias("ALR", IMM, 2),
    op(Jmp, ABS, 3), op(Eor, ABS, 4), op(Lsr, ABS, 6), alias("SRE", ABS, 6),
    // $50
    op(Bvc, REL, 2), op(Eor, IZY, 5), kil(), alias("SRE", IZY, 8),
    nop(ZPX, 4), op(Eor, ZPX, 4), op(Lsr, ZPX, 6), alias("SRE", ZPX, 6),
    op(Cli, IMP, 2), op(Eor, ABY, 4), nop(IMP, 2), alias("SRE", ABY, 7),
    nop(ABX, 4), op(Eor, ABX, 4), op(Lsr, ABX, 7), alias("SRE", ABX, 7),
    // $60
    op(Rts, IMP, 6), op(Adc, IZX, 6), kil(), alias("RRA", IZX, 8),
    nop(ZP, 3), op(Adc, ZP, 3), op(Ror, ZP, 5), alias("RRA", ZP, 5),
    op(Pla, IMP, 4), op(Adc, IMM, 2), op(Ror, IMP, 2), alias("ARR", IMM, 2),
    op(Jmp, IND, 5), op(Adc, ABS, 4), op(Ror, ABS, 6), alias("RRA", ABS, 6),
    // $70
    op(Bvs, REL, 2), op(Adc, IZY, 5), kil(), alias("RRA", IZY, 8),
    nop(ZPX, 4), op(Adc, ZPX, 4), op(Ror, ZPX, 6), alias("RRA", ZPX, 6),
    op(Sei, IMP, 2), op(Adc, ABY, 4), nop(IMP, 2), alias("RRA", ABY, 7),
    nop(ABX, 4), op(Adc, ABX, 4), op(Ror, ABX, 7), alias("RRA", ABX, 7),
    // $80
    nop(IMM, 2), op(Sta, IZX, 6), nop(IMM, 2), alias("SAX", IZX, 6),
    op(Sty, ZP, 3), op(Sta, ZP, 3), op(Stx, ZP, 3), alias("SAX", ZP, 3),
    op(Dey, IMP, 2), nop(IMM, 2), op(Txa, IMP, 2), alias("XAA", IMM, 2),
    op(Sty, ABS, 4), op(Sta, ABS, 4), op(Stx, ABS, 4), alias("SAX", ABS, 4),
    // $90
    op(Bcc, REL, 2), op(Sta, IZY, 6), kil(), alias("AHX", IZY, 6),
    op(Sty, ZPX, 4), op(Sta, ZPX, 4), op(Stx, ZPY, 4), alias("SAX", ZPY, 4),
    op(Tya, IMP, 2), op(Sta, ABY, 5), op(Txs, IMP, 2), alias("TAS", ABY, 5),
    alias("SHY", ABX, 5), op(Sta, ABX, 5), alias("SHX", ABY, 5), alias("AHX", ABY, 5),
    // $A0
    op(Ldy, IMM, 2), op(Lda, IZX, 6), op(Ldx, IMM, 2), alias("LAX", IZX, 6),
    op(Ldy, ZP, 3), op(Lda, ZP, 3), op(Ldx, ZP, 3), alias("LAX", ZP, 3),
    op(Tay, IMP, 2), op(Lda, IMM, 2), op(Tax, IMP, 2), alias("LAX", IMM, 2),
    op(Ldy, ABS, 4), op(Lda, ABS, 4), op(Ldx, ABS, 4), alias("LAX", ABS, 4),
    // $B0
    op(Bcs, REL, 2), op(Lda, IZY, 5), kil(), alias("LAX", IZY, 5).with_page_penalty(),
    op(Ldy, ZPX, 4), op(Lda, ZPX, 4), op(Ldx, ZPY, 4), alias("LAX", ZPY, 4),
    op(Clv, IMP, 2), op(Lda, ABY, 4), op(Tsx, IMP, 2), alias("LAS", ABY, 4).with_page_penalty(),
    op(Ldy, ABX, 4), op(Lda, ABX, 4), op(Ldx, ABY, 4), alias("LAX", ABY, 4).with_page_penalty(),
    // $C0
    op(Cpy, IMM, 2), op(Cmp, IZX, 6), nop(IMM, 2), alias("DCP", IZX, 8),
    op(Cpy, ZP, 3), op(Cmp, ZP, 3), op(Dec, ZP, 5), alias("DCP", ZP, 5),
    op(Iny, IMP, 2), op(Cmp, IMM, 2), op(Dex, IMP, 2), alias("AXS", IMM, 2),
    op(Cpy, ABS, 4), op(Cmp, ABS, 4), op(Dec, ABS, 6), alias("DCP", ABS, 6),
    // $D0
    op(Bne, REL, 2), op(Cmp, IZY, 5), kil(), alias("DCP", IZY, 8),
    nop(ZPX, 4), op(Cmp, ZPX, 4), op(Dec, ZPX, 6), alias("DCP", ZPX, 6),
    op(Cld, IMP, 2), op(Cmp, ABY, 4), nop(IMP, 2), alias("DCP", ABY, 7),
    nop(ABX, 4), op(Cmp, ABX, 4), op(Dec, ABX, 7), alias("DCP", ABX, 7),
    // $E0
    op(Cpx, IMM, 2), op(Sbc, IZX, 6), nop(IMM, 2), alias("ISC", IZX, 8),
    op(Cpx, ZP, 3), op(Sbc, ZP, 3), op(Inc, ZP, 5), alias("ISC", ZP, 5),
    op(Inx, IMP, 2), op(Sbc, IMM, 2), op(Nop, IMP, 2), op(Sbc, IMM, 2).undocumented(),
    op(Cpx, ABS, 4), op(Sbc, ABS, 4), op(Inc, ABS, 6), alias("ISC", ABS, 6),
    // $F0
    op(Beq, REL, 2), op(Sbc, IZY, 5), kil(), alias("ISC", IZY, 8),
    nop(ZPX, 4), op(Sbc, ZPX, 4), op(Inc, ZPX, 6), alias("ISC", ZPX, 6),
    op(Sed, IMP, 2), op(Sbc, ABY, 4), nop(IMP, 2), alias("ISC", ABY, 7),
    nop(ABX, 4), op(Sbc, ABX, 4), op(Inc, ABX, 7), alias("ISC", ABX, 7),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_count() {
        let documented = INSTRUCTIONS.iter().filter(|i| i.documented).count();
        assert_eq!(documented, 151);
    }

    #[test]
    fn twelve_jam_opcodes() {
        let jams: Vec<usize> = (0..256)
            .filter(|&op| INSTRUCTIONS[op].operation == Operation::Kil)
            .collect();
        assert_eq!(
            jams,
            vec![0x02, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2]
        );
    }

    #[test]
    fn spot_check_entries() {
        let lda = INSTRUCTIONS[0xA9];
        assert_eq!(lda.mnemonic, "LDA");
        assert_eq!(lda.mode, AddressingMode::Immediate);
        assert_eq!(lda.cycles, 2);
        assert_eq!(lda.size(), 2);

        let jmp = INSTRUCTIONS[0x6C];
        assert_eq!(jmp.operation, Operation::Jmp);
        assert_eq!(jmp.mode, AddressingMode::Indirect);
        assert_eq!(jmp.size(), 3);

        assert_eq!(INSTRUCTIONS[0x00].cycles, 7);
        assert_eq!(INSTRUCTIONS[0x20].cycles, 6);
        assert_eq!(INSTRUCTIONS[0xEA].size(), 1);
    }

    #[test]
    fn page_penalty_only_on_reads() {
        // LDA abs,X pays, STA abs,X and INC abs,X do not.
        assert!(INSTRUCTIONS[0xBD].page_penalty);
        assert!(INSTRUCTIONS[0xB1].page_penalty);
        assert!(!INSTRUCTIONS[0x9D].page_penalty);
        assert!(!INSTRUCTIONS[0x91].page_penalty);
        assert!(!INSTRUCTIONS[0xFE].page_penalty);
        // Non-indexed modes never pay.
        assert!(!INSTRUCTIONS[0xAD].page_penalty);
    }

    #[test]
    fn undocumented_opcodes_keep_names_but_run_as_nop() {
        let slo = INSTRUCTIONS[0x03];
        assert_eq!(slo.mnemonic, "SLO");
        assert_eq!(slo.operation, Operation::Nop);
        assert!(!slo.documented);
        assert_eq!(slo.size(), 2);

        let usbc = INSTRUCTIONS[0xEB];
        assert_eq!(usbc.operation, Operation::Sbc);
        assert!(!usbc.documented);
    }

    #[test]
    fn mnemonic_matches_operation_for_documented() {
        for (opcode, instr) in INSTRUCTIONS.iter().enumerate() {
            if instr.documented {
                assert_eq!(
                    instr.mnemonic,
                    instr.operation.mnemonic(),
                    "opcode ${opcode:02X}"
                );
            }
        }
    }
}
