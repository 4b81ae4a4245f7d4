//! Property-based tests for CPU invariants.

use emu_core::{Bus, Cpu, SimpleBus};
use mos_6502::{INSTRUCTIONS, Mos6502, Operation, Status, flags};
use proptest::prelude::*;

fn setup_program(program: &[u8]) -> (Mos6502, SimpleBus) {
    let mut bus = SimpleBus::new();
    bus.load(0xFFFC, &[0x00, 0x02]);
    bus.load(0x0200, program);
    let cpu = Mos6502::new(&mut bus);
    (cpu, bus)
}

fn run_instruction(cpu: &mut Mos6502, bus: &mut SimpleBus) -> u32 {
    cpu.tick(bus);
    let mut ticks = 1;
    while !cpu.is_instruction_complete() {
        cpu.tick(bus);
        ticks += 1;
    }
    ticks
}

/// Run ADC #operand with the given accumulator and carry.
fn adc(a: u8, operand: u8, carry: bool) -> (u8, Status) {
    let (mut cpu, mut bus) = setup_program(&[0x69, operand]);
    let mut regs = cpu.registers();
    regs.a = a;
    regs.p = if carry { Status::from_byte(flags::C) } else { Status::new() };
    cpu.set_registers(regs);
    run_instruction(&mut cpu, &mut bus);
    (cpu.registers().a, cpu.registers().p)
}

proptest! {
    #[test]
    fn zero_page_x_wraps(base in any::<u8>(), x in any::<u8>(), value in any::<u8>()) {
        let (mut cpu, mut bus) = setup_program(&[0xB5, base]);
        let target = u16::from(base.wrapping_add(x));
        bus.write(target, value);
        let mut regs = cpu.registers();
        regs.x = x;
        cpu.set_registers(regs);

        run_instruction(&mut cpu, &mut bus);

        prop_assert_eq!(cpu.snapshot().effective_address, target);
        prop_assert_eq!(cpu.registers().a, value);
    }

    #[test]
    fn absolute_x_penalty_iff_page_changes(base in 0x1000u16..0xF000, x in any::<u8>()) {
        let [lo, hi] = base.to_le_bytes();
        let (mut cpu, mut bus) = setup_program(&[0xBD, lo, hi]);
        let mut regs = cpu.registers();
        regs.x = x;
        cpu.set_registers(regs);

        let ticks = run_instruction(&mut cpu, &mut bus);

        let effective = base.wrapping_add(u16::from(x));
        let crossed = (base & 0xFF00) != (effective & 0xFF00);
        prop_assert_eq!(ticks, 4 + u32::from(crossed));
        prop_assert_eq!(cpu.snapshot().effective_address, effective);
    }

    #[test]
    fn adc_matches_binary_model(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let (result, p) = adc(a, m, carry);

        let sum = u16::from(a) + u16::from(m) + u16::from(carry);
        let expected = (sum & 0xFF) as u8;
        prop_assert_eq!(result, expected);
        prop_assert_eq!(p.is_set(flags::C), sum > 0xFF);
        prop_assert_eq!(p.is_set(flags::Z), expected == 0);
        prop_assert_eq!(p.is_set(flags::N), expected & 0x80 != 0);
        prop_assert_eq!(p.is_set(flags::V), (!(a ^ m) & (a ^ expected) & 0x80) != 0);
    }

    #[test]
    fn sbc_is_adc_of_complement(a in any::<u8>(), m in any::<u8>(), carry in any::<bool>()) {
        let (mut cpu, mut bus) = setup_program(&[0xE9, m]);
        let mut regs = cpu.registers();
        regs.a = a;
        regs.p = if carry { Status::from_byte(flags::C) } else { Status::new() };
        cpu.set_registers(regs);
        run_instruction(&mut cpu, &mut bus);

        let (result, p) = adc(a, !m, carry);
        prop_assert_eq!(cpu.registers().a, result);
        prop_assert_eq!(cpu.registers().p, p);
    }

    #[test]
    fn pha_pla_round_trip(a in any::<u8>(), s in any::<u8>()) {
        // PHA; LDA #$00; PLA
        let (mut cpu, mut bus) = setup_program(&[0x48, 0xA9, 0x00, 0x68]);
        let mut regs = cpu.registers();
        regs.a = a;
        regs.s = s;
        cpu.set_registers(regs);

        for _ in 0..3 {
            run_instruction(&mut cpu, &mut bus);
        }

        prop_assert_eq!(cpu.registers().a, a);
        prop_assert_eq!(cpu.registers().s, s);
        prop_assert_eq!(cpu.registers().p.is_set(flags::Z), a == 0);
    }

    #[test]
    fn plp_always_keeps_unused_bit(pushed in any::<u8>()) {
        // LDA #pushed; PHA; PLP
        let (mut cpu, mut bus) = setup_program(&[0xA9, pushed, 0x48, 0x28]);

        for _ in 0..3 {
            run_instruction(&mut cpu, &mut bus);
        }

        prop_assert_eq!(cpu.registers().p.bits(), pushed | flags::U);
    }

    #[test]
    fn halted_cpu_is_inert(kil in prop::sample::select(vec![
        0x02u8, 0x12, 0x22, 0x32, 0x42, 0x52, 0x62, 0x72, 0x92, 0xB2, 0xD2, 0xF2,
    ]), ticks in 1usize..200) {
        let (mut cpu, mut bus) = setup_program(&[kil]);
        cpu.tick(&mut bus);
        prop_assert!(cpu.is_halted());
        let frozen = cpu.snapshot();

        for _ in 0..ticks {
            cpu.tick(&mut bus);
        }

        prop_assert_eq!(cpu.snapshot(), frozen);
        prop_assert_eq!(cpu.pc(), 0x0201);
    }

    #[test]
    fn pc_advances_by_instruction_size(opcode in any::<u8>(), b1 in any::<u8>(), b2 in any::<u8>()) {
        let entry = &INSTRUCTIONS[usize::from(opcode)];
        // Control flow opcodes set PC themselves
        prop_assume!(!matches!(
            entry.mnemonic,
            "BCC" | "BCS" | "BEQ" | "BMI" | "BNE" | "BPL" | "BVC" | "BVS" | "JMP" | "JSR"
                | "RTS" | "RTI" | "BRK"
        ));
        prop_assume!(entry.operation != Operation::Kil);

        let (mut cpu, mut bus) = setup_program(&[opcode, b1, b2]);
        let ticks = run_instruction(&mut cpu, &mut bus);

        prop_assert_eq!(cpu.pc(), 0x0200 + u16::from(entry.size()));
        prop_assert!(ticks >= u32::from(entry.cycles));
        prop_assert!(ticks <= u32::from(entry.cycles) + 1);
    }
}
