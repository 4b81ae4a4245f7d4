//! Debugger snapshots serialize for save states and trace dumps.

use emu_core::{Cpu, SimpleBus};
use mos_6502::{Mos6502, Snapshot};

#[test]
fn snapshot_serializes_to_json() {
    let mut bus = SimpleBus::new();
    bus.load(0xFFFC, &[0x00, 0x02]);
    bus.load(0x0200, &[0xA9, 0xF1]);
    let mut cpu = Mos6502::new(&mut bus);
    cpu.tick(&mut bus);

    let snapshot = cpu.snapshot();
    let json = serde_json::to_value(snapshot).expect("serialize");

    assert_eq!(json["registers"]["a"], 0xF1);
    assert_eq!(json["registers"]["pc"], 0x0202);
    assert_eq!(json["opcode"], 0xA9);
    assert_eq!(json["cycles_remaining"], 1);
    assert_eq!(json["halted"], false);

    let back: Snapshot = serde_json::from_value(json).expect("deserialize");
    assert_eq!(back, snapshot);
}
