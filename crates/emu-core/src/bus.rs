//! Memory bus interface and a flat 64K RAM implementation.

/// Memory bus interface.
///
/// The CPU reaches memory only through this trait. Every 16-bit address
/// resolves to a byte, so neither operation can fail.
pub trait Bus {
    /// Read a byte from the given address.
    fn read(&mut self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

/// Size of the 6502 address space in bytes.
pub const ADDRESS_SPACE: usize = 0x1_0000;

/// Flat 64K of RAM with no mapped devices.
///
/// Allocated once at construction and never resized. The address type's
/// domain equals the storage domain, so there is no out-of-range path.
pub struct SimpleBus {
    ram: Box<[u8; ADDRESS_SPACE]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    /// Create a bus with all 65536 cells cleared.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: Box::new([0; ADDRESS_SPACE]),
        }
    }

    /// Copy `bytes` into memory starting at `start`, wrapping past $FFFF.
    pub fn load(&mut self, start: u16, bytes: &[u8]) {
        let mut addr = start;
        for &byte in bytes {
            self.ram[usize::from(addr)] = byte;
            addr = addr.wrapping_add(1);
        }
    }

    /// Read without going through the `Bus` trait.
    #[must_use]
    pub fn peek(&self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[usize::from(address)] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_zeroed() {
        let bus = SimpleBus::new();
        assert_eq!(bus.peek(0x0000), 0);
        assert_eq!(bus.peek(0x8000), 0);
        assert_eq!(bus.peek(0xFFFF), 0);
    }

    #[test]
    fn write_then_read() {
        let mut bus = SimpleBus::new();
        bus.write(0x1234, 0x42);
        assert_eq!(bus.read(0x1234), 0x42);
        assert_eq!(bus.peek(0x1234), 0x42);
        assert_eq!(bus.read(0x1235), 0x00);
    }

    #[test]
    fn extreme_addresses() {
        let mut bus = SimpleBus::new();
        bus.write(0x0000, 0x11);
        bus.write(0xFFFF, 0x22);
        assert_eq!(bus.read(0x0000), 0x11);
        assert_eq!(bus.read(0xFFFF), 0x22);
    }

    #[test]
    fn load_wraps_past_top_of_memory() {
        let mut bus = SimpleBus::new();
        bus.load(0xFFFE, &[0xAA, 0xBB, 0xCC]);
        assert_eq!(bus.peek(0xFFFE), 0xAA);
        assert_eq!(bus.peek(0xFFFF), 0xBB);
        assert_eq!(bus.peek(0x0000), 0xCC);
    }
}
