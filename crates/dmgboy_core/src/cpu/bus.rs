use crate::machine::InterruptController;

/// Abstraction over the DMG bus (memory, I/O and interrupt state) as seen
/// by the CPU.
///
/// The machine's [`crate::MemoryBus`] is the production implementation;
/// CPU tests use a flat 64 KiB array instead.
pub trait Bus {
    fn read8(&mut self, addr: u16) -> u8;
    fn write8(&mut self, addr: u16, value: u8);

    /// Little-endian 16-bit read composed from two 8-bit reads.
    fn read16(&mut self, addr: u16) -> u16 {
        let lo = self.read8(addr);
        let hi = self.read8(addr.wrapping_add(1));
        u16::from_le_bytes([lo, hi])
    }

    /// Little-endian 16-bit write composed from two 8-bit writes.
    fn write16(&mut self, addr: u16, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.write8(addr, lo);
        self.write8(addr.wrapping_add(1), hi);
    }

    /// Interrupt request/enable state and the master-enable latch.
    fn interrupts(&mut self) -> &mut InterruptController;
}
