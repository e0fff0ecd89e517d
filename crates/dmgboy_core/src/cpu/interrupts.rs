use super::{Bus, Cpu};

/// Fixed cost of entering an interrupt handler.
pub(super) const DISPATCH_CYCLES: u32 = 20;

impl Cpu {
    /// Service the highest-priority pending interrupt, if IME allows one.
    ///
    /// Returns the dispatch cost when a handler was entered. IME is cleared
    /// and PC is pushed before jumping to the vector.
    pub(super) fn service_interrupt<B: Bus>(&mut self, bus: &mut B) -> Option<u32> {
        let vector = bus.interrupts().acknowledge()?;
        bus.interrupts().set_master_enable(false);
        // IME was already on, so a leftover EI has nothing to enable.
        self.ime_enable_pending = false;
        self.halted = false;

        let pc = self.regs.pc;
        self.push_u16(bus, pc);
        self.regs.pc = vector;

        log::debug!(
            "GB CPU interrupt: vector=0x{:04X} pc=0x{:04X} sp=0x{:04X}",
            vector,
            pc,
            self.regs.sp
        );
        Some(DISPATCH_CYCLES)
    }
}
