use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// HALT. With IME off and an interrupt already pending the CPU does not
    /// halt; instead the next opcode byte is fetched twice. An `EI` right
    /// before counts as IME on, so the pending interrupt is serviced and
    /// returns past the HALT.
    pub(super) fn exec_halt<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let ime = self.ime_enable_pending || bus.interrupts().master_enabled();
        if !ime && bus.interrupts().pending() != 0 {
            self.halt_bug = true;
        } else {
            self.halted = true;
        }
        4
    }

    /// STOP is encoded as 0x10 0x00; the padding byte is consumed.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let _ = self.fetch8(bus);
        self.stopped = true;
        log::debug!("GB CPU: STOP at PC={:04X}", self.regs.pc.wrapping_sub(2));
        4
    }

    /// EI takes effect after the next instruction completes.
    pub(super) fn exec_ei(&mut self) -> u32 {
        self.ime_enable_pending = true;
        4
    }

    /// DI takes effect immediately and cancels a pending EI.
    pub(super) fn exec_di<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.ime_enable_pending = false;
        bus.interrupts().set_master_enable(false);
        4
    }
}
