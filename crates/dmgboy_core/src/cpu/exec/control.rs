use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_jp_hl(&mut self) -> u32 {
        self.regs.pc = self.regs.hl();
        4
    }

    pub(super) fn exec_ret<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        16
    }

    /// RETI enables IME immediately, unlike EI.
    pub(super) fn exec_reti<B: Bus>(&mut self, bus: &mut B) -> u32 {
        self.regs.pc = self.pop_u16(bus);
        bus.interrupts().set_master_enable(true);
        16
    }

    /// RST n: call the fixed vector encoded in bits 3-5.
    pub(super) fn exec_rst<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = (opcode & 0x38) as u16;
        16
    }
}
