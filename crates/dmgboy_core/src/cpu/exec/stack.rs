use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// PUSH/POP use AF in the slot where the other 16-bit groups use SP.
    fn stack_pair(&self, opcode: u8) -> u16 {
        match (opcode >> 4) & 0x03 {
            3 => self.regs.af(),
            index => self.regs.pair(index),
        }
    }

    fn set_stack_pair(&mut self, opcode: u8, value: u16) {
        match (opcode >> 4) & 0x03 {
            3 => self.regs.set_af(value),
            index => self.regs.set_pair(index, value),
        }
    }

    pub(super) fn exec_push<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.stack_pair(opcode);
        self.push_u16(bus, value);
        16
    }

    pub(super) fn exec_pop<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.pop_u16(bus);
        self.set_stack_pair(opcode, value);
        12
    }
}
