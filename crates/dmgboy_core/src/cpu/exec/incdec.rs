use crate::cpu::{Bus, Cpu};

impl Cpu {
    pub(super) fn exec_inc8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let reg = (opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, reg);
        let result = self.alu_inc8(value);
        self.write_reg8(bus, reg, result);
        if reg == 6 {
            12
        } else {
            4
        }
    }

    pub(super) fn exec_dec8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let reg = (opcode >> 3) & 0x07;
        let value = self.read_reg8(bus, reg);
        let result = self.alu_dec8(value);
        self.write_reg8(bus, reg, result);
        if reg == 6 {
            12
        } else {
            4
        }
    }

    /// INC rr leaves the flags alone.
    pub(super) fn exec_inc16(&mut self, opcode: u8) -> u32 {
        let index = opcode >> 4;
        let value = self.regs.pair(index).wrapping_add(1);
        self.regs.set_pair(index, value);
        8
    }

    pub(super) fn exec_dec16(&mut self, opcode: u8) -> u32 {
        let index = opcode >> 4;
        let value = self.regs.pair(index).wrapping_sub(1);
        self.regs.set_pair(index, value);
        8
    }
}
