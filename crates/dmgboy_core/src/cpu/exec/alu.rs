use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// 0x80-0xBF: ADD/ADC/SUB/SBC/AND/XOR/OR/CP A,r.
    pub(super) fn exec_alu_r<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.alu_op(opcode >> 3, value);
        if src == 6 {
            8
        } else {
            4
        }
    }

    pub(super) fn exec_alu_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> u32 {
        let value = self.fetch8(bus);
        self.alu_op(opcode >> 3, value);
        8
    }

    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) -> u32 {
        let value = self.regs.pair(opcode >> 4);
        self.alu_add16_hl(value);
        8
    }

    pub(super) fn exec_add_sp_e8<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let offset = self.fetch8(bus);
        self.regs.sp = self.alu_add_sp_offset(offset);
        16
    }

    pub(super) fn exec_rotate_a(&mut self, opcode: u8) -> u32 {
        self.rotate_a(opcode >> 3);
        4
    }

    pub(super) fn exec_daa(&mut self) -> u32 {
        self.alu_daa();
        4
    }

    pub(super) fn exec_cpl(&mut self) -> u32 {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
        4
    }

    pub(super) fn exec_scf(&mut self) -> u32 {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
        4
    }

    pub(super) fn exec_ccf(&mut self) -> u32 {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
        4
    }
}
