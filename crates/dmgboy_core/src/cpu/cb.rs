use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute the instruction following a 0xCB prefix.
    ///
    /// The extended table is fully populated: rotates/shifts/SWAP in rows
    /// 0x00-0x3F, BIT in 0x40-0x7F, RES in 0x80-0xBF and SET in 0xC0-0xFF.
    /// Register forms take 8 cycles; (HL) forms take 16, except BIT which
    /// only reads and takes 12.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let op = self.fetch8(bus);
        let bit = (op >> 3) & 0x07;
        let target = op & 0x07;
        let value = self.read_reg8(bus, target);
        let on_hl = target == 6;

        match op >> 6 {
            0 => {
                let result = self.shift_op(bit, value);
                self.write_reg8(bus, target, result);
            }
            1 => {
                let carry = self.get_flag(Flag::C);
                self.set_flags(value & (1 << bit) == 0, false, true, carry);
                return if on_hl { 12 } else { 8 };
            }
            2 => self.write_reg8(bus, target, value & !(1 << bit)),
            _ => self.write_reg8(bus, target, value | (1 << bit)),
        }

        if on_hl {
            16
        } else {
            8
        }
    }

    /// Rotate/shift row of the CB table selected by `kind`
    /// (RLC, RRC, RL, RR, SLA, SRA, SWAP, SRL). Z from the result,
    /// N and H cleared, C from the bit shifted out (SWAP clears it).
    fn shift_op(&mut self, kind: u8, value: u8) -> u8 {
        let carry_in = self.get_flag(Flag::C);
        let (result, carry) = match kind {
            0 => (value.rotate_left(1), value & 0x80 != 0),
            1 => (value.rotate_right(1), value & 0x01 != 0),
            2 => ((value << 1) | u8::from(carry_in), value & 0x80 != 0),
            3 => ((value >> 1) | (u8::from(carry_in) << 7), value & 0x01 != 0),
            4 => (value << 1, value & 0x80 != 0),
            5 => ((value >> 1) | (value & 0x80), value & 0x01 != 0),
            6 => (value.rotate_left(4), false),
            _ => (value >> 1, value & 0x01 != 0),
        };
        self.set_flags(result == 0, false, false, carry);
        result
    }

    /// RLCA/RRCA/RLA/RRA: same as the CB rotates on A, but Z is always
    /// cleared.
    pub(super) fn rotate_a(&mut self, kind: u8) {
        let result = self.shift_op(kind, self.regs.a);
        self.regs.a = result;
        self.set_flag(Flag::Z, false);
    }
}
