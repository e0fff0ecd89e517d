use super::{Cpu, Flag};

impl Cpu {
    /// Overwrite all four flags at once.
    #[inline]
    pub(super) fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
        self.regs.f = (u8::from(z) << Flag::Z as u8)
            | (u8::from(n) << Flag::N as u8)
            | (u8::from(h) << Flag::H as u8)
            | (u8::from(c) << Flag::C as u8);
    }

    #[inline]
    fn carry_in(&self, use_carry: bool) -> u8 {
        u8::from(use_carry && self.get_flag(Flag::C))
    }

    /// ADD/ADC A,value.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry = self.carry_in(use_carry);
        let wide = a as u16 + value as u16 + carry as u16;
        let result = wide as u8;
        let half = (a & 0x0F) + (value & 0x0F) + carry > 0x0F;

        self.regs.a = result;
        self.set_flags(result == 0, false, half, wide > 0xFF);
    }

    /// SUB/SBC A,value. The borrow flags only depend on the operands and
    /// the incoming carry (for SBC), never on the previous H/C.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let result = self.sub_flags(value, self.carry_in(use_carry));
        self.regs.a = result;
    }

    /// CP value: SUB without storing the result.
    pub(super) fn alu_cp(&mut self, value: u8) {
        self.sub_flags(value, 0);
    }

    fn sub_flags(&mut self, value: u8, carry: u8) -> u8 {
        let a = self.regs.a;
        let result = a.wrapping_sub(value).wrapping_sub(carry);
        let half = (a & 0x0F) < (value & 0x0F) + carry;
        let full = (a as u16) < value as u16 + carry as u16;
        self.set_flags(result == 0, true, half, full);
        result
    }

    pub(super) fn alu_and(&mut self, value: u8) {
        self.regs.a &= value;
        self.set_flags(self.regs.a == 0, false, true, false);
    }

    pub(super) fn alu_or(&mut self, value: u8) {
        self.regs.a |= value;
        self.set_flags(self.regs.a == 0, false, false, false);
    }

    pub(super) fn alu_xor(&mut self, value: u8) {
        self.regs.a ^= value;
        self.set_flags(self.regs.a == 0, false, false, false);
    }

    /// Dispatch one of the eight accumulator operations by its opcode
    /// column (ADD, ADC, SUB, SBC, AND, XOR, OR, CP).
    pub(super) fn alu_op(&mut self, op: u8, value: u8) {
        match op & 0x07 {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// Decimal adjust A after a BCD addition or subtraction.
    /// N is preserved; H is cleared.
    pub(super) fn alu_daa(&mut self) {
        let subtract = self.get_flag(Flag::N);
        let mut carry = self.get_flag(Flag::C);
        let mut adjust = 0u8;

        if self.get_flag(Flag::H) || (!subtract && (self.regs.a & 0x0F) > 0x09) {
            adjust |= 0x06;
        }
        if carry || (!subtract && self.regs.a > 0x99) {
            adjust |= 0x60;
            carry = true;
        }

        let a = if subtract {
            self.regs.a.wrapping_sub(adjust)
        } else {
            self.regs.a.wrapping_add(adjust)
        };
        self.regs.a = a;
        self.set_flags(a == 0, subtract, false, carry);
    }

    /// INC r: Z, N, H updated; C preserved.
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        let carry = self.get_flag(Flag::C);
        self.set_flags(result == 0, false, value & 0x0F == 0x0F, carry);
        result
    }

    /// DEC r: Z, N, H updated; C preserved.
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        let carry = self.get_flag(Flag::C);
        self.set_flags(result == 0, true, value & 0x0F == 0x00, carry);
        result
    }

    /// ADD HL,rr: H from bit 11, C from bit 15, N cleared, Z untouched.
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let (result, carry) = hl.overflowing_add(value);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, carry);
        self.regs.set_hl(result);
    }

    /// SP plus a signed 8-bit offset, shared by ADD SP,e8 and LD HL,SP+e8.
    /// Z and N are cleared; H and C come from the unsigned low byte sum.
    pub(super) fn alu_add_sp_offset(&mut self, offset: u8) -> u16 {
        let sp = self.regs.sp;
        let half = (sp & 0x000F) + (offset as u16 & 0x000F) > 0x000F;
        let carry = (sp & 0x00FF) + offset as u16 > 0x00FF;
        self.set_flags(false, false, half, carry);
        sp.wrapping_add(offset as i8 as u16)
    }
}
