use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Read an 8-bit operand by its opcode encoding:
    /// 0=B, 1=C, 2=D, 3=E, 4=H, 5=L, 6=(HL), 7=A.
    #[inline]
    pub(super) fn read_reg8<B: Bus>(&mut self, bus: &mut B, index: u8) -> u8 {
        match index & 0x07 {
            0 => self.regs.b,
            1 => self.regs.c,
            2 => self.regs.d,
            3 => self.regs.e,
            4 => self.regs.h,
            5 => self.regs.l,
            6 => bus.read8(self.regs.hl()),
            _ => self.regs.a,
        }
    }

    /// Write an 8-bit operand using the same encoding as [`Cpu::read_reg8`].
    #[inline]
    pub(super) fn write_reg8<B: Bus>(&mut self, bus: &mut B, index: u8, value: u8) {
        match index & 0x07 {
            0 => self.regs.b = value,
            1 => self.regs.c = value,
            2 => self.regs.d = value,
            3 => self.regs.e = value,
            4 => self.regs.h = value,
            5 => self.regs.l = value,
            6 => bus.write8(self.regs.hl(), value),
            _ => self.regs.a = value,
        }
    }

    /// Branch condition encoded in bits 3-4 of JR/JP/CALL/RET cc:
    /// 0=NZ, 1=Z, 2=NC, 3=C.
    #[inline]
    pub(super) fn condition(&self, opcode: u8) -> bool {
        match (opcode >> 3) & 0x03 {
            0 => !self.get_flag(Flag::Z),
            1 => self.get_flag(Flag::Z),
            2 => !self.get_flag(Flag::C),
            _ => self.get_flag(Flag::C),
        }
    }

    #[inline]
    pub(super) fn fetch8<B: Bus>(&mut self, bus: &mut B) -> u8 {
        let value = bus.read8(self.regs.pc);
        if self.halt_bug {
            // The byte after HALT is read twice.
            self.halt_bug = false;
        } else {
            self.regs.pc = self.regs.pc.wrapping_add(1);
        }
        value
    }

    #[inline]
    pub(super) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let lo = self.fetch8(bus);
        let hi = self.fetch8(bus);
        u16::from_le_bytes([lo, hi])
    }

    /// Push a word: high byte lands at SP+1, low byte at SP.
    #[inline]
    pub(super) fn push_u16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, hi);
        self.regs.sp = self.regs.sp.wrapping_sub(1);
        bus.write8(self.regs.sp, lo);
    }

    #[inline]
    pub(super) fn pop_u16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let value = bus.read16(self.regs.sp);
        self.regs.sp = self.regs.sp.wrapping_add(2);
        value
    }

    /// JR / JR cc. The displacement is relative to the byte after the operand.
    pub(super) fn jr<B: Bus>(&mut self, bus: &mut B, taken: bool) -> u32 {
        let offset = self.fetch8(bus) as i8;
        if !taken {
            return 8;
        }
        self.regs.pc = self.regs.pc.wrapping_add(offset as u16);
        12
    }

    /// JP a16 / JP cc,a16.
    pub(super) fn jp<B: Bus>(&mut self, bus: &mut B, taken: bool) -> u32 {
        let target = self.fetch16(bus);
        if !taken {
            return 12;
        }
        self.regs.pc = target;
        16
    }

    /// CALL a16 / CALL cc,a16.
    pub(super) fn call<B: Bus>(&mut self, bus: &mut B, taken: bool) -> u32 {
        let target = self.fetch16(bus);
        if !taken {
            return 12;
        }
        let ret = self.regs.pc;
        self.push_u16(bus, ret);
        self.regs.pc = target;
        24
    }

    /// RET cc. Unconditional RET/RETI are cheaper and handled separately.
    pub(super) fn ret_cond<B: Bus>(&mut self, bus: &mut B, taken: bool) -> u32 {
        if !taken {
            return 8;
        }
        self.regs.pc = self.pop_u16(bus);
        20
    }
}
