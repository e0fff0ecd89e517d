/// Registers for the DMG CPU (LR35902).
///
/// The eight 8-bit registers are stored individually; the 16-bit pairs
/// are composed and decomposed explicitly by the accessors below.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f & 0xF0])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        // Lower 4 bits of F are always zero.
        self.f = f & 0xF0;
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    /// Read a 16-bit pair by its opcode index (0=BC, 1=DE, 2=HL, 3=SP).
    #[inline]
    pub(super) fn pair(&self, index: u8) -> u16 {
        match index & 0x03 {
            0 => self.bc(),
            1 => self.de(),
            2 => self.hl(),
            _ => self.sp,
        }
    }

    /// Write a 16-bit pair by its opcode index (0=BC, 1=DE, 2=HL, 3=SP).
    #[inline]
    pub(super) fn set_pair(&mut self, index: u8, value: u16) {
        match index & 0x03 {
            0 => self.set_bc(value),
            1 => self.set_de(value),
            2 => self.set_hl(value),
            _ => self.sp = value,
        }
    }
}

/// Flag bits in the F register.
///
/// Layout (bit index in the byte, from MSB to LSB):
/// - bit 7: Z (zero)
/// - bit 6: N (subtract)
/// - bit 5: H (half carry)
/// - bit 4: C (carry)
/// - bits 0–3 are always zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flag {
    Z = 7,
    N = 6,
    H = 5,
    C = 4,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_compose_high_and_low_halves() {
        let mut regs = Registers::default();
        regs.set_bc(0x1234);
        assert_eq!((regs.b, regs.c), (0x12, 0x34));

        regs.h = 0xC0;
        regs.l = 0x01;
        assert_eq!(regs.hl(), 0xC001);
    }

    #[test]
    fn af_masks_low_nibble_of_flags() {
        let mut regs = Registers::default();
        regs.set_af(0xABCD);
        assert_eq!(regs.a, 0xAB);
        assert_eq!(regs.f, 0xC0);
        assert_eq!(regs.af(), 0xABC0);
    }
}
