//! The `0xFF00..=0xFF7F` register bank.
//!
//! Every index falls into one access class: plain storage, masked (only
//! some bits writable), side-effecting, or unmapped. Hardware-owned updates
//! (LY, STAT mode bits, DIV, TIMA) bypass the CPU-facing policies through
//! [`IoRegisters::get`] and [`IoRegisters::set`].

use super::serial::Serial;

pub(crate) const P1: u8 = 0x00;
pub(crate) const SB: u8 = 0x01;
pub(crate) const SC: u8 = 0x02;
pub(crate) const DIV: u8 = 0x04;
pub(crate) const TIMA: u8 = 0x05;
pub(crate) const TMA: u8 = 0x06;
pub(crate) const TAC: u8 = 0x07;
pub(crate) const IF: u8 = 0x0F;
pub(crate) const LCDC: u8 = 0x40;
pub(crate) const STAT: u8 = 0x41;
pub(crate) const SCY: u8 = 0x42;
pub(crate) const SCX: u8 = 0x43;
pub(crate) const LY: u8 = 0x44;
pub(crate) const LYC: u8 = 0x45;
pub(crate) const DMA: u8 = 0x46;
pub(crate) const BGP: u8 = 0x47;
pub(crate) const OBP0: u8 = 0x48;
pub(crate) const OBP1: u8 = 0x49;
pub(crate) const WY: u8 = 0x4A;
pub(crate) const WX: u8 = 0x4B;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Plain,
    /// Only the given bits are writable; the rest keep their value.
    Masked(u8),
    SideEffect,
    Unmapped,
}

fn access(index: u8) -> Access {
    match index {
        SB | TIMA | TMA => Access::Plain,
        // Sound registers and wave RAM are stored but not synthesized.
        0x10..=0x14 | 0x16..=0x19 | 0x1A..=0x1E | 0x20..=0x26 | 0x30..=0x3F => Access::Plain,
        SCY | SCX | LYC | BGP | OBP0 | OBP1 | WY | WX => Access::Plain,
        TAC => Access::Masked(0x07),
        IF => Access::Masked(0x1F),
        STAT => Access::Masked(0x78),
        P1 | SC | DIV | LCDC | LY | DMA => Access::SideEffect,
        _ => Access::Unmapped,
    }
}

pub(crate) struct IoRegisters {
    regs: [u8; 0x80],
    /// Active-low button state: low nibble Right/Left/Up/Down, high nibble
    /// A/B/Select/Start.
    pub(crate) joypad: u8,
    pub(crate) serial: Serial,
    /// Set when a serial transfer completed on the last write.
    pub(crate) serial_done: bool,
    /// Set by LCDC-off and LY writes; the PPU restarts at line 0.
    restart: bool,
}

impl IoRegisters {
    pub(crate) fn new() -> Self {
        let mut io = Self {
            regs: [0; 0x80],
            joypad: 0xFF,
            serial: Serial::default(),
            serial_done: false,
            restart: false,
        };
        io.apply_dmg_boot_state();
        io
    }

    /// Register values the boot ROM leaves behind.
    fn apply_dmg_boot_state(&mut self) {
        let boot: &[(u8, u8)] = &[
            (P1, 0x30),
            (SC, 0x7E),
            (TAC, 0xF8),
            (0x10, 0x80),
            (0x11, 0xBF),
            (0x12, 0xF3),
            (0x14, 0xBF),
            (0x16, 0x3F),
            (0x19, 0xBF),
            (0x1A, 0x7F),
            (0x1B, 0xFF),
            (0x1C, 0x9F),
            (0x1E, 0xBF),
            (0x20, 0xFF),
            (0x23, 0xBF),
            (0x24, 0x77),
            (0x25, 0xF3),
            (0x26, 0xF1),
            (LCDC, 0x91),
            (STAT, 0x82),
            (BGP, 0xFC),
            (OBP0, 0xFF),
            (OBP1, 0xFF),
        ];
        for &(index, value) in boot {
            self.regs[index as usize] = value;
        }
    }

    /// Raw register value, no access policy applied.
    #[inline]
    pub(crate) fn get(&self, index: u8) -> u8 {
        self.regs[(index & 0x7F) as usize]
    }

    /// Raw register store for hardware-owned updates.
    #[inline]
    pub(crate) fn set(&mut self, index: u8, value: u8) {
        self.regs[(index & 0x7F) as usize] = value;
    }

    pub(crate) fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart)
    }

    pub(crate) fn read(&self, index: u8) -> Option<u8> {
        match access(index) {
            Access::Unmapped => None,
            _ if index == DMA => None,
            _ if index == P1 => Some(self.read_p1()),
            _ => Some(self.get(index)),
        }
    }

    /// Returns `false` for unmapped indices.
    pub(crate) fn write(&mut self, index: u8, value: u8) -> bool {
        match access(index) {
            Access::Plain => self.set(index, value),
            Access::Masked(mask) => {
                let old = self.get(index);
                self.set(index, (old & !mask) | (value & mask));
            }
            Access::SideEffect => self.write_special(index, value),
            Access::Unmapped => return false,
        }
        true
    }

    fn write_special(&mut self, index: u8, value: u8) {
        match index {
            P1 => self.set(P1, value & 0x30),
            SC => {
                let sb = self.get(SB);
                let (sc, done) = self.serial.write_sc(sb, value);
                self.set(SC, sc);
                self.serial_done = done;
            }
            DIV => self.set(DIV, 0),
            LCDC => {
                let was_on = self.get(LCDC) & 0x80 != 0;
                let on = value & 0x80 != 0;
                if was_on != on {
                    log::debug!("GB PPU: LCD {}", if on { "on" } else { "off" });
                }
                if !on {
                    self.reset_line();
                }
                self.set(LCDC, value);
            }
            LY => self.reset_line(),
            DMA => self.set(DMA, value),
            _ => {}
        }
    }

    fn reset_line(&mut self) {
        self.set(LY, 0);
        let stat = self.get(STAT);
        self.set(STAT, stat & !0x07);
        self.restart = true;
    }

    /// P1 combines the select bits with whichever button groups they pick.
    /// Bits 7-6 always read as 1.
    fn read_p1(&self) -> u8 {
        let select = self.get(P1) & 0x30;
        let dpad = if select & 0x10 == 0 { self.joypad & 0x0F } else { 0x0F };
        let buttons = if select & 0x20 == 0 { self.joypad >> 4 } else { 0x0F };
        0xC0 | select | (dpad & buttons)
    }
}
