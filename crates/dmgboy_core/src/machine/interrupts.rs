use bitflags::bitflags;

use super::io::IoRegisters;

bitflags! {
    /// Interrupt request/enable bits as laid out in IF (0xFF0F) and IE
    /// (0xFFFF). Lower bit index means higher priority.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct InterruptFlags: u8 {
        const VBLANK = 1 << 0;
        const STAT   = 1 << 1;
        const TIMER  = 1 << 2;
        const SERIAL = 1 << 3;
        const JOYPAD = 1 << 4;
    }
}

/// The five interrupt lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Interrupt {
    VBlank = 0,
    Stat = 1,
    Timer = 2,
    Serial = 3,
    Joypad = 4,
}

impl Interrupt {
    /// All lines, highest priority first.
    pub const ALL: [Interrupt; 5] = [
        Interrupt::VBlank,
        Interrupt::Stat,
        Interrupt::Timer,
        Interrupt::Serial,
        Interrupt::Joypad,
    ];

    /// Handler address for this line.
    pub fn vector(self) -> u16 {
        0x0040 + 8 * self as u16
    }

    fn flag(self) -> InterruptFlags {
        InterruptFlags::from_bits_truncate(1 << self as u8)
    }
}

/// Interrupt request/enable state, the IME latch and the I/O register bank
/// that raises most of the requests.
pub struct InterruptController {
    requested: InterruptFlags,
    /// IE keeps all eight bits for readback; only the low five matter.
    enabled: u8,
    ime: bool,
    pub(crate) io: IoRegisters,
}

impl Default for InterruptController {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptController {
    pub fn new() -> Self {
        Self {
            // The boot ROM leaves a VBlank request behind.
            requested: InterruptFlags::VBLANK,
            enabled: 0x00,
            ime: false,
            io: IoRegisters::new(),
        }
    }

    /// Set the request bit for `interrupt`. Requesting twice is the same as
    /// requesting once.
    pub fn request(&mut self, interrupt: Interrupt) {
        self.requested.insert(interrupt.flag());
    }

    /// Take the highest-priority serviceable interrupt.
    ///
    /// With IME set and a line both requested and enabled, the lowest such
    /// line's request bit is cleared and its vector returned. With IME clear
    /// nothing is touched.
    pub fn acknowledge(&mut self) -> Option<u16> {
        if !self.ime {
            return None;
        }
        let pending = self.pending();
        if pending == 0 {
            return None;
        }
        let line = *Interrupt::ALL.get(pending.trailing_zeros() as usize)?;
        self.requested.remove(line.flag());
        Some(line.vector())
    }

    pub fn set_master_enable(&mut self, enabled: bool) {
        self.ime = enabled;
    }

    pub fn master_enabled(&self) -> bool {
        self.ime
    }

    /// Lines that are both requested and enabled, regardless of IME.
    pub fn pending(&self) -> u8 {
        self.requested.bits() & self.enabled & 0x1F
    }

    pub fn requested(&self) -> InterruptFlags {
        self.requested
    }

    /// IF as seen by the CPU; the unused upper bits read as 1.
    pub fn read_if(&self) -> u8 {
        0xE0 | self.requested.bits()
    }

    pub fn write_if(&mut self, value: u8) {
        self.requested = InterruptFlags::from_bits_truncate(value);
    }

    pub fn read_ie(&self) -> u8 {
        self.enabled
    }

    pub fn write_ie(&mut self, value: u8) {
        self.enabled = value;
    }

    /// Store a new active-low joypad byte. Any button going from released to
    /// pressed requests the joypad interrupt.
    pub fn set_joypad(&mut self, state: u8) {
        let old = self.io.joypad;
        if old & state != old {
            self.request(Interrupt::Joypad);
        }
        self.io.joypad = state;
    }

    /// Read an I/O register at `0xFF00 + index`. `None` means the index has
    /// no register behind it.
    pub fn read_io(&self, index: u8) -> Option<u8> {
        match index {
            super::io::IF => Some(self.read_if()),
            _ => self.io.read(index),
        }
    }

    /// Write an I/O register at `0xFF00 + index`. Returns `false` when the
    /// index has no register behind it.
    pub fn write_io(&mut self, index: u8, value: u8) -> bool {
        match index {
            super::io::IF => {
                self.write_if(value);
                true
            }
            _ => {
                let written = self.io.write(index, value);
                if std::mem::take(&mut self.io.serial_done) {
                    self.request(Interrupt::Serial);
                }
                written
            }
        }
    }
}
