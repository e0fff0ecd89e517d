use bitflags::bitflags;

use super::bus::MemoryBus;
use super::interrupts::{Interrupt, InterruptController};
use super::io::{LCDC, LY, LYC, STAT};
use crate::{FRAME_SIZE, SCREEN_HEIGHT, SCREEN_WIDTH};

mod render;

/// Lines per frame, including the ten VBlank lines.
const LINES_PER_FRAME: u8 = 154;

bitflags! {
    /// LCDC (0xFF40).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct LcdControl: u8 {
        const BG_ENABLE      = 1 << 0;
        const OBJ_ENABLE     = 1 << 1;
        const OBJ_TALL       = 1 << 2;
        const BG_MAP_HIGH    = 1 << 3;
        const TILE_DATA_LOW  = 1 << 4;
        const WINDOW_ENABLE  = 1 << 5;
        const WINDOW_MAP_HIGH = 1 << 6;
        const LCD_ENABLE     = 1 << 7;
    }
}

/// STAT mode, taken from the two low bits of STAT.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    Transfer = 3,
}

impl Mode {
    fn from_stat(stat: u8) -> Self {
        match stat & 0x03 {
            0 => Mode::HBlank,
            1 => Mode::VBlank,
            2 => Mode::OamScan,
            _ => Mode::Transfer,
        }
    }

    /// T-cycles spent in this mode before the next transition.
    fn budget(self) -> i32 {
        match self {
            Mode::HBlank => 204,
            Mode::VBlank => 456,
            Mode::OamScan => 80,
            Mode::Transfer => 172,
        }
    }

    /// STAT bit that enables the interrupt on entering this mode.
    fn stat_enable_bit(self) -> Option<u8> {
        match self {
            Mode::HBlank => Some(1 << 3),
            Mode::VBlank => Some(1 << 4),
            Mode::OamScan => Some(1 << 5),
            Mode::Transfer => None,
        }
    }
}

/// Receiver for completed frames.
pub trait FrameSink {
    /// `frame` holds `SCREEN_WIDTH * SCREEN_HEIGHT` row-major shades,
    /// 0xFF lightest to 0x00 darkest.
    fn present(&mut self, frame: &[u8]);
}

/// Sink that drops every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFrameSink;

impl FrameSink for NullFrameSink {
    fn present(&mut self, _frame: &[u8]) {}
}

/// Scanline/mode state machine and line renderer.
pub struct Ppu {
    countdown: i32,
    /// Colour indices for the line being composed: 0-3 background,
    /// 4-7 OBP0 sprite, 8-11 OBP1 sprite.
    line: [u8; SCREEN_WIDTH],
    frame: Box<[u8; FRAME_SIZE]>,
    /// Window rows drawn so far this frame.
    window_line: u8,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            countdown: Mode::OamScan.budget(),
            line: [0; SCREEN_WIDTH],
            frame: Box::new([0xFF; FRAME_SIZE]),
            window_line: 0,
        }
    }

    /// Shades rendered so far, including lines of a frame still in progress.
    pub fn frame(&self) -> &[u8] {
        &self.frame[..]
    }

    pub fn advance(&mut self, cycles: u32, bus: &mut MemoryBus, sink: &mut dyn FrameSink) {
        let lcdc = LcdControl::from_bits_retain(bus.interrupts().io.get(LCDC));
        if !lcdc.contains(LcdControl::LCD_ENABLE) {
            return;
        }

        if bus.interrupts_mut().io.take_restart() {
            self.restart(bus.interrupts_mut());
        }

        self.countdown -= cycles as i32;
        while self.countdown <= 0 {
            let next = self.transition(lcdc, bus, sink);
            self.countdown += next.budget();
        }
    }

    /// Back to the start of line 0 in OAM scan.
    fn restart(&mut self, interrupts: &mut InterruptController) {
        let io = &mut interrupts.io;
        io.set(LY, 0);
        let stat = io.get(STAT);
        io.set(STAT, (stat & !0x03) | Mode::OamScan as u8);
        self.countdown = Mode::OamScan.budget();
        self.window_line = 0;
    }

    fn transition(&mut self, lcdc: LcdControl, bus: &mut MemoryBus, sink: &mut dyn FrameSink) -> Mode {
        let mode = Mode::from_stat(bus.interrupts().io.get(STAT));
        let mut ly = bus.interrupts().io.get(LY);

        let next = match mode {
            Mode::OamScan => Mode::Transfer,
            Mode::Transfer => {
                if (ly as usize) < SCREEN_HEIGHT {
                    self.render_line(lcdc, ly, bus);
                }
                Mode::HBlank
            }
            Mode::HBlank => {
                ly += 1;
                if ly as usize == SCREEN_HEIGHT {
                    bus.interrupts_mut().request(Interrupt::VBlank);
                    Mode::VBlank
                } else {
                    Mode::OamScan
                }
            }
            Mode::VBlank => {
                ly += 1;
                if ly == LINES_PER_FRAME {
                    sink.present(&self.frame[..]);
                    ly = 0;
                    self.window_line = 0;
                    Mode::OamScan
                } else {
                    Mode::VBlank
                }
            }
        };

        let interrupts = bus.interrupts_mut();
        let stat = interrupts.io.get(STAT);
        let line_changed = ly != interrupts.io.get(LY);
        let coincident = ly == interrupts.io.get(LYC);

        interrupts.io.set(LY, ly);
        interrupts.io.set(STAT, (stat & !0x07) | (u8::from(coincident) << 2) | next as u8);

        if next != mode {
            if let Some(bit) = next.stat_enable_bit() {
                if stat & bit != 0 {
                    interrupts.request(Interrupt::Stat);
                }
            }
        }
        // Only a new line can raise the coincidence interrupt; LYC writes
        // just update the flag.
        if coincident && line_changed && stat & 0x40 != 0 {
            interrupts.request(Interrupt::Stat);
        }

        next
    }
}
