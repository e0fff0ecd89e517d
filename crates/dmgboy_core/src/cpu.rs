mod alu;
mod bus;
mod cb;
mod exec;
mod helpers;
mod init;
mod interrupts;
mod regs;
mod step;

pub use bus::Bus;
pub use regs::{Flag, Registers};

/// DMG CPU core.
///
/// Owns the register file and the small amount of control state the
/// instruction stream needs (HALT/STOP, the delayed EI latch). The
/// interrupt master-enable latch itself lives in the
/// [`crate::InterruptController`] and is reached through the [`Bus`].
#[derive(Clone, Debug)]
pub struct Cpu {
    pub regs: Registers,
    pub halted: bool,
    /// STOP low-power state. While set, the CPU idles until a joypad
    /// interrupt is requested.
    stopped: bool,
    /// HALT bug: the next opcode fetch does not increment PC.
    halt_bug: bool,
    /// Set by EI; IME is enabled once the following instruction completes.
    ime_enable_pending: bool,
}

impl Cpu {
    #[inline]
    pub fn get_flag(&self, flag: Flag) -> bool {
        let bit = flag as u8;
        (self.regs.f & (1 << bit)) != 0
    }

    #[inline]
    pub fn set_flag(&mut self, flag: Flag, value: bool) {
        let bit = flag as u8;
        if value {
            self.regs.f |= 1 << bit;
        } else {
            self.regs.f &= !(1 << bit);
        }
    }

    #[inline]
    pub fn clear_flags(&mut self) {
        self.regs.f = 0;
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

#[cfg(test)]
mod tests;
