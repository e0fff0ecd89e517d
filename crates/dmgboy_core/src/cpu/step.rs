use super::{Bus, Cpu};
use crate::machine::InterruptFlags;
use crate::Error;

/// Cost of one idle step while halted or stopped.
const IDLE_CYCLES: u32 = 4;
const DI: u8 = 0xF3;

impl Cpu {
    /// Execute one instruction and return the number of T-cycles it took,
    /// including interrupt dispatch when a handler was entered first.
    ///
    /// The only fatal outcome is an opcode outside the instruction set.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u32, Error> {
        if self.stopped {
            if !bus.interrupts().requested().contains(InterruptFlags::JOYPAD) {
                return Ok(IDLE_CYCLES);
            }
            self.stopped = false;
        }

        if self.halted {
            if bus.interrupts().pending() == 0 {
                return Ok(IDLE_CYCLES);
            }
            // Any enabled request wakes the CPU, even with IME clear.
            self.halted = false;
        }

        let mut cycles = self.service_interrupt(bus).unwrap_or(0);

        // HALT and DI look at the pending flag while they execute.
        let enable_ime = self.ime_enable_pending;
        let pc = self.regs.pc;
        let opcode = self.fetch8(bus);
        let Some(cost) = self.exec_opcode(bus, opcode) else {
            log::error!("GB CPU: unknown opcode 0x{opcode:02X} at 0x{pc:04X}");
            return Err(Error::UnknownOpcode { opcode, pc });
        };
        cycles += cost;

        if enable_ime {
            self.ime_enable_pending = false;
            if opcode != DI {
                bus.interrupts().set_master_enable(true);
            }
        }

        Ok(cycles)
    }
}
