use super::interrupts::{Interrupt, InterruptController};
use super::io::{DIV, TAC, TIMA, TMA};

/// T-cycles per DIV increment (16384 Hz).
const DIV_PERIOD: i32 = 256;
/// T-cycles per TIMA increment, indexed by TAC bits 1-0.
const COUNTER_PERIODS: [i32; 4] = [1024, 16, 64, 256];

/// Divider and programmable counter.
///
/// DIV/TIMA/TMA/TAC live in the I/O bank; this unit only keeps the two
/// countdowns that decide when the next increment happens. Every elapsed
/// period is applied, however many cycles a single `advance` covers.
pub struct Timer {
    div_countdown: i32,
    counter_countdown: i32,
    /// Number of TIMA overflows handled so far.
    #[cfg(test)]
    pub(crate) overflow_events: u64,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            div_countdown: DIV_PERIOD,
            counter_countdown: 0,
            #[cfg(test)]
            overflow_events: 0,
        }
    }

    pub fn advance(&mut self, cycles: u32, interrupts: &mut InterruptController) {
        let cycles = cycles as i32;
        let io = &mut interrupts.io;

        self.div_countdown -= cycles;
        while self.div_countdown <= 0 {
            self.div_countdown += DIV_PERIOD;
            io.set(DIV, io.get(DIV).wrapping_add(1));
        }

        let tac = io.get(TAC);
        if tac & 0x04 == 0 {
            self.counter_countdown = 0;
            return;
        }

        let period = COUNTER_PERIODS[(tac & 0x03) as usize];
        let mut overflows = 0;
        self.counter_countdown -= cycles;
        while self.counter_countdown <= 0 {
            self.counter_countdown += period;
            let (tima, overflow) = io.get(TIMA).overflowing_add(1);
            if overflow {
                io.set(TIMA, io.get(TMA));
                overflows += 1;
            } else {
                io.set(TIMA, tima);
            }
        }

        if overflows > 0 {
            interrupts.request(Interrupt::Timer);
            #[cfg(test)]
            {
                self.overflow_events += overflows;
            }
        }
    }
}
