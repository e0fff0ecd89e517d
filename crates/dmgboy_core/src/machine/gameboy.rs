use super::bus::MemoryBus;
use super::cartridge::{self, Cartridge};
use super::timer::Timer;
use super::video::{FrameSink, NullFrameSink, Ppu};
use crate::cpu::Cpu;
use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::{Error, MachineConfig};

/// A complete DMG: CPU, bus, timer and PPU driven from one cycle budget.
///
/// Each [`Machine::step`] runs one CPU instruction and then lets the timer
/// and the PPU catch up by the same number of cycles, in that order.
pub struct Machine {
    cpu: Cpu,
    bus: MemoryBus,
    timer: Timer,
    ppu: Ppu,
    frame_sink: Box<dyn FrameSink>,
    config: MachineConfig,
    /// Cycles still owed to the current frame. Goes negative when the last
    /// instruction overshoots; the overshoot is paid by the next frame.
    budget: i64,
}

impl Machine {
    /// Build a machine with default configuration, no frame output and
    /// diagnostics sent to the log.
    pub fn new(rom: &[u8]) -> Result<Self, Error> {
        Self::with_config(rom, MachineConfig::default(), Box::new(NullFrameSink), Box::new(LogSink))
    }

    pub fn with_config(
        rom: &[u8],
        config: MachineConfig,
        frame_sink: Box<dyn FrameSink>,
        diagnostics: Box<dyn DiagnosticSink>,
    ) -> Result<Self, Error> {
        let cartridge = cartridge::from_rom(rom)?;
        Ok(Self::with_cartridge(cartridge, config, frame_sink, diagnostics))
    }

    /// Build a machine around an already constructed cartridge.
    pub fn with_cartridge(
        cartridge: Box<dyn Cartridge>,
        config: MachineConfig,
        frame_sink: Box<dyn FrameSink>,
        diagnostics: Box<dyn DiagnosticSink>,
    ) -> Self {
        Self {
            cpu: Cpu::new(),
            bus: MemoryBus::new(cartridge, diagnostics),
            timer: Timer::new(),
            ppu: Ppu::new(),
            frame_sink,
            config,
            budget: 0,
        }
    }

    /// Run one instruction and advance the timer and PPU by its cost.
    pub fn step(&mut self) -> Result<u32, Error> {
        let cycles = self.cpu.step(&mut self.bus)?;
        self.timer.advance(cycles, self.bus.interrupts_mut());
        self.ppu.advance(cycles, &mut self.bus, self.frame_sink.as_mut());
        Ok(cycles)
    }

    /// Latch the active-low joypad byte, then run one frame's worth of
    /// cycles. A fault stops the frame early and is returned.
    pub fn run_frame(&mut self, joypad: u8) -> Result<(), Error> {
        self.bus.interrupts_mut().set_joypad(joypad);
        self.budget += i64::from(self.config.frame_cycles());
        while self.budget > 0 {
            let cycles = self.step()?;
            self.budget -= i64::from(cycles);
        }
        Ok(())
    }

    pub fn cpu(&self) -> &Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu {
        &mut self.cpu
    }

    pub fn bus(&self) -> &MemoryBus {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut MemoryBus {
        &mut self.bus
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Current shade buffer; see [`FrameSink::present`] for the layout.
    pub fn frame(&self) -> &[u8] {
        self.ppu.frame()
    }

    /// Bytes sent over the serial port so far.
    pub fn serial_output(&self) -> &[u8] {
        &self.bus.interrupts().io.serial.output
    }
}
