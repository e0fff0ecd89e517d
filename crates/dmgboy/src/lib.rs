use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use dmgboy_core::{Buttons, FrameSink, LogSink, Machine, MachineConfig, SCREEN_HEIGHT, SCREEN_WIDTH};
use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Clone, Debug)]
pub struct RunOptions {
    /// Number of `run_frame` calls.
    #[builder(default = 120)]
    pub frames: u32,
    /// Active-low joypad byte held for the whole run.
    #[builder(default = 0xFF)]
    pub joypad: u8,
    #[builder(default)]
    pub config: MachineConfig,
}

/// Frame sink that keeps only the most recent completed frame.
#[derive(Clone, Default)]
pub struct LastFrame(Rc<RefCell<Option<Vec<u8>>>>);

impl LastFrame {
    pub fn take(&self) -> Option<Vec<u8>> {
        self.0.borrow_mut().take()
    }
}

impl FrameSink for LastFrame {
    fn present(&mut self, frame: &[u8]) {
        *self.0.borrow_mut() = Some(frame.to_vec());
    }
}

/// Output of a headless run.
pub struct RunResult {
    /// Last completed frame, or the partial buffer if no frame finished.
    pub frame: Vec<u8>,
    pub serial: Vec<u8>,
}

pub fn run_rom(rom: &[u8], options: &RunOptions) -> Result<RunResult> {
    let last_frame = LastFrame::default();
    let mut machine = Machine::with_config(
        rom,
        options.config,
        Box::new(last_frame.clone()),
        Box::new(LogSink),
    )
    .context("failed to build machine")?;

    for frame in 0..options.frames {
        machine
            .run_frame(options.joypad)
            .with_context(|| format!("emulation stopped during frame {frame}"))?;
    }

    let frame = last_frame.take().unwrap_or_else(|| machine.frame().to_vec());
    Ok(RunResult {
        frame,
        serial: machine.serial_output().to_vec(),
    })
}

/// Binary PGM (P5) with one grey byte per pixel.
pub fn encode_pgm(frame: &[u8]) -> Vec<u8> {
    let mut out = format!("P5\n{SCREEN_WIDTH} {SCREEN_HEIGHT}\n255\n").into_bytes();
    out.extend_from_slice(frame);
    out
}

/// Joypad byte from either a raw value (`0xEF`, `239`) or a button list
/// such as `a+start`.
pub fn parse_joypad(value: &str) -> Result<u8> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).with_context(|| format!("invalid joypad byte '{value}'"));
    }
    if let Ok(byte) = value.parse::<u8>() {
        return Ok(byte);
    }
    match Buttons::parse(value) {
        Some(buttons) => Ok(buttons.joypad_byte()),
        None => bail!("invalid joypad value '{value}'; expected a byte or names like 'a+start'"),
    }
}
