pub mod config;
pub mod cpu;
pub mod diagnostics;
mod error;
pub mod machine;

pub use config::MachineConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink};
pub use error::Error;
pub use machine::{
    Buttons, Cartridge, FrameSink, Interrupt, InterruptController, Machine, MemoryBus,
    NullFrameSink,
};

/// Logical screen width in pixels for the DMG.
pub const SCREEN_WIDTH: usize = 160;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 144;
/// Size in bytes of one completed frame (one shade byte per pixel).
pub const FRAME_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;
