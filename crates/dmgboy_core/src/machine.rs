mod bus;
pub mod cartridge;
mod gameboy;
mod interrupts;
mod io;
mod joypad;
mod serial;
mod timer;
mod video;

pub use bus::MemoryBus;
pub use cartridge::{Cartridge, Mbc1, RomOnly};
pub use gameboy::Machine;
pub use interrupts::{Interrupt, InterruptController, InterruptFlags};
pub use joypad::Buttons;
pub use timer::Timer;
pub use video::{FrameSink, LcdControl, Mode, NullFrameSink, Ppu};
