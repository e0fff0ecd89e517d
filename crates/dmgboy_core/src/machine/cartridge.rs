mod mbc1;
mod rom_only;

pub use mbc1::Mbc1;
pub use rom_only::RomOnly;

use crate::Error;

/// Header offset of the cartridge type byte.
const CARTRIDGE_TYPE: usize = 0x0147;
/// Header offset of the external RAM size byte.
const RAM_SIZE: usize = 0x0149;

/// Cartridge as seen from the memory bus.
///
/// ROM reads cover `0x0000..=0x7FFF`; writes there reach the mapper's
/// control registers. RAM accesses cover `0xA000..=0xBFFF`. A cartridge
/// without external RAM answers `None`/`false` so the bus can report the
/// access as unmapped.
pub trait Cartridge {
    fn rom_read(&self, addr: u16) -> u8;
    fn rom_write(&mut self, addr: u16, value: u8);
    fn ram_read(&self, addr: u16) -> Option<u8>;
    fn ram_write(&mut self, addr: u16, value: u8) -> bool;
}

/// Build the cartridge described by the ROM header.
pub fn from_rom(rom: &[u8]) -> Result<Box<dyn Cartridge>, Error> {
    if rom.is_empty() {
        return Err(Error::EmptyRom);
    }

    let kind = rom.get(CARTRIDGE_TYPE).copied().unwrap_or(0);
    let ram_banks = ram_banks(rom.get(RAM_SIZE).copied().unwrap_or(0));
    log::debug!(
        "GB cartridge: type=0x{kind:02X} rom={} KiB ram_banks={ram_banks}",
        rom.len() / 1024
    );

    let cartridge: Box<dyn Cartridge> = match kind {
        0x01..=0x03 => Box::new(Mbc1::new(rom, ram_banks)),
        0x08 | 0x09 => Box::new(RomOnly::with_ram(rom)),
        0x00 => Box::new(RomOnly::new(rom)),
        other => {
            log::warn!("GB cartridge: unsupported type 0x{other:02X}, treating as ROM only");
            Box::new(RomOnly::new(rom))
        }
    };
    Ok(cartridge)
}

/// Number of 8 KiB RAM banks from the header size code. The 2 KiB size is
/// rounded up to one bank.
fn ram_banks(code: u8) -> usize {
    match code {
        0x01 | 0x02 => 1,
        0x03 => 4,
        0x04 => 16,
        0x05 => 8,
        _ => 0,
    }
}
