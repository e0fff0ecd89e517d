use super::Cartridge;

/// 32 KiB cartridge with no mapper, optionally carrying a single 8 KiB RAM
/// bank.
pub struct RomOnly {
    rom: Vec<u8>,
    ram: Option<Vec<u8>>,
}

impl RomOnly {
    pub fn new(rom: &[u8]) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: None,
        }
    }

    pub fn with_ram(rom: &[u8]) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: Some(vec![0; 0x2000]),
        }
    }
}

impl Cartridge for RomOnly {
    fn rom_read(&self, addr: u16) -> u8 {
        // Short images read as open bus past their end.
        self.rom.get(addr as usize).copied().unwrap_or(0xFF)
    }

    fn rom_write(&mut self, addr: u16, value: u8) {
        log::trace!("GB cartridge: ignored ROM write 0x{value:02X} -> 0x{addr:04X}");
    }

    fn ram_read(&self, addr: u16) -> Option<u8> {
        let ram = self.ram.as_ref()?;
        ram.get((addr & 0x1FFF) as usize).copied()
    }

    fn ram_write(&mut self, addr: u16, value: u8) -> bool {
        match self.ram.as_mut() {
            Some(ram) => {
                ram[(addr & 0x1FFF) as usize] = value;
                true
            }
            None => false,
        }
    }
}
