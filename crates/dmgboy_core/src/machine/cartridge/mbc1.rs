use super::Cartridge;

const ROM_BANK: usize = 0x4000;
const RAM_BANK: usize = 0x2000;

/// MBC1 mapper: up to 2 MiB ROM and 32 KiB RAM.
///
/// The 5-bit bank register selects the switchable ROM bank at
/// 0x4000-0x7FFF (0 behaves as 1). The 2-bit register supplies ROM bank
/// bits 5-6, and in mode 1 also selects the RAM bank and the bank mapped
/// at 0x0000-0x3FFF. Battery persistence is not modelled.
pub struct Mbc1 {
    rom: Vec<u8>,
    ram: Vec<u8>,
    rom_banks: usize,
    ram_banks: usize,
    bank_low: u8,
    bank_high: u8,
    ram_enabled: bool,
    advanced_mode: bool,
}

impl Mbc1 {
    pub fn new(rom: &[u8], ram_banks: usize) -> Self {
        Self {
            rom: rom.to_vec(),
            ram: vec![0; ram_banks * RAM_BANK],
            rom_banks: (rom.len() / ROM_BANK).max(1),
            ram_banks,
            bank_low: 1,
            bank_high: 0,
            ram_enabled: false,
            advanced_mode: false,
        }
    }

    fn rom_bank(&self, addr: u16) -> usize {
        let high = (self.bank_high as usize) << 5;
        let bank = if addr < 0x4000 {
            if self.advanced_mode {
                high
            } else {
                0
            }
        } else {
            high | self.bank_low as usize
        };
        bank % self.rom_banks
    }

    fn ram_offset(&self, addr: u16) -> usize {
        let bank = if self.advanced_mode && self.ram_banks > 1 {
            self.bank_high as usize % self.ram_banks
        } else {
            0
        };
        bank * RAM_BANK + (addr & 0x1FFF) as usize
    }
}

impl Cartridge for Mbc1 {
    fn rom_read(&self, addr: u16) -> u8 {
        let index = self.rom_bank(addr) * ROM_BANK + (addr & 0x3FFF) as usize;
        self.rom.get(index).copied().unwrap_or(0xFF)
    }

    fn rom_write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = value & 0x0F == 0x0A,
            0x2000..=0x3FFF => self.bank_low = (value & 0x1F).max(1),
            0x4000..=0x5FFF => self.bank_high = value & 0x03,
            _ => self.advanced_mode = value & 0x01 != 0,
        }
    }

    fn ram_read(&self, addr: u16) -> Option<u8> {
        if self.ram_banks == 0 {
            return None;
        }
        if !self.ram_enabled {
            return Some(0xFF);
        }
        self.ram.get(self.ram_offset(addr)).copied()
    }

    fn ram_write(&mut self, addr: u16, value: u8) -> bool {
        if self.ram_banks == 0 {
            return false;
        }
        if self.ram_enabled {
            let offset = self.ram_offset(addr);
            if let Some(slot) = self.ram.get_mut(offset) {
                *slot = value;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn banked_rom(banks: usize) -> Vec<u8> {
        let mut rom = vec![0; banks * ROM_BANK];
        for bank in 0..banks {
            rom[bank * ROM_BANK] = bank as u8;
        }
        rom
    }

    #[test]
    fn bank_zero_maps_to_one() {
        let mut cart = Mbc1::new(&banked_rom(4), 0);
        cart.rom_write(0x2000, 0x00);
        assert_eq!(cart.rom_read(0x4000), 1);
        cart.rom_write(0x2000, 0x03);
        assert_eq!(cart.rom_read(0x4000), 3);
        assert_eq!(cart.rom_read(0x0000), 0);
    }

    #[test]
    fn high_bits_extend_rom_bank() {
        let mut cart = Mbc1::new(&banked_rom(64), 0);
        cart.rom_write(0x2000, 0x02);
        cart.rom_write(0x4000, 0x01);
        assert_eq!(cart.rom_read(0x4000), 0x22);

        // Mode 1 also remaps the fixed region.
        cart.rom_write(0x6000, 0x01);
        assert_eq!(cart.rom_read(0x0000), 0x20);
    }

    #[test]
    fn ram_banks_switch_in_advanced_mode() {
        let mut cart = Mbc1::new(&banked_rom(4), 4);
        cart.rom_write(0x0000, 0x0A);
        cart.rom_write(0x6000, 0x01);
        cart.rom_write(0x4000, 0x02);
        cart.ram_write(0xA000, 0xAB);
        cart.rom_write(0x4000, 0x00);
        assert_eq!(cart.ram_read(0xA000), Some(0x00));
        cart.rom_write(0x4000, 0x02);
        assert_eq!(cart.ram_read(0xA000), Some(0xAB));
    }
}
