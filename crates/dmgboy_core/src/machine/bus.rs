use super::cartridge::Cartridge;
use super::interrupts::InterruptController;
use super::io;
use crate::cpu::Bus;
use crate::diagnostics::{Diagnostic, DiagnosticSink};

mod dma;

const WRAM_SIZE: usize = 0x2000;
const VRAM_SIZE: usize = 0x2000;
const HRAM_SIZE: usize = 0x7F;
pub(crate) const OAM_SIZE: usize = 0xA0;

/// The DMG address space.
///
/// Owns every backing store the CPU can see and routes each 16-bit address
/// to one of them. Accesses that hit nothing return 0 / are dropped and
/// are reported to the diagnostic sink.
pub struct MemoryBus {
    wram: [u8; WRAM_SIZE],
    vram: [u8; VRAM_SIZE],
    hram: [u8; HRAM_SIZE],
    oam: [u8; OAM_SIZE],
    cartridge: Box<dyn Cartridge>,
    interrupts: InterruptController,
    diagnostics: Box<dyn DiagnosticSink>,
}

impl MemoryBus {
    pub fn new(cartridge: Box<dyn Cartridge>, diagnostics: Box<dyn DiagnosticSink>) -> Self {
        Self {
            wram: [0; WRAM_SIZE],
            vram: [0; VRAM_SIZE],
            hram: [0; HRAM_SIZE],
            oam: [0; OAM_SIZE],
            cartridge,
            interrupts: InterruptController::new(),
            diagnostics,
        }
    }

    pub fn read(&mut self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_read(addr),
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize],
            0xA000..=0xBFFF => match self.cartridge.ram_read(addr) {
                Some(value) => value,
                None => self.unmapped_read(addr),
            },
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize],
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize],
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize],
            0xFEA0..=0xFEFF => self.unmapped_read(addr),
            0xFF00..=0xFF7F => {
                let index = addr as u8 & 0x7F;
                match self.interrupts.read_io(index) {
                    Some(value) => value,
                    None if index == io::DMA => {
                        self.diagnostics.report(Diagnostic::WriteOnlyRead { addr });
                        0
                    }
                    None => self.unmapped_read(addr),
                }
            }
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize],
            0xFFFF => self.interrupts.read_ie(),
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x7FFF => self.cartridge.rom_write(addr, value),
            0x8000..=0x9FFF => self.vram[(addr - 0x8000) as usize] = value,
            0xA000..=0xBFFF => {
                if !self.cartridge.ram_write(addr, value) {
                    self.unmapped_write(addr, value);
                }
            }
            0xC000..=0xDFFF => self.wram[(addr - 0xC000) as usize] = value,
            0xE000..=0xFDFF => self.wram[(addr - 0xE000) as usize] = value,
            0xFE00..=0xFE9F => self.oam[(addr - 0xFE00) as usize] = value,
            0xFEA0..=0xFEFF => self.unmapped_write(addr, value),
            0xFF00..=0xFF7F => {
                let index = addr as u8 & 0x7F;
                if !self.interrupts.write_io(index, value) {
                    self.unmapped_write(addr, value);
                } else if index == io::DMA {
                    self.oam_dma(value);
                }
            }
            0xFF80..=0xFFFE => self.hram[(addr - 0xFF80) as usize] = value,
            0xFFFF => self.interrupts.write_ie(value),
        }
    }

    fn unmapped_read(&mut self, addr: u16) -> u8 {
        self.diagnostics.report(Diagnostic::UnmappedRead { addr });
        0
    }

    fn unmapped_write(&mut self, addr: u16, value: u8) {
        self.diagnostics.report(Diagnostic::UnmappedWrite { addr, value });
    }

    pub fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    pub fn interrupts_mut(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }

    pub(crate) fn vram(&self) -> &[u8; VRAM_SIZE] {
        &self.vram
    }

    pub(crate) fn oam(&self) -> &[u8; OAM_SIZE] {
        &self.oam
    }
}

impl Bus for MemoryBus {
    #[inline]
    fn read8(&mut self, addr: u16) -> u8 {
        self.read(addr)
    }

    #[inline]
    fn write8(&mut self, addr: u16, value: u8) {
        self.write(addr, value);
    }

    #[inline]
    fn interrupts(&mut self) -> &mut InterruptController {
        &mut self.interrupts
    }
}
