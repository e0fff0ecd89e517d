use super::{MemoryBus, OAM_SIZE};

impl MemoryBus {
    /// OAM DMA: copy `V<<8 .. V<<8 + 0xA0` into OAM at once. Source bytes
    /// go through the normal read path, so cartridge banking and echo RAM
    /// apply. Transfer timing and bus conflicts are not modelled.
    pub(super) fn oam_dma(&mut self, page: u8) {
        let base = (page as u16) << 8;
        for offset in 0..OAM_SIZE as u16 {
            let byte = self.read(base.wrapping_add(offset));
            self.oam[offset as usize] = byte;
        }
    }
}
