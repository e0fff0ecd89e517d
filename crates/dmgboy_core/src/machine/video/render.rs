use super::{LcdControl, Ppu};
use crate::machine::bus::MemoryBus;
use crate::machine::io::{BGP, OBP0, OBP1, SCX, SCY, WX, WY};
use crate::SCREEN_WIDTH;

/// Shade for each palette entry, lightest first.
const SHADES: [u8; 4] = [0xFF, 0xAA, 0x55, 0x00];
const MAX_SPRITES_PER_LINE: usize = 10;
/// Offset added to sprite colour indices in the line buffer.
const SPRITE_BASE: u8 = 4;

#[derive(Clone, Copy)]
struct Sprite {
    slot: usize,
    y: i32,
    x: i32,
    tile: u8,
    attr: u8,
}

impl Sprite {
    fn behind_background(&self) -> bool {
        self.attr & 0x80 != 0
    }

    fn flip_y(&self) -> bool {
        self.attr & 0x40 != 0
    }

    fn flip_x(&self) -> bool {
        self.attr & 0x20 != 0
    }

    fn palette(&self) -> u8 {
        (self.attr >> 4) & 0x01
    }
}

/// 2-bit colour index of pixel `x` (0 = leftmost) in a tile row.
#[inline]
fn pixel(lo: u8, hi: u8, x: u8) -> u8 {
    let bit = 7 - x;
    ((lo >> bit) & 1) | (((hi >> bit) & 1) << 1)
}

impl Ppu {
    pub(super) fn render_line(&mut self, lcdc: LcdControl, ly: u8, bus: &MemoryBus) {
        let io = &bus.interrupts().io;
        self.line = [0; SCREEN_WIDTH];

        // On the DMG, clearing LCDC bit 0 blanks the window as well.
        if lcdc.contains(LcdControl::BG_ENABLE) {
            self.render_background(lcdc, ly, io.get(SCX), io.get(SCY), bus);
            if lcdc.contains(LcdControl::WINDOW_ENABLE) {
                self.render_window(lcdc, ly, io.get(WX), io.get(WY), bus);
            }
        }
        if lcdc.contains(LcdControl::OBJ_ENABLE) {
            self.render_sprites(lcdc, ly, bus);
        }

        let palette = io.get(BGP) as u32 | (io.get(OBP0) as u32) << 8 | (io.get(OBP1) as u32) << 16;
        let row = &mut self.frame[ly as usize * SCREEN_WIDTH..][..SCREEN_WIDTH];
        for (shade, &index) in row.iter_mut().zip(self.line.iter()) {
            *shade = SHADES[((palette >> (index * 2)) & 0x03) as usize];
        }
    }

    /// Row `row` of background/window tile `tile` from VRAM, honouring the
    /// LCDC addressing mode (unsigned from 0x8000 or signed around 0x9000).
    fn tile_row(lcdc: LcdControl, tile: u8, row: u8, bus: &MemoryBus) -> (u8, u8) {
        let base = if lcdc.contains(LcdControl::TILE_DATA_LOW) {
            tile as usize * 16
        } else {
            (0x1000 + (tile as i8 as isize) * 16) as usize
        };
        let addr = base + row as usize * 2;
        let vram = bus.vram();
        (vram[addr], vram[addr + 1])
    }

    fn render_background(&mut self, lcdc: LcdControl, ly: u8, scx: u8, scy: u8, bus: &MemoryBus) {
        let map = if lcdc.contains(LcdControl::BG_MAP_HIGH) { 0x1C00 } else { 0x1800 };
        let y = ly.wrapping_add(scy);
        let map_row = map + (y / 8) as usize * 32;

        for (screen_x, slot) in self.line.iter_mut().enumerate() {
            let x = (screen_x as u8).wrapping_add(scx);
            let tile = bus.vram()[map_row + (x / 8) as usize];
            let (lo, hi) = Self::tile_row(lcdc, tile, y & 0x07, bus);
            *slot = pixel(lo, hi, x & 0x07);
        }
    }

    fn render_window(&mut self, lcdc: LcdControl, ly: u8, wx: u8, wy: u8, bus: &MemoryBus) {
        let left = wx as i32 - 7;
        if ly < wy || left >= SCREEN_WIDTH as i32 {
            return;
        }

        let map = if lcdc.contains(LcdControl::WINDOW_MAP_HIGH) { 0x1C00 } else { 0x1800 };
        let y = self.window_line;
        let map_row = map + (y / 8) as usize * 32;

        for screen_x in left.max(0)..SCREEN_WIDTH as i32 {
            let x = (screen_x - left) as u8;
            let tile = bus.vram()[map_row + (x / 8) as usize];
            let (lo, hi) = Self::tile_row(lcdc, tile, y & 0x07, bus);
            self.line[screen_x as usize] = pixel(lo, hi, x & 0x07);
        }
        self.window_line = self.window_line.wrapping_add(1);
    }

    /// The ten sprites on line `ly` with the lowest x, ties going to the
    /// lower slot. Drawing order follows the same key, so the leftmost
    /// sprite wins an overlap.
    fn line_sprites(height: i32, ly: u8, bus: &MemoryBus) -> Vec<Sprite> {
        let ly = ly as i32;
        let mut sprites: Vec<Sprite> = bus
            .oam()
            .chunks_exact(4)
            .enumerate()
            .map(|(slot, entry)| Sprite {
                slot,
                y: entry[0] as i32 - 16,
                x: entry[1] as i32 - 8,
                tile: entry[2],
                attr: entry[3],
            })
            .filter(|sprite| (sprite.y..sprite.y + height).contains(&ly))
            .collect();
        sprites.sort_by_key(|sprite| (sprite.x, sprite.slot));
        sprites.truncate(MAX_SPRITES_PER_LINE);
        sprites
    }

    fn render_sprites(&mut self, lcdc: LcdControl, ly: u8, bus: &MemoryBus) {
        let tall = lcdc.contains(LcdControl::OBJ_TALL);
        let height = if tall { 16 } else { 8 };

        for sprite in Self::line_sprites(height, ly, bus) {
            let mut row = ly as i32 - sprite.y;
            if sprite.flip_y() {
                row = height - 1 - row;
            }
            let tile = if tall { sprite.tile & 0xFE } else { sprite.tile };
            let addr = tile as usize * 16 + row as usize * 2;
            let (lo, hi) = (bus.vram()[addr], bus.vram()[addr + 1]);

            for col in 0..8u8 {
                let screen_x = sprite.x + col as i32;
                if !(0..SCREEN_WIDTH as i32).contains(&screen_x) {
                    continue;
                }
                let slot = &mut self.line[screen_x as usize];
                // Already covered by a sprite that takes precedence.
                if *slot >= SPRITE_BASE {
                    continue;
                }
                if sprite.behind_background() && *slot != 0 {
                    continue;
                }
                let x = if sprite.flip_x() { 7 - col } else { col };
                let color = pixel(lo, hi, x);
                if color == 0 {
                    continue;
                }
                *slot = ((sprite.palette() << 2) | color) + SPRITE_BASE;
            }
        }
    }
}
