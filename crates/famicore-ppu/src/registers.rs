//! PPUCTRL, PPUMASK and PPUSTATUS bit definitions.

use bitflags::bitflags;

bitflags! {
    /// PPUCTRL ($2000, write-only): `VPHB SINN`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Ctrl: u8 {
        /// Nametable select, low bit.
        const NAMETABLE_X = 0x01;
        /// Nametable select, high bit.
        const NAMETABLE_Y = 0x02;
        /// VRAM increment: 0 = +1 across, 1 = +32 down.
        const VRAM_INCREMENT = 0x04;
        /// Sprite pattern table for 8×8 sprites.
        const SPRITE_TABLE = 0x08;
        /// Background pattern table.
        const BG_TABLE = 0x10;
        /// 8×16 sprite mode.
        const SPRITE_SIZE = 0x20;
        /// Master/slave select (unused on the NES).
        const MASTER_SLAVE = 0x40;
        /// Raise NMI at the start of vertical blank.
        const NMI_ENABLE = 0x80;
    }
}

impl Ctrl {
    /// VRAM address increment applied by $2007 accesses.
    #[inline]
    #[must_use]
    pub fn vram_increment(self) -> u16 {
        if self.contains(Self::VRAM_INCREMENT) {
            32
        } else {
            1
        }
    }

    /// Background pattern table base ($0000 or $1000).
    #[inline]
    #[must_use]
    pub fn bg_table_addr(self) -> u16 {
        if self.contains(Self::BG_TABLE) { 0x1000 } else { 0 }
    }

    /// Sprite pattern table base for 8×8 sprites.
    #[inline]
    #[must_use]
    pub fn sprite_table_addr(self) -> u16 {
        if self.contains(Self::SPRITE_TABLE) {
            0x1000
        } else {
            0
        }
    }

    /// Sprite height in pixels (8 or 16).
    #[inline]
    #[must_use]
    pub fn sprite_height(self) -> u16 {
        if self.contains(Self::SPRITE_SIZE) { 16 } else { 8 }
    }

    /// NMI generation enabled.
    #[inline]
    #[must_use]
    pub fn nmi_enabled(self) -> bool {
        self.contains(Self::NMI_ENABLE)
    }
}

bitflags! {
    /// PPUMASK ($2001, write-only): `BGRs bMmG`.
    ///
    /// The emphasis bits and greyscale are latched but do not affect
    /// the composed pixels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Mask: u8 {
        /// Greyscale display.
        const GREYSCALE = 0x01;
        /// Show background in the leftmost 8 pixels.
        const SHOW_BG_LEFT = 0x02;
        /// Show sprites in the leftmost 8 pixels.
        const SHOW_SPRITES_LEFT = 0x04;
        /// Background rendering enable.
        const SHOW_BG = 0x08;
        /// Sprite rendering enable.
        const SHOW_SPRITES = 0x10;
        /// Emphasize red.
        const EMPHASIZE_RED = 0x20;
        /// Emphasize green.
        const EMPHASIZE_GREEN = 0x40;
        /// Emphasize blue.
        const EMPHASIZE_BLUE = 0x80;
    }
}

impl Mask {
    /// Either layer enabled.
    #[inline]
    #[must_use]
    pub fn rendering_enabled(self) -> bool {
        self.intersects(Self::SHOW_BG | Self::SHOW_SPRITES)
    }

    /// Background layer enabled.
    #[inline]
    #[must_use]
    pub fn show_background(self) -> bool {
        self.contains(Self::SHOW_BG)
    }

    /// Sprite layer enabled.
    #[inline]
    #[must_use]
    pub fn show_sprites(self) -> bool {
        self.contains(Self::SHOW_SPRITES)
    }
}

bitflags! {
    /// PPUSTATUS ($2002, read-only) flag bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct StatusFlags: u8 {
        /// More than eight sprites were found for one scanline.
        const SPRITE_OVERFLOW = 0x20;
        /// Sprite 0 overlapped an opaque background pixel.
        const SPRITE_ZERO_HIT = 0x40;
        /// Vertical blank in progress.
        const VBLANK = 0x80;
    }
}
