//! Packing presets and the hex block size.
//!
//! A [`Preset`] selects how one RGBA pixel collapses into an unsigned
//! integer. Values are never clamped to the nominal width of the preset;
//! [`BlockSize`] only controls how wide the rendered literal is padded.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::ConvertError;

/// Red weight of the luma sum.
pub const LUMA_R: f64 = 0.2989;
/// Green weight of the luma sum.
pub const LUMA_G: f64 = 0.5870;
/// Blue weight of the luma sum.
pub const LUMA_B: f64 = 0.1140;

/// Monochrome pixels are lit when luma is strictly above this.
pub const MONOCHROME_THRESHOLD: f64 = 128.0;

/// Pixel packing rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// `Color RS5G6B5`: 16-bit RGB565.
    Rgb565,
    /// `Color A8R8G8B8`: 32-bit ARGB8888.
    Argb8888,
    /// `Color R5G5B5`: 15-bit RGB555.
    Rgb555,
    /// `Color R8G8B8`: 24-bit RGB888.
    Rgb888,
    /// `Grayscale 8`: truncated 8-bit luma.
    Gray8,
    /// `Monochrome`: 0 or 255 by luma threshold.
    Monochrome,
}

impl Preset {
    /// Every preset, in the order they are usually offered.
    pub const ALL: [Preset; 6] = [
        Preset::Rgb565,
        Preset::Argb8888,
        Preset::Rgb555,
        Preset::Rgb888,
        Preset::Gray8,
        Preset::Monochrome,
    ];

    /// Display name, matched exactly by [`Preset::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Preset::Rgb565 => "Color RS5G6B5",
            Preset::Argb8888 => "Color A8R8G8B8",
            Preset::Rgb555 => "Color R5G5B5",
            Preset::Rgb888 => "Color R8G8B8",
            Preset::Gray8 => "Grayscale 8",
            Preset::Monochrome => "Monochrome",
        }
    }

    /// The name with spaces replaced by underscores, as used in C identifiers.
    pub fn identifier(self) -> &'static str {
        match self {
            Preset::Rgb565 => "Color_RS5G6B5",
            Preset::Argb8888 => "Color_A8R8G8B8",
            Preset::Rgb555 => "Color_R5G5B5",
            Preset::Rgb888 => "Color_R8G8B8",
            Preset::Gray8 => "Grayscale_8",
            Preset::Monochrome => "Monochrome",
        }
    }

    /// Look up a preset by its exact display name (case and spacing matter).
    pub fn from_name(name: &str) -> Result<Preset, ConvertError> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == name)
            .ok_or_else(|| ConvertError::UnsupportedPreset(name.to_string()))
    }

    /// Nominal bit width of a packed value.
    pub fn bits(self) -> u32 {
        match self {
            Preset::Rgb565 => 16,
            Preset::Argb8888 => 32,
            Preset::Rgb555 => 15,
            Preset::Rgb888 => 24,
            Preset::Gray8 | Preset::Monochrome => 8,
        }
    }

    /// Pack one `[r, g, b, a]` pixel.
    #[inline]
    pub fn pack(self, rgba: [u8; 4]) -> u32 {
        let [r, g, b, a] = rgba.map(u32::from);
        match self {
            Preset::Rgb565 => ((r >> 3) << 11) | ((g >> 2) << 5) | (b >> 3),
            Preset::Argb8888 => (a << 24) | (r << 16) | (g << 8) | b,
            Preset::Rgb555 => ((r >> 3) << 10) | ((g >> 3) << 5) | (b >> 3),
            Preset::Rgb888 => (r << 16) | (g << 8) | b,
            Preset::Gray8 => u32::from(luma(rgba[0], rgba[1], rgba[2]) as u8),
            Preset::Monochrome => threshold(luma(rgba[0], rgba[1], rgba[2])),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::from_name(s)
    }
}

/// Weighted luma of an RGB triple, unrounded.
///
/// The weights sum to 0.9999, so pure white lands just below 255.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * f64::from(r) + LUMA_G * f64::from(g) + LUMA_B * f64::from(b)
}

/// Map an unrounded luma to a monochrome value (255 when strictly above 128).
#[inline]
pub fn threshold(luma: f64) -> u32 {
    if luma > MONOCHROME_THRESHOLD { 255 } else { 0 }
}

/// Minimum hex width of rendered literals, in bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockSize {
    Bits8,
    #[default]
    Bits16,
    Bits24,
    Bits32,
}

impl BlockSize {
    pub const ALL: [BlockSize; 4] = [
        BlockSize::Bits8,
        BlockSize::Bits16,
        BlockSize::Bits24,
        BlockSize::Bits32,
    ];

    pub fn bits(self) -> u32 {
        match self {
            BlockSize::Bits8 => 8,
            BlockSize::Bits16 => 16,
            BlockSize::Bits24 => 24,
            BlockSize::Bits32 => 32,
        }
    }

    /// Minimum number of hex digits per literal (`bits / 4`).
    pub fn digits(self) -> usize {
        (self.bits() / 4) as usize
    }
}

impl TryFrom<u32> for BlockSize {
    type Error = ConvertError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            8 => Ok(BlockSize::Bits8),
            16 => Ok(BlockSize::Bits16),
            24 => Ok(BlockSize::Bits24),
            32 => Ok(BlockSize::Bits32),
            other => Err(ConvertError::UnsupportedBlockSize(other)),
        }
    }
}

impl FromStr for BlockSize {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits: u32 = s
            .trim()
            .parse()
            .map_err(|_| ConvertError::InvalidBlockSize(s.to_string()))?;
        BlockSize::try_from(bits)
    }
}

impl fmt::Display for BlockSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn rgb888_packs_channels() {
        assert_eq!(Preset::Rgb888.pack([255, 0, 128, 7]), 0xFF0080);
        assert_eq!(Preset::Rgb888.pack([255, 0, 128, 200]), 0xFF0080);
    }

    #[test]
    fn argb8888_puts_alpha_on_top() {
        assert_eq!(Preset::Argb8888.pack([255, 0, 128, 16]), 0x10FF0080);
        assert_eq!(Preset::Argb8888.pack([255, 255, 255, 255]), 0xFFFF_FFFF);
    }

    #[test]
    fn rgb565_white_and_primaries() {
        assert_eq!(Preset::Rgb565.pack([255, 255, 255, 0]), 0xFFFF);
        assert_eq!(Preset::Rgb565.pack([255, 0, 0, 0]), 0xF800);
        assert_eq!(Preset::Rgb565.pack([0, 255, 0, 0]), 0x07E0);
        assert_eq!(Preset::Rgb565.pack([0, 0, 255, 0]), 0x001F);
    }

    #[test]
    fn rgb555_drops_low_bits() {
        assert_eq!(Preset::Rgb555.pack([255, 255, 255, 0]), 0x7FFF);
        assert_eq!(Preset::Rgb555.pack([7, 7, 7, 0]), 0);
        assert_eq!(Preset::Rgb555.pack([8, 0, 0, 0]), 1 << 10);
    }

    #[test]
    fn gray8_truncates() {
        assert_eq!(Preset::Gray8.pack([0, 0, 0, 255]), 0x00);
        // 0.9999 * 255 = 254.97..., truncated
        assert_eq!(Preset::Gray8.pack([255, 255, 255, 255]), 0xFE);
        assert_eq!(Preset::Gray8.pack([255, 0, 0, 255]), 76);
        assert_eq!(Preset::Gray8.pack([0, 255, 0, 255]), 149);
        assert_eq!(Preset::Gray8.pack([0, 0, 255, 255]), 29);
    }

    #[test]
    fn monochrome_threshold_is_strict() {
        assert_eq!(threshold(128.0), 0);
        assert_eq!(threshold(129.0), 255);
        assert_eq!(threshold(128.000_001), 255);
    }

    #[test]
    fn monochrome_uses_unrounded_luma() {
        // luma(129,129,129) = 128.987..., truncates to gray 128 but is above the threshold
        assert_eq!(Preset::Gray8.pack([129, 129, 129, 255]), 128);
        assert_eq!(Preset::Monochrome.pack([129, 129, 129, 255]), 255);
        // luma(128,128,128) = 127.987...
        assert_eq!(Preset::Monochrome.pack([128, 128, 128, 255]), 0);
    }

    #[test]
    fn names_roundtrip() {
        for preset in Preset::ALL {
            assert_eq!(Preset::from_name(preset.name()).unwrap(), preset);
            assert_eq!(preset.identifier(), preset.name().replace(' ', "_"));
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
    }

    #[test]
    fn unknown_preset_is_rejected() {
        for bad in ["Color  RS5G6B5", "color rs5g6b5", "Grayscale8", ""] {
            match Preset::from_name(bad) {
                Err(ConvertError::UnsupportedPreset(name)) => assert_eq!(name, String::from(bad)),
                other => panic!("expected UnsupportedPreset, got {other:?}"),
            }
        }
    }

    #[test]
    fn block_size_digits() {
        let digits: alloc::vec::Vec<usize> = BlockSize::ALL.iter().map(|b| b.digits()).collect();
        assert_eq!(digits, [2, 4, 6, 8]);
        assert_eq!(BlockSize::try_from(24).unwrap(), BlockSize::Bits24);
        assert_eq!("32".parse::<BlockSize>().unwrap(), BlockSize::Bits32);
        assert!(matches!(
            BlockSize::try_from(12),
            Err(ConvertError::UnsupportedBlockSize(12))
        ));
        assert!(matches!(
            "12".parse::<BlockSize>(),
            Err(ConvertError::UnsupportedBlockSize(12))
        ));
    }

    #[test]
    fn unparsable_block_size_keeps_input() {
        for bad in ["abc", "", "16 bits", "-8"] {
            match bad.parse::<BlockSize>() {
                Err(ConvertError::InvalidBlockSize(input)) => assert_eq!(input, bad),
                other => panic!("expected InvalidBlockSize for {bad:?}, got {other:?}"),
            }
        }
    }
}
