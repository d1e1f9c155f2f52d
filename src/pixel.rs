/// Pixel memory layout of a caller-supplied frame buffer.
///
/// Every layout is read as an RGBA quadruple before packing.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
    /// 3 channels, 8-bit RGB (alpha reads as 255).
    Rgb8,
    /// 3 channels, 8-bit BGR (alpha reads as 255).
    Bgr8,
    /// Single channel, 8-bit grayscale (replicated into R, G and B; alpha 255).
    Gray8,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Read one pixel as `[r, g, b, a]`.
    ///
    /// `px` must hold at least [`bytes_per_pixel`](Self::bytes_per_pixel) bytes.
    #[inline]
    pub(crate) fn read_rgba(&self, px: &[u8]) -> [u8; 4] {
        match self {
            Self::Rgba8 => [px[0], px[1], px[2], px[3]],
            Self::Bgra8 => [px[2], px[1], px[0], px[3]],
            Self::Rgb8 => [px[0], px[1], px[2], 255],
            Self::Bgr8 => [px[2], px[1], px[0], 255],
            Self::Gray8 => [px[0], px[0], px[0], 255],
        }
    }
}
