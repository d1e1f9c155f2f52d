use alloc::borrow::Cow;
use alloc::vec::Vec;
use enough::Stop;

use crate::error::ConvertError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::preset::Preset;

/// One input frame. Pixels may be borrowed (zero-copy) or owned.
#[derive(Clone, Debug)]
pub struct Frame<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
}

impl<'a> Frame<'a> {
    /// Borrow a raw pixel buffer in the given layout.
    pub fn new(pixels: &'a [u8], width: u32, height: u32, layout: PixelLayout) -> Self {
        Self {
            pixels: Cow::Borrowed(pixels),
            width,
            height,
            layout,
        }
    }

    /// Borrow a tightly packed RGBA8 buffer.
    pub fn rgba(pixels: &'a [u8], width: u32, height: u32) -> Self {
        Self::new(pixels, width, height, PixelLayout::Rgba8)
    }

    /// Take ownership of a raw pixel buffer.
    pub fn from_vec(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        layout: PixelLayout,
    ) -> Frame<'static> {
        Frame {
            pixels: Cow::Owned(pixels),
            width,
            height,
            layout,
        }
    }

    /// Borrow typed RGBA8 pixels.
    #[cfg(feature = "rgb")]
    pub fn from_rgba8(pixels: &'a [rgb::RGBA8], width: u32, height: u32) -> Self {
        use rgb::ComponentBytes as _;
        Self::new(pixels.as_bytes(), width, height, PixelLayout::Rgba8)
    }

    /// View an [`imgref::ImgRef`] of RGBA8 pixels.
    ///
    /// Contiguous images are borrowed; strided images are compacted into an
    /// owned buffer.
    #[cfg(feature = "imgref")]
    pub fn from_imgref(img: imgref::ImgRef<'a, rgb::RGBA8>) -> Self {
        use rgb::ComponentBytes as _;
        let width = img.width() as u32;
        let height = img.height() as u32;
        if img.stride() == img.width() {
            let buf: &'a [rgb::RGBA8] = *img.buf();
            let len = img.width() * img.height();
            return Self::new(buf[..len].as_bytes(), width, height, PixelLayout::Rgba8);
        }
        let mut packed = Vec::with_capacity(img.width() * img.height() * 4);
        for row in img.rows() {
            packed.extend_from_slice(row.as_bytes());
        }
        Frame::from_vec(packed, width, height, PixelLayout::Rgba8)
    }

    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Whether the pixel data is borrowed from the caller.
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    /// Validate dimensions and buffer length; returns the pixel count.
    fn check(&self) -> Result<usize, ConvertError> {
        let (width, height) = (self.width, self.height);
        if width == 0 || height == 0 {
            return Err(ConvertError::EmptyFrame { width, height });
        }
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or(ConvertError::DimensionsTooLarge { width, height })?;
        let needed = count
            .checked_mul(self.layout.bytes_per_pixel())
            .ok_or(ConvertError::DimensionsTooLarge { width, height })?;
        if self.pixels.len() < needed {
            return Err(ConvertError::BufferTooSmall {
                needed,
                actual: self.pixels.len(),
            });
        }
        Ok(count)
    }
}

/// Packed values of one frame, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedFrame {
    values: Vec<u32>,
    width: u32,
    height: u32,
}

impl EncodedFrame {
    pub fn values(&self) -> &[u32] {
        &self.values
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn into_values(self) -> Vec<u32> {
        self.values
    }

    /// Number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Whether a sequence renders as a flat array or a frame-indexed array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequenceKind {
    /// Single image, flat `[]` array.
    Still,
    /// Animation, `[][frames][pixels]` array. Used even for one frame.
    Animation,
}

/// Ordered encoded frames sharing one size and preset.
///
/// A still holds exactly one frame; an animation holds one or more.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedSequence {
    frames: Vec<EncodedFrame>,
    width: u32,
    height: u32,
    preset: Preset,
    kind: SequenceKind,
}

impl EncodedSequence {
    /// Assemble frames produced by [`encode_frame`].
    ///
    /// Fails with `EmptySequence` for no frames, `FrameSizeMismatch` when a
    /// frame differs from the first, and `StillFrameCount` when a still holds
    /// more than one frame.
    pub fn from_frames(
        frames: Vec<EncodedFrame>,
        preset: Preset,
        kind: SequenceKind,
    ) -> Result<Self, ConvertError> {
        let first = frames.first().ok_or(ConvertError::EmptySequence)?;
        let expected = (first.width, first.height);
        if kind == SequenceKind::Still && frames.len() != 1 {
            return Err(ConvertError::StillFrameCount(frames.len()));
        }
        if let Some(frame) = frames.iter().find(|f| (f.width, f.height) != expected) {
            return Err(ConvertError::FrameSizeMismatch {
                expected,
                actual: (frame.width, frame.height),
            });
        }
        Ok(Self {
            frames,
            width: expected.0,
            height: expected.1,
            preset,
            kind,
        })
    }

    pub fn frames(&self) -> &[EncodedFrame] {
        &self.frames
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Pixels in each frame, as encoded.
    pub fn pixels_per_frame(&self) -> usize {
        self.frames.first().map_or(0, EncodedFrame::len)
    }

    pub fn is_animation(&self) -> bool {
        self.kind == SequenceKind::Animation
    }
}

/// Builder for encoding frames with a preset.
///
/// ```
/// use progmem::{EncodeRequest, Frame, Preset, Unstoppable};
///
/// let pixels = [255u8, 0, 128, 16];
/// let seq = EncodeRequest::new(Preset::Rgb888)
///     .encode(&Frame::rgba(&pixels, 1, 1), Unstoppable)?;
/// assert_eq!(seq.frames()[0].values(), &[0xFF0080]);
/// # Ok::<(), progmem::ConvertError>(())
/// ```
#[derive(Clone, Debug)]
pub struct EncodeRequest<'l> {
    preset: Preset,
    limits: Option<&'l Limits>,
}

impl<'l> EncodeRequest<'l> {
    pub fn new(preset: Preset) -> Self {
        Self {
            preset,
            limits: None,
        }
    }

    pub fn with_limits(mut self, limits: &'l Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    /// Encode a still image.
    pub fn encode(
        &self,
        frame: &Frame<'_>,
        stop: impl Stop,
    ) -> Result<EncodedSequence, ConvertError> {
        let encoded = self.encode_one(frame, &stop)?;
        log::debug!(
            "encoded {}x{} still as {}",
            frame.width,
            frame.height,
            self.preset
        );
        EncodedSequence::from_frames(alloc::vec![encoded], self.preset, SequenceKind::Still)
    }

    /// Encode an animation. All frames must share the first frame's size.
    pub fn encode_animation(
        &self,
        frames: &[Frame<'_>],
        stop: impl Stop,
    ) -> Result<EncodedSequence, ConvertError> {
        let first = frames.first().ok_or(ConvertError::EmptySequence)?;
        if let Some(limits) = self.limits {
            limits.check_frames(frames.len())?;
        }
        let expected = (first.width, first.height);
        let mut encoded = Vec::with_capacity(frames.len());
        for frame in frames {
            let actual = (frame.width, frame.height);
            if actual != expected {
                return Err(ConvertError::FrameSizeMismatch { expected, actual });
            }
            encoded.push(self.encode_one(frame, &stop)?);
        }
        log::debug!(
            "encoded {}x{} animation of {} frames as {}",
            expected.0,
            expected.1,
            encoded.len(),
            self.preset
        );
        EncodedSequence::from_frames(encoded, self.preset, SequenceKind::Animation)
    }

    fn encode_one(
        &self,
        frame: &Frame<'_>,
        stop: &dyn Stop,
    ) -> Result<EncodedFrame, ConvertError> {
        if let Some(limits) = self.limits {
            limits.check(frame.width, frame.height)?;
        }
        encode_frame(frame, self.preset, stop)
    }
}

/// Pack every pixel of `frame` with `preset`, row-major.
pub fn encode_frame(
    frame: &Frame<'_>,
    preset: Preset,
    stop: &dyn Stop,
) -> Result<EncodedFrame, ConvertError> {
    let count = frame.check()?;
    let bpp = frame.layout.bytes_per_pixel();
    let row_bytes = frame.width as usize * bpp;

    stop.check()?;

    let mut values = Vec::with_capacity(count);
    let rows = frame.pixels()[..count * bpp].chunks_exact(row_bytes);
    for (row_idx, row) in rows.enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        values.extend(
            row.chunks_exact(bpp)
                .map(|px| preset.pack(frame.layout.read_rgba(px))),
        );
    }

    Ok(EncodedFrame {
        values,
        width: frame.width,
        height: frame.height,
    })
}
