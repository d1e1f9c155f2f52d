//! Rendering encoded sequences as C array declarations.
//!
//! Stills render as a flat array:
//!
//! ```text
//! // <base>, <W>x<H>
//! const unsigned short <name> [] PROGMEM = {
//! 0x0000, 0x0000,
//! 0x0000, 0x0000
//! };
//! ```
//!
//! Animations render as a frame-indexed array, one braced block per frame:
//!
//! ```text
//! // <base>, <W>x<H>
//! const unsigned short PROGMEM <name>[][<frames>][<pixels>] = {
//! {
//! 0x0000, 0x0000
//! },
//! {
//! 0x0000, 0x0000
//! }
//! };
//! ```
//!
//! Each row after the first starts on a new line; the `", "` after the last
//! value of the previous row is kept. Literals are zero-padded to at least
//! [`BlockSize::digits`] uppercase hex digits and never truncated.

use alloc::string::String;
use core::fmt;

use crate::encode::{EncodedSequence, SequenceKind};
use crate::error::ConvertError;
use crate::limits::Limits;
use crate::naming;
use crate::preset::BlockSize;

/// A named declaration ready to render.
#[derive(Clone, Debug)]
pub struct Declaration<'a> {
    base: String,
    name: String,
    block_size: BlockSize,
    sequence: &'a EncodedSequence,
    limits: Option<&'a Limits>,
}

impl<'a> Declaration<'a> {
    /// Declare `sequence` under the base name `base` (spaces become underscores).
    ///
    /// The identifier follows [`naming::declaration_name`].
    pub fn new(base: &str, sequence: &'a EncodedSequence) -> Self {
        let base = base.replace(' ', "_");
        let name = naming::declaration_name(&base, sequence.preset(), sequence.kind());
        Self {
            base,
            name,
            block_size: BlockSize::default(),
            sequence,
            limits: None,
        }
    }

    pub fn with_block_size(mut self, block_size: BlockSize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// C identifier of the array.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base name recorded in the leading comment.
    pub fn base_name(&self) -> &str {
        &self.base
    }

    pub fn block_size(&self) -> BlockSize {
        self.block_size
    }

    pub fn sequence(&self) -> &EncodedSequence {
        self.sequence
    }

    /// Default header file name, `<name>.h`.
    pub fn file_name(&self) -> String {
        naming::header_file_name(&self.name)
    }

    /// Upper bound on the rendered length in bytes.
    pub fn estimated_len(&self) -> usize {
        let seq = self.sequence;
        let value_digits = self
            .block_size
            .digits()
            .max(seq.preset().bits().div_ceil(4) as usize);
        let per_value = 2 + value_digits + 2;
        let per_frame = seq.pixels_per_frame() * per_value + seq.height() as usize + 6;
        let header = 2 * self.name.len() + 96;
        header + per_frame * seq.frame_count()
    }

    /// Render into a `String`, checking the output limit first.
    pub fn render(&self) -> Result<String, ConvertError> {
        let estimate = self.estimated_len();
        if let Some(limits) = self.limits {
            limits.check_output(estimate)?;
        }
        let mut out = String::with_capacity(estimate);
        // writing into a String cannot fail
        let _ = self.render_into(&mut out);
        log::debug!(
            "rendered {} ({} frames, {} bytes)",
            self.name,
            self.sequence.frame_count(),
            out.len()
        );
        Ok(out)
    }

    /// Render into any [`fmt::Write`] sink.
    pub fn render_into<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        let seq = self.sequence;
        writeln!(out, "// {}, {}x{}", self.base, seq.width(), seq.height())?;
        match seq.kind() {
            SequenceKind::Still => {
                writeln!(out, "const unsigned short {} [] PROGMEM = {{", self.name)?;
                // a still holds exactly one frame
                if let Some(frame) = seq.frames().first() {
                    write_values(out, frame.values(), frame.width() as usize, self.block_size)?;
                }
            }
            SequenceKind::Animation => {
                writeln!(
                    out,
                    "const unsigned short PROGMEM {}[][{}][{}] = {{",
                    self.name,
                    seq.frame_count(),
                    seq.pixels_per_frame()
                )?;
                let last = seq.frame_count().saturating_sub(1);
                for (i, frame) in seq.frames().iter().enumerate() {
                    out.write_str("{\n")?;
                    write_values(out, frame.values(), frame.width() as usize, self.block_size)?;
                    out.write_str("\n}")?;
                    if i < last {
                        out.write_str(",\n")?;
                    }
                }
            }
        }
        out.write_str("\n};\n")
    }
}

impl fmt::Display for Declaration<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render_into(f)
    }
}

/// `0x` plus uppercase hex, zero-padded to at least `block_size.digits()`.
pub fn hex_literal(value: u32, block_size: BlockSize) -> String {
    let mut out = String::new();
    let _ = write_literal(&mut out, value, block_size.digits());
    out
}

#[inline]
fn write_literal<W: fmt::Write>(out: &mut W, value: u32, digits: usize) -> fmt::Result {
    write!(out, "0x{value:0digits$X}")
}

/// Comma-separated literals with a line break before each row but the first.
fn write_values<W: fmt::Write>(
    out: &mut W,
    values: &[u32],
    width: usize,
    block_size: BlockSize,
) -> fmt::Result {
    let digits = block_size.digits();
    let width = width.max(1);
    let last = values.len().saturating_sub(1);
    for (i, &value) in values.iter().enumerate() {
        if i > 0 && i % width == 0 {
            out.write_char('\n')?;
        }
        write_literal(out, value, digits)?;
        if i < last {
            out.write_str(", ")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{EncodeRequest, Frame};
    use crate::preset::Preset;
    use alloc::vec::Vec;
    use enough::Unstoppable;

    fn gray_frame(values: &[u8]) -> Vec<u8> {
        values.iter().flat_map(|&v| [v, v, v, 255]).collect()
    }

    #[test]
    fn padding_is_a_minimum() {
        assert_eq!(hex_literal(5, BlockSize::Bits16), "0x0005");
        assert_eq!(hex_literal(0x1FFFF, BlockSize::Bits16), "0x1FFFF");
        assert_eq!(hex_literal(0xAB, BlockSize::Bits8), "0xAB");
        assert_eq!(hex_literal(0xFF0080, BlockSize::Bits32), "0x00FF0080");
        assert_eq!(hex_literal(0x10FF0080, BlockSize::Bits8), "0x10FF0080");
    }

    #[test]
    fn still_layout() {
        let pixels = [255u8, 255, 255, 0, 0, 0, 0, 0, 255, 0, 0, 0, 0, 0, 255, 0];
        let seq = EncodeRequest::new(Preset::Rgb565)
            .encode(&Frame::rgba(&pixels, 2, 2), Unstoppable)
            .unwrap();
        let text = Declaration::new("logo", &seq)
            .with_block_size(BlockSize::Bits16)
            .render()
            .unwrap();
        assert_eq!(
            text,
            "// logo, 2x2\n\
             const unsigned short logo_Color_RS5G6B5 [] PROGMEM = {\n\
             0xFFFF, 0x0000, \n\
             0xF800, 0x001F\n\
             };\n"
        );
    }

    #[test]
    fn animation_layout() {
        let a = gray_frame(&[0, 255]);
        let b = gray_frame(&[255, 0]);
        let frames = [Frame::rgba(&a, 2, 1), Frame::rgba(&b, 2, 1)];
        let seq = EncodeRequest::new(Preset::Monochrome)
            .encode_animation(&frames, Unstoppable)
            .unwrap();
        let text = Declaration::new("blink", &seq)
            .with_block_size(BlockSize::Bits8)
            .render()
            .unwrap();
        assert_eq!(
            text,
            "// blink, 2x1\n\
             const unsigned short PROGMEM blink_Monochrome_Gif[][2][2] = {\n\
             {\n\
             0x00, 0xFF\n\
             },\n\
             {\n\
             0xFF, 0x00\n\
             }\n\
             };\n"
        );
    }

    #[test]
    fn display_matches_render() {
        let pixels = gray_frame(&[1, 2, 3]);
        let seq = EncodeRequest::new(Preset::Rgb888)
            .encode(&Frame::rgba(&pixels, 3, 1), Unstoppable)
            .unwrap();
        let decl = Declaration::new("a b", &seq).with_block_size(BlockSize::Bits24);
        assert_eq!(decl.name(), "a_b_Color_R8G8B8");
        assert_eq!(decl.base_name(), "a_b");
        assert_eq!(alloc::format!("{decl}"), decl.render().unwrap());
    }

    #[test]
    fn estimate_covers_output() {
        let pixels = gray_frame(&[255; 12]);
        for preset in Preset::ALL {
            for block_size in BlockSize::ALL {
                let seq = EncodeRequest::new(preset)
                    .encode(&Frame::rgba(&pixels, 4, 3), Unstoppable)
                    .unwrap();
                let decl = Declaration::new("x", &seq).with_block_size(block_size);
                assert!(decl.render().unwrap().len() <= decl.estimated_len());
            }
        }
    }

    #[test]
    fn declared_dimensions_match_frames() {
        let a = gray_frame(&[0, 64, 128, 255]);
        let frames = [Frame::rgba(&a, 2, 2), Frame::rgba(&a, 2, 2)];
        let seq = EncodeRequest::new(Preset::Gray8)
            .encode_animation(&frames, Unstoppable)
            .unwrap();
        let text = Declaration::new("p", &seq)
            .with_block_size(BlockSize::Bits8)
            .render()
            .unwrap();
        assert!(text.contains("p_Grayscale_8_Gif[][2][4] = {\n"));
        assert_eq!(text.matches("0x").count(), 8);
        assert!(!text.contains("0x000x"));
    }

    #[test]
    fn output_limit() {
        let pixels = gray_frame(&[0; 64]);
        let seq = EncodeRequest::new(Preset::Gray8)
            .encode(&Frame::rgba(&pixels, 8, 8), Unstoppable)
            .unwrap();
        let limits = Limits {
            max_output_bytes: Some(32),
            ..Default::default()
        };
        let result = Declaration::new("big", &seq).with_limits(&limits).render();
        assert!(matches!(result, Err(ConvertError::LimitExceeded(_))));
    }
}
