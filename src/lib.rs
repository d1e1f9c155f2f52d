//! # progmem
//!
//! Packs decoded RGBA frames into fixed-width integers and renders them as
//! C array declarations for embedding in firmware.
//!
//! ## Presets
//!
//! | Preset            | Packing                                   |
//! |-------------------|-------------------------------------------|
//! | `Color RS5G6B5`   | `(R>>3)<<11 \| (G>>2)<<5 \| B>>3`          |
//! | `Color A8R8G8B8`  | `A<<24 \| R<<16 \| G<<8 \| B`              |
//! | `Color R5G5B5`    | `(R>>3)<<10 \| (G>>3)<<5 \| B>>3`          |
//! | `Color R8G8B8`    | `R<<16 \| G<<8 \| B`                       |
//! | `Grayscale 8`     | `0.2989R + 0.5870G + 0.1140B`, truncated   |
//! | `Monochrome`      | 255 if the same luma is `> 128`, else 0    |
//!
//! Packed values are never clamped. The [`BlockSize`] only sets the minimum
//! number of hex digits per literal.
//!
//! ## Non-Goals
//!
//! - Image decoding (frames arrive as decoded pixel buffers)
//! - Resizing, cropping or color correction
//! - Streaming output; the whole declaration is rendered before writing
//!
//! ## Usage
//!
//! ```
//! use progmem::{BlockSize, Declaration, EncodeRequest, Frame, Preset, Unstoppable};
//!
//! let pixels = [255u8, 255, 255, 255, 0, 0, 0, 255]; // 2x1 RGBA
//! let seq = EncodeRequest::new(Preset::Rgb565)
//!     .encode(&Frame::rgba(&pixels, 2, 1), Unstoppable)?;
//!
//! let text = Declaration::new("logo", &seq)
//!     .with_block_size(BlockSize::Bits16)
//!     .render()?;
//! assert_eq!(
//!     text,
//!     "// logo, 2x1\nconst unsigned short logo_Color_RS5G6B5 [] PROGMEM = {\n0xFFFF, 0x0000\n};\n"
//! );
//! # Ok::<(), progmem::ConvertError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod encode;
mod error;
mod limits;
mod naming;
mod pixel;
mod preset;
mod serialize;

#[cfg(feature = "std")]
mod write;

use alloc::string::String;

// Re-exports
pub use encode::{EncodeRequest, EncodedFrame, EncodedSequence, Frame, SequenceKind, encode_frame};
pub use enough::{Stop, Unstoppable};
pub use error::ConvertError;
pub use limits::Limits;
pub use naming::{ANIMATION_SUFFIX, HEADER_EXTENSION, base_name, declaration_name, header_file_name};
pub use pixel::PixelLayout;
pub use preset::{BlockSize, LUMA_B, LUMA_G, LUMA_R, MONOCHROME_THRESHOLD, Preset, luma, threshold};
pub use serialize::{Declaration, hex_literal};

#[cfg(feature = "std")]
pub use write::WriteMode;

/// Encode one still frame.
pub fn encode_still(
    frame: &Frame<'_>,
    preset: Preset,
    stop: impl Stop,
) -> Result<EncodedSequence, ConvertError> {
    EncodeRequest::new(preset).encode(frame, stop)
}

/// Encode the frames of an animation.
pub fn encode_animation(
    frames: &[Frame<'_>],
    preset: Preset,
    stop: impl Stop,
) -> Result<EncodedSequence, ConvertError> {
    EncodeRequest::new(preset).encode_animation(frames, stop)
}

/// Render `sequence` under `base` with the given block size.
pub fn render(
    sequence: &EncodedSequence,
    base: &str,
    block_size: BlockSize,
) -> Result<String, ConvertError> {
    Declaration::new(base, sequence)
        .with_block_size(block_size)
        .render()
}
