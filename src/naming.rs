//! Identifier and file names derived from the source file name.

use alloc::format;
use alloc::string::String;

use crate::encode::SequenceKind;
use crate::preset::Preset;

/// Suffix appended to animation declaration names.
pub const ANIMATION_SUFFIX: &str = "_Gif";

/// Extension of generated header files.
pub const HEADER_EXTENSION: &str = "h";

/// Base name of a source file: no directories, no last extension, and
/// spaces replaced by underscores.
///
/// ```
/// assert_eq!(progmem::base_name("assets/boot logo.png"), "boot_logo");
/// assert_eq!(progmem::base_name("C:\\img\\run.cycle.gif"), "run.cycle");
/// assert_eq!(progmem::base_name(".hidden"), ".hidden");
/// ```
pub fn base_name(file_name: &str) -> String {
    let file = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = match file.rfind('.') {
        // a leading dot names a hidden file, not an extension
        Some(dot) if file[..dot].trim_start_matches('.').is_empty() => file,
        Some(dot) => &file[..dot],
        None => file,
    };
    stem.replace(' ', "_")
}

/// C identifier of the declaration: `<base>_<preset>` plus `_Gif` for animations.
pub fn declaration_name(base: &str, preset: Preset, kind: SequenceKind) -> String {
    match kind {
        SequenceKind::Still => format!("{base}_{}", preset.identifier()),
        SequenceKind::Animation => format!("{base}_{}{ANIMATION_SUFFIX}", preset.identifier()),
    }
}

/// Header file name for a declaration name.
pub fn header_file_name(declaration: &str) -> String {
    format!("{declaration}.{HEADER_EXTENSION}")
}
