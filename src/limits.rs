use crate::error::ConvertError;

/// Resource limits for encoding and rendering.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count per frame (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum number of frames in an animation.
    pub max_frames: Option<u64>,
    /// Maximum size in bytes of the rendered declaration text.
    pub max_output_bytes: Option<u64>,
}

impl Limits {
    /// Check frame dimensions against limits.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), ConvertError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(ConvertError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(ConvertError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(ConvertError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn check_frames(&self, frames: usize) -> Result<(), ConvertError> {
        if let Some(max_frames) = self.max_frames {
            if frames as u64 > max_frames {
                return Err(ConvertError::LimitExceeded(alloc::format!(
                    "frame count {frames} exceeds limit {max_frames}"
                )));
            }
        }
        Ok(())
    }

    /// Check the estimated rendered size against the output limit.
    pub(crate) fn check_output(&self, bytes: usize) -> Result<(), ConvertError> {
        if let Some(max_out) = self.max_output_bytes {
            if bytes as u64 > max_out {
                return Err(ConvertError::LimitExceeded(alloc::format!(
                    "declaration of {bytes} bytes exceeds output limit {max_out}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unlimited() {
        let limits = Limits::default();
        assert!(limits.check(u32::MAX, u32::MAX).is_ok());
        assert!(limits.check_frames(usize::MAX).is_ok());
        assert!(limits.check_output(usize::MAX).is_ok());
    }

    #[test]
    fn pixel_limit_uses_product() {
        let limits = Limits {
            max_pixels: Some(16),
            ..Default::default()
        };
        assert!(limits.check(4, 4).is_ok());
        assert!(matches!(
            limits.check(4, 5),
            Err(ConvertError::LimitExceeded(_))
        ));
    }

    #[test]
    fn frame_limit() {
        let limits = Limits {
            max_frames: Some(2),
            ..Default::default()
        };
        assert!(limits.check_frames(2).is_ok());
        assert!(limits.check_frames(3).is_err());
    }
}
