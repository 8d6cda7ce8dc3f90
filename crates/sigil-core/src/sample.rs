//! Grayscale patch access and the luminance sampling seam.
//!
//! The decoder never touches raw video frames. An external collaborator
//! warps the detected triangle into the canonical frame and hands the core
//! something that can answer "how bright is it around (x, y)?" — the
//! [`LuminanceSampler`] trait. [`PatchSampler`] is the shipped
//! implementation over a borrowed grayscale patch.

/// Borrowed view of a row-major grayscale patch.
#[derive(Clone, Copy, Debug)]
pub struct GrayPatchView<'a> {
    pub width: usize,
    pub height: usize,
    /// Row-major, `len = width * height`.
    pub data: &'a [u8],
}

/// Owned row-major grayscale patch.
#[derive(Clone, Debug)]
pub struct GrayPatch {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayPatch {
    /// Uniform patch of the given value.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }

    #[inline]
    pub fn view(&self) -> GrayPatchView<'_> {
        GrayPatchView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Luminance source over the canonical patch.
///
/// `radius` is an averaging radius in canonical pixels; implementations
/// return an area-averaged value, not a single-pixel read, so quantization
/// and resampling noise average out.
pub trait LuminanceSampler {
    fn sample(&self, x: f32, y: f32, radius: f32) -> u8;
}

#[derive(thiserror::Error, Debug)]
pub enum PatchSamplerError {
    #[error("patch data length {got} does not match {width}x{height}")]
    SizeMismatch {
        width: usize,
        height: usize,
        got: usize,
    },
    #[error("patch has zero area")]
    Empty,
}

/// Area-averaging sampler over a borrowed grayscale patch.
///
/// Reads outside the patch clamp to the border, so averaging windows that
/// spill past the edge reuse edge pixels instead of inventing black.
#[derive(Clone, Copy, Debug)]
pub struct PatchSampler<'a> {
    patch: GrayPatchView<'a>,
}

impl<'a> PatchSampler<'a> {
    pub fn new(patch: GrayPatchView<'a>) -> Result<Self, PatchSamplerError> {
        if patch.width == 0 || patch.height == 0 {
            return Err(PatchSamplerError::Empty);
        }
        if patch.data.len() != patch.width * patch.height {
            return Err(PatchSamplerError::SizeMismatch {
                width: patch.width,
                height: patch.height,
                got: patch.data.len(),
            });
        }
        Ok(Self { patch })
    }
}

impl LuminanceSampler for PatchSampler<'_> {
    fn sample(&self, x: f32, y: f32, radius: f32) -> u8 {
        let r = radius.max(0.0).round() as i32;
        let cx = x.floor() as i32;
        let cy = y.floor() as i32;
        let mut sum = 0u32;
        let mut count = 0u32;
        for dy in -r..=r {
            for dx in -r..=r {
                sum += get_clamped(&self.patch, cx + dx, cy + dy) as u32;
                count += 1;
            }
        }
        (sum / count.max(1)) as u8
    }
}

#[inline]
fn get_clamped(p: &GrayPatchView<'_>, x: i32, y: i32) -> u8 {
    let x = x.clamp(0, p.width as i32 - 1) as usize;
    let y = y.clamp(0, p.height as i32 - 1) as usize;
    p.data[y * p.width + x]
}
