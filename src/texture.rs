// texture.rs — CPU-side RGB pixel buffers and the cross-fade blend

use image::{imageops, RgbImage};

/// Decoded panorama pixels: interleaved 8-bit RGB, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl TextureBuffer {
    /// Wraps raw RGB bytes. Returns `None` when the length does not match `width * height * 3`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize * 3).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A single-colour buffer, mostly useful for placeholders and tests.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let pixels = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    pub fn into_image(self) -> RgbImage {
        // Length is checked on every construction path.
        RgbImage::from_raw(self.width, self.height, self.pixels)
            .unwrap_or_else(|| RgbImage::new(0, 0))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bilinear resample to exactly `width` x `height`.
    pub fn resized(&self, width: u32, height: u32) -> Self {
        if self.dimensions() == (width, height) {
            return self.clone();
        }
        let img = self.clone().into_image();
        Self::from_image(imageops::resize(&img, width, height, imageops::FilterType::Triangle))
    }

    /// Shrinks the buffer so neither side exceeds `max_dim`, keeping the aspect ratio.
    pub fn fit_within(self, max_dim: u32) -> Self {
        let (w, h) = self.dimensions();
        if w <= max_dim && h <= max_dim {
            return self;
        }
        let scale = max_dim as f32 / w.max(h) as f32;
        let new_w = ((w as f32 * scale) as u32).max(1);
        let new_h = ((h as f32 * scale) as u32).max(1);
        let img = self.into_image();
        Self::from_image(imageops::resize(&img, new_w, new_h, imageops::FilterType::Lanczos3))
    }

    /// Expands RGB to RGBA (opaque) into `out`, reusing its allocation.
    pub fn write_rgba(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            out.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
    }
}

/// Per-channel linear interpolation `from * (1 - progress) + to * progress`.
///
/// Both buffers must share dimensions; `to` decides the output size and any
/// mismatched `from` is resampled first.
pub fn blend(from: &TextureBuffer, to: &TextureBuffer, progress: f32) -> TextureBuffer {
    let progress = progress.clamp(0.0, 1.0);
    let resampled;
    let from = if from.dimensions() == to.dimensions() {
        from
    } else {
        resampled = from.resized(to.width, to.height);
        &resampled
    };

    let pixels = from
        .pixels
        .iter()
        .zip(&to.pixels)
        .map(|(&a, &b)| {
            let a = a as f32;
            let b = b as f32;
            (a + (b - a) * progress).round() as u8
        })
        .collect();

    TextureBuffer {
        width: to.width,
        height: to.height,
        pixels,
    }
}
