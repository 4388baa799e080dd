//! Rasterizer for the board display list

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb as Pixel, RgbImage};

use crate::rendering::paint::PaintCommand;
use crate::{Error, Result};

/// Paint `cmds` in order onto a `width` x `height` canvas.
pub fn rasterize(width: u32, height: u32, cmds: &[PaintCommand]) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for cmd in cmds {
        match cmd {
            PaintCommand::SolidRect { rect, rgb, alpha } => {
                let x0 = rect.x.max(0) as u32;
                let y0 = rect.y.max(0) as u32;
                let x1 = (rect.x.saturating_add(rect.width as i32)).clamp(0, width as i32) as u32;
                let y1 = (rect.y.saturating_add(rect.height as i32)).clamp(0, height as i32) as u32;
                for y in y0..y1 {
                    for x in x0..x1 {
                        let dst = img.get_pixel_mut(x, y);
                        *dst = blend(*dst, rgb.channels(), *alpha);
                    }
                }
            }
        }
    }
    img
}

fn blend(dst: Pixel<u8>, src: [u8; 3], alpha: u8) -> Pixel<u8> {
    if alpha == 255 {
        return Pixel(src);
    }
    let a = alpha as u16;
    let mix = |s: u8, d: u8| ((s as u16 * a + d as u16 * (255 - a)) / 255) as u8;
    Pixel([mix(src[0], dst[0]), mix(src[1], dst[1]), mix(src[2], dst[2])])
}

pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    JpegEncoder::new_with_quality(&mut out, quality.clamp(1, 100))
        .encode_image(img)
        .map_err(|e| Error::ExportError(format!("JPEG encoding failed: {}", e)))?;
    Ok(out)
}
