use std::io::Cursor;

use image::{GrayImage, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::error::{AppError, AppResult};

const CANVAS_SIZE: u32 = 1080;
const QUIET_ZONE_MODULES: u32 = 4;

/// Rasterize the webhook URL into a scannable PNG: black modules on a
/// fixed 1080x1080 white canvas, centered, with a 4-module quiet zone.
pub fn qr_png(data: &str) -> AppResult<Vec<u8>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
        .map_err(|e| AppError::RenderError(format!("QR encoding failed: {e}")))?;

    let width = code.width() as u32;
    let colors = code.to_colors();

    let total_modules = width + 2 * QUIET_ZONE_MODULES;
    let module_px = CANVAS_SIZE / total_modules;
    if module_px == 0 {
        return Err(AppError::RenderError(
            "QR payload too large for canvas".to_string(),
        ));
    }
    // center the drawn area, quiet zone included
    let origin = (CANVAS_SIZE - module_px * width) / 2;

    let mut canvas = GrayImage::from_pixel(CANVAS_SIZE, CANVAS_SIZE, Luma([255u8]));
    for my in 0..width {
        for mx in 0..width {
            if colors[(my * width + mx) as usize] == Color::Dark {
                let x0 = origin + mx * module_px;
                let y0 = origin + my * module_px;
                for y in y0..y0 + module_px {
                    for x in x0..x0 + module_px {
                        canvas.put_pixel(x, y, Luma([0u8]));
                    }
                }
            }
        }
    }

    let mut bytes = Vec::new();
    image::DynamicImage::ImageLuma8(canvas)
        .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| AppError::RenderError(format!("PNG encoding failed: {e}")))?;
    Ok(bytes)
}

/// Download name for a rendered QR artifact.
pub fn qr_filename(label: &str, timestamp_millis: i64) -> String {
    format!("qrcode_{label}_{timestamp_millis}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_png_is_png_with_expected_dimensions() {
        let bytes = qr_png("https://req.iszap.com.br/webhook/criador-links-qrcode?id=abc")
            .expect("render");
        // PNG signature
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

        let img = image::load_from_memory(&bytes).expect("decode");
        assert_eq!(img.width(), 1080);
        assert_eq!(img.height(), 1080);
    }

    #[test]
    fn test_qr_filename() {
        assert_eq!(
            qr_filename("e4f1", 1735689600000),
            "qrcode_e4f1_1735689600000.png"
        );
    }
}
