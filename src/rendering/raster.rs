//! Raster stage: replay paint commands onto an off-screen RGBA canvas.
//!
//! The canvas is an isolated, owned surface with fixed dimensions. It is
//! allocated, painted, captured to PNG bytes, and discarded; nothing on it
//! is shared with the caller. Glyphs come from the 8x8 bitmap set, scaled
//! per node and by the device pixel ratio.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgba, RgbaImage};

use crate::error::{Error, Result};
use crate::rendering::paint::PaintCommand;
use crate::rendering::CertificateImage;
use crate::{RasterParams, Viewport};

/// QR quiet zone in modules, applied on every side
const QUIET_MODULES: usize = 4;

struct Canvas {
    img: RgbaImage,
    ratio: u32,
}

impl Canvas {
    fn new(viewport: Viewport, params: &RasterParams) -> Self {
        let ratio = params.pixel_ratio.max(1);
        let img = RgbaImage::from_pixel(
            viewport.width * ratio,
            viewport.height * ratio,
            Rgba(params.background),
        );
        Canvas { img, ratio }
    }

    /// Fill a rectangle given in layout coordinates
    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, rgba: (u8, u8, u8, u8)) {
        let r = self.ratio as i64;
        self.fill_device(
            x as i64 * r,
            y as i64 * r,
            width as i64 * r,
            height as i64 * r,
            rgba,
        );
    }

    /// Fill a rectangle given in device coordinates, clamped to the canvas
    fn fill_device(&mut self, x: i64, y: i64, width: i64, height: i64, rgba: (u8, u8, u8, u8)) {
        let (img_w, img_h) = self.img.dimensions();
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = (x + width).clamp(0, img_w as i64) as u32;
        let y1 = (y + height).clamp(0, img_h as i64) as u32;
        let pixel = Rgba([rgba.0, rgba.1, rgba.2, rgba.3]);
        for py in y0..y1 {
            for px in x0..x1 {
                self.img.put_pixel(px, py, pixel);
            }
        }
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, rgba: (u8, u8, u8, u8)) {
        let mut pen = x;
        let cell = (8 * scale) as i32;
        for ch in text.chars() {
            if let Some(glyph) = BASIC_FONTS.get(ch) {
                for (gy, row) in glyph.iter().enumerate() {
                    for gx in 0..8u32 {
                        if row & (1u8 << gx) != 0 {
                            self.fill_rect(
                                pen + (gx * scale) as i32,
                                y + (gy as u32 * scale) as i32,
                                scale,
                                scale,
                                rgba,
                            );
                        }
                    }
                }
            }
            pen += cell;
        }
    }

    fn draw_qr(&mut self, x: i32, y: i32, side: u32, matrix: &crate::qr::QrMatrix) {
        let total = (matrix.width() + 2 * QUIET_MODULES) as i64;
        let r = self.ratio as i64;
        let side_dev = side as i64 * r;
        let module = (side_dev / total).max(1);
        let content = module * total;
        let off_x = x as i64 * r + (side_dev - content) / 2;
        let off_y = y as i64 * r + (side_dev - content) / 2;

        self.fill_device(off_x, off_y, content, content, super::paint::WHITE);
        for my in 0..matrix.width() {
            for mx in 0..matrix.width() {
                if matrix.module(mx, my) {
                    self.fill_device(
                        off_x + (QUIET_MODULES + mx) as i64 * module,
                        off_y + (QUIET_MODULES + my) as i64 * module,
                        module,
                        module,
                        super::paint::BLACK,
                    );
                }
            }
        }
    }

    /// Capture the surface to PNG bytes; the canvas is consumed and dropped.
    fn capture(self) -> Result<CertificateImage> {
        let (width, height) = self.img.dimensions();
        let mut png_data = Vec::new();
        image::DynamicImage::ImageRgba8(self.img)
            .write_to(
                &mut std::io::Cursor::new(&mut png_data),
                image::ImageOutputFormat::Png,
            )
            .map_err(|e| Error::RenderError(format!("PNG encode failed: {e}")))?;
        Ok(CertificateImage {
            width,
            height,
            png_data,
        })
    }
}

/// Replay paint commands onto a fresh canvas and capture the result.
pub fn rasterize(
    commands: &[PaintCommand],
    viewport: Viewport,
    params: &RasterParams,
) -> Result<CertificateImage> {
    let mut canvas = Canvas::new(viewport, params);
    for command in commands {
        match command {
            PaintCommand::SolidRect {
                x,
                y,
                width,
                height,
                rgba,
            } => canvas.fill_rect(*x, *y, *width, *height, *rgba),
            PaintCommand::Text {
                x,
                y,
                text,
                scale,
                rgba,
            } => canvas.draw_text(*x, *y, text, *scale, *rgba),
            PaintCommand::QrModules { x, y, side, matrix } => {
                canvas.draw_qr(*x, *y, *side, matrix)
            }
        }
    }
    canvas.capture()
}
