//! QR payload encoding.
//!
//! Only the module matrix is taken from the QR library; the renderer paints
//! the modules itself, so the surface stays a single raster pass.

use qrcode::types::Color;
use qrcode::QrCode;

use crate::error::Result;

pub use qrcode::EcLevel;

/// A QR module matrix: `width` x `width` booleans, `true` for dark modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Side length in modules (quiet zone not included)
    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the module at `(x, y)` is dark
    pub fn module(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.width + x]
    }
}

/// Encode a payload at the requested error-correction level.
pub fn encode(payload: &str, level: EcLevel) -> Result<QrMatrix> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), level)?;
    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|c| c == Color::Dark)
        .collect();
    Ok(QrMatrix { width, modules })
}
