//! Plotcert
//!
//! A plot allotment certificate toolkit: build an allotment record, render a
//! printable A4-landscape certificate with an embedded verification QR code,
//! export it to PNG/PDF or the platform print spooler, and decode
//! verification links back into a read-only report.
//!
//! The two flows share one data contract passed by value through a URL.
//! There is no backend, no persistence, and no signature. A verification
//! link merely re-parses the data that was embedded, unsigned, in the QR
//! payload; see the README for the implications.
//!
//! # Example
//!
//! ```
//! use plotcert::{AllotmentRecord, CertificateConfig, PlotSize};
//!
//! # fn main() -> plotcert::Result<()> {
//! let record = AllotmentRecord {
//!     full_name: "A Khan".to_string(),
//!     cnic: "12345-1234567-1".to_string(),
//!     phone: "0300-0000000".to_string(),
//!     plot_no: "A-12".to_string(),
//!     plot_size: PlotSize::Marla10,
//!     ..Default::default()
//! };
//!
//! let config = CertificateConfig::default();
//! let issued = plotcert::issue(&record, &config)?;
//! assert!(issued.verification_url.as_str().contains("data="));
//! assert!(!issued.image.png_data.is_empty());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod record;
pub use record::{AllotmentRecord, DecodedRecord, PlotSize};

pub mod link;
pub mod qr;
pub mod rendering;
pub mod verify;

pub mod export;

// Async-friendly export facade (worker-thread backed, one export in flight)
#[cfg(feature = "pdf")]
pub mod async_api;
#[cfg(feature = "pdf")]
pub use async_api::ExportHandle;

use rendering::CertificateImage;

/// A4 landscape page width in millimetres
pub const PAGE_WIDTH_MM: f64 = 297.0;
/// A4 landscape page height in millimetres
pub const PAGE_HEIGHT_MM: f64 = 210.0;

/// Certificate page size in layout pixels
///
/// Defaults to A4 landscape at the 96 dpi base the layout is computed in;
/// the raster stage multiplies by [`RasterParams::pixel_ratio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1123,
            height: 794,
        }
    }
}

/// Rasterization parameters for the certificate surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterParams {
    /// Device-pixel multiplier applied to the layout viewport
    pub pixel_ratio: u32,
    /// Page background, RGBA
    pub background: [u8; 4],
}

impl Default for RasterParams {
    fn default() -> Self {
        Self {
            pixel_ratio: 3,
            background: [0xff, 0xfd, 0xfa, 0xff],
        }
    }
}

/// Configuration for certificate issuance
///
/// The defaults reproduce the issuing organization's house style: A4
/// landscape at pixel ratio 3 on the warm-white background, QR codes at
/// error-correction level H.
#[derive(Debug, Clone)]
pub struct CertificateConfig {
    /// Issuing organization, shown on the masthead and the report footer
    pub organization: String,
    /// Verification endpoint the QR payload points at
    pub verify_base_url: String,
    /// QR error-correction level
    pub qr_level: qr::EcLevel,
    /// Certificate page size in layout pixels
    pub page: Viewport,
    /// Raster parameters
    pub raster: RasterParams,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            organization: "Estate Arena".to_string(),
            verify_base_url: "https://estatearena.example/verify".to_string(),
            qr_level: qr::EcLevel::H,
            page: Viewport::default(),
            raster: RasterParams::default(),
        }
    }
}

/// An issued certificate: the verification link plus the rendered surface
#[derive(Debug, Clone)]
pub struct IssuedCertificate {
    pub verification_url: url::Url,
    pub image: CertificateImage,
}

/// Issue a certificate for a record.
///
/// Runs the required-field gate, builds the verification link, and renders
/// the certificate surface. Refused before any output exists when a
/// required field is empty.
pub fn issue(record: &AllotmentRecord, config: &CertificateConfig) -> Result<IssuedCertificate> {
    let verification_url = link::verification_url(record, &config.verify_base_url)?;
    let image = rendering::render_certificate(record, config)?;
    Ok(IssuedCertificate {
        verification_url,
        image,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CertificateConfig::default();
        assert_eq!(config.organization, "Estate Arena");
        assert_eq!(config.page.width, 1123);
        assert_eq!(config.page.height, 794);
        assert_eq!(config.raster.pixel_ratio, 3);
        assert_eq!(config.raster.background, [0xff, 0xfd, 0xfa, 0xff]);
    }

    #[test]
    fn test_viewport() {
        let viewport = Viewport {
            width: 2246,
            height: 1588,
        };
        assert_eq!(viewport.width, 2246);
        assert_eq!(viewport.height, 1588);
    }
}
