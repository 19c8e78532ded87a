//! Certificate rendering pipeline: layout, paint, raster.
//!
//! A certificate surface is a pure function of the record and the
//! configuration. The pipeline validates the record, builds the
//! verification link and its QR matrix, lays out the page, lowers the
//! layout into paint commands, and rasterizes them on an off-screen canvas.

pub mod layout;
pub mod paint;
pub mod raster;

use crate::error::Result;
use crate::record::AllotmentRecord;
use crate::{link, qr, CertificateConfig};

/// A rendered certificate surface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

/// Render the certificate surface for a record.
///
/// Fails before producing anything when a required field is empty; the QR
/// payload is the same verification URL [`link::verification_url`] mints.
pub fn render_certificate(
    record: &AllotmentRecord,
    config: &CertificateConfig,
) -> Result<CertificateImage> {
    let url = link::verification_url(record, &config.verify_base_url)?;
    let matrix = qr::encode(url.as_str(), config.qr_level)?;

    let nodes = layout::layout_certificate(record, &config.organization, config.page);
    let commands = paint::build_commands(&nodes, &matrix, config.page);
    let image = raster::rasterize(&commands, config.page, &config.raster)?;

    log::info!(
        "rendered certificate {} at {}x{}",
        record.reference_id(),
        image.width,
        image.height
    );
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn sample() -> AllotmentRecord {
        AllotmentRecord {
            full_name: "A Khan".to_string(),
            cnic: "12345-1234567-1".to_string(),
            phone: "0300-0000000".to_string(),
            plot_no: "A-12".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn render_produces_a_scaled_a4_surface() {
        let config = CertificateConfig::default();
        let image = render_certificate(&sample(), &config).unwrap();
        assert_eq!(image.width, config.page.width * config.raster.pixel_ratio);
        assert_eq!(image.height, config.page.height * config.raster.pixel_ratio);
        assert!(!image.png_data.is_empty());
    }

    #[test]
    fn render_refuses_incomplete_records() {
        let mut record = sample();
        record.plot_no = String::new();
        assert!(matches!(
            render_certificate(&record, &CertificateConfig::default()),
            Err(Error::MissingField("plotNo"))
        ));
    }
}
