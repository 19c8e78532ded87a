//! Single-page PDF assembly around the rasterized certificate.
//!
//! The page is A4 landscape with zero margins. The bitmap fills the page
//! width and keeps the source aspect ratio, top-aligned, exactly like the
//! printed sheet.

use std::path::{Path, PathBuf};

use printpdf::{Image, ImageTransform, Mm, PdfDocument};

use crate::error::{Error, Result};
use crate::record::AllotmentRecord;
use crate::rendering::CertificateImage;
use crate::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

const MM_PER_INCH: f64 = 25.4;

/// Assemble a one-page landscape A4 document embedding the surface.
pub fn build_pdf(surface: &CertificateImage, title: &str) -> Result<Vec<u8>> {
    if surface.width == 0 || surface.height == 0 {
        return Err(Error::ExportError(
            "Certificate surface has zero dimensions".to_string(),
        ));
    }

    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Certificate");
    let current_layer = doc.get_page(page).get_layer(layer);

    let bitmap = image::load_from_memory(&surface.png_data)
        .map_err(|e| Error::ExportError(format!("Could not decode certificate bitmap: {e}")))?;
    let bitmap = image::DynamicImage::ImageRgb8(bitmap.to_rgb8());
    let embedded = Image::from_dynamic_image(&bitmap);

    // Fill the page width; the height follows the source aspect ratio
    let dpi = surface.width as f64 * MM_PER_INCH / PAGE_WIDTH_MM;
    let height_mm = surface.height as f64 * MM_PER_INCH / dpi;
    embedded.add_to_layer(
        current_layer,
        ImageTransform {
            translate_x: Some(Mm(0.0)),
            translate_y: Some(Mm((PAGE_HEIGHT_MM - height_mm) as f32)),
            dpi: Some(dpi as f32),
            ..Default::default()
        },
    );

    doc.save_to_bytes()
        .map_err(|e| Error::ExportError(format!("PDF assembly failed: {e}")))
}

/// Build and write the certificate PDF under its derived filename.
pub fn export_pdf(
    record: &AllotmentRecord,
    surface: &CertificateImage,
    dir: &Path,
) -> Result<PathBuf> {
    let title = format!("Certificate of Allotment - {}", record.reference_id());
    let bytes = build_pdf(surface, &title)?;
    let path = dir.join(super::pdf_file_name(record));
    std::fs::write(&path, &bytes)?;
    log::info!("wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}
