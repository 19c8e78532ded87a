//! Fixed-geometry layout for the certificate page.
//!
//! The certificate is a single A4-landscape surface: centered masthead and
//! heading, the allotment body lines, the QR region with its scan hint, and
//! a two-sided footer. Everything is computed from the record and the
//! viewport; the layout is a pure function and fully re-derivable.

use crate::record::AllotmentRecord;
use crate::Viewport;

/// Glyph cell size in layout pixels at scale 1
pub const GLYPH: u32 = 8;

/// Side of the square QR region in layout pixels
pub const QR_SIDE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// What a layout node is, which decides how the paint stage styles it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// Organization masthead
    Masthead,
    /// The certificate heading
    Heading,
    /// Horizontal rule
    Rule,
    /// Body copy
    Body,
    /// The allottee name
    Emphasis,
    /// QR module region
    Qr,
    /// Footer copy (signature block, reference, date)
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutNode {
    pub rect: Rect,
    pub text: String,
    pub kind: ElementKind,
    pub scale: u32,
}

fn text_width(text: &str, scale: u32) -> u32 {
    text.chars().count() as u32 * GLYPH * scale
}

fn centered(text: &str, kind: ElementKind, scale: u32, y: i32, viewport: Viewport) -> LayoutNode {
    let width = text_width(text, scale);
    LayoutNode {
        rect: Rect {
            x: (viewport.width as i32 - width as i32) / 2,
            y,
            width,
            height: GLYPH * scale,
        },
        text: text.to_string(),
        kind,
        scale,
    }
}

fn footer_line(text: &str, x: i32, y: i32, scale: u32) -> LayoutNode {
    LayoutNode {
        rect: Rect {
            x,
            y,
            width: text_width(text, scale),
            height: GLYPH * scale,
        },
        text: text.to_string(),
        kind: ElementKind::Footer,
        scale,
    }
}

/// Compute the certificate layout for a record.
///
/// Optional lines (project, parentage) are dropped rather than rendered
/// with a hole in the sentence.
pub fn layout_certificate(
    record: &AllotmentRecord,
    organization: &str,
    viewport: Viewport,
) -> Vec<LayoutNode> {
    let mut nodes = Vec::new();
    let mut y = 70i32;

    nodes.push(centered(organization, ElementKind::Masthead, 3, y, viewport));
    y += (GLYPH * 3) as i32 + 18;

    nodes.push(centered(
        "CERTIFICATE OF ALLOTMENT",
        ElementKind::Heading,
        4,
        y,
        viewport,
    ));
    y += (GLYPH * 4) as i32 + 16;

    nodes.push(LayoutNode {
        rect: Rect {
            x: (viewport.width as i32 - 420) / 2,
            y,
            width: 420,
            height: 3,
        },
        text: String::new(),
        kind: ElementKind::Rule,
        scale: 1,
    });
    y += 3 + 28;

    let plot_line = format!("This is to certify that Plot No. {}", record.plot_no);
    nodes.push(centered(&plot_line, ElementKind::Body, 2, y, viewport));
    y += (GLYPH * 2) as i32 + 10;

    if let Some(project) = record.project_name.as_deref().filter(|p| !p.is_empty()) {
        let project_line = format!("in {project}");
        nodes.push(centered(&project_line, ElementKind::Body, 2, y, viewport));
        y += (GLYPH * 2) as i32 + 10;
    }

    nodes.push(centered(
        "has been officially allotted to",
        ElementKind::Body,
        2,
        y,
        viewport,
    ));
    y += (GLYPH * 2) as i32 + 14;

    nodes.push(centered(
        &record.full_name,
        ElementKind::Emphasis,
        3,
        y,
        viewport,
    ));
    y += (GLYPH * 3) as i32 + 10;

    if let Some(father) = record.father_name.as_deref().filter(|f| !f.is_empty()) {
        let parent_line = format!("S/D/W of {father}");
        nodes.push(centered(&parent_line, ElementKind::Body, 2, y, viewport));
        y += (GLYPH * 2) as i32 + 10;
    }

    y += 14;
    nodes.push(LayoutNode {
        rect: Rect {
            x: (viewport.width as i32 - QR_SIDE as i32) / 2,
            y,
            width: QR_SIDE,
            height: QR_SIDE,
        },
        text: String::new(),
        kind: ElementKind::Qr,
        scale: 1,
    });
    y += QR_SIDE as i32 + 8;

    nodes.push(centered(
        "Scan to verify details",
        ElementKind::Footer,
        1,
        y,
        viewport,
    ));

    // Footer is anchored to the page bottom, independent of body height
    let footer_y = viewport.height as i32 - 120;
    let left_x = 90;
    nodes.push(LayoutNode {
        rect: Rect {
            x: left_x,
            y: footer_y,
            width: 220,
            height: 2,
        },
        text: String::new(),
        kind: ElementKind::Rule,
        scale: 1,
    });
    nodes.push(footer_line("Authorized Signatory", left_x, footer_y + 12, 1));
    nodes.push(footer_line(organization, left_x, footer_y + 26, 1));

    let reference = format!("Ref: {}", record.reference_id());
    let date = record.formatted_issue_date();
    let right_edge = viewport.width as i32 - 90;
    nodes.push(footer_line(
        &reference,
        right_edge - text_width(&reference, 1) as i32,
        footer_y + 12,
        1,
    ));
    nodes.push(footer_line(
        &date,
        right_edge - text_width(&date, 1) as i32,
        footer_y + 26,
        1,
    ));

    nodes
}
