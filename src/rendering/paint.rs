//! Paint command set for the certificate surface.
//!
//! The layout nodes are lowered into a flat list of commands the raster
//! stage replays. Styling lives here: ink and accent colors, the double
//! page border, and the white backing behind the QR modules.

use crate::qr::QrMatrix;
use crate::rendering::layout::{ElementKind, LayoutNode};
use crate::Viewport;

pub type Rgba = (u8, u8, u8, u8);

/// Body and footer ink
pub const INK: Rgba = (0x26, 0x26, 0x26, 0xff);
/// Border, rules, masthead
pub const ACCENT: Rgba = (0x8b, 0x5e, 0x34, 0xff);
/// QR backing
pub const WHITE: Rgba = (0xff, 0xff, 0xff, 0xff);
/// QR modules
pub const BLACK: Rgba = (0x00, 0x00, 0x00, 0xff);

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    SolidRect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        rgba: Rgba,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        scale: u32,
        rgba: Rgba,
    },
    QrModules {
        x: i32,
        y: i32,
        side: u32,
        matrix: QrMatrix,
    },
}

fn outline(x: i32, y: i32, width: u32, height: u32, thickness: u32, rgba: Rgba) -> [PaintCommand; 4] {
    [
        PaintCommand::SolidRect {
            x,
            y,
            width,
            height: thickness,
            rgba,
        },
        PaintCommand::SolidRect {
            x,
            y: y + height as i32 - thickness as i32,
            width,
            height: thickness,
            rgba,
        },
        PaintCommand::SolidRect {
            x,
            y,
            width: thickness,
            height,
            rgba,
        },
        PaintCommand::SolidRect {
            x: x + width as i32 - thickness as i32,
            y,
            width: thickness,
            height,
            rgba,
        },
    ]
}

/// Lower layout nodes into paint commands.
///
/// The QR matrix is painted for the node of kind [`ElementKind::Qr`]; the
/// double certificate border is derived from the viewport.
pub fn build_commands(
    nodes: &[LayoutNode],
    qr: &QrMatrix,
    viewport: Viewport,
) -> Vec<PaintCommand> {
    let mut commands = Vec::new();

    commands.extend(outline(
        24,
        24,
        viewport.width - 48,
        viewport.height - 48,
        3,
        ACCENT,
    ));
    commands.extend(outline(
        34,
        34,
        viewport.width - 68,
        viewport.height - 68,
        1,
        ACCENT,
    ));

    for node in nodes {
        match node.kind {
            ElementKind::Rule => commands.push(PaintCommand::SolidRect {
                x: node.rect.x,
                y: node.rect.y,
                width: node.rect.width,
                height: node.rect.height,
                rgba: ACCENT,
            }),
            ElementKind::Qr => commands.push(PaintCommand::QrModules {
                x: node.rect.x,
                y: node.rect.y,
                side: node.rect.width,
                matrix: qr.clone(),
            }),
            kind => {
                let rgba = match kind {
                    ElementKind::Masthead => ACCENT,
                    _ => INK,
                };
                commands.push(PaintCommand::Text {
                    x: node.rect.x,
                    y: node.rect.y,
                    text: node.text.clone(),
                    scale: node.scale,
                    rgba,
                });
            }
        }
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::{encode, EcLevel};
    use crate::rendering::layout::{layout_certificate, QR_SIDE};
    use crate::AllotmentRecord;

    fn sample() -> AllotmentRecord {
        AllotmentRecord {
            full_name: "A Khan".to_string(),
            cnic: "1".to_string(),
            phone: "2".to_string(),
            plot_no: "A-12".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn commands_include_border_text_and_qr() {
        let viewport = Viewport::default();
        let nodes = layout_certificate(&sample(), "Estate Arena", viewport);
        let qr = encode("https://example.org/verify?data=x", EcLevel::H).unwrap();
        let commands = build_commands(&nodes, &qr, viewport);

        let rects = commands
            .iter()
            .filter(|c| matches!(c, PaintCommand::SolidRect { .. }))
            .count();
        // two border outlines (4 rects each) plus the divider and signature rules
        assert!(rects >= 10);
        assert_eq!(
            commands
                .iter()
                .filter(|c| matches!(c, PaintCommand::QrModules { .. }))
                .count(),
            1
        );
        assert!(commands.iter().any(
            |c| matches!(c, PaintCommand::Text { text, .. } if text == "CERTIFICATE OF ALLOTMENT")
        ));
    }

    #[test]
    fn qr_command_keeps_the_layout_side() {
        let viewport = Viewport::default();
        let nodes = layout_certificate(&sample(), "Estate Arena", viewport);
        let qr = encode("payload", EcLevel::H).unwrap();
        let commands = build_commands(&nodes, &qr, viewport);
        let side = commands.iter().find_map(|c| match c {
            PaintCommand::QrModules { side, .. } => Some(*side),
            _ => None,
        });
        assert_eq!(side, Some(QR_SIDE));
    }
}
