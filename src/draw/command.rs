use serde::Serialize;

use crate::plan::LayoutPoint;

/// Text justification for label commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Justify {
    /// Anchored at the bottom-left of the text box.
    Left,
    /// Centered horizontally on the anchor point.
    Center,
    /// Centered both ways; used inside footprint rectangles.
    MiddleCenter,
}

/// One abstract drawing command.
///
/// Commands form an append-only ordered sequence; later commands may
/// visually overlay earlier ones but never mutate them. Every command
/// carries its layer name and the color index resolved from the
/// layer → color table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawCommand {
    Line {
        layer: String,
        color: u16,
        from: LayoutPoint,
        to: LayoutPoint,
    },
    Rectangle {
        layer: String,
        color: u16,
        corner: LayoutPoint,
        opposite: LayoutPoint,
    },
    Label {
        layer: String,
        color: u16,
        at: LayoutPoint,
        height: f64,
        justify: Justify,
        text: String,
    },
    IconRef {
        layer: String,
        color: u16,
        icon: String,
        at: LayoutPoint,
    },
}

impl DrawCommand {
    /// The layer this command is tagged with.
    #[must_use]
    pub fn layer(&self) -> &str {
        match self {
            Self::Line { layer, .. }
            | Self::Rectangle { layer, .. }
            | Self::Label { layer, .. }
            | Self::IconRef { layer, .. } => layer,
        }
    }
}
