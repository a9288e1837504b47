//! Fixed icon and color palettes offered when creating a board.

use serde::Serialize;

/// A named board color and the display classes it resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardColor {
    /// Color token stored on the board.
    pub name: &'static str,
    /// Background class.
    pub class: &'static str,
    /// Hover background class.
    pub hover_class: &'static str,
}

/// Display classes for a resolved board color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardColorClasses {
    /// Background class.
    pub bg_class: &'static str,
    /// Hover background class.
    pub hover_class: &'static str,
}

/// Selectable board colors. The first entry is the fallback.
pub const BOARD_COLORS: [BoardColor; 8] = [
    BoardColor {
        name: "amber",
        class: "bg-amber-600",
        hover_class: "hover:bg-amber-700",
    },
    BoardColor {
        name: "blue",
        class: "bg-blue-600",
        hover_class: "hover:bg-blue-700",
    },
    BoardColor {
        name: "green",
        class: "bg-green-600",
        hover_class: "hover:bg-green-700",
    },
    BoardColor {
        name: "purple",
        class: "bg-purple-600",
        hover_class: "hover:bg-purple-700",
    },
    BoardColor {
        name: "teal",
        class: "bg-teal-600",
        hover_class: "hover:bg-teal-700",
    },
    BoardColor {
        name: "red",
        class: "bg-red-600",
        hover_class: "hover:bg-red-700",
    },
    BoardColor {
        name: "pink",
        class: "bg-pink-600",
        hover_class: "hover:bg-pink-700",
    },
    BoardColor {
        name: "indigo",
        class: "bg-indigo-600",
        hover_class: "hover:bg-indigo-700",
    },
];

/// Selectable board icons.
pub const BOARD_ICONS: [&str; 12] = [
    "📋", "📝", "📑", "📊", "🗂️", "🗓️", "💼", "👤", "👨‍💻", "🏠", "🌟", "🔍",
];

const FALLBACK_COLOR: BoardColor = BOARD_COLORS[0];

/// Resolves a color token to display classes, falling back to the first
/// palette entry for unknown tokens.
#[must_use]
pub fn resolve_color_classes(name: &str) -> BoardColorClasses {
    let color = BOARD_COLORS
        .iter()
        .find(|color| color.name == name)
        .copied()
        .unwrap_or(FALLBACK_COLOR);
    BoardColorClasses {
        bg_class: color.class,
        hover_class: color.hover_class,
    }
}
