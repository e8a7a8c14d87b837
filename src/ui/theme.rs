//! Catppuccin color sets for the form.
//!
//! Widgets take every color from the active [`Theme`]. `t` in the output pane
//! moves to [`Theme::next`]; the name is what the settings file stores.

use ratatui::style::Color;

/// Colors by role.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Display name, also the settings value
    pub name: &'static str,

    /// Main background color.
    pub bg: Color,
    /// Raised surface: focused inputs and the active tab.
    pub surface: Color,

    /// Primary text color.
    pub fg: Color,
    /// Muted/secondary text (hints, footer, placeholders).
    pub fg_dim: Color,

    /// Focused borders, header, set titles.
    pub accent: Color,
    /// Selector values and warnings.
    pub secondary: Color,

    pub success: Color,
    pub error: Color,
}

impl Theme {
    /// All built-in themes, in cycling order.
    pub fn all() -> &'static [Theme] {
        &FLAVORS
    }

    /// Built-in theme with this name, ignoring ASCII case.
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        FLAVORS
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Catppuccin Mocha.
    pub fn default_theme() -> &'static Theme {
        &FLAVORS[0]
    }

    /// The theme after this one, wrapping around.
    pub fn next(&self) -> &'static Theme {
        let pos = FLAVORS
            .iter()
            .position(|t| t.name == self.name)
            .unwrap_or(0);
        &FLAVORS[(pos + 1) % FLAVORS.len()]
    }
}

static FLAVORS: [Theme; 4] = [
    // default
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),           // base
        surface: Color::Rgb(69, 71, 90),      // surface1
        fg: Color::Rgb(205, 214, 244),        // text
        fg_dim: Color::Rgb(108, 112, 134),    // overlay0
        accent: Color::Rgb(137, 180, 250),    // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        success: Color::Rgb(166, 227, 161),   // green
        error: Color::Rgb(243, 139, 168),     // red
    },
    Theme {
        name: "Catppuccin Macchiato",
        bg: Color::Rgb(36, 39, 58),           // base
        surface: Color::Rgb(73, 77, 100),     // surface1
        fg: Color::Rgb(202, 211, 245),        // text
        fg_dim: Color::Rgb(110, 115, 141),    // overlay0
        accent: Color::Rgb(138, 173, 244),    // blue
        secondary: Color::Rgb(238, 212, 159), // yellow
        success: Color::Rgb(166, 218, 149),   // green
        error: Color::Rgb(237, 135, 150),     // red
    },
    Theme {
        name: "Catppuccin Frappe",
        bg: Color::Rgb(48, 52, 70),           // base
        surface: Color::Rgb(81, 87, 109),     // surface1
        fg: Color::Rgb(198, 208, 245),        // text
        fg_dim: Color::Rgb(115, 121, 148),    // overlay0
        accent: Color::Rgb(140, 170, 238),    // blue
        secondary: Color::Rgb(229, 200, 144), // yellow
        success: Color::Rgb(166, 209, 137),   // green
        error: Color::Rgb(231, 130, 132),     // red
    },
    Theme {
        name: "Catppuccin Latte",
        bg: Color::Rgb(239, 241, 245),       // base
        surface: Color::Rgb(188, 192, 204),  // surface1
        fg: Color::Rgb(76, 79, 105),         // text
        fg_dim: Color::Rgb(156, 160, 176),   // overlay0
        accent: Color::Rgb(30, 102, 245),    // blue
        secondary: Color::Rgb(223, 142, 29), // yellow
        success: Color::Rgb(64, 160, 43),    // green
        error: Color::Rgb(210, 15, 57),      // red
    },
];
