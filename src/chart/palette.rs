//! Display names and colours for the known diet groups.

/// Presentation of one diet group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DietStyle {
    pub diet_group: &'static str,
    pub display_name: &'static str,
    pub color: &'static str,
}

/// Known diet groups, in legend order.
pub static DIET_STYLES: &[DietStyle] = &[
    DietStyle {
        diet_group: "fish",
        display_name: "Fish-based Diet",
        color: "#00BFFF",
    },
    DietStyle {
        diet_group: "meat100",
        display_name: "Full Meat Diet",
        color: "#FF4500",
    },
    DietStyle {
        diet_group: "meat50",
        display_name: "Reduced Meat Diet (50%)",
        color: "#32CD32",
    },
    DietStyle {
        diet_group: "vegan",
        display_name: "Vegan Diet",
        color: "#FF69B4",
    },
    DietStyle {
        diet_group: "veggie",
        display_name: "Vegetarian Diet",
        color: "#FFD700",
    },
];

pub const FALLBACK_LINE_COLOR: &str = "#333333";
pub const FALLBACK_FILL_COLOR: &str = "rgba(128, 128, 128, 0.2)";
pub const FILL_ALPHA: f64 = 0.2;

/// Colours and label a series is drawn with.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesStyle {
    pub display_name: String,
    pub line_color: String,
    pub fill_color: String,
}

pub fn style_for(diet_group: &str) -> Option<&'static DietStyle> {
    DIET_STYLES.iter().find(|s| s.diet_group == diet_group)
}

/// Converts `#RRGGBB` to `rgba(r, g, b, alpha)`.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> Option<String> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let (r, g, b) = (channel(0)?, channel(2)?, channel(4)?);
    Some(format!("rgba({r}, {g}, {b}, {alpha})"))
}

/// Resolves the style of a diet group; unknown groups get grey and their raw label.
pub fn resolve(diet_group: &str) -> SeriesStyle {
    match style_for(diet_group) {
        Some(style) => SeriesStyle {
            display_name: style.display_name.to_string(),
            line_color: style.color.to_string(),
            fill_color: hex_to_rgba(style.color, FILL_ALPHA)
                .unwrap_or_else(|| FALLBACK_FILL_COLOR.to_string()),
        },
        None => SeriesStyle {
            display_name: diet_group.to_string(),
            line_color: FALLBACK_LINE_COLOR.to_string(),
            fill_color: FALLBACK_FILL_COLOR.to_string(),
        },
    }
}
