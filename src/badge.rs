use crate::constants::{BADGE_ICON_SIZE, BADGE_PADDING, BADGE_SIZE};
use crate::icons::IconPair;

/// Declarative description of the composite marker element: a white circular
/// badge with the zoning icon on the left and the progress icon on the right.
///
/// The badge itself knows nothing about any UI framework; [`Badge::to_html`]
/// is the one adapter that turns the description into a concrete element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    pub zoning_icon: String,
    pub progress_icon: String,
}

impl Badge {
    pub const CLASS_NAME: &'static str = "badge-marker";

    pub fn new(icons: IconPair<'_>) -> Self {
        Badge {
            zoning_icon: icons.zoning.to_string(),
            progress_icon: icons.progress.to_string(),
        }
    }

    /// Inline styles in declaration order. Background images are always
    /// [zoning, progress], matching the left/right icon positions.
    pub fn styles(&self) -> Vec<(&'static str, String)> {
        vec![
            ("width", format!("{}px", BADGE_SIZE)),
            ("height", format!("{}px", BADGE_SIZE)),
            ("padding", format!("{}px", BADGE_PADDING)),
            ("border-radius", "50%".to_string()),
            ("display", "flex".to_string()),
            ("justify-content", "center".to_string()),
            ("align-items", "center".to_string()),
            ("background-color", "white".to_string()),
            (
                "background-image",
                format!("url({}), url({})", self.zoning_icon, self.progress_icon),
            ),
            ("background-repeat", "no-repeat, no-repeat".to_string()),
            (
                "background-size",
                format!("{s}px {s}px, {s}px {s}px", s = BADGE_ICON_SIZE),
            ),
            ("background-position", "left center, right center".to_string()),
            ("cursor", "pointer".to_string()),
        ]
    }

    /// Render the badge as an inline-styled div, suitable for a divIcon.
    pub fn to_html(&self) -> String {
        let style = self
            .styles()
            .iter()
            .map(|(name, value)| format!("{}: {};", name, value))
            .collect::<Vec<_>>()
            .join(" ");
        format!(r#"<div class="{}" style="{}"></div>"#, Self::CLASS_NAME, style)
    }
}
