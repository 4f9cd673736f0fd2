use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Travel-log dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Feed source and last-refresh information in `[ source | updated ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Feed source label (e.g. `"cities.json"`).
    pub source: &'a str,
    /// Formatted last-refresh time (e.g. `"14:02:31"`).
    pub updated: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(source: &'a str, updated: &'a str, theme: &'a Theme) -> Self {
        Self {
            source,
            updated,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    ///
    /// The returned lines are:
    ///
    /// 1. `"✦ ✧ ✦ ✧ PERSONAL TRAVEL LOG ✦ ✧ ✦ ✧"`
    /// 2. `"============================================================"` (60 `=` chars)
    /// 3. `"[ cities.json | 14:02:31 ]"`
    /// 4. `""`
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            // Title line.
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" PERSONAL TRAVEL LOG ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Source / refresh info line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.updated, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
