//! Rule list configuration.

use crate::view::RowPalette;

/// Settings for a [`RuleListView`](crate::view::RuleListView).
///
/// # Example
///
/// ```
/// use rule_lattice::RuleListConfig;
///
/// let config = RuleListConfig::default()
///     .with_row_height(28.0)
///     .with_log_rule_modification(true);
/// assert_eq!(config.row_height, 28.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleListConfig {
    /// Height of each row.
    pub row_height: f32,
    /// Vertical gap between rows.
    pub row_spacing: f32,
    /// Row background colors.
    pub palette: RowPalette,
    /// Log the full rule list at info level whenever it is replaced.
    pub log_rule_modification: bool,
    /// Clip repaint requests to the viewport.
    pub clip_repaints_to_viewport: bool,
}

impl Default for RuleListConfig {
    fn default() -> Self {
        Self {
            row_height: 24.0,
            row_spacing: 0.0,
            palette: RowPalette::default(),
            log_rule_modification: false,
            clip_repaints_to_viewport: true,
        }
    }
}

impl RuleListConfig {
    /// Set the row height.
    pub fn with_row_height(mut self, row_height: f32) -> Self {
        self.row_height = row_height;
        self
    }

    /// Set the gap between rows.
    pub fn with_row_spacing(mut self, row_spacing: f32) -> Self {
        self.row_spacing = row_spacing;
        self
    }

    /// Set the row palette.
    pub fn with_palette(mut self, palette: RowPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Enable or disable rule list dumps on replacement.
    pub fn with_log_rule_modification(mut self, enabled: bool) -> Self {
        self.log_rule_modification = enabled;
        self
    }

    /// Enable or disable viewport clipping of repaint requests.
    pub fn with_clip_repaints_to_viewport(mut self, enabled: bool) -> Self {
        self.clip_repaints_to_viewport = enabled;
        self
    }
}
