use std::sync::Arc;

use nabu_engine::coords::Viewport;

use crate::theme::Theme;

/// Pause rendering while the surface is mostly out of view.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StopWhenNotVisible {
    pub enabled: bool,
    /// Minimum visible fraction, `0..=1`, for the surface to count as in view.
    pub threshold: f32,
}

impl Default for StopWhenNotVisible {
    fn default() -> Self {
        Self { enabled: true, threshold: 0.25 }
    }
}

impl From<bool> for StopWhenNotVisible {
    fn from(enabled: bool) -> Self {
        Self { enabled, ..Self::default() }
    }
}

/// When the renderer keeps ticking.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct FocusBehaviour {
    /// Tick only while the pointer is over the surface.
    pub only_when_hovered: bool,
    pub stop_when_not_visible: StopWhenNotVisible,
}

#[derive(Debug, Clone)]
pub struct RendererConfig {
    pub focus: FocusBehaviour,
    /// Overrides the host-reported device pixel ratio.
    pub pixel_ratio: Option<f32>,
    /// Font bytes for text; system fonts are tried when `None`.
    pub font: Option<Arc<[u8]>>,
    pub theme: Theme,
    /// Surface size assumed until the host reports one.
    pub initial_size: Viewport,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            focus: FocusBehaviour::default(),
            pixel_ratio: None,
            font: None,
            theme: Theme::default(),
            initial_size: Viewport::new(960.0, 640.0),
        }
    }
}

impl RendererConfig {
    pub fn focus(mut self, focus: FocusBehaviour) -> Self {
        self.focus = focus;
        self
    }

    pub fn only_when_hovered(mut self, v: bool) -> Self {
        self.focus.only_when_hovered = v;
        self
    }

    pub fn stop_when_not_visible(mut self, v: impl Into<StopWhenNotVisible>) -> Self {
        self.focus.stop_when_not_visible = v.into();
        self
    }

    pub fn pixel_ratio(mut self, ratio: f32) -> Self {
        self.pixel_ratio = Some(ratio);
        self
    }

    pub fn font(mut self, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.font = Some(bytes.into());
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn initial_size(mut self, width: f32, height: f32) -> Self {
        self.initial_size = Viewport::new(width, height);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = RendererConfig::default();
        assert!(!c.focus.only_when_hovered);
        assert!(c.focus.stop_when_not_visible.enabled);
        assert_eq!(c.focus.stop_when_not_visible.threshold, 0.25);
    }

    #[test]
    fn bool_form_keeps_default_threshold() {
        let c = RendererConfig::default().stop_when_not_visible(false);
        assert_eq!(c.focus.stop_when_not_visible, StopWhenNotVisible { enabled: false, threshold: 0.25 });
        let s = StopWhenNotVisible { enabled: true, threshold: 0.9 };
        assert_eq!(RendererConfig::default().stop_when_not_visible(s).focus.stop_when_not_visible.threshold, 0.9);
    }
}
