use nabu_engine::scene::{Material, NodeHandle, NodeKind, TextLabel, TextSizing};

use crate::ctx::Ctx;
use crate::theme::ThemeRole;

use super::{impl_shape, node_of, Colorable};

/// Text size in pixels at the zoom the label was created with.
pub const TEXT_SIZE_PX: f32 = 16.0;

/// A text label anchored at its node position.
///
/// World labels (`Ctx::text`) scale with zoom like any geometry; billboards
/// (`Ctx::text_billboard`) keep a constant pixel size.
pub struct Text {
    node: NodeHandle,
}

impl Text {
    /// Size in world units for world labels, pixels for billboards.
    pub fn size(self, size: f32) -> Self {
        self.with_label(|l| l.size = size.max(0.0));
        self
    }

    pub fn content(self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.with_label(|l| l.text = text);
        self
    }

    pub fn sizing(&self) -> TextSizing {
        match &self.node.borrow().kind {
            NodeKind::Text(l) => l.sizing,
            _ => TextSizing::World,
        }
    }

    fn with_label(&self, f: impl FnOnce(&mut TextLabel)) {
        if let NodeKind::Text(label) = &mut self.node.borrow_mut().kind {
            f(label);
        }
    }
}

impl_shape!(Text);

impl Colorable for Text {}

impl Ctx {
    pub fn text(&mut self, text: impl Into<String>) -> Text {
        let size = TEXT_SIZE_PX / self.zoom();
        self.label(TextLabel::new(text, size, TextSizing::World))
    }

    pub fn text_billboard(&mut self, text: impl Into<String>) -> Text {
        self.label(TextLabel::new(text, TEXT_SIZE_PX, TextSizing::Screen))
    }

    fn label(&mut self, label: TextLabel) -> Text {
        self.ensure_font();
        let node = node_of(NodeKind::Text(label), Material::basic(self.color(ThemeRole::Foreground)));
        self.spawn(&node);
        Text { node }
    }
}

#[cfg(test)]
mod tests {
    use nabu_engine::coords::Viewport;

    use super::*;
    use crate::shapes::Shape;
    use crate::theme::Theme;

    fn label(text: &Text) -> TextLabel {
        match &text.node().borrow().kind {
            NodeKind::Text(l) => l.clone(),
            other => panic!("not text: {other:?}"),
        }
    }

    // ── sizing ────────────────────────────────────────────────────────────

    #[test]
    fn world_text_is_sized_for_current_zoom() {
        let mut ctx = Ctx::new(Viewport::new(800.0, 600.0), Theme::Dark);
        ctx.set_zoom(2.0).unwrap();
        let t = ctx.text("hi");
        assert_eq!(t.sizing(), TextSizing::World);
        assert_eq!(label(&t).size, TEXT_SIZE_PX / 2.0);
    }

    #[test]
    fn billboard_ignores_zoom() {
        let mut ctx = Ctx::new(Viewport::new(800.0, 600.0), Theme::Dark);
        ctx.set_zoom(2.0).unwrap();
        let t = ctx.text_billboard("hi").size(20.0).content("yo");
        let l = label(&t);
        assert_eq!(l.sizing, TextSizing::Screen);
        assert_eq!(l.size, 20.0);
        assert_eq!(l.text, "yo");
    }
}
