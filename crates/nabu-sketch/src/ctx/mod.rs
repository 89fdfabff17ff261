//! The drawing context handed to setup and update callbacks.
//!
//! A [`Ctx`] owns one scene and decides how long spawned objects live:
//!
//! - during setup (before the first tick) spawned objects are *retained* and
//!   stay in the scene until removed
//! - from the first tick on, objects spawned by update callbacks are
//!   *immediate*: they are drawn for the frame they were spawned in and removed
//!   at the start of the next tick unless spawned again
//!
//! The mode flips from retained to immediate once, at the first tick.

mod camera;
mod controls;
mod font;

use std::fmt;
use std::sync::Arc;

use log::{debug, trace};
use nabu_engine::camera::{Camera, OrbitControls};
use nabu_engine::coords::{Vec2, Viewport};
use nabu_engine::paint::Color;
use nabu_engine::scene::{Lighting, NodeHandle, Scene};
use nabu_engine::text::{FontId, FontSystem};

use crate::theme::{theme_color, Theme, ThemeRole};

pub use camera::FALLBACK_EXTENT;
pub use controls::{ButtonHandle, CheckboxHandle, Controls, SliderHandle, TextElementHandle};

use font::FontSlot;

/// Per-frame callback: `(ctx, dt seconds, elapsed seconds)`.
pub type UpdateFn = Box<dyn FnMut(&mut Ctx, f32, f32) -> anyhow::Result<()>>;

/// Click hook receiving the centered pointer position.
pub type ClickFn = Box<dyn FnMut(&mut Ctx, Vec2) -> anyhow::Result<()>>;

/// Lifetime policy for newly spawned objects.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Mode {
    #[default]
    Retained,
    Immediate,
}

pub struct Ctx {
    mode: Mode,
    scene: Scene,
    garbage: Vec<NodeHandle>,
    update_fns: Vec<UpdateFn>,
    click_fns: Vec<ClickFn>,
    camera: Camera,
    surface: Viewport,
    theme: Theme,
    fonts: FontSystem,
    font: FontSlot,
    mouse: Vec2,
    orbit: Option<OrbitControls>,
    controls: Controls,
}

impl fmt::Debug for Ctx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ctx")
            .field("mode", &self.mode)
            .field("members", &self.scene.len())
            .field("garbage", &self.garbage.len())
            .field("update_fns", &self.update_fns.len())
            .field("theme", &self.theme)
            .field("surface", &self.surface)
            .finish()
    }
}

impl Ctx {
    /// A context for a surface of `surface` logical pixels with the default
    /// orthographic camera.
    pub fn new(surface: Viewport, theme: Theme) -> Self {
        Self {
            mode: Mode::Retained,
            scene: Scene::new(),
            garbage: Vec::new(),
            update_fns: Vec::new(),
            click_fns: Vec::new(),
            camera: Camera::orthographic(surface.width, surface.height),
            surface,
            theme,
            fonts: FontSystem::new(),
            font: FontSlot::default(),
            mouse: Vec2::zero(),
            orbit: None,
            controls: Controls::default(),
        }
    }

    pub(crate) fn with_font_source(mut self, source: Option<Arc<[u8]>>) -> Self {
        self.font = FontSlot::new(source);
        self
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    // ── membership ────────────────────────────────────────────────────────

    /// Adds `node` to the scene. In immediate mode it is also scheduled for
    /// removal at the start of the next tick.
    pub fn spawn(&mut self, node: &NodeHandle) {
        self.scene.insert(node);
        if self.mode == Mode::Immediate {
            self.garbage.push(node.clone());
        }
    }

    /// Removes `node` from the scene. Non-members are ignored.
    pub fn remove(&mut self, node: &NodeHandle) {
        self.scene.remove(node);
    }

    // ── scheduling ────────────────────────────────────────────────────────

    /// Registers a callback run once per tick, after all earlier ones.
    pub fn update(&mut self, f: impl FnMut(&mut Ctx, f32, f32) -> anyhow::Result<()> + 'static) {
        self.update_fns.push(Box::new(f));
    }

    #[inline]
    pub fn has_updates(&self) -> bool {
        !self.update_fns.is_empty()
    }

    /// Advances one frame: collects last tick's immediate objects, switches to
    /// immediate mode, then runs every update callback in order.
    ///
    /// Callbacks registered during the tick first run on the next one. The
    /// first failing callback stops the tick and its error is returned.
    pub fn tick(&mut self, dt: f32, elapsed: f32) -> anyhow::Result<()> {
        let collected = self.garbage.len();
        for node in self.garbage.drain(..) {
            self.scene.remove(&node);
        }

        if self.mode == Mode::Retained {
            debug!("first tick; switching to immediate mode");
            self.mode = Mode::Immediate;
        }

        trace!("tick dt={dt:.4} elapsed={elapsed:.3} collected={collected} callbacks={}", self.update_fns.len());

        let mut fns = std::mem::take(&mut self.update_fns);
        let mut result = Ok(());
        for f in fns.iter_mut() {
            if let Err(e) = f(self, dt, elapsed) {
                result = Err(e);
                break;
            }
        }
        fns.append(&mut self.update_fns);
        self.update_fns = fns;
        result
    }

    // ── pointer ───────────────────────────────────────────────────────────

    /// Records a pointer position given in top-left logical pixels.
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        self.mouse = self.surface.to_centered(Vec2::new(x, y));
    }

    /// Pointer position with the origin at the surface center and +y up.
    #[inline]
    pub fn mouse(&self) -> Vec2 {
        self.mouse
    }

    /// Registers a hook run on every canvas click with the centered position.
    pub fn on_click(&mut self, f: impl FnMut(&mut Ctx, Vec2) -> anyhow::Result<()> + 'static) {
        self.click_fns.push(Box::new(f));
    }

    /// Runs click hooks for a click at top-left logical pixel `(x, y)`.
    pub fn click(&mut self, x: f32, y: f32) -> anyhow::Result<()> {
        self.pointer_moved(x, y);
        let pos = self.mouse;
        let mut fns = std::mem::take(&mut self.click_fns);
        let mut result = Ok(());
        for f in fns.iter_mut() {
            if let Err(e) = f(self, pos) {
                result = Err(e);
                break;
            }
        }
        fns.append(&mut self.click_fns);
        self.click_fns = fns;
        result
    }

    // ── appearance ────────────────────────────────────────────────────────

    #[inline]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Changes defaults for objects created from now on. Existing objects keep
    /// their colors.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Palette color of the current theme.
    #[inline]
    pub fn color(&self, role: ThemeRole) -> Color {
        theme_color(self.theme, role)
    }

    /// Overrides the clear color regardless of theme.
    pub fn background(&mut self, color: impl Into<Color>) {
        self.scene.background = Some(color.into());
    }

    /// Explicit background, or the theme's.
    pub fn clear_color(&self) -> Color {
        self.scene.background.unwrap_or_else(|| self.color(ThemeRole::Background))
    }

    /// Sets the directional light intensity for standard materials.
    pub fn light(&mut self, intensity: f32) {
        if intensity.is_finite() {
            self.scene.lighting.directional = intensity.max(0.0);
        }
    }

    #[inline]
    pub fn lighting(&self) -> &Lighting {
        &self.scene.lighting
    }

    pub fn lighting_mut(&mut self) -> &mut Lighting {
        &mut self.scene.lighting
    }

    // ── text ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn fonts(&self) -> &FontSystem {
        &self.fonts
    }

    /// Loads the text font on first use.
    pub fn ensure_font(&mut self) -> Option<FontId> {
        self.font.ensure(&mut self.fonts)
    }

    #[inline]
    pub fn font(&self) -> Option<FontId> {
        self.font.id()
    }

    /// Drops every object, callback and control.
    pub(crate) fn dispose(&mut self) {
        self.scene.clear();
        self.garbage.clear();
        self.update_fns.clear();
        self.click_fns.clear();
        self.controls.clear();
        self.orbit = None;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use nabu_engine::coords::Vec3;
    use nabu_engine::scene::{Material, Node, NodeKind};

    use super::*;

    fn ctx() -> Ctx {
        Ctx::new(Viewport::new(800.0, 600.0), Theme::Dark)
    }

    fn node_at(x: f32) -> NodeHandle {
        let mut node = Node::new(NodeKind::Group, Material::default());
        node.transform.position = Vec3::new(x, 0.0, 0.0);
        NodeHandle::new(node)
    }

    fn xs(ctx: &Ctx) -> Vec<f32> {
        ctx.scene().members().iter().map(|n| n.borrow().transform.position.x).collect()
    }

    // ── modes ─────────────────────────────────────────────────────────────

    #[test]
    fn mode_flips_once_at_first_tick() {
        let mut ctx = ctx();
        assert_eq!(ctx.mode(), Mode::Retained);
        ctx.tick(0.0, 0.0).unwrap();
        assert_eq!(ctx.mode(), Mode::Immediate);
        ctx.tick(0.016, 0.016).unwrap();
        assert_eq!(ctx.mode(), Mode::Immediate);
    }

    #[test]
    fn retained_objects_survive_ticks() {
        let mut ctx = ctx();
        let a = node_at(1.0);
        ctx.spawn(&a);
        for i in 0..100 {
            ctx.tick(0.016, i as f32 * 0.016).unwrap();
        }
        assert!(ctx.scene().contains(&a));
        ctx.remove(&a);
        assert!(!ctx.scene().contains(&a));
    }

    // ── immediate mode ────────────────────────────────────────────────────

    #[test]
    fn immediate_object_lives_one_frame() {
        let mut ctx = ctx();
        let node = node_at(0.0);
        let frame = Rc::new(RefCell::new(0));
        let (n, f) = (node.clone(), frame.clone());
        ctx.update(move |ctx, _, _| {
            *f.borrow_mut() += 1;
            if *f.borrow() == 1 {
                ctx.spawn(&n);
            }
            Ok(())
        });

        ctx.tick(0.0, 0.0).unwrap();
        assert!(ctx.scene().contains(&node));
        ctx.tick(0.016, 0.016).unwrap();
        assert!(!ctx.scene().contains(&node));
        ctx.tick(0.016, 0.032).unwrap();
        assert!(!ctx.scene().contains(&node));
    }

    #[test]
    fn respawned_each_frame_replaces_previous() {
        let mut ctx = ctx();
        ctx.update(|ctx, _, elapsed| {
            ctx.spawn(&node_at(elapsed * 10.0));
            Ok(())
        });

        ctx.tick(0.0, 0.0).unwrap();
        assert_eq!(xs(&ctx), vec![0.0]);

        let dt = 0.016;
        ctx.tick(dt, dt).unwrap();
        let after = xs(&ctx);
        assert_eq!(after.len(), 1);
        assert!((after[0] - dt * 10.0).abs() < 1e-5);
    }

    #[test]
    fn garbage_collection_is_idempotent() {
        let mut ctx = ctx();
        ctx.spawn(&node_at(1.0));
        ctx.tick(0.0, 0.0).unwrap();
        let before = xs(&ctx);
        ctx.tick(0.0, 0.0).unwrap();
        ctx.tick(0.0, 0.0).unwrap();
        assert_eq!(xs(&ctx), before);
    }

    #[test]
    fn removing_garbage_twice_is_harmless() {
        let mut ctx = ctx();
        let node = node_at(0.0);
        let n = node.clone();
        ctx.update(move |ctx, _, _| {
            ctx.spawn(&n);
            ctx.spawn(&n);
            ctx.remove(&n);
            ctx.spawn(&n);
            Ok(())
        });
        ctx.tick(0.0, 0.0).unwrap();
        assert_eq!(ctx.scene().len(), 1);
        ctx.tick(0.0, 0.0).unwrap();
        assert_eq!(ctx.scene().len(), 1);
    }

    // ── callbacks ─────────────────────────────────────────────────────────

    #[test]
    fn callbacks_run_in_registration_order_with_time() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = ctx();
        for id in 0..3 {
            let log = log.clone();
            ctx.update(move |_, dt, elapsed| {
                log.borrow_mut().push((id, dt, elapsed));
                Ok(())
            });
        }
        ctx.tick(0.5, 2.0).unwrap();
        assert_eq!(*log.borrow(), vec![(0, 0.5, 2.0), (1, 0.5, 2.0), (2, 0.5, 2.0)]);
    }

    #[test]
    fn callback_added_mid_tick_runs_next_tick() {
        let runs = Rc::new(RefCell::new(0));
        let mut ctx = ctx();
        let r = runs.clone();
        let mut added = false;
        ctx.update(move |ctx, _, _| {
            if !added {
                added = true;
                let r = r.clone();
                ctx.update(move |_, _, _| {
                    *r.borrow_mut() += 1;
                    Ok(())
                });
            }
            Ok(())
        });

        ctx.tick(0.0, 0.0).unwrap();
        assert_eq!(*runs.borrow(), 0);
        ctx.tick(0.0, 0.0).unwrap();
        assert_eq!(*runs.borrow(), 1);
    }

    #[test]
    fn failing_callback_stops_tick_and_keeps_list() {
        let runs = Rc::new(RefCell::new(0));
        let mut ctx = ctx();
        ctx.update(|_, _, _| anyhow::bail!("boom"));
        let r = runs.clone();
        ctx.update(move |_, _, _| {
            *r.borrow_mut() += 1;
            Ok(())
        });

        let err = ctx.tick(0.0, 0.0).unwrap_err();
        assert_eq!(err.to_string(), "boom");
        assert_eq!(*runs.borrow(), 0);
        assert!(ctx.has_updates());
        assert!(ctx.tick(0.0, 0.0).is_err());
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn mouse_is_centered_with_y_up() {
        let mut ctx = ctx();
        ctx.pointer_moved(400.0, 300.0);
        assert_eq!(ctx.mouse(), Vec2::zero());
        ctx.pointer_moved(500.0, 100.0);
        assert_eq!(ctx.mouse(), Vec2::new(100.0, 200.0));
    }

    #[test]
    fn click_hooks_get_centered_position() {
        let seen = Rc::new(RefCell::new(None));
        let mut ctx = ctx();
        let s = seen.clone();
        ctx.on_click(move |_, pos| {
            *s.borrow_mut() = Some(pos);
            Ok(())
        });
        ctx.click(0.0, 0.0).unwrap();
        assert_eq!(*seen.borrow(), Some(Vec2::new(-400.0, 300.0)));
    }

    // ── appearance ────────────────────────────────────────────────────────

    #[test]
    fn clear_color_follows_theme_until_overridden() {
        let mut ctx = ctx();
        assert_eq!(ctx.clear_color(), theme_color(Theme::Dark, ThemeRole::Background));
        ctx.set_theme(Theme::Light);
        assert_eq!(ctx.clear_color(), theme_color(Theme::Light, ThemeRole::Background));
        ctx.background(Color::BLACK);
        ctx.set_theme(Theme::Dark);
        assert_eq!(ctx.clear_color(), Color::BLACK);
    }

    #[test]
    fn light_ignores_bad_intensity() {
        let mut ctx = ctx();
        ctx.light(1.5);
        ctx.light(f32::NAN);
        assert_eq!(ctx.lighting().directional, 1.5);
        ctx.light(-1.0);
        assert_eq!(ctx.lighting().directional, 0.0);
    }

    #[test]
    fn dispose_empties_everything() {
        let mut ctx = ctx();
        ctx.spawn(&node_at(0.0));
        ctx.update(|_, _, _| Ok(()));
        ctx.text_element("x");
        ctx.dispose();
        assert!(ctx.scene().is_empty());
        assert!(!ctx.has_updates());
        assert!(ctx.controls().is_empty());
    }
}
