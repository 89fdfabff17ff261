use std::cell::Cell;
use std::rc::Rc;

use log::info;
use nabu_sketch::prelude::*;

/// Wave lab: a damped ripple surface, a travelling sine wave and a vector
/// field probe, all steerable from the control panel.
fn main() -> anyhow::Result<()> {
    Sketch::new()
        .title("Nabu Wave Lab")
        .size(1024.0, 680.0)
        .theme(Theme::Dark)
        .run(setup)
}

fn setup(ctx: &mut Ctx) -> anyhow::Result<()> {
    ctx.set_zoom(2.0)?;
    ctx.light(1.2);

    // ── retained scene ────────────────────────────────────────────────────
    ctx.grid(Some(400.0), Some(20));
    axes(ctx);

    ctx.graph3d(ripple, Some((-80.0, 80.0)), Some((-80.0, 80.0)))?
        .grid_lines(16)?
        .position((0.0, -40.0, 0.0))
        .opacity(0.85);

    ctx.torus()
        .radius(30.0)
        .tube(6.0)
        .color(Color::from_hex(0xF2B134))
        .position((0.0, 60.0, 0.0))
        .rotation((std::f32::consts::FRAC_PI_2, 0.0, 0.0));

    // ── controls ──────────────────────────────────────────────────────────
    let amplitude = ctx.slider("amplitude", 0.0, 60.0, 25.0);
    let frequency = ctx.slider("frequency", 0.1, 4.0, 1.0);
    let show_probe = ctx.checkbox("probe vector", true);
    let clock = ctx.text_element("t = 0.00 s");

    let reset = Rc::new(Cell::new(false));
    let flag = reset.clone();
    ctx.button("reset zoom", move || flag.set(true));

    // ── per frame ─────────────────────────────────────────────────────────
    ctx.update(move |ctx, _dt, t| {
        if reset.replace(false) {
            ctx.set_zoom(2.0)?;
        }
        clock.set_text(format!("t = {t:.2} s"));

        let (a, k) = (amplitude.value(), frequency.value() / 20.0);
        ctx.graph(move |x| a * (k * x - 2.0 * t).sin(), Some(Color::from_hex(0x4FC3F7)), Some((-150.0, 150.0)))?
            .width(2.5)
            .position((0.0, 0.0, -120.0));

        if show_probe.checked() {
            let tip = Vec3::new(60.0 * t.cos(), 30.0 + a * (k * 60.0 - 2.0 * t).sin(), 60.0 * t.sin());
            ctx.vector(tip).color(Color::from_hex(0xE57373));
            ctx.text_billboard(format!("({:.0}, {:.0}, {:.0})", tip.x, tip.y, tip.z))
                .position(tip + Vec3::Y * 10.0);
        }
        Ok(())
    });

    ctx.on_click(|ctx, pos| {
        info!("canvas click at {:.0},{:.0} (zoom {:.2})", pos.x, pos.y, ctx.zoom());
        Ok(())
    });

    ctx.orbit(OrbitConfig::default());
    Ok(())
}

fn ripple(x: f32, z: f32) -> f32 {
    let r = (x * x + z * z).sqrt() / 12.0;
    if r < 1e-3 { 20.0 } else { 20.0 * r.sin() / r * (-r / 8.0).exp() }
}

fn axes(ctx: &mut Ctx) {
    let len = 120.0;
    for (dir, color, name) in [
        (Vec3::X, 0xEF5350, "x"),
        (Vec3::Y, 0x66BB6A, "y"),
        (Vec3::Z, 0x42A5F5, "z"),
    ] {
        ctx.vector(dir * len).color(Color::from_hex(color));
        ctx.text(name).position(dir * (len + 12.0)).color(Color::from_hex(color));
    }
}
