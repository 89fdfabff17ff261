use nabu_engine::paint::Color;

/// Color scheme for defaults and the clear color.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Semantic slot in a [`Theme`] palette.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ThemeRole {
    Background,
    Foreground,
    Primary,
    Secondary,
    Accent,
    Grid,
    Axis,
    Muted,
}

impl ThemeRole {
    pub const ALL: [ThemeRole; 8] = [
        ThemeRole::Background,
        ThemeRole::Foreground,
        ThemeRole::Primary,
        ThemeRole::Secondary,
        ThemeRole::Accent,
        ThemeRole::Grid,
        ThemeRole::Axis,
        ThemeRole::Muted,
    ];
}

/// Palette lookup. Every call builds a fresh value; callers may mutate the
/// result freely without affecting later lookups.
pub fn theme_color(theme: Theme, role: ThemeRole) -> Color {
    let hex = match (theme, role) {
        (Theme::Light, ThemeRole::Background) => 0xfafafa,
        (Theme::Light, ThemeRole::Foreground) => 0x1f2328,
        (Theme::Light, ThemeRole::Primary) => 0x2f6fdf,
        (Theme::Light, ThemeRole::Secondary) => 0xd9480f,
        (Theme::Light, ThemeRole::Accent) => 0x2b8a3e,
        (Theme::Light, ThemeRole::Grid) => 0xdde1e6,
        (Theme::Light, ThemeRole::Axis) => 0x8c959f,
        (Theme::Light, ThemeRole::Muted) => 0x6e7781,

        (Theme::Dark, ThemeRole::Background) => 0x16181d,
        (Theme::Dark, ThemeRole::Foreground) => 0xe6e8eb,
        (Theme::Dark, ThemeRole::Primary) => 0x5c9dff,
        (Theme::Dark, ThemeRole::Secondary) => 0xff8a4c,
        (Theme::Dark, ThemeRole::Accent) => 0x51cf66,
        (Theme::Dark, ThemeRole::Grid) => 0x2c3038,
        (Theme::Dark, ThemeRole::Axis) => 0x5a616d,
        (Theme::Dark, ThemeRole::Muted) => 0x9198a1,
    };
    Color::from_hex(hex)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── purity ────────────────────────────────────────────────────────────

    #[test]
    fn lookups_are_independent_values() {
        let mut a = theme_color(Theme::Dark, ThemeRole::Primary);
        a = a.lerp(Color::WHITE, 0.5);
        a.r = 0.0;
        assert_ne!(a, theme_color(Theme::Dark, ThemeRole::Primary));
        assert_eq!(theme_color(Theme::Dark, ThemeRole::Primary), theme_color(Theme::Dark, ThemeRole::Primary));
    }

    // ── contrast ──────────────────────────────────────────────────────────

    #[test]
    fn foreground_contrasts_with_background() {
        for theme in [Theme::Light, Theme::Dark] {
            let bg = theme_color(theme, ThemeRole::Background).luminance();
            let fg = theme_color(theme, ThemeRole::Foreground).luminance();
            assert!((bg - fg).abs() > 0.5, "{theme:?}");
        }
    }

    #[test]
    fn every_role_is_opaque() {
        for theme in [Theme::Light, Theme::Dark] {
            for role in ThemeRole::ALL {
                assert_eq!(theme_color(theme, role).a, 1.0);
            }
        }
    }
}
