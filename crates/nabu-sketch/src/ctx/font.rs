use std::sync::Arc;

use log::{debug, warn};
use nabu_engine::text::{FontId, FontSystem};

/// Fonts tried, in order, when no font bytes were configured.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// The context's single text font, loaded on first use.
///
/// A failed load is attempted once; text then degrades to nothing instead of
/// failing the caller.
#[derive(Debug, Default)]
pub(crate) struct FontSlot {
    source: Option<Arc<[u8]>>,
    id: Option<FontId>,
    attempted: bool,
}

impl FontSlot {
    pub(crate) fn new(source: Option<Arc<[u8]>>) -> Self {
        Self { source, id: None, attempted: false }
    }

    #[inline]
    pub(crate) fn id(&self) -> Option<FontId> {
        self.id
    }

    pub(crate) fn ensure(&mut self, fonts: &mut FontSystem) -> Option<FontId> {
        if self.attempted {
            return self.id;
        }
        self.attempted = true;

        let bytes: Option<Vec<u8>> = match &self.source {
            Some(bytes) => Some(bytes.to_vec()),
            None => SYSTEM_FONTS.iter().find_map(|p| std::fs::read(p).ok()),
        };
        let Some(bytes) = bytes else {
            warn!("no font configured and no system font found; text will not be drawn");
            return None;
        };

        match fonts.load_font(&bytes) {
            Ok(id) => {
                debug!("text font loaded");
                self.id = Some(id);
            }
            Err(e) => warn!("{e}; text will not be drawn"),
        }
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_bytes_fail_once_and_stay_empty() {
        let mut fonts = FontSystem::new();
        let mut slot = FontSlot::new(Some(Arc::from(&b"not a font"[..])));
        assert_eq!(slot.ensure(&mut fonts), None);
        assert!(slot.attempted);
        assert_eq!(slot.ensure(&mut fonts), None);
        assert_eq!(fonts.default_font(), None);
    }
}
