//! Menu items and the per-item glow map

use bevy::math::Vec4;
use serde::{Deserialize, Serialize};

/// How an item glows
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Glow {
    #[default]
    Off,
    /// Glow with the shader's default colour
    Default,
    /// Glow with an explicit linear RGB colour
    Color([f32; 3]),
}

/// Item shown on the orbit menu.
///
/// The image itself stays with the host; the core only needs the index and
/// the glow setting.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct MenuItem {
    pub index: usize,
    #[serde(default)]
    pub glow: Glow,
}

impl MenuItem {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            glow: Glow::Off,
        }
    }

    pub fn with_glow(mut self, glow: Glow) -> Self {
        self.glow = glow;
        self
    }
}

/// One RGBA entry per item: x = glow enabled, yzw = colour
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlowMap {
    entries: Vec<Vec4>,
}

impl GlowMap {
    /// All items dark
    pub fn cleared(item_count: usize) -> Self {
        Self {
            entries: vec![Vec4::ZERO; item_count],
        }
    }

    /// Glow entries taken from `items`; indices past `item_count` are skipped
    pub fn from_items(items: &[MenuItem], item_count: usize) -> Self {
        let mut map = Self::cleared(item_count);
        for item in items {
            map.set(item.index, item.glow);
        }
        map
    }

    /// Only `index` glows, with the default colour
    pub fn single(index: Option<usize>, item_count: usize) -> Self {
        let mut map = Self::cleared(item_count);
        if let Some(index) = index {
            map.set(index, Glow::Default);
        }
        map
    }

    pub fn set(&mut self, index: usize, glow: Glow) {
        let Some(entry) = self.entries.get_mut(index) else {
            return;
        };
        *entry = match glow {
            Glow::Off => Vec4::ZERO,
            Glow::Default => Vec4::new(1.0, 0.0, 0.0, 0.0),
            Glow::Color([r, g, b]) => Vec4::new(1.0, r, g, b),
        };
    }

    pub fn entries(&self) -> &[Vec4] {
        &self.entries
    }

    pub fn is_glowing(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|e| e.x > 0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glow_entries_encode_flag_and_colour() {
        let items = [
            MenuItem::new(0),
            MenuItem::new(1).with_glow(Glow::Default),
            MenuItem::new(2).with_glow(Glow::Color([0.8, 0.2, 0.3])),
            MenuItem::new(9).with_glow(Glow::Default),
        ];
        let map = GlowMap::from_items(&items, 3);
        assert_eq!(map.len(), 3);
        assert_eq!(map.entries()[0], Vec4::ZERO);
        assert_eq!(map.entries()[1], Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(map.entries()[2], Vec4::new(1.0, 0.8, 0.2, 0.3));
        assert!(!map.is_glowing(9));
    }

    #[test]
    fn single_glow_highlights_one_item() {
        let map = GlowMap::single(Some(2), 4);
        let glowing: Vec<_> = (0..4).filter(|&i| map.is_glowing(i)).collect();
        assert_eq!(glowing, vec![2]);
        assert!(GlowMap::single(None, 4).entries().iter().all(|e| *e == Vec4::ZERO));
    }

    #[test]
    fn items_deserialize_with_default_glow() {
        let items: Vec<MenuItem> =
            serde_json::from_str(r#"[{ "index": 0 }, { "index": 1, "glow": { "color": [1, 0, 0] } }]"#)
                .unwrap();
        assert_eq!(items[0].glow, Glow::Off);
        assert_eq!(items[1].glow, Glow::Color([1.0, 0.0, 0.0]));
    }
}
