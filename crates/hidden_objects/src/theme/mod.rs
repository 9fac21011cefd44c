//! Theme configuration: the static description of a themed world and the
//! objects that can appear in it.
use glam::Vec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub mod builtin;

pub use builtin::{builtin_themes, random_theme, resolve_theme, theme_by_key};

/// Key identifying an [`ObjectSpec`] within a theme.
pub type ObjectKey = String;

/// A packed `0xRRGGBB` color.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xff) as u8
    }

    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xff) as u8
    }

    pub const fn b(self) -> u8 {
        (self.0 & 0xff) as u8
    }

    pub const fn to_rgb(self) -> [u8; 3] {
        [self.r(), self.g(), self.b()]
    }
}

/// Geometric shape of an object, carrying only the dimensions it needs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { diameter: f32 },
    Rect { width: f32, height: f32 },
    /// Isosceles triangle whose base and height are both `size`.
    Triangle { size: f32 },
}

impl Shape {
    /// Axis-aligned bounding box size.
    pub fn extent(&self) -> Vec2 {
        match *self {
            Shape::Circle { diameter } => Vec2::splat(diameter),
            Shape::Rect { width, height } => Vec2::new(width, height),
            Shape::Triangle { size } => Vec2::splat(size),
        }
    }

    fn has_positive_dimensions(&self) -> bool {
        let e = self.extent();
        e.x.is_finite() && e.y.is_finite() && e.x > 0.0 && e.y > 0.0
    }
}

/// One kind of object a theme can place.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ObjectSpec {
    pub key: ObjectKey,
    pub label: String,
    pub shape: Shape,
    pub color: Color,
    /// Whether this object may be chosen as something the player has to find.
    pub is_target: bool,
}

impl ObjectSpec {
    pub fn new(
        key: impl Into<ObjectKey>,
        label: impl Into<String>,
        shape: Shape,
        color: Color,
        is_target: bool,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            shape,
            color,
            is_target,
        }
    }

    /// A spec that is only ever used as decoration.
    pub fn decor(
        key: impl Into<ObjectKey>,
        label: impl Into<String>,
        shape: Shape,
        color: Color,
    ) -> Self {
        Self::new(key, label, shape, color, false)
    }

    /// A spec that can be chosen as a target.
    pub fn target(
        key: impl Into<ObjectKey>,
        label: impl Into<String>,
        shape: Shape,
        color: Color,
    ) -> Self {
        Self::new(key, label, shape, color, true)
    }
}

/// Inclusive range for the number of targets in a round.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetRange {
    pub min: usize,
    pub max: usize,
}

impl TargetRange {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, n: usize) -> bool {
        (self.min..=self.max).contains(&n)
    }
}

/// Static description of a themed world.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ThemeConfig {
    pub key: String,
    pub name: String,
    pub background_color: Color,
    pub ground_color: Color,
    /// World size in world units.
    pub world_width: f32,
    pub world_height: f32,
    /// Inset from every world edge that objects are kept out of.
    #[cfg_attr(feature = "serde", serde(default = "default_margin"))]
    pub margin: f32,
    /// Minimum distance between placed objects.
    pub min_distance: f32,
    /// Number of positions to sample (targets and decoys together).
    pub decor_count: usize,
    pub target_range: TargetRange,
    /// Round length in seconds.
    pub time_limit: u32,
    /// Visual used by the renderer for hint pulses.
    pub hint_texture_key: String,
    pub objects: Vec<ObjectSpec>,
}

pub const DEFAULT_MARGIN: f32 = 100.0;
pub const DEFAULT_HINT_TEXTURE: &str = "hint_smile";

#[cfg(feature = "serde")]
fn default_margin() -> f32 {
    DEFAULT_MARGIN
}

impl ThemeConfig {
    /// Create a theme with the default world settings and no objects.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            background_color: Color(0x87ceeb),
            ground_color: Color(0xfff1c1),
            world_width: 2400.0,
            world_height: 1400.0,
            margin: DEFAULT_MARGIN,
            min_distance: 55.0,
            decor_count: 220,
            target_range: TargetRange::new(2, 4),
            time_limit: 90,
            hint_texture_key: DEFAULT_HINT_TEXTURE.to_owned(),
            objects: Vec::new(),
        }
    }

    pub fn with_colors(mut self, background: Color, ground: Color) -> Self {
        self.background_color = background;
        self.ground_color = ground;
        self
    }

    pub fn with_world_size(mut self, width: f32, height: f32) -> Self {
        self.world_width = width;
        self.world_height = height;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    pub fn with_decor_count(mut self, decor_count: usize) -> Self {
        self.decor_count = decor_count;
        self
    }

    pub fn with_target_range(mut self, min: usize, max: usize) -> Self {
        self.target_range = TargetRange::new(min, max);
        self
    }

    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit = seconds;
        self
    }

    pub fn with_hint_texture(mut self, key: impl Into<String>) -> Self {
        self.hint_texture_key = key.into();
        self
    }

    pub fn with_object(mut self, object: ObjectSpec) -> Self {
        self.objects.push(object);
        self
    }

    pub fn with_objects(mut self, objects: impl IntoIterator<Item = ObjectSpec>) -> Self {
        self.objects.extend(objects);
        self
    }

    /// Indices into [`Self::objects`] of the specs that can be targets.
    pub fn target_spec_indices(&self) -> Vec<usize> {
        self.objects
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_target)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn object(&self, index: usize) -> Option<&ObjectSpec> {
        self.objects.get(index)
    }

    /// Top-left corner and size of the rectangle objects are placed in.
    pub fn placement_area(&self) -> (Vec2, Vec2) {
        let origin = Vec2::splat(self.margin.max(0.0));
        let extent = Vec2::new(
            self.world_width - 2.0 * origin.x,
            self.world_height - 2.0 * origin.y,
        );
        (origin, extent)
    }

    /// Validates the theme, returning an error if a round cannot be built from it.
    pub fn validate(&self) -> Result<()> {
        let err = |message: String| Err(Error::configuration(&self.key, message));

        if !(self.world_width > 0.0 && self.world_height > 0.0) {
            return err("world size must be > 0 in both components".into());
        }
        let (_, extent) = self.placement_area();
        if !(extent.x > 0.0 && extent.y > 0.0) {
            return err(format!(
                "margin {} leaves no placement area in a {}x{} world",
                self.margin, self.world_width, self.world_height
            ));
        }
        if self.target_range.min > self.target_range.max {
            return err(format!(
                "target range min {} exceeds max {}",
                self.target_range.min, self.target_range.max
            ));
        }
        if self.time_limit == 0 {
            return err("time limit must be at least one second".into());
        }
        if self.objects.is_empty() {
            return err("theme has no objects".into());
        }
        if let Some(bad) = self.objects.iter().find(|o| !o.shape.has_positive_dimensions()) {
            return err(format!("object '{}' has non-positive dimensions", bad.key));
        }
        if !self.objects.iter().any(|o| o.is_target) {
            return err("no object is marked as a target".into());
        }

        Ok(())
    }
}
