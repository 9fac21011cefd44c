//! Turns a theme and a set of sampled positions into a [`Scene`].
use glam::Vec2;
use rand::RngCore;
use tracing::{info, warn};

use crate::error::Result;
use crate::sampling::{rand_inclusive, RejectionSampling};
use crate::scene::selection::{pick_uniform, shuffled_indices};
use crate::scene::{ObjectId, PlacedObject, Scene};
use crate::theme::ThemeConfig;

/// Composes scenes for one validated theme.
pub struct SceneComposer<'a> {
    /// Theme the scenes are built from.
    pub theme: &'a ThemeConfig,
    target_specs: Vec<usize>,
    all_specs: Vec<usize>,
}

impl<'a> SceneComposer<'a> {
    /// Validate `theme` and prepare a composer for it.
    pub fn try_new(theme: &'a ThemeConfig) -> Result<Self> {
        // Rejects themes without objects or without target-capable objects.
        theme.validate()?;

        Ok(Self {
            theme,
            target_specs: theme.target_spec_indices(),
            all_specs: (0..theme.objects.len()).collect(),
        })
    }

    /// Assign targets and decoys to `points`.
    ///
    /// The target count is drawn from the theme's range and clamped to the
    /// number of points. Targets only use target-capable specs; decoys draw
    /// from every spec, so a decoy can look exactly like a target.
    pub fn compose(&self, points: &[Vec2], rng: &mut dyn RngCore) -> Scene {
        let range = self.theme.target_range;
        let target_count = rand_inclusive(rng, range.min, range.max).min(points.len());

        let order = shuffled_indices(points.len(), rng);
        let (target_slots, decoy_slots) = order.split_at(target_count);

        let targets: Vec<PlacedObject> = target_slots
            .iter()
            .map(|&i| self.place(points[i], &self.target_specs, true, rng))
            .collect();
        let decoys: Vec<PlacedObject> = decoy_slots
            .iter()
            .map(|&i| self.place(points[i], &self.all_specs, false, rng))
            .collect();

        info!(
            "Composed '{}' scene: {} targets, {} decoys.",
            self.theme.key,
            targets.len(),
            decoys.len()
        );

        Scene::from_parts(&self.theme.key, targets, decoys)
    }

    fn place(
        &self,
        position: Vec2,
        specs: &[usize],
        is_target: bool,
        rng: &mut dyn RngCore,
    ) -> PlacedObject {
        // `specs` is never empty: both lists are checked in `try_new`.
        let spec_index = pick_uniform(specs, rng).copied().unwrap_or_default();
        PlacedObject {
            id: ObjectId(0),
            position,
            spec_index,
            is_target,
            found: false,
        }
    }
}

/// Compose a scene for `theme` from already sampled `points`.
pub fn compose(theme: &ThemeConfig, points: &[Vec2], rng: &mut dyn RngCore) -> Result<Scene> {
    Ok(SceneComposer::try_new(theme)?.compose(points, rng))
}

/// Sample the theme's placement area and compose a scene from the result.
///
/// Points are sampled inside the margin-inset area and shifted into world
/// coordinates.
pub fn compose_round(theme: &ThemeConfig, rng: &mut dyn RngCore) -> Result<Scene> {
    let composer = SceneComposer::try_new(theme)?;
    let (origin, extent) = theme.placement_area();

    let (points, report) =
        RejectionSampling::new(theme.min_distance, theme.decor_count).run(extent.x, extent.y, rng);
    if report.is_underfilled() {
        warn!(
            "Theme '{}' placed {}/{} objects; min_distance {} is too large for the area.",
            theme.key, report.accepted, report.requested, theme.min_distance
        );
    }

    let world_points: Vec<Vec2> = points.into_iter().map(|p| p + origin).collect();
    Ok(composer.compose(&world_points, rng))
}
