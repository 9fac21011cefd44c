//! Minimum-separation rejection sampling.
//!
//! Points are drawn uniformly over `[0, width) x [0, height)` and kept only if
//! they are at least `min_distance` away from every point kept so far. The
//! check is a linear scan over the accepted set, which is fast enough for the
//! few hundred objects a themed world holds.
use glam::Vec2;
use mint::Vector2;
use rand::RngCore;
use tracing::debug;

use crate::sampling::{next_down, rand01, PositionSampling};

/// Attempts granted per requested point when no explicit budget is given.
pub const DEFAULT_ATTEMPTS_PER_POINT: usize = 40;

/// Rejection sampling with a minimum separation between accepted points.
#[derive(Debug, Clone)]
pub struct RejectionSampling {
    /// Minimum distance between accepted points in world units. `<= 0` disables the check.
    pub min_distance: f32,
    /// Number of points wanted.
    pub count: usize,
    /// Total draw budget. `None` means `DEFAULT_ATTEMPTS_PER_POINT * count`.
    pub max_attempts: Option<usize>,
}

impl RejectionSampling {
    /// Create a sampler that wants `count` points at least `min_distance` apart.
    pub fn new(min_distance: f32, count: usize) -> Self {
        Self {
            min_distance,
            count,
            max_attempts: None,
        }
    }

    /// Override the total number of draws.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// The draw budget actually used.
    pub fn attempt_budget(&self) -> usize {
        self.max_attempts
            .unwrap_or_else(|| self.count.saturating_mul(DEFAULT_ATTEMPTS_PER_POINT))
    }

    /// Run the sampler over `[0, width) x [0, height)` and report how it went.
    pub fn run(
        &self,
        width: f32,
        height: f32,
        rng: &mut dyn RngCore,
    ) -> (Vec<Vec2>, SamplingReport) {
        let budget = self.attempt_budget();
        let mut report = SamplingReport {
            requested: self.count,
            accepted: 0,
            attempts: 0,
            budget,
        };

        let usable = |v: f32| v.is_finite() && v > 0.0;
        if self.count == 0 || !usable(width) || !usable(height) {
            return (Vec::new(), report);
        }

        let min_dist_sq = if self.min_distance > 0.0 {
            self.min_distance * self.min_distance
        } else {
            0.0
        };
        let max_x = next_down(width);
        let max_y = next_down(height);

        let mut points: Vec<Vec2> = Vec::with_capacity(self.count.min(budget).min(1024));
        while points.len() < self.count && report.attempts < budget {
            report.attempts += 1;

            let x = (rand01(rng) * width).clamp(0.0, max_x);
            let y = (rand01(rng) * height).clamp(0.0, max_y);
            let candidate = Vec2::new(x, y);

            let clear = points
                .iter()
                .all(|p| p.distance_squared(candidate) >= min_dist_sq);
            if clear {
                points.push(candidate);
            }
        }

        report.accepted = points.len();
        if report.is_underfilled() {
            debug!(
                "Rejection sampling accepted {}/{} points after {} attempts.",
                report.accepted, report.requested, report.attempts
            );
        }

        (points, report)
    }
}

impl PositionSampling for RejectionSampling {
    fn generate(&self, domain_extent: Vector2<f32>, rng: &mut dyn RngCore) -> Vec<Vector2<f32>> {
        let (points, _) = self.run(domain_extent.x, domain_extent.y, rng);
        points.into_iter().map(Into::into).collect()
    }
}

/// Outcome of a sampling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingReport {
    /// Points requested.
    pub requested: usize,
    /// Points accepted.
    pub accepted: usize,
    /// Draws consumed.
    pub attempts: usize,
    /// Draw budget.
    pub budget: usize,
}

impl SamplingReport {
    /// True when fewer points than requested were accepted.
    pub fn is_underfilled(&self) -> bool {
        self.accepted < self.requested
    }
}

/// Scatter up to `desired_count` points over `[0, width) x [0, height)`, each at
/// least `min_distance` from the others, using the default attempt budget.
pub fn sample(
    width: f32,
    height: f32,
    min_distance: f32,
    desired_count: usize,
    rng: &mut dyn RngCore,
) -> Vec<Vec2> {
    RejectionSampling::new(min_distance, desired_count)
        .run(width, height, rng)
        .0
}

/// Like [`sample`], with an explicit attempt budget and a [`SamplingReport`].
pub fn sample_with_report(
    width: f32,
    height: f32,
    min_distance: f32,
    desired_count: usize,
    max_attempts: usize,
    rng: &mut dyn RngCore,
) -> (Vec<Vec2>, SamplingReport) {
    RejectionSampling::new(min_distance, desired_count)
        .with_max_attempts(max_attempts)
        .run(width, height, rng)
}
