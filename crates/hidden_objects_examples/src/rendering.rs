use std::path::Path;

use glam::Vec2;
use hidden_objects::prelude::*;
use image::{Rgb, RgbImage};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Install a `fmt` subscriber honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Image output settings for [`render_scene_to_png`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output size in pixels.
    pub image_size: (u32, u32),
    /// Draw a ring around every target, found or not.
    pub reveal_targets: bool,
    /// Ring color used when revealing targets.
    pub reveal_color: [u8; 3],
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            reveal_targets: false,
            reveal_color: [255, 255, 255],
        }
    }

    pub fn with_revealed_targets(mut self, reveal: bool) -> Self {
        self.reveal_targets = reveal;
        self
    }
}

/// Draw `scene` with the shapes and colors of `theme` and save it as PNG.
pub fn render_scene_to_png(
    scene: &Scene,
    theme: &ThemeConfig,
    config: &RenderConfig,
    path: impl AsRef<Path>,
) -> anyhow::Result<()> {
    let (w, h) = config.image_size;
    anyhow::ensure!(w > 0 && h > 0, "image size must be non-zero");

    let scale = Vec2::new(
        w as f32 / theme.world_width,
        h as f32 / theme.world_height,
    );
    let mut img = RgbImage::from_pixel(w, h, Rgb(theme.ground_color.to_rgb()));

    // Draw top to bottom so lower objects overlap higher ones, as depth-by-y does in game.
    let mut order: Vec<&PlacedObject> = scene.iter().collect();
    order.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));

    for obj in order {
        let Some(spec) = theme.object(obj.spec_index) else {
            anyhow::bail!("object {} references missing spec {}", obj.id, obj.spec_index);
        };
        let center = obj.position * scale;
        let size = spec.shape.extent() * scale;
        let color = Rgb(spec.color.to_rgb());
        match spec.shape {
            Shape::Circle { .. } => fill_ellipse(&mut img, center, size * 0.5, color),
            Shape::Rect { .. } => fill_rect(&mut img, center, size * 0.5, color),
            Shape::Triangle { .. } => fill_triangle(&mut img, center, size, color),
        }
        if config.reveal_targets && obj.is_target {
            let radius = size.max_element() * 0.5 + 3.0;
            draw_ring(&mut img, center, radius, Rgb(config.reveal_color));
        }
    }

    img.save(path.as_ref())?;
    info!(
        "Wrote {} ({} objects, {} targets).",
        path.as_ref().display(),
        scene.len(),
        scene.total_targets()
    );
    Ok(())
}

fn pixel_bounds(img: &RgbImage, min: Vec2, max: Vec2) -> (u32, u32, u32, u32) {
    let clamp_x = |v: f32| v.clamp(0.0, img.width() as f32) as u32;
    let clamp_y = |v: f32| v.clamp(0.0, img.height() as f32) as u32;
    (
        clamp_x(min.x.floor()),
        clamp_y(min.y.floor()),
        clamp_x(max.x.ceil()),
        clamp_y(max.y.ceil()),
    )
}

fn fill_where(
    img: &mut RgbImage,
    min: Vec2,
    max: Vec2,
    color: Rgb<u8>,
    inside: impl Fn(Vec2) -> bool,
) {
    let (x0, y0, x1, y1) = pixel_bounds(img, min, max);
    for y in y0..y1 {
        for x in x0..x1 {
            if inside(Vec2::new(x as f32 + 0.5, y as f32 + 0.5)) {
                img.put_pixel(x, y, color);
            }
        }
    }
}

fn fill_ellipse(img: &mut RgbImage, center: Vec2, radii: Vec2, color: Rgb<u8>) {
    let radii = radii.max(Vec2::splat(0.5));
    fill_where(img, center - radii, center + radii, color, |p| {
        ((p - center) / radii).length_squared() <= 1.0
    });
}

fn fill_rect(img: &mut RgbImage, center: Vec2, half: Vec2, color: Rgb<u8>) {
    fill_where(img, center - half, center + half, color, |_| true);
}

/// Isosceles triangle pointing up, base and height given by `size`.
fn fill_triangle(img: &mut RgbImage, center: Vec2, size: Vec2, color: Rgb<u8>) {
    let half = size * 0.5;
    let top = center.y - half.y;
    fill_where(img, center - half, center + half, color, |p| {
        let t = ((p.y - top) / size.y.max(f32::EPSILON)).clamp(0.0, 1.0);
        (p.x - center.x).abs() <= half.x * t
    });
}

fn draw_ring(img: &mut RgbImage, center: Vec2, radius: f32, color: Rgb<u8>) {
    let outer = Vec2::splat(radius + 1.0);
    fill_where(img, center - outer, center + outer, color, |p| {
        (p.distance(center) - radius).abs() <= 1.0
    });
}
