use image::RgbaImage;

use crate::geometry::Scene;
use crate::render::canvas::Canvas;
use crate::render::palette;
use crate::sim::FrameSnapshot;

const BORDER_PX: u32 = 2;
const TRACK_RADIUS_PX: f64 = 6.0;
const TRAIL_HALF_WIDTH_PX: f64 = 1.0;
const HOLE_RING_PX: f64 = 2.0;

/// Rasterize the static cross section once; every animation frame starts
/// from a copy of this buffer.
pub fn rasterize_scene(scene: &Scene, scale: f64) -> RgbaImage {
    let mut canvas = Canvas::new(scene.width, scene.height, scale, palette::BACKGROUND);
    for shape in &scene.shapes {
        canvas.fill_rect(
            shape.x,
            shape.y,
            shape.width,
            shape.height,
            palette::shape_color(shape.color),
        );
    }
    canvas.border(BORDER_PX, palette::BORDER);
    canvas.into_image()
}

/// Overlay one frame's track and live carriers onto the static scene.
pub fn compose_frame(base: &RgbaImage, snapshot: &FrameSnapshot, scene: &Scene, scale: f64) -> RgbaImage {
    let s = scale / 4.0;
    let mut canvas = Canvas::over(base.clone(), scene.height, scale);

    canvas.polyline(&snapshot.trail, TRAIL_HALF_WIDTH_PX * s, palette::TRACK);
    let (tx, ty) = snapshot.track_position;
    canvas.fill_disc(tx, ty, TRACK_RADIUS_PX * s, palette::TRACK);

    for dot in &snapshot.dots {
        let radius = palette::carrier_radius(dot.kind, dot.generation, scale);
        match dot.kind {
            crate::sim::CarrierKind::Electron => {
                canvas.fill_disc(dot.x, dot.y, radius, palette::carrier_color(dot.kind));
            }
            crate::sim::CarrierKind::Hole => {
                canvas.ring(dot.x, dot.y, radius, HOLE_RING_PX * s, palette::carrier_color(dot.kind));
            }
        }
    }

    canvas.into_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::build_layout;
    use crate::params::DetectorParams;
    use crate::sim::{CarrierDot, CarrierKind, Generation};

    fn scene() -> Scene {
        build_layout(&DetectorParams::default()).unwrap()
    }

    #[test]
    fn scene_raster_has_the_layer_colors() {
        let scene = scene();
        let img = rasterize_scene(&scene, 4.0);
        // Center of the bulk (x=92.5, y=45) -> mistyrose.
        let px = img.get_pixel(370, (100.0 - 45.0) as u32 * 4);
        assert_eq!(px.0, [255, 228, 225, 255]);
        // Top stripe is metalization silver, just inside the border.
        let px = img.get_pixel(370, 4);
        assert_eq!(px.0, [192, 192, 192, 255]);
    }

    #[test]
    fn carriers_paint_over_the_base() {
        let scene = scene();
        let base = rasterize_scene(&scene, 4.0);
        let snapshot = FrameSnapshot {
            frame: 10,
            track_position: (70.0, -100.0), // long gone off canvas
            trail: vec![(100.0, 100.0), (85.0, 0.0)],
            dots: vec![CarrierDot {
                kind: CarrierKind::Electron,
                generation: Generation::Primary,
                x: 92.5,
                y: 45.0,
            }],
        };
        let img = compose_frame(&base, &snapshot, &scene, 4.0);
        let px = img.get_pixel(370, 220);
        assert_eq!(px.0, [0, 0, 255, 255]);
        // Base stays untouched.
        assert_eq!(base.get_pixel(370, 220).0, [255, 228, 225, 255]);
    }
}
