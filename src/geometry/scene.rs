use crate::error::Error;
use crate::geometry::layers::LayerStack;
use crate::geometry::pixels::{self, PixelColumn};
use crate::geometry::trenches;
use crate::params::DetectorParams;

/// x indent for the layer label anchors so they sit inside what they label.
const LABEL_INDENT: f64 = 10.0;

/// Semantic color of a shape; the rendering surface maps tags to actual RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorTag {
    Metalization,
    Insulation,
    NPlusPlus,
    Gain,
    Bulk,
    PPlusPlus,
    Trench,
}

/// An axis-aligned rectangle in cross-section coordinates (um), with its
/// bottom-left corner at (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: ColorTag,
    pub label: Option<&'static str>,
}

/// Anchor point for a layer annotation. The core only positions labels;
/// drawing text is up to the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelAnchor {
    pub text: &'static str,
    pub x: f64,
    pub y: f64,
}

/// Static scene description: canvas extent plus shapes in painter's order
/// (later shapes draw over earlier ones).
#[derive(Debug, Clone)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
    pub labels: Vec<LabelAnchor>,
}

impl Scene {
    pub fn shapes_with(&self, color: ColorTag) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(move |s| s.color == color)
    }
}

/// Build the full static cross section: full-width layer stripes, per-pixel
/// gain implants and metal contacts, inter-pixel trenches, and the p++
/// backside stripe painted last.
pub fn build_layout(params: &DetectorParams) -> Result<Scene, Error> {
    params.validate()?;
    let stack = LayerStack::new(params)?;
    let columns = pixels::pixel_columns(params);

    let mut shapes = Vec::new();
    push_stripe(&mut shapes, params.width, stack.metalization_span(), ColorTag::Metalization, Some("metalization"));
    push_stripe(&mut shapes, params.width, stack.insulation_span(), ColorTag::Insulation, Some("insulation"));
    push_stripe(&mut shapes, params.width, stack.n_plus_plus_span(), ColorTag::NPlusPlus, Some("n++"));
    push_stripe(&mut shapes, params.width, stack.bulk_span(), ColorTag::Bulk, Some("p- (bulk)"));

    for column in &columns {
        push_pixel_shapes(&mut shapes, params, &stack, column);
    }

    push_trench_shapes(&mut shapes, params, &columns);

    // Backside stripe goes last so it paints over the bulk's lower edge.
    push_stripe(&mut shapes, params.width, stack.p_plus_plus_span(), ColorTag::PPlusPlus, Some("p++"));

    let labels = layer_labels(&stack);

    Ok(Scene {
        width: params.width,
        height: params.thickness,
        shapes,
        labels,
    })
}

fn push_stripe(
    shapes: &mut Vec<Shape>,
    width: f64,
    (bottom, top): (f64, f64),
    color: ColorTag,
    label: Option<&'static str>,
) {
    shapes.push(Shape {
        x: 0.0,
        y: bottom,
        width,
        height: top - bottom,
        color,
        label,
    });
}

/// Gain implant spanning the full pitch, plus a contact finger flush with
/// each implant edge reaching down from the top surface.
fn push_pixel_shapes(
    shapes: &mut Vec<Shape>,
    params: &DetectorParams,
    stack: &LayerStack,
    column: &PixelColumn,
) {
    let contact_y = params.thickness - params.contact_depth;
    shapes.push(Shape {
        x: column.left,
        y: contact_y,
        width: params.contact_width,
        height: params.contact_depth,
        color: ColorTag::Metalization,
        label: None,
    });
    shapes.push(Shape {
        x: column.right(params.pixel_pitch) - params.contact_width,
        y: contact_y,
        width: params.contact_width,
        height: params.contact_depth,
        color: ColorTag::Metalization,
        label: None,
    });

    if let Some((band_bottom, band_top)) = stack.gain_band() {
        shapes.push(Shape {
            x: column.left,
            y: band_bottom,
            width: params.pixel_pitch,
            height: band_top - band_bottom,
            color: ColorTag::Gain,
            label: Some("p+ (gain)"),
        });
    }
}

/// Trenches occupy the gaps between consecutive implants (pixel_count - 1
/// gaps), reaching down from the top surface.
fn push_trench_shapes(shapes: &mut Vec<Shape>, params: &DetectorParams, columns: &[PixelColumn]) {
    let trench_y = params.thickness - params.trench_depth;
    for column in columns.iter().take(columns.len().saturating_sub(1)) {
        let gap_start = column.right(params.pixel_pitch);
        for x in trenches::trench_positions(
            params.trench_mode,
            gap_start,
            params.pixel_gap,
            params.trench_width,
        ) {
            shapes.push(Shape {
                x,
                y: trench_y,
                width: params.trench_width,
                height: params.trench_depth,
                color: ColorTag::Trench,
                label: None,
            });
        }
    }
}

fn layer_labels(stack: &LayerStack) -> Vec<LabelAnchor> {
    let mut labels = Vec::new();
    let mut push = |text: &'static str, (bottom, top): (f64, f64)| {
        labels.push(LabelAnchor {
            text,
            x: LABEL_INDENT,
            y: (bottom + top) / 2.0,
        });
    };
    push("metalization", stack.metalization_span());
    push("insulation", stack.insulation_span());
    push("n++", stack.n_plus_plus_span());
    if let Some(band) = stack.gain_band() {
        push("p+ (gain)", band);
    }
    push("p- (bulk)", stack.bulk_span());
    push("p++", stack.p_plus_plus_span());
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::trenches::TrenchMode;

    #[test]
    fn trench_mode_controls_trench_shape_count() {
        for (mode, per_gap) in [
            (TrenchMode::None, 0usize),
            (TrenchMode::Single, 1),
            (TrenchMode::Double, 2),
        ] {
            let mut params = DetectorParams::default();
            params.trench_mode = mode;
            let scene = build_layout(&params).unwrap();
            let gaps = (params.pixel_count - 1) as usize;
            assert_eq!(scene.shapes_with(ColorTag::Trench).count(), per_gap * gaps);
        }
    }

    #[test]
    fn every_pixel_gets_an_implant_and_two_contacts() {
        let scene = build_layout(&DetectorParams::default()).unwrap();
        assert_eq!(scene.shapes_with(ColorTag::Gain).count(), 3);
        // 1 full-width stripe + 2 contacts per pixel
        assert_eq!(scene.shapes_with(ColorTag::Metalization).count(), 1 + 2 * 3);
    }

    #[test]
    fn planar_preset_has_no_gain_shapes_or_label() {
        let mut params = DetectorParams::default();
        params.gain = 0.0;
        let scene = build_layout(&params).unwrap();
        assert_eq!(scene.shapes_with(ColorTag::Gain).count(), 0);
        assert!(scene.labels.iter().all(|l| l.text != "p+ (gain)"));
    }

    #[test]
    fn implants_sit_in_the_gain_band() {
        let scene = build_layout(&DetectorParams::default()).unwrap();
        for implant in scene.shapes_with(ColorTag::Gain) {
            assert_eq!(implant.y, 75.0);
            assert_eq!(implant.height, 10.0);
            assert_eq!(implant.width, 55.0);
        }
    }

    #[test]
    fn single_trench_centered_in_each_gap() {
        let mut params = DetectorParams::default();
        params.trench_mode = TrenchMode::Single;
        let scene = build_layout(&params).unwrap();
        let xs: Vec<f64> = scene.shapes_with(ColorTag::Trench).map(|s| s.x).collect();
        // gaps span 60..65 and 120..125
        assert_eq!(xs, vec![62.0, 122.0]);
    }

    #[test]
    fn invalid_params_fail_before_any_layout() {
        let mut params = DetectorParams::default();
        params.pixel_count = 0;
        assert!(build_layout(&params).is_err());
    }
}
