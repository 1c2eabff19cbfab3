use image::Rgba;

use crate::geometry::ColorTag;
use crate::sim::{CarrierKind, Generation};

pub const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BORDER: Rgba<u8> = Rgba([0, 0, 0, 255]);
/// Traversing particle and its trail.
pub const TRACK: Rgba<u8> = Rgba([128, 0, 128, 255]);
pub const ELECTRON: Rgba<u8> = Rgba([0, 0, 255, 255]);
pub const HOLE: Rgba<u8> = Rgba([255, 0, 0, 255]);

/// Doping/metalization layer colors (the usual CSS names).
pub fn shape_color(tag: ColorTag) -> Rgba<u8> {
    match tag {
        ColorTag::Metalization => Rgba([192, 192, 192, 255]), // silver
        ColorTag::Insulation => Rgba([255, 140, 0, 255]),     // darkorange
        ColorTag::NPlusPlus => Rgba([65, 105, 225, 255]),     // royalblue
        ColorTag::Gain => Rgba([240, 128, 128, 255]),         // lightcoral
        ColorTag::Bulk => Rgba([255, 228, 225, 255]),         // mistyrose
        ColorTag::PPlusPlus => Rgba([205, 92, 92, 255]),      // indianred
        ColorTag::Trench => Rgba([0, 0, 0, 255]),
    }
}

pub fn carrier_color(kind: CarrierKind) -> Rgba<u8> {
    match kind {
        CarrierKind::Electron => ELECTRON,
        CarrierKind::Hole => HOLE,
    }
}

/// Secondaries draw slightly smaller than primaries so an avalanche burst
/// reads as a cloud around its parent.
pub fn carrier_radius(kind: CarrierKind, generation: Generation, scale: f64) -> f64 {
    let base = match kind {
        CarrierKind::Electron => 3.0,
        CarrierKind::Hole => 5.0,
    };
    let shrink = match generation {
        Generation::Primary => 1.0,
        Generation::Secondary => 0.75,
    };
    base * shrink * (scale / 4.0)
}
