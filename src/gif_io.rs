use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::path::Path;

/// Encode the frame sequence as a looping animated GIF.
pub fn save_gif(path: &Path, frames: Vec<RgbaImage>, fps: u32) -> Result<(), String> {
    let file = File::create(path)
        .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
    let mut encoder = GifEncoder::new_with_speed(file, 10);
    encoder
        .set_repeat(Repeat::Infinite)
        .map_err(|e| format!("Failed to configure GIF encoder: {e}"))?;

    let delay = Delay::from_numer_denom_ms(1000, fps);
    for frame in frames {
        encoder
            .encode_frame(Frame::from_parts(frame, 0, 0, delay))
            .map_err(|e| format!("Failed to encode GIF frame: {e}"))?;
    }
    Ok(())
}

/// Dump a single frame (e.g. the static cross section) as a PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<(), String> {
    img.save(path)
        .map_err(|e| format!("Failed to save image: {e}"))
}
