use image::{Rgba, RgbaImage};

/// Paints micrometer-space primitives into an RGBA buffer.
///
/// The cross-section origin is the bottom-left corner; image rows grow
/// downward, so y flips during the transform. All painting is clipped to the
/// buffer bounds.
pub struct Canvas {
    img: RgbaImage,
    scale: f64,
    height_um: f64,
}

impl Canvas {
    pub fn new(width_um: f64, height_um: f64, scale: f64, background: Rgba<u8>) -> Self {
        let w = (width_um * scale).ceil().max(1.0) as u32;
        let h = (height_um * scale).ceil().max(1.0) as u32;
        Self {
            img: RgbaImage::from_pixel(w, h, background),
            scale,
            height_um,
        }
    }

    /// Continue painting over an already-rendered buffer.
    pub fn over(img: RgbaImage, height_um: f64, scale: f64) -> Self {
        Self { img, scale, height_um }
    }

    pub fn into_image(self) -> RgbaImage {
        self.img
    }

    /// um -> px, flipping y.
    fn to_px(&self, x_um: f64, y_um: f64) -> (f64, f64) {
        (x_um * self.scale, (self.height_um - y_um) * self.scale)
    }

    fn put(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.img.width() && (y as u32) < self.img.height() {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Fill an axis-aligned rectangle given in um, (x, y) at its bottom-left.
    pub fn fill_rect(&mut self, x_um: f64, y_um: f64, w_um: f64, h_um: f64, color: Rgba<u8>) {
        if w_um <= 0.0 || h_um <= 0.0 {
            return;
        }
        let (left, bottom) = self.to_px(x_um, y_um);
        let (right, top) = self.to_px(x_um + w_um, y_um + h_um);
        let x0 = left.round() as i64;
        let x1 = right.round() as i64;
        let y0 = top.round() as i64; // top of the rect is the smaller row
        let y1 = bottom.round() as i64;
        for y in y0..y1 {
            for x in x0..x1 {
                self.put(x, y, color);
            }
        }
    }

    /// Outline the full canvas with a border of the given pixel thickness.
    pub fn border(&mut self, thickness_px: u32, color: Rgba<u8>) {
        let (w, h) = (self.img.width() as i64, self.img.height() as i64);
        let t = thickness_px as i64;
        for y in 0..h {
            for x in 0..w {
                if x < t || y < t || x >= w - t || y >= h - t {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Filled disc centered at a um position with a pixel radius.
    pub fn fill_disc(&mut self, cx_um: f64, cy_um: f64, radius_px: f64, color: Rgba<u8>) {
        let (cx, cy) = self.to_px(cx_um, cy_um);
        let r = radius_px.max(0.5);
        let r2 = r * r;
        let x0 = (cx - r).floor() as i64;
        let x1 = (cx + r).ceil() as i64;
        let y0 = (cy - r).floor() as i64;
        let y1 = (cy + r).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Open-circle marker: an annulus between the outer radius and
    /// `outer - thickness`.
    pub fn ring(
        &mut self,
        cx_um: f64,
        cy_um: f64,
        outer_px: f64,
        thickness_px: f64,
        color: Rgba<u8>,
    ) {
        let (cx, cy) = self.to_px(cx_um, cy_um);
        let outer = outer_px.max(1.0);
        let inner = (outer - thickness_px).max(0.0);
        let (outer2, inner2) = (outer * outer, inner * inner);
        let x0 = (cx - outer).floor() as i64;
        let x1 = (cx + outer).ceil() as i64;
        let y0 = (cy - outer).floor() as i64;
        let y1 = (cy + outer).ceil() as i64;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                let d2 = dx * dx + dy * dy;
                if d2 <= outer2 && d2 >= inner2 {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Polyline through um-space points, drawn as stamped discs along each
    /// segment.
    pub fn polyline(&mut self, points: &[(f64, f64)], half_width_px: f64, color: Rgba<u8>) {
        for pair in points.windows(2) {
            let (x0, y0) = self.to_px(pair[0].0, pair[0].1);
            let (x1, y1) = self.to_px(pair[1].0, pair[1].1);
            let steps = (x1 - x0).hypot(y1 - y0).ceil().max(1.0) as u32;
            for i in 0..=steps {
                let t = i as f64 / steps as f64;
                let x = x0 + (x1 - x0) * t;
                let y = y0 + (y1 - y0) * t;
                // Stamp directly in pixel space.
                let r = half_width_px.max(0.5);
                let r2 = r * r;
                for py in (y - r).floor() as i64..=(y + r).ceil() as i64 {
                    for px in (x - r).floor() as i64..=(x + r).ceil() as i64 {
                        let dx = px as f64 + 0.5 - x;
                        let dy = py as f64 + 0.5 - y;
                        if dx * dx + dy * dy <= r2 {
                            self.put(px, py, color);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    #[test]
    fn canvas_dimensions_follow_the_scale() {
        let canvas = Canvas::new(185.0, 100.0, 4.0, WHITE);
        let img = canvas.into_image();
        assert_eq!((img.width(), img.height()), (740, 400));
    }

    #[test]
    fn fill_rect_flips_y() {
        // A rect at the bottom of the cross section lands at the bottom rows
        // of the image.
        let mut canvas = Canvas::new(10.0, 10.0, 1.0, WHITE);
        canvas.fill_rect(0.0, 0.0, 10.0, 1.0, BLACK);
        let img = canvas.into_image();
        assert_eq!(*img.get_pixel(5, 9), BLACK);
        assert_eq!(*img.get_pixel(5, 0), WHITE);
    }

    #[test]
    fn painting_outside_the_buffer_is_clipped() {
        let mut canvas = Canvas::new(10.0, 10.0, 1.0, WHITE);
        canvas.fill_rect(-5.0, -2.0, 30.0, 4.0, BLACK);
        canvas.fill_disc(1000.0, 1000.0, 3.0, BLACK);
        // No panic, and in-bounds parts painted.
        let img = canvas.into_image();
        assert_eq!(*img.get_pixel(0, 9), BLACK);
    }

    #[test]
    fn ring_leaves_the_center_open() {
        let mut canvas = Canvas::new(20.0, 20.0, 1.0, WHITE);
        canvas.ring(10.0, 10.0, 5.0, 2.0, BLACK);
        let img = canvas.into_image();
        assert_eq!(*img.get_pixel(10, 10), WHITE);
        assert_eq!(*img.get_pixel(10 + 4, 10), BLACK);
    }
}
