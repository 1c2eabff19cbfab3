use crate::params::DetectorParams;

/// One pixel column of the cross section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelColumn {
    pub index: u32,
    /// x of the implant's left edge.
    pub left: f64,
}

impl PixelColumn {
    pub fn right(&self, pitch: f64) -> f64 {
        self.left + pitch
    }
}

/// Evenly spaced pixel columns: `left = margin + i * (gap + pitch)`.
pub fn pixel_columns(params: &DetectorParams) -> Vec<PixelColumn> {
    (0..params.pixel_count)
        .map(|index| PixelColumn {
            index,
            left: params.margin + index as f64 * (params.pixel_gap + params.pixel_pitch),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_columns_match_the_drawing() {
        let cols = pixel_columns(&DetectorParams::default());
        let lefts: Vec<f64> = cols.iter().map(|c| c.left).collect();
        assert_eq!(lefts, vec![5.0, 65.0, 125.0]);
    }

    #[test]
    fn columns_are_strictly_increasing_and_non_overlapping() {
        for count in [1u32, 2, 3, 7, 12] {
            let mut params = DetectorParams::default();
            params.pixel_count = count;
            let cols = pixel_columns(&params);
            assert_eq!(cols.len(), count as usize);
            for pair in cols.windows(2) {
                assert!(pair[1].left > pair[0].left);
                // next implant starts after this one ends
                assert!(pair[1].left >= pair[0].right(params.pixel_pitch));
            }
        }
    }
}
