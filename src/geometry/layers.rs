use crate::error::Error;
use crate::params::DetectorParams;

/// Resolved doping-layer stack with the bulk thickness derived from the
/// remainder of the sensor thickness.
///
/// y runs from the sensor backside (0) to the top surface (`thickness`).
/// Full-width stripes stack top-down: metalization, insulation, n++, bulk,
/// with p++ at the backside. The gain band occupies the top `gain` um of the
/// bulk span and is drawn per-pixel, not full-width.
#[derive(Debug, Clone)]
pub struct LayerStack {
    pub thickness: f64,
    pub metalization: f64,
    pub insulation: f64,
    pub n_plus_plus: f64,
    pub gain: f64,
    pub bulk: f64,
    pub p_plus_plus: f64,
}

impl LayerStack {
    pub fn new(params: &DetectorParams) -> Result<Self, Error> {
        let bulk = params.thickness - params.n_plus_plus - params.gain - params.p_plus_plus;
        if bulk <= 0.0 {
            return Err(Error::InvalidConfiguration {
                parameter: "bulk",
                reason: format!(
                    "derived bulk thickness {bulk} um is not positive \
                     (thickness - n++ - gain - p++ must leave room for the bulk)"
                ),
            });
        }
        Ok(Self {
            thickness: params.thickness,
            metalization: params.metalization,
            insulation: params.insulation,
            n_plus_plus: params.n_plus_plus,
            gain: params.gain,
            bulk,
            p_plus_plus: params.p_plus_plus,
        })
    }

    /// Total of the doped stack: n++ + gain + bulk + p++. Equals the sensor
    /// thickness by construction of the derived bulk.
    pub fn doped_total(&self) -> f64 {
        self.n_plus_plus + self.gain + self.bulk + self.p_plus_plus
    }

    /// (bottom, top) span of the metalization stripe.
    pub fn metalization_span(&self) -> (f64, f64) {
        (self.thickness - self.metalization, self.thickness)
    }

    pub fn insulation_span(&self) -> (f64, f64) {
        let top = self.thickness - self.metalization;
        (top - self.insulation, top)
    }

    pub fn n_plus_plus_span(&self) -> (f64, f64) {
        let top = self.thickness - self.metalization - self.insulation;
        (top - self.n_plus_plus, top)
    }

    pub fn bulk_span(&self) -> (f64, f64) {
        let top = self.n_plus_plus_span().0;
        (top - self.bulk, top)
    }

    /// (bottom, top) of the gain band, or None when the preset has no gain
    /// implant. The band sits directly below the n++ layer.
    pub fn gain_band(&self) -> Option<(f64, f64)> {
        if self.gain <= 0.0 {
            return None;
        }
        let top = self.n_plus_plus_span().0;
        Some((top - self.gain, top))
    }

    pub fn p_plus_plus_span(&self) -> (f64, f64) {
        let bottom = self.thickness
            - (self.metalization + self.insulation + self.gain + self.bulk);
        (bottom, bottom + self.p_plus_plus)
    }

    /// Electrons drift upward and are collected at the middle of the n++ layer.
    pub fn electron_removal_y(&self) -> f64 {
        let (bottom, top) = self.n_plus_plus_span();
        (bottom + top) / 2.0
    }

    /// Holes drift downward and are collected at the middle of the p++ layer.
    pub fn hole_removal_y(&self) -> f64 {
        let (bottom, top) = self.p_plus_plus_span();
        (bottom + top) / 2.0
    }
}
