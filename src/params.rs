use crate::error::Error;
use crate::geometry::trenches::TrenchMode;

/// Cross-section geometry of the sensor, all lengths in micrometers.
///
/// Bulk thickness is never set directly: it is derived as
/// `thickness - n_plus_plus - gain - p_plus_plus` when the layer stack is
/// built, and a non-positive remainder is a configuration error.
#[derive(Debug, Clone)]
pub struct DetectorParams {
    /// Total sensor thickness (also the particle penetration depth).
    pub thickness: f64,
    /// Drawn cross-section width.
    pub width: f64,
    pub pixel_count: u32,
    /// Center-to-center pixel pitch; the gain implant spans this full width.
    pub pixel_pitch: f64,
    /// Gap between adjacent implants.
    pub pixel_gap: f64,
    /// Left margin before the first implant.
    pub margin: f64,
    pub metalization: f64,
    /// Depth of the metal contact fingers reaching down from the top surface.
    pub contact_depth: f64,
    pub contact_width: f64,
    pub insulation: f64,
    pub n_plus_plus: f64,
    /// Gain implant thickness; 0 disables the gain layer entirely (planar).
    pub gain: f64,
    pub p_plus_plus: f64,
    pub trench_mode: TrenchMode,
    pub trench_depth: f64,
    pub trench_width: f64,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            thickness: 100.0,
            width: 185.0,
            pixel_count: 3,
            pixel_pitch: 55.0,
            pixel_gap: 5.0,
            margin: 5.0,
            metalization: 5.0,
            contact_depth: 10.0,
            contact_width: 3.0,
            insulation: 5.0,
            n_plus_plus: 5.0,
            gain: 10.0,
            p_plus_plus: 5.0,
            trench_mode: TrenchMode::None,
            trench_depth: 40.0,
            trench_width: 1.0,
        }
    }
}

impl DetectorParams {
    pub fn validate(&self) -> Result<(), Error> {
        if self.thickness <= 0.0 {
            return Err(invalid("thickness", "must be positive"));
        }
        if self.width <= 0.0 {
            return Err(invalid("width", "must be positive"));
        }
        if self.pixel_count == 0 {
            return Err(invalid("pixel_count", "must be at least 1"));
        }
        if self.pixel_pitch <= 0.0 {
            return Err(invalid("pixel_pitch", "must be positive"));
        }
        if self.pixel_gap < 0.0 {
            return Err(invalid("pixel_gap", "must not be negative"));
        }
        if self.gain < 0.0 {
            return Err(invalid("gain", "must not be negative"));
        }
        if self.trench_mode != TrenchMode::None {
            if self.trench_depth <= 0.0 {
                return Err(invalid("trench_depth", "must be positive"));
            }
            if self.trench_width <= 0.0 {
                return Err(invalid("trench_width", "must be positive"));
            }
        }
        // Surfaces the derived-bulk check without building a full scene.
        crate::geometry::layers::LayerStack::new(self)?;
        Ok(())
    }
}

/// One-shot secondary pair production when a primary electron first enters
/// the gain band.
#[derive(Debug, Clone, Copy)]
pub struct AvalancheParams {
    /// Electron/hole pairs spawned per triggering primary.
    pub secondary_pairs: usize,
    /// Gaussian spread of the spawn positions around the trigger, in um.
    pub jitter_sigma: f64,
}

/// Carrier-motion constants. Velocities are in um per frame.
#[derive(Debug, Clone)]
pub struct KinematicsParams {
    /// Electron/hole pairs created at animation start.
    pub carrier_pairs: usize,
    pub frame_count: u32,
    /// Frames at the start during which carriers hold position and stay hidden.
    pub lead_in_frames: u32,
    pub electron_velocity: f64,
    pub hole_velocity: f64,
    /// Electron velocity multiplier inside the gain band; 1.0 disables it.
    pub gain_boost: f64,
    pub avalanche: Option<AvalancheParams>,
    /// Horizontal offset separating an electron from its paired hole.
    pub pair_offset: f64,
    /// Inset from both sensor faces when sampling initial depths.
    pub spawn_margin: f64,
    pub seed: u64,
}

impl Default for KinematicsParams {
    fn default() -> Self {
        Self {
            carrier_pairs: 15,
            frame_count: 100,
            lead_in_frames: 5,
            electron_velocity: 0.6,
            hole_velocity: 0.2,
            gain_boost: 1.0,
            avalanche: None,
            pair_offset: 0.2,
            spawn_margin: 10.0,
            seed: 0,
        }
    }
}

impl KinematicsParams {
    pub fn validate(&self, thickness: f64) -> Result<(), Error> {
        if self.carrier_pairs == 0 {
            return Err(invalid("carrier_pairs", "must be at least 1"));
        }
        if self.frame_count == 0 {
            return Err(invalid("frame_count", "must be at least 1"));
        }
        if self.electron_velocity <= 0.0 {
            return Err(invalid("electron_velocity", "must be positive"));
        }
        if self.hole_velocity <= 0.0 {
            return Err(invalid("hole_velocity", "must be positive"));
        }
        if self.gain_boost < 1.0 {
            return Err(invalid("gain_boost", "must be at least 1.0"));
        }
        if 2.0 * self.spawn_margin >= thickness {
            return Err(invalid(
                "spawn_margin",
                "leaves no depth range to sample carriers from",
            ));
        }
        if let Some(av) = &self.avalanche {
            if av.secondary_pairs == 0 {
                return Err(invalid("secondary_pairs", "must be at least 1"));
            }
            if av.jitter_sigma <= 0.0 {
                return Err(invalid("jitter_sigma", "must be positive"));
            }
        }
        Ok(())
    }
}

/// Rasterization settings for the rendering surface.
#[derive(Debug, Clone)]
pub struct RenderParams {
    /// Pixels per micrometer.
    pub scale: f64,
    pub fps: u32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self { scale: 4.0, fps: 10 }
    }
}

impl RenderParams {
    pub fn validate(&self) -> Result<(), Error> {
        if self.scale <= 0.0 {
            return Err(invalid("scale", "must be positive"));
        }
        if self.fps == 0 {
            return Err(invalid("fps", "must be at least 1"));
        }
        Ok(())
    }
}

/// Everything one run needs.
#[derive(Debug, Clone, Default)]
pub struct RunParams {
    pub detector: DetectorParams,
    pub kinematics: KinematicsParams,
    pub render: RenderParams,
}

impl RunParams {
    pub fn validate(&self) -> Result<(), Error> {
        self.detector.validate()?;
        self.kinematics.validate(self.detector.thickness)?;
        self.render.validate()
    }
}

/// Hole velocity relative to the electron velocity in the avalanche preset.
const HOLE_VELOCITY_RATIO: f64 = 1.0 / 3.0;

/// The four sensor variants this tool can animate. Each preset is a
/// complete geometry + kinematics configuration; the variants deliberately
/// disagree on hole velocity and gain-band acceleration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorPreset {
    /// Plain diode: no gain implant, no trenches, no multiplication.
    Planar,
    /// Gain implant with one-shot avalanche multiplication.
    Lgad,
    /// Trench-isolated LGAD, one trench per gap.
    TiLgadSingleTrench,
    /// Trench-isolated LGAD, two trenches per gap.
    TiLgadDoubleTrench,
}

impl DetectorPreset {
    pub const ALL: &[DetectorPreset] = &[
        DetectorPreset::Planar,
        DetectorPreset::Lgad,
        DetectorPreset::TiLgadSingleTrench,
        DetectorPreset::TiLgadDoubleTrench,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DetectorPreset::Planar => "planar",
            DetectorPreset::Lgad => "lgad",
            DetectorPreset::TiLgadSingleTrench => "ti-lgad-1",
            DetectorPreset::TiLgadDoubleTrench => "ti-lgad-2",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        DetectorPreset::ALL
            .iter()
            .copied()
            .find(|p| p.name() == name)
    }

    /// Default output file name, matching the names the animations have
    /// always been published under.
    pub fn output_name(self) -> &'static str {
        match self {
            DetectorPreset::Planar => "planar.gif",
            DetectorPreset::Lgad => "LGAD.gif",
            DetectorPreset::TiLgadSingleTrench => "1TR-LGAD.gif",
            DetectorPreset::TiLgadDoubleTrench => "2TR-LGAD.gif",
        }
    }

    pub fn config(self) -> RunParams {
        let mut detector = DetectorParams::default();
        let mut kinematics = KinematicsParams::default();

        match self {
            DetectorPreset::Planar => {
                detector.gain = 0.0;
            }
            DetectorPreset::Lgad => {
                kinematics.hole_velocity = kinematics.electron_velocity * HOLE_VELOCITY_RATIO;
                kinematics.gain_boost = 2.5;
                kinematics.avalanche = Some(AvalancheParams {
                    secondary_pairs: 4,
                    jitter_sigma: 1.5,
                });
            }
            DetectorPreset::TiLgadSingleTrench => {
                detector.trench_mode = TrenchMode::Single;
            }
            DetectorPreset::TiLgadDoubleTrench => {
                detector.trench_mode = TrenchMode::Double;
            }
        }

        RunParams {
            detector,
            kinematics,
            render: RenderParams::default(),
        }
    }
}

fn invalid(parameter: &'static str, reason: &str) -> Error {
    Error::InvalidConfiguration {
        parameter,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        for preset in DetectorPreset::ALL {
            preset.config().validate().unwrap();
        }
    }

    #[test]
    fn zero_pixel_count_is_rejected() {
        let mut params = DetectorParams::default();
        params.pixel_count = 0;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("pixel_count"));
    }

    #[test]
    fn zero_carrier_count_is_rejected() {
        let params = KinematicsParams {
            carrier_pairs: 0,
            ..Default::default()
        };
        let err = params.validate(100.0).unwrap_err();
        assert!(err.to_string().contains("carrier_pairs"));
    }

    #[test]
    fn oversized_implant_stack_is_rejected() {
        let mut params = DetectorParams::default();
        params.gain = 95.0; // leaves 100 - 5 - 95 - 5 < 0 for the bulk
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("bulk"));
    }

    #[test]
    fn preset_lookup_round_trips() {
        for preset in DetectorPreset::ALL {
            assert_eq!(DetectorPreset::from_name(preset.name()), Some(*preset));
        }
        assert_eq!(DetectorPreset::from_name("lgadx"), None);
    }

    #[test]
    fn avalanche_preset_scales_hole_velocity() {
        let params = DetectorPreset::Lgad.config();
        let k = &params.kinematics;
        assert!((k.hole_velocity - k.electron_velocity / 3.0).abs() < 1e-12);
        assert!(k.avalanche.is_some());
        assert!(k.gain_boost > 1.0);
    }
}
