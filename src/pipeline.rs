use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;

use crate::geometry;
use crate::gif_io;
use crate::params::RunParams;
use crate::render::frames;
use crate::sim::{self, Simulation, Track};

/// What a finished run produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub frames: usize,
    pub carriers_spawned: usize,
    pub elapsed_seconds: f64,
}

/// Run the whole pipeline: validate, build the layout, step the simulation
/// over every frame, rasterize, and encode the GIF (plus an optional PNG of
/// the static cross section).
///
/// Simulation frames are strictly ordered; rasterization afterwards is
/// embarrassingly parallel, so it fans out across frames.
pub fn run(
    params: &RunParams,
    gif_path: &Path,
    png_path: Option<&Path>,
) -> Result<RunSummary, String> {
    let start = Instant::now();
    params.validate().map_err(|e| e.to_string())?;

    let scene = geometry::build_layout(&params.detector).map_err(|e| e.to_string())?;
    let stack = geometry::LayerStack::new(&params.detector).map_err(|e| e.to_string())?;
    log::info!(
        "layout: {} shapes, {}x{} um",
        scene.shapes.len(),
        scene.width,
        scene.height
    );

    let track = Track::new(params.detector.thickness);
    let mut simulation = Simulation::new(&params.kinematics, &stack, track);

    let frame_count = params.kinematics.frame_count as i64;
    let mut snapshots = Vec::with_capacity(frame_count as usize);
    for frame in 0..frame_count {
        sim::step(&mut simulation, frame).map_err(|e| e.to_string())?;
        snapshots.push(simulation.snapshot(frame));
    }
    log::info!(
        "simulated {} frames, {} carriers total (seed {})",
        frame_count,
        simulation.carriers.len(),
        params.kinematics.seed
    );

    let scale = params.render.scale;
    let base = frames::rasterize_scene(&scene, scale);
    if let Some(path) = png_path {
        gif_io::save_png(&base, path)?;
        log::info!("wrote cross section to {}", path.display());
    }

    let rendered: Vec<_> = snapshots
        .par_iter()
        .map(|snapshot| frames::compose_frame(&base, snapshot, &scene, scale))
        .collect();

    gif_io::save_gif(gif_path, rendered, params.render.fps)?;

    let elapsed = start.elapsed().as_secs_f64();
    log::info!(
        "wrote {} frames to {} in {:.5} seconds",
        frame_count,
        gif_path.display(),
        elapsed
    );

    Ok(RunSummary {
        frames: frame_count as usize,
        carriers_spawned: simulation.carriers.len(),
        elapsed_seconds: elapsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::DetectorPreset;

    #[test]
    fn invalid_configuration_fails_before_any_output() {
        let mut params = DetectorPreset::Lgad.config();
        params.kinematics.carrier_pairs = 0;
        let err = run(&params, Path::new("/nonexistent/out.gif"), None).unwrap_err();
        // Validation, not the bogus path, must be what fails.
        assert!(err.contains("carrier_pairs"));
    }

    #[test]
    fn run_writes_a_gif() {
        let dir = std::env::temp_dir();
        let gif = dir.join("lgad_animation_pipeline_test.gif");
        let png = dir.join("lgad_animation_pipeline_test.png");

        let mut params = DetectorPreset::TiLgadDoubleTrench.config();
        params.kinematics.frame_count = 8;
        params.kinematics.carrier_pairs = 3;
        params.render.scale = 1.0;

        let summary = run(&params, &gif, Some(&png)).unwrap();
        assert_eq!(summary.frames, 8);
        assert!(gif.metadata().unwrap().len() > 0);
        assert!(png.metadata().unwrap().len() > 0);

        let _ = std::fs::remove_file(gif);
        let _ = std::fs::remove_file(png);
    }
}
