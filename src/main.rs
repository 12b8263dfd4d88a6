mod audio;
mod cli;
mod config;
mod encode;
mod error;
mod render;
mod scene;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use cli::Cli;
use encode::ffmpeg::{EncoderSettings, FfmpegEncoder};
use render::camera::Camera;
use render::canvas::MeshCanvas;
use render::frame::{FrameRenderer, TEXTURE_FORMAT};
use render::gpu::GpuContext;
use render::pipeline::{ScenePipeline, SceneUniforms};
use scene::{FrameClock, SceneState};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    if let Some(path) = config::find_config(cli.config.as_deref()) {
        match config::load_config(&path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path.display());
                cli.merge_config(cfg);
            }
            Err(err) => log::warn!("Ignoring config: {:#}", err),
        }
    }

    log::info!("prismwave - audio-reactive 3D visualizer");
    log::info!("Input: {}", cli.input.display());
    log::info!("Output: {}", cli.output.display());
    log::info!("Canvas: {}x{} @ {}fps", cli.width, cli.height, cli.fps);

    // 1. Load the track; nothing can be drawn without it
    log::info!("Decoding audio...");
    let audio_data = audio::decode::decode_audio(&cli.input)
        .with_context(|| format!("Cannot play {}", cli.input.display()))?;

    // 2. Per-frame amplitude and spectrum
    log::info!("Analyzing audio...");
    let (summary, mut frames) =
        audio::analysis::analyze(&audio_data, cli.fps, &cli.analysis_settings());
    drop(audio_data);

    if let Some(limit) = cli.max_duration {
        let max_frames = (limit.max(0.0) * cli.fps as f32).ceil() as usize;
        frames.truncate(max_frames);
    }
    let total_frames = frames.len();
    if total_frames == 0 {
        anyhow::bail!("Nothing to render: 0 frames");
    }
    log::info!(
        "Total frames: {}, Duration: {:.1}s @ {}Hz, peak level {:.3}",
        total_frames,
        summary.duration,
        summary.sample_rate,
        summary.peak_level
    );
    let band_line: Vec<String> = audio::Band::ALL
        .iter()
        .zip(summary.band_means.iter())
        .map(|(band, mean)| format!("{}={:.1}", band.name(), mean))
        .collect();
    log::info!("Mean band energy: {}", band_line.join(", "));

    // 3. Scene
    let mut state = SceneState::new(cli.scene_config());
    log::info!(
        "Scene: {} shapes, seed {}, background every {} frames",
        state.shapes.len(),
        state.seed,
        state.config.background_interval_frames
    );

    // 4. GPU
    log::info!("Initializing GPU...");
    let gpu = GpuContext::new()?;
    gpu.ensure_canvas_fits(cli.width, cli.height)?;
    let pipeline = ScenePipeline::new(&gpu.device, TEXTURE_FORMAT);
    let frame_renderer = FrameRenderer::new(&gpu, cli.width, cli.height);
    let camera = Camera::for_canvas(cli.width, cli.height);
    pipeline.write_uniforms(
        &gpu.queue,
        &SceneUniforms {
            view_proj: camera.view_proj().to_cols_array_2d(),
        },
    );

    // 5. Encoder
    log::info!("Starting FFmpeg encoder...");
    let mut encoder = FfmpegEncoder::new(&EncoderSettings {
        output: cli.output.clone(),
        audio: cli.input.clone(),
        width: cli.width,
        height: cli.height,
        fps: cli.fps,
        codec: cli.codec.clone(),
        pix_fmt: cli.pix_fmt.clone(),
        crf: cli.crf,
        bitrate: cli.bitrate.clone(),
    })?;

    // 6. Frame loop
    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frames ({eta} remaining)")
            .context("Invalid progress bar template")?
            .progress_chars("=>-"),
    );

    let mut canvas = MeshCanvas::new();
    let mut helix_frames = 0usize;
    let mut recolors = 0usize;

    for (frame_idx, frame) in frames.iter().enumerate() {
        canvas.begin_frame();
        let report = state.tick(FrameClock::at_frame(frame_idx, cli.fps), frame, &mut canvas);
        if report.helix_triggered {
            log::debug!("Bass hit at {:.2}s", frame.time);
        }
        if report.helix_drawn {
            helix_frames += 1;
        }
        if report.background_changed {
            recolors += 1;
        }

        let pixels = frame_renderer.render(&gpu, &pipeline, &canvas)?;
        encoder.write_frame(&pixels)?;
        pb.set_position(frame_idx as u64 + 1);
    }

    pb.finish_with_message("Rendering complete");
    log::info!(
        "Helix visible in {} of {} frames, {} background changes",
        helix_frames,
        total_frames,
        recolors
    );

    // 7. Finish encoding
    log::info!("Finishing encoding...");
    encoder.finish()?;

    log::info!("Done! Output: {}", cli.output.display());
    Ok(())
}
