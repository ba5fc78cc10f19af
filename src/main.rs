//! Headless demo: renders the spinning cube and writes the last frame as PNG.
//!
//! Usage: `soft3d [CONFIG.ron] [--frames N] [--texture PATH] [--out PATH]`
//!
//! Set `RUST_LOG=debug` for per-frame statistics.

use std::path::PathBuf;

use anyhow::{bail, Context};
use soft3d::prelude::*;

const DEFAULT_FRAMES: u64 = 60;
const DEFAULT_OUT: &str = "soft3d.png";

struct Args {
    config: Option<PathBuf>,
    frames: u64,
    texture: Option<PathBuf>,
    out: PathBuf,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        config: None,
        frames: DEFAULT_FRAMES,
        texture: None,
        out: PathBuf::from(DEFAULT_OUT),
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--frames" => {
                let value = iter.next().context("--frames needs a value")?;
                args.frames = value
                    .parse()
                    .with_context(|| format!("invalid frame count `{value}`"))?;
            }
            "--texture" => {
                args.texture = Some(iter.next().context("--texture needs a path")?.into());
            }
            "--out" => {
                args.out = iter.next().context("--out needs a path")?.into();
            }
            flag if flag.starts_with("--") => bail!("unknown option `{flag}`"),
            path if args.config.is_none() => args.config = Some(path.into()),
            extra => bail!("unexpected argument `{extra}`"),
        }
    }
    Ok(args)
}

fn main() -> anyhow::Result<()> {
    // Keep logging setup in the binary so the library remains unopinionated.
    env_logger::init();

    let args = parse_args()?;

    let config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let texture = match &args.texture {
        Some(path) => ColorBuffer::from_file(path)
            .with_context(|| format!("loading texture {}", path.display()))?,
        None => ColorBuffer::checkerboard(64, 8, Color::WHITE, Color::rgb(200, 60, 40))?,
    };

    let (width, height) = (config.viewport_width, config.viewport_height);
    let mut engine = Engine::new(config, soft3d::mesh::cube(1.0), texture)?;
    let mut ctx = RenderContext::new();

    let mut skipped = 0;
    for _ in 0..args.frames.max(1) {
        skipped += engine.render_frame(&mut ctx).skipped();
    }
    log::info!(
        "rendered {} frames, final angle {:.3} rad, {} triangles skipped in total",
        ctx.frame,
        ctx.angle,
        skipped
    );

    let rgba = engine.framebuffer().to_rgba8();
    image::save_buffer(&args.out, &rgba, width, height, image::ExtendedColorType::Rgba8)
        .with_context(|| format!("writing {}", args.out.display()))?;
    log::info!("wrote {}", args.out.display());

    Ok(())
}
