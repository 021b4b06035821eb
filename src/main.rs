use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use error_diffusion::{Ditherer, Kernel, Palette, PixelBuffer};

/// Default palette: white, black, red, blue, green, yellow, brown.
const DEFAULT_PALETTE: &str = "#FFFFFF,#000000,#FF0000,#0000FF,#00FF00,#FFFF00,#A52A2A";

#[derive(Parser)]
#[command(name = "palettize")]
#[command(about = "Reduce an image to a fixed color palette with error-diffusion dithering")]
struct Cli {
    /// Input image (any format the image crate can decode)
    input: PathBuf,

    /// Output image path (format inferred from the extension)
    output: PathBuf,

    /// Target colors as comma-separated hex RGB, in priority order
    /// (earlier colors win distance ties)
    #[arg(short, long, default_value = DEFAULT_PALETTE)]
    palette: String,

    /// Diffusion kernel
    #[arg(short, long, value_enum, default_value = "stucki")]
    kernel: KernelChoice,

    /// Gain applied to every propagated error compensation
    /// (1.0 = exact, <1 under-compensates, >1 over-compensates)
    #[arg(short, long, default_value_t = 1.0)]
    error_factor: f64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KernelChoice {
    Stucki,
    FloydSteinberg,
    Atkinson,
    JarvisJudiceNinke,
    Sierra,
    SierraTwoRow,
    SierraLite,
    Burkes,
}

impl KernelChoice {
    fn kernel(self) -> Kernel {
        match self {
            KernelChoice::Stucki => Kernel::stucki(),
            KernelChoice::FloydSteinberg => Kernel::floyd_steinberg(),
            KernelChoice::Atkinson => Kernel::atkinson(),
            KernelChoice::JarvisJudiceNinke => Kernel::jarvis_judice_ninke(),
            KernelChoice::Sierra => Kernel::sierra(),
            KernelChoice::SierraTwoRow => Kernel::sierra_two_row(),
            KernelChoice::SierraLite => Kernel::sierra_lite(),
            KernelChoice::Burkes => Kernel::burkes(),
        }
    }
}

fn parse_palette(spec: &str) -> anyhow::Result<Palette> {
    let entries: Vec<&str> = spec.split(',').map(str::trim).collect();
    Palette::from_hex(&entries).with_context(|| format!("invalid palette {spec:?}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "palettize=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();

    let palette = parse_palette(&cli.palette)?;
    let kernel = cli.kernel.kernel();
    if !kernel.is_causal() {
        tracing::warn!(
            kernel = ?cli.kernel,
            "kernel has backward offsets; diffused error will land on finalized pixels"
        );
    }

    let img = image::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();
    tracing::info!(
        width,
        height,
        colors = palette.len(),
        kernel = ?cli.kernel,
        "dithering"
    );

    let mut buffer = PixelBuffer::from_rgb_bytes(width as usize, height as usize, img.as_raw());

    let started = Instant::now();
    Ditherer::new(palette)
        .kernel(kernel)
        .error_factor(cli.error_factor)
        .dither(&mut buffer)?;
    tracing::info!(elapsed_ms = started.elapsed().as_millis(), "dither complete");

    let out = image::RgbImage::from_raw(width, height, buffer.export())
        .context("exported buffer has wrong length")?;
    out.save(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    tracing::info!(output = %cli.output.display(), "saved");

    Ok(())
}
