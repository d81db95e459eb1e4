//! mobius - render a JPEG texture on a Möbius strip.
//!
//! Usage: mobius <IMAGE> [OPTIONS]
//!
//! Run `mobius --help` for the available options.

use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;

use mobius_render::render::{self, FrameViewer, HeadlessViewer};
use mobius_render::{MobiusBand, RenderOptions};

#[derive(Parser, Debug)]
#[command(name = "mobius")]
#[command(version, about = "Render a Mobius strip with an image texture.", long_about = None)]
struct Cli {
    /// Path to the image file (.jpg)
    image: PathBuf,

    /// Adjusts the size of the band
    #[arg(
        long = "band_size_adj",
        visible_alias = "band-size-adj",
        default_value_t = 0.0,
        allow_negative_numbers = true
    )]
    band_size_adj: f64,

    /// Elevation angle for the 3D plot
    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    elev: f64,

    /// Azimuth angle for the 3D plot
    #[arg(long, default_value_t = -45.0, allow_negative_numbers = true)]
    azim: f64,

    /// Perspective scaling factor
    #[arg(long, default_value_t = 0.8, allow_negative_numbers = true)]
    perspective: f64,

    /// Zoom factor for the plot
    #[arg(long, default_value_t = 2.2, allow_negative_numbers = true)]
    zoom: f64,

    /// Shift factor for the image on the horizontal direction
    #[arg(
        long = "image_shift",
        visible_alias = "image-shift",
        default_value_t = 0.0,
        allow_negative_numbers = true
    )]
    image_shift: f64,

    /// Resolution factor for the plot (higher factor means lower output resolution)
    #[arg(
        long = "res_factor",
        visible_alias = "res-factor",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    res_factor: u32,

    /// Make the image texture transparent based on brightness
    #[arg(long)]
    transparent: bool,

    /// Save the rendered image to mobius_strip_render.png
    #[arg(long)]
    save: bool,

    /// Do not open the interactive window
    #[arg(long = "no-show", visible_alias = "no_show")]
    no_show: bool,

    /// Also write the sampled surface as a Wavefront OBJ file
    #[arg(long, value_name = "PATH")]
    obj: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn options(&self) -> RenderOptions {
        RenderOptions {
            elev: self.elev,
            azim: self.azim,
            perspective: self.perspective,
            zoom: self.zoom,
            image_shift: self.image_shift,
            res_factor: self.res_factor,
            transparent: self.transparent,
            save: self.save,
            show: !self.no_show,
            ..RenderOptions::default()
        }
    }

    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .format_timestamp(None)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("mobius error: {err}");
        std::process::exit(1);
    }
}

/// Picks the viewer for a run. Asking to show the plot from a build without a
/// window backend is an error, not a silent headless run.
fn select_viewer(show: bool, window_support: bool) -> Result<Box<dyn FrameViewer>, String> {
    if !show {
        return Ok(Box::new(HeadlessViewer));
    }
    if !window_support {
        return Err("this build has no interactive display; \
                    rebuild with `cargo build --features window`, or pass --no-show"
            .to_string());
    }
    Ok(render::default_viewer())
}

fn run(cli: &Cli) -> Result<(), String> {
    let options = cli.options();
    let mut viewer = select_viewer(options.show, render::has_window_support())?;
    let band = MobiusBand::open(&cli.image, cli.band_size_adj).map_err(|e| e.to_string())?;

    if let Some(path) = cli.obj.as_deref() {
        let output = band.compute(&options).map_err(|e| e.to_string())?;
        band.write_obj(&output, path).map_err(|e| e.to_string())?;
    }

    let report = band
        .render(&options, viewer.as_mut())
        .map_err(|e| e.to_string())?;

    log::info!(
        "{}x{} samples, {} facets, band_size {:.4}",
        report.shape.0,
        report.shape.1,
        report.facet_count,
        band.band_size()
    );
    if let Some(path) = report.saved {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}
