use std::path::{Path, PathBuf};

use mobius_render::render::{HeadlessViewer, SAVE_FILE_NAME};
use mobius_render::texture::alpha_from_brightness;
use mobius_render::{MobiusBand, RenderError, RenderOptions, TextureError, TextureImage};

/// Scratch directory removed on drop.
struct Scratch(PathBuf);

impl Scratch {
    fn new(name: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("mobius-it-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        Self(dir)
    }

    fn path(&self, file: &str) -> PathBuf {
        self.0.join(file)
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

fn write_jpeg(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    image::RgbImage::from_pixel(width, height, image::Rgb(rgb))
        .save(path)
        .expect("write jpeg fixture");
}

fn headless() -> RenderOptions {
    RenderOptions {
        show: false,
        ..RenderOptions::default()
    }
}

#[test]
fn white_two_by_two_jpeg_renders_white_two_by_two_grid() {
    let scratch = Scratch::new("white");
    let path = scratch.path("white.jpg");
    write_jpeg(&path, 2, 2, [255, 255, 255]);

    let band = MobiusBand::open(&path, 0.0).expect("open white texture");
    assert_eq!(band.band_size(), 1.0);

    let output = band.compute(&headless()).expect("compute");
    assert_eq!(output.coords.x.shape(), (2, 2));
    assert_eq!(output.coords.y.shape(), (2, 2));
    assert_eq!(output.coords.z.shape(), (2, 2));
    assert_eq!(output.colors.shape(), (2, 2));
    for color in output.colors.iter() {
        for channel in color.rgb() {
            assert!((channel - 1.0).abs() < 1e-2, "channel {channel}");
        }
        assert_eq!(color.a, 1.0);
    }
}

#[test]
fn png_path_fails_before_opening_the_file() {
    let scratch = Scratch::new("png");
    let missing = scratch.path("does-not-exist.png");
    let err = MobiusBand::open(&missing, 0.0).unwrap_err();
    assert!(matches!(err, TextureError::UnsupportedExtension { .. }));
    assert!(err.to_string().contains(".jpg"));
}

#[test]
fn corrupt_jpeg_surfaces_decode_error() {
    let scratch = Scratch::new("corrupt");
    let path = scratch.path("broken.JPG");
    std::fs::write(&path, b"not a jpeg at all").unwrap();
    assert!(matches!(
        TextureImage::open(&path),
        Err(TextureError::Decode(_))
    ));
}

#[test]
fn band_size_for_wide_image() {
    let scratch = Scratch::new("wide");
    let path = scratch.path("wide.jpg");
    write_jpeg(&path, 100, 50, [10, 120, 200]);

    let band = MobiusBand::open(&path, 0.0).unwrap();
    assert_eq!(band.band_size(), 0.5);
    assert_eq!(band.texture().channels(), 3);

    let output = band
        .compute(&RenderOptions {
            res_factor: 10,
            ..headless()
        })
        .unwrap();
    assert_eq!(output.shape(), (10, 10));
}

#[test]
fn transparent_render_alpha_stays_in_range() {
    let scratch = Scratch::new("alpha");
    let path = scratch.path("dark.jpg");
    write_jpeg(&path, 8, 4, [0, 0, 0]);

    let band = MobiusBand::open(&path, 0.0).unwrap();
    let output = band
        .compute(&RenderOptions {
            transparent: true,
            ..headless()
        })
        .unwrap();
    assert!(output.transparent);
    for color in output.colors.iter() {
        assert!((0.2..=1.0).contains(&color.a));
    }
    assert_eq!(alpha_from_brightness(0.0), 0.2);
}

#[test]
fn zero_res_factor_is_rejected() {
    let band = MobiusBand::from_texture(
        TextureImage::from_samples(2, 2, 3, vec![0.5; 12]).unwrap(),
        0.0,
    );
    let result = band.compute(&RenderOptions {
        res_factor: 0,
        ..headless()
    });
    assert!(matches!(result, Err(RenderError::InvalidResFactor { .. })));
}

#[test]
fn save_writes_square_rgba_png_with_transparent_background() {
    let scratch = Scratch::new("save");
    let texture = scratch.path("texture.jpg");
    write_jpeg(&texture, 4, 2, [200, 30, 30]);
    let out = scratch.path(SAVE_FILE_NAME);
    std::fs::write(&out, b"stale").unwrap();

    let band = MobiusBand::open(&texture, 0.0).unwrap();
    let report = band
        .render(
            &RenderOptions {
                save: true,
                save_path: out.clone(),
                ..headless()
            },
            &mut HeadlessViewer,
        )
        .expect("render");

    assert_eq!(report.saved.as_deref(), Some(out.as_path()));
    assert_eq!(report.shape, (4, 4));
    assert_eq!(report.facet_count, 9);

    let saved = image::open(&out).expect("saved file is a png").to_rgba8();
    assert_eq!(saved.dimensions(), (4000, 4000));
    assert_eq!(saved.get_pixel(0, 0)[3], 0);
    assert!(saved.pixels().any(|p| p[3] == 255));
}

#[test]
fn obj_export_lists_every_sample() {
    let scratch = Scratch::new("obj");
    let texture = scratch.path("texture.jpg");
    write_jpeg(&texture, 6, 3, [90, 90, 90]);

    let band = MobiusBand::open(&texture, 0.0).unwrap();
    let options = RenderOptions {
        res_factor: 2,
        ..headless()
    };
    let output = band.compute(&options).unwrap();
    let obj = scratch.path("strip.obj");
    band.write_obj(&output, &obj).unwrap();

    let text = std::fs::read_to_string(&obj).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 9);
    assert_eq!(text.lines().filter(|l| l.starts_with("vt ")).count(), 9);
    assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 8);
}

#[test]
fn cli_batch_run_saves_and_exits_cleanly() {
    let scratch = Scratch::new("cli-batch");
    let path = scratch.path("white.jpg");
    write_jpeg(&path, 4, 4, [255, 255, 255]);

    let output = std::process::Command::new(env!("CARGO_BIN_EXE_mobius"))
        .current_dir(&scratch.0)
        .arg(&path)
        .args(["--no-show", "--save"])
        .output()
        .expect("run mobius");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(scratch.path(SAVE_FILE_NAME).exists());
}

#[test]
fn cli_rejects_png_with_nonzero_exit() {
    let scratch = Scratch::new("cli-png");
    let output = std::process::Command::new(env!("CARGO_BIN_EXE_mobius"))
        .current_dir(&scratch.0)
        .args(["texture.png", "--no-show"])
        .output()
        .expect("run mobius");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("mobius error:"));
}
