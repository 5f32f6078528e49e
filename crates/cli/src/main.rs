#![deny(unsafe_code)]
//! CLI binary for the shapegen synthetic-image generator.
//!
//! Subcommands:
//! - `generate` : compose images, write `<name>.png` and `<name>.json` pairs
//! - `list` : print the registered shape kinds and color generators
//! - `check-overlap` : draw two known overlapping shapes and report the result

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use shapegen_core::generator::Rgb;
use shapegen_core::shape::{Cross, Plus};
use shapegen_core::{
    Amount, BoundingRegion, Color, ColorGenerator, ColorMode, Composer, Point, Rasterizer,
    SceneConfig, Shape, Size, Xorshift64,
};
use shapegen_render::{
    builtin_generators, builtin_shapes, JsonMetadataWriter, PixelCanvas, SoftwareRasterizer,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "shapegen", about = "Synthetic shape-scene image generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose images and write them with their metadata.
    Generate(GenerateArgs),
    /// List registered shape kinds and color generators.
    List,
    /// Draw a Plus and an overlapping Cross and print both overlap checks.
    CheckOverlap {
        /// Directory to write test-overlapping.png into.
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

/// Flags of `generate`. Every flag overrides the matching config field.
#[derive(Args)]
struct GenerateArgs {
    /// JSON config file; flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Canvas height in pixels.
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Minimum distance between a shape and the canvas edge.
    #[arg(long)]
    margin: Option<u32>,

    /// Fixed shape size.
    #[arg(long, conflicts_with_all = ["min_size", "max_size"])]
    size: Option<u32>,

    #[arg(long)]
    min_size: Option<u32>,

    #[arg(long)]
    max_size: Option<u32>,

    /// Fixed number of shapes per image.
    #[arg(long, conflicts_with_all = ["min_object_count", "max_object_count"])]
    object_count: Option<u32>,

    #[arg(long)]
    min_object_count: Option<u32>,

    #[arg(long)]
    max_object_count: Option<u32>,

    /// Allow shapes to overlap; `--allow-overlapping false` turns it off.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    allow_overlapping: Option<bool>,

    /// monochrome, greyscale or rgb.
    #[arg(long)]
    color_mode: Option<String>,

    /// Background color spec ("v" or "r,g,b").
    #[arg(long)]
    background_color: Option<String>,

    #[arg(long)]
    bounding_box_fill: Option<String>,

    #[arg(long)]
    bounding_box_border: Option<String>,

    /// Palette color spec; repeat to add more. Replaces the configured palette.
    #[arg(long)]
    palette: Vec<String>,

    /// Draw the bounding box of every shape; `--render-bounding-box false` turns it off.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    render_bounding_box: Option<bool>,

    /// Draw bounding boxes for shapes of this kind; repeatable.
    #[arg(long, value_name = "KIND")]
    bounding_box: Vec<String>,

    /// Exclude a shape kind or color generator; repeatable.
    #[arg(long, value_name = "KIND")]
    disable: Vec<String>,

    /// Number of images to generate.
    #[arg(long)]
    count: Option<usize>,

    /// PRNG seed for deterministic output.
    #[arg(long)]
    seed: Option<u64>,

    /// Image name prefix.
    #[arg(long)]
    prefix: Option<String>,

    /// Placement attempts allowed per image.
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Output directory, created if missing.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,
}

/// `fixed` wins; otherwise `min`/`max` replace the bounds of `current`.
fn override_amount(current: Amount, fixed: Option<u32>, min: Option<u32>, max: Option<u32>) -> Amount {
    match (fixed, min, max) {
        (Some(n), _, _) => Amount::Fixed(n),
        (None, None, None) => current,
        (None, min, max) => Amount::Range {
            min: min.unwrap_or(current.min()),
            max: max.unwrap_or(current.max()),
        },
    }
}

impl GenerateArgs {
    /// Loads the config file, if any, and layers the flags over it.
    fn to_config(&self) -> Result<SceneConfig, CliError> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .map_err(|e| CliError::Input(format!("{}: {e}", path.display())))?;
                SceneConfig::from_json(&text)
                    .map_err(|e| CliError::Input(format!("invalid config {}: {e}", path.display())))?
            }
            None => SceneConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(margin) = self.margin {
            config.margin = margin;
        }
        config.size = override_amount(config.size, self.size, self.min_size, self.max_size);
        config.object_count = override_amount(
            config.object_count,
            self.object_count,
            self.min_object_count,
            self.max_object_count,
        );
        if let Some(allow) = self.allow_overlapping {
            config.allow_overlapping = allow;
        }
        if let Some(mode) = &self.color_mode {
            config.color_mode = mode
                .parse::<ColorMode>()
                .map_err(|e| CliError::Input(e.to_string()))?;
        }
        if self.background_color.is_some() {
            config.background_color = self.background_color.clone();
        }
        if self.bounding_box_fill.is_some() {
            config.bounding_box_fill = self.bounding_box_fill.clone();
        }
        if self.bounding_box_border.is_some() {
            config.bounding_box_border = self.bounding_box_border.clone();
        }
        if !self.palette.is_empty() {
            config.palette = self.palette.clone();
        }
        if let Some(render) = self.render_bounding_box {
            config.render_bounding_box = render;
        }
        for kind in &self.bounding_box {
            config.kinds.entry(kind.clone()).or_default().bounding_box = true;
        }
        for kind in &self.disable {
            config.kinds.entry(kind.clone()).or_default().disable = true;
        }
        if let Some(count) = self.count {
            config.images = count;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(prefix) = &self.prefix {
            config.prefix = prefix.clone();
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn generate(args: &GenerateArgs, json: bool) -> Result<(), CliError> {
    let config = args.to_config()?;
    let mut shapes = builtin_shapes();
    let mut generators = builtin_generators();
    config.apply_kind_settings(&mut shapes, &mut generators)?;

    std::fs::create_dir_all(&args.out_dir)
        .map_err(|e| CliError::Io(format!("{}: {e}", args.out_dir.display())))?;

    let seed = config.seed;
    let rng = Xorshift64::new(seed);
    let mut composer = Composer::new(config, &shapes, &mut generators, rng)?;
    let mut raster = SoftwareRasterizer::to_dir(&args.out_dir);
    let mut sink = JsonMetadataWriter::new(&args.out_dir);
    let names = composer.generate_run(&mut raster, &mut sink)?;
    tracing::info!(
        images = names.len(),
        seed,
        out_dir = %args.out_dir.display(),
        "run finished"
    );

    if json {
        let info = serde_json::json!({
            "images": names,
            "seed": seed,
            "out_dir": args.out_dir.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        eprintln!(
            "generated {} image(s) (seed {seed}) -> {}",
            names.len(),
            args.out_dir.display()
        );
    }
    Ok(())
}

fn list(json: bool) -> Result<(), CliError> {
    let shapes = builtin_shapes();
    let generators = builtin_generators();
    if json {
        let info = serde_json::json!({
            "shapes": shapes.names().collect::<Vec<_>>(),
            "generators": generators
                .kinds()
                .iter()
                .map(|k| serde_json::json!({"name": k.name(), "mode": k.item().mode()}))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Shapes:");
        for name in shapes.names() {
            println!("  {name}");
        }
        println!("Color generators:");
        for kind in generators.kinds() {
            println!("  {} ({})", kind.name(), kind.item().mode());
        }
    }
    Ok(())
}

/// Draws `shape` at `offset` with its bounding box, in a single color.
fn draw_probe(
    raster: &mut SoftwareRasterizer,
    canvas: &mut PixelCanvas,
    mut shape: Box<dyn Shape>,
    offset: Point,
    size: u32,
    color: Color,
) -> Result<BoundingRegion, CliError> {
    shape.set_size(size);
    let mut colors = Rgb::default();
    colors.add_color(color);
    colors.new_form();
    let region = BoundingRegion::new(offset, Size::square(size))?;
    region.render(raster, canvas);
    raster.draw_shape(canvas, offset, shape.as_ref(), &mut colors);
    Ok(region)
}

fn check_overlap(out_dir: &Path, json: bool) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir)?;
    let mut raster = SoftwareRasterizer::to_dir(out_dir);
    let mut canvas = raster.new_canvas(200, 200, ColorMode::Rgb, Color::BLACK)?;
    let plus = draw_probe(
        &mut raster,
        &mut canvas,
        Plus::boxed(),
        Point::new(40, 40),
        60,
        Color::rgb(255, 0, 0),
    )?;
    let cross = draw_probe(
        &mut raster,
        &mut canvas,
        Cross::boxed(),
        Point::new(60, 60),
        20,
        Color::rgb(0, 255, 0),
    )?;
    raster.save_canvas(canvas, "test-overlapping")?;

    let cross_on_plus = cross.is_overlapping(&plus);
    let plus_on_cross = plus.is_overlapping(&cross);
    if json {
        let info = serde_json::json!({
            "cross_overlaps_plus": cross_on_plus,
            "plus_overlaps_cross": plus_on_cross,
            "image": out_dir.join("test-overlapping.png").display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("{cross_on_plus} {plus_on_cross}");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Generate(args) => generate(args, cli.json),
        Command::List => list(cli.json),
        Command::CheckOverlap { out_dir } => check_overlap(out_dir, cli.json),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shapegen").chain(args.iter().copied())).unwrap()
    }

    fn generate_args(args: &[&str]) -> GenerateArgs {
        let mut argv = vec!["generate"];
        argv.extend_from_slice(args);
        match parse(&argv).command {
            Command::Generate(a) => a,
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_scene_config() {
        let config = generate_args(&[]).to_config().unwrap();
        assert_eq!(config, SceneConfig::default());
    }

    #[test]
    fn flags_override_fields() {
        let config = generate_args(&[
            "-W", "300", "-H", "200", "--size", "25", "--min-object-count", "2",
            "--color-mode", "Greyscale", "--palette", "10", "--palette", "200",
            "--count", "4", "--seed", "9", "--prefix", "img", "--allow-overlapping",
        ])
        .to_config()
        .unwrap();
        assert_eq!((config.width, config.height), (300, 200));
        assert_eq!(config.size, Amount::Fixed(25));
        assert_eq!(config.object_count, Amount::Range { min: 2, max: 5 });
        assert_eq!(config.color_mode, ColorMode::Greyscale);
        assert_eq!(config.palette, vec!["10", "200"]);
        assert_eq!(config.images, 4);
        assert_eq!(config.seed, 9);
        assert_eq!(config.prefix, "img");
        assert!(config.allow_overlapping);
    }

    #[test]
    fn fixed_size_conflicts_with_bounds() {
        let res = Cli::try_parse_from(["shapegen", "generate", "--size", "5", "--min-size", "3"]);
        assert!(res.is_err());
    }

    #[test]
    fn kind_flags_fill_kind_settings() {
        let config = generate_args(&["--disable", "Triangle", "--bounding-box", "Plus"])
            .to_config()
            .unwrap();
        assert!(config.kinds["Triangle"].disable);
        assert!(config.kinds["Plus"].bounding_box);
        assert!(!config.kinds["Plus"].disable);
    }

    #[test]
    fn bad_color_mode_is_input_error() {
        let err = generate_args(&["--color-mode", "sepia"]).to_config().unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn config_file_is_layered_under_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"width": 128, "seed": 5, "size": {"min": 8, "max": 16}}"#).unwrap();
        let config = generate_args(&["--config", path.to_str().unwrap(), "--seed", "6", "--max-size", "12"])
            .to_config()
            .unwrap();
        assert_eq!(config.width, 128);
        assert_eq!(config.seed, 6);
        assert_eq!(config.size, Amount::Range { min: 8, max: 12 });
    }

    #[test]
    fn boolean_flags_can_turn_config_values_off() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"allow_overlapping": true, "render_bounding_box": true}"#).unwrap();
        let path = path.to_str().unwrap();

        let kept = generate_args(&["--config", path]).to_config().unwrap();
        assert!(kept.allow_overlapping);
        assert!(kept.render_bounding_box);

        let off = generate_args(&[
            "--config", path, "--allow-overlapping", "false", "--render-bounding-box", "false",
        ])
        .to_config()
        .unwrap();
        assert!(!off.allow_overlapping);
        assert!(!off.render_bounding_box);
    }

    #[test]
    fn bare_boolean_flag_turns_value_on() {
        let config = generate_args(&["--render-bounding-box", "--seed", "3"])
            .to_config()
            .unwrap();
        assert!(config.render_bounding_box);
        assert_eq!(config.seed, 3);
    }

    #[test]
    fn invalid_config_file_is_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        std::fs::write(&path, r#"{"widht": 128}"#).unwrap();
        let err = generate_args(&["--config", path.to_str().unwrap()])
            .to_config()
            .unwrap_err();
        assert_eq!(err.exit_code(), 12);
    }

    #[test]
    fn generate_writes_image_and_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let args = generate_args(&[
            "-W", "80", "-H", "80", "--size", "10", "--object-count", "2",
            "--count", "2", "-o", out.to_str().unwrap(),
        ]);
        generate(&args, false).unwrap();
        for name in ["scene_0000", "scene_0001"] {
            assert!(out.join(format!("{name}.png")).is_file());
            assert!(out.join(format!("{name}.json")).is_file());
        }
    }

    #[test]
    fn unknown_kind_is_scene_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = generate_args(&["--disable", "Hexagon", "-o", dir.path().to_str().unwrap()]);
        assert_eq!(generate(&args, false).unwrap_err().exit_code(), 10);
    }

    #[test]
    fn check_overlap_writes_test_image() {
        let dir = tempfile::tempdir().unwrap();
        check_overlap(dir.path(), false).unwrap();
        assert!(dir.path().join("test-overlapping.png").is_file());
    }

    #[test]
    fn override_amount_keeps_untouched_bound() {
        let current = Amount::Range { min: 20, max: 60 };
        assert_eq!(override_amount(current, None, None, None), current);
        assert_eq!(
            override_amount(current, None, Some(30), None),
            Amount::Range { min: 30, max: 60 }
        );
        assert_eq!(override_amount(current, Some(7), None, None), Amount::Fixed(7));
    }
}
