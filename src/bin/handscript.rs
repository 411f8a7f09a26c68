use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;

/// Bundled defaults, resolved relative to the working directory.
const DEFAULT_FONT: &str = "assets/handwriting.ttf";
const DEFAULT_BACKGROUND: &str = "assets/paper.jpg";

#[derive(Parser, Debug)]
#[command(
    name = "handscript",
    version,
    about = "Render text as a synthetic handwritten page"
)]
struct Cli {
    /// Render from a JSON render-config file instead of individual flags.
    #[arg(long, conflicts_with_all = ["text", "text_file", "font", "background"])]
    config: Option<PathBuf>,

    /// Text to render.
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the text from a file instead.
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Font override (.ttf); defaults to the bundled handwriting face.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Background override (.jpg/.png); defaults to the bundled paper texture.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Ink colour as #RRGGBB.
    #[arg(long, default_value = "#00008a")]
    ink: String,

    /// Tilt range in degrees (0 to 5).
    #[arg(long, default_value_t = 2.0)]
    tilt: f32,

    /// Jitter in pixels (0 to 6).
    #[arg(long, default_value_t = 2)]
    jitter: i32,

    /// Seed for reproducible output; omit for a fresh page each run.
    #[arg(long)]
    seed: Option<u64>,

    /// Output PNG path.
    #[arg(long, default_value = "handwritten.png")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = match &cli.config {
        Some(path) => read_config_json(path)?,
        None => {
            let text = match (&cli.text, &cli.text_file) {
                (Some(text), _) => text.clone(),
                (None, Some(path)) => fs::read_to_string(path)
                    .with_context(|| format!("read text '{}'", path.display()))?,
                (None, None) => anyhow::bail!("one of --text or --text-file is required"),
            };
            if text.trim().is_empty() {
                anyhow::bail!("text is empty");
            }

            let font = resolve(cli.font.clone(), DEFAULT_FONT, "font")?;
            let background = resolve(cli.background.clone(), DEFAULT_BACKGROUND, "background")?;

            handscript::RenderConfig {
                text,
                font: handscript::ResourceSource::Path(font),
                background: handscript::ResourceSource::Path(background),
                ink: handscript::InkColor::parse_hex(&cli.ink)?,
                tilt_degrees: cli.tilt,
                jitter_px: cli.jitter,
            }
        }
    };
    if cfg.text.trim().is_empty() {
        anyhow::bail!("text is empty");
    }

    let page = match cli.seed {
        Some(seed) => handscript::compose_seeded(&cfg, seed)?,
        None => handscript::compose(&cfg)?,
    };

    if let Some(parent) = cli.out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    page.save_with_format(&cli.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", cli.out.display()))?;

    eprintln!("wrote {}", cli.out.display());
    Ok(())
}

fn read_config_json(path: &Path) -> anyhow::Result<handscript::RenderConfig> {
    let f = fs::File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg: handscript::RenderConfig = serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| "parse render config JSON")?;
    Ok(cfg)
}

fn resolve(flag: Option<PathBuf>, default: &str, what: &str) -> anyhow::Result<PathBuf> {
    let path = flag.unwrap_or_else(|| PathBuf::from(default));
    if !path.exists() {
        anyhow::bail!("{what} '{}' not found", path.display());
    }
    Ok(path)
}
