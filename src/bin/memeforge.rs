use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "memeforge", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Caption an image and write the flattened meme as a PNG.
    Compose(ComposeArgs),
    /// Write the default screen configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Input image (PNG, JPEG, ...).
    #[arg(long)]
    image: PathBuf,

    /// Pick the image through the camera source instead of the library.
    #[arg(long, default_value_t = false)]
    camera: bool,

    /// Top caption text. Keeps the placeholder when omitted.
    #[arg(long)]
    top: Option<String>,

    /// Bottom caption text. Keeps the placeholder when omitted.
    #[arg(long)]
    bottom: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Screen configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Caption font file, overriding the configured family lookup.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Overwrite output if it already exists.
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Output JSON path. Prints to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => memeforge::ScreenConfig::from_json_file(path)?,
        None => memeforge::ScreenConfig::default(),
    };
    if let Some(font) = &args.font {
        config.style.font.source = Some(font.clone());
    }

    let keyboard = memeforge::KeyboardCenter::new();
    let mut screen = memeforge::MemeScreen::new(config)?;
    screen.on_appear(&keyboard);

    let (kind, mut source) = if args.camera {
        (
            memeforge::SourceKind::Camera,
            memeforge::FileImageSource::new().with_camera(&args.image),
        )
    } else {
        (
            memeforge::SourceKind::Library,
            memeforge::FileImageSource::new().with_library(&args.image),
        )
    };
    screen
        .pick_with(&mut source, kind)
        .with_context(|| format!("load image '{}'", args.image.display()))?;

    for (position, text) in [
        (memeforge::CaptionPosition::Top, &args.top),
        (memeforge::CaptionPosition::Bottom, &args.bottom),
    ] {
        if let Some(text) = text {
            screen.begin_edit(position);
            screen.set_caption(position, text);
            screen.submit_caption(position);
        }
    }

    let mut renderer = memeforge::CpuRenderer::new();
    let mut gateway = memeforge::FileShareGateway::new(&args.out).overwrite(args.overwrite);
    let resolution = screen.share_with(&mut renderer, &mut gateway)?;
    screen.on_disappear();

    match resolution {
        memeforge::ShareResolution::Shared(record) => {
            let summary = serde_json::to_string_pretty(&record.summary())?;
            println!("{summary}");
            eprintln!("wrote {}", args.out.display());
            Ok(())
        }
        memeforge::ShareResolution::NotShared => anyhow::bail!(
            "output '{}' exists (pass --overwrite to replace it)",
            args.out.display()
        ),
        other => anyhow::bail!("share did not run: {other:?}"),
    }
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let json = memeforge::ScreenConfig::default().to_json_pretty()?;
    match &args.out {
        Some(out) => {
            memeforge::ensure_parent_dir(out)?;
            std::fs::write(out, format!("{json}\n"))
                .with_context(|| format!("write config '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
