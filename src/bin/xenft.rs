use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use xenft_render::{
    AssetInput, BatchSettings, ClassFlags, ComposeSettings, DecodedMintInfo, FixtureChain,
    GalleryRecord, GalleryStore, JsonFileGallery, RasterSettings, Session, XenftAsset, classify,
    compose_with, current_scheme, encode, rasterize_png, render_gallery, try_decode_str,
};

#[derive(Parser, Debug)]
#[command(name = "xenft", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a packed mint record (decimal or 0x hex) and print it as JSON.
    Decode(DecodeArgs),
    /// Pack mint fields into a record.
    Encode(EncodeArgs),
    /// Print the color scheme in effect.
    Scheme(SchemeArgs),
    /// Render one asset JSON file to SVG (and optionally PNG).
    Render(RenderArgs),
    /// Render a JSON array of assets into a directory.
    Batch(BatchArgs),
    /// Read a token through a fixture chain session and render it.
    Fetch(FetchArgs),
    /// Inspect or edit a gallery file.
    Gallery(GalleryArgs),
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    /// Packed record.
    value: String,
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Set the redeemed bit.
    #[arg(long)]
    redeemed: bool,
    /// Set the apex class bit.
    #[arg(long)]
    apex: bool,
    /// Set the limited class bit.
    #[arg(long)]
    limited: bool,
    /// Power group index (0..=63).
    #[arg(long, default_value_t = 0)]
    power_group: u8,
    /// EAA modifier.
    #[arg(long, default_value_t = 0)]
    eaa: u16,
    /// AMP modifier.
    #[arg(long, default_value_t = 0)]
    amp: u16,
    /// Global rank (up to 128 bits).
    #[arg(long, default_value_t = 0)]
    rank: u128,
    /// Maturity, seconds since the Unix epoch.
    #[arg(long, default_value_t = 0)]
    maturity_ts: u64,
    /// Term in days.
    #[arg(long, default_value_t = 0)]
    term: u16,
}

#[derive(Parser, Debug)]
struct SchemeArgs {
    /// Instant to evaluate (RFC 3339); defaults to now.
    #[arg(long)]
    at: Option<DateTime<Utc>>,
}

#[derive(Parser, Debug)]
struct OutputArgs {
    /// Instant to render at (RFC 3339); defaults to now.
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Skip the random decoration layer.
    #[arg(long)]
    no_decorations: bool,

    /// Also write a PNG here.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixels per canvas unit for PNG output.
    #[arg(long, default_value_t = 1.0)]
    scale: f32,

    /// Save the render into this gallery file.
    #[arg(long)]
    gallery: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input asset JSON (decoded asset or raw chain read).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input JSON array of assets.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory; one `<tokenId>.svg` per asset.
    #[arg(long)]
    out_dir: PathBuf,

    /// Render on a thread pool.
    #[arg(long)]
    parallel: bool,

    /// Thread pool size.
    #[arg(long)]
    threads: Option<usize>,

    /// Instant to render at (RFC 3339); defaults to now.
    #[arg(long)]
    at: Option<DateTime<Utc>>,
}

#[derive(Parser, Debug)]
struct FetchArgs {
    /// Fixture chain JSON (`{"tokens": {...}}`).
    #[arg(long)]
    fixture: PathBuf,

    /// Account to connect as.
    #[arg(long)]
    account: String,

    /// Token to read.
    #[arg(long)]
    token_id: u64,

    /// Output SVG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Parser, Debug)]
struct GalleryArgs {
    /// Gallery JSON file.
    #[arg(long)]
    store: PathBuf,

    #[command(subcommand)]
    cmd: GalleryCommand,
}

#[derive(Subcommand, Debug)]
enum GalleryCommand {
    /// List saved tokens.
    List,
    /// Write the saved SVG of one token.
    Show {
        #[arg(long)]
        token_id: u64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Delete one token.
    Remove {
        #[arg(long)]
        token_id: u64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Decode(args) => cmd_decode(args),
        Command::Encode(args) => cmd_encode(args),
        Command::Scheme(args) => cmd_scheme(args),
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
        Command::Fetch(args) => cmd_fetch(args),
        Command::Gallery(args) => cmd_gallery(args),
    }
}

fn cmd_decode(args: DecodeArgs) -> anyhow::Result<()> {
    let info = try_decode_str(&args.value)?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let info = DecodedMintInfo {
        redeemed: args.redeemed,
        class_flags: Some(ClassFlags {
            is_apex: args.apex,
            is_limited: args.limited,
            power_group_index: args.power_group,
        }),
        eaa: args.eaa,
        amp: args.amp,
        rank: args.rank,
        maturity_ts: args.maturity_ts,
        term: args.term,
    };
    let packed = encode(&info)?;
    println!("{packed}");
    println!("{packed:#x}");
    Ok(())
}

fn cmd_scheme(args: SchemeArgs) -> anyhow::Result<()> {
    let scheme = current_scheme(args.at.unwrap_or_else(Utc::now));
    let out = serde_json::json!({
        "palette": scheme.palette_name(),
        "cycleNumber": scheme.cycle_number(),
        "scheme": scheme,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let asset = read_json::<AssetInput>(&args.in_path)?.into_asset();
    write_render(&asset, &args.out, &args.output)
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let assets: Vec<XenftAsset> = read_json::<Vec<AssetInput>>(&args.in_path)?
        .into_iter()
        .map(AssetInput::into_asset)
        .collect();
    let settings = BatchSettings {
        parallel: args.parallel,
        threads: args.threads,
    };
    let rendered = render_gallery(&assets, args.at.unwrap_or_else(Utc::now), &settings)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for (i, token) in rendered.iter().enumerate() {
        let name = match token.token_id {
            Some(id) => format!("{id}.svg"),
            None => format!("invalid-{i}.svg"),
        };
        let path = args.out_dir.join(name);
        std::fs::write(&path, token.svg())
            .with_context(|| format!("write svg '{}'", path.display()))?;
    }
    eprintln!("wrote {} images to {}", rendered.len(), args.out_dir.display());
    Ok(())
}

fn cmd_fetch(args: FetchArgs) -> anyhow::Result<()> {
    let chain = FixtureChain::from_json_file(&args.fixture)?;
    let mut session = Session::new(chain);
    session.connect(&args.account)?;
    let asset = session.fetch_asset(args.token_id);
    session.disconnect();
    write_render(&asset?, &args.out, &args.output)
}

fn cmd_gallery(args: GalleryArgs) -> anyhow::Result<()> {
    let mut store = JsonFileGallery::open(&args.store);
    match args.cmd {
        GalleryCommand::List => {
            for r in store.list()? {
                println!(
                    "{}\t{}\t{}\tvmus={}\tterm={}\tburned={}\tsaved={}",
                    r.token_id,
                    r.category,
                    r.rarity,
                    r.vmu_count,
                    r.term,
                    r.xen_burned,
                    r.saved_at.to_rfc3339()
                );
            }
        }
        GalleryCommand::Show { token_id, out } => {
            let record = store
                .get(token_id)?
                .with_context(|| format!("token {token_id} is not in the gallery"))?;
            write_file(&out, record.svg.as_bytes())?;
            eprintln!("wrote {}", out.display());
        }
        GalleryCommand::Remove { token_id } => {
            if !store.remove(token_id)? {
                anyhow::bail!("token {token_id} is not in the gallery");
            }
            eprintln!("removed {token_id}");
        }
    }
    Ok(())
}

fn write_render(asset: &XenftAsset, out: &Path, opts: &OutputArgs) -> anyhow::Result<()> {
    let now = opts.at.unwrap_or_else(Utc::now);
    let settings = ComposeSettings {
        decorations: !opts.no_decorations,
    };
    let image = compose_with(asset, now, &settings, &mut rand::rng());
    let svg = image.to_svg();
    write_file(out, svg.as_bytes())?;
    eprintln!("wrote {}", out.display());

    if let Some(png_path) = &opts.png {
        let raster = RasterSettings {
            scale: opts.scale,
            background: None,
        };
        let png = rasterize_png(&svg, &raster)?;
        write_file(png_path, &png)?;
        eprintln!("wrote {}", png_path.display());
    }

    if let Some(gallery) = &opts.gallery {
        let record = GalleryRecord::from_render(asset, &classify(asset), svg, now)?;
        let mut store = JsonFileGallery::open(gallery);
        store.save(record)?;
        eprintln!("saved to {}", gallery.display());
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let f = File::open(path).with_context(|| format!("open '{}'", path.display()))?;
    let r = BufReader::new(f);
    serde_json::from_reader(r).with_context(|| format!("parse JSON '{}'", path.display()))
}

fn write_file(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))
}
