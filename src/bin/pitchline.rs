use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pitchline::render::{render_png, to_svg};
use pitchline::{CurveKind, PathBackend, ProjectSnapshot, Rgba8, Theme};

#[derive(Parser, Debug)]
#[command(name = "pitchline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render both pitch curves of the selected track as PNG (or SVG).
    Render(RenderArgs),
    /// Print segment and drawable counts for the selected track.
    Stats(StatsArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Write an SVG document instead of a PNG.
    #[arg(long)]
    svg: bool,

    /// Leave the background transparent instead of filling it with the theme color.
    #[arg(long)]
    transparent: bool,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    /// Input project JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn read_project(path: &Path) -> anyhow::Result<ProjectSnapshot> {
    ProjectSnapshot::from_path(path).with_context(|| format!("load project '{}'", path.display()))
}

fn background(theme: Theme) -> Rgba8 {
    match theme {
        Theme::Dark => Rgba8::rgb(24, 26, 32),
        Theme::Light => Rgba8::rgb(248, 248, 250),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;
    let mut canvas = project.open_canvas(PathBackend::new())?;
    canvas.apply_pending()?;
    let stats = canvas.present_now()?;
    let backend = canvas
        .into_backend()
        .context("canvas was disposed before export")?;
    let frame = backend.last_frame();
    let bg = (!args.transparent).then(|| background(project.theme));

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    if args.svg {
        std::fs::write(&args.out, to_svg(frame, bg))
            .with_context(|| format!("write svg '{}'", args.out.display()))?;
    } else {
        render_png(frame, bg, &args.out)?;
    }

    eprintln!(
        "wrote {} ({} visible, {} culled)",
        args.out.display(),
        stats.visible,
        stats.culled
    );
    Ok(())
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let project = read_project(&args.in_path)?;
    let mut canvas = project.open_canvas(PathBackend::new())?;
    canvas.apply_pending()?;

    let track = project.selected()?;
    println!(
        "track: {} (singer: {})",
        track.name,
        track.singer.as_deref().unwrap_or("-")
    );
    for kind in CurveKind::ALL {
        let curve = canvas.curve(kind);
        let points: usize = curve.segments().values().map(|s| s.len()).sum();
        println!(
            "{kind:?}: {} segments, {points} points, {} drawables",
            curve.segments().len(),
            curve.drawables().len()
        );
    }
    let failures =
        canvas.reference_feed().stats().failures + canvas.editable_feed().stats().failures;
    if failures > 0 {
        println!("derivation failures: {failures}");
    }
    Ok(())
}
