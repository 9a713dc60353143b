use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "fcpx", version)]
struct Cli {
    /// Log debug detail to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a project from media files and write FCPXML.
    Build(BuildArgs),
    /// Tick-grid time helpers.
    Time {
        #[command(subcommand)]
        op: TimeOp,
    },
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Media files, appended in order. Audio goes to the audio lane.
    #[arg(required = true)]
    media: Vec<PathBuf>,

    /// Output `.fcpxml` path.
    #[arg(long)]
    out: PathBuf,

    /// Build options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,

    /// Event name (overrides the options file).
    #[arg(long)]
    event: Option<String>,

    /// Project name (overrides the options file).
    #[arg(long)]
    project: Option<String>,

    /// Opening title text (overrides the options file).
    #[arg(long)]
    title: Option<String>,

    /// Write the document even when validation reports findings.
    #[arg(long)]
    lenient: bool,

    /// External helper printing a bookmark token for a path.
    #[arg(long)]
    bookmark_helper: Option<PathBuf>,

    /// Print the document model as JSON to stdout.
    #[arg(long)]
    dump_json: bool,
}

#[derive(Subcommand, Debug)]
enum TimeOp {
    /// Convert seconds to the nearest frame-aligned duration.
    FromSeconds {
        /// Seconds.
        seconds: f64,
    },
    /// Sum two durations.
    Add {
        /// First duration.
        a: String,
        /// Second duration.
        b: String,
    },
    /// Check that a duration sits on the tick grid.
    Check {
        /// Duration text, e.g. `1001/24000s`.
        text: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
        Command::Time { op } => cmd_time(op),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_opts(args: &BuildArgs) -> anyhow::Result<fcpx::BuildOpts> {
    let mut opts = match &args.opts {
        Some(path) => fcpx::BuildOpts::from_json_file(path)
            .with_context(|| format!("load build options '{}'", path.display()))?,
        None => fcpx::BuildOpts::default(),
    };
    if let Some(event) = &args.event {
        opts.event_name.clone_from(event);
    }
    if let Some(project) = &args.project {
        opts.project_name.clone_from(project);
    }
    if args.title.is_some() {
        opts.title_text.clone_from(&args.title);
    }
    if args.lenient {
        opts.strict = false;
    }
    Ok(opts)
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    let opts = load_opts(&args)?;
    let title = opts.title_text.clone();
    let title_duration = opts.title_duration();

    let mut builder = fcpx::ProjectBuilder::new(opts)?.with_prober(fcpx::FfprobeProber::default());
    if let Some(helper) = &args.bookmark_helper {
        builder = builder.with_bookmarks(fcpx::CommandBookmarks::new(helper));
    }

    for path in &args.media {
        add_media(&mut builder, path)?;
    }
    if let Some(text) = title {
        builder
            .add_title(&text, fcpx::Time::ZERO, title_duration)
            .context("add opening title")?;
    }

    if args.dump_json {
        let json = serde_json::to_string_pretty(builder.document())
            .context("serialize document model")?;
        println!("{json}");
    }

    let (xml, report) = builder.to_fcpxml().context("document failed validation")?;
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, xml)
        .with_context(|| format!("write fcpxml '{}'", args.out.display()))?;

    if report.is_clean() {
        eprintln!("wrote {}", args.out.display());
    } else {
        eprintln!(
            "wrote {} with {} validation finding(s)",
            args.out.display(),
            report.len()
        );
    }
    Ok(())
}

fn add_media(builder: &mut fcpx::ProjectBuilder, path: &Path) -> anyhow::Result<()> {
    let added = match fcpx::media_kind_for(path) {
        fcpx::MediaKind::Video => builder.add_video(path),
        fcpx::MediaKind::Image => builder.add_image(path, None),
        fcpx::MediaKind::Audio => builder.add_audio(path),
    };
    added.with_context(|| format!("add media '{}'", path.display()))?;
    Ok(())
}

fn cmd_time(op: TimeOp) -> anyhow::Result<()> {
    match op {
        TimeOp::FromSeconds { seconds } => println!("{}", fcpx::time::from_seconds(seconds)),
        TimeOp::Add { a, b } => {
            let sum = fcpx::time::add(&a, &b).with_context(|| format!("add '{a}' + '{b}'"))?;
            println!("{sum}");
        }
        TimeOp::Check { text } => {
            if !fcpx::time::is_frame_aligned(&text) {
                anyhow::bail!("'{text}' is not frame-aligned");
            }
            println!("{text} is frame-aligned");
        }
    }
    Ok(())
}
