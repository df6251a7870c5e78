use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollstage::{
    EngineConfig, FrameReport, GeometryProvider, InputCtx, InputEvent, PageManifest, Presentation,
    StageName, StyleTable, TargetId, Viewport, stages::sequencer::StageStatus,
};

#[derive(Parser, Debug)]
#[command(name = "scrollstage", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the built-in page manifest as JSON.
    Manifest(ManifestArgs),
    /// Replay an input script against a manifest and write a JSON report.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct ManifestArgs {
    /// Write to this path instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Page manifest JSON (must carry a layout).
    #[arg(long)]
    manifest: PathBuf,

    /// Input script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Engine configuration JSON; defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn default_frame_ms() -> f64 {
    1000.0 / 60.0
}

#[derive(serde::Deserialize, Debug)]
struct Script {
    #[serde(default = "default_frame_ms")]
    frame_ms: f64,
    duration_ms: f64,
    #[serde(default)]
    initial_scroll: f64,
    #[serde(default)]
    steps: Vec<ScriptStep>,
}

#[derive(serde::Deserialize, Debug)]
struct ScriptStep {
    at_ms: f64,
    #[serde(flatten)]
    action: ScriptAction,
}

#[derive(serde::Deserialize, Debug)]
#[serde(tag = "action", rename_all = "snake_case")]
enum ScriptAction {
    Input {
        event: InputEvent,
        #[serde(default)]
        focus_in_text_entry: bool,
    },
    Click {
        target: TargetId,
    },
    Resize {
        viewport: Viewport,
    },
}

#[derive(serde::Serialize)]
struct StageEntry {
    name: StageName,
    #[serde(flatten)]
    status: StageStatus,
}

#[derive(serde::Serialize)]
struct Report {
    frames: Vec<FrameReport>,
    stages: Vec<StageEntry>,
    styles: StyleTable,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Manifest(args) => cmd_manifest(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn write_output(out: Option<&Path>, json: &str) -> anyhow::Result<()> {
    let Some(path) = out else {
        println!("{json}");
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_manifest(args: ManifestArgs) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&PageManifest::default_page())
        .context("serialize manifest")?;
    write_output(args.out.as_deref(), &json)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let manifest = PageManifest::from_path(&args.manifest)?;
    let cfg = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let script_text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("read '{}'", args.script.display()))?;
    let mut script: Script = serde_json::from_str(&script_text)
        .with_context(|| format!("parse script '{}'", args.script.display()))?;
    anyhow::ensure!(
        script.frame_ms.is_finite() && script.frame_ms > 0.0,
        "script frame_ms must be > 0"
    );
    script.steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));

    let mut layout = manifest
        .layout
        .clone()
        .context("manifest has no layout to simulate against")?;
    let mut sink = StyleTable::default();
    let mut pres = Presentation::new(cfg, manifest, &layout)?;
    pres.start(script.initial_scroll, &layout, &mut sink);

    let mut frames = Vec::new();
    let mut steps = script.steps.into_iter().peekable();
    let mut now_ms = 0.0;
    while now_ms <= script.duration_ms {
        while let Some(step) = steps.next_if(|s| s.at_ms <= now_ms) {
            match step.action {
                ScriptAction::Input {
                    event,
                    focus_in_text_entry,
                } => {
                    let ctx = InputCtx {
                        now_ms: step.at_ms,
                        focus_in_text_entry,
                    };
                    let outcome = pres.handle_input(event, ctx);
                    tracing::debug!(at_ms = step.at_ms, ?outcome, "input");
                }
                ScriptAction::Click { target } => {
                    pres.click(&target, &mut sink);
                }
                ScriptAction::Resize { viewport } => {
                    layout.viewport = viewport;
                    pres.resize(&layout);
                    tracing::debug!(extent = layout.document_extent(), "resized");
                }
            }
        }
        frames.push(pres.frame(now_ms, &layout, &mut sink));
        now_ms += script.frame_ms;
    }

    let report = Report {
        frames,
        stages: pres
            .stage_statuses()
            .into_iter()
            .map(|(name, status)| StageEntry { name, status })
            .collect(),
        styles: sink,
    };
    let json = serde_json::to_string_pretty(&report).context("serialize report")?;
    write_output(args.out.as_deref(), &json)
}
