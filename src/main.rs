//! inkpath - batch converter from ink datasets to SVG outlines.
//!
//! Walks an input directory, converts every recognised ink file and writes one
//! SVG per document under the output directory, mirroring the input layout.
//! Newline-delimited sketch files (`.ndjson`) produce one SVG per line,
//! named `<stem>_<line>.svg`. A broken document is logged and skipped.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use inkpath::{convert, convert_sketch_lines, PipelineConfig, SourceFormat};

/// Convert InkML, whiteboard XML and array sketches into SVG outline documents
#[derive(Parser, Debug)]
#[command(name = "inkpath")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to search for ink files
    #[arg(short, long)]
    input: PathBuf,

    /// Directory the SVG files are written to
    #[arg(short, long)]
    output: PathBuf,

    /// Only convert files of this format (default: every known suffix)
    #[arg(short, long, value_enum)]
    format: Option<FormatArg>,

    /// YAML pipeline config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Convert files on the rayon pool
    #[arg(long)]
    parallel: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Enable debug-level output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Inkml,
    Whiteboard,
    Sketch,
}

impl From<FormatArg> for SourceFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Inkml => SourceFormat::Inkml,
            FormatArg::Whiteboard => SourceFormat::Whiteboard,
            FormatArg::Sketch => SourceFormat::Sketch,
        }
    }
}

/// One discovered input file.
#[derive(Debug)]
struct Job {
    path: PathBuf,
    format: SourceFormat,
}

#[derive(Debug, Default, Clone, Copy)]
struct Outcome {
    written: usize,
    failed: usize,
}

impl Outcome {
    fn merge(self, other: Outcome) -> Outcome {
        Outcome {
            written: self.written + other.written,
            failed: self.failed + other.failed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = match &cli.config {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if !cli.input.is_dir() {
        bail!("input {} is not a readable directory", cli.input.display());
    }
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;

    let only = cli.format.map(SourceFormat::from);
    let mut jobs = Vec::new();
    discover(&cli.input, only, &mut jobs)
        .with_context(|| format!("reading input directory {}", cli.input.display()))?;
    jobs.sort_by(|a, b| a.path.cmp(&b.path));

    let total = jobs.len();
    info!(total, input = %cli.input.display(), parallel = cli.parallel, "batch_start");
    let start = Instant::now();
    let progress = Progress::new(total);

    let run = |job: &Job| {
        let outcome = process(job, &cli.input, &cli.output, &config);
        progress.tick();
        outcome
    };
    let outcome = if cli.parallel {
        jobs.par_iter().map(run).reduce(Outcome::default, Outcome::merge)
    } else {
        jobs.iter().map(run).fold(Outcome::default(), Outcome::merge)
    };

    info!(
        files = total,
        written = outcome.written,
        failed = outcome.failed,
        elapsed_ms = start.elapsed().as_millis(),
        "batch_complete"
    );
    Ok(())
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);
    if cli.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Collects every file under `dir` whose suffix maps to a format (and to
/// `only`, when set).
fn discover(dir: &Path, only: Option<SourceFormat>, jobs: &mut Vec<Job>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            discover(&path, only, jobs)?;
            continue;
        }
        let Some(format) = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(SourceFormat::from_extension)
        else {
            continue;
        };
        if only.map_or(true, |wanted| wanted == format) {
            jobs.push(Job { path, format });
        }
    }
    Ok(())
}

struct Progress {
    total: usize,
    done: AtomicUsize,
}

impl Progress {
    fn new(total: usize) -> Self {
        Self {
            total,
            done: AtomicUsize::new(0),
        }
    }

    /// Logs every time another tenth of the batch completes.
    fn tick(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let percent = done * 100 / self.total.max(1);
        let previous = (done - 1) * 100 / self.total.max(1);
        if percent / 10 != previous / 10 || done == self.total {
            info!(done, total = self.total, percent, "progress");
        }
    }
}

fn process(job: &Job, input_root: &Path, output_root: &Path, cfg: &PipelineConfig) -> Outcome {
    let raw = match fs::read(&job.path) {
        Ok(raw) => raw,
        Err(err) => {
            warn!(path = %job.path.display(), error = %err, "read_failure");
            return Outcome { written: 0, failed: 1 };
        }
    };
    let target = output_base(&job.path, input_root, output_root);

    if is_ndjson(&job.path) {
        let text = match std::str::from_utf8(&raw) {
            Ok(text) => text,
            Err(err) => {
                warn!(path = %job.path.display(), error = %err, "read_failure");
                return Outcome { written: 0, failed: 1 };
            }
        };
        let mut outcome = Outcome::default();
        for (line, result) in convert_sketch_lines(text, cfg) {
            let out = sibling(&target, &format!("_{line}.svg"));
            match result {
                Ok(doc) => outcome = outcome.merge(write_svg(&out, &doc.render())),
                Err(err) => {
                    warn!(path = %job.path.display(), line, error = %err, "convert_skipped");
                    outcome.failed += 1;
                }
            }
        }
        return outcome;
    }

    match convert(job.format, &raw, cfg) {
        Ok(doc) => write_svg(&sibling(&target, ".svg"), &doc.render()),
        Err(err) => {
            warn!(
                path = %job.path.display(),
                stroke = ?err.stroke_index(),
                error = %err,
                "convert_skipped"
            );
            Outcome { written: 0, failed: 1 }
        }
    }
}

fn is_ndjson(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ndjson"))
}

/// `output_root` joined with the input path relative to `input_root`, minus
/// its extension.
fn output_base(path: &Path, input_root: &Path, output_root: &Path) -> PathBuf {
    let relative = path.strip_prefix(input_root).unwrap_or(path);
    output_root.join(relative).with_extension("")
}

fn sibling(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn write_svg(path: &Path, svg: &str) -> Outcome {
    let written = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| fs::write(path, svg));
    match written {
        Ok(()) => {
            debug!(path = %path.display(), bytes = svg.len(), "svg_written");
            Outcome { written: 1, failed: 0 }
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "write_failure");
            Outcome { written: 0, failed: 1 }
        }
    }
}
