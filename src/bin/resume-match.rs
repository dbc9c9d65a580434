//! CLI binary for resume-matcher.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `MatcherConfig`, drives a `Session` and prints the results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resume_matcher::pipeline::input::drafts_from_paths;
use resume_matcher::{
    extract_only, render_json, review_observed, Action, ExtractionMode,
    ExtractionProgressCallback, MatcherConfig, Notice, ProgressCallback, ResultView, Session,
    SubmissionClient, DEFAULT_ENDPOINT,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live bar plus one log line per resume.
/// Files may finish out of order in concurrent mode; the bar only counts.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new(0); // length set in on_batch_start
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.cyan} {prefix:.bold}  \
                 [{bar:42.green/238}] {pos:>3}/{len} files  {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Extracting");
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self { bar })
    }
}

impl ExtractionProgressCallback for CliProgressCallback {
    fn on_batch_start(&self, total_files: usize) {
        self.bar.set_length(total_files as u64);
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Processing {total_files} resume(s)…"))
        ));
    }

    fn on_file_error(&self, _index: usize, name: &str, error: &str) {
        // Truncate very long error messages to keep output tidy.
        let msg: String = if error.chars().count() > 80 {
            format!("{}\u{2026}", error.chars().take(79).collect::<String>())
        } else {
            error.to_string()
        };
        self.bar
            .println(format!("  {} {:<32}  {}", red("✗"), name, red(&msg)));
    }

    fn on_file_complete(&self, _index: usize, name: &str, percent: u8) {
        self.bar
            .println(format!("  {} {:<32}  {}", green("✓"), name, dim(&format!("{percent:>3}%"))));
        self.bar.set_message(format!("{percent}%"));
        self.bar.inc(1);
    }

    fn on_batch_complete(&self, total_files: usize, failed: usize) {
        self.bar.finish_and_clear();
        if failed == 0 {
            eprintln!(
                "{} {} resume(s) extracted",
                green("✔"),
                bold(&total_files.to_string())
            );
        } else {
            eprintln!(
                "{} {}/{} resume(s) extracted  ({} recorded as errors)",
                cyan("⚠"),
                bold(&(total_files - failed).to_string()),
                total_files,
                red(&failed.to_string()),
            );
        }
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Score two resumes against a job description
  resume-match --jd "Senior Backend Engineer" alice.pdf bob.txt

  # Read the job description from a file, JSON output
  resume-match --jd-file jd.txt --json resumes/*.pdf > scores.json

  # Another scoring service, one file at a time
  resume-match --endpoint http://scoring:8000/review --sequential --jd-file jd.txt cv/*.pdf

  # Only extract text (no request is sent)
  resume-match --extract-only --json cv.pdf

RESPONSE CONTRACT:
  The service must answer with a JSON array of {"Resume": <name>, "Score": <0..1>}.

ENVIRONMENT VARIABLES:
  RESUME_MATCH_ENDPOINT     Scoring endpoint URL
  RESUME_MATCH_JD           Job description text
  RESUME_MATCH_JD_FILE      Job description file
  RESUME_MATCH_MAX_RESUMES  Resume cap (0 = unlimited)
  RUST_LOG                  Log filter, e.g. resume_matcher=debug
"#;

/// Score resumes (PDF or text) against a job description.
#[derive(Parser, Debug)]
#[command(
    name = "resume-match",
    version,
    about = "Score resumes (PDF or text) against a job description",
    long_about = "Extract text from resume files locally, send it with a job description to a \
resume-scoring service in a single request, and print the returned match scores.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Resume files (PDF or plain text), scored in the order given.
    #[arg(required = true)]
    resumes: Vec<PathBuf>,

    /// Job description text.
    #[arg(long, env = "RESUME_MATCH_JD", conflicts_with = "jd_file")]
    jd: Option<String>,

    /// Read the job description from this file.
    #[arg(long, env = "RESUME_MATCH_JD_FILE")]
    jd_file: Option<PathBuf>,

    /// Scoring service URL.
    #[arg(long, env = "RESUME_MATCH_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Maximum number of resumes per batch (0 = unlimited).
    #[arg(long, env = "RESUME_MATCH_MAX_RESUMES", default_value_t = 50)]
    max_resumes: usize,

    /// Extract one file at a time, in order.
    #[arg(long, env = "RESUME_MATCH_SEQUENTIAL")]
    sequential: bool,

    /// Files extracted concurrently.
    #[arg(short, long, env = "RESUME_MATCH_CONCURRENCY", default_value_t = 4,
          value_parser = clap::value_parser!(u64).range(1..))]
    concurrency: u64,

    /// Scoring request timeout in seconds.
    #[arg(long, env = "RESUME_MATCH_TIMEOUT", default_value_t = 60)]
    timeout: u64,

    /// Print extracted texts and exit without contacting the service.
    #[arg(long)]
    extract_only: bool,

    /// Output JSON instead of text lines.
    #[arg(long, env = "RESUME_MATCH_JSON")]
    json: bool,

    /// Disable progress bar.
    #[arg(long, env = "RESUME_MATCH_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "RESUME_MATCH_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "RESUME_MATCH_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The progress bar already reports per-file outcomes; keep INFO logs
    // out of its way unless verbose output was asked for.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build config ─────────────────────────────────────────────────────
    let progress_cb: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn ExtractionProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress_cb)?;

    // ── Collect input ────────────────────────────────────────────────────
    let drafts = drafts_from_paths(&cli.resumes).context("Failed to select resumes")?;
    let mut session = Session::new(&config).apply(Action::AddDrafts(drafts));
    if let Some(notice) = session.notice() {
        anyhow::bail!("{}", notice.message());
    }

    if cli.extract_only {
        let output = extract_only(&session, &config)
            .await
            .context("Extraction failed")?;
        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).context("Failed to serialise output")?
            );
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            for r in &output.resumes {
                writeln!(handle, "{}\n{}\n{}\n", bold(&r.name), dim(&"─".repeat(40)), r.text)
                    .context("Failed to write to stdout")?;
            }
        }
        return Ok(());
    }

    let job_description = read_job_description(&cli).await?;
    session = session.apply(Action::SetJobDescription(job_description));

    // ── Run review ───────────────────────────────────────────────────────
    let client = SubmissionClient::new(&config).context("Failed to create HTTP client")?;
    let announce = !cli.quiet && !cli.json;
    let mut was_loading = false;
    let session = review_observed(session, &client, &config, |s| {
        let loading = matches!(s.view(), ResultView::Loading);
        if announce && loading && !was_loading {
            eprintln!("{} {}", cyan("◆"), s.view().render_text());
        }
        was_loading = loading;
    })
    .await;

    match session.notice() {
        Some(Notice::Warning(msg)) => {
            eprintln!("{} {}", red("✘"), msg);
            std::process::exit(1);
        }
        Some(Notice::Error(msg)) => {
            eprintln!("{} {}", red("✘"), msg);
            eprintln!("  {}", dim(&format!("scoring endpoint: {}", client.endpoint())));
            std::process::exit(1);
        }
        None => {}
    }

    if cli.json {
        println!("{}", render_json(session.results()).context("Failed to render results")?);
    } else {
        if !cli.quiet {
            eprintln!("{}", bold("Results:"));
        }
        println!("{}", session.view().render_text());
    }

    Ok(())
}

/// Map CLI args to `MatcherConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<MatcherConfig> {
    let extraction = if cli.sequential {
        ExtractionMode::Sequential
    } else {
        ExtractionMode::Concurrent {
            limit: cli.concurrency as usize,
        }
    };
    let max_resumes = match cli.max_resumes {
        0 => None,
        n => Some(n),
    };

    let mut builder = MatcherConfig::builder()
        .endpoint(cli.endpoint.clone())
        .max_resumes(max_resumes)
        .extraction(extraction)
        .request_timeout_secs(cli.timeout);

    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}

/// `--jd` wins; otherwise `--jd-file`; otherwise empty (rejected by the review).
async fn read_job_description(cli: &Cli) -> Result<String> {
    if let Some(ref jd) = cli.jd {
        return Ok(jd.clone());
    }
    match cli.jd_file {
        Some(ref path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description from {:?}", path)),
        None => Ok(String::new()),
    }
}
