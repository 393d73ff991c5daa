//! CLI entry point for polguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `polguard-app` crate.

use std::io::Write as _;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use polguard_app::{
    ExplainOutput, ReportFormat, ScanInput, parse_report_json, render_report, run_explain, run_scan,
    verdict_exit_code, write_artifact, write_report,
};
use polguard_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "polguard",
    version,
    about = "Least-privilege risk analyzer for IAM policy documents"
)]
struct Cli {
    /// Path to polguard config TOML.
    #[arg(long, global = true, default_value = "polguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (default|strict).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Override the failing risk threshold (low|medium|high|critical|never).
    #[arg(long, global = true)]
    fail_on: Option<String>,

    /// Drop findings below this risk (low|medium|high|critical).
    #[arg(long, global = true)]
    min_risk: Option<String>,

    /// Keep policies without findings in the report.
    #[arg(long, global = true)]
    keep_passing: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate policies and write artifacts.
    Scan {
        /// Policy bundle file or directory of policy documents.
        #[arg(long)]
        input: Utf8PathBuf,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/polguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/polguard/report.md")]
        markdown_out: Utf8PathBuf,

        /// Write an HTML report alongside the JSON.
        #[arg(long)]
        write_html: bool,

        /// Where to write the HTML report (if enabled).
        #[arg(long, default_value = "artifacts/polguard/report.html")]
        html_out: Utf8PathBuf,

        /// Write a CSV report alongside the JSON.
        #[arg(long)]
        write_csv: bool,

        /// Where to write the CSV report (if enabled).
        #[arg(long, default_value = "artifacts/polguard/report.csv")]
        csv_out: Utf8PathBuf,

        /// Write an XLSX workbook alongside the JSON.
        #[arg(long)]
        write_xlsx: bool,

        /// Where to write the XLSX workbook (if enabled).
        #[arg(long, default_value = "artifacts/polguard/report.xlsx")]
        xlsx_out: Utf8PathBuf,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/polguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render HTML from an existing JSON report.
    Html {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/polguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render CSV from an existing JSON report.
    Csv {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/polguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render an XLSX workbook from an existing JSON report.
    Xlsx {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/polguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the workbook (if not specified, writes bytes to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Explain a rule id with remediation guidance.
    Explain {
        /// The rule id (e.g., "WILDCARD_ACTION") to explain.
        identifier: String,
    },
}

/// Optional sink artifacts requested for a scan.
struct SinkOutputs {
    markdown: Option<Utf8PathBuf>,
    html: Option<Utf8PathBuf>,
    csv: Option<Utf8PathBuf>,
    xlsx: Option<Utf8PathBuf>,
}

impl SinkOutputs {
    fn requested(&self) -> impl Iterator<Item = (ReportFormat, &Utf8Path)> {
        [
            (ReportFormat::Markdown, self.markdown.as_deref()),
            (ReportFormat::Html, self.html.as_deref()),
            (ReportFormat::Csv, self.csv.as_deref()),
            (ReportFormat::Xlsx, self.xlsx.as_deref()),
        ]
        .into_iter()
        .filter_map(|(format, path)| path.map(|p| (format, p)))
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.cmd {
        Commands::Scan {
            ref input,
            ref report_out,
            write_markdown,
            ref markdown_out,
            write_html,
            ref html_out,
            write_csv,
            ref csv_out,
            write_xlsx,
            ref xlsx_out,
        } => {
            let sinks = SinkOutputs {
                markdown: write_markdown.then(|| markdown_out.clone()),
                html: write_html.then(|| html_out.clone()),
                csv: write_csv.then(|| csv_out.clone()),
                xlsx: write_xlsx.then(|| xlsx_out.clone()),
            };
            cmd_scan(&cli, input, report_out, &sinks)
        }
        Commands::Md { report, output } => {
            cmd_render(&report, output.as_deref(), ReportFormat::Markdown)
        }
        Commands::Html { report, output } => {
            cmd_render(&report, output.as_deref(), ReportFormat::Html)
        }
        Commands::Csv { report, output } => {
            cmd_render(&report, output.as_deref(), ReportFormat::Csv)
        }
        Commands::Xlsx { report, output } => {
            cmd_render(&report, output.as_deref(), ReportFormat::Xlsx)
        }
        Commands::Explain { identifier } => cmd_explain(&identifier),
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("polguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn cmd_scan(
    cli: &Cli,
    input: &Utf8Path,
    report_out: &Utf8Path,
    sinks: &SinkOutputs,
) -> anyhow::Result<i32> {
    // Missing config file is allowed (defaults apply).
    let config_text = match std::fs::read_to_string(&cli.config) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::debug!("no config at {}; using defaults", cli.config);
            String::new()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("read config: {}", cli.config));
        }
    };

    let source = polguard_source::source_for_path(input)?;
    log::info!("loading policies from {}", source.describe());
    let policies = source.policies()?;

    let overrides = Overrides {
        profile: cli.profile.clone(),
        fail_on: cli.fail_on.clone(),
        min_risk: cli.min_risk.clone(),
        keep_passing: cli.keep_passing.then_some(true),
    };

    let output = run_scan(ScanInput {
        config_text: &config_text,
        overrides,
        policies,
    })?;
    let report = output.report;

    write_report(report_out, &report).context("write report json")?;

    for (format, path) in sinks.requested() {
        let bytes = render_report(&report, format)?;
        write_artifact(path, &bytes).with_context(|| format!("write {} report", format.name()))?;
    }

    Ok(verdict_exit_code(report.verdict))
}

fn cmd_render(
    report_path: &Utf8Path,
    output: Option<&Utf8Path>,
    format: ReportFormat,
) -> anyhow::Result<i32> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let bytes = render_report(&report, format)?;

    if let Some(out_path) = output {
        write_artifact(out_path, &bytes)
            .with_context(|| format!("write {} output", format.name()))?;
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&bytes).context("write stdout")?;
        stdout.flush().context("flush stdout")?;
    }

    Ok(0)
}

fn cmd_explain(identifier: &str) -> anyhow::Result<i32> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", polguard_app::format_explanation(&exp));
            Ok(0)
        }
        ExplainOutput::NotFound {
            identifier,
            available_rule_ids,
        } => {
            eprint!(
                "{}",
                polguard_app::format_not_found(&identifier, available_rule_ids)
            );
            Ok(1)
        }
    }
}
