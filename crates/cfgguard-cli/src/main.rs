//! CLI entry point for cfgguard.
//!
//! This module is thin: it handles argument parsing, I/O, logging setup, and exit codes.
//! All business logic lives in the `cfgguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use cfgguard_app::{
    CheckInput, ExplainOutput, parse_report_json, render_annotations, render_markdown,
    render_text, run_check, run_explain, run_fmt_rule, run_validate, runtime_error_report,
    serialize_report, to_renderable, verdict_exit_code,
};
use cfgguard_env::ProcessEnv;
use cfgguard_settings::{CfgguardConfigV1, Overrides};
use cfgguard_types::CfgguardReport;
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "cfgguard",
    version,
    about = "Configuration governance: schema, invariants, and per-environment contracts"
)]
struct Cli {
    /// Path to the schema YAML.
    #[arg(long, global = true, default_value = "cfgguard.yaml")]
    schema: Utf8PathBuf,

    /// Path to cfgguard config TOML (missing file means defaults).
    #[arg(long, global = true, default_value = "cfgguard.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn).
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Apply this environment's contract instead of the one named by the execution tag.
    #[arg(long, global = true)]
    environment: Option<String>,

    /// Prefix for environment variable names.
    #[arg(long, global = true)]
    env_prefix: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long, global = true)]
    max_findings: Option<u32>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve config from the environment, evaluate, and write artifacts.
    Check {
        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/cfgguard/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/cfgguard/comment.md")]
        markdown_out: Utf8PathBuf,

        /// Write the resolved-config snapshot (contains config values).
        #[arg(long)]
        snapshot_out: Option<Utf8PathBuf>,

        /// Also print GitHub Actions annotations to stdout.
        #[arg(long)]
        annotations: bool,
    },

    /// Load the schema and report rule errors without evaluating.
    Validate,

    /// Parse a rule and print its canonical form.
    FmtRule {
        /// Rule text, e.g. 'execution.env == "prod" => db.env == "prod"'.
        rule: String,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/cfgguard/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/cfgguard/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "contract.deny") or code (e.g., "value_denied") to explain.
        identifier: String,
    },

    /// Print the JSON Schema of cfgguard.toml.
    ConfigSchema,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("CFGGUARD_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Check {
            ref report_out,
            write_markdown,
            ref markdown_out,
            ref snapshot_out,
            annotations,
        } => cmd_check(
            &cli,
            report_out,
            write_markdown.then_some(markdown_out.as_path()),
            snapshot_out.as_deref(),
            annotations,
        ),
        Commands::Validate => cmd_validate(&cli.schema),
        Commands::FmtRule { ref rule } => cmd_fmt_rule(rule),
        Commands::Md { report, output } => cmd_md(report, output),
        Commands::Annotations { report, max } => cmd_annotations(report, max),
        Commands::Explain { identifier } => cmd_explain(&identifier),
        Commands::ConfigSchema => cmd_config_schema(),
    }
}

fn cmd_check(
    cli: &Cli,
    report_out: &Utf8Path,
    markdown_out: Option<&Utf8Path>,
    snapshot_out: Option<&Utf8Path>,
    annotations: bool,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        // Load config if present; missing file is allowed (defaults apply).
        let cfg_text = if cli.config.exists() {
            std::fs::read_to_string(&cli.config)
                .with_context(|| format!("read config: {}", cli.config))?
        } else {
            debug!(path = %cli.config, "config file not found; using defaults");
            String::new()
        };

        let overrides = Overrides {
            profile: cli.profile.clone(),
            environment: cli.environment.clone(),
            env_prefix: cli.env_prefix.clone(),
            max_findings: cli.max_findings,
        };

        let output = run_check(CheckInput {
            schema_path: &cli.schema,
            config_text: &cfg_text,
            overrides,
            env: &ProcessEnv,
        })?;

        write_report_file(report_out, &output.report).context("write report json")?;

        let renderable = to_renderable(&output.report);
        if let Some(path) = markdown_out {
            write_text_file(path, &render_markdown(&renderable)).context("write markdown")?;
        }
        if let Some(path) = snapshot_out {
            let bytes = output.snapshot.canonical_json()?;
            write_bytes_file(path, &bytes).context("write config snapshot")?;
        }

        print!("{}", render_text(&renderable));
        if annotations {
            for line in render_annotations(&renderable, usize::MAX) {
                println!("{line}");
            }
        }

        Ok(verdict_exit_code(output.report.verdict))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(report_out, &report);
            eprintln!("cfgguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_validate(schema: &Utf8Path) -> anyhow::Result<()> {
    match run_validate(schema) {
        Ok(out) => {
            println!(
                "{schema}: ok ({} keys, {} invariants, environments: {})",
                out.keys,
                out.invariants,
                if out.environments.is_empty() {
                    "none".to_string()
                } else {
                    out.environments.join(", ")
                }
            );
            Ok(())
        }
        Err(err) => {
            eprintln!("cfgguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn cmd_fmt_rule(rule: &str) -> anyhow::Result<()> {
    match run_fmt_rule(rule) {
        Ok(canonical) => {
            println!("{canonical}");
            Ok(())
        }
        Err(err) => {
            eprintln!("cfgguard error: {err}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &CfgguardReport) -> anyhow::Result<()> {
    let data = serialize_report(report).context("serialize report")?;
    write_bytes_file(path, &data)
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    write_bytes_file(path, text.as_bytes())
}

fn write_bytes_file(path: &Utf8Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write file: {path}"))?;
    Ok(())
}

fn read_report(report_path: &Utf8Path) -> anyhow::Result<CfgguardReport> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {report_path}"))?;
    parse_report_json(&report_text)
}

fn cmd_md(report_path: Utf8PathBuf, output: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(&out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_annotations(report_path: Utf8PathBuf, max: usize) -> anyhow::Result<()> {
    let report = read_report(&report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }

    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", cfgguard_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                cfgguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_config_schema() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(CfgguardConfigV1);
    let text = serde_json::to_string_pretty(&schema).context("serialize config schema")?;
    println!("{text}");
    Ok(())
}
