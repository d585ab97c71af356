use anyhow::{Context, Result};
use auditreport::{
    config::Config,
    model::{ReportSummary, Severity},
    output::{print_summary_table, render, OutputFormat},
    report::{generate, LocalClock},
    writer::write_report,
};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const CRITICAL_VULN: u8 = 2;
    pub const HIGH_VULN: u8 = 3;
    pub const MODERATE_VULN: u8 = 4;
    pub const LOW_VULN: u8 = 5;
    pub const INFO_VULN: u8 = 6;
}

#[derive(Parser)]
#[command(name = "auditreport")]
#[command(
    author,
    version,
    about = "Generate an HTML report from `npm audit --json` output",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Args)]
struct GenerateArgs {
    /// Folder to write the report into (defaults to the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report file name
    #[arg(short, long)]
    name: Option<String>,

    /// Report title
    #[arg(short, long)]
    title: Option<String>,

    /// Read audit JSON from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output format (html, json)
    #[arg(short, long)]
    format: Option<String>,

    /// Exit with error if vulnerabilities at or above this severity are found
    /// (critical, high, moderate, low, info)
    #[arg(long)]
    fail_on: Option<Severity>,

    /// Print a severity table after writing the report
    #[arg(long)]
    summary: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or create config file
    Config {
        /// Generate default config file
        #[arg(long)]
        init: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    init_logging(cli.generate.verbose);

    match cli.command {
        Some(Commands::Config { init, path }) => {
            handle_config(init, path)?;
            Ok(exit_codes::SUCCESS)
        }
        None => run_generate(cli.generate),
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "auditreport=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_generate(args: GenerateArgs) -> Result<u8> {
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            Config::default()
        }
    };

    let format_str = args.format.unwrap_or_else(|| config.default_format.clone());
    let format = OutputFormat::from_str(&format_str).map_err(|e| anyhow::anyhow!(e))?;

    let output_dir = match args.output.or_else(|| config.default_output_dir.clone()) {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to resolve current directory")?,
    };
    let file_name = resolve_file_name(args.name, &config.default_file_name, format);
    let title = args.title.unwrap_or_else(|| config.default_title.clone());

    let audit_json = read_input(args.input.as_deref())?;
    let payload = generate(&audit_json, Some(&title), &config.ignore, &LocalClock)?;
    let contents = render(&payload, format)?;
    let path = write_report(&output_dir, &file_name, &contents)?;

    println!("Report written to: {}", path.display());
    if args.summary {
        print_summary_table(&payload);
    }

    let fail_on = args.fail_on.or(config.fail_on);
    Ok(determine_exit_code(&payload.summary, fail_on))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read audit JSON from stdin")?;
            Ok(buffer)
        }
    }
}

/// An explicit `--name` is used as-is. A configured default keeps its own
/// extension for HTML and switches to `.json` for JSON output.
fn resolve_file_name(name: Option<String>, default_name: &str, format: OutputFormat) -> String {
    match (name, format) {
        (Some(name), _) => name,
        (None, OutputFormat::Html) => default_name.to_string(),
        (None, OutputFormat::Json) => Path::new(default_name)
            .with_extension(format.extension())
            .to_string_lossy()
            .into_owned(),
    }
}

/// Determine the exit code based on vulnerabilities found and --fail-on setting
fn determine_exit_code(summary: &ReportSummary, fail_on: Option<Severity>) -> u8 {
    let Some(threshold) = fail_on else {
        return exit_codes::SUCCESS;
    };

    match summary.most_severe() {
        Some(found) if found <= threshold => match found {
            Severity::Critical => exit_codes::CRITICAL_VULN,
            Severity::High => exit_codes::HIGH_VULN,
            Severity::Moderate => exit_codes::MODERATE_VULN,
            Severity::Low => exit_codes::LOW_VULN,
            Severity::Info => exit_codes::INFO_VULN,
        },
        _ => exit_codes::SUCCESS,
    }
}

fn handle_config(init: bool, show_path: bool) -> Result<()> {
    let config_path = Config::config_path();

    if show_path {
        println!("{}", config_path.display());
        return Ok(());
    }

    if init {
        if config_path.exists() {
            tracing::warn!(path = %config_path.display(), "config file already exists, leaving it untouched");
        } else {
            Config::default().save()?;
            println!("Created config file at: {}", config_path.display());
        }
        return Ok(());
    }

    let source = if config_path.exists() {
        config_path.display().to_string()
    } else {
        "built-in defaults (run 'auditreport config --init' to create a file)".to_string()
    };
    let config = Config::load()?;
    println!("Settings from {}", source);
    println!();
    println!("{}", describe_config(&config));

    Ok(())
}

/// The settings a report run would fall back to when no flags are given.
fn describe_config(config: &Config) -> String {
    let format = OutputFormat::from_str(&config.default_format);
    let output_dir = config
        .default_output_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "current directory".to_string());
    let file_name = match format {
        Ok(format) => resolve_file_name(None, &config.default_file_name, format),
        Err(_) => config.default_file_name.clone(),
    };

    let lines = [
        ("title", config.default_title.clone()),
        ("output", output_dir),
        ("file name", file_name),
        (
            "format",
            match format {
                Ok(_) => config.default_format.clone(),
                Err(e) => format!("{} (invalid: {})", config.default_format, e),
            },
        ),
        (
            "fail on",
            config
                .fail_on
                .map(|s| s.to_string())
                .unwrap_or_else(|| "never".to_string()),
        ),
        (
            "ignored",
            format!(
                "{} package patterns, {} advisories",
                config.ignore.packages.len(),
                config.ignore.advisories.len()
            ),
        ),
    ];

    lines
        .iter()
        .map(|(label, value)| format!("  {:<10} {}", label, value))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use auditreport::Vulnerability;

    fn summary_of(severities: &[&str]) -> ReportSummary {
        let vulns: Vec<Vulnerability> = severities
            .iter()
            .map(|s| Vulnerability::new("T", "pkg", *s))
            .collect();
        ReportSummary::from_vulnerabilities(&vulns)
    }

    #[test]
    fn test_exit_code_without_threshold() {
        assert_eq!(
            determine_exit_code(&summary_of(&["critical"]), None),
            exit_codes::SUCCESS
        );
    }

    #[test]
    fn test_exit_code_reports_most_severe() {
        let summary = summary_of(&["low", "critical", "high"]);
        assert_eq!(
            determine_exit_code(&summary, Some(Severity::Low)),
            exit_codes::CRITICAL_VULN
        );
    }

    #[test]
    fn test_exit_code_below_threshold() {
        let summary = summary_of(&["moderate", "low"]);
        assert_eq!(
            determine_exit_code(&summary, Some(Severity::High)),
            exit_codes::SUCCESS
        );
        assert_eq!(
            determine_exit_code(&summary, Some(Severity::Moderate)),
            exit_codes::MODERATE_VULN
        );
    }

    #[test]
    fn test_exit_code_ignores_unknown_severity() {
        let summary = summary_of(&["urgent"]);
        assert_eq!(
            determine_exit_code(&summary, Some(Severity::Info)),
            exit_codes::SUCCESS
        );
    }

    #[test]
    fn test_resolve_file_name_keeps_configured_html_name() {
        assert_eq!(
            resolve_file_name(None, "audit.htm", OutputFormat::Html),
            "audit.htm"
        );
        assert_eq!(resolve_file_name(None, "report", OutputFormat::Html), "report");
        assert_eq!(
            resolve_file_name(None, "audit.htm", OutputFormat::Json),
            "audit.json"
        );
    }

    #[test]
    fn test_describe_config() {
        let mut config = Config::default();
        config.default_file_name = "audit.htm".to_string();
        config.default_output_dir = Some(PathBuf::from("reports"));
        config.fail_on = Some(Severity::High);
        config.ignore.packages = vec!["@types/*".to_string()];

        let text = describe_config(&config);
        assert!(text.contains("title      npm audit report"));
        assert!(text.contains("output     reports"));
        assert!(text.contains("file name  audit.htm"));
        assert!(text.contains("fail on    high"));
        assert!(text.contains("1 package patterns, 0 advisories"));
    }

    #[test]
    fn test_describe_config_flags_bad_format() {
        let mut config = Config::default();
        config.default_format = "pdf".to_string();

        let text = describe_config(&config);
        assert!(text.contains("format     pdf (invalid: Unknown format: pdf"));
        assert!(text.contains("output     current directory"));
        assert!(text.contains("fail on    never"));
    }

    #[test]
    fn test_resolve_file_name() {
        assert_eq!(
            resolve_file_name(Some("custom.htm".to_string()), "npm-audit.html", OutputFormat::Json),
            "custom.htm"
        );
        assert_eq!(
            resolve_file_name(None, "npm-audit.html", OutputFormat::Html),
            "npm-audit.html"
        );
        assert_eq!(
            resolve_file_name(None, "npm-audit.html", OutputFormat::Json),
            "npm-audit.json"
        );
    }

    #[test]
    fn test_cli_parses_flat_arguments() {
        let cli = Cli::try_parse_from([
            "auditreport",
            "-o",
            "reports",
            "-n",
            "audit.html",
            "-t",
            "Nightly",
            "--fail-on",
            "high",
        ])
        .unwrap();

        assert!(cli.command.is_none());
        assert_eq!(cli.generate.output, Some(PathBuf::from("reports")));
        assert_eq!(cli.generate.name.as_deref(), Some("audit.html"));
        assert_eq!(cli.generate.title.as_deref(), Some("Nightly"));
        assert_eq!(cli.generate.fail_on, Some(Severity::High));
    }

    #[test]
    fn test_cli_fail_on_uses_severity_parser() {
        let cli = Cli::try_parse_from(["auditreport", "--fail-on", "Moderate"]).unwrap();
        assert_eq!(cli.generate.fail_on, Some(Severity::Moderate));

        assert!(Cli::try_parse_from(["auditreport", "--fail-on", "medium"]).is_err());
    }

    #[test]
    fn test_cli_parses_config_subcommand() {
        let cli = Cli::try_parse_from(["auditreport", "config", "--path"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                init: false,
                path: true
            })
        ));
    }
}
