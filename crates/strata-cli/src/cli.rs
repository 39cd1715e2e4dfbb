use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use strata_assess::payload::{DEFAULT_CUSTOMER_ID, DEFAULT_DOC_CODE};
use strata_assess::{
    analyze_source, correlated_metrics, AnalyzeRequest, EnterpriseMetrics, PricingOptions,
    PricingOs, Session, SizingDefaults, SnapshotStore, REGIONS,
};
use strata_io::{parse_workbook_path, ParseOptions, ReadError};
use strata_model::{Assessment, DataSource, UniversalData};

use crate::backend::{BackendClient, DEFAULT_API_URL};
use crate::report;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum PricingOsArg {
    #[default]
    Linux,
    Windows,
}

impl From<PricingOsArg> for PricingOs {
    fn from(arg: PricingOsArg) -> Self {
        match arg {
            PricingOsArg::Linux => PricingOs::Linux,
            PricingOsArg::Windows => PricingOs::Windows,
        }
    }
}

#[derive(Parser)]
#[command(
    name = "strata",
    about = "Parse RVTools / Azure Migrate inventory workbooks and assess cloud-migration readiness."
)]
pub struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Only accept `rvtools_export_XXXX_NN.xlsx` / `azmigrate_export_XXXX_NN.xlsx` file names.
    #[arg(long, global = true)]
    strict_names: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the detected type, sheets and extracted VMs of one workbook.
    Inspect {
        /// Workbook to read.
        file: PathBuf,
    },
    /// Readiness assessment over the deduplicated union of the given workbooks.
    Assess(AssessArgs),
    /// List VM identities across workbooks, or the per-source detail rows of one VM.
    Correlate(CorrelateArgs),
    /// Build the analysis-backend request for a workbook, and optionally send it.
    Payload(PayloadArgs),
    /// Persistent upload session.
    Session(SessionArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Workbooks, in upload order.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Source code for the workbook at the same position (repeatable).
    ///
    /// Codes are cut to two upper-case characters. Workbooks without a code are keyed
    /// by file name.
    #[arg(long = "code")]
    codes: Vec<String>,
}

#[derive(Args)]
struct AssessArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Also assess every workbook on its own.
    #[arg(long)]
    per_source: bool,

    /// Include cost, complexity, risk and sustainability metrics.
    #[arg(long)]
    enterprise: bool,
}

#[derive(Args)]
struct CorrelateArgs {
    #[command(flatten)]
    sources: SourceArgs,

    /// Show the per-source detail rows for this VM (case-insensitive).
    #[arg(long)]
    vm: Option<String>,
}

#[derive(Args)]
struct PayloadArgs {
    /// Workbook to send.
    file: PathBuf,

    #[arg(long, env = "STRATA_CUSTOMER_ID", default_value = DEFAULT_CUSTOMER_ID)]
    customer_id: String,

    #[arg(long, env = "STRATA_DOC_CODE", default_value = DEFAULT_DOC_CODE)]
    doc_code: String,

    /// Pricing region (e.g. `eu-west`). Adds `pricing_options` to the request.
    #[arg(long)]
    region: Option<String>,

    /// OS assumed for pricing. Only used with `--region`.
    #[arg(long, value_enum, default_value_t)]
    pricing_os: PricingOsArg,

    /// POST the request to the backend and print its response instead.
    #[arg(long)]
    remote: bool,

    #[arg(long, env = "STRATA_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
}

#[derive(Args)]
struct SessionArgs {
    /// Directory holding the session snapshot.
    #[arg(long, env = "STRATA_STATE_DIR", default_value = ".strata")]
    state_dir: PathBuf,

    #[command(subcommand)]
    command: SessionCommand,
}

#[derive(Subcommand)]
enum SessionCommand {
    /// Parse a workbook and add it as an active source.
    Add {
        file: PathBuf,
        /// Two-character source code (defaults to the file name).
        #[arg(long)]
        code: Option<String>,
    },
    /// Activate or deactivate a source.
    Toggle { code: String },
    /// List sources and assess the active ones.
    Show {
        /// Re-attach a workbook to a restored source (repeatable).
        #[arg(long = "attach", value_name = "CODE=PATH")]
        attach: Vec<String>,
    },
    /// Drop every source and delete the snapshot.
    Restart,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SourceAssessment<'a> {
    code: &'a str,
    assessment: Assessment,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssessReport<'a> {
    sources: Vec<&'a DataSource>,
    assessment: Assessment,
    #[serde(skip_serializing_if = "Option::is_none")]
    per_source: Option<Vec<SourceAssessment<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    enterprise_metrics: Option<EnterpriseMetrics>,
}

pub fn run() -> Result<()> {
    run_with_args(Cli::parse())
}

pub fn run_with_args(cli: Cli) -> Result<()> {
    let options = ParseOptions {
        strict_file_names: cli.strict_names,
    };
    match cli.command {
        Command::Inspect { file } => {
            let data = load_workbook(&file, options)?;
            let summary = report::InspectReport::new(&data);
            match cli.format {
                OutputFormat::Text => print_text(|out| report::write_inspect(out, &summary)),
                OutputFormat::Json => print_json(&summary),
            }
        }
        Command::Assess(args) => assess(&args, options, cli.format),
        Command::Correlate(args) => correlate(&args, options, cli.format),
        Command::Payload(args) => payload(&args, options, cli.format),
        Command::Session(args) => session(&args, options, cli.format),
    }
}

/// Parse a workbook, mapping failures to the messages users see.
///
/// File-name validation keeps its fixed corrective message; anything else is reported
/// as a processing failure.
fn load_workbook(path: &Path, options: ParseOptions) -> Result<UniversalData> {
    parse_workbook_path(path, options).map_err(|err| match err {
        ReadError::InvalidFileName { .. } => anyhow::Error::new(err),
        other => anyhow::anyhow!("Processing failed: {other}"),
    })
}

fn load_sources(args: &SourceArgs, options: ParseOptions) -> Result<Session> {
    if args.codes.len() > args.files.len() {
        anyhow::bail!(
            "{} --code values given for {} workbooks",
            args.codes.len(),
            args.files.len()
        );
    }
    let mut session = Session::new();
    for (i, path) in args.files.iter().enumerate() {
        let data = load_workbook(path, options)?;
        session.add_source(data, args.codes.get(i).map(String::as_str))?;
    }
    Ok(session)
}

fn assess(args: &AssessArgs, options: ParseOptions, format: OutputFormat) -> Result<()> {
    let session = load_sources(&args.sources, options)?;
    let result = AssessReport {
        sources: session.active_sources(),
        assessment: session.assessment(),
        per_source: args.per_source.then(|| {
            session
                .sources()
                .iter()
                .filter_map(|s| {
                    s.data.as_ref().map(|data| SourceAssessment {
                        code: &s.code,
                        assessment: analyze_source(data),
                    })
                })
                .collect()
        }),
        enterprise_metrics: args
            .enterprise
            .then(|| session.enterprise_metrics(&SizingDefaults::default())),
    };

    match format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Text => print_text(|out| {
            report::write_sources(out, &session)?;
            writeln!(out)?;
            report::write_assessment(out, &result.assessment)?;
            for source in result.per_source.iter().flatten() {
                writeln!(out)?;
                writeln!(out, "== {} ==", source.code)?;
                report::write_assessment(out, &source.assessment)?;
            }
            if let Some(metrics) = &result.enterprise_metrics {
                writeln!(out)?;
                report::write_enterprise(out, metrics)?;
            }
            Ok(())
        }),
    }
}

fn correlate(args: &CorrelateArgs, options: ParseOptions, format: OutputFormat) -> Result<()> {
    let session = load_sources(&args.sources, options)?;
    let index = session.correlate();

    let Some(vm) = &args.vm else {
        return match format {
            OutputFormat::Json => print_json(&index),
            OutputFormat::Text => print_text(|out| report::write_correlation(out, &index)),
        };
    };

    let metrics = correlated_metrics(vm, &index, session.sources(), session.active_sheets())
        .with_context(|| format!("no VM named '{vm}' in the loaded workbooks"))?;
    match format {
        OutputFormat::Json => print_json(&metrics),
        OutputFormat::Text => print_text(|out| report::write_metrics(out, vm, &metrics)),
    }
}

fn payload(args: &PayloadArgs, options: ParseOptions, format: OutputFormat) -> Result<()> {
    let data = load_workbook(&args.file, options)?;
    let pricing = match &args.region {
        Some(region) => Some(
            PricingOptions::for_region(region, args.pricing_os.into()).with_context(|| {
                let known: Vec<&str> = REGIONS.iter().map(|r| r.value).collect();
                format!("unknown pricing region '{region}' (expected one of: {})", known.join(", "))
            })?,
        ),
        None => None,
    };
    let request = AnalyzeRequest::new(&data, &args.customer_id, &args.doc_code).with_pricing(pricing);

    if !args.remote {
        return print_value(&request, format);
    }
    let client = BackendClient::new(&args.api_url)?;
    let response = client.analyze(&request)?;
    print_value(&response, format)
}

fn session(args: &SessionArgs, options: ParseOptions, format: OutputFormat) -> Result<()> {
    let store = SnapshotStore::in_dir(&args.state_dir);
    let mut session = store
        .load()
        .with_context(|| format!("failed to load {}", store.path().display()))?
        .map(Session::restore)
        .unwrap_or_default();

    match &args.command {
        SessionCommand::Add { file, code } => {
            let data = load_workbook(file, options)?;
            let added = session.add_source(data, code.as_deref())?.clone();
            store.save(&session.snapshot())?;
            match format {
                OutputFormat::Json => print_json(&added),
                OutputFormat::Text => print_text(|out| {
                    writeln!(
                        out,
                        "Added {} ({}, {} VMs)",
                        added.code, added.name, added.vm_count
                    )
                }),
            }
        }
        SessionCommand::Toggle { code } => {
            let active = session.toggle_sheet(code)?;
            store.save(&session.snapshot())?;
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "code": code,
                    "active": active,
                })),
                OutputFormat::Text => print_text(|out| {
                    let state = if active { "active" } else { "inactive" };
                    writeln!(out, "{code} is now {state}")
                }),
            }
        }
        SessionCommand::Show { attach } => {
            for pair in attach {
                let Some((code, path)) = pair.split_once('=') else {
                    anyhow::bail!("invalid --attach '{pair}' (expected format: CODE=PATH)");
                };
                let data = load_workbook(Path::new(path), options)?;
                session.attach_data(code, data)?;
            }
            let assessment = session.assessment();
            match format {
                OutputFormat::Json => print_json(&serde_json::json!({
                    "session": session.snapshot(),
                    "assessment": assessment,
                })),
                OutputFormat::Text => print_text(|out| {
                    writeln!(out, "Page: {:?}", session.current_page())?;
                    report::write_sources(out, &session)?;
                    writeln!(out)?;
                    report::write_assessment(out, &assessment)
                }),
            }
        }
        SessionCommand::Restart => {
            session.restart();
            store.clear()?;
            match format {
                OutputFormat::Json => print_json(&session.snapshot()),
                OutputFormat::Text => print_text(|out| writeln!(out, "Session cleared")),
            }
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    serde_json::to_writer(&mut handle, value)?;
    handle.write_all(b"\n")?;
    Ok(())
}

/// JSON in both formats; pretty-printed for text output.
fn print_value<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(value),
        OutputFormat::Text => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, value)?;
            handle.write_all(b"\n")?;
            Ok(())
        }
    }
}

fn print_text(
    render: impl FnOnce(&mut std::io::StdoutLock<'static>) -> std::io::Result<()>,
) -> Result<()> {
    let mut handle = std::io::stdout().lock();
    render(&mut handle)?;
    handle.flush()?;
    Ok(())
}
