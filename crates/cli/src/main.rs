//! # chartsheet-cli
//!
//! Command-line interface for chartsheet.

use anyhow::{bail, Context, Result};
use chartsheet_core::sheet::{
    format_file_size, validate_upload, FileInfo, Preview, PreviewOptions, Table, UploadLimits,
    DEFAULT_MAX_BYTES,
};
use chartsheet_core::viz::{build_chart, ChartConfig, ChartKind, ChartSpec};
use chartsheet_core::{
    FileStore, IncomingFile, SessionStore, UploadProgress, UploadStatus, UploadedFile, Uploader,
};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// chartsheet - turn a spreadsheet into a chart
#[derive(Parser)]
#[command(name = "chartsheet")]
#[command(author, version, about = "Spreadsheet to chart pipeline", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Session directory holding the current upload
    #[arg(long, global = true, env = "CHARTSHEET_STORE_DIR", value_name = "DIR")]
    store: Option<PathBuf>,

    /// Largest accepted upload in bytes
    #[arg(
        long,
        global = true,
        env = "CHARTSHEET_MAX_UPLOAD_BYTES",
        default_value_t = DEFAULT_MAX_BYTES
    )]
    max_bytes: u64,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Check that a file would be accepted for upload
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Parse a file and keep it as the session's current upload
    Upload {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Owner recorded with the upload
        #[arg(long, default_value = "local")]
        user: String,
    },

    /// Show one page of the parsed table
    Preview {
        /// Spreadsheet to read (defaults to the current upload)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Rows per page
        #[arg(long, default_value_t = 10)]
        page_size: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a chart from two columns
    Chart {
        /// Spreadsheet to read (defaults to the current upload)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Chart type (defaults to bar)
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,

        /// X-axis column (defaults to the first header)
        #[arg(short, long)]
        x: Option<String>,

        /// Y-axis column (defaults to the second header)
        #[arg(short, long)]
        y: Option<String>,

        /// Chart title
        #[arg(long)]
        title: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Write to this path instead of the default
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

/// Chart type as accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
enum KindArg {
    Bar,
    Line,
    Pie,
    Scatter,
}

impl From<KindArg> for ChartKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Bar => ChartKind::Bar,
            KindArg::Line => ChartKind::Line,
            KindArg::Pie => ChartKind::Pie,
            KindArg::Scatter => ChartKind::Scatter,
        }
    }
}

/// Output format for charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Chart.js JSON, printed unless --output is given
    #[default]
    Json,
    /// Standalone HTML page
    Html,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    let limits = UploadLimits::default().with_max_bytes(cli.max_bytes);
    let store = cli
        .store
        .as_deref()
        .map(FileStore::open)
        .transpose()
        .context("Failed to open session directory")?;

    match cli.command {
        Command::Validate { file } => run_validate(&file, &limits),
        Command::Upload { file, user } => {
            let Some(store) = store else {
                bail!("upload needs a session directory (--store or CHARTSHEET_STORE_DIR)");
            };
            run_upload(&file, &user, &limits, &store).await
        }
        Command::Preview {
            file,
            page,
            page_size,
            json,
        } => {
            let table = load_table(file.as_deref(), &limits, store.as_ref()).await?;
            let options = PreviewOptions::default().with_page_size(page_size);
            let preview = table.preview(page.saturating_sub(1), &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&preview)?);
            } else {
                print_preview(&preview);
            }
            Ok(())
        }
        Command::Chart {
            file,
            kind,
            x,
            y,
            title,
            format,
            output,
        } => {
            let table = load_table(file.as_deref(), &limits, store.as_ref()).await?;
            let config = chart_config(&table, kind, x, y, title);
            tracing::debug!(?config, "building chart");
            let spec = build_chart(&table, &config)?;
            write_chart(&spec, format, output.as_deref())
        }
    }
}

/// Check a file's type and size without parsing it.
fn run_validate(file: &Path, limits: &UploadLimits) -> Result<()> {
    let metadata = std::fs::metadata(file)
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let info = FileInfo::new(file_name(file), None, metadata.len());
    validate_upload(&info, limits)?;
    println!(
        "{} {} ({})",
        "✓".green().bold(),
        info.name,
        format_file_size(info.size)
    );
    Ok(())
}

async fn run_upload(
    file: &Path,
    user: &str,
    limits: &UploadLimits,
    store: &FileStore,
) -> Result<()> {
    let incoming = IncomingFile::from_path(file)
        .await
        .with_context(|| format!("Failed to read file: {}", file.display()))?;
    let uploader = Uploader::new(*limits);
    let uploaded = uploader
        .upload_with_progress(incoming, user, |p| print_progress(&p))
        .await?;
    store.save_current_file(&uploaded)?;
    println!("{}", upload_summary(&uploaded));
    Ok(())
}

fn print_progress(progress: &UploadProgress) {
    let status = format!("{:?}", progress.status).to_lowercase();
    match progress.status {
        // Failures are reported once, by main
        UploadStatus::Error => {}
        UploadStatus::Complete => eprintln!("{:>3}% {}", progress.progress, status.green()),
        _ => eprintln!("{:>3}% {}", progress.progress, status.yellow()),
    }
}

fn upload_summary(file: &UploadedFile) -> String {
    format!(
        "{} ({}) sheet \"{}\": {} rows x {} columns, id {}",
        file.name,
        format_file_size(file.size),
        file.data.sheet_name,
        file.data.row_count(),
        file.data.col_count(),
        file.id
    )
}

/// Parse `file` if given, otherwise read the session's current upload.
async fn load_table(
    file: Option<&Path>,
    limits: &UploadLimits,
    store: Option<&FileStore>,
) -> Result<Table> {
    if let Some(file) = file {
        let incoming = IncomingFile::from_path(file)
            .await
            .with_context(|| format!("Failed to read file: {}", file.display()))?;
        let uploaded = Uploader::new(*limits).upload(incoming, "").await?;
        return Ok(uploaded.data);
    }

    let Some(store) = store else {
        bail!("No FILE given and no session directory to read the current upload from");
    };
    match store.load_current_file()? {
        Some(uploaded) => Ok(uploaded.data),
        None => bail!("No file has been uploaded yet"),
    }
}

/// Chart settings from flags, falling back to the table's defaults.
fn chart_config(
    table: &Table,
    kind: Option<KindArg>,
    x: Option<String>,
    y: Option<String>,
    title: Option<String>,
) -> ChartConfig {
    let mut config = ChartConfig::defaults_for(table);
    if let Some(kind) = kind {
        config.kind = kind.into();
    }
    if let Some(x) = x {
        config.x_axis = x;
    }
    if let Some(y) = y {
        config.y_axis = y;
    }
    if let Some(title) = title {
        config.title = title;
    }
    config
}

fn write_chart(spec: &ChartSpec, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    let (contents, default_path) = match format {
        OutputFormat::Json => (serde_json::to_string_pretty(spec)?, None),
        OutputFormat::Html => (spec.to_html()?, Some(spec.export_file_name("html"))),
    };

    match output.map(Path::to_path_buf).or(default_path.map(PathBuf::from)) {
        Some(path) => {
            std::fs::write(&path, contents)
                .with_context(|| format!("Failed to write file: {}", path.display()))?;
            println!("{} {}", "Wrote".green().bold(), path.display());
        }
        None => println!("{contents}"),
    }
    Ok(())
}

fn print_preview(preview: &Preview<'_>) {
    let rendered = render_preview(preview);
    let mut lines = rendered.lines();
    if let Some(header) = lines.next() {
        println!("{}", header.cyan().bold());
    }
    for line in lines {
        println!("{line}");
    }
}

/// Plain-text table for one preview page followed by a position summary.
fn render_preview(preview: &Preview<'_>) -> String {
    let rows = preview.display_rows();
    let mut widths: Vec<usize> = preview.headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            let len = cell.chars().count();
            match widths.get_mut(i) {
                Some(w) => *w = (*w).max(len),
                None => widths.push(len),
            }
        }
    }

    let format_row = |cells: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let cell = cells.get(i).map_or("", String::as_str);
                format!("{cell:<w$}")
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&format_row(preview.headers));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row));
        out.push('\n');
    }
    out.push_str(&format!(
        "Showing {} of {} rows (page {} of {})",
        preview.showing,
        preview.total_rows,
        preview.page_index + 1,
        preview.total_pages.max(1)
    ));
    out
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
