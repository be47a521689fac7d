use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use ofx_export::{from_str, ofx::OfxRoot, select_columns, Exporter, OutputFormat};

/// Export the transactions of OFX/QFX statements as CSV, TSV or a table.
#[derive(Debug, Parser)]
#[command(name = "ofx-export", version, about, long_about = None)]
struct Cli {
    /// OFX or QFX files to export
    #[arg(required = true)]
    ofx_files: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Comma-separated columns to export, in order (default: all)
    #[arg(long, value_delimiter = ',')]
    columns: Option<Vec<String>>,

    /// Omit the header row
    #[arg(long)]
    no_headers: bool,
}

fn export_file<W: Write>(path: &Path, exporter: &Exporter, out: &mut W) -> anyhow::Result<()> {
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let ofx = from_str::<OfxRoot>(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    for warning in ofx.header.warnings() {
        warn!(file = %path.display(), "{warning}");
    }

    let account = ofx
        .account()
        .with_context(|| format!("failed to read statement from {}", path.display()))?;
    let transactions = &account.statement.transactions;
    debug!(
        file = %path.display(),
        account = %account.account_id,
        transactions = transactions.len(),
        "parsed statement"
    );
    if transactions.is_empty() {
        warn!("no transactions found in {}", path.display());
    }

    exporter
        .write(out, transactions)
        .with_context(|| format!("failed to export {}", path.display()))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time(),
        )
        .init();

    let cli = Cli::parse();

    let columns = select_columns(cli.columns.as_deref().unwrap_or_default())?;
    let exporter = Exporter::new(cli.format, columns).with_headers(!cli.no_headers);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for path in &cli.ofx_files {
        export_file(path, &exporter, &mut out)?;
    }
    out.flush()?;

    Ok(())
}
