use clap::{Parser, ValueEnum};
use dumpschema::catalog::TableCatalog;
use dumpschema::error::DumpError;
use dumpschema::export::{ALL_COLUMNS_FILE, catalog_to_csv, table_file_name, table_to_csv};
use dumpschema::preview::PreviewRenderer;
use dumpschema::session::Session;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Column catalog as CSV
    Csv,
    /// Column catalog as JSON, keyed by table
    Json,
    /// Aligned text tables
    Preview,
    /// Table names with column counts
    Summary,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL dump file
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv", env = "DUMPSCHEMA_FORMAT")]
    format: Format,

    /// Only tables whose name contains this text (case-insensitive)
    #[arg(long, env = "DUMPSCHEMA_FILTER")]
    filter: Option<String>,

    /// Restrict output to a single table
    #[arg(short, long)]
    table: Option<String>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write `<table>_columns.csv` per table and `all_sql_columns.csv` here
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), DumpError> {
    let bytes = fs::read(&cli.input).map_err(|source| DumpError::Read {
        path: cli.input.clone(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);

    let mut session = Session::new();
    session.load_dump(&cli.input.to_string_lossy(), &text);
    if let Some(query) = &cli.filter {
        session.set_query(query);
    }

    if let Some(report) = session.report() {
        if !report.implicitly_closed.is_empty() {
            warn!(
                "{} table(s) started before the previous statement ended: {}",
                report.implicitly_closed.len(),
                report.implicitly_closed.join(", ")
            );
        }
        if let Some(table) = &report.unterminated {
            warn!("`{}` is never terminated with `;`", table);
        }
    }

    if let Some(dir) = &cli.export_dir {
        export_files(&session, dir)?;
    }

    let rendered = match &cli.table {
        Some(table) => render_table(&mut session, table, cli.format)?,
        None => render_catalog(&session, cli.format)?,
    };

    match &cli.output {
        Some(path) => {
            write_file(path.clone(), &rendered)?;
            info!("wrote {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

fn write_file(path: PathBuf, contents: &str) -> Result<(), DumpError> {
    fs::write(&path, contents).map_err(|source| DumpError::Write { path, source })
}

/// One CSV per visible table plus the all-tables file.
fn export_files(session: &Session, dir: &Path) -> Result<(), DumpError> {
    fs::create_dir_all(dir).map_err(|source| DumpError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let catalog = session.visible_tables();
    for table in catalog.tables() {
        write_file(dir.join(table_file_name(&table.name)), &table_to_csv(&table.columns))?;
    }
    match catalog_to_csv(&catalog) {
        Some(csv) => write_file(dir.join(ALL_COLUMNS_FILE), &csv)?,
        None => warn!("no columns found; {} not written", ALL_COLUMNS_FILE),
    }
    info!("exported {} tables to {}", catalog.len(), dir.display());
    Ok(())
}

fn render_table(session: &mut Session, table: &str, format: Format) -> Result<String, DumpError> {
    let columns = session.select_preview(table)?;
    let rendered = match format {
        Format::Csv => table_to_csv(columns),
        Format::Json => serde_json::to_string_pretty(columns)?,
        Format::Preview => PreviewRenderer::default().render(table, columns),
        Format::Summary => format!("{}\t{}\n", table, columns.len()),
    };
    Ok(rendered)
}

fn render_catalog(session: &Session, format: Format) -> Result<String, DumpError> {
    let catalog = session.visible_tables();
    let rendered = match format {
        Format::Csv => catalog_to_csv(&catalog).unwrap_or_else(|| {
            info!("no columns found");
            String::new()
        }),
        Format::Json => serde_json::to_string_pretty(&catalog)? + "\n",
        Format::Preview => render_previews(&catalog),
        Format::Summary => render_summary(session, &catalog),
    };
    Ok(rendered)
}

fn render_previews(catalog: &TableCatalog) -> String {
    let renderer = PreviewRenderer::default();
    catalog
        .tables()
        .map(|t| renderer.render(&t.name, &t.columns))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_summary(session: &Session, catalog: &TableCatalog) -> String {
    let mut out = String::new();
    for table in catalog.tables() {
        out.push_str(&format!("{}\t{}\n", table.name, table.columns.len()));
    }
    if let Some(report) = session.report() {
        out.push_str(&format!(
            "-- {} tables, {} columns, {} lines ({} unmatched inside tables)\n",
            catalog.len(),
            catalog.column_count(),
            report.lines,
            report.unmatched_lines
        ));
        if !session.query().is_empty() {
            out.push_str(&format!("-- filter: {}\n", session.query()));
        }
        if let Some(dialect) = session.dialect() {
            out.push_str(&format!("-- dialect: {}\n", dialect));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(text: &str) -> Session {
        let mut session = Session::new();
        session.load_dump("dump.sql", text);
        session
    }

    #[test]
    fn test_empty_dump_renders_nothing() {
        let session = loaded("-- MySQL dump\nDROP TABLE IF EXISTS `t`;\n");
        assert_eq!(render_catalog(&session, Format::Csv).unwrap(), "");

        let session = loaded("CREATE TABLE `t` (\n  PRIMARY KEY (`id`)\n) ENGINE=InnoDB;\n");
        assert_eq!(render_catalog(&session, Format::Csv).unwrap(), "");
        assert_eq!(render_catalog(&session, Format::Json).unwrap(), "{\n  \"t\": []\n}\n");
    }

    #[test]
    fn test_summary_mentions_filter() {
        let mut session = loaded("CREATE TABLE `users` (\n`id` int,\n);\nCREATE TABLE `orders` (\n`id` int,\n);");
        session.set_query("ord");

        let summary = render_summary(&session, &session.visible_tables());
        assert!(summary.starts_with("orders\t1\n"));
        assert!(summary.contains("-- 1 tables, 1 columns, 6 lines"));
        assert!(summary.contains("-- filter: ord\n"));
    }
}
