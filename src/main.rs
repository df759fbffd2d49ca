use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ritmo::cli::{Cli, OutputFormat};
use ritmo::config::DashboardConfig;
use ritmo::csv_output::{AggregateColumn, CsvExport};
use ritmo::filter::RowFilter;
use ritmo::json_output::JsonReport;
use ritmo::session::DashboardSession;
use ritmo::source::build_source;
use ritmo::summary::{top_n, FilterOptions};
use ritmo::table_output::render_table;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Validate a `--date`/`--from`/`--to` argument.
fn check_date(flag: &str, value: &str) -> Result<String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid value for {flag}: {value} (expected YYYY-MM-DD)"))?;
    Ok(value.to_string())
}

/// Build engine filter criteria from CLI arguments.
fn build_filter(args: &Cli) -> Result<RowFilter> {
    if args.date.is_some() && (args.from.is_some() || args.to.is_some()) {
        anyhow::bail!("Cannot combine --date with --from/--to. Choose one date mode.");
    }

    let mut filter = RowFilter::all()
        .with_branch(args.branch.clone())
        .with_line(args.line.clone());

    if let Some(date) = &args.date {
        filter = filter.with_exact_date(check_date("--date", date)?);
    } else if args.from.is_some() || args.to.is_some() {
        let from = args
            .from
            .as_deref()
            .map(|d| check_date("--from", d))
            .transpose()?;
        let to = args
            .to
            .as_deref()
            .map(|d| check_date("--to", d))
            .transpose()?;
        filter = filter.with_date_range(from, to);
    }

    if let Some(worker) = &args.worker {
        filter = filter.with_worker_arg(worker)?;
    }

    Ok(filter)
}

/// Fold CLI overrides into the loaded configuration.
fn apply_overrides(config: &mut DashboardConfig, args: &Cli) {
    if let Some(kind) = args.source {
        config.source.kind = kind;
    }
    if let Some(seed) = args.seed {
        config.source.mock.seed = Some(seed);
    }
    if let Some(goal) = args.goal {
        config.goal.default = goal;
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.debug);

    let mut config = DashboardConfig::load(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    let filter = build_filter(&args)?;
    let source = build_source(&config.source)?;
    let mut session = DashboardSession::new(source, config.goal.clone(), filter, args.mode);

    session
        .refresh()
        .context("Failed to fetch rows from the row store")?;
    let state = session.state();

    if args.list_filters {
        let options = FilterOptions::collect(&state.rows);
        match args.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&options)?),
            _ => {
                println!("branches: {}", options.branches.join(", "));
                println!("lines:    {}", options.lines.join(", "));
                println!("workers:  {}", options.workers.join(", "));
            }
        }
        return Ok(());
    }

    match args.format {
        OutputFormat::Table => {
            let ranked = match args.top {
                Some(n) => top_n(&state.aggregates, n),
                None => &state.aggregates[..],
            };
            print!("{}", render_table(ranked, &state.summary, state.mode));
        }
        OutputFormat::Json => {
            let report = JsonReport::from_state(state, args.top);
            println!("{}", report.to_json()?);
        }
        OutputFormat::Csv => {
            let export = match &args.columns {
                Some(spec) => CsvExport::new(AggregateColumn::parse_list(spec)?),
                None => CsvExport::default(),
            };
            let ranked = match args.top {
                Some(n) => top_n(&state.aggregates, n),
                None => &state.aggregates[..],
            };
            print!("{}", export.to_csv(ranked));
        }
    }

    Ok(())
}
