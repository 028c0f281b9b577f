use std::fs::File;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use polars::prelude::{CsvWriter, SerWriter};
use tracing::{info, info_span};

use clinic_cli::cli::{DatasetArgs, ExportArgs, ReallocateArgs, SummaryArgs};
use clinic_cli::filters::resolve_filter;
use clinic_cli::render::{describe_advance, describe_status};
use clinic_engine::{DashboardSession, apply_filter, view_to_frame};
use clinic_ingest::{IngestOptions, read_appointments_csv_with_options};
use clinic_model::{Department, RecordTable};

use crate::summary::{apply_table_style, print_preview, print_summary};

fn load_table(args: &DatasetArgs) -> Result<RecordTable> {
    let options = IngestOptions::new().with_skip_invalid_rows(args.skip_invalid_rows);
    read_appointments_csv_with_options(&args.csv, &options)
        .with_context(|| format!("load {}", args.csv.display()))
}

pub fn run_departments() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Department", "Label"]);
    apply_table_style(&mut table);
    for department in Department::ALL {
        table.add_row(vec![format!("{department:?}"), department.to_string()]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_summary(args: &SummaryArgs) -> Result<()> {
    let table = load_table(&args.dataset)?;
    let spec = resolve_filter(&table, &args.filters).context("resolve filter flags")?;
    let mut session = DashboardSession::new(Arc::new(table), args.engine.options());
    let snapshot = session.on_filter_changed(spec);

    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).context("serialize snapshot")?;
        println!("{json}");
        return Ok(());
    }

    print_summary(&snapshot);
    if let Some(count) = args.preview {
        let view = session.filtered_view();
        println!("First {} appointments", count.min(view.len()));
        print_preview(&view.head(count));
    }
    Ok(())
}

pub fn run_reallocate(args: &ReallocateArgs) -> Result<()> {
    let table = load_table(&args.dataset)?;
    let spec = resolve_filter(&table, &args.filters).context("resolve filter flags")?;
    let mut session = DashboardSession::new(Arc::new(table), args.engine.options());
    let span = info_span!("reallocate", session = %session.id(), steps = args.steps);
    let _guard = span.enter();
    let start = Instant::now();

    let mut snapshot = session.on_filter_changed(spec.clone());
    if snapshot.risk.is_none() {
        println!("Risk scoring inactive: the file has no previous_no_shows column.");
    }
    for step in 1..=args.steps {
        let (outcome, next) = session.on_advance_default();
        println!("{}", describe_advance(step, &outcome));
        snapshot = next;
    }
    println!("{}", describe_status(&snapshot.reallocation));

    if let Some(department) = args.narrow_department {
        let narrowed = session.on_filter_changed(spec.with_departments([department]));
        println!(
            "after narrowing to {department}: {}",
            describe_status(&narrowed.reallocation)
        );
    }

    info!(
        processed = session.processed_count(),
        duration_ms = start.elapsed().as_millis(),
        "reallocation complete"
    );
    Ok(())
}

pub fn run_export(args: &ExportArgs) -> Result<()> {
    let table = load_table(&args.dataset)?;
    let spec = resolve_filter(&table, &args.filters).context("resolve filter flags")?;
    let view = apply_filter(&table, &spec);
    let mut frame = view_to_frame(&view).context("build export frame")?;

    let mut file = File::create(&args.output)
        .with_context(|| format!("create {}", args.output.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut frame)
        .with_context(|| format!("write {}", args.output.display()))?;

    info!(
        rows = frame.height(),
        output = %args.output.display(),
        "export complete"
    );
    println!("Wrote {} rows to {}", frame.height(), args.output.display());
    Ok(())
}
