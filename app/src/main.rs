//! FILENAME: app/src/main.rs
// PURPOSE: Command-line front end: analyse payload in, pivot table out.

use app_lib::{
    create_app_state, export_pivot, generate_pivot, init_log_file, load_analysis, log_error,
    log_info, render_kpis, render_text_table, current_view, DashboardConfig, ExportPivotRequest,
    GeneratePivotRequest,
};
use clap::Parser;
use persistence::ExportFormat;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "genius-pivot", version, about = "Pivot tables over an analysed upload")]
struct Cli {
    /// Analysis service response (JSON). Reads stdin when omitted.
    #[arg(short, long)]
    payload: Option<PathBuf>,

    /// Dimension to group by (defaults to the first schema dimension)
    #[arg(short, long)]
    group: Option<String>,

    /// Measure to aggregate (defaults to the first schema measure)
    #[arg(short, long)]
    value: Option<String>,

    /// sum, mean, average, count, min or max
    #[arg(short, long)]
    agg: Option<String>,

    /// Export the table as csv or xlsx
    #[arg(short, long)]
    export: Option<ExportFormat>,

    /// Export directory (overrides the config)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Dashboard config file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Unified log file (overrides the config)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn read_payload(path: Option<&PathBuf>) -> Result<String, String> {
    match path {
        Some(p) => std::fs::read_to_string(p).map_err(|e| format!("Failed to read {:?}: {}", p, e)),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| format!("Failed to read stdin: {}", e))?;
            Ok(text)
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = cli.out {
        config.export_dir = dir;
    }
    if let Some(file) = cli.log_file {
        config.log_file = Some(file);
    }
    if let Some(path) = &config.log_file {
        init_log_file(path)?;
    }

    let state = create_app_state(config);
    let summary = load_analysis(&state, &read_payload(cli.payload.as_ref())?)?;

    print!("{}", render_kpis(&summary.kpis));
    for insight in &summary.insights {
        println!("  * {}", insight);
    }
    println!();

    if cli.group.is_some() || cli.value.is_some() || cli.agg.is_some() {
        generate_pivot(
            &state,
            GeneratePivotRequest {
                group_field: cli.group,
                value_field: cli.value,
                aggregation: cli.agg,
            },
        )?;
    }

    match current_view(&state)? {
        Some(view) => print!("{}", render_text_table(&view)),
        None => println!("No pivot table: the dataset has no dimension or measure selected."),
    }

    if let Some(format) = cli.export {
        let today = chrono::Utc::now().date_naive();
        let path = export_pivot(&state, ExportPivotRequest { directory: None, format }, today)?;
        log_info!("CLI", "exported {:?}", path);
        println!("\nExported {}", path.display());
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("CLI", "{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
