use match_separation::config::{self, AnalysisConfig};
use match_separation::io::{
    discover_fovs, discover_trial_files, ingest, write_json_file, write_table_csv, FovFilter,
};
use match_separation::{RecordStore, SeparationPipeline, SeparationReport};
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn usage() -> String {
    "usage: match-separation <config.json>".to_string()
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = config::load_config(Path::new(&config_path))?;

    let ingest_start = Instant::now();
    let store = build_store(&config)?;
    let ingest_ms = ingest_start.elapsed().as_secs_f64() * 1000.0;
    if store.is_empty() {
        println!("No trial records found; nothing to score.");
        return Ok(());
    }

    let pipeline = SeparationPipeline::new(config.params.clone());
    let mut report = pipeline.run(&store);
    report.trace.timings.push("ingest", ingest_ms);

    print_text_summary(&report);

    let output = &config.output;
    if let Some(path) = output.radial_csv_path() {
        write_table_csv(&path, &report.radial)?;
        println!("Radial table written to {}", path.display());
    }
    if let Some(path) = output.angle_csv_path() {
        write_table_csv(&path, &report.angle)?;
        println!("Angle table written to {}", path.display());
    }
    if let Some(path) = output.report_json_path() {
        write_json_file(&path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn build_store(config: &AnalysisConfig) -> Result<RecordStore, String> {
    let mut files = Vec::new();
    let mut discovered_fovs = Vec::new();
    if let Some(dir) = &config.results_dir {
        discovered_fovs = discover_fovs(dir).map_err(|e| e.to_string())?;
        files = discover_trial_files(dir, &config.exclude_patterns).map_err(|e| e.to_string())?;
    }
    files.extend(config.inputs.iter().cloned());

    let filter: FovFilter = config.fov_filter(&discovered_fovs);
    let mut store = RecordStore::new();
    ingest(&mut store, &files, &filter).map_err(|e| e.to_string())?;
    Ok(store)
}

fn print_text_summary(report: &SeparationReport) {
    let trace = &report.trace;
    println!("Separation summary");
    println!(
        "  trials: {} configurations: {} bins: {} cap: {} seed: {}",
        trace.input.trials,
        trace.input.configurations,
        trace.input.num_bins,
        trace.input.num_samples,
        trace.input.seed
    );
    println!("  fovs: {:?}", trace.fovs);
    println!("  labels: {}", trace.labels.join(", "));

    for table in [&report.radial, &report.angle] {
        println!("\n{} ({} rows)", table.axis_label(), table.len());
        for group in table.summarize() {
            println!(
                "  {:<24} fov={:<4} buckets={:<3} mean={:.3}",
                group.label, group.field_of_view, group.rows, group.mean_score
            );
        }
    }

    let skipped: usize = trace
        .configurations
        .iter()
        .map(|c| c.angle.skipped_good + c.angle.skipped_bad)
        .sum();
    if skipped > 0 {
        println!("\nObservations without a ray angle: {skipped}");
    }

    let t = &trace.timings;
    println!(
        "\nTimings (ms): ingest={:.3} radial={:.3} angle={:.3} total={:.3}",
        t.get("ingest").unwrap_or(0.0),
        t.get("radial").unwrap_or(0.0),
        t.get("angle").unwrap_or(0.0),
        t.total_ms
    );
}
