//! cdepth CLI
//!
//! Entry point for the `cdepth` tool. Synthesizes RTL designs with Yosys,
//! builds feature datasets, trains depth models, and reports extracted and
//! predicted combinational depths.

#[global_allocator]
/// Global allocator using jemalloc for better performance in parallel workloads.
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

mod args;

use std::path::{Path, PathBuf};

use cdepth_cli::{
    PipelineError, analyze_dataset, discover_designs, extract_dataset, graph_summary,
    relabel_dataset, signal_depth,
};
use cdepth_common::{DesignPath, SynthError, SynthReport, Synthesizer, YosysSynthesizer};
use cdepth_dataset::{read_feature_rows, write_feature_rows, write_result_rows};
use cdepth_model::{DepthPredictor, train};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use args::{Args, Command};

fn require(path: &Path) -> Result<(), PipelineError> {
    if path.exists() {
        Ok(())
    } else {
        Err(PipelineError::MissingInput(path.to_path_buf()))
    }
}

fn synthesizer(args: &Args) -> Result<YosysSynthesizer, PipelineError> {
    let config = args.synth_config();
    Ok(match &args.yosys {
        Some(binary) => YosysSynthesizer::with_binary(binary, config)?,
        None => YosysSynthesizer::new(config)?,
    })
}

/// Stands in for Yosys when the input is already a JSON report.
struct ReportOnly;

impl Synthesizer for ReportOnly {
    fn synthesize(&self, source: &Path) -> Result<SynthReport, SynthError> {
        Err(SynthError::UnsupportedDesign(format!(
            "{} needs synthesis but only reports were expected",
            source.display()
        )))
    }
}

/// Yosys, unless `design` is a report and no synthesis will run.
fn synthesizer_for(args: &Args, design: &Path) -> Result<Box<dyn Synthesizer>, PipelineError> {
    if DesignPath::new(PathBuf::from(design)).is_ok_and(|d| d.is_report()) {
        return Ok(Box::new(ReportOnly));
    }
    Ok(Box::new(synthesizer(args)?))
}

fn report_skipped(skipped: usize) {
    if skipped > 0 {
        println!("Skipped {skipped} item(s); see the log for reasons.");
    }
}

/// Executes one `cdepth` subcommand.
///
/// Missing inputs are checked before any synthesis runs; failures of single
/// designs or rows are logged and skipped.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let rules = args.rules();

    match &args.command {
        Command::Extract { designs, output } => {
            let sources = discover_designs(&designs.input_dir, designs.recursive)?;
            info!("Extracting features from {} design(s)", sources.len());
            let synth = synthesizer(&args)?;
            let batch = extract_dataset(&synth, &designs.input_dir, &sources, args.parallel);

            report_skipped(batch.skipped.len());
            if batch.is_empty() {
                println!("No valid data was extracted.");
                return Ok(());
            }
            write_feature_rows(output, &batch.rows)?;
            println!(
                "Dataset successfully created and saved as '{}' ({} rows).",
                output.display(),
                batch.rows.len()
            );
        }
        Command::Label { dataset, output } => {
            require(&dataset.features)?;
            require(&dataset.input_dir)?;
            let rows = read_feature_rows(&dataset.features, false)?;
            let synth = synthesizer(&args)?;
            let batch = relabel_dataset(&synth, &dataset.input_dir, &rows, &rules, args.parallel);

            report_skipped(batch.skipped.len());
            if batch.is_empty() {
                println!("No signal could be labeled.");
                return Ok(());
            }
            write_feature_rows(output, &batch.rows)?;
            println!(
                "Labeled {} of {} rows; saved to '{}'.",
                batch.rows.len(),
                rows.len(),
                output.display()
            );
        }
        Command::Train {
            features,
            model,
            forest,
        } => {
            require(features)?;
            let rows = read_feature_rows(features, true)?;
            let (trained, report) = train(&rows, forest.params(), &forest.options())?;
            trained.save(model)?;
            println!("{report}");
            println!("Model saved to '{}'.", model.display());
        }
        Command::Analyze {
            dataset,
            model,
            output,
        } => {
            require(&dataset.features)?;
            require(&dataset.input_dir)?;
            let predictor = DepthPredictor::load(model)?;
            let rows = read_feature_rows(&dataset.features, false)?;
            let synth = synthesizer(&args)?;
            let batch = analyze_dataset(
                &synth,
                &dataset.input_dir,
                &rows,
                &rules,
                &predictor,
                args.parallel,
            );

            report_skipped(batch.skipped.len());
            if batch.is_empty() {
                println!("No results: every signal was skipped.");
                return Ok(());
            }
            write_result_rows(output, &batch.rows)?;
            println!("All results saved to '{}'.", output.display());
        }
        Command::Depth {
            design,
            signal,
            model,
        } => {
            require(design)?;
            let predictor = model.as_deref().map(DepthPredictor::load).transpose()?;
            let synth = synthesizer_for(&args, design)?;
            let depth = signal_depth(synth.as_ref(), design, signal, &rules)?;

            println!("Extracted combinational depth: {}", depth.report.depth);
            if depth.report.has_path() {
                println!("Path: {}", depth.path.join(" -> "));
                println!(
                    "Sequential elements reaching '{signal}': {}",
                    depth.report.reachable_sources
                );
            }
            if let Some(predictor) = &predictor {
                match depth.features {
                    Some(features) => {
                        println!("Predicted Combinational Depth: {}", predictor.predict(features)?);
                    }
                    None => println!("'{signal}' is not a cell; no features to predict from."),
                }
            }
        }
        Command::Graph { design } => {
            require(design)?;
            let synth = synthesizer_for(&args, design)?;
            let summary = graph_summary(synth.as_ref(), design)?;

            println!("Modules in design: {}", summary.modules);
            println!("Cells in design: {}", summary.cells);
            println!("Nodes in graph: {}", summary.nodes);
            println!("Edges in graph: {}", summary.edges);
            println!("Sequential elements: {}", summary.sequential);
            println!("Port usage (connections / directions):");
            for (port, count) in &summary.ports.connected {
                let directed = summary.ports.directed.get(port).copied().unwrap_or(0);
                println!("  {port}: {count} / {directed}");
            }
        }
    }

    Ok(())
}
