use std::path::PathBuf;
use std::time::Duration;

use cdepth_common::SynthConfig;
use cdepth_graph::{DepthMetric, DepthRules};
use cdepth_model::{ForestParams, TrainOptions};
use clap::{Args as ClapArgs, Parser, Subcommand};

/// Combinational depth estimator for synthesized RTL designs
#[derive(Parser, Debug)]
#[command(name = "cdepth")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the yosys binary (searched on PATH when unset)
    #[arg(long, global = true)]
    pub yosys: Option<PathBuf>,

    /// Seconds before a synthesis run is killed; 0 waits forever
    #[arg(long, global = true, default_value_t = 300)]
    pub timeout: u64,

    /// Flatten the design hierarchy during synthesis
    #[arg(long, global = true, default_value_t = false)]
    pub flatten: bool,

    /// Explicit top module for synthesis
    #[arg(long, global = true)]
    pub top: Option<String>,

    /// Keep yosys JSON reports in this directory
    #[arg(long, global = true)]
    pub keep_reports: Option<PathBuf>,

    /// Which register-to-signal path defines depth
    #[arg(long, global = true, value_enum, default_value = "shortest")]
    pub metric: MetricArg,

    /// Additional gate types that count toward depth
    #[arg(long = "count-gate", global = true)]
    pub count_gates: Vec<String>,

    /// Process designs in parallel
    #[arg(short = 'p', long, global = true, default_value_t = false)]
    pub parallel: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize every design in a directory and write a feature dataset
    Extract {
        #[command(flatten)]
        designs: DesignDir,
        /// Output feature dataset
        #[arg(short, long, default_value = "logic_depth_dataset.csv")]
        output: PathBuf,
    },
    /// Replace proxy labels with depths extracted by graph search
    Label {
        #[command(flatten)]
        dataset: DatasetInput,
        /// Output feature dataset
        #[arg(short, long, default_value = "logic_depth_dataset_extracted.csv")]
        output: PathBuf,
    },
    /// Train a depth model on a labeled feature dataset
    Train {
        /// Labeled feature dataset
        #[arg(short, long)]
        features: PathBuf,
        /// Output model document
        #[arg(short, long, default_value = "combinational_depth_model.json")]
        model: PathBuf,
        #[command(flatten)]
        forest: ForestArgs,
    },
    /// Extract and predict the depth of every signal in a feature dataset
    Analyze {
        #[command(flatten)]
        dataset: DatasetInput,
        /// Trained model document
        #[arg(short, long)]
        model: PathBuf,
        /// Output result dataset
        #[arg(short, long, default_value = "predicted_combinational_depths.csv")]
        output: PathBuf,
    },
    /// Depth of one signal in one design
    Depth {
        /// RTL source or yosys JSON report
        design: PathBuf,
        /// Cell name, net name, or bit number
        signal: String,
        /// Also predict with this model
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
    /// Graph statistics of one design
    Graph {
        /// RTL source or yosys JSON report
        design: PathBuf,
    },
}

#[derive(ClapArgs, Debug)]
pub struct DesignDir {
    /// Directory holding the RTL sources
    #[arg(short, long)]
    pub input_dir: PathBuf,
    /// Descend into subdirectories
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,
}

#[derive(ClapArgs, Debug)]
pub struct DatasetInput {
    /// Feature dataset naming the signals to process
    #[arg(short, long)]
    pub features: PathBuf,
    /// Directory the dataset's File column is relative to
    #[arg(short, long)]
    pub input_dir: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct ForestArgs {
    /// Number of trees
    #[arg(long, default_value_t = 100)]
    pub trees: usize,
    /// Maximum tree depth (unlimited when unset)
    #[arg(long)]
    pub max_depth: Option<usize>,
    /// Minimum rows a node needs to be split
    #[arg(long, default_value_t = 2)]
    pub min_samples_split: usize,
    /// Share of rows held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,
    /// Seed for the split and the bootstrap
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

impl ForestArgs {
    pub fn params(&self) -> ForestParams {
        ForestParams {
            n_trees: self.trees,
            max_depth: self.max_depth,
            min_samples_split: self.min_samples_split,
            seed: self.seed,
        }
    }

    pub fn options(&self) -> TrainOptions {
        TrainOptions {
            test_fraction: self.test_fraction,
            seed: self.seed,
        }
    }
}

/// Command-line argument wrapper for DepthMetric
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum MetricArg {
    /// Shortest register-to-signal path
    #[value(name = "shortest")]
    Shortest,
    /// Path with the most counted gates
    #[value(name = "longest")]
    Longest,
}

impl From<MetricArg> for DepthMetric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Shortest => Self::ShortestPath,
            MetricArg::Longest => Self::LongestPath,
        }
    }
}

impl Args {
    /// Convert command-line arguments into synthesis configuration
    pub fn synth_config(&self) -> SynthConfig {
        let timeout = (self.timeout > 0).then_some(Duration::from_secs(self.timeout));
        let mut config = SynthConfig::new()
            .with_flatten(self.flatten)
            .with_timeout(timeout);
        if let Some(top) = &self.top {
            config = config.with_top(top);
        }
        if let Some(dir) = &self.keep_reports {
            config = config.with_keep_reports(dir.clone());
        }
        config
    }

    /// Convert command-line arguments into depth rules
    pub fn rules(&self) -> DepthRules {
        self.count_gates
            .iter()
            .fold(DepthRules::new().with_metric(self.metric.into()), |rules, gate| {
                rules.with_contributing(gate)
            })
    }
}
