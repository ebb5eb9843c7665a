//! SPLConqueror script and parameter generation
//!
//! The external tool is driven by a line-based `script.a` file naming the
//! variability model, the sampling strategies, and the learning commands,
//! plus an optional `mlsettings.txt` parameter file. This module renders
//! both from typed values.
//!
//! Sampling strategies are closed enums: each variant carries exactly the
//! parameters its strategy string needs, so an incomplete strategy cannot
//! be constructed, and rendering is an exhaustive match.
//!
//! All artifact paths are built from a caller-supplied workspace directory;
//! the crate holds no ambient staging state of its own.

use std::fmt;
use std::path::Path;

/// Log file the tool writes during a run
pub const LOG_FILE: &str = "logs.txt";
/// Variability model handed to the tool
pub const VM_FILE: &str = "vm.xml";
/// Measurement data for learning runs
pub const MEASUREMENTS_FILE: &str = "measurements.xml";
/// Learner parameter file
pub const MLSETTINGS_FILE: &str = "mlsettings.txt";
/// Sampled configurations printed by the tool
pub const SAMPLED_FILE: &str = "sampled.txt";
/// The command script itself
pub const SCRIPT_FILE: &str = "script.a";

/// Sampling strategy over binary options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinaryStrategy {
    FeatureWise,
    PairWise,
    NegativeFeatureWise,
    AllBinary,
    DistanceBased { option_weight: u32, num_configs: u32 },
    TWise { t: u32 },
}

impl fmt::Display for BinaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BinaryStrategy::FeatureWise => write!(f, "featurewise"),
            BinaryStrategy::PairWise => write!(f, "pairwise"),
            BinaryStrategy::NegativeFeatureWise => write!(f, "negfw"),
            BinaryStrategy::AllBinary => write!(f, "allbinary"),
            BinaryStrategy::DistanceBased {
                option_weight,
                num_configs,
            } => write!(
                f,
                "distance-based optionWeight:{} numConfigs:{}",
                option_weight, num_configs
            ),
            BinaryStrategy::TWise { t } => write!(f, "twise t:{}", t),
        }
    }
}

/// Sampling strategy over numeric options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericStrategy {
    CentralComposite,
    FullFactorial,
    BoxBehnken,
    Random { sample_size: u32, seed: u32 },
    PlackettBurman { measurements: u32, level: u32 },
    Hypersampling { precision: u32 },
    OneFactorAtATime { distinct_values_per_option: u32 },
    KExchange { sample_size: u32, k: u32 },
}

impl fmt::Display for NumericStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericStrategy::CentralComposite => write!(f, "centralcomposite"),
            NumericStrategy::FullFactorial => write!(f, "fullfactorial"),
            NumericStrategy::BoxBehnken => write!(f, "boxbehnken"),
            NumericStrategy::Random { sample_size, seed } => {
                write!(f, "random sampleSize:{} seed:{}", sample_size, seed)
            }
            NumericStrategy::PlackettBurman {
                measurements,
                level,
            } => write!(
                f,
                "plackettburman measurements:{} level:{}",
                measurements, level
            ),
            NumericStrategy::Hypersampling { precision } => {
                write!(f, "hypersampling precision:{}", precision)
            }
            NumericStrategy::OneFactorAtATime {
                distinct_values_per_option,
            } => write!(
                f,
                "onefactoratatime distinctValuesPerOption:{}",
                distinct_values_per_option
            ),
            NumericStrategy::KExchange { sample_size, k } => {
                write!(f, "kexchange sampleSize:{} k:{}", sample_size, k)
            }
        }
    }
}

/// Learning commands appended to a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearningConfig {
    /// Non-functional property to learn, named as in the measurement data
    pub nfp: String,
}

/// What a rendered script should make the tool do
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptConfig {
    /// Binary sampling strategy, if any
    pub binary: Option<BinaryStrategy>,

    /// Numeric sampling strategy, if any
    pub numeric: Option<NumericStrategy>,

    /// Learning run configuration; `None` renders a pure sampling script
    pub learning: Option<LearningConfig>,

    /// Solver override, e.g. `z3`
    pub solver: Option<String>,
}

/// Render a `script.a` command script against a workspace directory
///
/// The script always logs to [`LOG_FILE`] and prints sampled
/// configurations to [`SAMPLED_FILE`] inside `data_dir`. When learning is
/// requested without any sampling strategy, the tool is told to select all
/// measured configurations instead.
pub fn render_script(data_dir: &Path, config: &ScriptConfig) -> String {
    let artifact = |file: &str| data_dir.join(file).display().to_string();

    let mut lines = vec![
        format!("log {}", artifact(LOG_FILE)),
        format!("vm {}", artifact(VM_FILE)),
    ];
    if let Some(binary) = &config.binary {
        lines.push(format!("binary {}", binary));
    }
    if let Some(numeric) = &config.numeric {
        lines.push(format!("numeric {}", numeric));
    }
    if let Some(learning) = &config.learning {
        lines.push(format!("load-mlsettings {}", artifact(MLSETTINGS_FILE)));
        lines.push(format!("nfp {}", learning.nfp));
        lines.push(format!("all {}", artifact(MEASUREMENTS_FILE)));
        if config.binary.is_none() && config.numeric.is_none() {
            lines.push("select-all-measurements true".to_string());
        }
        lines.push("learn-splconqueror".to_string());
        lines.push("analyze-learning".to_string());
    }
    if let Some(solver) = &config.solver {
        lines.push(format!("solver {}", solver));
    }
    lines.push(format!("printconfigs {}", artifact(SAMPLED_FILE)));

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// Render an `mlsettings.txt` parameter file, one `key value` line per
/// setting, in input order
pub fn render_mlsettings(settings: &[(&str, &str)]) -> String {
    settings
        .iter()
        .map(|(key, value)| format!("{} {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
