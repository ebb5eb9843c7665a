// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # splconq — product-line variability and performance-influence models
//!
//! splconq exposes a software product line's variability model and its
//! learned performance-influence model to analysis code, insulating callers
//! from the text artifacts SPLConqueror produces and consumes. The crate is
//! a pure library: every operation is a synchronous, in-memory
//! transformation; invoking the external tool, staging its files, and
//! validating its XML are the surrounding system's job.
//!
//! ## Core Concept
//!
//! A **feature model** declares the configuration options of the product
//! line — binary options with implication/exclusion relations, numeric
//! options with bounds — plus free-form boolean constraints. From this
//! single model, splconq can:
//!
//! - **Compile** the constraints into a DIMACS CNF clause set for the
//!   tool's solver stage
//! - **Render** sampling/learning scripts and learner parameter files
//! - **Parse** the tool's learning log into an [`InfluenceModel`] and its
//!   full candidate history
//! - **Decode** the tool's printed configurations into token lists and
//!   numeric feature vectors
//! - **Predict** a non-functional property for new configurations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use splconq::{compile_clauses, parse_learning_log, FeatureModel, FeatureModelDocument};
//!
//! let doc = FeatureModelDocument::from_yaml(r#"
//!   binary_options:
//!     - name: compression
//!       implied_options: [encryption]
//!     - name: encryption
//!       optional: false
//!   numeric_options:
//!     - name: cache_size
//!       min_value: 1
//!       max_value: 512
//! "#)?;
//!
//! let fm = FeatureModel::from_document(&doc);
//! let dimacs = compile_clauses(&fm)?;
//!
//! // ... run SPLConqueror against the staged artifacts ...
//!
//! let run = parse_learning_log(&log_text)?;
//! let prediction = run.model.predict(&config)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                                                                │
//! │  FEATURE MODEL DOCUMENT                                        │
//! │       │                                                        │
//! │       ├──► FeatureModel::from_document ──► FeatureModel        │
//! │       │          │                                             │
//! │       │          ├──► compile_clauses ──► DIMACS CNF           │
//! │       │          │                                             │
//! │       │          └──► render_script ──► script.a               │
//! │       │                                                        │
//! │  TOOL OUTPUT (external run)                                    │
//! │       │                                                        │
//! │       ├──► parse_learning_log ──► InfluenceModel + history     │
//! │       │                                │                       │
//! │       │                                └──► predict ──► f64    │
//! │       │                                                        │
//! │       └──► decode_samples ──► tokens ──► to_vector ──► config  │
//! │                                                                │
//! └────────────────────────────────────────────────────────────────┘
//! ```

// Core modules
pub mod dimacs;
pub mod error;
pub mod feature_model;
pub mod influence;
pub mod learning;
pub mod sample;
pub mod script;

// Re-exports
pub use dimacs::compile_clauses;
pub use error::{Error, Result};
pub use feature_model::{BinaryOption, FeatureModel, FeatureModelDocument, NumericOption};
pub use influence::{Configuration, InfluenceModel, Term};
pub use learning::{parse_learning_log, HistoryRow, LearningLog};
pub use sample::{decode_sample, decode_samples, project_samples, to_vector};
pub use script::{
    render_mlsettings, render_script, BinaryStrategy, LearningConfig, NumericStrategy,
    ScriptConfig, LOG_FILE, MEASUREMENTS_FILE, MLSETTINGS_FILE, SAMPLED_FILE, SCRIPT_FILE,
    VM_FILE,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
