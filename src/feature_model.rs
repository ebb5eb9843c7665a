//! Feature model types — the core data model
//!
//! A [`FeatureModelDocument`] is the decoded form of a variability model: a
//! set of binary (boolean) options, a set of numeric options with declared
//! bounds, and document-level boolean constraints. A [`FeatureModel`] is the
//! normalized entity derived from it: option relations (implication,
//! exclusion, mandatory markers) are lowered into a flat clause list ready
//! for CNF compilation.
//!
//! ## Example document
//!
//! ```yaml
//! name: fm
//! binary_options:
//!   - name: compression
//!     optional: true
//!     implied_options: [encryption]
//!   - name: encryption
//!     optional: false
//! numeric_options:
//!   - name: cache_size
//!     min_value: 1
//!     max_value: 512
//! boolean_constraints:
//!   - "!compression | encryption"
//! ```

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A complete feature model document
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[schemars(title = "Feature Model", description = "Variability model document")]
pub struct FeatureModelDocument {
    /// Model name
    #[serde(default = "default_name")]
    pub name: String,

    /// Binary (boolean) configuration options
    #[serde(default)]
    pub binary_options: Vec<BinaryOption>,

    /// Numeric configuration options
    #[serde(default)]
    pub numeric_options: Vec<NumericOption>,

    /// Document-level boolean constraints, each a `|`-separated
    /// disjunction of `name` / `!name` literals
    #[serde(default)]
    pub boolean_constraints: Vec<String>,
}

fn default_name() -> String {
    "fm".to_string()
}

/// A binary configuration option
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BinaryOption {
    /// Option name
    pub name: String,

    /// Whether the option may be deselected; a non-optional option is
    /// mandatory and always part of a valid configuration
    #[serde(default = "default_optional")]
    pub optional: bool,

    /// Options that must be selected whenever this one is
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implied_options: Vec<String>,

    /// Options that must not be selected together with this one
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded_options: Vec<String>,
}

fn default_optional() -> bool {
    true
}

/// A numeric configuration option with declared bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericOption {
    /// Option name
    pub name: String,

    /// Smallest admissible value
    pub min_value: f64,

    /// Largest admissible value
    pub max_value: f64,
}

impl FeatureModelDocument {
    /// Parse a document from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_norway::from_str(yaml).map_err(|e| Error::DocumentParse(e.to_string()))
    }

    /// Serialize the document to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_norway::to_string(self).map_err(|e| Error::DocumentParse(e.to_string()))
    }

    /// Parse a document from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::DocumentParse(e.to_string()))
    }

    /// Serialize the document to a JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::DocumentParse(e.to_string()))
    }

    /// Compute hash of the document for change detection
    pub fn hash(&self) -> String {
        use sha2::{Digest, Sha256};
        let content = self.to_yaml().unwrap_or_default();
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("sha256:{}", hex::encode(&hasher.finalize()[..8]))
    }

    /// Advisory validation of the document
    ///
    /// Construction of a [`FeatureModel`] assumes a well-formed document and
    /// performs no checks of its own; callers that take documents from
    /// untrusted sources can surface problems here first.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut seen = HashSet::new();
        for opt in &self.binary_options {
            if !seen.insert(opt.name.as_str()) {
                errors.push(format!("Duplicate option name: {}", opt.name));
            }
        }
        for opt in &self.numeric_options {
            if !seen.insert(opt.name.as_str()) {
                errors.push(format!(
                    "Numeric option name collides with another option: {}",
                    opt.name
                ));
            }
            if opt.min_value > opt.max_value {
                errors.push(format!(
                    "Numeric option {} has min_value > max_value",
                    opt.name
                ));
            }
        }

        let binary_names: HashSet<_> = self
            .binary_options
            .iter()
            .map(|o| o.name.as_str())
            .collect();

        let mut check_refs = |source: &str, referenced: &[String]| {
            for name in referenced {
                if !binary_names.contains(name.as_str()) {
                    errors.push(format!(
                        "Option {} references unknown option: {}",
                        source, name
                    ));
                }
            }
        };
        for opt in &self.binary_options {
            check_refs(&opt.name, &opt.implied_options);
            check_refs(&opt.name, &opt.excluded_options);
        }

        for constraint in &self.boolean_constraints {
            for literal in constraint.split('|') {
                let name = literal.trim().trim_start_matches('!').trim();
                if !binary_names.contains(name) {
                    errors.push(format!(
                        "Constraint `{}` references unknown option: {}",
                        constraint, name
                    ));
                }
            }
        }

        errors
    }
}

/// A normalized feature model
///
/// Built once from a [`FeatureModelDocument`] and read-only afterwards. The
/// order of `binary` is significant: it fixes the 1-based numbering used by
/// [`crate::dimacs::compile_clauses`].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureModel {
    binary: Vec<String>,
    numeric: Vec<NumericOption>,
    constraints: Vec<String>,
}

impl FeatureModel {
    /// Build a feature model from a decoded document
    ///
    /// Lowers option relations into clauses in document order: implications
    /// first, then exclusions, then the mandatory unit clause, followed by
    /// the document-level constraints verbatim. No simplification is
    /// performed; textually duplicate clauses are removed at compile time.
    pub fn from_document(doc: &FeatureModelDocument) -> Self {
        let mut binary = Vec::new();
        let mut constraints = Vec::new();

        for opt in &doc.binary_options {
            binary.push(opt.name.clone());
            if !opt.implied_options.is_empty() {
                constraints.extend(implication(&opt.name, &opt.implied_options));
            }
            if !opt.excluded_options.is_empty() {
                constraints.extend(exclusion(&opt.name, &opt.excluded_options, opt.optional));
            }
            if !opt.optional {
                constraints.push(opt.name.clone());
            }
        }
        constraints.extend(doc.boolean_constraints.iter().cloned());

        log::debug!(
            "normalized feature model: {} binary, {} numeric, {} clauses",
            binary.len(),
            doc.numeric_options.len(),
            constraints.len()
        );

        FeatureModel {
            binary,
            numeric: doc.numeric_options.clone(),
            constraints,
        }
    }

    /// Binary option names, in document order
    pub fn binary(&self) -> &[String] {
        &self.binary
    }

    /// Numeric options, in document order
    pub fn numeric(&self) -> &[NumericOption] {
        &self.numeric
    }

    /// Numeric option names, in document order
    pub fn numeric_names(&self) -> Vec<String> {
        self.numeric.iter().map(|o| o.name.clone()).collect()
    }

    /// Raw boolean clauses, normalized plus document-level
    pub fn constraints(&self) -> &[String] {
        &self.constraints
    }
}

impl From<&FeatureModelDocument> for FeatureModel {
    fn from(doc: &FeatureModelDocument) -> Self {
        FeatureModel::from_document(doc)
    }
}

/// `A => {B1,..}`: one clause `!A | Bi` per target
fn implication(source: &str, targets: &[String]) -> Vec<String> {
    targets
        .iter()
        .map(|target| format!("!{} | {}", source, target))
        .collect()
}

/// `A =/> {B1,..}`: one clause `!A | !Bi` per target; a mandatory source
/// additionally requires at least one of the group to hold
fn exclusion(source: &str, targets: &[String], optional: bool) -> Vec<String> {
    let pairwise = targets
        .iter()
        .map(|target| format!("!{} | !{}", source, target));

    if optional {
        return pairwise.collect();
    }

    let mut group = vec![source.to_string()];
    group.extend(targets.iter().cloned());
    std::iter::once(group.join(" | ")).chain(pairwise).collect()
}
