//! Performance-influence models
//!
//! An [`InfluenceModel`] is a sum of weighted products of option indicators,
//! as reported by SPLConqueror's regression learner:
//!
//! ```text
//! 17.2 * root + 4.5 * compression + 0.8 * compression * cache_size
//! ```
//!
//! Each term multiplies its coefficient with the configuration values of
//! its options (1/0 for binary presence, the real value for numeric
//! options). The synthetic `root` option defaults to 1 so constant terms
//! need no caller support.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// A configuration assigning a numeric value to each option
pub type Configuration = HashMap<String, f64>;

/// One additive term of an influence model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    /// Term weight
    pub coefficient: f64,

    /// Options whose configuration values are multiplied into the term;
    /// empty for a constant term
    pub options: Vec<String>,
}

/// A learned performance-influence model
///
/// Produced by [`crate::learning::parse_learning_log`] from the winning
/// candidate of a learning run, or parsed directly from a model string via
/// [`FromStr`]. A default-constructed model has no terms and rejects
/// evaluation with [`Error::NotFitted`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InfluenceModel {
    terms: Vec<Term>,
}

impl InfluenceModel {
    /// Build a model from explicit terms
    pub fn new(terms: Vec<Term>) -> Self {
        InfluenceModel { terms }
    }

    /// The model's terms, in learned order
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Whether a learned model is present
    pub fn is_fitted(&self) -> bool {
        !self.terms.is_empty()
    }

    /// Predict the modeled property for one configuration
    ///
    /// Every option referenced by a term must be present in `config`, with
    /// the exception of `root` which defaults to 1.
    pub fn predict(&self, config: &Configuration) -> Result<f64> {
        if !self.is_fitted() {
            return Err(Error::NotFitted);
        }

        let mut total = 0.0;
        for term in &self.terms {
            let mut product = term.coefficient;
            for option in &term.options {
                product *= option_value(config, option)?;
            }
            total += product;
        }
        Ok(total)
    }

    /// Predict the modeled property for a batch of configurations
    pub fn predict_batch(&self, configs: &[Configuration]) -> Result<Vec<f64>> {
        if !self.is_fitted() {
            return Err(Error::NotFitted);
        }
        configs.iter().map(|config| self.predict(config)).collect()
    }
}

fn option_value(config: &Configuration, option: &str) -> Result<f64> {
    match config.get(option) {
        Some(value) => Ok(*value),
        // the root indicator is always on
        None if option == "root" => Ok(1.0),
        None => Err(Error::MissingOption(option.to_string())),
    }
}

impl FromStr for InfluenceModel {
    type Err = Error;

    /// Parse a model string: terms separated by `+`, factors separated by
    /// the literal `" * "`, first factor the coefficient
    fn from_str(s: &str) -> Result<Self> {
        let mut terms = Vec::new();
        for raw in s.split('+') {
            let mut factors = raw.trim().split(" * ");
            let coefficient = factors.next().unwrap_or("").trim();
            let coefficient: f64 = coefficient
                .parse()
                .map_err(|_| Error::ModelParse(format!("invalid coefficient: `{}`", coefficient)))?;
            let options = factors.map(|opt| opt.trim().to_string()).collect();
            terms.push(Term {
                coefficient,
                options,
            });
        }
        Ok(InfluenceModel { terms })
    }
}

impl fmt::Display for InfluenceModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .terms
            .iter()
            .map(|term| {
                let mut factors = vec![term.coefficient.to_string()];
                factors.extend(term.options.iter().cloned());
                factors.join(" * ")
            })
            .collect();
        write!(f, "{}", rendered.join(" + "))
    }
}
