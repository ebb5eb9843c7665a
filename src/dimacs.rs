//! DIMACS CNF compilation
//!
//! Translates the boolean constraints of a [`FeatureModel`] into the plain
//! text CNF clause set consumed by SPLConqueror's solver stage. Binary
//! options are numbered 1-based in model order; the mapping is emitted as
//! `c <id> <name>` comment lines so downstream consumers can decode clause
//! lines back into option names.

use crate::error::{Error, Result};
use crate::feature_model::FeatureModel;
use std::collections::{HashMap, HashSet};

/// Compile a feature model's constraints into DIMACS CNF text
///
/// Output layout: one comment line per binary option, the `p cnf` header,
/// then one line per clause of space-separated signed ids ending in `0`.
/// The header's first field is the number of comment lines; SPLConqueror's
/// reader expects that count there, not an independent variable count (the
/// two coincide since ids are contiguous).
///
/// Fails with [`Error::UnknownOption`] when a constraint references a name
/// that is not a binary option of the model.
pub fn compile_clauses(model: &FeatureModel) -> Result<String> {
    let ids: HashMap<&str, usize> = model
        .binary()
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i + 1))
        .collect();

    let mut lines: Vec<String> = model
        .binary()
        .iter()
        .enumerate()
        .map(|(i, name)| format!("c {} {}", i + 1, name))
        .collect();

    let clauses = compile_constraints(model.constraints(), &ids)?;
    log::debug!(
        "compiled {} clauses over {} variables",
        clauses.len(),
        ids.len()
    );

    lines.push(format!("p cnf {} {}", lines.len(), clauses.len()));
    lines.extend(clauses);
    Ok(lines.join("\n"))
}

/// Compile all constraints, dropping textual duplicates
///
/// Deduplication is exact-string over the compiled clause lines and keeps
/// first-occurrence order; logically redundant but textually distinct
/// clauses are left alone.
fn compile_constraints(constraints: &[String], ids: &HashMap<&str, usize>) -> Result<Vec<String>> {
    let mut seen = HashSet::new();
    let mut clauses = Vec::new();
    for constraint in constraints {
        let clause = compile_clause(constraint, ids)?;
        if seen.insert(clause.clone()) {
            clauses.push(clause);
        }
    }
    Ok(clauses)
}

/// Compile one `|`-separated literal disjunction into a DIMACS clause line
///
/// The clause is tokenized into literals and each option name looked up as
/// a whole token; names are never substituted inside other names.
fn compile_clause(constraint: &str, ids: &HashMap<&str, usize>) -> Result<String> {
    let mut literals = Vec::new();
    for raw in constraint.split('|') {
        let token = raw.trim();
        let (negated, name) = match token.strip_prefix('!') {
            Some(rest) => (true, rest.trim()),
            None => (false, token),
        };
        let id = ids
            .get(name)
            .ok_or_else(|| Error::UnknownOption(name.to_string()))?;
        if negated {
            literals.push(format!("-{}", id));
        } else {
            literals.push(id.to_string());
        }
    }
    literals.push("0".to_string());
    Ok(literals.join(" "))
}
