//! DIMACS output format tests
//!
//! Checks the bit-exact layout downstream consumers rely on: comment block,
//! header fields, and clause lines that decode back to the source literals.

use pretty_assertions::assert_eq;
use rstest::rstest;
use splconq::{compile_clauses, BinaryOption, FeatureModel, FeatureModelDocument};
use std::collections::HashMap;

fn document(names: &[&str]) -> FeatureModelDocument {
    FeatureModelDocument {
        binary_options: names
            .iter()
            .map(|name| BinaryOption {
                name: (*name).into(),
                optional: true,
                implied_options: vec![],
                excluded_options: vec![],
            })
            .collect(),
        ..Default::default()
    }
}

#[rstest]
#[case(&["A"])]
#[case(&["A", "B"])]
#[case(&["alpha", "beta", "gamma", "delta"])]
fn test_comment_count_matches_header(#[case] names: &[&str]) {
    let fm = FeatureModel::from_document(&document(names));
    let dimacs = compile_clauses(&fm).unwrap();
    let lines: Vec<&str> = dimacs.lines().collect();

    let comments = lines.iter().filter(|l| l.starts_with("c ")).count();
    assert_eq!(comments, names.len());
    assert_eq!(lines[comments], format!("p cnf {} 0", names.len()));
}

#[test]
fn test_clause_lines_decode_back_to_literals() {
    let mut doc = document(&["A", "B", "C"]);
    doc.binary_options[0].implied_options = vec!["B".into(), "C".into()];
    doc.binary_options[1].excluded_options = vec!["C".into()];

    let fm = FeatureModel::from_document(&doc);
    let dimacs = compile_clauses(&fm).unwrap();
    let lines: Vec<&str> = dimacs.lines().collect();

    // rebuild the id->name table from the comment block
    let mut names = HashMap::new();
    for line in lines.iter().filter(|l| l.starts_with("c ")) {
        let mut fields = line.split_whitespace().skip(1);
        let id: i32 = fields.next().unwrap().parse().unwrap();
        names.insert(id, fields.next().unwrap());
    }

    let decode = |line: &str| -> Vec<String> {
        line.split_whitespace()
            .map(|f| f.parse::<i32>().unwrap())
            .take_while(|&v| v != 0)
            .map(|v| {
                if v < 0 {
                    format!("!{}", names[&-v])
                } else {
                    names[&v].to_string()
                }
            })
            .collect()
    };

    let clauses: Vec<Vec<String>> = lines[4..].iter().map(|&l| decode(l)).collect();
    assert_eq!(
        clauses,
        [
            vec!["!A".to_string(), "B".to_string()],
            vec!["!A".to_string(), "C".to_string()],
            vec!["!B".to_string(), "!C".to_string()],
        ]
    );
}

#[test]
fn test_mandatory_option_without_relations_emits_only_unit_clause() {
    let mut doc = document(&["A", "B"]);
    doc.binary_options[1].optional = false;

    let fm = FeatureModel::from_document(&doc);
    assert_eq!(fm.constraints(), ["B"]);

    let dimacs = compile_clauses(&fm).unwrap();
    assert_eq!(dimacs, "c 1 A\nc 2 B\np cnf 2 1\n2 0");
}

#[test]
fn test_redundant_relations_collapse_to_one_clause() {
    // implication A => B and the document-level clause spell the same
    // disjunction; only the textual duplicate is removed
    let mut doc = document(&["A", "B"]);
    doc.binary_options[0].implied_options = vec!["B".into()];
    doc.boolean_constraints = vec!["!A | B".into(), "B | !A".into()];

    let fm = FeatureModel::from_document(&doc);
    let dimacs = compile_clauses(&fm).unwrap();

    // `!A | B` compiles twice to `-1 2 0` and is deduplicated; the
    // reordered `B | !A` stays distinct
    assert_eq!(dimacs, "c 1 A\nc 2 B\np cnf 2 2\n-1 2 0\n2 -1 0");
}
