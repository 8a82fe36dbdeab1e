//! IFC reference document writer.
//!
//! Emits the finished tree as an ISO 10303-21 (STEP physical file) using the
//! IFC4 schema: one IFCCLASSIFICATION container entity carrying the scheme
//! metadata, one IFCCLASSIFICATIONREFERENCE per node, each pointing at its
//! parent entity via ReferencedSource. Nodes are written in preorder, so a
//! parent's entity id is always smaller than its children's.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;
use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::ClassificationTree;
use crate::infrastructure::error::{InfraError, InfraResult};

const SCHEMA: &str = "IFC4";

/// Write the tree as an IFC file at `path`.
#[instrument(level = "debug", skip(tree))]
pub fn write_ifc_file(tree: &ClassificationTree, path: &Path) -> InfraResult<()> {
    let file = File::create(path)
        .map_err(|e| InfraError::io(format!("cannot create output: {}", path.display()), e))?;
    let mut out = BufWriter::new(file);
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    write_ifc(tree, &mut out, &file_name)?;
    out.flush()
        .map_err(|e| InfraError::io(format!("cannot write output: {}", path.display()), e))
}

/// Write the tree as an IFC document to any writer.
pub fn write_ifc<W: Write>(
    tree: &ClassificationTree,
    out: &mut W,
    file_name: &str,
) -> InfraResult<()> {
    let meta = tree.meta();
    validate_edition_date(&meta.edition_date)?;

    let io_err = |e| InfraError::io(format!("cannot write IFC document: {}", file_name), e);
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S");

    writeln!(out, "ISO-10303-21;").map_err(io_err)?;
    writeln!(out, "HEADER;").map_err(io_err)?;
    writeln!(out, "FILE_DESCRIPTION((''),'2;1');").map_err(io_err)?;
    writeln!(
        out,
        "FILE_NAME('{}','{}',(''),(''),'rsclass {}','rsclass','');",
        encode_string(file_name),
        timestamp,
        env!("CARGO_PKG_VERSION"),
    )
    .map_err(io_err)?;
    writeln!(out, "FILE_SCHEMA(('{}'));", SCHEMA).map_err(io_err)?;
    writeln!(out, "ENDSEC;").map_err(io_err)?;
    writeln!(out, "DATA;").map_err(io_err)?;

    // Entity ids in preorder: the classification container is #1, every
    // node follows its parent.
    let mut entity_ids: HashMap<Index, usize> = HashMap::new();
    for (i, (idx, _)) in tree.iter().enumerate() {
        entity_ids.insert(idx, i + 1);
    }

    writeln!(
        out,
        "#1=IFCCLASSIFICATION({},{},{},{},{},$,{});",
        attr(&meta.source),
        attr(&meta.edition),
        attr(&meta.edition_date),
        attr(&meta.name),
        attr(&meta.description),
        token_list(&meta.reference_tokens),
    )
    .map_err(io_err)?;

    for (idx, node) in tree.iter() {
        let Some(entry) = node.entry.as_ref() else {
            continue;
        };
        let parent_id = node
            .parent
            .and_then(|p| entity_ids.get(&p))
            .copied()
            .unwrap_or(1);
        writeln!(
            out,
            "#{}=IFCCLASSIFICATIONREFERENCE($,{},{},#{},$,$);",
            entity_ids[&idx],
            attr(&entry.code),
            attr(&entry.label),
            parent_id,
        )
        .map_err(io_err)?;
    }

    writeln!(out, "ENDSEC;").map_err(io_err)?;
    writeln!(out, "END-ISO-10303-21;").map_err(io_err)?;
    Ok(())
}

fn validate_edition_date(value: &str) -> InfraResult<()> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| InfraError::InvalidEditionDate {
            value: value.to_string(),
        })
}

/// Render an optional string attribute: `$` for empty, quoted otherwise.
fn attr(value: &str) -> String {
    if value.is_empty() {
        "$".to_string()
    } else {
        format!("'{}'", encode_string(value))
    }
}

fn token_list(tokens: &[String]) -> String {
    if tokens.is_empty() {
        return "$".to_string();
    }
    let quoted: Vec<String> = tokens
        .iter()
        .map(|t| format!("'{}'", encode_string(t)))
        .collect();
    format!("({})", quoted.join(","))
}

/// Encode a string per ISO 10303-21: apostrophes and backslashes doubled,
/// characters outside ISO 8859-1 as \X2\..\X0\ UTF-16 hex runs.
fn encode_string(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\'' => encoded.push_str("''"),
            '\\' => encoded.push_str("\\\\"),
            c if (c as u32) < 0x80 => encoded.push(c),
            c => {
                encoded.push_str("\\X2\\");
                for unit in c.encode_utf16(&mut [0u16; 2]) {
                    encoded.push_str(&format!("{:04X}", unit));
                }
                encoded.push_str("\\X0\\");
            }
        }
    }
    encoded
}
