// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Export command - exports the walkway graph to various formats

use crate::graph::CampusGraph;
use crate::types::{EdgeStatus, Vertex, Weight};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Supported export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Graphviz DOT format
    Dot,
    /// JSON format
    Json,
}

impl ExportFormat {
    /// Parse format from string
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "dot" | "graphviz" => Some(Self::Dot),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// One walkway as written to JSON
#[derive(Debug, Serialize)]
struct WalkwayRecord<'a> {
    from: Vertex,
    to: Vertex,
    from_name: Option<&'a str>,
    to_name: Option<&'a str>,
    minutes: Weight,
    status: EdgeStatus,
}

/// Render the graph as Graphviz DOT; closed walkways are dashed
#[must_use]
pub fn to_dot(graph: &CampusGraph) -> String {
    let mut dot = String::from("graph campus {\n");
    dot.push_str("  node [shape=box, style=rounded];\n\n");

    for vertex in graph.vertices() {
        let label = escape_label(graph.label(vertex).unwrap_or_default());
        let _ = writeln!(dot, "  \"{vertex}\" [label=\"{vertex}\\n{label}\"];");
    }

    dot.push('\n');

    for (u, v, walkway) in graph.walkways() {
        let style = if walkway.closed { ", style=dashed" } else { "" };
        let _ = writeln!(dot, "  \"{u}\" -- \"{v}\" [label=\"{}\"{style}];", walkway.minutes);
    }

    dot.push_str("}\n");
    dot
}

/// Escape a location name for a quoted DOT string
fn escape_label(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if matches!(c, '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Render the walkway list as pretty JSON
pub fn to_json(graph: &CampusGraph) -> Result<String> {
    let records: Vec<WalkwayRecord<'_>> = graph
        .walkways()
        .map(|(from, to, walkway)| WalkwayRecord {
            from,
            to,
            from_name: graph.label(from),
            to_name: graph.label(to),
            minutes: walkway.minutes,
            status: walkway.status(),
        })
        .collect();
    serde_json::to_string_pretty(&records).context("Failed to serialize graph to JSON")
}

/// Run the export command
pub fn run(graph: &CampusGraph, format: &str, output: Option<PathBuf>) -> Result<()> {
    info!("Exporting to {}", format);

    let export_format = ExportFormat::parse(format)
        .ok_or_else(|| anyhow::anyhow!("Unknown export format: {}. Supported: dot, json", format))?;

    let content = match export_format {
        ExportFormat::Dot => to_dot(graph),
        ExportFormat::Json => to_json(graph)?,
    };

    match output {
        Some(path) => {
            fs::write(&path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Exported {} walkways to {}", graph.edge_count(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .context("Failed to write to stdout")?;
        }
    }

    Ok(())
}
