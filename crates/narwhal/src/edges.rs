//! Edge extraction: pairs the caller's parallel columns into rows and builds the graph from the
//! `original` rows.

use std::fmt;

use narwhal_graphlib::Graph;

use crate::error::{Result, ensure_same_length};

/// Per-row flag selecting whether a row reads the base layout directly or reflected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Original,
    Mirrored,
    /// Any other label. Such rows are neither inserted into the graph nor reflected.
    Other(String),
}

impl Role {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "original" => Self::Original,
            "mirrored" => Self::Mirrored,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Original => "original",
            Self::Mirrored => "mirrored",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_mirrored(&self) -> bool {
        matches!(self, Self::Mirrored)
    }
}

impl From<&str> for Role {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One caller row: `(fromNode, toNode, role)`. Endpoints are optional because the host tool
/// may hand over nulls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRow {
    pub from: Option<String>,
    pub to: Option<String>,
    pub role: Role,
}

impl EdgeRow {
    pub fn new(from: impl Into<String>, to: impl Into<String>, role: impl Into<Role>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
            role: role.into(),
        }
    }

    pub fn endpoints(&self) -> Option<(&str, &str)> {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => Some((from.as_str(), to.as_str())),
            _ => None,
        }
    }
}

/// Zips the three columns into rows, failing on a length mismatch.
pub fn rows_from_columns(
    from_nodes: &[Option<String>],
    to_nodes: &[Option<String>],
    roles: &[String],
) -> Result<Vec<EdgeRow>> {
    ensure_same_length(&[
        ("from_nodes", from_nodes.len()),
        ("to_nodes", to_nodes.len()),
        ("roles", roles.len()),
    ])?;

    Ok(from_nodes
        .iter()
        .zip(to_nodes)
        .zip(roles)
        .map(|((from, to), role)| EdgeRow {
            from: from.clone(),
            to: to.clone(),
            role: Role::parse(role),
        })
        .collect())
}

/// Inputs that cannot produce a layout. Callers answer with one `None` per row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyOrInvalidInput {
    /// No row has the `original` role (including the zero-row case).
    NoOriginalEdges,
    /// The first row lacks an endpoint.
    NullEndpointInFirstRow,
}

impl fmt::Display for EmptyOrInvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoOriginalEdges => f.write_str("no original edges"),
            Self::NullEndpointInFirstRow => f.write_str("first row has a null endpoint"),
        }
    }
}

/// Builds the undirected graph from the `original` rows, in row order.
///
/// `original` rows with a null endpoint past the first row are skipped; they cannot name a
/// node.
pub fn build_graph(rows: &[EdgeRow]) -> std::result::Result<Graph, EmptyOrInvalidInput> {
    if let Some(first) = rows.first() {
        if first.endpoints().is_none() {
            return Err(EmptyOrInvalidInput::NullEndpointInFirstRow);
        }
    }

    let mut graph = Graph::new();
    for row in rows.iter().filter(|r| r.role == Role::Original) {
        if let Some((from, to)) = row.endpoints() {
            graph.set_edge(from, to);
        }
    }

    if graph.edge_count() == 0 {
        return Err(EmptyOrInvalidInput::NoOriginalEdges);
    }
    Ok(graph)
}
