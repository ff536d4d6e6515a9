use anyhow::{bail, Context, Result};
use graph_walk::TraversalError;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashMap;
use std::path::Path;

const PARENT_COLUMNS: [&str; 2] = ["padre", "parent"];
const CHILD_COLUMNS: [&str; 2] = ["hijo", "child"];

/// Directed parent -> child graph loaded from a two-column table
///
/// Nodes are interned as `u32` ids so the graph keeps the table's insertion
/// order when enumerating neighbors.
#[derive(Debug, Default)]
pub struct FamilyTable {
    names: Vec<String>,
    ids: HashMap<String, u32>,
    pub graph: DiGraphMap<u32, ()>,
}

impl FamilyTable {
    /// Load a table from a CSV file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing {}", path.display()))
    }

    /// Parse CSV text with a header naming the parent and child columns
    ///
    /// All parents are added as nodes before any child, each in order of
    /// first appearance.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty());

        let Some((_, header)) = lines.next() else {
            bail!("missing header line");
        };
        let header = split_row(header);
        let column = |candidates: [&str; 2]| {
            header
                .iter()
                .position(|name| candidates.contains(&name.to_lowercase().as_str()))
                .with_context(|| format!("no {} column in header", candidates.join("/")))
        };
        let parent_column = column(PARENT_COLUMNS)?;
        let child_column = column(CHILD_COLUMNS)?;

        let mut rows = Vec::new();
        for (index, line) in lines {
            let row = split_row(line);
            let (Some(parent), Some(child)) = (row.get(parent_column), row.get(child_column))
            else {
                bail!("line {}: expected at least {} columns", index + 1, header.len());
            };
            if parent.is_empty() || child.is_empty() {
                bail!("line {}: empty node name", index + 1);
            }
            rows.push((parent.to_string(), child.to_string()));
        }

        let mut table = Self::default();
        for (parent, _) in &rows {
            table.intern(parent)?;
        }
        for (parent, child) in &rows {
            let parent = table.intern(parent)?;
            let child = table.intern(child)?;
            table.graph.add_edge(parent, child, ());
        }

        tracing::debug!(
            nodes = table.graph.node_count(),
            edges = table.graph.edge_count(),
            "loaded family table"
        );
        Ok(table)
    }

    fn intern(&mut self, name: &str) -> Result<u32> {
        if let Some(&id) = self.ids.get(name) {
            return Ok(id);
        }
        let id = u32::try_from(self.names.len()).context("too many distinct node names")?;
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        self.graph.add_node(id);
        Ok(id)
    }

    /// Look up the id of a node by name
    pub fn node(&self, name: &str) -> Result<u32, TraversalError<String>> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| TraversalError::UnknownNode(name.to_string()))
    }

    /// Name of a node id
    pub fn name(&self, id: u32) -> &str {
        self.names.get(id as usize).map_or("?", String::as_str)
    }
}

fn split_row(line: &str) -> Vec<&str> {
    line.split(',')
        .map(|field| field.trim().trim_matches('"'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use test_log::test;

    #[test]
    fn parents_come_before_children() {
        let table = FamilyTable::parse("padre,hijo\nB,D\nA,B\nA,C\n").unwrap();
        let names: Vec<_> = table.graph.nodes().map(|id| table.name(id)).collect();
        assert_eq!(names, vec!["B", "A", "D", "C"]);
        assert_eq!(table.graph.edge_count(), 3);
    }

    #[test]
    fn columns_are_found_by_name() {
        let table = FamilyTable::parse("id,child,parent\n1,\"B\",\"A\"\n2,C,A\n").unwrap();
        let a = table.node("A").unwrap();
        let children: Vec<_> = table.graph.neighbors(a).map(|id| table.name(id)).collect();
        assert_eq!(children, vec!["B", "C"]);
    }

    #[test]
    fn malformed_rows_report_their_line() {
        let err = FamilyTable::parse("padre,hijo\nA,B\nC\n").unwrap_err();
        assert!(err.to_string().contains("line 3"), "{err}");

        assert!(FamilyTable::parse("from,to\nA,B\n").is_err());
        assert!(FamilyTable::parse("").is_err());
    }

    #[test]
    fn unknown_names_are_traversal_errors() {
        let table = FamilyTable::parse("padre,hijo\nA,B\n").unwrap();
        assert_eq!(
            table.node("Z"),
            Err(TraversalError::UnknownNode("Z".to_string()))
        );
    }

    #[test]
    fn repeated_names_share_one_id() {
        let mut table = FamilyTable::default();
        let a = table.intern("A").unwrap();
        let b = table.intern("B").unwrap();
        assert_eq!(table.intern("A").unwrap(), a);
        assert_ne!(a, b);
        assert_eq!(table.name(b), "B");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "padre,hijo\nA,B\nB,C").unwrap();
        let table = FamilyTable::load(file.path()).unwrap();
        assert_eq!(table.graph.node_count(), 3);
    }
}
