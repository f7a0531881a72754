//! Ephemeral connectivity graph over chamber indices.
//!
//! Built once per world to pick corridor edges, then discarded. Determinism
//! matters more than asymptotics here: edges are enumerated in ascending
//! (i, j) order and equal weights keep that order through the sort, so the
//! same chamber set always yields the same spanning tree.

pub mod union_find;

use crate::error::Result;
use crate::map::chambers::Chamber;
use union_find::UnionFind;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge {
    pub source: usize,
    pub dest: usize,
    pub weight: i32,
}

pub struct ConnectivityGraph {
    vertex_count: usize,
    edges: Vec<Edge>,
}

impl ConnectivityGraph {
    /// Complete graph over the chambers, one edge per unordered pair,
    /// weighted by Manhattan distance between centers.
    pub fn complete(chambers: &[Chamber]) -> Self {
        let mut edges = Vec::with_capacity(chambers.len() * (chambers.len().saturating_sub(1)) / 2);
        for i in 0..chambers.len() {
            for j in (i + 1)..chambers.len() {
                edges.push(Edge {
                    source: i,
                    dest: j,
                    weight: chambers[i].center_distance(&chambers[j]),
                });
            }
        }
        Self {
            vertex_count: chambers.len(),
            edges,
        }
    }

    /// Kruskal's algorithm. Returns the accepted edges in acceptance order;
    /// the result has exactly `vertex_count - 1` edges and spans every
    /// vertex.
    pub fn minimum_spanning_tree(&self) -> Result<Vec<Edge>> {
        let mut ordered = self.edges.clone();
        // Stable: equal weights keep their enumeration order.
        ordered.sort_by_key(|e| e.weight);

        let mut uf = UnionFind::new(self.vertex_count);
        let mut mst = Vec::with_capacity(self.vertex_count.saturating_sub(1));
        for edge in ordered {
            if mst.len() + 1 >= self.vertex_count {
                break;
            }
            if !uf.connected(edge.source, edge.dest)? {
                uf.union(edge.source, edge.dest)?;
                mst.push(edge);
            }
        }
        Ok(mst)
    }
}
