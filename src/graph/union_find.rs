#![allow(dead_code)]

use crate::error::{GameError, Result};

/// Disjoint-set structure over `size` items, used only while selecting
/// corridor edges. A negative entry marks a root and stores the negated
/// subtree size.
pub struct UnionFind {
    parent: Vec<i32>,
}

impl UnionFind {
    pub fn new(size: usize) -> Self {
        Self {
            parent: vec![-1; size],
        }
    }

    fn check(&self, v: usize) -> Result<()> {
        if v >= self.parent.len() {
            return Err(GameError::InvalidIndex {
                index: v,
                size: self.parent.len(),
            });
        }
        Ok(())
    }

    /// Root of the set containing `v`, with path compression. Iterative on
    /// purpose: chamber counts are small today, but recursion depth should
    /// not be a function of input shape.
    pub fn find(&mut self, v: usize) -> Result<usize> {
        self.check(v)?;
        let mut root = v;
        while self.parent[root] >= 0 {
            root = self.parent[root] as usize;
        }
        let mut walk = v;
        while walk != root {
            let next = self.parent[walk] as usize;
            self.parent[walk] = root as i32;
            walk = next;
        }
        Ok(root)
    }

    pub fn connected(&mut self, v1: usize, v2: usize) -> Result<bool> {
        Ok(self.find(v1)? == self.find(v2)?)
    }

    /// Size of the set containing `v`.
    pub fn size_of(&mut self, v: usize) -> Result<usize> {
        let root = self.find(v)?;
        Ok((-self.parent[root]) as usize)
    }

    /// Union by size; the smaller tree's root is attached under the larger.
    /// Equal sizes attach `v1`'s root under `v2`'s root. Already-connected
    /// arguments leave the structure unchanged.
    pub fn union(&mut self, v1: usize, v2: usize) -> Result<()> {
        let p1 = self.find(v1)?;
        let p2 = self.find(v2)?;
        if p1 == p2 {
            return Ok(());
        }

        if self.parent[p1] < self.parent[p2] {
            self.parent[p1] += self.parent[p2];
            self.parent[p2] = p1 as i32;
        } else {
            self.parent[p2] += self.parent[p1];
            self.parent[p1] = p2 as i32;
        }
        Ok(())
    }
}
