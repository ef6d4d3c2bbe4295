#![forbid(unsafe_code)]

//! Node handles.
//!
//! Controllers never hold live DOM references. Page elements discovered by
//! the scanner carry snapshot-assigned ids; elements the controllers create
//! allocate fresh ids above the snapshot's watermark. The host keeps the
//! id-to-element map.

use serde::{Deserialize, Serialize};

/// Opaque handle to one DOM element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document body. Scanners number page elements from 1.
    pub const BODY: Self = Self(0);

    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source for controller-created elements.
///
/// Seed it with the snapshot watermark so fresh ids never collide with
/// scanner-assigned ones.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator whose first id is `watermark`.
    #[must_use]
    pub const fn starting_at(watermark: u32) -> Self {
        Self { next: watermark }
    }

    /// Hand out the next fresh id.
    pub fn alloc(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_is_monotonic_from_watermark() {
        let mut ids = IdAllocator::starting_at(7);
        assert_eq!(ids.alloc(), NodeId(7));
        assert_eq!(ids.alloc(), NodeId(8));
        assert_eq!(ids.alloc(), NodeId(9));
    }

    #[test]
    fn node_id_serializes_transparently() {
        let json = serde_json::to_string(&NodeId(42)).unwrap();
        assert_eq!(json, "42");
        let back: NodeId = serde_json::from_str("42").unwrap();
        assert_eq!(back, NodeId(42));
    }
}
