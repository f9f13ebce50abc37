//! Specialized collection types

pub use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Stable handle to a node stored in a [`crate::spatial::QuadTree`] arena
    pub struct NodeKey;
}

/// Arena of tree nodes addressed by [`NodeKey`]
pub type NodeArena<T> = SlotMap<NodeKey, T>;
