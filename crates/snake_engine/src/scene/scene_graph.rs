//! Scene graph trait and implementations
//!
//! A flat root node with child registration. Renderers that keep their own
//! hierarchy implement [`SceneGraph`] directly; [`SimpleSceneGraph`] is the
//! in-memory default.

use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::Transform;

new_key_type! {
    /// Stable handle of a node registered under the scene root
    pub struct NodeId;
}

/// Node stored under the scene root
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Debug name
    pub name: String,
    /// Latest world transform pushed by the game
    pub transform: Transform,
}

/// Parent/child registration surface of a scene root
pub trait SceneGraph: Send {
    /// Register a new child of the root
    fn add_child(&mut self, name: &str, transform: Transform) -> NodeId;

    /// Unregister a child; returns `false` for unknown nodes
    fn remove_child(&mut self, node: NodeId) -> bool;

    /// Replace a node's transform; returns `false` for unknown nodes
    fn set_transform(&mut self, node: NodeId, transform: &Transform) -> bool;

    /// Look up a node
    fn node(&self, node: NodeId) -> Option<&SceneNode>;

    /// Number of registered children
    fn node_count(&self) -> usize;

    /// Remove every child
    fn clear(&mut self);
}

/// Slotmap-backed scene root
#[derive(Debug, Default)]
pub struct SimpleSceneGraph {
    nodes: SlotMap<NodeId, SceneNode>,
}

impl SimpleSceneGraph {
    /// Create an empty scene root
    pub fn new() -> Self {
        Self::default()
    }
}

impl SceneGraph for SimpleSceneGraph {
    fn add_child(&mut self, name: &str, transform: Transform) -> NodeId {
        self.nodes.insert(SceneNode {
            name: name.to_string(),
            transform,
        })
    }

    fn remove_child(&mut self, node: NodeId) -> bool {
        self.nodes.remove(node).is_some()
    }

    fn set_transform(&mut self, node: NodeId, transform: &Transform) -> bool {
        self.nodes.get_mut(node).map_or(false, |entry| {
            entry.transform.clone_from(transform);
            true
        })
    }

    fn node(&self, node: NodeId) -> Option<&SceneNode> {
        self.nodes.get(node)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }
}
