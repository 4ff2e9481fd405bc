//! Scene registration
//!
//! The game registers every renderable it creates with a [`SceneGraph`]
//! and keeps node transforms current; traversal and drawing belong to the
//! renderer behind the trait.

pub mod scene_graph;

pub use scene_graph::{NodeId, SceneGraph, SceneNode, SimpleSceneGraph};
