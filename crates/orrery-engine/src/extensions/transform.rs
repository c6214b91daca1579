// extensions/transform.rs
//
// Transform hierarchy: parent-child relationships by NodeId, composed as 4x4
// matrices. Kept outside Scene so apps without hierarchy pay nothing.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(pivot, LocalTransform::new());
//   graph.register_with(planet, LocalTransform::new().with_translation(Vec3::X * 15.0));
//   graph.set_parent(planet, Some(pivot));
//   graph.propagate(&mut scene);  // writes Node.world

use std::collections::HashMap;
use glam::{EulerRot, Mat4, Quat, Vec3};
use crate::api::types::NodeId;
use crate::core::scene::Scene;

/// Local transform relative to the parent (or world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub translation: Vec3,
    /// Euler angles in radians, applied in X, Y, Z order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        Mat4::from_scale_rotation_translation(self.scale, rotation, self.translation)
    }
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalTransform,
}

/// Transform hierarchy graph.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<NodeId, TransformNode>,
    /// Nodes with no parent.
    roots: Vec<NodeId>,
    /// Set when anything changes, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node as a root with the identity transform.
    pub fn register(&mut self, id: NodeId) {
        self.register_with(id, LocalTransform::default());
    }

    /// Register a node as a root with a specific local transform.
    pub fn register_with(&mut self, id: NodeId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of a node. Pass `None` to make it a root.
    /// Requests that would create a cycle are ignored.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) {
        if let Some(p) = parent {
            if p == child || self.is_ancestor(child, p) {
                log::warn!("transform graph: ignoring cyclic parent {:?} -> {:?}", child, p);
                return;
            }
            self.nodes.entry(p).or_default();
            if self.nodes.get(&p).is_some_and(|n| n.parent.is_none()) && !self.roots.contains(&p) {
                self.roots.push(p);
            }
        }
        self.nodes.entry(child).or_default();

        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old) = self.nodes.get_mut(&old_parent) {
                old.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Whether `ancestor` appears on the parent chain of `id`.
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.get_parent(id);
        while let Some(p) = current {
            if p == ancestor {
                return true;
            }
            current = self.get_parent(p);
        }
        false
    }

    pub fn get_local(&self, id: NodeId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    /// Mutable access to a local transform; marks the graph dirty.
    pub fn get_local_mut(&mut self, id: NodeId) -> Option<&mut LocalTransform> {
        let node = self.nodes.get_mut(&id)?;
        self.dirty = true;
        Some(&mut node.local)
    }

    pub fn get_parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: NodeId) -> Option<&[NodeId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Remove a node. Its children become roots.
    pub fn remove(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            if let Some(parent) = node.parent {
                if let Some(parent_node) = self.nodes.get_mut(&parent) {
                    parent_node.children.retain(|&c| c != id);
                }
            }
            for child in node.children {
                if let Some(child_node) = self.nodes.get_mut(&child) {
                    child_node.parent = None;
                }
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
            self.roots.retain(|&r| r != id);
        }
        self.dirty = true;
    }

    /// Compose local transforms from the roots down and write `Node::world`.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }
        for &root in &self.roots {
            self.propagate_recursive(root, Mat4::IDENTITY, scene);
        }
        self.dirty = false;
    }

    fn propagate_recursive(&self, id: NodeId, parent_world: Mat4, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };
        let world = parent_world * node.local.matrix();

        if let Some(scene_node) = scene.get_mut(id) {
            scene_node.world = world;
        }

        for &child in &node.children {
            self.propagate_recursive(child, world, scene);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.dirty = false;
    }
}
