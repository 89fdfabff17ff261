use crate::coords::{Mat4, Vec3};
use crate::paint::Color;

use super::node::{Node, NodeHandle};

/// Scene lighting used by `Standard` materials.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Lighting {
    pub ambient: f32,
    pub directional: f32,
    /// Direction the light travels, in world space.
    pub direction: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.4,
            directional: 0.8,
            direction: Vec3::new(-0.5, -1.0, -0.3).normalize(),
        }
    }
}

/// Ordered set of top-level nodes.
///
/// Insertion order is draw order for nodes that are otherwise equal. A node is
/// a member at most once.
#[derive(Debug, Default)]
pub struct Scene {
    members: Vec<NodeHandle>,
    pub background: Option<Color>,
    pub lighting: Lighting,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `node` as a member. Returns `false` if it already was one.
    pub fn insert(&mut self, node: &NodeHandle) -> bool {
        if self.contains(node) {
            return false;
        }
        self.members.push(node.clone());
        true
    }

    /// Removes `node`. Returns `false` if it was not a member.
    pub fn remove(&mut self, node: &NodeHandle) -> bool {
        match self.members.iter().position(|m| m == node) {
            Some(i) => {
                self.members.remove(i);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, node: &NodeHandle) -> bool {
        self.members.iter().any(|m| m == node)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[NodeHandle] {
        &self.members
    }

    /// Drops every member.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    /// Visits every visible node with its world matrix, parents before children.
    ///
    /// Invisible nodes hide their whole subtree.
    pub fn walk(&self, f: &mut impl FnMut(&Node, Mat4)) {
        for member in &self.members {
            walk_node(member, Mat4::IDENTITY, f);
        }
    }
}

fn walk_node(handle: &NodeHandle, parent: Mat4, f: &mut impl FnMut(&Node, Mat4)) {
    let node = handle.borrow();
    if !node.visible {
        return;
    }
    let world = parent * node.transform.matrix();
    f(&node, world);
    for child in &node.children {
        walk_node(child, world, f);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::NodeKind;

    // ── membership ────────────────────────────────────────────────────────

    #[test]
    fn insert_is_idempotent() {
        let mut scene = Scene::new();
        let n = NodeHandle::group(Vec::new());
        assert!(scene.insert(&n));
        assert!(!scene.insert(&n));
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn remove_non_member_is_noop() {
        let mut scene = Scene::new();
        let a = NodeHandle::group(Vec::new());
        let b = NodeHandle::group(Vec::new());
        scene.insert(&a);
        assert!(!scene.remove(&b));
        assert!(scene.remove(&a));
        assert!(scene.is_empty());
        // A removed node may come back.
        assert!(scene.insert(&a));
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut scene = Scene::new();
        let nodes: Vec<_> = (0..3).map(|_| NodeHandle::group(Vec::new())).collect();
        for n in nodes.iter().rev() {
            scene.insert(n);
        }
        scene.remove(&nodes[1]);
        assert_eq!(scene.members(), &[nodes[2].clone(), nodes[0].clone()]);
    }

    // ── walk ──────────────────────────────────────────────────────────────

    #[test]
    fn walk_composes_transforms_and_skips_hidden() {
        let child = NodeHandle::group(Vec::new());
        child.borrow_mut().transform.position = Vec3::Y;
        let hidden = NodeHandle::group(Vec::new());
        hidden.borrow_mut().visible = false;
        let parent = NodeHandle::group(vec![child.clone(), hidden]);
        parent.borrow_mut().transform.position = Vec3::X;

        let mut scene = Scene::new();
        scene.insert(&parent);

        let mut seen = Vec::new();
        scene.walk(&mut |node, world| {
            assert!(matches!(node.kind, NodeKind::Group));
            seen.push(world.transform_point3(Vec3::ZERO));
        });
        assert_eq!(seen, vec![Vec3::X, Vec3::new(1.0, 1.0, 0.0)]);
    }
}
