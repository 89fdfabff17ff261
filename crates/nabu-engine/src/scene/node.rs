use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::coords::{Mat4, Quat, Vec3};

use super::geometry::{LineGeometry, MeshGeometry, PointGeometry, TextLabel};
use super::material::Material;

/// Process-unique node identity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        NodeId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Local transform: scale, then rotate, then translate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[inline]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// What a node draws.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Draws nothing itself; only its children.
    Group,
    Mesh(MeshGeometry),
    Lines(LineGeometry),
    Points(PointGeometry),
    Text(TextLabel),
}

/// A scene graph node.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    pub transform: Transform,
    pub kind: NodeKind,
    pub material: Material,
    pub visible: bool,
    pub children: Vec<NodeHandle>,
}

impl Node {
    pub fn new(kind: NodeKind, material: Material) -> Self {
        Self {
            id: NodeId::next(),
            transform: Transform::IDENTITY,
            kind,
            material,
            visible: true,
            children: Vec::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }
}

/// Shared, single-threaded handle to a [`Node`].
///
/// Cloning the handle shares the node. Equality is identity.
#[derive(Debug, Clone)]
pub struct NodeHandle {
    id: NodeId,
    inner: Rc<RefCell<Node>>,
}

impl NodeHandle {
    pub fn new(node: Node) -> Self {
        Self { id: node.id, inner: Rc::new(RefCell::new(node)) }
    }

    pub fn group(children: Vec<NodeHandle>) -> Self {
        let mut node = Node::new(NodeKind::Group, Material::default());
        node.children = children;
        Self::new(node)
    }

    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Immutable borrow of the node.
    ///
    /// # Panics
    /// Panics if the node is currently mutably borrowed.
    #[inline]
    pub fn borrow(&self) -> Ref<'_, Node> {
        self.inner.borrow()
    }

    /// Mutable borrow of the node.
    ///
    /// # Panics
    /// Panics if the node is currently borrowed.
    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, Node> {
        self.inner.borrow_mut()
    }

    /// Runs `f` against the node and every descendant, depth-first.
    pub fn for_each_mut(&self, f: &mut impl FnMut(&mut Node)) {
        let children = {
            let mut node = self.borrow_mut();
            f(&mut node);
            node.children.clone()
        };
        for child in &children {
            child.for_each_mut(f);
        }
    }
}

impl PartialEq for NodeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for NodeHandle {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_shared_by_clones() {
        let a = NodeHandle::group(Vec::new());
        let b = NodeHandle::group(Vec::new());
        assert_ne!(a.id(), b.id());
        assert_eq!(a.clone(), a);
    }

    #[test]
    fn mutation_is_visible_through_clones() {
        let a = NodeHandle::group(Vec::new());
        let alias = a.clone();
        alias.borrow_mut().transform.position = Vec3::X;
        assert_eq!(a.borrow().transform.position, Vec3::X);
    }

    #[test]
    fn for_each_mut_reaches_descendants() {
        let leaf = NodeHandle::group(Vec::new());
        let root = NodeHandle::group(vec![NodeHandle::group(vec![leaf.clone()])]);
        root.for_each_mut(&mut |n| n.visible = false);
        assert!(!leaf.borrow().visible);
    }

    #[test]
    fn transform_applies_scale_before_translation() {
        let t = Transform { position: Vec3::X, scale: Vec3::splat(2.0), ..Transform::IDENTITY };
        assert_eq!(t.matrix().transform_point3(Vec3::Y), Vec3::new(1.0, 2.0, 0.0));
    }
}
