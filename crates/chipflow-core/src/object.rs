//! Object identity and the widget tree.
//!
//! Every widget owns an [`ObjectBase`]. Creating one registers a node in the
//! process-wide [`ObjectRegistry`]; dropping it removes the node and anything
//! still attached below it. The node's [`ObjectId`] is what layout passes key
//! their slot tables by, and the parent links let the chips container keep
//! its children in display order for tree dumps.

use std::any::Any;
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};

use crate::error::{ObjectError, ObjectResult};
use crate::logging::targets;

new_key_type! {
    /// Handle to a node in the [`ObjectRegistry`].
    ///
    /// Ids are generational: once a node is removed its id never resolves
    /// again, even if the slot is reused.
    pub struct ObjectId;
}

struct Node {
    name: String,
    type_name: &'static str,
    parent: Option<ObjectId>,
    /// Display order.
    children: Vec<ObjectId>,
}

#[derive(Default)]
struct Tree {
    nodes: SlotMap<ObjectId, Node>,
}

impl Tree {
    fn node(&self, id: ObjectId) -> ObjectResult<&Node> {
        self.nodes.get(id).ok_or(ObjectError::InvalidObjectId)
    }

    fn node_mut(&mut self, id: ObjectId) -> ObjectResult<&mut Node> {
        self.nodes.get_mut(id).ok_or(ObjectError::InvalidObjectId)
    }

    /// Unlink `id` from its parent's child list, if it has a parent.
    fn detach(&mut self, id: ObjectId) {
        let parent = self.nodes.get_mut(id).and_then(|node| node.parent.take());
        if let Some(node) = parent.and_then(|p| self.nodes.get_mut(p)) {
            node.children.retain(|&child| child != id);
        }
    }

    /// `true` if walking up from `start` reaches `candidate`.
    fn has_ancestor(&self, start: ObjectId, candidate: ObjectId) -> bool {
        std::iter::successors(Some(start), |&id| self.nodes.get(id).and_then(|n| n.parent))
            .any(|id| id == candidate)
    }

    fn attach(&mut self, id: ObjectId, parent: Option<ObjectId>, index: usize) -> ObjectResult<()> {
        self.node(id)?;
        if let Some(parent) = parent {
            self.node(parent)?;
            if self.has_ancestor(parent, id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        self.detach(id);
        if let Some(parent) = parent {
            let siblings = &mut self.node_mut(parent)?.children;
            siblings.insert(index.min(siblings.len()), id);
            self.node_mut(id)?.parent = Some(parent);
        }
        Ok(())
    }

    fn remove(&mut self, id: ObjectId) -> ObjectResult<usize> {
        self.node(id)?;
        self.detach(id);

        let mut pending = vec![id];
        let mut removed = 0;
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(next) {
                pending.extend(node.children);
                removed += 1;
            }
        }
        Ok(removed)
    }
}

/// Process-wide store of object nodes.
///
/// All methods take `&self`; the tree sits behind a `parking_lot` lock.
#[derive(Default)]
pub struct ObjectRegistry {
    tree: RwLock<Tree>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a root node for an object of type `T`.
    pub fn register<T: Object>(&self) -> ObjectId {
        let type_name = std::any::type_name::<T>();
        let id = self.tree.write().nodes.insert(Node {
            name: String::new(),
            type_name,
            parent: None,
            children: Vec::new(),
        });
        tracing::trace!(target: targets::OBJECT, ?id, type_name, "registered");
        id
    }

    /// Remove a node together with everything attached below it.
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        let removed = self.tree.write().remove(id)?;
        tracing::trace!(target: targets::OBJECT, ?id, removed, "destroyed");
        Ok(())
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.tree.read().nodes.contains_key(id)
    }

    /// Move `id` to the end of `parent`'s children, or make it a root.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.set_parent_at(id, parent, usize::MAX)
    }

    /// Move `id` to position `index` among `parent`'s children. The index is
    /// clamped to the number of children.
    pub fn set_parent_at(
        &self,
        id: ObjectId,
        parent: Option<ObjectId>,
        index: usize,
    ) -> ObjectResult<()> {
        self.tree.write().attach(id, parent, index)
    }

    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        Ok(self.tree.read().node(id)?.parent)
    }

    /// Children of `id` in display order.
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        Ok(self.tree.read().node(id)?.children.clone())
    }

    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        Ok(self.tree.read().node(id)?.name.clone())
    }

    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.tree.write().node_mut(id)?.name = name;
        Ok(())
    }

    /// Full type path of the object that registered `id`.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        Ok(self.tree.read().node(id)?.type_name)
    }

    /// Nodes without a parent.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.tree
            .read()
            .nodes
            .iter()
            .filter_map(|(id, node)| node.parent.is_none().then_some(id))
            .collect()
    }
}

static GLOBAL_REGISTRY: OnceLock<ObjectRegistry> = OnceLock::new();

/// The registry every [`ObjectBase`] lives in. Created on first use.
pub fn global_registry() -> &'static ObjectRegistry {
    GLOBAL_REGISTRY.get_or_init(ObjectRegistry::new)
}

/// Anything with a node in the registry.
///
/// # Example
///
/// ```
/// use chipflow_core::{Object, ObjectBase, ObjectId};
///
/// struct Token {
///     base: ObjectBase,
/// }
///
/// impl Object for Token {
///     fn object_id(&self) -> ObjectId {
///         self.base.id()
///     }
/// }
///
/// let token = Token { base: ObjectBase::new::<Token>() };
/// assert!(chipflow_core::global_registry().contains(token.object_id()));
/// ```
pub trait Object: Any + Send + Sync {
    fn object_id(&self) -> ObjectId;
}

/// Owns one registry node for the lifetime of a widget.
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Register a node for an object of type `T`.
    pub fn new<T: Object>() -> Self {
        Self {
            id: global_registry().register::<T>(),
        }
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The node's name, or an empty string once the node is gone.
    pub fn name(&self) -> String {
        global_registry().object_name(self.id).unwrap_or_default()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        // The node only disappears if a parent was dropped first.
        let _ = global_registry().set_object_name(self.id, name.into());
    }

    pub fn parent(&self) -> Option<ObjectId> {
        global_registry().parent(self.id).ok().flatten()
    }

    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry().set_parent(self.id, parent)
    }

    pub fn set_parent_at(&self, parent: Option<ObjectId>, index: usize) -> ObjectResult<()> {
        global_registry().set_parent_at(self.id, parent, index)
    }

    pub fn children(&self) -> Vec<ObjectId> {
        global_registry().children(self.id).unwrap_or_default()
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        // Already gone if a parent was dropped first.
        let _ = global_registry().destroy(self.id);
    }
}

static_assertions::assert_impl_all!(ObjectBase: Send, Sync);
static_assertions::assert_impl_all!(ObjectRegistry: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    struct Node(ObjectBase);

    impl Node {
        fn named(name: &str) -> Self {
            let node = Self(ObjectBase::new::<Self>());
            node.0.set_name(name);
            node
        }
    }

    impl Object for Node {
        fn object_id(&self) -> ObjectId {
            self.0.id()
        }
    }

    #[test]
    fn test_node_lives_as_long_as_its_base() {
        let id = {
            let chip = Node::named("chip");
            assert!(global_registry().contains(chip.object_id()));
            assert_eq!(chip.0.name(), "chip");
            chip.object_id()
        };
        assert!(!global_registry().contains(id));
        assert_eq!(
            global_registry().object_name(id),
            Err(ObjectError::InvalidObjectId)
        );
    }

    #[test]
    fn test_insert_before_trailing_children() {
        let container = Node::named("container");
        let input = Node::named("input");
        let icon = Node::named("icon");
        input.0.set_parent(Some(container.object_id())).unwrap();
        icon.0.set_parent(Some(container.object_id())).unwrap();

        let first = Node::named("first");
        first.0.set_parent_at(Some(container.object_id()), 0).unwrap();
        let second = Node::named("second");
        second.0.set_parent_at(Some(container.object_id()), 1).unwrap();

        assert_eq!(
            container.0.children(),
            vec![
                first.object_id(),
                second.object_id(),
                input.object_id(),
                icon.object_id(),
            ]
        );
        assert_eq!(second.0.parent(), Some(container.object_id()));
    }

    #[test]
    fn test_reparent_moves_node() {
        let a = Node::named("a");
        let b = Node::named("b");
        let child = Node::named("child");

        child.0.set_parent(Some(a.object_id())).unwrap();
        child.0.set_parent_at(Some(b.object_id()), 99).unwrap();

        assert!(a.0.children().is_empty());
        assert_eq!(b.0.children(), vec![child.object_id()]);

        child.0.set_parent(None).unwrap();
        assert_eq!(child.0.parent(), None);
        assert!(global_registry().root_objects().contains(&child.object_id()));
    }

    #[test]
    fn test_cycles_rejected() {
        let outer = Node::named("outer");
        let inner = Node::named("inner");
        inner.0.set_parent(Some(outer.object_id())).unwrap();

        assert_eq!(
            outer.0.set_parent(Some(inner.object_id())),
            Err(ObjectError::CircularParentage)
        );
        assert_eq!(
            outer.0.set_parent(Some(outer.object_id())),
            Err(ObjectError::CircularParentage)
        );
    }

    #[test]
    fn test_dropping_child_unlinks_it() {
        let container = Node::named("container");
        {
            let chip = Node::named("chip");
            chip.0.set_parent(Some(container.object_id())).unwrap();
            assert_eq!(container.0.children().len(), 1);
        }
        assert!(container.0.children().is_empty());
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let registry = ObjectRegistry::new();
        let root = registry.register::<Node>();
        let mid = registry.register::<Node>();
        let leaf = registry.register::<Node>();
        registry.set_parent(mid, Some(root)).unwrap();
        registry.set_parent(leaf, Some(mid)).unwrap();

        registry.destroy(root).unwrap();

        assert!(!registry.contains(mid));
        assert!(!registry.contains(leaf));
        assert!(registry.root_objects().is_empty());
    }

    #[test]
    fn test_type_name_recorded() {
        let node = Node::named("typed");
        let type_name = global_registry().type_name(node.object_id()).unwrap();
        assert!(type_name.ends_with("Node"));
    }
}
