//! Component Tree - arena of component nodes.
//!
//! Components are stored by value in a flat arena and addressed by
//! [`ComponentId`]. Each node keeps its ordered child slots; the tree keeps
//! the ordered roots. Slots are `Option` so that a configuration with a hole
//! in it can be represented, and rejected, before boot.
//!
//! ```text
//! roots: [#0]
//! #0 App    children: [Some(#1), Some(#2)]
//! #1 Header children: []
//! #2 Body   children: [Some(#3)]
//! #3 Label  children: []
//!
//! preorder(#0) = [#0, #1, #2, #3]
//! ```

use std::collections::HashSet;
use std::fmt;

use super::component::Component;
use crate::cell::Scheduler;
use crate::error::ConfigError;
use crate::types::{ComponentId, Lifecycle};
use crate::watch::Watch;

// =============================================================================
// Node
// =============================================================================

/// Arena slot: the component plus the runtime state the engine keeps for it.
pub(crate) struct Node {
    /// Taken out while one of the component's hooks runs.
    pub(crate) component: Option<Box<dyn Component>>,
    pub(crate) name: &'static str,
    pub(crate) children: Vec<Option<ComponentId>>,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) scheduler: Scheduler,
    pub(crate) watches: Vec<WatchSlot>,
}

/// A registered watch and whether its last poll found the target borrowed.
pub(crate) struct WatchSlot {
    pub(crate) watch: Box<dyn Watch>,
    pub(crate) busy: bool,
}

impl WatchSlot {
    pub(crate) fn new(watch: Box<dyn Watch>) -> Self {
        Self { watch, busy: false }
    }
}

// =============================================================================
// Component Tree
// =============================================================================

/// Statically configured component tree.
#[derive(Default)]
pub struct ComponentTree {
    pub(crate) nodes: Vec<Node>,
    roots: Vec<ComponentId>,
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component to the arena. It takes part in the tree once it is a
    /// root or sits in some parent's child slots.
    pub fn insert<C: Component>(&mut self, component: C) -> ComponentId {
        let id = ComponentId(self.nodes.len());
        let name = component.name();
        self.nodes.push(Node {
            component: Some(Box::new(component)),
            name,
            children: Vec::new(),
            lifecycle: Lifecycle::Uninitialized,
            scheduler: Scheduler::new(),
            watches: Vec::new(),
        });
        id
    }

    /// Replace the child slots of `parent`.
    ///
    /// Slot contents are checked when the tree is initialized, not here.
    pub fn set_children(
        &mut self,
        parent: ComponentId,
        slots: impl IntoIterator<Item = Option<ComponentId>>,
    ) -> Result<(), ConfigError> {
        let node = self.node_mut(parent)?;
        node.children = slots.into_iter().collect();
        Ok(())
    }

    /// Append `child` to the child slots of `parent`.
    pub fn push_child(&mut self, parent: ComponentId, child: ComponentId) -> Result<(), ConfigError> {
        self.node_mut(parent)?.children.push(Some(child));
        Ok(())
    }

    /// Append a top-level component.
    pub fn add_root(&mut self, id: ComponentId) -> Result<(), ConfigError> {
        if !self.contains(id) {
            return Err(ConfigError::UnknownComponent(id));
        }
        self.roots.push(id);
        Ok(())
    }

    pub fn roots(&self) -> &[ComponentId] {
        &self.roots
    }

    /// Child slots of `id` (empty for unknown ids).
    pub fn children(&self, id: ComponentId) -> &[Option<ComponentId>] {
        self.nodes
            .get(id.0)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Diagnostic name of `id`.
    pub fn name(&self, id: ComponentId) -> Option<&'static str> {
        self.nodes.get(id.0).map(|node| node.name)
    }

    /// Borrow the component `id` as a `C`.
    ///
    /// Returns `None` for the component whose hook is currently running.
    pub fn get<C: Component>(&self, id: ComponentId) -> Option<&C> {
        self.nodes.get(id.0)?.component.as_deref()?.downcast_ref::<C>()
    }

    /// Mutably borrow the component `id` as a `C`.
    pub fn get_mut<C: Component>(&mut self, id: ComponentId) -> Option<&mut C> {
        self.nodes.get_mut(id.0)?.component.as_deref_mut()?.downcast_mut::<C>()
    }

    pub(crate) fn lifecycle(&self, id: ComponentId) -> Option<Lifecycle> {
        self.nodes.get(id.0).map(|node| node.lifecycle)
    }

    fn node_mut(&mut self, id: ComponentId) -> Result<&mut Node, ConfigError> {
        self.nodes.get_mut(id.0).ok_or(ConfigError::UnknownComponent(id))
    }

    // =========================================================================
    // Flattening
    // =========================================================================

    /// Depth-first pre-order of the subtree under `root`.
    ///
    /// This is the order in which initialization registers components, so a
    /// component always precedes its descendants. A node shared by several
    /// parents appears once, at its first occurrence.
    ///
    /// Fails on the first empty slot, unknown id or cycle.
    pub fn preorder(&self, root: ComponentId) -> Result<Vec<ComponentId>, ConfigError> {
        let mut order = Vec::new();
        let mut seen = HashSet::new();
        let mut path = Vec::new();
        self.visit(root, &mut path, &mut seen, &mut order)?;
        Ok(order)
    }

    fn visit(
        &self,
        id: ComponentId,
        path: &mut Vec<ComponentId>,
        seen: &mut HashSet<ComponentId>,
        order: &mut Vec<ComponentId>,
    ) -> Result<(), ConfigError> {
        let node = self.nodes.get(id.0).ok_or(ConfigError::UnknownComponent(id))?;
        if path.contains(&id) {
            return Err(ConfigError::CyclicChildren { id, name: node.name });
        }
        if !seen.insert(id) {
            return Ok(());
        }

        order.push(id);
        path.push(id);
        for (slot, child) in node.children.iter().enumerate() {
            let child = child.ok_or(ConfigError::EmptyChildSlot {
                parent: id,
                name: node.name,
                slot,
            })?;
            self.visit(child, path, seen, order)?;
        }
        path.pop();
        Ok(())
    }
}

impl fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentTree")
            .field("nodes", &self.nodes.iter().map(|node| node.name).collect::<Vec<_>>())
            .field("roots", &self.roots)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MountContext, RenderContext};

    struct Leaf(u8);

    impl Component for Leaf {
        fn on_mount(&mut self, _cx: &mut MountContext<'_>) {}
        fn render(&mut self, _cx: &RenderContext<'_>) {}
    }

    fn tree_of(count: u8) -> (ComponentTree, Vec<ComponentId>) {
        let mut tree = ComponentTree::new();
        let ids = (0..count).map(|n| tree.insert(Leaf(n))).collect();
        (tree, ids)
    }

    #[test]
    fn test_insert_and_get() {
        let (mut tree, ids) = tree_of(2);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.name(ids[1]), Some("Leaf"));
        assert_eq!(tree.get::<Leaf>(ids[1]).map(|l| l.0), Some(1));

        if let Some(leaf) = tree.get_mut::<Leaf>(ids[0]) {
            leaf.0 = 9;
        }
        assert_eq!(tree.get::<Leaf>(ids[0]).map(|l| l.0), Some(9));
    }

    #[test]
    fn test_preorder_is_depth_first() {
        let (mut tree, ids) = tree_of(5);
        tree.set_children(ids[0], [Some(ids[1]), Some(ids[3])]).unwrap();
        tree.set_children(ids[1], [Some(ids[2])]).unwrap();
        tree.push_child(ids[3], ids[4]).unwrap();

        assert_eq!(
            tree.preorder(ids[0]).unwrap(),
            vec![ids[0], ids[1], ids[2], ids[3], ids[4]]
        );
    }

    #[test]
    fn test_shared_child_listed_once() {
        let (mut tree, ids) = tree_of(3);
        tree.set_children(ids[0], [Some(ids[1]), Some(ids[2])]).unwrap();
        tree.set_children(ids[1], [Some(ids[2])]).unwrap();

        assert_eq!(tree.preorder(ids[0]).unwrap(), vec![ids[0], ids[1], ids[2]]);
    }

    #[test]
    fn test_empty_slot_is_reported() {
        let (mut tree, ids) = tree_of(2);
        tree.set_children(ids[0], [Some(ids[1]), None]).unwrap();

        assert_eq!(
            tree.preorder(ids[0]),
            Err(ConfigError::EmptyChildSlot {
                parent: ids[0],
                name: "Leaf",
                slot: 1,
            })
        );
    }

    #[test]
    fn test_cycle_is_reported() {
        let (mut tree, ids) = tree_of(2);
        tree.push_child(ids[0], ids[1]).unwrap();
        tree.push_child(ids[1], ids[0]).unwrap();

        assert!(matches!(
            tree.preorder(ids[0]),
            Err(ConfigError::CyclicChildren { id, .. }) if id == ids[0]
        ));
    }

    #[test]
    fn test_unknown_ids() {
        let (mut tree, ids) = tree_of(1);
        let stranger = ComponentId(42);

        assert_eq!(tree.add_root(stranger), Err(ConfigError::UnknownComponent(stranger)));
        assert_eq!(tree.push_child(stranger, ids[0]), Err(ConfigError::UnknownComponent(stranger)));

        tree.push_child(ids[0], stranger).unwrap();
        assert_eq!(tree.preorder(ids[0]), Err(ConfigError::UnknownComponent(stranger)));
        assert!(tree.children(stranger).is_empty());
    }
}
