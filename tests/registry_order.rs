//! Registration order over generated trees.

use std::collections::HashMap;

use proptest::prelude::*;
use proptest::sample::Index;

use reactive_tick::{Component, ComponentId, ComponentManager, ComponentTree, MountContext, RenderContext};

struct Leaf;

impl Component for Leaf {
    fn on_mount(&mut self, _cx: &mut MountContext<'_>) {}
    fn render(&mut self, _cx: &RenderContext<'_>) {}
}

/// Node `i + 1` hangs under an earlier node, or starts a new root when `None`.
fn build(shape: &[Option<Index>]) -> (ComponentTree, HashMap<ComponentId, ComponentId>) {
    let mut tree = ComponentTree::new();
    let mut parents = HashMap::new();

    let first = tree.insert(Leaf);
    tree.add_root(first).unwrap();
    let mut ids = vec![first];

    for choice in shape {
        let id = tree.insert(Leaf);
        match choice {
            Some(index) => {
                let parent = ids[index.index(ids.len())];
                tree.push_child(parent, id).unwrap();
                parents.insert(id, parent);
            }
            None => tree.add_root(id).unwrap(),
        }
        ids.push(id);
    }
    (tree, parents)
}

proptest! {
    #[test]
    fn test_ancestors_register_before_descendants(shape in prop::collection::vec(any::<Option<Index>>(), 0..48)) {
        let (tree, parents) = build(&shape);
        let mut expected = Vec::new();
        for root in tree.roots() {
            expected.extend(tree.preorder(*root).unwrap());
        }

        let mut manager = ComponentManager::new(tree);
        manager.initialize_tree().unwrap();

        let registry = manager.registry();
        prop_assert_eq!(registry, expected.as_slice());
        prop_assert_eq!(registry.len(), shape.len() + 1);

        let position: HashMap<ComponentId, usize> =
            registry.iter().enumerate().map(|(i, id)| (*id, i)).collect();
        for (child, parent) in &parents {
            prop_assert!(position[parent] < position[child]);
        }
    }
}
