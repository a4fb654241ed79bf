//! Component Manager - registration and the per-tick scheduling pass.
//!
//! The manager owns the [`ComponentTree`] and a flat registry of component
//! ids. Initialization walks the tree depth-first:
//!
//! ```text
//! initialize(P):  register P → P.on_mount → initialize(children…) → P.render
//! ```
//!
//! so registration is pre-order while the first render is post-order. Each
//! tick then runs the registry front to back: a component's watches are
//! polled, and if anything marked it dirty it renders exactly once.

use std::fmt;

use tracing::{debug, error, trace, warn};

use super::component::{Component, MountContext, RenderContext};
use super::tree::ComponentTree;
use crate::error::{ConfigError, EngineError, InitializeError, WatchError};
use crate::types::{ComponentId, Invalidation, Lifecycle};

// =============================================================================
// Tick Summary
// =============================================================================

/// What a single [`ComponentManager::tick`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Steady components that were run.
    pub components: usize,
    /// Watch callbacks fired.
    pub effects: usize,
    /// Renders performed.
    pub renders: usize,
}

// =============================================================================
// Component Manager
// =============================================================================

/// Drives a component tree: boots it once, then runs it once per tick.
pub struct ComponentManager {
    tree: ComponentTree,
    registry: Vec<ComponentId>,
    bootstrapped: bool,
    reports: Vec<EngineError>,
}

impl ComponentManager {
    pub fn new(tree: ComponentTree) -> Self {
        Self {
            tree,
            registry: Vec::new(),
            bootstrapped: false,
            reports: Vec::new(),
        }
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// Mutable access to the tree, e.g. to add components before
    /// [`initialize`](Self::initialize)-ing them after boot.
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// Initialize every root in order. Idempotent.
    ///
    /// A root whose subtree is misconfigured is skipped entirely and the
    /// remaining roots still initialize. Ticking starts either way; every
    /// failure is returned and kept in [`reports`](Self::reports).
    pub fn initialize_tree(&mut self) -> Result<(), InitializeError> {
        if self.bootstrapped {
            return Ok(());
        }

        let roots = self.tree.roots().to_vec();
        let failures: Vec<ConfigError> = roots
            .into_iter()
            .filter_map(|root| self.initialize(root).err())
            .collect();

        self.bootstrapped = true;
        debug!(
            registered = self.registry.len(),
            failed = failures.len(),
            "component tree initialized"
        );

        if failures.is_empty() {
            Ok(())
        } else {
            Err(InitializeError { failures })
        }
    }

    /// Initialize the subtree under `id`.
    ///
    /// No-op for a component that was already reached. Otherwise the whole
    /// subtree is validated first; an empty slot, unknown id or cycle aborts
    /// before any hook runs.
    pub fn initialize(&mut self, id: ComponentId) -> Result<(), ConfigError> {
        if matches!(self.tree.lifecycle(id), Some(Lifecycle::Mounting | Lifecycle::Steady)) {
            return Ok(());
        }

        let order = self.tree.preorder(id).inspect_err(|err| {
            error!(root = %id, %err, "aborting initialization of subtree");
            self.reports.push(err.clone().into());
        })?;
        trace!(root = %id, components = order.len(), "initializing subtree");

        self.mount_subtree(id);
        Ok(())
    }

    fn mount_subtree(&mut self, id: ComponentId) {
        let node = &mut self.tree.nodes[id.0];
        if node.lifecycle != Lifecycle::Uninitialized {
            return;
        }
        node.lifecycle = Lifecycle::Mounting;

        self.register_component(id);
        self.mount(id);

        let children: Vec<ComponentId> = self.tree.nodes[id.0].children.iter().flatten().copied().collect();
        for child in children {
            self.mount_subtree(child);
        }

        let node = &mut self.tree.nodes[id.0];
        node.scheduler.schedule(Invalidation::MOUNT);
        self.render(id);
        self.tree.nodes[id.0].lifecycle = Lifecycle::Steady;
    }

    /// Append to the registry. Never deduplicates, never removes.
    pub(crate) fn register_component(&mut self, id: ComponentId) {
        self.registry.push(id);
    }

    fn mount(&mut self, id: ComponentId) {
        let node = &mut self.tree.nodes[id.0];
        let Some(mut component) = node.component.take() else {
            return;
        };

        let mut cx = MountContext {
            id,
            name: node.name,
            scheduler: &node.scheduler,
            watches: &mut node.watches,
            reports: &mut self.reports,
        };
        component.on_mount(&mut cx);

        node.component = Some(component);
        debug!(component = node.name, %id, watches = node.watches.len(), "mounted");
    }

    /// Render `id` with everything that invalidated it, then clear its flag.
    fn render(&mut self, id: ComponentId) {
        let Some(mut component) = self.tree.nodes[id.0].component.take() else {
            return;
        };

        let node = &self.tree.nodes[id.0];
        let cx = RenderContext {
            id,
            cause: node.scheduler.pending(),
            children: &node.children,
            tree: &self.tree,
        };
        component.render(&cx);
        trace!(component = node.name, %id, cause = ?cx.cause, "rendered");

        let node = &mut self.tree.nodes[id.0];
        node.component = Some(component);
        node.scheduler.clear();
    }

    // =========================================================================
    // Scheduling
    // =========================================================================

    /// Run every registered component once, in registration order.
    ///
    /// Does nothing before [`initialize_tree`](Self::initialize_tree).
    pub fn tick(&mut self) -> TickSummary {
        let mut summary = TickSummary::default();
        if !self.bootstrapped {
            return summary;
        }

        for index in 0..self.registry.len() {
            let id = self.registry[index];
            self.run(id, &mut summary);
        }
        summary
    }

    /// Poll the watches of `id` in declaration order, then render once if
    /// anything scheduled it.
    fn run(&mut self, id: ComponentId, summary: &mut TickSummary) {
        let node = &mut self.tree.nodes[id.0];
        if node.lifecycle != Lifecycle::Steady {
            return;
        }
        summary.components += 1;

        let name = node.name;
        let reports = &mut self.reports;
        node.watches.retain_mut(|slot| {
            let watch = &mut slot.watch;
            let outcome = watch.has_changed().and_then(|changed| {
                if changed {
                    watch.consume()?;
                    watch.invoke();
                }
                Ok(changed)
            });

            match outcome {
                Ok(changed) => {
                    if slot.busy {
                        trace!(component = name, %id, member = watch.member(), "watch target released its borrow");
                        slot.busy = false;
                    }
                    if changed {
                        summary.effects += 1;
                        trace!(component = name, %id, member = watch.member(), "effect fired");
                    }
                    true
                }
                Err(err) => {
                    let busy = matches!(err, WatchError::TargetBusy { .. });
                    // Reported once per busy period; retried every tick.
                    if busy && slot.busy {
                        return true;
                    }
                    slot.busy = busy;

                    warn!(component = name, %id, %err, "watch could not be read");
                    // A released target never comes back.
                    let keep = !matches!(err, WatchError::TargetReleased { .. });
                    reports.push(EngineError::Watch {
                        component: id,
                        name,
                        source: err,
                    });
                    keep
                }
            }
        });

        if node.scheduler.is_dirty() {
            self.render(id);
            summary.renders += 1;
        }
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Registered components, in registration order.
    pub fn registry(&self) -> &[ComponentId] {
        &self.registry
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.bootstrapped
    }

    pub fn lifecycle(&self, id: ComponentId) -> Option<Lifecycle> {
        self.tree.lifecycle(id)
    }

    /// Whether `id` will render on the next tick.
    pub fn is_dirty(&self, id: ComponentId) -> Option<bool> {
        self.tree.nodes.get(id.0).map(|node| node.scheduler.is_dirty())
    }

    /// Borrow the component `id` as a `C`.
    pub fn component<C: Component>(&self, id: ComponentId) -> Option<&C> {
        self.tree.get::<C>(id)
    }

    /// Every error reported so far.
    pub fn reports(&self) -> &[EngineError] {
        &self.reports
    }

    /// Drain the reported errors.
    pub fn take_reports(&mut self) -> Vec<EngineError> {
        std::mem::take(&mut self.reports)
    }
}

impl fmt::Debug for ComponentManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentManager")
            .field("tree", &self.tree)
            .field("registry", &self.registry)
            .field("bootstrapped", &self.bootstrapped)
            .field("reports", &self.reports.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::cell::State;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Tracked {
        tag: &'static str,
        log: Log,
        state: Option<State<i32>>,
    }

    impl Tracked {
        fn new(tag: &'static str, log: &Log) -> Self {
            Self {
                tag,
                log: log.clone(),
                state: None,
            }
        }
    }

    impl Component for Tracked {
        fn on_mount(&mut self, cx: &mut MountContext<'_>) {
            self.log.borrow_mut().push(format!("mount {}", self.tag));
            self.state = Some(cx.use_state(0));
        }

        fn render(&mut self, _cx: &RenderContext<'_>) {
            self.log.borrow_mut().push(format!("render {}", self.tag));
        }

        fn name(&self) -> &'static str {
            self.tag
        }
    }

    #[test]
    fn test_tick_before_boot_is_noop() {
        let log = Log::default();
        let mut tree = ComponentTree::new();
        let a = tree.insert(Tracked::new("a", &log));
        tree.add_root(a).unwrap();

        let mut manager = ComponentManager::new(tree);
        assert_eq!(manager.tick(), TickSummary::default());
        assert!(log.borrow().is_empty());
        assert!(manager.registry().is_empty());
    }

    #[test]
    fn test_mount_order_and_render_order_differ() {
        let log = Log::default();
        let mut tree = ComponentTree::new();
        let p = tree.insert(Tracked::new("p", &log));
        let k = tree.insert(Tracked::new("k", &log));
        tree.push_child(p, k).unwrap();
        tree.add_root(p).unwrap();

        let mut manager = ComponentManager::new(tree);
        manager.initialize_tree().unwrap();

        assert_eq!(manager.registry(), &[p, k]);
        assert_eq!(
            *log.borrow(),
            vec!["mount p", "mount k", "render k", "render p"]
        );
        assert_eq!(manager.lifecycle(p), Some(Lifecycle::Steady));
        assert_eq!(manager.is_dirty(p), Some(false));
    }

    #[test]
    fn test_initialize_tree_is_idempotent() {
        let log = Log::default();
        let mut tree = ComponentTree::new();
        let a = tree.insert(Tracked::new("a", &log));
        tree.add_root(a).unwrap();

        let mut manager = ComponentManager::new(tree);
        manager.initialize_tree().unwrap();
        manager.initialize_tree().unwrap();
        manager.initialize(a).unwrap();

        assert_eq!(manager.registry(), &[a]);
        assert_eq!(*log.borrow(), vec!["mount a", "render a"]);
    }

    #[test]
    fn test_state_change_renders_once() {
        let log = Log::default();
        let mut tree = ComponentTree::new();
        let a = tree.insert(Tracked::new("a", &log));
        tree.add_root(a).unwrap();

        let mut manager = ComponentManager::new(tree);
        manager.initialize_tree().unwrap();
        log.borrow_mut().clear();

        let state = manager.component::<Tracked>(a).and_then(|n| n.state.clone()).unwrap();
        state.set(1);
        state.set(2);
        assert_eq!(manager.is_dirty(a), Some(true));

        let summary = manager.tick();
        assert_eq!(summary, TickSummary { components: 1, effects: 0, renders: 1 });
        assert_eq!(*log.borrow(), vec!["render a"]);

        assert_eq!(manager.tick().renders, 0);
    }

    #[test]
    fn test_failed_root_does_not_stop_others() {
        let log = Log::default();
        let mut tree = ComponentTree::new();
        let broken = tree.insert(Tracked::new("broken", &log));
        let healthy = tree.insert(Tracked::new("healthy", &log));
        tree.set_children(broken, [None]).unwrap();
        tree.add_root(broken).unwrap();
        tree.add_root(healthy).unwrap();

        let mut manager = ComponentManager::new(tree);
        let err = manager.initialize_tree().unwrap_err();

        assert_eq!(
            err.failures,
            vec![ConfigError::EmptyChildSlot {
                parent: broken,
                name: "broken",
                slot: 0,
            }]
        );
        assert_eq!(manager.registry(), &[healthy]);
        assert_eq!(manager.lifecycle(broken), Some(Lifecycle::Uninitialized));
        assert_eq!(manager.reports().len(), 1);
        assert!(manager.is_bootstrapped());
        assert_eq!(*log.borrow(), vec!["mount healthy", "render healthy"]);

        assert_eq!(manager.take_reports().len(), 1);
        assert!(manager.reports().is_empty());
    }
}
