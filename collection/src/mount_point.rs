//! Mount point applying patches to live nodes
//!
//! Nodes are created for inserted items, removed for removed ones, and the
//! mount hooks fire around each change so renderers can attach behaviour.

use dataflow::{Lifetime, Patch};
use futures::stream::{Stream, StreamExt};

/// Ordered collection of live UI node handles a [`MountPoint`] renders into.
pub trait NodeContainer {
    type Node;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn node(&self, index: usize) -> Option<&Self::Node>;

    /// Attach `nodes` so that the first one ends up at `index`.
    fn insert_at(&mut self, index: usize, nodes: Vec<Self::Node>);

    /// Detach `count` nodes starting at `index` and hand them back.
    fn remove_range(&mut self, index: usize, count: usize) -> Vec<Self::Node>;
}

impl<N> NodeContainer for Vec<N> {
    type Node = N;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn node(&self, index: usize) -> Option<&N> {
        self.get(index)
    }

    fn insert_at(&mut self, index: usize, nodes: Vec<N>) {
        self.splice(index..index, nodes);
    }

    fn remove_range(&mut self, index: usize, count: usize) -> Vec<N> {
        self.drain(index..index + count).collect()
    }
}

type NodeFactory<T, N> = Box<dyn FnMut(&T, usize) -> N>;
type LifecycleHook<N> = Box<dyn FnMut(&N, usize)>;

/// Applies patches to a live node sequence
///
/// Keeps the container index-aligned with the logical list. Nodes outside
/// a patch's region are never touched, so their state survives edits
/// elsewhere in the list.
pub struct MountPoint<T, C>
where
    C: NodeContainer,
{
    container: C,
    factory: NodeFactory<T, C::Node>,
    after_mount: Vec<LifecycleHook<C::Node>>,
    before_unmount: Vec<LifecycleHook<C::Node>>,
}

impl<T, C> MountPoint<T, C>
where
    C: NodeContainer,
{
    /// `factory` builds the node for an item at its new index.
    pub fn new<F>(container: C, factory: F) -> Self
    where
        F: FnMut(&T, usize) -> C::Node + 'static,
    {
        Self {
            container,
            factory: Box::new(factory),
            after_mount: Vec::new(),
            before_unmount: Vec::new(),
        }
    }

    /// Called once per created node, after it is attached at its final index.
    pub fn after_mount<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&C::Node, usize) + 'static,
    {
        self.after_mount.push(Box::new(hook));
        self
    }

    /// Called once per removed node with its former index, while still attached.
    pub fn before_unmount<H>(mut self, hook: H) -> Self
    where
        H: FnMut(&C::Node, usize) + 'static,
    {
        self.before_unmount.push(Box::new(hook));
        self
    }

    /// Apply one patch.
    ///
    /// The patch must be in the index space this mount point currently
    /// shows; anything else is a desync and asserts in debug builds.
    pub fn apply(&mut self, patch: Patch<T>) {
        let Patch {
            start_index,
            replaced_items,
            removed_count,
        } = patch;
        debug_assert!(
            start_index + removed_count <= self.container.len(),
            "patch at {} removing {} does not fit {} mounted nodes",
            start_index,
            removed_count,
            self.container.len()
        );

        if removed_count > 0 {
            for offset in 0..removed_count {
                let index = start_index + offset;
                if let Some(node) = self.container.node(index) {
                    for hook in &mut self.before_unmount {
                        hook(node, index);
                    }
                }
            }
            self.container.remove_range(start_index, removed_count);
        }

        if !replaced_items.is_empty() {
            let nodes: Vec<C::Node> = replaced_items
                .iter()
                .enumerate()
                .map(|(offset, item)| (self.factory)(item, start_index + offset))
                .collect();
            let inserted = nodes.len();
            self.container.insert_at(start_index, nodes);

            for offset in 0..inserted {
                let index = start_index + offset;
                if let Some(node) = self.container.node(index) {
                    for hook in &mut self.after_mount {
                        hook(node, index);
                    }
                }
            }
        }

        log::debug!(
            "mount point applied patch at {start_index}: -{removed_count} +{}, {} node(s) mounted",
            replaced_items.len(),
            self.container.len()
        );
    }

    /// Apply patches in arrival order until the stream ends or `lifetime` is cancelled.
    ///
    /// Returns the number of patches applied.
    pub async fn run<S>(&mut self, patches: S, lifetime: &Lifetime) -> usize
    where
        S: Stream<Item = Patch<T>>,
    {
        let mut patches = std::pin::pin!(lifetime.bind_stream(patches));
        let mut applied = 0;
        while let Some(patch) = patches.next().await {
            self.apply(patch);
            applied += 1;
        }
        log::debug!("mount point stopped after {applied} patch(es)");
        applied
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn into_container(self) -> C {
        self.container
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }
}
