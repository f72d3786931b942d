//! List controller state and reconciliation.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arbor::{ComponentId, Element, Stack, Tree, Widget};

use crate::collection::{Collection, Item, Subscription};
use crate::renderable::RenderableController;

use super::options::ListOptions;

/// Builds one view component from one domain object.
pub type Adapter<T> = Box<dyn Fn(&T) -> Box<dyn Widget>>;

/// Wrap a typed constructor as an [`Adapter`].
pub fn adapter<T, W, F>(f: F) -> Adapter<T>
where
    T: Item,
    W: Widget + 'static,
    F: Fn(&T) -> W + 'static,
{
    Box::new(move |item: &T| -> Box<dyn Widget> { Box::new(f(item)) })
}

/// Keeps a container's children in sync with a windowed slice of a
/// [`Collection`].
///
/// Each visible object gets exactly one view component, keyed by the object's
/// identity. A view survives every update during which its object stays in the
/// window, so component state such as focus is never lost to unrelated list
/// changes. Collection changes only mark the controller dirty; the next
/// [`update`](Self::update) reconciles once against the latest state.
pub struct ListController<T: Item> {
    /// Backing collection (None = nothing to render).
    items: Option<Collection<T>>,
    /// Keeps the dirty flag wired to the collection.
    subscription: Option<Subscription>,
    /// View constructor (None = nothing to render).
    adapter: Option<Adapter<T>>,
    pub(super) options: ListOptions,
    /// Last focused position among the rendered items.
    pub(super) last_focused_index: usize,
    /// Live view per object key.
    views: HashMap<T::Key, ComponentId>,
    pub(super) container: ComponentId,
    content: RenderableController,
    /// Set by collection notifications and setters, cleared by reconciliation.
    dirty: Arc<AtomicBool>,
}

impl<T: Item> ListController<T> {
    /// Create a list in a vertical, focusable stack.
    pub fn new<W, F>(tree: &mut Tree, f: F) -> Self
    where
        W: Widget + 'static,
        F: Fn(&T) -> W + 'static,
    {
        Self::with_container(
            tree,
            Some(adapter(f)),
            Box::new(Stack::column().focusable(true)),
        )
    }

    /// Create a list without an adapter; it renders empty until one is set.
    pub fn without_adapter(tree: &mut Tree) -> Self {
        Self::with_container(tree, None, Box::new(Stack::column().focusable(true)))
    }

    /// Create a list hosted by a custom container component.
    pub fn with_container(
        tree: &mut Tree,
        adapter: Option<Adapter<T>>,
        container: Box<dyn Widget>,
    ) -> Self {
        let container = tree.insert_boxed(container);
        Self {
            items: None,
            subscription: None,
            adapter,
            options: ListOptions::default(),
            last_focused_index: 0,
            views: HashMap::new(),
            container,
            content: RenderableController::with_content_id(container),
            dirty: Arc::new(AtomicBool::new(true)),
        }
    }

    /// The component hosting the rendered items.
    pub fn container(&self) -> ComponentId {
        self.container
    }

    // -------------------------------------------------------------------------
    // Bound state
    // -------------------------------------------------------------------------

    /// The backing collection, if any.
    pub fn items(&self) -> Option<&Collection<T>> {
        self.items.as_ref()
    }

    /// Bind a collection (or unbind with `None`).
    pub fn set_items(&mut self, items: Option<Collection<T>>) {
        self.subscription = items.as_ref().map(|items| {
            let dirty = Arc::clone(&self.dirty);
            items.subscribe(move |_| dirty.store(true, Ordering::SeqCst))
        });
        self.items = items;
        self.mark_dirty();
    }

    pub fn has_adapter(&self) -> bool {
        self.adapter.is_some()
    }

    /// Replace the adapter. Existing views were built by the old adapter, so
    /// they are all released and rebuilt on the next update.
    pub fn set_adapter(&mut self, tree: &mut Tree, adapter: Option<Adapter<T>>) {
        self.release_views(tree);
        self.adapter = adapter;
        self.mark_dirty();
    }

    pub fn options(&self) -> ListOptions {
        self.options
    }

    pub fn set_options(&mut self, options: ListOptions) {
        if !self.options.same_window(&options) {
            self.mark_dirty();
        }
        self.options = options;
    }

    pub fn first_index(&self) -> usize {
        self.options.first_index
    }

    pub fn set_first_index(&mut self, index: usize) {
        if self.options.first_index != index {
            self.options.first_index = index;
            self.mark_dirty();
        }
    }

    pub fn max_items(&self) -> Option<usize> {
        self.options.max_items
    }

    pub fn set_max_items(&mut self, max: Option<usize>) {
        if self.options.max_items != max {
            self.options.max_items = max;
            self.mark_dirty();
        }
    }

    pub fn enable_arrow_key_focus(&self) -> bool {
        self.options.enable_arrow_key_focus
    }

    pub fn set_enable_arrow_key_focus(&mut self, enabled: bool) {
        self.options.enable_arrow_key_focus = enabled;
    }

    pub fn last_focused_index(&self) -> usize {
        self.last_focused_index
    }

    pub fn set_last_focused_index(&mut self, index: usize) {
        self.last_focused_index = index;
    }

    // -------------------------------------------------------------------------
    // Rendered views
    // -------------------------------------------------------------------------

    /// Number of rendered items.
    pub fn len(&self, tree: &Tree) -> usize {
        tree.children(self.container).len()
    }

    pub fn is_empty(&self, tree: &Tree) -> bool {
        self.len(tree) == 0
    }

    /// Rendered item components, in order.
    pub fn views<'t>(&self, tree: &'t Tree) -> &'t [ComponentId] {
        tree.children(self.container)
    }

    /// The live view for an object key, if the object is in the window.
    pub fn view_for(&self, key: &T::Key) -> Option<ComponentId> {
        self.views.get(key).copied()
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    // -------------------------------------------------------------------------
    // Reconciliation
    // -------------------------------------------------------------------------

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Mark the list for reconciliation on the next update.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Reconcile if anything changed since the last pass.
    /// Returns true if a pass ran.
    pub fn update(&mut self, tree: &mut Tree) -> bool {
        if !self.is_dirty() {
            return false;
        }
        self.reconcile(tree);
        true
    }

    /// Rebuild the container's children from the current window, reusing the
    /// view of every object that is still visible.
    pub fn reconcile(&mut self, tree: &mut Tree) {
        self.dirty.store(false, Ordering::SeqCst);

        let (Some(adapter), Some(items)) = (self.adapter.as_ref(), self.items.as_ref()) else {
            log::debug!("[list] no adapter or items, clearing {}", self.container);
            self.release_views(tree);
            tree.replace_children(self.container, Vec::new());
            self.content.refresh(tree);
            return;
        };

        let visible = items.take(self.options.first_index, self.options.max_items);
        let mut stale = std::mem::take(&mut self.views);
        let mut children = Vec::with_capacity(visible.len());
        let mut reused = 0;

        for item in &visible {
            let key = item.key();
            if self.views.contains_key(&key) {
                log::warn!("[list] duplicate key {:?} in visible window, skipping", key);
                continue;
            }
            let id = match stale.remove(&key) {
                Some(id) if tree.contains(id) => {
                    reused += 1;
                    id
                }
                _ => tree.insert_boxed(adapter(item)),
            };
            self.views.insert(key, id);
            children.push(id);
        }

        let created = children.len() - reused;
        tree.replace_children(self.container, children);

        let released = stale.len();
        for (key, id) in stale {
            log::trace!("[list] releasing view {} for {:?}", id, key);
            tree.remove(id);
        }

        log::debug!(
            "[list] reconciled {}: {} visible ({} reused, {} created, {} released)",
            self.container,
            visible.len(),
            reused,
            created,
            released
        );
        self.content.refresh(tree);
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Render the container and keep `callback` for re-renders after each
    /// reconciliation.
    pub fn render(&mut self, tree: &Tree, callback: impl FnMut(Option<Element>) + 'static) {
        self.content.render(tree, callback);
    }

    /// Destroy the container and every view.
    pub fn dispose(mut self, tree: &mut Tree) {
        self.release_views(tree);
        self.content.release(tree);
    }

    fn release_views(&mut self, tree: &mut Tree) {
        for (_, id) in self.views.drain() {
            tree.remove(id);
        }
    }
}

impl<T: Item> std::fmt::Debug for ListController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListController")
            .field("container", &self.container)
            .field("options", &self.options)
            .field("last_focused_index", &self.last_focused_index)
            .field("views", &self.views.len())
            .field("has_items", &self.items.is_some())
            .field("has_adapter", &self.adapter.is_some())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}
