//! Observable, shared collection of domain objects.

use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, Mutex, RwLock, Weak};

/// A domain object with a stable identity.
///
/// Controllers never rely on where an item lives in memory, only on its key.
pub trait Item: Clone + Send + Sync + 'static {
    /// Identity type.
    type Key: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    /// Stable unique key of this object.
    fn key(&self) -> Self::Key;
}

/// What changed in a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// All items were replaced.
    Replaced,
    /// An item was inserted at the index.
    Inserted { index: usize },
    /// The item at the index was removed.
    Removed { index: usize },
    /// All items were removed.
    Cleared,
    /// Items were changed in place by `update`.
    Updated,
}

type Callback = Arc<dyn Fn(&Change) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

/// Handle for a subscription; unsubscribes when dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: u64,
    subscribers: Weak<Mutex<Subscribers>>,
}

impl Subscription {
    /// Stop receiving notifications.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(subscribers) = self.subscribers.upgrade() {
            if let Ok(mut guard) = subscribers.lock() {
                guard.entries.retain(|(id, _)| *id != self.id);
            }
        }
    }
}

impl Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Ordered, mutable collection of domain objects.
///
/// Clones share the same storage and subscribers. Every mutation notifies the
/// subscribers exactly once, after the write has completed. Callbacks run
/// without any lock held, so they may mutate the collection or drop
/// subscriptions; a callback removed mid-notification still sees the
/// change that was already in flight.
pub struct Collection<T: Item> {
    inner: Arc<RwLock<Vec<T>>>,
    subscribers: Arc<Mutex<Subscribers>>,
}

impl<T: Item> Collection<T> {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self::with_items(Vec::new())
    }

    /// Create a collection with initial items.
    pub fn with_items(items: Vec<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(items)),
            subscribers: Arc::new(Mutex::new(Subscribers::default())),
        }
    }

    // -------------------------------------------------------------------------
    // Item access
    // -------------------------------------------------------------------------

    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.inner.read().ok().and_then(|g| g.get(index).cloned())
    }

    /// Snapshot of all items, in order.
    pub fn items(&self) -> Vec<T> {
        self.inner.read().map(|g| g.clone()).unwrap_or_default()
    }

    /// Up to `count` items starting at `start` (`None` = to the end).
    ///
    /// Out-of-range positions yield an empty or shortened result.
    pub fn take(&self, start: usize, count: Option<usize>) -> Vec<T> {
        self.inner
            .read()
            .map(|g| {
                let start = start.min(g.len());
                let end = match count {
                    Some(count) => start.saturating_add(count).min(g.len()),
                    None => g.len(),
                };
                g[start..end].to_vec()
            })
            .unwrap_or_default()
    }

    pub fn position(&self, key: &T::Key) -> Option<usize> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.iter().position(|item| &item.key() == key))
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.position(key).is_some()
    }

    // -------------------------------------------------------------------------
    // Item mutation
    // -------------------------------------------------------------------------

    /// Set all items.
    pub fn set_items(&self, items: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = items;
        }
        self.notify(Change::Replaced);
    }

    /// Push an item to the end.
    pub fn push(&self, item: T) {
        let index = match self.inner.write() {
            Ok(mut guard) => {
                guard.push(item);
                guard.len() - 1
            }
            Err(_) => return,
        };
        self.notify(Change::Inserted { index });
    }

    /// Insert an item at `index` (clamped to the end).
    pub fn insert(&self, index: usize, item: T) {
        let index = match self.inner.write() {
            Ok(mut guard) => {
                let index = index.min(guard.len());
                guard.insert(index, item);
                index
            }
            Err(_) => return,
        };
        self.notify(Change::Inserted { index });
    }

    /// Remove an item by index.
    pub fn remove(&self, index: usize) -> Option<T> {
        let removed = match self.inner.write() {
            Ok(mut guard) if index < guard.len() => guard.remove(index),
            _ => return None,
        };
        self.notify(Change::Removed { index });
        Some(removed)
    }

    /// Remove the item with the given key.
    pub fn remove_key(&self, key: &T::Key) -> Option<T> {
        let index = self.position(key)?;
        self.remove(index)
    }

    /// Clear all items.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.clear();
        }
        self.notify(Change::Cleared);
    }

    /// Update items with a closure.
    pub fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut Vec<T>),
    {
        if let Ok(mut guard) = self.inner.write() {
            f(&mut *guard);
        }
        self.notify(Change::Updated);
    }

    // -------------------------------------------------------------------------
    // Subscriptions
    // -------------------------------------------------------------------------

    /// Register a change callback. It stays registered while the returned
    /// [`Subscription`] is alive.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn(&Change) + Send + Sync + 'static,
    {
        let id = match self.subscribers.lock() {
            Ok(mut guard) => {
                let id = guard.next_id;
                guard.next_id += 1;
                guard.entries.push((id, Arc::new(callback)));
                id
            }
            Err(_) => u64::MAX,
        };
        Subscription {
            id,
            subscribers: Arc::downgrade(&self.subscribers),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|g| g.entries.len())
            .unwrap_or(0)
    }

    fn notify(&self, change: Change) {
        log::trace!("[collection] {:?}", change);
        let callbacks: Vec<Callback> = match self.subscribers.lock() {
            Ok(guard) => guard.entries.iter().map(|(_, cb)| Arc::clone(cb)).collect(),
            Err(_) => return,
        };
        for callback in callbacks {
            callback(&change);
        }
    }
}

impl<T: Item> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T: Item> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Item + Debug> Debug for Collection<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collection")
            .field("items", &self.items())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

impl<T: Item> From<Vec<T>> for Collection<T> {
    fn from(items: Vec<T>) -> Self {
        Self::with_items(items)
    }
}
