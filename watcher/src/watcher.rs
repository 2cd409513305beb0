use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Display;
use std::hash::Hash;
use std::sync::{Arc, RwLock, Weak};

use tracing::{debug, trace};

use crate::error::WatchError;
use crate::listener::{self, ChangeListener, IntoChangeListener};

/// A watched object: the current snapshot and the listener to call when it is replaced
struct Entry<V> {
    // shared so it can be cloned out of the map after the lock is released
    value: Arc<V>,
    listener: ChangeListener<V>,
}

struct Inner<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
}

/// A registry of named objects which calls a listener whenever one of them is replaced.
///
/// Values go in and come out as copies (via [`Clone`]), so the only way to change
/// a watched object is [`Watcher::set`], which always notifies.
/// Cloning a `Watcher` yields another handle to the same registry.
/// Listeners that need to reach their own registry should hold a [`WeakWatcher`],
/// since a strong handle stored in a listener keeps the registry alive forever.
pub struct Watcher<K, V>(Arc<Inner<K, V>>);

/// A handle that does not keep the registry alive
pub struct WeakWatcher<K, V>(Weak<Inner<K, V>>);

impl<K, V> Clone for Watcher<K, V> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<K, V> Clone for WeakWatcher<K, V> {
    fn clone(&self) -> Self { Self(self.0.clone()) }
}

impl<K, V> Watcher<K, V> {
    pub fn downgrade(&self) -> WeakWatcher<K, V> { WeakWatcher(Arc::downgrade(&self.0)) }
}

impl<K, V> WeakWatcher<K, V> {
    /// Returns `None` once every `Watcher` handle to the registry has been dropped
    pub fn upgrade(&self) -> Option<Watcher<K, V>> { self.0.upgrade().map(Watcher) }
}

impl<K, V> std::fmt::Debug for Watcher<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watcher").field("watched", &self.0.entries.read().expect("watch map lock is poisoned").len()).finish()
    }
}

impl<K, V> Default for Watcher<K, V>
where
    K: Eq + Hash + Display,
    V: Clone + 'static,
{
    fn default() -> Self { Self::new() }
}

impl<K, V> Watcher<K, V>
where
    K: Eq + Hash + Display,
    V: Clone + 'static,
{
    /// Creates an empty registry, independent of every other registry
    pub fn new() -> Self { Self(Arc::new(Inner { entries: RwLock::new(HashMap::new()) })) }

    /// Starts watching a copy of `value` under `id`, with a listener that does nothing.
    pub fn watch(&self, id: impl Into<K>, value: &V) -> Result<(), WatchError> {
        let id = id.into();
        let value = Arc::new(value.clone());
        let mut entries = self.0.entries.write().expect("watch map lock is poisoned");
        if entries.contains_key(&id) {
            debug!("Refusing to watch {id}: already watched");
            return Err(WatchError::already_watched(&id));
        }
        debug!("Watching {id}");
        entries.insert(id, Entry { value, listener: listener::noop() });
        Ok(())
    }

    /// Stops watching `id`, dropping its value and its listener
    pub fn unwatch<Q>(&self, id: &Q) -> Result<(), WatchError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let removed = self.0.entries.write().expect("watch map lock is poisoned").remove(id);
        match removed {
            Some(_) => {
                debug!("Unwatched {id}");
                Ok(())
            }
            None => Err(WatchError::not_watched(id)),
        }
    }

    /// Returns a copy of the current value of `id`.
    /// Mutating the copy has no effect on the registry.
    pub fn get<Q>(&self, id: &Q) -> Result<V, WatchError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        trace!("Getting {id}");
        let value = self.0.entries.read().expect("watch map lock is poisoned").get(id).map(|entry| entry.value.clone());
        match value {
            Some(value) => Ok(V::clone(&value)),
            None => Err(WatchError::not_watched(id)),
        }
    }

    /// Replaces the value of `id` with a copy of `value`, then calls the listener of `id`
    /// with the previous and the new value before returning.
    ///
    /// The listener runs without the registry locked, so it may call back into this
    /// registry, including `set` on the same id. Nothing guards against a listener that
    /// keeps doing so. A panic inside the listener unwinds out of `set` after the new
    /// value has been stored.
    pub fn set<Q>(&self, id: &Q, value: &V) -> Result<(), WatchError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
    {
        let stored = Arc::new(value.clone());
        let (old, listener) = {
            let mut entries = self.0.entries.write().expect("watch map lock is poisoned");
            let Some(entry) = entries.get_mut(id) else {
                debug!("Refusing to set {id}: not watched");
                return Err(WatchError::not_watched(id));
            };
            (std::mem::replace(&mut entry.value, stored), entry.listener.clone())
        };

        trace!("Notifying listener of {id}");
        listener(&*old, value);
        Ok(())
    }

    /// Replaces the listener of `id`. Only the most recently registered listener is kept.
    ///
    /// Fails with [`WatchError::CallbackNotAFunction`] if `callback` does not resolve to a
    /// listener, in which case the current listener stays in place.
    /// The replaced listener is dropped after the registry is unlocked.
    pub fn on_change<Q, L>(&self, id: &Q, callback: L) -> Result<(), WatchError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Display + ?Sized,
        L: IntoChangeListener<V>,
    {
        let listener = callback.into_change_listener();
        let _previous = {
            let mut entries = self.0.entries.write().expect("watch map lock is poisoned");
            let entry = entries.get_mut(id).ok_or_else(|| WatchError::not_watched(id))?;
            let Some(listener) = listener else {
                debug!("Rejected listener of {id}: not a function");
                return Err(WatchError::not_a_function(id));
            };
            debug!("Replacing listener of {id}");
            std::mem::replace(&mut entry.listener, listener)
        };
        Ok(())
    }

    /// Stops watching everything
    pub fn reset(&self) {
        // listeners are dropped after the lock is released
        let dropped = std::mem::take(&mut *self.0.entries.write().expect("watch map lock is poisoned"));
        debug!("Reset watcher, dropped {} entries", dropped.len());
    }

    pub fn is_watched<Q>(&self, id: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.entries.read().expect("watch map lock is poisoned").contains_key(id)
    }

    pub fn len(&self) -> usize { self.0.entries.read().expect("watch map lock is poisoned").len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Ids of every watched object, in no particular order
    pub fn ids(&self) -> Vec<K>
    where K: Clone {
        self.0.entries.read().expect("watch map lock is poisoned").keys().cloned().collect()
    }
}
