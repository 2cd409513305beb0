use std::any::Any;
use std::sync::Arc;

/// A change listener receives the previous and the new value of a watched object
pub type ChangeListener<V> = Arc<dyn Fn(&V, &V) + Send + Sync + 'static>;

/// The listener every entry starts out with
pub(crate) fn noop<V: 'static>() -> ChangeListener<V> { Arc::new(|_: &V, _: &V| {}) }

/// Trait for types that can be resolved into a change listener.
///
/// Returns `None` when the value is not invocable, which `on_change` reports
/// as [`WatchError::CallbackNotAFunction`](crate::WatchError::CallbackNotAFunction).
pub trait IntoChangeListener<V> {
    fn into_change_listener(self) -> Option<ChangeListener<V>>;
}

// Implementations for converting closures to ChangeListener<V>
impl<F, V> IntoChangeListener<V> for F
where F: Fn(&V, &V) + Send + Sync + 'static
{
    fn into_change_listener(self) -> Option<ChangeListener<V>> { Some(Arc::new(self)) }
}

impl<V> IntoChangeListener<V> for ChangeListener<V> {
    fn into_change_listener(self) -> Option<ChangeListener<V>> { Some(self) }
}

/// An absent callback is not a function
impl<F, V> IntoChangeListener<V> for Option<F>
where F: IntoChangeListener<V>
{
    fn into_change_listener(self) -> Option<ChangeListener<V>> { self.and_then(IntoChangeListener::into_change_listener) }
}

/// Type-erased callbacks, for hosts that only know the callback's type at runtime.
/// Only a boxed [`ChangeListener<V>`] is invocable.
impl<V: 'static> IntoChangeListener<V> for Box<dyn Any + Send + Sync> {
    fn into_change_listener(self) -> Option<ChangeListener<V>> { self.downcast::<ChangeListener<V>>().ok().map(|listener| *listener) }
}

// IntoChangeListener implementation for std::sync::mpsc channels
impl<V: Clone + Send + 'static> IntoChangeListener<V> for std::sync::mpsc::Sender<(V, V)> {
    fn into_change_listener(self) -> Option<ChangeListener<V>> {
        Some(Arc::new(move |old: &V, new: &V| {
            let _ = self.send((old.clone(), new.clone()));
        }))
    }
}

// IntoChangeListener implementation for tokio channels
#[cfg(feature = "tokio")]
impl<V: Clone + Send + 'static> IntoChangeListener<V> for tokio::sync::mpsc::UnboundedSender<(V, V)> {
    fn into_change_listener(self) -> Option<ChangeListener<V>> {
        Some(Arc::new(move |old: &V, new: &V| {
            let _ = self.send((old.clone(), new.clone()));
        }))
    }
}
