//! Named event subscription for stateful objects.

use std::{fmt::Debug, hash::Hash, sync::Arc};

use dashmap::DashMap;

/// Callback registered on a [`Notifier`].
pub type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// An event that can be published through a [`Notifier`].
pub trait Event {
    /// Key handlers are registered under, usually a fieldless enum naming the event.
    type Kind: Eq + Hash + Clone + Debug + Send + Sync;

    fn kind(&self) -> Self::Kind;
}

/// # Notifier
///
/// Every instance keeps its own registry, which stays empty until the first
/// [`on`](Notifier::on). Handlers for one kind fire in registration order and
/// duplicated registrations all fire.
pub struct Notifier<E: Event> {
    registry: DashMap<E::Kind, Vec<Handler<E>>>,
}

impl<E: Event> Default for Notifier<E> {
    fn default() -> Self {
        Self {
            registry: DashMap::new(),
        }
    }
}

impl<E: Event> Notifier<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`.
    pub fn on(&self, kind: E::Kind, handler: Handler<E>) {
        self.registry.entry(kind).or_default().push(handler);
    }

    /// Register a closure for `kind`, returning the handle [`off`](Notifier::off) expects.
    pub fn on_fn<F>(&self, kind: E::Kind, f: F) -> Handler<E>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let handler: Handler<E> = Arc::new(f);
        self.on(kind, handler.clone());
        handler
    }

    /// Remove the first registration of `handler` for `kind`.
    ///
    /// Unknown kinds and handlers that were never registered are ignored.
    pub fn off(&self, kind: &E::Kind, handler: &Handler<E>) {
        let Some(mut handlers) = self.registry.get_mut(kind) else {
            return;
        };
        if let Some(position) = handlers.iter().position(|el| Arc::ptr_eq(el, handler)) {
            handlers.remove(position);
        }
    }

    /// Invoke every handler registered for the event's kind.
    ///
    /// Handlers are snapshotted first, so a handler may call `on`/`off` on this
    /// notifier; the change applies from the next emit.
    pub fn emit(&self, event: &E) {
        let kind = event.kind();
        let handlers = match self.registry.get(&kind) {
            Some(handlers) => handlers.value().clone(),
            None => return,
        };
        tracing::trace!("Emitting {kind:?} to {} handler(s)", handlers.len());
        for handler in handlers {
            handler(event);
        }
    }

    pub fn listener_count(&self, kind: &E::Kind) -> usize {
        self.registry.get(kind).map(|el| el.len()).unwrap_or_default()
    }

    /// Drop every registration.
    pub fn clear(&self) {
        self.registry.clear();
    }
}
