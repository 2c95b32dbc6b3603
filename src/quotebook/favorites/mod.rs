//! # Favorites
//!
//! Favorites are a client-local, ordered set of quotes keyed by id. The whole
//! set is stored as one JSON array of full [`Quote`] objects, so a favorites
//! listing renders without the collection being loaded.
//!
//! ## Layers
//!
//! - [`FavoritesBackend`]: raw text persistence ([`FsBackend`] in production,
//!   [`MemBackend`] in tests).
//! - [`FavoritesStore`]: membership rules, whole-set rewrites and change
//!   notification.
//!
//! ## Failure Semantics
//!
//! The store never returns an error. A missing or malformed document reads as
//! an empty set; an unreadable backend reads as empty and turns mutations into
//! no-ops; a failed write leaves the previous state in place. Every failure is
//! logged with `tracing::warn!`.
//!
//! ## Change Notification
//!
//! Views register with [`FavoritesStore::subscribe`]. After every write that
//! changes the set, each listener is called synchronously with the new set.
//! [`FavoritesStore::refresh`] notifies listeners of changes made through the
//! same storage by another client.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::FavoritesBackend;
pub use fs_backend::FsBackend;
pub use mem_backend::MemBackend;

use crate::model::Quote;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(&[Quote])>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Handle returned by [`FavoritesStore::subscribe`].
#[must_use = "the listener stays registered until unsubscribe() is called"]
pub struct Subscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Subscription {
    /// Removes the listener. Returns false if the store is already gone.
    pub fn unsubscribe(self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let mut listeners = listeners.borrow_mut();
        let before = listeners.entries.len();
        listeners.entries.retain(|(id, _)| *id != self.id);
        listeners.entries.len() != before
    }
}

pub struct FavoritesStore<B: FavoritesBackend> {
    backend: B,
    listeners: Rc<RefCell<Listeners>>,
    last_seen: RefCell<Option<String>>,
}

impl<B: FavoritesBackend> FavoritesStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            listeners: Rc::new(RefCell::new(Listeners::default())),
            last_seen: RefCell::new(None),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All favorites in the order they were added.
    pub fn get_all(&self) -> Vec<Quote> {
        self.load().unwrap_or_default()
    }

    pub fn is_favorited(&self, id: u32) -> bool {
        self.get_all().iter().any(|q| q.id == id)
    }

    /// Appends `quote` unless a favorite with the same id exists.
    pub fn add(&self, quote: &Quote) {
        let Some(mut favorites) = self.load() else {
            return;
        };
        if favorites.iter().any(|q| q.id == quote.id) {
            return;
        }
        favorites.push(quote.clone());
        self.save(&favorites);
    }

    /// Removes the favorite with `id`, if any.
    pub fn remove(&self, id: u32) {
        let Some(mut favorites) = self.load() else {
            return;
        };
        let before = favorites.len();
        favorites.retain(|q| q.id != id);
        if favorites.len() != before {
            self.save(&favorites);
        }
    }

    /// Flips membership of `quote` and returns whether it is now a favorite.
    /// When the change cannot be persisted the previous state is returned.
    pub fn toggle(&self, quote: &Quote) -> bool {
        let Some(mut favorites) = self.load() else {
            return false;
        };
        match favorites.iter().position(|q| q.id == quote.id) {
            Some(pos) => {
                favorites.remove(pos);
                !self.save(&favorites)
            }
            None => {
                favorites.push(quote.clone());
                self.save(&favorites)
            }
        }
    }

    /// Registers `listener` to be called with the new set after each change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Quote]) + 'static,
    {
        let listener: Listener = Rc::new(listener);
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, listener));
        Subscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.borrow().entries.len()
    }

    /// Re-reads storage and notifies listeners if the stored document differs
    /// from what this store last read or wrote. Returns whether it did.
    pub fn refresh(&self) -> bool {
        let current = match self.backend.read() {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                return false;
            }
        };
        if *self.last_seen.borrow() == current {
            return false;
        }
        let favorites = current.as_deref().map(parse_favorites).unwrap_or_default();
        *self.last_seen.borrow_mut() = current;
        self.notify(&favorites);
        true
    }

    /// `None` when the backend cannot be read at all.
    fn load(&self) -> Option<Vec<Quote>> {
        match self.backend.read() {
            Ok(text) => {
                let favorites = text.as_deref().map(parse_favorites).unwrap_or_default();
                *self.last_seen.borrow_mut() = text;
                Some(favorites)
            }
            Err(e) => {
                tracing::warn!("Failed to read favorites: {}", e);
                None
            }
        }
    }

    /// Rewrites the whole set and notifies listeners. Returns false if
    /// nothing was persisted.
    fn save(&self, favorites: &[Quote]) -> bool {
        let text = match serde_json::to_string(favorites) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Failed to serialize favorites: {}", e);
                return false;
            }
        };
        if let Err(e) = self.backend.write(&text) {
            tracing::warn!("Failed to save favorites: {}", e);
            return false;
        }
        *self.last_seen.borrow_mut() = Some(text);
        self.notify(favorites);
        true
    }

    fn notify(&self, favorites: &[Quote]) {
        // Clone the handles out so listeners may subscribe or unsubscribe.
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .entries
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        tracing::debug!(
            favorites = favorites.len(),
            listeners = listeners.len(),
            "favorites changed"
        );
        for listener in listeners {
            listener(favorites);
        }
    }
}

fn parse_favorites(text: &str) -> Vec<Quote> {
    serde_json::from_str(text).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed favorites data: {}", e);
        Vec::new()
    })
}
