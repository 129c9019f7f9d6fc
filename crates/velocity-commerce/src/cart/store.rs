//! The session-wide cart store.
//!
//! A [`CartStore`] is constructed once per session and handed to every
//! presentation component that needs the cart. It owns the [`Cart`], writes
//! the full list to durable storage after every mutation, and then notifies
//! subscribed [`CartObserver`]s synchronously.
//!
//! # Example
//!
//! ```rust,ignore
//! use velocity_cache::{Cache, FileStore};
//! use velocity_commerce::prelude::*;
//!
//! let cache = Cache::new(FileStore::open(".velocity")?);
//! let mut store = CartStore::open(cache, DEFAULT_CART_KEY);
//!
//! store.subscribe_fn(|change| println!("{} items", change.item_count()));
//! store.add_item(LineItemInput::from(&product))?;
//! ```

use std::fmt;

use velocity_cache::{Cache, CacheError, KeyValueStore};

use crate::cart::cart::clamp_quantity;
use crate::cart::{Cart, CartLineItem, LineItemInput};
use crate::error::CommerceError;
use crate::ids::ProductId;

/// Storage key the storefront keeps its cart under.
pub const DEFAULT_CART_KEY: &str = "velocitytel-cart";

/// How the store's initial contents were obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Nothing was stored under the key.
    Empty,
    /// A stored cart was read back.
    Restored { items: usize },
    /// The stored value was unreadable; the cart started empty.
    Recovered { reason: String },
}

/// What a mutation did.
#[derive(Debug, Clone, PartialEq)]
pub enum CartEvent {
    /// One unit of a product was added.
    Added { id: ProductId, quantity: u32 },
    /// A line was removed, explicitly or by a non-positive quantity.
    Removed {
        id: ProductId,
        item: Option<CartLineItem>,
    },
    /// A line's quantity was set.
    QuantityChanged { id: ProductId, quantity: u32 },
    /// Every line was removed.
    Cleared { removed: usize },
}

/// Notification delivered to observers after a mutation.
///
/// Sent after the in-memory list has changed and the write to storage has
/// been attempted.
#[derive(Debug)]
pub struct CartChange<'a> {
    /// The mutation that ran.
    pub event: &'a CartEvent,
    /// Whether a line was affected; `false` for no-ops such as removing an
    /// absent id.
    pub changed: bool,
    /// The cart after the mutation.
    pub items: &'a [CartLineItem],
    /// Set when the write to storage failed. The in-memory list is still
    /// authoritative.
    pub persist_warning: Option<&'a CacheError>,
}

impl CartChange<'_> {
    /// Sum of quantities after the mutation.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals after the mutation.
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartLineItem::line_total).sum()
    }
}

/// Receives cart changes.
pub trait CartObserver {
    /// Called synchronously after every mutation.
    fn on_change(&mut self, change: &CartChange<'_>);
}

struct FnObserver<F>(F);

impl<F> CartObserver for FnObserver<F>
where
    F: FnMut(&CartChange<'_>),
{
    fn on_change(&mut self, change: &CartChange<'_>) {
        (self.0)(change)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The authoritative cart for a session, kept in sync with storage.
pub struct CartStore<S> {
    cart: Cart,
    cache: Cache<S>,
    key: String,
    load_source: LoadSource,
    last_persist_error: Option<CacheError>,
    observers: Vec<(SubscriptionId, Box<dyn CartObserver>)>,
    next_subscription: u64,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create the store, reading any cart previously saved under `key`.
    ///
    /// Never fails: a missing value gives an empty cart, and a corrupt one
    /// is logged and also gives an empty cart.
    pub fn open(cache: Cache<S>, key: impl Into<String>) -> Self {
        let key = key.into();
        let (cart, load_source) = match cache.get::<Vec<CartLineItem>>(&key) {
            Ok(None) => (Cart::new(), LoadSource::Empty),
            Ok(Some(items)) => match Cart::from_items(items) {
                Ok(cart) => {
                    let items = cart.len();
                    (cart, LoadSource::Restored { items })
                }
                Err(e) => recovered(&key, e.to_string()),
            },
            Err(e) => recovered(&key, e.to_string()),
        };

        if let LoadSource::Restored { items } = load_source {
            tracing::debug!(key = %key, items, "restored cart");
        }

        Self {
            cart,
            cache,
            key,
            load_source,
            last_persist_error: None,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create the store under [`DEFAULT_CART_KEY`].
    pub fn open_default(cache: Cache<S>) -> Self {
        Self::open(cache, DEFAULT_CART_KEY)
    }

    /// Add one unit of a product.
    ///
    /// Invalid input is rejected before anything changes; otherwise the
    /// line's resulting quantity is returned.
    pub fn add_item(&mut self, input: LineItemInput) -> Result<u32, CommerceError> {
        let id = input.id.clone();
        let quantity = self.cart.add_item(input)?;
        tracing::debug!(id = %id, quantity, "added to cart");
        self.commit(CartEvent::Added { id, quantity }, true);
        Ok(quantity)
    }

    /// Remove a line. Removing an absent id is a no-op, still persisted and
    /// announced. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &ProductId) -> bool {
        let item = self.cart.remove_item(id);
        let changed = item.is_some();
        tracing::debug!(id = %id, changed, "removed from cart");
        self.commit(
            CartEvent::Removed {
                id: id.clone(),
                item,
            },
            changed,
        );
        changed
    }

    /// Set a line's quantity; zero or less removes the line.
    ///
    /// Returns whether a line with `id` was affected.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let changed = self.cart.set_quantity(id, quantity);
        let quantity = clamp_quantity(quantity);
        tracing::debug!(id = %id, quantity, changed, "set cart quantity");
        self.commit(
            CartEvent::QuantityChanged {
                id: id.clone(),
                quantity,
            },
            changed,
        );
        changed
    }

    /// Remove every line. The stored value becomes an empty list.
    pub fn clear(&mut self) {
        let removed = self.cart.clear();
        tracing::debug!(removed, "cleared cart");
        self.commit(CartEvent::Cleared { removed }, removed > 0);
    }

    /// Register an observer.
    pub fn subscribe(&mut self, observer: Box<dyn CartObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Register a closure as an observer.
    pub fn subscribe_fn<F>(&mut self, f: F) -> SubscriptionId
    where
        F: FnMut(&CartChange<'_>) + 'static,
    {
        self.subscribe(Box::new(FnObserver(f)))
    }

    /// Drop an observer. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() < before
    }

    /// The lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        self.cart.items()
    }

    /// Get a line by product id.
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.cart.get(id)
    }

    /// Sum of quantities, for badge displays.
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    /// Sum of `price * quantity`, unrounded.
    pub fn total(&self) -> f64 {
        self.cart.total()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// The in-memory cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// How the initial contents were obtained.
    pub fn load_source(&self) -> &LoadSource {
        &self.load_source
    }

    /// The error from the most recent write, if it failed.
    pub fn last_persist_error(&self) -> Option<&CacheError> {
        self.last_persist_error.as_ref()
    }

    /// The key the cart is stored under.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// The underlying cache.
    pub fn cache(&self) -> &Cache<S> {
        &self.cache
    }

    /// Persist, then notify observers.
    fn commit(&mut self, event: CartEvent, changed: bool) {
        self.persist();

        let change = CartChange {
            event: &event,
            changed,
            items: self.cart.items(),
            persist_warning: self.last_persist_error.as_ref(),
        };
        for (_, observer) in self.observers.iter_mut() {
            observer.on_change(&change);
        }
    }

    fn persist(&mut self) {
        match self.cache.set(&self.key, self.cart.items()) {
            Ok(()) => {
                if self.last_persist_error.take().is_some() {
                    tracing::info!(key = %self.key, "cart storage writable again");
                }
                tracing::debug!(key = %self.key, items = self.cart.len(), "persisted cart");
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to persist cart; keeping in-memory state");
                self.last_persist_error = Some(e);
            }
        }
    }
}

fn recovered(key: &str, reason: String) -> (Cart, LoadSource) {
    tracing::warn!(key = %key, reason = %reason, "stored cart unreadable; starting empty");
    (Cart::new(), LoadSource::Recovered { reason })
}

impl<S> fmt::Debug for CartStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &self.cart)
            .field("load_source", &self.load_source)
            .field("last_persist_error", &self.last_persist_error)
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use velocity_cache::MemoryStore;

    fn product(id: &str, price: f64) -> LineItemInput {
        LineItemInput {
            id: ProductId::new(id),
            name: format!("Plan {}", id),
            price,
            duration: "12mo".into(),
            category: "gaming".into(),
            image: "gaming".into(),
        }
    }

    fn stored(store: &CartStore<MemoryStore>) -> String {
        let bytes = store.cache().store().get(DEFAULT_CART_KEY).unwrap().unwrap();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_open_empty() {
        let store = CartStore::open_default(Cache::new(MemoryStore::new()));
        assert!(store.is_empty());
        assert_eq!(store.load_source(), &LoadSource::Empty);
        assert_eq!(store.storage_key(), DEFAULT_CART_KEY);
    }

    #[test]
    fn test_open_corrupt_recovers_empty() {
        for raw in [&b"not json"[..], b"{\"id\":1}", b"[{\"id\":\"a\"}]"] {
            let mut backend = MemoryStore::new();
            backend.set(DEFAULT_CART_KEY, raw).unwrap();
            let store = CartStore::open_default(Cache::new(backend));
            assert!(store.is_empty());
            assert!(matches!(store.load_source(), LoadSource::Recovered { .. }));
        }
    }

    #[test]
    fn test_open_rejects_duplicate_stored_ids() {
        let line = r#"{"id":"a","name":"A","price":1,"duration":"m","category":"c","image":"i","quantity":1}"#;
        let mut backend = MemoryStore::new();
        backend
            .set(DEFAULT_CART_KEY, format!("[{},{}]", line, line).as_bytes())
            .unwrap();
        let store = CartStore::open_default(Cache::new(backend));
        assert!(store.is_empty());
        assert!(matches!(store.load_source(), LoadSource::Recovered { .. }));
    }

    #[test]
    fn test_every_mutation_persists() {
        let mut store = CartStore::open_default(Cache::new(MemoryStore::new()));
        store.add_item(product("a", 10.0)).unwrap();
        assert!(stored(&store).contains("\"quantity\":1"));

        store.set_quantity(&ProductId::new("a"), 4);
        assert!(stored(&store).contains("\"quantity\":4"));

        store.remove_item(&ProductId::new("a"));
        assert_eq!(stored(&store), "[]");
    }

    #[test]
    fn test_clear_writes_empty_list() {
        let mut store = CartStore::open_default(Cache::new(MemoryStore::new()));
        store.add_item(product("a", 10.0)).unwrap();
        store.clear();
        assert_eq!(stored(&store), "[]");
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.total(), 0.0);
    }

    #[test]
    fn test_invalid_add_does_not_persist_or_notify() {
        let calls = Rc::new(RefCell::new(0));
        let mut store = CartStore::open_default(Cache::new(MemoryStore::new()));
        let seen = Rc::clone(&calls);
        store.subscribe_fn(move |_| *seen.borrow_mut() += 1);

        assert!(store.add_item(product("", 1.0)).is_err());
        assert_eq!(*calls.borrow(), 0);
        assert!(!store.cache().exists(DEFAULT_CART_KEY).unwrap());
    }

    #[test]
    fn test_observers_see_post_mutation_state() {
        let log: Rc<RefCell<Vec<(CartEvent, bool, u64)>>> = Rc::default();
        let mut store = CartStore::open_default(Cache::new(MemoryStore::new()));
        let sink = Rc::clone(&log);
        store.subscribe_fn(move |change| {
            sink.borrow_mut()
                .push((change.event.clone(), change.changed, change.item_count()));
        });

        let id = ProductId::new("a");
        store.add_item(product("a", 10.0)).unwrap();
        store.add_item(product("a", 10.0)).unwrap();
        store.set_quantity(&id, -1);
        store.remove_item(&id);

        let log = log.borrow();
        assert_eq!(log.len(), 4);
        assert_eq!(
            log[0],
            (
                CartEvent::Added {
                    id: id.clone(),
                    quantity: 1
                },
                true,
                1
            )
        );
        assert_eq!(log[1].2, 2);
        assert!(matches!(&log[2].0, CartEvent::Removed { item: Some(item), .. } if item.quantity == 2));
        assert_eq!(log[2].2, 0);
        assert_eq!(log[3], (CartEvent::Removed { id, item: None }, false, 0));
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Rc::new(RefCell::new(0));
        let mut store = CartStore::open_default(Cache::new(MemoryStore::new()));
        let seen = Rc::clone(&calls);
        let sub = store.subscribe_fn(move |_| *seen.borrow_mut() += 1);

        store.clear();
        assert!(store.unsubscribe(sub));
        assert!(!store.unsubscribe(sub));
        store.clear();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_persist_failure_is_non_fatal() {
        let warnings = Rc::new(RefCell::new(Vec::new()));
        // Room for "[]" under the key, not for a line item.
        let quota = DEFAULT_CART_KEY.len() + 2;
        let mut store = CartStore::open_default(Cache::new(MemoryStore::with_quota(quota)));
        let sink = Rc::clone(&warnings);
        store.subscribe_fn(move |change| {
            sink.borrow_mut().push(change.persist_warning.is_some());
        });

        store.add_item(product("a", 10.0)).unwrap();
        assert_eq!(store.item_count(), 1);
        assert!(matches!(
            store.last_persist_error(),
            Some(CacheError::QuotaExceeded { .. })
        ));

        store.clear();
        assert!(store.last_persist_error().is_none());
        assert_eq!(stored(&store), "[]");
        assert_eq!(*warnings.borrow(), vec![true, false]);
    }
}
