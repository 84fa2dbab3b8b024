//! Observable value containers.
//!
//! A [`Writable`] holds one value and a list of subscribers. Every `set`
//! overwrites the value and calls each subscriber, in registration order,
//! before returning. There is no equality check: writing the same value
//! twice notifies twice.
//!
//! [`Readable`] is the same storage without the setter; it is what owners of
//! a `Writable` hand out to consumers that must not write.
//!
//! RE-ENTRANCY
//! ===========
//! No `RefCell` borrow is held while a subscriber or a `with` closure runs,
//! so either may read the store, write it, or (un)subscribe. The value is
//! kept behind an `Rc`; `with` pins the current one, and a write during `f`
//! swaps in a new value without disturbing the one `f` is looking at.
//!
//! Each notification pass works from a snapshot of the subscriber list taken
//! when it starts; subscribers removed mid-pass are skipped, subscribers
//! added mid-pass wait for the next write. Every subscriber sees the value
//! current at the moment it is called.


use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: RefCell<Rc<T>>,
    subscribers: RefCell<Vec<(u64, Subscriber<T>)>>,
    next_id: Cell<u64>,
}

impl<T: Clone + 'static> Inner<T> {
    fn get(&self) -> T {
        T::clone(&self.value.borrow())
    }

    fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let current = Rc::clone(&self.value.borrow());
        f(&current)
    }

    fn subscribe(self: &Rc<Self>, subscriber: Subscriber<T>) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, Rc::clone(&subscriber)));

        let current = self.get();
        subscriber(&current);

        let registry: Weak<dyn Registry> = Rc::downgrade(self) as Weak<dyn Registry>;
        Subscription { id, registry }
    }

    fn set(&self, value: T) {
        *self.value.borrow_mut() = Rc::new(value);
        self.notify();
    }

    fn notify(&self) {
        let pass: Vec<(u64, Subscriber<T>)> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(id, s)| (*id, Rc::clone(s)))
            .collect();

        for (id, subscriber) in pass {
            if !self.is_registered(id) {
                continue;
            }
            let current = self.get();
            subscriber(&current);
        }
    }

    fn is_registered(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|(sid, _)| *sid == id)
    }
}

/// Type-erased handle used by [`Subscription`] to detach itself.
trait Registry {
    fn remove(&self, id: u64) -> bool;
}

impl<T> Registry for Inner<T> {
    fn remove(&self, id: u64) -> bool {
        let mut subscribers = self.subscribers.borrow_mut();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        subscribers.len() != before
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping it does not unsubscribe; call [`Subscription::unsubscribe`].
pub struct Subscription {
    id: u64,
    registry: Weak<dyn Registry>,
}

impl Subscription {
    /// Stop receiving notifications. Safe to call more than once, and after
    /// the store itself is gone.
    ///
    /// Returns `true` if this call removed the subscriber.
    pub fn unsubscribe(&self) -> bool {
        self.registry.upgrade().is_some_and(|registry| registry.remove(self.id))
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish_non_exhaustive()
    }
}

/// A value that can be read, written, and observed.
pub struct Writable<T> {
    inner: Rc<Inner<T>>,
}

impl<T: Clone + 'static> Writable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(Inner {
                value: RefCell::new(Rc::new(value)),
                subscribers: RefCell::new(Vec::new()),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// Overwrite the value and notify every subscriber.
    pub fn set(&self, value: T) {
        self.inner.set(value);
    }

    /// Replace the value with `f(current)` and notify every subscriber.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let next = f(self.inner.get());
        self.inner.set(next);
    }

    /// Register `f`. It is called once immediately with the current value,
    /// then after every write.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        self.inner.subscribe(Rc::new(f))
    }

    /// Read-only view over the same value.
    pub fn readable(&self) -> Readable<T> {
        Readable { inner: Rc::clone(&self.inner) }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writable").field("value", &self.inner.value.borrow()).finish()
    }
}

/// Read-only view of a [`Writable`].
pub struct Readable<T> {
    inner: Rc<Inner<T>>,
}

impl<T: Clone + 'static> Readable<T> {
    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner.get()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.with(f)
    }

    /// See [`Writable::subscribe`].
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
        self.inner.subscribe(Rc::new(f))
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

impl<T> Clone for Readable<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: fmt::Debug> fmt::Debug for Readable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Readable").field("value", &self.inner.value.borrow()).finish()
    }
}
