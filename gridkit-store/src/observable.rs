use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener<T> = Rc<dyn Fn(&T)>;

struct Shared<T> {
    snapshot: RefCell<Rc<T>>,
    version: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener<T>)>>,
    next_listener: Cell<u64>,
}

impl<T: 'static> Shared<T> {
    fn snapshot(&self) -> Rc<T> {
        Rc::clone(&self.snapshot.borrow())
    }

    fn subscribe(self: &Rc<Self>, listener: Listener<T>) -> Subscription {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, listener));

        let weak: Weak<Self> = Rc::downgrade(self);
        Subscription::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.listeners.borrow_mut().retain(|(l, _)| *l != id);
            }
        })
    }

    fn replace(&self, next: T) {
        let next = Rc::new(next);
        *self.snapshot.borrow_mut() = Rc::clone(&next);
        let version = self.version.get() + 1;
        self.version.set(version);

        // Listeners may subscribe, unsubscribe or write again while running,
        // so no borrow is held across the calls.
        let listeners: Vec<Listener<T>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, l)| Rc::clone(l))
            .collect();
        for listener in listeners {
            // A nested write already delivered a newer value to everyone.
            if self.version.get() != version {
                break;
            }
            listener(&next);
        }
    }
}

/// A shared, writable state cell with change notification.
///
/// Clones are handles to the same cell. Hand out a [`StoreReader`] to code
/// that should only observe.
pub struct Observable<T> {
    shared: Rc<Shared<T>>,
}

impl<T: PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                snapshot: RefCell::new(Rc::new(value)),
                version: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    /// The current value. The same `Rc` is returned until a mutation
    /// actually changes the value.
    pub fn get_snapshot(&self) -> Rc<T> {
        self.shared.snapshot()
    }

    /// Number of changing mutations so far.
    pub fn version(&self) -> u64 {
        self.shared.version.get()
    }

    /// Replaces the value and notifies subscribers. Returns false, without
    /// notifying, when `value` equals the current value.
    pub fn set(&self, value: T) -> bool {
        if **self.shared.snapshot.borrow() == value {
            return false;
        }
        self.shared.replace(value);
        true
    }

    /// Derives the next value from the current one.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&T) -> T,
    {
        let current = self.get_snapshot();
        self.set(f(&current))
    }

    /// Edits a copy of the current value, then stores the copy.
    pub fn modify<F>(&self, f: F) -> bool
    where
        T: Clone,
        F: FnOnce(&mut T),
    {
        let mut next = T::clone(&self.get_snapshot());
        f(&mut next);
        self.set(next)
    }

    /// Registers `listener`, called with the new value after every change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.shared.subscribe(Rc::new(listener))
    }

    /// A read-only handle to this cell.
    pub fn reader(&self) -> StoreReader<T> {
        StoreReader {
            shared: Rc::clone(&self.shared),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Default + PartialEq + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.shared.snapshot.borrow())
            .field("version", &self.shared.version.get())
            .finish()
    }
}

/// Read and subscribe access to an [`Observable`], without write access.
pub struct StoreReader<T> {
    shared: Rc<Shared<T>>,
}

impl<T: 'static> StoreReader<T> {
    pub fn get_snapshot(&self) -> Rc<T> {
        self.shared.snapshot()
    }

    pub fn version(&self) -> u64 {
        self.shared.version.get()
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + 'static,
    {
        self.shared.subscribe(Rc::new(listener))
    }
}

impl<T> Clone for StoreReader<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for StoreReader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StoreReader")
            .field(&self.shared.snapshot.borrow())
            .finish()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Leaves the listener registered for as long as the store lives.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
