//! A single-threaded value cell with change subscribers.
//!
//! Every tile keeps its geometry in an [`Observable`] so renderers can react
//! when a layout pass rewrites it.
//!
//! # Example
//!
//! ```
//! use tilez_layout::Observable;
//!
//! let cell = Observable::new(1);
//! let sub = cell.subscribe(|v| println!("value: {v}"));
//! cell.set(2);
//! sub.unsubscribe();
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

type Subscriber<T> = Box<dyn FnMut(&T)>;

struct Inner<T> {
    value: T,
    subscribers: Vec<(usize, Subscriber<T>)>,
    /// Ids unsubscribed while their list was out for notification
    removed: Vec<usize>,
    next_id: usize,
}

impl<T> Inner<T> {
    fn next_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Shared value cell that notifies subscribers after every write.
///
/// Clones share the same value and subscribers.
pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Default + Clone + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                value,
                subscribers: Vec::new(),
                removed: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Store a value, then notify every subscriber with it.
    ///
    /// Subscribers may read the cell or subscribe while being notified.
    /// Subscribers added during a notification first hear of the next write.
    pub fn set(&self, value: T) {
        let mut subscribers = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            std::mem::take(&mut inner.subscribers)
        };

        let current = self.get();
        for (_, subscriber) in subscribers.iter_mut() {
            subscriber(&current);
        }

        let mut inner = self.inner.borrow_mut();
        let removed = std::mem::take(&mut inner.removed);
        subscribers.retain(|(id, _)| !removed.contains(id));
        let added = std::mem::replace(&mut inner.subscribers, subscribers);
        inner.subscribers.extend(added);
    }

    /// Call `subscriber` with the current value now and after every write.
    pub fn subscribe<F>(&self, mut subscriber: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        subscriber(&self.get());

        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id();
            inner.subscribers.push((id, Box::new(subscriber)));
            id
        };

        let weak: Weak<RefCell<Inner<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.borrow_mut();
                    let before = inner.subscribers.len();
                    inner.subscribers.retain(|(sub_id, _)| *sub_id != id);
                    if inner.subscribers.len() == before {
                        inner.removed.push(id);
                    }
                }
            }),
        }
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }
}

/// Handle returned by [`Observable::subscribe`].
///
/// Dropping the handle keeps the subscriber registered.
pub struct Subscription {
    cancel: Box<dyn FnOnce()>,
}

impl Subscription {
    /// Stop receiving updates.
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
