//! Keyed debouncing of view-state updates.
//!
//! Each key has at most one pending commit. Submitting a value for a key
//! cancels that key's pending commit and schedules a new one `delay` later, so
//! a burst of updates to the same field commits only its last value. Commits
//! are delivered on an unbounded channel in the order their timers fire.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

struct Pending {
    generation: u64,
    handle: JoinHandle<()>,
}

struct Shared<K> {
    next_generation: u64,
    pending: HashMap<K, Pending>,
}

/// Last-write-wins debouncer keyed by `K`.
///
/// Must be used from within a tokio runtime.
pub struct Debouncer<K, V> {
    delay: Duration,
    tx: mpsc::UnboundedSender<(K, V)>,
    shared: Arc<Mutex<Shared<K>>>,
}

impl<K, V> Debouncer<K, V>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Send + 'static,
{
    /// Create a debouncer and the receiver its commits arrive on.
    pub fn new(delay: Duration) -> (Self, mpsc::UnboundedReceiver<(K, V)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let debouncer = Self {
            delay,
            tx,
            shared: Arc::new(Mutex::new(Shared {
                next_generation: 0,
                pending: HashMap::new(),
            })),
        };
        (debouncer, rx)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `value` for `key`, replacing any pending value for that key.
    pub fn submit(&self, key: K, value: V) {
        let mut shared = self.shared.lock();
        shared.next_generation += 1;
        let generation = shared.next_generation;

        let delay = self.delay;
        let tx = self.tx.clone();
        let task_shared = Arc::clone(&self.shared);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut shared = task_shared.lock();
            // A newer submit may have replaced this one after the timer fired.
            let current = shared
                .pending
                .get(&task_key)
                .is_some_and(|p| p.generation == generation);
            if current {
                shared.pending.remove(&task_key);
                let _ = tx.send((task_key, value));
            }
        });

        if let Some(previous) = shared.pending.insert(key, Pending { generation, handle }) {
            previous.handle.abort();
            debug!("Debounce: replaced pending commit");
        }
    }

    /// Drop the pending commit for `key`. Returns whether one was pending.
    pub fn cancel(&self, key: &K) -> bool {
        match self.shared.lock().pending.remove(key) {
            Some(pending) => {
                pending.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Drop every pending commit.
    pub fn cancel_all(&self) {
        for (_, pending) in self.shared.lock().pending.drain() {
            pending.handle.abort();
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.shared.lock().pending.contains_key(key)
    }

    pub fn pending_count(&self) -> usize {
        self.shared.lock().pending.len()
    }
}

impl<K, V> Drop for Debouncer<K, V> {
    fn drop(&mut self) {
        for (_, pending) in self.shared.lock().pending.drain() {
            pending.handle.abort();
        }
    }
}

/// A text-like input with an immediate display value and a debounced
/// committed value.
pub struct DebouncedInput<T> {
    display: T,
    committed: T,
    debouncer: Debouncer<(), T>,
    rx: mpsc::UnboundedReceiver<((), T)>,
}

impl<T> DebouncedInput<T>
where
    T: Clone + Send + 'static,
{
    pub fn new(initial: T, delay: Duration) -> Self {
        let (debouncer, rx) = Debouncer::new(delay);
        Self {
            display: initial.clone(),
            committed: initial,
            debouncer,
            rx,
        }
    }

    /// Update the display value and schedule a commit.
    pub fn set(&mut self, value: T) {
        self.display = value.clone();
        self.debouncer.submit((), value);
    }

    /// What the input shows right now.
    pub fn display(&self) -> &T {
        &self.display
    }

    /// The last committed value.
    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending(&())
    }

    /// Wait for the next commit and return the new committed value.
    ///
    /// Returns `None` if nothing is pending.
    pub async fn next_commit(&mut self) -> Option<&T> {
        let value = match self.rx.try_recv() {
            Ok(((), value)) => value,
            Err(_) if self.is_pending() => self.rx.recv().await?.1,
            Err(_) => return None,
        };
        self.committed = value;
        Some(&self.committed)
    }

    /// Apply any commit that has already fired without waiting.
    pub fn poll_commit(&mut self) -> bool {
        let mut changed = false;
        while let Ok(((), value)) = self.rx.try_recv() {
            self.committed = value;
            changed = true;
        }
        changed
    }
}
