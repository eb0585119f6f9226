//! Transient notification state shared by the screens.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long a notification stays visible unless replaced or cleared.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

/// Holds the single transient message the UI shows.
///
/// At most one notification is live at a time; a new [`notify`] replaces
/// the current one and restarts the auto-clear timer. Handles are cheap
/// to clone and all point at the same store, so the store is constructed
/// once at bootstrap and passed to whoever needs it. Timers run as Tokio
/// tasks, so [`notify`] must be called inside a runtime.
///
/// [`notify`]: NotificationStore::notify
#[derive(Debug, Clone)]
pub struct NotificationStore {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    tx: watch::Sender<Option<Notification>>,
    timer: Mutex<Timer>,
}

#[derive(Debug, Default)]
struct Timer {
    handle: Option<JoinHandle<()>>,
    generation: u64,
}

impl NotificationStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            shared: Arc::new(Shared {
                tx,
                timer: Mutex::new(Timer::default()),
            }),
        }
    }

    /// Show `message`, replacing whatever is currently displayed, and
    /// schedule an automatic [`clear`](Self::clear) after `timeout`.
    ///
    /// The pending timer is cancelled before the new one is scheduled,
    /// so an earlier notification's deadline can never dismiss a later
    /// message.
    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind, timeout: Duration) {
        let notification = Notification {
            message: message.into(),
            kind,
        };
        tracing::debug!(kind = ?notification.kind, "showing notification");

        let mut timer = self.lock_timer();
        if let Some(handle) = timer.handle.take() {
            handle.abort();
        }
        timer.generation += 1;
        let generation = timer.generation;
        self.shared.tx.send_replace(Some(notification));

        // The task holds a weak reference so dropping the last store
        // handle tears the timer down instead of keeping the state alive.
        let shared: Weak<Shared> = Arc::downgrade(&self.shared);
        timer.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            let Some(shared) = shared.upgrade() else {
                return;
            };
            let mut timer = shared
                .timer
                .lock()
                .expect("notification timer lock poisoned");
            // A replacement may have raced ahead of the abort; its
            // message is not ours to clear.
            if timer.generation == generation {
                shared.tx.send_replace(None);
                timer.handle = None;
            }
        }));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Success, DEFAULT_TIMEOUT);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.notify(message, NotificationKind::Error, DEFAULT_TIMEOUT);
    }

    /// Dismiss the current notification, if any. Idempotent.
    pub fn clear(&self) {
        let mut timer = self.lock_timer();
        if let Some(handle) = timer.handle.take() {
            handle.abort();
        }
        timer.generation += 1;
        self.shared.tx.send_replace(None);
    }

    /// Snapshot of the current notification.
    pub fn current(&self) -> Option<Notification> {
        self.shared.tx.borrow().clone()
    }

    /// Watch for changes. The receiver sees every replacement and clear.
    pub fn subscribe(&self) -> watch::Receiver<Option<Notification>> {
        self.shared.tx.subscribe()
    }

    fn lock_timer(&self) -> std::sync::MutexGuard<'_, Timer> {
        self.shared
            .timer
            .lock()
            .expect("notification timer lock poisoned")
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Shared {
    fn drop(&mut self) {
        // Teardown must not leave a timer task aimed at a dead store.
        if let Ok(mut timer) = self.timer.lock() {
            if let Some(handle) = timer.handle.take() {
                handle.abort();
            }
        }
    }
}
