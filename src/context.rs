//! # Call Context
//!
//! A [`Context`] bounds a single `buy` call with an optional deadline and an
//! optional cancellation signal. Contexts derive from each other: a child
//! created with [`Context::with_cancel`] is cancelled when either its own
//! [`CancelHandle`] fires or any ancestor is cancelled, and a child deadline
//! can only tighten the parent's.
//!
//! Remote calls are raced against the context with [`Context::run`]. When the
//! context fires first, the in-flight future is dropped, which aborts the
//! underlying HTTP request.

use std::future::{pending, Future};
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;

/// Why a context stopped accepting work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Interrupted {
    #[error("context cancelled")]
    Cancelled,
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Cancellation scope and deadline for one call.
///
/// Cheap to clone; clones observe the same signal.
#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    cancel: Option<watch::Receiver<bool>>,
    parent: Option<Arc<Context>>,
}

/// Fires the cancellation signal of the context it was created with.
///
/// Dropping the handle without calling [`CancelHandle::cancel`] leaves the
/// context running until its deadline, if any.
#[derive(Debug)]
pub struct CancelHandle {
    sender: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    /// Derives a child whose deadline is `timeout` from now, or the parent's
    /// deadline if that is earlier.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let deadline = match self.deadline {
            Some(current) if current <= deadline => current,
            _ => deadline,
        };
        Self {
            deadline: Some(deadline),
            ..self.clone()
        }
    }

    /// Derives a cancellable child and the handle that cancels it.
    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let (sender, receiver) = watch::channel(false);
        let child = Self {
            deadline: self.deadline,
            cancel: Some(receiver),
            parent: Some(Arc::new(self.clone())),
        };
        (child, CancelHandle { sender })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline; `None` when there is no deadline.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    pub fn is_cancelled(&self) -> bool {
        let own = self.cancel.as_ref().is_some_and(|rx| *rx.borrow());
        own || self.parent.as_ref().is_some_and(|p| p.is_cancelled())
    }

    /// The reason this context is done, or `None` while it is still live.
    ///
    /// Cancellation wins over an expired deadline.
    pub fn err(&self) -> Option<Interrupted> {
        if self.is_cancelled() {
            return Some(Interrupted::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Interrupted::DeadlineExceeded),
            _ => None,
        }
    }

    /// Drives `fut` to completion unless the context fires first.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, Interrupted> {
        if let Some(reason) = self.err() {
            return Err(reason);
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancelled() => Err(Interrupted::Cancelled),
            _ = deadline => Err(Interrupted::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }

    /// Resolves once this context or any ancestor is cancelled.
    fn cancelled(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            match (&self.cancel, &self.parent) {
                (Some(rx), Some(parent)) => {
                    tokio::select! {
                        _ = wait_for_signal(rx.clone()) => {}
                        _ = parent.cancelled() => {}
                    }
                }
                (Some(rx), None) => wait_for_signal(rx.clone()).await,
                (None, Some(parent)) => parent.cancelled().await,
                (None, None) => pending::<()>().await,
            }
        })
    }
}

async fn wait_for_signal(mut rx: watch::Receiver<bool>) {
    // A dropped handle can never cancel.
    let signalled = rx.wait_for(|cancelled| *cancelled).await.is_ok();
    if !signalled {
        pending::<()>().await;
    }
}
