use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use roster_types::errors::DbError;

/// Cancellation and deadline carried by every repository call.
///
/// Cloning a `Ctx` shares its cancellation state; [`Ctx::child`] derives a
/// context that is canceled together with its parent but can also be
/// canceled on its own.
#[derive(Debug, Clone)]
pub struct Ctx {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Ctx {
    /// A context that is never canceled and has no deadline.
    pub fn background() -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: None,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Derives a child whose deadline is the earlier of the parent's and `timeout` from now.
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        Self {
            token: self.token.child_token(),
            deadline: Some(self.deadline.map_or(deadline, |d| d.min(deadline))),
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_done(&self) -> bool {
        self.token.is_cancelled() || self.deadline.is_some_and(|d| Instant::now() >= d)
    }

    /// Drives `fut` until it completes, the context is canceled or the
    /// deadline passes, whichever happens first. The losing future is dropped.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, DbError>
    where
        F: Future,
    {
        if self.is_done() {
            return Err(self.done_error());
        }

        let deadline = async {
            match self.deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(DbError::Canceled),
            () = deadline => Err(DbError::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }

    fn done_error(&self) -> DbError {
        if self.token.is_cancelled() {
            DbError::Canceled
        } else {
            DbError::DeadlineExceeded
        }
    }
}

impl Default for Ctx {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_returns_future_output() {
        let ctx = Ctx::background();
        let value = ctx.run(async { 21 * 2 }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_run_on_canceled_context() {
        let ctx = Ctx::background();
        ctx.cancel();
        assert!(ctx.is_done());

        let result = ctx.run(async { "never" }).await;
        assert!(matches!(result, Err(DbError::Canceled)));
    }

    #[tokio::test]
    async fn test_run_hits_deadline() {
        let ctx = Ctx::with_timeout(Duration::from_millis(20));
        let result = ctx.run(std::future::pending::<()>()).await;
        assert!(matches!(result, Err(DbError::DeadlineExceeded)));
        assert!(ctx.is_done());
    }

    #[tokio::test]
    async fn test_run_past_deadline_skips_future() {
        let ctx = Ctx::with_deadline(Instant::now());
        let result = ctx
            .run(async {
                unreachable!("future must not be polled");
            })
            .await;
        assert!(matches!(result, Err(DbError::DeadlineExceeded)));

        ctx.cancel();
        let result = ctx.run(async {}).await;
        assert!(matches!(result, Err(DbError::Canceled)), "cancel wins over deadline");
    }

    #[tokio::test]
    async fn test_cancel_while_running() {
        let ctx = Ctx::background();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let result = ctx.run(std::future::pending::<()>()).await;
        assert!(matches!(result, Err(DbError::Canceled)));
    }

    #[tokio::test]
    async fn test_child_follows_parent() {
        let parent = Ctx::background();
        let child = parent.child();
        let sibling = parent.child();

        child.cancel();
        assert!(child.is_done());
        assert!(!parent.is_done(), "canceling a child leaves the parent alone");

        parent.cancel();
        assert!(sibling.is_done());
    }

    #[tokio::test]
    async fn test_child_with_timeout_keeps_earlier_deadline() {
        let parent = Ctx::with_timeout(Duration::from_secs(1));
        let child = parent.child_with_timeout(Duration::from_secs(60));
        assert_eq!(child.deadline(), parent.deadline());

        let background = Ctx::background();
        assert!(background.deadline().is_none());
        assert!(
            background
                .child_with_timeout(Duration::from_secs(1))
                .deadline()
                .is_some()
        );
    }
}
