/// Runs a closure when dropped, including while unwinding from a panic or when
/// the owning future is cancelled.
pub struct ScopeGuard<F: FnOnce()> {
    on_drop: Option<F>,
}

impl<F: FnOnce()> ScopeGuard<F> {
    pub fn new(on_drop: F) -> Self {
        Self { on_drop: Some(on_drop) }
    }
}

impl<F: FnOnce()> Drop for ScopeGuard<F> {
    fn drop(&mut self) {
        if let Some(on_drop) = self.on_drop.take() {
            on_drop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn runs_once_on_scope_exit() {
        let calls = Arc::new(AtomicUsize::new(0));
        {
            let calls = calls.clone();
            let _guard = ScopeGuard::new(move || {
                calls.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn runs_when_unwinding() {
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = calls.clone();
        let result = std::panic::catch_unwind(move || {
            let _guard = ScopeGuard::new(move || {
                inner.fetch_add(1, Ordering::SeqCst);
            });
            panic!("handler blew up");
        });
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn runs_when_task_is_aborted() {
        let calls = Arc::new(AtomicUsize::new(0));
        let inner = calls.clone();
        let task = tokio::spawn(async move {
            let _guard = ScopeGuard::new(move || {
                inner.fetch_add(1, Ordering::SeqCst);
            });
            std::future::pending::<()>().await;
        });
        tokio::task::yield_now().await;
        task.abort();
        assert!(task.await.unwrap_err().is_cancelled());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
