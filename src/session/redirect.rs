//! Debounced login redirect.
//!
//! Requests made while a redirect is pending collapse into the pending one.
//! A zero delay navigates immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::session::surface::Navigator;

pub struct LoginRedirect {
    navigator: Arc<dyn Navigator>,
    delay: Duration,
    pending: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl LoginRedirect {
    pub fn new(navigator: Arc<dyn Navigator>, delay: Duration) -> Self {
        Self {
            navigator,
            delay,
            pending: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
        }
    }

    /// Request a redirect to the login page.
    pub fn schedule(&self) {
        if self.delay.is_zero() {
            self.navigator.redirect_to_login();
            return;
        }

        if self.pending.swap(true, Ordering::SeqCst) {
            tracing::debug!("Login redirect already pending");
            return;
        }

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let navigator = self.navigator.clone();
                let pending = self.pending.clone();
                let delay = self.delay;
                let task = handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    pending.store(false, Ordering::SeqCst);
                    navigator.redirect_to_login();
                });
                if let Ok(mut slot) = self.task.lock() {
                    *slot = Some(task);
                }
            }
            Err(_) => {
                // outside a runtime there is nothing to defer onto
                self.pending.store(false, Ordering::SeqCst);
                self.navigator.redirect_to_login();
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Drop a pending redirect without navigating.
    pub fn cancel(&self) {
        if let Ok(mut slot) = self.task.lock() {
            if let Some(task) = slot.take() {
                task.abort();
            }
        }
        self.pending.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingNavigator(AtomicUsize);

    impl Navigator for CountingNavigator {
        fn redirect_to_login(&self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_redirects_coalesce() {
        let nav = Arc::new(CountingNavigator::default());
        let redirect = LoginRedirect::new(nav.clone(), Duration::from_millis(50));

        redirect.schedule();
        redirect.schedule();
        redirect.schedule();
        assert!(redirect.is_pending());
        assert_eq!(nav.0.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(nav.0.load(Ordering::SeqCst), 1);
        assert!(!redirect.is_pending());
    }

    #[tokio::test]
    async fn test_zero_delay_is_immediate() {
        let nav = Arc::new(CountingNavigator::default());
        let redirect = LoginRedirect::new(nav.clone(), Duration::ZERO);
        redirect.schedule();
        redirect.schedule();
        assert_eq!(nav.0.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cancel() {
        let nav = Arc::new(CountingNavigator::default());
        let redirect = LoginRedirect::new(nav.clone(), Duration::from_millis(30));
        redirect.schedule();
        redirect.cancel();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(nav.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_without_runtime() {
        let nav = Arc::new(CountingNavigator::default());
        let redirect = LoginRedirect::new(nav.clone(), Duration::from_millis(30));
        redirect.schedule();
        assert_eq!(nav.0.load(Ordering::SeqCst), 1);
    }
}
