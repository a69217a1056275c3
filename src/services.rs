//! Injected UI services — route changes and toast notifications.
//!
//! The SDK never renders anything. Flows that would redirect or pop a toast
//! call into these traits instead; the defaults just log.

use crate::shared::Route;

/// Moves the UI to another route.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);
}

/// Shows success / error notifications.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(route = route.as_path(), "Navigate");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(message, "Notify success");
    }

    fn error(&self, message: &str) {
        tracing::warn!(message, "Notify error");
    }
}

/// Recording doubles for tests.
#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct RecordingNavigator {
        pub routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub successes: Mutex<Vec<String>>,
        pub errors: Mutex<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn success(&self, message: &str) {
            self.successes.lock().unwrap().push(message.to_string());
        }

        fn error(&self, message: &str) {
            self.errors.lock().unwrap().push(message.to_string());
        }
    }
}
