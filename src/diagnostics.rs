// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Diagnostic messages emitted while grading. Everything is logged; in debug
//! mode messages are also shown to the user.

/// A user-visible channel for diagnostic messages.
pub trait Notifier {
    fn notify(&self, message: &str);
}

/// Prints notifications to standard error.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Drops every notification.
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _message: &str) {}
}

pub struct Diagnostics {
    debug: bool,
    notifier: Box<dyn Notifier>,
}

impl Diagnostics {
    pub fn new(debug: bool, notifier: Box<dyn Notifier>) -> Self {
        Self { debug, notifier }
    }

    /// Diagnostics that only go to the log.
    pub fn silent() -> Self {
        Self::new(false, Box::new(SilentNotifier))
    }

    pub fn info(&self, message: &str) {
        log::info!("{message}");
        self.forward(message);
    }

    pub fn warn(&self, message: &str) {
        log::warn!("{message}");
        self.forward(message);
    }

    fn forward(&self, message: &str) {
        if self.debug {
            self.notifier.notify(message);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;

    #[test]
    fn test_debug_forwards_to_user() {
        let notifier = RecordingNotifier::default();
        let diagnostics = Diagnostics::new(true, Box::new(notifier.clone()));
        diagnostics.info("hello");
        diagnostics.warn("careful");
        assert_eq!(notifier.messages(), vec!["hello", "careful"]);
    }

    #[test]
    fn test_non_debug_only_logs() {
        let notifier = RecordingNotifier::default();
        let diagnostics = Diagnostics::new(false, Box::new(notifier.clone()));
        diagnostics.info("hello");
        assert!(notifier.messages().is_empty());
    }

}
