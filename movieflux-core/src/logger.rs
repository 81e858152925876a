//! Action logging with pattern-based filtering and in-memory storage
//!
//! [`ActionLoggerMiddleware`] is the pass-through logger every store should
//! carry. It forwards each dispatch to the rest of the chain exactly once and
//! never alters, drops or duplicates it. What it logs is controlled by glob
//! patterns on the action name; optionally it keeps a ring buffer of recent
//! entries that a view can display.
//!
//! # Example
//!
//! ```ignore
//! use movieflux_core::logger::{ActionLogConfig, ActionLoggerConfig, ActionLoggerMiddleware};
//!
//! // Log everything except the people slice (tracing only)
//! let middleware = ActionLoggerMiddleware::new(ActionLoggerConfig::new(None, Some("People*")));
//!
//! // Log with in-memory storage for a debug view
//! let middleware = ActionLoggerMiddleware::with_log(ActionLogConfig::default());
//! let log = middleware.log().expect("storage enabled");
//!
//! for entry in log.lock().unwrap().recent(10) {
//!     println!("{}: {}", entry.elapsed_display(), entry.summary);
//! }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::action::ActionSummary;
use crate::dispatch::Dispatchable;
use crate::middleware::{Middleware, MiddlewareApi, Next};
use crate::store::DispatchError;

/// Configuration for action logging with glob pattern filtering.
///
/// Patterns support:
/// - `*` matches any sequence of characters
/// - `?` matches any single character
/// - Literal text matches exactly
///
/// # Examples
///
/// - `Set*` matches SetMovieMenuList, SetGenres, etc.
/// - `Fetch*` matches every async fetch
/// - `*Wishlist*` matches AddToWishlist and RemoveFromWishlist
#[derive(Debug, Clone, Default)]
pub struct ActionLoggerConfig {
    /// If non-empty, only log actions matching these patterns
    pub include_patterns: Vec<String>,
    /// Exclude actions matching these patterns (applied after include)
    pub exclude_patterns: Vec<String>,
}

impl ActionLoggerConfig {
    /// Create a new config from comma-separated pattern strings
    ///
    /// # Example
    /// ```
    /// use movieflux_core::logger::ActionLoggerConfig;
    ///
    /// let config = ActionLoggerConfig::new(Some("Set*,Fetch*"), Some("SetVideos"));
    /// assert!(config.should_log("SetGenres"));
    /// assert!(config.should_log("FetchGenres"));
    /// assert!(!config.should_log("SetVideos"));
    /// assert!(!config.should_log("AddToWishlist"));
    /// ```
    pub fn new(include: Option<&str>, exclude: Option<&str>) -> Self {
        Self {
            include_patterns: include.map(split_patterns).unwrap_or_default(),
            exclude_patterns: exclude.map(split_patterns).unwrap_or_default(),
        }
    }

    /// Create a config with specific pattern vectors
    pub fn with_patterns(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self {
            include_patterns: include,
            exclude_patterns: exclude,
        }
    }

    /// Check if an action name should be logged based on include/exclude patterns
    pub fn should_log(&self, action_name: &str) -> bool {
        if !self.include_patterns.is_empty()
            && !self
                .include_patterns
                .iter()
                .any(|p| glob_match(p, action_name))
        {
            return false;
        }

        !self
            .exclude_patterns
            .iter()
            .any(|p| glob_match(p, action_name))
    }
}

fn split_patterns(s: &str) -> Vec<String> {
    s.split(',')
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect()
}

// ============================================================================
// In-Memory Action Log
// ============================================================================

/// What happened to a logged dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The rest of the chain returned successfully
    Completed,
    /// The rest of the chain returned an error
    Failed(String),
}

/// An entry in the action log
#[derive(Debug, Clone)]
pub struct ActionLogEntry {
    /// Action name (from Action::name())
    pub name: &'static str,
    /// Category, for plain actions that have one
    pub category: Option<&'static str>,
    /// Whether the dispatch was an async action
    pub is_async: bool,
    /// Summary representation (from ActionSummary::summary())
    pub summary: String,
    /// Timestamp when the action was logged
    pub timestamp: Instant,
    /// Sequence number for ordering
    pub sequence: u64,
    /// Set once the rest of the chain has returned
    pub outcome: Option<DispatchOutcome>,
}

impl ActionLogEntry {
    /// Time since this action was logged
    pub fn elapsed(&self) -> std::time::Duration {
        self.timestamp.elapsed()
    }

    /// Format the elapsed time for display (e.g., "2.3s", "150ms")
    pub fn elapsed_display(&self) -> String {
        let elapsed = self.elapsed();
        if elapsed.as_secs() >= 1 {
            format!("{:.1}s", elapsed.as_secs_f64())
        } else {
            format!("{}ms", elapsed.as_millis())
        }
    }
}

/// Configuration for the action log ring buffer
#[derive(Debug, Clone)]
pub struct ActionLogConfig {
    /// Maximum number of entries to keep
    pub capacity: usize,
    /// Which actions are recorded
    pub filter: ActionLoggerConfig,
}

impl Default for ActionLogConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            filter: ActionLoggerConfig::default(),
        }
    }
}

impl ActionLogConfig {
    /// Create with custom capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Default::default()
        }
    }

    /// Create with custom capacity and filter
    pub fn new(capacity: usize, filter: ActionLoggerConfig) -> Self {
        Self { capacity, filter }
    }
}

/// In-memory ring buffer for storing recent dispatches
///
/// Older entries are discarded when capacity is reached.
#[derive(Debug, Clone)]
pub struct ActionLog {
    entries: VecDeque<ActionLogEntry>,
    capacity: usize,
    next_sequence: u64,
}

impl Default for ActionLog {
    fn default() -> Self {
        Self::with_capacity(100)
    }
}

impl ActionLog {
    /// Create an empty log holding at most `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_sequence: 0,
        }
    }

    /// Record a dispatch and return its sequence number
    pub fn record<S: 'static, A: ActionSummary>(&mut self, action: &Dispatchable<S, A>) -> u64 {
        let (category, summary) = match action {
            Dispatchable::Plain(plain) => (plain.category(), plain.summary()),
            Dispatchable::Async(task) => (None, format!("{:?}", task)),
        };
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        if self.capacity == 0 {
            return sequence;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(ActionLogEntry {
            name: action.name(),
            category,
            is_async: action.is_async(),
            summary,
            timestamp: Instant::now(),
            sequence,
            outcome: None,
        });
        sequence
    }

    /// Attach the outcome to the entry with `sequence`, if still stored
    pub fn complete(&mut self, sequence: u64, outcome: DispatchOutcome) {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .rev()
            .find(|entry| entry.sequence == sequence)
        {
            entry.outcome = Some(outcome);
        }
    }

    /// Get all entries (oldest first)
    pub fn entries(&self) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter()
    }

    /// Get the most recent N entries (newest first)
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &ActionLogEntry> {
        self.entries.iter().rev().take(count)
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Action log shared between the middleware and whoever displays it
pub type SharedActionLog = Arc<Mutex<ActionLog>>;

// ============================================================================
// Middleware
// ============================================================================

/// Middleware that logs dispatches with configurable pattern filtering.
///
/// Supports two modes:
/// - **Tracing only** (default): logs via `tracing::debug!()`
/// - **With storage**: also stores entries in a shared [`ActionLog`]
///
/// Forwards every dispatch to `next` exactly once, whether or not it is
/// logged.
#[derive(Debug, Clone)]
pub struct ActionLoggerMiddleware {
    config: ActionLoggerConfig,
    log: Option<SharedActionLog>,
    active: bool,
}

impl Default for ActionLoggerMiddleware {
    fn default() -> Self {
        Self::log_all()
    }
}

impl ActionLoggerMiddleware {
    /// Create a new action logger middleware with tracing only
    pub fn new(config: ActionLoggerConfig) -> Self {
        Self {
            config,
            log: None,
            active: true,
        }
    }

    /// Create middleware with in-memory storage
    pub fn with_log(config: ActionLogConfig) -> Self {
        Self {
            config: config.filter,
            log: Some(Arc::new(Mutex::new(ActionLog::with_capacity(
                config.capacity,
            )))),
            active: true,
        }
    }

    /// Create with no filtering (logs all actions), tracing only
    pub fn log_all() -> Self {
        Self::new(ActionLoggerConfig::default())
    }

    /// Set whether the middleware logs anything.
    ///
    /// An inactive logger still forwards every dispatch.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Check if the middleware is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Shared handle to the action log (if storage is enabled)
    pub fn log(&self) -> Option<SharedActionLog> {
        self.log.clone()
    }

    /// Get a reference to the config
    pub fn config(&self) -> &ActionLoggerConfig {
        &self.config
    }
}

impl<S: 'static, A: ActionSummary> Middleware<S, A> for ActionLoggerMiddleware {
    fn handle(
        &mut self,
        _api: &MiddlewareApi<S, A>,
        action: Dispatchable<S, A>,
        next: Next<'_, S, A>,
    ) -> Result<(), DispatchError> {
        if !self.active || !self.config.should_log(action.name()) {
            return next.run(action);
        }

        let name = action.name();
        tracing::debug!(
            action = %name,
            category = ?action.category(),
            is_async = action.is_async(),
            "action"
        );

        let sequence = self
            .log
            .as_ref()
            .and_then(|log| log.lock().ok().map(|mut log| log.record(&action)));

        let result = next.run(action);

        if let Err(err) = &result {
            tracing::debug!(action = %name, error = %err, "action failed");
        }
        if let (Some(log), Some(sequence)) = (&self.log, sequence) {
            if let Ok(mut log) = log.lock() {
                let outcome = match &result {
                    Ok(()) => DispatchOutcome::Completed,
                    Err(err) => DispatchOutcome::Failed(err.to_string()),
                };
                log.complete(sequence, outcome);
            }
        }
        result
    }
}

/// Simple glob pattern matching supporting `*` and `?`.
///
/// - `*` matches zero or more characters
/// - `?` matches exactly one character
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut pi = 0;
    let mut ti = 0;
    let mut star_pi = None;
    let mut star_ti = 0;

    while ti < text.len() {
        if pi < pattern.len() && (pattern[pi] == '?' || pattern[pi] == text[ti]) {
            pi += 1;
            ti += 1;
        } else if pi < pattern.len() && pattern[pi] == '*' {
            star_pi = Some(pi);
            star_ti = ti;
            pi += 1;
        } else if let Some(spi) = star_pi {
            pi = spi + 1;
            star_ti += 1;
            ti = star_ti;
        } else {
            return false;
        }
    }

    while pi < pattern.len() && pattern[pi] == '*' {
        pi += 1;
    }

    pi == pattern.len()
}
