//! Search trace: an append-only log of visited nodes
//!
//! The recorder is purely observational. Search pushes one entry per node
//! visit (on entry, after each child, and at terminal leaves) and forwards it
//! to an optional observer; nothing here feeds back into move selection.

use std::fmt;

use tracing::trace;

use crate::board::Pos;

use super::minimax::SearchMode;

/// Positive infinity sentinel for values and bounds
pub const INF: i32 = i32::MAX;
/// Negative infinity sentinel for values and bounds
pub const NEG_INF: i32 = -INF;

/// Render a value, writing the sentinels as `Infinity` / `-Infinity`
pub fn format_value(value: i32) -> String {
    if value == INF {
        "Infinity".to_string()
    } else if value <= NEG_INF {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

/// One visited search node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceEntry {
    /// Move that led into this node; `None` at the root
    pub node: Option<Pos>,
    pub depth: u32,
    /// Best value known at the time of recording
    pub value: i32,
    pub alpha: i32,
    pub beta: i32,
}

impl TraceEntry {
    /// Move label, `root` for any depth-0 entry
    pub fn label(&self) -> String {
        match self.node {
            Some(pos) if self.depth > 0 => pos.to_string(),
            _ => "root".to_string(),
        }
    }

    /// Comma-separated line; bounds are only included for alpha-beta.
    pub fn render(&self, mode: SearchMode) -> String {
        match mode {
            SearchMode::AlphaBeta => format!(
                "{},{},{},{},{}",
                self.label(),
                self.depth,
                format_value(self.value),
                format_value(self.alpha),
                format_value(self.beta)
            ),
            SearchMode::Greedy | SearchMode::Minimax => {
                format!("{},{},{}", self.label(), self.depth, format_value(self.value))
            }
        }
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(SearchMode::AlphaBeta))
    }
}

/// Callback invoked after every recorded node visit
pub trait SearchObserver {
    fn on_node(&mut self, entry: &TraceEntry);
}

impl<F: FnMut(&TraceEntry)> SearchObserver for F {
    fn on_node(&mut self, entry: &TraceEntry) {
        self(entry)
    }
}

/// Observer that emits each node as a `trace`-level event
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl SearchObserver for TracingObserver {
    fn on_node(&mut self, entry: &TraceEntry) {
        trace!(
            node = %entry.label(),
            depth = entry.depth,
            value = %format_value(entry.value),
            alpha = %format_value(entry.alpha),
            beta = %format_value(entry.beta),
            "visit"
        );
    }
}

/// Append-only trace with an optional observer
#[derive(Default)]
pub struct TraceRecorder<'o> {
    entries: Vec<TraceEntry>,
    observer: Option<&'o mut dyn SearchObserver>,
}

impl<'o> TraceRecorder<'o> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            observer: None,
        }
    }

    pub fn with_observer(observer: &'o mut dyn SearchObserver) -> Self {
        Self {
            entries: Vec::new(),
            observer: Some(observer),
        }
    }

    pub fn record(&mut self, entry: TraceEntry) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_node(&entry);
        }
        self.entries.push(entry);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<TraceEntry> {
        self.entries
    }
}
