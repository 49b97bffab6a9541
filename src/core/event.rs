//! Level-scoped event hooks

use super::{fields::Fields, level::Level};
use crate::events::{FatalEvent, PanicEvent};
use std::collections::HashMap;
use std::fmt;

/// A side effect bound to a level, run after a successful write.
pub trait Event: Send + Sync {
    fn fire(&self, message: &str, defaults: &Fields);

    fn name(&self) -> &str {
        "event"
    }
}

impl<F> Event for F
where
    F: Fn(&str, &Fields) + Send + Sync,
{
    fn fire(&self, message: &str, defaults: &Fields) {
        self(message, defaults)
    }
}

/// Ordered hook lists per level.
///
/// Panic and Fatal lists always end with their built-in terminator; hooks
/// added at those levels go immediately before it.
pub struct EventMap {
    events: HashMap<Level, Vec<Box<dyn Event>>>,
}

impl EventMap {
    pub fn new() -> Self {
        let mut events: HashMap<Level, Vec<Box<dyn Event>>> = HashMap::new();
        events.insert(Level::Panic, vec![Box::new(PanicEvent)]);
        events.insert(Level::Fatal, vec![Box::new(FatalEvent)]);
        Self { events }
    }

    /// Add a hook, keeping the terminator last for Panic and Fatal
    pub fn insert(&mut self, level: Level, event: Box<dyn Event>) {
        let list = self.events.entry(level).or_default();
        if level.is_terminal() {
            let index = list.len().saturating_sub(1);
            list.insert(index, event);
        } else {
            list.push(event);
        }
    }

    pub fn get(&self, level: Level) -> &[Box<dyn Event>] {
        self.events.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, level: Level) -> usize {
        self.get(level).len()
    }

    pub fn is_empty(&self, level: Level) -> bool {
        self.get(level).is_empty()
    }

    /// True when `level` is not terminal, or its list ends with the built-in
    /// terminator
    pub fn is_terminal_last(&self, level: Level) -> bool {
        if !level.is_terminal() {
            return true;
        }
        let expected = if level == Level::Panic { "panic" } else { "fatal" };
        self.get(level).last().map(|e| e.name()) == Some(expected)
    }

    /// Run every hook for `level` in registration order. No short-circuit.
    pub fn fire(&self, level: Level, message: &str, defaults: &Fields) {
        for event in self.get(level) {
            event.fire(message, defaults);
        }
    }
}

impl Default for EventMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for level in Level::ALL {
            let names: Vec<&str> = self.get(level).iter().map(|e| e.name()).collect();
            if !names.is_empty() {
                map.entry(&level, &names);
            }
        }
        map.finish()
    }
}
