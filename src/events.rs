//! Typed listener registries for the notifications collaborators subscribe to.

use std::fmt;
use std::sync::Arc;

use crate::dictionary::Dictionary;
use crate::language::Language;
use crate::page::Page;

/// A fragment was injected into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLoaded {
    pub name: String,
    /// Selector of the container the fragment went into.
    pub target: String,
    /// The embedded template was used instead of the fetched file.
    pub fallback: bool,
}

/// The active language changed and the document was retranslated.
#[derive(Debug, Clone)]
pub struct LanguageChanged {
    pub language: Language,
    pub dictionary: Arc<Dictionary>,
}

/// Startup finished: dictionaries loaded, sidebar injected and bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardReady {
    pub page: Page,
    pub language: Language,
}

/// Handle returned by [`Listeners::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Boxed listener.
type Callback<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Listeners for one event type, called in subscription order.
pub struct Listeners<E> {
    /// Ids are never reused
    next_id: u64,
    /// In subscription order
    entries: Vec<(ListenerId, Callback<E>)>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self { next_id: 0, entries: Vec::new() }
    }
}

impl<E> Listeners<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: impl Fn(&E) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(callback)));
        id
    }

    /// Returns `false` when the id was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub fn emit(&self, event: &E) {
        for (_, callback) in &self.entries {
            callback(event);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners").field("len", &self.entries.len()).finish_non_exhaustive()
    }
}
