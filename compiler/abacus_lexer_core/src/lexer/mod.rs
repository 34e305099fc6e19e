//! Multi-pattern longest-match lexer.
//!
//! All registered patterns run simultaneously as one NFA simulation. At each
//! step every live node that matches the next character contributes its
//! outputs to the next state set; a live `End` node that cannot consume
//! records a candidate match ending at the current position. The best
//! candidate is the longest; equal lengths go to the id ranked highest by
//! the caller's tie-break, then to the most recently registered pattern.

use std::cmp::Ordering;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::pattern::{NodeKind, Pattern, PatternError};

/// A match of one pattern over `text[start..end]` (byte offsets).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match<T> {
    pub start: usize,
    pub end: usize,
    pub id: T,
}

impl<T> Match<T> {
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The matched slice of the text this match was produced from.
    pub fn as_str<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Registry of compiled patterns, keyed by `(source, id)`.
pub struct Lexer<T> {
    patterns: Vec<Pattern<T>>,
}

impl<T> Default for Lexer<T> {
    fn default() -> Self {
        Lexer {
            patterns: Vec::new(),
        }
    }
}

impl<T: Clone + PartialEq + std::fmt::Debug> Lexer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and register `source` under `id`.
    ///
    /// Re-registering the same `(source, id)` pair replaces the old entry and
    /// moves it to the most recent registration slot. A pattern that fails
    /// to compile is not registered.
    pub fn register(&mut self, source: &str, id: T) -> Result<(), PatternError> {
        let pattern = Pattern::compile(source, id)?;
        self.patterns
            .retain(|p| !(p.source() == source && p.id() == pattern.id()));
        debug!(source, id = ?pattern.id(), "registered pattern");
        self.patterns.push(pattern);
        Ok(())
    }

    /// Remove the pattern registered as `(source, id)`. Returns whether one
    /// was present.
    pub fn unregister(&mut self, source: &str, id: &T) -> bool {
        let before = self.patterns.len();
        self.patterns
            .retain(|p| !(p.source() == source && p.id() == id));
        let removed = self.patterns.len() != before;
        if removed {
            debug!(source, ?id, "unregistered pattern");
        }
        removed
    }

    pub fn contains(&self, source: &str, id: &T) -> bool {
        self.patterns
            .iter()
            .any(|p| p.source() == source && p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Find the best match starting at byte offset `start`.
    ///
    /// `tie_break` orders ids; among equally long matches the greatest id
    /// wins. Returns `None` when no pattern matches at `start`.
    pub fn lex_one<F>(&self, text: &str, start: usize, tie_break: F) -> Option<Match<T>>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        let mut current: Vec<FxHashSet<usize>> = self
            .patterns
            .iter()
            .map(|p| {
                let mut set = FxHashSet::default();
                p.closure_into(p.head(), &mut set);
                set
            })
            .collect();
        let mut next: Vec<FxHashSet<usize>> = vec![FxHashSet::default(); self.patterns.len()];

        // best candidate and the registration slot it came from
        let mut best: Option<(Match<T>, usize)> = None;
        let mut chars = text[start..].char_indices();
        let mut index = start;

        while current.iter().any(|set| !set.is_empty()) {
            let step = chars.next();
            for (slot, pattern) in self.patterns.iter().enumerate() {
                for &node_id in &current[slot] {
                    let node = pattern.node(node_id);
                    match step {
                        Some((_, c)) if node.kind.matches(c) => {
                            pattern.outputs_into(node_id, &mut next[slot]);
                        }
                        _ => {
                            if let NodeKind::End(id) = &node.kind {
                                let candidate = Match {
                                    start,
                                    end: index,
                                    id: id.clone(),
                                };
                                if better(&candidate, slot, best.as_ref(), &tie_break) {
                                    best = Some((candidate, slot));
                                }
                            }
                        }
                    }
                }
            }
            std::mem::swap(&mut current, &mut next);
            for set in &mut next {
                set.clear();
            }
            match step {
                Some((offset, c)) => index = start + offset + c.len_utf8(),
                None => break,
            }
        }

        let found = best.map(|(m, _)| m);
        trace!(start, found = ?found, "lex_one");
        found
    }

    /// Tokenize `text` from `start` to the end.
    ///
    /// Fails (returns `None`) when some position has no match, when a match
    /// is empty, or when there is nothing to lex. On success the matches are
    /// contiguous and cover `text[start..]`.
    pub fn lex_all<F>(&self, text: &str, start: usize, tie_break: F) -> Option<Vec<Match<T>>>
    where
        F: Fn(&T, &T) -> Ordering,
    {
        if start >= text.len() {
            return None;
        }
        let mut index = start;
        let mut matches = Vec::new();
        while index < text.len() {
            let found = self.lex_one(text, index, &tie_break)?;
            if found.is_empty() {
                debug!(offset = index, "zero-length match, aborting");
                return None;
            }
            index = found.end;
            matches.push(found);
        }
        Some(matches)
    }
}

fn better<T, F>(candidate: &Match<T>, slot: usize, best: Option<&(Match<T>, usize)>, tie_break: &F) -> bool
where
    F: Fn(&T, &T) -> Ordering,
{
    let Some((current, current_slot)) = best else {
        return true;
    };
    candidate
        .len()
        .cmp(&current.len())
        .then_with(|| tie_break(&candidate.id, &current.id))
        .then_with(|| slot.cmp(current_slot))
        == Ordering::Greater
}

#[cfg(test)]
mod tests;
