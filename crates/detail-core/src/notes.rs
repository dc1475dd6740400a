// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Filterable, groupable note collections
//!
//! [`Notes`] is the sequence handed to renderers. Every operation returns a
//! new collection; notes are shared, never copied or mutated.

use std::ops::Index;
use std::rc::Rc;

use indexmap::IndexMap;
use regex::Regex;

use crate::error::DetailError;
use crate::note::Note;
use crate::value::Value;

/// Notes grouped by an attribute value, in key order.
///
/// The `None` key collects notes where the attribute is unset.
pub type Groups = IndexMap<Option<Value>, Notes>;

/// How [`Notes::filter`] and [`Notes::exclude`] test an attribute
#[derive(Debug, Clone)]
pub enum Matcher {
    /// The attribute equals a value (`None` matches an unset attribute).
    /// A tag equals text holding its name.
    Equals(Option<Value>),
    /// The attribute is text and the pattern matches at its start
    Pattern(Regex),
}

impl Matcher {
    /// Match an exact value
    #[must_use]
    pub fn equals(value: impl Into<Value>) -> Self {
        Self::Equals(Some(value.into()))
    }

    /// Match an unset attribute
    #[must_use]
    pub fn absent() -> Self {
        Self::Equals(None)
    }

    /// Match text values with a regular expression anchored at the start
    ///
    /// # Errors
    ///
    /// Returns `regex::Error` if the pattern is invalid.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(&format!("^(?:{pattern})")).map(Self::Pattern)
    }

    fn is_match(&self, value: Option<&Value>) -> bool {
        match self {
            Self::Equals(None) => value.is_none(),
            Self::Equals(Some(expected)) => value.is_some_and(|value| value.loosely_eq(expected)),
            Self::Pattern(regex) => value
                .and_then(Value::as_str)
                .is_some_and(|text| regex.is_match(text)),
        }
    }
}

/// Key ordering for [`Notes::group`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupOptions {
    /// Sort keys in ascending order
    pub ascending_keys: bool,
    /// Sort keys in descending order (wins over `ascending_keys`)
    pub descending_keys: bool,
    /// Move the `None` key first (wins over `none_key_last`)
    pub none_key_first: bool,
    /// Move the `None` key last
    pub none_key_last: bool,
}

impl GroupOptions {
    /// Sort keys ascending
    #[must_use]
    pub fn ascending(mut self) -> Self {
        self.ascending_keys = true;
        self
    }

    /// Sort keys descending
    #[must_use]
    pub fn descending(mut self) -> Self {
        self.descending_keys = true;
        self
    }

    /// Put the `None` key first
    #[must_use]
    pub fn none_first(mut self) -> Self {
        self.none_key_first = true;
        self
    }

    /// Put the `None` key last
    #[must_use]
    pub fn none_last(mut self) -> Self {
        self.none_key_last = true;
        self
    }

    fn sorted(&self) -> bool {
        self.ascending_keys || self.descending_keys
    }
}

/// An ordered collection of notes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Notes {
    notes: Vec<Rc<Note>>,
}

impl Notes {
    /// Create a collection from notes
    #[must_use]
    pub fn new(notes: Vec<Note>) -> Self {
        notes.into_iter().map(Rc::new).collect()
    }

    /// Number of notes
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Get a note by position
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Note> {
        self.notes.get(index).map(Rc::as_ref)
    }

    /// Iterate in collection order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.notes.iter(),
        }
    }

    /// Notes that failed validation
    #[must_use]
    pub fn invalid(&self) -> Notes {
        self.select(|note| !note.is_valid())
    }

    /// Keep notes whose `attr` satisfies `matcher`
    ///
    /// # Errors
    ///
    /// Returns `DetailError::UnknownField` if a note cannot resolve `attr`.
    pub fn filter(&self, attr: &str, matcher: &Matcher) -> Result<Notes, DetailError> {
        self.partition(attr, matcher, true)
    }

    /// Drop notes whose `attr` satisfies `matcher`
    ///
    /// # Errors
    ///
    /// Returns `DetailError::UnknownField` if a note cannot resolve `attr`.
    pub fn exclude(&self, attr: &str, matcher: &Matcher) -> Result<Notes, DetailError> {
        self.partition(attr, matcher, false)
    }

    /// Group notes by the value of `attr`.
    ///
    /// Keys start in first-seen order. If a sort is requested, the non-`None`
    /// keys are sorted and `None` placed after them; then the `None` key is
    /// moved first or last if asked. A sort with no explicit `None`
    /// placement leaves it last.
    ///
    /// # Errors
    ///
    /// Returns `DetailError::UnknownField` if a note cannot resolve `attr`.
    pub fn group(&self, attr: &str, options: GroupOptions) -> Result<Groups, DetailError> {
        let mut buckets: IndexMap<Option<Value>, Vec<Rc<Note>>> = IndexMap::new();
        for note in &self.notes {
            let key = note.resolve_field(attr)?;
            buckets.entry(key).or_default().push(Rc::clone(note));
        }

        let mut keys: Vec<Option<Value>> = buckets.keys().cloned().collect();
        let has_none = buckets.contains_key(&None);

        if options.sorted() {
            let mut sorted: Vec<Option<Value>> = keys.into_iter().filter(Option::is_some).collect();
            sorted.sort();
            if options.descending_keys {
                sorted.reverse();
            }
            if has_none {
                sorted.push(None);
            }
            keys = sorted;
        }

        let none_first = options.none_key_first;
        let none_last = options.none_key_last || (options.sorted() && !none_first);
        if has_none && (none_first || none_last) {
            keys.retain(Option::is_some);
            if none_first {
                keys.insert(0, None);
            } else {
                keys.push(None);
            }
        }

        Ok(keys
            .into_iter()
            .map(|key| {
                let notes = buckets.swap_remove(&key).unwrap_or_default();
                (key, Notes { notes })
            })
            .collect())
    }

    fn partition(&self, attr: &str, matcher: &Matcher, keep: bool) -> Result<Notes, DetailError> {
        let mut notes = Vec::new();
        for note in &self.notes {
            let value = note.resolve_field(attr)?;
            if matcher.is_match(value.as_ref()) == keep {
                notes.push(Rc::clone(note));
            }
        }
        Ok(Notes { notes })
    }

    fn select(&self, predicate: impl Fn(&Note) -> bool) -> Notes {
        self.notes
            .iter()
            .filter(|note| predicate(note))
            .cloned()
            .collect()
    }
}

impl FromIterator<Rc<Note>> for Notes {
    fn from_iter<I: IntoIterator<Item = Rc<Note>>>(iter: I) -> Self {
        Self {
            notes: iter.into_iter().collect(),
        }
    }
}

impl Index<usize> for Notes {
    type Output = Note;

    fn index(&self, index: usize) -> &Note {
        &self.notes[index]
    }
}

/// Iterator over the notes of a [`Notes`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Rc<Note>>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Note;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Rc::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(Rc::as_ref)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Notes {
    type Item = &'a Note;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use proptest::prelude::*;
    use serde_yaml::Mapping;
    use similar_asserts::assert_eq;

    const SCHEMA: &str = r#"
- label: type
  choices: [api-break, bug, feature, trivial]
- label: summary
- label: scope
  required: false
"#;

    fn schema() -> Rc<Schema> {
        Rc::new(Schema::from_yaml(SCHEMA).expect("schema"))
    }

    fn notes(entries: &[(&str, Option<&str>)]) -> Notes {
        let schema = schema();
        entries
            .iter()
            .enumerate()
            .map(|(i, (kind, scope))| {
                let mut yaml = format!("type: {kind}\nsummary: Note {i}\n");
                if let Some(scope) = scope {
                    yaml.push_str(&format!("scope: {scope}\n"));
                }
                let raw: Mapping = serde_yaml::from_str(&yaml).expect("yaml");
                Rc::new(Note::new(format!("{i}.yaml"), raw, Rc::clone(&schema), None))
            })
            .collect()
    }

    fn paths(notes: &Notes) -> Vec<&str> {
        notes.iter().map(Note::path).collect()
    }

    fn sample() -> Notes {
        notes(&[
            ("bug", Some("cli")),
            ("feature", None),
            ("bug", Some("api")),
            ("chore", None),
            ("trivial", Some("cli")),
        ])
    }

    #[test]
    fn test_filter_and_exclude() {
        let notes = sample();
        let bugs = notes.filter("type", &Matcher::equals("bug")).expect("filter");
        assert_eq!(paths(&bugs), vec!["0.yaml", "2.yaml"]);

        let others = notes.exclude("type", &Matcher::equals("bug")).expect("exclude");
        assert_eq!(paths(&others), vec!["1.yaml", "3.yaml", "4.yaml"]);
    }

    #[test]
    fn test_filter_absent() {
        let notes = sample();
        let unscoped = notes.filter("scope", &Matcher::absent()).expect("filter");
        assert_eq!(paths(&unscoped), vec!["1.yaml", "3.yaml"]);
    }

    #[test]
    fn test_filter_by_validity() {
        let notes = sample();
        let invalid = notes.filter("is_valid", &Matcher::equals(false)).expect("filter");
        assert_eq!(paths(&invalid), vec!["3.yaml"]);
        assert_eq!(paths(&notes.invalid()), vec!["3.yaml"]);
    }

    #[test]
    fn test_pattern_is_anchored_and_skips_non_text() {
        let notes = sample();
        let matched = notes
            .filter("type", &Matcher::pattern("(bug|feat)").expect("pattern"))
            .expect("filter");
        assert_eq!(paths(&matched), vec!["0.yaml", "1.yaml", "2.yaml"]);

        let none = notes
            .filter("type", &Matcher::pattern("ug").expect("pattern"))
            .expect("filter");
        assert!(none.is_empty());

        let booleans = notes
            .filter("is_valid", &Matcher::pattern("true").expect("pattern"))
            .expect("filter");
        assert!(booleans.is_empty());
    }

    #[test]
    fn test_unknown_attribute() {
        let result = sample().filter("colour", &Matcher::equals("red"));
        assert!(matches!(result, Err(DetailError::UnknownField { .. })));
    }

    #[test]
    fn test_group_first_seen_order() {
        let groups = sample().group("scope", GroupOptions::default()).expect("group");
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Some(Value::from("cli")), None, Some(Value::from("api"))]
        );
        assert_eq!(paths(&groups[&Some(Value::from("cli"))]), vec!["0.yaml", "4.yaml"]);
        assert_eq!(paths(&groups[&None]), vec!["1.yaml", "3.yaml"]);
    }

    #[test]
    fn test_group_sorted_puts_none_last() {
        let groups = sample()
            .group("scope", GroupOptions::default().ascending())
            .expect("group");
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Some(Value::from("api")), Some(Value::from("cli")), None]
        );
    }

    #[test]
    fn test_group_descending_none_first() {
        let groups = sample()
            .group("scope", GroupOptions::default().descending().none_first())
            .expect("group");
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![None, Some(Value::from("cli")), Some(Value::from("api"))]
        );
    }

    #[test]
    fn test_group_none_last_without_sort() {
        let groups = sample()
            .group("scope", GroupOptions::default().none_last())
            .expect("group");
        let keys: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![Some(Value::from("cli")), Some(Value::from("api")), None]
        );
    }

    #[test]
    fn test_operations_do_not_mutate() {
        let notes = sample();
        let before = paths(&notes).join(",");
        let _ = notes.filter("type", &Matcher::equals("bug")).expect("filter");
        let _ = notes.group("scope", GroupOptions::default().ascending()).expect("group");
        assert_eq!(paths(&notes).join(","), before);
    }

    fn scopes() -> impl Strategy<Value = Vec<Option<&'static str>>> {
        prop::collection::vec(
            prop::option::of(prop::sample::select(vec!["api", "cli", "docs", "core"])),
            0..24,
        )
    }

    fn build(scopes: &[Option<&str>]) -> Notes {
        let entries: Vec<(&str, Option<&str>)> = scopes.iter().map(|scope| ("bug", *scope)).collect();
        notes(&entries)
    }

    proptest! {
        #[test]
        fn prop_filter_and_exclude_partition(scopes in scopes(), target in prop::option::of("api|cli")) {
            let notes = build(&scopes);
            let matcher = match &target {
                Some(scope) => Matcher::equals(scope.as_str()),
                None => Matcher::absent(),
            };
            let kept = notes.filter("scope", &matcher).unwrap();
            let dropped = notes.exclude("scope", &matcher).unwrap();

            prop_assert_eq!(kept.len() + dropped.len(), notes.len());
            for note in &kept {
                prop_assert!(!dropped.iter().any(|other| other.path() == note.path()));
            }
        }

        #[test]
        fn prop_group_covers_every_note(scopes in scopes()) {
            let notes = build(&scopes);
            let groups = notes.group("scope", GroupOptions::default()).unwrap();

            let total: usize = groups.values().map(Notes::len).sum();
            prop_assert_eq!(total, notes.len());

            let mut distinct: Vec<Option<Value>> = scopes.iter().map(|s| s.map(Value::from)).collect();
            distinct.sort();
            distinct.dedup();
            let mut keys: Vec<Option<Value>> = groups.keys().cloned().collect();
            keys.sort();
            prop_assert_eq!(keys, distinct);
        }

        #[test]
        fn prop_ascending_keys_are_sorted(scopes in scopes(), none_first in any::<bool>()) {
            let notes = build(&scopes);
            let mut options = GroupOptions::default().ascending();
            options.none_key_first = none_first;
            let keys: Vec<Option<Value>> = notes.group("scope", options).unwrap().keys().cloned().collect();

            let present: Vec<&Value> = keys.iter().flatten().collect();
            prop_assert!(present.windows(2).all(|pair| pair[0] <= pair[1]));

            if let Some(position) = keys.iter().position(Option::is_none) {
                let expected = if none_first { 0 } else { keys.len() - 1 };
                prop_assert_eq!(position, expected);
            }
        }
    }
}
