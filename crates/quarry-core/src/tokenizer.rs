//! Explodes `;`-delimited multi-valued fields into `(id, token)` pairs.

use std::str::Split;

/// Separator between labels in a multi-valued field.
pub const DELIMITER: char = ';';

/// Lazy iterator over the non-empty tokens of one field value.
///
/// A clone resumes from the same position; a fresh [`tokens`] call replays
/// the whole sequence.
#[derive(Debug, Clone)]
pub struct Tokens<'a, I> {
    id: I,
    parts: Split<'a, char>,
}

impl<'a, I: Clone> Iterator for Tokens<'a, I> {
    type Item = (I, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.parts
            .by_ref()
            .find(|part| !part.is_empty())
            .map(|token| (self.id.clone(), token))
    }
}

/// Split `value` on `;`, pairing every non-empty token with `id`.
///
/// An empty `value` yields nothing. Tokens are not trimmed.
pub fn tokens<I: Clone>(id: I, value: &str) -> Tokens<'_, I> {
    Tokens {
        id,
        parts: value.split(DELIMITER),
    }
}
