//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vi.
//! The Vi project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

//! Static substitution tables for English text.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::errors::{Result, ViError};

/// Character groups and their leetspeak replacement, searched in order.
///
/// Longer groups come first so that e.g. `banned` becomes `b&` before the
/// single-letter rules fire.
pub const LEET_MAP: &[(&str, &str)] = &[
    ("anned", "&"),
    ("and", "&"),
    ("what", "wat"),
    ("are", "r"),
    ("ate", "8"),
    ("at", "@"),
    ("one", "1"),
    ("you", "u"),
    ("t", "7"),
    ("o", "0"),
    ("e", "3"),
    ("l", "1"),
];

/// Words removed by `remove_articles`.
pub const ARTICLES: &[&str] = &["the", "a", "an", "these", "those", "his", "hers", "their"];

/// ASCII punctuation, same set as C's `ispunct`.
pub const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Latin characters and a visually confusable replacement (mostly Cyrillic).
pub const HOMOGLYPHS: &[(char, char)] = &[
    ('a', '\u{0430}'),
    ('c', '\u{0441}'),
    ('d', '\u{0501}'),
    ('e', '\u{0435}'),
    ('h', '\u{04BB}'),
    ('i', '\u{0456}'),
    ('j', '\u{0458}'),
    ('o', '\u{043E}'),
    ('p', '\u{0440}'),
    ('s', '\u{0455}'),
    ('x', '\u{0445}'),
    ('y', '\u{0443}'),
    ('A', '\u{0410}'),
    ('B', '\u{0412}'),
    ('C', '\u{0421}'),
    ('E', '\u{0415}'),
    ('H', '\u{041D}'),
    ('I', '\u{0406}'),
    ('J', '\u{0408}'),
    ('K', '\u{041A}'),
    ('M', '\u{041C}'),
    ('O', '\u{041E}'),
    ('P', '\u{0420}'),
    ('S', '\u{0405}'),
    ('T', '\u{0422}'),
    ('X', '\u{0425}'),
    ('Y', '\u{04AE}'),
];

/// Returns the confusable replacement for `ch`, if any.
pub fn homoglyph(ch: char) -> Option<char> {
    HOMOGLYPHS
        .iter()
        .find(|(latin, _)| *latin == ch)
        .map(|(_, glyph)| *glyph)
}

const KEYBOARD_ROWS: [&str; 4] = ["1234567890-=", "qwertyuiop[]", "asdfghjkl;'", "zxcvbnm,./"];

/// QWERTY neighbors of every key on the main block.
///
/// Rows are staggered, so key `(r, c)` touches `(r, c±1)`, `(r-1, c)`,
/// `(r-1, c+1)`, `(r+1, c-1)` and `(r+1, c)`. Uppercase letters map to the
/// uppercase form of their neighbors.
pub fn keyboard_neighbors() -> &'static HashMap<char, Vec<char>> {
    static NEIGHBORS: OnceLock<HashMap<char, Vec<char>>> = OnceLock::new();
    NEIGHBORS.get_or_init(build_keyboard_neighbors)
}

fn build_keyboard_neighbors() -> HashMap<char, Vec<char>> {
    let grid: Vec<Vec<char>> = KEYBOARD_ROWS.iter().map(|row| row.chars().collect()).collect();
    let key_at = |row: isize, col: isize| -> Option<char> {
        if row < 0 || col < 0 {
            return None;
        }
        grid.get(row as usize)?.get(col as usize).copied()
    };

    let mut neighbors = HashMap::new();
    for (r, row) in grid.iter().enumerate() {
        for (c, &key) in row.iter().enumerate() {
            let (r, c) = (r as isize, c as isize);
            let around: Vec<char> = [
                (r, c - 1),
                (r, c + 1),
                (r - 1, c),
                (r - 1, c + 1),
                (r + 1, c - 1),
                (r + 1, c),
            ]
            .into_iter()
            .filter_map(|(nr, nc)| key_at(nr, nc))
            .collect();

            if key.is_ascii_lowercase() {
                let upper = around.iter().map(|ch| ch.to_ascii_uppercase()).collect();
                neighbors.insert(key.to_ascii_uppercase(), upper);
            }
            neighbors.insert(key, around);
        }
    }
    neighbors
}

/// Ordered `(expanded, contracted)` pairs, e.g. `("is not", "isn't")`.
pub fn contractions() -> Result<&'static [(String, String)]> {
    static CONTRACTIONS: OnceLock<std::result::Result<Vec<(String, String)>, String>> =
        OnceLock::new();
    CONTRACTIONS
        .get_or_init(|| {
            serde_json::from_str(include_str!("../../data/contractions.json"))
                .map_err(|err| err.to_string())
        })
        .as_deref()
        .map_err(|err| ViError::lexicon(format!("bundled contractions: {err}")))
}

/// Ordered `(contracted, expanded)` pairs, the reverse of [`contractions`].
pub fn expansions() -> Result<Vec<(String, String)>> {
    Ok(contractions()?
        .iter()
        .map(|(expanded, contracted)| (contracted.clone(), expanded.clone()))
        .collect())
}
