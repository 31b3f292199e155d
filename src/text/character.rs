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

//! # Character-Level Transforms
//!
//! Typographic noise (fat thumbs, dropped or doubled characters, swapped
//! neighbors), substitution tables (leetspeak, contractions, homoglyphs) and
//! whitespace/punctuation manipulation.
//!
//! All functions operate on Unicode scalar values and never split a code
//! point. Substitution tables only contain lowercase ASCII patterns, matched
//! case-insensitively.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::Result;
use crate::lexicon::tables::{self, LEET_MAP, PUNCTUATION};
use crate::transform::{coin, ensure_probability};

const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Replaces substrings according to an ordered mapping.
///
/// For each `(pattern, replacement)` pair, in order, the text is scanned left
/// to right for case-insensitive occurrences of `pattern`. Each occurrence is
/// replaced with probability `p`, after which scanning resumes behind the
/// replacement. Because patterns run one after the other, a later pattern can
/// match inside an earlier replacement, so the order of overlapping patterns
/// matters.
pub fn sub_chars<R, P, S>(text: &str, p: f64, mapping: &[(P, S)], rng: &mut R) -> Result<String>
where
    R: Rng + ?Sized,
    P: AsRef<str>,
    S: AsRef<str>,
{
    ensure_probability("sub_chars", p)?;
    let mut chars: Vec<char> = text.chars().collect();

    for (pattern, replacement) in mapping {
        let pattern: Vec<char> = pattern.as_ref().chars().collect();
        if pattern.is_empty() {
            continue;
        }
        let replacement: Vec<char> = replacement.as_ref().chars().collect();

        let mut index = 0;
        while let Some(found) = find_from(&chars, &pattern, index) {
            if coin(rng, p) {
                chars.splice(found..found + pattern.len(), replacement.iter().copied());
                index = found + replacement.len();
            } else {
                index = found + pattern.len();
            }
        }
    }

    Ok(chars.into_iter().collect())
}

fn find_from(haystack: &[char], needle: &[char], start: usize) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    (start..=haystack.len() - needle.len()).find(|&at| {
        haystack[at..at + needle.len()]
            .iter()
            .zip(needle)
            .all(|(h, n)| h.to_ascii_lowercase() == *n)
    })
}

/// Inserts random ASCII letters.
///
/// Every position, walked from the last character to the first, receives a
/// new letter in front of it with probability `p`.
pub fn add_characters<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("add_characters", p)?;
    let mut chars: Vec<char> = text.chars().collect();
    for index in (0..chars.len()).rev() {
        if coin(rng, p) {
            if let Some(&letter) = ASCII_LETTERS.choose(rng) {
                chars.insert(index, letter as char);
            }
        }
    }
    Ok(chars.into_iter().collect())
}

/// Replaces common word pairs with their contraction (`is not` -> `isn't`).
///
/// Contractions are applied even where they introduce ambiguity; the result
/// is treated as meaning-preserving.
pub fn add_contractions<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("add_contractions", p)?;
    sub_chars(text, p, tables::contractions()?, rng)
}

/// Expands contractions into their individual words (`isn't` -> `is not`).
pub fn remove_contractions<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("remove_contractions", p)?;
    sub_chars(text, p, &tables::expansions()?, rng)
}

/// Replaces characters with a neighboring key on a QWERTY keyboard.
pub fn add_fat_thumbs<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("add_fat_thumbs", p)?;
    let neighbors = tables::keyboard_neighbors();
    let out = text
        .chars()
        .map(|ch| match neighbors.get(&ch) {
            Some(keys) if coin(rng, p) => keys.choose(rng).copied().unwrap_or(ch),
            _ => ch,
        })
        .collect();
    Ok(out)
}

/// Replaces Latin letters with visually confusable code points.
///
/// The output renders nearly identically for a human reader while sharing
/// few bytes with the input, which defeats exact-match and most token-based
/// classifiers.
pub fn add_homoglyphs<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("add_homoglyphs", p)?;
    let out = text
        .chars()
        .map(|ch| match tables::homoglyph(ch) {
            Some(glyph) if coin(rng, p) => glyph,
            _ => ch,
        })
        .collect();
    Ok(out)
}

/// Replaces character groups with visually or aurally similar ones.
///
/// With every group replaced:
///
/// ```text
/// Hello, you are banned
/// Hello, you are b&
/// Hello, you r b&
/// Hello, u r b&
/// H3110, u r b&
/// ```
pub fn add_leet<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("add_leet", p)?;
    sub_chars(text, p, LEET_MAP, rng)
}

/// Inserts spaces. Each of the `len + 1` gaps gets one with probability `p`.
pub fn add_whitespace<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("add_whitespace", p)?;
    let mut chars: Vec<char> = text.chars().collect();
    for index in (0..=chars.len()).rev() {
        if coin(rng, p) {
            chars.insert(index, ' ');
        }
    }
    Ok(chars.into_iter().collect())
}

/// Drops each character with probability `p`.
pub fn remove_characters<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("remove_characters", p)?;
    let mut chars: Vec<char> = text.chars().collect();
    for index in (0..chars.len()).rev() {
        if coin(rng, p) {
            chars.remove(index);
        }
    }
    Ok(chars.into_iter().collect())
}

/// Removes ASCII punctuation with probability `p` per occurrence.
///
/// Punctuation inside a word (possessives, contractions) changes meaning when
/// removed, so this transform is not always semantics-preserving.
pub fn remove_punctuation<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("remove_punctuation", p)?;
    let mapping: Vec<(String, &str)> = PUNCTUATION.chars().map(|ch| (ch.to_string(), "")).collect();
    sub_chars(text, p, &mapping, rng)
}

/// Removes space characters with probability `p` per occurrence.
pub fn remove_whitespace<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("remove_whitespace", p)?;
    sub_chars(text, p, &[(" ", "")], rng)
}

/// Swaps adjacent characters.
///
/// Pairs are visited left to right and swapped with probability `p`; a
/// swapped character is skipped afterwards, so nothing moves further than
/// one position from where it started.
pub fn swap_chars<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("swap_chars", p)?;
    let mut chars: Vec<char> = text.chars().collect();
    swap_adjacent(&mut chars, p, rng);
    Ok(chars.into_iter().collect())
}

pub(crate) fn swap_adjacent<T, R: Rng + ?Sized>(items: &mut [T], p: f64, rng: &mut R) {
    let mut index = 0;
    while index + 1 < items.len() {
        if coin(rng, p) {
            items.swap(index, index + 1);
            index += 2;
        } else {
            index += 1;
        }
    }
}
