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

//! # Word-Level Transforms
//!
//! Text is split on whitespace and re-joined with single spaces, so runs of
//! whitespace collapse whenever one of these transforms runs.
//!
//! Lexicon-backed transforms come in two forms: `add_synonyms` uses the
//! bundled lexicon, `add_synonyms_from` takes any [`ViLexicon`].

use rand::seq::SliceRandom;
use rand::Rng;

use crate::errors::Result;
use crate::lexicon::tables::ARTICLES;
use crate::lexicon::{ViLexicon, ViLexiconKind};
use crate::text::character::swap_adjacent;
use crate::transform::{coin, ensure_probability};

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Replaces whole words according to an ordered mapping.
///
/// A word matches a pattern when its lowercase form equals it. Words replaced
/// by an empty string are dropped from the output.
pub fn sub_words<R, P, S>(text: &str, p: f64, mapping: &[(P, S)], rng: &mut R) -> Result<String>
where
    R: Rng + ?Sized,
    P: AsRef<str>,
    S: AsRef<str>,
{
    ensure_probability("sub_words", p)?;
    let mut words = split_words(text);
    for (pattern, replacement) in mapping {
        for word in words.iter_mut() {
            if word.to_lowercase() == pattern.as_ref() && coin(rng, p) {
                *word = replacement.as_ref().to_string();
            }
        }
    }
    Ok(words
        .into_iter()
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" "))
}

fn sub_from_lexicon<R: Rng + ?Sized>(
    name: &str,
    lexicon: &ViLexicon,
    kind: ViLexiconKind,
    text: &str,
    p: f64,
    rng: &mut R,
) -> Result<String> {
    ensure_probability(name, p)?;
    let mut words = split_words(text);
    for word in words.iter_mut() {
        let Some(choices) = lexicon.lemma_lookup(kind, word) else {
            continue;
        };
        if coin(rng, p) {
            if let Some(choice) = choices.choose(rng) {
                *word = choice.clone();
            }
        }
    }
    Ok(words.join(" "))
}

/// Replaces words with a broader category (`dogs` -> `canine`).
///
/// A negative-sampling transform: the meaning stays related but becomes too
/// general for the context.
pub fn add_hypernyms<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    add_hypernyms_from(ViLexicon::bundled()?, text, p, rng)
}

pub fn add_hypernyms_from<R: Rng + ?Sized>(
    lexicon: &ViLexicon,
    text: &str,
    p: f64,
    rng: &mut R,
) -> Result<String> {
    sub_from_lexicon("add_hypernyms", lexicon, ViLexiconKind::Hypernyms, text, p, rng)
}

/// Replaces words with a narrower category (`dog` -> `australian shepherd`).
pub fn add_hyponyms<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    add_hyponyms_from(ViLexicon::bundled()?, text, p, rng)
}

pub fn add_hyponyms_from<R: Rng + ?Sized>(
    lexicon: &ViLexicon,
    text: &str,
    p: f64,
    rng: &mut R,
) -> Result<String> {
    sub_from_lexicon("add_hyponyms", lexicon, ViLexiconKind::Hyponyms, text, p, rng)
}

/// Replaces words with one of close meaning (`go` -> `depart`).
pub fn add_synonyms<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    add_synonyms_from(ViLexicon::bundled()?, text, p, rng)
}

pub fn add_synonyms_from<R: Rng + ?Sized>(
    lexicon: &ViLexicon,
    text: &str,
    p: f64,
    rng: &mut R,
) -> Result<String> {
    sub_from_lexicon("add_synonyms", lexicon, ViLexiconKind::Synonyms, text, p, rng)
}

/// Replaces words with a known common misspelling.
///
/// Lookup is exact (no lowercasing or lemmatisation), since misspellings are
/// recorded per surface form.
pub fn add_misspelling<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    add_misspelling_from(ViLexicon::bundled()?, text, p, rng)
}

pub fn add_misspelling_from<R: Rng + ?Sized>(
    lexicon: &ViLexicon,
    text: &str,
    p: f64,
    rng: &mut R,
) -> Result<String> {
    ensure_probability("add_misspelling", p)?;
    let mut words = split_words(text);
    for word in words.iter_mut() {
        let Some(choices) = lexicon.lookup(ViLexiconKind::Misspellings, word) else {
            continue;
        };
        if coin(rng, p) {
            if let Some(choice) = choices.choose(rng) {
                *word = choice.clone();
            }
        }
    }
    Ok(words.join(" "))
}

/// Wraps words in triple parentheses: `(((term)))`.
pub fn add_parens<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("add_parens", p)?;
    let words: Vec<String> = split_words(text)
        .into_iter()
        .map(|word| {
            if coin(rng, p) {
                format!("((({word})))")
            } else {
                word
            }
        })
        .collect();
    Ok(words.join(" "))
}

/// Removes articles and possessive determiners (`the`, `a`, `an`, `these`,
/// `those`, `his`, `hers`, `their`).
pub fn remove_articles<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("remove_articles", p)?;
    let mapping: Vec<(&str, &str)> = ARTICLES.iter().map(|article| (*article, "")).collect();
    sub_words(text, p, &mapping, rng)
}

/// Swaps adjacent words; each word moves at most one position.
pub fn swap_words<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("swap_words", p)?;
    let mut words = split_words(text);
    swap_adjacent(&mut words, p, rng);
    Ok(words.join(" "))
}
