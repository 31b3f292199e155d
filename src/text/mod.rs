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

//! # Text Transforms
//!
//! Functions for enriching English text, grouped by the unit they act on:
//!
//! - **character**: `add_characters`, `add_contractions`, `add_fat_thumbs`,
//!   `add_homoglyphs`, `add_leet`, `add_whitespace`, `remove_characters`,
//!   `remove_contractions`, `remove_punctuation`, `remove_whitespace`,
//!   `swap_chars`
//! - **word**: `add_hypernyms`, `add_hyponyms`, `add_misspelling`,
//!   `add_parens`, `add_synonyms`, `remove_articles`, `swap_words`
//! - **sentence**: `add_applause`, `add_backtranslation`, `add_bytes`,
//!   `add_love`
//!
//! Every function takes the text, a probability and a random source:
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//! use vix::text;
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let out = text::add_contractions("alice is not dead", 1.0, &mut rng).unwrap();
//! assert_eq!(out, "alice isn't dead");
//! ```
//!
//! The catalog functions below resolve transforms by name for configuration
//! driven policies.

pub mod character;
pub mod sentence;
pub mod word;

use std::sync::Arc;

use crate::errors::{Result, ViError};
use crate::lexicon::ViLexicon;
use crate::transform::{ViFnTransform, ViTransform};

pub use self::character::{
    add_characters, add_contractions, add_fat_thumbs, add_homoglyphs, add_leet, add_whitespace,
    remove_characters, remove_contractions, remove_punctuation, remove_whitespace, swap_chars,
};
pub use self::sentence::{add_applause, add_backtranslation, add_bytes, add_love, ViBacktranslator};
pub use self::word::{
    add_hypernyms, add_hyponyms, add_misspelling, add_parens, add_synonyms, remove_articles,
    swap_words,
};

/// Appended byte count used by the catalog entry for `add_bytes`.
pub const DEFAULT_BYTES_LENGTH: usize = 100;

/// Names resolvable through [`transform_by_name`], with their default
/// probability.
pub const TRANSFORM_NAMES: &[(&str, f64)] = &[
    ("add_characters", 0.01),
    ("add_contractions", 0.5),
    ("add_fat_thumbs", 0.01),
    ("add_homoglyphs", 0.1),
    ("add_leet", 0.2),
    ("add_whitespace", 0.01),
    ("remove_characters", 0.01),
    ("remove_contractions", 0.5),
    ("remove_punctuation", 0.25),
    ("remove_whitespace", 0.1),
    ("swap_chars", 0.05),
    ("add_hypernyms", 0.01),
    ("add_hyponyms", 0.01),
    ("add_misspelling", 0.1),
    ("add_parens", 0.01),
    ("add_synonyms", 0.01),
    ("remove_articles", 1.0),
    ("swap_words", 0.01),
    ("add_applause", 0.1),
    ("add_bytes", 0.1),
    ("add_love", 0.1),
];

/// Default probability of a catalogued transform.
pub fn default_probability(name: &str) -> Option<f64> {
    TRANSFORM_NAMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, p)| *p)
}

/// Resolves a text transform by name, using the bundled lexicon for the
/// word-substitution transforms.
pub fn transform_by_name(name: &str) -> Result<Arc<dyn ViTransform<String>>> {
    transform_by_name_with(name, None)
}

/// Resolves a text transform by name. Word-substitution transforms use
/// `lexicon` when given, the bundled lexicon otherwise.
pub fn transform_by_name_with(
    name: &str,
    lexicon: Option<Arc<ViLexicon>>,
) -> Result<Arc<dyn ViTransform<String>>> {
    macro_rules! plain {
        ($func:path) => {
            ViFnTransform::new(name, |text: &String, p, rng| $func(text, p, rng)).shared()
        };
    }
    macro_rules! lexical {
        ($with:path, $bundled:path) => {
            match lexicon {
                Some(lexicon) => ViFnTransform::new(name, move |text: &String, p, rng| {
                    $with(&lexicon, text, p, rng)
                })
                .shared(),
                None => plain!($bundled),
            }
        };
    }

    let transform = match name {
        "add_characters" => plain!(self::character::add_characters),
        "add_contractions" => plain!(self::character::add_contractions),
        "add_fat_thumbs" => plain!(self::character::add_fat_thumbs),
        "add_homoglyphs" => plain!(self::character::add_homoglyphs),
        "add_leet" => plain!(self::character::add_leet),
        "add_whitespace" => plain!(self::character::add_whitespace),
        "remove_characters" => plain!(self::character::remove_characters),
        "remove_contractions" => plain!(self::character::remove_contractions),
        "remove_punctuation" => plain!(self::character::remove_punctuation),
        "remove_whitespace" => plain!(self::character::remove_whitespace),
        "swap_chars" => plain!(self::character::swap_chars),
        "add_hypernyms" => lexical!(word::add_hypernyms_from, word::add_hypernyms),
        "add_hyponyms" => lexical!(word::add_hyponyms_from, word::add_hyponyms),
        "add_misspelling" => lexical!(word::add_misspelling_from, word::add_misspelling),
        "add_synonyms" => lexical!(word::add_synonyms_from, word::add_synonyms),
        "add_parens" => plain!(word::add_parens),
        "remove_articles" => plain!(word::remove_articles),
        "swap_words" => plain!(word::swap_words),
        "add_applause" => plain!(sentence::add_applause),
        "add_love" => plain!(sentence::add_love),
        "add_bytes" => ViFnTransform::new(name, |text: &String, p, rng| {
            sentence::add_bytes(text, p, DEFAULT_BYTES_LENGTH, rng)
        })
        .shared(),
        other => {
            return Err(ViError::validation(format!(
                "unknown text transform '{other}'"
            )))
        }
    };
    Ok(transform)
}
