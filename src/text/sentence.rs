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

//! # Sentence-Level Transforms
//!
//! Transforms that act on the whole string at once: `p` is the probability
//! that the sentence is transformed at all.

use std::fmt;
use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

use crate::errors::{Result, ViError};
use crate::transform::{coin, ensure_probability};

const APPLAUSE: &str = "\u{1F44F}";

fn whitespace_runs() -> Result<&'static Regex> {
    static PATTERN: OnceLock<std::result::Result<Regex, String>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\s+").map_err(|err| err.to_string()))
        .as_ref()
        .map_err(|err| ViError::internal(format!("whitespace pattern: {err}")))
}

/// Replaces every whitespace run with a clapping emoji.
///
/// Online writing uses 👏 between words for emphasis; word and token based
/// models see a single unknown token instead of a sentence.
pub fn add_applause<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("add_applause", p)?;
    if coin(rng, p) {
        return Ok(whitespace_runs()?.replace_all(text, APPLAUSE).into_owned());
    }
    Ok(text.to_string())
}

/// Appends `length` random bytes, decoded as UTF-8 with invalid sequences
/// replaced by U+FFFD.
///
/// A spam-disguising technique aimed at character-level models and at
/// features such as total length or character distribution.
pub fn add_bytes<R: Rng + ?Sized>(
    text: &str,
    p: f64,
    length: usize,
    rng: &mut R,
) -> Result<String> {
    ensure_probability("add_bytes", p)?;
    if !coin(rng, p) {
        return Ok(text.to_string());
    }
    let mut noise = vec![0u8; length];
    rng.fill_bytes(&mut noise);
    let mut out = String::with_capacity(text.len() + length);
    out.push_str(text);
    out.push_str(&String::from_utf8_lossy(&noise));
    Ok(out)
}

/// Appends `" love"`.
///
/// A strongly positive word is enough to flip many sentiment-based filters.
pub fn add_love<R: Rng + ?Sized>(text: &str, p: f64, rng: &mut R) -> Result<String> {
    ensure_probability("add_love", p)?;
    if coin(rng, p) {
        return Ok(format!("{text} love"));
    }
    Ok(text.to_string())
}

/// Round-trip translator used by [`add_backtranslation`].
///
/// Implementations typically translate into a pivot language and back with a
/// pair of machine translation models.
pub trait ViBacktranslator: Send + Sync + fmt::Debug {
    fn backtranslate(&self, text: &str) -> Result<String>;
}

/// Paraphrases a sentence by translating it to a pivot language and back.
///
/// Empty input is returned untouched without consulting the translator.
pub fn add_backtranslation<R: Rng + ?Sized>(
    translator: &dyn ViBacktranslator,
    text: &str,
    p: f64,
    rng: &mut R,
) -> Result<String> {
    ensure_probability("add_backtranslation", p)?;
    if text.is_empty() {
        return Ok(String::new());
    }
    if coin(rng, p) {
        return translator
            .backtranslate(text)
            .map_err(|err| ViError::transform("add_backtranslation", err.to_string()));
    }
    Ok(text.to_string())
}
