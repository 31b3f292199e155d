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

//! # Lexicon Module
//!
//! Read-only lookup into word-level lexical resources: synonym, hypernym and
//! hyponym sets (WordNet style) and a table of common misspellings.
//!
//! A small English lexicon is compiled into the crate and exposed through
//! [`ViLexicon::bundled`]. Larger resources can be exported to JSON
//! (`{"word": ["replacement", ...]}`) and loaded with
//! [`ViLexicon::from_dir`].
//!
//! ```rust
//! use vix::lexicon::{ViLexicon, ViLexiconKind};
//!
//! let lexicon = ViLexicon::bundled().unwrap();
//! assert_eq!(lexicon.lemma(ViLexiconKind::Hypernyms, "Dogs"), Some("dog"));
//! ```

pub mod tables;

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, ViError};

/// Mapping of a headword to its candidate replacements.
pub type ViWordTable = HashMap<String, Vec<String>>;

/// The four word tables a lexicon carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViLexiconKind {
    Synonyms,
    Hypernyms,
    Hyponyms,
    Misspellings,
}

impl ViLexiconKind {
    pub const ALL: [ViLexiconKind; 4] = [
        ViLexiconKind::Synonyms,
        ViLexiconKind::Hypernyms,
        ViLexiconKind::Hyponyms,
        ViLexiconKind::Misspellings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViLexiconKind::Synonyms => "synonyms",
            ViLexiconKind::Hypernyms => "hypernyms",
            ViLexiconKind::Hyponyms => "hyponyms",
            ViLexiconKind::Misspellings => "misspellings",
        }
    }

    /// File name used by [`ViLexicon::from_dir`].
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

/// Word-level lexical resource.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ViLexicon {
    #[serde(default)]
    synonyms: ViWordTable,
    #[serde(default)]
    hypernyms: ViWordTable,
    #[serde(default)]
    hyponyms: ViWordTable,
    #[serde(default)]
    misspellings: ViWordTable,
}

impl ViLexicon {
    /// Creates an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lexicon compiled into the crate, parsed once per process.
    pub fn bundled() -> Result<&'static ViLexicon> {
        static BUNDLED: OnceLock<std::result::Result<ViLexicon, String>> = OnceLock::new();
        BUNDLED
            .get_or_init(|| Self::parse_bundled().map_err(|err| err.to_string()))
            .as_ref()
            .map_err(|err| ViError::lexicon(format!("bundled lexicon: {err}")))
    }

    fn parse_bundled() -> Result<Self> {
        let mut lexicon = Self::new();
        lexicon.load_table(
            ViLexiconKind::Synonyms,
            include_str!("../../data/synonyms.json"),
        )?;
        lexicon.load_table(
            ViLexiconKind::Hypernyms,
            include_str!("../../data/hypernyms.json"),
        )?;
        lexicon.load_table(
            ViLexiconKind::Hyponyms,
            include_str!("../../data/hyponyms.json"),
        )?;
        lexicon.load_table(
            ViLexiconKind::Misspellings,
            include_str!("../../data/misspellings.json"),
        )?;
        Ok(lexicon)
    }

    /// Loads `synonyms.json`, `hypernyms.json`, `hyponyms.json` and
    /// `misspellings.json` from `dir`. Missing files leave that table empty.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ViError::validation(format!(
                "lexicon directory '{}' does not exist",
                dir.display()
            )));
        }

        let mut lexicon = Self::new();
        for kind in ViLexiconKind::ALL {
            let path = dir.join(kind.file_name());
            if !path.exists() {
                log::warn!(
                    "lexicon table '{}' not found in {}, leaving it empty",
                    kind.as_str(),
                    dir.display()
                );
                continue;
            }
            let raw = fs::read_to_string(&path)?;
            lexicon.load_table(kind, &raw)?;
        }

        log::info!(
            "loaded lexicon from {} ({} synonyms, {} hypernyms, {} hyponyms, {} misspellings)",
            dir.display(),
            lexicon.synonyms.len(),
            lexicon.hypernyms.len(),
            lexicon.hyponyms.len(),
            lexicon.misspellings.len()
        );
        Ok(lexicon)
    }

    /// Parses a JSON object of `word -> [replacements]` into the given table,
    /// replacing its previous content.
    pub fn load_table(&mut self, kind: ViLexiconKind, json: &str) -> Result<()> {
        let table: ViWordTable = serde_json::from_str(json)
            .map_err(|err| ViError::lexicon(format!("{}: {err}", kind.as_str())))?;
        self.set_table(kind, table)
    }

    /// Builder-style variant of [`ViLexicon::load_table`] for in-memory data.
    pub fn with_table(mut self, kind: ViLexiconKind, table: ViWordTable) -> Result<Self> {
        self.set_table(kind, table)?;
        Ok(self)
    }

    fn set_table(&mut self, kind: ViLexiconKind, table: ViWordTable) -> Result<()> {
        if let Some((word, _)) = table.iter().find(|(_, values)| values.is_empty()) {
            return Err(ViError::lexicon(format!(
                "{}: entry '{word}' has no replacements",
                kind.as_str()
            )));
        }
        *self.table_mut(kind) = table;
        Ok(())
    }

    pub fn table(&self, kind: ViLexiconKind) -> &ViWordTable {
        match kind {
            ViLexiconKind::Synonyms => &self.synonyms,
            ViLexiconKind::Hypernyms => &self.hypernyms,
            ViLexiconKind::Hyponyms => &self.hyponyms,
            ViLexiconKind::Misspellings => &self.misspellings,
        }
    }

    fn table_mut(&mut self, kind: ViLexiconKind) -> &mut ViWordTable {
        match kind {
            ViLexiconKind::Synonyms => &mut self.synonyms,
            ViLexiconKind::Hypernyms => &mut self.hypernyms,
            ViLexiconKind::Hyponyms => &mut self.hyponyms,
            ViLexiconKind::Misspellings => &mut self.misspellings,
        }
    }

    /// Exact headword lookup.
    pub fn lookup(&self, kind: ViLexiconKind, word: &str) -> Option<&[String]> {
        self.table(kind).get(word).map(Vec::as_slice)
    }

    /// Finds the headword `word` inflects, if the table knows it.
    ///
    /// The word is lowercased and tried as-is, then with the regular English
    /// plural endings stripped (`-ies`, `-ves`, `-es`, `-s`).
    pub fn lemma(&self, kind: ViLexiconKind, word: &str) -> Option<&str> {
        let table = self.table(kind);
        lemma_candidates(word)
            .into_iter()
            .find_map(|candidate| table.get_key_value(&candidate).map(|(key, _)| key.as_str()))
    }

    /// Replacements for `word` after lemmatisation.
    pub fn lemma_lookup(&self, kind: ViLexiconKind, word: &str) -> Option<&[String]> {
        let lemma = self.lemma(kind, word)?;
        self.lookup(kind, lemma)
    }

    pub fn is_empty(&self) -> bool {
        ViLexiconKind::ALL.iter().all(|kind| self.table(*kind).is_empty())
    }
}

fn lemma_candidates(word: &str) -> Vec<String> {
    let lower = word.to_lowercase();
    let mut candidates = vec![lower.clone()];

    if let Some(stem) = lower.strip_suffix("ies").filter(|stem| !stem.is_empty()) {
        candidates.push(format!("{stem}y"));
    }
    if let Some(stem) = lower.strip_suffix("ves").filter(|stem| !stem.is_empty()) {
        candidates.push(format!("{stem}f"));
    }
    if let Some(stem) = lower.strip_suffix("es").filter(|stem| !stem.is_empty()) {
        candidates.push(stem.to_string());
    }
    if !lower.ends_with("ss") {
        if let Some(stem) = lower.strip_suffix('s').filter(|stem| !stem.is_empty()) {
            candidates.push(stem.to_string());
        }
    }
    candidates
}
