// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::diagnostics::Diagnostics;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::deck::DeckDirectory;
use crate::types::deck::DeckId;
use crate::types::grade::Grade;

const DEFAULT_FAIL_LABEL: &str = "Fail";
const DEFAULT_PASS_LABEL: &str = "Pass";

/// Configuration as written by the user, before any resolution.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct RawConfig {
    pub mode: String,
    pub decks: Vec<String>,
    pub debug: bool,
    pub button_labels: Vec<String>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Blacklist.to_string(),
            decks: Vec::new(),
            debug: false,
            button_labels: Vec::new(),
        }
    }
}

impl RawConfig {
    /// Load the configuration from a TOML file. A missing file yields the
    /// defaults.
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            log::debug!("No config file at {}, using defaults.", path.display());
            return Ok(Self::default());
        }
        let content = read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        let config: RawConfig = toml::from_str(content)?;
        Ok(config)
    }
}

/// How the configured deck set is interpreted.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Cards in the target decks are excluded from autograding.
    Blacklist,
    /// Only cards in the target decks are autograded.
    Whitelist,
}

impl Mode {
    /// Like [`resolve_mode`], but an unrecognized value is an error.
    pub fn parse(raw: &str) -> Fallible<Self> {
        match resolve_mode(raw) {
            Some(mode) => Ok(mode),
            None => {
                log::error!("Unexpected mode: {raw}");
                fail(format!(
                    "Unexpected mode, {raw:?}. Must be one of 'blacklist', 'exclude', 'whitelist', 'include'."
                ))
            }
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Blacklist => write!(f, "blacklist"),
            Mode::Whitelist => write!(f, "whitelist"),
        }
    }
}

/// Case-insensitively map a mode name or one of its synonyms.
pub fn resolve_mode(raw: &str) -> Option<Mode> {
    match raw.to_lowercase().as_str() {
        "blacklist" | "exclude" => Some(Mode::Blacklist),
        "whitelist" | "include" => Some(Mode::Whitelist),
        _ => None,
    }
}

pub struct ResolvedDecks {
    pub ids: HashSet<DeckId>,
    /// Names with no matching deck, in configuration order.
    pub unresolved: Vec<String>,
}

pub fn resolve_decks(
    names: &[String],
    directory: &dyn DeckDirectory,
    diagnostics: &Diagnostics,
) -> Fallible<ResolvedDecks> {
    let mut ids = HashSet::new();
    let mut unresolved = Vec::new();
    for name in names {
        match directory.deck_id_for_name(name)? {
            Some(id) => {
                ids.insert(id);
            }
            None => {
                diagnostics.warn(&format!("Deck {name:?} not found, ignoring it."));
                unresolved.push(name.clone());
            }
        }
    }
    Ok(ResolvedDecks { ids, unresolved })
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct ButtonLabels {
    pub fail: String,
    pub pass: String,
}

impl ButtonLabels {
    /// The two answer buttons, as the grade each one submits and its label.
    pub fn buttons(&self) -> [(Grade, &str); 2] {
        [(Grade::Again, self.fail.as_str()), (Grade::Good, self.pass.as_str())]
    }
}

/// Use the configured labels only if there are exactly two of them.
pub fn resolve_button_labels(raw: &[String]) -> ButtonLabels {
    match raw {
        [fail, pass] => ButtonLabels {
            fail: fail.clone(),
            pass: pass.clone(),
        },
        _ => ButtonLabels {
            fail: DEFAULT_FAIL_LABEL.to_string(),
            pass: DEFAULT_PASS_LABEL.to_string(),
        },
    }
}

/// The decision-ready grading policy.
#[derive(Clone, Debug)]
pub struct PolicyConfig {
    mode: Mode,
    target_decks: HashSet<DeckId>,
    debug: bool,
}

impl PolicyConfig {
    pub fn new(mode: Mode, target_decks: HashSet<DeckId>, debug: bool) -> Self {
        Self {
            mode,
            target_decks,
            debug,
        }
    }

    /// Resolve the raw configuration against the deck directory. Fails if the
    /// mode is not recognized; unknown deck names are only warned about.
    pub fn resolve(
        raw: &RawConfig,
        directory: &dyn DeckDirectory,
        diagnostics: &Diagnostics,
    ) -> Fallible<Self> {
        let mode = Mode::parse(&raw.mode)?;
        let decks = resolve_decks(&raw.decks, directory, diagnostics)?;
        let mut ids: Vec<DeckId> = decks.ids.iter().copied().collect();
        ids.sort();
        log::info!(
            "Operating in {mode} mode, with decks {:?} | {:?}.",
            raw.decks,
            ids
        );
        Ok(Self::new(mode, decks.ids, raw.debug))
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn target_decks(&self) -> &HashSet<DeckId> {
        &self.target_decks
    }

    pub fn is_debug_mode(&self) -> bool {
        self.debug
    }

    /// Whether cards in this deck bypass time-based grading.
    pub fn is_excluded(&self, deck_id: DeckId) -> bool {
        let listed = self.target_decks.contains(&deck_id);
        match self.mode {
            Mode::Blacklist => listed,
            Mode::Whitelist => !listed,
        }
    }
}
