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

use serde::Serialize;

use crate::collection::CollectionArgs;
use crate::config::ButtonLabels;
use crate::config::Mode;
use crate::config::resolve_button_labels;
use crate::config::resolve_decks;
use crate::diagnostics::StderrNotifier;
use crate::error::Fallible;
use crate::types::deck::DeckId;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigReport {
    mode: Mode,
    decks: Vec<DeckId>,
    unresolved_decks: Vec<String>,
    debug: bool,
    button_labels: ButtonLabels,
}

pub fn check_config(args: &CollectionArgs) -> Fallible<()> {
    let report = build_report(args)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn build_report(args: &CollectionArgs) -> Fallible<ConfigReport> {
    let collection = args.open()?;
    let diagnostics = collection.config_diagnostics(Box::new(StderrNotifier));
    let config = &collection.config;
    let mode = Mode::parse(&config.mode)?;
    let resolved = resolve_decks(&config.decks, &collection.db, &diagnostics)?;
    let mut decks: Vec<DeckId> = resolved.ids.into_iter().collect();
    decks.sort();
    Ok(ConfigReport {
        mode,
        decks,
        unresolved_decks: resolved.unresolved,
        debug: config.debug,
        button_labels: resolve_button_labels(&config.button_labels),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::testing::temp_collection;

    #[test]
    fn test_report() -> Fallible<()> {
        let (_dir, args) = temp_collection(
            "mode = \"Exclude\"\ndecks = [\"Cram\", \"Ghost\"]\nbutton_labels = [\"No\", \"Yes\"]\n",
        )?;
        let cram = args.open()?.db.add_deck("Cram")?;
        let report = build_report(&args)?;
        assert_eq!(report.mode, Mode::Blacklist);
        assert_eq!(report.decks, vec![cram]);
        assert_eq!(report.unresolved_decks, vec!["Ghost".to_string()]);
        assert!(!report.debug);
        assert_eq!(report.button_labels.fail, "No");
        assert_eq!(report.button_labels.pass, "Yes");
        Ok(())
    }

    #[test]
    fn test_invalid_mode() -> Fallible<()> {
        let (_dir, args) = temp_collection("mode = \"both\"\n")?;
        assert!(check_config(&args).is_err());
        Ok(())
    }

    #[test]
    fn test_defaults() -> Fallible<()> {
        let (_dir, args) = temp_collection("")?;
        let report = build_report(&args)?;
        assert_eq!(report.mode, Mode::Blacklist);
        assert!(report.decks.is_empty());
        assert_eq!(report.button_labels.fail, "Fail");
        assert_eq!(report.button_labels.pass, "Pass");
        Ok(())
    }
}
