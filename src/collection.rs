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

use std::path::Path;
use std::path::PathBuf;

use crate::config::PolicyConfig;
use crate::config::RawConfig;
use crate::db::Database;
use crate::diagnostics::Diagnostics;
use crate::diagnostics::Notifier;
use crate::error::ErrorReport;
use crate::error::Fallible;

/// The review store together with the grading configuration.
pub struct Collection {
    pub db: Database,
    pub config: RawConfig,
}

impl Collection {
    pub fn open(db_path: &Path, config_path: &Path) -> Fallible<Self> {
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        log::debug!("Opening database at {db_path}");
        let db = Database::new(db_path)?;
        let config = RawConfig::load(config_path)?;
        Ok(Self { db, config })
    }

    /// Diagnostics for resolving the configuration itself, before a policy
    /// exists to carry the debug flag.
    pub fn config_diagnostics(&self, notifier: Box<dyn Notifier>) -> Diagnostics {
        Diagnostics::new(self.config.debug, notifier)
    }

    pub fn policy(&self, notifier: Box<dyn Notifier>) -> Fallible<PolicyConfig> {
        let diagnostics = self.config_diagnostics(notifier);
        PolicyConfig::resolve(&self.config, &self.db, &diagnostics)
    }
}

/// Paths shared by every command.
#[derive(clap::Args, Clone, Debug)]
pub struct CollectionArgs {
    /// Path to the review database.
    #[arg(long, default_value = "passfail.db")]
    pub db: PathBuf,
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "passfail.toml")]
    pub config: PathBuf,
}

impl CollectionArgs {
    pub fn open(&self) -> Fallible<Collection> {
        Collection::open(&self.db, &self.config)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::fs::write;

    use tempfile::TempDir;
    use tempfile::tempdir;

    use super::CollectionArgs;
    use crate::error::Fallible;

    /// A collection in a temporary directory, with the given config file
    /// contents.
    pub fn temp_collection(config: &str) -> Fallible<(TempDir, CollectionArgs)> {
        let dir = tempdir()?;
        let args = CollectionArgs {
            db: dir.path().join("passfail.db"),
            config: dir.path().join("passfail.toml"),
        };
        write(&args.config, config)?;
        Ok((dir, args))
    }
}
