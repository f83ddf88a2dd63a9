//! Everything a command needs, resolved once from the command line.

use std::cell::Cell;
use std::rc::Rc;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::cli::args::{Cli, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::CoachError;
use crate::exercises::ExerciseCatalog;
use crate::i18n::Translator;
use crate::state::{AppState, Language, StateStore};
use crate::storage::Database;

/// Resolved paths, configuration, state, catalog, and language.
pub struct Context {
    /// Data locations.
    pub paths: Paths,
    /// Application configuration from config.yaml.
    pub config: Config,
    /// Persisted preferences and history.
    pub store: StateStore,
    /// Exercise list.
    pub catalog: ExerciseCatalog,
    /// Active translations.
    pub translator: Translator,
    /// Output format for command results.
    pub format: OutputFormat,
    /// Saved language changes not yet applied to `translator`.
    saved_lang: Rc<Cell<Option<Language>>>,
}

impl Context {
    /// Open the data directory and load everything for `cli`.
    ///
    /// A `--lang` flag selects the display language for this run only; the
    /// saved preference is used otherwise. Once the saved language changes,
    /// the display follows it.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory, config file, or database
    /// cannot be opened.
    pub fn open(cli: &Cli) -> Result<Self, CoachError> {
        let paths = match &cli.data_dir {
            Some(root) => Paths::with_root(root.clone()),
            None => Paths::new()?,
        };
        paths.ensure_dirs()?;

        let config = Config::load_from_path(&paths.config_file)?;
        let mut store = StateStore::load(Database::open_at(&paths.database)?)?;
        if store.recovered_from_corruption() {
            warn!(
                database = %paths.database.display(),
                "saved preferences and history were unreadable and have been reset"
            );
        }

        let catalog = match cli.exercises.as_ref().or(config.catalog.exercises_file.as_ref()) {
            Some(path) => ExerciseCatalog::load_from_path(path),
            None => ExerciseCatalog::bundled(),
        };

        let lang = cli.lang.map_or(store.config().lang, Language::from);
        let mut translator = Translator::new(lang)?;
        translator.on_change(|lang| info!(%lang, "display language switched"));
        let format = cli.output.unwrap_or(config.general.default_output);

        let saved_lang = Rc::new(Cell::new(None));
        let pending = Rc::clone(&saved_lang);
        let mut last = store.config().lang;
        store.subscribe(move |state| {
            if state.config.lang != last {
                last = state.config.lang;
                pending.set(Some(last));
            }
        });

        debug!(root = %paths.root.display(), %lang, ?format, "context opened");

        Ok(Self {
            paths,
            config,
            store,
            catalog,
            translator,
            format,
            saved_lang,
        })
    }

    /// Update the saved state and let the display language follow it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn update_state<F>(&mut self, mutator: F) -> Result<(), CoachError>
    where
        F: FnOnce(&mut AppState),
    {
        self.store.update(mutator)?;
        self.sync_language();
        Ok(())
    }

    /// Reset all saved data and let the display language follow it.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn reset_state(&mut self) -> Result<(), CoachError> {
        self.store.reset_all()?;
        self.sync_language();
        Ok(())
    }

    /// Apply a saved language change reported by the store.
    pub fn sync_language(&mut self) {
        if let Some(lang) = self.saved_lang.take() {
            self.translator.set_lang(lang);
        }
    }

    /// Today's local date.
    #[must_use]
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }
}
