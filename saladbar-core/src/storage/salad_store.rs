use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::{LoadReport, ProductCatalog};
use crate::codec::{decode_ingredient, encode_ingredient};
use crate::diagnostics::{Diagnostics, Severity};
use crate::error::StorageError;
use crate::models::{Salad, SaladIngredient};

/// Extension of recipe files inside the salads directory.
pub const RECIPE_EXTENSION: &str = "txt";

/// One recipe file per salad, plus an in-memory cache mirroring them.
pub struct SaladStore {
    dir: PathBuf,
    salads: Vec<Salad>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl SaladStore {
    pub fn new(dir: impl Into<PathBuf>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            dir: dir.into(),
            salads: Vec::new(),
            diagnostics,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Recipe file for a salad name.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", name, RECIPE_EXTENSION))
    }

    /// Rebuilds the cache from every recipe file in the directory.
    ///
    /// Ingredients are resolved against `catalog` once, here. Bad lines and
    /// unknown products are reported and dropped; a file that cannot be read
    /// is reported and skipped. A missing directory yields an empty cache.
    pub fn load_all(&mut self, catalog: &ProductCatalog) -> Result<LoadReport, StorageError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.salads.clear();
                self.report(
                    Severity::Info,
                    format!("Salads directory {} not found, starting empty", self.dir.display()),
                );
                return Ok(LoadReport::default());
            }
            Err(e) => {
                let err = StorageError::io(&self.dir, e);
                self.report(Severity::Error, format!("Failed to list salads: {}", err));
                return Err(err);
            }
        };

        let (files, mut skipped) = self.recipe_files(entries.map(|entry| entry.map(|e| e.path())));

        let mut salads = Vec::new();
        for path in files {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                skipped += 1;
                self.report(
                    Severity::Warning,
                    format!("Skipping recipe with non UTF-8 name: {}", path.display()),
                );
                continue;
            };

            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(e) => {
                    skipped += 1;
                    let err = StorageError::io(&path, e);
                    self.report(Severity::Error, format!("Failed to read recipe: {}", err));
                    continue;
                }
            };

            let (salad, dropped) = self.parse_recipe(name, &contents, catalog);
            skipped += dropped;
            salads.push(salad);
        }

        self.salads = salads;
        self.report(
            Severity::Info,
            format!("Loaded {} salad(s) from {}", self.salads.len(), self.dir.display()),
        );

        Ok(LoadReport {
            loaded: self.salads.len(),
            skipped,
        })
    }

    /// Recipe files among the directory entries, sorted by name, plus the
    /// number of entries that could not be read.
    fn recipe_files(&self, entries: impl Iterator<Item = io::Result<PathBuf>>) -> (Vec<PathBuf>, usize) {
        let mut files = Vec::new();
        let mut unreadable = 0;
        for entry in entries {
            match entry {
                Ok(path) => {
                    let is_recipe = path.is_file()
                        && path.extension().and_then(|e| e.to_str()) == Some(RECIPE_EXTENSION);
                    if is_recipe {
                        files.push(path);
                    }
                }
                Err(e) => {
                    unreadable += 1;
                    let err = StorageError::io(&self.dir, e);
                    self.report(
                        Severity::Error,
                        format!("Failed to read salads directory entry: {}", err),
                    );
                }
            }
        }
        files.sort();
        (files, unreadable)
    }

    fn parse_recipe(&self, name: &str, contents: &str, catalog: &ProductCatalog) -> (Salad, usize) {
        let mut salad = Salad::new(name);
        let mut dropped = 0;

        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let (product_name, weight) = match decode_ingredient(line) {
                Ok(parsed) => parsed,
                Err(e) => {
                    dropped += 1;
                    self.report(
                        Severity::Warning,
                        format!("Skipping line {} of salad '{}' ({}): {}", index + 1, name, e, line),
                    );
                    continue;
                }
            };

            match catalog.find_by_name(&product_name) {
                Some(product) => salad.add_ingredient(SaladIngredient::new(product, weight)),
                None => {
                    dropped += 1;
                    self.report(
                        Severity::Warning,
                        format!(
                            "Product '{}' not found in catalog, dropped from salad '{}'",
                            product_name, name
                        ),
                    );
                }
            }
        }

        (salad, dropped)
    }

    /// Writes the recipe file and replaces any cached salad with the same name.
    ///
    /// When the cached salad's name differs only in case, its old file is
    /// removed first so a single file remains. The cache is left untouched
    /// when nothing was changed on disk.
    pub fn save(&mut self, salad: Salad) -> Result<(), StorageError> {
        let previous_name = self
            .find_by_name(&salad.name)
            .map(|s| s.name.clone())
            .filter(|name| *name != salad.name);
        if let Some(previous_name) = previous_name {
            if let Err(e) = self.remove_recipe_file(&previous_name) {
                self.report(
                    Severity::Error,
                    format!("Failed to replace salad '{}': {}", previous_name, e),
                );
                return Err(e);
            }
            // The old file is gone, so its cache entry must go even if the write fails.
            self.salads.retain(|s| !s.name_matches(&salad.name));
        }

        if let Err(e) = self.write_recipe(&salad) {
            self.report(
                Severity::Error,
                format!("Failed to save salad '{}': {}", salad.name, e),
            );
            return Err(e);
        }

        self.salads.retain(|s| !s.name_matches(&salad.name));
        self.report(
            Severity::Info,
            format!("Saved salad '{}' ({} ingredient(s))", salad.name, salad.ingredients.len()),
        );
        self.salads.push(salad);
        Ok(())
    }

    fn write_recipe(&self, salad: &Salad) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let mut contents = String::new();
        for ingredient in &salad.ingredients {
            contents.push_str(&encode_ingredient(ingredient));
            contents.push('\n');
        }

        let path = self.path(&salad.name);
        fs::write(&path, contents).map_err(|e| StorageError::io(path, e))
    }

    /// Deletes a salad's file and cache entry. Deleting a missing salad is a no-op.
    ///
    /// Returns whether a cache entry was removed.
    pub fn delete(&mut self, name: &str) -> Result<bool, StorageError> {
        // The cached name is the file stem, which may differ in case from `name`.
        let file_name = self
            .find_by_name(name)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| name.to_string());
        if let Err(e) = self.remove_recipe_file(&file_name) {
            self.report(
                Severity::Error,
                format!("Failed to delete salad '{}': {}", name, e),
            );
            return Err(e);
        }

        let before = self.salads.len();
        self.salads.retain(|s| !s.name_matches(name));
        let removed = self.salads.len() != before;
        if removed {
            self.report(Severity::Info, format!("Deleted salad '{}'", file_name));
        }
        Ok(removed)
    }

    /// Removes a recipe file; a file that is already gone is not an error.
    fn remove_recipe_file(&self, name: &str) -> Result<(), StorageError> {
        let path = self.path(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::io(path, e)),
        }
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Salad> {
        self.salads.iter().find(|s| s.name_matches(name))
    }

    /// Snapshot of every cached salad.
    pub fn all_salads(&self) -> Vec<Salad> {
        self.salads.clone()
    }

    fn report(&self, severity: Severity, message: String) {
        self.diagnostics.report(severity, &message);
    }
}
