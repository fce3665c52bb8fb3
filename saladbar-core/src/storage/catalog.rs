use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::LoadReport;
use crate::codec::{decode_product, encode_product};
use crate::diagnostics::{Diagnostics, Severity};
use crate::error::StorageError;
use crate::models::{Product, ProductGroup};

/// The product catalog and the file it is persisted to.
///
/// Memory is authoritative. Every mutation rewrites the whole file, and the
/// file is only read back by [`ProductCatalog::load`].
pub struct ProductCatalog {
    path: PathBuf,
    products: Vec<Arc<Product>>,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ProductCatalog {
    /// Creates an empty catalog bound to `path`. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            path: path.into(),
            products: Vec::new(),
            diagnostics,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the in-memory catalog with the records decoded from disk.
    ///
    /// A missing file yields an empty catalog. Malformed lines are reported
    /// and skipped. On a read error the current contents are kept.
    pub fn load(&mut self) -> Result<LoadReport, StorageError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.products.clear();
                self.report(
                    Severity::Info,
                    format!(
                        "Catalog file {} not found, starting empty",
                        self.path.display()
                    ),
                );
                return Ok(LoadReport::default());
            }
            Err(e) => {
                let err = StorageError::io(&self.path, e);
                self.report(Severity::Error, format!("Failed to read catalog: {}", err));
                return Err(err);
            }
        };

        let mut products = Vec::new();
        let mut skipped = 0;
        for (index, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match decode_product(line) {
                Ok(product) => products.push(Arc::new(product)),
                Err(e) => {
                    skipped += 1;
                    self.report(
                        Severity::Warning,
                        format!(
                            "Skipping catalog line {} ({}): {}",
                            index + 1,
                            e,
                            line
                        ),
                    );
                }
            }
        }

        self.products = products;
        self.report(
            Severity::Info,
            format!(
                "Loaded {} product(s) from {}",
                self.products.len(),
                self.path.display()
            ),
        );

        Ok(LoadReport {
            loaded: self.products.len(),
            skipped,
        })
    }

    /// Writes every product to the catalog file, replacing its contents.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self) -> Result<(), StorageError> {
        let result = self.write_file();
        if let Err(e) = &result {
            self.report(Severity::Error, format!("Failed to save catalog: {}", e));
        }
        result
    }

    fn write_file(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
            }
        }

        let mut contents = String::new();
        for product in &self.products {
            contents.push_str(&encode_product(product));
            contents.push('\n');
        }

        fs::write(&self.path, contents).map_err(|e| StorageError::io(&self.path, e))
    }

    /// Appends a product and persists the catalog.
    ///
    /// The product stays in memory even when the save fails.
    pub fn add(&mut self, product: Product) -> Result<Arc<Product>, StorageError> {
        let product = Arc::new(product);
        self.products.push(Arc::clone(&product));
        self.report(Severity::Info, format!("Added product {}", product.name));
        self.save()?;
        Ok(product)
    }

    /// Removes the first product equal to `product` and persists the catalog.
    ///
    /// Returns `Ok(false)` without writing when nothing matched.
    pub fn remove(&mut self, product: &Product) -> Result<bool, StorageError> {
        let Some(index) = self.products.iter().position(|p| p.as_ref() == product) else {
            return Ok(false);
        };
        let removed = self.products.remove(index);
        self.report(Severity::Info, format!("Removed product {}", removed.name));
        self.save()?;
        Ok(true)
    }

    /// First product whose name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<Arc<Product>> {
        self.products
            .iter()
            .find(|p| p.name_matches(name))
            .cloned()
    }

    /// Snapshot of the catalog in insertion order.
    pub fn all(&self) -> Vec<Arc<Product>> {
        self.products.clone()
    }

    pub fn by_group(&self, group: ProductGroup) -> Vec<Arc<Product>> {
        self.products
            .iter()
            .filter(|p| p.group() == group)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    fn report(&self, severity: Severity, message: String) {
        self.diagnostics.report(severity, &message);
    }
}
