pub mod json_backend;

use std::path::Path;

use crate::{
    domain::{plan::SavedFinancialPlan, portfolio::Portfolio},
    errors::PlannerError,
};

pub type Result<T> = std::result::Result<T, PlannerError>;

/// Abstraction over persistence backends capable of storing portfolios.
pub trait StorageBackend: Send + Sync {
    fn save(&self, portfolio: &Portfolio, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<Portfolio>;
    fn list(&self) -> Result<Vec<String>>;
    fn delete(&self, name: &str) -> Result<()>;

    /// Ad-hoc file operations for export and import. Default implementations
    /// write plain JSON outside the managed directory.
    fn save_to_path(&self, portfolio: &Portfolio, path: &Path) -> Result<()> {
        json_backend::save_portfolio_to_path(portfolio, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<Portfolio> {
        json_backend::load_portfolio_from_path(path)
    }
}

/// Single-record store for the weekly financial plan. At most one plan exists;
/// saving replaces whatever was there.
pub trait PlanRepository: Send + Sync {
    fn get(&self) -> Result<Option<SavedFinancialPlan>>;
    fn put(&self, plan: &SavedFinancialPlan) -> Result<()>;
    fn delete(&self) -> Result<()>;
}

pub use json_backend::JsonStorage;
