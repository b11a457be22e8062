use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    domain::{debt::Debt, plan::SavedFinancialPlan, portfolio::Portfolio},
    errors::PlannerError,
};

use super::{PlanRepository, Result, StorageBackend};

const PORTFOLIO_EXTENSION: &str = "json";
const PLAN_FILE: &str = "plan.json";
const TMP_SUFFIX: &str = "tmp";

/// Overrides the default `~/.debt_core` data directory.
pub const HOME_ENV_VAR: &str = "DEBT_CORE_HOME";

/// File-per-portfolio JSON storage rooted at a single application directory.
/// The saved plan lives next to the portfolios as a single `plan.json` slot.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    portfolios_dir: PathBuf,
    plan_file: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let app_root = resolve_base(root);
        let portfolios_dir = app_root.join("portfolios");
        ensure_dir(&app_root)?;
        ensure_dir(&portfolios_dir)?;
        let plan_file = app_root.join(PLAN_FILE);
        Ok(Self {
            root: app_root,
            portfolios_dir,
            plan_file,
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn portfolio_path(&self, name: &str) -> PathBuf {
        self.portfolios_dir
            .join(format!("{}.{}", canonical_name(name), PORTFOLIO_EXTENSION))
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, portfolio: &Portfolio, name: &str) -> Result<()> {
        let path = self.portfolio_path(name);
        let json = serde_json::to_string_pretty(portfolio)?;
        write_atomic(&path, &json)?;
        tracing::debug!(name = canonical_name(name), "portfolio saved");
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Portfolio> {
        let path = self.portfolio_path(name);
        if !path.exists() {
            return Err(PlannerError::StorageError(format!(
                "portfolio `{}` not found",
                canonical_name(name)
            )));
        }
        load_portfolio_from_path(&path)
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.portfolios_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.portfolios_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(PORTFOLIO_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                entries.push(stem.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.portfolio_path(name);
        if !path.exists() {
            return Err(PlannerError::StorageError(format!(
                "portfolio `{}` not found",
                canonical_name(name)
            )));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}

impl PlanRepository for JsonStorage {
    fn get(&self) -> Result<Option<SavedFinancialPlan>> {
        if !self.plan_file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.plan_file)?;
        let plan: SavedFinancialPlan = serde_json::from_str(&data)?;
        Ok(Some(plan))
    }

    fn put(&self, plan: &SavedFinancialPlan) -> Result<()> {
        let json = serde_json::to_string_pretty(plan)?;
        write_atomic(&self.plan_file, &json)?;
        Ok(())
    }

    fn delete(&self) -> Result<()> {
        if self.plan_file.exists() {
            fs::remove_file(&self.plan_file)?;
        }
        Ok(())
    }
}

pub fn save_portfolio_to_path(portfolio: &Portfolio, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(portfolio)?;
    write_atomic(path, &json)?;
    Ok(())
}

pub fn load_portfolio_from_path(path: &Path) -> Result<Portfolio> {
    let data = fs::read_to_string(path)?;
    let portfolio: Portfolio = serde_json::from_str(&data)?;
    Ok(portfolio)
}

/// Writes just the debt list as a JSON array, the interchange format older
/// exports used.
pub fn export_debts_to_path(debts: &[Debt], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(debts)?;
    write_atomic(path, &json)?;
    Ok(())
}

/// Reads a debt-array export back.
pub fn import_debts_from_path(path: &Path) -> Result<Vec<Debt>> {
    let data = fs::read_to_string(path)?;
    let debts: Vec<Debt> = serde_json::from_str(&data)?;
    Ok(debts)
}

fn resolve_base(root: Option<PathBuf>) -> PathBuf {
    if let Some(base) = root {
        return base;
    }
    if let Ok(custom) = std::env::var(HOME_ENV_VAR) {
        if !custom.trim().is_empty() {
            return PathBuf::from(custom);
        }
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".debt_core")
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn canonical_name(name: &str) -> String {
    let sanitized: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' => c,
            _ => '_',
        })
        .collect();
    if sanitized.trim_matches('_').is_empty() {
        "portfolio".into()
    } else {
        sanitized
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

// Write to a sibling tmp file and rename over the target so a crash mid-write
// never leaves a truncated data file.
fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}
