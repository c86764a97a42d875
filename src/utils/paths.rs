//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the Guildhall directory (~/.guildhall/)
pub fn guildhall_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".guildhall"))
}

/// Get the database file path (~/.guildhall/data.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(guildhall_dir()?.join("data.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
