use std::path::Path;

use anyhow::{bail, Result};

use folio_core::AppConfig;

pub fn path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

pub fn init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    AppConfig::default().save_to(config_path)?;
    println!("Wrote default config to {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("folio").join("config.toml");

        init(&path, false).unwrap();
        assert!(AppConfig::load_from(&path).is_ok());
        assert!(init(&path, false).is_err());
        assert!(init(&path, true).is_ok());
    }
}
