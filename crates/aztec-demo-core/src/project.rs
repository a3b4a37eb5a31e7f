//! Project scaffolding and config lookup.
//!
//! ## Directory layout
//!
//! ```text
//! <project>/
//! ├── aztec-demo.config.json    # DemoConfig
//! ├── README.md
//! ├── encoder/
//! │   ├── aztec-encoder.js      # aztec.js bridge
//! │   └── package.json
//! └── contracts/artifacts/      # Truffle artifacts, copied in by the user
//! ```

use std::path::{Path, PathBuf};

use crate::config::{DemoConfig, CONFIG_FILE};
use crate::error::{AztecDemoError, Result};
use crate::templates::embedded;
use crate::templates::renderer::TemplateRenderer;

/// Network used when neither a config file nor `--network` names one.
pub const DEFAULT_NETWORK: &str = "besu";

/// Create the project directory tree. Fails if `project_dir` exists.
pub fn create_project_dirs(project_dir: &Path, config: &DemoConfig) -> Result<()> {
    if project_dir.exists() {
        return Err(AztecDemoError::ProjectExists(project_dir.to_path_buf()));
    }

    std::fs::create_dir_all(project_dir)?;
    std::fs::create_dir_all(project_dir.join(&config.artifacts_dir))?;
    if let Some(encoder_dir) = config.encoder.script.parent() {
        std::fs::create_dir_all(project_dir.join(encoder_dir))?;
    }
    Ok(())
}

/// Write the config, the encoder bridge and the rendered templates.
pub fn write_project_files(project_dir: &Path, name: &str, config: &DemoConfig) -> Result<()> {
    config.save(&project_dir.join(CONFIG_FILE))?;

    let renderer = TemplateRenderer::new();
    let data = serde_json::json!({
        "project_name": name,
        "network": config.network,
        "node_url": config.node_url,
        "aztec_version": embedded::AZTEC_JS_VERSION,
    });

    let script = project_dir.join(&config.encoder.script);
    std::fs::write(&script, embedded::ENCODER_SCRIPT)?;
    let package_json = script.with_file_name("package.json");
    std::fs::write(
        package_json,
        renderer.render(embedded::ENCODER_PACKAGE_JSON, &data)?,
    )?;
    std::fs::write(
        project_dir.join("README.md"),
        renderer.render(embedded::PROJECT_README, &data)?,
    )?;
    Ok(())
}

/// A config together with the directory its relative paths resolve against.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DemoConfig,
    pub base_dir: PathBuf,
    /// False when the config is a preset because no file existed.
    pub from_file: bool,
}

impl LoadedConfig {
    pub fn artifacts_dir(&self) -> PathBuf {
        self.config
            .resolve(&self.base_dir, &self.config.artifacts_dir)
    }

    pub fn encoder_script(&self) -> PathBuf {
        self.config
            .resolve(&self.base_dir, &self.config.encoder.script)
    }
}

/// Load `config_path`, or fall back to the preset for `network` when the
/// file does not exist.
///
/// An existing file always wins; a conflicting `network` is only warned
/// about.
pub fn load_or_default(config_path: &Path, network: Option<&str>) -> Result<LoadedConfig> {
    let base_dir = match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    if config_path.exists() {
        let config = DemoConfig::load(config_path)?;
        if let Some(requested) = network.filter(|n| *n != config.network) {
            tracing::warn!(
                "--network {requested} ignored: {} targets {}",
                config_path.display(),
                config.network
            );
        }
        return Ok(LoadedConfig {
            config,
            base_dir,
            from_file: true,
        });
    }

    let name = network.unwrap_or(DEFAULT_NETWORK);
    tracing::info!(
        "{} not found, using the {name} preset",
        config_path.display()
    );
    Ok(LoadedConfig {
        config: DemoConfig::for_network(name)?,
        base_dir,
        from_file: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaffold_layout() {
        let root = tempfile::tempdir().unwrap();
        let project = root.path().join("demo");
        let config = DemoConfig::for_network("ganache").unwrap();

        create_project_dirs(&project, &config).unwrap();
        write_project_files(&project, "demo", &config).unwrap();

        assert!(project.join("contracts/artifacts").is_dir());
        assert!(project.join("README.md").is_file());
        let script = std::fs::read_to_string(project.join("encoder/aztec-encoder.js")).unwrap();
        assert!(script.contains("encodeJoinSplit"));
        let package = std::fs::read_to_string(project.join("encoder/package.json")).unwrap();
        assert!(package.contains("\"demo-encoder\""));

        let loaded = DemoConfig::load(&project.join(CONFIG_FILE)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_refuses_existing_directory() {
        let root = tempfile::tempdir().unwrap();
        let config = DemoConfig::for_network("besu").unwrap();
        let err = create_project_dirs(root.path(), &config).unwrap_err();
        assert!(matches!(err, AztecDemoError::ProjectExists(_)));
    }

    #[test]
    fn test_missing_config_falls_back_to_preset() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join(CONFIG_FILE);

        let loaded = load_or_default(&path, None).unwrap();
        assert!(!loaded.from_file);
        assert_eq!(loaded.config.network, DEFAULT_NETWORK);

        let loaded = load_or_default(&path, Some("pantheon")).unwrap();
        assert_eq!(loaded.config.network, "pantheon");
        assert_eq!(loaded.artifacts_dir(), root.path().join("contracts/artifacts"));

        assert!(matches!(
            load_or_default(&path, Some("ropsten")),
            Err(AztecDemoError::UnknownNetwork(_))
        ));
    }

    #[test]
    fn test_existing_config_wins_over_network_flag() {
        let root = tempfile::tempdir().unwrap();
        let path = root.path().join(CONFIG_FILE);
        DemoConfig::for_network("ganache").unwrap().save(&path).unwrap();

        let loaded = load_or_default(&path, Some("besu")).unwrap();
        assert!(loaded.from_file);
        assert_eq!(loaded.config.network, "ganache");
        assert_eq!(
            loaded.encoder_script(),
            root.path().join("encoder/aztec-encoder.js")
        );
    }

    #[test]
    fn test_bare_file_name_resolves_against_cwd() {
        let loaded = load_or_default(Path::new("no-such-config.json"), None).unwrap();
        assert_eq!(loaded.base_dir, PathBuf::from("."));
    }
}
