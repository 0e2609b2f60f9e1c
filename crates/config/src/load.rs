use crate::Config;
use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use std::path::{Path, PathBuf};

/// Prefix of environment variable overrides. Nested keys are separated by a
/// double underscore: `TAGPRESS_GEO__ENABLED=false` sets `geo.enabled`.
pub const ENV_PREFIX: &str = "TAGPRESS_";

impl Config {
    /// Path of the per-user configuration file, if the platform has a
    /// configuration directory at all.
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "tagpress").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Every configuration source, lowest precedence first:
    ///
    /// 1. built-in defaults;
    /// 2. the per-user `config.toml` (see [`user_config_path`](Self::user_config_path)),
    ///    when present;
    /// 3. `explicit`, parsed as YAML or JSON by extension, otherwise TOML;
    /// 4. `TAGPRESS_*` environment variables.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        Self::layered(Self::user_config_path().as_deref(), explicit)
    }

    /// [`figment`](Self::figment) with the per-user file at `user` instead of
    /// the platform default.
    pub fn layered(user: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = user.filter(|path| path.is_file()) {
            figment = figment.merge(Toml::file_exact(path));
        }
        if let Some(path) = explicit {
            let extension = path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase);
            figment = match extension.as_deref() {
                Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                Some("json") => figment.merge(Json::file_exact(path)),
                _ => figment.merge(Toml::file_exact(path)),
            };
        }
        // `TAGPRESS_CONFIG` names the explicit file; it is not a key.
        figment.merge(Env::prefixed(ENV_PREFIX).split("__").ignore(&["config"]))
    }

    /// Load and validate the configuration; see [`figment`](Self::figment).
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_layered(Self::user_config_path().as_deref(), explicit)
    }

    /// [`load`](Self::load) with the per-user file at `user`.
    pub fn load_layered(user: Option<&Path>, explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit
            && !path.is_file()
        {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let config: Config = Self::layered(user, explicit).extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }
}
