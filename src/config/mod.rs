use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ConfigFile {
    pub data: Option<String>,
    #[serde(alias = "base_url")]
    pub url: Option<String>,
    pub timeout: Option<u64>,
    pub page_size: Option<usize>,
    pub search: Option<String>,
    #[serde(alias = "star_segment")]
    pub category: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<usize>,
    pub output: Option<String>,
    pub output_format: Option<String>,
    pub no_color: Option<bool>,
    pub map_center: Option<(f64, f64)>,
    pub map_zoom: Option<u8>,
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("USERPROFILE").map(PathBuf::from))
        .or_else(|| {
            let drive = env::var_os("HOMEDRIVE")?;
            let path = env::var_os("HOMEPATH")?;
            Some(PathBuf::from(drive).join(path))
        })
}

pub fn default_config_path() -> Option<PathBuf> {
    Some(home_dir()?.join(".hotelboard").join("config.yml"))
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

pub fn load_config(path: &PathBuf, allow_missing: bool) -> Result<ConfigFile, String> {
    match std::fs::read_to_string(path) {
        Ok(contents) => serde_yaml::from_str::<ConfigFile>(&contents)
            .map_err(|e| format!("failed to parse config '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
            Ok(ConfigFile::default())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(format!("config file not found '{}'", path.display()))
        }
        Err(e) => Err(format!("failed to read config '{}': {e}", path.display())),
    }
}

fn default_config_yaml() -> String {
    r#"# Hotelboard config
#
# Location (default):
#   ~/.hotelboard/config.yml

# Data source (choose one; defaults to ./hotels.json)
# data: ./hotels.json
# url: http://localhost:3000/
timeout: 10

# Table view
page_size: 10
search: ""
category: all
sort: rating
direction: desc
page: 1

# Output (optional)
# output: ./dashboard.html
# output_format: html
no_color: false

# Map
map_center: [17.385044, 78.486671]
map_zoom: 11
"#
    .to_string()
}

pub fn ensure_default_config_file(path: &PathBuf) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid config path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create config directory '{}': {e}",
            parent.display()
        )
    })?;
    std::fs::write(path, default_config_yaml())
        .map_err(|e| format!("failed to write config file '{}': {e}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_parses() {
        let cfg: ConfigFile = serde_yaml::from_str(&default_config_yaml()).unwrap();
        assert_eq!(cfg.page_size, Some(10));
        assert_eq!(cfg.sort.as_deref(), Some("rating"));
        assert_eq!(cfg.map_center, Some((17.385044, 78.486671)));
        assert!(cfg.data.is_none());
    }

    #[test]
    fn missing_config_is_allowed_only_on_request() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        assert!(load_config(&path, true).is_ok());
        assert!(load_config(&path, false).is_err());

        ensure_default_config_file(&path).unwrap();
        let cfg = load_config(&path, false).unwrap();
        assert_eq!(cfg.map_zoom, Some(11));
    }
}
