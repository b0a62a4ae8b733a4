use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Served under `/static`.
    pub assets_dir: PathBuf,
    /// Built front-end; `index.html` here answers every page route.
    pub dist_dir: PathBuf,
    pub port: u16,
    /// Root map descriptor, relative to `assets_dir`.
    pub root_map: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            assets_dir: PathBuf::from("assets"),
            dist_dir: PathBuf::from("dist"),
            port: 3000,
            root_map: PathBuf::from("data/maps/main_maps/map.json"),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut config = ServerConfig::default();
        if let Some(dir) = lookup("ASSETS_DIR") {
            config.assets_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("DIST_DIR") {
            config.dist_dir = PathBuf::from(dir);
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|e| format!("PORT must be a port number, got {port:?}: {e}"))?;
        }
        if let Some(root) = lookup("ROOT_MAP") {
            config.root_map = PathBuf::from(root.trim_start_matches('/'));
        }
        Ok(config)
    }

    pub fn root_map_path(&self) -> PathBuf {
        self.assets_dir.join(&self.root_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(
            config.root_map_path(),
            PathBuf::from("assets/data/maps/main_maps/map.json")
        );
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("ASSETS_DIR", "/srv/wiki"),
            ("PORT", "8080"),
            ("ROOT_MAP", "/data/maps/other.json"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.root_map_path(), PathBuf::from("/srv/wiki/data/maps/other.json"));
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
    }

    #[test]
    fn test_bad_port_is_reported() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.contains("PORT"));
    }
}
