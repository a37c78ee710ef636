use anyhow::Result;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Start with the three demo employees instead of an empty directory.
    pub seed_demo_data: bool,
    /// Allowed CORS origins; empty allows any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed_demo_data = lookup("SEED_DEMO_DATA")
            .map(|val| matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(true);

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .filter_map(|s| {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            })
            .collect::<Vec<_>>();

        Self {
            seed_demo_data,
            cors_allowed_origins,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_seed_and_allow_any_origin() {
        let config = load(&[]);
        assert!(config.seed_demo_data);
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn parses_overrides() {
        let config = load(&[
            ("SEED_DEMO_DATA", "no"),
            (
                "CORS_ALLOWED_ORIGINS",
                "http://localhost:5173, ,https://hr.example.com",
            ),
        ]);
        assert!(!config.seed_demo_data);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["http://localhost:5173", "https://hr.example.com"]
        );
    }
}
