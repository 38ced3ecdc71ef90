use serde::{Deserialize, Serialize};
use std::path::Path;
use std::path::PathBuf;

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    #[serde(skip)]
    path: PathBuf,
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_create_database")]
    pub create_database: bool,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: kaizen_home().join("config.yml"),
            database_path: default_database_path(),
            create_database: default_create_database(),
            api_url: default_api_url(),
            language: default_language(),
        }
    }
}

fn kaizen_home() -> PathBuf {
    match std::env::var("KAIZEN_HOME") {
        Ok(path) => PathBuf::from(path),
        Err(_) => dirs::home_dir().expect("should have home").join(".kaizen"),
    }
}

fn default_database_path() -> String {
    let path = kaizen_home();
    if !path.exists() {
        let _ = std::fs::create_dir_all(&path);
    }
    path.join("kaizen.db").display().to_string()
}

fn default_create_database() -> bool {
    true
}

fn default_api_url() -> String {
    "https://api.mangadex.org".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

impl Config {
    pub fn open<P: AsRef<Path>>(path: Option<P>) -> Result<Config, anyhow::Error> {
        let config_path = match path {
            Some(p) => PathBuf::new().join(p),
            None => kaizen_home().join("config.yml"),
        };

        match std::fs::File::open(config_path.clone()) {
            Ok(file) => {
                info!("Open config from {:?}", config_path);
                let mut cfg: Self = serde_yml::from_reader(file)?;
                cfg.path = config_path;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Config {
                    path: config_path,
                    ..Default::default()
                };
                cfg.save()?;
                info!("Write default config at {:?}", cfg.path);
                Ok(cfg)
            }
        }
    }

    pub fn save(&self) -> Result<(), anyhow::Error> {
        std::fs::write(&self.path, serde_yml::to_string(&self)?)?;

        Ok(())
    }
}
