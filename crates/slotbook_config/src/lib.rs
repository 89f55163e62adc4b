use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;
pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Layering order, later sources override earlier ones:
/// 1. `config/default` (any format the `config` crate accepts)
/// 2. `config/{RUN_ENV}` (defaults to `debug`)
/// 3. Environment variables with the `SLOTBOOK` prefix, `__` separator
///    (e.g. `SLOTBOOK_SERVER__PORT=8080`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env::var("PREFIX").unwrap_or_else(|_| "SLOTBOOK".to_string());

    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."));
    let workspace_root = manifest_dir
        .ancestors()
        .nth(2) // go from crates/slotbook_config to workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));

    let default_path = workspace_root.join("config/default");
    let env_path = workspace_root.join(format!("config/{}", run_env));

    let builder = Config::builder()
        .add_source(File::with_name(default_path.to_string_lossy().as_ref()).required(false))
        .add_source(File::with_name(env_path.to_string_lossy().as_ref()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator("__"));

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(raw_config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// This function checks if the dotenv file has already been loaded using a `OnceCell`.
/// If not, it attempts to load the dotenv file specified by `DOTENV_OVERRIDE`,
/// falling back to a file named ".env".
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path =
        std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalogue_has_five_labels_in_order() {
        let catalogue = default_hour_catalogue();
        assert_eq!(catalogue.len(), 5);
        assert_eq!(catalogue[0], "2 Hours/$70");
        assert_eq!(catalogue[4], "Full Day 14+ Hours/$550");
    }

    #[test]
    fn booking_config_defaults_to_full_catalogue() {
        let cfg = BookingConfig::default();
        assert_eq!(cfg.hour_catalogue, default_hour_catalogue());
        assert!(cfg.admin_email.is_none());
    }

    #[test]
    fn app_config_deserializes_with_minimal_sections() {
        let json = r#"{"server": {"host": "127.0.0.1", "port": 3333}}"#;
        let cfg: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.server.port, 3333);
        assert!(!cfg.use_email);
        assert!(cfg.booking.is_none());
    }
}
