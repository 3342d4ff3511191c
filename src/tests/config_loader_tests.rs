#[cfg(test)]
mod loader_tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::tempdir;

    use crate::config::loader::{
        CONFIG_ENV_VAR, get_config_file_path, load_config_from, save_config_to,
    };
    use crate::config::{Config, ConfigError};

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
        let written: Config = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.board.width = 14;
        config.board.drop_interval_ms = 250;
        config.controls.pause = vec!["F1".to_string()];
        save_config_to(&path, &config).unwrap();

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);
        let settings = loaded.validate().unwrap();
        assert_eq!(settings.width, 14);
    }

    #[test]
    fn test_user_file_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[board]\nheight = 30\n").unwrap();

        let config = load_config_from(&path).unwrap();

        assert_eq!(config.board.height, 30);
        assert_eq!(config.board.width, 10);
        assert_eq!(fs::read_to_string(&path).unwrap(), "[board]\nheight = 30\n");
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[board\nwidth = ").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_wrong_type_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[board]\nwidth = \"wide\"\n").unwrap();

        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_directory_in_place_of_file_is_an_io_error() {
        let dir = tempdir().unwrap();

        assert!(matches!(load_config_from(dir.path()), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_env_var_overrides_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("override.toml");

        // Only this test touches the variable
        unsafe {
            std::env::set_var(CONFIG_ENV_VAR, &path);
        }
        let resolved = get_config_file_path();
        unsafe {
            std::env::remove_var(CONFIG_ENV_VAR);
        }

        assert_eq!(resolved, path);
        assert_ne!(get_config_file_path(), PathBuf::from(&path));
    }
}
