use crate::commands::{CmdMessage, CmdResult};
use crate::config::QuotebookConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = QuotebookConfig::load(data_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = QuotebookConfig::load(data_dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.add_message(CmdMessage::info(val)),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = QuotebookConfig::load(data_dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::error(e));
                return Ok(result);
            }
            config.save(data_dir)?;
            let display_val = config.get(&key).unwrap_or_else(|| value.clone());
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::render::Theme;
    use tempfile::tempdir;

    #[test]
    fn show_all_returns_defaults() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(QuotebookConfig::default()));
    }

    #[test]
    fn set_persists_normalized_value() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::Set("theme".into(), "温暖".into())).unwrap();
        assert_eq!(result.messages[0].content, "theme set to warm");

        let loaded = QuotebookConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.theme(), Theme::Warm);

        let shown = run(dir.path(), ConfigAction::ShowKey("theme".into())).unwrap();
        assert_eq!(shown.messages[0].content, "warm");
    }

    #[test]
    fn invalid_value_is_reported_not_saved() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::Set("theme".into(), "neon".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn unknown_key() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
    }
}
