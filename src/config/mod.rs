#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
pub use toml_config::TomlConfig;

/// 決定聯絡人檔案路徑：命令列參數優先，其次為設定檔
pub fn resolve_storage_path(file_flag: Option<&str>, config: &TomlConfig) -> String {
    file_flag
        .map(str::to_string)
        .unwrap_or_else(|| config.storage_path().to_string())
}
