//! Shell configuration loaded from `.dashboard-shell.json`.
/// 設定ファイルの読み込み
mod loader;
/// 設定の保持と更新
mod manager;
/// 設定の型とバリデーション
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    ShellSettings,
    StorageKeys,
    ValidationError,
};
