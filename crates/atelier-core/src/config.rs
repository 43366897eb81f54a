//! 應用配置

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{AtelierError, Result};

/// 預設上傳大小上限：16 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 16 * 1024 * 1024;

/// 預設允許上傳的副檔名
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 6] = ["pdf", "png", "jpg", "jpeg", "doc", "docx"];

/// 應用配置，啟動時建立後傳給各處理器
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtelierConfig {
    /// 同步 API 的共享密鑰（請求標頭 X-API-KEY）
    pub api_secret_key: String,

    /// 附件上傳目錄
    pub upload_folder: PathBuf,

    /// 資料庫連線字串
    pub database_url: String,

    /// 單次上傳大小上限（位元組）
    pub max_upload_bytes: u64,

    /// 允許的附件副檔名（小寫）
    pub allowed_extensions: Vec<String>,
}

impl AtelierConfig {
    /// 創建新的配置
    pub fn new(api_secret_key: impl Into<String>) -> Self {
        Self {
            api_secret_key: api_secret_key.into(),
            upload_folder: PathBuf::from("static/uploads"),
            database_url: "sqlite://app.db".to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }

    /// 從環境變數讀取配置
    ///
    /// `API_SECRET_KEY` 為必填；`UPLOAD_FOLDER`、`DATABASE_URL`、
    /// `MAX_UPLOAD_BYTES` 缺少時使用預設值。
    pub fn from_env() -> Result<Self> {
        let key = std::env::var("API_SECRET_KEY")
            .map_err(|_| AtelierError::InvalidConfig("缺少 API_SECRET_KEY".to_string()))?;

        let mut config = Self::new(key);

        if let Ok(folder) = std::env::var("UPLOAD_FOLDER") {
            config = config.with_upload_folder(folder);
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            config = config.with_database_url(url);
        }
        if let Ok(raw) = std::env::var("MAX_UPLOAD_BYTES") {
            let bytes = raw.trim().parse::<u64>().map_err(|e| {
                AtelierError::InvalidConfig(format!("MAX_UPLOAD_BYTES 無效: {raw} ({e})"))
            })?;
            config = config.with_max_upload_bytes(bytes);
        }

        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置上傳目錄
    pub fn with_upload_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.upload_folder = folder.into();
        self
    }

    /// 建構器模式：設置資料庫連線字串
    pub fn with_database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// 建構器模式：設置上傳大小上限
    pub fn with_max_upload_bytes(mut self, bytes: u64) -> Self {
        self.max_upload_bytes = bytes;
        self
    }

    /// 建構器模式：設置允許的副檔名
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// 檢查配置是否可用
    pub fn validate(&self) -> Result<()> {
        if self.api_secret_key.trim().is_empty() {
            return Err(AtelierError::InvalidConfig("API 密鑰不可為空".to_string()));
        }
        if self.max_upload_bytes == 0 {
            return Err(AtelierError::InvalidConfig("上傳大小上限必須大於 0".to_string()));
        }
        Ok(())
    }

    /// 驗證請求帶入的 API 密鑰
    pub fn verify_api_key(&self, provided: Option<&str>) -> bool {
        matches!(provided, Some(key) if !key.is_empty() && key == self.api_secret_key)
    }

    /// 檢查附件檔名的副檔名是否允許
    pub fn is_allowed_upload(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                self.allowed_extensions.iter().any(|allowed| *allowed == ext)
            })
            .unwrap_or(false)
    }
}
