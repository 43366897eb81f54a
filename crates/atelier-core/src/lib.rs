//! # Atelier Core
//!
//! 核心資料模型、配置與倉儲介面

pub mod catalog;
pub mod config;
pub mod order;
pub mod repository;

// Re-export 主要類型
pub use catalog::{
    CatalogItem, Client, Fabric, FabricLink, FabricRequirement, Material, MaterialLink, MaterialRequirement,
    PriceUpdate, Product, ProductCategory, ProductRecipe,
};
pub use config::AtelierConfig;
pub use order::{
    CompletionOutcome, CuttingTable, MaterialUsage, Order, OrderItem, OrderStatus, SewingTeam,
};
pub use repository::{
    CatalogRepository, FabricRegistry, OrderRepository, RecipeRepository, UsageRepository,
};

/// Atelier 錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum AtelierError {
    #[error("找不到訂單: {0}")]
    OrderNotFound(uuid::Uuid),

    #[error("找不到產品: {0}")]
    ProductNotFound(String),

    #[error("找不到布料: {0}")]
    FabricNotFound(String),

    #[error("找不到材料: {0}")]
    MaterialNotFound(String),

    #[error("找不到客戶: {0}")]
    ClientNotFound(String),

    #[error("名稱已存在: {0}")]
    DuplicateName(String),

    #[error("產品仍被訂單使用，無法刪除: {0}")]
    ProductInUse(String),

    #[error("仍被產品配方使用，無法刪除: {0}")]
    ItemInUse(String),

    #[error("無效的數量: {0}")]
    InvalidQuantity(String),

    #[error("{field} 不可為負值: {value}")]
    NegativeValue { field: &'static str, value: String },

    #[error("配置錯誤: {0}")]
    InvalidConfig(String),

    #[error("其他錯誤: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, AtelierError>;
