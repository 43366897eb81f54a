//! 倉儲讀取介面
//!
//! 計算模組只透過這些介面取得純資料，不直接接觸持久層。

use std::collections::BTreeSet;
use uuid::Uuid;

use crate::{Fabric, Material, MaterialUsage, Order, OrderStatus, Product, ProductRecipe, Result};

/// 產品配方查詢
pub trait RecipeRepository {
    /// 取得產品配方（布料與材料名稱已解析）；產品不存在時回傳 None
    fn recipe(&self, product_id: Uuid) -> Result<Option<ProductRecipe>>;
}

/// 布料名冊
pub trait FabricRegistry {
    /// 目前所有布料名稱（大寫）
    fn fabric_names(&self) -> Result<BTreeSet<String>>;
}

/// 訂單查詢
pub trait OrderRepository {
    fn order(&self, order_id: Uuid) -> Result<Option<Order>>;

    fn orders_with_status(&self, status: OrderStatus) -> Result<Vec<Order>>;
}

/// 實際用量查詢
pub trait UsageRepository {
    /// 訂單的手動用量記錄（可能為空）
    fn actual_usage(&self, order_id: Uuid) -> Result<Vec<MaterialUsage>>;

    /// 所有曾記錄過的用量名稱（大寫）
    fn usage_names(&self) -> Result<BTreeSet<String>>;
}

/// 目錄查詢（成本估算使用）
pub trait CatalogRepository {
    fn product(&self, product_id: Uuid) -> Result<Option<Product>>;

    fn fabric_by_name(&self, name: &str) -> Result<Option<Fabric>>;

    fn material_by_name(&self, name: &str) -> Result<Option<Material>>;
}
