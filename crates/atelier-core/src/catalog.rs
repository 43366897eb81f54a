//! 目錄模型（客戶、布料、材料、產品與配方）

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AtelierError, Result};

/// 客戶
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
}

impl Client {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
        }
    }
}

/// 布料（以公尺計量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fabric {
    /// 布料ID
    pub id: Uuid,

    /// 名稱（唯一）
    pub name: String,

    /// 單價（每公尺）
    pub price: Option<Decimal>,

    /// 外部 ERP（Subiekt）商品代號
    pub catalog_symbol: Option<String>,
}

impl Fabric {
    /// 創建新的布料
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            price: None,
            catalog_symbol: None,
        }
    }

    /// 建構器模式：設置單價
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// 建構器模式：設置 ERP 商品代號
    pub fn with_catalog_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.catalog_symbol = Some(symbol.into());
        self
    }
}

/// 輔料（鈕扣、線、拉鍊等）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// 材料ID
    pub id: Uuid,

    /// 名稱（唯一）
    pub name: String,

    /// 單價（每個計量單位）
    pub price: Option<Decimal>,

    /// 外部 ERP（Subiekt）商品代號
    pub catalog_symbol: Option<String>,
}

impl Material {
    /// 創建新的材料
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            price: None,
            catalog_symbol: None,
        }
    }

    /// 建構器模式：設置單價
    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// 建構器模式：設置 ERP 商品代號
    pub fn with_catalog_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.catalog_symbol = Some(symbol.into());
        self
    }
}

/// 產品分類
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCategory {
    pub id: Uuid,
    pub name: String,
}

impl ProductCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
        }
    }
}

/// 產品配方中的布料連結
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricLink {
    pub fabric_id: Uuid,

    /// 每件用量（公尺）
    pub usage_meters: Decimal,
}

/// 產品配方中的材料連結
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialLink {
    pub material_id: Uuid,

    /// 每件用量表達式，例如 "4 szt"、"0.1 m"
    pub quantity: String,
}

/// 產品
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: Uuid,

    /// 名稱（唯一）
    pub name: String,

    /// 描述
    pub description: Option<String>,

    /// 生產單價（人工成本）
    pub production_price: Decimal,

    /// 分類
    pub category_id: Option<Uuid>,

    /// 布料配方（有序）
    pub fabrics: Vec<FabricLink>,

    /// 材料配方（有序）
    pub materials: Vec<MaterialLink>,
}

impl Product {
    /// 創建沒有配方的產品
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into().trim().to_string(),
            description: None,
            production_price: Decimal::ZERO,
            category_id: None,
            fabrics: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// 建構器模式：設置生產單價
    pub fn with_production_price(mut self, price: Decimal) -> Self {
        self.production_price = price;
        self
    }

    /// 建構器模式：設置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 建構器模式：設置分類
    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// 建構器模式：添加布料用量
    pub fn with_fabric(mut self, fabric_id: Uuid, usage_meters: Decimal) -> Self {
        self.fabrics.push(FabricLink {
            fabric_id,
            usage_meters,
        });
        self
    }

    /// 建構器模式：添加材料用量
    pub fn with_material(mut self, material_id: Uuid, quantity: impl Into<String>) -> Self {
        self.materials.push(MaterialLink {
            material_id,
            quantity: quantity.into().trim().to_string(),
        });
        self
    }

    /// 檢查生產單價與布料用量皆不為負
    pub fn validate(&self) -> Result<()> {
        if self.production_price < Decimal::ZERO {
            return Err(AtelierError::NegativeValue {
                field: "production_price",
                value: self.production_price.to_string(),
            });
        }

        if let Some(link) = self.fabrics.iter().find(|l| l.usage_meters < Decimal::ZERO) {
            return Err(AtelierError::NegativeValue {
                field: "usage_meters",
                value: link.usage_meters.to_string(),
            });
        }

        Ok(())
    }

    /// 產品是否有任何配方
    pub fn has_recipe(&self) -> bool {
        !self.fabrics.is_empty() || !self.materials.is_empty()
    }
}

/// 已解析名稱的布料需求
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FabricRequirement {
    pub fabric_name: String,
    pub usage_per_unit: Decimal,
}

/// 已解析名稱的材料需求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRequirement {
    pub material_name: String,
    pub quantity_expr: String,
}

/// 產品配方（純資料，由倉儲組裝）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecipe {
    pub product_id: Uuid,
    pub product_name: String,
    pub fabrics: Vec<FabricRequirement>,
    pub materials: Vec<MaterialRequirement>,
}

impl ProductRecipe {
    /// 創建空配方
    pub fn new(product_id: Uuid, product_name: impl Into<String>) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            fabrics: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// 建構器模式：添加布料需求
    pub fn with_fabric(mut self, fabric_name: impl Into<String>, usage_per_unit: Decimal) -> Self {
        self.fabrics.push(FabricRequirement {
            fabric_name: fabric_name.into(),
            usage_per_unit,
        });
        self
    }

    /// 建構器模式：添加材料需求
    pub fn with_material(
        mut self,
        material_name: impl Into<String>,
        quantity_expr: impl Into<String>,
    ) -> Self {
        self.materials.push(MaterialRequirement {
            material_name: material_name.into(),
            quantity_expr: quantity_expr.into(),
        });
        self
    }
}

/// ERP 價格更新記錄（同步工具 POST 的 JSON 陣列元素）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    #[serde(default)]
    pub symbol: Option<String>,

    #[serde(default)]
    pub price: Option<Decimal>,
}

impl PriceUpdate {
    /// 從 JSON 陣列解析價格更新
    pub fn parse_batch(payload: &str) -> Result<Vec<PriceUpdate>> {
        serde_json::from_str(payload).map_err(|e| AtelierError::Other(format!("無效的價格資料: {e}")))
    }

    /// 只有代號與價格皆存在時才會套用
    pub fn applicable(&self) -> Option<(&str, Decimal)> {
        match (self.symbol.as_deref(), self.price) {
            (Some(symbol), Some(price)) if !symbol.is_empty() => Some((symbol, price)),
            _ => None,
        }
    }
}

/// ERP 商品目錄項目（同步工具上傳的目錄快照）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub symbol: String,
    pub name: String,
}

impl CatalogItem {
    /// 從 JSON 陣列解析目錄快照
    pub fn parse_batch(payload: &str) -> Result<Vec<CatalogItem>> {
        serde_json::from_str(payload).map_err(|e| AtelierError::Other(format!("無效的目錄資料: {e}")))
    }
}
