//! 記憶體倉儲與讀取介面實作

use atelier_core::{
    CatalogItem, CatalogRepository, Client, Fabric, FabricRegistry, FabricRequirement, Material,
    MaterialRequirement, MaterialUsage, Order, OrderRepository, OrderStatus, Product,
    ProductCategory, ProductRecipe, RecipeRepository, UsageRepository,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use uuid::Uuid;

/// 記憶體倉儲
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub(crate) clients: HashMap<Uuid, Client>,
    pub(crate) fabrics: HashMap<Uuid, Fabric>,
    pub(crate) materials: HashMap<Uuid, Material>,
    pub(crate) categories: HashMap<Uuid, ProductCategory>,
    pub(crate) products: HashMap<Uuid, Product>,
    pub(crate) orders: HashMap<Uuid, Order>,
    pub(crate) usage: HashMap<Uuid, Vec<MaterialUsage>>,

    /// ERP 目錄快照：代號 → (項目, 是否已對應)
    pub(crate) catalog_cache: BTreeMap<String, (CatalogItem, bool)>,

    /// 訂單編號流水號
    pub(crate) order_sequence: u64,
}

impl MemoryStore {
    /// 創建空倉儲
    pub fn new() -> Self {
        Self::default()
    }

    pub fn client(&self, client_id: Uuid) -> Option<&Client> {
        self.clients.get(&client_id)
    }

    pub fn client_by_name(&self, name: &str) -> Option<&Client> {
        self.clients.values().find(|c| same_name(&c.name, name))
    }

    pub fn fabric(&self, fabric_id: Uuid) -> Option<&Fabric> {
        self.fabrics.get(&fabric_id)
    }

    pub fn material(&self, material_id: Uuid) -> Option<&Material> {
        self.materials.get(&material_id)
    }

    pub fn product_by_name(&self, name: &str) -> Option<&Product> {
        self.products.values().find(|p| same_name(&p.name, name))
    }

    pub fn category(&self, category_id: Uuid) -> Option<&ProductCategory> {
        self.categories.get(&category_id)
    }

    /// 所有產品（依名稱排序）
    pub fn products(&self) -> Vec<&Product> {
        let mut products: Vec<_> = self.products.values().collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// 所有訂單（依建立時間排序）
    pub fn orders(&self) -> Vec<&Order> {
        let mut orders: Vec<_> = self.orders.values().collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        orders
    }
}

/// 名稱比對（去空白、不分大小寫）
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_uppercase() == b.trim().to_uppercase()
}

impl RecipeRepository for MemoryStore {
    fn recipe(&self, product_id: Uuid) -> atelier_core::Result<Option<ProductRecipe>> {
        let Some(product) = self.products.get(&product_id) else {
            return Ok(None);
        };

        let mut recipe = ProductRecipe::new(product.id, product.name.clone());

        for link in &product.fabrics {
            match self.fabrics.get(&link.fabric_id) {
                Some(fabric) => recipe.fabrics.push(FabricRequirement {
                    fabric_name: fabric.name.clone(),
                    usage_per_unit: link.usage_meters,
                }),
                None => tracing::warn!("產品 {} 的布料 {} 不存在", product.name, link.fabric_id),
            }
        }

        for link in &product.materials {
            match self.materials.get(&link.material_id) {
                Some(material) => recipe.materials.push(MaterialRequirement {
                    material_name: material.name.clone(),
                    quantity_expr: link.quantity.clone(),
                }),
                None => tracing::warn!("產品 {} 的材料 {} 不存在", product.name, link.material_id),
            }
        }

        Ok(Some(recipe))
    }
}

impl FabricRegistry for MemoryStore {
    fn fabric_names(&self) -> atelier_core::Result<BTreeSet<String>> {
        Ok(self
            .fabrics
            .values()
            .map(|f| f.name.trim().to_uppercase())
            .collect())
    }
}

impl OrderRepository for MemoryStore {
    fn order(&self, order_id: Uuid) -> atelier_core::Result<Option<Order>> {
        Ok(self.orders.get(&order_id).cloned())
    }

    fn orders_with_status(&self, status: OrderStatus) -> atelier_core::Result<Vec<Order>> {
        Ok(self
            .orders()
            .into_iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect())
    }
}

impl UsageRepository for MemoryStore {
    fn actual_usage(&self, order_id: Uuid) -> atelier_core::Result<Vec<MaterialUsage>> {
        Ok(self.usage.get(&order_id).cloned().unwrap_or_default())
    }

    fn usage_names(&self) -> atelier_core::Result<BTreeSet<String>> {
        Ok(self
            .usage
            .values()
            .flatten()
            .map(|u| u.material_name.clone())
            .collect())
    }
}

impl CatalogRepository for MemoryStore {
    fn product(&self, product_id: Uuid) -> atelier_core::Result<Option<Product>> {
        Ok(self.products.get(&product_id).cloned())
    }

    fn fabric_by_name(&self, name: &str) -> atelier_core::Result<Option<Fabric>> {
        Ok(self.fabrics.values().find(|f| same_name(&f.name, name)).cloned())
    }

    fn material_by_name(&self, name: &str) -> atelier_core::Result<Option<Material>> {
        Ok(self
            .materials
            .values()
            .find(|m| same_name(&m.name, name))
            .cloned())
    }
}
