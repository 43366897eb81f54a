//! 目錄維護：客戶、布料、材料、分類與產品

use atelier_core::{
    AtelierError, Client, Fabric, FabricLink, Material, MaterialLink, Product, ProductCategory,
    Result,
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::store::{same_name, MemoryStore};

impl MemoryStore {
    /// 新增客戶（名稱轉大寫、唯一）
    pub fn add_client(&mut self, name: &str) -> Result<Uuid> {
        let name = name.trim().to_uppercase();
        if self.client_by_name(&name).is_some() {
            return Err(AtelierError::DuplicateName(name));
        }

        let client = Client::new(name);
        let id = client.id;
        self.clients.insert(id, client);
        Ok(id)
    }

    /// 依名稱取得客戶，不存在時建立
    pub fn ensure_client(&mut self, name: &str) -> Result<Uuid> {
        if let Some(id) = self.client_by_name(name).map(|c| c.id) {
            return Ok(id);
        }
        self.add_client(name)
    }

    /// 新增布料
    pub fn add_fabric(&mut self, fabric: Fabric) -> Result<Uuid> {
        if self.fabrics.values().any(|f| same_name(&f.name, &fabric.name)) {
            return Err(AtelierError::DuplicateName(fabric.name));
        }

        let id = fabric.id;
        self.fabrics.insert(id, fabric);
        Ok(id)
    }

    /// 新增材料
    pub fn add_material(&mut self, material: Material) -> Result<Uuid> {
        if self
            .materials
            .values()
            .any(|m| same_name(&m.name, &material.name))
        {
            return Err(AtelierError::DuplicateName(material.name));
        }

        let id = material.id;
        self.materials.insert(id, material);
        Ok(id)
    }

    /// 新增產品分類
    pub fn add_category(&mut self, name: &str) -> Result<Uuid> {
        if self.categories.values().any(|c| same_name(&c.name, name)) {
            return Err(AtelierError::DuplicateName(name.trim().to_string()));
        }

        let category = ProductCategory::new(name);
        let id = category.id;
        self.categories.insert(id, category);
        Ok(id)
    }

    /// 刪除分類；已分類的產品改為未分類
    pub fn delete_category(&mut self, category_id: Uuid) -> Result<()> {
        self.categories
            .remove(&category_id)
            .ok_or_else(|| AtelierError::Other(format!("找不到分類: {category_id}")))?;

        for product in self.products.values_mut() {
            if product.category_id == Some(category_id) {
                product.category_id = None;
            }
        }
        Ok(())
    }

    /// 新增產品（驗證數值並檢查配方引用）
    pub fn add_product(&mut self, product: Product) -> Result<Uuid> {
        if self.product_by_name(&product.name).is_some() {
            return Err(AtelierError::DuplicateName(product.name));
        }
        product.validate()?;
        self.check_links(&product.fabrics, &product.materials)?;

        let id = product.id;
        self.products.insert(id, product);
        Ok(id)
    }

    /// 依名稱取得產品，不存在時建立空配方產品
    pub fn ensure_product(&mut self, name: &str) -> Result<Uuid> {
        if let Some(product) = self.product_by_name(name) {
            return Ok(product.id);
        }

        let name = name.trim().to_uppercase();
        if name.is_empty() {
            return Err(AtelierError::ProductNotFound("(空白名稱)".to_string()));
        }

        tracing::info!("建立新產品: {}", name);
        self.add_product(Product::new(name))
    }

    /// 替換產品配方
    pub fn set_recipe(
        &mut self,
        product_id: Uuid,
        fabrics: Vec<FabricLink>,
        materials: Vec<MaterialLink>,
    ) -> Result<()> {
        self.check_links(&fabrics, &materials)?;

        let product = self
            .products
            .get_mut(&product_id)
            .ok_or_else(|| AtelierError::ProductNotFound(product_id.to_string()))?;

        let mut updated = product.clone();
        updated.fabrics = fabrics;
        updated.materials = materials;
        updated.validate()?;

        *product = updated;
        Ok(())
    }

    /// 設置產品生產單價
    pub fn set_production_price(&mut self, product_id: Uuid, price: Decimal) -> Result<()> {
        if price < Decimal::ZERO {
            return Err(AtelierError::NegativeValue {
                field: "production_price",
                value: price.to_string(),
            });
        }

        let product = self
            .products
            .get_mut(&product_id)
            .ok_or_else(|| AtelierError::ProductNotFound(product_id.to_string()))?;
        product.production_price = price;
        Ok(())
    }

    /// 刪除產品；仍被訂單明細引用時拒絕
    pub fn delete_product(&mut self, product_id: Uuid) -> Result<()> {
        let product = self
            .products
            .get(&product_id)
            .ok_or_else(|| AtelierError::ProductNotFound(product_id.to_string()))?;

        let in_use = self
            .orders
            .values()
            .flat_map(|o| o.items.iter())
            .any(|item| item.product_id == Some(product_id));
        if in_use {
            tracing::warn!("產品 {} 仍被訂單使用，拒絕刪除", product.name);
            return Err(AtelierError::ProductInUse(product.name.clone()));
        }

        self.products.remove(&product_id);
        Ok(())
    }

    /// 刪除布料；仍被產品配方或訂單使用時拒絕
    pub fn delete_fabric(&mut self, fabric_id: Uuid) -> Result<()> {
        let fabric = self
            .fabrics
            .get(&fabric_id)
            .ok_or_else(|| AtelierError::FabricNotFound(fabric_id.to_string()))?;

        let in_recipe = self
            .products
            .values()
            .any(|p| p.fabrics.iter().any(|l| l.fabric_id == fabric_id));
        let in_order = self.orders.values().any(|o| o.fabric_ids.contains(&fabric_id));
        if in_recipe || in_order {
            tracing::warn!("布料 {} 仍被使用，拒絕刪除", fabric.name);
            return Err(AtelierError::ItemInUse(fabric.name.clone()));
        }

        self.fabrics.remove(&fabric_id);
        Ok(())
    }

    /// 刪除材料；仍被產品配方使用時拒絕
    pub fn delete_material(&mut self, material_id: Uuid) -> Result<()> {
        let material = self
            .materials
            .get(&material_id)
            .ok_or_else(|| AtelierError::MaterialNotFound(material_id.to_string()))?;

        let in_recipe = self
            .products
            .values()
            .any(|p| p.materials.iter().any(|l| l.material_id == material_id));
        if in_recipe {
            tracing::warn!("材料 {} 仍被產品配方使用，拒絕刪除", material.name);
            return Err(AtelierError::ItemInUse(material.name.clone()));
        }

        self.materials.remove(&material_id);
        Ok(())
    }

    fn check_links(&self, fabrics: &[FabricLink], materials: &[MaterialLink]) -> Result<()> {
        if let Some(link) = fabrics.iter().find(|l| !self.fabrics.contains_key(&l.fabric_id)) {
            return Err(AtelierError::FabricNotFound(link.fabric_id.to_string()));
        }
        if let Some(link) = materials
            .iter()
            .find(|l| !self.materials.contains_key(&l.material_id))
        {
            return Err(AtelierError::MaterialNotFound(link.material_id.to_string()));
        }
        Ok(())
    }
}
