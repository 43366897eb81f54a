//! ERP 目錄與價格同步（接收端）

use atelier_core::{AtelierError, CatalogItem, Fabric, Material, PriceUpdate, Result};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::store::MemoryStore;

/// 目錄項目對應的類型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingKind {
    Fabric,
    Material,
}

impl MemoryStore {
    /// 套用價格更新；回傳至少更新了一個布料或材料的代號數
    pub fn apply_price_updates(&mut self, updates: &[PriceUpdate]) -> usize {
        let mut updated = 0;

        for (symbol, price) in updates.iter().filter_map(PriceUpdate::applicable) {
            let mut matched = false;

            for fabric in self
                .fabrics
                .values_mut()
                .filter(|f| f.catalog_symbol.as_deref() == Some(symbol))
            {
                fabric.price = Some(price);
                matched = true;
            }
            for material in self
                .materials
                .values_mut()
                .filter(|m| m.catalog_symbol.as_deref() == Some(symbol))
            {
                material.price = Some(price);
                matched = true;
            }

            if matched {
                updated += 1;
            } else {
                tracing::debug!("價格更新的代號 {} 沒有對應項目", symbol);
            }
        }

        tracing::info!("價格同步完成：{} 筆資料，更新 {} 個代號", updates.len(), updated);
        updated
    }

    /// 已對應到布料或材料的 ERP 代號
    pub fn mapped_symbols(&self) -> BTreeSet<String> {
        self.fabrics
            .values()
            .filter_map(|f| f.catalog_symbol.clone())
            .chain(self.materials.values().filter_map(|m| m.catalog_symbol.clone()))
            .collect()
    }

    /// 以新快照取代 ERP 目錄；所有項目標記為未對應
    pub fn replace_catalog(&mut self, items: Vec<CatalogItem>) -> usize {
        self.catalog_cache = items
            .into_iter()
            .map(|item| (item.symbol.clone(), (item, false)))
            .collect();
        self.catalog_cache.len()
    }

    /// 尚未對應的目錄項目（依代號排序）
    pub fn unmapped_catalog(&self) -> Vec<&CatalogItem> {
        self.catalog_cache
            .values()
            .filter(|(_, mapped)| !mapped)
            .map(|(item, _)| item)
            .collect()
    }

    /// 將目錄項目對應為布料或材料
    ///
    /// 已有相同代號的項目時不重複建立，只標記為已對應；回傳對應的項目ID。
    pub fn map_catalog_item(&mut self, symbol: &str, name: &str, kind: MappingKind) -> Result<Uuid> {
        if !self.catalog_cache.contains_key(symbol) {
            return Err(AtelierError::Other(format!("目錄中找不到代號 {symbol}")));
        }

        let id = match kind {
            MappingKind::Fabric => {
                let existing = self
                    .fabrics
                    .values()
                    .find(|f| f.catalog_symbol.as_deref() == Some(symbol))
                    .map(|f| f.id);
                match existing {
                    Some(id) => id,
                    None => self.add_fabric(Fabric::new(name).with_catalog_symbol(symbol))?,
                }
            }
            MappingKind::Material => {
                let existing = self
                    .materials
                    .values()
                    .find(|m| m.catalog_symbol.as_deref() == Some(symbol))
                    .map(|m| m.id);
                match existing {
                    Some(id) => id,
                    None => self.add_material(Material::new(name).with_catalog_symbol(symbol))?,
                }
            }
        };

        if let Some((_, mapped)) = self.catalog_cache.get_mut(symbol) {
            *mapped = true;
        }
        Ok(id)
    }
}
