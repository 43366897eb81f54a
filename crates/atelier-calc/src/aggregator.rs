//! 訂單用量彙總

use atelier_core::{OrderItem, ProductRecipe};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::format::format_with_unit;
use crate::recipe::{RecipeLine, RecipeResolver};
use crate::SummaryLine;

/// 布料彙總行使用的單位
pub const FABRIC_UNIT: &str = "metra";

/// 單張訂單的計劃用量（未格式化）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderConsumption {
    /// 布料名稱 → 公尺
    pub fabrics: BTreeMap<String, Decimal>,

    /// (材料名稱, 單位) → 數量
    pub materials: BTreeMap<(String, String), Decimal>,
}

impl OrderConsumption {
    /// 是否沒有任何用量
    pub fn is_empty(&self) -> bool {
        self.fabrics.is_empty() && self.materials.is_empty()
    }

    /// 格式化為顯示行：布料（依名稱）在前，材料（依名稱、單位）在後；零值省略
    pub fn summary_lines(&self) -> Vec<SummaryLine> {
        let fabrics = self
            .fabrics
            .iter()
            .filter(|(_, total)| !total.is_zero())
            .map(|(name, total)| SummaryLine::new(name.clone(), format_with_unit(*total, FABRIC_UNIT)));

        let materials = self
            .materials
            .iter()
            .filter(|(_, total)| !total.is_zero())
            .map(|((name, unit), total)| SummaryLine::new(name.clone(), format_with_unit(*total, unit)));

        fabrics.chain(materials).collect()
    }
}

/// 累加到指定鍵；溢位時不改動既有總量並回傳 None
pub(crate) fn accumulate<K: Ord>(totals: &mut BTreeMap<K, Decimal>, key: K, value: Decimal) -> Option<()> {
    let entry = totals.entry(key).or_insert(Decimal::ZERO);
    *entry = entry.checked_add(value)?;
    Some(())
}

/// 用量彙總器
pub struct ConsumptionAggregator;

impl ConsumptionAggregator {
    /// 彙總訂單明細的計劃用量
    ///
    /// `recipes` 以產品ID索引；找不到產品的明細不計入。
    pub fn aggregate(items: &[OrderItem], recipes: &HashMap<Uuid, ProductRecipe>) -> OrderConsumption {
        let mut consumption = OrderConsumption::default();

        for item in items {
            let Some(recipe) = item.product_id.and_then(|id| recipes.get(&id)) else {
                tracing::debug!("明細 {} x{} 沒有對應產品，略過", item.size, item.quantity);
                continue;
            };

            let quantity = Decimal::from(item.quantity);

            for line in RecipeResolver::resolve(recipe) {
                let added = match &line {
                    RecipeLine::Fabric {
                        name,
                        meters_per_unit,
                    } => meters_per_unit
                        .checked_mul(quantity)
                        .and_then(|total| accumulate(&mut consumption.fabrics, name.clone(), total)),
                    RecipeLine::Material { name, per_unit } => per_unit
                        .scaled(item.quantity)
                        .and_then(|total| {
                            accumulate(&mut consumption.materials, (name.clone(), total.unit), total.value)
                        }),
                };

                if added.is_none() {
                    tracing::debug!(
                        "產品 {} 的 {} 用量 x{} 超出數值範圍，略過",
                        recipe.product_name,
                        line.name(),
                        item.quantity
                    );
                }
            }
        }

        consumption
    }

    /// 彙總並格式化為顯示行
    pub fn summarize(items: &[OrderItem], recipes: &HashMap<Uuid, ProductRecipe>) -> Vec<SummaryLine> {
        Self::aggregate(items, recipes).summary_lines()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipes_of(list: Vec<ProductRecipe>) -> HashMap<Uuid, ProductRecipe> {
        list.into_iter().map(|r| (r.product_id, r)).collect()
    }

    #[test]
    fn test_fabric_and_material_summary() {
        let shirt = ProductRecipe::new(Uuid::new_v4(), "Koszula")
            .with_fabric("Bawełna", Decimal::new(15, 1))
            .with_material("Guzik", "4 szt");
        let items = vec![OrderItem::new(shirt.product_id, "M", 3).unwrap()];
        let recipes = recipes_of(vec![shirt]);

        let summary = ConsumptionAggregator::summarize(&items, &recipes);

        assert_eq!(
            summary,
            vec![
                SummaryLine::new("BAWEŁNA", "4.50 metra"),
                SummaryLine::new("GUZIK", "12 szt"),
            ]
        );
    }

    #[test]
    fn test_same_product_lines_summed() {
        let apron = ProductRecipe::new(Uuid::new_v4(), "Fartuch").with_material("Nić", "0.1 m");
        let items = vec![
            OrderItem::new(apron.product_id, "S", 2).unwrap(),
            OrderItem::new(apron.product_id, "L", 3).unwrap(),
        ];
        let recipes = recipes_of(vec![apron]);

        let summary = ConsumptionAggregator::summarize(&items, &recipes);

        assert_eq!(summary, vec![SummaryLine::new("NIĆ", "0.50 m")]);
    }

    #[test]
    fn test_units_tracked_separately() {
        let first = ProductRecipe::new(Uuid::new_v4(), "Bluza").with_material("Gumka", "0.5 m");
        let second = ProductRecipe::new(Uuid::new_v4(), "Spodnie").with_material("GUMKA", "2 szt");
        let items = vec![
            OrderItem::new(first.product_id, "M", 2).unwrap(),
            OrderItem::new(second.product_id, "M", 1).unwrap(),
        ];
        let recipes = recipes_of(vec![first, second]);

        let consumption = ConsumptionAggregator::aggregate(&items, &recipes);

        assert_eq!(consumption.materials.len(), 2);
        assert_eq!(
            consumption.materials[&("GUMKA".to_string(), "m".to_string())],
            Decimal::from(1)
        );
        assert_eq!(
            consumption.materials[&("GUMKA".to_string(), "szt".to_string())],
            Decimal::from(2)
        );
    }

    #[test]
    fn test_missing_product_and_bad_quantity_skipped() {
        let apron = ProductRecipe::new(Uuid::new_v4(), "Fartuch")
            .with_material("Tasiemka", "abc")
            .with_material("Guzik", "2 szt");
        let mut orphan = OrderItem::new(Uuid::new_v4(), "M", 5).unwrap();
        orphan.product_id = None;
        let items = vec![
            OrderItem::new(apron.product_id, "M", 1).unwrap(),
            OrderItem::new(Uuid::new_v4(), "L", 4).unwrap(),
            orphan,
        ];
        let recipes = recipes_of(vec![apron]);

        let summary = ConsumptionAggregator::summarize(&items, &recipes);

        assert_eq!(summary, vec![SummaryLine::new("GUZIK", "2 szt")]);
    }

    #[test]
    fn test_zero_totals_omitted() {
        let bag = ProductRecipe::new(Uuid::new_v4(), "Torba")
            .with_fabric("Len", Decimal::ZERO)
            .with_material("Nit", "0 szt")
            .with_material("Rzep", "1 szt");
        let items = vec![OrderItem::new(bag.product_id, "UNI", 4).unwrap()];
        let recipes = recipes_of(vec![bag]);

        let consumption = ConsumptionAggregator::aggregate(&items, &recipes);
        let summary = consumption.summary_lines();

        assert_eq!(consumption.fabrics.len(), 1);
        assert_eq!(summary, vec![SummaryLine::new("RZEP", "4 szt")]);
    }

    #[test]
    fn test_out_of_range_quantity_skipped() {
        let sack = ProductRecipe::new(Uuid::new_v4(), "Worek")
            .with_fabric("Juta", Decimal::MAX)
            .with_material("Sznurek", "79228162514264337593543950335 m")
            .with_material("Guzik", "2 szt");
        let items = vec![
            OrderItem::new(sack.product_id, "UNI", 1).unwrap(),
            OrderItem::new(sack.product_id, "UNI", 2).unwrap(),
        ];
        let recipes = recipes_of(vec![sack]);

        let consumption = ConsumptionAggregator::aggregate(&items, &recipes);

        // 第一行可容納，第二行溢位後略過
        assert_eq!(consumption.fabrics["JUTA"], Decimal::MAX);
        assert_eq!(
            consumption.materials[&("SZNUREK".to_string(), "m".to_string())],
            Decimal::MAX
        );
        assert_eq!(
            consumption.materials[&("GUZIK".to_string(), "szt".to_string())],
            Decimal::from(6)
        );
    }

    #[test]
    fn test_empty_order() {
        let consumption = ConsumptionAggregator::aggregate(&[], &HashMap::new());
        assert!(consumption.is_empty());
        assert!(consumption.summary_lines().is_empty());
    }
}
