//! 用量計算主入口

use atelier_core::{
    AtelierError, CatalogRepository, FabricRegistry, Order, OrderRepository, OrderStatus,
    ProductRecipe, RecipeRepository, UsageRepository,
};
use std::collections::{BTreeMap, HashMap};
use uuid::Uuid;

use crate::aggregator::{ConsumptionAggregator, OrderConsumption};
use crate::cost::{CostCalculator, CostEstimate, PriceBook};
use crate::recipe::normalize_name;
use crate::report::{CompletedReport, ReportCalculator, UsageSource};
use crate::SummaryLine;

/// 用量計算器
///
/// 從倉儲讀取純資料後交給純函式計算，本身不寫入任何資料。
pub struct ConsumptionCalculator<'a, S> {
    store: &'a S,
}

impl<'a, S> ConsumptionCalculator<'a, S>
where
    S: OrderRepository + RecipeRepository,
{
    /// 創建新的計算器
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// 訂單用量摘要（訂單明細、列印與文件匯出使用）
    pub fn summarize_order(&self, order_id: Uuid) -> atelier_core::Result<Vec<SummaryLine>> {
        Ok(self.aggregate_order(order_id)?.summary_lines())
    }

    /// 訂單計劃用量（未格式化）
    pub fn aggregate_order(&self, order_id: Uuid) -> atelier_core::Result<OrderConsumption> {
        let order = self.load_order(order_id)?;
        self.aggregate(&order)
    }

    /// 訂單中各產品的總件數
    pub fn product_totals(&self, order_id: Uuid) -> atelier_core::Result<BTreeMap<String, u64>> {
        let order = self.load_order(order_id)?;
        let recipes = self.load_recipes(&order)?;

        let mut totals = BTreeMap::new();
        for item in &order.items {
            if let Some(recipe) = item.product_id.and_then(|id| recipes.get(&id)) {
                *totals.entry(recipe.product_name.clone()).or_insert(0) += u64::from(item.quantity);
            }
        }
        Ok(totals)
    }

    fn aggregate(&self, order: &Order) -> atelier_core::Result<OrderConsumption> {
        let recipes = self.load_recipes(order)?;
        let consumption = ConsumptionAggregator::aggregate(&order.items, &recipes);

        tracing::debug!(
            "訂單 {} 計劃用量: 布料 {} 種, 材料 {} 種",
            order.id,
            consumption.fabrics.len(),
            consumption.materials.len()
        );

        Ok(consumption)
    }

    fn load_order(&self, order_id: Uuid) -> atelier_core::Result<Order> {
        self.store
            .order(order_id)?
            .ok_or(AtelierError::OrderNotFound(order_id))
    }

    /// 讀取訂單中所有產品的配方（以產品ID索引）
    fn load_recipes(&self, order: &Order) -> atelier_core::Result<HashMap<Uuid, ProductRecipe>> {
        let mut recipes = HashMap::new();
        for product_id in order.items.iter().filter_map(|item| item.product_id) {
            if recipes.contains_key(&product_id) {
                continue;
            }
            match self.store.recipe(product_id)? {
                Some(recipe) => {
                    recipes.insert(product_id, recipe);
                }
                None => tracing::debug!("訂單 {} 引用的產品 {} 不存在", order.id, product_id),
            }
        }
        Ok(recipes)
    }
}

impl<'a, S> ConsumptionCalculator<'a, S>
where
    S: OrderRepository + RecipeRepository + UsageRepository + FabricRegistry,
{
    /// 已完成訂單的用量報表
    ///
    /// 有手動記錄的訂單只採用手動記錄，否則採用計劃用量。
    pub fn summarize_completed(&self, filter: Option<&str>) -> atelier_core::Result<CompletedReport> {
        tracing::info!("開始計算已完成訂單用量報表，篩選: {:?}", filter);
        let start_time = std::time::Instant::now();

        let fabric_names = self.store.fabric_names()?;
        let orders = self.store.orders_with_status(OrderStatus::Completed)?;

        let mut sources = Vec::with_capacity(orders.len());
        for order in &orders {
            let actual = self.store.actual_usage(order.id)?;
            if actual.is_empty() {
                sources.push(UsageSource::Planned(self.aggregate(order)?));
            } else {
                tracing::debug!("訂單 {} 使用手動記錄 {} 筆", order.id, actual.len());
                sources.push(UsageSource::Actual(actual));
            }
        }

        let mut report = ReportCalculator::rollup(sources, &fabric_names, filter);
        report.known_materials = fabric_names;
        report.known_materials.extend(self.store.usage_names()?);

        tracing::info!(
            "報表計算完成：訂單 {} 張，布料 {} 種，材料 {} 種，耗時 {:?}",
            orders.len(),
            report.fabric_totals.len(),
            report.material_totals.len(),
            start_time.elapsed()
        );

        Ok(report)
    }

    /// 用量登記表：已有手動記錄時回傳手動記錄，否則回傳計劃用量摘要
    pub fn usage_sheet(&self, order_id: Uuid) -> atelier_core::Result<Vec<SummaryLine>> {
        let actual = self.store.actual_usage(order_id)?;
        if actual.is_empty() {
            return self.summarize_order(order_id);
        }

        Ok(actual
            .into_iter()
            .map(|usage| SummaryLine::new(usage.material_name, usage.quantity))
            .collect())
    }
}

impl<'a, S> ConsumptionCalculator<'a, S>
where
    S: OrderRepository + RecipeRepository + CatalogRepository,
{
    /// 估算訂單生產成本
    pub fn estimate_cost(&self, order_id: Uuid) -> atelier_core::Result<CostEstimate> {
        let order = self.load_order(order_id)?;
        let consumption = self.aggregate(&order)?;

        let mut prices = PriceBook::default();
        for product_id in order.items.iter().filter_map(|item| item.product_id) {
            if let Some(product) = self.store.product(product_id)? {
                prices.labour.insert(product_id, product.production_price);
            }
        }
        for name in consumption.fabrics.keys() {
            if let Some(price) = self.store.fabric_by_name(name)?.and_then(|f| f.price) {
                prices.fabrics.insert(normalize_name(name), price);
            }
        }
        for (name, _unit) in consumption.materials.keys() {
            if let Some(price) = self.store.material_by_name(name)?.and_then(|m| m.price) {
                prices.materials.insert(normalize_name(name), price);
            }
        }

        Ok(CostCalculator::estimate(&order.items, &consumption, &prices))
    }
}
