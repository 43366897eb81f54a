//! 訂單生產成本估算

use atelier_core::OrderItem;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use crate::aggregator::OrderConsumption;

/// 單價表（名稱為大寫）
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    /// 產品ID → 生產單價
    pub labour: HashMap<Uuid, Decimal>,

    /// 布料名稱 → 每公尺單價
    pub fabrics: HashMap<String, Decimal>,

    /// 材料名稱 → 每單位單價
    pub materials: HashMap<String, Decimal>,
}

/// 成本估算結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// 人工
    pub labour: Decimal,

    /// 布料
    pub fabrics: Decimal,

    /// 其他材料
    pub materials: Decimal,

    /// 合計
    pub total: Decimal,

    /// 沒有單價、未計入成本的布料與材料
    pub unpriced: BTreeSet<String>,
}

/// 成本計算器
pub struct CostCalculator;

impl CostCalculator {
    /// 估算訂單成本：生產單價 × 件數，加上計劃用量 × 單價
    ///
    /// 材料單價按材料名稱查找，不區分用量單位。
    pub fn estimate(items: &[OrderItem], consumption: &OrderConsumption, prices: &PriceBook) -> CostEstimate {
        let mut estimate = CostEstimate::default();

        for item in items {
            if let Some(rate) = item.product_id.and_then(|id| prices.labour.get(&id)) {
                let added = rate
                    .checked_mul(Decimal::from(item.quantity))
                    .and_then(|cost| estimate.labour.checked_add(cost));
                match added {
                    Some(labour) => estimate.labour = labour,
                    None => tracing::debug!("明細 {} x{} 的人工成本超出數值範圍，略過", item.size, item.quantity),
                }
            }
        }

        for (name, meters) in &consumption.fabrics {
            match prices.fabrics.get(name) {
                Some(price) => add_cost(&mut estimate.fabrics, *price, *meters, name),
                None => {
                    estimate.unpriced.insert(name.clone());
                }
            }
        }

        for ((name, _unit), value) in &consumption.materials {
            match prices.materials.get(name) {
                Some(price) => add_cost(&mut estimate.materials, *price, *value, name),
                None => {
                    estimate.unpriced.insert(name.clone());
                }
            }
        }

        // 合計溢位時以 Decimal::MAX 表示
        estimate.total = estimate
            .labour
            .checked_add(estimate.fabrics)
            .and_then(|sum| sum.checked_add(estimate.materials))
            .unwrap_or(Decimal::MAX);
        estimate
    }
}

/// 累加 單價 × 用量；溢位時略過該項
fn add_cost(total: &mut Decimal, price: Decimal, amount: Decimal, name: &str) {
    match price.checked_mul(amount).and_then(|cost| total.checked_add(cost)) {
        Some(sum) => *total = sum,
        None => tracing::debug!("{} 的成本超出數值範圍，略過", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_estimate_cost() {
        let product_id = Uuid::new_v4();
        let items = vec![OrderItem::new(product_id, "M", 3).unwrap()];
        let consumption = OrderConsumption {
            fabrics: BTreeMap::from([("BAWEŁNA".to_string(), Decimal::new(45, 1))]),
            materials: BTreeMap::from([
                (("GUZIK".to_string(), "szt".to_string()), Decimal::from(12)),
                (("NIĆ".to_string(), "m".to_string()), Decimal::from(30)),
            ]),
        };
        let prices = PriceBook {
            labour: HashMap::from([(product_id, Decimal::from(15))]),
            fabrics: HashMap::from([("BAWEŁNA".to_string(), Decimal::from(20))]),
            materials: HashMap::from([("GUZIK".to_string(), Decimal::new(50, 2))]),
        };

        let estimate = CostCalculator::estimate(&items, &consumption, &prices);

        assert_eq!(estimate.labour, Decimal::from(45));
        assert_eq!(estimate.fabrics, Decimal::from(90));
        assert_eq!(estimate.materials, Decimal::from(6));
        assert_eq!(estimate.total, Decimal::from(141));
        assert_eq!(estimate.unpriced, BTreeSet::from(["NIĆ".to_string()]));
    }

    #[test]
    fn test_out_of_range_cost_skipped() {
        let product_id = Uuid::new_v4();
        let items = vec![OrderItem::new(product_id, "M", 2).unwrap()];
        let consumption = OrderConsumption {
            fabrics: BTreeMap::from([
                ("JUTA".to_string(), Decimal::MAX),
                ("LEN".to_string(), Decimal::from(2)),
            ]),
            materials: BTreeMap::new(),
        };
        let prices = PriceBook {
            labour: HashMap::from([(product_id, Decimal::MAX)]),
            fabrics: HashMap::from([
                ("JUTA".to_string(), Decimal::from(3)),
                ("LEN".to_string(), Decimal::from(10)),
            ]),
            materials: HashMap::new(),
        };

        let estimate = CostCalculator::estimate(&items, &consumption, &prices);

        assert_eq!(estimate.labour, Decimal::ZERO);
        assert_eq!(estimate.fabrics, Decimal::from(20));
        assert_eq!(estimate.total, Decimal::from(20));
    }

    #[test]
    fn test_estimate_empty_order() {
        let estimate = CostCalculator::estimate(&[], &OrderConsumption::default(), &PriceBook::default());
        assert_eq!(estimate.total, Decimal::ZERO);
        assert!(estimate.unpriced.is_empty());
    }
}
