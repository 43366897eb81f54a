//! 已完成訂單的用量報表

use atelier_core::MaterialUsage;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::aggregator::{accumulate, OrderConsumption};
use crate::quantity::parse_quantity;
use crate::recipe::normalize_name;

/// 單張訂單對報表的用量來源
#[derive(Debug, Clone)]
pub enum UsageSource {
    /// 手動記錄的實際用量（優先）
    Actual(Vec<MaterialUsage>),

    /// 依配方計算的計劃用量
    Planned(OrderConsumption),
}

/// 用量報表
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedReport {
    /// 布料名稱 → 總公尺數
    pub fabric_totals: BTreeMap<String, Decimal>,

    /// 材料名稱 → 單位 → 總量
    pub material_totals: BTreeMap<String, BTreeMap<String, Decimal>>,

    /// 可供篩選的名稱（布料名冊與手動記錄名稱的聯集）
    pub known_materials: BTreeSet<String>,
}

impl CompletedReport {
    pub fn is_empty(&self) -> bool {
        self.fabric_totals.is_empty() && self.material_totals.is_empty()
    }

    fn add_fabric(&mut self, name: String, value: Decimal) -> Option<()> {
        accumulate(&mut self.fabric_totals, name, value)
    }

    fn add_material(&mut self, name: String, unit: String, value: Decimal) -> Option<()> {
        accumulate(self.material_totals.entry(name).or_default(), unit, value)
    }

    /// 只保留名稱包含篩選字串（不分大小寫）的項目
    pub fn retain_matching(&mut self, filter: &str) {
        let needle = normalize_name(filter);
        if needle.is_empty() {
            return;
        }

        self.fabric_totals.retain(|name, _| name.contains(&needle));
        self.material_totals.retain(|name, _| name.contains(&needle));
    }
}

/// 報表計算器
pub struct ReportCalculator;

impl ReportCalculator {
    /// 匯總多張訂單的用量
    ///
    /// 實際用量的名稱若在布料名冊中即歸為布料（忽略單位），否則依單位歸為材料；
    /// 計劃用量沿用配方解析時的類型。無法解析的記錄不計入。
    pub fn rollup<I>(sources: I, fabric_names: &BTreeSet<String>, filter: Option<&str>) -> CompletedReport
    where
        I: IntoIterator<Item = UsageSource>,
    {
        let mut report = CompletedReport::default();

        for source in sources {
            match source {
                UsageSource::Actual(rows) => Self::add_actual(&mut report, &rows, fabric_names),
                UsageSource::Planned(consumption) => Self::add_planned(&mut report, consumption),
            }
        }

        if let Some(filter) = filter {
            report.retain_matching(filter);
        }

        report
    }

    fn add_actual(report: &mut CompletedReport, rows: &[MaterialUsage], fabric_names: &BTreeSet<String>) {
        for row in rows {
            let name = normalize_name(&row.material_name);
            let Some(quantity) = parse_quantity(&row.quantity) else {
                tracing::debug!("訂單 {} 的實際用量 {} 無法解析: {:?}", row.order_id, name, row.quantity);
                continue;
            };
            if quantity.value.is_zero() {
                continue;
            }

            let added = if fabric_names.contains(&name) {
                report.add_fabric(name.clone(), quantity.value)
            } else {
                report.add_material(name.clone(), quantity.unit, quantity.value)
            };
            if added.is_none() {
                tracing::debug!("訂單 {} 的實際用量 {} 超出數值範圍，略過", row.order_id, name);
            }
        }
    }

    fn add_planned(report: &mut CompletedReport, consumption: OrderConsumption) {
        for (name, meters) in consumption.fabrics {
            if !meters.is_zero() && report.add_fabric(name.clone(), meters).is_none() {
                tracing::debug!("布料 {} 的計劃用量超出數值範圍，略過", name);
            }
        }
        for ((name, unit), value) in consumption.materials {
            if !value.is_zero() && report.add_material(name.clone(), unit, value).is_none() {
                tracing::debug!("材料 {} 的計劃用量超出數值範圍，略過", name);
            }
        }
    }
}
