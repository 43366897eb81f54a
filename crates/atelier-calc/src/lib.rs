//! # Atelier Calculation Engine
//!
//! 配方用量彙總、報表與成本估算

pub mod aggregator;
pub mod calculator;
pub mod cost;
pub mod format;
pub mod quantity;
pub mod recipe;
pub mod report;

// Re-export 主要類型
pub use aggregator::{ConsumptionAggregator, OrderConsumption, FABRIC_UNIT};
pub use calculator::ConsumptionCalculator;
pub use cost::{CostCalculator, CostEstimate, PriceBook};
pub use format::{format_amount, format_with_unit};
pub use quantity::{parse_quantity, Quantity};
pub use recipe::{RecipeLine, RecipeResolver};
pub use report::{CompletedReport, ReportCalculator, UsageSource};

use serde::{Deserialize, Serialize};

/// 用量摘要行（名稱與含單位的顯示數量）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryLine {
    pub name: String,
    pub quantity: String,
}

impl SummaryLine {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }
}
