//! 用量表達式解析

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 開頭數字 + 其餘文字作為單位，例如 "2.5 m"、"10szt"、"4"
static QUANTITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([0-9]+\.?[0-9]*)\s*(.*)").expect("用量表達式正則無效")
});

/// 已解析的用量
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quantity {
    /// 數值
    pub value: Decimal,

    /// 單位（可能為空字串）
    pub unit: String,
}

impl Quantity {
    pub fn new(value: Decimal, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// 乘以訂購數量；超出 Decimal 範圍時回傳 None
    pub fn scaled(&self, factor: u32) -> Option<Self> {
        Some(Self {
            value: self.value.checked_mul(Decimal::from(factor))?,
            unit: self.unit.clone(),
        })
    }
}

/// 解析用量表達式
///
/// 不以數字開頭（或數值超出範圍）時回傳 None，由呼叫端略過該筆。
pub fn parse_quantity(expr: &str) -> Option<Quantity> {
    let captures = QUANTITY_PATTERN.captures(expr)?;
    let number = captures.get(1)?.as_str();
    let unit = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");

    // "2." 視為 2
    let value = Decimal::from_str(number.trim_end_matches('.')).ok()?;

    Some(Quantity::new(value, unit))
}
