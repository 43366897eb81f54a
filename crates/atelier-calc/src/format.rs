//! 數量顯示格式

use rust_decimal::{Decimal, RoundingStrategy};

/// 整數值不帶小數點，其餘固定兩位小數
pub fn format_amount(value: Decimal) -> String {
    if value == value.trunc() {
        return value.trunc().normalize().to_string();
    }

    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// 數值加上單位後綴；單位為空時只顯示數值
pub fn format_with_unit(value: Decimal, unit: &str) -> String {
    let amount = format_amount(value);
    if unit.is_empty() {
        amount
    } else {
        format!("{amount} {unit}")
    }
}
