//! 配方解析：將產品配方轉為帶類型標記的用量行

use atelier_core::ProductRecipe;
use rust_decimal::Decimal;

use crate::quantity::{parse_quantity, Quantity};

/// 配方用量行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeLine {
    /// 布料（每件公尺數）
    Fabric { name: String, meters_per_unit: Decimal },

    /// 其他材料（每件用量與單位）
    Material { name: String, per_unit: Quantity },
}

impl RecipeLine {
    pub fn name(&self) -> &str {
        match self {
            RecipeLine::Fabric { name, .. } | RecipeLine::Material { name, .. } => name,
        }
    }

    pub fn is_fabric(&self) -> bool {
        matches!(self, RecipeLine::Fabric { .. })
    }
}

/// 配方解析器
pub struct RecipeResolver;

impl RecipeResolver {
    /// 解析配方；布料在前、材料在後，各自保持配方順序
    ///
    /// 名稱統一去空白並轉大寫；無法解析的材料用量會被略過。
    pub fn resolve(recipe: &ProductRecipe) -> Vec<RecipeLine> {
        let mut lines = Vec::with_capacity(recipe.fabrics.len() + recipe.materials.len());

        for fabric in &recipe.fabrics {
            lines.push(RecipeLine::Fabric {
                name: normalize_name(&fabric.fabric_name),
                meters_per_unit: fabric.usage_per_unit,
            });
        }

        for material in &recipe.materials {
            match parse_quantity(&material.quantity_expr) {
                Some(per_unit) => lines.push(RecipeLine::Material {
                    name: normalize_name(&material.material_name),
                    per_unit,
                }),
                None => {
                    tracing::debug!(
                        "產品 {} 的材料 {} 用量無法解析，略過: {:?}",
                        recipe.product_name,
                        material.material_name,
                        material.quantity_expr
                    );
                }
            }
        }

        lines
    }
}

/// 彙總鍵使用的名稱形式
pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}
