//! 訂單模型與生產流程狀態

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AtelierError, Result};

/// 訂單狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// 新訂單
    #[serde(rename = "NOWE")]
    New,
    /// 生產中（已分配裁床或縫紉組）
    #[serde(rename = "W REALIZACJI")]
    InProgress,
    /// 已完成
    #[serde(rename = "ZREALIZOWANE")]
    Completed,
}

impl OrderStatus {
    /// 狀態在資料庫與畫面上使用的標籤
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::New => "NOWE",
            OrderStatus::InProgress => "W REALIZACJI",
            OrderStatus::Completed => "ZREALIZOWANE",
        }
    }

    /// 從標籤解析狀態
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "NOWE" => Some(OrderStatus::New),
            "W REALIZACJI" => Some(OrderStatus::InProgress),
            "ZREALIZOWANE" => Some(OrderStatus::Completed),
            _ => None,
        }
    }

    /// 是否仍在生產線上
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::InProgress)
    }
}

/// 裁床
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CuttingTable {
    #[serde(rename = "stol-1")]
    Table1,
    #[serde(rename = "stol-2")]
    Table2,
    #[serde(rename = "stol-3")]
    Table3,
    /// 裁剪完成，等待縫紉
    #[serde(rename = "skrojone")]
    Cut,
}

impl CuttingTable {
    /// 解析裁床名稱；未知名稱回傳 None（即取消分配）
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "stol-1" => Some(CuttingTable::Table1),
            "stol-2" => Some(CuttingTable::Table2),
            "stol-3" => Some(CuttingTable::Table3),
            "skrojone" => Some(CuttingTable::Cut),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CuttingTable::Table1 => "stol-1",
            CuttingTable::Table2 => "stol-2",
            CuttingTable::Table3 => "stol-3",
            CuttingTable::Cut => "skrojone",
        }
    }
}

/// 縫紉組
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SewingTeam {
    #[serde(rename = "zespol-1")]
    Team1,
    #[serde(rename = "zespol-2")]
    Team2,
    /// 兩組分工
    #[serde(rename = "OBA")]
    Both,
}

impl SewingTeam {
    /// 解析縫紉組名稱；未知名稱回傳 None（即取消分配）
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "zespol-1" => Some(SewingTeam::Team1),
            "zespol-2" => Some(SewingTeam::Team2),
            "OBA" => Some(SewingTeam::Both),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SewingTeam::Team1 => "zespol-1",
            SewingTeam::Team2 => "zespol-2",
            SewingTeam::Both => "OBA",
        }
    }
}

/// 完成回報的結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// 整張訂單完成
    Completed,
    /// 分工訂單中某一組完成其部分
    PartCompleted { team: Option<SewingTeam> },
}

/// 訂單明細
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// 產品ID（產品可能已不存在）
    pub product_id: Option<Uuid>,

    /// 尺碼（大寫）
    pub size: String,

    /// 數量（正整數）
    pub quantity: u32,
}

impl OrderItem {
    /// 創建訂單明細；數量必須大於 0
    pub fn new(product_id: Uuid, size: &str, quantity: u32) -> Result<Self> {
        if quantity == 0 {
            return Err(AtelierError::InvalidQuantity(format!(
                "尺碼 {} 的數量必須大於 0",
                size.trim()
            )));
        }

        Ok(Self {
            product_id: Some(product_id),
            size: size.trim().to_uppercase(),
            quantity,
        })
    }
}

/// 手動記錄的實際用量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialUsage {
    pub order_id: Uuid,

    /// 材料名稱（大寫）
    pub material_name: String,

    /// 用量表達式
    pub quantity: String,
}

impl MaterialUsage {
    /// 創建實際用量記錄；名稱或數量為空白時回傳 None
    pub fn new(order_id: Uuid, material_name: &str, quantity: &str) -> Option<Self> {
        let name = material_name.trim();
        let quantity = quantity.trim();
        if name.is_empty() || quantity.is_empty() {
            return None;
        }

        Some(Self {
            order_id,
            material_name: name.to_uppercase(),
            quantity: quantity.to_string(),
        })
    }
}

/// 訂單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// 訂單ID
    pub id: Uuid,

    /// 訂單編號
    pub order_code: Option<String>,

    /// 客戶ID
    pub client_id: Uuid,

    /// 描述
    pub description: String,

    /// 交期
    pub deadline: NaiveDate,

    /// 狀態
    pub status: OrderStatus,

    /// 下單人
    pub ordered_by: String,

    /// 建立時間
    pub created_at: DateTime<Utc>,

    /// 訂單使用的布料
    pub fabric_ids: Vec<Uuid>,

    /// 裁床
    pub cutting_table: Option<CuttingTable>,

    /// 縫紉組
    pub assigned_team: Option<SewingTeam>,

    /// 分工時第一組是否完成
    pub team1_completed: bool,

    /// 分工時第二組是否完成
    pub team2_completed: bool,

    /// 訂單明細
    pub items: Vec<OrderItem>,
}

impl Order {
    /// 創建新的訂單
    pub fn new(
        client_id: Uuid,
        description: impl Into<String>,
        deadline: NaiveDate,
        ordered_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_code: None,
            client_id,
            description: description.into(),
            deadline,
            status: OrderStatus::New,
            ordered_by: ordered_by.into(),
            created_at: Utc::now(),
            fabric_ids: Vec::new(),
            cutting_table: None,
            assigned_team: None,
            team1_completed: false,
            team2_completed: false,
            items: Vec::new(),
        }
    }

    /// 建構器模式：設置訂單編號
    pub fn with_order_code(mut self, code: impl Into<String>) -> Self {
        self.order_code = Some(code.into());
        self
    }

    /// 建構器模式：添加明細
    pub fn with_item(mut self, item: OrderItem) -> Self {
        self.items.push(item);
        self
    }

    /// 建構器模式：設置布料
    pub fn with_fabrics(mut self, fabric_ids: Vec<Uuid>) -> Self {
        self.fabric_ids = fabric_ids;
        self
    }

    /// 訂單總件數
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// 分配裁床；新訂單一旦上裁床即進入生產
    pub fn assign_cutting_table(&mut self, table: Option<CuttingTable>) {
        if self.status == OrderStatus::New && table.is_some() {
            self.status = OrderStatus::InProgress;
        }
        self.cutting_table = table;
    }

    /// 分配縫紉組
    pub fn assign_team(&mut self, team: Option<SewingTeam>) {
        self.assigned_team = team;
    }

    /// 縫紉組回報完成
    ///
    /// 非分工訂單直接完成；分工訂單需兩組皆回報才完成。
    pub fn complete_part(&mut self, completed_by: Option<SewingTeam>) -> CompletionOutcome {
        if self.assigned_team != Some(SewingTeam::Both) {
            self.status = OrderStatus::Completed;
            return CompletionOutcome::Completed;
        }

        match completed_by {
            Some(SewingTeam::Team1) => self.team1_completed = true,
            Some(SewingTeam::Team2) => self.team2_completed = true,
            _ => {}
        }

        if self.team1_completed && self.team2_completed {
            self.status = OrderStatus::Completed;
            CompletionOutcome::Completed
        } else {
            CompletionOutcome::PartCompleted { team: completed_by }
        }
    }

    /// 是否在裁剪區（已上裁床但未裁完）
    pub fn is_at_cutting_room(&self) -> bool {
        matches!(self.cutting_table, Some(table) if table != CuttingTable::Cut)
    }

    /// 是否在縫紉區（已裁完且已分配縫紉組）
    pub fn is_at_sewing_room(&self) -> bool {
        self.cutting_table == Some(CuttingTable::Cut) && self.assigned_team.is_some()
    }

    /// 是否等待裁剪（未完成且尚未分配縫紉組）
    pub fn awaits_cutting(&self) -> bool {
        self.status.is_open() && self.assigned_team.is_none()
    }

    /// 是否等待縫紉（已裁完且未完成）
    pub fn awaits_sewing(&self) -> bool {
        self.status.is_open() && self.cutting_table == Some(CuttingTable::Cut)
    }
}
