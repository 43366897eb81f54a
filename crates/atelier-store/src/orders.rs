//! 訂單維護與生產流程

use atelier_core::{
    AtelierError, CompletionOutcome, CuttingTable, MaterialUsage, Order, OrderItem, OrderStatus,
    Result, SewingTeam,
};
use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::store::MemoryStore;

/// 新訂單明細（以產品名稱引用）
#[derive(Debug, Clone)]
pub struct NewOrderLine {
    pub product_name: String,
    pub size: String,
    pub quantity: u32,
}

impl NewOrderLine {
    pub fn new(product_name: impl Into<String>, size: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_name: product_name.into(),
            size: size.into(),
            quantity,
        }
    }
}

/// 新訂單輸入
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client_name: String,
    pub description: String,
    pub deadline: NaiveDate,
    pub ordered_by: String,
    pub fabric_ids: Vec<Uuid>,
    pub lines: Vec<NewOrderLine>,
}

impl NewOrder {
    pub fn new(client_name: impl Into<String>, deadline: NaiveDate, ordered_by: impl Into<String>) -> Self {
        Self {
            client_name: client_name.into(),
            description: String::new(),
            deadline,
            ordered_by: ordered_by.into(),
            fabric_ids: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// 建構器模式：設置描述
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// 建構器模式：添加訂單布料
    pub fn with_fabric(mut self, fabric_id: Uuid) -> Self {
        self.fabric_ids.push(fabric_id);
        self
    }

    /// 建構器模式：添加明細
    pub fn with_line(mut self, product_name: &str, size: &str, quantity: u32) -> Self {
        self.lines.push(NewOrderLine::new(product_name, size, quantity));
        self
    }
}

impl MemoryStore {
    /// 建立訂單
    ///
    /// 客戶與產品依名稱取得，不存在時自動建立；空白產品名稱的明細略過。
    /// 訂單編號格式為 `YYYY/MM/DD-流水號`（以建立日期計）。
    pub fn create_order(&mut self, new_order: NewOrder) -> Result<Uuid> {
        if let Some(unknown) = new_order
            .fabric_ids
            .iter()
            .find(|id| !self.fabrics.contains_key(*id))
        {
            return Err(AtelierError::FabricNotFound(unknown.to_string()));
        }
        if let Some(line) = new_order.lines.iter().find(|l| l.quantity == 0) {
            return Err(AtelierError::InvalidQuantity(format!(
                "{} {} 的數量必須大於 0",
                line.product_name.trim(),
                line.size.trim()
            )));
        }

        let client_id = self.ensure_client(&new_order.client_name)?;

        let mut order = Order::new(
            client_id,
            new_order.description.trim().to_uppercase(),
            new_order.deadline,
            new_order.ordered_by.trim().to_uppercase(),
        )
        .with_fabrics(new_order.fabric_ids);

        for line in &new_order.lines {
            if line.product_name.trim().is_empty() {
                continue;
            }
            let product_id = self.ensure_product(&line.product_name)?;
            order.items.push(OrderItem::new(product_id, &line.size, line.quantity)?);
        }

        self.order_sequence += 1;
        let created = order.created_at.date_naive();
        order.order_code = Some(format!(
            "{}/{:02}/{:02}-{}",
            created.year(),
            created.month(),
            created.day(),
            self.order_sequence
        ));

        tracing::info!(
            "建立訂單 {:?}：明細 {} 筆，共 {} 件",
            order.order_code,
            order.items.len(),
            order.total_quantity()
        );

        let id = order.id;
        self.orders.insert(id, order);
        Ok(id)
    }

    /// 刪除訂單及其實際用量記錄
    pub fn delete_order(&mut self, order_id: Uuid) -> Result<()> {
        self.orders
            .remove(&order_id)
            .ok_or(AtelierError::OrderNotFound(order_id))?;
        self.usage.remove(&order_id);
        Ok(())
    }

    /// 設置訂單狀態
    pub fn set_status(&mut self, order_id: Uuid, status: OrderStatus) -> Result<()> {
        self.order_mut(order_id)?.status = status;
        Ok(())
    }

    /// 替換訂單的實際用量記錄；空白的行略過，名稱轉大寫
    ///
    /// 回傳實際保存的筆數。
    pub fn record_usage<'r, I>(&mut self, order_id: Uuid, rows: I) -> Result<usize>
    where
        I: IntoIterator<Item = (&'r str, &'r str)>,
    {
        if !self.orders.contains_key(&order_id) {
            return Err(AtelierError::OrderNotFound(order_id));
        }

        let usage: Vec<MaterialUsage> = rows
            .into_iter()
            .filter_map(|(name, quantity)| MaterialUsage::new(order_id, name, quantity))
            .collect();
        let count = usage.len();

        if usage.is_empty() {
            self.usage.remove(&order_id);
        } else {
            self.usage.insert(order_id, usage);
        }

        tracing::debug!("訂單 {} 實際用量已更新：{} 筆", order_id, count);
        Ok(count)
    }

    /// 分配裁床（未知裁床名稱視為取消分配）
    pub fn assign_cutting_table(&mut self, order_id: Uuid, table: &str) -> Result<Option<CuttingTable>> {
        let order = self.order_mut(order_id)?;
        order.assign_cutting_table(CuttingTable::from_label(table));
        Ok(order.cutting_table)
    }

    /// 分配縫紉組（未知組別視為取消分配）
    pub fn assign_team(&mut self, order_id: Uuid, team: &str) -> Result<Option<SewingTeam>> {
        let order = self.order_mut(order_id)?;
        order.assign_team(SewingTeam::from_label(team));
        Ok(order.assigned_team)
    }

    /// 縫紉組回報完成
    pub fn complete_part(&mut self, order_id: Uuid, completed_by: Option<&str>) -> Result<CompletionOutcome> {
        let order = self.order_mut(order_id)?;
        let outcome = order.complete_part(completed_by.and_then(SewingTeam::from_label));

        match outcome {
            CompletionOutcome::Completed => {
                tracing::info!("訂單 {:?} 已完成", order.order_code)
            }
            CompletionOutcome::PartCompleted { team } => {
                tracing::info!("訂單 {:?} 部分完成: {:?}", order.order_code, team)
            }
        }

        Ok(outcome)
    }

    /// 等待裁剪的訂單（未完成且未分配縫紉組），新建立的在前
    pub fn orders_awaiting_cutting(&self) -> Vec<&Order> {
        let mut orders: Vec<_> = self.orders().into_iter().filter(|o| o.awaits_cutting()).collect();
        orders.reverse();
        orders
    }

    /// 等待縫紉的訂單（已裁完且未完成），新建立的在前
    pub fn orders_awaiting_sewing(&self) -> Vec<&Order> {
        let mut orders: Vec<_> = self.orders().into_iter().filter(|o| o.awaits_sewing()).collect();
        orders.reverse();
        orders
    }

    /// 生產中訂單看板：(裁剪區, 縫紉區)，依交期排序
    pub fn in_progress_board(&self) -> (Vec<&Order>, Vec<&Order>) {
        let mut in_progress: Vec<_> = self
            .orders
            .values()
            .filter(|o| o.status == OrderStatus::InProgress)
            .collect();
        in_progress.sort_by(|a, b| a.deadline.cmp(&b.deadline).then(a.created_at.cmp(&b.created_at)));

        let cutting = in_progress.iter().copied().filter(|o| o.is_at_cutting_room()).collect();
        let sewing = in_progress.iter().copied().filter(|o| o.is_at_sewing_room()).collect();
        (cutting, sewing)
    }

    fn order_mut(&mut self, order_id: Uuid) -> Result<&mut Order> {
        self.orders
            .get_mut(&order_id)
            .ok_or(AtelierError::OrderNotFound(order_id))
    }
}
