//! # Atelier Store
//!
//! 記憶體倉儲：實作讀取介面與目錄、訂單的維護規則

pub mod catalog;
pub mod orders;
pub mod pricing;
pub mod store;

// Re-export 主要類型
pub use orders::{NewOrder, NewOrderLine};
pub use pricing::MappingKind;
pub use store::MemoryStore;
