//! # Atelier
//!
//! 服裝工坊訂單用量計算：目錄與訂單倉儲、配方用量彙總、已完成訂單報表
//!
//! ```no_run
//! use atelier::calc::ConsumptionCalculator;
//! use atelier::store::MemoryStore;
//!
//! let store = MemoryStore::new();
//! let calculator = ConsumptionCalculator::new(&store);
//! let report = calculator.summarize_completed(None).unwrap();
//! assert!(report.is_empty());
//! ```

pub use atelier_calc as calc;
pub use atelier_core as model;
pub use atelier_store as store;

pub use atelier_calc::{CompletedReport, ConsumptionCalculator, SummaryLine};
pub use atelier_core::{AtelierConfig, AtelierError, Result};
pub use atelier_store::MemoryStore;
