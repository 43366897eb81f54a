//! 已完成訂單用量報表範例
//!
//! 兩張訂單走完生產流程，其中一張手動記錄實際用量

use atelier_calc::{format_with_unit, ConsumptionCalculator, FABRIC_UNIT};
use atelier_core::{Fabric, Material, OrderStatus, Product};
use atelier_store::{MemoryStore, NewOrder};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_calc=info,atelier_store=info".into()),
        )
        .init();

    println!("===== Completed Orders Report Example =====\n");

    let mut store = MemoryStore::new();
    let cotton = store.add_fabric(Fabric::new("BAWEŁNA"))?;
    let button = store.add_material(Material::new("GUZIK"))?;
    store.add_product(
        Product::new("KOSZULA")
            .with_fabric(cotton, Decimal::new(15, 1))
            .with_material(button, "4 szt"),
    )?;

    let deadline = NaiveDate::from_ymd_opt(2026, 11, 20).ok_or("invalid deadline")?;
    let first = store.create_order(NewOrder::new("Butik Lena", deadline, "Marta").with_line("KOSZULA", "M", 3))?;
    let second = store.create_order(NewOrder::new("Sklep Ola", deadline, "Marta").with_line("KOSZULA", "L", 4))?;

    // 第一張：裁剪 → 縫紉 → 分工完成
    println!("[1] Production Flow");
    store.assign_cutting_table(first, "stol-1")?;
    store.assign_cutting_table(first, "skrojone")?;
    store.assign_team(first, "OBA")?;
    println!("    zespol-1: {:?}", store.complete_part(first, Some("zespol-1"))?);
    println!("    zespol-2: {:?}", store.complete_part(first, Some("zespol-2"))?);

    // 第二張：手動記錄實際用量
    store.record_usage(second, [("BAWEŁNA", "10 m"), ("GUZIK", "15 szt")])?;
    store.set_status(second, OrderStatus::Completed)?;

    let calculator = ConsumptionCalculator::new(&store);

    for filter in [None, Some("GUZ")] {
        println!("\n[2] Report (filter: {:?})", filter);
        let report = calculator.summarize_completed(filter)?;

        for (name, meters) in &report.fabric_totals {
            println!("    {:<10} {}", name, format_with_unit(*meters, FABRIC_UNIT));
        }
        for (name, units) in &report.material_totals {
            for (unit, total) in units {
                println!("    {:<10} {}", name, format_with_unit(*total, unit));
            }
        }
        println!("    known: {:?}", report.known_materials);
    }

    Ok(())
}
