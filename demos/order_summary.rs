//! 訂單用量摘要範例
//!
//! 建立目錄與訂單，印出計劃用量、產品件數與成本估算

use atelier_calc::ConsumptionCalculator;
use atelier_core::{Fabric, Material, Product};
use atelier_store::{MemoryStore, NewOrder};
use chrono::NaiveDate;
use rust_decimal::Decimal;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "atelier_calc=debug,atelier_store=info".into()),
        )
        .init();

    println!("===== Order Summary Example =====\n");

    // 步驟 1: 建立目錄
    println!("[1] Create Catalog");
    let mut store = MemoryStore::new();
    let cotton = store.add_fabric(Fabric::new("BAWEŁNA").with_price(Decimal::from(22)))?;
    let linen = store.add_fabric(Fabric::new("LEN").with_price(Decimal::new(3450, 2)))?;
    let button = store.add_material(Material::new("GUZIK").with_price(Decimal::new(35, 2)))?;
    let thread = store.add_material(Material::new("NIĆ"))?;

    store.add_product(
        Product::new("KOSZULA")
            .with_production_price(Decimal::from(18))
            .with_fabric(cotton, Decimal::new(15, 1))
            .with_material(button, "7 szt")
            .with_material(thread, "0.1 m"),
    )?;
    store.add_product(
        Product::new("SUKIENKA")
            .with_production_price(Decimal::from(35))
            .with_fabric(linen, Decimal::new(225, 2))
            .with_material(thread, "0.15 m"),
    )?;
    for product in store.products() {
        println!("    {}: {} fabric(s), {} material(s)", product.name, product.fabrics.len(), product.materials.len());
    }

    // 步驟 2: 建立訂單
    println!("\n[2] Create Order");
    let deadline = NaiveDate::from_ymd_opt(2026, 12, 1).ok_or("invalid deadline")?;
    let order_id = store.create_order(
        NewOrder::new("Butik Lena", deadline, "Marta")
            .with_description("kolekcja zimowa")
            .with_fabric(cotton)
            .with_fabric(linen)
            .with_line("KOSZULA", "M", 12)
            .with_line("KOSZULA", "L", 8)
            .with_line("SUKIENKA", "S", 5),
    )?;

    // 步驟 3: 計算用量
    let calculator = ConsumptionCalculator::new(&store);

    println!("\n[3] Product Totals");
    for (name, quantity) in calculator.product_totals(order_id)? {
        println!("    {name}: {quantity} pcs");
    }

    println!("\n[4] Planned Consumption");
    for line in calculator.summarize_order(order_id)? {
        println!("    {:<12} {}", line.name, line.quantity);
    }

    println!("\n[5] Cost Estimate");
    let estimate = calculator.estimate_cost(order_id)?;
    println!("    Labour:    {}", estimate.labour);
    println!("    Fabrics:   {}", estimate.fabrics);
    println!("    Materials: {}", estimate.materials);
    println!("    Total:     {}", estimate.total);
    if !estimate.unpriced.is_empty() {
        println!("    Unpriced:  {:?}", estimate.unpriced);
    }

    Ok(())
}
