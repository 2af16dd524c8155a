// salesboard-engine/examples/dashboard.rs
// 看板示例：拉取当期数据并打印汇总/对账结果

use chrono::Local;
use salesboard_client::ClientConfig;
use salesboard_engine::{DashboardSession, DateRange, RecordStore, WarehouseMode};
use shared::SummaryRows;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: {} <gateway_url> [email] [password]", args[0]);
        println!("  Example: {} http://localhost:8788", args[0]);
        return Ok(());
    }

    let gateway_url = &args[1];
    let mut client = ClientConfig::new(gateway_url).build_client()?;

    // Table reads work anonymously on open gateways; log in when
    // credentials are given
    if let (Some(email), Some(password)) = (args.get(2), args.get(3)) {
        let auth = client.login(email, password).await?;
        tracing::info!("Logged in, token expires in {:?}s", auth.expires_in);
        client = client.with_token(auth.access_token);
    }

    let range = DateRange::reporting_default(Local::now().date_naive());
    let store = RecordStore::new(client);
    let mut session = DashboardSession::new(store, WarehouseMode::Default, range);

    let count = session.refresh().await?;
    tracing::info!(
        "Loaded {count} records for {} .. {}",
        session.date_range().start(),
        session.date_range().end(),
    );

    let report = session.query();

    println!("== 销售汇总 ==");
    println!("  数量 {:.0} 件", report.summary.totals.total_quantity);
    println!("  金额 {:.2} 元", report.summary.totals.total_amount);
    println!(
        "  商品 {} 种 / 品牌 {} 个",
        report.summary.totals.product_count, report.summary.totals.brand_count,
    );
    match &report.summary.rows {
        SummaryRows::Brand(rows) => {
            for row in rows.iter().take(10) {
                println!("  {:<16} {:>12.2}", row.brand, row.total_amount);
            }
        }
        SummaryRows::Person(rows) => {
            for row in rows.iter().take(10) {
                println!("  {:<16} {:>12.2}", row.person, row.total_amount);
            }
        }
    }

    println!("== 进销差异 (top 10) ==");
    for row in report.reconciliation.rows.iter().take(10) {
        println!(
            "  {:<16} 入库 {:>8.0} 销售 {:>8.0} 差异 {:>8.0}",
            row.product_name, row.inbounds, row.sold_quantity, row.difference,
        );
    }
    println!(
        "  合计差异 {:.0} (共 {} 条明细)",
        report.reconciliation.totals.difference, report.record_count,
    );

    Ok(())
}
