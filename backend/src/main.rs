//! Fertilizer Manager - shop report
//!
//! Opens the configured store and logs the dashboard, best sellers,
//! payment mix and shelf summary for today.

use chrono::Local;
use fertilizer_manager_backend::{services::analytics, services::customer, Config, Session};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fm_report=info,fertilizer_manager_backend=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Fertilizer Manager report");
    tracing::info!("Environment: {}", config.environment);
    tracing::info!(
        backend = ?config.storage.backend,
        data_dir = %config.storage.data_dir.display(),
        "Opening store"
    );

    let session = Session::from_config(&config.storage)?;
    let today = Local::now().date_naive();

    let dashboard = session.dashboard(today, &config.dashboard);
    tracing::info!(
        revenue = %dashboard.total_revenue,
        sales = dashboard.sale_count,
        stock_value = %dashboard.stock_value,
        products = dashboard.product_count,
        low_stock = dashboard.low_stock.len(),
        "Dashboard"
    );
    for item in &dashboard.low_stock {
        tracing::warn!(
            name = %item.name,
            quantity = %item.quantity,
            unit = %item.unit,
            threshold = %item.low_stock_threshold(),
            "Low stock"
        );
    }
    for day in &dashboard.revenue_series {
        tracing::info!(date = %day.date, day = %day.label, revenue = %day.revenue, sales = day.sale_count, "Daily revenue");
    }
    for sale in &dashboard.recent_sales {
        tracing::info!(
            date = %sale.sale_date,
            product = %sale.fertilizer_name,
            customer = %sale.customer_name,
            total = %sale.total_price,
            "Recent sale"
        );
    }

    let sales = session.sales().sales();
    for product in analytics::top_products(sales, config.dashboard.top_products) {
        tracing::info!(
            name = %product.name,
            sales = product.count,
            revenue = %product.revenue,
            quantity = %product.quantity_sold,
            "Top product"
        );
    }
    for share in analytics::payment_breakdown(sales) {
        tracing::info!(method = %share.method, amount = %share.amount, "Payment method");
    }
    for month in analytics::monthly_revenue(sales) {
        tracing::info!(month = %month.month, revenue = %month.revenue, sales = month.sale_count, "Monthly revenue");
    }

    let customers = session.customers();
    tracing::info!(
        customers = customers.len(),
        repeat = customer::repeat_customer_count(&customers),
        lifetime_value = %customer::customer_lifetime_value(sales, &customers),
        average_order = %analytics::average_order_value(sales),
        "Customers"
    );

    let summary = analytics::stock_summary(session.inventory().items());
    tracing::info!(
        products = summary.product_count,
        units = %summary.total_units,
        value = %summary.total_value,
        below_ten = summary.low_stock.len(),
        "Stock summary"
    );

    Ok(())
}
