use std::sync::Arc;

use anyhow::Context;

use fulfillment_core::Decimal;
use fulfillment_infra::{FulfillmentConfig, InMemoryOrderRepository, OrderProcessor};
use fulfillment_orders::{Order, OrderItem};

fn main() -> anyhow::Result<()> {
    fulfillment_observability::init();

    let config = FulfillmentConfig::from_env().context("invalid fulfillment configuration")?;
    tracing::info!(?config, "configuration loaded");

    let repository = Arc::new(InMemoryOrderRepository::new());
    let processor = OrderProcessor::new(
        repository.clone(),
        config.notifier(),
        config.pricing_strategy()?,
        config.shipping_strategy()?,
    );

    let orders = [
        Order::new(
            "customer@example.com",
            vec![
                OrderItem::new("P1", "Product A", Decimal::new(5000, 2), 2),
                OrderItem::new("P2", "Product B", Decimal::new(3000, 2), 1),
            ],
        ),
        Order::new(
            "customer2@example.com",
            vec![OrderItem::new("P3", "Product C", Decimal::new(20000, 2), 3)],
        ),
        Order::new("", vec![OrderItem::new("P4", "Product D", Decimal::new(1000, 2), 1)]),
    ];

    for order in &orders {
        let result = processor.process(order);
        println!("{}", serde_json::to_string(&result)?);
    }

    tracing::info!(recorded = repository.len()?, "done");
    Ok(())
}
