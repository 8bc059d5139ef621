//! Integration tests for the full fulfillment pipeline.
//!
//! Tests: Order → validation → pricing → repository → notifier → ProcessingResult
//!
//! Verifies:
//! - Validation failures have no side effects
//! - Totals obey `total = subtotal - discount + shipping`
//! - Persistence happens before notification, and storage failures suppress it
//! - Concurrent processing yields unique, increasing ids

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use fulfillment_core::OrderId;
    use fulfillment_orders::{Order, OrderItem};
    use fulfillment_pricing::{
        FlatRateShipping, NoDiscount, ThresholdFlatShipping, ThresholdPercentageDiscount,
        TieredDiscount,
    };

    use crate::notification::{LogNotifier, NotificationDispatcher, NotificationError};
    use crate::processor::{ErrorKind, FailureCause, OrderProcessor, ProcessingResult};
    use crate::repository::{
        InMemoryOrderRepository, OrderRepository, PersistedOrderRecord, RepositoryError,
    };

    /// Records every notification it receives; optionally fails every call.
    #[derive(Debug, Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, OrderId, Decimal)>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn sent(&self) -> Vec<(String, OrderId, Decimal)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl NotificationDispatcher for RecordingNotifier {
        fn notify(
            &self,
            customer_id: &str,
            order_id: OrderId,
            total: Decimal,
        ) -> Result<(), NotificationError> {
            self.sent
                .lock()
                .unwrap()
                .push((customer_id.to_string(), order_id, total));
            if self.fail {
                return Err(NotificationError::Dispatch("transport unavailable".into()));
            }
            Ok(())
        }
    }

    /// Repository whose `save` always fails; counts attempts.
    #[derive(Debug, Default)]
    struct BrokenRepository {
        attempts: AtomicUsize,
    }

    impl OrderRepository for BrokenRepository {
        fn save(&self, _order: &Order, _total: Decimal) -> Result<OrderId, RepositoryError> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(RepositoryError::Storage("database unreachable".into()))
        }

        fn get(&self, _order_id: OrderId) -> Result<Option<PersistedOrderRecord>, RepositoryError> {
            Ok(None)
        }
    }

    fn reference_order() -> Order {
        Order::new(
            "customer@example.com",
            vec![
                OrderItem::new("P1", "Product A", dec!(50.00), 2),
                OrderItem::new("P2", "Product B", dec!(30.00), 1),
            ],
        )
    }

    fn processor<R, N>(repository: R, notifier: N) -> OrderProcessor<R, N> {
        OrderProcessor::new(
            repository,
            notifier,
            Box::new(TieredDiscount),
            Box::new(ThresholdFlatShipping::new(dec!(200), dec!(10)).unwrap()),
        )
    }

    fn single_item_order(price: Decimal) -> Order {
        Order::new("acct-1", vec![OrderItem::new("P1", "Product", price, 1)])
    }

    #[test]
    fn reference_order_is_priced_persisted_and_notified() {
        let notifier = Arc::new(RecordingNotifier::default());
        let processor = processor(InMemoryOrderRepository::new(), notifier.clone());

        let result = processor.process(&reference_order());

        assert_eq!(
            result,
            ProcessingResult::Success {
                order_id: OrderId::FIRST,
                subtotal: dec!(130.00),
                discount: dec!(13.00),
                shipping: dec!(10.00),
                total: dec!(127.00),
            }
        );

        let record = processor.repository().get(OrderId::FIRST).unwrap().unwrap();
        assert_eq!(record.customer_id, "customer@example.com");
        assert_eq!(record.total, dec!(127.00));

        assert_eq!(
            notifier.sent(),
            vec![("customer@example.com".to_string(), OrderId::FIRST, dec!(127.00))]
        );
    }

    #[test]
    fn larger_order_with_threshold_discount() {
        let processor = OrderProcessor::new(
            InMemoryOrderRepository::new(),
            LogNotifier::email(),
            Box::new(ThresholdPercentageDiscount::new(dec!(500), dec!(0.15)).unwrap()),
            Box::new(ThresholdFlatShipping::new(dec!(200), dec!(10)).unwrap()),
        );
        let order = Order::new(
            "cliente2@example.com",
            vec![OrderItem::new("P3", "Product C", dec!(200.00), 3)],
        );

        match processor.process(&order) {
            ProcessingResult::Success {
                subtotal,
                discount,
                shipping,
                total,
                ..
            } => {
                assert_eq!(subtotal, dec!(600.00));
                assert_eq!(discount, dec!(90.00));
                assert_eq!(shipping, dec!(0));
                assert_eq!(total, dec!(510.00));
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn tiered_boundaries_through_the_pipeline() {
        let processor = processor(InMemoryOrderRepository::new(), LogNotifier::console());

        let cases = [
            (dec!(99.99), dec!(0)),
            (dec!(100.00), dec!(10.00)),
            (dec!(500.00), dec!(100.00)),
        ];
        for (price, expected_discount) in cases {
            let quote = processor.quote(&single_item_order(price)).unwrap();
            assert_eq!(quote.discount, expected_discount, "subtotal {price}");
        }
    }

    #[test]
    fn shipping_threshold_through_the_pipeline() {
        let processor = processor(InMemoryOrderRepository::new(), LogNotifier::console());

        let at = processor.quote(&single_item_order(dec!(200.00))).unwrap();
        let below = processor.quote(&single_item_order(dec!(199.99))).unwrap();

        assert_eq!(at.shipping, dec!(0));
        assert_eq!(below.shipping, dec!(10));
    }

    #[test]
    fn invalid_orders_fail_without_side_effects() {
        let notifier = Arc::new(RecordingNotifier::default());
        let processor = processor(InMemoryOrderRepository::new(), notifier.clone());

        let invalid = [
            (Order::new("", reference_order().items().to_vec()), "customer identifier is required"),
            (Order::new("acct-1", vec![]), "order must contain at least one item"),
        ];
        for (order, expected) in invalid {
            assert_eq!(
                processor.process(&order),
                ProcessingResult::Failure {
                    error_kind: ErrorKind::ValidationError,
                    cause: FailureCause::Validation,
                    message: expected.to_string(),
                }
            );
        }

        let zero_qty = Order::new("acct-1", vec![OrderItem::new("P1", "Product", dec!(5), 0)]);
        assert!(matches!(
            processor.process(&zero_qty),
            ProcessingResult::Failure {
                error_kind: ErrorKind::ValidationError,
                ..
            }
        ));

        assert!(processor.repository().is_empty().unwrap());
        assert!(notifier.sent().is_empty());

        // No id was consumed by the rejected orders.
        assert_eq!(processor.process(&reference_order()).order_id(), Some(OrderId::FIRST));
    }

    #[test]
    fn storage_failure_skips_notification() {
        let notifier = Arc::new(RecordingNotifier::default());
        let processor = processor(BrokenRepository::default(), notifier.clone());

        let result = processor.process(&reference_order());

        assert_eq!(
            result,
            ProcessingResult::Failure {
                error_kind: ErrorKind::UnexpectedError,
                cause: FailureCause::Storage,
                message: "unexpected error: storage failure: database unreachable".to_string(),
            }
        );
        assert_eq!(processor.repository().attempts.load(Ordering::SeqCst), 1);
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn notification_failure_still_leaves_the_order_recorded() {
        let notifier = Arc::new(RecordingNotifier::failing());
        let processor = processor(InMemoryOrderRepository::new(), notifier.clone());

        let result = processor.process(&reference_order());

        match &result {
            ProcessingResult::Failure {
                error_kind,
                cause,
                message,
            } => {
                assert_eq!(*error_kind, ErrorKind::UnexpectedError);
                assert_eq!(*cause, FailureCause::Notification);
                assert!(message.contains("transport unavailable"));
            }
            other => panic!("expected failure, got {other:?}"),
        }

        // Attempted exactly once, after the record existed.
        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        let (_, order_id, total) = &sent[0];
        let record = processor.repository().get(*order_id).unwrap().unwrap();
        assert_eq!(record.total, *total);
        assert_eq!(record.total, dec!(127.00));
    }

    #[test]
    fn overflowing_orders_fail_without_side_effects() {
        let notifier = Arc::new(RecordingNotifier::default());
        let processor = processor(InMemoryOrderRepository::new(), notifier.clone());

        let huge_line = Order::new("acct-1", vec![OrderItem::new("P1", "big", Decimal::MAX, 2)]);
        let huge_sum = Order::new(
            "acct-1",
            vec![
                OrderItem::new("P1", "big", Decimal::MAX, 1),
                OrderItem::new("P2", "big", Decimal::MAX, 1),
            ],
        );

        for order in [&huge_line, &huge_sum] {
            assert!(order.validate().is_ok());
            match processor.process(order) {
                ProcessingResult::Failure {
                    error_kind,
                    cause,
                    message,
                } => {
                    assert_eq!(error_kind, ErrorKind::UnexpectedError);
                    assert_eq!(cause, FailureCause::Arithmetic);
                    assert!(message.starts_with("unexpected error: amount overflow: "));
                }
                other => panic!("expected failure, got {other:?}"),
            }
        }

        assert_eq!(
            processor.process(&huge_sum),
            ProcessingResult::Failure {
                error_kind: ErrorKind::UnexpectedError,
                cause: FailureCause::Arithmetic,
                message: "unexpected error: amount overflow: order subtotal".to_string(),
            }
        );

        assert!(processor.repository().is_empty().unwrap());
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn total_overflow_after_shipping_is_reported() {
        let processor = OrderProcessor::new(
            InMemoryOrderRepository::new(),
            LogNotifier::console(),
            Box::new(NoDiscount),
            Box::new(FlatRateShipping::new(dec!(10)).unwrap()),
        );
        let order = Order::new("acct-1", vec![OrderItem::new("P1", "big", Decimal::MAX, 1)]);

        assert_eq!(
            processor.process(&order),
            ProcessingResult::Failure {
                error_kind: ErrorKind::UnexpectedError,
                cause: FailureCause::Arithmetic,
                message: "unexpected error: amount overflow: order total".to_string(),
            }
        );
        assert!(processor.repository().is_empty().unwrap());
    }

    #[test]
    fn concurrent_processing_assigns_unique_increasing_ids() {
        let processor = processor(InMemoryOrderRepository::new(), LogNotifier::console());
        let threads = 8;
        let per_thread = 25;

        let ids: Vec<Vec<OrderId>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    let processor = &processor;
                    s.spawn(move || {
                        (0..per_thread)
                            .map(|_| processor.process(&reference_order()).order_id().unwrap())
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        for per_caller in &ids {
            assert!(per_caller.windows(2).all(|w| w[0] < w[1]));
        }
        let mut all: Vec<u64> = ids.into_iter().flatten().map(OrderId::get).collect();
        all.sort_unstable();
        let expected: Vec<u64> = (1..=(threads * per_thread) as u64).collect();
        assert_eq!(all, expected);

        let records = processor.repository().records().unwrap();
        assert!(records.iter().all(|r| r.total == dec!(127.00)));
    }

    fn line() -> impl Strategy<Value = OrderItem> {
        (0i64..50_000i64, 1i64..20i64)
            .prop_map(|(cents, qty)| OrderItem::new("P", "item", Decimal::new(cents, 2), qty))
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            ..ProptestConfig::default()
        })]

        /// Property: successful results satisfy the total identity and are never negative.
        #[test]
        fn totals_are_consistent_and_non_negative(
            items in prop::collection::vec(line(), 1..8),
            discount_choice in 0u8..3,
        ) {
            let processor = OrderProcessor::new(
                InMemoryOrderRepository::new(),
                LogNotifier::console(),
                match discount_choice {
                    0 => Box::new(NoDiscount) as Box<dyn fulfillment_pricing::PricingStrategy>,
                    1 => Box::new(TieredDiscount),
                    _ => Box::new(ThresholdPercentageDiscount::new(dec!(50), dec!(1)).unwrap()),
                },
                Box::new(ThresholdFlatShipping::new(dec!(200), dec!(10)).unwrap()),
            );

            match processor.process(&Order::new("acct-1", items)) {
                ProcessingResult::Success { subtotal, discount, shipping, total, .. } => {
                    prop_assert_eq!(total, subtotal - discount + shipping);
                    prop_assert!(total >= Decimal::ZERO);
                }
                other => prop_assert!(false, "expected success, got {:?}", other),
            }
        }

        /// Property: orders with any non-positive quantity never reach the repository.
        #[test]
        fn invalid_quantities_never_consume_ids(
            items in prop::collection::vec(line(), 1..8),
            bad_qty in -10i64..=0i64,
        ) {
            let mut items = items;
            let repository = Arc::new(InMemoryOrderRepository::new());
            let processor = processor(repository.clone(), LogNotifier::console());

            items.push(OrderItem::new("BAD", "item", dec!(1), bad_qty));
            let result = processor.process(&Order::new("acct-1", items));

            let is_validation_failure = matches!(
                result,
                ProcessingResult::Failure { error_kind: ErrorKind::ValidationError, .. }
            );
            prop_assert!(is_validation_failure);
            prop_assert!(repository.is_empty().unwrap());
        }
    }
}
