mod support;

use order_function::{CallContext, OrderRequest};
use proptest::prelude::*;
use serde_json::{json, Value};
use support::{handler_with, FakeGateway, Reply};

fn echo(amount: i64) -> Value {
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let (handler, _) = handler_with(FakeGateway::new(Reply::Echo));
    rt.block_on(handler.create_order(OrderRequest::new(amount), &CallContext::anonymous()))
        .expect("echo gateway succeeds")
}

fn is_receipt(value: &str) -> bool {
    value
        .strip_prefix("receipt_")
        .map(|digits| !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false)
}

proptest! {
    #[test]
    fn positive_amounts_echo_in_inr(amount in 1i64..i64::MAX) {
        let echoed = echo(amount);
        prop_assert_eq!(&echoed["amount"], &json!(amount));
        prop_assert_eq!(&echoed["currency"], &json!("INR"));
        prop_assert!(is_receipt(echoed["receipt"].as_str().unwrap_or_default()), "bad receipt: {}", echoed);
    }

    // Negative amounts are not rejected or clamped before the gateway sees them.
    #[test]
    fn negative_amounts_pass_through(amount in i64::MIN..0i64) {
        let echoed = echo(amount);
        prop_assert_eq!(&echoed["amount"], &json!(amount));
        prop_assert_eq!(&echoed["currency"], &json!("INR"));
    }
}
