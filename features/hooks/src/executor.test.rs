use super::*;
use crate::handler::Handler;
use serde_json::json;

#[tokio::test]
async fn empty_registry_is_a_no_op() {
    let registry = HookRegistry::new();
    let executor = HookExecutor::new(&registry);
    let ctx = HookContext::new(HookType::BeforeToolCall, 0);
    let (_, result) = executor.fire(ctx).await;
    assert!(result.continue_chain);
}

#[tokio::test]
async fn handlers_run_in_priority_order_and_accumulate_data() {
    let mut registry = HookRegistry::new();
    registry
        .register(Handler::in_process("first", HookType::BeforeToolCall, "_builtin", 10, |mut ctx| async move {
            ctx.data.insert("order".into(), json!(["first"]));
            (ctx, HandlerOutcome::ok(HookResult::with_data(ctx.data.clone())))
        }))
        .unwrap();
    registry
        .register(Handler::in_process("second", HookType::BeforeToolCall, "_builtin", 1, |mut ctx| async move {
            let mut order = ctx.data.get("order").cloned().unwrap_or(json!([]));
            if let Some(arr) = order.as_array_mut() {
                arr.push(json!("second"));
            }
            ctx.data.insert("order".into(), order);
            let data = ctx.data.clone();
            (ctx, HandlerOutcome::ok(HookResult::with_data(data)))
        }))
        .unwrap();

    let executor = HookExecutor::new(&registry);
    let ctx = HookContext::new(HookType::BeforeToolCall, 0);
    let (final_ctx, result) = executor.fire(ctx).await;
    assert!(result.continue_chain);
    assert_eq!(final_ctx.data.get("order"), Some(&json!(["first", "second"])));
}

#[tokio::test]
async fn halting_handler_stops_the_chain() {
    let mut registry = HookRegistry::new();
    registry
        .register(Handler::in_process("halts", HookType::BeforeToolCall, "_builtin", 10, |ctx| async {
            (ctx, HandlerOutcome::ok(HookResult::halt("denied")))
        }))
        .unwrap();
    registry
        .register(Handler::in_process("never_runs", HookType::BeforeToolCall, "_builtin", 1, |mut ctx| async move {
            ctx.data.insert("ran".into(), json!(true));
            (ctx, HandlerOutcome::ok(HookResult::cont()))
        }))
        .unwrap();

    let executor = HookExecutor::new(&registry);
    let ctx = HookContext::new(HookType::BeforeToolCall, 0);
    let (final_ctx, result) = executor.fire(ctx).await;
    assert!(!result.continue_chain);
    assert_eq!(result.error.as_deref(), Some("denied"));
    assert!(final_ctx.data.get("ran").is_none());
}

#[tokio::test]
async fn panicking_handler_halts_without_crashing_the_executor() {
    let mut registry = HookRegistry::new();
    registry
        .register(Handler::in_process("boom", HookType::BeforeToolCall, "_builtin", 10, |_ctx| async {
            panic!("handler exploded")
        }))
        .unwrap();

    let executor = HookExecutor::new(&registry);
    let ctx = HookContext::new(HookType::BeforeToolCall, 0).with_data("kept", json!(true));
    let (final_ctx, result) = executor.fire(ctx).await;
    assert!(!result.continue_chain);
    assert!(result.error.unwrap().contains("boom"));
    assert_eq!(final_ctx.data.get("kept"), Some(&json!(true)));
}

#[tokio::test]
async fn unset_hook_type_short_circuits() {
    let registry = HookRegistry::new();
    let executor = HookExecutor::new(&registry);
    let ctx = HookContext::default();
    let (_, result) = executor.fire(ctx).await;
    assert!(result.continue_chain);
}

/// A rate-limit handler is just an in-process handler closing over shared
/// counter state; the executor needs no dedicated rate-limit concept.
#[tokio::test]
async fn a_rate_limit_handler_blocks_after_its_configured_max() {
    let max = 3;
    let seen = std::sync::Arc::new(std::sync::atomic::AtomicU32::new(0));
    let mut registry = HookRegistry::new();
    registry
        .register(Handler::in_process("rate_limiter", HookType::BeforeToolCall, "_builtin", 100, move |ctx| {
            let seen = seen.clone();
            async move {
                let count = seen.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
                if count > max {
                    return (ctx, HandlerOutcome::ok(HookResult::halt("rate limit exceeded")));
                }
                (ctx, HandlerOutcome::ok(HookResult::cont()))
            }
        }))
        .unwrap();
    let executor = HookExecutor::new(&registry);

    for _ in 0..max {
        let (_, result) = executor.fire(HookContext::new(HookType::BeforeToolCall, 0)).await;
        assert!(result.continue_chain);
    }
    let (_, result) = executor.fire(HookContext::new(HookType::BeforeToolCall, 0)).await;
    assert!(!result.continue_chain);
    assert_eq!(result.error.as_deref(), Some("rate limit exceeded"));
}
