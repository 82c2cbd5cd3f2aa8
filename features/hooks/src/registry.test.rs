use super::*;
use crate::result::HandlerOutcome;
use crate::result::HookResult;

fn noop(id: &str, priority: i32) -> Handler {
    Handler::in_process(id, HookType::BeforeToolCall, "_builtin", priority, |ctx| async {
        (ctx, HandlerOutcome::ok(HookResult::cont()))
    })
}

#[test]
fn higher_priority_runs_first() {
    let mut registry = HookRegistry::new();
    registry.register(noop("low", 1)).unwrap();
    registry.register(noop("high", 10)).unwrap();
    let ids: Vec<_> = registry.get_handlers(HookType::BeforeToolCall).iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["high", "low"]);
}

#[test]
fn equal_priority_keeps_registration_order() {
    let mut registry = HookRegistry::new();
    registry.register(noop("a", 5)).unwrap();
    registry.register(noop("b", 5)).unwrap();
    let ids: Vec<_> = registry.get_handlers(HookType::BeforeToolCall).iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn duplicate_id_is_rejected() {
    let mut registry = HookRegistry::new();
    registry.register(noop("dup", 0)).unwrap();
    let err = registry.register(noop("dup", 0)).unwrap_err();
    assert!(err.to_string().contains("dup"));
}

#[test]
fn empty_id_is_rejected() {
    let mut registry = HookRegistry::new();
    assert!(registry.register(noop("", 0)).is_err());
}

#[test]
fn unregister_removes_handler() {
    let mut registry = HookRegistry::new();
    registry.register(noop("gone", 0)).unwrap();
    registry.unregister("gone").unwrap();
    assert!(!registry.has_handlers(HookType::BeforeToolCall));
}

#[test]
fn unregister_missing_is_an_error() {
    let mut registry = HookRegistry::new();
    assert!(registry.unregister("nope").is_err());
}

#[test]
fn disabled_handlers_are_excluded_from_get_handlers_but_not_get_all() {
    let mut registry = HookRegistry::new();
    registry.register(noop("a", 0).disabled()).unwrap();
    assert!(registry.get_handlers(HookType::BeforeToolCall).is_empty());
    assert_eq!(registry.get_all_handlers(HookType::BeforeToolCall).len(), 1);
}

#[test]
fn list_types_reflects_registrations() {
    let mut registry = HookRegistry::new();
    registry.register(noop("a", 0)).unwrap();
    assert_eq!(registry.list_types(), vec![HookType::BeforeToolCall]);
}
