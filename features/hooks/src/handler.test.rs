use super::*;
use crate::result::HookResult;

#[test]
fn in_process_handler_runs_its_closure() {
    let handler = Handler::in_process("h1", HookType::BeforeToolCall, "_builtin", 10, |ctx| async {
        (ctx, HandlerOutcome::ok(HookResult::cont()))
    });
    assert_eq!(handler.id, "h1");
    assert_eq!(handler.priority, 10);
    assert!(handler.enabled);
    assert!(matches!(handler.behavior, HandlerBehavior::InProcess(_)));
}

#[test]
fn external_handler_carries_script_path() {
    let handler = Handler::external("h2", HookType::Startup, "skill:foo", 0, "/bin/true");
    match handler.behavior {
        HandlerBehavior::External { script_path } => assert_eq!(script_path, "/bin/true"),
        _ => panic!("expected External"),
    }
}

#[test]
fn disabled_flips_enabled_flag() {
    let handler = Handler::external("h3", HookType::Shutdown, "_builtin", 0, "x").disabled();
    assert!(!handler.enabled);
}

#[test]
fn debug_impl_does_not_panic_on_closure_variant() {
    let handler = Handler::in_process("h4", HookType::BeforeToolCall, "_builtin", 0, |ctx| async {
        (ctx, HandlerOutcome::default())
    });
    let rendered = format!("{:?}", handler.behavior);
    assert!(rendered.contains("InProcess"));
}
