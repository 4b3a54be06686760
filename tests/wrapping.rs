//! Argument forwarding, arity, and call-site accuracy for wrapped functions.

use depwarn::infrastructure::mocks::{MockSink, MockStackProvider};
use depwarn::{CallFrame, Deprecation, EntityDescriptor};
use std::sync::Arc;

fn setup(frames: Vec<CallFrame>) -> (MockSink, MockStackProvider, Deprecation) {
    let sink = MockSink::plain();
    let provider = MockStackProvider::returning(frames);
    let deprecate = Deprecation::builder("my-lib")
        .with_sink(Arc::new(sink.clone()))
        .with_stack_provider(Arc::new(provider.clone()))
        .suppressed(false)
        .traced(false)
        .build()
        .unwrap();
    (sink, provider, deprecate)
}

fn caller(line: u32, column: u32) -> CallFrame {
    CallFrame::new("test/caller.rs", line, column).with_display_name("callold")
}

#[test]
fn wrapped_function_has_declared_arity() {
    let (_sink, _provider, deprecate) = setup(vec![caller(10, 9)]);
    let oldfn = deprecate.function(
        |_a: i32, _b: i32| (),
        EntityDescriptor::named("oldfn").with_arity(2),
    );

    assert_eq!(oldfn.arity(), 2);
}

#[test]
fn arguments_and_result_pass_through_unchanged() {
    let (sink, _provider, deprecate) = setup(vec![caller(10, 9)]);
    let oldfn = deprecate.function(
        |_a: i32, b: i32| b,
        EntityDescriptor::named("oldfn").with_arity(2),
    );

    let ret = oldfn.call((1, 2));

    assert_eq!(ret, 2);
    assert_eq!(sink.count(), 1);
    assert!(sink.single_chunk().contains(" oldfn "));
}

#[test]
fn ownership_moves_through_the_wrapper() {
    let (_sink, _provider, deprecate) = setup(vec![caller(10, 9)]);
    let oldfn = deprecate.function(
        |mut v: Vec<u32>| {
            v.push(3);
            v
        },
        EntityDescriptor::named("oldfn").with_arity(1),
    );

    assert_eq!(oldfn.call((vec![1, 2],)), vec![1, 2, 3]);
}

#[test]
fn warning_fires_before_the_inner_function_runs() {
    let (sink, _provider, deprecate) = setup(vec![caller(10, 9)]);
    let sink_for_inner = sink.clone();
    let oldfn = deprecate.function(
        move || sink_for_inner.count(),
        EntityDescriptor::named("oldfn"),
    );

    // The inner closure observes the warning already written.
    assert_eq!(oldfn.call(()), 1);
}

#[test]
fn rendered_location_is_the_callers_not_machinery() {
    let (sink, _provider, deprecate) = setup(vec![
        caller(10, 9),
        CallFrame::new("test/outer.rs", 99, 1).with_display_name("outer_fn"),
    ]);
    let oldfn = deprecate.function(|| (), EntityDescriptor::named("oldfn"));

    oldfn.call(());

    let chunk = sink.single_chunk();
    assert!(chunk.contains("at test/caller.rs:10:9"));
    assert!(!chunk.contains("src/application"));
}

#[test]
fn machinery_frames_are_skipped_when_present() {
    let (sink, _provider, deprecate) = setup(vec![
        CallFrame::new("src/application/wrap.rs", 1, 1)
            .with_display_name("depwarn::application::wrap::DeprecatedFn<F,S>::call"),
        caller(10, 9),
    ]);
    let oldfn = deprecate.function(|| (), EntityDescriptor::named("oldfn"));

    oldfn.call(());

    assert!(sink.single_chunk().contains("at test/caller.rs:10:9"));
}

#[test]
fn wrapper_clones_share_dedup_state() {
    let (sink, _provider, deprecate) = setup(vec![caller(10, 9)]);
    let oldfn = deprecate.function(|| (), EntityDescriptor::named("oldfn"));
    let clone = oldfn.clone();

    oldfn.call(());
    clone.call(());

    assert_eq!(sink.count(), 1);
}

#[test]
fn six_argument_functions_are_supported() {
    let (sink, _provider, deprecate) = setup(vec![caller(10, 9)]);
    let oldfn = deprecate.function(
        |a: u32, b: u32, c: u32, d: u32, e: u32, f: u32| a + b + c + d + e + f,
        EntityDescriptor::named("oldfn").with_arity(6),
    );

    assert_eq!(oldfn.call((1, 2, 3, 4, 5, 6)), 21);
    assert_eq!(sink.count(), 1);
}
