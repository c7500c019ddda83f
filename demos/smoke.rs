//! Comprehensive smoke test for treemask

use serde_json::json;
use treemask::{filter, filter_patterns, filter_with, Options, PatternEntry, PatternOptions};

fn main() {
    println!("Running treemask smoke tests...\n");

    test_literal_path();
    test_whole_subtree();
    test_single_wildcard();
    test_double_wildcard();
    test_alternation();
    test_range();
    test_shallow();
    test_max_depth();
    test_multi_pattern();
    test_per_pattern_options();
    test_safe_mode();
    test_strict_errors();

    println!("\n✅ All smoke tests passed!");
}

fn sample() -> serde_json::Value {
    json!({
        "hello": {"world": {"text": "Hello World"}, "test": "t"},
        "world": {"hello": {"text": "Hello World"}},
    })
}

fn test_literal_path() {
    let picked = filter(&sample(), "hello.world.text").unwrap();
    assert_eq!(picked, json!({"hello": {"world": {"text": "Hello World"}}}));
    println!("✓ literal path");
}

fn test_whole_subtree() {
    let tree = sample();
    let picked = filter(&tree, "*").unwrap();
    assert_eq!(picked, tree);
    println!("✓ whole-subtree wildcard");
}

fn test_single_wildcard() {
    let picked = filter(&sample(), "hello.*").unwrap();
    assert_eq!(picked, json!({"hello": {"world": {}, "test": "t"}}));
    println!("✓ single wildcard");
}

fn test_double_wildcard() {
    let picked = filter(&sample(), "hello.**").unwrap();
    assert_eq!(
        picked,
        json!({"hello": {"world": {"text": "Hello World"}, "test": "t"}})
    );
    println!("✓ double wildcard");
}

fn test_alternation() {
    let tree = json!({
        "amber": {"dark": {"1": "v"}},
        "blue": {"dark": {"1": "v"}},
        "green": {"dark": {"1": "v"}},
    });
    let picked = filter(&tree, "[amber|blue].dark").unwrap();
    assert_eq!(
        picked,
        json!({"amber": {"dark": {"1": "v"}}, "blue": {"dark": {"1": "v"}}})
    );
    println!("✓ alternation");
}

fn test_range() {
    let tree = json!({"items": {
        "1": {"id": "a"},
        "2": {"id": "b"},
        "3": {"id": "c"},
        "4": {"id": "d"},
    }});
    let picked = filter(&tree, "items.1..3.id").unwrap();
    assert_eq!(
        picked,
        json!({"items": {"1": {"id": "a"}, "2": {"id": "b"}, "3": {"id": "c"}}})
    );
    println!("✓ numeric range");
}

fn test_shallow() {
    let options = Options {
        shallow: true,
        ..Options::default()
    };
    let picked = filter_with(&sample(), "hello.world", &options).unwrap();
    assert_eq!(picked, json!({"hello": {"world": {}}}));
    println!("✓ shallow mode");
}

fn test_max_depth() {
    let options = Options {
        max_depth: Some(2),
        ..Options::default()
    };
    let picked = filter_with(&sample(), "hello.**", &options).unwrap();
    assert_eq!(picked, json!({"hello": {"world": {}, "test": "t"}}));
    println!("✓ max depth");
}

fn test_multi_pattern() {
    let picked = filter_patterns(
        &sample(),
        &[
            PatternEntry::new("hello.test"),
            PatternEntry::new("world.hello.text"),
        ],
        &Options::default(),
    )
    .unwrap();
    assert_eq!(
        picked,
        json!({"hello": {"test": "t"}, "world": {"hello": {"text": "Hello World"}}})
    );
    println!("✓ multi-pattern merge");
}

fn test_per_pattern_options() {
    let entries = [
        PatternEntry::new("hello.test"),
        PatternEntry::with_options(
            "world/hello",
            PatternOptions {
                separator: Some('/'),
                shallow: Some(true),
                ..PatternOptions::default()
            },
        ),
    ];
    let picked = filter_patterns(&sample(), &entries, &Options::default()).unwrap();
    assert_eq!(
        picked,
        json!({"hello": {"test": "t"}, "world": {"hello": {}}})
    );
    println!("✓ per-pattern options");
}

fn test_safe_mode() {
    let entries = [
        PatternEntry::new("hello.test"),
        PatternEntry::new("no.such.path"),
    ];
    let options = Options {
        safe: true,
        ..Options::default()
    };
    let picked = filter_patterns(&sample(), &entries, &options).unwrap();
    assert_eq!(picked, json!({"hello": {"test": "t"}}));
    println!("✓ safe mode");
}

fn test_strict_errors() {
    let err = filter(&sample(), "hello.nope").unwrap_err();
    assert_eq!(
        err.to_string(),
        "path 'hello.nope' not found: missing key 'nope'"
    );
    let err = filter(&sample(), "hello.test.deeper").unwrap_err();
    assert!(err.to_string().contains("non-container"));
    println!("✓ strict errors");
}
