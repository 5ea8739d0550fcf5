use serde_json::json;
use stache::prelude::*;
use std::sync::Arc;

fn ctx(json: serde_json::Value) -> Context {
    Context::from(json)
}

#[test]
fn test_literal_text() {
    for text in ["", "plain text", "a } b }} c", "<p>ünïcödé</p>", "{ {not a tag} }"] {
        assert_eq!(render(text, &ctx(json!({"a": 1}))), text);
    }
}

#[test]
fn test_variables() {
    assert_eq!(render("{{a}}", &ctx(json!({"a": "x"}))), "x");
    assert_eq!(render("{{a}}", &ctx(json!({}))), "");
    assert_eq!(render("{{a.b}}", &ctx(json!({"a": {"b": "y"}}))), "y");
    assert_eq!(render("{{a.b}}", &ctx(json!({"a": {}}))), "");
    assert_eq!(render("{{n}}", &ctx(json!({"n": 5}))), "5");
    assert_eq!(render("{{f}}", &ctx(json!({"f": 2.5}))), "2.5");
    assert_eq!(render("{{b}}", &ctx(json!({"b": true}))), "true");
    assert_eq!(render("{{b}}", &ctx(json!({"b": false}))), "false");
    assert_eq!(render("{{z}}", &ctx(json!({"z": null}))), "");
    assert_eq!(
        render("Hello, {{  user.name  }}!", &ctx(json!({"user": {"name": "Ann"}}))),
        "Hello, Ann!"
    );
}

#[test]
fn test_conditional_truthiness() {
    let template = "{{#if a}}X{{/if}}";
    let cases = [
        (json!({"a": true}), "X"),
        (json!({"a": false}), ""),
        (json!({"a": ""}), ""),
        (json!({"a": "s"}), "X"),
        (json!({"a": 0}), ""),
        (json!({"a": 0.0}), ""),
        (json!({"a": -0.0}), ""),
        (json!({"a": 3}), "X"),
        (json!({"a": []}), ""),
        (json!({"a": [1]}), "X"),
        (json!({"a": {}}), ""),
        (json!({"a": {"k": 1}}), "X"),
        (json!({"a": null}), ""),
        (json!({}), ""),
    ];

    for (context, expected) in cases {
        assert_eq!(render(template, &ctx(context.clone())), expected, "{}", context);
    }

    let mut context = Context::new();
    context.set("a", f64::NAN).unwrap();
    assert_eq!(render(template, &context), "X");
}

#[test]
fn test_iteration() {
    let template = "{{#each items}}{{name}}-{{/each}}";

    assert_eq!(
        render(
            template,
            &ctx(json!({"items": [{"name": "A"}, {"name": "B"}]}))
        ),
        "A-B-"
    );
    assert_eq!(render(template, &ctx(json!({"items": []}))), "");
    assert_eq!(render(template, &ctx(json!({"items": "str"}))), "");
    assert_eq!(render(template, &ctx(json!({"items": {"name": "A"}}))), "");
    assert_eq!(render(template, &ctx(json!({"items": null}))), "");
    assert_eq!(render(template, &ctx(json!({}))), "");
}

#[test]
fn test_iteration_replaces_context() {
    let context = ctx(json!({"title": "outer", "items": [{}, {"title": "inner"}], "xs": [1, 2]}));

    assert_eq!(
        render("{{#each items}}[{{title}}]{{/each}}", &context),
        "[][inner]"
    );
    // Scalars have no members.
    assert_eq!(render("{{#each xs}}({{x}}){{/each}}", &context), "()()");
}

#[test]
fn test_nested_conditionals_keep_context() {
    let context = ctx(json!({"a": true, "b": {"on": true}, "c": "z"}));

    assert_eq!(
        render("{{#if a}}<{{#if b.on}}{{c}}{{/if}}>{{/if}}", &context),
        "<z>"
    );
    assert_eq!(
        render("{{#if a}}<{{#if missing}}{{c}}{{/if}}>{{/if}}", &context),
        "<>"
    );
}

#[test]
fn test_nested_iterations() {
    let context = ctx(json!({
        "groups": [
            {"name": "g1", "items": [{"n": 1}, {"n": 2}]},
            {"name": "g2", "items": []},
        ]
    }));

    assert_eq!(
        render(
            "{{#each groups}}{{name}}:{{#each items}}{{n}},{{/each}};{{/each}}",
            &context
        ),
        "g1:1,2,;g2:;"
    );
}

#[test]
fn test_if_inside_each() {
    let context = ctx(json!({
        "users": [
            {"name": "Ann", "admin": true},
            {"name": "Bob", "admin": false},
        ]
    }));

    assert_eq!(
        render(
            "<ul>{{#each users}}<li>{{name}}{{#if admin}} (admin){{/if}}</li>{{/each}}</ul>",
            &context
        ),
        "<ul><li>Ann (admin)</li><li>Bob</li></ul>"
    );
}

#[test]
fn test_unterminated_tag() {
    let context = ctx(json!({"a": "x", "foo": "no"}));

    assert_eq!(render("Hello {{foo", &context), "Hello {{foo");
    assert_eq!(render("{{a}} and {{b", &context), "x and {{b");
    assert_eq!(render("{{", &context), "{{");
}

#[test]
fn test_substituted_text_is_not_rescanned() {
    let context = ctx(json!({
        "a": "{{b}}",
        "b": "bad",
        "open": "{{",
        "items": ["{{#if b}}"],
    }));

    assert_eq!(render("{{a}}", &context), "{{b}}");
    assert_eq!(render("{{open}}b}}", &context), "{{b}}");
    assert_eq!(render("{{#if b}}{{a}}{{/if}}", &context), "{{b}}");
}

#[test]
fn test_idempotent_without_tags() {
    let context = ctx(json!({"name": "Ann", "items": [1, 2]}));
    let once = render("Hi {{name}}{{#each items}}!{{/each}}", &context);
    assert_eq!(once, "Hi Ann!!");
    assert_eq!(render(&once, &context), once);
}

#[test]
fn test_unmatched_block_open() {
    let context = ctx(json!({"a": true, "items": [1]}));

    // The opening tag prints nothing, the rest of the template is kept.
    assert_eq!(render("{{#if a}}X", &context), "X");
    assert_eq!(render("[{{#each items}}Y]", &context), "[Y]");
    assert_eq!(render("{{#if a}}X{{/each}}", &context), "X");
}

#[test]
fn test_stray_closing_tags() {
    let context = ctx(json!({}));
    assert_eq!(render("A{{/if}}B{{/each}}C{{/anything}}", &context), "ABC");
}

#[test]
fn test_directive_without_path() {
    let context = ctx(json!({"a": true}));
    // `#if` without a trailing space is a variable, not a block.
    assert_eq!(render("{{#if}}X{{/if}}", &context), "X");
    assert_eq!(render("{{ #if a }}X{{/if}}", &context), "X");
}

// Blocks are matched by counting tags of the same kind only, so interleaved
// `#if` and `#each` blocks pair up differently than their nesting suggests.
#[test]
fn test_interleaved_blocks_pinned() {
    let context = ctx(json!({"a": true, "xs": [1]}));
    assert_eq!(
        render("[{{#if a}}A{{#each xs}}B{{/if}}C{{/each}}]", &context),
        "[ABC]"
    );

    let context = ctx(json!({"a": false, "xs": [1]}));
    assert_eq!(
        render("[{{#if a}}A{{#each xs}}B{{/if}}C{{/each}}]", &context),
        "[C]"
    );

    let context = ctx(json!({"xs": [{"flag": true}, {"flag": false}]}));
    assert_eq!(
        render("[{{#each xs}}E{{#if flag}}F{{/each}}G{{/if}}]", &context),
        "[EFEFG]"
    );
}

#[test]
fn test_open_marker_prefix_counts() {
    // `{{#iffy}}` looks like an `#if` to the block matcher,
    // which leaves the outer `#if` without a closing tag.
    let context = ctx(json!({"a": false}));
    assert_eq!(render("{{#if a}}x{{#iffy}}{{/if}}", &context), "x");
}

#[derive(Debug)]
struct Product {
    name: String,
    price: f64,
}

impl Fields for Product {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "price" => Some(Value::Float(self.price)),
            _ => None,
        }
    }
}

#[test]
fn test_records() -> Result<(), Error> {
    let products: Vec<Value> = vec![
        Value::Record(Arc::new(Product {
            name: "Tea".into(),
            price: 3.5,
        })),
        Value::Record(Arc::new(Product {
            name: "Cake".into(),
            price: 4.0,
        })),
    ];

    let mut context = Context::new();
    context.set("products", products)?;

    assert_eq!(
        render(
            "{{#each products}}{{#if name}}{{name}}={{price}}{{sku}};{{/if}}{{/each}}",
            &context
        ),
        "Tea=3.5;Cake=4;"
    );

    Ok(())
}

#[test]
fn test_concurrent_renders() {
    let context = ctx(json!({"items": [{"n": 1}, {"n": 2}, {"n": 3}]}));

    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| render("{{#each items}}{{n}}{{/each}}", &context)))
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().expect("render thread"), "123");
        }
    });
}

#[test]
fn test_renderer_limit() -> Result<(), Error> {
    let context = ctx(json!({"a": true}));
    let template = format!("{}x{}", "{{#if a}}".repeat(10), "{{/if}}".repeat(10));

    let renderer = Renderer::unlimited().max_depth(Some(10));
    assert_eq!(renderer.try_render(&template, &context)?, "x");
    assert_eq!(render(&template, &context), "x");

    let renderer = renderer.max_depth(Some(9));
    assert!(matches!(
        renderer.try_render(&template, &context),
        Err(Error::NestingTooDeep { limit: 9, .. })
    ));

    Ok(())
}
