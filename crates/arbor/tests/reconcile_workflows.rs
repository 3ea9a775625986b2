use arbor::tree::{Element, Node};
use arbor::{apply_diff, ConflictPolicy, Diff, Property, ReconcileOptions, Reconciler};
use serde_json::{json, Value};

fn wire(value: Value) -> Diff<Value> {
    serde_json::from_value(value).expect("valid diff")
}

#[test]
fn set_then_read_round_trip() {
    let mut doc = Element::document();
    let diff = wire(json!({"set": {"x": "v"}, "del": {}}));
    assert_eq!(apply_diff(&mut doc, &diff), None);
    assert_eq!(doc.get("x"), Some(Property::Value(&json!("v"))));
}

#[test]
fn applying_twice_is_idempotent() {
    let diff = wire(json!({
        "set": {
            "childNodes.0:header.childNodes.0:h1.innerText": "Title",
            "childNodes.2:ul.childNodes.1:li.attributes.class": "item",
            "childNodes.2:ul.style.margin": "0",
            "title": "Page"
        }
    }));

    let mut once = Element::document();
    assert_eq!(apply_diff(&mut once, &diff), None);

    let mut twice = Element::document();
    assert_eq!(apply_diff(&mut twice, &diff), None);
    assert_eq!(apply_diff(&mut twice, &diff), None);

    assert_eq!(once, twice);
}

#[test]
fn sparse_index_creates_placeholders() {
    let mut doc = Element::document();
    let diff = Diff::new().with_set("childNodes.3:T", Value::Null);
    assert_eq!(apply_diff(&mut doc, &diff), None);

    assert_eq!(doc.children.len(), 4);
    for i in 0..3 {
        assert_eq!(doc.get(&format!("childNodes.{i}")), Some(Property::Placeholder));
    }
    let kind = doc
        .get("childNodes.3")
        .and_then(|p| p.as_element())
        .map(|el| el.kind.clone());
    assert_eq!(kind.as_deref(), Some("T"));
}

#[test]
fn out_of_order_writes_keep_positions() {
    let mut doc = Element::document();
    apply_diff(&mut doc, &Diff::new().with_set("childNodes.2:c.id", json!("c")));
    apply_diff(&mut doc, &Diff::new().with_set("childNodes.0:a.id", json!("a")));
    apply_diff(&mut doc, &Diff::new().with_set("childNodes.1:b.id", json!("b")));

    let kinds: Vec<_> = doc
        .children
        .iter()
        .map(|n| n.as_element().map(|el| el.kind.as_str()))
        .collect();
    assert_eq!(kinds, vec![Some("a"), Some("b"), Some("c")]);
    assert_eq!(doc.placeholder_count(), 0);
}

#[test]
fn bounce_then_retry_after_ancestor_exists() {
    let mut doc = Element::document();
    let diff = Diff::new()
        .with_set("childNodes.0.attributes.id", json!("main"))
        .with_set("childNodes.0.innerText", json!("hello"));

    let bounced = apply_diff(&mut doc, &diff).expect("ancestor is missing");
    assert_eq!(bounced, diff);
    assert!(doc.children.is_empty());

    // Someone else materializes the ancestor.
    assert_eq!(
        apply_diff(&mut doc, &Diff::new().with_set("childNodes.0:main", Value::Null)),
        None
    );

    assert_eq!(apply_diff(&mut doc, &bounced), None);
    assert_eq!(doc.get("childNodes.0.attributes.id").and_then(|p| p.as_str()), Some("main"));
    assert_eq!(doc.get("childNodes.0.innerText").and_then(|p| p.as_str()), Some("hello"));
}

#[test]
fn bounced_deletes_keep_their_shape() {
    let mut doc = Element::document().with_child(Element::new("p"));
    let diff = wire(json!({
        "del": {
            "childNodes.0.attributes.id": null,
            "childNodes.5.attributes.id": null
        }
    }));
    let bounced = apply_diff(&mut doc, &diff).expect("one path is unresolvable");
    assert_eq!(bounced, Diff::new().with_del("childNodes.5.attributes.id"));
    assert_eq!(
        serde_json::to_value(&bounced).unwrap(),
        json!({"set": {}, "del": {"childNodes.5.attributes.id": null}})
    );
}

#[test]
fn merged_retry_applies_with_next_batch() {
    let mut doc = Element::document();
    let first = Diff::new().with_set("childNodes.1.innerText", json!("second"));
    let mut pending = apply_diff(&mut doc, &first).expect("bounced");

    // The next batch materializes the slot; the retried fragment lands in the
    // same call regardless of where it sits in the merged diff.
    pending.merge(Diff::new().with_set("childNodes.1:p", Value::Null));
    assert_eq!(apply_diff(&mut doc, &pending), None);
    assert_eq!(doc.get("childNodes.1.innerText").and_then(|p| p.as_str()), Some("second"));
}

#[test]
fn equal_diffs_apply_the_same_way() {
    let forward = Diff::new()
        .with_set("childNodes.1:p", Value::Null)
        .with_set("childNodes.1.innerText", json!("x"))
        .with_set("childNodes.1.childNodes.0:b.innerText", json!("bold"))
        .with_set("childNodes.4.innerText", json!("orphan"))
        .with_del("childNodes.0:nav.attributes.hidden");
    let mut backward = Diff::new();
    for (path, value) in forward.set.iter().rev() {
        backward.insert(path.clone(), value.clone());
    }
    for path in forward.del.iter().rev() {
        backward.remove(path.clone());
    }
    assert_eq!(forward, backward);

    let mut a = Element::document();
    let mut b = Element::document();
    let bounced_a = apply_diff(&mut a, &forward);
    let bounced_b = apply_diff(&mut b, &backward);

    assert_eq!(a, b);
    assert_eq!(bounced_a, bounced_b);
    assert_eq!(
        bounced_a,
        Some(
            Diff::new()
                .with_set("childNodes.4.innerText", json!("orphan"))
                .with_del("childNodes.0:nav.attributes.hidden")
        )
    );
    assert_eq!(a.get("childNodes.1.innerText").and_then(|p| p.as_str()), Some("x"));
    assert_eq!(
        a.get("childNodes.1.childNodes.0.innerText").and_then(|p| p.as_str()),
        Some("bold")
    );
}

#[test]
fn deleting_an_element_and_its_contents_together() {
    let mut doc = Element::document();
    apply_diff(
        &mut doc,
        &Diff::new().with_set("childNodes.0:ul.childNodes.0:li.attributes.id", json!("a")),
    );
    // The ancestor comes first here, yet the nested deletion still applies.
    let diff = Diff::new()
        .with_del("childNodes.0")
        .with_del("childNodes.0.childNodes.0.attributes.id");
    assert_eq!(apply_diff(&mut doc, &diff), None);
    assert!(matches!(doc.child(0), Some(Node::Placeholder)));
}

#[test]
fn deleting_a_child_keeps_sibling_indices() {
    let mut doc = Element::document();
    apply_diff(
        &mut doc,
        &Diff::new()
            .with_set("childNodes.0:li.innerText", json!("a"))
            .with_set("childNodes.1:li.innerText", json!("b"))
            .with_set("childNodes.2:li.innerText", json!("c")),
    );
    assert_eq!(apply_diff(&mut doc, &Diff::new().with_del("childNodes.1")), None);

    assert_eq!(doc.children.len(), 3);
    assert!(matches!(doc.child(1), Some(Node::Placeholder)));
    assert_eq!(doc.get("childNodes.2.innerText").and_then(|p| p.as_str()), Some("c"));

    // The freed slot can be filled again with a tag.
    assert_eq!(
        apply_diff(&mut doc, &Diff::new().with_set("childNodes.1:li.innerText", json!("B"))),
        None
    );
    assert_eq!(doc.get("childNodes.1.innerText").and_then(|p| p.as_str()), Some("B"));
}

#[test]
fn shared_root_matches_independent_application() {
    let diff = Diff::new()
        .with_set("childNodes.0:form.childNodes.0:input.attributes.name", json!("q"))
        .with_set("childNodes.0:form.childNodes.1:button.innerText", json!("Go"))
        .with_set("childNodes.0:form.childNodes.3.innerText", json!("bounces"))
        .with_set("childNodes.0:form.classList.search", json!(true));

    let mut batched = Element::document();
    let bounced_batched = apply_diff(&mut batched, &diff);

    let mut one_by_one = Element::document();
    let mut bounced_single = Diff::new();
    for (path, value) in &diff.set {
        if let Some(b) = apply_diff(&mut one_by_one, &Diff::new().with_set(path.clone(), value.clone())) {
            bounced_single.merge(b);
        }
    }

    assert_eq!(batched, one_by_one);
    assert_eq!(bounced_batched, Some(bounced_single));
}

#[test]
fn del_wins_policy_from_config() {
    let options: ReconcileOptions = toml::from_str(r#"conflict = "del_wins""#).unwrap();
    assert_eq!(options.conflict, ConflictPolicy::DelWins);

    let mut doc = Element::document().with_attribute("id", "old");
    let diff = Diff::new()
        .with_set("attributes.id", json!("new"))
        .with_del("attributes.id")
        .with_set("attributes.lang", json!("en"));
    assert_eq!(Reconciler::new(options).apply(&mut doc, &diff), None);
    assert!(!doc.attributes.contains_key("id"));
    assert_eq!(doc.attributes.get("lang").map(String::as_str), Some("en"));
}

#[test]
fn unsupported_contexts_bounce() {
    let mut doc = Element::document().with_prop("count", json!(3));
    let diff = Diff::new()
        .with_set("count.value", json!(4))
        .with_set("classList.a.b", json!(true));
    assert_eq!(apply_diff(&mut doc, &diff), Some(diff.clone()));
    assert_eq!(doc.props.get("count"), Some(&json!(3)));
}
