use std::{collections::HashMap, marker::PhantomData};

use simplifier::{RuleTree, Simplifiable, Simplifier};

#[derive(Default, Simplifiable)]
struct Page<T> {
    items: Vec<T>,
    next: Option<Box<Page<T>>>,
}

#[derive(Simplifiable)]
struct Index<K, V>
where
    K: std::hash::Hash + Eq,
{
    entries: HashMap<K, V>,
    _marker: PhantomData<fn() -> K>,
}

#[derive(Default, Simplifiable)]
struct Row {
    secret: String,
}

fn main() {
    let simplifier = Simplifier::new(RuleTree::new().scope("items", RuleTree::new().remove("secret")));
    let page = Page {
        items: vec![Row { secret: "s".into() }],
        next: None,
    };
    let simplified = simplifier.simplify(&page);
    assert!(simplified.items[0].secret.is_empty());

    let index: Index<String, Row> = Index {
        entries: HashMap::new(),
        _marker: PhantomData,
    };
    let _ = simplifier.simplify(&index);
}
