//! Edge-case coverage for traversal and copying.
//!
//! These tests focus on boundary shapes: empty names and containers, absent
//! optional values, generic and phantom-typed records, non-string map keys,
//! and sharing one compiled simplifier across threads.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    marker::PhantomData,
    sync::Arc,
    thread,
};

use simplifier::{RuleTree, Simplifiable, Simplifier};

#[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
struct Secretive {
    secret: String,
    public: String,
}

fn secretive() -> Secretive {
    Secretive {
        secret: "s".into(),
        public: "p".into(),
    }
}

fn remove_secret() -> Simplifier {
    Simplifier::new(RuleTree::new().remove("secret"))
}

#[test]
fn test_empty_name_never_matches_named_fields() {
    let simplifier = Simplifier::new(RuleTree::new().remove(""));
    assert_eq!(simplifier.simplify(&secretive()), secretive());
}

#[test]
fn test_empty_name_matches_empty_map_key() {
    let simplifier = Simplifier::new(RuleTree::new().remove(""));
    let original: BTreeMap<String, i64> = BTreeMap::from([(String::new(), 1), ("a".into(), 2)]);
    let simplified = simplifier.simplify(&original);
    assert_eq!(simplified, BTreeMap::from([("a".into(), 2)]));
}

#[test]
fn test_empty_containers_are_copied_empty() {
    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Containers {
        list: Vec<Secretive>,
        queue: VecDeque<Secretive>,
        map: HashMap<String, Secretive>,
    }

    let simplifier = Simplifier::new(
        RuleTree::new()
            .scope("list", RuleTree::new().remove("secret"))
            .scope("queue", RuleTree::new().remove("secret"))
            .scope("map", RuleTree::new().remove("secret")),
    );
    assert_eq!(
        simplifier.simplify(&Containers::default()),
        Containers::default()
    );
}

#[test]
fn test_sequence_elements_are_independent_copies() {
    let original = vec![secretive(), secretive()];
    let mut copy = original.deep_copy();
    copy[0].public.push('!');
    assert_eq!(original[0].public, "p");
}

#[test]
fn test_top_level_sequence_is_inert() {
    let original = vec![secretive()];
    assert_eq!(remove_secret().simplify(&original), original);
}

#[test]
fn test_sequence_of_optional_elements() {
    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Holder {
        items: Vec<Option<Box<Secretive>>>,
    }

    let simplifier = Simplifier::new(RuleTree::new().scope("items", RuleTree::new().remove("secret")));
    let original = Holder {
        items: vec![Some(Box::new(secretive())), None],
    };

    let simplified = simplifier.simplify(&original);

    assert_eq!(
        simplified.items,
        vec![
            Some(Box::new(Secretive {
                secret: String::new(),
                public: "p".into(),
            })),
            None,
        ]
    );
}

#[test]
fn test_fixed_size_arrays_walk_each_element() {
    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Pair {
        both: [Secretive; 2],
    }

    let simplifier = Simplifier::new(RuleTree::new().scope("both", RuleTree::new().remove("secret")));
    let simplified = simplifier.simplify(&Pair {
        both: [secretive(), secretive()],
    });
    assert!(simplified.both.iter().all(|item| item.secret.is_empty()));
}

#[test]
fn test_sets_are_copied_but_not_walked() {
    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Tags {
        hashed: HashSet<String>,
        ordered: BTreeSet<String>,
    }

    let original = Tags {
        hashed: HashSet::from(["secret".to_string()]),
        ordered: BTreeSet::from(["secret".to_string()]),
    };
    assert_eq!(remove_secret().simplify(&original), original);
}

#[test]
fn test_generic_record() {
    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Page<T> {
        items: Vec<T>,
        total: u64,
    }

    let simplifier = Simplifier::new(
        RuleTree::new()
            .remove("total")
            .scope("items", RuleTree::new().remove("secret")),
    );
    let simplified = simplifier.simplify(&Page {
        items: vec![secretive()],
        total: 1,
    });

    assert_eq!(simplified.total, 0);
    assert_eq!(simplified.items[0].secret, "");
}

#[test]
fn test_phantom_parameter_needs_no_bounds() {
    #[derive(Simplifiable)]
    struct TypedId<T> {
        id: String,
        _marker: PhantomData<T>,
    }

    let simplifier = Simplifier::new(RuleTree::new().remove("id"));
    let original: TypedId<std::fs::File> = TypedId {
        id: "42".into(),
        _marker: PhantomData,
    };
    assert_eq!(simplifier.simplify(&original).id, "");
}

#[test]
fn test_opaque_generic_field() {
    #[derive(Clone, Debug, Default, PartialEq)]
    struct External(u8);

    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Wrapper<E> {
        #[simplify(opaque)]
        external: E,
        name: String,
    }

    let simplifier = Simplifier::new(RuleTree::new().remove("external"));
    let simplified = simplifier.simplify(&Wrapper {
        external: External(7),
        name: "n".into(),
    });
    assert_eq!(simplified.external, External(0));
    assert_eq!(simplified.name, "n");
}

#[test]
fn test_integer_map_keys_match_their_decimal_form() {
    let simplifier = Simplifier::new(
        RuleTree::new()
            .remove("1")
            .scope("2", RuleTree::new().remove("secret")),
    );
    let original: BTreeMap<u32, Secretive> =
        BTreeMap::from([(1, secretive()), (2, secretive()), (3, secretive())]);

    let simplified = simplifier.simplify(&original);

    assert!(!simplified.contains_key(&1));
    assert_eq!(simplified[&2].secret, "");
    assert_eq!(simplified[&3], secretive());
}

#[test]
fn test_borrowed_strings_are_copied_into_owned() {
    let borrowed: Cow<'_, str> = Cow::Borrowed("text");
    let copy = borrowed.deep_copy();
    assert!(matches!(copy, Cow::Owned(_)));
    assert_eq!(copy, "text");
}

#[test]
fn test_unit_and_empty_records() {
    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Marker;

    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Nothing {}

    let simplifier = remove_secret();
    assert_eq!(simplifier.simplify(&Marker), Marker);
    assert_eq!(simplifier.simplify(&Nothing {}), Nothing {});
}

#[test]
fn test_fields_named_like_traversal_parameters() {
    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Awkward {
        ruler: String,
        walk: String,
    }

    let simplifier = Simplifier::new(RuleTree::new().remove("walk"));
    let simplified = simplifier.simplify(&Awkward {
        ruler: "r".into(),
        walk: "w".into(),
    });
    assert_eq!(simplified.ruler, "r");
    assert_eq!(simplified.walk, "");
}

#[test]
fn test_deeply_nested_scopes() {
    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Level3 {
        secret: String,
    }

    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Level2 {
        next: Vec<Level3>,
    }

    #[derive(Clone, Debug, Default, PartialEq, Simplifiable)]
    struct Level1 {
        next: HashMap<String, Level2>,
    }

    let rules = RuleTree::new().scope(
        "next",
        RuleTree::new().scope(
            "inner",
            RuleTree::new().scope("next", RuleTree::new().remove("secret")),
        ),
    );
    let original = Level1 {
        next: HashMap::from([(
            "inner".to_string(),
            Level2 {
                next: vec![
                    Level3 {
                        secret: "a".into(),
                    },
                    Level3 {
                        secret: "b".into(),
                    },
                ],
            },
        )]),
    };

    let simplified = Simplifier::new(rules).simplify(&original);

    assert_eq!(simplified.next["inner"].next, vec![Level3::default(); 2]);
    assert_eq!(original.next["inner"].next[0].secret, "a");
}

#[test]
fn test_one_simplifier_shared_across_threads() {
    let simplifier = Arc::new(remove_secret());

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let simplifier = Arc::clone(&simplifier);
            thread::spawn(move || {
                let original = Secretive {
                    secret: format!("secret-{index}"),
                    public: format!("public-{index}"),
                };
                simplifier.simplify(&original)
            })
        })
        .collect();

    for (index, handle) in handles.into_iter().enumerate() {
        let simplified = handle.join().unwrap();
        assert_eq!(simplified.secret, "");
        assert_eq!(simplified.public, format!("public-{index}"));
    }
}
