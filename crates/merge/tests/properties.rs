// Property-based tests for selection and reconciliation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use indexmap::IndexMap;
use proptest::prelude::*;

use mailmerge_merge::{validate_identifiers, Columns, IdentifierSet, Table};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Small address pool so selections and duplicates actually collide.
fn email() -> impl Strategy<Value = String> {
    (0u8..8).prop_map(|n| format!("user{n}@x.com"))
}

fn going() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("n".to_string()),
        Just("No".to_string()),
        Just("yes".to_string()),
        Just("Y".to_string()),
        "[a-zA-Z ]{0,6}",
    ]
}

fn table(with_going: bool) -> impl Strategy<Value = Table> {
    prop::collection::vec(("[A-Za-z]{1,8}", email(), going()), 0..12).prop_map(move |rows| {
        let mut headers = vec!["name".to_string(), "email".to_string()];
        if with_going {
            headers.push("going".to_string());
        }
        let rows = rows
            .into_iter()
            .map(|(name, email, going)| {
                let mut fields = IndexMap::new();
                fields.insert("name".to_string(), name);
                fields.insert("email".to_string(), email);
                if with_going {
                    fields.insert("going".to_string(), going);
                }
                fields
            })
            .collect();
        Table::new(Columns::default(), headers, rows)
    })
}

/// Rows of varying width under a wider header, loaded through the parser.
fn ragged_table() -> impl Strategy<Value = Table> {
    let row = ("[A-Za-z]{1,8}", email(), going(), "[a-z]{0,5}", 2usize..=4);
    prop::collection::vec(row, 0..12).prop_map(|rows| {
        let mut text = String::from("name,email,going,note\n");
        for (name, email, going, note, width) in rows {
            let fields = [name, email, going, note];
            text.push_str(&fields[..width].join(","));
            text.push('\n');
        }
        Table::parse(&text, Columns::default()).unwrap()
    })
}

fn any_table() -> impl Strategy<Value = Table> {
    prop_oneof![table(true), table(false), ragged_table()]
}

fn ids() -> impl Strategy<Value = IdentifierSet> {
    prop::collection::vec(email(), 0..6).prop_map(|v| v.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn select_and_exclude_partition_rows(t in any_table(), s in ids()) {
        let selected = t.select(&s);
        let excluded = t.exclude(&s);
        prop_assert_eq!(selected.len() + excluded.len(), t.len());

        // Merge the two subsequences back by membership; must recover t exactly.
        let mut sel = selected.iter();
        let mut exc = excluded.iter();
        for row in &t {
            let next = if s.contains(row.email()) { sel.next() } else { exc.next() };
            prop_assert_eq!(next, Some(row));
        }
        prop_assert!(sel.next().is_none());
        prop_assert!(exc.next().is_none());
    }

    #[test]
    fn selected_identifiers_are_subset(t in any_table(), s in ids()) {
        prop_assert!(t.select(&s).identifiers().is_subset(&s));
    }

    #[test]
    fn validate_fails_iff_difference_nonempty(t in any_table(), s in ids()) {
        let diff = s.difference(&t.identifiers());
        match validate_identifiers(&t, &s) {
            Ok(()) => prop_assert!(diff.is_empty()),
            Err(err) => {
                prop_assert!(!diff.is_empty());
                let mut sorted: Vec<&str> = diff.iter().collect();
                sorted.sort_unstable();
                prop_assert_eq!(err.identifiers.render(), sorted.join(", "));
            }
        }
    }

    #[test]
    fn declined_flag_idempotent(t in any_table()) {
        let once = t.with_declined_flag();
        let twice = once.with_declined_flag();
        prop_assert_eq!(&twice, &once);
        let count = twice.headers().iter().filter(|h| *h == "going").count();
        prop_assert_eq!(count, 1);
    }

    #[test]
    fn nobody_attends_after_decline(t in any_table()) {
        prop_assert!(t.with_declined_flag().select_attending().is_empty());
    }

    #[test]
    fn ragged_rows_fill_every_header_column(t in ragged_table()) {
        for row in &t {
            prop_assert_eq!(row.len(), 4);
        }
    }

    #[test]
    fn write_then_parse_round_trips(t in any_table()) {
        let mut out = Vec::new();
        t.write_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let reloaded = Table::parse(&text, Columns::default()).unwrap();
        prop_assert_eq!(reloaded, t);
    }
}
