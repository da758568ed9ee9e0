//! Property tests over generated registry documents.

use proptest::prelude::*;
use roster_core::Timestamp;
use roster_format::{check, export_identities, export_organizations, merge_dumps, Document};
use serde_json::{json, Map, Value};

const ORG_NAMES: [&str; 4] = ["Bitergia", "Example", "Unknown", "Acme"];

fn timestamp() -> impl Strategy<Value = String> {
    (1900i32..2100, 1u32..=12, 1u32..=28, 0u32..24).prop_map(|(y, m, d, h)| {
        format!("{y:04}-{m:02}-{d:02}T{h:02}:00:00")
    })
}

fn identity() -> impl Strategy<Value = Value> {
    (
        "[0-9a-f]{8}",
        proptest::option::of("[A-Z][a-z]{2,8}"),
        proptest::option::of("[a-z]{3,8}@example\\.com"),
        prop_oneof![Just("scm"), Just("mls"), Just("unknown")],
    )
        .prop_map(|(id, name, email, source)| {
            json!({"id": id, "name": name, "email": email, "username": null, "source": source})
        })
}

fn enrollment() -> impl Strategy<Value = Value> {
    (0..ORG_NAMES.len(), timestamp(), timestamp()).prop_map(|(org, start, end)| {
        json!({"organization": ORG_NAMES[org], "start": start, "end": end})
    })
}

fn document() -> impl Strategy<Value = Value> {
    proptest::collection::btree_map(
        "[0-9a-f]{12}",
        (
            proptest::collection::vec(identity(), 0..4),
            proptest::collection::vec(enrollment(), 0..4),
        ),
        0..6,
    )
    .prop_map(|records| {
        let uidentities: Map<String, Value> = records
            .into_iter()
            .map(|(uuid, (identities, enrollments))| {
                let record = json!({
                    "uuid": uuid,
                    "identities": identities,
                    "enrollments": enrollments,
                });
                (uuid, record)
            })
            .collect();
        let organizations: Map<String, Value> = ORG_NAMES
            .iter()
            .rev()
            .map(|name| {
                let domain = format!("{}.com", name.to_lowercase());
                (name.to_string(), json!([{"domain": domain, "is_top": true}]))
            })
            .collect();
        json!({"organizations": organizations, "uidentities": uidentities})
    })
}

proptest! {
    #[test]
    fn check_never_panics(input in ".*") {
        let _ = check(Some(&input));
    }

    #[test]
    fn parse_never_panics(input in ".*") {
        let _ = Document::parse(Some(&input));
    }

    #[test]
    fn parsed_collections_are_ordered(doc in document()) {
        let parsed = Document::parse(Some(&doc.to_string())).unwrap();

        let uuids: Vec<&str> = parsed.identities().iter().map(|u| u.uuid.as_str()).collect();
        prop_assert!(uuids.windows(2).all(|w| w[0] < w[1]));

        let names: Vec<&str> = parsed.organizations().iter().map(|o| o.name.as_str()).collect();
        prop_assert!(names.windows(2).all(|w| w[0] < w[1]));

        for uid in parsed.identities() {
            prop_assert!(uid.identities.windows(2).all(|w| w[0].id <= w[1].id));
            prop_assert!(uid
                .enrollments
                .windows(2)
                .all(|w| (w[0].start, w[0].end) <= (w[1].start, w[1].end)));
            for rol in &uid.enrollments {
                prop_assert!(parsed.organization_of(rol).is_some());
            }
        }
    }

    #[test]
    fn parse_is_deterministic(doc in document()) {
        let text = doc.to_string();
        prop_assert_eq!(Document::parse(Some(&text)), Document::parse(Some(&text)));
    }

    #[test]
    fn export_reparses_to_equal_document(doc in document()) {
        let parsed = Document::parse(Some(&doc.to_string())).unwrap();
        let time = Timestamp::parse("2015-01-20T20:10:56").unwrap();

        let ids = export_identities(parsed.identities(), None, time).unwrap();
        let orgs = export_organizations(parsed.organizations(), time).unwrap();
        let merged = merge_dumps(ids, orgs).unwrap();

        prop_assert_eq!(Document::parse(Some(&merged.to_string())).unwrap(), parsed);
    }
}
