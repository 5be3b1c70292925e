//! Demo records loaded at startup while the API is still being shaped.

use models::{Thing, Venture};
use tracing::{error, info};

use crate::storage::EntityStore;

fn dummy_things() -> Vec<Thing> {
    let mut outline = Thing::new("# Outline the saga\nCreate a rough outline of the new saga.", "in_progress");
    outline.children_ids = vec!["2".into(), "3".into(), "4".into()];

    let mut first = Thing::new("# Outline the first chapter", "delivered");
    first.additional = "archive_note:Done but not a compelling start".into();

    vec![
        outline,
        Thing::new("# Name the saga\nThink of a name for the saga.", "potential"),
        first,
        Thing::new("# Outline the second chapter", "in_progress"),
    ]
}

fn dummy_ventures() -> Vec<Venture> {
    vec![
        Venture::new("White wizard", "Started").with_orders("1,2,3").with_extra("colour: white"),
        Venture::new("Green lizard", "Not started").with_orders("4,5"),
        Venture::new("Pink gizzard", "Finished").with_extra("colour: pink"),
        Venture::new("Eddie Izzard", "In progress").with_orders("6"),
        Venture::new("The Count of Tuscany", "Not started"),
    ]
}

fn seed<R: models::Record>(store: &EntityStore<R>, kind: &str, records: Vec<R>) -> bool {
    store.seed_once(|st| {
        for record in records {
            if let Err(e) = st.add(record) {
                error!(%kind, error = %e, "failed to seed record");
            }
        }
        info!(%kind, count = st.len(), "seeded dummy records");
    })
}

/// Seed the thing store once; returns whether this call did the seeding.
pub fn seed_things(store: &EntityStore<Thing>) -> bool {
    seed(store, "thing", dummy_things())
}

/// Seed the venture store once; returns whether this call did the seeding.
pub fn seed_ventures(store: &EntityStore<Venture>) -> bool {
    seed(store, "venture", dummy_ventures())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn things_seed_once_with_saga_tree() {
        let store = EntityStore::new();
        assert!(seed_things(&store));
        assert!(!seed_things(&store));
        assert_eq!(store.len(), 4);

        let root = store.get("1").unwrap();
        assert_eq!(root.children_ids, vec!["2", "3", "4"]);
        assert_eq!(root.self_link, "/things/1");
        assert_eq!(store.get("3").unwrap().state, "delivered");
    }

    #[test]
    fn ventures_seed_ids_one_to_five() {
        let store = EntityStore::new();
        assert!(seed_ventures(&store));
        assert!(!seed_ventures(&store));
        let ids: Vec<_> = store.get_all_alive().into_iter().map(|v| v.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }
}
