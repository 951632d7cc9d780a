//! Property test: the cross-entity invariant under random operations
//!
//! For every reachable state, a title is on the shelf iff its status is
//! `OnShelf`, and the shelf sequence length equals the count of `OnShelf`
//! records. Operations are fired blind (many will fail); failures must
//! leave no partial mutation behind.

use folio::{Library, PatronId, TitleId};
use proptest::prelude::*;

const TITLES: u8 = 8;
const PATRONS: u8 = 4;

#[derive(Debug, Clone)]
enum Op {
    Add(u8),
    Remove(u8),
    Checkout(u8, u8),
    Return(u8, u8),
    Reserve(u8, u8),
    Cancel(u8, u8),
    Touch(u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let t = 0..TITLES;
    let p = 0..PATRONS;
    prop_oneof![
        t.clone().prop_map(Op::Add),
        t.clone().prop_map(Op::Remove),
        (t.clone(), p.clone()).prop_map(|(a, b)| Op::Checkout(a, b)),
        (t.clone(), p.clone()).prop_map(|(a, b)| Op::Return(a, b)),
        (t.clone(), p.clone()).prop_map(|(a, b)| Op::Reserve(a, b)),
        (t.clone(), p).prop_map(|(a, b)| Op::Cancel(a, b)),
        t.prop_map(Op::Touch),
    ]
}

fn title(n: u8) -> TitleId {
    TitleId::new(format!("T{n}")).unwrap()
}

fn patron(n: u8) -> PatronId {
    PatronId::new(format!("P{n}")).unwrap()
}

fn assert_invariant(library: &Library) {
    let inventory = library.inventory();
    for view in &inventory {
        assert_eq!(
            library.is_on_shelf(&view.id),
            view.status.is_on_shelf(),
            "shelf/status disagreement for {}",
            view.id
        );
    }
    let shelved = inventory.iter().filter(|v| v.status.is_on_shelf()).count();
    assert_eq!(library.shelf_sequence().len(), shelved);
    assert_eq!(library.len(), inventory.len());
}

proptest! {
    #[test]
    fn invariant_holds_under_random_operations(
        ops in proptest::collection::vec(op_strategy(), 0..400)
    ) {
        let mut library = Library::new();
        for op in ops {
            // Results are intentionally ignored: rejected operations must be
            // as invariant-preserving as accepted ones.
            let _ = match op {
                Op::Add(t) => library.add_title(title(t)).map(|_| ()),
                Op::Remove(t) => library.remove_title(&title(t)).map(|_| ()),
                Op::Checkout(t, p) => library.checkout(&title(t), &patron(p)).map(|_| ()),
                Op::Return(t, p) => library.return_title(&title(t), &patron(p)).map(|_| ()),
                Op::Reserve(t, p) => library.reserve(&title(t), &patron(p)).map(|_| ()),
                Op::Cancel(t, p) => {
                    library.cancel_reservation(&title(t), &patron(p)).map(|_| ())
                }
                Op::Touch(t) => library.touch_access(&title(t)).map(|_| ()),
            };
            assert_invariant(&library);
        }

        // And the final state survives a snapshot round trip.
        let restored = Library::restore(&library.snapshot()).unwrap();
        let original: Vec<TitleId> = library.shelf_sequence().cloned().collect();
        let recovered: Vec<TitleId> = restored.shelf_sequence().cloned().collect();
        prop_assert_eq!(original, recovered);
        prop_assert_eq!(library.inventory(), restored.inventory());
    }
}
