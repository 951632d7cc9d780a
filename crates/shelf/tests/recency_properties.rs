//! Property tests for the shelf
//!
//! The shelf is checked against a `VecDeque` reference model: any interleaving
//! of insert/touch/remove must leave both structures with identical ordering,
//! identical membership, and identical least-recent answers. The shelf's own
//! O(n) structural self-check runs after every mutation in debug builds, so
//! these runs also exercise link consistency internally.

use std::collections::VecDeque;

use folio_core::TitleId;
use folio_shelf::Shelf;
use proptest::prelude::*;

/// Ids are drawn from a small universe so operations collide often.
const ID_UNIVERSE: u8 = 24;

#[derive(Debug, Clone)]
enum Op {
    InsertFront(u8),
    Touch(u8),
    Remove(u8),
    PeekBack,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..ID_UNIVERSE).prop_map(Op::InsertFront),
        (0..ID_UNIVERSE).prop_map(Op::Touch),
        (0..ID_UNIVERSE).prop_map(Op::Remove),
        Just(Op::PeekBack),
    ]
}

fn title(n: u8) -> TitleId {
    TitleId::new(format!("title-{n:02}")).unwrap()
}

proptest! {
    #[test]
    fn shelf_matches_reference_model(ops in proptest::collection::vec(op_strategy(), 0..300)) {
        let mut shelf = Shelf::new();
        let mut model: VecDeque<u8> = VecDeque::new();

        for op in ops {
            match op {
                Op::InsertFront(n) => {
                    // Precondition: absent. Skip the op when the model says
                    // it is present, exactly as the coordinator would.
                    if !model.contains(&n) {
                        shelf.insert_front(title(n));
                        model.push_front(n);
                    }
                }
                Op::Touch(n) => {
                    if let Some(pos) = model.iter().position(|&m| m == n) {
                        shelf.touch(&title(n));
                        model.remove(pos);
                        model.push_front(n);
                    }
                }
                Op::Remove(n) => {
                    if let Some(pos) = model.iter().position(|&m| m == n) {
                        shelf.remove(&title(n));
                        model.remove(pos);
                    }
                }
                Op::PeekBack => {
                    let got = shelf.peek_back().ok().cloned();
                    let want = model.back().map(|&n| title(n));
                    prop_assert_eq!(got, want);
                }
            }
            prop_assert_eq!(shelf.len(), model.len());
            prop_assert_eq!(shelf.is_empty(), model.is_empty());
        }

        let got: Vec<TitleId> = shelf.iter().cloned().collect();
        let want: Vec<TitleId> = model.iter().map(|&n| title(n)).collect();
        prop_assert_eq!(got, want);

        let got_rev: Vec<TitleId> = shelf.iter().rev().cloned().collect();
        let want_rev: Vec<TitleId> = model.iter().rev().map(|&n| title(n)).collect();
        prop_assert_eq!(got_rev, want_rev);
    }

    #[test]
    fn touch_twice_equals_touch_once(ns in proptest::collection::vec(0..ID_UNIVERSE, 1..20)) {
        let mut shelf = Shelf::new();
        for n in &ns {
            if !shelf.contains(&title(*n)) {
                shelf.insert_front(title(*n));
            }
        }
        let target = title(ns[0]);
        shelf.touch(&target);
        let once: Vec<TitleId> = shelf.iter().cloned().collect();
        shelf.touch(&target);
        let twice: Vec<TitleId> = shelf.iter().cloned().collect();
        prop_assert_eq!(once, twice);
    }
}
