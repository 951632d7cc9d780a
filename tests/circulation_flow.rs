//! Circulation scenario tests against the public facade
//!
//! One failure mode per test; values are asserted, not just `is_ok()`.

use folio::{Error, Library, PatronId, TitleId};

fn title(s: &str) -> TitleId {
    TitleId::new(s).unwrap()
}

fn patron(s: &str) -> PatronId {
    PatronId::new(s).unwrap()
}

// ============================================================================
// The end-to-end scenario from the requirements
// ============================================================================

#[test]
fn checkout_return_scenario() {
    let mut library = Library::new();
    library.add_title(title("T1")).unwrap();
    library.add_title(title("T2")).unwrap();

    let order: Vec<&TitleId> = library.shelf_sequence().collect();
    assert_eq!(order, vec![&title("T2"), &title("T1")]);

    library.checkout(&title("T1"), &patron("bob")).unwrap();
    let order: Vec<&TitleId> = library.shelf_sequence().collect();
    assert_eq!(order, vec![&title("T2")]);

    library.return_title(&title("T1"), &patron("bob")).unwrap();
    let order: Vec<&TitleId> = library.shelf_sequence().collect();
    assert_eq!(order, vec![&title("T1"), &title("T2")]);
}

#[test]
fn checkout_then_return_restores_on_shelf_status() {
    let mut library = Library::new();
    library.add_title(title("T1")).unwrap();
    library.checkout(&title("T1"), &patron("h")).unwrap();
    library.return_title(&title("T1"), &patron("h")).unwrap();

    let view = library.status(&title("T1")).unwrap();
    assert!(view.status.is_on_shelf());
    assert_eq!(library.most_recent_display(), Some(&title("T1")));
}

// ============================================================================
// Reservation priority
// ============================================================================

#[test]
fn reserved_title_only_checks_out_to_head() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    library.reserve(&title("X"), &patron("alice")).unwrap();

    assert_eq!(
        library.checkout(&title("X"), &patron("bob")),
        Err(Error::ReservedForOther(title("X")))
    );
    assert!(library.checkout(&title("X"), &patron("alice")).is_ok());
}

#[test]
fn second_requester_moves_up_after_cancellation() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    library.reserve(&title("X"), &patron("alice")).unwrap();
    library.reserve(&title("X"), &patron("bob")).unwrap();

    library
        .cancel_reservation(&title("X"), &patron("alice"))
        .unwrap();
    assert!(library.checkout(&title("X"), &patron("bob")).is_ok());
}

#[test]
fn hold_notice_names_head_requester() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    library.checkout(&title("X"), &patron("bob")).unwrap();
    library.reserve(&title("X"), &patron("alice")).unwrap();

    let notice = library
        .return_title(&title("X"), &patron("bob"))
        .unwrap()
        .expect("hold pending, notice expected");
    assert_eq!(notice.title, title("X"));
    assert_eq!(notice.patron, patron("alice"));
}

// ============================================================================
// Deletion guard
// ============================================================================

#[test]
fn remove_fails_while_checked_out_then_succeeds() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    library.checkout(&title("X"), &patron("bob")).unwrap();

    assert_eq!(
        library.remove_title(&title("X")),
        Err(Error::TitleInUse(title("X")))
    );

    library.return_title(&title("X"), &patron("bob")).unwrap();
    assert!(library.remove_title(&title("X")).is_ok());
    assert_eq!(
        library.status(&title("X")),
        Err(Error::UnknownTitle(title("X")))
    );
}

// ============================================================================
// Error taxonomy, one by one
// ============================================================================

#[test]
fn wrong_holder_cannot_return() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    library.checkout(&title("X"), &patron("bob")).unwrap();
    assert_eq!(
        library.return_title(&title("X"), &patron("mallory")),
        Err(Error::WrongHolder(title("X")))
    );
}

#[test]
fn returning_a_shelved_title_is_not_checked_out() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    assert_eq!(
        library.return_title(&title("X"), &patron("bob")),
        Err(Error::NotCheckedOut(title("X")))
    );
}

#[test]
fn double_reserve_is_already_queued() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    library.reserve(&title("X"), &patron("alice")).unwrap();
    assert_eq!(
        library.reserve(&title("X"), &patron("alice")),
        Err(Error::AlreadyQueued {
            title: title("X"),
            patron: patron("alice"),
        })
    );
}

#[test]
fn cancel_without_hold_is_not_queued() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    assert_eq!(
        library.cancel_reservation(&title("X"), &patron("alice")),
        Err(Error::NotQueued {
            title: title("X"),
            patron: patron("alice"),
        })
    );
}

#[test]
fn checkout_of_checked_out_title_is_not_available() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    library.checkout(&title("X"), &patron("bob")).unwrap();
    assert_eq!(
        library.checkout(&title("X"), &patron("carol")),
        Err(Error::NotAvailable(title("X")))
    );
}

// ============================================================================
// Availability query
// ============================================================================

#[test]
fn availability_follows_shelf_and_holds() {
    let mut library = Library::new();
    library.add_title(title("X")).unwrap();
    assert!(library.is_available(&title("X")));

    library.reserve(&title("X"), &patron("alice")).unwrap();
    assert!(!library.is_available(&title("X")));

    // The head requester checking out consumes the hold; once returned with
    // no holds left, the title is generally available again.
    library.checkout(&title("X"), &patron("alice")).unwrap();
    library.return_title(&title("X"), &patron("alice")).unwrap();
    assert!(library.is_available(&title("X")));
}
