//! Behaviour of the record table controller against an in-memory store.

mod common;

use std::sync::Arc;

use common::{id, student, Call, FakeStore};
use student_records::domain::edit::{EditState, Field};
use student_records::domain::error::TableError;
use student_records::domain::page::PageSize;
use student_records::error::StoreOperation;
use student_records::model::NewStudent;
use student_records::RecordTable;

async fn loaded(n: u64, size: PageSize) -> (Arc<FakeStore>, RecordTable) {
    let store = Arc::new(FakeStore::with_students(n));
    let mut table = RecordTable::new(store.clone(), size);
    table.load().await.expect("load");
    (store, table)
}

#[tokio::test]
async fn load_fetches_once_and_starts_on_first_page() {
    let (store, table) = loaded(12, PageSize::Five).await;

    assert_eq!(store.calls(), vec![Call::List]);
    assert_eq!(table.len(), 12);
    assert_eq!(table.window().page(), 0);
    assert_eq!(table.visible_rows(), &store.stored()[0..5]);
    assert_eq!(table.edit_state(), &EditState::Viewing);
}

#[tokio::test]
async fn add_to_full_page_jumps_to_new_last_page_and_opens_editor() {
    let (store, mut table) = loaded(10, PageSize::Ten).await;

    let new_id = table.add().await.expect("add");

    assert_eq!(new_id, id(11));
    assert_eq!(store.calls()[1], Call::Create(NewStudent::default()));
    assert_eq!(table.len(), 11);
    // ceil(11 / 10) - 1
    assert_eq!(table.window().page(), 1);
    assert_eq!(table.visible_rows().len(), 1);
    assert_eq!(table.visible_rows()[0].id, Some(id(11)));
    assert!(table.edit_state().is_editing(id(11)));
    let draft = table.edit_state().draft().unwrap();
    assert_eq!(draft.get(Field::FirstName), "");
    assert_eq!(draft.get(Field::Age), "0");
}

#[tokio::test]
async fn add_that_fits_current_page_stays_on_it() {
    let (_store, mut table) = loaded(3, PageSize::Ten).await;
    table.add().await.unwrap();
    assert_eq!(table.window().page(), 0);
    assert_eq!(table.visible_rows().len(), 4);
}

#[tokio::test]
async fn add_failure_leaves_collection_unchanged() {
    let (store, mut table) = loaded(4, PageSize::Five).await;
    store.fail(StoreOperation::Create);

    let err = table.add().await.unwrap_err();

    assert!(matches!(err, TableError::Remote(ref e) if e.operation() == StoreOperation::Create));
    assert_eq!(table.len(), 4);
    assert_eq!(table.edit_state(), &EditState::Viewing);
    assert_eq!(table.failures(), &[err]);
}

#[tokio::test]
async fn double_activation_toggles_edit_mode_without_saving() {
    let (store, mut table) = loaded(3, PageSize::Ten).await;

    assert!(table.toggle_edit(id(2)));
    assert!(table.change_field(Field::Major, "Physics"));
    assert!(!table.toggle_edit(id(2)));

    assert_eq!(table.edit_state(), &EditState::Viewing);
    assert_eq!(table.rows()[1], student(2));
    assert_eq!(store.calls(), vec![Call::List]);
}

#[tokio::test]
async fn selecting_another_row_discards_previous_draft() {
    let (_store, mut table) = loaded(3, PageSize::Ten).await;

    table.toggle_edit(id(1));
    table.change_field(Field::FirstName, "Changed");
    assert!(table.toggle_edit(id(3)));

    assert_eq!(table.edit_state().editing_id(), Some(id(3)));
    assert_eq!(table.rows()[0], student(1));
    assert_eq!(
        table.edit_state().draft().unwrap().get(Field::FirstName),
        "First3"
    );

    // Re-opening row 1 starts from committed values, not the lost draft.
    table.toggle_edit(id(1));
    assert_eq!(
        table.edit_state().draft().unwrap().get(Field::FirstName),
        "First1"
    );
}

#[tokio::test]
async fn field_edits_are_invisible_until_save_succeeds() {
    let (store, mut table) = loaded(2, PageSize::Five).await;

    table.toggle_edit(id(2));
    table.change_field(Field::Email, "new@example.com");
    table.change_field(Field::Age, "30");
    assert_eq!(table.rows()[1].email, student(2).email);

    table.save().await.expect("save");

    let mut expected = student(2);
    expected.email = "new@example.com".into();
    expected.age = 30;
    assert_eq!(table.rows()[1], expected);
    assert_eq!(store.calls().last(), Some(&Call::Update(id(2), expected)));
    assert_eq!(table.edit_state(), &EditState::Viewing);
}

#[tokio::test]
async fn save_without_selection_is_a_silent_no_op() {
    let (store, mut table) = loaded(3, PageSize::Ten).await;
    let before = table.rows();

    table.save().await.expect("no-op");

    assert_eq!(store.calls(), vec![Call::List]);
    assert_eq!(table.rows(), before);
    assert!(table.failures().is_empty());
}

#[tokio::test]
async fn rejected_update_keeps_editor_open_for_retry() {
    let (store, mut table) = loaded(3, PageSize::Ten).await;
    store.fail(StoreOperation::Update);

    table.toggle_edit(id(1));
    table.change_field(Field::LastName, "Retry");
    let err = table.save().await.unwrap_err();

    assert!(matches!(err, TableError::Remote(_)));
    assert!(table.edit_state().is_editing(id(1)));
    assert_eq!(
        table.edit_state().draft().unwrap().get(Field::LastName),
        "Retry"
    );
    assert_eq!(table.rows()[0], student(1));
    assert_eq!(table.last_failure(), Some(&err));
}

#[tokio::test]
async fn deleting_last_row_of_last_page_clamps_page_index() {
    let (_store, mut table) = loaded(11, PageSize::Five).await;
    table.change_page(2);
    assert_eq!(table.visible_rows().len(), 1);

    table.delete(id(11)).await.expect("delete");

    assert_eq!(table.len(), 10);
    assert_eq!(table.window().page(), 1);
    assert_eq!(table.visible_rows().len(), 5);
}

#[tokio::test]
async fn deleting_everything_lands_on_page_zero() {
    let (_store, mut table) = loaded(1, PageSize::Five).await;
    table.delete(id(1)).await.unwrap();
    assert!(table.is_empty());
    assert_eq!(table.window().page(), 0);
    assert!(table.visible_rows().is_empty());
}

#[tokio::test]
async fn delete_failure_keeps_row() {
    let (store, mut table) = loaded(6, PageSize::Five).await;
    store.fail(StoreOperation::Delete);
    table.change_page(1);

    assert!(table.delete(id(6)).await.is_err());

    assert_eq!(table.len(), 6);
    assert_eq!(table.window().page(), 1);
    assert_eq!(table.failures().len(), 1);
}

#[tokio::test]
async fn page_change_discards_draft_without_refetch() {
    let (store, mut table) = loaded(12, PageSize::Five).await;

    table.toggle_edit(id(3));
    table.change_field(Field::Major, "History");
    table.change_page(1);

    assert_eq!(table.edit_state(), &EditState::Viewing);
    assert_eq!(table.visible_rows()[0].id, Some(id(6)));
    assert_eq!(table.rows()[2], student(3));
    assert_eq!(store.calls(), vec![Call::List]);
}

#[tokio::test]
async fn page_size_change_resets_to_first_page() {
    let (_store, mut table) = loaded(30, PageSize::Five).await;
    table.change_page(4);

    table.change_page_size(PageSize::TwentyFive);

    assert_eq!(table.window().page(), 0);
    assert_eq!(table.visible_rows().len(), 25);
}

#[tokio::test]
async fn at_most_one_row_is_ever_in_edit_mode() {
    let (_store, mut table) = loaded(5, PageSize::Five).await;
    for n in [1, 2, 3, 3, 5, 1] {
        table.toggle_edit(id(n));
        let editing = table
            .visible_rows()
            .iter()
            .filter(|r| r.id.is_some_and(|rid| table.edit_state().is_editing(rid)))
            .count();
        assert!(editing <= 1);
    }
}
