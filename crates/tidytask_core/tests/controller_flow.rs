//! End-to-end flow through the assembled application: gesture in, store
//! mutation, render update and persisted slot out.

use std::rc::Rc;
use tidytask_core::{
    App, Gesture, IdSource, MemorySlotStorage, SlotStorage, TaskId, EMPTY_TITLE_NOTICE,
    TASKS_SLOT_KEY,
};

/// Deterministic id source: 1, 2, 3, ...
struct SeqIds(TaskId);

impl IdSource for SeqIds {
    fn next_id(&mut self) -> TaskId {
        self.0 += 1;
        self.0
    }
}

fn boot_app(storage: Rc<MemorySlotStorage>) -> App {
    App::with_id_source(storage, Box::new(SeqIds(0)))
}

fn add(app: &mut App, title: &str) {
    app.type_entry(title);
    app.dispatch(Gesture::Submit);
}

#[test]
fn add_gesture_creates_task_and_renders_item() {
    let storage = Rc::new(MemorySlotStorage::new());
    let mut app = boot_app(Rc::clone(&storage));

    add(&mut app, "Buy milk");

    let tasks = app.tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, 1);
    assert_eq!(tasks[0].title, "Buy milk");
    assert!(!tasks[0].completed);

    app.with_surface(|surface| {
        assert_eq!(surface.items().len(), 1);
        assert_eq!(surface.items()[0].label, "Buy milk");
        assert_eq!(surface.entry_value(), "");
    });

    let slot = storage.get(TASKS_SLOT_KEY).unwrap().unwrap();
    assert_eq!(slot, r#"[{"id":1,"title":"Buy milk","completed":false}]"#);
}

#[test]
fn empty_submit_reaches_neither_store_nor_slot() {
    let storage = Rc::new(MemorySlotStorage::new());
    let mut app = boot_app(Rc::clone(&storage));

    add(&mut app, "  ");

    assert!(app.tasks().is_empty());
    app.with_surface(|surface| {
        assert_eq!(surface.notice(), Some(EMPTY_TITLE_NOTICE));
        assert!(surface.items().is_empty());
    });
    assert_eq!(storage.get(TASKS_SLOT_KEY).unwrap(), None);
}

#[test]
fn toggle_gesture_updates_store_and_item() {
    let storage = Rc::new(MemorySlotStorage::new());
    let mut app = boot_app(storage);
    add(&mut app, "A");

    app.dispatch(Gesture::ToggleClick(1));

    assert!(app.tasks()[0].completed);
    app.with_surface(|surface| {
        let item = surface.find_item(1).unwrap();
        assert!(item.checked);
        assert!(item.completed);
    });

    app.dispatch(Gesture::ToggleClick(1));
    assert!(!app.tasks()[0].completed);
}

#[test]
fn two_phase_edit_commits_typed_title() {
    let storage = Rc::new(MemorySlotStorage::new());
    let mut app = boot_app(storage);
    add(&mut app, "Walk dog");

    app.dispatch(Gesture::EditClick(1));
    assert_eq!(app.tasks()[0].title, "Walk dog", "phase one must not mutate");

    app.type_edit(1, "Walk the dog");
    app.dispatch(Gesture::EditClick(1));

    assert_eq!(app.tasks()[0].title, "Walk the dog");
    assert!(!app.tasks()[0].completed);
    app.with_surface(|surface| {
        let item = surface.find_item(1).unwrap();
        assert_eq!(item.label, "Walk the dog");
        assert!(!item.is_editing());
    });
}

#[test]
fn remove_gesture_clears_store_item_and_slot_entry() {
    let storage = Rc::new(MemorySlotStorage::new());
    let mut app = boot_app(Rc::clone(&storage));
    add(&mut app, "A");
    add(&mut app, "B");

    app.dispatch(Gesture::RemoveClick(1));

    let tasks = app.tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, 2);
    app.with_surface(|surface| {
        assert_eq!(surface.items().len(), 1);
        assert_eq!(surface.items()[0].id, 2);
    });

    let slot = storage.get(TASKS_SLOT_KEY).unwrap().unwrap();
    assert_eq!(slot, r#"[{"id":2,"title":"B","completed":false}]"#);
}

#[test]
fn restart_restores_collection_and_initial_render() {
    let storage = Rc::new(MemorySlotStorage::new());
    {
        let mut app = boot_app(Rc::clone(&storage));
        add(&mut app, "A");
        add(&mut app, "B");
        app.dispatch(Gesture::ToggleClick(1));
    }

    let app = boot_app(Rc::clone(&storage));

    let tasks = app.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, 1);
    assert!(tasks[0].completed);
    assert_eq!(tasks[1].title, "B");
    app.with_surface(|surface| {
        assert_eq!(surface.items().len(), 2);
        assert!(surface.items()[0].checked);
    });
}

#[test]
fn ids_created_after_restart_do_not_collide_with_restored_ones() {
    let storage = Rc::new(MemorySlotStorage::new());
    {
        let mut app = boot_app(Rc::clone(&storage));
        add(&mut app, "A");
        add(&mut app, "B");
    }

    // The fresh sequential source restarts at 1; creation must skip past
    // the restored ids.
    let mut app = boot_app(Rc::clone(&storage));
    add(&mut app, "C");

    let ids: Vec<_> = app.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}
