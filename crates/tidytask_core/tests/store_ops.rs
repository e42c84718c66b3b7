use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;
use tidytask_core::{IdSource, StoreError, StoreEvent, Task, TaskId, TaskPatch, TaskStore};

/// Deterministic id source: 1, 2, 3, ...
struct SeqIds(TaskId);

impl IdSource for SeqIds {
    fn next_id(&mut self) -> TaskId {
        self.0 += 1;
        self.0
    }
}

fn seq_store() -> TaskStore {
    TaskStore::new(Box::new(SeqIds(0)))
}

/// Attaches a listener recording every `Changed` snapshot.
fn record_changes(store: &mut TaskStore) -> Rc<RefCell<Vec<Vec<Task>>>> {
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapshots);
    store.on_changed(Box::new(move |event| {
        let StoreEvent::Changed(tasks) = event;
        sink.borrow_mut().push(tasks.clone());
    }));
    snapshots
}

#[test]
fn create_on_empty_store_appends_one_incomplete_task() {
    let mut store = seq_store();
    let changes = record_changes(&mut store);

    let task = store.create("Buy milk");

    assert_eq!(store.tasks(), &[task.clone()]);
    assert_eq!(task.title, "Buy milk");
    assert!(!task.completed);
    assert_eq!(changes.borrow().len(), 1);
    assert_eq!(changes.borrow()[0], vec![task]);
}

#[test]
fn creation_order_is_iteration_order() {
    let mut store = seq_store();
    for title in ["A", "B", "C", "D"] {
        store.create(title);
    }

    let titles: Vec<&str> = store.tasks().iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B", "C", "D"]);
}

#[test]
fn remove_keeps_relative_order_of_survivors() {
    let mut store = seq_store();
    let a = store.create("A");
    let b = store.create("B");
    let c = store.create("C");

    store.remove(b.id);

    let ids: Vec<TaskId> = store.tasks().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![a.id, c.id]);
}

#[test]
fn create_after_remove_appends_at_end() {
    let mut store = seq_store();
    let a = store.create("A");
    let b = store.create("B");
    store.remove(a.id);
    let c = store.create("C");

    assert_eq!(
        store.tasks(),
        &[
            Task {
                id: b.id,
                title: "B".to_string(),
                completed: false
            },
            Task {
                id: c.id,
                title: "C".to_string(),
                completed: false
            },
        ]
    );
}

#[test]
fn ids_stay_unique_across_mixed_operations() {
    let mut store = seq_store();
    let mut created = Vec::new();
    for round in 0..10 {
        created.push(store.create(format!("task {round}")).id);
        if round % 3 == 0 {
            store.remove(created[round / 2]);
        }
    }
    store
        .update(*created.last().unwrap(), TaskPatch::set_completed(true))
        .unwrap();

    let live: Vec<TaskId> = store.tasks().iter().map(|task| task.id).collect();
    let unique: HashSet<TaskId> = live.iter().copied().collect();
    assert_eq!(live.len(), unique.len());
}

#[test]
fn create_skips_ids_already_seeded_from_storage() {
    let seeded = vec![Task::new(1, "restored"), Task::new(2, "also restored")];
    let mut store = TaskStore::with_tasks(seeded, Box::new(SeqIds(0)));

    let task = store.create("fresh");

    assert_eq!(task.id, 3);
    assert_eq!(store.tasks().len(), 3);
}

#[test]
fn double_remove_is_idempotent() {
    let mut store = seq_store();
    let a = store.create("A");
    let b = store.create("B");
    store.remove(a.id);

    let changes = record_changes(&mut store);
    store.remove(a.id);

    assert!(changes.borrow().is_empty(), "second remove must not notify");
    assert_eq!(store.tasks(), &[b]);
}

#[test]
fn update_completed_leaves_title_untouched() {
    let mut store = seq_store();
    let a = store.create("A");

    let updated = store.update(a.id, TaskPatch::set_completed(true)).unwrap();

    assert!(updated.completed);
    assert_eq!(updated.title, "A");
    let found = store.find(a.id).unwrap();
    assert!(found.completed);
    assert_eq!(found.title, "A");
}

#[test]
fn update_title_leaves_completed_untouched() {
    let mut store = seq_store();
    let a = store.create("A");
    assert_eq!(a.id, 1);

    store.update(1, TaskPatch::retitle("A2")).unwrap();

    let found = store.find(1).unwrap();
    assert_eq!(found.title, "A2");
    assert!(!found.completed);
}

#[test]
fn each_successful_mutation_notifies_once_with_full_collection() {
    let mut store = seq_store();
    let changes = record_changes(&mut store);

    let a = store.create("A");
    let b = store.create("B");
    store.update(a.id, TaskPatch::set_completed(true)).unwrap();
    store.remove(b.id);

    let changes = changes.borrow();
    assert_eq!(changes.len(), 4);
    assert_eq!(changes[0].len(), 1);
    assert_eq!(changes[1].len(), 2);
    assert_eq!(changes[2].len(), 2);
    assert!(changes[2][0].completed);
    assert_eq!(changes[3].len(), 1);
    assert_eq!(changes[3][0].id, a.id);
}

#[test]
fn update_unknown_id_fails_without_notification_or_state_change() {
    let mut store = seq_store();
    let changes = record_changes(&mut store);

    let err = store.update(999, TaskPatch::retitle("ghost")).unwrap_err();

    assert_eq!(err, StoreError::NotFound(999));
    assert!(store.tasks().is_empty());
    assert!(changes.borrow().is_empty());
}

#[test]
fn scenario_create_remove_leaves_remaining_task() {
    let mut store = seq_store();
    let a = store.create("A");
    let b = store.create("B");
    assert_eq!((a.id, b.id), (1, 2));

    store.remove(1);

    assert_eq!(store.tasks(), &[Task::new(2, "B")]);
}

#[test]
fn find_returns_live_task_or_none() {
    let mut store = seq_store();
    let a = store.create("A");

    assert_eq!(store.find(a.id).unwrap().title, "A");
    assert!(store.find(404).is_none());

    store.remove(a.id);
    assert!(store.find(a.id).is_none());
}
