use tasklist_core::{
    Action, Filter, MemoryStorage, StorageError, StorageResult, Task, TaskStorage, TaskStore,
};

fn store_with(names: &[(&str, bool)]) -> TaskStore<MemoryStorage> {
    let mut store = TaskStore::open(MemoryStorage::new());
    for (name, completed) in names {
        store.add(name).unwrap();
        if *completed {
            let index = store.tasks().len() - 1;
            store.toggle(index, true).unwrap();
        }
    }
    store
}

#[test]
fn add_appends_pending_task_at_the_end() {
    let mut store = store_with(&[("first", false)]);
    store.add("second").unwrap();

    let names: Vec<_> = store.tasks().iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, ["first", "second"]);
    assert!(!store.tasks()[1].completed);
}

#[test]
fn add_blank_name_is_a_noop() {
    let mut store = store_with(&[("only", false)]);
    store.add("").unwrap();
    store.add("   ").unwrap();

    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn rename_replaces_name_in_place() {
    let mut store = store_with(&[("draft", false), ("keep", true)]);
    store.rename(0, "final").unwrap();

    assert_eq!(store.tasks()[0].name, "final");
    assert_eq!(store.tasks()[1].name, "keep");
    assert!(store.tasks()[1].completed);
}

#[test]
fn rename_blank_or_out_of_bounds_is_a_noop() {
    let mut store = store_with(&[("draft", false)]);
    store.rename(0, "  ").unwrap();
    store.rename(5, "ghost").unwrap();

    assert_eq!(store.tasks()[0].name, "draft");
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn toggle_is_idempotent() {
    let mut store = store_with(&[("a", false), ("b", false)]);
    store.toggle(1, true).unwrap();
    store.toggle(1, true).unwrap();

    assert_eq!(store.tasks().len(), 2);
    assert!(store.tasks()[1].completed);
    assert!(!store.tasks()[0].completed);
}

#[test]
fn toggle_out_of_bounds_is_a_noop() {
    let mut store = store_with(&[("a", false)]);
    store.toggle(3, true).unwrap();

    assert!(!store.tasks()[0].completed);
}

#[test]
fn toggle_all_sets_every_flag_atomically() {
    let mut store = store_with(&[("a", false), ("b", true), ("c", false)]);
    store.toggle_all(true).unwrap();

    assert!(store.tasks().iter().all(|task| task.completed));
    assert!(store.view(Filter::All).all_completed);

    store.toggle_all(false).unwrap();
    assert!(store.tasks().iter().all(|task| !task.completed));
    assert!(!store.view(Filter::All).all_completed);
}

#[test]
fn remove_shifts_later_indices_down() {
    let mut store = store_with(&[("A", false), ("B", false), ("C", false)]);

    store.remove(1).unwrap();
    let names: Vec<_> = store.tasks().iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);

    // Positional identity: after removing B, index 0 is A and C sits at 1.
    store.remove(0).unwrap();
    let names: Vec<_> = store.tasks().iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, ["C"]);
}

#[test]
fn remove_out_of_bounds_is_a_noop() {
    let mut store = store_with(&[("A", false)]);
    store.remove(1).unwrap();

    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn clear_completed_keeps_active_tasks_in_order() {
    let mut store = store_with(&[("A", false), ("B", true), ("C", true), ("D", false)]);
    store.clear_completed().unwrap();

    let names: Vec<_> = store.tasks().iter().map(|task| task.name.as_str()).collect();
    assert_eq!(names, ["A", "D"]);
    assert!(store.tasks().iter().all(|task| !task.completed));
}

#[test]
fn counts_hold_for_every_filter() {
    let store = store_with(&[("a", false), ("b", true), ("c", false), ("d", true)]);

    for filter in [Filter::All, Filter::Active, Filter::Completed] {
        let view = store.view(filter);
        assert_eq!(view.active_count, 2);
        assert_eq!(view.completed_count, 2);
        assert_eq!(view.active_count + view.completed_count, store.tasks().len());
    }
}

#[test]
fn filters_select_the_right_rows_with_original_indices() {
    let store = store_with(&[("a", false), ("b", true), ("c", false)]);

    let active = store.view(Filter::Active);
    let active_rows: Vec<_> = active
        .visible_tasks
        .iter()
        .map(|row| (row.index, row.task.name.as_str()))
        .collect();
    assert_eq!(active_rows, [(0, "a"), (2, "c")]);

    let completed = store.view(Filter::Completed);
    let completed_rows: Vec<_> = completed
        .visible_tasks
        .iter()
        .map(|row| (row.index, row.task.name.as_str()))
        .collect();
    assert_eq!(completed_rows, [(1, "b")]);

    assert_eq!(store.view(Filter::All).visible_tasks.len(), 3);
}

#[test]
fn empty_list_view_hides_footer_and_is_not_all_completed() {
    let store = TaskStore::open(MemoryStorage::new());
    let view = store.view(Filter::All);

    assert!(view.visible_tasks.is_empty());
    assert!(!view.show_footer);
    assert!(!view.all_completed);
    assert_eq!(view.active_count, 0);
    assert_eq!(view.completed_count, 0);
}

#[test]
fn footer_shows_whenever_the_list_is_non_empty() {
    let store = store_with(&[("a", true)]);
    let view = store.view(Filter::Active);

    assert!(view.visible_tasks.is_empty());
    assert!(view.show_footer);
    assert!(view.all_completed);
}

#[test]
fn apply_routes_every_action_kind() {
    let mut store = TaskStore::open(MemoryStorage::new());

    store.apply(Action::Add("one".to_string())).unwrap();
    store.apply(Action::Add("two".to_string())).unwrap();
    store
        .apply(Action::Rename {
            index: 0,
            name: "first".to_string(),
        })
        .unwrap();
    store
        .apply(Action::Toggle {
            index: 1,
            completed: true,
        })
        .unwrap();

    assert_eq!(store.tasks()[0].name, "first");
    assert!(store.tasks()[1].completed);

    store.apply(Action::ClearCompleted).unwrap();
    assert_eq!(store.tasks().len(), 1);

    store.apply(Action::ToggleAll(true)).unwrap();
    assert!(store.view(Filter::All).all_completed);

    store.apply(Action::Remove(0)).unwrap();
    assert!(store.tasks().is_empty());

    store.apply(Action::None).unwrap();
    assert!(store.tasks().is_empty());
}

struct FailingStorage;

impl TaskStorage for FailingStorage {
    fn load(&self) -> Vec<Task> {
        Vec::new()
    }

    fn save(&mut self, _tasks: &[Task]) -> StorageResult<()> {
        let err = serde_json::from_str::<i32>("not a number").unwrap_err();
        Err(StorageError::Encode(err))
    }
}

#[test]
fn failed_save_reports_error_but_keeps_memory_state() {
    let mut store = TaskStore::open(FailingStorage);

    let result = store.apply(Action::Add("survives".to_string()));
    assert!(matches!(result, Err(StorageError::Encode(_))));

    // In-memory state stays the source of truth for the current cycle.
    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].name, "survives");
}

#[test]
fn open_recovers_malformed_blob_as_empty_list() {
    let store = TaskStore::open(MemoryStorage::with_blob("][ not json"));
    assert!(store.tasks().is_empty());
}

#[test]
fn mutations_write_the_whole_list_back() {
    let mut store = TaskStore::open(MemoryStorage::new());
    store.add("a").unwrap();
    store.add("b").unwrap();
    store.toggle(0, true).unwrap();

    // Reopen from the same backend contents via the serialized blob.
    let reloaded = TaskStore::open(MemoryStorage::with_blob(
        r#"[{"name":"a","completed":1},{"name":"b","completed":0}]"#,
    ));
    assert_eq!(reloaded.tasks(), store.tasks());
}
