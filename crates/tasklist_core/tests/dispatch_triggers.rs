use tasklist_core::{resolve, Action, Dispatcher, Filter, MemoryStorage, TaskStore, Trigger};

#[test]
fn fixed_name_triggers_map_directly() {
    assert_eq!(
        resolve(&Trigger::with_text("add-task", "buy milk")),
        Action::Add("buy milk".to_string())
    );
    assert_eq!(
        resolve(&Trigger::named("clear-completed")),
        Action::ClearCompleted
    );
    assert_eq!(
        resolve(&Trigger::with_flag("select_all", true)),
        Action::ToggleAll(true)
    );
}

#[test]
fn verb_index_triggers_parse_the_trailing_index() {
    assert_eq!(resolve(&Trigger::named("remove-2")), Action::Remove(2));
    assert_eq!(
        resolve(&Trigger::with_text("update-1", "new name")),
        Action::Rename {
            index: 1,
            name: "new name".to_string(),
        }
    );
    assert_eq!(
        resolve(&Trigger::with_flag("toggle-0", false)),
        Action::Toggle {
            index: 0,
            completed: false,
        }
    );
}

#[test]
fn unrecognized_triggers_resolve_to_none() {
    assert_eq!(resolve(&Trigger::named("bogus")), Action::None);
    assert_eq!(resolve(&Trigger::named("remove-")), Action::None);
    assert_eq!(resolve(&Trigger::named("remove-abc")), Action::None);
    assert_eq!(resolve(&Trigger::named("archive-3")), Action::None);
}

#[test]
fn checkbox_triggers_require_a_flag_payload() {
    assert_eq!(resolve(&Trigger::named("select_all")), Action::None);
    assert_eq!(resolve(&Trigger::named("toggle-2")), Action::None);
}

#[test]
fn add_task_without_text_becomes_blank_add() {
    // The store treats the blank name as a defined no-op.
    assert_eq!(
        resolve(&Trigger::named("add-task")),
        Action::Add(String::new())
    );
}

#[test]
fn edit_trigger_arms_edit_mode_without_mutating() {
    let mut dispatcher = Dispatcher::new();

    let action = dispatcher.dispatch(&Trigger::named("edit-2"));
    assert_eq!(action, Action::None);
    assert_eq!(dispatcher.editing_row(), Some(2));
    assert!(dispatcher.is_editing(2));
    assert!(!dispatcher.is_editing(0));
}

#[test]
fn any_following_trigger_clears_edit_mode() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.dispatch(&Trigger::named("edit-1"));

    let action = dispatcher.dispatch(&Trigger::with_text("update-1", "edited"));
    assert_eq!(
        action,
        Action::Rename {
            index: 1,
            name: "edited".to_string(),
        }
    );
    assert_eq!(dispatcher.editing_row(), None);
}

#[test]
fn edit_mode_moves_to_the_latest_target() {
    let mut dispatcher = Dispatcher::new();
    dispatcher.dispatch(&Trigger::named("edit-0"));
    dispatcher.dispatch(&Trigger::named("edit-3"));

    assert!(dispatcher.is_editing(3));
    assert!(!dispatcher.is_editing(0));
}

#[test]
fn dispatched_actions_drive_the_store_end_to_end() {
    let mut dispatcher = Dispatcher::new();
    let mut store = TaskStore::open(MemoryStorage::new());

    let triggers = [
        Trigger::with_text("add-task", "one"),
        Trigger::with_text("add-task", "two"),
        Trigger::with_flag("toggle-0", true),
        Trigger::with_text("update-1", "two renamed"),
        Trigger::named("clear-completed"),
    ];
    for trigger in &triggers {
        let action = dispatcher.dispatch(trigger);
        store.apply(action).unwrap();
    }

    let view = store.view(Filter::All);
    assert_eq!(view.visible_tasks.len(), 1);
    assert_eq!(view.visible_tasks[0].task.name, "two renamed");
    assert_eq!(view.active_count, 1);
    assert_eq!(view.completed_count, 0);
}

#[test]
fn stale_index_after_removal_is_ignored() {
    // Index-as-identity race: the caller should rebuild its view after every
    // mutation; when it does not, the store ignores the stale index.
    let mut dispatcher = Dispatcher::new();
    let mut store = TaskStore::open(MemoryStorage::new());

    store.apply(dispatcher.dispatch(&Trigger::with_text("add-task", "only"))).unwrap();
    store.apply(dispatcher.dispatch(&Trigger::named("remove-0"))).unwrap();
    store.apply(dispatcher.dispatch(&Trigger::named("remove-0"))).unwrap();

    assert!(store.tasks().is_empty());
}
