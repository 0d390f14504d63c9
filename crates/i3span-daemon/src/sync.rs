//! Workspace event synchronizer
//!
//! Applies decoded `workspace` events to the store, keyed on the event's
//! change-kind tag. Data gaps in an event (a missing `current` object, an
//! id the store has never seen) are reported and skipped; they never
//! terminate the event loop and never leave the store half-mutated.

use tracing::{debug, warn};

use crate::i3_ipc::WorkspaceEvent;
use crate::store::{Workspace, WorkspaceStore};

/// Apply one decoded workspace event to the store
///
/// Tags other than `init`, `focus`, and `empty` leave the store untouched.
/// The caller renders after every decoded event regardless of which branch
/// ran.
pub fn apply_event(store: &mut WorkspaceStore, event: &WorkspaceEvent) {
    match event.change.as_str() {
        "init" => apply_init(store, event),
        "focus" => apply_focus(store, event),
        "empty" => apply_empty(store, event),
        other => {
            debug!(change = other, "Ignoring workspace change");
        }
    }
}

/// A workspace was created: insert it at its anchor position
///
/// The protocol reports no explicit anchor for a new workspace, so the
/// anchor resolves to the end of the store and a brand-new workspace is
/// appended.
fn apply_init(store: &mut WorkspaceStore, event: &WorkspaceEvent) {
    let Some(current) = event.current.as_ref() else {
        warn!("init event has no current workspace, skipping");
        return;
    };
    let (Some(num), Some(name)) = (current.num, current.name.as_deref()) else {
        warn!(num = ?current.num, name = ?current.name, "init event is missing num or name, skipping");
        return;
    };

    let position = store.anchor_index(num);
    let workspace = Workspace {
        num,
        name: name.to_string(),
        focused: false,
    };

    // anchor_index never exceeds len, so this cannot fail; a failure here
    // would be a logic fault worth hearing about, not a reason to die.
    if let Err(e) = store.insert(workspace, position) {
        warn!(num, position, error = %e, "Failed to insert new workspace");
    }
}

/// Focus moved: set the new workspace focused, clear the old one
fn apply_focus(store: &mut WorkspaceStore, event: &WorkspaceEvent) {
    let Some(num) = event.current.as_ref().and_then(|c| c.num) else {
        warn!("focus event has no current workspace number, skipping");
        return;
    };

    match store.find_by_num_mut(num) {
        Some(workspace) => workspace.focused = true,
        None => {
            // Data-consistency gap: i3 focused a workspace we never saw an
            // init for. Leave the store alone rather than guess.
            warn!(num, "focus event for a workspace not in the store");
            return;
        }
    }

    // The first focus event after startup has no old workspace; that is a
    // no-op, not a fault.
    if let Some(old_num) = event.old.as_ref().and_then(|o| o.num) {
        if let Some(old_workspace) = store.find_by_num_mut(old_num) {
            old_workspace.focused = false;
        } else {
            debug!(num = old_num, "Previously focused workspace not in the store");
        }
    }
}

/// A workspace was destroyed: remove it by its current position
fn apply_empty(store: &mut WorkspaceStore, event: &WorkspaceEvent) {
    let Some(num) = event.current.as_ref().and_then(|c| c.num) else {
        warn!("empty event has no current workspace number, skipping");
        return;
    };

    match store.find_by_num(num) {
        Some((position, _)) => {
            if let Err(e) = store.remove(position) {
                warn!(num, position, error = %e, "Failed to remove workspace");
            }
        }
        None => {
            warn!(num, "empty event for a workspace not in the store");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i3_ipc::WorkspaceRef;

    fn seeded_store() -> WorkspaceStore {
        let mut store = WorkspaceStore::new();
        store.push(Workspace {
            num: 1,
            name: "1".to_string(),
            focused: true,
        });
        store.push(Workspace {
            num: 2,
            name: "2".to_string(),
            focused: false,
        });
        store
    }

    fn current(num: i64, name: &str) -> Option<WorkspaceRef> {
        Some(WorkspaceRef {
            num: Some(num),
            name: Some(name.to_string()),
        })
    }

    fn event(change: &str, current: Option<WorkspaceRef>, old: Option<WorkspaceRef>) -> WorkspaceEvent {
        WorkspaceEvent {
            change: change.to_string(),
            current,
            old,
        }
    }

    fn nums(store: &WorkspaceStore) -> Vec<i64> {
        store.iter().map(|ws| ws.num).collect()
    }

    #[test]
    fn init_appends_a_brand_new_workspace() {
        let mut store = seeded_store();

        apply_event(&mut store, &event("init", current(5, "mail"), None));

        assert_eq!(nums(&store), vec![1, 2, 5]);
        let (_, added) = store.find_by_num(5).unwrap();
        assert_eq!(added.name, "mail");
        assert!(!added.focused);
    }

    #[test]
    fn focus_moves_the_focused_flag() {
        let mut store = seeded_store();

        apply_event(&mut store, &event("focus", current(2, "2"), current(1, "1")));

        assert!(!store.find_by_num(1).unwrap().1.focused);
        assert!(store.find_by_num(2).unwrap().1.focused);
    }

    #[test]
    fn focus_without_old_is_a_no_op_on_the_rest() {
        let mut store = seeded_store();

        apply_event(&mut store, &event("focus", current(2, "2"), None));

        // Workspace 1 keeps its flag; nothing to clear was named
        assert!(store.find_by_num(1).unwrap().1.focused);
        assert!(store.find_by_num(2).unwrap().1.focused);
    }

    #[test]
    fn focus_for_unknown_workspace_leaves_store_unchanged() {
        let mut store = seeded_store();

        apply_event(&mut store, &event("focus", current(9, "9"), current(1, "1")));

        // The old workspace is not touched when the current one is unknown
        assert!(store.find_by_num(1).unwrap().1.focused);
        assert_eq!(nums(&store), vec![1, 2]);
    }

    #[test]
    fn empty_removes_the_named_workspace() {
        let mut store = seeded_store();

        apply_event(&mut store, &event("empty", current(1, "1"), None));

        assert_eq!(nums(&store), vec![2]);
    }

    #[test]
    fn empty_for_unknown_workspace_is_a_no_op() {
        let mut store = seeded_store();

        apply_event(&mut store, &event("empty", current(42, "42"), None));

        assert_eq!(nums(&store), vec![1, 2]);
    }

    #[test]
    fn unknown_change_tag_mutates_nothing() {
        let mut store = seeded_store();

        apply_event(&mut store, &event("urgent", current(1, "1"), None));
        apply_event(&mut store, &event("rename", current(2, "z"), None));

        assert_eq!(nums(&store), vec![1, 2]);
        assert_eq!(store.find_by_num(2).unwrap().1.name, "2");
    }

    #[test]
    fn init_missing_fields_is_skipped() {
        let mut store = seeded_store();

        apply_event(&mut store, &event("init", None, None));
        apply_event(
            &mut store,
            &event(
                "init",
                Some(WorkspaceRef {
                    num: Some(7),
                    name: None,
                }),
                None,
            ),
        );

        assert_eq!(nums(&store), vec![1, 2]);
    }

    #[test]
    fn init_for_an_existing_num_inserts_at_its_position() {
        let mut store = seeded_store();

        // Anchor resolution finds the existing entry, so the duplicate goes
        // in at that position rather than the end
        apply_event(&mut store, &event("init", current(2, "2:again"), None));

        assert_eq!(nums(&store), vec![1, 2, 2]);
        assert_eq!(store.get(1).unwrap().name, "2:again");
    }

    #[test]
    fn bootstrap_then_event_scenario() {
        // Seed [1 focused, 2], then focus 2, then empty 1
        let mut store = seeded_store();

        apply_event(&mut store, &event("focus", current(2, "2"), current(1, "1")));
        apply_event(&mut store, &event("empty", current(1, "1"), None));

        assert_eq!(nums(&store), vec![2]);
        assert!(store.find_by_num(2).unwrap().1.focused);
    }
}
