//! Property-based invariant tests for the board engine.
//!
//! Verifies:
//! 1. Reorder keeps a group's members and leaves other groups untouched
//! 2. Transfer leaves the item in exactly the target group
//! 3. After any operation sequence, every non-pending group holds items and
//!    every item points at a known group
//! 4. Generated ids never repeat
//! 5. Repeated transfers and hovers with the same arguments are no-ops

use std::collections::HashSet;

use cardgroup_engine::{
    BoardMessage, DragSession, FixedHues, GroupManager, HoverOutcome, RandomHues, RandomIds,
    SequentialIds, Transfer,
};
use cardgroup_model::{GroupId, ItemId};
use proptest::prelude::*;

type TestManager = GroupManager<SequentialIds, FixedHues>;

/// An operation whose targets are picked by index into the live board.
#[derive(Debug, Clone)]
enum Op {
    CreateGroup,
    CreateNewItem,
    CreateInGroup(usize),
    Move(usize, usize, usize),
    Transfer(usize, usize),
    Ungroup(usize),
    Remove(usize),
}

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::CreateGroup),
        Just(Op::CreateNewItem),
        any::<usize>().prop_map(Op::CreateInGroup),
        (any::<usize>(), 0usize..8, 0usize..8).prop_map(|(g, d, h)| Op::Move(g, d, h)),
        (any::<usize>(), any::<usize>()).prop_map(|(i, g)| Op::Transfer(i, g)),
        any::<usize>().prop_map(Op::Ungroup),
        any::<usize>().prop_map(Op::Remove),
    ]
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arb_op(), 1..40)
}

fn fresh() -> TestManager {
    GroupManager::with_generators(SequentialIds::new("p"), FixedHues::new(vec![10, 200]))
}

fn pick_group(m: &TestManager, n: usize) -> Option<GroupId> {
    let groups = m.groups();
    (!groups.is_empty()).then(|| groups[n % groups.len()].id.clone())
}

fn pick_item(m: &TestManager, n: usize) -> Option<ItemId> {
    let items = m.items();
    (!items.is_empty()).then(|| items[n % items.len()].id.clone())
}

fn to_message(m: &TestManager, op: &Op) -> Option<BoardMessage> {
    Some(match *op {
        Op::CreateGroup => BoardMessage::CreateGroup,
        Op::CreateNewItem => BoardMessage::CreateNewItem,
        Op::CreateInGroup(g) => BoardMessage::CreateItemInGroup {
            group: pick_group(m, g)?,
        },
        Op::Move(g, drag_index, hover_index) => BoardMessage::MoveItemInGroup {
            group: pick_group(m, g)?,
            drag_index,
            hover_index,
        },
        Op::Transfer(i, g) => BoardMessage::TransferItem {
            item: pick_item(m, i)?,
            target: pick_group(m, g)?,
        },
        Op::Ungroup(i) => BoardMessage::CreateSingleItemGroup {
            item: pick_item(m, i)?,
        },
        Op::Remove(i) => BoardMessage::RemoveItem {
            item: pick_item(m, i)?,
        },
    })
}

fn run(ops: &[Op]) -> TestManager {
    let mut m = fresh();
    for op in ops {
        if let Some(msg) = to_message(&m, op) {
            // Out-of-range reorders are expected to fail without side effects.
            let _ = m.apply(msg);
        }
    }
    m
}

fn member_ids(m: &TestManager, group: &str) -> Vec<ItemId> {
    m.items_in(group).iter().map(|item| item.id.clone()).collect()
}

proptest! {
    #[test]
    fn board_stays_consistent(ops in arb_ops()) {
        let m = run(&ops);
        let known: HashSet<&GroupId> = m.groups().iter().map(|g| &g.id).collect();
        for item in m.items() {
            prop_assert!(known.contains(&item.group_id));
        }
        let pending: HashSet<&GroupId> = m.pending_groups().iter().map(|g| &g.id).collect();
        for group in m.groups() {
            let populated = !m.items_in(group.id.as_str()).is_empty();
            prop_assert!(populated != pending.contains(&group.id));
        }
        prop_assert_eq!(m.active_groups().len() + pending.len(), m.groups().len());
    }

    #[test]
    fn reorder_preserves_membership(ops in arb_ops(), g in any::<usize>(), drag in 0usize..6, hover in 0usize..6) {
        let mut m = run(&ops);
        let Some(group) = pick_group(&m, g) else { return Ok(()) };
        let before = member_ids(&m, group.as_str());
        if before.is_empty() {
            return Ok(());
        }
        let drag = drag % before.len();
        let others: Vec<_> = m
            .items()
            .iter()
            .filter(|item| item.group_id != group)
            .cloned()
            .collect();

        m.move_item_in_group(&group, drag, hover).expect("in range");

        let after = member_ids(&m, group.as_str());
        let mut sorted_before = before.clone();
        let mut sorted_after = after.clone();
        sorted_before.sort();
        sorted_after.sort();
        prop_assert_eq!(sorted_before, sorted_after);
        let to = hover.min(before.len() - 1);
        prop_assert_eq!(&after[to], &before[drag]);
        let others_after: Vec<_> = m
            .items()
            .iter()
            .filter(|item| item.group_id != group)
            .cloned()
            .collect();
        prop_assert_eq!(others, others_after);
    }

    #[test]
    fn transfer_is_exclusive(ops in arb_ops(), i in any::<usize>(), g in any::<usize>()) {
        let mut m = run(&ops);
        let (Some(item), Some(target)) = (pick_item(&m, i), pick_group(&m, g)) else {
            return Ok(());
        };
        let total = m.items().len();

        let outcome = m.transfer_item(&item, &target).expect("known ids");

        prop_assert_eq!(m.items().len(), total);
        let holders: Vec<_> = m
            .groups()
            .iter()
            .filter(|group| member_ids(&m, group.id.as_str()).contains(&item))
            .map(|group| group.id.clone())
            .collect();
        prop_assert_eq!(holders, vec![target.clone()]);
        if let Transfer::Moved { .. } = outcome {
            let tail = member_ids(&m, target.as_str());
            prop_assert_eq!(tail.last(), Some(&item));
        }
    }

    #[test]
    fn repeated_transfer_is_a_no_op(ops in arb_ops(), i in any::<usize>(), g in any::<usize>(), repeats in 1usize..5) {
        let mut m = run(&ops);
        let (Some(item), Some(target)) = (pick_item(&m, i), pick_group(&m, g)) else {
            return Ok(());
        };
        m.transfer_item(&item, &target).expect("first transfer");
        let settled = m.board();
        for _ in 0..repeats {
            m.transfer_item(&item, &target).expect("repeat");
        }
        prop_assert_eq!(m.board(), settled);
    }

    #[test]
    fn repeated_hover_is_a_no_op(ops in arb_ops(), i in any::<usize>(), g in any::<usize>(), repeats in 1usize..5) {
        let mut m = run(&ops);
        let (Some(item), Some(target)) = (pick_item(&m, i), pick_group(&m, g)) else {
            return Ok(());
        };
        let mut session = DragSession::start(&m, &item).expect("start");
        session.hover_group(&mut m, &target).expect("first hover");
        let settled = m.board();
        for _ in 0..repeats {
            let outcome = session.hover_group(&mut m, &target).expect("repeat hover");
            prop_assert!(!outcome.changed());
            prop_assert!(matches!(outcome, HoverOutcome::Repeated | HoverOutcome::SameTarget));
        }
        prop_assert_eq!(m.board(), settled);
    }
}

#[test]
fn ten_thousand_generated_ids_are_unique() {
    let mut m = GroupManager::with_generators(RandomIds, RandomHues);
    let mut seen = HashSet::new();
    for n in 0..10_000 {
        if n % 5 == 0 {
            let created = m.create_new_item();
            assert!(seen.insert(created.item.to_string()));
            assert!(seen.insert(created.group.to_string()));
        } else {
            assert!(seen.insert(m.create_group().to_string()));
        }
    }
    assert_eq!(seen.len(), 12_000);
}
