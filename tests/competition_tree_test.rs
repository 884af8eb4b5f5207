use chrono::Utc;
use uuid::Uuid;

use pingpong_league_backend::errors::CompetitionError;
use pingpong_league_backend::league::CompetitionTree;
use pingpong_league_backend::models::league::SubLeague;

fn sub_league(id: Uuid, league_id: Uuid, parent_id: Option<Uuid>) -> SubLeague {
    let now = Utc::now();
    SubLeague {
        id,
        name: format!("Group {}", id),
        league_id,
        parent_id,
        match_system_id: None,
        created_at: now,
        updated_at: now,
    }
}

/// root -> a -> b -> c, plus root -> d
fn chain() -> (CompetitionTree, [Uuid; 5]) {
    let league_id = Uuid::new_v4();
    let ids = [Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()];
    let [root, a, b, c, d] = ids;
    let records = vec![
        sub_league(root, league_id, None),
        sub_league(a, league_id, Some(root)),
        sub_league(b, league_id, Some(a)),
        sub_league(c, league_id, Some(b)),
        sub_league(d, league_id, Some(root)),
    ];
    (CompetitionTree::from_sub_leagues(&records), ids)
}

#[test]
fn descendant_ids_collects_every_level_below() {
    let (tree, [root, a, b, c, d]) = chain();

    let below_root = tree.descendant_ids(root);
    assert_eq!(4, below_root.len());
    for id in [a, b, c, d] {
        assert!(below_root.contains(&id));
    }
    assert!(!below_root.contains(&root));

    let below_a = tree.descendant_ids(a);
    assert_eq!(2, below_a.len());
    assert!(below_a.contains(&b) && below_a.contains(&c));
}

#[test]
fn leaf_and_unknown_ids_have_no_descendants() {
    let (tree, [_, _, _, c, _]) = chain();
    assert!(tree.descendant_ids(c).is_empty());
    assert!(tree.descendant_ids(Uuid::new_v4()).is_empty());
}

#[test]
fn set_parent_rejects_self() {
    let (mut tree, [_, a, ..]) = chain();
    let error = tree.set_parent(a, Some(a)).unwrap_err();
    assert!(matches!(error, CompetitionError::Cycle(_)));
    // Cycles are reported to clients as validation failures
    assert!(error.is_validation());
}

#[test]
fn set_parent_rejects_any_descendant() {
    let (mut tree, [root, a, b, c, d]) = chain();

    for descendant in [a, b, c, d] {
        let result = tree.set_parent(root, Some(descendant));
        assert!(matches!(result, Err(CompetitionError::Cycle(_))), "{} accepted", descendant);
    }
    // Rejected edits leave the index untouched
    assert_eq!(None, tree.parent_of(root));
    assert_eq!(Some(b), tree.parent_of(c));
}

#[test]
fn set_parent_accepts_sibling_and_moves_subtree() {
    let (mut tree, [root, a, b, c, d]) = chain();

    tree.set_parent(a, Some(d)).expect("Sibling should be a valid parent");

    assert_eq!(Some(d), tree.parent_of(a));
    assert!(tree.children_of(d).contains(&a));
    assert!(!tree.children_of(root).contains(&a));
    let below_d = tree.descendant_ids(d);
    assert!(below_d.contains(&a) && below_d.contains(&b) && below_d.contains(&c));

    // d is now an ancestor of a, so the reverse edge closes a loop
    assert!(matches!(tree.set_parent(d, Some(c)), Err(CompetitionError::Cycle(_))));
}

#[test]
fn set_parent_to_none_detaches_node() {
    let (mut tree, [root, a, b, ..]) = chain();
    tree.set_parent(a, None).expect("Detaching is always allowed");

    assert_eq!(None, tree.parent_of(a));
    assert!(!tree.descendant_ids(root).contains(&b));
    // The former ancestor may now hang below its old child
    tree.set_parent(root, Some(b)).expect("No loop once detached");
}

#[test]
fn parent_from_another_league_is_accepted() {
    let other = sub_league(Uuid::new_v4(), Uuid::new_v4(), None);
    let child = sub_league(Uuid::new_v4(), Uuid::new_v4(), None);
    let mut tree = CompetitionTree::from_sub_leagues(&[other.clone(), child.clone()]);

    tree.set_parent(child.id, Some(other.id)).expect("Cross-league parent is not checked");
    assert!(tree.descendant_ids(other.id).contains(&child.id));
}
