use std::collections::{HashMap, HashSet, VecDeque};
use uuid::Uuid;

use crate::db::Repository;
use crate::errors::{CompetitionError, CompetitionResult};
use crate::models::league::SubLeague;

/// In-memory index of the sub-league forest (`parent_id -> children`).
///
/// Built once per unit of work from every stored sub-league so that cycle
/// checks never issue one query per node. Parents may live in another
/// league, hence the index is not restricted to a single league.
#[derive(Debug, Default, Clone)]
pub struct CompetitionTree {
    parents: HashMap<Uuid, Option<Uuid>>,
    children: HashMap<Uuid, Vec<Uuid>>,
}

impl CompetitionTree {
    pub fn from_sub_leagues<'a>(sub_leagues: impl IntoIterator<Item = &'a SubLeague>) -> Self {
        let mut tree = Self::default();
        for sub_league in sub_leagues {
            tree.parents.insert(sub_league.id, sub_league.parent_id);
            if let Some(parent_id) = sub_league.parent_id {
                tree.children.entry(parent_id).or_default().push(sub_league.id);
            }
        }
        tree
    }

    pub async fn load(repo: &mut dyn Repository) -> CompetitionResult<Self> {
        let sub_leagues = repo.list_sub_leagues(None).await?;
        Ok(Self::from_sub_leagues(&sub_leagues))
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.parents.contains_key(&id)
    }

    pub fn parent_of(&self, id: Uuid) -> Option<Uuid> {
        self.parents.get(&id).copied().flatten()
    }

    pub fn children_of(&self, id: Uuid) -> &[Uuid] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every sub-league reachable downwards from `id`, excluding `id` itself.
    pub fn descendant_ids(&self, id: Uuid) -> HashSet<Uuid> {
        let mut seen = HashSet::new();
        let mut queue: VecDeque<Uuid> = self.children_of(id).iter().copied().collect();

        while let Some(next) = queue.pop_front() {
            // Stored data should already be acyclic; stop at the start node regardless.
            if next == id || !seen.insert(next) {
                continue;
            }
            queue.extend(self.children_of(next).iter().copied());
        }

        seen
    }

    /// Re-parents `id` under `candidate_parent_id` (or makes it a root).
    ///
    /// Rejects the edit when the candidate is `id` itself or one of its
    /// descendants. The candidate may belong to any league.
    pub fn set_parent(&mut self, id: Uuid, candidate_parent_id: Option<Uuid>) -> CompetitionResult<()> {
        if let Some(candidate) = candidate_parent_id {
            if candidate == id {
                return Err(CompetitionError::Cycle(format!(
                    "Sub-league {} cannot be its own parent",
                    id
                )));
            }
            if self.descendant_ids(id).contains(&candidate) {
                return Err(CompetitionError::Cycle(format!(
                    "Sub-league {} is a descendant of {} and cannot become its parent",
                    candidate, id
                )));
            }
        }

        if let Some(Some(old_parent)) = self.parents.get(&id).copied() {
            if let Some(siblings) = self.children.get_mut(&old_parent) {
                siblings.retain(|child| *child != id);
            }
        }
        self.parents.insert(id, candidate_parent_id);
        if let Some(parent) = candidate_parent_id {
            self.children.entry(parent).or_default().push(id);
        }

        Ok(())
    }
}
