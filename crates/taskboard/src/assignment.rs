//! Project/user assignment rows.
//!
//! The [`AssignmentTable`] shares the project store's index space: the row at
//! index `i` belongs to the project stored at slot `i`. A row is a fixed-size
//! array of user identifiers sized to the project's team size when the row is
//! first needed. Rows are kept packed: the first `size` entries are filled and
//! the rest are empty, with no gaps in between.

use crate::domain::{EntityId, EntityKind, Project};
use crate::error::{Error, Result};
use crate::id_generation::format_id;
use crate::storage::IndexedStore;
use tracing::{debug, info};

/// Default number of rows allocated up front
pub const DEFAULT_ASSIGNMENT_CAPACITY: usize = 10;

/// One project's packed list of assigned users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentRow {
    members: Box<[Option<EntityId>]>,
    size: usize,
}

impl AssignmentRow {
    /// Create an empty row that can hold `capacity` members (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            members: vec![None; capacity].into_boxed_slice(),
            size: 0,
        }
    }

    /// Maximum number of members
    pub fn capacity(&self) -> usize {
        self.members.len()
    }

    /// Number of filled entries
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the row has no members
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Whether the row has reached its capacity
    pub fn is_full(&self) -> bool {
        self.size == self.members.len()
    }

    /// Position of `user_id` within the packed region
    pub fn position(&self, user_id: &EntityId) -> Option<usize> {
        self.members[..self.size]
            .iter()
            .position(|member| member.as_ref() == Some(user_id))
    }

    /// The filled entries in insertion order
    pub fn members(&self) -> impl Iterator<Item = &EntityId> {
        self.members[..self.size].iter().flatten()
    }

    /// Append at the end of the packed region. Caller checks capacity.
    fn push(&mut self, user_id: EntityId) {
        self.members[self.size] = Some(user_id);
        self.size += 1;
    }

    /// Remove the entry at `position`, shifting later entries left.
    fn remove_at(&mut self, position: usize) -> Option<EntityId> {
        let removed = self.members[position].take();
        self.members[position..self.size].rotate_left(1);
        self.size -= 1;
        removed
    }
}

/// Assignment rows for every project, addressed by project slot index.
#[derive(Debug, Clone)]
pub struct AssignmentTable {
    rows: IndexedStore<AssignmentRow>,
}

impl AssignmentTable {
    /// Create a table with `capacity` unallocated rows
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            rows: IndexedStore::with_capacity(capacity),
        }
    }

    /// Assign `user_id` to the project at `project_index`.
    ///
    /// The row is allocated on first use, sized to `max(1, team_size)` of the
    /// project at that moment, and never resized afterwards.
    ///
    /// # Errors
    ///
    /// - `Error::ProjectNotFound` if no project is stored at the index
    /// - `Error::DuplicateAssignment` if the user is already in the row
    /// - `Error::TeamFull` if the row is at capacity
    pub fn assign_user(
        &mut self,
        projects: &IndexedStore<Project>,
        project_index: usize,
        user_id: EntityId,
    ) -> Result<()> {
        let project = projects
            .get(project_index)
            .map_err(|_| Error::ProjectNotFound(project_label(project_index)))?;

        if self.rows.get(project_index).is_err() {
            debug!(
                project_id = %project.id,
                team_size = project.team_size,
                "Allocating assignment row"
            );
            self.rows
                .update(project_index, AssignmentRow::new(project.team_size));
        }

        let row = self
            .rows
            .get_mut(project_index)
            .map_err(|_| Error::ProjectNotFound(project.id.to_string()))?;

        if row.position(&user_id).is_some() {
            return Err(Error::DuplicateAssignment {
                project_id: project.id.to_string(),
                user_id,
            });
        }
        if row.is_full() {
            return Err(Error::TeamFull {
                project_id: project.id.to_string(),
                team_size: row.capacity(),
            });
        }

        info!(project_id = %project.id, %user_id, "Assigned user to project");
        row.push(user_id);
        Ok(())
    }

    /// Remove `user_id` from the project at `project_index`.
    ///
    /// # Errors
    ///
    /// - `Error::ProjectNotFound` if no project is stored at the index
    /// - `Error::NoSuchAssignment` if the user is not in the row
    pub fn remove_user(
        &mut self,
        projects: &IndexedStore<Project>,
        project_index: usize,
        user_id: &EntityId,
    ) -> Result<()> {
        let project = projects
            .get(project_index)
            .map_err(|_| Error::ProjectNotFound(project_label(project_index)))?;

        let not_assigned = || Error::NoSuchAssignment {
            project_id: project.id.to_string(),
            user_id: user_id.clone(),
        };

        let row = self
            .rows
            .get_mut(project_index)
            .map_err(|_| not_assigned())?;
        let position = row.position(user_id).ok_or_else(not_assigned)?;

        row.remove_at(position);
        info!(project_id = %project.id, %user_id, "Removed user from project");
        Ok(())
    }

    /// Users assigned to the project at `project_index`, in assignment order.
    ///
    /// Returns an empty vector when no row has been allocated.
    pub fn list_assigned(&self, project_index: usize) -> Vec<EntityId> {
        self.rows
            .get(project_index)
            .map(|row| row.members().cloned().collect())
            .unwrap_or_default()
    }

    /// The row for `project_index`, if one has been allocated
    pub fn row(&self, project_index: usize) -> Option<&AssignmentRow> {
        self.rows.get(project_index).ok()
    }

    /// Drop the row for `project_index` (used when the project is deleted)
    pub fn release(&mut self, project_index: usize) -> Option<AssignmentRow> {
        self.rows.remove(project_index).ok()
    }

    /// Remove `user_id` from every row that contains it; returns how many rows changed
    pub fn remove_user_everywhere(&mut self, user_id: &EntityId) -> usize {
        let indices: Vec<usize> = self
            .rows
            .iter()
            .filter(|(_, row)| row.position(user_id).is_some())
            .map(|(index, _)| index)
            .collect();

        for &index in &indices {
            if let Ok(row) = self.rows.get_mut(index)
                && let Some(position) = row.position(user_id)
            {
                row.remove_at(position);
            }
        }
        indices.len()
    }
}

impl Default for AssignmentTable {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_ASSIGNMENT_CAPACITY)
    }
}

fn project_label(index: usize) -> String {
    format_id(EntityKind::Project, index).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectDetails;
    use proptest::prelude::*;

    fn projects_with_team(team_size: usize) -> IndexedStore<Project> {
        let mut projects = IndexedStore::with_capacity(4);
        projects
            .add(
                Project {
                    id: EntityId::new("P0000"),
                    name: "Alpha".to_string(),
                    description: String::new(),
                    details: ProjectDetails::Software {
                        language: "Rust".to_string(),
                    },
                    team_size,
                    budget: 0.0,
                },
                0,
            )
            .unwrap();
        projects
    }

    fn uid(s: &str) -> EntityId {
        EntityId::new(s)
    }

    #[test]
    fn test_team_of_two_scenario() {
        let projects = projects_with_team(2);
        let mut table = AssignmentTable::default();

        table.assign_user(&projects, 0, uid("U1")).unwrap();
        assert_eq!(table.row(0).unwrap().len(), 1);

        assert!(matches!(
            table.assign_user(&projects, 0, uid("U1")),
            Err(Error::DuplicateAssignment { .. })
        ));

        table.assign_user(&projects, 0, uid("U2")).unwrap();
        assert_eq!(table.row(0).unwrap().len(), 2);

        assert!(matches!(
            table.assign_user(&projects, 0, uid("U3")),
            Err(Error::TeamFull { team_size: 2, .. })
        ));

        table.remove_user(&projects, 0, &uid("U1")).unwrap();
        assert_eq!(table.list_assigned(0), vec![uid("U2")]);
    }

    #[test]
    fn test_missing_project() {
        let projects = projects_with_team(2);
        let mut table = AssignmentTable::default();

        let err = table.assign_user(&projects, 3, uid("U1")).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(ref id) if id == "P0003"));

        let err = table.remove_user(&projects, 3, &uid("U1")).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(_)));

        // Out of the store's range entirely
        let err = table.assign_user(&projects, 500, uid("U1")).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(_)));
    }

    #[test]
    fn test_remove_without_row_or_match() {
        let projects = projects_with_team(3);
        let mut table = AssignmentTable::default();

        assert!(matches!(
            table.remove_user(&projects, 0, &uid("U1")),
            Err(Error::NoSuchAssignment { .. })
        ));

        table.assign_user(&projects, 0, uid("U1")).unwrap();
        assert!(matches!(
            table.remove_user(&projects, 0, &uid("U9")),
            Err(Error::NoSuchAssignment { .. })
        ));
        // Same error on repeat
        assert!(matches!(
            table.remove_user(&projects, 0, &uid("U9")),
            Err(Error::NoSuchAssignment { .. })
        ));
    }

    #[test]
    fn test_list_without_row_is_empty() {
        let table = AssignmentTable::default();
        assert!(table.list_assigned(0).is_empty());
        assert!(table.list_assigned(1000).is_empty());
    }

    #[test]
    fn test_zero_team_size_gets_one_slot() {
        let projects = projects_with_team(0);
        let mut table = AssignmentTable::default();

        table.assign_user(&projects, 0, uid("U1")).unwrap();
        assert!(matches!(
            table.assign_user(&projects, 0, uid("U2")),
            Err(Error::TeamFull { team_size: 1, .. })
        ));
    }

    #[test]
    fn test_row_is_not_resized_after_allocation() {
        let mut projects = projects_with_team(1);
        let mut table = AssignmentTable::default();
        table.assign_user(&projects, 0, uid("U1")).unwrap();

        let mut grown = projects.get(0).unwrap().clone();
        grown.team_size = 5;
        projects.update(0, grown);

        assert!(matches!(
            table.assign_user(&projects, 0, uid("U2")),
            Err(Error::TeamFull { team_size: 1, .. })
        ));
    }

    #[test]
    fn test_rows_grow_with_project_index() {
        let mut projects = IndexedStore::with_capacity(1);
        let mut project = projects_with_team(2).get(0).unwrap().clone();
        project.id = EntityId::new("P0040");
        projects.add(project, 40).unwrap();

        let mut table = AssignmentTable::with_capacity(1);
        table.assign_user(&projects, 40, uid("U1")).unwrap();
        assert_eq!(table.list_assigned(40), vec![uid("U1")]);
    }

    #[test]
    fn test_release_and_remove_everywhere() {
        let mut projects = projects_with_team(3);
        let mut second = projects.get(0).unwrap().clone();
        second.id = EntityId::new("P0001");
        projects.add(second, 1).unwrap();

        let mut table = AssignmentTable::default();
        table.assign_user(&projects, 0, uid("U1")).unwrap();
        table.assign_user(&projects, 0, uid("U2")).unwrap();
        table.assign_user(&projects, 1, uid("U1")).unwrap();

        assert_eq!(table.remove_user_everywhere(&uid("U1")), 2);
        assert_eq!(table.list_assigned(0), vec![uid("U2")]);
        assert!(table.list_assigned(1).is_empty());

        assert!(table.release(0).is_some());
        assert!(table.list_assigned(0).is_empty());
        assert!(table.release(0).is_none());
    }

    #[derive(Debug, Clone)]
    enum Op {
        Assign(u8),
        Remove(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0u8..8).prop_map(Op::Assign),
            (0u8..8).prop_map(Op::Remove),
        ]
    }

    proptest! {
        #[test]
        fn prop_rows_stay_packed_and_ordered(
            team_size in 1usize..6,
            ops in prop::collection::vec(op_strategy(), 0..40),
        ) {
            let projects = projects_with_team(team_size);
            let mut table = AssignmentTable::default();
            let mut model: Vec<EntityId> = Vec::new();

            for op in ops {
                match op {
                    Op::Assign(n) => {
                        let user = uid(&format!("U{n}"));
                        let result = table.assign_user(&projects, 0, user.clone());
                        if model.contains(&user) {
                            let is_duplicate = matches!(result, Err(Error::DuplicateAssignment { .. }));
                            prop_assert!(is_duplicate);
                        } else if model.len() == team_size {
                            let is_full = matches!(result, Err(Error::TeamFull { .. }));
                            prop_assert!(is_full);
                        } else {
                            prop_assert!(result.is_ok());
                            model.push(user);
                        }
                    }
                    Op::Remove(n) => {
                        let user = uid(&format!("U{n}"));
                        let result = table.remove_user(&projects, 0, &user);
                        if let Some(position) = model.iter().position(|m| *m == user) {
                            prop_assert!(result.is_ok());
                            model.remove(position);
                        } else {
                            let is_missing = matches!(result, Err(Error::NoSuchAssignment { .. }));
                            prop_assert!(is_missing);
                        }
                    }
                }

                prop_assert_eq!(table.list_assigned(0), model.clone());
                if let Some(row) = table.row(0) {
                    prop_assert_eq!(row.len(), model.len());
                    prop_assert!(row.len() <= row.capacity());
                }
            }
        }
    }
}
