//! Project service: CRUD, filters and team assignment.

use super::{Catalog, translate};
use crate::assignment::AssignmentTable;
use crate::domain::{EntityId, EntityKind, NewProject, Project};
use crate::error::{Error, Result};
use crate::storage::{IndexedStore, ProjectQueries};
use crate::validation;
use tracing::info;

/// Owns the project store, the project ID generator and the assignment rows.
#[derive(Debug, Clone)]
pub struct ProjectService {
    catalog: Catalog<Project>,
    assignments: AssignmentTable,
}

impl ProjectService {
    /// Create a service with the given initial project and assignment capacities
    pub fn new(capacity: usize, assignment_capacity: usize) -> Self {
        Self {
            catalog: Catalog::new(EntityKind::Project, capacity),
            assignments: AssignmentTable::with_capacity(assignment_capacity),
        }
    }

    /// Read access to the project store
    pub fn store(&self) -> &IndexedStore<Project> {
        self.catalog.store()
    }

    /// Create a project and assign it the next identifier.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidArgument` if the input fails validation
    /// - `Error::DuplicateIdentifier` if the derived slot is already taken
    pub fn create(&mut self, new_project: NewProject) -> Result<Project> {
        new_project.validate()?;
        let project = self
            .catalog
            .insert_with(|id| new_project.into_project(id))?;
        info!(id = %project.id, name = %project.name, "Created project");
        Ok(project)
    }

    /// Store a project at the slot its identifier encodes, bypassing the generator.
    ///
    /// # Errors
    ///
    /// See [`Catalog::seed`].
    pub fn seed(&mut self, project: Project) -> Result<()> {
        self.catalog.seed(project)
    }

    /// Look up a project.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` for malformed or unknown identifiers.
    pub fn get_by_id(&self, id: &str) -> Result<&Project> {
        self.catalog.get(id)
    }

    /// All projects in identifier order (empty when none exist)
    pub fn get_all(&self) -> Vec<&Project> {
        self.catalog.all()
    }

    /// All projects, failing with `Error::EmptyStore` when none exist.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyStore` if no project is stored.
    pub fn require_all(&self) -> Result<Vec<&Project>> {
        self.catalog.require_all()
    }

    /// Number of stored projects
    pub fn count(&self) -> usize {
        self.catalog.count()
    }

    /// Delete a project and release its assignment row.
    ///
    /// # Errors
    ///
    /// Returns `Error::EntityNotFound` if the project does not exist.
    pub fn delete_by_id(&mut self, id: &str) -> Result<Project> {
        let index = self.catalog.index_of(id)?;
        let project = self.catalog.delete(id)?;
        self.assignments.release(index);
        info!(id = %project.id, "Deleted project");
        Ok(project)
    }

    /// Change a project's budget.
    ///
    /// # Errors
    ///
    /// - `Error::EntityNotFound` if the project does not exist
    /// - `Error::InvalidArgument` if the budget is negative or not finite
    pub fn update_budget(&mut self, id: &str, budget: f64) -> Result<Project> {
        self.catalog.modify(id, |project| {
            if !validation::validate_budget(budget) {
                return Err(Error::invalid("budget", "must be a non-negative number"));
            }
            project.budget = budget;
            Ok(())
        })
    }

    /// Projects of the given type (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` if `project_type` is blank.
    pub fn filter_by_type(&self, project_type: &str) -> Result<Vec<&Project>> {
        self.store()
            .find_by_type(project_type)
            .map_err(|e| translate(EntityKind::Project, "", e))
    }

    /// Projects whose budget lies in `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidArgument` for NaN or negative bounds or `min > max`.
    pub fn filter_by_budget_range(&self, min: f64, max: f64) -> Result<Vec<&Project>> {
        self.store()
            .find_by_budget_range(min, max)
            .map_err(|e| translate(EntityKind::Project, "", e))
    }

    /// Assign a user to a project's team.
    ///
    /// # Errors
    ///
    /// - `Error::ProjectNotFound` if the project does not exist
    /// - `Error::DuplicateAssignment` if the user is already on the team
    /// - `Error::TeamFull` if the team is at capacity
    pub fn assign_user(&mut self, project_id: &str, user_id: EntityId) -> Result<()> {
        let index = self.project_index(project_id)?;
        self.assignments
            .assign_user(self.catalog.store(), index, user_id)
    }

    /// Remove a user from a project's team.
    ///
    /// # Errors
    ///
    /// - `Error::ProjectNotFound` if the project does not exist
    /// - `Error::NoSuchAssignment` if the user is not on the team
    pub fn remove_user(&mut self, project_id: &str, user_id: &EntityId) -> Result<()> {
        let index = self.project_index(project_id)?;
        self.assignments
            .remove_user(self.catalog.store(), index, user_id)
    }

    /// Users assigned to a project, in assignment order.
    ///
    /// # Errors
    ///
    /// Returns `Error::ProjectNotFound` if the project does not exist.
    pub fn list_assigned(&self, project_id: &str) -> Result<Vec<EntityId>> {
        let index = self.project_index(project_id)?;
        Ok(self.assignments.list_assigned(index))
    }

    /// Drop `user_id` from every team (used when the user is deleted)
    pub fn forget_user(&mut self, user_id: &EntityId) -> usize {
        self.assignments.remove_user_everywhere(user_id)
    }

    fn project_index(&self, project_id: &str) -> Result<usize> {
        self.catalog
            .index_of(project_id)
            .map_err(|_| Error::ProjectNotFound(project_id.to_string()))
    }
}

impl Default for ProjectService {
    fn default() -> Self {
        Self::new(
            EntityKind::Project.default_capacity(),
            crate::assignment::DEFAULT_ASSIGNMENT_CAPACITY,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProjectDetails;

    fn new_project(name: &str, team_size: usize, budget: f64) -> NewProject {
        NewProject {
            name: name.to_string(),
            description: format!("{name} description"),
            details: ProjectDetails::Software {
                language: "Rust".to_string(),
            },
            team_size,
            budget,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut service = ProjectService::default();
        let first = service.create(new_project("A", 2, 10.0)).unwrap();
        let second = service.create(new_project("B", 2, 10.0)).unwrap();

        assert_eq!(first.id.as_str(), "P0000");
        assert_eq!(second.id.as_str(), "P0001");
    }

    #[test]
    fn test_create_rejects_invalid_input_without_consuming_id() {
        let mut service = ProjectService::default();
        assert!(service.create(new_project("", 2, 10.0)).is_err());

        let project = service.create(new_project("A", 2, 10.0)).unwrap();
        assert_eq!(project.id.as_str(), "P0000");
    }

    #[test]
    fn test_delete_releases_assignments() {
        let mut service = ProjectService::default();
        let project = service.create(new_project("A", 2, 10.0)).unwrap();
        service
            .assign_user(project.id.as_str(), EntityId::new("U0000"))
            .unwrap();

        service.delete_by_id(project.id.as_str()).unwrap();

        assert!(matches!(
            service.list_assigned(project.id.as_str()),
            Err(Error::ProjectNotFound(_))
        ));

        // Re-seeding the slot starts with an empty team
        service.seed(project.clone()).unwrap();
        assert!(service.list_assigned(project.id.as_str()).unwrap().is_empty());
    }

    #[test]
    fn test_update_budget() {
        let mut service = ProjectService::default();
        let project = service.create(new_project("A", 2, 10.0)).unwrap();

        let updated = service.update_budget(project.id.as_str(), 99.5).unwrap();
        assert!((updated.budget - 99.5).abs() < f64::EPSILON);

        assert!(matches!(
            service.update_budget(project.id.as_str(), -3.0),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            service.update_budget("P0042", 1.0),
            Err(Error::EntityNotFound { .. })
        ));
    }

    #[test]
    fn test_assignment_on_unknown_or_malformed_project() {
        let mut service = ProjectService::default();

        for id in ["P0003", "bogus"] {
            assert!(matches!(
                service.assign_user(id, EntityId::new("U0000")),
                Err(Error::ProjectNotFound(_))
            ));
        }
    }

    #[test]
    fn test_filters_translate_bad_input() {
        let service = ProjectService::default();
        assert!(matches!(
            service.filter_by_type(""),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(matches!(
            service.filter_by_budget_range(5.0, 1.0),
            Err(Error::InvalidArgument { .. })
        ));
        assert!(service.filter_by_type("Software").unwrap().is_empty());
    }
}
