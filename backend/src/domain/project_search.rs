//! Search criteria for project listings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Project, UserId};

/// Which project field a search value is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProjectFilterType {
    /// Title, recruitment positions, or tech stacks.
    #[default]
    All,
    /// Title only.
    Title,
    /// Recruitment position names.
    Position,
    /// Tech stack tags.
    TechStack,
}

impl fmt::Display for ProjectFilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::All => "all",
            Self::Title => "title",
            Self::Position => "position",
            Self::TechStack => "techStack",
        };
        f.write_str(label)
    }
}

/// Raised when a filter type string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown project filter type: {0}")]
pub struct ParseProjectFilterTypeError(pub String);

impl FromStr for ProjectFilterType {
    type Err = ParseProjectFilterTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "title" => Ok(Self::Title),
            "position" => Ok(Self::Position),
            "techstack" | "tech_stack" => Ok(Self::TechStack),
            _ => Err(ParseProjectFilterTypeError(s.to_owned())),
        }
    }
}

/// Criteria applied by [`crate::domain::ports::ProjectRepository::search`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSearchFilter {
    pub completed: bool,
    pub filter_type: ProjectFilterType,
    /// Blank or absent values match every project.
    pub filter_value: Option<String>,
    /// Restrict results to projects owned by this user.
    pub owner: Option<UserId>,
}

impl ProjectSearchFilter {
    /// Whether `project` satisfies every criterion.
    ///
    /// # Examples
    /// ```
    /// use project_hub::domain::{ProjectFilterType, ProjectSearchFilter};
    ///
    /// let filter = ProjectSearchFilter {
    ///     filter_type: ProjectFilterType::Title,
    ///     filter_value: Some("mapper".to_owned()),
    ///     ..ProjectSearchFilter::default()
    /// };
    /// assert!(!filter.completed);
    /// ```
    pub fn matches(&self, project: &Project) -> bool {
        if project.completed != self.completed {
            return false;
        }
        if self.owner.is_some_and(|owner| owner != project.owner_id) {
            return false;
        }
        let Some(needle) = self
            .filter_value
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_lowercase)
        else {
            return true;
        };

        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
        let title = || contains(&project.title);
        let position = || {
            project
                .recruitments
                .iter()
                .any(|r| contains(&r.position_name))
        };
        let tech_stack = || project.tech_stacks.iter().any(|t| contains(t));

        match self.filter_type {
            ProjectFilterType::All => title() || position() || tech_stack(),
            ProjectFilterType::Title => title(),
            ProjectFilterType::Position => position(),
            ProjectFilterType::TechStack => tech_stack(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{ProjectContent, Recruitment};
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn project() -> Project {
        let now = Utc::now();
        Project::new(
            UserId::random(),
            ProjectContent {
                title: "Trail Mapper".to_owned(),
                start_date: now,
                end_date: now,
                thumbnail: None,
                tech_stacks: vec!["Rust".to_owned(), "PostGIS".to_owned()],
                recruitments: vec![Recruitment {
                    position_name: "Backend".to_owned(),
                    requested_count: 1,
                }],
                description: String::new(),
            },
            now,
        )
        .expect("valid project")
    }

    fn filter(filter_type: ProjectFilterType, value: &str) -> ProjectSearchFilter {
        ProjectSearchFilter {
            filter_type,
            filter_value: Some(value.to_owned()),
            ..ProjectSearchFilter::default()
        }
    }

    #[rstest]
    #[case(ProjectFilterType::Title, "mapper", true)]
    #[case(ProjectFilterType::Title, "backend", false)]
    #[case(ProjectFilterType::Position, "BACK", true)]
    #[case(ProjectFilterType::TechStack, "postgis", true)]
    #[case(ProjectFilterType::TechStack, "go", false)]
    #[case(ProjectFilterType::All, "rust", true)]
    #[case(ProjectFilterType::All, "", true)]
    fn matches_by_filter_type(
        project: Project,
        #[case] filter_type: ProjectFilterType,
        #[case] value: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(filter(filter_type, value).matches(&project), expected);
    }

    #[rstest]
    fn completed_flag_must_agree(project: Project) {
        let wants_completed = ProjectSearchFilter {
            completed: true,
            ..ProjectSearchFilter::default()
        };
        assert!(!wants_completed.matches(&project));
    }

    #[rstest]
    fn owner_restriction_applies(project: Project) {
        let mine = ProjectSearchFilter {
            owner: Some(project.owner_id),
            ..ProjectSearchFilter::default()
        };
        let theirs = ProjectSearchFilter {
            owner: Some(UserId::random()),
            ..ProjectSearchFilter::default()
        };
        assert!(mine.matches(&project));
        assert!(!theirs.matches(&project));
    }

    #[rstest]
    #[case("techStack", ProjectFilterType::TechStack)]
    #[case("TITLE", ProjectFilterType::Title)]
    fn parses_filter_type(#[case] raw: &str, #[case] expected: ProjectFilterType) {
        assert_eq!(raw.parse::<ProjectFilterType>().expect("known"), expected);
    }
}
