//! Route groups for documentation.

use serde::{Serialize, Serializer};

use crate::routing::{PathPatterns, PatternError, Route, RouteDoc, RouteTable};

/// A named set of path patterns.
#[derive(Debug, Clone, Serialize)]
pub struct RouteGroup {
    name: String,
    #[serde(rename = "path_patterns", serialize_with = "serialize_patterns")]
    patterns: PathPatterns,
}

impl RouteGroup {
    pub fn new<I, S>(name: impl Into<String>, patterns: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            name: name.into(),
            patterns: PathPatterns::compile(patterns)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path_patterns(&self) -> &[String] {
        self.patterns.patterns()
    }

    /// True if any pattern of the group matches `path`.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.matches(path)
    }
}

fn serialize_patterns<S: Serializer>(patterns: &PathPatterns, serializer: S) -> Result<S::Ok, S::Error> {
    patterns.patterns().serialize(serializer)
}

/// A route together with its documentation descriptor.
#[derive(Debug, Clone, Copy)]
pub struct DocumentedRoute<'a> {
    pub route: &'a Route,
    pub doc: Option<&'a RouteDoc>,
}

/// Holds the documentation groups.
#[derive(Debug, Clone, Default)]
pub struct DocumentationGrouper {
    groups: Vec<RouteGroup>,
}

impl DocumentationGrouper {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two groups served by default: `api` and `ROOT`.
    pub fn with_default_groups() -> Result<Self, PatternError> {
        let mut grouper = Self::new();
        grouper.group("api", ["/api/**"])?;
        grouper.group("ROOT", ["/numbers", "/letters"])?;
        Ok(grouper)
    }

    /// Declare a group. Patterns are compiled here but not checked against
    /// any route.
    pub fn group<I, S>(&mut self, name: impl Into<String>, patterns: I) -> Result<&RouteGroup, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let group = RouteGroup::new(name, patterns)?;
        if self.find(group.name()).is_some() {
            tracing::warn!(group = %group.name(), "Documentation group declared twice; first one wins on lookup");
        }
        let index = self.groups.len();
        self.groups.push(group);
        Ok(&self.groups[index])
    }

    /// All groups in declaration order.
    pub fn list_groups(&self) -> &[RouteGroup] {
        &self.groups
    }

    pub fn find(&self, name: &str) -> Option<&RouteGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Routes of `table` that currently fall into `group`.
    pub fn members<'a>(&self, group: &RouteGroup, table: &'a RouteTable) -> Vec<DocumentedRoute<'a>> {
        table
            .routes()
            .filter(|route| group.matches(route.path()))
            .map(|route| DocumentedRoute {
                route,
                doc: table.doc(route.key()),
            })
            .collect()
    }

    /// Names of the groups `path` belongs to.
    pub fn groups_of(&self, path: &str) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|g| g.matches(path))
            .map(RouteGroup::name)
            .collect()
    }
}
