use serde::{Deserialize, Serialize};

use siteledger_core::{DomainError, DomainResult, Entity, ProjectId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

/// Construction project (the scope of every per-project rollup).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub client_name: Option<String>,
    pub status: ProjectStatus,
}

impl Entity for Project {
    type Id = ProjectId;
    const NAME: &'static str = "project";

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Project {
    pub fn new(name: impl Into<String>, client_name: Option<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("project name cannot be empty"));
        }
        Ok(Self {
            id: ProjectId::new(),
            name,
            client_name,
            status: ProjectStatus::Active,
        })
    }
}
