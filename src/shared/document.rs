/**
 * Team Workspace Document Model
 *
 * Every team owns exactly one workspace document: a set of named record
 * collections (tasks, projects, sales, ...) that clients read and replace
 * wholesale, one field at a time. Records are opaque JSON objects; the
 * server never interprets their contents.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One record inside a document field. Schema-free by design.
pub type Record = serde_json::Value;

/// The named top-level collections a team document is made of.
///
/// The wire (JSON/HTTP) uses camelCase names, the relational backend
/// uses snake_case column names. Both are derived here so the two can
/// never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentField {
    Tasks,
    Projects,
    Sales,
    TeamMembers,
    Meetings,
    Activities,
    Documents,
    MeetingMinutes,
    Leads,
    ServiceMaterials,
}

impl DocumentField {
    /// Every field, in the canonical column order of the `team_data` table.
    pub const ALL: [DocumentField; 10] = [
        DocumentField::Tasks,
        DocumentField::Projects,
        DocumentField::Sales,
        DocumentField::TeamMembers,
        DocumentField::Meetings,
        DocumentField::Activities,
        DocumentField::Documents,
        DocumentField::MeetingMinutes,
        DocumentField::Leads,
        DocumentField::ServiceMaterials,
    ];

    /// Name used in URLs and JSON payloads (camelCase).
    pub fn api_name(&self) -> &'static str {
        match self {
            DocumentField::Tasks => "tasks",
            DocumentField::Projects => "projects",
            DocumentField::Sales => "sales",
            DocumentField::TeamMembers => "teamMembers",
            DocumentField::Meetings => "meetings",
            DocumentField::Activities => "activities",
            DocumentField::Documents => "documents",
            DocumentField::MeetingMinutes => "meetingMinutes",
            DocumentField::Leads => "leads",
            DocumentField::ServiceMaterials => "serviceMaterials",
        }
    }

    /// Column name in the relational backend (snake_case).
    pub fn column(&self) -> &'static str {
        match self {
            DocumentField::Tasks => "tasks",
            DocumentField::Projects => "projects",
            DocumentField::Sales => "sales",
            DocumentField::TeamMembers => "team_members",
            DocumentField::Meetings => "meetings",
            DocumentField::Activities => "activities",
            DocumentField::Documents => "documents",
            DocumentField::MeetingMinutes => "meeting_minutes",
            DocumentField::Leads => "leads",
            DocumentField::ServiceMaterials => "service_materials",
        }
    }
}

impl fmt::Display for DocumentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_name())
    }
}

/// Error returned when a request names a field that does not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFieldError(pub String);

impl fmt::Display for UnknownFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown document field '{}'", self.0)
    }
}

impl std::error::Error for UnknownFieldError {}

impl FromStr for DocumentField {
    type Err = UnknownFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentField::ALL
            .into_iter()
            .find(|f| f.api_name() == s)
            .ok_or_else(|| UnknownFieldError(s.to_string()))
    }
}

/// The full workspace document of one team.
///
/// Invariant: an absent field and an empty field are indistinguishable to
/// readers, so `Default` (all collections empty) doubles as the canonical
/// "no document written yet" shape. `updated_at` advances on every write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamDocument {
    #[serde(default)]
    pub tasks: Vec<Record>,
    #[serde(default)]
    pub projects: Vec<Record>,
    #[serde(default)]
    pub sales: Vec<Record>,
    #[serde(default)]
    pub team_members: Vec<Record>,
    #[serde(default)]
    pub meetings: Vec<Record>,
    #[serde(default)]
    pub activities: Vec<Record>,
    #[serde(default)]
    pub documents: Vec<Record>,
    #[serde(default)]
    pub meeting_minutes: Vec<Record>,
    #[serde(default)]
    pub leads: Vec<Record>,
    #[serde(default)]
    pub service_materials: Vec<Record>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Default for TeamDocument {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            projects: Vec::new(),
            sales: Vec::new(),
            team_members: Vec::new(),
            meetings: Vec::new(),
            activities: Vec::new(),
            documents: Vec::new(),
            meeting_minutes: Vec::new(),
            leads: Vec::new(),
            service_materials: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

impl TeamDocument {
    /// Borrow the record sequence of one field.
    pub fn records(&self, field: DocumentField) -> &[Record] {
        match field {
            DocumentField::Tasks => &self.tasks,
            DocumentField::Projects => &self.projects,
            DocumentField::Sales => &self.sales,
            DocumentField::TeamMembers => &self.team_members,
            DocumentField::Meetings => &self.meetings,
            DocumentField::Activities => &self.activities,
            DocumentField::Documents => &self.documents,
            DocumentField::MeetingMinutes => &self.meeting_minutes,
            DocumentField::Leads => &self.leads,
            DocumentField::ServiceMaterials => &self.service_materials,
        }
    }

    /// Replace one field's record sequence, bumping `updated_at`.
    pub fn set_records(&mut self, field: DocumentField, records: Vec<Record>) {
        let slot = match field {
            DocumentField::Tasks => &mut self.tasks,
            DocumentField::Projects => &mut self.projects,
            DocumentField::Sales => &mut self.sales,
            DocumentField::TeamMembers => &mut self.team_members,
            DocumentField::Meetings => &mut self.meetings,
            DocumentField::Activities => &mut self.activities,
            DocumentField::Documents => &mut self.documents,
            DocumentField::MeetingMinutes => &mut self.meeting_minutes,
            DocumentField::Leads => &mut self.leads,
            DocumentField::ServiceMaterials => &mut self.service_materials,
        };
        *slot = records;
        self.updated_at = Utc::now();
    }
}
