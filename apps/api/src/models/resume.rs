//! Resume data model — the structured record that DOCX export consumes.
//!
//! Every leaf field is optional and every collection defaults to empty:
//! export must never fail because the editor left a section blank. Wire
//! names are camelCase to match what the frontend already sends.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillGroup>,
    pub projects: Vec<Project>,
    pub certifications: Vec<Certification>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub company: Option<String>,
    pub position: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub current: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SkillGroup {
    pub category: Option<String>,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: Option<String>,
    pub description: Option<String>,
    pub technologies: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Certification {
    pub name: Option<String>,
    pub issuer: Option<String>,
    pub date: Option<String>,
    pub credential_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_deserializes_to_defaults() {
        let data: ResumeData = serde_json::from_value(json!({})).unwrap();
        assert!(data.personal_info.full_name.is_none());
        assert!(data.summary.is_none());
        assert!(data.experience.is_empty());
        assert!(data.skills.is_empty());
    }

    #[test]
    fn test_camel_case_wire_names() {
        let data: ResumeData = serde_json::from_value(json!({
            "personalInfo": { "fullName": "Jane Doe", "email": "jane@example.com" },
            "experience": [{
                "position": "Engineer",
                "company": "Acme",
                "startDate": "2020",
                "endDate": "Present",
                "description": "Built things"
            }]
        }))
        .unwrap();

        assert_eq!(data.personal_info.full_name.as_deref(), Some("Jane Doe"));
        assert_eq!(data.experience.len(), 1);
        assert_eq!(data.experience[0].start_date.as_deref(), Some("2020"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        // Older frontend builds send extra keys; they must not break export.
        let data: ResumeData = serde_json::from_value(json!({
            "summary": "Seasoned engineer",
            "legacyField": true
        }))
        .unwrap();
        assert_eq!(data.summary.as_deref(), Some("Seasoned engineer"));
    }
}
