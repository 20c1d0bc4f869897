//! ResumeData → DOCX strategy.
//!
//! Builds the document purely from structured fields, in fixed section
//! order: title, contact line, SUMMARY, EXPERIENCE, EDUCATION, SKILLS.
//! Missing fields become empty strings and missing collections are skipped —
//! generation must never fail because optional data is absent.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run};

use crate::export::ExportError;
use crate::models::resume::ResumeData;

// docx-rs sizes are half-points.
const TITLE_SIZE: usize = 44;
const HEADING_SIZE: usize = 28;

pub fn build_resume_docx(data: &ResumeData) -> Result<Vec<u8>, ExportError> {
    let info = &data.personal_info;

    let mut docx = Docx::new()
        .add_paragraph(
            Paragraph::new().add_run(
                Run::new()
                    .add_text(info.full_name.as_deref().unwrap_or("Your Name"))
                    .bold()
                    .size(TITLE_SIZE),
            ),
        )
        .add_paragraph(body(&format!(
            "{} | {} | {}",
            or_empty(&info.email),
            or_empty(&info.phone),
            or_empty(&info.location)
        )))
        .add_paragraph(heading("SUMMARY"))
        .add_paragraph(body(
            data.summary.as_deref().unwrap_or("Professional summary"),
        ))
        .add_paragraph(heading("EXPERIENCE"));

    for exp in &data.experience {
        docx = docx
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text(or_empty(&exp.position)).bold())
                    .add_run(Run::new().add_text(format!(" - {}", or_empty(&exp.company)))),
            )
            .add_paragraph(body(&format!(
                "{} - {}",
                or_empty(&exp.start_date),
                exp.end_date.as_deref().unwrap_or("Present")
            )))
            .add_paragraph(body(or_empty(&exp.description)));
    }

    docx = docx.add_paragraph(heading("EDUCATION"));
    for edu in &data.education {
        docx = docx
            .add_paragraph(
                Paragraph::new().add_run(
                    Run::new()
                        .add_text(format!(
                            "{} in {}",
                            or_empty(&edu.degree),
                            or_empty(&edu.field)
                        ))
                        .bold(),
                ),
            )
            .add_paragraph(body(&format!(
                "{} - {} to {}",
                or_empty(&edu.institution),
                or_empty(&edu.start_date),
                or_empty(&edu.end_date)
            )));
    }

    docx = docx.add_paragraph(heading("SKILLS"));
    for group in &data.skills {
        docx = docx.add_paragraph(body(&format!(
            "{}: {}",
            or_empty(&group.category),
            group.items.join(", ")
        )));
    }

    let mut cursor = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut cursor)
        .map_err(|e| ExportError::Serialization(format!("failed to pack document: {e}")))?;

    Ok(cursor.into_inner())
}

fn heading(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text).bold().size(HEADING_SIZE))
}

fn body(text: &str) -> Paragraph {
    Paragraph::new().add_run(Run::new().add_text(text))
}

fn or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use zip::ZipArchive;

    use super::*;
    use crate::models::resume::{ExperienceEntry, PersonalInfo, SkillGroup};

    /// Pulls word/document.xml out of the packed bytes (a DOCX is a zip).
    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }

    fn position_of(haystack: &str, needle: &str) -> usize {
        haystack
            .find(needle)
            .unwrap_or_else(|| panic!("missing '{needle}' in document"))
    }

    #[test]
    fn test_all_optional_fields_omitted_still_produces_document() {
        let bytes = build_resume_docx(&ResumeData::default()).unwrap();
        assert!(!bytes.is_empty());
        assert_eq!(&bytes[..2], b"PK", "DOCX must be a zip container");

        let xml = document_xml(&bytes);
        assert!(xml.contains("Your Name"));
        assert!(xml.contains("Professional summary"));
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let data = ResumeData {
            personal_info: PersonalInfo {
                full_name: Some("Jane Doe".to_string()),
                email: Some("jane@example.com".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let xml = document_xml(&build_resume_docx(&data).unwrap());

        let contact = position_of(&xml, "jane@example.com");
        let summary = position_of(&xml, "SUMMARY");
        let experience = position_of(&xml, "EXPERIENCE");
        let education = position_of(&xml, "EDUCATION");
        let skills = position_of(&xml, "SKILLS");

        assert!(contact < summary);
        assert!(summary < experience);
        assert!(experience < education);
        assert!(education < skills);
    }

    #[test]
    fn test_experience_entry_layout() {
        let data = ResumeData {
            experience: vec![ExperienceEntry {
                position: Some("Engineer".to_string()),
                company: Some("Acme".to_string()),
                start_date: Some("2020".to_string()),
                end_date: Some("Present".to_string()),
                description: Some("Built things".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        let xml = document_xml(&build_resume_docx(&data).unwrap());

        let position = position_of(&xml, "Engineer");
        let company = position_of(&xml, " - Acme");
        let dates = position_of(&xml, "2020 - Present");
        let description = position_of(&xml, "Built things");

        assert!(position < company);
        assert!(company < dates);
        assert!(dates < description);
        // The position run carries bold formatting.
        assert!(xml.contains("<w:b"));
    }

    #[test]
    fn test_missing_end_date_defaults_to_present() {
        let data = ResumeData {
            experience: vec![ExperienceEntry {
                position: Some("Engineer".to_string()),
                start_date: Some("2021".to_string()),
                end_date: None,
                ..Default::default()
            }],
            ..Default::default()
        };
        let xml = document_xml(&build_resume_docx(&data).unwrap());
        assert!(xml.contains("2021 - Present"));
    }

    #[test]
    fn test_skill_groups_render_as_category_lines() {
        let data = ResumeData {
            skills: vec![SkillGroup {
                category: Some("Backend".to_string()),
                items: vec!["Rust".to_string(), "Postgres".to_string()],
            }],
            ..Default::default()
        };
        let xml = document_xml(&build_resume_docx(&data).unwrap());
        assert!(xml.contains("Backend: Rust, Postgres"));
    }

    #[test]
    fn test_identical_input_gives_identical_bytes() {
        let data = ResumeData::default();
        assert_eq!(
            build_resume_docx(&data).unwrap(),
            build_resume_docx(&data).unwrap()
        );
    }
}
