//! Flattens a structured resume into the plain text an ATS would see.
//!
//! Order: personal block, PROFESSIONAL SUMMARY, SKILLS, EXPERIENCE, EDUCATION,
//! CERTIFICATIONS. Blocks are separated by a blank line; empty blocks are skipped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub graduation_date: String,
    pub gpa: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub date: String,
}

/// A resume as composed in the builder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuiltResume {
    pub personal: PersonalInfo,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<WorkEntry>,
    pub education: Vec<EducationEntry>,
    pub certifications: Vec<Certification>,
}

pub fn format_resume_text(resume: &BuiltResume) -> String {
    let mut blocks: Vec<String> = Vec::new();

    let personal = format_personal(&resume.personal);
    if !personal.is_empty() {
        blocks.push(personal);
    }

    let summary = resume.summary.trim();
    if !summary.is_empty() {
        blocks.push(format!("PROFESSIONAL SUMMARY\n{summary}"));
    }

    let skills = non_empty(resume.skills.iter().map(String::as_str)).join(", ");
    if !skills.is_empty() {
        blocks.push(format!("SKILLS\n{skills}"));
    }

    push_section(&mut blocks, "EXPERIENCE", &resume.experience, format_work);
    push_section(&mut blocks, "EDUCATION", &resume.education, format_education);
    push_section(
        &mut blocks,
        "CERTIFICATIONS",
        &resume.certifications,
        format_certification,
    );

    blocks.join("\n\n")
}

fn push_section<T>(blocks: &mut Vec<String>, header: &str, items: &[T], fmt: fn(&T) -> String) {
    let entries: Vec<String> = items
        .iter()
        .map(fmt)
        .filter(|e| !e.is_empty())
        .collect();
    if !entries.is_empty() {
        blocks.push(format!("{header}\n{}", entries.join("\n\n")));
    }
}

fn format_personal(p: &PersonalInfo) -> String {
    let contact = non_empty([p.email.as_str(), p.phone.as_str(), p.location.as_str()]).join(" | ");
    let links = non_empty([p.linkedin.as_str(), p.website.as_str()]).join(" | ");
    non_empty([p.name.as_str(), contact.as_str(), links.as_str()]).join("\n")
}

fn format_work(w: &WorkEntry) -> String {
    let mut heading = non_empty([w.title.as_str(), w.company.as_str()]).join(" - ");
    if !w.location.trim().is_empty() {
        heading.push_str(&format!(" ({})", w.location.trim()));
    }
    let dates = non_empty([w.start_date.as_str(), w.end_date.as_str()]).join(" - ");
    non_empty([heading.as_str(), dates.as_str(), w.description.as_str()]).join("\n")
}

fn format_education(e: &EducationEntry) -> String {
    let mut heading = non_empty([e.degree.as_str(), e.institution.as_str()]).join(" - ");
    if !e.location.trim().is_empty() {
        heading.push_str(&format!(" ({})", e.location.trim()));
    }
    let graduated = (!e.graduation_date.trim().is_empty())
        .then(|| format!("Graduated: {}", e.graduation_date.trim()))
        .unwrap_or_default();
    let gpa = (!e.gpa.trim().is_empty())
        .then(|| format!("GPA: {}", e.gpa.trim()))
        .unwrap_or_default();
    let details = non_empty([graduated.as_str(), gpa.as_str()]).join(" | ");
    non_empty([heading.as_str(), details.as_str()]).join("\n")
}

fn format_certification(c: &Certification) -> String {
    let mut line = non_empty([c.name.as_str(), c.issuer.as_str()]).join(" - ");
    if !c.date.trim().is_empty() {
        line.push_str(&format!(" ({})", c.date.trim()));
    }
    line
}

fn non_empty<'a>(parts: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BuiltResume {
        BuiltResume {
            personal: PersonalInfo {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: "555-0100".to_string(),
                location: "Berlin".to_string(),
                linkedin: "linkedin.com/in/janedoe".to_string(),
                website: String::new(),
            },
            summary: "Backend engineer with 5 years of Go.".to_string(),
            skills: vec!["Go".to_string(), " ".to_string(), "SQL".to_string()],
            experience: vec![WorkEntry {
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Remote".to_string(),
                start_date: "2020".to_string(),
                end_date: "Present".to_string(),
                description: "Built payment services in Go.".to_string(),
            }],
            education: vec![EducationEntry {
                degree: "BSc Computer Science".to_string(),
                institution: "TU Berlin".to_string(),
                location: String::new(),
                graduation_date: "2019".to_string(),
                gpa: String::new(),
            }],
            certifications: vec![],
        }
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let text = format_resume_text(&sample());
        let expected = "Jane Doe\n\
            jane@example.com | 555-0100 | Berlin\n\
            linkedin.com/in/janedoe\n\
            \n\
            PROFESSIONAL SUMMARY\n\
            Backend engineer with 5 years of Go.\n\
            \n\
            SKILLS\n\
            Go, SQL\n\
            \n\
            EXPERIENCE\n\
            Backend Engineer - Acme (Remote)\n\
            2020 - Present\n\
            Built payment services in Go.\n\
            \n\
            EDUCATION\n\
            BSc Computer Science - TU Berlin\n\
            Graduated: 2019";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_resume_formats_to_empty_string() {
        assert_eq!(format_resume_text(&BuiltResume::default()), "");
    }

    #[test]
    fn test_certifications_block() {
        let resume = BuiltResume {
            certifications: vec![
                Certification {
                    name: "CKA".to_string(),
                    issuer: "CNCF".to_string(),
                    date: "2023".to_string(),
                },
                Certification {
                    name: "AWS SAA".to_string(),
                    issuer: String::new(),
                    date: String::new(),
                },
            ],
            ..Default::default()
        };
        assert_eq!(
            format_resume_text(&resume),
            "CERTIFICATIONS\nCKA - CNCF (2023)\n\nAWS SAA"
        );
    }

    #[test]
    fn test_built_resume_deserializes_camel_case() {
        let resume: BuiltResume = serde_json::from_value(serde_json::json!({
            "personal": {"name": "Sam"},
            "experience": [{"title": "Dev", "startDate": "2021", "endDate": "2022"}]
        }))
        .unwrap();
        assert_eq!(resume.experience[0].start_date, "2021");
        assert!(resume.skills.is_empty());
    }
}
