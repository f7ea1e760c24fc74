use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// One experience line. The service emits either `details` or `duration`
/// depending on whether it could split the role from its dates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl ExperienceEntry {
    /// Prefers `details`, falling back to `duration`.
    pub fn summary(&self) -> &str {
        non_empty(&self.details)
            .or_else(|| non_empty(&self.duration))
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Structured record returned by `GET /get-parsed-resume`.
/// Any field may be absent or null; the display skips empty sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub education: Vec<EducationEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub projects: Vec<ProjectEntry>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub certifications: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub achievements: Vec<String>,
}

impl ParsedResume {
    /// True when no field carries a non-empty value.
    pub fn is_empty(&self) -> bool {
        non_empty(&self.name).is_none()
            && non_empty(&self.email).is_none()
            && non_empty(&self.phone).is_none()
            && self.links.is_empty()
            && self.education.is_empty()
            && self.skills.is_empty()
            && self.experience.is_empty()
            && self.projects.is_empty()
            && self.certifications.is_empty()
            && self.achievements.is_empty()
    }
}

/// Response of `POST /submit`. The service echoes either the extracted PDF
/// text or the submitted text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAck {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub resume_text: Option<String>,
}

impl SubmitAck {
    pub fn text(&self) -> Option<&str> {
        non_empty(&self.extracted_text).or_else(|| non_empty(&self.resume_text))
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

pub(crate) fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_record_deserializes() {
        let json = r#"{
            "name": "Asha Rao",
            "email": "asha@example.com",
            "phone": "+91 98765 43210",
            "links": ["https://github.com/asha"],
            "education": [{"degree": "B.Tech", "details": "B.Tech CSE, 2021"}],
            "skills": ["Python", "SQL"],
            "experience": [
                {"role": "Intern", "duration": "May 2020 - Jul 2020"},
                {"role": "Unknown", "details": "Freelance web work"}
            ],
            "projects": [{"title": "Parser", "duration": null, "description": "Resume parser"}],
            "certifications": ["AWS certification"],
            "achievements": ["Finalist, Smart India Hackathon"]
        }"#;

        let record: ParsedResume = serde_json::from_str(json).unwrap();
        assert_eq!(record.name.as_deref(), Some("Asha Rao"));
        assert_eq!(record.skills, vec!["Python", "SQL"]);
        assert_eq!(record.experience[0].summary(), "May 2020 - Jul 2020");
        assert_eq!(record.experience[1].summary(), "Freelance web work");
        assert_eq!(record.projects[0].duration, None);
        assert!(!record.is_empty());
    }

    #[test]
    fn test_null_lists_become_empty() {
        let json = r#"{"name": "A", "links": null, "projects": null}"#;
        let record: ParsedResume = serde_json::from_str(json).unwrap();
        assert!(record.links.is_empty());
        assert!(record.projects.is_empty());
    }

    #[test]
    fn test_empty_object_is_empty_record() {
        let record: ParsedResume = serde_json::from_str("{}").unwrap();
        assert!(record.is_empty());
    }

    #[test]
    fn test_blank_strings_count_as_empty() {
        let record = ParsedResume {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(record.is_empty());
    }

    #[test]
    fn test_submit_ack_prefers_extracted_text() {
        let ack: SubmitAck = serde_json::from_str(
            r#"{"message": "PDF processed successfully", "extractedText": "Jane Doe"}"#,
        )
        .unwrap();
        assert_eq!(ack.text(), Some("Jane Doe"));

        let ack: SubmitAck =
            serde_json::from_str(r#"{"message": "Text received successfully", "resumeText": "Hi"}"#)
                .unwrap();
        assert_eq!(ack.text(), Some("Hi"));
    }
}
