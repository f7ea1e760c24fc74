//! Result display: a pure renderer over a possibly partial `ParsedResume`.

use std::fmt;

use crate::models::resume::non_empty;
use crate::models::ParsedResume;
use crate::routes::Route;

pub struct ResultView<'a> {
    record: Option<&'a ParsedResume>,
}

impl<'a> ResultView<'a> {
    pub fn new(record: Option<&'a ParsedResume>) -> Self {
        Self { record }
    }

    /// Outbound navigation offered under the record. Pure navigation; no data
    /// is passed along.
    pub fn actions(&self) -> [Route; 2] {
        [Route::TokenizedResume, Route::SimilarityScore]
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.chars().count()))
}

fn bullets<T: AsRef<str>>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for item in items {
        writeln!(f, "  - {}", item.as_ref())?;
    }
    Ok(())
}

impl fmt::Display for ResultView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = match self.record {
            Some(data) if !data.is_empty() => data,
            _ => return writeln!(f, "No parsed data available."),
        };

        writeln!(f, "Extracted Resume Data")?;

        heading(f, "Personal Information")?;
        writeln!(f, "Name: {}", non_empty(&data.name).unwrap_or(""))?;
        writeln!(f, "Email: {}", non_empty(&data.email).unwrap_or(""))?;
        writeln!(f, "Phone: {}", non_empty(&data.phone).unwrap_or(""))?;
        if !data.links.is_empty() {
            writeln!(f, "Links:")?;
            bullets(f, &data.links)?;
        }

        if !data.education.is_empty() {
            heading(f, "Education")?;
            for edu in &data.education {
                writeln!(f, "  - {}", edu.details.as_deref().unwrap_or(""))?;
            }
        }

        if !data.skills.is_empty() {
            heading(f, "Skills")?;
            writeln!(f, "{}", data.skills.join(", "))?;
        }

        if !data.experience.is_empty() {
            heading(f, "Experience")?;
            for exp in &data.experience {
                writeln!(f, "  - {}: {}", exp.role.as_deref().unwrap_or(""), exp.summary())?;
            }
        }

        if !data.projects.is_empty() {
            heading(f, "Projects")?;
            for project in &data.projects {
                let title = project.title.as_deref().unwrap_or("");
                match non_empty(&project.duration) {
                    Some(duration) => writeln!(f, "{title} ({duration})")?,
                    None => writeln!(f, "{title}")?,
                }
                if let Some(description) = non_empty(&project.description) {
                    writeln!(f, "    {description}")?;
                }
            }
        }

        if !data.certifications.is_empty() {
            heading(f, "Certifications")?;
            bullets(f, &data.certifications)?;
        }

        if !data.achievements.is_empty() {
            heading(f, "Achievements")?;
            bullets(f, &data.achievements)?;
        }

        writeln!(f)?;
        for route in self.actions() {
            writeln!(f, "[{}] resume-client {}", route.title(), route.command())?;
        }
        Ok(())
    }
}
