use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::foundation::error::{FieldError, ScrollkitError, ScrollkitResult};

/// A typed document bound to one collection.
pub trait Record: Serialize + DeserializeOwned {
    /// Collection the record lives in.
    const COLLECTION: &'static str;

    /// Field-level checks run before every write.
    fn validate(&self) -> ScrollkitResult<()>;
}

fn require(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    }
}

fn finish(errors: Vec<FieldError>) -> ScrollkitResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ScrollkitError::InvalidForm(errors))
    }
}

/// Portfolio project card.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Project {
    /// Title.
    pub title: String,
    /// Short description.
    pub description: String,
    /// Cover image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Technology tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Deployed site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// Source repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,
    /// Pinned to the top of the gallery.
    #[serde(default)]
    pub featured: bool,
    /// Display order.
    #[serde(default)]
    pub order: i64,
}

impl Record for Project {
    const COLLECTION: &'static str = "projects";

    fn validate(&self) -> ScrollkitResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "title", &self.title);
        require(&mut errors, "description", &self.description);
        for (field, url) in [("live_url", &self.live_url), ("repo_url", &self.repo_url)] {
            if let Some(url) = url
                && !(url.starts_with("https://") || url.starts_with("http://"))
            {
                errors.push(FieldError::new(field, "must be an http(s) URL"));
            }
        }
        finish(errors)
    }
}

/// One skill with a proficiency bar.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Skill {
    /// Skill name.
    pub name: String,
    /// Grouping ("frontend", "tooling", ...).
    #[serde(default)]
    pub category: String,
    /// Proficiency percentage, 0-100.
    pub level: u8,
    /// Display order.
    #[serde(default)]
    pub order: i64,
}

impl Record for Skill {
    const COLLECTION: &'static str = "skills";

    fn validate(&self) -> ScrollkitResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "name", &self.name);
        if self.level > 100 {
            errors.push(FieldError::new("level", "level must be between 0 and 100"));
        }
        finish(errors)
    }
}

/// Timeline entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Experience {
    /// Employer or institution.
    pub company: String,
    /// Role or degree.
    pub role: String,
    /// Start, as displayed (`"2021-03"`).
    pub start: String,
    /// End, `None` while current.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Bullet points.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// Display order.
    #[serde(default)]
    pub order: i64,
}

impl Record for Experience {
    const COLLECTION: &'static str = "experience";

    fn validate(&self) -> ScrollkitResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "company", &self.company);
        require(&mut errors, "role", &self.role);
        require(&mut errors, "start", &self.start);
        // Same-format dates compare lexically ("2020-01" < "2021-06").
        if let Some(end) = &self.end
            && end.as_str() < self.start.as_str()
        {
            errors.push(FieldError::new("end", "end must not be before start"));
        }
        finish(errors)
    }
}

/// Quote for the testimonials carousel.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Testimonial {
    /// Person quoted.
    pub author: String,
    /// Their role/company.
    #[serde(default)]
    pub role: String,
    /// The quote.
    pub quote: String,
    /// Portrait.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Display order.
    #[serde(default)]
    pub order: i64,
}

impl Record for Testimonial {
    const COLLECTION: &'static str = "testimonials";

    fn validate(&self) -> ScrollkitResult<()> {
        let mut errors = Vec::new();
        require(&mut errors, "author", &self.author);
        require(&mut errors, "quote", &self.quote);
        finish(errors)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/records.rs"]
mod tests;
