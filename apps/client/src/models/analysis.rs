//! Analysis payloads: job-description similarity, multi-resume ranking, and
//! authenticity signals. All scoring happens server-side; these are views.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::resume::null_as_empty;

/// A resume skill the service matched against the job description.
/// `matched_as` is the JD variant it matched; confidence is carried through
/// but never rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedSkill {
    pub skill: String,
    pub matched_as: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    pub similarity_score: f64,
    #[serde(default, deserialize_with = "matched_skills_in_order")]
    pub matched_skills: Vec<MatchedSkill>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unmatched_skills: Vec<String>,
}

impl SimilarityResult {
    pub fn category(&self) -> ScoreCategory {
        ScoreCategory::from_score(self.similarity_score)
    }
}

/// One entry of the `/compare-multiple-resumes` array. The array order is the
/// display order; the client does not re-rank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MultiResumeResult {
    pub filename: String,
    #[serde(flatten)]
    pub similarity: SimilarityResult,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthenticityResult {
    #[serde(default)]
    pub ai_score: Option<f64>,
    #[serde(default)]
    pub authenticity_score: Option<f64>,
    /// Always present in a real verdict; a body without it is not one.
    pub is_suspected_ai: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub authenticity_flags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub unsupported_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub invalid_companies: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub triggered_buzzwords: Vec<String>,
}

/// Three-bucket reading of a 0–100 similarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreCategory {
    Bad,
    Good,
    Excellent,
}

impl ScoreCategory {
    /// Boundaries 50 and 75 belong to the higher bucket.
    pub fn from_score(score: f64) -> Self {
        if score < 50.0 {
            ScoreCategory::Bad
        } else if score < 75.0 {
            ScoreCategory::Good
        } else {
            ScoreCategory::Excellent
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Bad => "Bad",
            ScoreCategory::Good => "Good",
            ScoreCategory::Excellent => "Excellent",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            ScoreCategory::Bad => ":(",
            ScoreCategory::Good => ":)",
            ScoreCategory::Excellent => ":D",
        }
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// `matchedSkills` arrives as `{skill: [variant, confidence]}`. Key order is
/// kept as sent (serde_json is built with `preserve_order`).
fn matched_skills_in_order<'de, D>(deserializer: D) -> Result<Vec<MatchedSkill>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<serde_json::Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(map
        .into_iter()
        .map(|(skill, value)| {
            let pair = value.as_array();
            let matched_as = pair
                .and_then(|p| p.first())
                .and_then(Value::as_str)
                .map(String::from);
            let confidence = pair.and_then(|p| p.get(1)).and_then(|c| match c {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            });
            MatchedSkill {
                skill,
                matched_as,
                confidence,
            }
        })
        .collect())
}
