pub mod analysis;
pub mod file;
pub mod resume;

pub use analysis::{AuthenticityResult, MultiResumeResult, ScoreCategory, SimilarityResult};
pub use file::ResumeFile;
pub use resume::{ParsedResume, SubmitAck};
