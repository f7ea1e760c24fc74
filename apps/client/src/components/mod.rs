// One view-model per page section. Each holds its own ActionState and talks
// to the backend only through `ResumeService`.

pub mod authenticity;
pub mod display;
pub mod intake;
pub mod lifecycle;
pub mod multi_resume;
pub mod similarity;
pub mod submission;
pub mod tokenized;
