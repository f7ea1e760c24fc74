/// Pages of the client and the paths they were published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Parse,
    Multiple,
    Plagiarism,
    TokenizedResume,
    SimilarityScore,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Home,
        Route::Parse,
        Route::Multiple,
        Route::Plagiarism,
        Route::TokenizedResume,
        Route::SimilarityScore,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Parse => "/parse",
            Route::Multiple => "/multiple",
            Route::Plagiarism => "/plagiarism",
            Route::TokenizedResume => "/tokenized-resume",
            Route::SimilarityScore => "/similarityScore",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Parse => "Normal Parsing",
            Route::Multiple => "Multiple Resume Analysis",
            Route::Plagiarism => "Plagiarism Check",
            Route::TokenizedResume => "Tokenized Resume Viewer",
            Route::SimilarityScore => "Calculate Similarity Score",
        }
    }

    /// CLI subcommand that opens this page.
    pub fn command(self) -> &'static str {
        match self {
            Route::Home => "routes",
            Route::Parse => "parse",
            Route::Multiple => "multiple",
            Route::Plagiarism => "authenticity",
            Route::TokenizedResume => "tokenized",
            Route::SimilarityScore => "similarity",
        }
    }

    /// Entries shown in the navigation bar, in order.
    pub fn nav() -> [Route; 4] {
        [Route::Home, Route::Parse, Route::Multiple, Route::Plagiarism]
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Route::ALL.into_iter().find(|r| r.path() == path)
    }
}
