/// Where a parameter's raw data originates.
///
/// Pure tags used only for dispatch; each maps to exactly one extraction
/// strategy in the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Query-string fields.
    Query,
    /// JSON request body (must be a non-empty JSON object).
    Json,
    /// URL-encoded form body.
    Form,
}

impl Location {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Query => "query",
            Location::Json => "json",
            Location::Form => "form",
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
