//! Maps URL-style paths to application screens.

/// Screens reachable in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Book list at `/`.
    Books,
    /// Creation form at `/books/add`.
    AddBook,
    /// Edit form at `/books/{id}`.
    EditBook { id: String },
}

impl Route {
    /// Parse a location path. Unknown paths yield `None`.
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Books),
            "/books/add" => Some(Route::AddBook),
            _ => {
                let id = trimmed.strip_prefix("/books/")?;
                if id.is_empty() || id.contains('/') {
                    return None;
                }
                Some(Route::EditBook { id: id.to_string() })
            }
        }
    }

    /// Canonical path for the route.
    pub fn path(&self) -> String {
        match self {
            Route::Books => "/".to_string(),
            Route::AddBook => "/books/add".to_string(),
            Route::EditBook { id } => format!("/books/{id}"),
        }
    }

    /// Stable route name, mirroring the navigation labels.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Books => "books",
            Route::AddBook => "books.add",
            Route::EditBook { .. } => "books.edit",
        }
    }
}
