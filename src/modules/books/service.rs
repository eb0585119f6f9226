use bookstand_client::{ApiClient, ApiError};
use url::Url;

use super::models::{Book, BookForm};

/// CRUD operations over the remote `/books` resource.
///
/// Every call is a single request against the configured base URL;
/// failures come back as [`ApiError`] for the caller to handle.
#[derive(Debug, Clone)]
pub struct BookService {
    api: ApiClient,
}

impl BookService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn get_all(&self) -> Result<Vec<Book>, ApiError> {
        self.api.get_json(self.api.url("books")?).await
    }

    pub async fn get(&self, id: &str) -> Result<Book, ApiError> {
        self.api.get_json(self.book_url(id)?).await
    }

    pub async fn create(&self, form: &BookForm) -> Result<Book, ApiError> {
        tracing::debug!(title = %form.title, "creating book");
        self.api.post_json(self.api.url("books")?, form).await
    }

    /// Update the editable fields of a book. The server response body
    /// is opaque and discarded.
    pub async fn update(&self, id: &str, form: &BookForm) -> Result<(), ApiError> {
        tracing::debug!(%id, "updating book");
        self.api.put_json(self.book_url(id)?, form).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        tracing::debug!(%id, "deleting book");
        self.api.delete(self.book_url(id)?).await
    }

    pub async fn delete_all(&self) -> Result<(), ApiError> {
        tracing::debug!("deleting all books");
        self.api.delete(self.api.url("books")?).await
    }

    pub async fn find_by_title(&self, title: &str) -> Result<Vec<Book>, ApiError> {
        self.api.get_json(self.search_url(title)?).await
    }

    fn book_url(&self, id: &str) -> Result<Url, ApiError> {
        self.api.url(&format!("books/{}", urlencoding::encode(id)))
    }

    // The title must reach the wire percent-encoded; a raw space in the
    // query string produces a malformed request.
    fn search_url(&self, title: &str) -> Result<Url, ApiError> {
        let mut url = self.api.url("books")?;
        url.set_query(Some(&format!("title={}", urlencoding::encode(title))));
        Ok(url)
    }
}
