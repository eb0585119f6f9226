//! Exercises the book service end to end against an in-process HTTP
//! server standing in for the books API.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use bookstand_app::books::{BookForm, BookService};
use bookstand_client::{ApiClient, ApiError};
use serde_json::{json, Value};

/// Wire-level observations the assertions need.
#[derive(Clone, Default)]
struct Recorded {
    search_query: Arc<Mutex<Option<String>>>,
    put_body: Arc<Mutex<Option<Value>>>,
}

fn catalog() -> Value {
    json!([
        {
            "id": "book-1",
            "title": "The Rust Programming Language",
            "description": "The book on Rust",
            "available": true,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        },
        {
            "id": "book-2",
            "title": "Programming Rust",
            "description": "Systems programming",
            "availabe": true,
            "createdAt": "2024-01-02T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z"
        },
        {
            "id": "book-3",
            "title": "Rust for Rustaceans",
            "description": "Intermediate Rust",
            "createdAt": "2024-01-03T00:00:00Z",
            "updatedAt": "2024-01-03T00:00:00Z"
        }
    ])
}

async fn list_books(
    State(recorded): State<Recorded>,
    RawQuery(query): RawQuery,
) -> Json<Value> {
    if let Some(query) = query {
        *recorded.search_query.lock().unwrap() = Some(query);
    }
    Json(catalog())
}

async fn get_book(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
    if id == "missing" {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({
        "id": id,
        "title": "The Rust Programming Language",
        "description": "The book on Rust",
        "available": true,
        "createdAt": "2024-01-01T00:00:00Z",
        "updatedAt": "2024-01-01T00:00:00Z"
    })))
}

async fn create_book(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let created = json!({
        "id": "book-9",
        "title": body["title"],
        "description": body["description"],
        "available": body["available"],
        "createdAt": "2024-02-01T00:00:00Z",
        "updatedAt": "2024-02-01T00:00:00Z"
    });
    (StatusCode::CREATED, Json(created))
}

async fn update_book(
    State(recorded): State<Recorded>,
    Path(_id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    *recorded.put_body.lock().unwrap() = Some(body);
    Json(json!({"updated": true}))
}

async fn serve() -> (SocketAddr, Recorded) {
    let recorded = Recorded::default();
    let app = Router::new()
        .route(
            "/api/books",
            get(list_books)
                .post(create_book)
                .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route(
            "/api/books/{id}",
            get(get_book)
                .put(update_book)
                .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .with_state(recorded.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock API serves");
    });
    (addr, recorded)
}

fn service_for(addr: SocketAddr) -> BookService {
    let api = ApiClient::new(&format!("http://{addr}/api"), Duration::from_secs(5))
        .expect("valid base URL");
    BookService::new(api)
}

#[tokio::test]
async fn lists_books_and_normalizes_availability() {
    let (addr, _) = serve().await;
    let books = service_for(addr).get_all().await.expect("list books");

    assert_eq!(books.len(), 3);
    assert!(books[0].is_available());
    // The second entry only carries the misspelled wire attribute.
    assert!(books[1].is_available());
    assert!(!books[2].is_available());
}

#[tokio::test]
async fn missing_book_is_not_found_distinct_from_unreachable() {
    let (addr, _) = serve().await;
    let err = service_for(addr).get("missing").await.expect_err("404");
    assert!(err.is_not_found());

    // Same call against a closed port must classify differently.
    let dead = ApiClient::new("http://127.0.0.1:1/api", Duration::from_millis(500))
        .expect("valid base URL");
    let err = BookService::new(dead)
        .get("missing")
        .await
        .expect_err("unreachable");
    assert!(!err.is_not_found());
    assert!(matches!(err, ApiError::Transport(_)));
}

#[tokio::test]
async fn create_returns_the_server_assigned_book() {
    let (addr, _) = serve().await;
    let form = BookForm {
        title: "Dune".to_string(),
        description: "Desert planet epic".to_string(),
        available: true,
    };
    let book = service_for(addr).create(&form).await.expect("create");

    assert_eq!(book.id, "book-9");
    assert_eq!(book.title, "Dune");
    assert!(book.is_available());
}

#[tokio::test]
async fn update_sends_only_the_editable_fields() {
    let (addr, recorded) = serve().await;
    let form = BookForm {
        title: "Dune".to_string(),
        description: "Desert planet epic".to_string(),
        available: false,
    };
    service_for(addr).update("book-1", &form).await.expect("update");

    let body = recorded
        .put_body
        .lock()
        .unwrap()
        .clone()
        .expect("PUT body captured");
    let object = body.as_object().expect("JSON object");
    assert_eq!(object.len(), 3);
    assert_eq!(object["title"], "Dune");
    assert!(object.get("id").is_none());
    assert!(object.get("createdAt").is_none());
    assert!(object.get("updatedAt").is_none());
}

#[tokio::test]
async fn search_title_reaches_the_wire_percent_encoded() {
    let (addr, recorded) = serve().await;
    let books = service_for(addr)
        .find_by_title("foo bar")
        .await
        .expect("search");
    assert!(!books.is_empty());

    let query = recorded
        .search_query
        .lock()
        .unwrap()
        .clone()
        .expect("query captured");
    assert_eq!(query, "title=foo%20bar");
}

#[tokio::test]
async fn delete_operations_discard_opaque_responses() {
    let (addr, _) = serve().await;
    let service = service_for(addr);
    service.delete("book-1").await.expect("delete one");
    service.delete_all().await.expect("delete all");
}
