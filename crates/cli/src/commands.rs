use anyhow::Context;
use bookstand_app::books::{Book, BookForm, BookService};
use bookstand_app::router::Route;
use bookstand_app::store::{NotificationKind, NotificationStore};
use bookstand_client::ApiClient;
use bookstand_kernel::settings::Settings;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "bookstand")]
#[command(about = "Manage a book catalog over its HTTP API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all books
    #[command(alias = "ls")]
    List,
    /// Show a single book
    Show { id: String },
    /// Create a new book
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        /// Mark the book as available for loan
        #[arg(short, long)]
        available: bool,
    },
    /// Update an existing book
    Update {
        id: String,
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        /// Mark the book as available for loan
        #[arg(short, long)]
        available: bool,
    },
    /// Delete one book
    Delete { id: String },
    /// Delete every book in the catalog
    DeleteAll {
        /// Skip the safety check
        #[arg(long)]
        yes: bool,
    },
    /// Search books by title
    Search { title: String },
    /// Resolve an application path and open the matching screen
    Open { path: String },
}

pub async fn run(cli: Cli, settings: &Settings) -> anyhow::Result<()> {
    let api = ApiClient::from_settings(&settings.api)?;
    let service = BookService::new(api);
    let store = NotificationStore::new();

    if let Err(err) = dispatch(cli.command, &service, &store).await {
        store.error(err.to_string());
        render_notification(&store);
        std::process::exit(1);
    }
    render_notification(&store);
    Ok(())
}

async fn dispatch(
    command: Commands,
    service: &BookService,
    store: &NotificationStore,
) -> anyhow::Result<()> {
    match command {
        Commands::List => render_books(&service.get_all().await?),
        Commands::Show { id } => render_book(&service.get(&id).await?),
        Commands::Add {
            title,
            description,
            available,
        } => {
            let form = BookForm {
                title,
                description,
                available,
            };
            check_form(&form)?;
            let book = service.create(&form).await?;
            store.success(format!("Created \"{}\" ({}).", book.title, book.id));
        }
        Commands::Update {
            id,
            title,
            description,
            available,
        } => {
            let form = BookForm {
                title,
                description,
                available,
            };
            check_form(&form)?;
            service.update(&id, &form).await?;
            store.success(format!("Updated book {id}."));
        }
        Commands::Delete { id } => {
            service.delete(&id).await?;
            store.success(format!("Deleted book {id}."));
        }
        Commands::DeleteAll { yes } => {
            if !yes {
                anyhow::bail!("refusing to delete every book without --yes");
            }
            service.delete_all().await?;
            store.success("Deleted all books.");
        }
        Commands::Search { title } => render_books(&service.find_by_title(&title).await?),
        Commands::Open { path } => open_route(&path, service).await?,
    }
    Ok(())
}

/// Client-side validation gate; nothing goes over the wire when the
/// form is incomplete.
fn check_form(form: &BookForm) -> anyhow::Result<()> {
    let errors = form.validate();
    if errors.is_empty() {
        return Ok(());
    }
    anyhow::bail!(errors.join(" "))
}

async fn open_route(path: &str, service: &BookService) -> anyhow::Result<()> {
    let route = Route::parse(path).with_context(|| format!("no screen registered for '{path}'"))?;
    tracing::debug!(screen = route.name(), "opening screen");
    match route {
        Route::Books => render_books(&service.get_all().await?),
        Route::AddBook => {
            println!("usage: bookstand add --title <TITLE> --description <DESCRIPTION> [--available]");
        }
        Route::EditBook { id } => render_book(&service.get(&id).await?),
    }
    Ok(())
}

fn render_books(books: &[Book]) {
    if books.is_empty() {
        println!("No books in the catalog.");
        return;
    }
    for book in books {
        println!("{}  {}  [{}]", book.id, book.title, availability(book));
    }
}

fn render_book(book: &Book) {
    println!("{}  {}", book.id, book.title);
    println!("  {}", book.description);
    println!("  availability: {}", availability(book));
    println!("  created: {}  updated: {}", book.created_at, book.updated_at);
}

fn availability(book: &Book) -> &'static str {
    if book.is_available() {
        "available"
    } else {
        "unavailable"
    }
}

fn render_notification(store: &NotificationStore) {
    if let Some(notification) = store.current() {
        match notification.kind {
            NotificationKind::Success => println!("✔ {}", notification.message),
            NotificationKind::Error => eprintln!("✖ {}", notification.message),
        }
    }
}
