//! EcoDeli CLI
//!
//! Terminal front-end for the EcoDeli backend. The session is kept in a
//! local file between invocations.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use ecodeli::{
    ApiClient,
    client::Navigator,
    config::load_config,
    error::{AppError, Result},
    models::{
        Booking, Delivery, DeliveryType, Document, DocumentFilters, DocumentStatus, Listing,
        ListingFilters, ListingKind, NewListing, RegisterRequest, Role, User, UserRef,
    },
    state::{Dashboard, Loadable},
    storage::{LocalStorage, SessionStore},
};
use log::LevelFilter;

/// EcoDeli - crowd-shipping marketplace client
#[derive(Parser, Debug)]
#[command(name = "ecodeli", version, about = "EcoDeli marketplace client")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "ecodeli.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and keep the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Back-office sign-in (administrators only)
        #[arg(long)]
        admin: bool,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Create an account
    Register(RegisterArgs),

    /// Customer listings
    #[command(subcommand)]
    Listings(ListingsCommand),

    /// User administration
    #[command(subcommand)]
    Users(UsersCommand),

    /// Courier deliveries
    #[command(subcommand)]
    Deliveries(DeliveriesCommand),

    /// Merchant contracts
    #[command(subcommand)]
    Contracts(ContractsCommand),

    /// List warehouses
    Warehouses,

    /// Document review (back office)
    #[command(subcommand)]
    Documents(DocumentsCommand),

    /// Courier affiliation
    #[command(subcommand)]
    Affiliation(AffiliationCommand),

    /// Personal-service bookings
    #[command(subcommand)]
    Bookings(BookingsCommand),

    /// Back-office counters
    Dashboard,

    /// Validate the configuration file
    ValidateConfig,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    /// CLIENT, LIVREUR, COMMERCANT or PRESTATAIRE
    #[arg(long, value_parser = parse_role)]
    role: Role,
    #[arg(long)]
    last_name: String,
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    password: String,
    /// The password typed a second time
    #[arg(long)]
    password_confirm: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    vehicle: Option<String>,
    /// Certify holding a driving licence (couriers)
    #[arg(long)]
    licence: bool,
    #[arg(long)]
    siret: Option<String>,
    #[arg(long)]
    service_type: Option<String>,
    #[arg(long)]
    hourly_rate: Option<f64>,
}

impl RegisterArgs {
    /// Build the sign-up payload, checked against the confirmation.
    fn into_request(self) -> Result<RegisterRequest> {
        let request = RegisterRequest {
            role: self.role,
            last_name: self.last_name,
            first_name: self.first_name,
            email: self.email,
            password: self.password,
            phone: self.phone,
            vehicle: self.vehicle,
            license_verified: (self.role == Role::Courier).then_some(self.licence),
            siret: self.siret,
            service_type: self.service_type,
            hourly_rate: self.hourly_rate,
        };
        request.validate(&self.password_confirm)?;
        Ok(request)
    }
}

#[derive(Subcommand, Debug)]
enum ListingsCommand {
    /// All listings
    List,
    /// Filter by city and/or type
    Search {
        #[arg(long)]
        city: Option<String>,
        #[arg(long, value_parser = parse_kind)]
        kind: Option<ListingKind>,
    },
    /// One listing
    Show { id: i64 },
    /// Listings posted by the signed-in user
    Mine,
    /// Publish a listing as the signed-in user
    Create(CreateListingArgs),
    /// Delete a listing
    Delete { id: i64 },
}

#[derive(Args, Debug)]
struct CreateListingArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    description: String,
    #[arg(long, value_parser = parse_kind)]
    kind: ListingKind,
    #[arg(long)]
    from_address: String,
    #[arg(long)]
    from_city: String,
    #[arg(long)]
    to_address: String,
    #[arg(long)]
    to_city: String,
    #[arg(long)]
    price: f64,
    #[arg(long)]
    weight: Option<f64>,
    #[arg(long)]
    fragile: bool,
}

#[derive(Subcommand, Debug)]
enum UsersCommand {
    /// All users, optionally by role
    List {
        #[arg(long, value_parser = parse_role)]
        role: Option<Role>,
    },
    /// Number of accounts
    Count,
    Suspend { id: i64 },
    Activate { id: i64 },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum DeliveriesCommand {
    /// Deliveries of the signed-in courier
    Mine,
    Show { id: i64 },
    Start { id: i64 },
    /// Close a delivery with the recipient's code
    Complete { id: i64, code: String },
    Cancel { id: i64 },
    /// Legs already created for a listing
    Segments { listing: i64 },
}

#[derive(Subcommand, Debug)]
enum DocumentsCommand {
    /// All documents, optionally only those awaiting review
    List {
        #[arg(long)]
        pending: bool,
        /// Match on document or owner name
        #[arg(long)]
        search: Option<String>,
    },
    /// Documents of one user
    User { id: i64 },
    Approve {
        id: i64,
        #[arg(long)]
        comment: Option<String>,
    },
    Reject {
        id: i64,
        #[arg(long)]
        reason: String,
    },
}

#[derive(Subcommand, Debug)]
enum AffiliationCommand {
    /// Affiliation status of the signed-in courier
    Status,
    /// Ask to become an affiliated courier
    Request {
        #[arg(long)]
        message: Option<String>,
    },
    /// Accept or refuse a courier's request (administrators)
    Decide {
        courier: i64,
        #[arg(long, conflicts_with = "refuse", required_unless_present = "refuse")]
        accept: bool,
        #[arg(long)]
        refuse: bool,
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum BookingsCommand {
    /// Bookings of the signed-in user (received when a service provider)
    Mine,
    /// Weekly slots of a service provider
    Availability { provider: i64 },
    Cancel { id: i64 },
    Complete { id: i64 },
    /// Revenue of the signed-in service provider for one month
    Revenue {
        #[arg(long)]
        year: i32,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: u32,
    },
}

#[derive(Subcommand, Debug)]
enum ContractsCommand {
    /// Show a contract by merchant or by number
    Show {
        #[arg(long, conflicts_with = "number", required_unless_present = "number")]
        merchant: Option<i64>,
        #[arg(long)]
        number: Option<String>,
    },
}

fn parse_role(s: &str) -> std::result::Result<Role, String> {
    Role::parse(s).ok_or_else(|| format!("unknown role: {s}"))
}

fn parse_kind(s: &str) -> std::result::Result<ListingKind, String> {
    ListingKind::parse(s).ok_or_else(|| format!("unknown listing type: {s}"))
}

/// Reports the forced logout that follows a 401.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        log::warn!(
            "Session expired ({}); run `ecodeli login` to sign in again",
            path
        );
    }
}

/// Initialize logging based on verbosity flag.
///
/// The filter admits everything and the global max level does the gating,
/// so `[logging] level` can still be applied once the config is read.
fn init_logging(verbose: bool) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"))
        .format_timestamp_secs()
        .init();
    if !filter_from_env() {
        log::set_max_level(if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        });
    }
}

fn filter_from_env() -> bool {
    std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_some()
}

/// Apply the configured level unless `-v` or `RUST_LOG` already chose one.
fn apply_log_level(verbose: bool, level: &str) {
    if verbose || filter_from_env() {
        return;
    }
    match level.trim().parse::<LevelFilter>() {
        Ok(filter) => log::set_max_level(filter),
        Err(_) => log::warn!("Unknown logging.level '{}', keeping info", level),
    }
}

/// Signed-in user, or an error telling how to get one.
async fn require_user(client: &ApiClient) -> Result<User> {
    client
        .auth()
        .current_user()
        .await?
        .ok_or_else(|| AppError::session("not signed in, run `ecodeli login` first"))
}

/// Print a refreshed list, or why it could not be reloaded.
fn render<T>(page: &Loadable<Vec<T>>, print: fn(&T)) {
    if let Some(error) = page.error() {
        log::error!("Could not reload the list: {}", error);
    }
    page.data().into_iter().flatten().for_each(print);
}

fn print_user(user: &User) {
    let status = user.status.map(|s| s.label()).unwrap_or("-");
    println!(
        "#{:<5} {:<28} {:<32} {:<16} {}",
        user.id,
        user.display_name(),
        user.email,
        user.role.label(),
        status
    );
}

fn print_listing(listing: &Listing) {
    let kind = listing.kind.map(|k| k.label()).unwrap_or("-");
    let status = listing.status.map(|s| s.label()).unwrap_or("-");
    let price = listing
        .proposed_price
        .map(|p| format!("{p:.2} €"))
        .unwrap_or_default();
    println!(
        "#{:<5} {:<40} {:<24} {:<30} {:>10}  {}",
        listing.id,
        listing.title,
        kind,
        listing.route(),
        price,
        status
    );
}

fn print_document(document: &Document) {
    let kind = document.kind.map(|k| k.label()).unwrap_or("-");
    let status = document.status.map(|s| s.label()).unwrap_or("-");
    let owner = document
        .user
        .as_ref()
        .map(UserRef::display_name)
        .or_else(|| document.user_id.map(|id| format!("user #{id}")))
        .unwrap_or_default();
    println!(
        "#{:<5} {:<32} {:<24} {:<24} {}",
        document.id, document.name, kind, owner, status
    );
}

fn print_booking(booking: &Booking) {
    let status = booking.status.map(|s| s.label()).unwrap_or("-");
    let when = booking
        .starts_at
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    println!(
        "#{:<5} {:<32} {:<18} {:<16} {}",
        booking.id,
        booking.title,
        booking.service_type.as_deref().unwrap_or("-"),
        when,
        status
    );
}

fn print_delivery(delivery: &Delivery) {
    let kind = delivery.kind.map(|k| k.label()).unwrap_or("-");
    let status = delivery.status.map(|s| s.label()).unwrap_or("-");
    println!(
        "#{:<5} {:<40} {:<32} {}",
        delivery.id,
        delivery.listing_title().unwrap_or("-"),
        kind,
        status
    );
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli.config).inspect_err(|e| {
        log::error!("Cannot load {}: {}", cli.config.display(), e);
    })?;
    apply_log_level(cli.verbose, &config.logging.level);

    if cli.config.exists() {
        log::debug!("Loaded configuration from {}", cli.config.display());
    } else {
        log::debug!("No {} found, using defaults", cli.config.display());
    }

    let store: Arc<dyn SessionStore> = Arc::new(LocalStorage::new(&config.session.path));
    let client = ApiClient::new(&config.api, store, Arc::new(TerminalNavigator))?;
    log::debug!("Backend: {}", client.base_url());

    match cli.command {
        Command::Login {
            email,
            password,
            admin,
        } => {
            let auth = if admin {
                client.auth().login_admin(&email, &password).await?
            } else {
                client.auth().login(&email, &password).await?
            };
            println!(
                "Signed in as {} ({})",
                auth.user.display_name(),
                auth.user.role.label()
            );
        }

        Command::Logout => {
            client.auth().logout().await?;
            println!("Signed out");
        }

        Command::Whoami => match client.auth().current_user().await? {
            Some(user) => {
                print_user(&user);
                let check = client.auth().verify_token().await?;
                if !check.valid {
                    log::warn!("The stored token is no longer accepted");
                }
            }
            None => println!("Not signed in"),
        },

        Command::Register(args) => {
            let request = args.into_request()?;

            if !client.auth().check_email(&request.email).await {
                log::warn!("{} may already be registered", request.email);
            }
            let user = client.auth().register(&request).await?;
            println!("Account created for {} (#{})", user.email, user.id);
        }

        Command::Listings(command) => {
            let listings = client.listings();
            match command {
                ListingsCommand::List => {
                    listings.list().await?.iter().for_each(print_listing);
                }
                ListingsCommand::Search { city, kind } => {
                    let filters = ListingFilters { city, kind };
                    let found = listings.search(&filters).await?;
                    log::info!("{} listing(s) found", found.len());
                    found.iter().for_each(print_listing);
                }
                ListingsCommand::Show { id } => {
                    let listing = listings.get(id).await?;
                    print_listing(&listing);
                    println!("\n{}", listing.description);
                    if let Some(author) = &listing.author {
                        println!("Posted by {}", author.display_name());
                    }
                }
                ListingsCommand::Mine => {
                    let user = require_user(&client).await?;
                    listings.mine(user.id).await?.iter().for_each(print_listing);
                }
                ListingsCommand::Create(args) => {
                    let user = require_user(&client).await?;
                    let new = NewListing {
                        title: args.title,
                        description: args.description,
                        kind: Some(args.kind),
                        origin_address: args.from_address,
                        destination_address: args.to_address,
                        origin_city: args.from_city,
                        destination_city: args.to_city,
                        proposed_price: args.price,
                        weight_kg: args.weight,
                        fragile: args.fragile.then_some(true),
                        ..NewListing::default()
                    };
                    new.validate()?;
                    let created = listings.create(&new, user.id).await?;
                    print_listing(&created);
                }
                ListingsCommand::Delete { id } => {
                    let mut page = Loadable::new();
                    page.mutate_then_refresh(listings.delete(id), listings.list())
                        .await?;
                    println!("Listing {id} deleted");
                    render(&page, print_listing);
                }
            }
        }

        Command::Users(command) => {
            let users = client.users();
            match command {
                UsersCommand::List { role } => {
                    users.list(role).await?.iter().for_each(print_user);
                }
                UsersCommand::Count => println!("{}", users.count().await?),
                UsersCommand::Suspend { id } => {
                    let mut page = Loadable::new();
                    page.mutate_then_refresh(users.suspend(id), users.list(None))
                        .await?;
                    println!("User {id} suspended");
                    render(&page, print_user);
                }
                UsersCommand::Activate { id } => {
                    let mut page = Loadable::new();
                    page.mutate_then_refresh(users.activate(id), users.list(None))
                        .await?;
                    println!("User {id} activated");
                    render(&page, print_user);
                }
                UsersCommand::Delete { id } => {
                    let mut page = Loadable::new();
                    page.mutate_then_refresh(users.delete(id), users.list(None))
                        .await?;
                    println!("User {id} deleted");
                    render(&page, print_user);
                }
            }
        }

        Command::Deliveries(command) => {
            let deliveries = client.deliveries();
            match command {
                DeliveriesCommand::Mine => {
                    let user = require_user(&client).await?;
                    deliveries
                        .by_courier(user.id)
                        .await?
                        .iter()
                        .for_each(print_delivery);
                }
                DeliveriesCommand::Show { id } => {
                    let delivery = deliveries.get(id).await?;
                    print_delivery(&delivery);
                    if let Some(warehouse) = &delivery.warehouse {
                        println!("Warehouse: {}", warehouse.name);
                    }
                }
                DeliveriesCommand::Start { id } => {
                    print_delivery(&deliveries.start(id).await?);
                }
                DeliveriesCommand::Complete { id, code } => {
                    print_delivery(&deliveries.complete(id, &code).await?);
                }
                DeliveriesCommand::Cancel { id } => {
                    print_delivery(&deliveries.cancel(id).await?);
                }
                DeliveriesCommand::Segments { listing } => {
                    let info = deliveries.segments_info(listing).await?;
                    if let Some((id, name)) = info.warehouse() {
                        println!("Warehouse: {name} (#{id})");
                    }
                    for kind in [
                        DeliveryType::Full,
                        DeliveryType::PartialDrop,
                        DeliveryType::PartialPickup,
                    ] {
                        let open = if info.allows(kind) { "available" } else { "closed" };
                        println!("{:<34} {}", kind.label(), open);
                    }
                }
            }
        }

        Command::Contracts(ContractsCommand::Show { merchant, number }) => {
            let contracts = client.contracts();
            let contract = match (merchant, number) {
                (Some(merchant), _) => contracts.by_merchant(merchant).await?,
                (None, Some(number)) => contracts.by_number(&number).await?,
                (None, None) => return Err(AppError::validation("--merchant or --number is required")),
            };
            let plan = contract.plan.map(|p| format!("{p:?}")).unwrap_or_default();
            let status = contract.status.map(|s| format!("{s:?}")).unwrap_or_default();
            println!(
                "{}  {}  {}",
                contract.number.as_deref().unwrap_or("-"),
                plan,
                status
            );
            println!("Included: {}", contract.included_services().join(", "));
            let today = chrono::Local::now().date_naive();
            if !contract.is_valid_on(today) {
                log::warn!("Contract is not valid today");
            }
        }

        Command::Warehouses => {
            for warehouse in client.warehouses().list().await? {
                println!(
                    "#{:<5} {:<30} {}",
                    warehouse.id,
                    warehouse.name,
                    warehouse.city.as_deref().unwrap_or("-")
                );
            }
        }

        Command::Documents(command) => {
            let documents = client.documents();
            match command {
                DocumentsCommand::List { pending, search } => {
                    let filters = DocumentFilters {
                        status: pending.then_some(DocumentStatus::Pending),
                        search,
                        ..DocumentFilters::default()
                    };
                    documents.list(&filters).await?.iter().for_each(print_document);
                }
                DocumentsCommand::User { id } => {
                    documents.by_user(id).await?.iter().for_each(print_document);
                }
                DocumentsCommand::Approve { id, comment } => {
                    let pending = DocumentFilters {
                        status: Some(DocumentStatus::Pending),
                        ..DocumentFilters::default()
                    };
                    let mut page = Loadable::new();
                    page.mutate_then_refresh(
                        documents.approve(id, comment.as_deref()),
                        documents.list(&pending),
                    )
                    .await?;
                    println!("Document {id} approved; still pending:");
                    render(&page, print_document);
                }
                DocumentsCommand::Reject { id, reason } => {
                    let pending = DocumentFilters {
                        status: Some(DocumentStatus::Pending),
                        ..DocumentFilters::default()
                    };
                    let mut page = Loadable::new();
                    page.mutate_then_refresh(documents.reject(id, &reason), documents.list(&pending))
                        .await?;
                    println!("Document {id} rejected; still pending:");
                    render(&page, print_document);
                }
            }
        }

        Command::Affiliation(command) => {
            let affiliations = client.affiliations();
            match command {
                AffiliationCommand::Status => {
                    let user = require_user(&client).await?;
                    let state = affiliations.status(user.id).await?;
                    println!("{}", state.status.label());
                    if let Some(comment) = &state.comment {
                        println!("Comment: {comment}");
                    }
                }
                AffiliationCommand::Request { message } => {
                    let user = require_user(&client).await?;
                    affiliations.request(user.id, message.as_deref()).await?;
                    println!("Affiliation requested");
                }
                AffiliationCommand::Decide {
                    courier,
                    accept,
                    refuse: _,
                    comment,
                } => {
                    affiliations
                        .decide(courier, accept, comment.as_deref())
                        .await?;
                    let verdict = if accept { "accepted" } else { "refused" };
                    println!("Affiliation of courier {courier} {verdict}");
                }
            }
        }

        Command::Bookings(command) => {
            let bookings = client.bookings();
            match command {
                BookingsCommand::Mine => {
                    let user = require_user(&client).await?;
                    let found = if user.role == Role::ServiceProvider {
                        bookings.by_provider(user.id).await?
                    } else {
                        bookings.by_client(user.id).await?
                    };
                    found.iter().for_each(print_booking);
                }
                BookingsCommand::Availability { provider } => {
                    for slot in bookings.availability(provider).await? {
                        let state = if slot.active { "" } else { " (inactive)" };
                        let day = format!("{:?}", slot.day);
                        println!("{:<10} {} - {}{}", day, slot.start, slot.end, state);
                    }
                }
                BookingsCommand::Cancel { id } => {
                    let user = require_user(&client).await?;
                    bookings.cancel(id, user.id).await?;
                    println!("Booking {id} cancelled");
                }
                BookingsCommand::Complete { id } => {
                    bookings.complete(id).await?;
                    println!("Booking {id} completed");
                }
                BookingsCommand::Revenue { year, month } => {
                    let user = require_user(&client).await?;
                    let revenue = bookings.monthly_revenue(user.id, year, month).await?;
                    println!("{year}-{month:02}: {revenue:.2} €");
                }
            }
        }

        Command::Dashboard => {
            let mut dashboard = Dashboard::new();
            dashboard.load(&client).await;

            let show = |value: Option<u64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());
            let stats = dashboard.stats();
            println!("Users:             {}", show(stats.total_users));
            println!("Listings:          {}", show(stats.listings));
            println!("Merchant listings: {}", show(stats.merchant_listings));
            for (counter, error) in dashboard.errors() {
                log::error!("{}: {}", counter, error);
            }
        }

        Command::ValidateConfig => {
            // load_config already validated it.
            log::info!("✓ Config OK");
            println!("Backend:      {}", config.api.base_url);
            println!("Timeout:      {}s", config.api.timeout_secs);
            println!("Session file: {}", config.session.path.display());
        }
    }

    Ok(())
}
