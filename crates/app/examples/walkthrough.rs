//! Session walkthrough against a running Hearth backend.
//!
//! Restores a persisted session (or logs in with HEARTH_EMAIL /
//! HEARTH_PASSWORD), then prints the boards and the visible properties of
//! the selected board.
//!
//! Usage: `RUST_LOG=info cargo run --example walkthrough`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hearth_app::AppState;
use hearth_core::filter::{FilterCriteria, SortKey};
use hearth_core::models::Credentials;
use hearth_core::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load_or_default();
    tracing::info!(api = %config.api_base_url, "Starting Hearth walkthrough");

    let app = AppState::new(&config)?;

    let session = match app.restore().await? {
        Some(session) => session,
        None => {
            let email = std::env::var("HEARTH_EMAIL")?;
            let password = std::env::var("HEARTH_PASSWORD")?;
            app.login(&Credentials::new(email, password)).await?
        }
    };
    println!("Signed in as {} <{}>", session.user.name, session.user.email);

    println!("\nYour boards:");
    for board in app.owned_boards() {
        println!("  {} ({})", board.name, board.id);
    }
    println!("Shared with you:");
    for board in app.shared_boards() {
        println!("  {} ({})", board.name, board.id);
    }

    if let Some(board_id) = app.selected_board_id() {
        let listings = app.visible_properties(&FilterCriteria::default(), SortKey::PriceAsc);
        println!("\n{} properties on the selected board:", listings.len());
        for property in listings {
            match property.price {
                Some(price) => println!("  {:>12.0}  {}", price, property.title),
                None => println!("  {:>12}  {}", "-", property.title),
            }
        }
    }

    app.load_invitations().await?;
    for invitation in app.pending_invitations() {
        println!(
            "\nPending invitation: '{}' from {}",
            invitation.board_name, invitation.owner_email
        );
    }

    Ok(())
}
