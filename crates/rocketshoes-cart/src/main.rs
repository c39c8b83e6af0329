//! RocketShoes cart CLI.
//!
//! Loads the persisted cart, applies one operation against the live stock API, prints the
//! resulting cart and saves it.
//!
//! # Usage
//!
//! ```bash
//! rocketshoes-cart show
//! rocketshoes-cart add 3
//! rocketshoes-cart update 3 2
//! rocketshoes-cart remove 3
//! ```
//!
//! Configuration comes from the environment (or `.env`), see
//! [`CartConfig`](rocketshoes_cart::config::CartConfig).

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use rocketshoes_cart::cart_actor::{CartError, UpdateProductAmount};
use rocketshoes_cart::clients::CartClient;
use rocketshoes_cart::config::CartConfig;
use rocketshoes_cart::lifecycle::{setup_tracing, CartSystem};
use rocketshoes_cart::model::{Cart, ProductId};
use rocketshoes_cart::services::TracingNotifier;
use state_actor::StoreHandle;
use tracing::{info, Instrument};

#[derive(Parser)]
#[command(name = "rocketshoes-cart")]
#[command(author, version, about = "RocketShoes shopping cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        id: u32,
    },
    /// Step a product's quantity towards AMOUNT
    Update {
        /// Product id
        id: u32,
        /// Target quantity; zero or less is ignored
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    setup_tracing();

    let cli = Cli::parse();
    let config = CartConfig::from_env().context("Invalid configuration")?;
    info!(api_url = %config.api_url, storage_dir = %config.storage_dir.display(), "Starting");

    let system = CartSystem::from_config(&config, Arc::new(TracingNotifier))
        .context("Failed to start cart")?;

    let span = tracing::info_span!("cart_command");
    let outcome = run(&system.cart_client, cli.command).instrument(span).await;
    let cart = system
        .cart_client
        .snapshot()
        .await
        .context("Failed to read cart")?;
    print_cart(&cart);

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    outcome.context("Cart operation failed")?;
    Ok(())
}

async fn run(client: &CartClient, command: Commands) -> Result<(), CartError> {
    match command {
        Commands::Show => {}
        Commands::Add { id } => {
            client.add_product(ProductId(id)).await?;
        }
        Commands::Remove { id } => {
            client.remove_product(ProductId(id)).await?;
        }
        Commands::Update { id, amount } => {
            client
                .update_product_amount(UpdateProductAmount {
                    product_id: ProductId(id),
                    amount,
                })
                .await?;
        }
    }
    Ok(())
}

fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    let mut total = 0.0;
    for product in cart {
        let subtotal = product.price * f64::from(product.amount);
        total += subtotal;
        println!(
            "{:>6}  {:<40} {:>3} x {:>9.2} = {:>10.2}",
            product.id.0, product.name, product.amount, product.price, subtotal
        );
    }
    println!("{:>76.2}", total);
}
