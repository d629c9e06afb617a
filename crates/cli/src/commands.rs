//! Cart subcommands and their terminal output.

use std::{io, sync::Arc};

use clap::Subcommand;
use rocketshoes_app::domain::{
    carts::{
        CartsService, CartsServiceError,
        models::{Cart, UpdateProductAmount},
    },
    products::models::ProductId,
};
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

/// Cart operations available from the command line.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum Command {
    /// Print the current cart
    Show,

    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },

    /// Remove a product from the cart
    Remove {
        /// Product id
        id: ProductId,
    },

    /// Set the amount of a product already in the cart
    Update {
        /// Product id
        id: ProductId,

        /// New amount; zero or less leaves the cart unchanged
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// Run `command` against the cart store.
pub(crate) async fn run(
    carts: &dyn CartsService,
    command: Command,
) -> Result<Arc<Cart>, CartsServiceError> {
    match command {
        Command::Show => Ok(carts.cart()),
        Command::Add { id } => carts.add_product(id).await,
        Command::Remove { id } => carts.remove_product(id).await,
        Command::Update { id, amount } => {
            carts
                .update_product_amount(UpdateProductAmount {
                    product_id: id,
                    amount,
                })
                .await
        }
    }
}

/// Print the outcome of a command: the cart on `out`, notifications on `err`.
///
/// Returns whether the command succeeded.
pub(crate) fn report(
    out: &mut impl io::Write,
    err: &mut impl io::Write,
    outcome: &Result<Arc<Cart>, CartsServiceError>,
    notices: impl IntoIterator<Item = String>,
) -> io::Result<bool> {
    let mut notified = false;

    for notice in notices {
        writeln!(err, "{notice}")?;
        notified = true;
    }

    match outcome {
        Ok(cart) => {
            write_cart(out, cart)?;

            Ok(true)
        }
        Err(error) => {
            if !notified {
                writeln!(err, "{error}")?;
            }

            Ok(false)
        }
    }
}

fn write_cart(out: &mut impl io::Write, cart: &Cart) -> io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Cart is empty");
    }

    let mut builder = Builder::default();

    builder.push_record(["ID", "Product", "Price", "Amount", "Subtotal"]);

    for item in cart {
        builder.push_record([
            item.id().to_string(),
            item.product.title.clone(),
            price(item.product.price),
            item.amount.to_string(),
            price(item.subtotal()),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    writeln!(out, "{table}")?;
    writeln!(
        out,
        "Items: {}  Total: {}",
        cart.item_count(),
        price(cart.total())
    )
}

fn price(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}
