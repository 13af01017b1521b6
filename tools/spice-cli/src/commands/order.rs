//! Order command: build a cart, send it over WhatsApp, wait for the reset.

use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Input};
use serde::Serialize;
use spice_commerce::cart::{CartStore, SharedCart};
use spice_commerce::checkout::{
    CheckoutDispatcher, CustomerInfo, LinkOpener, OrderSummary, Submission,
};

use super::{CartItem, OrderArgs};
use crate::context::Context;
use crate::opener::{PrintOpener, SystemOpener};
use crate::output::Output;

const WIDTHS: [usize; 4] = [26, 5, 11, 11];

/// Machine-readable result of a sent order.
#[derive(Serialize)]
struct OrderReport<'a> {
    summary: &'a OrderSummary,
    message: &'a str,
    link: &'a str,
    link_exceeds_limit: bool,
}

/// Run the order command.
pub async fn run(args: OrderArgs, ctx: &Context) -> Result<()> {
    if args.items.is_empty() {
        bail!("No items given. Add products with --item ID[=QTY] (see `spice catalog`).");
    }

    let items = fill_cart(&args.items);
    for entry in items.entries() {
        if ctx.catalog.get(entry.product_id).is_none() {
            ctx.output
                .warn(&format!("Product {} is not in the catalog and will be skipped", entry.product_id));
        }
    }

    let cart = SharedCart::from(items);

    let prompt = args.interactive && !ctx.output.is_json();
    let customer = collect_customer(&args, prompt)?;

    let opener: Arc<dyn LinkOpener> = if args.open {
        Arc::new(SystemOpener)
    } else {
        Arc::new(PrintOpener)
    };
    let mut checkout = CheckoutDispatcher::new(opener, &ctx.config);
    checkout.set_customer(customer);

    if prompt {
        let preview = checkout.preview(&cart, &ctx.catalog)?;
        print_summary(&ctx.output, &preview);
        ctx.output.text("");
        let confirmed = Confirm::new()
            .with_prompt("Send this order via WhatsApp?")
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Order cancelled");
            return Ok(());
        }
    }

    let sent = checkout
        .submit(&cart, &ctx.catalog)
        .await
        .context("Could not send order")?;

    report(&ctx.output, &sent, prompt, args.open);

    if args.no_wait {
        checkout.cancel_reset();
        return Ok(());
    }

    let delay = ctx.config.checkout.reset_delay_secs;
    let spinner = ctx
        .output
        .spinner(&format!("Order sent. Closing checkout in {}s...", delay));
    checkout.wait_for_reset().await;
    spinner.finish_and_clear();
    ctx.output
        .success("Checkout closed. Cart and customer details cleared.");

    Ok(())
}

/// Merge repeated `--item` values into one cart.
fn fill_cart(items: &[CartItem]) -> CartStore {
    let mut cart = CartStore::new();
    for item in items {
        let quantity = i64::from(cart.quantity(&item.product_id)) + i64::from(item.quantity);
        cart.set_quantity(item.product_id.clone(), quantity);
    }
    cart
}

/// Customer details from flags, asking for the rest when prompting.
///
/// Without prompts, missing fields stay blank and checkout validation
/// reports them.
fn collect_customer(args: &OrderArgs, prompt: bool) -> Result<CustomerInfo> {
    let mut customer = CustomerInfo::new(
        args.name.clone().unwrap_or_default(),
        args.phone.clone().unwrap_or_default(),
        args.address.clone().unwrap_or_default(),
    );
    if let Some(note) = &args.note {
        customer = customer.with_delivery_note(note.clone());
    }

    if !prompt {
        return Ok(customer);
    }

    customer.name = ask("Full name", &customer.name, false)?;
    customer.phone = ask("Phone number", &customer.phone, false)?;
    customer.address = ask("Delivery address", &customer.address, false)?;
    customer.delivery_note = ask("Delivery note (optional)", &customer.delivery_note, true)?;

    Ok(customer)
}

fn ask(prompt: &str, current: &str, optional: bool) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(prompt)
        .allow_empty(optional);
    if !current.trim().is_empty() {
        input = input.default(current.to_string());
    }
    let value = input
        .interact_text()
        .with_context(|| format!("Failed to read {}", prompt.to_lowercase()))?;
    Ok(value.trim().to_string())
}

fn report(output: &Output, sent: &Submission, summary_shown: bool, opened: bool) {
    if output.is_json() {
        output.json(&OrderReport {
            summary: &sent.summary,
            message: &sent.message,
            link: sent.link.uri(),
            link_exceeds_limit: sent.link.exceeds_limit(),
        });
        return;
    }

    if !summary_shown {
        print_summary(output, &sent.summary);
    }
    for id in &sent.summary.unresolved {
        output.warn(&format!("Skipped {}: no longer in the catalog", id));
    }
    if sent.link.exceeds_limit() {
        output.warn("The order link is very long; WhatsApp may cut the message short");
    }
    output.debug(&format!("Message is {} bytes", sent.link.message_len()));

    if opened {
        output.success(&format!("Order {} opened in WhatsApp", sent.summary.order_number));
    } else {
        output.header("Send your order");
        output.info("Open this link to send the order on WhatsApp:");
        output.text(sent.link.uri());
        output.success(&format!("Order {} ready", sent.summary.order_number));
    }
}

fn print_summary(output: &Output, summary: &OrderSummary) {
    output.header("Order summary");
    output.table_row(&["ITEM", "QTY", "PRICE", "SUBTOTAL"], &WIDTHS);
    for line in &summary.lines {
        output.table_row(
            &[
                &format!("{} ({})", line.product_name, line.weight),
                &format!("{}x", line.quantity),
                &line.unit_price.display(),
                &line.line_subtotal.display(),
            ],
            &WIDTHS,
        );
    }
    output.text("");
    output.kv("Subtotal", &summary.subtotal.display());
    output.kv("Delivery", &summary.delivery_fee_label());
    output.kv("Total", &summary.total.display());
}
