//! Checkout commands.

use anyhow::Result;
use serde_json::json;

use crate::context::Context;

/// Report `InitiateCheckout` for the current cart.
pub fn checkout(ctx: &Context) -> Result<()> {
    let mut service = ctx.open_service()?;
    if service.cart().is_empty() {
        ctx.output.warn("Checking out an empty cart");
    }

    service.initiate_checkout()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "state": service.checkout_state().as_str(),
            "destination": service.config().checkout_url,
        }));
    }

    Ok(())
}

/// Report `Purchase` and empty the cart.
pub fn purchase(ctx: &Context) -> Result<()> {
    let mut service = ctx.open_service()?;
    let totals = service.cart().totals();

    service.complete_purchase()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "state": service.checkout_state().as_str(),
            "value": totals.value,
            "num_items": totals.num_items,
            "destination": service.config().confirmation_url,
        }));
    } else {
        ctx.output.success(&format!(
            "Purchased {} item(s) for {}",
            totals.num_items,
            totals.value.display(service.config().currency)
        ));
    }

    Ok(())
}
