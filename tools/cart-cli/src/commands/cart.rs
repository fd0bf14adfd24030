//! Cart commands: add, remove, show and count.

use anyhow::Result;
use cart_commerce::ProductId;
use serde_json::json;

use super::{AddArgs, RemoveArgs};
use crate::context::Context;

/// Add one unit of a product.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    let mut service = ctx.open_service()?;
    let product_id = ProductId::new(args.product_id);
    let quantity = service.add_item(product_id.clone(), &args.name, args.price)?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product_id": product_id,
            "quantity": quantity,
            "count": service.item_count(),
        }));
    } else {
        ctx.output
            .kv("In cart", &format!("{} x {}", quantity, args.name));
    }

    Ok(())
}

/// Remove a product entirely.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut service = ctx.open_service()?;
    let product_id = ProductId::new(args.product_id);
    let removed = service.remove_item(&product_id);

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "product_id": product_id,
            "removed": removed,
            "count": service.item_count(),
        }));
    } else if removed {
        ctx.output.success(&format!("Removed {}", product_id));
    } else {
        ctx.output.warn(&format!("{} was not in the cart", product_id));
    }

    Ok(())
}

/// Print the cart table.
pub fn show(ctx: &Context) -> Result<()> {
    let service = ctx.open_service()?;

    if ctx.output.is_json() {
        let totals = service.cart().totals();
        ctx.output.json(&json!({
            "items": service.cart(),
            "count": service.item_count(),
            "value": totals.value,
            "currency": service.config().currency.code(),
        }));
        return Ok(());
    }

    service.render_cart_table();
    Ok(())
}

/// Print the distinct-product count.
pub fn count(ctx: &Context) -> Result<()> {
    let service = ctx.open_service()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "count": service.item_count() }));
    } else {
        println!("{}", service.item_count());
    }

    Ok(())
}
