//! Shopping Cart Example
//!
//! A cart of product quantities shared by several async tasks. Updates copy the
//! map, change the copy and hand it back, so a failed update never leaves a
//! half-edited cart behind. A resilient error handler keeps the cart alive when
//! a customer asks for something that is not in it.
use acty_agent::{Agent, AgentRef, Failure, Resolution};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;

type Cart = HashMap<String, u32>;

fn add(cart: &AgentRef<Cart>, product: &str) {
    let product = product.to_string();
    cart.send_fn(move |items| {
        let mut items = items.clone();
        *items.entry(product).or_default() += 1;
        items
    })
    .unwrap_or(());
}

fn remove(cart: &AgentRef<Cart>, product: &str) {
    let product = product.to_string();
    cart.try_send_fn(move |items| {
        let mut items = items.clone();
        match items.remove(&product) {
            Some(_) => Ok(items),
            None => Err(format!("{product} is not in the cart")),
        }
    })
    .unwrap_or(());
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cart = Agent::new(Cart::new())
        .name("cart")
        .error_handler(|failure: &Failure| {
            tracing::warn!(%failure, "cart rejected an update");
            Resolution::Continue
        })
        .start();

    add(&cart, "Budweiser");
    add(&cart, "Pilsner");
    remove(&cart, "Budweiser");
    remove(&cart, "Stout");

    let customers: Vec<_> = ["Lager", "Lager", "Porter"]
        .into_iter()
        .map(|product| {
            let cart = cart.clone();
            tokio::spawn(async move { add(&cart, product) })
        })
        .collect();
    futures::future::join_all(customers).await;

    cart.read_async(|items| println!("cart (async read): {items:?}"))
        .unwrap_or(());
    match cart.read().await {
        Ok(items) => println!("cart: {items:?}"),
        Err(err) => println!("cart unavailable: {err}"),
    }

    cart.close().await;
}
