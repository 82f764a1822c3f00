//! Lists the droplets on an account.
//!
//! Run with: `cargo run --example list_droplets -- <access-token> [tag]`

use oceancall::{decode_json, Client, Error};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct Droplet {
    id: u64,
    name: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct DropletList {
    droplets: Vec<Droplet>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("oceancall=debug")
        .init();

    let mut args = std::env::args().skip(1);
    let token = args
        .next()
        .ok_or("usage: list_droplets <access-token> [tag]")?;

    let client = Client::builder()
        .token(token)
        .user_agent("oceancall-demo/0.1")?
        .build()?;

    let mut params = HashMap::new();
    if let Some(tag) = args.next() {
        params.insert("tag_name".to_string(), tag);
    }

    let request = client.build_request(&params, "GET", "/droplets")?;

    match client.execute(request).await {
        Ok(response) => {
            let list = decode_json::<DropletList>(response).await?;
            for droplet in &list.droplets {
                println!("{:>12}  {:<10} {}", droplet.id, droplet.status, droplet.name);
            }
            println!("{} droplet(s)", list.droplets.len());
        }
        Err(Error::Api { status, error }) => {
            eprintln!("API refused the request ({}): {}", status, error);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
