//! # Oceancall - a minimal DigitalOcean API client core
//!
//! Oceancall builds authenticated requests for the DigitalOcean v2 API and
//! turns failed responses into structured errors. It does not know about
//! droplets, images or any other resource; those are layered on top.
//!
//! ## Quick Start
//!
//! ```no_run
//! use oceancall::{check_response, decode_json, Client};
//! use serde::Deserialize;
//! use std::collections::HashMap;
//!
//! #[derive(Deserialize)]
//! struct Account {
//!     email: String,
//! }
//!
//! #[derive(Deserialize)]
//! struct AccountEnvelope {
//!     account: Account,
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), oceancall::Error> {
//!     let client = Client::new("dop_v1_...")?;
//!
//!     // Building never touches the network.
//!     let request = client.build_request(&HashMap::new(), "GET", "/account")?;
//!
//!     // Send it with any reqwest client, then validate.
//!     let response = check_response(reqwest::Client::new().execute(request).await).await?;
//!
//!     let account = decode_json::<AccountEnvelope>(response).await?;
//!     println!("Logged in as {}", account.data.account.email);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Only 200 and 204 count as success. Anything else is decoded from the API's
//! `{"id": ..., "message": ...}` error body:
//!
//! ```no_run
//! use oceancall::{Client, Error};
//! use std::collections::HashMap;
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::new("dop_v1_...")?;
//! let request = client.build_request(&HashMap::new(), "DELETE", "/droplets/1")?;
//! match client.execute(request).await {
//!     Ok(_) => println!("deleted"),
//!     Err(Error::Api { status, error }) => {
//!         eprintln!("{} ({}): {}", error.id, status, error.message);
//!     }
//!     Err(Error::ErrorBodyDecode { status, raw_response, .. }) => {
//!         eprintln!("HTTP {} with unexpected body: {}", status, raw_response);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
pub mod metadata;
mod response;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use error::{ApiError, Error, Result};
pub use response::{check_response, decode_json, is_success, Response};
