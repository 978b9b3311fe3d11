//! Basic unflattening of a record with dotted field names.
//!
//! Run with: cargo run --example simple

use serde::Serialize;
use serde_unflatten::{resolve, to_string, to_string_pretty, Ref};
use std::error::Error;

#[derive(Debug, Serialize)]
struct Address {
    street: String,
    #[serde(rename = "geo.city")]
    city: String,
}

#[derive(Debug, Serialize)]
struct User {
    #[serde(rename = "user.id")]
    id: u32,
    #[serde(rename = "user.name")]
    name: String,
    #[serde(rename = "contact.email")]
    email: String,
    #[serde(rename = "contact.address")]
    address: Ref<Address>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let user = User {
        id: 42,
        name: "Alice Johnson".to_string(),
        email: "alice@example.com".to_string(),
        address: Ref::new(Address {
            street: "1 Main St".to_string(),
            city: "Springfield".to_string(),
        }),
    };

    println!("Resolved fields:");
    for entry in resolve(&user)? {
        println!("  {:<40} = {}", entry.path.join(" > "), entry.value);
    }

    println!("\nCompact:\n{}\n", to_string(&user)?);
    println!("Pretty:\n{}", to_string_pretty(&user)?);

    let without_address = User {
        address: Ref::none(),
        ..user
    };
    match to_string(&without_address) {
        Ok(json) => println!("unexpected success: {}", json),
        Err(e) => println!("\n✓ Absent address rejected: {}", e),
    }

    Ok(())
}
