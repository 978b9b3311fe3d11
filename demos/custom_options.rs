//! Customizing the delimiter and path checking with UnflattenOptions.
//!
//! Run with: cargo run --example custom_options

use serde::Serialize;
use serde_unflatten::{to_string_with_options, UnflattenOptions, Unflattener};
use std::error::Error;

#[derive(Debug, Serialize)]
struct EnvConfig {
    #[serde(rename = "APP__NAME")]
    name: String,
    #[serde(rename = "APP__HTTP__PORT")]
    port: u16,
    #[serde(rename = "APP__DEBUG")]
    debug: bool,
}

#[derive(Debug, Serialize)]
struct Overlapping {
    #[serde(rename = "log")]
    log: String,
    #[serde(rename = "log.level")]
    level: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let config = EnvConfig {
        name: "MyApp".to_string(),
        port: 8080,
        debug: true,
    };

    // Double underscore, the usual environment-variable convention
    println!("Delimiter \"__\":");
    let mut unflattener = Unflattener::new("__");
    println!("{}\n", unflattener.unflatten_to_string(&config)?);

    // Same instance, reconfigured: keys no longer split
    println!("Delimiter \".\" (no key contains it):");
    unflattener.set_delimiter(".");
    println!("{}\n", unflattener.unflatten_to_string(&config)?);

    // Pretty output
    println!("Pretty:");
    let pretty = UnflattenOptions::new("__").with_pretty(true);
    println!("{}\n", to_string_with_options(&config, pretty)?);

    // Overlapping paths: the later field wins unless strict checking is on
    let overlapping = Overlapping {
        log: "stdout".to_string(),
        level: "info".to_string(),
    };
    println!("Overlapping paths, permissive:");
    println!("{}\n", to_string_with_options(&overlapping, UnflattenOptions::default())?);

    println!("Overlapping paths, strict:");
    let strict = UnflattenOptions::default().with_strict_paths(true);
    match to_string_with_options(&overlapping, strict) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("{}", e),
    }

    Ok(())
}
