// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for the key/value client.
//!
//! This example demonstrates:
//! - Building a client from `CONSUL_*` environment variables
//! - Writing, reading, listing and deleting keys
//! - A compare-and-swap update
//!
//! To run this example against a local dev agent:
//! ```bash
//! docker run -d -p 8500:8500 hashicorp/consul:1.15
//! export CONSUL_HTTP_ADDR=127.0.0.1:8500
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use consulkv::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let client = KeyValueClient::from_config(&ClientConfig::from_env()?)?;

    println!("--- Write ---");
    client.put_value("config/app/name", "billing")?;
    client.put_value_with_flags("config/app/port", "8080", 42)?;

    println!("--- Read ---");
    match client.get_value_as_string("config/app/name")? {
        Some(name) => println!("config/app/name = {}", name),
        None => println!("config/app/name is not set"),
    }
    for key in client.get_keys("config/app")? {
        println!("key: {}", key);
    }

    println!("--- Compare and swap ---");
    if let Some(entry) = client.get_value("config/app/port")? {
        let options = PutOptions::new().with_cas(entry.modify_index);
        let applied = client.put_value_with_options("config/app/port", "9090", entry.flags, &options)?;
        println!("cas update applied: {}", applied);
    }

    println!("--- Consistent read ---");
    let options = QueryOptions::new().with_consistency(ConsistencyMode::Consistent);
    if let Some(entry) = client.get_value_with_options("config/app/port", &options)? {
        println!("{} = {} (flags {})", entry.key, entry.decoded_value()?, entry.flags);
    }

    println!("--- Cleanup ---");
    client.delete_keys("config/app")?;
    println!("remaining: {:?}", client.get_values_as_string("config/app")?);

    Ok(())
}
