//! Public greeting command implementation.

use anyhow::Result;
use clap::Args;

use sesame_core::AuthResult;

use crate::output;
use crate::session::ClientOptions;

#[derive(Args, Debug)]
pub struct GreetingArgs {}

pub async fn run(_args: GreetingArgs, options: &ClientOptions) -> Result<()> {
    let service = options.service(options.service_config());
    let greeting = service.public_greeting().await;

    let result = AuthResult::success(greeting);

    output::report(result, options.json, "Greeting failed", |greeting| {
        println!("{}", greeting.message);
        output::field("At", &greeting.timestamp.to_rfc3339());
    })
}
