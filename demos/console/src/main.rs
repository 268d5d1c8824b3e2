//! Console demo.
//!
//! ```text
//! PITCHSIDE_API_URL=http://localhost:5000 \
//!   cargo run -p pitchside-demo -- captain@club.test secret captain /dashboard/addplayers
//! ```
//!
//! Requests each path before signing in, signs in, then requests them
//! again, printing every routing decision and the role's sidebar.

use anyhow::{Context, bail};
use pitchside::logging;
use pitchside::prelude::*;

const USAGE: &str = "usage: pitchside-demo <email> <password> <role> [path ...]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the variables may come from the shell.
    let _ = dotenvy::dotenv();
    logging::init();

    let mut args = std::env::args().skip(1);
    let (Some(email), Some(password), Some(role)) = (args.next(), args.next(), args.next())
    else {
        bail!(USAGE);
    };
    let role: Role = role.parse().context("unrecognised role")?;
    let mut paths: Vec<String> = args.collect();
    if paths.is_empty() {
        paths.push("/dashboard".to_string());
    }

    let config = ConsoleConfig::from_env()?;
    tracing::info!(api = %config.api_base_url, "loaded configuration");
    let mut console = ConsoleBuilder::new().config(config).build_http()?;

    println!("-- signed out");
    for path in &paths {
        print_navigation(path, console.navigate(path)?);
    }

    let credentials = Credentials::new(email, password, role);
    match console.sign_in(&credentials).await {
        Ok(landed) => println!("-- signed in, landed on {landed}"),
        Err(PitchsideError::Auth(err)) => {
            println!("-- sign-in failed: {}", err.user_message());
            console.shutdown().await;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    }

    if let Some(principal) = console.current_principal() {
        println!(
            "principal {} ({}), expires at {} ms",
            principal.id,
            principal.role,
            console.store().expires_at_ms().unwrap_or_default()
        );
    }
    if let Some(variant) = console.home_variant() {
        println!("dashboard home: {variant:?}");
    }
    for link in console.sidebar() {
        println!("sidebar: {:<16} {}", link.label, link.route);
    }
    for path in &paths {
        print_navigation(path, console.navigate(path)?);
    }

    println!("-- signed out, now on {}", console.sign_out());
    console.shutdown().await;
    Ok(())
}

fn print_navigation(path: &str, nav: Navigation) {
    match nav {
        Navigation::Rendered(route) => println!("{path:<36} render {route}"),
        Navigation::Redirected { to, .. } => println!("{path:<36} → {to}"),
    }
}
