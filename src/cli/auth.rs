//! CLI auth command handlers for login, status, and logout.

use super::build_client;

/// Handle `taskline auth login <email> <password>`.
pub async fn handle_login(email: &str, password: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client()?;
    let session = client.sign_in(email, password).await?;
    println!(
        "✅ Signed in as {} {} <{}>",
        session.user.name, session.user.last_name, session.user.email
    );
    Ok(())
}

/// Handle `taskline auth status`. Reports the stored session without
/// touching the network.
pub async fn handle_status() -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client()?;
    let credentials = client.credentials();

    println!("🔐 Session Status\n");
    println!("  Server: {}", client.base_url());

    if !credentials.is_authenticated() {
        println!("  Session: ❌ Not signed in");
        return Ok(());
    }

    match &credentials.user {
        Some(user) => println!("  Session: ✅ Signed in as {} <{}>", user.name, user.email),
        None => println!("  Session: ✅ Signed in"),
    }
    let refresh = if credentials.refresh_token.is_some() {
        "✅ Present"
    } else {
        "⚠️  Missing (session ends when the access token expires)"
    };
    println!("  Refresh token: {refresh}");

    Ok(())
}

/// Handle `taskline auth logout`.
pub async fn handle_logout() -> Result<(), Box<dyn std::error::Error>> {
    let client = build_client()?;
    client.sign_out();
    println!("✅ Signed out");
    Ok(())
}
