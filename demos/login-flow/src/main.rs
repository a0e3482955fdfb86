use std::time::Duration;

use serde::{Deserialize, Serialize};
use sessionward::prelude::*;

// ---------------------------------------------------------------------------
// Principal
// ---------------------------------------------------------------------------

/// What the application's login check produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

const CONFIG: &str = r#"{
    "namespace": "demo",
    "session_store": { "backend": "memory", "ttl_ms": 1800000 },
    "session_ttl_renewal": 900000
}"#;

// ---------------------------------------------------------------------------
// Walkthrough
// ---------------------------------------------------------------------------

/// Shortens a token for display; tokens are secrets.
fn short(token: Option<&str>) -> String {
    match token {
        Some(t) => format!("{}…", &t[..t.len().min(12)]),
        None => "<none>".into(),
    }
}

#[tokio::main]
async fn main() -> Result<(), SessionwardError> {
    sessionward::telemetry::init("info,sessionward_session=debug");

    // A manual clock lets the demo jump through a session's lifetime.
    let clock = ManualClock::new(0);
    let sessions = SessionwardBuilder::from_json(CONFIG)?
        .build::<User>()?
        .with_clock(clock.clone());
    let key = sessions.session_key().to_owned();

    // 1. Login.
    let mut ctx = RequestContext::new(MemoryTransport::new());
    ctx.metadata_mut().insert("ip", "198.51.100.23");
    let user = User {
        id: 1,
        name: "ada".into(),
    };
    sessions.create(&mut ctx, user).await?;
    tracing::info!(token = %short(ctx.transport().get(&key)), "logged in");

    // 2. Five minutes later: fresh, same token.
    clock.advance(Duration::from_secs(5 * 60));
    let mut ctx = RequestContext::new(ctx.into_transport());
    let who = sessions.fetch(&mut ctx).await?;
    tracing::info!(?who, token = %short(ctx.transport().get(&key)), "request at +5m");

    // 3. Twenty minutes after login: stale, rotated.
    clock.advance(Duration::from_secs(15 * 60));
    let mut ctx = RequestContext::new(ctx.into_transport());
    let who = sessions.fetch(&mut ctx).await?;
    let fingerprint = ctx
        .metadata()
        .and_then(Metadata::fingerprint)
        .unwrap_or_default()
        .to_owned();
    tracing::info!(
        ?who,
        token = %short(ctx.transport().get(&key)),
        %fingerprint,
        "request at +20m"
    );

    // 4. Logout.
    sessions.delete(&mut ctx).await?;
    let mut ctx = RequestContext::new(ctx.into_transport());
    let who = sessions.fetch(&mut ctx).await?;
    tracing::info!(?who, "after logout");

    Ok(())
}
