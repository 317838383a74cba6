/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

use anyhow::Context;
use canvas_auth::cli_args::{Mode, Opt, Sign, Verify};
use canvas_auth::{credentials, signed_request, CanvasGate, Config};
use canvas_auth_types::SignedRequestPayload;
use clap::Parser;
use tracing::level_filters::LevelFilter;

fn main() -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with_writer(std::io::stderr)
            .finish(),
    )
    .context("failed to install tracing subscriber")?;

    let opt = Opt::parse();

    match opt.mode {
        Mode::Sign(s) => println!("{}", sign(s)?),
        Mode::Verify(v) => verify(v)?,
        Mode::RedirectUrl => {
            let config = Config::from_env().context("failed to load configuration")?;
            println!("{}", CanvasGate::new(config).redirect_url());
        }
    };

    Ok(())
}

fn sign(s: Sign) -> anyhow::Result<String> {
    let secret = s.secret.as_bytes();
    let signed = match (s.json, s.user_id, s.oauth_token, s.expires) {
        (Some(json), ..) => signed_request::sign_bytes(json.as_bytes(), secret)?,
        (None, Some(user_id), Some(token), Some(expires)) => signed_request::sign(
            &SignedRequestPayload::authorized(&user_id, &token, expires),
            secret,
        )?,
        _ => signed_request::sign(&SignedRequestPayload::unauthorized(), secret)?,
    };
    Ok(signed)
}

fn verify(v: Verify) -> anyhow::Result<()> {
    let verified = signed_request::verify(v.signed_request.trim(), v.secret.as_bytes())?;
    println!("{}", serde_json::to_string_pretty(verified.payload())?);

    match credentials::extract(&verified)? {
        Some(info) => println!(
            "authorized: user_id={} expires={}",
            info.user_id, info.expires
        ),
        None => println!("not authorized: payload carries no user_id"),
    }
    Ok(())
}
