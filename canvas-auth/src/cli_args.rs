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

use clap::{Args, Parser, Subcommand};

/// Canvas Auth CLI
///
/// Forge, inspect and verify signed requests, and print the authorization
/// URL the login gate would send visitors to.
#[derive(Parser, Debug)]
#[clap(name = "canvas-auth")]
pub struct Opt {
    #[clap(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand, Debug)]
pub enum Mode {
    /// Produce a signed request from a JSON payload or from credentials.
    Sign(Sign),

    /// Verify a signed request and print its payload and credentials.
    Verify(Verify),

    /// Print the authorization URL built from the CANVAS_* environment.
    RedirectUrl,
}

#[derive(Args, Debug, Clone)]
pub struct Sign {
    /// Application secret shared with the host platform.
    #[clap(long, env = "CANVAS_APP_SECRET", hide_env_values = true)]
    pub secret: String,

    /// Raw JSON payload, signed byte-for-byte.
    #[clap(long, conflicts_with_all = ["user_id", "oauth_token", "expires"])]
    pub json: Option<String>,

    #[clap(long = "user-id", requires_all = ["oauth_token", "expires"])]
    pub user_id: Option<String>,

    #[clap(long = "oauth-token")]
    pub oauth_token: Option<String>,

    /// Token expiry, seconds since the Unix epoch.
    #[clap(long)]
    pub expires: Option<i64>,
}

#[derive(Args, Debug, Clone)]
pub struct Verify {
    /// Application secret shared with the host platform.
    #[clap(long, env = "CANVAS_APP_SECRET", hide_env_values = true)]
    pub secret: String,

    /// The `signed_request` value as posted by the host platform.
    pub signed_request: String,
}
