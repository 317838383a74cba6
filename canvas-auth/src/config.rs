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

//! Application configuration, read once at startup.

use std::env;
use std::fmt;

use crate::error::{AuthError, Result};
use crate::redirect::DEFAULT_AUTH_URL;

const DEFAULT_CALLBACK_PATH: &str = "/auth/redirect";
const DEFAULT_PERMISSIONS: &str = "publish_stream";

/// Configuration for the canvas login gate.
#[derive(Clone)]
pub struct Config {
    /// Application id registered with the host platform.
    pub app_id: String,
    /// Shared secret the host platform signs `signed_request` with.
    pub app_secret: String,
    /// Public base URL the application is served from (e.g. "https://app.example.com").
    pub base_url: String,
    /// Path of the authorization callback route, appended to `base_url`.
    pub callback_path: String,
    /// Host platform authorization dialog.
    pub auth_url: String,
    /// Extended permissions requested during authorization, in order.
    pub permissions: Vec<String>,
    /// Standalone (non-canvas) launch: adds `type=user_agent` to redirects.
    pub dev_env: bool,
    /// Where the callback sends visitors after a successful authorization.
    pub canvas_url: String,
    /// When `false`, protected routes are served without any checks.
    pub enforce_login: bool,
}

impl Config {
    /// Build a configuration from the three required values, with defaults for the rest.
    pub fn new(app_id: &str, app_secret: &str, base_url: &str) -> Result<Self> {
        let app_id = required("CANVAS_APP_ID", Some(app_id.to_string()))?;
        let app_secret = required("CANVAS_APP_SECRET", Some(app_secret.to_string()))?;
        let base_url = required("CANVAS_BASE_URL", Some(base_url.to_string()))?;

        Ok(Self {
            app_id,
            app_secret,
            canvas_url: base_url.clone(),
            base_url,
            callback_path: DEFAULT_CALLBACK_PATH.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            permissions: parse_permissions(DEFAULT_PERMISSIONS),
            dev_env: false,
            enforce_login: true,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// # Required
    /// - `CANVAS_APP_ID`
    /// - `CANVAS_APP_SECRET`
    /// - `CANVAS_BASE_URL`
    ///
    /// # Optional
    /// - `CANVAS_CALLBACK_PATH` (default: `"/auth/redirect"`)
    /// - `CANVAS_AUTH_URL` (default: `"https://graph.facebook.com/oauth/authorize"`)
    /// - `CANVAS_PERMISSIONS` (comma separated, default: `"publish_stream"`)
    /// - `CANVAS_DEV_ENV` (default: `false`)
    /// - `CANVAS_PAGE_URL` (default: `CANVAS_BASE_URL`)
    /// - `CANVAS_ENFORCE_LOGIN` (default: `true`)
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(
            &required("CANVAS_APP_ID", lookup("CANVAS_APP_ID"))?,
            &required("CANVAS_APP_SECRET", lookup("CANVAS_APP_SECRET"))?,
            &required("CANVAS_BASE_URL", lookup("CANVAS_BASE_URL"))?,
        )?;

        if let Some(path) = non_empty(lookup("CANVAS_CALLBACK_PATH")) {
            config.callback_path = if path.starts_with('/') {
                path
            } else {
                format!("/{path}")
            };
        }
        if let Some(auth_url) = non_empty(lookup("CANVAS_AUTH_URL")) {
            config.auth_url = auth_url;
        }
        if let Some(permissions) = lookup("CANVAS_PERMISSIONS") {
            config.permissions = parse_permissions(&permissions);
        }
        if let Some(canvas_url) = non_empty(lookup("CANVAS_PAGE_URL")) {
            config.canvas_url = canvas_url;
        }
        config.dev_env = parse_bool("CANVAS_DEV_ENV", lookup("CANVAS_DEV_ENV"), false)?;
        config.enforce_login =
            parse_bool("CANVAS_ENFORCE_LOGIN", lookup("CANVAS_ENFORCE_LOGIN"), true)?;

        Ok(config)
    }

    /// Absolute URL of the authorization callback route.
    pub fn callback_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.callback_path
        )
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("callback_path", &self.callback_path)
            .field("auth_url", &self.auth_url)
            .field("permissions", &self.permissions)
            .field("dev_env", &self.dev_env)
            .field("canvas_url", &self.canvas_url)
            .field("enforce_login", &self.enforce_login)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(name: &str, value: Option<String>) -> Result<String> {
    non_empty(value).ok_or_else(|| AuthError::Config(format!("{name} is required")))
}

fn parse_permissions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(name: &str, value: Option<String>, default: bool) -> Result<bool> {
    let Some(raw) = non_empty(value) else {
        return Ok(default);
    };
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AuthError::Config(format!(
            "{name} must be a boolean, got '{raw}'"
        ))),
    }
}
