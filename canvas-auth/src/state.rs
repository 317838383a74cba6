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

//! Shared application state passed to the middleware and handlers via `State`.

use crate::config::Config;
use crate::gate::CanvasGate;

/// Application state shared across all request handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Signed-request verifier and session decision logic.
    pub gate: CanvasGate,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            gate: CanvasGate::new(config),
        }
    }

    pub fn config(&self) -> &Config {
        self.gate.config()
    }
}
