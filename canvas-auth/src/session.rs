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

//! Session-held token state.
//!
//! The session itself belongs to the transport layer; this module only
//! defines the key-value contract it must satisfy ([`SessionStore`]) and the
//! three fields the gate keeps in it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::credentials::SignedRequestInfo;

/// Per-visitor key-value storage provided by the transport layer.
///
/// Implementations only need last-write-wins semantics within one request.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// The session fields owned by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenField {
    UserId,
    AccessToken,
    Expires,
}

impl TokenField {
    /// Session key under which the field is stored.
    pub fn key(self) -> &'static str {
        match self {
            TokenField::UserId => "fb_user_id",
            TokenField::AccessToken => "fb_access_token",
            TokenField::Expires => "fb_expires",
        }
    }

    /// Read the field, treating an empty value as absent.
    pub fn get<S: SessionStore + ?Sized>(self, store: &S) -> Option<String> {
        store.get(self.key()).filter(|v| !v.is_empty())
    }

    pub fn set<S: SessionStore + ?Sized>(self, store: &mut S, value: String) {
        store.set(self.key(), value);
    }
}

/// Snapshot of the token fields at one instant. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRecord {
    pub user_id: Option<String>,
    pub access_token: Option<String>,
    /// Kept as the raw stored string; it may not parse as an integer.
    pub expires: Option<String>,
}

impl TokenRecord {
    pub fn load<S: SessionStore + ?Sized>(store: &S) -> Self {
        Self {
            user_id: TokenField::UserId.get(store),
            access_token: TokenField::AccessToken.get(store),
            expires: TokenField::Expires.get(store),
        }
    }
}

/// Persist credentials from a verified signed request.
pub fn store_credentials<S: SessionStore + ?Sized>(store: &mut S, info: &SignedRequestInfo) {
    TokenField::AccessToken.set(store, info.oauth_token.clone());
    TokenField::Expires.set(store, info.expires.to_string());
    TokenField::UserId.set(store, info.user_id.clone());
}

/// In-memory [`SessionStore`], for tests and single-process deployments.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    values: HashMap<String, String>,
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

/// Session handle the transport layer attaches to each request as an extension.
#[derive(Clone)]
pub struct SessionHandle(pub Arc<Mutex<dyn SessionStore + Send>>);

impl SessionHandle {
    pub fn new(store: impl SessionStore + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(store)))
    }
}
