use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle stage of a user's funds.
///
/// Transitions only move forward: LOCKED -> PENDING_APPROVAL -> ACTIVE.
/// No stage is skipped and no transition reverses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletStatus {
    #[serde(rename = "LOCKED")]
    Locked,
    #[serde(rename = "PENDING_APPROVAL")]
    PendingApproval,
    #[serde(rename = "ACTIVE")]
    Active,
}

impl fmt::Display for WalletStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WalletStatus::Locked => "LOCKED",
            WalletStatus::PendingApproval => "PENDING_APPROVAL",
            WalletStatus::Active => "ACTIVE",
        };
        f.write_str(s)
    }
}

/// A portal account. The username is the identity and never changes.
///
/// `password_hash` is an argon2 PHC string; the plaintext credential is
/// never stored and never serialized into a response (see [`WalletView`]).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub password_hash: String,
    /// Display name, defaults to the username at registration.
    pub name: String,
    pub wallet_status: WalletStatus,
    pub pending_balance: f64,
    pub available_balance: f64,
    /// Advertised fee shown to the user; informational only, never charged.
    pub unlock_fee: f64,
    pub notified_admin: bool,
}

impl User {
    /// Create a freshly registered user: locked wallet, full initial grant
    /// pending, nothing available yet.
    pub fn new(username: String, password_hash: String, initial_grant: f64, unlock_fee: f64) -> Self {
        Self {
            name: username.clone(),
            username,
            password_hash,
            wallet_status: WalletStatus::Locked,
            pending_balance: initial_grant,
            available_balance: 0.0,
            unlock_fee,
            notified_admin: false,
        }
    }

    /// Response-safe projection of the record, credential omitted.
    pub fn view(&self) -> WalletView {
        WalletView {
            username: self.username.clone(),
            name: self.name.clone(),
            wallet_status: self.wallet_status,
            pending_balance: self.pending_balance,
            available_balance: self.available_balance,
            unlock_fee: self.unlock_fee,
            notified_admin: self.notified_admin,
        }
    }
}

/// What the API returns for a user: everything except the credential field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    pub username: String,
    pub name: String,
    pub wallet_status: WalletStatus,
    pub pending_balance: f64,
    pub available_balance: f64,
    pub unlock_fee: f64,
    pub notified_admin: bool,
}
