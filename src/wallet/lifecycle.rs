//! Wallet lifecycle state machine.
//!
//! A wallet moves `LOCKED -> PENDING_APPROVAL -> ACTIVE`, one step at a
//! time, never backwards. Each transition re-checks the stored status via a
//! conditional save, so two requests racing on the same username cannot
//! produce a lost update: the loser sees the winner's status and is handled
//! explicitly (idempotent success or a rejected invalid-state call).

use crate::core::config::{AdminConfig, WalletConfig};
use crate::core::error::{AuthError, WalletError};
use crate::models::user::{User, WalletStatus, WalletView};
use crate::stores::{CasOutcome, VaultStore};
use crate::utils::auth::{hash_password, verify_password, verify_secret};
use tracing::{info, warn};

/// Who just logged in.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The master operator account; checked before any user lookup and
    /// never stored in the user table.
    Admin,
    User { username: String },
}

/// Create a new account with a locked wallet holding the initial grant.
pub fn register(
    store: &dyn VaultStore,
    wallet: &WalletConfig,
    username: &str,
    password: &str,
) -> Result<(), AuthError> {
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    let password_hash = hash_password(password).map_err(AuthError::Hashing)?;
    let user = User::new(
        username.to_string(),
        password_hash,
        wallet.initial_grant,
        wallet.unlock_fee,
    );

    if !store.create_user(user)? {
        return Err(AuthError::UserExists);
    }

    info!(username = %username, "New user registered with locked wallet");
    Ok(())
}

/// Check credentials. The master admin pair short-circuits before the user
/// table is consulted; everyone else is verified against their stored hash.
pub fn login(
    store: &dyn VaultStore,
    admin: &AdminConfig,
    username: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError> {
    if username == admin.master_username && verify_secret(password, &admin.master_password) {
        info!("Master admin logged in");
        return Ok(LoginOutcome::Admin);
    }

    let user = store
        .get_user(username)?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    info!(username = %username, "User logged in");
    Ok(LoginOutcome::User {
        username: user.username,
    })
}

/// User claims the unlock fee is paid: LOCKED -> PENDING_APPROVAL, flag the
/// admin, and emit the operator alert. Calling again while the request is
/// already pending re-notifies and succeeds; an active wallet is rejected.
pub fn request_unlock(
    store: &dyn VaultStore,
    public_url: &str,
    username: &str,
) -> Result<(), WalletError> {
    let user = store
        .get_user(username)?
        .ok_or(WalletError::UserNotFound)?;

    match user.wallet_status {
        WalletStatus::Locked => {
            let mut updated = user;
            updated.wallet_status = WalletStatus::PendingApproval;
            updated.notified_admin = true;

            match store.compare_and_save(WalletStatus::Locked, updated)? {
                CasOutcome::Applied => {
                    notify_operator(public_url, username);
                    Ok(())
                }
                CasOutcome::Missing => Err(WalletError::UserNotFound),
                // A concurrent identical request won the race; same answer.
                CasOutcome::StatusMismatch(WalletStatus::PendingApproval) => {
                    notify_operator(public_url, username);
                    Ok(())
                }
                CasOutcome::StatusMismatch(current) => Err(WalletError::InvalidState {
                    current,
                    action: "request unlock",
                }),
            }
        }
        WalletStatus::PendingApproval => {
            notify_operator(public_url, username);
            Ok(())
        }
        WalletStatus::Active => Err(WalletError::InvalidState {
            current: WalletStatus::Active,
            action: "request unlock",
        }),
    }
}

/// Admin releases the funds: PENDING_APPROVAL -> ACTIVE, the pending
/// balance moves to available in the same save. Approving an already-active
/// wallet is idempotent in balance; approving a locked one is rejected
/// because no unlock was ever requested.
pub fn approve(store: &dyn VaultStore, username: &str) -> Result<User, WalletError> {
    let user = store
        .get_user(username)?
        .ok_or(WalletError::UserNotFound)?;

    match user.wallet_status {
        WalletStatus::PendingApproval => {
            let mut updated = user;
            updated.wallet_status = WalletStatus::Active;
            updated.available_balance = updated.pending_balance;
            updated.pending_balance = 0.0;

            match store.compare_and_save(WalletStatus::PendingApproval, updated.clone())? {
                CasOutcome::Applied => {
                    info!(
                        username = %username,
                        released = updated.available_balance,
                        "Funds released"
                    );
                    Ok(updated)
                }
                CasOutcome::Missing => Err(WalletError::UserNotFound),
                // A concurrent approve won the race; report its result.
                CasOutcome::StatusMismatch(WalletStatus::Active) => store
                    .get_user(username)?
                    .ok_or(WalletError::UserNotFound),
                CasOutcome::StatusMismatch(current) => Err(WalletError::InvalidState {
                    current,
                    action: "approve",
                }),
            }
        }
        WalletStatus::Active => Ok(user),
        WalletStatus::Locked => Err(WalletError::InvalidState {
            current: WalletStatus::Locked,
            action: "approve",
        }),
    }
}

/// Full wallet record for one user, credential omitted.
pub fn wallet_view(store: &dyn VaultStore, username: &str) -> Result<WalletView, WalletError> {
    let user = store
        .get_user(username)?
        .ok_or(WalletError::UserNotFound)?;
    Ok(user.view())
}

/// Operator-visible alert carrying the approval reference for a username.
fn notify_operator(public_url: &str, username: &str) {
    warn!(
        username = %username,
        approval_url = %format!("{}/admin/approve/{}", public_url, username),
        "User claims unlock fee paid, verify payment and approve"
    );
}
