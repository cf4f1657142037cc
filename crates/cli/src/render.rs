//! Plain-text rendering of settled page states.
use std::fmt::Write as _;

use chrono::Local;
use clowder_core::{
    aggregator::Holdings, clipboard::Notification, family::TokenFamily, token::TokenDetails,
    view::ViewState,
};

pub(crate) fn holdings(state: &ViewState<Holdings>, family: TokenFamily) -> String {
    let mut out = String::new();

    match state {
        ViewState::Idle => {
            let _ = writeln!(out, "🔒 Wallet locked. Connect a wallet to see your {family}s (--holder <address>).");
        }
        ViewState::Loading => {
            let _ = writeln!(out, "Loading...");
        }
        ViewState::Error(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        ViewState::Success(holdings) => {
            let _ = writeln!(out, "My {family}s");
            if holdings.is_empty() {
                let _ = writeln!(out, "You don't own any {family}s yet.");
            }
            for record in &holdings.records {
                let _ = writeln!(
                    out,
                    "Chain ID {:<8} {:<24} Symbol: {:<10} {}",
                    record.chain_id,
                    record.display_name(),
                    record.token_symbol,
                    record.detail_link(),
                );
            }
            match holdings.unavailable() {
                0 => {}
                1 => {
                    let _ = writeln!(out, "1 chain unavailable");
                }
                n => {
                    let _ = writeln!(out, "{n} chains unavailable");
                }
            }
        }
    }

    out
}

pub(crate) fn details(state: &ViewState<TokenDetails>) -> String {
    let mut out = String::new();

    match state {
        ViewState::Idle => {
            let _ = writeln!(out, "No token selected (--vault and --chain-id, or --link).");
        }
        ViewState::Loading => {
            let _ = writeln!(out, "Loading token details...");
        }
        ViewState::Error(message) => {
            let _ = writeln!(out, "Error");
            let _ = writeln!(out, "{message}");
        }
        ViewState::Success(details) => {
            let revokable = if details.revokable { "Yes" } else { "No" };
            let _ = writeln!(out, "Token Details");
            let _ = writeln!(out, "  Token Name:       {}", details.token_name);
            let _ = writeln!(out, "  Token Symbol:     {}", details.token_symbol);
            let _ = writeln!(out, "  Revokable:        {revokable}");
            let _ = writeln!(out, "  Contract Address: {}", details.address);
            let _ = writeln!(
                out,
                "Last updated: {}",
                details.fetched_at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
            );
            let _ = writeln!(out, "Manage Token Actions: {}", details.actions_link());
        }
    }

    out
}

pub(crate) fn notification(notification: Notification) -> String {
    match notification {
        Notification::Success(message) => format!("✔ {message}"),
        Notification::Failure(message) => format!("✘ {message}"),
    }
}
