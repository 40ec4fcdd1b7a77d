//! Core Integration Tests
//!
//! Session state shared between worker threads and configuration loading.

use std::sync::Arc;
use std::thread;
use xfchess_bot::core::config::{DEPTH_VAR, TOKEN_VAR};
use xfchess_bot::core::{BotConfig, BotError, GameStatus, SessionState};

#[test]
fn test_only_first_outcome_is_recorded() {
    let state = Arc::new(SessionState::new());
    state.mark_active();

    let outcomes = [GameStatus::Win, GameStatus::Loss, GameStatus::Draw];
    let handles: Vec<_> = outcomes
        .into_iter()
        .map(|outcome| {
            let state = Arc::clone(&state);
            thread::spawn(move || state.finish(outcome))
        })
        .collect();

    let recorded: usize = handles
        .into_iter()
        .map(|h| usize::from(h.join().unwrap()))
        .sum();

    assert_eq!(recorded, 1);
    assert!(state.status().is_terminal());
    assert!(!state.is_active());
}

#[test]
fn test_status_progression() {
    let state = SessionState::new();
    assert_eq!(state.status(), GameStatus::Starting);
    state.mark_active();
    assert_eq!(state.status(), GameStatus::Active);
    state.finish(GameStatus::Draw);
    assert_eq!(state.status().to_string(), "draw");
}

#[test]
fn test_config_from_lookup() {
    let config = BotConfig::from_lookup(|name| match name {
        TOKEN_VAR => Some("lip_token".to_string()),
        DEPTH_VAR => Some("3".to_string()),
        _ => None,
    })
    .unwrap();

    assert_eq!(config.search_depth, 3);
    assert_eq!(config.host, "https://lichess.org");
}

#[test]
fn test_config_requires_token() {
    let err = BotConfig::from_lookup(|_| None).unwrap_err();
    assert!(matches!(err, BotError::MissingConfig { .. }));
    assert!(err.to_string().contains(TOKEN_VAR));
}
