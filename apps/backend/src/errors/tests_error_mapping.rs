// Unit tests for error mapping - pure domain errors to the HTTP boundary
use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_validation_to_400() {
    let de = DomainError::validation(ValidationKind::InvalidName, "name required");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidName);
    assert_eq!(app.status().as_u16(), 400);

    let missing = DomainError::validation(ValidationKind::MissingParameter, "sessionCode");
    let app: AppError = missing.into();
    assert_eq!(app.code().as_str(), "MISSING_PARAMETER");
    assert_eq!(app.status().as_u16(), 400);
}

#[test]
fn maps_conflicts_to_409_with_distinct_codes() {
    let cases = [
        (ConflictKind::AlreadyStarted, "ALREADY_STARTED"),
        (ConflictKind::SessionFull, "SESSION_FULL"),
        (ConflictKind::NotEnoughPlayers, "NOT_ENOUGH_PLAYERS"),
        (ConflictKind::GameNotStarted, "GAME_NOT_STARTED"),
        (ConflictKind::GameAlreadyOver, "GAME_ALREADY_OVER"),
        (ConflictKind::NotYourTurn, "NOT_YOUR_TURN"),
        (ConflictKind::NotHost, "NOT_HOST"),
        (ConflictKind::Other("x".into()), "CONFLICT"),
    ];

    for (kind, expected) in cases {
        let app: AppError = DomainError::conflict(kind, "conflict").into();
        assert_eq!(app.code().as_str(), expected);
        assert_eq!(app.status().as_u16(), 409);
    }
}

#[test]
fn maps_not_found() {
    let nf = DomainError::session_not_found("ABC123");
    let app: AppError = nf.into();
    assert_eq!(app.code().as_str(), "SESSION_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
    assert!(app.to_string().contains("ABC123"));

    let player = DomainError::not_found(NotFoundKind::Player, "no such player");
    let app: AppError = player.into();
    assert_eq!(app.code(), ErrorCode::PlayerNotFound);
}

#[test]
fn maps_infra_to_500() {
    let exhausted = DomainError::infra(InfraErrorKind::CodeSpaceExhausted, "no codes");
    let app: AppError = exhausted.into();
    assert_eq!(app.code().as_str(), "CODE_SPACE_EXHAUSTED");
    assert_eq!(app.status().as_u16(), 500);

    let other = DomainError::infra(InfraErrorKind::Other("boom".into()), "boom");
    let app: AppError = other.into();
    assert_eq!(app.code(), ErrorCode::Internal);
}

#[test]
fn detail_is_carried_without_kind_prefix() {
    let de = DomainError::conflict(ConflictKind::NotYourTurn, "It is Beto's turn");
    assert_eq!(de.detail(), "It is Beto's turn");
    let app: AppError = de.into();
    assert_eq!(app.detail(), "It is Beto's turn");
    assert_eq!(app.to_string(), "NOT_YOUR_TURN: It is Beto's turn");
}

#[test]
fn every_code_has_one_status() {
    use crate::error::status_for;

    assert_eq!(status_for(ErrorCode::BadRequest).as_u16(), 400);
    assert_eq!(status_for(ErrorCode::NotFound).as_u16(), 404);
    assert_eq!(status_for(ErrorCode::SessionFull).as_u16(), 409);
    assert_eq!(status_for(ErrorCode::ConfigError).as_u16(), 500);

    let config = AppError::config("BACKEND_PORT must be a valid port number");
    assert_eq!(config.code(), ErrorCode::ConfigError);
    assert_eq!(config.status().as_u16(), 500);
}
