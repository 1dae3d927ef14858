// src/auth/sessions.rs
use crate::auth::token::{generate_token, hash_token};
use crate::errors::ServerError;
use rusqlite::{params, Connection, OptionalExtension};

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_TTL_SECS: i64 = 60 * 60 * 24 * 7; // 7 days

pub fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}

/// `Set-Cookie` value carrying a fresh session token.
pub fn session_cookie(raw_token: &str) -> String {
    format!("{SESSION_COOKIE}={raw_token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_TTL_SECS}")
}

pub fn clear_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Start an admin session; returns the raw token for the cookie.
pub fn create_session(conn: &Connection, now: i64) -> Result<String, ServerError> {
    let raw_token = generate_token();
    let hash = hash_token(&raw_token);
    let expires_at = now + SESSION_TTL_SECS;

    let purged = conn
        .execute(
            "delete from admin_sessions where expires_at <= ? or revoked_at is not null",
            params![now],
        )
        .map_err(|e| ServerError::DbError(format!("purge sessions failed: {e}")))?;
    if purged > 0 {
        log::debug!("Purged {purged} stale admin sessions");
    }

    conn.execute(
        r#"
        insert into admin_sessions (token_hash, created_at, expires_at)
        values (?, ?, ?)
        "#,
        params![hash.as_slice(), now, expires_at],
    )
    .map_err(|e| ServerError::DbError(format!("create session failed: {e}")))?;

    Ok(raw_token)
}

pub fn is_valid_session(conn: &Connection, raw_token: &str, now: i64) -> Result<bool, ServerError> {
    let hash = hash_token(raw_token);

    let found: Option<i64> = conn
        .query_row(
            r#"
            select id
            from admin_sessions
            where token_hash = ?
              and expires_at > ?
              and revoked_at is null
            "#,
            params![hash.as_slice(), now],
            |row| row.get(0),
        )
        .optional()
        .map_err(|e| ServerError::DbError(format!("session lookup failed: {e}")))?;

    Ok(found.is_some())
}

pub fn revoke_session(conn: &Connection, raw_token: &str, now: i64) -> Result<(), ServerError> {
    let hash = hash_token(raw_token);
    conn.execute(
        "update admin_sessions set revoked_at = ? where token_hash = ? and revoked_at is null",
        params![now, hash.as_slice()],
    )
    .map_err(|e| ServerError::DbError(format!("revoke session failed: {e}")))?;
    Ok(())
}
