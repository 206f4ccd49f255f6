use super::*;

#[test]
fn tokens_are_random_and_url_safe() {
    let a = generate_token();
    let b = generate_token();
    assert_ne!(a, b);
    assert_eq!(a.len(), 43);
    assert!(
        a.chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
}

#[test]
fn token_hash_is_sha256_hex() {
    let hash = hash_token("abc");
    assert_eq!(
        hash,
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn new_session_stores_hash_not_token() {
    let (token, session) = new_session("usr00001", false, &SessionConfig::default());
    assert_eq!(session.user_id, "usr00001");
    assert_eq!(session.token_hash, hash_token(&token));
    assert_ne!(session.token_hash, token);
    assert!(session.expires_at > session.created_at);
}

#[test]
fn session_cookie_attributes() {
    let config = SessionConfig::default();
    let cookie = session_cookie("tok", false, &config);
    assert_eq!(
        cookie,
        "admin-session=tok; Path=/; HttpOnly; SameSite=Lax; Max-Age=604800"
    );

    let remembered = session_cookie("tok", true, &config);
    assert!(remembered.contains("Max-Age=2592000"));
    assert!(!remembered.contains("Secure"));

    let secure = SessionConfig {
        secure: true,
        ..Default::default()
    };
    assert!(session_cookie("tok", false, &secure).ends_with("; Secure"));
}

#[test]
fn clear_cookie_expires_immediately() {
    let cookie = clear_cookie(&SessionConfig::default());
    assert!(cookie.starts_with("admin-session=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[test]
fn token_is_found_among_other_cookies() {
    assert_eq!(
        token_from_cookies("theme=dark; admin-session=abc123; lang=ru"),
        Some("abc123")
    );
    assert_eq!(token_from_cookies("admin-session=abc123"), Some("abc123"));
    assert_eq!(token_from_cookies("theme=dark"), None);
    assert_eq!(token_from_cookies("admin-session="), None);
    assert_eq!(token_from_cookies(""), None);
}

#[test]
fn lifetimes_are_kept_in_range() {
    let huge = SessionConfig {
        secure: false,
        ttl_days: 200_000_000_000_000,
        remember_ttl_days: i64::MAX,
    };
    assert_eq!(huge.ttl_for(false), MAX_SESSION_DAYS);
    assert_eq!(huge.ttl_for(true), MAX_SESSION_DAYS);
    assert!(
        session_cookie("tok", true, &huge)
            .ends_with(&format!("Max-Age={}", MAX_SESSION_DAYS * 24 * 60 * 60))
    );
    let (_, session) = new_session("usr00001", false, &huge);
    assert!(session.expires_at > session.created_at);

    let negative = SessionConfig {
        secure: false,
        ttl_days: -3,
        remember_ttl_days: 0,
    };
    assert_eq!(negative.ttl_for(false), 1);
    assert_eq!(negative.ttl_for(true), 1);
    assert!(session_cookie("tok", false, &negative).ends_with("Max-Age=86400"));
    let (_, session) = new_session("usr00001", false, &negative);
    assert!(session.expires_at > session.created_at);
}
