use std::io::{self, Write};

use anyhow::{bail, Context, Result};

use crate::api::ApiClient;
use crate::models::{AuthResponse, LoginRequest, RegisterRequest, VerifyEmailRequest};
use crate::session::{self, Session};

/// Client-side password rule: at least 8 characters, one uppercase
/// letter, and one symbol. The server enforces the same rule.
pub fn validate_password(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_uppercase())
        && password
            .chars()
            .any(|c| !c.is_alphanumeric() && !c.is_whitespace())
}

/// Verification codes are exactly four digits.
pub fn validate_code(code: &str) -> bool {
    code.len() == 4 && code.chars().all(|c| c.is_ascii_digit())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim_end_matches(['\r', '\n']).to_string())
}

fn save_session(api: &AuthResponse) -> Result<Session> {
    let token = match &api.token {
        Some(t) => t.clone(),
        None => bail!("Server did not return a token"),
    };
    let s = Session {
        token,
        user_id: api.id,
        username: api.username.clone(),
        email: api.email.clone(),
    };
    s.save()?;
    Ok(s)
}

pub async fn login(api: &ApiClient, email: &str, password: Option<&str>) -> Result<()> {
    let password = match password {
        Some(p) => p.to_string(),
        None => prompt("Password: ")?,
    };

    let response = api
        .login(&LoginRequest {
            email: email.to_string(),
            password,
        })
        .await
        .context("Login failed")?;

    let saved = save_session(&response)?;
    println!(
        "Logged in as {}",
        saved.username.as_deref().unwrap_or(email)
    );
    Ok(())
}

pub async fn register(
    api: &ApiClient,
    username: &str,
    email: &str,
    password: Option<&str>,
) -> Result<()> {
    let password = match password {
        Some(p) => p.to_string(),
        None => prompt("Password: ")?,
    };
    if !validate_password(&password) {
        bail!("Password must contain at least 8 characters, 1 uppercase letter, and 1 symbol");
    }

    let response = api
        .register(&RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password,
        })
        .await
        .context("Registration failed")?;

    if response.needs_verification() {
        println!("Account created. A 4-digit verification code was sent to {}.", email);
        println!("Run 'taskpro verify --email {} --code <code>' to finish.", email);
        return Ok(());
    }

    let saved = save_session(&response)?;
    println!(
        "Registered and logged in as {}",
        saved.username.as_deref().unwrap_or(username)
    );
    Ok(())
}

pub async fn verify(api: &ApiClient, email: &str, code: &str) -> Result<()> {
    if !validate_code(code) {
        bail!("Verification code must be exactly 4 digits");
    }

    let response = api
        .verify_email(&VerifyEmailRequest {
            email: email.to_string(),
            verification_code: code.to_string(),
        })
        .await
        .context("Verification failed")?;

    let saved = save_session(&response)?;
    println!(
        "Email verified. Logged in as {}",
        saved.username.as_deref().unwrap_or(email)
    );
    Ok(())
}

pub async fn resend(api: &ApiClient, email: &str) -> Result<()> {
    api.resend_code(email)
        .await
        .context("Failed to resend code")?;
    println!("Verification code resent to {}", email);
    Ok(())
}

pub fn logout() -> Result<()> {
    if session::clear()? {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

pub fn whoami() -> Result<()> {
    match session::load()? {
        Some(s) => {
            println!(
                "{} <{}>",
                s.username.as_deref().unwrap_or("(unknown)"),
                s.email.as_deref().unwrap_or("unknown")
            );
        }
        None => println!("Not logged in."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // ==================== Unit Tests ====================

    #[test]
    fn accepts_conforming_password() {
        assert!(validate_password("Str0ng-pass!"));
        assert!(validate_password("Abcdefg!"));
    }

    #[test]
    fn rejects_short_password() {
        assert!(!validate_password("Ab!"));
    }

    #[test]
    fn rejects_password_without_uppercase() {
        assert!(!validate_password("weak-pass1!"));
    }

    #[test]
    fn rejects_password_without_symbol() {
        assert!(!validate_password("Weakpass1"));
    }

    #[test]
    fn code_must_be_four_digits() {
        assert!(validate_code("0042"));
        assert!(!validate_code("42"));
        assert!(!validate_code("12345"));
        assert!(!validate_code("12a4"));
        assert!(!validate_code(""));
    }

    // ==================== Property-Based Tests ====================

    proptest! {
        #[test]
        fn prop_lowercase_alnum_never_validates(pw in "[a-z0-9]{8,20}") {
            prop_assert!(!validate_password(&pw));
        }

        #[test]
        fn prop_four_digit_codes_validate(code in "[0-9]{4}") {
            prop_assert!(validate_code(&code));
        }
    }
}
