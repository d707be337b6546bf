//! # Simulated Login
//!
//! There is no account backend. Every login succeeds after a short delay and
//! produces a demo [`SessionUser`]; nothing is persisted.

use std::time::Duration;

use lib_utils::validation::email_local_part;
use rand::Rng;
use shared::SessionUser;

pub const LOGIN_DELAY: Duration = Duration::from_millis(1200);

pub const DEMO_NAME: &str = "Ramesh Kumar";
pub const DEMO_PHONE: &str = "+91 9876543210";
pub const DEMO_LOCATION: &str = "Indore, MP";

/// Build the demo session for `email`.
pub fn demo_user(email: &str, rng: &mut impl Rng) -> SessionUser {
    let name = email_local_part(email).unwrap_or(DEMO_NAME).to_string();
    let number: u16 = rng.random_range(1000..=9999);

    SessionUser {
        name,
        kisan_id: format!("KISAN-IN-DEMO-{}", number),
        phone: DEMO_PHONE.to_string(),
        location: DEMO_LOCATION.to_string(),
        is_demo: true,
    }
}

/// Simulated login; always succeeds.
#[tracing::instrument(skip_all)]
pub async fn login(email: &str) -> SessionUser {
    tokio::time::sleep(LOGIN_DELAY).await;
    let user = demo_user(email, &mut rand::rng());
    tracing::info!(kisan_id = %user.kisan_id, "Demo session started");
    user
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_demo_user_from_email() {
        let mut rng = StdRng::seed_from_u64(7);
        let user = demo_user("ramesh@kisan.in", &mut rng);

        assert_eq!(user.name, "ramesh");
        assert!(user.is_demo);
        assert_eq!(user.phone, DEMO_PHONE);
        assert_eq!(user.location, DEMO_LOCATION);

        let number: u16 = user.kisan_id.trim_start_matches("KISAN-IN-DEMO-").parse().unwrap();
        assert!((1000..=9999).contains(&number));
    }

    #[test]
    fn test_demo_user_blank_email() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(demo_user("  ", &mut rng).name, DEMO_NAME);
        assert_eq!(demo_user("@kisan.in", &mut rng).name, DEMO_NAME);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits() {
        let start = tokio::time::Instant::now();
        let user = login("sita@farm.in").await;
        assert!(start.elapsed() >= LOGIN_DELAY);
        assert_eq!(user.name, "sita");
    }
}
