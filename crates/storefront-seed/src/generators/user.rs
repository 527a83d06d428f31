//! User generation with run-unique emails.

use std::collections::HashSet;

use fake::{
    Fake,
    faker::{
        internet::en::FreeEmailProvider,
        name::en::{FirstName, LastName},
        phone_number::en::PhoneNumber,
    },
};
use rand::{Rng, seq::SliceRandom};
use time::OffsetDateTime;
use uuid::Uuid;

use super::{random_id, timestamps};
use crate::models::LoyaltyStatus;

/// Attempts at a random email before falling back to a counter suffix.
const MAX_EMAIL_ATTEMPTS: usize = 16;

/// Generated user data ready for database insertion.
#[derive(Debug, Clone)]
pub struct GeneratedUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub registration_date: OffsetDateTime,
    pub loyalty_status: LoyaltyStatus,
}

/// Generates users, tracking every email handed out so far.
pub struct UserGenerator {
    now: OffsetDateTime,
    seen_emails: HashSet<String>,
}

impl UserGenerator {
    /// Creates a generator whose registration dates end at the current time.
    pub fn new() -> Self {
        Self::at(OffsetDateTime::now_utc())
    }

    /// Creates a generator with a fixed reference time.
    pub fn at(now: OffsetDateTime) -> Self {
        Self {
            now,
            seen_emails: HashSet::new(),
        }
    }

    /// Generates a single user. The email is unique among all users
    /// produced by this generator.
    pub fn generate(&mut self, rng: &mut impl Rng) -> GeneratedUser {
        let first_name: String = FirstName().fake_with_rng(rng);
        let last_name: String = LastName().fake_with_rng(rng);
        let email = self.unique_email(&first_name, &last_name, rng);
        let phone: String = PhoneNumber().fake_with_rng(rng);
        let loyalty_status = *LoyaltyStatus::ALL
            .choose(rng)
            .unwrap_or(&LoyaltyStatus::Bronze);

        GeneratedUser {
            id: random_id(rng),
            first_name,
            last_name,
            email,
            phone,
            registration_date: timestamps::this_decade(self.now, rng),
            loyalty_status,
        }
    }

    /// Generates multiple users.
    pub fn generate_batch(&mut self, count: usize, rng: &mut impl Rng) -> Vec<GeneratedUser> {
        (0..count).map(|_| self.generate(rng)).collect()
    }

    /// Number of distinct emails issued so far.
    pub fn issued_emails(&self) -> usize {
        self.seen_emails.len()
    }

    fn unique_email(&mut self, first: &str, last: &str, rng: &mut impl Rng) -> String {
        let local = email_local_part(first, last);

        for _ in 0..MAX_EMAIL_ATTEMPTS {
            let suffix: u32 = rng.gen_range(1..9999);
            let domain: String = FreeEmailProvider().fake_with_rng(rng);
            let candidate = format!("{local}{suffix}@{domain}");
            if self.seen_emails.insert(candidate.clone()) {
                return candidate;
            }
        }

        // Crowded name space: count upward until a free address turns up.
        let mut counter = self.seen_emails.len();
        loop {
            let candidate = format!("{local}.{counter}@example.com");
            if self.seen_emails.insert(candidate.clone()) {
                return candidate;
            }
            counter += 1;
        }
    }
}

impl Default for UserGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// "Mary Ann", "O'Neil" -> "maryann.oneil"
fn email_local_part(first: &str, last: &str) -> String {
    let normalize = |part: &str| -> String {
        part.chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase()
    };

    match (normalize(first), normalize(last)) {
        (f, l) if f.is_empty() && l.is_empty() => "user".to_string(),
        (f, l) if l.is_empty() => f,
        (f, l) if f.is_empty() => l,
        (f, l) => format!("{f}.{l}"),
    }
}
