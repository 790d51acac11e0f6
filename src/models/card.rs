use chrono::{Datelike, NaiveDate};
use rand::Rng;

/// Issuer prefix for generated cards. The numbers only look like payment data.
const CARD_PREFIX: &str = "2200";
const CARD_DIGITS: usize = 16;
const VALID_FOR_YEARS: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Card {
    pub id: String,
    /// Unmasked, digits only.
    pub number: String,
    /// Format: "MM/YY"
    pub expiry: String,
    pub cvc: String,
}

impl Card {
    pub(crate) fn generate<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Self {
        let mut number = String::with_capacity(CARD_DIGITS);
        number.push_str(CARD_PREFIX);
        while number.len() < CARD_DIGITS {
            number.push(random_digit(rng));
        }

        let cvc: String = (0..3).map(|_| random_digit(rng)).collect();
        let expiry = format!(
            "{:02}/{:02}",
            today.month(),
            (today.year() + VALID_FOR_YEARS).rem_euclid(100)
        );

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            number,
            expiry,
            cvc,
        }
    }

    pub(crate) fn last4(&self) -> &str {
        let start = self.number.len().saturating_sub(4);
        &self.number[start..]
    }

    pub(crate) fn masked(&self) -> String {
        format!("•••• {}", self.last4())
    }
}

fn random_digit<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(b'0' + rng.gen_range(0..10u8))
}
