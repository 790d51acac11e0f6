use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use crate::auth::Identity;
use crate::models::*;

pub(crate) const REGULAR_EMAIL: &str = "artem@mockbank.dev";
pub(crate) const ADMIN_EMAIL: &str = "admin@mockbank.dev";

/// The two demo users every process starts with: a regular one and an admin.
pub(crate) fn seed_users(now: DateTime<Utc>) -> Vec<UserData> {
    vec![regular_user(now), admin_user(now)]
}

fn card(id: &str, number: &str, expiry: &str, cvc: &str) -> Card {
    Card {
        id: id.to_string(),
        number: number.to_string(),
        expiry: expiry.to_string(),
        cvc: cvc.to_string(),
    }
}

fn txn(
    category: Category,
    name: &str,
    description: &str,
    amount: Decimal,
    date: DateTime<Utc>,
) -> Transaction {
    Transaction::new(category, name, description, amount, date)
}

fn regular_user(now: DateTime<Utc>) -> UserData {
    let banks = Bank::catalog();
    let tbank: Vec<Bank> = banks.iter().filter(|b| b.id == "tbank").cloned().collect();
    let sber_alfa: Vec<Bank> = banks
        .iter()
        .filter(|b| b.id == "sber" || b.id == "alfa")
        .cloned()
        .collect();

    let mut salary = Account::new(1, "Salary".into()).with_balance(Decimal::from(10_000));
    salary.color = "#FFDD2D".into();
    salary.cards = vec![
        card("seed-card-1", "2200700150745074", "08/27", "311"),
        card("seed-card-2", "2200700140004000", "11/26", "904"),
    ];
    salary.badge = Some(Badge::text("129", "#FF3B30"));

    // Newest first.
    let transactions = vec![
        txn(
            Category::Food,
            "Perekrestok",
            "Groceries",
            Decimal::new(-124_050, 2),
            now - Duration::hours(3),
        ),
        txn(
            Category::Transport,
            "Moscow Metro",
            "Troika top-up",
            Decimal::from(-349),
            now - Duration::days(1),
        ),
        txn(
            Category::Shopping,
            "Ozon",
            "Order 5572-114",
            Decimal::new(-219_999, 2),
            now - Duration::days(2),
        ),
        txn(
            Category::Health,
            "36.6 Pharmacy",
            "Vitamins",
            Decimal::from(-560),
            now - Duration::days(4),
        ),
        txn(
            Category::Income,
            "ACME LLC",
            "Salary",
            Decimal::from(85_000),
            now - Duration::days(9),
        ),
    ];

    UserData {
        email: Identity::new(REGULAR_EMAIL),
        frozen: false,
        name: "Artem".into(),
        avatar_url: "https://avatars.mockbank.dev/artem.png".into(),
        is_premium: false,
        is_admin: false,
        donation_balance: 3,
        accounts: vec![salary],
        cashback_partners: vec![
            CashbackPartner::new("perekrestok", "https://logos.mockbank.dev/perekrestok.svg"),
            CashbackPartner::new("ozon", "https://logos.mockbank.dev/ozon.svg"),
            CashbackPartner::new("metro", "https://logos.mockbank.dev/metro.svg"),
        ],
        cashback_progress: vec![
            CashbackSegment::new("#FFDD2D", 30),
            CashbackSegment::new("#21A038", 15),
        ],
        favorite_contacts: vec![
            FavoriteContact::new(1, "Ksenia K.".into(), "+7 980 908 12 34".into(), tbank),
            FavoriteContact::new(
                2,
                "Andrey Gosov".into(),
                "+7 916 555 01 02".into(),
                sber_alfa,
            ),
        ],
        transactions,
        custom_banks: Vec::new(),
        monthly_spending: MonthlySpending {
            month: now.format("%Y-%m").to_string(),
            amount: Decimal::new(339_708, 0),
        },
    }
}

fn admin_user(now: DateTime<Utc>) -> UserData {
    let mut main = Account::new(1, "Main".into()).with_balance(Decimal::from(250_000));
    main.cards = vec![card("seed-card-3", "2200700166476647", "03/28", "127")];
    let mut savings = Account::new(2, "Savings".into()).with_balance(Decimal::from(1_000_000));
    savings.icon_name = "piggy-bank".into();
    savings.icon_bg = "#50E3C2".into();
    savings.badge = Some(Badge::text("x1", "#4A90E2"));

    UserData {
        email: Identity::new(ADMIN_EMAIL),
        frozen: false,
        name: "Admin".into(),
        avatar_url: "https://avatars.mockbank.dev/admin.png".into(),
        is_premium: true,
        is_admin: true,
        donation_balance: 10,
        accounts: vec![main, savings],
        cashback_partners: Vec::new(),
        cashback_progress: Vec::new(),
        favorite_contacts: Vec::new(),
        transactions: vec![txn(
            Category::Income,
            "MockBank",
            "Interest",
            Decimal::new(125_075, 2),
            now - Duration::days(1),
        )],
        custom_banks: Vec::new(),
        monthly_spending: MonthlySpending {
            month: now.format("%Y-%m").to_string(),
            amount: Decimal::ZERO,
        },
    }
}
