#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

#[test]
fn test_parse_login() {
    assert_eq!(
        Action::parse("login artem@mockbank.dev password123").unwrap(),
        Action::SignIn(Credential::new("artem@mockbank.dev", "password123"))
    );
    // The password check belongs to the identity provider.
    assert_eq!(
        Action::parse("login artem@mockbank.dev").unwrap(),
        Action::SignIn(Credential::new("artem@mockbank.dev", ""))
    );
    assert_eq!(
        Action::parse("login"),
        Err(ParseError::Usage("login <email> <password>"))
    );
}

#[test]
fn test_parse_transfer_keeps_spaced_amount() {
    assert_eq!(
        Action::parse("transfer 1 2 2 000").unwrap(),
        Action::Transfer {
            from: 1,
            to: 2,
            amount: "2 000".into()
        }
    );
}

#[test]
fn test_parse_transfer_errors() {
    assert!(matches!(Action::parse("transfer 1 2"), Err(ParseError::Usage(_))));
    assert_eq!(
        Action::parse("transfer one 2 100"),
        Err(ParseError::Invalid("'one' is not a valid id".into()))
    );
}

#[test]
fn test_parse_pay_phone() {
    assert_eq!(
        Action::parse("pay-phone 1 sber 500 +7 980 908 12 34").unwrap(),
        Action::TransferByPhone {
            from: 1,
            phone: "+7 980 908 12 34".into(),
            bank: "sber".into(),
            amount: "500".into(),
        }
    );
}

#[test]
fn test_parse_pay_card() {
    assert_eq!(
        Action::parse("pay-card 1 500 2200 1234 5678 9012").unwrap(),
        Action::TransferByCard {
            from: 1,
            card: "2200 1234 5678 9012".into(),
            amount: "500".into(),
        }
    );
}

#[test]
fn test_parse_contact_add() {
    assert_eq!(
        Action::parse("contact-add Ksenia K. | +7 980 908 12 34 | tbank, sber").unwrap(),
        Action::AddContact {
            name: "Ksenia K.".into(),
            phone: "+7 980 908 12 34".into(),
            banks: vec!["tbank".into(), "sber".into()],
        }
    );
    assert!(matches!(
        Action::parse("contact-add Ksenia K."),
        Err(ParseError::Usage(_))
    ));
}

#[test]
fn test_parse_badge() {
    assert_eq!(
        Action::parse("badge 1 #FF3B30 129 | https://img.example/fire.svg").unwrap(),
        Action::SetBadge {
            account: 1,
            badge: Some(Badge::text("129", "#FF3B30").with_icon("https://img.example/fire.svg")),
        }
    );
    assert_eq!(
        Action::parse("badge-clear 2").unwrap(),
        Action::SetBadge {
            account: 2,
            badge: None
        }
    );
}

#[test]
fn test_parse_card_design_optional_url() {
    assert_eq!(
        Action::parse("card-design 1").unwrap(),
        Action::SetCardDesign {
            account: 1,
            url: None
        }
    );
}

#[test]
fn test_parse_bank_add() {
    assert_eq!(
        Action::parse("bank-add Ural Credit | https://logo").unwrap(),
        Action::AddCustomBank {
            name: "Ural Credit".into(),
            logo_url: "https://logo".into(),
            gradient: String::new(),
        }
    );
}

#[test]
fn test_parse_history_filters() {
    assert_eq!(
        Action::parse("history food").unwrap(),
        Action::FilterHistory(FilterChange::Category(Some(Category::Food)))
    );
    assert_eq!(
        Action::parse("history all").unwrap(),
        Action::FilterHistory(FilterChange::Category(None))
    );
    assert_eq!(
        Action::parse("search coffee bean").unwrap(),
        Action::FilterHistory(FilterChange::Search(Some("coffee bean".into())))
    );
    assert_eq!(
        Action::parse("month 2024-08").unwrap(),
        Action::FilterHistory(FilterChange::Month(Some("2024-08".into())))
    );
    assert!(matches!(
        Action::parse("month August"),
        Err(ParseError::Invalid(_))
    ));
    assert!(matches!(
        Action::parse("month 2024-1"),
        Err(ParseError::Invalid(_))
    ));
    assert_eq!(
        Action::parse("month").unwrap(),
        Action::FilterHistory(FilterChange::Month(None))
    );
    assert!(matches!(
        Action::parse("history travel"),
        Err(ParseError::Invalid(_))
    ));
}

#[test]
fn test_filter_change_apply() {
    let mut filter = HistoryFilter::default();
    FilterChange::Category(Some(Category::Income)).apply(&mut filter);
    FilterChange::Month(Some("2024-08".into())).apply(&mut filter);
    assert_eq!(filter.category, Some(Category::Income));
    FilterChange::Clear.apply(&mut filter);
    assert!(filter.is_empty());
}

#[test]
fn test_parse_admin_commands() {
    assert_eq!(
        Action::parse("admin-select Artem@MockBank.dev").unwrap(),
        Action::AdminSelect(Identity::new("artem@mockbank.dev"))
    );
    assert_eq!(
        Action::parse("admin-freeze").unwrap(),
        Action::AdminEdit(AdminEdit {
            frozen: Some(true),
            ..Default::default()
        })
    );
    assert_eq!(
        Action::parse("admin-balance 1 -1 500,50").unwrap(),
        Action::AdminEdit(AdminEdit {
            balances: vec![(1, dec!(-1500.50))],
            ..Default::default()
        })
    );
    assert!(matches!(
        Action::parse("admin-points lots"),
        Err(ParseError::Invalid(_))
    ));
}

#[test]
fn test_parse_tab_and_open() {
    assert_eq!(Action::parse("tab Payments").unwrap(), Action::Navigate(Tab::Payments));
    assert_eq!(Action::parse("open qr").unwrap(), Action::Open(Feature::ScanQr));
    assert!(matches!(Action::parse("tab bank"), Err(ParseError::Invalid(_))));
}

#[test]
fn test_aliases() {
    assert_eq!(Action::parse("q").unwrap(), Action::Quit);
    assert_eq!(Action::parse("h").unwrap(), Action::Help);
    assert_eq!(Action::parse("  help  ").unwrap(), Action::Help);
}

#[test]
fn test_unknown_command_suggests_closest() {
    assert_eq!(
        Action::parse("transfr 1 2 3"),
        Err(ParseError::Unknown {
            input: "transfr".into(),
            suggestion: "transfer".into()
        })
    );
    let err = Action::parse("logn").unwrap_err();
    assert_eq!(err.to_string(), "Unknown command: logn. Did you mean login?");
}

#[test]
fn test_command_list_sorted_without_aliases() {
    let names: Vec<&str> = command_list().iter().map(|(n, _)| *n).collect();
    assert!(names.windows(2).all(|w| w[0] < w[1]));
    assert!(!names.contains(&"q"));
    assert!(names.contains(&"transfer"));
}

#[test]
fn test_levenshtein() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("same", "same"), 0);
}
