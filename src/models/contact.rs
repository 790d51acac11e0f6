pub(crate) type ContactId = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Bank {
    pub id: String,
    pub name: String,
    pub logo_url: String,
    pub gradient: String,
}

impl Bank {
    pub(crate) fn new(id: &str, name: &str, logo_url: &str, gradient: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            logo_url: logo_url.to_string(),
            gradient: gradient.to_string(),
        }
    }

    /// Banks every user can pick as a transfer destination.
    pub(crate) fn catalog() -> Vec<Bank> {
        vec![
            Self::new(
                "tbank",
                "T-Bank",
                "https://logos.mockbank.dev/tbank.svg",
                "linear-gradient(135deg, #FFDD2D, #FAB619)",
            ),
            Self::new(
                "sber",
                "Sber",
                "https://logos.mockbank.dev/sber.svg",
                "linear-gradient(135deg, #21A038, #0B7A2A)",
            ),
            Self::new(
                "alfa",
                "Alfa-Bank",
                "https://logos.mockbank.dev/alfa.svg",
                "linear-gradient(135deg, #EF3124, #B4140C)",
            ),
            Self::new(
                "vtb",
                "VTB",
                "https://logos.mockbank.dev/vtb.svg",
                "linear-gradient(135deg, #0A2896, #002882)",
            ),
        ]
    }

    /// Find a bank by id (case-insensitive) in a slice.
    pub(crate) fn find_by_id<'a>(banks: &'a [Bank], id: &str) -> Option<&'a Bank> {
        let lower = id.to_lowercase();
        banks.iter().find(|b| b.id.to_lowercase() == lower)
    }
}

impl std::fmt::Display for Bank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A saved transfer destination. Banks are informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FavoriteContact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub initials: String,
    pub banks: Vec<Bank>,
}

impl FavoriteContact {
    pub(crate) fn new(id: ContactId, name: String, phone: String, banks: Vec<Bank>) -> Self {
        let initials = initials_of(&name);
        Self {
            id,
            name,
            phone,
            initials,
            banks,
        }
    }
}

/// First letter of up to two words, upper-cased. "?" when no word starts with a letter.
pub(super) fn initials_of(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_alphabetic())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}
