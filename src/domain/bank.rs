#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BankName {
    GlobalTrust,
    UniversalCommerce,
    Fortune,
    HorizonSavings,
    Pinnacle,
    AuroraNational,
    SummitFinancial,
    CrescentTrust,
    LegacyCreditUnion,
    InfinityState,
}

impl BankName {
    /// Menu order, 1-based when offered to the user.
    pub const ALL: [BankName; 10] = [
        BankName::GlobalTrust,
        BankName::UniversalCommerce,
        BankName::Fortune,
        BankName::HorizonSavings,
        BankName::Pinnacle,
        BankName::AuroraNational,
        BankName::SummitFinancial,
        BankName::CrescentTrust,
        BankName::LegacyCreditUnion,
        BankName::InfinityState,
    ];

    pub fn from_menu_choice(choice: usize) -> Option<Self> {
        choice
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx))
            .copied()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BankName::GlobalTrust => "Global Trust Bank",
            BankName::UniversalCommerce => "Universal Bank of Commerce",
            BankName::Fortune => "Fortune Bank",
            BankName::HorizonSavings => "Horizon Savings Bank",
            BankName::Pinnacle => "Pinnacle Bank",
            BankName::AuroraNational => "Aurora National Bank",
            BankName::SummitFinancial => "Summit Financial Bank",
            BankName::CrescentTrust => "Crescent Bank & Trust",
            BankName::LegacyCreditUnion => "Legacy Credit Union",
            BankName::InfinityState => "Infinity State Bank",
        }
    }
}

impl core::fmt::Display for BankName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
