use serde::{Deserialize, Serialize};

/// Sentinel label for debits whose memo matches no known provider. These
/// stay visible in every report so new remittance services surface for
/// review instead of vanishing.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

/// Non-remittance services excluded from the review entirely. Matching is
/// case-insensitive contains; order is preserved from the source table.
const EXCLUSION_PATTERNS: &[&str] = &[
    "APPLE COM BILL",
    "APPLE CASH",
    "Disney Plus",
    "SpotifyUS",
    "METRO BY T MOBIL",
    "SIE PLAYSTATIONN",
    "PROGRESSIVE LEAS",
    "PAYPAL",
    "Chime",
    "PCA*SKY DANCER CASINO",
    "CASH APP",
];

/// Known remittance providers: raw memo pattern → canonical vendor label.
/// First match wins, so keep the order — some patterns are substrings of
/// others' contexts (e.g. "SERVICIO UNITELLER" before "UNITELLER").
const RECOGNITION_PATTERNS: &[(&str, &str)] = &[
    ("RIA Financial Services", "RIA"),
    ("Ria Money Transfer", "RIA"),
    ("RMTLY", "Remitly"),
    ("Remitly", "Remitly"),
    ("Felix Pago", "Felix Pago"),
    ("Taptap Send", "TapTap Send"),
    ("TapTap Send", "TapTap Send"),
    ("BOSS MONEY", "Boss Money"),
    ("BOSSREVOLUTIONMONEYXFE", "Boss Money"),
    ("PANGEA MONEY TRANSFER", "Pangea"),
    ("WorldRemit", "WorldRemit"),
    ("WU DIGITAL USA", "Western Union"),
    ("XOOM", "Xoom"),
    ("ASTRA*MyBambu", "MyBambu"),
    ("MONEYGRAM US ONLINE", "MoneyGram"),
    ("MoneyGram", "MoneyGram"),
    ("VIAMERICAS", "Viamericas"),
    ("SERVICIO UNITELLER", "Uniteller"),
    ("UNITELLER", "Uniteller"),
    ("MAXITRANSFERS", "MaxiTransfers"),
    ("OMN*MONEY TRANSF", "Omni Money Transfer"),
    ("PNM*Tornado Bus", "Tornado Bus"),
];

/// Per-transaction verdict from the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VendorVerdict {
    /// Known non-remittance service; drop from all aggregation.
    Excluded,
    /// Recognized provider, normalized to its canonical label.
    Recognized(String),
    /// No pattern matched; aggregate under [`UNKNOWN_VENDOR`].
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recognizer {
    pub pattern: String,
    pub vendor: String,
}

/// The resolver's pattern tables. These are data, not logic: operators can
/// swap in an edited table via [`VendorRules::from_toml`] without touching
/// the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorRules {
    pub exclusions: Vec<String>,
    pub recognizers: Vec<Recognizer>,
}

impl Default for VendorRules {
    fn default() -> Self {
        Self {
            exclusions: EXCLUSION_PATTERNS.iter().map(|s| s.to_string()).collect(),
            recognizers: RECOGNITION_PATTERNS
                .iter()
                .map(|(pattern, vendor)| Recognizer {
                    pattern: pattern.to_string(),
                    vendor: vendor.to_string(),
                })
                .collect(),
        }
    }
}

impl VendorRules {
    pub fn from_toml(toml_content: &str) -> Result<Self, String> {
        toml::from_str(toml_content).map_err(|e| format!("Failed to parse TOML: {e}"))
    }

    /// Resolves a memo to a vendor verdict. Pure and total: uppercase the
    /// memo, check exclusions first (an exclusion always wins), then scan
    /// the recognizers in order, first match wins.
    pub fn resolve(&self, summary: &str) -> VendorVerdict {
        let upper = summary.to_uppercase();

        if self
            .exclusions
            .iter()
            .any(|p| upper.contains(&p.to_uppercase()))
        {
            return VendorVerdict::Excluded;
        }

        for rec in &self.recognizers {
            if upper.contains(&rec.pattern.to_uppercase()) {
                return VendorVerdict::Recognized(rec.vendor.clone());
            }
        }

        VendorVerdict::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(summary: &str) -> VendorVerdict {
        VendorRules::default().resolve(summary)
    }

    fn recognized(vendor: &str) -> VendorVerdict {
        VendorVerdict::Recognized(vendor.to_string())
    }

    #[test]
    fn recognizes_canonical_aliases() {
        assert_eq!(resolve("RIA Financial Services payment"), recognized("RIA"));
        assert_eq!(resolve("ria money transfer 0423"), recognized("RIA"));
        assert_eq!(resolve("RMTLY* 889123"), recognized("Remitly"));
        assert_eq!(resolve("WU DIGITAL USA 123"), recognized("Western Union"));
        assert_eq!(resolve("ASTRA*MyBambu app"), recognized("MyBambu"));
        assert_eq!(resolve("PNM*Tornado Bus tkt"), recognized("Tornado Bus"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(resolve("moneygram us online"), recognized("MoneyGram"));
        assert_eq!(resolve("BOSSREVOLUTIONMONEYXFE"), recognized("Boss Money"));
    }

    #[test]
    fn excluded_services_win_over_recognition() {
        assert_eq!(resolve("APPLE COM BILL $9.99"), VendorVerdict::Excluded);
        assert_eq!(resolve("CASH APP*JOHN DOE"), VendorVerdict::Excluded);
        // Exclusion check runs strictly first, even when a recognition
        // pattern also appears in the memo.
        assert_eq!(
            resolve("PAYPAL transfer to Remitly"),
            VendorVerdict::Excluded
        );
    }

    #[test]
    fn first_match_wins_on_order() {
        // "SERVICIO UNITELLER" precedes the bare "UNITELLER" entry; both
        // normalize to the same canonical label.
        assert_eq!(resolve("SERVICIO UNITELLER MX"), recognized("Uniteller"));
        assert_eq!(resolve("UNITELLER 4421"), recognized("Uniteller"));
    }

    #[test]
    fn unmatched_memo_is_unknown() {
        assert_eq!(resolve("XYZ CORP TRANSFER"), VendorVerdict::Unknown);
        assert_eq!(resolve(""), VendorVerdict::Unknown);
    }

    #[test]
    fn from_toml_override_table() {
        let rules = VendorRules::from_toml(
            r#"
            exclusions = ["NETFLIX"]

            [[recognizers]]
            pattern = "ACME WIRE"
            vendor = "Acme"
            "#,
        )
        .unwrap();
        assert_eq!(rules.resolve("NETFLIX.COM"), VendorVerdict::Excluded);
        assert_eq!(
            rules.resolve("acme wire svc"),
            VendorVerdict::Recognized("Acme".to_string())
        );
        assert_eq!(rules.resolve("Remitly"), VendorVerdict::Unknown);
    }

    #[test]
    fn from_toml_rejects_malformed_input() {
        assert!(VendorRules::from_toml("exclusions = 3").is_err());
    }
}
