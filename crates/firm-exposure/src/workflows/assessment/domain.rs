use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Percentage split of the firm's client portfolio, kept exactly as parsed.
/// Only the wizard gate decides whether a split is acceptable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientMix {
    pub sme: i32,
    pub corporate: i32,
    pub international: i32,
}

impl ClientMix {
    pub const fn new(sme: i32, corporate: i32, international: i32) -> Self {
        Self {
            sme,
            corporate,
            international,
        }
    }

    pub fn total(&self) -> i64 {
        i64::from(self.sme) + i64::from(self.corporate) + i64::from(self.international)
    }

    /// Whether the allocation covers exactly the whole portfolio.
    pub fn is_complete(&self) -> bool {
        self.total() == 100
    }
}

/// Reads a percentage the way a form field would: optional sign, then leading
/// digits. Anything without digits becomes 0. Out-of-range values are kept so
/// the gate sees what was typed.
pub fn parse_percent(raw: Option<&str>) -> i32 {
    let Some(raw) = raw else {
        return 0;
    };

    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    let digits = &unsigned[..end];

    if digits.is_empty() {
        return 0;
    }

    // overflowing digit runs saturate, which still never totals 100
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Practice area selected on the specialization step.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SpecializationTag {
    CapitalGains,
    ExitTax,
    DigitalInvoicing,
    CrossBorder,
    /// Tag outside the current vocabulary. Stored as given, never scored.
    Other(String),
}

impl SpecializationTag {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "capitalGains" => Self::CapitalGains,
            "exitTax" => Self::ExitTax,
            "digitalInvoicing" => Self::DigitalInvoicing,
            "crossBorder" => Self::CrossBorder,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::CapitalGains => "capitalGains",
            Self::ExitTax => "exitTax",
            Self::DigitalInvoicing => "digitalInvoicing",
            Self::CrossBorder => "crossBorder",
            Self::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::CapitalGains => "Capital gains advisory",
            Self::ExitTax => "Exit tax handling",
            Self::DigitalInvoicing => "Digital invoicing",
            Self::CrossBorder => "Cross-border structuring",
            Self::Other(raw) => raw,
        }
    }

    pub fn vocabulary() -> [Self; 4] {
        [
            Self::CapitalGains,
            Self::ExitTax,
            Self::DigitalInvoicing,
            Self::CrossBorder,
        ]
    }
}

impl From<String> for SpecializationTag {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<&str> for SpecializationTag {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

impl From<SpecializationTag> for String {
    fn from(value: SpecializationTag) -> Self {
        match value {
            SpecializationTag::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SpecializationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Set of selected practice areas.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Specialization(BTreeSet<SpecializationTag>);

impl Specialization {
    pub fn from_tags<I, T>(tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<SpecializationTag>,
    {
        Self(tags.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, tag: &SpecializationTag) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpecializationTag> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Answer to "do you run a client portal?". `Unknown` means no radio was chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortalAnswer {
    #[default]
    Unknown,
    Yes,
    No,
}

impl PortalAnswer {
    /// Radio values arrive as strings; only `"true"` counts as a yes.
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection {
            None => Self::Unknown,
            Some("true") => Self::Yes,
            Some(_) => Self::No,
        }
    }

    pub const fn is_present(self) -> bool {
        matches!(self, Self::Yes)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Not answered",
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DigitalMaturity {
    pub portal: PortalAnswer,
    pub e_invoicing: bool,
    pub time_tracking: bool,
    pub automation: bool,
}

impl DigitalMaturity {
    /// Every tool in place, portal answered yes.
    pub const fn fully_equipped() -> Self {
        Self {
            portal: PortalAnswer::Yes,
            e_invoicing: true,
            time_tracking: true,
            automation: true,
        }
    }
}

/// Breadth of the client base beyond Belgium.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeographicScope {
    #[default]
    Unknown,
    BelgiumOnly,
    EuropeScope,
    GlobalScope,
}

impl GeographicScope {
    pub const fn ordered() -> [Self; 3] {
        [Self::BelgiumOnly, Self::EuropeScope, Self::GlobalScope]
    }

    /// Unrecognised selections are kept as `Unknown`, which scores like any
    /// other non-domestic answer.
    pub fn from_selection(selection: Option<&str>) -> Self {
        match selection {
            Some("belgiumOnly") => Self::BelgiumOnly,
            Some("europeScope") => Self::EuropeScope,
            Some("globalScope") => Self::GlobalScope,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::BelgiumOnly => "belgiumOnly",
            Self::EuropeScope => "europeScope",
            Self::GlobalScope => "globalScope",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Not selected",
            Self::BelgiumOnly => "Belgium only",
            Self::EuropeScope => "European clients",
            Self::GlobalScope => "Global clients",
        }
    }

    pub const fn is_domestic(self) -> bool {
        matches!(self, Self::BelgiumOnly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_percent_reads_leading_digits() {
        assert_eq!(parse_percent(Some("40")), 40);
        assert_eq!(parse_percent(Some("  35%")), 35);
        assert_eq!(parse_percent(Some("12.9")), 12);
        assert_eq!(parse_percent(Some("+7")), 7);
    }

    #[test]
    fn parse_percent_falls_back_to_zero() {
        assert_eq!(parse_percent(None), 0);
        assert_eq!(parse_percent(Some("")), 0);
        assert_eq!(parse_percent(Some("abc")), 0);
        assert_eq!(parse_percent(Some("-")), 0);
    }

    #[test]
    fn parse_percent_keeps_out_of_range_values() {
        assert_eq!(parse_percent(Some("250")), 250);
        assert_eq!(parse_percent(Some("-20")), -20);
        assert_eq!(parse_percent(Some("99999999999999999999")), i32::MAX);
        assert_eq!(parse_percent(Some("-2147483648")), i32::MIN);
    }

    #[test]
    fn client_mix_total_does_not_overflow() {
        let mix = ClientMix::new(i32::MAX, i32::MAX, i32::MAX);
        assert_eq!(mix.total(), 3 * i64::from(i32::MAX));
        assert!(!mix.is_complete());
        assert!(ClientMix::new(-20, 60, 60).is_complete());
    }

    #[test]
    fn unknown_tags_round_trip_as_raw_strings() {
        let tag = SpecializationTag::from("transferPricing");
        assert_eq!(tag, SpecializationTag::Other("transferPricing".to_string()));
        assert_eq!(String::from(tag), "transferPricing");
        assert_eq!(
            SpecializationTag::from("exitTax"),
            SpecializationTag::ExitTax
        );
    }

    #[test]
    fn specialization_has_set_semantics() {
        let set = Specialization::from_tags(["exitTax", "capitalGains", "exitTax"]);
        assert_eq!(set.len(), 2);
        assert_eq!(
            set,
            Specialization::from_tags(["capitalGains", "exitTax"])
        );
    }

    #[test]
    fn portal_selection_is_tri_state() {
        assert_eq!(PortalAnswer::from_selection(None), PortalAnswer::Unknown);
        assert_eq!(PortalAnswer::from_selection(Some("true")), PortalAnswer::Yes);
        assert_eq!(PortalAnswer::from_selection(Some("false")), PortalAnswer::No);
        assert!(!PortalAnswer::Unknown.is_present());
        assert!(!PortalAnswer::No.is_present());
        assert_ne!(PortalAnswer::Unknown, PortalAnswer::No);
    }

    #[test]
    fn scope_serializes_with_form_values() {
        let json = serde_json::to_string(&GeographicScope::GlobalScope).expect("serializes");
        assert_eq!(json, "\"globalScope\"");
        assert_eq!(
            GeographicScope::from_selection(Some("mars")),
            GeographicScope::Unknown
        );
    }
}
