//! Deterministic community code derivation.
//!
//! A code has the shape `CCC-PPP-TTT-SSSSSSNNNN`:
//!
//! - `CCC`, `PPP`, `TTT`: first three characters of country, province and
//!   city, uppercased and right-padded with `X` when shorter;
//! - `SSSSSS`: ASCII letters of the street, uppercased, truncated or
//!   right-padded with `X` to six characters;
//! - `NNNN`: street number left-padded with zeros to four digits. Longer
//!   numbers are kept whole.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::AddressTuple;

const PREFIX_LEN: usize = 3;
const STREET_LEN: usize = 6;
const NUMBER_WIDTH: usize = 4;
const PAD: char = 'X';

/// Human-readable identifier for a unique physical address.
///
/// # Examples
/// ```
/// use marketplace::domain::{AddressTuple, CommunityCode};
///
/// let address = AddressTuple::try_from_parts("España", "Andalucía", "Sevilla", "Gran Vía", "7")
///     .unwrap();
/// assert_eq!(CommunityCode::derive(&address).as_str(), "ESP-AND-SEV-GRANVA0007");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommunityCode(String);

impl CommunityCode {
    /// Derive the code for an address. Pure and total.
    pub fn derive(address: &AddressTuple) -> Self {
        let country = prefix_segment(address.country());
        let province = prefix_segment(address.province());
        let city = prefix_segment(address.city());
        let street = street_segment(address.street());
        let number = number_segment(address.street_number());
        Self(format!("{country}-{province}-{city}-{street}{number}"))
    }

    /// Rehydrate a code read back from storage.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CommunityCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CommunityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CommunityCode> for String {
    fn from(value: CommunityCode) -> Self {
        value.0
    }
}

fn prefix_segment(value: &str) -> String {
    let mut segment: String = value
        .trim()
        .chars()
        .flat_map(char::to_uppercase)
        .take(PREFIX_LEN)
        .collect();
    pad_to(&mut segment, PREFIX_LEN);
    segment
}

fn street_segment(value: &str) -> String {
    let mut segment: String = value
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase())
        .take(STREET_LEN)
        .collect();
    pad_to(&mut segment, STREET_LEN);
    segment
}

fn number_segment(value: &str) -> String {
    format!("{:0>width$}", value.trim(), width = NUMBER_WIDTH)
}

fn pad_to(segment: &mut String, len: usize) {
    let missing = len.saturating_sub(segment.chars().count());
    segment.extend(std::iter::repeat_n(PAD, missing));
}
