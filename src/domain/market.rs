//! Market categories and their instrument catalogs.
//!
//! - [`Market`] - One of the four supported asset classes
//! - [`Market::instruments`] - The fixed instrument set a subscriber may pick from

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Asset class a subscriber picks before choosing an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    Forex,
    Crypto,
    Commodities,
    Indices,
}

const FOREX: &[&str] = &[
    "EURUSD", "GBPUSD", "USDJPY", "USDCHF", "AUDUSD", "USDCAD", "NZDUSD", "EURGBP",
];
const CRYPTO: &[&str] = &["BTCUSD", "ETHUSD", "XRPUSD", "SOLUSD", "BNBUSD", "ADAUSD"];
const COMMODITIES: &[&str] = &["XAUUSD", "XAGUSD", "USOIL", "UKOIL", "NATGAS"];
const INDICES: &[&str] = &["US30", "US500", "US100", "DE40", "UK100", "JP225"];

impl Market {
    /// All markets in menu order.
    pub const ALL: [Market; 4] = [
        Market::Forex,
        Market::Crypto,
        Market::Commodities,
        Market::Indices,
    ];

    /// Wire name, also used in callback tokens.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Forex => "forex",
            Self::Crypto => "crypto",
            Self::Commodities => "commodities",
            Self::Indices => "indices",
        }
    }

    /// Human-readable label for menus.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forex => "Forex",
            Self::Crypto => "Crypto",
            Self::Commodities => "Commodities",
            Self::Indices => "Indices",
        }
    }

    /// Instruments a subscriber may choose within this market.
    #[must_use]
    pub const fn instruments(self) -> &'static [&'static str] {
        match self {
            Self::Forex => FOREX,
            Self::Crypto => CRYPTO,
            Self::Commodities => COMMODITIES,
            Self::Indices => INDICES,
        }
    }

    /// Look up an instrument in this market's catalog, ignoring case.
    ///
    /// Returns the canonical (uppercase) catalog entry.
    #[must_use]
    pub fn find_instrument(self, input: &str) -> Option<&'static str> {
        let wanted = input.trim();
        self.instruments()
            .iter()
            .copied()
            .find(|candidate| candidate.eq_ignore_ascii_case(wanted))
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a market.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown market `{0}`")]
pub struct UnknownMarket(pub String);

impl FromStr for Market {
    type Err = UnknownMarket;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownMarket(s.to_string()))
    }
}
