//! Mosaic definitions and the lookup port used by the confirmation flow.
//!
//! A definition tells the device how to render a mosaic quantity
//! (divisibility, ticker, display name) and whether a levy applies. The
//! lookup is read-only reference data; a missing definition is a valid
//! outcome and leads to the "unknown mosaic" prompts.

use serde::{Deserialize, Serialize};

use crate::config::MAX_DIVISIBILITY;
use crate::error::TransactionError;
use crate::transaction::types::Network;

/// How a levy is computed from the transferred quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevyKind {
    /// A flat fee, independent of the quantity.
    Absolute,
    /// A fee per ten thousand of the transferred quantity.
    Percentile,
}

/// A secondary fee charged whenever the mosaic is transferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Levy {
    pub kind: LevyKind,
    pub fee: u64,
    /// Namespace of the asset the levy is paid in.
    pub namespace: String,
    /// Name of the asset the levy is paid in.
    pub mosaic: String,
}

/// Display and levy metadata for one mosaic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MosaicDefinition {
    /// Human-readable name, e.g. `"DIMCOIN"`.
    pub name: String,
    /// Short ticker shown after amounts, e.g. `"DIM"`.
    pub ticker: String,
    pub namespace: String,
    pub mosaic: String,
    /// Number of decimal places of the raw quantity.
    pub divisibility: u32,
    #[serde(default)]
    pub levy: Option<Levy>,
    /// Networks the definition is valid on. `None` means all of them.
    #[serde(default)]
    pub networks: Option<Vec<Network>>,
}

impl MosaicDefinition {
    fn matches(&self, namespace: &str, mosaic: &str, network: Network) -> bool {
        self.namespace == namespace
            && self.mosaic == mosaic
            && self
                .networks
                .as_ref()
                .map_or(true, |networks| networks.contains(&network))
    }
}

/// Read-only source of mosaic definitions.
pub trait MosaicLookup {
    /// Finds the definition of `namespace.mosaic` valid on `network`.
    fn lookup(&self, namespace: &str, mosaic: &str, network: Network) -> Option<&MosaicDefinition>;
}

/// An in-memory table of mosaic definitions.
///
/// Every definition in a registry has a divisibility of at most
/// [`MAX_DIVISIBILITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MosaicRegistry {
    definitions: Vec<MosaicDefinition>,
}

impl MosaicRegistry {
    /// Builds a registry, rejecting definitions NEM could not have issued.
    pub fn new(definitions: Vec<MosaicDefinition>) -> Result<Self, TransactionError> {
        if let Some(def) = definitions
            .iter()
            .find(|d| d.divisibility > MAX_DIVISIBILITY)
        {
            return Err(TransactionError::MalformedInput(format!(
                "mosaic {}.{} has divisibility {}, the maximum is {MAX_DIVISIBILITY}",
                def.namespace, def.mosaic, def.divisibility
            )));
        }
        Ok(Self { definitions })
    }

    /// The mosaics every device knows about.
    pub fn builtin() -> Self {
        let mainnet = Some(vec![Network::Mainnet]);
        let definitions = vec![
            MosaicDefinition {
                name: "NEM".into(),
                ticker: "XEM".into(),
                namespace: "nem".into(),
                mosaic: "xem".into(),
                divisibility: 6,
                levy: None,
                networks: None,
            },
            MosaicDefinition {
                name: "DIMCOIN".into(),
                ticker: "DIM".into(),
                namespace: "dim".into(),
                mosaic: "coin".into(),
                divisibility: 6,
                levy: Some(Levy {
                    kind: LevyKind::Percentile,
                    fee: 10,
                    namespace: "dim".into(),
                    mosaic: "coin".into(),
                }),
                networks: mainnet.clone(),
            },
            MosaicDefinition {
                name: "DIM TOKEN".into(),
                ticker: "DIMTOK".into(),
                namespace: "dim".into(),
                mosaic: "token".into(),
                divisibility: 6,
                levy: None,
                networks: mainnet.clone(),
            },
            MosaicDefinition {
                name: "Breeze Token".into(),
                ticker: "BREEZE".into(),
                namespace: "breeze".into(),
                mosaic: "breeze-token".into(),
                divisibility: 0,
                levy: None,
                networks: mainnet.clone(),
            },
            MosaicDefinition {
                name: "PacNEM Game Credits".into(),
                ticker: "PAC:HRT".into(),
                namespace: "pacnem".into(),
                mosaic: "heart".into(),
                divisibility: 0,
                levy: None,
                networks: mainnet.clone(),
            },
            MosaicDefinition {
                name: "PacNEM Score Tokens".into(),
                ticker: "PAC:CHS".into(),
                namespace: "pacnem".into(),
                mosaic: "cheese".into(),
                divisibility: 6,
                levy: Some(Levy {
                    kind: LevyKind::Percentile,
                    fee: 100,
                    namespace: "nem".into(),
                    mosaic: "xem".into(),
                }),
                networks: mainnet,
            },
        ];
        Self { definitions }
    }

    /// Parses a JSON array of definitions.
    pub fn from_json(json: &str) -> Result<Self, TransactionError> {
        let definitions: Vec<MosaicDefinition> = serde_json::from_str(json).map_err(|e| {
            TransactionError::MalformedInput(format!("invalid mosaic definitions: {e}"))
        })?;
        Self::new(definitions)
    }

    /// Appends definitions from `other`. Earlier entries win on lookup.
    pub fn extend(&mut self, other: MosaicRegistry) {
        self.definitions.extend(other.definitions);
    }

    /// All definitions, in lookup order.
    pub fn definitions(&self) -> &[MosaicDefinition] {
        &self.definitions
    }

    /// Definitions visible on `network`.
    pub fn for_network(&self, network: Network) -> impl Iterator<Item = &MosaicDefinition> {
        self.definitions.iter().filter(move |d| {
            d.networks
                .as_ref()
                .map_or(true, |networks| networks.contains(&network))
        })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl MosaicLookup for MosaicRegistry {
    fn lookup(&self, namespace: &str, mosaic: &str, network: Network) -> Option<&MosaicDefinition> {
        self.definitions
            .iter()
            .find(|d| d.matches(namespace, mosaic, network))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xem_is_known_everywhere() {
        let registry = MosaicRegistry::builtin();
        for network in [Network::Mainnet, Network::Testnet, Network::Mijin] {
            let xem = registry.lookup("nem", "xem", network).unwrap();
            assert_eq!(xem.divisibility, 6);
            assert_eq!(xem.ticker, "XEM");
        }
    }

    #[test]
    fn network_restricted_definitions() {
        let registry = MosaicRegistry::builtin();
        assert!(registry.lookup("dim", "coin", Network::Mainnet).is_some());
        assert!(registry.lookup("dim", "coin", Network::Testnet).is_none());
    }

    #[test]
    fn unknown_mosaic_is_none() {
        let registry = MosaicRegistry::builtin();
        assert!(registry.lookup("foo", "bar", Network::Mainnet).is_none());
    }

    #[test]
    fn dimcoin_levy() {
        let registry = MosaicRegistry::builtin();
        let levy = registry
            .lookup("dim", "coin", Network::Mainnet)
            .and_then(|d| d.levy.clone())
            .unwrap();
        assert_eq!(levy.kind, LevyKind::Percentile);
        assert_eq!(levy.fee, 10);
        assert_eq!((levy.namespace.as_str(), levy.mosaic.as_str()), ("dim", "coin"));
    }

    #[test]
    fn for_network_filters() {
        let registry = MosaicRegistry::builtin();
        assert_eq!(registry.for_network(Network::Mainnet).count(), registry.len());
        assert_eq!(registry.for_network(Network::Testnet).count(), 1);
    }

    #[test]
    fn registry_from_json() {
        let json = r#"[
            {
                "name": "Test Token",
                "ticker": "TST",
                "namespace": "test",
                "mosaic": "token",
                "divisibility": 2,
                "levy": {"kind": "absolute", "fee": 50, "namespace": "nem", "mosaic": "xem"},
                "networks": ["testnet"]
            }
        ]"#;
        let registry = MosaicRegistry::from_json(json).unwrap();
        let def = registry.lookup("test", "token", Network::Testnet).unwrap();
        assert_eq!(def.divisibility, 2);
        assert_eq!(def.levy.as_ref().map(|l| l.kind), Some(LevyKind::Absolute));
        assert!(registry.lookup("test", "token", Network::Mainnet).is_none());
    }

    #[test]
    fn registry_from_bad_json() {
        assert!(matches!(
            MosaicRegistry::from_json("{"),
            Err(TransactionError::MalformedInput(_))
        ));
    }

    #[test]
    fn divisibility_above_six_is_rejected() {
        let json = |divisibility: u64| {
            format!(
                r#"[{{ "name": "X", "ticker": "X", "namespace": "x", "mosaic": "y",
                      "divisibility": {divisibility} }}]"#
            )
        };
        assert!(MosaicRegistry::from_json(&json(6)).is_ok());
        for divisibility in [7, 70_000, 50_000_000] {
            assert!(matches!(
                MosaicRegistry::from_json(&json(divisibility)),
                Err(TransactionError::MalformedInput(m)) if m.contains("x.y")
            ));
        }

        let mut wide = MosaicRegistry::builtin().definitions()[0].clone();
        wide.divisibility = MAX_DIVISIBILITY + 1;
        assert!(MosaicRegistry::new(vec![wide]).is_err());
    }

    #[test]
    fn builtin_definitions_are_in_range() {
        let builtin = MosaicRegistry::builtin();
        assert!(builtin
            .definitions()
            .iter()
            .all(|d| d.divisibility <= MAX_DIVISIBILITY));
    }

    #[test]
    fn extend_keeps_builtin_precedence() {
        let mut registry = MosaicRegistry::builtin();
        let mut shadow = MosaicRegistry::builtin().definitions()[0].clone();
        shadow.ticker = "FAKE".into();
        registry.extend(MosaicRegistry::new(vec![shadow]).unwrap());
        let xem = registry.lookup("nem", "xem", Network::Mainnet).unwrap();
        assert_eq!(xem.ticker, "XEM");
    }
}
