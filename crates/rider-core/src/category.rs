//! Equipment category and provider enums as the single source of truth
//! for their canonical strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical equipment categories checked and aggregated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EquipmentCategory {
    ConsoleFoh,
    ConsoleMon,
    Wireless,
    Iem,
    WiredMic,
    Monitor,
    InfraCat6,
    InfraHma,
    InfraCoax,
    InfraOpticalconDuo,
    InfraAnalog,
    ExtraSidefill,
    ExtraDrumfill,
    ExtraDjbooth,
}

impl EquipmentCategory {
    /// Every category, in the fixed comparison/reporting order.
    pub const ALL: [Self; 14] = [
        Self::ConsoleFoh,
        Self::ConsoleMon,
        Self::Wireless,
        Self::Iem,
        Self::WiredMic,
        Self::Monitor,
        Self::InfraCat6,
        Self::InfraHma,
        Self::InfraCoax,
        Self::InfraOpticalconDuo,
        Self::InfraAnalog,
        Self::ExtraSidefill,
        Self::ExtraDrumfill,
        Self::ExtraDjbooth,
    ];

    /// Human-readable label used in mismatch messages and reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ConsoleFoh => "FOH console",
            Self::ConsoleMon => "monitor console",
            Self::Wireless => "wireless system",
            Self::Iem => "IEM system",
            Self::WiredMic => "wired microphone",
            Self::Monitor => "monitor wedge",
            Self::InfraCat6 => "CAT6 run",
            Self::InfraHma => "HMA run",
            Self::InfraCoax => "coax run",
            Self::InfraOpticalconDuo => "opticalCON DUO run",
            Self::InfraAnalog => "analog line",
            Self::ExtraSidefill => "side fill",
            Self::ExtraDrumfill => "drum fill",
            Self::ExtraDjbooth => "DJ booth",
        }
    }

    /// True for categories stocked as a list of named models.
    #[must_use]
    pub const fn has_models(self) -> bool {
        matches!(
            self,
            Self::ConsoleFoh | Self::ConsoleMon | Self::Wireless | Self::Iem | Self::WiredMic
        )
    }

    /// True for the boolean stage-fixture categories.
    #[must_use]
    pub const fn is_extra(self) -> bool {
        matches!(
            self,
            Self::ExtraSidefill | Self::ExtraDrumfill | Self::ExtraDjbooth
        )
    }
}

impl fmt::Display for EquipmentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::ConsoleFoh => "console_foh",
            Self::ConsoleMon => "console_mon",
            Self::Wireless => "wireless",
            Self::Iem => "iem",
            Self::WiredMic => "wired_mic",
            Self::Monitor => "monitor",
            Self::InfraCat6 => "infra_cat6",
            Self::InfraHma => "infra_hma",
            Self::InfraCoax => "infra_coax",
            Self::InfraOpticalconDuo => "infra_opticalcon_duo",
            Self::InfraAnalog => "infra_analog",
            Self::ExtraSidefill => "extra_sidefill",
            Self::ExtraDrumfill => "extra_drumfill",
            Self::ExtraDjbooth => "extra_djbooth",
        };
        write!(f, "{s}")
    }
}

impl FromStr for EquipmentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "console_foh" => Ok(Self::ConsoleFoh),
            "console_mon" => Ok(Self::ConsoleMon),
            "wireless" => Ok(Self::Wireless),
            "iem" => Ok(Self::Iem),
            "wired_mic" => Ok(Self::WiredMic),
            "monitor" => Ok(Self::Monitor),
            "infra_cat6" => Ok(Self::InfraCat6),
            "infra_hma" => Ok(Self::InfraHma),
            "infra_coax" => Ok(Self::InfraCoax),
            "infra_opticalcon_duo" => Ok(Self::InfraOpticalconDuo),
            "infra_analog" => Ok(Self::InfraAnalog),
            "extra_sidefill" => Ok(Self::ExtraSidefill),
            "extra_drumfill" => Ok(Self::ExtraDrumfill),
            "extra_djbooth" => Ok(Self::ExtraDjbooth),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl Serialize for EquipmentCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for EquipmentCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown category strings.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown equipment category: {0}")]
pub struct UnknownCategory(String);

/// Who supplies a given equipment category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProviderMode {
    /// The festival's inventory supplies the gear; checked against stock.
    #[default]
    Festival,
    /// The band brings its own; never checked, always advisory.
    Band,
    /// A mix of both; checked per item plus one advisory warning.
    Mixed,
}

impl fmt::Display for ProviderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Festival => "festival",
            Self::Band => "band",
            Self::Mixed => "mixed",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ProviderMode {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "festival" => Ok(Self::Festival),
            "band" => Ok(Self::Band),
            "mixed" => Ok(Self::Mixed),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl Serialize for ProviderMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ProviderMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_categories() {
        for category in &EquipmentCategory::ALL {
            let s = category.to_string();
            let parsed: EquipmentCategory = s.parse().expect("should parse");
            assert_eq!(parsed, *category, "roundtrip failed for {category:?}");
        }
    }

    #[test]
    fn unknown_category_errors() {
        let result: Result<EquipmentCategory, _> = "laser_rig".parse();
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "unknown equipment category: laser_rig");
    }

    #[test]
    fn model_list_categories() {
        assert!(EquipmentCategory::ConsoleFoh.has_models());
        assert!(EquipmentCategory::WiredMic.has_models());
        assert!(!EquipmentCategory::Monitor.has_models());
        assert!(!EquipmentCategory::InfraCat6.has_models());
        assert!(!EquipmentCategory::ExtraDjbooth.has_models());
    }

    #[test]
    fn extras_flagged() {
        let extras: Vec<_> = EquipmentCategory::ALL
            .iter()
            .filter(|c| c.is_extra())
            .collect();
        assert_eq!(extras.len(), 3);
    }

    #[test]
    fn provider_mode_roundtrip() {
        for mode in [
            ProviderMode::Festival,
            ProviderMode::Band,
            ProviderMode::Mixed,
        ] {
            let parsed: ProviderMode = mode.to_string().parse().expect("should parse");
            assert_eq!(parsed, mode);
        }
        assert!("rental".parse::<ProviderMode>().is_err());
    }

    #[test]
    fn provider_mode_defaults_to_festival() {
        assert_eq!(ProviderMode::default(), ProviderMode::Festival);
    }

    #[test]
    fn category_serde_uses_canonical_strings() {
        let json = serde_json::to_string(&EquipmentCategory::InfraOpticalconDuo).unwrap();
        assert_eq!(json, "\"infra_opticalcon_duo\"");
        let parsed: EquipmentCategory = serde_json::from_str("\"console_foh\"").unwrap();
        assert_eq!(parsed, EquipmentCategory::ConsoleFoh);
    }
}
