//! Domain vocabulary: languages, crops, organizations, regions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::generator::GenerateError;

/// Output language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Sw,
    En,
}

impl Language {
    /// Conjunction used when joining lists.
    pub fn conjunction(self) -> &'static str {
        match self {
            Language::Sw => "na",
            Language::En => "and",
        }
    }
}

impl FromStr for Language {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sw" | "swahili" => Ok(Language::Sw),
            "en" | "english" => Ok(Language::En),
            _ => Err(GenerateError::UnknownLanguage {
                value: s.to_string(),
            }),
        }
    }
}

/// Regulatory and sponsoring bodies that appear on auction notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Organization {
    /// Tanzania Mercantile Exchange, the primary sponsor.
    Tmx,
    /// Tanzania Coffee Board.
    Tcb,
    /// Cashew Board of Tanzania.
    Cbt,
    /// Tanzania Cooperative Development Commission.
    Tcdc,
    /// Warehouse Receipt Regulatory Board.
    Wrrb,
    /// Cereals and Other Produce Regulatory Authority.
    Copra,
    /// Mining Commission.
    Mc,
}

impl Organization {
    pub fn code(self) -> &'static str {
        match self {
            Organization::Tmx => "TMX",
            Organization::Tcb => "TCB",
            Organization::Cbt => "CBT",
            Organization::Tcdc => "TCDC",
            Organization::Wrrb => "WRRB",
            Organization::Copra => "COPRA",
            Organization::Mc => "MC",
        }
    }

    /// Logo asset, relative to the asset root.
    pub fn logo(self) -> &'static str {
        match self {
            Organization::Tmx => "assets/logos/tmx.png",
            Organization::Tcb => "assets/logos/tcb.png",
            Organization::Cbt => "assets/logos/cbt.png",
            Organization::Tcdc => "assets/logos/tcdc.png",
            Organization::Wrrb => "assets/logos/wrrb.png",
            Organization::Copra => "assets/logos/copra.png",
            Organization::Mc => "assets/logos/mc.png",
        }
    }
}

/// Sponsor listed first on every notice and in the footer.
pub const PRIMARY_SPONSOR: Organization = Organization::Tmx;

/// Commodities traded at auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CropName {
    #[serde(rename = "COFFEE")]
    Coffee,
    #[serde(rename = "SESAME")]
    Sesame,
    #[serde(rename = "SOYA")]
    Soya,
    #[serde(rename = "BEAN")]
    Bean,
    #[serde(rename = "COCOA")]
    Cocoa,
    #[serde(rename = "CHICK PEA")]
    ChickPea,
    #[serde(rename = "PIGEON PEA")]
    PigeonPea,
    #[serde(rename = "CASHEW")]
    Cashew,
    #[serde(rename = "COTTON")]
    Cotton,
    #[serde(rename = "SUNFLOWER")]
    Sunflower,
    #[serde(rename = "GROUNDNUT")]
    Groundnut,
    #[serde(rename = "GEMSTONE")]
    Gemstone,
    #[serde(rename = "GREEN GRAM")]
    GreenGram,
}

impl CropName {
    pub const ALL: [CropName; 13] = [
        CropName::Coffee,
        CropName::Sesame,
        CropName::Soya,
        CropName::Bean,
        CropName::Cocoa,
        CropName::ChickPea,
        CropName::PigeonPea,
        CropName::Cashew,
        CropName::Cotton,
        CropName::Sunflower,
        CropName::Groundnut,
        CropName::Gemstone,
        CropName::GreenGram,
    ];

    /// Canonical upper-case name, e.g. `CHICK PEA`.
    pub fn code(self) -> &'static str {
        match self {
            CropName::Coffee => "COFFEE",
            CropName::Sesame => "SESAME",
            CropName::Soya => "SOYA",
            CropName::Bean => "BEAN",
            CropName::Cocoa => "COCOA",
            CropName::ChickPea => "CHICK PEA",
            CropName::PigeonPea => "PIGEON PEA",
            CropName::Cashew => "CASHEW",
            CropName::Cotton => "COTTON",
            CropName::Sunflower => "SUNFLOWER",
            CropName::Groundnut => "GROUNDNUT",
            CropName::Gemstone => "GEMSTONE",
            CropName::GreenGram => "GREEN GRAM",
        }
    }

    pub fn swahili(self) -> &'static str {
        match self {
            CropName::Coffee => "KAHAWA",
            CropName::Sesame => "UFUTA",
            CropName::Soya => "SOYA",
            CropName::Bean => "MAHARAGE",
            CropName::Cocoa => "KAKAO",
            CropName::ChickPea => "DENGU",
            CropName::PigeonPea => "MBAAZI",
            CropName::Cashew => "KOROSHO",
            CropName::Cotton => "PAMBA",
            CropName::Sunflower => "ALIZETI",
            CropName::Groundnut => "KARANGA",
            CropName::Gemstone => "MADINI",
            CropName::GreenGram => "CHOROKO",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            CropName::Coffee => "Coffee",
            CropName::Sesame => "Sesame",
            CropName::Soya => "Soya",
            CropName::Bean => "Beans",
            CropName::Cocoa => "Cocoa",
            CropName::ChickPea => "Chick Peas",
            CropName::PigeonPea => "Pigeon Peas",
            CropName::Cashew => "Cashews",
            CropName::Cotton => "Cotton",
            CropName::Sunflower => "Sunflower",
            CropName::Groundnut => "Groundnuts",
            CropName::Gemstone => "Gemstones",
            CropName::GreenGram => "Green Grams",
        }
    }

    pub fn localized(self, lang: Language) -> &'static str {
        match lang {
            Language::Sw => self.swahili(),
            Language::En => self.english(),
        }
    }

    /// Organizations overseeing this crop's auctions, in display order.
    pub fn organizations(self) -> &'static [Organization] {
        use Organization::*;
        match self {
            CropName::Coffee => &[Tcb, Tcdc, Wrrb],
            CropName::Cashew => &[Cbt, Tcdc, Wrrb],
            CropName::Gemstone => &[Mc],
            CropName::Sesame
            | CropName::Soya
            | CropName::Bean
            | CropName::Cocoa
            | CropName::ChickPea
            | CropName::PigeonPea
            | CropName::Cotton
            | CropName::Sunflower
            | CropName::Groundnut
            | CropName::GreenGram => &[Copra, Tcdc, Wrrb],
        }
    }
}

impl fmt::Display for CropName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CropName {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['_', '-'], " ").to_ascii_uppercase();
        CropName::ALL
            .into_iter()
            .find(|crop| crop.code() == wanted)
            .ok_or_else(|| GenerateError::UnknownCrop {
                value: s.to_string(),
            })
    }
}

/// Regions offered by the generator, in picker order.
pub const KNOWN_REGIONS: [&str; 28] = [
    "SINGIDA",
    "MBEYA",
    "MANYARA",
    "RUVUMA",
    "MTWARA",
    "DODOMA",
    "LINDI",
    "MOROGORO",
    "PWANI",
    "ARUSHA",
    "DAR ES SALAAM",
    "GEITA",
    "IRINGA",
    "KAGERA",
    "KATAVI",
    "KIGOMA",
    "KILIMANJARO",
    "MARA",
    "MWANZA",
    "NJOMBE",
    "PEMBA",
    "RUKWA",
    "SHINYANGA",
    "SIMIYU",
    "SONGWE",
    "TABORA",
    "TANGA",
    "ZANZIBAR",
];

pub fn is_known_region(name: &str) -> bool {
    let wanted = name.trim().to_ascii_uppercase();
    KNOWN_REGIONS.iter().any(|region| *region == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_parsing_accepts_variants() {
        assert_eq!("CHICK PEA".parse::<CropName>().unwrap(), CropName::ChickPea);
        assert_eq!("chick-pea".parse::<CropName>().unwrap(), CropName::ChickPea);
        assert_eq!("green_gram".parse::<CropName>().unwrap(), CropName::GreenGram);
        assert!("maize".parse::<CropName>().is_err());
    }

    #[test]
    fn test_crop_serde_uses_canonical_names() {
        let json = serde_json::to_string(&CropName::PigeonPea).unwrap();
        assert_eq!(json, "\"PIGEON PEA\"");
    }

    #[test]
    fn test_every_crop_has_organizations() {
        for crop in CropName::ALL {
            assert!(!crop.organizations().is_empty(), "{crop} has no organizations");
            assert_eq!(crop.code().parse::<CropName>().unwrap(), crop);
        }
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("SW".parse::<Language>().unwrap(), Language::Sw);
        assert_eq!("english".parse::<Language>().unwrap(), Language::En);
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_known_regions() {
        assert!(is_known_region("dar es salaam"));
        assert!(!is_known_region("NAIROBI"));
    }
}
