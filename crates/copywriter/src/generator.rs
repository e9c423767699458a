//! Auction-notice content generation.

use chrono::{NaiveDate, NaiveTime};

use bango_common::error::BangoError;
use bango_poster_model::content::{ContentBundle, DateCircleContent};

use crate::format::{format_date, format_list, format_time, title_case};
use crate::vocabulary::{CropName, Language, PRIMARY_SPONSOR};

/// Errors reported back to the caller; none of them is fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerateError {
    #[error("Select at least one location")]
    MissingLocations,

    #[error("Select a crop")]
    MissingCrop,

    #[error("Select a date")]
    MissingDate,

    #[error("Select a time")]
    MissingTime,

    #[error("Invalid date {value:?}: expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("Invalid time {value:?}: expected HH:MM")]
    InvalidTime { value: String },

    #[error("Unknown crop {value:?}")]
    UnknownCrop { value: String },

    #[error("Unknown language {value:?}: expected sw or en")]
    UnknownLanguage { value: String },
}

impl From<GenerateError> for BangoError {
    fn from(err: GenerateError) -> Self {
        BangoError::generate(err.to_string())
    }
}

/// Inputs collected by the generator form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Region names in selection order.
    pub locations: Vec<String>,
    pub crop: Option<CropName>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub language: Language,
}

pub fn parse_date(value: &str) -> Result<NaiveDate, GenerateError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| GenerateError::InvalidDate {
        value: value.to_string(),
    })
}

pub fn parse_time(value: &str) -> Result<NaiveTime, GenerateError> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| GenerateError::InvalidTime {
        value: value.to_string(),
    })
}

/// Selection set semantics: first occurrence wins, order is kept.
fn unique_locations(locations: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(locations.len());
    for location in locations {
        let location = location.trim();
        if location.is_empty() {
            continue;
        }
        if !seen.iter().any(|s| s.eq_ignore_ascii_case(location)) {
            seen.push(location.to_string());
        }
    }
    seen
}

/// Lower-case the first letter so a phrase can continue a sentence.
fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Build the localized content bundle for an auction notice.
pub fn generate(request: &GenerateRequest) -> Result<ContentBundle, GenerateError> {
    let locations = unique_locations(&request.locations);
    if locations.is_empty() {
        return Err(GenerateError::MissingLocations);
    }
    let crop = request.crop.ok_or(GenerateError::MissingCrop)?;
    let date = request.date.ok_or(GenerateError::MissingDate)?;
    let time = request.time.ok_or(GenerateError::MissingTime)?;
    let lang = request.language;

    let titled = locations.iter().map(|l| title_case(l)).collect::<Vec<_>>();
    let places = format_list(&titled, lang);

    let organizations = crop.organizations();
    let org_codes = organizations.iter().map(|o| o.code()).collect::<Vec<_>>();
    let orgs = format_list(&org_codes, lang);

    let when = format_date(date, lang);
    let clock = format_time(time, lang);
    let crop_name = crop.localized(lang);

    let (top_text, paragraph, circle_label) = match lang {
        Language::Sw => (
            "JAMHURI YA MUUNGANO WA TANZANIA\nWIZARA YA FEDHA\nSOKO LA BIDHAA TANZANIA",
            format!(
                "{sponsor}, {orgs} na Serikali ya Mikoa ya {places} Zinawataarifu Wanunuzi na \
                 Wadau wote kushiriki mnada wa zao la {crop} Mikoa ya {places}.\n\n\
                 Mnada utafanyika {weekday}, tarehe {numeric} Kuanzia {clock} Kwa njia ya \
                 kielektroniki.\n\nKaribuni wote",
                sponsor = PRIMARY_SPONSOR.code(),
                crop = crop_name.to_lowercase(),
                weekday = when.weekday,
                numeric = when.numeric,
                clock = lower_first(&clock),
            ),
            "Tarehe",
        ),
        Language::En => (
            "THE UNITED REPUBLIC OF TANZANIA\nMINISTRY OF FINANCE\nTANZANIA MERCANTILE EXCHANGE",
            format!(
                "{sponsor}, {orgs} and the Regional Government of {places} invite all Buyers \
                 and Stakeholders to participate in the {crop} auction from the {places} \
                 {regions}.\n\nThe auction will be held electronically on {weekday}, \
                 {numeric}, starting at {clock}.\n\nAll are welcome",
                sponsor = PRIMARY_SPONSOR.code(),
                crop = crop_name.to_lowercase(),
                regions = if locations.len() > 1 { "Regions" } else { "Region" },
                weekday = when.weekday,
                numeric = when.numeric,
            ),
            "Date",
        ),
    };

    let mut footer_logos: Vec<String> = Vec::with_capacity(organizations.len() + 1);
    for logo in std::iter::once(PRIMARY_SPONSOR)
        .chain(organizations.iter().copied())
        .map(|org| org.logo())
    {
        if !footer_logos.iter().any(|existing| existing == logo) {
            footer_logos.push(logo.to_string());
        }
    }

    tracing::debug!(
        crop = crop.code(),
        locations = locations.len(),
        language = ?lang,
        "Generated poster content"
    );

    Ok(ContentBundle {
        top_text: top_text.to_string(),
        heading: crop_name.to_uppercase(),
        paragraph,
        date_circle: DateCircleContent {
            top_text: circle_label.to_string(),
            main_text: when.day,
            bottom_text: format!("{}\n{}", when.month, when.year),
        },
        footer_logos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(lang: Language) -> GenerateRequest {
        GenerateRequest {
            locations: vec!["SINGIDA".to_string(), "DODOMA".to_string()],
            crop: Some(CropName::ChickPea),
            date: Some(parse_date("2025-07-09").unwrap()),
            time: Some(parse_time("10:30").unwrap()),
            language: lang,
        }
    }

    #[test]
    fn test_swahili_bundle() {
        let bundle = generate(&request(Language::Sw)).unwrap();
        assert_eq!(bundle.heading, "DENGU");
        assert_eq!(bundle.date_circle.top_text, "Tarehe");
        assert_eq!(bundle.date_circle.main_text, "09");
        assert_eq!(bundle.date_circle.bottom_text, "Julai\n2025");
        assert!(bundle
            .paragraph
            .starts_with("TMX, COPRA, TCDC, na WRRB na Serikali ya Mikoa ya Singida na Dodoma"));
        assert!(bundle.paragraph.contains("mnada wa zao la dengu"));
        assert!(bundle
            .paragraph
            .contains("Jumatano, tarehe 09/07/2025 Kuanzia saa Nne na nusu Asubuhi"));
        assert!(bundle.paragraph.ends_with("Karibuni wote"));
    }

    #[test]
    fn test_english_bundle() {
        let bundle = generate(&request(Language::En)).unwrap();
        assert_eq!(bundle.heading, "CHICK PEAS");
        assert_eq!(bundle.date_circle.top_text, "Date");
        assert_eq!(bundle.date_circle.bottom_text, "July\n2025");
        assert!(bundle.top_text.starts_with("THE UNITED REPUBLIC OF TANZANIA"));
        assert!(bundle
            .paragraph
            .contains("the chick peas auction from the Singida and Dodoma Regions."));
        assert!(bundle
            .paragraph
            .contains("on Wednesday, 09/07/2025, starting at 10:30 AM."));
    }

    #[test]
    fn test_single_region_is_singular() {
        let mut req = request(Language::En);
        req.locations = vec!["DAR ES SALAAM".to_string()];
        let bundle = generate(&req).unwrap();
        assert!(bundle.paragraph.contains("from the Dar Es Salaam Region."));
    }

    #[test]
    fn test_validation_errors() {
        let mut req = request(Language::Sw);
        req.locations.clear();
        assert_eq!(generate(&req), Err(GenerateError::MissingLocations));

        let mut req = request(Language::Sw);
        req.locations = vec!["  ".to_string()];
        assert_eq!(generate(&req), Err(GenerateError::MissingLocations));

        let mut req = request(Language::Sw);
        req.crop = None;
        assert_eq!(generate(&req), Err(GenerateError::MissingCrop));

        let mut req = request(Language::Sw);
        req.date = None;
        assert_eq!(generate(&req), Err(GenerateError::MissingDate));

        let mut req = request(Language::Sw);
        req.time = None;
        assert_eq!(generate(&req), Err(GenerateError::MissingTime));
    }

    #[test]
    fn test_duplicate_locations_collapse() {
        let mut req = request(Language::Sw);
        req.locations = vec![
            "SINGIDA".to_string(),
            "singida".to_string(),
            "DODOMA".to_string(),
        ];
        let bundle = generate(&req).unwrap();
        assert!(bundle.paragraph.contains("Mikoa ya Singida na Dodoma Zinawataarifu"));
    }

    #[test]
    fn test_gemstone_footer() {
        let mut req = request(Language::Sw);
        req.crop = Some(CropName::Gemstone);
        let bundle = generate(&req).unwrap();
        assert_eq!(
            bundle.footer_logos,
            vec!["assets/logos/tmx.png".to_string(), "assets/logos/mc.png".to_string()]
        );
        assert!(bundle.paragraph.starts_with("TMX, MC na Serikali"));
    }

    #[test]
    fn test_converts_into_bango_error() {
        let err: BangoError = GenerateError::MissingCrop.into();
        assert_eq!(err.to_string(), "Content generation error: Select a crop");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_date("09/07/2025"), Err(GenerateError::InvalidDate { .. })));
        assert!(matches!(parse_time("25:00"), Err(GenerateError::InvalidTime { .. })));
    }
}
