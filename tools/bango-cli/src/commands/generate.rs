//! Generate localized auction text.

use std::path::PathBuf;

use bango_common::config::AppConfig;
use bango_copywriter::{
    generate, is_known_region, parse_date, parse_time, CropName, GenerateRequest, Language,
};

use super::load_editor;

pub struct GenerateArgs {
    pub locations: Vec<String>,
    pub crop: String,
    pub date: Option<String>,
    pub time: Option<String>,
    pub lang: Option<String>,
    pub with_logos: bool,
}

pub fn run(
    config: &AppConfig,
    state: Option<PathBuf>,
    args: GenerateArgs,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let language: Language = args
        .lang
        .as_deref()
        .unwrap_or(&config.generator.language)
        .parse()?;
    let crop: CropName = args.crop.parse()?;
    let date = match &args.date {
        Some(value) => parse_date(value)?,
        None => chrono::Local::now().date_naive(),
    };
    let time = parse_time(
        args.time
            .as_deref()
            .unwrap_or(&config.generator.default_time),
    )?;

    for location in &args.locations {
        if !is_known_region(location) {
            tracing::warn!(location = %location, "Not a known region; using it as typed");
        }
    }

    let request = GenerateRequest {
        locations: args.locations,
        crop: Some(crop),
        date: Some(date),
        time: Some(time),
        language,
    };
    let bundle = generate(&request)?;

    let mut editor = load_editor(state.as_deref())?;
    if args.with_logos {
        editor.apply_content(&bundle.with_logos());
    } else {
        editor.apply_content(&bundle.text_only());
    }

    let json = editor.state().to_json()?;
    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            println!("Poster state written to {}", path.display());
            println!("  Heading: {}", bundle.heading);
            println!(
                "  Date: {} {}",
                bundle.date_circle.main_text,
                bundle.date_circle.bottom_text.replace('\n', " ")
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
