//! Patterns command implementation
//!
//! Lists the active pattern catalog in match order.

use super::{load_settings, report_error, OutputFormat};
use crate::extraction::PatternCatalog;
use clap::Args;
use serde::Serialize;

/// Arguments for the patterns command
#[derive(Args, Debug)]
pub struct PatternsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct RuleListing<'a> {
    index: usize,
    name: &'a str,
    entity_type: &'a str,
    base_confidence: f32,
    pattern: &'a str,
}

#[derive(Serialize)]
struct CatalogListing<'a> {
    version: &'a str,
    rules: Vec<RuleListing<'a>>,
}

impl PatternsArgs {
    /// Execute the patterns command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_settings(config_path) {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        let catalog =
            match PatternCatalog::load_or_default(config.extraction.pattern_catalog.as_deref()) {
                Ok(c) => c,
                Err(e) => return Ok(report_error(&e, "Failed to load pattern catalog")),
            };

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&listing(&catalog))?)
            }
            OutputFormat::Table => print!("{}", format_table(&catalog)),
        }

        Ok(0)
    }
}

fn listing(catalog: &PatternCatalog) -> CatalogListing<'_> {
    CatalogListing {
        version: catalog.version(),
        rules: catalog
            .rules()
            .iter()
            .enumerate()
            .map(|(index, rule)| RuleListing {
                index,
                name: &rule.name,
                entity_type: rule.entity_type.label(),
                base_confidence: rule.base_confidence,
                pattern: rule.regex.as_str(),
            })
            .collect(),
    }
}

fn format_table(catalog: &PatternCatalog) -> String {
    let mut output = format!(
        "Pattern catalog {} ({} rules, {} abbreviations)\n\n",
        catalog.version(),
        catalog.len(),
        catalog.abbreviations().len()
    );
    output.push_str(&format!(
        "{:>4}  {:<32} {:<14} {:>5}\n",
        "#", "RULE", "TYPE", "BASE"
    ));
    for (index, rule) in catalog.rules().iter().enumerate() {
        output.push_str(&format!(
            "{:>4}  {:<32} {:<14} {:>5.2}\n",
            index,
            rule.name,
            rule.entity_type.label(),
            rule.base_confidence
        ));
    }
    output
}
