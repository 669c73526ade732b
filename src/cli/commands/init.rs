//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "lexmask.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing lexmask configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. List known names under [masking.gazetteer], or pass");
                println!("     model spans with `lexmask mask --spans spans.json`");
                println!("  3. Validate configuration: lexmask validate-config");
                println!("  4. Extract entities: lexmask extract --input judgment.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# lexmask configuration

[application]
log_level = "info"

[extraction]
confidence_threshold = 0.70

[masking]
mask_token = "[REDACTED]"
entities_to_mask = ["PETITIONER", "RESPONDENT", "JUDGE", "LAWYER", "WITNESS", "OTHER_PERSON", "ORG"]

[audit]
enabled = false

[logging]
local_enabled = false
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# lexmask configuration
# Legal entity extraction and PII masking for Indian legal text
#
# Values may reference environment variables as ${VAR}; LEXMASK_* variables
# override individual settings (e.g. LEXMASK_MASKING_MASK_TOKEN).

[application]
# trace | debug | info | warn | error
log_level = "info"

[extraction]
# Entities below this confidence are dropped (0.0 - 1.0)
confidence_threshold = 0.70

# Characters of surrounding text used for scoring signals
context_window = 50

# Longest context snippet attached to an entity
max_context_chars = 160

# Reject texts longer than this many characters
# max_text_chars = 200000

# Load rules from a file instead of the built-in catalog
# pattern_catalog = "patterns/legal_patterns.toml"

[extraction.confidence]
ceiling = 0.95
year_boost = 0.01
cross_reference_boost = 0.02
keyword_boost = 0.01
abbreviation_boost = 0.03

[masking]
mask_token = "[REDACTED]"

# Span labels that are replaced; any other label is left untouched
entities_to_mask = [
    "PETITIONER",
    "RESPONDENT",
    "JUDGE",
    "LAWYER",
    "WITNESS",
    "OTHER_PERSON",
    "ORG",
]

# Known names per label, matched case-insensitively on word boundaries
[masking.gazetteer]
JUDGE = ["Justice Sharma"]
PETITIONER = ["Ramesh Kumar"]
ORG = ["Acme Textiles Pvt Ltd"]

[audit]
# Append one record per masking request; span values are stored as SHA-256
enabled = false
log_path = "./audit/masking.log"
json_format = true

[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "./logs"
# daily | hourly
local_rotation = "daily"
"#
        .to_string()
    }
}
