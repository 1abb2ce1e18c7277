pub mod human;
pub mod json;

use serde::Serialize;

use self::json::JsonEnvelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl OutputFormat {
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Human
        }
    }
}

/// Trait for command reports that can be rendered in both human and JSON formats.
pub trait CommandOutput: Serialize {
    fn human_display(&self) -> String;
}

/// Print a command report in the requested format.
pub fn print_output<T: CommandOutput>(output: &T, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Human => human::success(&output.human_display()),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&JsonEnvelope::success(output))?
            );
        }
    }
    Ok(())
}

/// Report a fatal error in the requested format.
pub fn print_error(err: &anyhow::Error, format: OutputFormat) {
    match format {
        OutputFormat::Human => human::error(&format!("{err:#}")),
        OutputFormat::Json => {
            let envelope = JsonEnvelope::error(format!("{err:#}"));
            match serde_json::to_string_pretty(&envelope) {
                Ok(json) => println!("{json}"),
                Err(_) => human::error(&format!("{err:#}")),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Summary {
        count: usize,
    }

    impl CommandOutput for Summary {
        fn human_display(&self) -> String {
            format!("{} entries", self.count)
        }
    }

    #[test]
    fn test_from_flag() {
        assert_eq!(OutputFormat::from_flag(true), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flag(false), OutputFormat::Human);
    }

    #[test]
    fn test_human_display() {
        assert_eq!(Summary { count: 3 }.human_display(), "3 entries");
    }

    #[test]
    fn test_envelope_wraps_report() {
        let summary = Summary { count: 2 };
        let json = serde_json::to_value(JsonEnvelope::success(&summary)).unwrap();
        assert_eq!(json["data"]["count"], 2);
    }
}
