use colored::Colorize;

pub struct Theme {
    pub label: fn(&str) -> String,
    pub sql: fn(&str) -> String,
    pub result: fn(&str) -> String,
    pub error: fn(&str) -> String,
}

impl Theme {
    pub fn from_name(name: &str) -> Self {
        match name {
            "default" | "" => Self::default_theme(),
            "mono" => Self::mono(),
            "ocean" => Self::ocean(),
            _ => {
                eprintln!("{}", format!("✘ Unknown theme: {}", name).red());
                Self::default_theme()
            }
        }
    }

    /// No styling at all; used for HTML/JSON output and in tests
    pub fn plain() -> Self {
        Self {
            label: |s| s.to_string(),
            sql: |s| s.to_string(),
            result: |s| s.to_string(),
            error: |s| s.to_string(),
        }
    }

    fn default_theme() -> Self {
        Self {
            label: |s| s.bold().to_string(),
            sql: |s| s.bright_magenta().to_string(),
            result: |s| s.white().to_string(),
            error: |s| s.red().to_string(),
        }
    }

    fn mono() -> Self {
        Self {
            label: |s| s.bold().to_string(),
            sql: |s| s.italic().to_string(),
            result: |s| s.normal().to_string(),
            error: |s| s.bold().underline().to_string(),
        }
    }

    fn ocean() -> Self {
        Self {
            label: |s| s.blue().bold().to_string(),
            sql: |s| s.cyan().to_string(),
            result: |s| s.bright_white().dimmed().to_string(),
            error: |s| s.bright_red().bold().to_string(),
        }
    }
}
