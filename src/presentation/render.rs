use crate::domain::model::Outcome;
use crate::infrastructure::config::RenderFormat;
use crate::presentation::theme::Theme;
use serde_json::Value;

pub use crate::domain::model::VALIDATION_MESSAGE;

/// Turns an [`Outcome`] into the text placed in the output region
pub struct Renderer {
    format: RenderFormat,
    theme: Theme,
}

impl Renderer {
    pub fn new(format: RenderFormat, theme: Theme) -> Self {
        Self { format, theme }
    }

    /// Uncolored text output
    pub fn plain() -> Self {
        Self::new(RenderFormat::Text, Theme::plain())
    }

    pub fn format(&self) -> RenderFormat {
        self.format
    }

    pub fn render(&self, outcome: &Outcome) -> String {
        match self.format {
            RenderFormat::Text => self.render_text(outcome),
            RenderFormat::Html => render_html(outcome),
            RenderFormat::Json => render_json(outcome),
        }
    }

    fn render_text(&self, outcome: &Outcome) -> String {
        let theme = &self.theme;
        match outcome {
            Outcome::InvalidInput { message } => (theme.error)(message),
            Outcome::Rejected { message } => (theme.error)(&format!("Error: {}", message)),
            Outcome::Failed { detail } => (theme.error)(&format!("Error: {}", detail)),
            Outcome::Answered { sql_query, result } => format!(
                "{} {}\n{} {}",
                (theme.label)("SQL Query:"),
                (theme.sql)(sql_query),
                (theme.label)("Result:"),
                (theme.result)(&stringify(result)),
            ),
        }
    }
}

// Compact encoding, same as JSON.stringify
fn stringify(value: &Value) -> String {
    value.to_string()
}

fn render_html(outcome: &Outcome) -> String {
    match outcome {
        Outcome::InvalidInput { message } => {
            format!("<p style='color:red;'>{}</p>", escape_html(message))
        }
        Outcome::Rejected { message } => {
            format!("<p style=\"color:red;\">Error: {}</p>", escape_html(message))
        }
        Outcome::Failed { detail } => {
            format!("<p style='color:red;'>Error: {}</p>", escape_html(detail))
        }
        Outcome::Answered { sql_query, result } => format!(
            "<p><b>SQL Query:</b> {}</p><p><b>Result:</b> {}</p>",
            escape_html(sql_query),
            escape_html(&stringify(result)),
        ),
    }
}

fn render_json(outcome: &Outcome) -> String {
    // Outcome holds only strings and JSON values, serialization cannot fail
    serde_json::to_string(outcome).unwrap_or_else(|e| {
        serde_json::json!({"status": "failed", "detail": e.to_string()}).to_string()
    })
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answered() -> Outcome {
        Outcome::Answered {
            sql_query: "SELECT 1".to_string(),
            result: json!([1]),
        }
    }

    #[test]
    fn test_text_success() {
        let text = Renderer::plain().render(&answered());
        assert_eq!(text, "SQL Query: SELECT 1\nResult: [1]");
    }

    #[test]
    fn test_text_errors() {
        let renderer = Renderer::plain();
        assert_eq!(
            renderer.render(&Outcome::Rejected {
                message: "bad syntax".to_string()
            }),
            "Error: bad syntax"
        );
        assert_eq!(renderer.render(&Outcome::invalid_input()), VALIDATION_MESSAGE);
    }

    #[test]
    fn test_result_is_compact_json() {
        let text = Renderer::plain().render(&Outcome::Answered {
            sql_query: "SELECT name, salary FROM employees;".to_string(),
            result: json!([["Alice Johnson", 80000], ["Bob Smith", 95000]]),
        });
        assert!(text.ends_with(r#"[["Alice Johnson",80000],["Bob Smith",95000]]"#));
    }

    #[test]
    fn test_html_matches_page_markup() {
        let renderer = Renderer::new(RenderFormat::Html, Theme::plain());
        assert_eq!(
            renderer.render(&answered()),
            "<p><b>SQL Query:</b> SELECT 1</p><p><b>Result:</b> [1]</p>"
        );
        assert_eq!(
            renderer.render(&Outcome::Rejected {
                message: "bad syntax".to_string()
            }),
            "<p style=\"color:red;\">Error: bad syntax</p>"
        );
    }

    #[test]
    fn test_html_escapes_backend_text() {
        let renderer = Renderer::new(RenderFormat::Html, Theme::plain());
        let html = renderer.render(&Outcome::Answered {
            sql_query: "SELECT * FROM t WHERE a < 3".to_string(),
            result: json!(["<script>"]),
        });
        assert!(html.contains("a &lt; 3"));
        assert!(html.contains("[&quot;&lt;script&gt;&quot;]"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_json_format() {
        let renderer = Renderer::new(RenderFormat::Json, Theme::plain());
        let value: Value = serde_json::from_str(&renderer.render(&Outcome::Failed {
            detail: "connection refused".to_string(),
        }))
        .unwrap();
        assert_eq!(
            value,
            json!({"status": "failed", "detail": "connection refused"})
        );

        let blank = renderer.render(&Outcome::invalid_input());
        assert!(blank.contains(VALIDATION_MESSAGE));
        let value: Value = serde_json::from_str(&blank).unwrap();
        assert_eq!(value["status"], "invalid_input");
    }
}
