use shared::ScreeningReport;

use crate::inference::SlotRegistry;

const LOGIN_HTML: &str = include_str!("../templates/login.html");
const HOME_HTML: &str = include_str!("../templates/home.html");
const INDEX_HTML: &str = include_str!("../templates/index.html");

pub fn login_page() -> String {
    LOGIN_HTML.to_string()
}

pub fn home_page() -> String {
    HOME_HTML.to_string()
}

/// Upload page, with one checkbox per enabled slot and, after a POST, the
/// results block for the stored image.
pub fn upload_page(registry: &SlotRegistry, report: Option<&ScreeningReport>) -> String {
    let checkboxes = registry
        .enabled()
        .map(|slot| {
            format!(
                r#"<label class="slot"><input type="checkbox" name="{}"> {}</label>"#,
                escape_html(&slot.key),
                escape_html(&slot.display_name)
            )
        })
        .collect::<Vec<_>>()
        .join("\n        ");

    let results = report.map(results_block).unwrap_or_default();

    INDEX_HTML
        .replace("{{slot_checkboxes}}", &checkboxes)
        .replace("{{results}}", &results)
}

fn results_block(report: &ScreeningReport) -> String {
    let filename = escape_html(&report.filename);
    let mut block = String::new();
    block.push_str("<section class=\"results\">\n");
    block.push_str(&format!("      <h2>Results for {}</h2>\n", filename));
    block.push_str(&format!(
        "      <img class=\"preview\" src=\"/uploads/{}\" alt=\"uploaded image\">\n",
        filename
    ));
    block.push_str("      <ul>\n");
    for outcome in &report.outcomes {
        // Slots that were not selected are omitted, not shown as empty rows.
        if let Some(verdict) = &outcome.verdict {
            block.push_str(&format!(
                "        <li><strong>{}:</strong> {}</li>\n",
                escape_html(&outcome.display_name),
                escape_html(verdict)
            ));
        }
    }
    block.push_str("      </ul>\n    </section>");
    block
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{builtin_slots, SlotRegistry};
    use shared::SlotOutcome;

    fn registry() -> SlotRegistry {
        SlotRegistry::new("models", builtin_slots())
    }

    #[test]
    fn upload_page_lists_only_enabled_slots() {
        let html = upload_page(&registry(), None);
        assert!(html.contains(r#"name="model2""#));
        assert!(html.contains(r#"name="model3""#));
        assert!(html.contains(r#"name="model4""#));
        assert!(!html.contains(r#"name="model1""#));
        assert!(!html.contains("{{slot_checkboxes}}"));
        assert!(!html.contains("{{results}}"));
    }

    #[test]
    fn results_render_selected_verdicts_only() {
        let report = ScreeningReport {
            filename: "scan.png".to_string(),
            outcomes: vec![
                SlotOutcome {
                    key: "model2".to_string(),
                    display_name: "ResNet".to_string(),
                    verdict: Some("Healthy".to_string()),
                },
                SlotOutcome {
                    key: "model3".to_string(),
                    display_name: "MobileNet".to_string(),
                    verdict: None,
                },
            ],
        };

        let html = upload_page(&registry(), Some(&report));
        assert!(html.contains("Results for scan.png"));
        assert!(html.contains("/uploads/scan.png"));
        assert!(html.contains("<strong>ResNet:</strong> Healthy"));
        assert!(!html.contains("<strong>MobileNet:</strong>"));
    }

    #[test]
    fn user_supplied_text_is_escaped() {
        assert_eq!(
            escape_html(r#"<img src="x" onerror='y'> & co"#),
            "&lt;img src=&quot;x&quot; onerror=&#39;y&#39;&gt; &amp; co"
        );
    }
}
