//! Consultant report rendering

use colored::Colorize;
use consult_domain::Consultant;
use consult_domain::util::escape_html;

const UNNAMED: &str = "(no name)";

/// HTML report for the owner's `/stats`.
pub fn stats_html(consultants: &[Consultant], header: &str, empty: &str) -> String {
    if consultants.is_empty() {
        return empty.to_string();
    }

    let mut report = format!("{header}\n\n");
    for consultant in consultants {
        let label = consultant.label().unwrap_or_else(|| UNNAMED.to_string());
        report.push_str(&format!(
            "👤 <b>{}</b> (ID: <code>{}</code>):\n  📥 Questions received: <b>{}</b>\n  📤 Replies sent: <b>{}</b>\n\n",
            escape_html(&label),
            consultant.id,
            consultant.assigned_count,
            consultant.answered_count,
        ));
    }
    report.trim_end().to_string()
}

/// Plain-text report for `--stats`.
pub fn stats_console(consultants: &[Consultant]) -> String {
    if consultants.is_empty() {
        return "No consultants recorded yet.".dimmed().to_string();
    }

    let mut output = format!("{}\n", "Consultant report".cyan().bold());
    for consultant in consultants {
        let label = consultant.label().unwrap_or_else(|| UNNAMED.to_string());
        output.push_str(&format!(
            "  {} {}  assigned {}  answered {}\n",
            label.yellow().bold(),
            format!("({})", consultant.id).dimmed(),
            consultant.assigned_count,
            consultant.answered_count,
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use consult_domain::ConsultantId;

    fn consultant(id: i64, handle: Option<&str>, assigned: u64, answered: u64) -> Consultant {
        let mut consultant = Consultant::new(ConsultantId::new(id));
        consultant.display_handle = handle.map(str::to_string);
        consultant.assigned_count = assigned;
        consultant.answered_count = answered;
        consultant
    }

    #[test]
    fn test_empty_report_uses_template() {
        assert_eq!(stats_html(&[], "Report", "Nothing yet"), "Nothing yet");
    }

    #[test]
    fn test_report_lists_each_consultant() {
        let report = stats_html(
            &[consultant(1, Some("nazari"), 4, 3), consultant(2, None, 1, 0)],
            "Report",
            "Nothing yet",
        );
        assert!(report.starts_with("Report\n\n"));
        assert!(report.contains("<b>@nazari</b> (ID: <code>1</code>)"));
        assert!(report.contains("Questions received: <b>4</b>"));
        assert!(report.contains("<b>(no name)</b> (ID: <code>2</code>)"));
    }

    #[test]
    fn test_report_escapes_names() {
        let mut named = consultant(3, None, 0, 0);
        named.display_name = Some("A <B>".into());
        let report = stats_html(&[named], "Report", "");
        assert!(report.contains("A &lt;B&gt;"));
    }

    #[test]
    fn test_console_report_mentions_counts() {
        colored::control::set_override(false);
        let output = stats_console(&[consultant(5, Some("sara"), 2, 1)]);
        assert!(output.contains("@sara (5)  assigned 2  answered 1"));
    }
}
