use crate::types::report::{CompanyReport, ExplainReport, ScoreReport, ScoredApplication};
use crate::types::scoring::CategoryStatus;

pub fn scores_to_markdown(report: &ScoreReport) -> String {
    let mut output = String::new();
    output.push_str("# Application Scores\n\n");
    output.push_str(&format!("Generated: {}\n\n", report.generated_at.to_rfc3339()));
    push_score_table(&mut output, &report.applications);
    output
}

pub fn company_to_markdown(report: &CompanyReport) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "# Company Score: {}\n\n",
        report.company.as_deref().unwrap_or("unnamed")
    ));
    output.push_str(&format!("Generated: {}\n\n", report.generated_at.to_rfc3339()));
    output.push_str(&format!(
        "- applications: {}\n- knowledge: {}/50\n- tools: {}/50\n- total: {}/100\n\n",
        report.score.application_count,
        report.score.knowledge_score,
        report.score.tool_score,
        report.score.total_score
    ));
    output.push_str("## Applications\n\n");
    push_score_table(&mut output, &report.applications);
    output
}

pub fn explain_to_markdown(report: &ExplainReport) -> String {
    let mut output = String::new();
    output.push_str("# Score Breakdown\n\n");
    output.push_str(&format!("Generated: {}\n", report.generated_at.to_rfc3339()));

    for application in &report.applications {
        let explanation = &application.explanation;
        output.push_str(&format!("\n## {}\n\n", escape_cell(&application.name)));
        output.push_str(&format!(
            "Total: {}/100 (knowledge {}, tools {})\n\n",
            explanation.score.total_score,
            explanation.score.knowledge_score,
            explanation.score.tool_score
        ));
        output.push_str(&format!(
            "- metadata fields filled: {}/{}\n- reviewed in the last six months: {}\n- risk weight: {:.2}\n\n",
            explanation.knowledge.filled_fields,
            explanation.knowledge.total_fields,
            if explanation.knowledge.fresh_review { "yes" } else { "no" },
            explanation.tools.risk_weight
        ));

        output.push_str("| Category | Status | Achieved | Max |\n");
        output.push_str("|---|---|---|---|\n");
        for category in &explanation.tools.categories {
            let status = match &category.status {
                CategoryStatus::NotApplicable => "not applicable".to_string(),
                CategoryStatus::Missing => "missing".to_string(),
                CategoryStatus::Implemented {
                    tool,
                    integration_level,
                    integration_weight,
                    tool_weight,
                } => format!(
                    "{tool} / {integration_level} (integration {integration_weight:.2}, tool {tool_weight:.2})"
                ),
            };
            output.push_str(&format!(
                "| {} | {} | {:.2} | {:.2} |\n",
                category.category, status, category.achieved_points, category.max_points
            ));
        }
    }

    output
}

fn push_score_table(output: &mut String, applications: &[ScoredApplication]) {
    if applications.is_empty() {
        output.push_str("- none\n");
        return;
    }
    output.push_str("| Application | Knowledge | Tools | Total |\n");
    output.push_str("|---|---|---|---|\n");
    for application in applications {
        output.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            escape_cell(&application.name),
            application.score.knowledge_score,
            application.score.tool_score,
            application.score.total_score
        ));
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
