use std::io::IsTerminal;
use chrono::{DateTime, Duration, Utc};
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::audit::AuditRecord;
use crate::questionnaire::{find_question, STEPS};
use crate::ranking::RankedUseCase;
use crate::scoring::{classify_quadrant, evaluate, FactorContribution, Quadrant, HIGH_THRESHOLD};
use crate::usecase::UseCase;

const EMPTY_LIST: &str = "No use cases yet. Run `ai-prio add` to score one.";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Priority score with one decimal (8.7, 0.7, 10.0)
pub fn format_score(score: f64) -> String {
    format!("{:.1}", score)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn paint_quadrant(text: &str, quadrant: Quadrant) -> String {
    match quadrant {
        Quadrant::QuickWins => text.green().to_string(),
        Quadrant::StrategicVentures => text.cyan().to_string(),
        Quadrant::FoundationLabs => text.yellow().to_string(),
        Quadrant::OptimizationZone => text.red().to_string(),
    }
}

/// Format ranked use cases as a table: Rank, Score, Quadrant, Name, Id
/// No headers, same as the other list formats
pub fn format_scored_table(ranked: &[RankedUseCase], use_colors: bool) -> String {
    if ranked.is_empty() {
        return EMPTY_LIST.to_string();
    }

    let term_width = get_terminal_width();

    // Rank column: 3 chars ("99.") + 1 space
    // Score column: 4 chars ("10.0") + 2 spaces
    // Quadrant column: 18 chars ("Strategic Ventures") + 2 spaces
    let rank_width = 3;
    let score_width = 4;
    let quadrant_width = 18;
    let separator = "  ";

    ranked
        .iter()
        .map(|entry| {
            let rank_str = format!("{:>2}.", entry.rank);
            let score_str = format!("{:>width$}", format_score(entry.priority_score), width = score_width);
            let quadrant_str = format!("{:<width$}", entry.quadrant.label(), width = quadrant_width);
            let id_str = format!("#{}", entry.use_case.id);

            let fixed_width = rank_width
                + 1
                + score_width
                + quadrant_width
                + separator.len() * 3
                + id_str.len();

            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(&entry.use_case.name, width - fixed_width)
                }
                Some(_) => truncate_text(&entry.use_case.name, 20),
                None => entry.use_case.name.clone(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    rank_str.dimmed(),
                    score_str.bold(),
                    separator,
                    paint_quadrant(&quadrant_str, entry.quadrant),
                    separator,
                    name,
                    separator,
                    id_str.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}",
                    rank_str, score_str, separator, quadrant_str, separator, name, separator, id_str
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranked use cases as tab-separated values for scripting
/// Columns: rank, score, id, name, quadrant, impact, effort, implementation type
pub fn format_tsv(ranked: &[RankedUseCase]) -> String {
    ranked
        .iter()
        .map(|entry| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
                entry.rank,
                format_score(entry.priority_score),
                entry.use_case.id,
                entry.use_case.name,
                entry.quadrant,
                entry.use_case.impact,
                entry.use_case.effort,
                entry
                    .use_case
                    .implementation_type
                    .map(|t| t.name())
                    .unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RankedEntry<'a> {
    rank: usize,
    priority_score: f64,
    quadrant: Quadrant,
    #[serde(flatten)]
    use_case: &'a UseCase,
}

/// Format ranked use cases as a JSON array
pub fn format_json(ranked: &[RankedUseCase]) -> serde_json::Result<String> {
    let entries: Vec<RankedEntry> = ranked
        .iter()
        .map(|entry| RankedEntry {
            rank: entry.rank,
            priority_score: entry.priority_score,
            quadrant: entry.quadrant,
            use_case: entry.use_case,
        })
        .collect();
    serde_json::to_string_pretty(&entries)
}

fn format_factor_lines(factors: &[FactorContribution]) -> Vec<String> {
    factors
        .iter()
        .map(|f| {
            let label = find_question(&f.label)
                .map(|q| q.text)
                .unwrap_or("Recommended implementation");
            format!(
                "    {}  {}: {}",
                f.score,
                label,
                f.answer.as_deref().unwrap_or("(unanswered)")
            )
        })
        .collect()
}

/// Format one use case with its score breakdown (for `show`)
pub fn format_use_case_detail(use_case: &UseCase, use_colors: bool) -> String {
    let assessment = evaluate(&use_case.answers);
    let quadrant = use_case.quadrant();
    let implementation = use_case
        .implementation_type
        .unwrap_or(assessment.implementation_type);

    let mut lines = Vec::new();
    if use_colors {
        lines.push(format!("{} {}", use_case.name.bold(), format!("#{}", use_case.id).dimmed()));
        lines.push(format!("  Quadrant: {}", paint_quadrant(quadrant.label(), quadrant)));
    } else {
        lines.push(format!("{} #{}", use_case.name, use_case.id));
        lines.push(format!("  Quadrant: {}", quadrant));
    }
    if !use_case.description.is_empty() {
        lines.push(format!("  Description: {}", use_case.description));
    }
    lines.push(format!(
        "  Impact: {}/10  Effort: {}/10  Priority: {}",
        use_case.impact,
        use_case.effort,
        format_score(use_case.priority_score())
    ));
    lines.push(format!(
        "  Implementation: {} ({})",
        implementation,
        implementation.description()
    ));

    lines.push(String::new());
    lines.push("  Impact factors:".to_string());
    lines.extend(format_factor_lines(&assessment.breakdown.impact));
    lines.push("  Effort factors:".to_string());
    lines.extend(format_factor_lines(&assessment.breakdown.effort));

    lines.join("\n")
}

/// Plot use cases on a 10x10 impact/effort grid.
///
/// Each occupied cell shows the rank of the best use case in it, with `*`
/// when more than one shares the cell. The dividers sit below impact 5 and
/// left of effort 5, so 5 always lands in the "high" half.
pub fn format_quadrant_grid(ranked: &[RankedUseCase], use_colors: bool) -> String {
    if ranked.is_empty() {
        return EMPTY_LIST.to_string();
    }

    // cells[impact][effort] -> (best rank, count)
    let mut cells = [[(0usize, 0usize); 11]; 11];
    for entry in ranked {
        let impact = entry.use_case.impact.clamp(1, 10) as usize;
        let effort = entry.use_case.effort.clamp(1, 10) as usize;
        let cell = &mut cells[impact][effort];
        if cell.1 == 0 {
            cell.0 = entry.rank;
        }
        cell.1 += 1;
    }

    let high = HIGH_THRESHOLD as usize;
    let mut lines = Vec::new();
    lines.push(format!(
        "  {:<16}{:>16}",
        Quadrant::QuickWins.label(),
        Quadrant::StrategicVentures.label()
    ));

    for impact in (1..=10).rev() {
        let mut row = format!("{:>2} |", impact);
        for effort in 1..=10 {
            if effort == high {
                row.push('|');
            }
            let (rank, count) = cells[impact][effort];
            let text = match (rank, count) {
                (_, 0) => "  .".to_string(),
                (r, 1) if r < 1000 => format!("{:>3}", r),
                (r, _) if r < 100 => format!("{:>2}*", r),
                _ => " ##".to_string(),
            };
            if use_colors && count > 0 {
                let quadrant = classify_quadrant(impact as u8, effort as u8);
                row.push_str(&paint_quadrant(&text, quadrant));
            } else {
                row.push_str(&text);
            }
        }
        lines.push(row);
        if impact == high {
            lines.push(format!("   +{}+{}", "-".repeat(3 * (high - 1)), "-".repeat(3 * (11 - high))));
        }
    }

    lines.push(format!(
        "    {}",
        (1..=10)
            .map(|e| if e == high { format!("|{:>3}", e) } else { format!("{:>3}", e) })
            .collect::<String>()
    ));
    lines.push("    effort ->".to_string());
    lines.push(format!(
        "  {:<16}{:>16}",
        Quadrant::FoundationLabs.label(),
        Quadrant::OptimizationZone.label()
    ));

    lines.push(String::new());
    for entry in ranked {
        lines.push(format!(
            "{:>3}. {} (impact {}, effort {})",
            entry.rank, entry.use_case.name, entry.use_case.impact, entry.use_case.effort
        ));
    }

    lines.join("\n")
}

/// The full questionnaire, step by step
pub fn format_questions(use_colors: bool) -> String {
    let mut lines = Vec::new();
    for (i, step) in STEPS.iter().enumerate() {
        let heading = format!("Step {}/{}: {}", i + 1, STEPS.len(), step.title);
        lines.push(if use_colors { heading.bold().to_string() } else { heading });
        if let Some(intro) = step.intro {
            lines.push(format!("  {}", intro));
        }
        if step.questions().next().is_none() {
            lines.push("  Name and description of the use case".to_string());
        }
        for question in step.questions() {
            let required = if question.required { "" } else { " (optional)" };
            lines.push(format!("  {} [{}]{}", question.text, question.id, required));
            if let Some(hint) = question.hint {
                lines.push(format!("    {}", hint));
            }
            for (n, option) in question.options.iter().enumerate() {
                lines.push(format!("    {}) {}", n, option));
            }
        }
        lines.push(String::new());
    }
    lines.pop();
    lines.join("\n")
}

/// Format a duration into a human-readable age string
/// "2h" for hours, "3d" for days, "1w" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w", weeks)
    } else if days >= 1 {
        format!("{}d", days)
    } else if hours >= 1 {
        format!("{}h", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m", minutes)
        } else {
            "now".to_string()
        }
    }
}

/// Format audit records one per line, oldest first
/// Format: "{timestamp} ({age})  {action}  #{id} {name}  {ip}  {user agent}"
pub fn format_audit_records(records: &[AuditRecord], now: DateTime<Utc>, use_colors: bool) -> String {
    if records.is_empty() {
        return "No audit records.".to_string();
    }

    records
        .iter()
        .map(|r| {
            let when = r.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
            let age = format_age(now - r.timestamp);
            let action = format!("{:<15}", r.action.as_str());
            if use_colors {
                format!(
                    "{} ({})  {}  #{} {}  {}  {}",
                    when.dimmed(),
                    age,
                    action.bold(),
                    r.use_case.id,
                    r.use_case.name,
                    r.ip,
                    r.user_agent.dimmed()
                )
            } else {
                format!(
                    "{} ({})  {}  #{} {}  {}  {}",
                    when, age, action, r.use_case.id, r.use_case.name, r.ip, r.user_agent
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditAction;
    use crate::ranking::rank_use_cases;
    use crate::scoring::ImplementationType;
    use crate::usecase::Answers;
    use chrono::TimeZone;

    fn use_case(id: u64, name: &str, impact: u8, effort: u8) -> UseCase {
        UseCase {
            id,
            name: name.to_string(),
            description: "Something useful".to_string(),
            impact,
            effort,
            answers: Answers::new(),
            implementation_type: Some(ImplementationType::UseManagedService),
        }
    }

    fn sample() -> Vec<UseCase> {
        vec![
            use_case(101, "Ticket triage", 8, 3),
            use_case(102, "Demand forecasting", 9, 8),
            use_case(103, "Doc search", 3, 2),
        ]
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(9.7), "9.7");
        assert_eq!(format_score(5.0), "5.0");
        assert_eq!(format_score(0.7000000000000001), "0.7");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("Short", 20), "Short");
        assert_eq!(truncate_text("This is a very long name", 15), "This is a ve...");
        assert_eq!(truncate_text("Hello world", 3), "Hel");
    }

    #[test]
    fn test_scored_table_empty() {
        assert_eq!(format_scored_table(&[], false), EMPTY_LIST);
    }

    #[test]
    fn test_scored_table_rows() {
        let list = sample();
        let ranked = rank_use_cases(&list);
        let result = format_scored_table(&ranked, false);
        let lines: Vec<&str> = result.lines().collect();

        assert_eq!(lines.len(), 3);
        // 8/3 -> 5.6 + 2.1 = 7.7; 9/8 -> 6.3 + 0.6 = 6.9; 3/2 -> 2.1 + 2.4 = 4.5
        assert!(lines[0].starts_with(" 1.  7.7  Quick Wins"));
        assert!(lines[0].contains("Ticket triage"));
        assert!(lines[0].ends_with("#101"));
        assert!(lines[1].contains("Strategic Ventures"));
        assert!(lines[2].contains("Foundation Labs"));
    }

    #[test]
    fn test_tsv() {
        let list = sample();
        let ranked = rank_use_cases(&list);
        let result = format_tsv(&ranked);
        let first = result.lines().next().unwrap();
        assert_eq!(
            first,
            "1\t7.7\t101\tTicket triage\tQuick Wins\t8\t3\tUse managed service"
        );
        assert_eq!(format_tsv(&[]), "");
    }

    #[test]
    fn test_json() {
        let list = sample();
        let ranked = rank_use_cases(&list);
        let json: serde_json::Value = serde_json::from_str(&format_json(&ranked).unwrap()).unwrap();
        assert_eq!(json[0]["rank"], 1);
        assert_eq!(json[0]["id"], 101);
        assert_eq!(json[0]["quadrant"], "Quick Wins");
        assert_eq!(json[1]["implementationType"], "Use managed service");
    }

    #[test]
    fn test_detail_includes_breakdown() {
        let mut uc = use_case(7, "Ticket triage", 8, 3);
        uc.answers.insert("taskFrequency".to_string(), "Frequently (daily)".to_string());
        let result = format_use_case_detail(&uc, false);
        assert!(result.starts_with("Ticket triage #7"));
        assert!(result.contains("Quadrant: Quick Wins"));
        assert!(result.contains("Impact: 8/10  Effort: 3/10  Priority: 7.7"));
        assert!(result.contains("Implementation: Use managed service"));
        assert!(result.contains("Frequently (daily)"));
        assert!(result.contains("(unanswered)"));
        assert!(result.contains("Recommended implementation: Deploy simple service"));
    }

    #[test]
    fn test_grid_places_ranks() {
        let list = sample();
        let ranked = rank_use_cases(&list);
        let result = format_quadrant_grid(&ranked, false);
        let row8 = result.lines().find(|l| l.starts_with(" 8 |")).unwrap();
        // effort 3 is the third cell
        assert_eq!(&row8[4..13], "  .  .  1");
        assert!(result.contains("  1. Ticket triage (impact 8, effort 3)"));
        assert_eq!(format_quadrant_grid(&[], false), EMPTY_LIST);
    }

    #[test]
    fn test_grid_marks_shared_cells() {
        let list = vec![use_case(1, "A", 6, 6), use_case(2, "B", 6, 6)];
        let ranked = rank_use_cases(&list);
        let result = format_quadrant_grid(&ranked, false);
        let row6 = result.lines().find(|l| l.starts_with(" 6 |")).unwrap();
        assert!(row6.contains(" 1*"));
    }

    #[test]
    fn test_questions_listing() {
        let result = format_questions(false);
        assert!(result.starts_with("Step 1/4: "));
        assert!(result.contains("[taskFrequency]"));
        assert!(result.contains("    0) Not relevant"));
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(Duration::hours(3)), "3h");
        assert_eq!(format_age(Duration::days(2)), "2d");
        assert_eq!(format_age(Duration::weeks(2)), "2w");
        assert_eq!(format_age(Duration::seconds(30)), "now");
    }

    #[test]
    fn test_audit_records() {
        let now = Utc.with_ymd_and_hms(2025, 3, 2, 12, 0, 0).unwrap();
        let records = vec![AuditRecord {
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
            action: AuditAction::DeleteUseCase,
            use_case: use_case(5, "Doc search", 3, 2),
            ip: "unknown".to_string(),
            user_agent: "ai-prio/0.1.0".to_string(),
        }];
        let result = format_audit_records(&records, now, false);
        assert_eq!(
            result,
            "2025-03-01 12:00:00 (1d)  delete_use_case  #5 Doc search  unknown  ai-prio/0.1.0"
        );
        assert_eq!(format_audit_records(&[], now, false), "No audit records.");
    }
}
