//! Informational Tool Formatters
//!
//! The informational tools (suggest_phases, suggest_skills,
//! find_people_by_skills, summarize_learnings) perform no store mutation and
//! trigger no follow-up model call; their input is deterministically
//! rendered into readable text that appends to the turn's reply.

use guildhall_tools::{
    FindPeopleBySkillsInput, SuggestPhasesInput, SuggestSkillsInput, SummarizeLearningsInput,
};
use regex::Regex;

/// Sum the lower bounds of hour ranges like "10-20h" (first number in each).
fn total_min_hours(ranges: &[&str]) -> u32 {
    let re = Regex::new(r"(\d+)").expect("valid regex");
    ranges
        .iter()
        .filter_map(|r| re.captures(r))
        .filter_map(|c| c[1].parse::<u32>().ok())
        .sum()
}

/// Sum the upper bounds of hour ranges (second number; single-number ranges
/// contribute nothing, matching the permissive original behavior).
fn total_max_hours(ranges: &[&str]) -> u32 {
    let re = Regex::new(r"(\d+)[^\d]*(\d+)").expect("valid regex");
    ranges
        .iter()
        .filter_map(|r| re.captures(r))
        .filter_map(|c| c[2].parse::<u32>().ok())
        .sum()
}

/// Render a suggested phase breakdown with its total hour range.
pub fn format_suggested_phases(input: &SuggestPhasesInput) -> String {
    let phases_list = input
        .phases
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{}. **{}** ({})\n   {}",
                i + 1,
                p.name,
                p.typical_hours_range,
                p.description
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let ranges: Vec<&str> = input
        .phases
        .iter()
        .map(|p| p.typical_hours_range.as_str())
        .collect();
    let total_min = total_min_hours(&ranges);
    let total_max = total_max_hours(&ranges);

    format!(
        "**Suggested Phases for {} {}:**\n\n{}\n\n**Total Estimated: {}-{} hours**\n\n\
         Does this breakdown look right? I can adjust phases, add/remove items, or modify \
         the hour estimates.",
        input.complexity.as_str(),
        input.project_type.as_str(),
        phases_list,
        total_min,
        total_max
    )
}

/// Render suggested skills split into core and also-common groups.
pub fn format_suggested_skills(input: &SuggestSkillsInput) -> String {
    let typical: Vec<_> = input
        .suggested_skills
        .iter()
        .filter(|s| s.typical_for_role)
        .collect();
    let bonus: Vec<_> = input
        .suggested_skills
        .iter()
        .filter(|s| !s.typical_for_role)
        .collect();

    let mut content = format!("**Suggested skills for \"{}\":**\n\n", input.role_description);

    if !typical.is_empty() {
        let lines = typical
            .iter()
            .map(|s| format!("• {} ({})", s.name, s.category))
            .collect::<Vec<_>>()
            .join("\n");
        content.push_str(&format!("**Core skills:**\n{}\n\n", lines));
    }
    if !bonus.is_empty() {
        let lines = bonus
            .iter()
            .map(|s| format!("• {} ({})", s.name, s.category))
            .collect::<Vec<_>>()
            .join("\n");
        content.push_str(&format!("**Also common:**\n{}\n\n", lines));
    }

    content.push_str("Which of these apply? Or tell me about their specific expertise.");
    content
}

/// Render talent-search criteria. The engine never executes the search
/// itself; this is a description of what the caller should run.
pub fn format_people_search(input: &FindPeopleBySkillsInput) -> String {
    let mut content = String::from("**Searching for talent with:**\n");
    content.push_str(&format!("• Required: {}\n", input.required_skills.join(", ")));
    if let Some(preferred) = &input.preferred_skills {
        if !preferred.is_empty() {
            content.push_str(&format!("• Nice to have: {}\n", preferred.join(", ")));
        }
    }
    if let Some(filter) = &input.availability_filter {
        content.push_str(&format!("• Availability: {}\n", filter));
    }
    if let Some(rate) = input.max_hourly_rate {
        content.push_str(&format!("• Max rate: ${}/hr\n", rate));
    }
    content
}

/// Render a learnings summary distilled from past retrospectives.
pub fn format_learnings_summary(input: &SummarizeLearningsInput) -> String {
    let mut content = String::from("**Summary of Learnings:**\n\n");

    if let Some(variance) = input.summary.avg_hours_variance {
        let sign = if variance > 0.0 { "+" } else { "" };
        content.push_str(&format!(
            "**Average Hours Variance:** {}{}%\n\n",
            sign, variance
        ));
    }

    if let Some(issues) = &input.summary.common_issues {
        if !issues.is_empty() {
            let lines = issues
                .iter()
                .map(|i| format!("• {}", i))
                .collect::<Vec<_>>()
                .join("\n");
            content.push_str(&format!("**Common Issues:**\n{}\n\n", lines));
        }
    }

    if let Some(lessons) = &input.summary.top_lessons {
        if !lessons.is_empty() {
            let lines = lessons
                .iter()
                .map(|l| format!("💡 {}", l))
                .collect::<Vec<_>>()
                .join("\n");
            content.push_str(&format!("**Top Lessons:**\n{}\n\n", lines));
        }
    }

    if let Some(patterns) = &input.summary.success_patterns {
        if !patterns.is_empty() {
            let lines = patterns
                .iter()
                .map(|p| format!("✓ {}", p))
                .collect::<Vec<_>>()
                .join("\n");
            content.push_str(&format!("**Success Patterns:**\n{}\n\n", lines));
        }
    }

    content
}
