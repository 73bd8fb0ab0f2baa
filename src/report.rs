// 🖨️ Plain-text leaderboard report (print mode)

use crate::highlight::HighlightStatus;
use crate::leaderboard::Leaderboard;
use crate::ranking::RankedTeam;
use std::fmt::Write;

pub const DISCLAIMER: &str =
    "Results are unofficial and no guarantee of accuracy; Tie-Breakers not calculated";

/// Scores are whole numbers in practice; show them without decimals when possible
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(v) if v.is_finite() && v.fract() == 0.0 => format!("{}", v as i64),
        Some(v) if v.is_finite() => format!("{:.1}", v),
        _ => "-".to_string(),
    }
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn status_marker(status: HighlightStatus) -> &'static str {
    match status {
        HighlightStatus::Qualified => "Q",
        HighlightStatus::Provisional => "P",
        HighlightStatus::None => "",
    }
}

pub fn render_row(team: &RankedTeam) -> String {
    format!(
        "{:>4} | {:>6} | {:>11} | {:>6} | {:>8} | {:<32} | {}",
        team.rank,
        format_score(team.total_score),
        format_score(team.programming_score),
        format_score(team.driver_score),
        team.team_number.as_deref().unwrap_or("-"),
        truncate(&team.team_name, 32),
        status_marker(team.status),
    )
}

/// Whole table plus legend and disclaimer
pub fn render(board: &Leaderboard) -> String {
    let mut out = String::new();
    let summary = board.summary();

    let _ = writeln!(
        out,
        "Skills Leaderboard - {} teams ({} qualified, {} provisional, cap {})",
        summary.total_teams, summary.qualified, summary.provisional, summary.cap
    );
    let _ = writeln!(
        out,
        "Q: \"{}\"   P: \"{}\"",
        HighlightStatus::Qualified.label(),
        HighlightStatus::Provisional.label()
    );
    let _ = writeln!(out, "{}", DISCLAIMER);
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:>4} | {:>6} | {:>11} | {:>6} | {:>8} | {:<32} | {}",
        "Rank", "Total", "Programming", "Driver", "Team #", "Team Name", "Status"
    );
    let _ = writeln!(out, "{}", "-".repeat(92));

    for team in &board.teams {
        let _ = writeln!(out, "{}", render_row(team));
    }

    out
}
