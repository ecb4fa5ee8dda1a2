use crate::types::scoring::{AgentScores, Score, MAX_SCORE};

/// Weights in hundredths, in `AgentKind::ALL` order.
pub const WEIGHTS: [u32; 5] = [25, 20, 15, 15, 15];

/// Fixed real-world applicability contribution: 0.10 * 80, in hundredths.
pub const APPLICABILITY_BASELINE: u32 = 10 * 80;

pub const FORMULA: &str = "round(0.25*codeQuality + 0.20*documentation + 0.15*commitHealth \
                           + 0.15*testCoverage + 0.15*techStack + 0.10*80)";

/// Combines agent scores into the overall score.
///
/// The sum is kept in integer hundredths, so the result is reproducible
/// bit-for-bit; `+ 50` before the division rounds halves up.
pub fn aggregate(scores: &AgentScores) -> Score {
    let inputs = [
        ("codeQuality", scores.code_quality),
        ("documentation", scores.documentation),
        ("commitHealth", scores.commit_health),
        ("testCoverage", scores.test_coverage),
        ("techStack", scores.tech_stack),
    ];

    let weighted: u32 = inputs
        .iter()
        .zip(WEIGHTS)
        .map(|(&(key, score), weight)| u32::from(clamp_score(key, score)) * weight)
        .sum();

    let overall = (weighted + APPLICABILITY_BASELINE + 50) / 100;
    // Bounded by construction: the weights sum to 90 and the baseline is 8.
    overall.min(u32::from(MAX_SCORE)) as Score
}

fn clamp_score(key: &str, score: Score) -> Score {
    if score > MAX_SCORE {
        tracing::warn!(agent = key, score, "agent score above 100; clamping");
        MAX_SCORE
    } else {
        score
    }
}
