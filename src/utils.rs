// src/utils.rs

/// Split a comma-separated skill list into trimmed, lower-cased tokens
pub fn normalize_skills(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Space-joined skill document fed to the vectorizer, `None` when no skill remains
pub fn skills_document(input: &str) -> Option<String> {
    let skills = normalize_skills(input);
    if skills.is_empty() {
        None
    } else {
        Some(skills.join(" "))
    }
}

/// Round a probability in `[0, 1]` to a percentage with one decimal place
pub fn to_percent_one_decimal(probability: f64) -> f64 {
    (probability * 1000.0).round() / 10.0
}
