use crate::domain::model::AnalyzedStrain;

/// Canned analysis prompt for a single strain.
pub fn analysis_prompt(strain_name: &str, thc_percentage: &str) -> String {
    format!(
        r#"Please analyze the cannabis strain {strain_name} and provide:
1. General Profile:
   * THC content: {thc_percentage}
   * Strain family (Indica/Sativa/Hybrid)
2. Primary Effects:
   * Mental effects (mood, creativity, focus)
   * Physical sensations
   * Duration/onset expectations"#
    )
}

/// Recommendation prompt combining the user's free-text preference with the
/// full analyzed strain list.
pub fn recommendation_prompt(user_preference: &str, strains: &[AnalyzedStrain]) -> String {
    format!(
        r#"Given this list of cannabis strains and their analyses, recommend the best options for someone who says: "{user_preference}"

Here are the strains to consider:

{}

Please provide:
1. Top 2-3 recommended strains with brief explanations why
2. Any relevant warnings or considerations
3. Suggested usage tips"#,
        format_strains_for_prompt(strains)
    )
}

/// Format the analyzed strains as the block list the recommendation prompt
/// embeds.
pub fn format_strains_for_prompt(strains: &[AnalyzedStrain]) -> String {
    let mut formatted = String::new();
    for strain in strains {
        formatted.push_str(&format!("\nStrain: {}\n", strain.strain_name));
        formatted.push_str(&format!("THC: {}\n", strain.thc_percentage));
        formatted.push_str(&format!("Analysis: {}\n", strain.analysis));
        formatted.push_str(&"-".repeat(30));
        formatted.push('\n');
    }
    formatted
}
