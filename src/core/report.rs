use crate::domain::model::AnalyzedStrain;

/// Name of the flat-text report file, overwritten on each run.
pub const REPORT_FILENAME: &str = "strain_analysis.txt";

/// Render the flat-text report, one block per strain.
pub fn render_report(strains: &[AnalyzedStrain]) -> String {
    let mut report = String::new();
    for strain in strains {
        report.push('\n');
        report.push_str(&"=".repeat(50));
        report.push('\n');
        report.push_str(&format!("Strain: {}\n", strain.strain_name));
        report.push_str(&format!("THC: {}\n", strain.thc_percentage));
        report.push_str(&format!("Analysis:\n{}\n", strain.analysis));
    }
    report
}
