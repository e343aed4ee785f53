use crate::core::types::{Classification, ClassificationVote};
use crate::patterns::PatternSet;

/// Confidence of a name matching an unlocalized rule
pub const UNLOCALIZED_CONFIDENCE: f64 = 0.8;
/// Confidence of a name matching a fragment rule
pub const FRAGMENT_CONFIDENCE: f64 = 0.6;
/// Confidence of a name matching a chromosome rule
pub const CHROMOSOME_CONFIDENCE: f64 = 0.9;
/// Confidence when no rule matches
pub const NO_MATCH_CONFIDENCE: f64 = 0.3;

/// Classify a scaffold by its name alone.
///
/// Tiers are checked in order and the first hit wins: unlocalized, then
/// fragment, then chromosome rules. A name like `chr1_random` is therefore
/// unlocalized and `chr1_pilon` is unplaced, even though both contain a
/// chromosome-like prefix.
#[must_use]
pub fn classify_by_name(name: &str, patterns: &PatternSet) -> ClassificationVote {
    if patterns.find_unlocalized(name).is_some() {
        return ClassificationVote::new(
            Classification::Unlocalized,
            UNLOCALIZED_CONFIDENCE,
            "name_unlocalized",
        );
    }

    if patterns.find_fragment(name).is_some() {
        return ClassificationVote::new(
            Classification::Unplaced,
            FRAGMENT_CONFIDENCE,
            "name_fragment",
        );
    }

    if let Some((rule, chromosome_id)) = patterns.find_chromosome(name) {
        return ClassificationVote::new(
            Classification::Chromosome,
            CHROMOSOME_CONFIDENCE,
            format!("name_{}", rule.method()),
        )
        .with_chromosome_id(chromosome_id);
    }

    ClassificationVote::new(Classification::Other, NO_MATCH_CONFIDENCE, "name_none")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{merge_patterns, ChromosomeRule, PatternDefinitions};

    fn vote(name: &str) -> ClassificationVote {
        classify_by_name(name, PatternSet::builtin())
    }

    #[test]
    fn test_chr_explicit() {
        let v = vote("chr1");
        assert_eq!(v.classification, Classification::Chromosome);
        assert!((v.confidence - 0.9).abs() < f64::EPSILON);
        assert_eq!(v.method, "name_chr_explicit");
        assert_eq!(v.chromosome_id.as_deref(), Some("1"));
    }

    #[test]
    fn test_chromosome_variants() {
        let cases = [
            ("chrX", "name_chr_explicit", Some("X")),
            ("Chromosome_2", "name_chr_explicit", Some("2")),
            ("chrMT", "name_chr_explicit", Some("MT")),
            ("Super_scaffold_4", "name_super_scaffold", Some("4")),
            ("SUPER_7", "name_SUPER", Some("7")),
            ("LG12", "name_linkage_group", Some("12")),
            ("NC_000001.11", "name_ncbi_refseq", None),
            ("CM000663.2", "name_ncbi_genbank", None),
            ("7", "name_numeric", Some("7")),
            ("HiC_scaffold_3", "name_hic_scaffold", Some("3")),
            ("Scaffold_2_RaGOO", "name_ragoo", Some("2")),
            ("Gm05", "name_soybean_chromosome", Some("05")),
            ("scaffold_9_cov45", "name_scaffold_cov", Some("9")),
        ];

        for (name, method, id) in cases {
            let v = vote(name);
            assert_eq!(v.classification, Classification::Chromosome, "{name}");
            assert_eq!(v.method, method, "{name}");
            assert_eq!(v.chromosome_id.as_deref(), id, "{name}");
        }
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(vote("CHR3").chromosome_id.as_deref(), Some("3"));
        assert_eq!(vote("hic_scaffold_1").method, "name_hic_scaffold");
    }

    #[test]
    fn test_unlocalized_takes_priority() {
        for name in ["chr1_random", "scaffold_random_01", "chrUn_KI270302v1", "chr3_unloc_2"] {
            let v = vote(name);
            assert_eq!(v.classification, Classification::Unlocalized, "{name}");
            assert_eq!(v.method, "name_unlocalized");
            assert!((v.confidence - 0.8).abs() < f64::EPSILON);
            assert!(v.chromosome_id.is_none());
        }
    }

    #[test]
    fn test_fragment_beats_chromosome() {
        for name in ["ctg1", "contig_5", "chr1_pilon", "scaffold_12_arrow_ctg", "chr2_alt"] {
            let v = vote(name);
            assert_eq!(v.classification, Classification::Unplaced, "{name}");
            assert_eq!(v.method, "name_fragment");
            assert!((v.confidence - 0.6).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_no_match() {
        let v = vote("scaffold_1234");
        assert_eq!(v.classification, Classification::Other);
        assert_eq!(v.method, "name_none");
        assert!((v.confidence - 0.3).abs() < f64::EPSILON);
        assert!(v.chromosome_id.is_none());
    }

    #[test]
    fn test_custom_rule_prepended() {
        let custom = PatternDefinitions {
            chromosome_patterns: vec![ChromosomeRule::new(r"^MyScaffold_(\d+)$", "my_scaffold")],
            ..PatternDefinitions::default()
        };
        let patterns = merge_patterns(&custom, true).unwrap();

        let v = classify_by_name("MyScaffold_12", &patterns);
        assert_eq!(v.method, "name_my_scaffold");
        assert_eq!(v.chromosome_id.as_deref(), Some("12"));
    }
}
