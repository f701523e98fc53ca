use crate::{ANALYSIS_TOPIC, Topic};

#[test]
fn test_analysis_topic_uses_well_known_name() {
    assert_eq!(Topic::analysis().as_str(), ANALYSIS_TOPIC);
    assert_eq!(Topic::new(ANALYSIS_TOPIC).unwrap(), Topic::analysis());
}

#[test]
fn test_topic_accepts_simple_names() {
    assert!(Topic::new("tenant-1.fix_results").is_ok());
}

#[test]
fn test_topic_rejects_bad_names() {
    assert!(Topic::new("").is_err());
    assert!(Topic::new("has space").is_err());
    assert!(Topic::new("a".repeat(101)).is_err());
}
