//! Integration tests for level-independent required fields.

use content_studio_core::{ContentRequest, Level, RequestField};

#[test]
fn level_requirements_tests_only_first_tier_is_required_at_every_level() {
    let mut request = ContentRequest::default();

    for sequence in [
        [Level::Quick, Level::Director, Level::Studio],
        [Level::Director, Level::Quick, Level::Director],
        [Level::Studio, Level::Studio, Level::Quick],
    ] {
        for level in sequence {
            request.level = level;
            let required: Vec<_> = RequestField::ALL
                .into_iter()
                .filter(|field| field.is_required())
                .collect();
            assert_eq!(required, vec![RequestField::BrandName, RequestField::Topic]);
            assert_eq!(
                request.missing_required(),
                vec![RequestField::BrandName, RequestField::Topic]
            );
        }
    }
}

#[test]
fn level_requirements_tests_higher_tiers_stay_optional_when_blank() {
    let mut request = ContentRequest {
        level: Level::Director,
        ..ContentRequest::default()
    };
    request.set_field(RequestField::BrandName, "Acme");
    request.set_field(RequestField::Topic, "Hiring interns");
    request.set_field(RequestField::TargetAudience, "");
    request.set_field(RequestField::TextStructure, "");

    assert!(request.validate().is_ok());
}
