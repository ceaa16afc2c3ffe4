//! Tests for LineageService name-based queries over the sample lineage

use rstest::{fixture, rstest};

use bloodline::application::services::LineageService;
use bloodline::application::ApplicationError;
use bloodline::config::Settings;
use bloodline::domain::Vampire;
use bloodline::util::testing;

#[fixture]
fn service() -> LineageService {
    testing::init_test_setup();
    LineageService::from_settings(&Settings::default()).unwrap()
}

fn names(vampires: &[&Vampire]) -> Vec<String> {
    vampires.iter().map(|v| v.name().to_string()).collect()
}

#[rstest]
fn given_sample_when_asking_creator_by_name_then_resolves(service: LineageService) {
    assert_eq!(service.creator_of("Andrew").unwrap().unwrap().name(), "Elgort");
    assert!(service.creator_of("Original").unwrap().is_none());
}

#[rstest]
fn given_sample_when_listing_offspring_then_in_creation_order(service: LineageService) {
    let offspring = service.offspring_of("Original").unwrap();
    assert_eq!(names(&offspring), vec!["Ansel", "Bart"]);
}

#[rstest]
fn given_sample_when_asking_ancestor_by_name_then_resolves(service: LineageService) {
    let ancestor = service.closest_common_ancestor("Andrew", "Sarah").unwrap();
    assert_eq!(ancestor.name(), "Ansel");
    assert_eq!(ancestor.year_converted(), 800);
}

#[rstest]
fn given_sample_when_asking_path_then_starts_at_original(service: LineageService) {
    let path = service.path_to("Andrew").unwrap();
    assert_eq!(names(&path), vec!["Original", "Ansel", "Elgort", "Andrew"]);
}

#[rstest]
#[case(None, 1980, vec!["Andrew"])]
#[case(Some(1550), 1550, vec!["Andrew", "Sarah"])]
fn given_sample_when_filtering_by_year_then_uses_threshold(
    service: LineageService,
    #[case] year: Option<i32>,
    #[case] expected_year: i32,
    #[case] expected: Vec<&str>,
) {
    let (used, found) = service.converted_after("Original", year).unwrap();
    assert_eq!(used, expected_year);
    assert_eq!(names(&found), expected);
}

#[rstest]
fn given_sample_when_searching_from_subtree_then_stays_inside(service: LineageService) {
    assert_eq!(
        service.find("Andrew", Some("Ansel")).unwrap().map(Vampire::name),
        Some("Andrew")
    );
    assert!(service.find("Bart", Some("Ansel")).unwrap().is_none());
    assert!(service.find("Nobody", None).unwrap().is_none());
}

#[rstest]
fn given_unknown_name_when_querying_then_not_found(service: LineageService) {
    assert!(matches!(
        service.is_more_senior("Ansel", "Nobody"),
        Err(ApplicationError::VampireNotFound(name)) if name == "Nobody"
    ));
    assert!(matches!(
        service.find("Andrew", Some("Nobody")),
        Err(ApplicationError::VampireNotFound(_))
    ));
}

#[rstest]
fn given_sample_when_rendering_then_one_tree_per_original(service: LineageService) {
    assert_eq!(service.render().len(), 1);
    assert_eq!(service.total_descendants("Original").unwrap(), 5);
    assert_eq!(service.depth_of("Andrew").unwrap(), 3);
    assert!(service.is_more_senior("Ansel", "Sarah").unwrap());
}
