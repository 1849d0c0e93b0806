use super::*;

use shared::{Dataset, LatLng, ProjectId};

fn project(city: &str, status: Status, category: Category) -> Project {
    Project {
        id: ProjectId::new("P-1"),
        name: "Test".into(),
        category,
        status,
        city: city.into(),
        position: LatLng::new(32.78, -79.94),
        budget_usd: 0,
        start_date: String::new(),
        end_date: String::new(),
        links: Vec::new(),
        description: String::new(),
    }
}

#[test]
fn passes_iff_city_status_and_category_all_match() {
    let cities = ["Charleston, SC", "Summerville, SC"];
    let filters = [
        FilterState::select_all(),
        FilterState::select_all().with_city("Charleston, SC"),
        FilterState::select_all().with_status([Status::Active]),
        FilterState::select_all().with_category([Category::Park, Category::Road]),
        FilterState::new("Summerville, SC", [Status::Planned], [Category::Transit]),
    ];

    for city in cities {
        for status in Status::KNOWN {
            for category in Category::KNOWN {
                let p = project(city, status.clone(), category.clone());
                for f in &filters {
                    let expected = (f.city.is_empty() || p.city == f.city)
                        && f.status.contains(&p.status)
                        && f.category.contains(&p.category);
                    assert_eq!(passes(&p, f), expected, "{city} {status} {category} {f:?}");
                }
            }
        }
    }
}

#[test]
fn empty_status_or_category_set_hides_everything() {
    let dataset = Dataset::charleston_demo();
    let no_status = FilterState::select_all().with_status(Vec::<Status>::new());
    let no_category = FilterState::select_all().with_category(Vec::<Category>::new());
    assert!(filter_projects(&dataset, &no_status).is_empty());
    assert!(filter_projects(&dataset, &no_category).is_empty());
}

#[test]
fn city_match_is_exact_and_case_sensitive() {
    let p = project("Charleston, SC", Status::Active, Category::Road);
    assert!(passes(&p, &FilterState::select_all().with_city("Charleston, SC")));
    assert!(!passes(&p, &FilterState::select_all().with_city("charleston, sc")));
    assert!(!passes(&p, &FilterState::select_all().with_city("Charleston SC")));
}

#[test]
fn unknown_values_pass_only_when_explicitly_selected() {
    let p = project("Charleston, SC", Status::from("paused"), Category::from("ferry"));
    assert!(!passes(&p, &FilterState::select_all()));

    let explicit = FilterState::select_all()
        .with_status([Status::from("paused")])
        .with_category([Category::from("ferry")]);
    assert!(passes(&p, &explicit));
}

#[test]
fn filter_preserves_dataset_order() {
    let dataset = Dataset::charleston_demo();
    let active = FilterState::select_all().with_status([Status::Active]);
    let ids: Vec<&str> = filter_projects(&dataset, &active)
        .into_iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, ["CHS-001", "CHS-004", "CHS-005"]);
}
