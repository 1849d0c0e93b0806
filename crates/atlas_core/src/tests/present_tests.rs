use super::*;

use shared::Dataset;

#[test]
fn formats_usd_with_thousands_separators() {
    assert_eq!(format_usd(0), "$0");
    assert_eq!(format_usd(999), "$999");
    assert_eq!(format_usd(1_000), "$1,000");
    assert_eq!(format_usd(25_500), "$25,500");
    assert_eq!(format_usd(100_000_000), "$100,000,000");
}

#[test]
fn popup_shows_placeholders_for_unknown_fields() {
    let dataset = Dataset::charleston_demo();
    let popup = PopupContent::for_project(&dataset.projects()[2]);
    assert_eq!(popup.title, "Union Pier Redevelopment — Public Realm Infrastructure");
    assert_eq!(popup.budget, UNKNOWN_BUDGET);
    assert_eq!(popup.dates, "? → ?");
    assert_eq!(popup.category, "building");
    assert_eq!(popup.links, vec!["https://placeholder/union-pier"]);
}

#[test]
fn popup_html_escapes_text_and_marks_links_external() {
    let dataset = Dataset::charleston_demo();
    let mut popup = PopupContent::for_project(&dataset.projects()[5]);
    let html = popup.to_html();
    assert!(html.contains("<strong>West Ashley Greenway &amp; Bikeway Upgrades</strong>"));
    assert!(html.contains(
        "<a href=\"https://placeholder/wag-upgrades\" target=\"_blank\" rel=\"noopener\">link</a>"
    ));

    popup.description = "<script>alert(1)</script>".into();
    assert!(popup
        .to_html()
        .contains("<small>&lt;script&gt;alert(1)&lt;/script&gt;</small>"));
}

#[test]
fn card_html_carries_zoom_target() {
    let dataset = Dataset::charleston_demo();
    let card = ProjectCard::for_project(&dataset.projects()[0]);
    let html = card_html(&card);
    assert!(html.contains("data-zoom-to=\"CHS-001\""));
    assert!(html.contains("Budget: $100,000,000"));
    assert!(html.contains(">source</a>"));
}

#[test]
fn list_html_keeps_card_order() {
    let dataset = Dataset::charleston_demo();
    let cards: Vec<ProjectCard> = dataset.iter().map(ProjectCard::for_project).collect();
    let html = list_html(&cards);
    let first = html.find("CHS-001").expect("first");
    let last = html.find("CHS-006").expect("last");
    assert!(first < last);
    assert_eq!(html.matches("class=\"project-card\"").count(), 6);
}

#[test]
fn escapes_quotes_and_ampersands() {
    assert_eq!(escape_html(r#"a&b "c" 'd'"#), "a&amp;b &quot;c&quot; &#39;d&#39;");
}
