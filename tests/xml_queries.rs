mod common;

use arbor::{ArborError, Document, QueryError, SelectorError};
use common::fixtures::{CATALOG_XML, SCENARIO_XML};
use common::{TestResult, assert_query, id_attributes, load, names};

#[test]
fn scenario_tree_combinators() -> TestResult {
    let doc = Document::from_xml(SCENARIO_XML)?;
    let root = doc.root();

    assert_query(&root, "a c", 3, Some("123"));
    assert_query(&root, "a > c", 0, None);
    assert_query(&root, "b > c", 2, Some("12"));
    assert_eq!(names(&root.find("b + d")?), vec!["d"]);
    assert_eq!(names(&root.find("b ~ d")?), vec!["d"]);
    assert_query(&root, "c ~ c", 1, Some("2"));
    assert_eq!(names(&root.find("a, b")?), vec!["a", "b"]);
    Ok(())
}

#[test]
fn timeline_simple_selectors() -> TestResult {
    let source = load("timeline.xml");
    let doc = source.parse()?;
    let root = doc.root();

    assert_eq!(root.find("created_at")?.len(), 4);
    assert_eq!(root.find("Created_at")?.len(), 0);
    assert_eq!(root.find("status created_at")?.len(), 4);
    assert_eq!(root.find("user created_at")?.len(), 2);
    assert_eq!(root.find("status lang")?.len(), 1);
    Ok(())
}

#[test]
fn timeline_child_and_sibling_selectors() -> TestResult {
    let source = load("timeline.xml");
    let doc = source.parse()?;
    let root = doc.root();

    assert_eq!(root.find("status > created_at")?.len(), 2);
    assert_eq!(root.find("status > lang")?.len(), 0);
    assert_eq!(root.find("statuses > * > created_at")?.len(), 2);
    assert_eq!(root.find("created_at + text")?.len(), 2);
    assert_query(&root, "name ~ lang", 1, Some("en"));
    assert_query(&root, "user > name", 2, Some("AlphaBeta"));
    Ok(())
}

#[test]
fn timeline_attributes_and_cdata() -> TestResult {
    let source = load("timeline.xml");
    let doc = source.parse()?;
    let root = doc.root();

    assert_query(&root, "status[class~=pinned] text", 1, Some("Re: <selectors>"));
    assert_query(&root, "user[id=\"u1\"] name", 1, Some("Alpha"));
    assert_eq!(names(&root.find(":root")?), vec!["statuses"]);
    assert!(root.find("status:root")?.is_empty());
    Ok(())
}

#[test]
fn locator_attribute_operators() -> TestResult {
    let source = load("locator.xml");
    let doc = source.parse()?;
    let root = doc.root();

    assert_eq!(root.find("entity[id=\"poo\"]")?.len(), 1);
    assert_eq!(root.find("entity[lang|=en]")?.len(), 2);
    assert_eq!(root.find("entity[id^=ba]")?.len(), 2);
    assert_eq!(root.find("[id$=oo]")?.len(), 1);
    assert_eq!(root.find("[class*=entity]")?.len(), 1);
    assert_eq!(root.find("[class~=primary]")?.len(), 1);
    assert_eq!(root.find("[class~=main]")?.len(), 0);
    assert_eq!(root.find("[class~=main-entity]")?.len(), 0);
    assert_eq!(root.find("entity[lang]")?.len(), 3);
    Ok(())
}

#[test]
fn locator_nesting_and_empty() -> TestResult {
    let source = load("locator.xml");
    let doc = source.parse()?;
    let root = doc.root();

    let nested = root.find("entity entity")?;
    assert_eq!(nested.len(), 1);
    assert_eq!(nested.first().and_then(|n| n.attribute("id")), Some("nested"));
    assert_eq!(root.find("entity > entity")?, nested);
    assert_eq!(root.find("entity:empty")?, nested);
    assert_eq!(root.find("label + entity")?, nested);
    Ok(())
}

#[test]
fn catalog_sibling_runs() -> TestResult {
    let doc = Document::from_xml(CATALOG_XML)?;
    let root = doc.root();

    let ids = |selector: &str| -> Vec<String> {
        root.find(selector)
            .unwrap()
            .iter()
            .filter_map(|n| n.attribute("id").map(str::to_string))
            .collect()
    };
    assert_eq!(ids("book ~ book"), vec!["b2", "b3"]);
    assert_eq!(ids("book + book"), vec!["b2"]);
    assert_eq!(ids("magazine + book"), vec!["b3"]);
    assert_eq!(ids("catalog > book + magazine"), vec!["m1"]);
    assert_eq!(ids("magazine ~ book"), vec!["b3"]);
    Ok(())
}

#[test]
fn nested_matches_come_back_in_document_order() -> TestResult {
    let doc = Document::from_xml(
        r#"<a id="a1"><x><a id="a2"><c id="c1"/></a></x><c id="c2"/></a>"#,
    )?;
    assert_eq!(id_attributes(&doc.root().find("a > c")?), vec!["c1", "c2"]);

    let doc = Document::from_xml(
        r#"<r><b id="b1"><b id="b2"/><c id="c1"/></b><c id="c2"/></r>"#,
    )?;
    assert_eq!(id_attributes(&doc.root().find("b ~ c")?), vec!["c1", "c2"]);
    assert_eq!(id_attributes(&doc.root().find("b + c")?), vec!["c1", "c2"]);
    Ok(())
}

#[test]
fn sibling_steps_fall_back_to_later_matches() -> TestResult {
    let doc = Document::from_xml(r#"<r><p><b/></p><d id="d1"/><b/><d id="d2"/></r>"#)?;
    let root = doc.root();
    assert_eq!(id_attributes(&root.find("b + d")?), vec!["d2"]);
    assert_eq!(id_attributes(&root.find("b ~ d")?), vec!["d2"]);
    Ok(())
}

#[test]
fn catalog_word_and_dash_matching() -> TestResult {
    let doc = Document::from_xml(CATALOG_XML)?;
    let root = doc.root();

    assert_eq!(root.find("[lang|=en]")?.len(), 2);
    assert_eq!(root.find("[lang^=en]")?.len(), 2);
    // Words split on whitespace only, so "non-fiction" is a single word.
    assert_eq!(root.find("[tags~=fiction]")?.len(), 1);
    assert_eq!(root.find("[tags~=non-fiction]")?.len(), 0);
    assert_eq!(root.find("[tags*=fic]")?.len(), 2);
    assert_eq!(root.find("[tags$=classic]")?.len(), 1);
    assert_eq!(root.find("[id]")?.len(), 4);
    Ok(())
}

#[test]
fn catalog_lists_and_empty() -> TestResult {
    let doc = Document::from_xml(CATALOG_XML)?;
    let root = doc.root();

    assert_query(
        &root,
        "book title, magazine title",
        4,
        Some("DuneHyperionCosmosSpektrum"),
    );
    assert_eq!(root.find("book:empty")?.len(), 0);
    assert_eq!(names(&root.find("note:empty")?), vec!["note"]);
    // Text-only elements count as empty.
    assert_eq!(root.find("*:empty")?.len(), 8);
    Ok(())
}

#[test]
fn result_sets_chain_queries() -> TestResult {
    let doc = Document::from_xml(CATALOG_XML)?;
    let root = doc.root();

    let books = root.find("book")?;
    assert_eq!(books.len(), 3);
    assert_eq!(books.find("title")?.data().as_deref(), Some("DuneHyperionCosmos"));
    assert_eq!(books.children_matching("author")?.len(), 3);
    assert_eq!(books.children().len(), 7);

    let title = books.find("title")?.first().cloned().ok_or("no title")?;
    assert_eq!(title.parent().and_then(|p| p.name().map(str::to_string)), Some("book".to_string()));
    assert_eq!(title.level(), 2);
    Ok(())
}

#[test]
fn children_matching_from_root() -> TestResult {
    let doc = Document::from_xml(CATALOG_XML)?;
    let root = doc.root();

    assert_eq!(root.children_matching("book")?.len(), 3);
    assert_eq!(root.children_matching("title")?.len(), 0);
    assert_eq!(root.children_matching("magazine title")?.len(), 1);
    assert_eq!(root.children().len(), 4);
    Ok(())
}

#[test]
fn node_display() -> TestResult {
    let doc = Document::from_xml(SCENARIO_XML)?;
    let root = doc.root();
    assert!(root.to_string().starts_with("NODE a AT LEVEL 0 (#"));
    Ok(())
}

#[test]
fn malformed_selector_is_rejected_before_traversal() -> TestResult {
    let doc = Document::from_xml(SCENARIO_XML)?;
    let root = doc.root();

    let err = root.find("elem[attr=]").unwrap_err();
    assert!(matches!(
        err,
        QueryError::Selector(SelectorError::MissingValue { .. })
    ));
    assert!(!root.is_materialized());

    let err = doc.find("a >").unwrap_err();
    assert!(matches!(
        err,
        ArborError::Query(QueryError::Selector(SelectorError::TrailingCombinator { .. }))
    ));
    Ok(())
}
