use serde_json::{Value, json};

/// The small tree most selector behaviour is described against.
pub const SCENARIO_XML: &str = "<a><b><c>1</c><c>2</c></b><d><c>3</c></d></a>";

/// A catalog mixing nesting, attributes and sibling runs.
pub const CATALOG_XML: &str = r#"<catalog>
  <book id="b1" lang="en-US" tags="fiction classic">
    <title>Dune</title>
    <author>Herbert</author>
  </book>
  <book id="b2" lang="en">
    <title>Hyperion</title>
    <author>Simmons</author>
    <note/>
  </book>
  <magazine id="m1" lang="de">
    <title>Spektrum</title>
  </magazine>
  <book id="b3" lang="fr-CA" tags="non-fiction">
    <title>Cosmos</title>
    <author>Sagan</author>
  </book>
</catalog>"#;

/// Rows of records, the shape most JSON sources take.
pub fn records() -> Value {
    json!({
        "meta": { "count": 2, "source": "fixture" },
        "rows": [
            { "id": "r1", "kind": "alpha", "score": 9.5, "flags": { "hidden": false } },
            { "id": "r2", "kind": "beta-test", "score": 7, "flags": { "hidden": true } }
        ]
    })
}
