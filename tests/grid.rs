#![cfg(feature = "rusqlite")]

mod common;

use common::{names, pluck, schema, setup_db};
use gridquery::prelude::*;
use gridquery::sqlite::JsonRow;
use serde_json::json;

fn run(request: &RequestSpec) -> ResponseEnvelope<JsonRow> {
    run_on("user", request)
}

fn run_on(root: &str, request: &RequestSpec) -> ResponseEnvelope<JsonRow> {
    let schema = schema();
    let db = setup_db();
    QueryCompiler::new(&schema)
        .process(&db, root, None, request)
        .unwrap()
}

#[test]
fn ordered_page_of_ages() {
    let request = RequestSpec::new()
        .column(ColumnSpec::new("age"))
        .order_by(0, "desc")
        .page(0, 2);
    let response = run(&request);

    assert_eq!(pluck(&response.data, "age"), vec![&json!(30), &json!(25)]);
    assert_eq!(response.records_total, 3);
    assert_eq!(response.records_filtered, 3);
}

#[test]
fn global_search_is_case_insensitive() {
    let request = RequestSpec::new()
        .search("smith")
        .column(ColumnSpec::new("name"))
        .column(ColumnSpec::new("age"))
        .column(ColumnSpec::new("joined"))
        .column(ColumnSpec::new("avatar"))
        .order_by(0, "asc");
    let response = run(&request);

    assert_eq!(names(&response.data), ["Ann Smith", "Cara SMITHSON"]);
    assert_eq!(response.records_total, 3);
    assert_eq!(response.records_filtered, 2);
}

#[test]
fn blank_search_counts_everything() {
    let response = run(&RequestSpec::new().search("   ").column(ColumnSpec::new("name")));
    assert_eq!(response.records_filtered, response.records_total);
    assert_eq!(response.data.len(), 3);
}

#[test]
fn relation_prefixes_are_joined_once() {
    let schema = schema();
    let db = setup_db();
    let compiler = QueryCompiler::new(&schema);
    let request = RequestSpec::new()
        .search("research")
        .column(ColumnSpec::new("author.name"))
        .column(ColumnSpec::new("author.department.name"))
        .column(ColumnSpec::new("editor.name"))
        .column(ColumnSpec::new("title"))
        .order_by(0, "asc");

    let plan = compiler
        .compile(Dialect::SQLite, "post", None, &request)
        .unwrap();
    assert_eq!(plan.page.joins().len(), 3);
    let sql = plan.page.render(Dialect::SQLite).sql;
    assert!(sql.contains(r#"LEFT JOIN "users" AS "t0_1" ON "t0"."author_id" = "t0_1"."id""#));
    assert!(sql.contains(r#"LEFT JOIN "departments" AS "t0_2" ON "t0_1"."department_id" = "t0_2"."id""#));
    assert!(sql.contains(r#"LEFT JOIN "users" AS "t0_3" ON "t0"."editor_id" = "t0_3"."id""#));

    let response = compiler.process(&db, "post", None, &request).unwrap();
    assert_eq!(pluck(&response.data, "title"), vec![&json!("Rust tips"), &json!("100% coverage")]);
    assert_eq!(response.records_filtered, 2);
    assert_eq!(response.records_total, 3);
}

/// Seeds a post with neither author nor editor.
fn with_orphan_post() -> gridquery::sqlite::RusqliteBackend {
    let db = setup_db();
    db.conn()
        .execute(
            "INSERT INTO posts (id, title, published_at, author_id, editor_id)
             VALUES (4, 'Smith orphan', '2024-03-01 00:00:00', NULL, NULL)",
            [],
        )
        .unwrap();
    db
}

#[test]
fn ordering_through_missing_relation_keeps_rows() {
    let schema = schema();
    let db = with_orphan_post();
    let request = RequestSpec::new()
        .column(ColumnSpec::new("author.name"))
        .order_by(0, "asc")
        .page(0, -1);

    let response = QueryCompiler::new(&schema)
        .process(&db, "post", None, &request)
        .unwrap();
    assert_eq!((response.records_total, response.records_filtered), (4, 4));
    assert_eq!(response.data.len(), 4);
    assert_eq!(
        pluck(&response.data, "title"),
        vec![&json!("Smith orphan"), &json!("Rust tips"), &json!("Grid basics"), &json!("100% coverage")]
    );
}

#[test]
fn global_search_keeps_rows_without_relation() {
    let schema = schema();
    let db = with_orphan_post();
    let request = RequestSpec::new()
        .search("orphan")
        .column(ColumnSpec::new("title"))
        .column(ColumnSpec::new("author.name"));

    let response = QueryCompiler::new(&schema)
        .process(&db, "post", None, &request)
        .unwrap();
    assert_eq!(response.records_filtered, 1);
    assert_eq!(pluck(&response.data, "title"), vec![&json!("Smith orphan")]);
}

#[test]
fn non_orderable_key_is_skipped() {
    let request = RequestSpec::new()
        .column(ColumnSpec::new("name").orderable(false))
        .column(ColumnSpec::new("age"))
        .order_by(0, "desc")
        .order_by(1, "asc");
    let response = run(&request);
    assert_eq!(names(&response.data), ["Bob Jones", "Cara SMITHSON", "Ann Smith"]);
}

#[test]
fn invalid_path_fails_whole_request() {
    let schema = schema();
    let db = setup_db();
    let compiler = QueryCompiler::new(&schema);
    let request = RequestSpec::new()
        .draw(42)
        .search("x")
        .column(ColumnSpec::new("name"))
        .column(ColumnSpec::new("missing.field"));

    assert!(matches!(
        compiler.process(&db, "user", None, &request),
        Err(GridError::InvalidColumn { .. })
    ));

    let response = compiler.respond(&db, "user", None, &request);
    assert_eq!(response.draw, 42);
    assert_eq!(response.error.as_deref(), Some("Invalid column path: missing.field"));
    assert!(response.data.is_empty());
    assert_eq!((response.records_total, response.records_filtered), (0, 0));
}

#[test]
fn bad_direction_is_configuration_error() {
    let schema = schema();
    let db = setup_db();
    let request = RequestSpec::new()
        .draw(8)
        .column(ColumnSpec::new("name"))
        .order_by(0, "sideways");

    let response = QueryCompiler::new(&schema).respond(&db, "user", None, &request);
    assert_eq!(response.draw, 8);
    assert!(response.error.unwrap().starts_with("Configuration error"));
}

#[test]
fn pagination_only_moves_the_window() {
    let ordered = |start, length| {
        let request = RequestSpec::new()
            .column(ColumnSpec::new("name"))
            .order_by(0, "asc")
            .page(start, length);
        names(&run(&request).data)
    };

    let all = ordered(0, -1);
    assert_eq!(all, ["Ann Smith", "Bob Jones", "Cara SMITHSON"]);
    for (start, length) in [(0, 1), (1, 1), (1, 2), (2, 5), (3, 1)] {
        let end = (start + length).min(all.len());
        assert_eq!(ordered(start as u64, length as i64), all[start.min(end)..end]);
    }
}

#[test]
fn column_filter_match_modes() {
    let cases = [
        (MatchMode::Contains, "SMITH", vec!["Ann Smith", "Cara SMITHSON"]),
        (MatchMode::StartsWith, "bob", vec!["Bob Jones"]),
        (MatchMode::EndsWith, "smith", vec!["Ann Smith"]),
        (MatchMode::Equals, "Ann Smith", vec!["Ann Smith"]),
        (MatchMode::NotEquals, "Ann Smith", vec!["Bob Jones", "Cara SMITHSON"]),
        (MatchMode::NotContains, "smith", vec!["Bob Jones"]),
    ];

    for (mode, value, expected) in cases {
        let request = RequestSpec::new()
            .column(ColumnSpec::new("name").filter(value, mode))
            .order_by(0, "asc")
            .page(0, -1);
        let response = run(&request);
        assert_eq!(names(&response.data), expected, "{mode} {value:?}");
        assert_eq!(response.records_filtered, expected.len() as u64);
        assert_eq!(response.records_total, 3);
    }
}

#[test]
fn integer_filters_only_apply_to_whole_numbers() {
    let filtered = |value: &str, mode| {
        let request = RequestSpec::new()
            .column(ColumnSpec::new("age").filter(value, mode))
            .column(ColumnSpec::new("name"))
            .order_by(1, "asc");
        names(&run(&request).data)
    };

    assert_eq!(filtered("25", MatchMode::Equals), ["Cara SMITHSON"]);
    assert_eq!(filtered(" 25 ", MatchMode::NotEquals), ["Ann Smith", "Bob Jones"]);
    assert_eq!(filtered("2", MatchMode::Contains).len(), 3);
    assert_eq!(filtered("twenty", MatchMode::Equals).len(), 3);
}

#[test]
fn temporal_filters_compare_the_date_part() {
    let filtered = |value: &str, mode| {
        let request = RequestSpec::new()
            .column(ColumnSpec::new("joined").filter(value, mode))
            .column(ColumnSpec::new("name"))
            .order_by(1, "asc");
        names(&run(&request).data)
    };

    assert_eq!(
        filtered("2024-03-05T12:00:00Z", MatchMode::Equals),
        ["Bob Jones", "Cara SMITHSON"]
    );
    assert_eq!(filtered("2024-03", MatchMode::StartsWith), ["Bob Jones", "Cara SMITHSON"]);
    assert_eq!(filtered("2023", MatchMode::Contains), ["Ann Smith"]);
    assert_eq!(filtered("2023-01-15", MatchMode::NotEquals), ["Bob Jones", "Cara SMITHSON"]);
}

#[test]
fn like_wildcards_in_values_are_literal() {
    let search = |value: &str| {
        run_on(
            "post",
            &RequestSpec::new().search(value).column(ColumnSpec::new("title")),
        )
    };

    let percent = search("%");
    assert_eq!(pluck(&percent.data, "title"), vec![&json!("100% coverage")]);
    assert_eq!(search("_").records_filtered, 0);
}

#[test]
fn filtered_count_point() {
    let schema = schema();
    let db = setup_db();
    let request = RequestSpec::new()
        .column(ColumnSpec::new("author.department.name").filter("sales", MatchMode::Contains));

    let response = QueryCompiler::new(&schema)
        .process(&db, "post", None, &request)
        .unwrap();
    assert_eq!(response.records_filtered, 1);
    assert_eq!(pluck(&response.data, "title"), vec![&json!("Grid basics")]);

    let config = GridConfig {
        filtered_count: gridquery::core::FilteredCount::AfterGlobalSearch,
        ..GridConfig::default()
    };
    let response = QueryCompiler::with_config(&schema, config)
        .process(&db, "post", None, &request)
        .unwrap();
    assert_eq!(response.records_filtered, 3);
    assert_eq!(response.data.len(), 1);
}

#[test]
fn base_query_bounds_the_total() {
    let schema = schema();
    let db = setup_db();
    let compiler = QueryCompiler::new(&schema);
    let adults = || {
        SelectQuery::for_entity(schema.entity("user").unwrap())
            .filter(SQL::raw(r#""t0"."age" >="#).append(SQL::parameter(21)))
    };

    let request = RequestSpec::new().search("smith").column(ColumnSpec::new("name"));
    let response = compiler.process(&db, "user", Some(adults()), &request).unwrap();
    assert_eq!((response.records_total, response.records_filtered), (2, 2));

    let request = RequestSpec::new().search("bob").column(ColumnSpec::new("name"));
    let response = compiler.process(&db, "user", Some(adults()), &request).unwrap();
    assert_eq!((response.records_total, response.records_filtered), (2, 0));
    assert!(response.data.is_empty());
}

#[test]
fn page_length_conventions() {
    let page = |start, length| run(&RequestSpec::new().page(start, length));

    assert_eq!(page(1, -1).data.len(), 2);
    let empty = page(0, 0);
    assert!(empty.data.is_empty());
    assert_eq!(empty.records_filtered, 3);

    let schema = schema();
    let db = setup_db();
    let config = GridConfig {
        max_page_length: Some(2),
        ..GridConfig::default()
    };
    let capped = QueryCompiler::with_config(&schema, config)
        .process(&db, "user", None, &RequestSpec::new().page(0, -1))
        .unwrap();
    assert_eq!(capped.data.len(), 2);
    assert_eq!(capped.records_filtered, 3);
}

#[test]
fn wire_request_to_wire_response() {
    let request: RequestSpec = serde_json::from_value(json!({
        "draw": 5,
        "start": 0,
        "length": 1,
        "search": { "value": "" },
        "columns": [
            { "name": "name", "searchable": true, "orderable": true,
              "search": { "value": "a", "matchMode": "contains" } },
            { "name": "department.name", "searchable": true, "orderable": true,
              "search": { "value": "" } }
        ],
        "order": [{ "column": 1, "dir": "asc" }, { "column": 0, "dir": "desc" }]
    }))
    .unwrap();

    let response = run(&request);
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "draw": 5,
            "recordsTotal": 3,
            "recordsFiltered": 2,
            "data": [{ "id": 3, "name": "Cara SMITHSON", "age": 25, "joined": "2024-03-05 09:30:00", "avatar": null }],
            "error": null
        })
    );
}
