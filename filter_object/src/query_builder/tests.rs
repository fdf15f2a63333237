//! Query builder tests over derived filter structs

#[cfg(test)]
mod tests {
    use crate::errors::QueryBuilderError;
    use crate::params::ParamMap;
    use crate::query_builder::sql_generation::SqlGenerator;
    use crate::query_builder::{BuildOptions, PageWindow, QueryBuilder};
    use crate::traits::FilterParams;
    use crate::validation::ValidationError;
    use chrono::{DateTime, TimeZone, Utc};
    use config::{PaginationConfig, QueryConfig};
    use filter_derive::FilterParams;
    use type_mapping::{FieldKind, FieldValue, SqlValue};

    #[derive(Debug, Default, Clone, PartialEq, FilterParams)]
    #[filter(sortable = "name, created_at")]
    struct GetUserParam {
        #[filter(param = "name", db = "name")]
        name: String,
        #[filter(param = "email", db = "email")]
        email: Option<String>,
        #[filter(param = "age__gte", db = "age")]
        min_age: i64,
        #[filter(param = "age__lte", db = "age")]
        max_age: i64,
        #[filter(param = "status", db = "status")]
        status: Vec<String>,
        #[filter(param = "id__nin", db = "id")]
        exclude_ids: Vec<i64>,
        #[filter(param = "created_at__gte", db = "created_at")]
        created_from: DateTime<Utc>,
        #[filter(param = "role", db = "roles", json_key = "$[0]")]
        role: Option<String>,
        #[filter(param = "verified", db = "verified")]
        verified: Option<bool>,
        #[filter(param = "active")]
        active: bool,
        #[filter(param = "page")]
        page: i64,
        #[filter(param = "limit")]
        limit: i64,
        #[filter(param = "sortBy")]
        sort_by: Vec<String>,
    }

    #[derive(Debug, Default, FilterParams)]
    struct ProductFilter {
        #[filter(param = "category", db = "category")]
        category: String,
        #[filter(param = "price__lt", db = "price")]
        max_price: f64,
        #[filter(param = "deleted_at", db = "deleted_at")]
        deleted_at: Option<DateTime<Utc>>,
        #[filter(param = "tags", db = "-")]
        tags: Vec<String>,
        #[filter(param = "sortBy")]
        sort_by: String,
        internal_id: u64,
    }

    #[derive(Debug, Default, FilterParams)]
    struct LimitOnly {
        #[filter(param = "city", db = "meta", json_key = "address.city")]
        city: String,
        #[filter(param = "limit")]
        limit: i32,
    }

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap()
    }

    fn params(pairs: &[(&str, &[&str])]) -> ParamMap {
        pairs
            .iter()
            .map(|(k, vs)| (k.to_string(), vs.iter().map(|v| v.to_string()).collect()))
            .collect()
    }

    fn strip_suffix(sql: &str) -> &str {
        [" ORDER BY ", " LIMIT ", " OFFSET "]
            .iter()
            .filter_map(|marker| sql.find(marker))
            .min()
            .map(|idx| &sql[..idx])
            .unwrap_or(sql)
    }

    // ========================================
    // Predicates
    // ========================================

    #[test]
    fn test_absent_fields_build_no_predicates() {
        let mut qb = QueryBuilder::new();
        let (sql, args) = qb.build(&GetUserParam::default()).unwrap();

        assert_eq!(sql, " LIMIT ? OFFSET ?");
        assert_eq!(args, vec![SqlValue::Int(10), SqlValue::Int(0)]);
        assert_eq!(qb.build_count().unwrap(), (String::new(), vec![]));
    }

    #[test]
    fn test_operand_suffix() {
        let filter = GetUserParam {
            min_age: 30,
            ..Default::default()
        };
        let (sql, args) = QueryBuilder::new().build(&filter).unwrap();

        assert_eq!(sql, " WHERE age >= ? LIMIT ? OFFSET ?");
        assert_eq!(
            args,
            vec![SqlValue::Int(30), SqlValue::Int(10), SqlValue::Int(0)]
        );

        let filter = GetUserParam {
            max_age: 40,
            ..Default::default()
        };
        let (sql, _) = QueryBuilder::new().build(&filter).unwrap();
        assert_eq!(sql, " WHERE age <= ? LIMIT ? OFFSET ?");
    }

    #[test]
    fn test_declaration_order_and_argument_order() {
        let filter = GetUserParam {
            name: "john".to_string(),
            email: Some(String::new()),
            min_age: 30,
            status: vec!["active".to_string(), "banned".to_string()],
            exclude_ids: vec![1, 2],
            created_from: new_year(),
            verified: Some(false),
            active: true,
            page: 2,
            limit: 20,
            ..Default::default()
        };

        let (sql, args) = QueryBuilder::new().build(&filter).unwrap();

        assert_eq!(
            sql,
            " WHERE name = ? AND email = ? AND age >= ? AND status IN (?, ?) \
             AND id NOT IN (?, ?) AND created_at >= ? AND verified = ? LIMIT ? OFFSET ?"
        );
        assert_eq!(
            args,
            vec![
                SqlValue::from("john"),
                SqlValue::from(""),
                SqlValue::Int(30),
                SqlValue::from("active"),
                SqlValue::from("banned"),
                SqlValue::Int(1),
                SqlValue::Int(2),
                SqlValue::Timestamp(new_year()),
                SqlValue::Bool(false),
                SqlValue::Int(20),
                SqlValue::Int(20),
            ]
        );
        assert_eq!(SqlGenerator::count_placeholders(&sql), args.len());
    }

    #[test]
    fn test_empty_multi_value_skips() {
        let filter = GetUserParam {
            status: vec![],
            exclude_ids: vec![],
            ..Default::default()
        };
        let (sql, _) = QueryBuilder::new().build(&filter).unwrap();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_json_member_fragment() {
        let filter = GetUserParam {
            role: Some("admin".to_string()),
            name: "john".to_string(),
            ..Default::default()
        };
        let (sql, args) = QueryBuilder::new().build(&filter).unwrap();

        assert_eq!(
            sql,
            " WHERE name = ? AND JSON_UNQUOTE(JSON_EXTRACT(roles, '$[0]')) = 'admin' LIMIT ? OFFSET ?"
        );
        assert_eq!(
            args,
            vec![SqlValue::from("john"), SqlValue::Int(10), SqlValue::Int(0)]
        );
    }

    #[test]
    fn test_unsupported_and_untagged_fields_skip() {
        let filter = ProductFilter {
            tags: vec!["x".to_string()],
            internal_id: 7,
            ..Default::default()
        };
        let (sql, args) = QueryBuilder::new().build(&filter).unwrap();
        assert_eq!(sql, "");
        assert!(args.is_empty());

        let descriptors = ProductFilter::descriptors();
        assert_eq!(descriptors[5].field, "internal_id");
        assert_eq!(descriptors[5].kind, None);
        assert_eq!(filter.field_values()[5], FieldValue::Unsupported);
        assert_eq!(descriptors[2].kind, Some(FieldKind::Temporal));
    }

    #[test]
    fn test_nullable_timestamp() {
        let filter = ProductFilter {
            deleted_at: Some(new_year()),
            max_price: 9.5,
            ..Default::default()
        };
        let (sql, args) = QueryBuilder::new().build(&filter).unwrap();
        assert_eq!(sql, " WHERE price < ? AND deleted_at = ?");
        assert_eq!(
            args,
            vec![SqlValue::Float(9.5), SqlValue::Timestamp(new_year())]
        );
    }

    // ========================================
    // Pagination
    // ========================================

    #[test]
    fn test_extra_limit_requests_one_more_row() {
        let filter = GetUserParam {
            page: 3,
            limit: 20,
            ..Default::default()
        };
        let mut qb = QueryBuilder::new().with_extra_limit();
        let (_, args) = qb.build(&filter).unwrap();

        assert_eq!(args, vec![SqlValue::Int(21), SqlValue::Int(40)]);
        assert_eq!(
            qb.page_window(),
            Some(PageWindow {
                page: 3,
                limit: 20,
                offset: 40,
                fetch_limit: 21,
                extra_limit: true,
            })
        );
    }

    #[test]
    fn test_page_and_limit_are_clamped() {
        let filter = GetUserParam {
            page: -5,
            limit: 10000,
            ..Default::default()
        };
        let mut qb = QueryBuilder::new();
        let (_, args) = qb.build(&filter).unwrap();
        assert_eq!(args, vec![SqlValue::Int(100), SqlValue::Int(0)]);

        let mut qb = QueryBuilder::new().with_pagination(PaginationConfig::new(5, 1, 50));
        let (_, args) = qb.build(&GetUserParam::default()).unwrap();
        assert_eq!(args, vec![SqlValue::Int(5), SqlValue::Int(0)]);
    }

    #[test]
    fn test_huge_page_from_params_does_not_overflow() {
        let filter = GetUserParam::from_params(&params(&[
            ("page", &["100000000000000000"]),
            ("limit", &["100"]),
        ]))
        .unwrap();
        assert_eq!(filter.page, 100_000_000_000_000_000);

        let mut qb = QueryBuilder::new().with_extra_limit();
        let (sql, args) = qb.build(&filter).unwrap();
        assert_eq!(sql, " LIMIT ? OFFSET ?");

        let page = i64::MAX / 100;
        assert_eq!(
            args,
            vec![SqlValue::Int(101), SqlValue::Int((page - 1) * 100)]
        );
        assert_eq!(qb.page_window().map(|w| w.page), Some(page));
    }

    #[test]
    fn test_zero_limit_config_still_pages() {
        let mut qb = QueryBuilder::new().with_pagination(PaginationConfig::new(0, 0, 100));
        let (_, args) = qb.build(&GetUserParam::default()).unwrap();
        assert_eq!(args, vec![SqlValue::Int(1), SqlValue::Int(0)]);
    }

    #[test]
    fn test_limit_without_page_has_no_offset() {
        let filter = LimitOnly {
            city: "Jakarta".to_string(),
            limit: 15,
        };
        let mut qb = QueryBuilder::new().with_options(BuildOptions::from(QueryConfig {
            extra_limit: true,
        }));
        let (sql, args) = qb.build(&filter).unwrap();

        assert_eq!(
            sql,
            " WHERE JSON_CONTAINS(meta, JSON_QUOTE('Jakarta'), '$.address.city') LIMIT ?"
        );
        assert_eq!(args, vec![SqlValue::Int(16)]);
    }

    #[test]
    fn test_no_pagination_fields() {
        let mut qb = QueryBuilder::new().with_extra_limit();
        let (sql, _) = qb.build(&ProductFilter::default()).unwrap();
        assert!(!sql.contains("LIMIT"));
        assert_eq!(qb.page_window(), None);
    }

    // ========================================
    // Count query
    // ========================================

    #[test]
    fn test_count_matches_row_predicates() {
        let filter = GetUserParam {
            name: "john".to_string(),
            status: vec!["active".to_string()],
            role: Some("dev".to_string()),
            sort_by: vec!["-created_at".to_string()],
            page: 2,
            limit: 5,
            ..Default::default()
        };
        let mut qb = QueryBuilder::new().with_extra_limit();
        let (sql, args) = qb.build(&filter).unwrap();
        let (count_sql, count_args) = qb.build_count().unwrap();

        assert_eq!(strip_suffix(&sql), count_sql);
        assert_eq!(&args[..count_args.len()], &count_args[..]);
        assert_eq!(
            count_sql,
            " WHERE name = ? AND status IN (?) AND JSON_UNQUOTE(JSON_EXTRACT(roles, '$[0]')) = 'dev'"
        );
    }

    #[test]
    fn test_count_before_build() {
        assert_eq!(
            QueryBuilder::new().build_count(),
            Err(QueryBuilderError::NotBuilt)
        );
        assert_eq!(QueryBuilder::new().page_window(), None);
    }

    // ========================================
    // Ordering
    // ========================================

    #[test]
    fn test_sort_tokens() {
        let filter = GetUserParam {
            sort_by: vec!["name:desc".to_string(), "-created_at".to_string()],
            ..Default::default()
        };
        let (sql, _) = QueryBuilder::new().build(&filter).unwrap();
        assert_eq!(sql, " ORDER BY name DESC, created_at DESC LIMIT ? OFFSET ?");

        let filter = GetUserParam {
            sort_by: vec!["name, +created_at".to_string()],
            ..Default::default()
        };
        let (sql, _) = QueryBuilder::new().build(&filter).unwrap();
        assert_eq!(sql, " ORDER BY name ASC, created_at ASC LIMIT ? OFFSET ?");
    }

    #[test]
    fn test_unknown_sort_column_is_error() {
        let filter = GetUserParam {
            sort_by: vec!["age".to_string()],
            ..Default::default()
        };
        let mut qb = QueryBuilder::new();
        assert_eq!(
            qb.build(&filter),
            Err(QueryBuilderError::UnknownSortColumn("age".to_string()))
        );
        assert_eq!(qb.build_count(), Err(QueryBuilderError::NotBuilt));

        let filter = GetUserParam {
            sort_by: vec!["name; DROP TABLE user".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            QueryBuilder::new().build(&filter),
            Err(QueryBuilderError::UnknownSortColumn(_))
        ));
    }

    #[test]
    fn test_invalid_sort_direction() {
        let filter = GetUserParam {
            sort_by: vec!["name:up".to_string()],
            ..Default::default()
        };
        assert_eq!(
            QueryBuilder::new().build(&filter),
            Err(QueryBuilderError::InvalidSortDirection("name:up".to_string()))
        );
    }

    #[test]
    fn test_sortable_override() {
        let filter = GetUserParam {
            sort_by: vec!["age:desc".to_string()],
            ..Default::default()
        };
        let (sql, _) = QueryBuilder::new()
            .with_sortable_columns(&["age"])
            .build(&filter)
            .unwrap();
        assert_eq!(sql, " ORDER BY age DESC LIMIT ? OFFSET ?");

        let mut qb = QueryBuilder::new().with_sortable_columns(&["select"]);
        let filter = GetUserParam {
            sort_by: vec!["select".to_string()],
            ..Default::default()
        };
        assert!(matches!(
            qb.build(&filter),
            Err(QueryBuilderError::InvalidSortColumn {
                source: ValidationError::ReservedKeyword(_),
                ..
            })
        ));
    }

    #[test]
    fn test_default_sortable_is_db_columns() {
        assert_eq!(
            ProductFilter::sortable_columns(),
            &["category", "price", "deleted_at"]
        );

        let filter = ProductFilter {
            sort_by: "-price".to_string(),
            ..Default::default()
        };
        let (sql, _) = QueryBuilder::new().build(&filter).unwrap();
        assert_eq!(sql, " ORDER BY price DESC");
    }

    // ========================================
    // Param codec
    // ========================================

    #[test]
    fn test_from_params() {
        let filter = GetUserParam::from_params(&params(&[
            ("name", &["john"]),
            ("age__gte", &["30"]),
            ("status", &["active", "banned"]),
            ("created_at__gte", &["2022-01-01 07:00:00 +07:00 WIB"]),
            ("verified", &["hoho"]),
            ("active", &["T"]),
            ("page", &["2"]),
            ("sortBy", &["-created_at"]),
            ("unknown", &["ignored"]),
        ]))
        .unwrap();

        assert_eq!(filter.name, "john");
        assert_eq!(filter.min_age, 30);
        assert_eq!(filter.status, vec!["active", "banned"]);
        assert_eq!(filter.created_from, new_year());
        assert_eq!(filter.verified, None);
        assert!(filter.active);
        assert_eq!(filter.page, 2);
        assert_eq!(filter.limit, 0);
        assert_eq!(filter.sort_by, vec!["-created_at"]);
    }

    #[test]
    fn test_from_params_invalid_value() {
        let err = GetUserParam::from_params(&params(&[("age__gte", &["thirty"])])).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value 'thirty' for parameter 'age__gte': expected a 64-bit integer");
    }

    #[test]
    fn test_params_round_trip() {
        let filter = GetUserParam {
            name: "john".to_string(),
            email: Some(String::new()),
            min_age: -3,
            status: vec!["a".to_string(), "b".to_string()],
            exclude_ids: vec![i64::MAX],
            created_from: Utc.timestamp_opt(1_650_000_000, 987_654_321).unwrap(),
            role: None,
            verified: Some(true),
            active: true,
            page: 4,
            limit: 25,
            sort_by: vec!["name:asc".to_string()],
            ..Default::default()
        };

        let encoded = filter.to_params();
        assert!(!encoded.contains_key("role"));
        assert_eq!(GetUserParam::from_params(&encoded).unwrap(), filter);
    }

    #[test]
    fn test_timestamp_formats_decode_to_same_filter() {
        let inputs = [
            "2022-01-01T00:00:00Z",
            "2022-01-01",
            "2022-01-01 00:00:00",
            "2022-01-01T07:00:00+07:00",
            "2022-01-01T00:00:00.000Z",
        ];
        for input in inputs {
            let filter =
                GetUserParam::from_params(&params(&[("created_at__gte", &[input])])).unwrap();
            assert_eq!(filter.created_from, new_year(), "{}", input);
        }
    }
}
