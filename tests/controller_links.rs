//! End-to-end link scenarios against a sample controller.
//!
//! Each test describes one controller method, records a call to it and checks
//! the rendered link.

use std::sync::Arc;

use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};

use fast_links::{
    ArgValue, CapturedCall, CompileError, ControllerMeta, EncodeError, EnumValue, FastLinks,
    IsoFormat, LinkConfig, LinkError, MethodInvocation, MethodMeta, ParamMeta, ParamType,
    SegmentKind, TypeDescriptor, link_to,
};

const SAMPLE: &str = "SampleController";

fn controller() -> Arc<ControllerMeta> {
    Arc::new(ControllerMeta::new(SAMPLE))
}

fn call(method: MethodMeta, arguments: Vec<ArgValue>) -> MethodInvocation {
    MethodInvocation::new(controller(), Arc::new(method), arguments)
}

fn long_list() -> ParamType {
    ParamType::Collection(Box::new(ParamType::Long))
}

fn long_array() -> ParamType {
    ParamType::Array(Box::new(ParamType::Long))
}

fn test_enum() -> ParamType {
    ParamType::Enum("TestEnum".to_string())
}

fn value1() -> ArgValue {
    EnumValue::with_text("VALUE1", "value one").into()
}

fn value2() -> ArgValue {
    EnumValue::new("VALUE2").into()
}

mod dates {
    use super::*;

    fn date_method(ty: ParamType) -> MethodMeta {
        MethodMeta::builder(SAMPLE, "sampleMethodDate")
            .mapping("/sample/{date}")
            .param(ParamMeta::path_variable(
                "date",
                TypeDescriptor::new(ty).with_format(IsoFormat::Date),
            ))
            .build()
    }

    fn time_method(ty: ParamType) -> MethodMeta {
        MethodMeta::builder(SAMPLE, "sampleMethodTime")
            .mapping("/sample/{time}")
            .param(ParamMeta::path_variable(
                "time",
                TypeDescriptor::new(ty).with_format(IsoFormat::DateTime),
            ))
            .build()
    }

    #[test]
    fn local_date_as_date() {
        let day = NaiveDate::from_ymd_opt(2015, 3, 1).unwrap();
        let link = link_to(&call(date_method(ParamType::Date), vec![day.into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/2015-03-01");
    }

    #[test]
    fn date_time_as_date() {
        let now = FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2015, 3, 1, 23, 15, 0)
            .unwrap();
        let link = link_to(&call(date_method(ParamType::DateTime), vec![now.into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/2015-03-01");
    }

    #[test]
    fn utc_date_time_as_date_time() {
        let now = Utc.with_ymd_and_hms(2015, 3, 1, 12, 30, 5).unwrap();
        let link = link_to(&call(time_method(ParamType::DateTime), vec![now.into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/2015-03-01T12:30:05.000Z");
    }

    #[test]
    fn offset_date_time_keeps_offset() {
        let now = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2015, 3, 1, 12, 30, 5)
            .unwrap();
        let link = link_to(&call(time_method(ParamType::DateTime), vec![now.into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/2015-03-01T12:30:05.000+01:00");
    }
}

mod path_and_query {
    use super::*;

    fn sample_method() -> MethodMeta {
        MethodMeta::builder(SAMPLE, "sampleMethod")
            .mapping("/sample/{id}")
            .param(ParamMeta::path_variable("id", ParamType::Long))
            .param(ParamMeta::request_param("id1", ParamType::Long))
            .param(ParamMeta::request_param("id2", ParamType::Long))
            .build()
    }

    #[test]
    fn enum_uses_symbolic_name() {
        let method = MethodMeta::builder(SAMPLE, "sampleMethodEnum")
            .mapping("/sample/{value}")
            .param(ParamMeta::path_variable("value", test_enum()))
            .param(ParamMeta::request_param("value2", test_enum()))
            .build();
        let link = link_to(&call(method, vec![value1(), value2()])).unwrap();
        assert_eq!(link, "http://localhost/sample/VALUE1?value2=VALUE2");
    }

    #[test]
    fn space_is_invalid_path_segment() {
        let method = MethodMeta::builder("ControllerWithMethods", "methodWithPathVariable")
            .mapping("/something/{id}/foo")
            .param(ParamMeta::path_variable("id", ParamType::String))
            .build();
        let err = link_to(&call(method, vec!["with blank".into()])).unwrap_err();
        assert_eq!(
            err,
            LinkError::Encode {
                parameter: "id".to_string(),
                source: EncodeError::Rejected {
                    value: "with blank".to_string(),
                    kind: SegmentKind::PathSegment,
                    position: 4,
                    character: ' ',
                },
            }
        );
    }

    #[test]
    fn null_query_parameter_skipped() {
        let link = link_to(&call(
            sample_method(),
            vec![1_i64.into(), 2_i64.into(), ArgValue::Null],
        ))
        .unwrap();
        assert_eq!(link, "http://localhost/sample/1?id1=2");
    }

    #[test]
    fn leading_null_query_parameter_skipped() {
        let link = link_to(&call(
            sample_method(),
            vec![1_i64.into(), ArgValue::Null, 3_i64.into()],
        ))
        .unwrap();
        assert_eq!(link, "http://localhost/sample/1?id2=3");
    }

    #[test]
    fn all_query_parameters_null() {
        let link = link_to(&call(
            sample_method(),
            vec![1_i64.into(), ArgValue::Null, ArgValue::Null],
        ))
        .unwrap();
        assert_eq!(link, "http://localhost/sample/1");
    }

    #[test]
    fn null_path_variable_is_a_mismatch() {
        let err = link_to(&call(
            sample_method(),
            vec![ArgValue::Null, 2_i64.into(), 3_i64.into()],
        ))
        .unwrap_err();
        assert!(matches!(err, LinkError::ArgumentMismatch { .. }));
    }

    #[test]
    fn path_variables_bound_by_name() {
        let method = MethodMeta::builder(SAMPLE, "noParamNames")
            .mapping("/sample/{id2}/{id1}")
            .param(ParamMeta::path_variable("id1", ParamType::Long))
            .param(ParamMeta::path_variable("id2", ParamType::Long))
            .param(ParamMeta::request_param("id3", ParamType::Long))
            .build();
        let link = link_to(&call(method, vec![1_i64.into(), 2_i64.into(), 3_i64.into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/2/1?id3=3");
    }

    #[test]
    fn type_and_method_mappings_combine() {
        let method = MethodMeta::builder("Orders", "items")
            .mapping("/{id}/items")
            .param(ParamMeta::path_variable("id", ParamType::Long))
            .build();
        let invocation = MethodInvocation::new(
            Arc::new(ControllerMeta::new("Orders").with_mapping("/orders/")),
            Arc::new(method),
            vec![9_i64.into()],
        );
        assert_eq!(link_to(&invocation).unwrap(), "http://localhost/orders/9/items");
    }

    #[test]
    fn unbound_variable_fails_to_compile() {
        let method = MethodMeta::builder(SAMPLE, "broken")
            .mapping("/sample/{missing}")
            .build();
        let err = link_to(&call(method, Vec::new())).unwrap_err();
        assert!(matches!(
            err,
            LinkError::Compile(CompileError::VariableNotFound { ref variable, .. }) if variable == "missing"
        ));
    }
}

mod collections {
    use super::*;

    fn list_param() -> MethodMeta {
        MethodMeta::builder(SAMPLE, "listParam")
            .mapping("/sample/list")
            .param(ParamMeta::request_param("id", ParamType::Long))
            .param(ParamMeta::request_param("ids", long_list()))
            .build()
    }

    fn array_param() -> MethodMeta {
        MethodMeta::builder(SAMPLE, "arrayParam")
            .mapping("/sample/array")
            .param(ParamMeta::request_param("id", ParamType::Long))
            .param(ParamMeta::request_param("ids", long_array()))
            .build()
    }

    #[test]
    fn list_repeats_parameter() {
        let link = link_to(&call(list_param(), vec![1_i64.into(), vec![2_i64, 3, 4].into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/list?id=1&ids=2&ids=3&ids=4");
    }

    #[test]
    fn single_element_list_gives_one_pair() {
        let link = link_to(&call(list_param(), vec![1_i64.into(), vec![7_i64].into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/list?id=1&ids=7");
    }

    #[test]
    fn single_element_array_gives_one_pair() {
        let link = link_to(&call(array_param(), vec![1_i64.into(), [7_i64].into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/array?id=1&ids=7");
    }

    #[test]
    fn single_element_list_as_last_parameter() {
        let method = MethodMeta::builder(SAMPLE, "onlyIds")
            .mapping("/sample/ids")
            .param(ParamMeta::request_param("ids", long_list()))
            .build();
        let link = link_to(&call(method, vec![vec![7_i64].into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/ids?ids=7");
    }

    #[test]
    fn empty_list_contributes_nothing() {
        let link = link_to(&call(list_param(), vec![1_i64.into(), Vec::<i64>::new().into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/list?id=1");
    }

    #[test]
    fn array_repeats_parameter() {
        let link = link_to(&call(array_param(), vec![1_i64.into(), [2_i64, 3, 4].into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/array?id=1&ids=2&ids=3&ids=4");
    }

    #[test]
    fn empty_array_contributes_nothing() {
        let link = link_to(&call(array_param(), vec![1_i64.into(), ArgValue::Array(Vec::new())])).unwrap();
        assert_eq!(link, "http://localhost/sample/array?id=1");
    }

    #[test]
    fn enum_array_uses_symbolic_names() {
        let method = MethodMeta::builder(SAMPLE, "arrayParam")
            .mapping("/sample/{id}")
            .param(ParamMeta::path_variable("id", ParamType::Long))
            .param(ParamMeta::request_param(
                "values",
                ParamType::Array(Box::new(test_enum())),
            ))
            .build();
        let values = ArgValue::Array(vec![value1(), value2()]);
        let link = link_to(&call(method, vec![1_i64.into(), values])).unwrap();
        assert_eq!(link, "http://localhost/sample/1?values=VALUE1&values=VALUE2");
    }

    #[test]
    fn null_element_fails() {
        let ids = ArgValue::List(vec![2_i64.into(), ArgValue::Null]);
        let err = link_to(&call(list_param(), vec![1_i64.into(), ids])).unwrap_err();
        assert!(matches!(
            err,
            LinkError::Encode {
                source: EncodeError::NullElement,
                ..
            }
        ));
    }

    #[test]
    fn list_as_path_variable_joins_elements() {
        let method = MethodMeta::builder(SAMPLE, "many")
            .mapping("/sample/{ids}")
            .param(ParamMeta::path_variable("ids", long_list()))
            .build();
        let link = link_to(&call(method, vec![vec![1_i64, 2].into()])).unwrap();
        assert_eq!(link, "http://localhost/sample/1,2");
    }
}

mod maps {
    use super::*;

    fn map_method(name: &str, mapping: &str, map_type: &str) -> MethodMeta {
        MethodMeta::builder(SAMPLE, name)
            .mapping(mapping)
            .param(ParamMeta::request_param(
                "queryParams",
                ParamType::Map(map_type.to_string()),
            ))
            .build()
    }

    #[test]
    fn maps_are_not_supported() {
        let params = ArgValue::Map(vec![
            ("firstKey".to_string(), "firstValue".into()),
            ("secondKey".to_string(), "secondValue".into()),
        ]);
        let err = link_to(&call(
            map_method("sampleMethodWithMap", "/sample/mapsupport", "Map<String,String>"),
            vec![params],
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            LinkError::Encode {
                source: EncodeError::Unsupported { .. },
                ..
            }
        ));
    }

    #[test]
    fn multimaps_are_not_supported() {
        let params = ArgValue::Map(vec![
            ("key1".to_string(), vec!["value1a", "value1b"].into()),
            ("key2".to_string(), vec!["value2a", "value2b"].into()),
        ]);
        assert!(
            link_to(&call(
                map_method(
                    "sampleMethodWithMultimap",
                    "/sample/multivaluemapsupport",
                    "MultiValueMap<String,String>",
                ),
                vec![params],
            ))
            .is_err()
        );
    }

    #[test]
    fn maps_are_ok_when_null() {
        let link = link_to(&call(
            map_method("sampleMethodWithMap", "/sample/mapsupport", "Map<String,String>"),
            vec![ArgValue::Null],
        ))
        .unwrap();
        assert_eq!(link, "http://localhost/sample/mapsupport");
    }
}

mod facade {
    use super::*;

    fn show() -> MethodMeta {
        MethodMeta::builder(SAMPLE, "show")
            .mapping("/sample/{id}")
            .param(ParamMeta::path_variable("id", ParamType::Long))
            .build()
    }

    #[test]
    fn object_arguments_fill_path_variables() {
        let captured = CapturedCall::new(call(show(), vec![ArgValue::Null]))
            .with_object_parameters(vec!["resolved".into()]);
        assert_eq!(link_to(&captured).unwrap(), "http://localhost/sample/resolved");
    }

    #[test]
    fn missing_invocation() {
        let nothing: Option<CapturedCall> = None;
        assert_eq!(link_to(&nothing), Err(LinkError::NotAnInvocation));
    }

    #[test]
    fn repeated_calls_render_identically() {
        let links = FastLinks::default();
        let invocation = call(show(), vec![77_i64.into()]);
        let first = links.link_to(&invocation).unwrap();
        let second = links.link_to(&invocation).unwrap();
        assert_eq!(first, second);
        assert_eq!(links.cache().len(), 1);
    }

    #[test]
    fn different_arguments_share_template() {
        let links = FastLinks::default();
        assert_eq!(
            links.link_to(&call(show(), vec![1_i64.into()])).unwrap(),
            "http://localhost/sample/1"
        );
        assert_eq!(
            links.link_to(&call(show(), vec![2_i64.into()])).unwrap(),
            "http://localhost/sample/2"
        );
        assert_eq!(links.cache().len(), 1);
    }

    #[test]
    fn enum_overloads_keep_their_own_mappings() {
        let links = FastLinks::default();
        let find = |mapping: &str, variable: &str, enum_type: &str, constant: &str| {
            let method = MethodMeta::builder("Shop", "find")
                .mapping(mapping)
                .param(ParamMeta::path_variable(
                    variable,
                    ParamType::Enum(enum_type.to_string()),
                ))
                .build();
            MethodInvocation::new(
                Arc::new(ControllerMeta::new("Shop")),
                Arc::new(method),
                vec![EnumValue::new(constant).into()],
            )
        };

        assert_eq!(
            links.link_to(&find("/colors/{c}", "c", "Color", "RED")).unwrap(),
            "http://localhost/colors/RED"
        );
        assert_eq!(
            links.link_to(&find("/sizes/{s}", "s", "Size", "XL")).unwrap(),
            "http://localhost/sizes/XL"
        );
    }

    #[test]
    fn object_arguments_then_plain_call() {
        let links = FastLinks::default();
        let captured = CapturedCall::new(call(show(), vec![ArgValue::Null]))
            .with_object_parameters(vec!["x".into()]);
        assert_eq!(links.link_to(&captured).unwrap(), "http://localhost/sample/x");
        assert_eq!(
            links.link_to(&call(show(), vec![5_i64.into()])).unwrap(),
            "http://localhost/sample/5"
        );
    }

    #[test]
    fn custom_base_uri() {
        let links = FastLinks::new(LinkConfig::new().with_base_uri("https://example.org:8443/api"))
            .unwrap();
        assert_eq!(
            links.link_to(&call(show(), vec![5_i64.into()])).unwrap(),
            "https://example.org:8443/api/sample/5"
        );
    }

    #[test]
    fn links_from_many_threads() {
        let links = FastLinks::default();
        std::thread::scope(|scope| {
            for id in 0..16_i64 {
                let links = &links;
                scope.spawn(move || {
                    let link = links.link_to(&call(show(), vec![id.into()])).unwrap();
                    assert_eq!(link, format!("http://localhost/sample/{id}"));
                });
            }
        });
        assert_eq!(links.cache().len(), 1);
    }
}
