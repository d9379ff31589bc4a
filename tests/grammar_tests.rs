#[cfg(test)]
mod tests {
    use relkit::grammar::{
        ArgOptions, FlagOptions, ParamOptions, Pattern, Registry, Value, ValueType, extract,
    };
    use relkit::{ConfigError, ParseError};

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn pattern_ordering_invariant() {
        let ok = Pattern::compile("<cmd> <a> <b?>").unwrap();
        assert_eq!(ok.parameters().len(), 2);
        assert!(ok.parameters()[0].required);
        assert!(!ok.parameters()[1].required);

        assert!(matches!(
            Pattern::compile("<cmd> <a?> <b>"),
            Err(ConfigError::RequiredAfterOptional { .. })
        ));
    }

    #[test]
    fn cross_namespace_identifier_collision() {
        let mut reg = Registry::new(Pattern::compile("<cmd>").unwrap());
        reg.register_argument("foo|f", ArgOptions::default()).unwrap();
        assert!(matches!(
            reg.register_flag("foo", FlagOptions::default()),
            Err(ConfigError::DuplicateIdentifier { .. })
        ));
        assert!(matches!(
            reg.register_flag("bar|f", FlagOptions::default()),
            Err(ConfigError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn parameter_registration_constraints() {
        let mut reg = Registry::new(Pattern::compile("<cmd> <a> <b?>").unwrap());
        assert!(matches!(
            reg.register_parameter("c", ParamOptions::default()),
            Err(ConfigError::ParameterNotInPattern { .. })
        ));
        reg.register_parameter("a", ParamOptions::default()).unwrap();
        assert!(matches!(
            reg.register_parameter("a", ParamOptions::default()),
            Err(ConfigError::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn casting_semantics() {
        assert_eq!(ValueType::Int.cast("5").unwrap(), Value::Int(5));
        assert!(matches!(
            ValueType::Int.cast("abc"),
            Err(ParseError::InvalidNumber { .. })
        ));
        assert_eq!(ValueType::Float.cast("3.14").unwrap(), Value::Float(3.14));
        assert_eq!(ValueType::Bool.cast("T").unwrap(), Value::Bool(true));
        assert_eq!(ValueType::Bool.cast("no").unwrap(), Value::Bool(false));
        assert_eq!(ValueType::Bool.cast("x").unwrap(), Value::Bool(false));
    }

    #[test]
    fn extraction_consumes_arguments_then_flags() {
        let mut reg = Registry::new(Pattern::compile("<cmd>").unwrap());
        reg.register_argument("foo|f", ArgOptions::default()).unwrap();
        reg.register_flag("x", FlagOptions::default()).unwrap();
        reg.register_flag("y", FlagOptions::default()).unwrap();

        let result = extract(&tokens(&["--foo", "bar", "-x"]), &reg).unwrap();
        assert_eq!(result.arguments["foo"], Value::Str("bar".to_string()));
        assert_eq!(result.flags["x"], true);
        assert_eq!(result.flags["y"], false);
        assert!(result.parameters.is_empty());
    }

    #[test]
    fn positional_assignment_and_overflow() {
        let mut reg = Registry::new(Pattern::compile("<rel> <platform> <branch?>").unwrap());
        reg.register_parameter("platform", ParamOptions::default()).unwrap();
        reg.register_parameter("branch", ParamOptions::default()).unwrap();

        let result = extract(&tokens(&["github"]), &reg).unwrap();
        assert_eq!(
            result.parameters["platform"],
            Value::Str("github".to_string())
        );
        assert!(!result.parameters.contains_key("branch"));

        assert!(matches!(
            extract(&tokens(&["github", "main", "extra"]), &reg),
            Err(ParseError::TooManyParameters {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn empty_stream_extraction_is_idempotent() {
        let mut reg = Registry::new(Pattern::compile("<cmd> <maybe?>").unwrap());
        reg.register_parameter("maybe", ParamOptions::default()).unwrap();
        reg.register_argument("opt", ArgOptions::default()).unwrap();
        reg.register_flag("quiet|q", FlagOptions::default()).unwrap();

        // Extracting twice from an already-consumed stream stays clean
        for _ in 0..2 {
            let result = extract(&[], &reg).unwrap();
            assert!(result.arguments.is_empty());
            assert!(result.parameters.is_empty());
            assert_eq!(result.flags["quiet"], false);
        }
    }
}
