//! # Check Parameter Validation Tests
//!
//! Parameters the Pingdom API would reject must never reach it.

use pingdom_operator::crd::{CheckParameters, CheckSpec, CheckType, ValidationError};

fn valid() -> CheckParameters {
    CheckParameters {
        name: Some("homepage".to_string()),
        host: "example.com".to_string(),
        r#type: CheckType::Http,
        ..CheckParameters::default()
    }
}

#[test]
fn test_minimal_parameters_are_valid() {
    assert_eq!(valid().validate(), Ok(()));
}

#[test]
fn test_name_is_required() {
    let missing = CheckParameters {
        name: None,
        ..valid()
    };
    assert_eq!(missing.validate(), Err(ValidationError::MissingName));

    let empty = CheckParameters {
        name: Some(String::new()),
        ..valid()
    };
    assert_eq!(empty.validate(), Err(ValidationError::MissingName));
}

#[test]
fn test_host_is_required() {
    let params = CheckParameters {
        host: String::new(),
        ..valid()
    };
    assert_eq!(params.validate(), Err(ValidationError::MissingHost));
}

#[test]
fn test_every_known_type_is_valid() {
    for name in CheckType::VALUES {
        let params = CheckParameters {
            r#type: CheckType::from(name),
            ..valid()
        };
        assert_eq!(params.validate(), Ok(()), "type {name} should be accepted");
    }
}

#[test]
fn test_unknown_type_is_rejected() {
    for name in ["", "https", "http-custom", "HTTP"] {
        let params = CheckParameters {
            r#type: CheckType::from(name),
            ..valid()
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::InvalidType),
            "type {name:?} should be rejected"
        );
    }
}

#[test]
fn test_port_bounds() {
    for port in [1, 80, 65535] {
        let params = CheckParameters {
            port: Some(port),
            ..valid()
        };
        assert_eq!(params.validate(), Ok(()), "port {port} should be accepted");
    }
    for port in [-1, 0, 65536] {
        let params = CheckParameters {
            port: Some(port),
            ..valid()
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::InvalidPort),
            "port {port} should be rejected"
        );
    }
}

#[test]
fn test_resolution_must_be_a_supported_interval() {
    for resolution in [1, 5, 15, 30, 60] {
        let params = CheckParameters {
            resolution_minutes: Some(resolution),
            ..valid()
        };
        assert_eq!(params.validate(), Ok(()));
    }
    for resolution in [0, 2, 10, 45, 120] {
        let params = CheckParameters {
            resolution_minutes: Some(resolution),
            ..valid()
        };
        assert_eq!(
            params.validate(),
            Err(ValidationError::InvalidResolution),
            "resolution {resolution} should be rejected"
        );
    }
}

#[test]
fn test_first_failure_wins() {
    let params = CheckParameters {
        name: None,
        host: String::new(),
        r#type: CheckType::from("gopher"),
        port: Some(0),
        ..CheckParameters::default()
    };
    assert_eq!(params.validate(), Err(ValidationError::MissingName));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        ValidationError::MissingName.to_string(),
        "check `Name` must be set and not empty"
    );
    assert_eq!(
        ValidationError::InvalidPort.to_string(),
        "check `Port` must be between 1-65535"
    );
    assert_eq!(
        ValidationError::InvalidResolution.to_string(),
        "check `ResolutionMinutes` must be one of 1, 5, 15, 30 or 60"
    );
}

#[test]
fn test_request_parameters_require_valid_spec() {
    let spec = CheckSpec {
        params: CheckParameters {
            port: Some(70000),
            ..valid()
        },
        ..CheckSpec::default()
    };
    assert_eq!(spec.post_params(), Err(ValidationError::InvalidPort));
    assert_eq!(spec.put_params(), Err(ValidationError::InvalidPort));
}

#[test]
fn test_request_parameters_encoding() {
    let spec = CheckSpec {
        params: CheckParameters {
            port: Some(8080),
            resolution_minutes: Some(15),
            user_ids: Some(vec![42, 24]),
            url: Some("/health".to_string()),
            encryption: Some(true),
            ..valid()
        },
        paused: Some(false),
        ..CheckSpec::default()
    };

    let post = spec.post_params().expect("valid spec");
    assert_eq!(post["name"], "homepage");
    assert_eq!(post["host"], "example.com");
    assert_eq!(post["type"], "http");
    assert_eq!(post["port"], "8080");
    assert_eq!(post["resolution"], "15");
    assert_eq!(post["userids"], "42,24");
    assert_eq!(post["url"], "/health");
    assert_eq!(post["encryption"], "true");
    assert_eq!(post["paused"], "false");

    let put = spec.put_params().expect("valid spec");
    assert!(!put.contains_key("type"), "type of an existing check cannot change");
    assert_eq!(put.len(), post.len() - 1);
}
