use field_core::{ConfigError, FieldConfig, ParticleField};

#[test]
fn default_and_drift_configs_validate() {
    assert_eq!(FieldConfig::default().validate(), Ok(()));
    assert_eq!(FieldConfig::ambient_drift().validate(), Ok(()));
}

#[test]
fn zero_density_divisor_is_rejected() {
    let config = FieldConfig {
        density_divisor: 0.0,
        ..FieldConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::NonPositiveDivisor(0.0)));
}

#[test]
fn inverted_count_bounds_are_rejected() {
    let config = FieldConfig {
        min_dots: 500,
        max_dots: 100,
        ..FieldConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(ConfigError::EmptyCountRange { min: 500, max: 100 })
    );
}

#[test]
fn empty_radius_band_is_rejected() {
    let config = FieldConfig {
        dot_radius_min: 1.5,
        dot_radius_max: 1.0,
        ..FieldConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::EmptyRadiusBand { .. })
    ));
}

#[test]
fn non_positive_proximity_radii_are_rejected() {
    for name in [
        "visibility_radius",
        "connect_radius",
        "reveal_radius",
        "max_dot_distance",
    ] {
        let mut config = FieldConfig::default();
        match name {
            "visibility_radius" => config.visibility_radius = 0.0,
            "connect_radius" => config.connect_radius = -1.0,
            "reveal_radius" => config.reveal_radius = 0.0,
            _ => config.max_dot_distance = f32::NAN,
        }
        assert!(
            matches!(config.validate(), Err(ConfigError::NonPositiveRadius { .. })),
            "{name} should be rejected"
        );
    }
}

#[test]
fn field_construction_propagates_validation() {
    let config = FieldConfig {
        density_divisor: -8000.0,
        ..FieldConfig::default()
    };
    assert!(ParticleField::new(config, 800.0, 600.0, 1).is_err());
}

#[test]
fn options_affect_only_their_formula() {
    let config = FieldConfig {
        density_divisor: 1000.0,
        min_dots: 10,
        max_dots: 50_000,
        ..FieldConfig::default()
    };
    assert_eq!(
        ParticleField::dot_count_for(&config, 1000.0, 100.0),
        100,
        "divisor override must feed the count formula directly"
    );

    let field = ParticleField::new(config, 1000.0, 100.0, 9).expect("valid");
    // The radius band and speed bound still come from the untouched defaults
    for dot in &field.dots {
        assert!(dot.radius >= 0.5 && dot.radius < 1.3);
        assert!(dot.velocity.x.abs() <= 0.15);
    }
}
